/// Which addressing rule and (for Argon2ds) hardening `G` uses.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum Algorithm {
    /// Data-dependent addressing throughout. Fastest, but the reference
    /// index depends on the password, which makes cache-timing side
    /// channels possible.
    Argon2d,
    /// Data-independent addressing throughout. Safe against those side
    /// channels at the cost of being more vulnerable to time-memory
    /// trade-off attacks at low pass counts.
    Argon2i,
    /// Data-independent addressing for the first half of pass 0, then
    /// data-dependent like Argon2d. The recommended default.
    Argon2id,
    /// Argon2d hardened against GPU/ASIC attacks by perturbing `G` with a
    /// password-dependent lookup table. Predates the final PHC standard;
    /// kept for compatibility with hashes produced by implementations
    /// that still support it.
    Argon2ds,
}

impl Algorithm {
    /// `y`, the variant tag mixed into `H₀`. Argon2ds predates the PHC tag
    /// assignment and was never given one of its own, so it reuses
    /// Argon2d's tag, treating it as an Argon2d hardening rather than a
    /// distinct PHC identity.
    pub fn h0_tag(self) -> u32 {
        match self {
            Algorithm::Argon2d | Algorithm::Argon2ds => 0,
            Algorithm::Argon2i => 1,
            Algorithm::Argon2id => 2,
        }
    }

    /// Whether segments of this variant at `(pass, slice)` use
    /// data-independent addressing.
    pub fn data_independent_at(self, pass: u32, slice: u32) -> bool {
        match self {
            Algorithm::Argon2i => true,
            Algorithm::Argon2id => pass == 0 && slice < crate::params::SYNC_POINTS / 2,
            Algorithm::Argon2d | Algorithm::Argon2ds => false,
        }
    }

    pub fn uses_sbox(self) -> bool {
        matches!(self, Algorithm::Argon2ds)
    }
}

impl Default for Algorithm {
    fn default() -> Self {
        Algorithm::Argon2id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argon2i_is_always_data_independent() {
        assert!(Algorithm::Argon2i.data_independent_at(0, 0));
        assert!(Algorithm::Argon2i.data_independent_at(3, 3));
    }

    #[test]
    fn argon2id_switches_at_slice_two_of_pass_zero() {
        let a = Algorithm::Argon2id;
        assert!(a.data_independent_at(0, 0));
        assert!(a.data_independent_at(0, 1));
        assert!(!a.data_independent_at(0, 2));
        assert!(!a.data_independent_at(1, 0));
    }

    #[test]
    fn argon2d_and_ds_are_never_data_independent() {
        assert!(!Algorithm::Argon2d.data_independent_at(0, 0));
        assert!(!Algorithm::Argon2ds.data_independent_at(0, 0));
    }
}
