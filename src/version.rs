/// Argon2 version tag. Controls two behaviors of the fill pipeline: whether
/// `G`'s output overwrites or XOR-accumulates into the destination block in
/// passes after the first, and whether the version number is mixed into
/// `H₀` at all.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
#[repr(u32)]
pub enum Version {
    /// Legacy. `G` always overwrites; `H₀` does not include a version
    /// field.
    V0x10 = 0x10,
    /// Current. `G` overwrites in pass 0 and XOR-accumulates afterward;
    /// `H₀` includes the version field.
    V0x13 = 0x13,
}

impl Version {
    pub fn as_u32(self) -> u32 {
        self as u32
    }

    /// Whether `H₀` includes this version's tag.
    pub fn tags_prehash(self) -> bool {
        matches!(self, Version::V0x13)
    }

    /// Whether `G`'s result XOR-accumulates into the destination instead
    /// of overwriting it, for the given pass.
    pub fn xor_accumulates(self, pass: u32) -> bool {
        match self {
            Version::V0x10 => false,
            Version::V0x13 => pass > 0,
        }
    }
}

impl Default for Version {
    fn default() -> Self {
        Version::V0x13
    }
}

impl TryFrom<u32> for Version {
    type Error = crate::error::Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0x10 => Ok(Version::V0x10),
            0x13 => Ok(Version::V0x13),
            _ => Err(crate::error::Error::IncorrectType),
        }
    }
}
