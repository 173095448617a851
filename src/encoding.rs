//! The PHC-style encoded string `$argon2X$v=..$m=..,t=..,p=..$salt$tag`
//! and its unpadded Base64 codec. Not a general PHC-string parser: it
//! covers exactly the fields this crate's `Params`/`Algorithm`/`Version`
//! need.

use crate::algorithm::Algorithm;
use crate::error::{Error, Result};
use crate::params::Params;
use crate::version::Version;

const LUT64: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

fn lut(n: u8) -> u8 {
    LUT64[(n & 0x3f) as usize]
}

fn delut(c: u8) -> Option<u8> {
    match c {
        b'+' => Some(62),
        b'/' => Some(63),
        b'A'..=b'Z' => Some(c - b'A'),
        b'a'..=b'z' => Some(c - b'a' + 26),
        b'0'..=b'9' => Some(c - b'0' + 52),
        _ => None,
    }
}

fn base64_no_pad(bytes: &[u8]) -> String {
    let mut out = Vec::with_capacity((bytes.len() * 4).div_ceil(3));
    let mut chunks = bytes.chunks_exact(3);
    for c in &mut chunks {
        out.push(lut(c[0] >> 2));
        out.push(lut(c[0] << 4 | c[1] >> 4));
        out.push(lut(c[1] << 2 | c[2] >> 6));
        out.push(lut(c[2]));
    }
    match *chunks.remainder() {
        [a] => {
            out.push(lut(a >> 2));
            out.push(lut(a << 4));
        }
        [a, b] => {
            out.push(lut(a >> 2));
            out.push(lut(a << 4 | b >> 4));
            out.push(lut(b << 2));
        }
        _ => {}
    }
    String::from_utf8(out).expect("base64 alphabet is ASCII")
}

fn debase64_no_pad(bytes: &[u8]) -> Result<Vec<u8>> {
    if bytes.len() % 4 == 1 {
        return Err(Error::DecodingFailure);
    }
    let mut out = Vec::with_capacity(bytes.len() / 4 * 3);
    let mut chunks = bytes.chunks_exact(4);
    for c in &mut chunks {
        let (a, b, cc, d) = (
            delut(c[0]).ok_or(Error::DecodingFailure)?,
            delut(c[1]).ok_or(Error::DecodingFailure)?,
            delut(c[2]).ok_or(Error::DecodingFailure)?,
            delut(c[3]).ok_or(Error::DecodingFailure)?,
        );
        out.push(a << 2 | b >> 4);
        out.push(b << 4 | cc >> 2);
        out.push(cc << 6 | d);
    }
    match chunks.remainder() {
        [a, b] => {
            let (a, b) = (delut(*a).ok_or(Error::DecodingFailure)?, delut(*b).ok_or(Error::DecodingFailure)?);
            out.push(a << 2 | b >> 4);
        }
        [a, b, c] => {
            let (a, b, c) = (
                delut(*a).ok_or(Error::DecodingFailure)?,
                delut(*b).ok_or(Error::DecodingFailure)?,
                delut(*c).ok_or(Error::DecodingFailure)?,
            );
            out.push(a << 2 | b >> 4);
            out.push(b << 4 | c >> 2);
        }
        _ => {}
    }
    Ok(out)
}

fn algorithm_code(algorithm: Algorithm) -> &'static str {
    match algorithm {
        Algorithm::Argon2d => "d",
        Algorithm::Argon2i => "i",
        Algorithm::Argon2id => "id",
        Algorithm::Argon2ds => "ds",
    }
}

fn parse_algorithm_code(code: &str) -> Result<Algorithm> {
    match code {
        "d" => Ok(Algorithm::Argon2d),
        "i" => Ok(Algorithm::Argon2i),
        "id" => Ok(Algorithm::Argon2id),
        "ds" => Ok(Algorithm::Argon2ds),
        _ => Err(Error::DecodingFailure),
    }
}

/// Everything `decode` recovers from an encoded string.
pub struct Decoded {
    pub algorithm: Algorithm,
    pub version: Version,
    pub params: Params,
    pub salt: Vec<u8>,
    pub tag: Vec<u8>,
}

/// Renders `$argon2X$v=V$m=M,t=T,p=P$salt$tag`.
pub fn encode(algorithm: Algorithm, version: Version, params: &Params, salt: &[u8], tag: &[u8]) -> String {
    format!(
        "$argon2{}$v={}$m={},t={},p={}${}${}",
        algorithm_code(algorithm),
        version.as_u32(),
        params.block_count(),
        params.t_cost(),
        params.p_cost(),
        base64_no_pad(salt),
        base64_no_pad(tag),
    )
}

/// Parses an encoded string produced by [`encode`] (or a compatible one).
pub fn decode(encoded: &str) -> Result<Decoded> {
    let rest = encoded.strip_prefix("$argon2").ok_or(Error::DecodingFailure)?;
    let (code, rest) = rest.split_once('$').ok_or(Error::DecodingFailure)?;
    let algorithm = parse_algorithm_code(code)?;

    let (v_field, rest) = rest.split_once('$').ok_or(Error::DecodingFailure)?;
    let v: u32 = v_field.strip_prefix("v=").ok_or(Error::DecodingFailure)?.parse().map_err(|_| Error::DecodingFailure)?;
    let version = Version::try_from(v).map_err(|_| Error::DecodingFailure)?;

    let (params_field, rest) = rest.split_once('$').ok_or(Error::DecodingFailure)?;
    let mut m = None;
    let mut t = None;
    let mut p = None;
    for kv in params_field.split(',') {
        let (k, v) = kv.split_once('=').ok_or(Error::DecodingFailure)?;
        let v: u32 = v.parse().map_err(|_| Error::DecodingFailure)?;
        match k {
            "m" => m = Some(v),
            "t" => t = Some(v),
            "p" => p = Some(v),
            _ => return Err(Error::DecodingFailure),
        }
    }
    let (m, t, p) = (
        m.ok_or(Error::DecodingFailure)?,
        t.ok_or(Error::DecodingFailure)?,
        p.ok_or(Error::DecodingFailure)?,
    );
    let params = Params::new(t, m, p)?;

    let (salt_b64, tag_b64) = rest.split_once('$').ok_or(Error::DecodingFailure)?;
    let salt = debase64_no_pad(salt_b64.as_bytes())?;
    let tag = debase64_no_pad(tag_b64.as_bytes())?;

    Ok(Decoded { algorithm, version, params, salt, tag })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_round_trips_every_remainder_length() {
        for input in [&b""[..], b"f", b"fo", b"foo", b"foob", b"fooba", b"foobar"] {
            let encoded = base64_no_pad(input);
            assert_eq!(debase64_no_pad(encoded.as_bytes()).unwrap(), input);
        }
    }

    #[test]
    fn encode_then_decode_recovers_every_field() {
        let params = Params::new(2, 16, 1).unwrap();
        let tag = [7u8; 32];
        let encoded = encode(Algorithm::Argon2id, Version::V0x13, &params, b"somesalt", &tag);
        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded.algorithm, Algorithm::Argon2id);
        assert_eq!(decoded.version, Version::V0x13);
        assert_eq!(decoded.params.t_cost(), 2);
        assert_eq!(decoded.salt, b"somesalt");
        assert_eq!(decoded.tag, tag);
    }

    #[test]
    fn malformed_prefix_is_rejected() {
        assert_eq!(decode("$bcrypt$...").unwrap_err(), Error::DecodingFailure);
    }
}
