use crate::HashError;

/// ASCII byte to nibble value; 255 marks a non-hex byte.
const NIBBLE: [u8; 256] = {
    let mut table = [255u8; 256];
    let mut i = 0usize;
    while i < 256 {
        let c = i as u8;
        table[i] = match c {
            b'0'..=b'9' => c - b'0',
            b'a'..=b'f' => c - b'a' + 10,
            b'A'..=b'F' => c - b'A' + 10,
            _ => 255,
        };
        i += 1;
    }
    table
};

const DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Lowercase hex encoding of `bytes`.
pub fn encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(DIGITS[(b >> 4) as usize] as char);
        out.push(DIGITS[(b & 0x0f) as usize] as char);
    }
    out
}

/// Decode `hex` into `out`, which must be exactly half the length of `hex`.
///
/// Both cases are accepted.
pub fn decode_into(hex: &str, out: &mut [u8]) -> Result<(), HashError> {
    let digits = hex.as_bytes();
    if digits.len() != out.len() * 2 {
        return Err(HashError::InvalidHexLength {
            expected: out.len() * 2,
            actual: digits.len(),
        });
    }
    for (i, pair) in digits.chunks_exact(2).enumerate() {
        let hi = nibble(pair[0], i * 2)?;
        let lo = nibble(pair[1], i * 2 + 1)?;
        out[i] = (hi << 4) | lo;
    }
    Ok(())
}

fn nibble(c: u8, position: usize) -> Result<u8, HashError> {
    match NIBBLE[c as usize] {
        255 => Err(HashError::InvalidHex {
            position,
            character: c as char,
        }),
        v => Ok(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_is_lowercase() {
        assert_eq!(encode(&[0xde, 0xad, 0xbe, 0xef, 0x00, 0x0f]), "deadbeef000f");
        assert_eq!(encode(&[]), "");
    }

    #[test]
    fn decode_accepts_both_cases() {
        let mut out = [0u8; 4];
        decode_into("DeAdBEef", &mut out).unwrap();
        assert_eq!(out, [0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn decode_reports_bad_character() {
        let mut out = [0u8; 4];
        match decode_into("deadgoof", &mut out).unwrap_err() {
            HashError::InvalidHex {
                position: 4,
                character: 'g',
            } => {}
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn decode_rejects_wrong_length() {
        let mut out = [0u8; 2];
        assert!(matches!(
            decode_into("abc", &mut out).unwrap_err(),
            HashError::InvalidHexLength {
                expected: 4,
                actual: 3
            }
        ));
    }
}
