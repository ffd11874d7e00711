//! SHA-256 hashing
//!
//! Base58Check addresses are protected by the first four bytes of a
//! double SHA-256 over the version byte and payload.

use sha2::{Digest, Sha256};

/// Length of a Base58Check checksum in bytes
pub const CHECKSUM_LEN: usize = 4;

/// Hash arbitrary bytes using SHA-256
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// SHA-256 applied twice
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// Base58Check checksum of `body` (version byte followed by payload)
pub fn checksum(body: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = double_sha256(body);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        // SHA-256("abc")
        assert_eq!(
            sha256(b"abc"),
            [
                0xba, 0x78, 0x16, 0xbf, 0x8f, 0x01, 0xcf, 0xea, 0x41, 0x41, 0x40, 0xde, 0x5d, 0xae,
                0x22, 0x23, 0xb0, 0x03, 0x61, 0xa3, 0x96, 0x17, 0x7a, 0x9c, 0xb4, 0x10, 0xff, 0x61,
                0xf2, 0x00, 0x15, 0xad,
            ]
        );
    }

    #[test]
    fn test_double_sha256_empty() {
        assert_eq!(
            double_sha256(b""),
            [
                0x5d, 0xf6, 0xe0, 0xe2, 0x76, 0x13, 0x59, 0xd3, 0x0a, 0x82, 0x75, 0x05, 0x8e, 0x29,
                0x9f, 0xcc, 0x03, 0x81, 0x53, 0x45, 0x45, 0xf5, 0x5c, 0xf4, 0x3e, 0x41, 0x98, 0x3f,
                0x5d, 0x4c, 0x94, 0x56,
            ]
        );
    }

    #[test]
    fn test_checksum_is_digest_prefix() {
        let body = [0x30u8; 21];
        assert_eq!(checksum(&body), [0x13, 0xe3, 0x9e, 0x5d]);
        assert_eq!(checksum(&body)[..], double_sha256(&body)[..4]);
    }
}
