//! Cryptography module - SHA-256 digests and Base58Check checksums

mod hash;

pub use hash::*;
