//! Address module - decoding, classification and validation
//!
//! Supports Base58Check (P2PKH/P2SH), native segwit (P2WPKH/P2WSH/P2TR)
//! and MWEB addresses on mainnet, testnet and regtest.

mod base58;
mod classify;
mod segwit;
mod types;

pub use base58::{lookup_version, VersionEntry, VERSION_TABLE};
pub use classify::{get_address_info, validate};
pub use segwit::words_to_bytes;
pub use types::*;
