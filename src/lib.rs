//! Litecoin (LTC) wallet core library
//!
//! Address classification and validation for the three encodings the chain
//! uses (Base58Check, segwit Bech32/Bech32m and MWEB), display subunit
//! conversion, BIP21 payment URIs and normalization of buy/sell provider
//! transaction records.
//!
//! Everything here is synchronous and free of shared mutable state.

pub mod address;
pub mod bip21;
pub mod crypto;
pub mod metadata;
pub mod payment;
pub mod units;

pub use address::{get_address_info, validate, AddressInfo, AddressType, InvalidAddress, Network};

/// Protocol constants - HARD-CODED, NEVER CONFIGURABLE
pub mod constants {
    /// Base units (litoshis) per whole coin
    pub const LITOSHIS_PER_LTC: f64 = 100_000_000.0;

    /// URI scheme used in BIP21 payment requests
    pub const URI_SCHEME: &str = "litecoin";

    /// Decoded length of a Base58Check address: version + hash160 + checksum
    pub const BASE58_ADDRESS_LEN: usize = 25;

    /// Default Bech32 string limit (BIP173)
    pub const SEGWIT_MAX_LEN: usize = 90;

    /// MWEB addresses carry two public keys and exceed the BIP173 limit
    pub const MWEB_MAX_LEN: usize = 121;

    /// Witness program length of an MWEB address (scan key + spend key)
    pub const MWEB_PROGRAM_LEN: usize = 66;

    /// Highest witness version a segwit address may carry
    pub const MAX_WITNESS_VERSION: u8 = 16;

    /// Segwit human-readable parts
    pub const HRP_MAINNET: &str = "ltc";
    pub const HRP_TESTNET: &str = "tltc";
    pub const HRP_REGTEST: &str = "rltc";

    /// MWEB human-readable parts
    pub const MWEB_HRP_MAINNET: &str = "ltcmweb";
    pub const MWEB_HRP_TESTNET: &str = "tmweb";
    pub const MWEB_HRP_REGTEST: &str = "rmweb";
}
