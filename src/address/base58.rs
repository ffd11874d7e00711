//! Base58Check legacy addresses
//!
//! Layout: version byte + 20-byte hash160 + 4-byte checksum, where the
//! checksum is the first four bytes of SHA256(SHA256(version || hash160)).

use super::types::{AddressInfo, AddressType, InvalidReason, Network};
use crate::constants::BASE58_ADDRESS_LEN;
use crate::crypto::{checksum, CHECKSUM_LEN};

/// One row of the version-byte table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionEntry {
    pub version: u8,
    pub address_type: AddressType,
    pub network: Network,
}

/// Version bytes accepted by the chain's consensus rules
pub const VERSION_TABLE: [VersionEntry; 4] = [
    VersionEntry {
        version: 0x30,
        address_type: AddressType::P2pkh,
        network: Network::Mainnet,
    },
    VersionEntry {
        version: 0x6f,
        address_type: AddressType::P2pkh,
        network: Network::Testnet,
    },
    VersionEntry {
        version: 0x32,
        address_type: AddressType::P2sh,
        network: Network::Mainnet,
    },
    VersionEntry {
        version: 0x3a,
        address_type: AddressType::P2sh,
        network: Network::Testnet,
    },
];

/// Look up a version byte
pub fn lookup_version(version: u8) -> Option<&'static VersionEntry> {
    VERSION_TABLE.iter().find(|entry| entry.version == version)
}

/// Decode and classify a Base58Check address
pub fn parse_base58(address: &str) -> Result<AddressInfo, InvalidReason> {
    let decoded = bs58::decode(address)
        .into_vec()
        .map_err(|_| InvalidReason::BadEncoding)?;

    if decoded.len() != BASE58_ADDRESS_LEN {
        return Err(InvalidReason::BadLength);
    }

    let (body, supplied) = decoded.split_at(BASE58_ADDRESS_LEN - CHECKSUM_LEN);

    // Verify checksum
    if supplied != &checksum(body)[..] {
        return Err(InvalidReason::BadChecksum);
    }

    let version = body[0];
    let entry = lookup_version(version).ok_or(InvalidReason::UnknownVersion(version))?;

    Ok(AddressInfo::new(address, entry.network, entry.address_type))
}
