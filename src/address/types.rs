//! Address classification types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Target network of an address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
    Regtest,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Regtest => "regtest",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a network name is not recognized
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown network: {0}")]
pub struct UnknownNetwork(pub String);

impl FromStr for Network {
    type Err = UnknownNetwork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            "regtest" => Ok(Network::Regtest),
            other => Err(UnknownNetwork(other.to_string())),
        }
    }
}

/// Output script family an address pays to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressType {
    P2pkh,
    P2sh,
    P2wpkh,
    P2wsh,
    P2tr,
    Mweb,
}

impl AddressType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressType::P2pkh => "p2pkh",
            AddressType::P2sh => "p2sh",
            AddressType::P2wpkh => "p2wpkh",
            AddressType::P2wsh => "p2wsh",
            AddressType::P2tr => "p2tr",
            AddressType::Mweb => "mweb",
        }
    }

    /// Whether addresses of this type are written in the bech32 family
    pub fn is_bech32(&self) -> bool {
        !matches!(self, AddressType::P2pkh | AddressType::P2sh)
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying an address string
///
/// Only the classifier builds these, so `network` and `address_type` always
/// come from the same decoded prefix or version byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressInfo {
    address: String,
    #[serde(rename = "bech32")]
    is_bech32: bool,
    network: Network,
    #[serde(rename = "type")]
    address_type: AddressType,
}

impl AddressInfo {
    pub(crate) fn new(address: &str, network: Network, address_type: AddressType) -> Self {
        Self {
            address: address.to_string(),
            is_bech32: address_type.is_bech32(),
            network,
            address_type,
        }
    }

    /// The input string, unmodified
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn is_bech32(&self) -> bool {
        self.is_bech32
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn address_type(&self) -> AddressType {
        self.address_type
    }
}

/// Why an address was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidReason {
    #[error("malformed encoding")]
    BadEncoding,
    #[error("bad length")]
    BadLength,
    #[error("checksum mismatch")]
    BadChecksum,
    #[error("unknown prefix")]
    UnknownPrefix,
    #[error("unknown version byte 0x{0:02x}")]
    UnknownVersion(u8),
    #[error("witness version {0} out of range")]
    BadWitnessVersion(u8),
    #[error("invalid padding")]
    BadPadding,
}

/// The single error kind of the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid address: {reason}")]
pub struct InvalidAddress {
    pub reason: InvalidReason,
}

impl From<InvalidReason> for InvalidAddress {
    fn from(reason: InvalidReason) -> Self {
        Self { reason }
    }
}
