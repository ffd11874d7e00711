//! Address classification and validation
//!
//! Dispatch is by prefix, in a fixed order: segwit, then MWEB, then
//! Base58Check for everything else. The first matching branch decides the
//! outcome; a string never falls through to a later branch once a prefix
//! has matched.

use super::base58::parse_base58;
use super::segwit::{parse_mweb, parse_segwit};
use super::types::{AddressInfo, InvalidAddress, Network};
use tracing::debug;

/// Leading characters that route an address to the segwit decoder
const SEGWIT_PREFIXES: [&str; 3] = ["ltc1", "tltc", "rltc1"];

/// Leading characters that route an address to the MWEB decoder
const MWEB_PREFIXES: [&str; 3] = ["ltcmwe", "tmweb1", "rmweb1"];

fn has_prefix(address: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|prefix| {
        address
            .as_bytes()
            .get(..prefix.len())
            .map_or(false, |head| head.eq_ignore_ascii_case(prefix.as_bytes()))
    })
}

/// Classify an address string
///
/// Returns the address family, network and script type, or
/// [`InvalidAddress`] if the string does not decode under the branch its
/// prefix selects.
pub fn get_address_info(address: &str) -> Result<AddressInfo, InvalidAddress> {
    let result = if has_prefix(address, &SEGWIT_PREFIXES) {
        parse_segwit(address)
    } else if has_prefix(address, &MWEB_PREFIXES) {
        parse_mweb(address)
    } else {
        parse_base58(address)
    };

    result.map_err(|reason| {
        debug!(%reason, len = address.len(), "address rejected");
        InvalidAddress::from(reason)
    })
}

/// Check whether `address` is valid, optionally for a specific network
///
/// Never fails: any classification error is reported as `false`.
pub fn validate(address: &str, network: Option<Network>) -> bool {
    match get_address_info(address) {
        Ok(info) => network.map_or(true, |expected| info.network() == expected),
        Err(_) => false,
    }
}
