//! Payment input resolution
//!
//! Scanned QR codes, pasted text and deep links arrive either as a bare
//! address or as a `litecoin:` URI. This module accepts both, classifies the
//! address and converts any requested amount into litoshis and into the
//! user's display subunit.

use crate::address::{get_address_info, AddressInfo, InvalidAddress, Network};
use crate::bip21::{decode_bip21, Bip21Error};
use crate::constants::URI_SCHEME;
use crate::units::{litecoin_to_subunit, subunit_to_sats, Subunit};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Payment input errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    #[error(transparent)]
    Uri(#[from] Bip21Error),
    #[error(transparent)]
    Address(#[from] InvalidAddress),
    #[error("Address is for {found}, expected {expected}")]
    WrongNetwork { expected: Network, found: Network },
}

/// A validated payment destination
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentTarget {
    pub info: AddressInfo,
    /// Requested amount in litoshis
    pub amount_sats: Option<u64>,
    /// Requested amount in the user's subunit
    pub display_amount: Option<f64>,
    pub label: Option<String>,
    pub message: Option<String>,
}

impl PaymentTarget {
    pub fn address(&self) -> &str {
        self.info.address()
    }
}

fn is_payment_uri(input: &str) -> bool {
    let bytes = input.as_bytes();
    let scheme = URI_SCHEME.as_bytes();
    bytes
        .get(..scheme.len())
        .map_or(false, |head| head.eq_ignore_ascii_case(scheme))
        && bytes.get(scheme.len()) == Some(&b':')
}

fn check_network(info: &AddressInfo, network: Option<Network>) -> Result<(), PaymentError> {
    match network {
        Some(expected) if info.network() != expected => {
            warn!(%expected, found = %info.network(), "payment address on wrong network");
            Err(PaymentError::WrongNetwork {
                expected,
                found: info.network(),
            })
        }
        _ => Ok(()),
    }
}

/// Resolve raw user input into a payment destination
///
/// `network`, when given, restricts the accepted addresses to that network.
/// `subunit` selects the unit of `display_amount`.
pub fn resolve_payment_input(
    input: &str,
    network: Option<Network>,
    subunit: Subunit,
) -> Result<PaymentTarget, PaymentError> {
    let input = input.trim();

    if !is_payment_uri(input) {
        let info = get_address_info(input)?;
        check_network(&info, network)?;
        debug!(
            address_type = %info.address_type(),
            network = %info.network(),
            "resolved bare address"
        );
        return Ok(PaymentTarget {
            info,
            amount_sats: None,
            display_amount: None,
            label: None,
            message: None,
        });
    }

    let request = decode_bip21(input)?;
    let info = get_address_info(&request.address)?;
    check_network(&info, network)?;

    // BIP21 amounts are whole coins
    let amount = request.options.amount;
    let amount_sats =
        amount.map(|coins| subunit_to_sats(coins, Subunit::Litecoin).round() as u64);
    let display_amount = amount.map(|coins| litecoin_to_subunit(coins, subunit));

    debug!(
        address_type = %info.address_type(),
        network = %info.network(),
        ?amount_sats,
        "resolved payment uri"
    );

    Ok(PaymentTarget {
        info,
        amount_sats,
        display_amount,
        label: request.options.label,
        message: request.options.message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::AddressType;
    use crate::crypto::checksum;

    fn legacy(version: u8) -> String {
        let mut bytes = vec![version];
        bytes.extend_from_slice(&[0xab; 20]);
        let sum = checksum(&bytes);
        bytes.extend_from_slice(&sum);
        bs58::encode(bytes).into_string()
    }

    #[test]
    fn test_bare_address() {
        let address = legacy(0x30);
        let input = format!("  {}\n", address);
        let target = resolve_payment_input(&input, None, Subunit::Litecoin).unwrap();
        assert_eq!(target.address(), address);
        assert_eq!(target.info.address_type(), AddressType::P2pkh);
        assert_eq!(target.amount_sats, None);
    }

    #[test]
    fn test_uri_with_amount_in_lites() {
        let address = legacy(0x32);
        let uri = format!("litecoin:{}?amount=0.5&message=rent", address);
        let target = resolve_payment_input(&uri, Some(Network::Mainnet), Subunit::Lites).unwrap();
        assert_eq!(target.address(), address);
        assert_eq!(target.amount_sats, Some(50_000_000));
        assert_eq!(target.display_amount, Some(500.0));
        assert_eq!(target.message.as_deref(), Some("rent"));
    }

    #[test]
    fn test_wrong_network() {
        let uri = format!("litecoin:{}", legacy(0x6f));
        let err =
            resolve_payment_input(&uri, Some(Network::Mainnet), Subunit::Litecoin).unwrap_err();
        assert_eq!(
            err,
            PaymentError::WrongNetwork {
                expected: Network::Mainnet,
                found: Network::Testnet,
            }
        );
    }

    #[test]
    fn test_invalid_address_in_uri() {
        let err =
            resolve_payment_input("litecoin:nope?amount=1", None, Subunit::Litecoin).unwrap_err();
        assert!(matches!(err, PaymentError::Address(_)));
    }

    #[test]
    fn test_invalid_amount_in_uri() {
        let uri = format!("litecoin:{}?amount=-3", legacy(0x30));
        let err = resolve_payment_input(&uri, None, Subunit::Litecoin).unwrap_err();
        assert!(matches!(err, PaymentError::Uri(Bip21Error::InvalidAmount(_))));
    }

    #[test]
    fn test_tiny_amount_rounds_to_whole_litoshis() {
        let uri = format!("LITECOIN:{}?amount=0.00000001", legacy(0x30));
        let target = resolve_payment_input(&uri, None, Subunit::Photons).unwrap();
        assert_eq!(target.amount_sats, Some(1));
    }
}
