//! BIP21 payment URIs
//!
//! `<scheme>:<address>[?amount=<coins>&label=<text>&message=<text>&...]`
//!
//! The codec only handles the URI grammar. It does not validate the
//! address, and `amount` stays in whole coins; callers classify the address
//! and convert the amount to litoshis before acting on a request.

use crate::constants::URI_SCHEME;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use url::form_urlencoded;

/// BIP21 errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Bip21Error {
    #[error("Invalid BIP21 URI: {0}")]
    InvalidUri(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

/// Query parameters of a payment request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentOptions {
    /// Requested amount in whole coins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Any other parameters, last occurrence wins
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

/// A decoded payment URI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub address: String,
    pub options: PaymentOptions,
}

fn check_amount(amount: f64, raw: &str) -> Result<f64, Bip21Error> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Bip21Error::InvalidAmount(raw.to_string()));
    }
    Ok(amount)
}

fn parse_amount(raw: &str) -> Result<f64, Bip21Error> {
    let amount = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| Bip21Error::InvalidAmount(raw.to_string()))?;
    check_amount(amount, raw)
}

/// Percent-encode one query component, spaces as `%20`
fn encode_component(s: &str) -> String {
    // byte_serialize writes spaces as '+' and a literal '+' as %2B
    form_urlencoded::byte_serialize(s.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Decode a payment URI for `scheme`
pub fn decode(uri: &str, scheme: &str) -> Result<PaymentRequest, Bip21Error> {
    let scheme_matches = uri
        .get(..scheme.len())
        .map_or(false, |head| head.eq_ignore_ascii_case(scheme));
    if !scheme_matches || uri.as_bytes().get(scheme.len()) != Some(&b':') {
        return Err(Bip21Error::InvalidUri(uri.to_string()));
    }

    let rest = &uri[scheme.len() + 1..];
    let (address, query) = match rest.split_once('?') {
        Some((address, query)) => (address, query),
        None => (rest, ""),
    };

    let mut options = PaymentOptions::default();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            // An empty amount is treated as absent
            "amount" if value.is_empty() => options.amount = None,
            "amount" => options.amount = Some(parse_amount(&value)?),
            "label" => options.label = Some(value.into_owned()),
            "message" => options.message = Some(value.into_owned()),
            _ => {
                options.extra.insert(key.into_owned(), value.into_owned());
            }
        }
    }

    Ok(PaymentRequest {
        address: address.to_string(),
        options,
    })
}

/// Encode a payment URI for `scheme`
pub fn encode(
    address: &str,
    options: &PaymentOptions,
    scheme: &str,
) -> Result<String, Bip21Error> {
    let mut pairs: Vec<(&str, String)> = Vec::new();

    if let Some(amount) = options.amount {
        let amount = check_amount(amount, &amount.to_string())?;
        pairs.push(("amount", amount.to_string()));
    }
    if let Some(label) = &options.label {
        pairs.push(("label", label.clone()));
    }
    if let Some(message) = &options.message {
        pairs.push(("message", message.clone()));
    }
    for (key, value) in &options.extra {
        pairs.push((key.as_str(), value.clone()));
    }

    let query = pairs
        .iter()
        .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
        .collect::<Vec<_>>()
        .join("&");

    let mut uri = format!("{}:{}", scheme, address);
    if !query.is_empty() {
        uri.push('?');
        uri.push_str(&query);
    }
    Ok(uri)
}

/// Decode a `litecoin:` URI
pub fn decode_bip21(uri: &str) -> Result<PaymentRequest, Bip21Error> {
    decode(uri, URI_SCHEME)
}

/// Encode a `litecoin:` URI
pub fn encode_bip21(address: &str, options: &PaymentOptions) -> Result<String, Bip21Error> {
    encode(address, options, URI_SCHEME)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "LQ3B36Yv2rBTxdgAdYpU2UcEZsaNwXeATk";

    #[test]
    fn test_decode_bare_address() {
        let request = decode_bip21(&format!("litecoin:{}", ADDR)).unwrap();
        assert_eq!(request.address, ADDR);
        assert_eq!(request.options, PaymentOptions::default());
    }

    #[test]
    fn test_decode_with_options() {
        let uri = format!(
            "litecoin:{}?amount=0.25&label=Corner%20Shop&message=Order+42&r=https%3A%2F%2Fexample.com",
            ADDR
        );
        let request = decode_bip21(&uri).unwrap();
        assert_eq!(request.address, ADDR);
        assert_eq!(request.options.amount, Some(0.25));
        assert_eq!(request.options.label.as_deref(), Some("Corner Shop"));
        assert_eq!(request.options.message.as_deref(), Some("Order 42"));
        assert_eq!(
            request.options.extra.get("r").map(String::as_str),
            Some("https://example.com")
        );
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let request = decode_bip21(&format!("LiteCoin:{}?amount=1", ADDR)).unwrap();
        assert_eq!(request.options.amount, Some(1.0));
    }

    #[test]
    fn test_wrong_scheme_rejected() {
        let uri = format!("bitcoin:{}", ADDR);
        assert_eq!(decode_bip21(&uri), Err(Bip21Error::InvalidUri(uri.clone())));
        assert!(decode_bip21("litecoin").is_err());
        assert!(decode_bip21("litecoinx:abc").is_err());
        assert!(decode_bip21("").is_err());
    }

    #[test]
    fn test_bad_amounts_rejected() {
        for amount in ["-1", "abc", "inf", "NaN"] {
            let uri = format!("litecoin:{}?amount={}", ADDR, amount);
            assert!(
                matches!(decode_bip21(&uri), Err(Bip21Error::InvalidAmount(_))),
                "amount {amount} should be rejected"
            );
        }
    }

    #[test]
    fn test_empty_amount_is_absent() {
        let request = decode_bip21(&format!("litecoin:{}?amount=", ADDR)).unwrap();
        assert_eq!(request.options.amount, None);
    }

    #[test]
    fn test_encode() {
        assert_eq!(
            encode_bip21(ADDR, &PaymentOptions::default()).unwrap(),
            format!("litecoin:{}", ADDR)
        );

        let options = PaymentOptions {
            amount: Some(0.0001),
            label: Some("Corner Shop".to_string()),
            message: None,
            extra: BTreeMap::new(),
        };
        assert_eq!(
            encode_bip21(ADDR, &options).unwrap(),
            format!("litecoin:{}?amount=0.0001&label=Corner%20Shop", ADDR)
        );
    }

    #[test]
    fn test_encode_rejects_bad_amounts() {
        for amount in [-0.5, f64::NAN, f64::INFINITY] {
            let options = PaymentOptions {
                amount: Some(amount),
                ..Default::default()
            };
            assert!(matches!(encode_bip21(ADDR, &options), Err(Bip21Error::InvalidAmount(_))));
        }
    }

    #[test]
    fn test_encode_decode_agree() {
        let mut extra = BTreeMap::new();
        extra.insert("req-note".to_string(), "a+b & c".to_string());
        let options = PaymentOptions {
            amount: Some(12.5),
            label: Some("Ł shop".to_string()),
            message: Some("thanks!".to_string()),
            extra,
        };
        let uri = encode_bip21(ADDR, &options).unwrap();
        let request = decode_bip21(&uri).unwrap();
        assert_eq!(request.address, ADDR);
        assert_eq!(request.options, options);
    }

    #[test]
    fn test_custom_scheme() {
        let uri = encode("tltc1qxyz", &PaymentOptions::default(), "testcoin").unwrap();
        assert_eq!(uri, "testcoin:tltc1qxyz");
        assert_eq!(decode(&uri, "testcoin").unwrap().address, "tltc1qxyz");
    }
}
