//! Display projection of provider records
//!
//! Providers label currencies from their own side of the trade, so which
//! field is "crypto" and which is "fiat" flips between buys and sells.

use super::{MoonpayMeta, OnramperMeta, ProviderMeta, ProviderMetaCollection, TxType};
use serde::Serialize;
use tracing::debug;

const UNKNOWN: &str = "unknown";
const DEFAULT_CRYPTO: &str = "ltc";

/// A provider transaction ready for display
///
/// Every field is populated; gaps in the provider record become
/// `"unknown"`, an empty string or `0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayedMetadata {
    pub provider_tx_id: String,
    pub crypto_tx_id: String,
    pub created_at: String,
    pub updated_at: String,
    pub wallet_address: String,
    pub crypto_currency: String,
    pub fiat_currency: String,
    pub crypto_currency_amount: f64,
    pub fiat_currency_amount: f64,
    pub usd_rate: f64,
    pub eur_rate: f64,
    pub gbp_rate: f64,
    pub total_fee: f64,
    pub blockchain_fee: f64,
    #[serde(rename = "tipLFFee")]
    pub tip_lf_fee: f64,
    pub provider_fee: f64,
    pub tx_details_url: String,
    pub status: String,
    pub country: String,
    pub payment_method: String,
}

/// Fee components tracked separately by providers
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Fees {
    /// Network (blockchain) fee
    pub network: f64,
    /// Flat partner fee
    pub extra: f64,
    /// Provider's own fee
    pub provider: f64,
}

impl Fees {
    pub fn new(network: Option<f64>, extra: Option<f64>, provider: Option<f64>) -> Self {
        Self {
            network: network.unwrap_or(0.0),
            extra: extra.unwrap_or(0.0),
            provider: provider.unwrap_or(0.0),
        }
    }

    pub fn total(&self) -> f64 {
        self.network + self.extra + self.provider
    }
}

pub(crate) fn text_or(value: Option<&String>, default: &str) -> String {
    value.map_or_else(|| default.to_string(), String::clone)
}

/// Pick the (crypto, fiat) pair out of a provider's (base, quote) pair
fn orient<T>(tx_type: TxType, base: T, quote: T) -> (T, T) {
    match tx_type {
        TxType::Sell => (base, quote),
        TxType::Buy => (quote, base),
    }
}

fn project_moonpay(meta: &MoonpayMeta, tx_type: TxType) -> DisplayedMetadata {
    let (crypto_currency, fiat_currency) =
        orient(tx_type, meta.base_currency.as_ref(), meta.quote_currency.as_ref());
    let (crypto_amount, fiat_amount) =
        orient(tx_type, meta.base_currency_amount, meta.quote_currency_amount);
    let fees = Fees::new(meta.network_fee_amount, meta.extra_fee_amount, meta.fee_amount);

    let tx_details_url = match (&meta.return_url, &meta.id) {
        (Some(url), Some(id)) => format!("{}?transactionId={}", url, id),
        _ => UNKNOWN.to_string(),
    };

    DisplayedMetadata {
        provider_tx_id: text_or(meta.id.as_ref(), ""),
        crypto_tx_id: text_or(meta.crypto_transaction_id.as_ref(), ""),
        created_at: text_or(meta.created_at.as_ref(), UNKNOWN),
        updated_at: text_or(meta.updated_at.as_ref(), UNKNOWN),
        wallet_address: text_or(meta.wallet_address.as_ref(), ""),
        crypto_currency: text_or(crypto_currency, DEFAULT_CRYPTO),
        fiat_currency: text_or(fiat_currency, UNKNOWN),
        crypto_currency_amount: crypto_amount.unwrap_or(0.0),
        fiat_currency_amount: fiat_amount.unwrap_or(0.0),
        usd_rate: meta.usd_rate.unwrap_or(0.0),
        eur_rate: meta.eur_rate.unwrap_or(0.0),
        gbp_rate: meta.gbp_rate.unwrap_or(0.0),
        total_fee: fees.total(),
        blockchain_fee: fees.network,
        tip_lf_fee: fees.extra,
        provider_fee: fees.provider,
        tx_details_url,
        status: text_or(meta.status.as_ref(), UNKNOWN),
        country: text_or(meta.country.as_ref(), UNKNOWN),
        payment_method: text_or(meta.card_type.as_ref(), UNKNOWN),
    }
}

fn project_onramper(meta: &OnramperMeta, tx_type: TxType) -> DisplayedMetadata {
    // source/in is what the user pays, target/out is what they receive
    let (crypto_currency, fiat_currency) =
        orient(tx_type, meta.source_currency.as_ref(), meta.target_currency.as_ref());
    let (crypto_amount, fiat_amount) = orient(tx_type, meta.in_amount, meta.out_amount);
    let id = text_or(meta.onramp_transaction_id.as_ref(), "");

    DisplayedMetadata {
        crypto_tx_id: text_or(meta.transaction_hash.as_ref(), ""),
        created_at: text_or(meta.status_date.as_ref(), UNKNOWN),
        updated_at: text_or(meta.status_date.as_ref(), UNKNOWN),
        wallet_address: text_or(meta.wallet_address.as_ref(), ""),
        crypto_currency: text_or(crypto_currency, DEFAULT_CRYPTO),
        fiat_currency: text_or(fiat_currency, UNKNOWN),
        crypto_currency_amount: crypto_amount.unwrap_or(0.0),
        fiat_currency_amount: fiat_amount.unwrap_or(0.0),
        // Onramper reports neither exchange rates nor a fee breakdown
        usd_rate: 0.0,
        eur_rate: 0.0,
        gbp_rate: 0.0,
        total_fee: 0.0,
        blockchain_fee: 0.0,
        tip_lf_fee: 0.0,
        provider_fee: 0.0,
        tx_details_url: format!("onramper{}", id),
        provider_tx_id: id,
        status: text_or(meta.status.as_ref(), UNKNOWN),
        country: text_or(meta.country.as_ref(), UNKNOWN),
        payment_method: text_or(meta.payment_method.as_ref(), UNKNOWN),
    }
}

/// Project the provider record of a transaction for display
///
/// Uses the first provider present in `collection`. Returns `None` when no
/// provider has a record.
pub fn displayed_metadata_projection(
    collection: &ProviderMetaCollection,
    tx_type: TxType,
) -> Option<DisplayedMetadata> {
    let entry = collection.entries().next();
    if entry.is_none() {
        debug!(?tx_type, "no provider metadata to project");
    }

    entry.map(|entry| match entry {
        ProviderMeta::Moonpay(meta) => project_moonpay(meta, tx_type),
        ProviderMeta::Onramper(meta) => project_onramper(meta, tx_type),
    })
}
