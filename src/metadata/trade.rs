//! Trades reported by the wallet's aggregator API
//!
//! The aggregator wraps each provider transaction in a common trade record
//! and keeps the provider payload under `metadata`.

use super::display::{text_or, DisplayedMetadata, Fees};
use super::{number_at, text_at, Provider, TxType};
use crate::units::{subunit_to_sats, Subunit};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A buy or sell trade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    #[serde(default)]
    pub user_app_unique_id: String,
    pub provider: Provider,
    #[serde(default)]
    pub provider_tx_id: String,
    #[serde(default)]
    pub crypto_tx_id: Option<String>,
    #[serde(rename = "type")]
    pub tx_type: TxType,
    #[serde(default, rename = "amountInLTC")]
    pub amount_in_ltc: f64,
    #[serde(default)]
    pub price_in_fiat: f64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub metadata: Value,
}

impl Trade {
    fn meta_text(&self, key: &str) -> Option<String> {
        text_at(&self.metadata, key)
    }

    fn meta_number(&self, key: &str) -> Option<f64> {
        number_at(&self.metadata, key)
    }

    fn created_at(&self) -> Option<String> {
        self.meta_text("/createdAt").or_else(|| self.meta_text("/updatedAt"))
    }

    fn updated_at(&self) -> Option<String> {
        self.meta_text("/updatedAt").or_else(|| self.meta_text("/createdAt"))
    }

    /// On-chain transaction id, if the trade has settled
    fn tx_hash(&self) -> Option<String> {
        self.crypto_tx_id
            .clone()
            .filter(|id| !id.is_empty())
            .or_else(|| self.meta_text("/txId"))
    }

    /// Trade amount in litoshis
    pub fn amount_sats(&self) -> u64 {
        let sats = subunit_to_sats(self.amount_in_ltc, Subunit::Litecoin).round();
        // NaN and negatives saturate to 0
        sats as u64
    }
}

/// A trade shown alongside on-chain transactions
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedTx {
    pub tx_hash: Option<String>,
    pub block_hash: String,
    pub block_height: u64,
    /// Litoshis
    pub amount: u64,
    pub num_confirmations: u64,
    pub time_stamp: String,
    pub fee: Option<f64>,
    pub label: String,
    pub meta_label: String,
    pub price_on_date: Option<f64>,
    pub trade_tx: Trade,
}

/// Build a transaction-list row for a trade
///
/// Trades are not tied to a block, so the block fields stay empty.
pub fn decoded_tx_metadata_projection(trade: &Trade, price_on_date: Option<f64>) -> DecodedTx {
    let meta_label = match trade.tx_type {
        TxType::Buy => "Buy",
        TxType::Sell => "Sell",
    };

    DecodedTx {
        tx_hash: trade.tx_hash(),
        block_hash: String::new(),
        block_height: 0,
        amount: trade.amount_sats(),
        num_confirmations: trade
            .metadata
            .pointer("/confirmations")
            .and_then(Value::as_u64)
            .unwrap_or(0),
        time_stamp: trade.created_at().unwrap_or_default(),
        fee: trade.meta_number("/networkFeeAmount"),
        label: String::new(),
        meta_label: meta_label.to_string(),
        price_on_date,
        trade_tx: trade.clone(),
    }
}

/// Project an aggregator trade for display
///
/// The aggregator has already oriented currencies from the user's side,
/// so no buy/sell flip is applied.
pub fn displayed_trade_metadata_projection(trade: &Trade) -> DisplayedMetadata {
    let fees = Fees::new(
        trade.meta_number("/networkFeeAmount"),
        trade.meta_number("/extraFeeAmount"),
        trade.meta_number("/feeAmount"),
    );
    let finite_or_zero = |n: f64| if n.is_finite() { n } else { 0.0 };

    DisplayedMetadata {
        provider_tx_id: trade.provider_tx_id.clone(),
        crypto_tx_id: trade.tx_hash().unwrap_or_default(),
        created_at: trade.created_at().unwrap_or_default(),
        updated_at: trade.updated_at().unwrap_or_default(),
        wallet_address: trade.meta_text("/walletAddress").unwrap_or_default(),
        crypto_currency: text_or(trade.meta_text("/crypto").as_ref(), "ltc"),
        fiat_currency: text_or(trade.meta_text("/fiat").as_ref(), "unknown"),
        crypto_currency_amount: finite_or_zero(trade.amount_in_ltc),
        fiat_currency_amount: finite_or_zero(trade.price_in_fiat),
        usd_rate: trade.meta_number("/usdRate").unwrap_or(0.0),
        eur_rate: trade.meta_number("/eurRate").unwrap_or(0.0),
        gbp_rate: trade.meta_number("/gbpRate").unwrap_or(0.0),
        total_fee: fees.total(),
        blockchain_fee: fees.network,
        tip_lf_fee: fees.extra,
        provider_fee: fees.provider,
        tx_details_url: text_or(trade.meta_text("/txDetailsUrl").as_ref(), "unknown"),
        status: text_or(trade.status.as_ref().filter(|s| !s.is_empty()), "unknown"),
        country: text_or(trade.meta_text("/country").as_ref(), "unknown"),
        payment_method: text_or(trade.meta_text("/cardType").as_ref(), "unknown"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn trade() -> Trade {
        serde_json::from_value(json!({
            "userAppUniqueId": "device-1",
            "provider": "Moonpay",
            "providerTxId": "mp-7",
            "cryptoTxId": "",
            "type": "buy",
            "amountInLTC": 0.5,
            "priceInFiat": 42.1,
            "status": "completed",
            "metadata": {
                "txId": "aa11",
                "updatedAt": "2024-05-05T12:00:00Z",
                "confirmations": 3,
                "networkFeeAmount": "0.25",
                "feeAmount": 1.75,
                "fiat": "eur",
                "cardType": "mastercard",
            },
        }))
        .unwrap()
    }

    #[test]
    fn test_decoded_tx_projection() {
        let decoded = decoded_tx_metadata_projection(&trade(), Some(84.2));
        assert_eq!(decoded.amount, 50_000_000);
        assert_eq!(decoded.tx_hash.as_deref(), Some("aa11"));
        assert_eq!(decoded.num_confirmations, 3);
        // createdAt missing, falls back to updatedAt
        assert_eq!(decoded.time_stamp, "2024-05-05T12:00:00Z");
        assert_eq!(decoded.fee, Some(0.25));
        assert_eq!(decoded.meta_label, "Buy");
        assert_eq!(decoded.price_on_date, Some(84.2));
        assert_eq!(decoded.block_height, 0);
    }

    #[test]
    fn test_displayed_trade_projection() {
        let shown = displayed_trade_metadata_projection(&trade());
        assert_eq!(shown.provider_tx_id, "mp-7");
        assert_eq!(shown.crypto_tx_id, "aa11");
        assert_eq!(shown.created_at, shown.updated_at);
        assert_eq!(shown.crypto_currency, "ltc");
        assert_eq!(shown.fiat_currency, "eur");
        assert_eq!(shown.crypto_currency_amount, 0.5);
        assert_eq!(shown.total_fee, 2.0);
        assert_eq!(shown.tip_lf_fee, 0.0);
        assert_eq!(shown.status, "completed");
        assert_eq!(shown.payment_method, "mastercard");
        assert_eq!(shown.tx_details_url, "unknown");
    }

    #[test]
    fn test_trade_without_metadata() {
        let bare: Trade = serde_json::from_value(json!({
            "provider": "Onramper",
            "type": "sell",
        }))
        .unwrap();
        let decoded = decoded_tx_metadata_projection(&bare, None);
        assert_eq!(decoded.tx_hash, None);
        assert_eq!(decoded.amount, 0);
        assert_eq!(decoded.meta_label, "Sell");
        assert_eq!(decoded.time_stamp, "");

        let shown = displayed_trade_metadata_projection(&bare);
        assert_eq!(shown.status, "unknown");
        assert_eq!(shown.total_fee, 0.0);
    }

    #[test]
    fn test_negative_amount_saturates() {
        let mut t = trade();
        t.amount_in_ltc = -1.0;
        assert_eq!(t.amount_sats(), 0);
    }
}
