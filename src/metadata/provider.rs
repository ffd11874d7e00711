//! Per-provider transaction records
//!
//! Each provider reports trades in its own schema. These types hold the
//! normalized fields we keep from each one, labelled the way the provider
//! labels them (base/quote for Moonpay, source/target for Onramper), not
//! from the user's point of view.

use super::{
    lenient_flag, lenient_number, lenient_record, lenient_text, number_at, text_at, Provider,
    TxType,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized Moonpay transaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MoonpayMeta {
    #[serde(deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub crypto_transaction_id: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub created_at: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub updated_at: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub wallet_address: Option<String>,
    /// Fiat on buys, crypto on sells
    #[serde(deserialize_with = "lenient_text")]
    pub base_currency: Option<String>,
    /// Crypto on buys, fiat on sells
    #[serde(deserialize_with = "lenient_text")]
    pub quote_currency: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub base_currency_amount: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub quote_currency_amount: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub usd_rate: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub eur_rate: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub gbp_rate: Option<f64>,
    #[serde(deserialize_with = "lenient_flag")]
    pub are_fees_included: Option<bool>,
    #[serde(deserialize_with = "lenient_number")]
    pub network_fee_amount: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub fee_amount: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub fee_amount_discount: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub extra_fee_amount: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub extra_fee_amount_discount: Option<f64>,
    #[serde(deserialize_with = "lenient_text")]
    pub return_url: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub country: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub card_type: Option<String>,
}

/// Normalized Onramper transaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OnramperMeta {
    #[serde(deserialize_with = "lenient_text")]
    pub onramp_transaction_id: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub transaction_hash: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub status_date: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub wallet_address: Option<String>,
    /// Fiat on buys, crypto on sells
    #[serde(deserialize_with = "lenient_text")]
    pub source_currency: Option<String>,
    /// Crypto on buys, fiat on sells
    #[serde(deserialize_with = "lenient_text")]
    pub target_currency: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub in_amount: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub out_amount: Option<f64>,
    #[serde(deserialize_with = "lenient_text")]
    pub partner_context: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub country: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub onramp: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub payment_method: Option<String>,
}

/// One provider's record for a transaction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProviderMeta<'a> {
    Moonpay(&'a MoonpayMeta),
    Onramper(&'a OnramperMeta),
}

impl ProviderMeta<'_> {
    pub fn provider(&self) -> Provider {
        match self {
            ProviderMeta::Moonpay(_) => Provider::Moonpay,
            ProviderMeta::Onramper(_) => Provider::Onramper,
        }
    }
}

/// Records for one transaction keyed by provider
///
/// Normally exactly one provider is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderMetaCollection {
    #[serde(rename = "Moonpay", default, deserialize_with = "lenient_record")]
    pub moonpay: Option<MoonpayMeta>,
    #[serde(rename = "Onramper", default, deserialize_with = "lenient_record")]
    pub onramper: Option<OnramperMeta>,
}

impl ProviderMetaCollection {
    /// Present records, Moonpay first
    pub fn entries(&self) -> impl Iterator<Item = ProviderMeta<'_>> {
        self.moonpay
            .as_ref()
            .map(ProviderMeta::Moonpay)
            .into_iter()
            .chain(self.onramper.as_ref().map(ProviderMeta::Onramper))
    }
}

/// Normalize a raw Moonpay API transaction
///
/// Buy and sell transactions come from different Moonpay endpoints with
/// different shapes; sells carry no wallet address, return URL or network
/// fee.
pub fn get_moonpay_tx_metadata(raw: &Value, tx_type: TxType) -> MoonpayMeta {
    match tx_type {
        TxType::Buy => MoonpayMeta {
            id: text_at(raw, "/id"),
            crypto_transaction_id: text_at(raw, "/cryptoTransactionId"),
            created_at: text_at(raw, "/createdAt"),
            updated_at: text_at(raw, "/updatedAt"),
            wallet_address: text_at(raw, "/walletAddress"),
            base_currency: text_at(raw, "/baseCurrency/code"),
            quote_currency: text_at(raw, "/currency/code"),
            base_currency_amount: number_at(raw, "/baseCurrencyAmount"),
            quote_currency_amount: number_at(raw, "/quoteCurrencyAmount"),
            usd_rate: number_at(raw, "/usdRate"),
            eur_rate: number_at(raw, "/eurRate"),
            gbp_rate: number_at(raw, "/gbpRate"),
            are_fees_included: raw.pointer("/areFeesIncluded").and_then(Value::as_bool),
            network_fee_amount: number_at(raw, "/networkFeeAmount"),
            fee_amount: number_at(raw, "/feeAmount"),
            fee_amount_discount: number_at(raw, "/feeAmountDiscount"),
            extra_fee_amount: number_at(raw, "/extraFeeAmount"),
            extra_fee_amount_discount: number_at(raw, "/extraFeeAmountDiscount"),
            return_url: text_at(raw, "/returnUrl"),
            status: text_at(raw, "/status"),
            country: text_at(raw, "/country"),
            card_type: text_at(raw, "/cardType"),
        },
        TxType::Sell => MoonpayMeta {
            id: text_at(raw, "/id"),
            crypto_transaction_id: text_at(raw, "/depositHash"),
            created_at: text_at(raw, "/createdAt"),
            updated_at: text_at(raw, "/updatedAt"),
            base_currency: text_at(raw, "/baseCurrency/code"),
            quote_currency: text_at(raw, "/quoteCurrency/code"),
            base_currency_amount: number_at(raw, "/baseCurrencyAmount"),
            quote_currency_amount: number_at(raw, "/quoteCurrencyAmount"),
            usd_rate: number_at(raw, "/usdRate"),
            eur_rate: number_at(raw, "/eurRate"),
            gbp_rate: number_at(raw, "/gbpRate"),
            fee_amount: number_at(raw, "/feeAmount"),
            extra_fee_amount: number_at(raw, "/extraFeeAmount"),
            status: text_at(raw, "/status"),
            country: text_at(raw, "/country"),
            ..MoonpayMeta::default()
        },
    }
}

/// Normalize a raw Onramper transaction
///
/// Onramper uses one shape for both directions.
pub fn get_onramper_tx_metadata(raw: &Value, _tx_type: TxType) -> OnramperMeta {
    OnramperMeta {
        onramp_transaction_id: text_at(raw, "/onrampTransactionId"),
        transaction_hash: text_at(raw, "/transactionHash"),
        status_date: text_at(raw, "/statusDate"),
        wallet_address: text_at(raw, "/walletAddress"),
        source_currency: text_at(raw, "/sourceCurrency"),
        target_currency: text_at(raw, "/targetCurrency"),
        in_amount: number_at(raw, "/inAmount"),
        out_amount: number_at(raw, "/outAmount"),
        partner_context: text_at(raw, "/partnerContext"),
        status: text_at(raw, "/status"),
        country: text_at(raw, "/country"),
        onramp: text_at(raw, "/onramp"),
        payment_method: text_at(raw, "/paymentMethod"),
    }
}

/// Normalize a raw transaction from `provider` into a collection holding
/// only that provider's record
pub fn get_tx_combined_metadata(
    raw: &Value,
    provider: Provider,
    tx_type: TxType,
) -> ProviderMetaCollection {
    match provider {
        Provider::Moonpay => ProviderMetaCollection {
            moonpay: Some(get_moonpay_tx_metadata(raw, tx_type)),
            onramper: None,
        },
        Provider::Onramper => ProviderMetaCollection {
            moonpay: None,
            onramper: Some(get_onramper_tx_metadata(raw, tx_type)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn moonpay_buy_raw() -> Value {
        json!({
            "id": "mp-1",
            "cryptoTransactionId": "ab12",
            "createdAt": "2024-03-01T10:00:00Z",
            "walletAddress": "ltc1qdest",
            "baseCurrency": { "code": "usd" },
            "currency": { "code": "ltc" },
            "baseCurrencyAmount": 100,
            "quoteCurrencyAmount": "1.25",
            "networkFeeAmount": 0.5,
            "feeAmount": 3.99,
            "extraFeeAmount": 1,
            "areFeesIncluded": true,
            "returnUrl": "https://wallet.example/return",
            "cardType": "visa",
        })
    }

    #[test]
    fn test_moonpay_buy_projection() {
        let meta = get_moonpay_tx_metadata(&moonpay_buy_raw(), TxType::Buy);
        assert_eq!(meta.id.as_deref(), Some("mp-1"));
        assert_eq!(meta.base_currency.as_deref(), Some("usd"));
        assert_eq!(meta.quote_currency.as_deref(), Some("ltc"));
        assert_eq!(meta.quote_currency_amount, Some(1.25));
        assert_eq!(meta.are_fees_included, Some(true));
        assert_eq!(meta.card_type.as_deref(), Some("visa"));
        assert_eq!(meta.updated_at, None);
    }

    #[test]
    fn test_moonpay_sell_projection_drops_buy_only_fields() {
        let raw = json!({
            "id": "mp-2",
            "depositHash": "cd34",
            "walletAddress": "ignored",
            "baseCurrency": { "code": "ltc" },
            "quoteCurrency": { "code": "eur" },
            "networkFeeAmount": 9,
            "feeAmount": 2,
        });
        let meta = get_moonpay_tx_metadata(&raw, TxType::Sell);
        assert_eq!(meta.crypto_transaction_id.as_deref(), Some("cd34"));
        assert_eq!(meta.wallet_address, None);
        assert_eq!(meta.network_fee_amount, None);
        assert_eq!(meta.fee_amount, Some(2.0));
        assert_eq!(meta.quote_currency.as_deref(), Some("eur"));
    }

    #[test]
    fn test_onramper_projection() {
        let raw = json!({
            "onrampTransactionId": "or-9",
            "transactionHash": "ef56",
            "statusDate": "2024-04-02",
            "sourceCurrency": "gbp",
            "targetCurrency": "ltc",
            "inAmount": 50,
            "outAmount": 0.6,
            "paymentMethod": "creditcard",
        });
        let meta = get_onramper_tx_metadata(&raw, TxType::Buy);
        assert_eq!(meta.onramp_transaction_id.as_deref(), Some("or-9"));
        assert_eq!(meta.in_amount, Some(50.0));
        assert_eq!(meta, get_onramper_tx_metadata(&raw, TxType::Sell));
    }

    #[test]
    fn test_combined_metadata_holds_one_provider() {
        let raw = moonpay_buy_raw();
        let combined = get_tx_combined_metadata(&raw, Provider::Moonpay, TxType::Buy);
        assert!(combined.moonpay.is_some());
        assert!(combined.onramper.is_none());
        let providers: Vec<Provider> = combined.entries().map(|e| e.provider()).collect();
        assert_eq!(providers, vec![Provider::Moonpay]);
    }

    #[test]
    fn test_collection_deserializes_with_nulls() {
        let collection: ProviderMetaCollection =
            serde_json::from_value(json!({ "Moonpay": null, "Onramper": null })).unwrap();
        assert_eq!(collection.entries().count(), 0);

        let collection: ProviderMetaCollection = serde_json::from_value(json!({
            "Onramper": { "onrampTransactionId": "x", "inAmount": "12" },
            "Banxa": { "id": "ignored" },
        }))
        .unwrap();
        assert_eq!(collection.onramper.as_ref().and_then(|m| m.in_amount), Some(12.0));
    }

    #[test]
    fn test_collection_skips_non_object_records() {
        let collection: ProviderMetaCollection = serde_json::from_value(json!({
            "Moonpay": "x",
            "Onramper": { "onrampTransactionId": "or-1" },
        }))
        .unwrap();
        assert_eq!(collection.moonpay, None);
        let providers: Vec<Provider> = collection.entries().map(|e| e.provider()).collect();
        assert_eq!(providers, vec![Provider::Onramper]);

        let collection: ProviderMetaCollection =
            serde_json::from_value(json!({ "Moonpay": [1, 2], "Onramper": 7 })).unwrap();
        assert_eq!(collection.entries().count(), 0);
    }
}
