//! The record types served by the backend for each e-wallet provider.
//!
//! GCash and PayMaya share one record shape ([WalletRecord]); JuanPay keeps a
//! daily float reconciliation instead ([JuanPayRecord]). [Record] is the
//! closed sum over both shapes.
//!
//! Numeric fields are deserialised leniently: a value that cannot be read as
//! a number becomes zero rather than an error.

use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::iso_date::IsoDate;

/// The e-wallet providers tracked by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Provider {
    /// GCash agent transactions.
    GCash,
    /// PayMaya agent transactions.
    PayMaya,
    /// JuanPay daily float balances.
    JuanPay,
}

impl Provider {
    /// All providers in display order.
    pub const ALL: [Provider; 3] = [Provider::GCash, Provider::PayMaya, Provider::JuanPay];

    /// The display name of the provider.
    pub fn label(self) -> &'static str {
        match self {
            Self::GCash => "GCash",
            Self::PayMaya => "PayMaya",
            Self::JuanPay => "JuanPay",
        }
    }

    /// The backend collection path for the provider's records.
    pub fn api_path(self) -> &'static str {
        match self {
            Self::GCash => "/api/gcash",
            Self::PayMaya => "/api/paymaya",
            Self::JuanPay => "/api/juanpay",
        }
    }

    /// The file name of the provider's records in a snapshot directory.
    pub fn snapshot_file(self) -> &'static str {
        match self {
            Self::GCash => "gcash.json",
            Self::PayMaya => "paymaya.json",
            Self::JuanPay => "juanpay.json",
        }
    }
}

impl Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The direction of an agent float transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionType {
    /// The customer deposits money into their e-wallet.
    CashIn,
    /// The customer withdraws money from their e-wallet.
    CashOut,
    /// Any other value. Counted as neither cash-in nor cash-out.
    Other(String),
}

impl TransactionType {
    /// The label as stored by the backend, e.g. "Cash-In".
    pub fn label(&self) -> &str {
        match self {
            Self::CashIn => "Cash-In",
            Self::CashOut => "Cash-Out",
            Self::Other(label) => label,
        }
    }
}

impl Default for TransactionType {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for TransactionType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Cash-In" => Self::CashIn,
            "Cash-Out" => Self::CashOut,
            _ => Self::Other(value),
        }
    }
}

impl From<TransactionType> for String {
    fn from(value: TransactionType) -> Self {
        value.label().to_owned()
    }
}

/// How the service charge was paid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChargeMop {
    /// Paid in cash over the counter.
    #[default]
    Cash,
    /// Paid from an e-wallet balance, named by provider.
    Wallet(String),
}

impl ChargeMop {
    /// The label as stored by the backend, e.g. "Cash" or "GCash".
    pub fn label(&self) -> &str {
        match self {
            Self::Cash => "Cash",
            Self::Wallet(name) => name,
        }
    }
}

impl From<String> for ChargeMop {
    fn from(value: String) -> Self {
        if value == "Cash" {
            Self::Cash
        } else {
            Self::Wallet(value)
        }
    }
}

impl From<ChargeMop> for String {
    fn from(value: ChargeMop) -> Self {
        value.label().to_owned()
    }
}

/// A GCash or PayMaya transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletRecord {
    /// The backend's ID for the record.
    #[serde(alias = "_id", default, deserialize_with = "lenient_string")]
    pub id: String,
    /// The day the transaction happened.
    #[serde(default)]
    pub date: IsoDate,
    /// The transaction amount.
    #[serde(default, deserialize_with = "lenient_number")]
    pub amount: f64,
    /// The fee collected on top of the amount.
    #[serde(default, deserialize_with = "lenient_number")]
    pub service_charge: f64,
    /// Whether this was a cash-in or a cash-out.
    #[serde(default)]
    pub transaction_type: TransactionType,
    /// How the service charge was paid.
    #[serde(rename = "chargeMOP", default)]
    pub charge_mop: ChargeMop,
    /// The provider's reference number for the transaction.
    #[serde(default, deserialize_with = "lenient_string")]
    pub reference_number: String,
}

/// One portion of a JuanPay beginning balance, e.g. one cash drawer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeginningEntry {
    /// The amount in this portion.
    #[serde(default, deserialize_with = "lenient_number")]
    pub amount: f64,
}

/// A JuanPay daily float reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JuanPayRecord {
    /// The backend's ID for the record.
    #[serde(alias = "_id", default, deserialize_with = "lenient_string")]
    pub id: String,
    /// The day being reconciled.
    #[serde(default)]
    pub date: IsoDate,
    /// The beginning balance, possibly split over several entries.
    #[serde(default, deserialize_with = "lenient_entries")]
    pub beginnings: Vec<BeginningEntry>,
    /// The ending balance.
    #[serde(default, deserialize_with = "lenient_number")]
    pub ending: f64,
    /// The sales as persisted by the backend.
    #[serde(default, deserialize_with = "lenient_number")]
    pub sales: f64,
}

/// A record from any provider.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// A GCash or PayMaya transaction.
    Wallet(Provider, WalletRecord),
    /// A JuanPay reconciliation.
    JuanPay(JuanPayRecord),
}

/// A record that carries a date.
pub trait Dated {
    /// The record's date.
    fn date(&self) -> &IsoDate;
}

impl Dated for WalletRecord {
    fn date(&self) -> &IsoDate {
        &self.date
    }
}

impl Dated for JuanPayRecord {
    fn date(&self) -> &IsoDate {
        &self.date
    }
}

impl Dated for Record {
    fn date(&self) -> &IsoDate {
        match self {
            Self::Wallet(_, record) => &record.date,
            Self::JuanPay(record) => &record.date,
        }
    }
}

/// Read a JSON value as a number, defaulting to zero.
///
/// Strings are read by their longest numeric prefix after any leading
/// whitespace, so "12abc" is 12. Non-finite results are zero as well.
pub fn coerce_number(value: &Value) -> f64 {
    let number = match value {
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::String(text) => parse_float_prefix(text).unwrap_or(0.0),
        _ => 0.0,
    };

    if number.is_finite() { number } else { 0.0 }
}

/// Parse the longest numeric prefix of `text`, after leading whitespace.
///
/// Returns `None` if there is no numeric prefix, e.g. for "abc" or "".
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let integer_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digit_count = end - integer_start;

    if bytes.get(end) == Some(&b'.') {
        let fraction_start = end + 1;
        let mut fraction_end = fraction_start;
        while bytes.get(fraction_end).is_some_and(u8::is_ascii_digit) {
            fraction_end += 1;
        }
        digit_count += fraction_end - fraction_start;

        if digit_count > 0 {
            end = fraction_end;
        }
    }

    if digit_count == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+' | b'-')) {
            exponent_end += 1;
        }
        let exponent_digits_start = exponent_end;
        while bytes.get(exponent_end).is_some_and(u8::is_ascii_digit) {
            exponent_end += 1;
        }
        if exponent_end > exponent_digits_start {
            end = exponent_end;
        }
    }

    text[..end].parse().ok()
}

fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;

    Ok(coerce_number(&value))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;

    Ok(match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn lenient_entries<'de, D>(deserializer: D) -> Result<Vec<BeginningEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;

    let Value::Array(entries) = value else {
        return Ok(Vec::new());
    };

    Ok(entries
        .iter()
        .map(|entry| BeginningEntry {
            amount: entry.get("amount").map(coerce_number).unwrap_or(0.0),
        })
        .collect())
}
