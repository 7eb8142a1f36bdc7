//! Transaction record
//!
//! A transaction is a description and an amount, plus whatever extra fields
//! the submitter attached. The ledger stamps a status on it exactly once,
//! at admission.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use crate::error::{LedgerError, Result};

/// Field names owned by the record itself
const RESERVED_FIELDS: [&str; 3] = ["amount", "description", "status"];

/// Numeric amount, kept as submitted (integer or float)
///
/// Float amounts are always finite, so every amount has a canonical form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Amount(AmountRepr);

#[derive(Debug, Clone, Copy, PartialEq)]
enum AmountRepr {
    Int(i64),
    Float(f64),
}

impl Amount {
    /// Float amount; NaN and infinities are rejected
    pub fn from_float(v: f64) -> Result<Self> {
        if !v.is_finite() {
            return Err(LedgerError::MalformedTransaction(format!(
                "amount {} is not a finite number",
                v
            )));
        }
        Ok(Amount(AmountRepr::Float(v)))
    }

    /// Amount as a float, for threshold comparisons
    pub fn as_f64(&self) -> f64 {
        match self.0 {
            AmountRepr::Int(v) => v as f64,
            AmountRepr::Float(v) => v,
        }
    }

    fn to_value(self) -> Value {
        match self.0 {
            AmountRepr::Int(v) => Value::from(v),
            // from_f64 only fails on non-finite input
            AmountRepr::Float(v) => Number::from_f64(v).map_or(Value::Null, Value::Number),
        }
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.0 {
            AmountRepr::Int(v) => serializer.serialize_i64(v),
            AmountRepr::Float(v) => serializer.serialize_f64(v),
        }
    }
}

impl From<i64> for Amount {
    fn from(v: i64) -> Self {
        Amount(AmountRepr::Int(v))
    }
}

impl From<i32> for Amount {
    fn from(v: i32) -> Self {
        Amount(AmountRepr::Int(v.into()))
    }
}

impl TryFrom<f64> for Amount {
    type Error = LedgerError;

    fn try_from(v: f64) -> Result<Self> {
        Amount::from_float(v)
    }
}

impl TryFrom<&Number> for Amount {
    type Error = LedgerError;

    fn try_from(n: &Number) -> Result<Self> {
        if let Some(v) = n.as_i64() {
            return Ok(Amount::from(v));
        }
        match n.as_f64() {
            Some(v) => Amount::from_float(v),
            None => Err(LedgerError::MalformedTransaction(format!(
                "amount {} is not representable",
                n
            ))),
        }
    }
}

/// Admission outcome recorded on a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TxStatus {
    /// Not yet submitted to a ledger
    #[default]
    Unclassified,
    /// Passed screening; pending or mined
    Valid,
    /// Failed screening; terminal
    Flagged,
}

impl TxStatus {
    pub fn is_unclassified(&self) -> bool {
        matches!(self, TxStatus::Unclassified)
    }
}

/// A transaction record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// Free-text description, screened for suspicious keywords
    pub description: String,
    /// Transferred amount
    pub amount: Amount,
    #[serde(skip_serializing_if = "TxStatus::is_unclassified")]
    status: TxStatus,
    /// Caller-supplied fields carried alongside the record
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

impl Transaction {
    /// Create an unclassified transaction
    pub fn new(description: impl Into<String>, amount: impl Into<Amount>) -> Self {
        Self {
            description: description.into(),
            amount: amount.into(),
            status: TxStatus::Unclassified,
            extra: BTreeMap::new(),
        }
    }

    /// Attach an extra field; reserved names are rejected
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Result<Self> {
        let key = key.into();
        if RESERVED_FIELDS.contains(&key.as_str()) {
            return Err(LedgerError::MalformedTransaction(format!(
                "field '{}' is reserved",
                key
            )));
        }
        self.extra.insert(key, value);
        Ok(self)
    }

    /// Admission status
    pub fn status(&self) -> TxStatus {
        self.status
    }

    /// Extra fields in key order
    pub fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }

    pub(crate) fn set_status(&mut self, status: TxStatus) {
        self.status = status;
    }

    /// JSON object form used inside block hashes
    pub fn to_canonical_value(&self) -> Value {
        let mut map: Map<String, Value> = self
            .extra
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        map.insert("amount".to_string(), self.amount.to_value());
        map.insert("description".to_string(), Value::String(self.description.clone()));
        match self.status {
            TxStatus::Unclassified => {}
            TxStatus::Valid => {
                map.insert("status".to_string(), Value::String("Valid".to_string()));
            }
            TxStatus::Flagged => {
                map.insert("status".to_string(), Value::String("Flagged".to_string()));
            }
        }
        Value::Object(map)
    }
}

/// Parse a dynamic record; `description` and `amount` are mandatory
///
/// Any incoming `status` is dropped: admission decides it.
impl TryFrom<Value> for Transaction {
    type Error = LedgerError;

    fn try_from(value: Value) -> Result<Self> {
        let Value::Object(mut fields) = value else {
            return Err(LedgerError::MalformedTransaction(
                "expected a JSON object".to_string(),
            ));
        };

        let description = match fields.remove("description") {
            Some(Value::String(s)) => s,
            Some(other) => {
                return Err(LedgerError::MalformedTransaction(format!(
                    "description must be text, got {}",
                    other
                )))
            }
            None => {
                return Err(LedgerError::MalformedTransaction(
                    "missing description".to_string(),
                ))
            }
        };

        let amount = match fields.remove("amount") {
            Some(Value::Number(n)) => Amount::try_from(&n)?,
            Some(other) => {
                return Err(LedgerError::MalformedTransaction(format!(
                    "amount must be numeric, got {}",
                    other
                )))
            }
            None => {
                return Err(LedgerError::MalformedTransaction(
                    "missing amount".to_string(),
                ))
            }
        };

        fields.remove("status");

        Ok(Self {
            description,
            amount,
            status: TxStatus::Unclassified,
            extra: fields.into_iter().collect(),
        })
    }
}
