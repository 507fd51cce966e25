use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One purchase record, as found in `receipt.in_app` or
/// `latest_receipt_info`, or the whole receipt of a legacy (iOS 6 style)
/// response.
///
/// https://developer.apple.com/documentation/appstorereceipts/responsebody/receipt/in_app
///
/// The entry is kept opaque; only the handful of keys needed for the
/// convenience accessors are ever read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PurchaseEntry(Value);

impl PurchaseEntry {
    pub(crate) fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn transaction_id(&self) -> Option<String> {
        self.field("transaction_id")
    }

    pub fn original_transaction_id(&self) -> Option<String> {
        self.field("original_transaction_id")
    }

    pub fn product_id(&self) -> Option<String> {
        self.field("product_id")
    }

    /// The UNIX time, in milliseconds, that the subscription expires or
    /// renews. Only set for auto-renewable subscriptions.
    pub fn expires_date_ms(&self) -> Option<String> {
        self.field("expires_date_ms")
    }

    /// Reads an arbitrary key. Unset if the entry is not an object, the key
    /// is missing, or the value is neither a string nor a number.
    pub fn field(&self, key: &str) -> Option<String> {
        string_field(self.0.get(key))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// Strings are taken as-is, numbers by their decimal text. Anything else
/// counts as unset.
pub(crate) fn string_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
