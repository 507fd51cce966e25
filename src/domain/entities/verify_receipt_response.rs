use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use super::{purchase_entry::PurchaseEntry, result_code::ResultCode};

/// Which layout of the verifyReceipt response body was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseKind {
    /// iOS 7+ receipt: `receipt.in_app` holds the list of purchases.
    Modern,
    /// iOS 6 style receipt: the receipt itself is the single purchase.
    Legacy,
    /// No receipt was echoed back, only a `status`.
    StatusOnly,
    /// Neither a receipt nor a status; reported as `DataMalformed`.
    Malformed,
}

/// Normalized verifyReceipt response.
///
/// https://developer.apple.com/documentation/appstorereceipts/responsebody
///
/// Every field is derived once when the response is parsed. Accessors only
/// hand out shared references or owned copies, so the value can be freely
/// shared between readers.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifyReceiptResponse {
    kind: ResponseKind,
    result_code: ResultCode,
    receipt: Value,
    purchases: Vec<PurchaseEntry>,
    transaction_id: Option<String>,
    original_transaction_id: Option<String>,
    product_id: Option<String>,
    expires_date_ms: Option<String>,
    bundle_id: Option<String>,
    app_item_id: Option<String>,
    latest_receipt: Option<String>,
    latest_receipt_info: Option<Vec<PurchaseEntry>>,
    raw_response: Map<String, Value>,
}

impl VerifyReceiptResponse {
    /// True only if the status is `Ok`, a non-empty receipt was returned,
    /// and there is at least one purchase to act on.
    pub fn is_valid(&self) -> bool {
        self.result_code == ResultCode::Ok
            && !is_empty_value(&self.receipt)
            && !self.purchases.is_empty()
    }

    pub fn kind(&self) -> ResponseKind {
        self.kind
    }

    pub fn result_code(&self) -> ResultCode {
        self.result_code
    }

    /// The `receipt` object, or an empty object if none was returned.
    pub fn receipt(&self) -> &Value {
        &self.receipt
    }

    /// Purchases in the order the endpoint returned them.
    pub fn purchases(&self) -> &[PurchaseEntry] {
        &self.purchases
    }

    pub fn transaction_id(&self) -> Option<&str> {
        self.transaction_id.as_deref()
    }

    pub fn original_transaction_id(&self) -> Option<&str> {
        self.original_transaction_id.as_deref()
    }

    pub fn product_id(&self) -> Option<&str> {
        self.product_id.as_deref()
    }

    pub fn expires_date_ms(&self) -> Option<&str> {
        self.expires_date_ms.as_deref()
    }

    /// `expires_date_ms` as a timestamp. Unset if the field is missing or
    /// does not hold a millisecond count.
    pub fn expires_date(&self) -> Option<DateTime<Utc>> {
        let millis = self.expires_date_ms.as_deref()?.trim().parse::<i64>().ok()?;
        DateTime::from_timestamp_millis(millis)
    }

    pub fn bundle_id(&self) -> Option<&str> {
        self.bundle_id.as_deref()
    }

    pub fn app_item_id(&self) -> Option<&str> {
        self.app_item_id.as_deref()
    }

    /// Base64 encoded latest receipt (auto-renewable subscriptions only).
    pub fn latest_receipt(&self) -> Option<&str> {
        self.latest_receipt.as_deref()
    }

    pub fn latest_receipt_info(&self) -> Option<&[PurchaseEntry]> {
        self.latest_receipt_info.as_deref()
    }

    /// The body exactly as it was handed to the parser.
    pub fn raw_response(&self) -> &Map<String, Value> {
        &self.raw_response
    }
}

/// Assembles a `VerifyReceiptResponse`. Setters may be called more than
/// once; the last call wins, so callers apply overrides in priority order.
#[derive(Debug)]
pub(crate) struct VerifyReceiptResponseBuilder {
    kind: ResponseKind,
    result_code: ResultCode,
    receipt: Value,
    purchases: Vec<PurchaseEntry>,
    transaction_id: Option<String>,
    original_transaction_id: Option<String>,
    product_id: Option<String>,
    expires_date_ms: Option<String>,
    bundle_id: Option<String>,
    app_item_id: Option<String>,
    latest_receipt: Option<String>,
    latest_receipt_info: Option<Vec<PurchaseEntry>>,
}

impl VerifyReceiptResponseBuilder {
    pub(crate) fn new(kind: ResponseKind) -> Self {
        Self {
            kind,
            result_code: ResultCode::DataMalformed,
            receipt: Value::Object(Map::new()),
            purchases: Vec::new(),
            transaction_id: None,
            original_transaction_id: None,
            product_id: None,
            expires_date_ms: None,
            bundle_id: None,
            app_item_id: None,
            latest_receipt: None,
            latest_receipt_info: None,
        }
    }

    pub(crate) fn result_code(mut self, result_code: ResultCode) -> Self {
        self.result_code = result_code;
        self
    }

    pub(crate) fn receipt(mut self, receipt: Value) -> Self {
        self.receipt = receipt;
        self
    }

    pub(crate) fn purchases(mut self, purchases: Vec<PurchaseEntry>) -> Self {
        self.purchases = purchases;
        self
    }

    /// Replaces all four transaction fields (`transaction_id`,
    /// `original_transaction_id`, `product_id`, `expires_date_ms`) with the
    /// values of `entry`, including unsetting the ones it lacks. `None`
    /// leaves the current values untouched.
    pub(crate) fn current_transaction(mut self, entry: Option<&PurchaseEntry>) -> Self {
        if let Some(entry) = entry {
            self.transaction_id = entry.transaction_id();
            self.original_transaction_id = entry.original_transaction_id();
            self.product_id = entry.product_id();
            self.expires_date_ms = entry.expires_date_ms();
        }
        self
    }

    pub(crate) fn bundle_id(mut self, bundle_id: Option<String>) -> Self {
        self.bundle_id = bundle_id;
        self
    }

    pub(crate) fn app_item_id(mut self, app_item_id: Option<String>) -> Self {
        self.app_item_id = app_item_id;
        self
    }

    pub(crate) fn latest_receipt(mut self, latest_receipt: Option<String>) -> Self {
        self.latest_receipt = latest_receipt;
        self
    }

    pub(crate) fn latest_receipt_info(
        mut self,
        latest_receipt_info: Option<Vec<PurchaseEntry>>,
    ) -> Self {
        self.latest_receipt_info = latest_receipt_info;
        self
    }

    pub(crate) fn build(self, raw_response: Map<String, Value>) -> VerifyReceiptResponse {
        VerifyReceiptResponse {
            kind: self.kind,
            result_code: self.result_code,
            receipt: self.receipt,
            purchases: self.purchases,
            transaction_id: self.transaction_id,
            original_transaction_id: self.original_transaction_id,
            product_id: self.product_id,
            expires_date_ms: self.expires_date_ms,
            bundle_id: self.bundle_id,
            app_item_id: self.app_item_id,
            latest_receipt: self.latest_receipt,
            latest_receipt_info: self.latest_receipt_info,
            raw_response,
        }
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Number(_) => false,
    }
}
