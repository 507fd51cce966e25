use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::{
    data::models::verify_receipt::response_shape::{classify, ResponseShape},
    domain::{
        entities::{
            purchase_entry::{string_field, PurchaseEntry},
            result_code::ResultCode,
            verify_receipt_response::{VerifyReceiptResponse, VerifyReceiptResponseBuilder},
        },
        repositories::receipt_response_repository::ReceiptResponseRepository,
    },
    errors::{json_kind, ReceiptResponseError},
};

pub struct ReceiptResponseRepositoryImpl;

impl ReceiptResponseRepository for ReceiptResponseRepositoryImpl {
    fn parse_verify_receipt_response(
        &self,
        body: Value,
    ) -> Result<VerifyReceiptResponse, ReceiptResponseError> {
        match body {
            Value::Object(body) => Ok(build_response(body)),
            other => Err(ReceiptResponseError::invalid_input(&other)),
        }
    }
}

impl ReceiptResponseRepositoryImpl {
    pub(crate) fn new() -> Self {
        Self
    }
}

fn build_response(body: Map<String, Value>) -> VerifyReceiptResponse {
    let shape = classify(&body);
    debug!(kind = ?shape.kind(), "classified verifyReceipt response");
    let builder = VerifyReceiptResponseBuilder::new(shape.kind());
    let builder = match shape {
        ResponseShape::Modern {
            status,
            receipt,
            in_app,
            latest_receipt_info,
            latest_receipt,
        } => {
            let purchases = to_entries(in_app);
            let latest_receipt_info = latest_receipt_info.and_then(|info| match info {
                Value::Array(entries) => Some(to_entries(entries)),
                other => {
                    warn!(found = json_kind(other), "ignoring non-array latest_receipt_info");
                    None
                }
            });
            // Order matters: the last `latest_receipt_info` entry supersedes
            // the last `in_app` entry. Entries are never re-sorted.
            builder
                .result_code(result_code(status))
                .current_transaction(purchases.last())
                .current_transaction(latest_receipt_info.as_deref().and_then(|info| info.last()))
                .app_item_id(string_field(receipt.get("app_item_id")))
                .bundle_id(string_field(receipt.get("bundle_id")))
                .latest_receipt(string_field(latest_receipt))
                .latest_receipt_info(latest_receipt_info)
                .purchases(purchases)
                .receipt(Value::Object(receipt.clone()))
        }
        ResponseShape::Legacy { status, receipt } => builder
            .result_code(result_code(status))
            .bundle_id(string_field(receipt.get("bid")))
            .purchases(vec![PurchaseEntry::new(receipt.clone())])
            .receipt(receipt.clone()),
        ResponseShape::StatusOnly { status } => builder.result_code(result_code(Some(status))),
        ResponseShape::Malformed => builder.result_code(ResultCode::DataMalformed),
    };
    builder.build(body)
}

fn to_entries(values: &[Value]) -> Vec<PurchaseEntry> {
    values.iter().cloned().map(PurchaseEntry::new).collect()
}

/// Integers and integer strings are taken as the status. Anything else
/// (including a missing `status`) is reported as `DataMalformed`.
fn result_code(status: Option<&Value>) -> ResultCode {
    let code = match status {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    match code {
        Some(code) => ResultCode::from(code),
        None => {
            warn!(
                found = status.map(json_kind).unwrap_or("nothing"),
                "unreadable status in verifyReceipt response"
            );
            ResultCode::DataMalformed
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::entities::verify_receipt_response::ResponseKind;

    fn parse(body: Value) -> Result<VerifyReceiptResponse, ReceiptResponseError> {
        ReceiptResponseRepositoryImpl::new().parse_verify_receipt_response(body)
    }

    #[test]
    fn rejects_non_object_input() {
        for body in [json!("invalid"), json!(42), json!(null), json!(true), json!([1, 2])] {
            let err = parse(body.clone()).unwrap_err();
            assert!(
                matches!(err, ReceiptResponseError::InvalidInput { .. }),
                "{body} should be rejected"
            );
        }
        assert_eq!(
            parse(json!(["a"])).unwrap_err().to_string(),
            "input must be a structured object (found array)"
        );
    }

    #[test]
    fn modern_without_latest_receipt_info_uses_last_in_app() {
        let response = parse(json!({
            "status": 0,
            "receipt": {
                "bundle_id": "io.fractic.app",
                "app_item_id": 1234567890,
                "in_app": [
                    { "transaction_id": "1", "original_transaction_id": "1", "product_id": "a", "expires_date_ms": "300" },
                    { "transaction_id": "2", "original_transaction_id": "1", "product_id": "b", "expires_date_ms": "100" },
                ],
            },
        }))
        .unwrap();
        assert_eq!(response.kind(), ResponseKind::Modern);
        assert!(response.is_valid());
        assert_eq!(response.purchases().len(), 2);
        // Last in received order, not latest by date.
        assert_eq!(response.transaction_id(), Some("2"));
        assert_eq!(response.product_id(), Some("b"));
        assert_eq!(response.expires_date_ms(), Some("100"));
        assert_eq!(response.bundle_id(), Some("io.fractic.app"));
        assert_eq!(response.app_item_id(), Some("1234567890"));
        assert_eq!(response.latest_receipt(), None);
        assert_eq!(response.latest_receipt_info(), None);
    }

    #[test]
    fn modern_with_empty_in_app_leaves_transaction_fields_unset() {
        let response = parse(json!({ "status": 0, "receipt": { "in_app": [] } })).unwrap();
        assert!(!response.is_valid());
        assert_eq!(response.transaction_id(), None);
        assert_eq!(response.original_transaction_id(), None);
        assert_eq!(response.product_id(), None);
        assert_eq!(response.expires_date_ms(), None);
    }

    #[test]
    fn empty_latest_receipt_info_is_kept_but_does_not_override() {
        let response = parse(json!({
            "status": 0,
            "receipt": { "in_app": [{ "transaction_id": "1" }] },
            "latest_receipt_info": [],
        }))
        .unwrap();
        assert_eq!(response.transaction_id(), Some("1"));
        assert_eq!(response.latest_receipt_info(), Some(&[][..]));
    }

    #[test]
    fn non_array_latest_receipt_info_is_ignored() {
        let response = parse(json!({
            "status": 0,
            "receipt": { "in_app": [{ "transaction_id": "1" }] },
            "latest_receipt_info": { "transaction_id": "9" },
        }))
        .unwrap();
        assert_eq!(response.transaction_id(), Some("1"));
        assert_eq!(response.latest_receipt_info(), None);
    }

    #[test]
    fn legacy_receipt_is_single_purchase() {
        let response = parse(json!({
            "status": 0,
            "receipt": { "bid": "io.fractic.legacy", "bundle_id": "ignored", "transaction_id": "7" },
        }))
        .unwrap();
        assert_eq!(response.kind(), ResponseKind::Legacy);
        assert!(response.is_valid());
        assert_eq!(response.purchases().len(), 1);
        assert_eq!(response.purchases()[0].as_value(), response.receipt());
        assert_eq!(response.bundle_id(), Some("io.fractic.legacy"));
        assert_eq!(response.transaction_id(), None);
        assert_eq!(response.app_item_id(), None);
    }

    #[test]
    fn legacy_ignores_latest_receipt_fields() {
        let response = parse(json!({
            "status": 0,
            "receipt": { "bid": "io.fractic.legacy" },
            "latest_receipt": "abc",
            "latest_receipt_info": [{ "transaction_id": "9" }],
        }))
        .unwrap();
        assert_eq!(response.latest_receipt(), None);
        assert_eq!(response.latest_receipt_info(), None);
        assert_eq!(response.transaction_id(), None);
    }

    #[test]
    fn status_only_response() {
        let response = parse(json!({ "status": 21005 })).unwrap();
        assert_eq!(response.kind(), ResponseKind::StatusOnly);
        assert_eq!(response.result_code(), ResultCode::ServiceUnavailable);
        assert_eq!(response.receipt(), &json!({}));
        assert!(response.purchases().is_empty());
    }

    #[test]
    fn unreadable_status_is_malformed() {
        let response = parse(json!({ "status": "ok", "receipt": { "bid": "x" } })).unwrap();
        assert_eq!(response.result_code(), ResultCode::DataMalformed);
        assert!(!response.is_valid());

        let response = parse(json!({ "receipt": { "bid": "x" } })).unwrap();
        assert_eq!(response.result_code(), ResultCode::DataMalformed);

        let response = parse(json!({ "status": "21007" })).unwrap();
        assert_eq!(response.result_code(), ResultCode::SandboxReceiptSentToProduction);
    }

    #[test]
    fn fallback_is_malformed() {
        let response = parse(json!({ "environment": "Sandbox" })).unwrap();
        assert_eq!(response.kind(), ResponseKind::Malformed);
        assert_eq!(response.result_code(), ResultCode::DataMalformed);
        assert!(!response.is_valid());
        assert_eq!(response.raw_response().get("environment"), Some(&json!("Sandbox")));
    }
}
