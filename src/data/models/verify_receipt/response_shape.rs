use serde_json::{Map, Value};

use crate::domain::entities::verify_receipt_response::ResponseKind;

/// Borrowed view over a verifyReceipt response body, tagged by layout.
///
/// https://developer.apple.com/documentation/appstorereceipts/responsebody
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ResponseShape<'a> {
    /// `receipt` is an object and `receipt.in_app` is an array.
    Modern {
        status: Option<&'a Value>,
        receipt: &'a Map<String, Value>,
        in_app: &'a [Value],
        latest_receipt_info: Option<&'a Value>,
        latest_receipt: Option<&'a Value>,
    },
    /// `receipt` is present but not in the modern layout.
    Legacy {
        status: Option<&'a Value>,
        receipt: &'a Value,
    },
    /// No `receipt`, but a `status`.
    StatusOnly { status: &'a Value },
    Malformed,
}

impl ResponseShape<'_> {
    pub(crate) fn kind(&self) -> ResponseKind {
        match self {
            ResponseShape::Modern { .. } => ResponseKind::Modern,
            ResponseShape::Legacy { .. } => ResponseKind::Legacy,
            ResponseShape::StatusOnly { .. } => ResponseKind::StatusOnly,
            ResponseShape::Malformed => ResponseKind::Malformed,
        }
    }
}

/// First match wins: modern, legacy, status-only, malformed.
pub(crate) fn classify(body: &Map<String, Value>) -> ResponseShape<'_> {
    let status = body.get("status");
    let Some(receipt_value) = body.get("receipt") else {
        return match status {
            Some(status) => ResponseShape::StatusOnly { status },
            None => ResponseShape::Malformed,
        };
    };
    if let Value::Object(receipt) = receipt_value {
        if let Some(Value::Array(in_app)) = receipt.get("in_app") {
            return ResponseShape::Modern {
                status,
                receipt,
                in_app,
                latest_receipt_info: body.get("latest_receipt_info"),
                latest_receipt: body.get("latest_receipt"),
            };
        }
    }
    ResponseShape::Legacy {
        status,
        receipt: receipt_value,
    }
}
