use serde_json::Value;

use crate::{
    domain::entities::verify_receipt_response::VerifyReceiptResponse,
    errors::ReceiptResponseError,
};

pub trait ReceiptResponseRepository: Send + Sync {
    /// Normalizes an already decoded verifyReceipt response body. Fails only
    /// if `body` is not a JSON object.
    fn parse_verify_receipt_response(
        &self,
        body: Value,
    ) -> Result<VerifyReceiptResponse, ReceiptResponseError>;
}
