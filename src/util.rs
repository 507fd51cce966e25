use serde_json::Value;

use crate::{
    data::repositories::receipt_response_repository_impl::ReceiptResponseRepositoryImpl,
    domain::{
        entities::verify_receipt_response::VerifyReceiptResponse,
        repositories::receipt_response_repository::ReceiptResponseRepository,
    },
    errors::ReceiptResponseError,
};

/// Entry point for normalizing verifyReceipt responses.
///
/// Sending the request (and retrying against the sandbox on 21007) is left
/// to the caller; this only interprets the decoded JSON body.
pub struct ResponseParser<R: ReceiptResponseRepository = ReceiptResponseRepositoryImpl> {
    receipt_response_repository: R,
}

impl<R: ReceiptResponseRepository> ResponseParser<R> {
    /// Parses a decoded body, keeping a copy of it as the raw response.
    pub fn parse(&self, body: &Value) -> Result<VerifyReceiptResponse, ReceiptResponseError> {
        self.receipt_response_repository
            .parse_verify_receipt_response(body.clone())
    }

    /// Same as `parse`, but takes ownership of the body instead of copying.
    pub fn parse_owned(&self, body: Value) -> Result<VerifyReceiptResponse, ReceiptResponseError> {
        self.receipt_response_repository
            .parse_verify_receipt_response(body)
    }
}

impl ResponseParser<ReceiptResponseRepositoryImpl> {
    pub fn new() -> Self {
        Self {
            receipt_response_repository: ReceiptResponseRepositoryImpl::new(),
        }
    }
}

impl Default for ResponseParser<ReceiptResponseRepositoryImpl> {
    fn default() -> Self {
        Self::new()
    }
}
