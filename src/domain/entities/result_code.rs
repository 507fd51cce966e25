use std::fmt;

use serde::{Deserialize, Serialize};

/// Status code returned in the `status` field of a verifyReceipt response.
///
/// https://developer.apple.com/documentation/appstorereceipts/status
///
/// The list is not exhaustive; codes not listed here are kept verbatim as
/// `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum ResultCode {
    /// The receipt is valid.
    Ok,
    /// The App Store could not read the JSON object you provided.
    AppStoreCannotRead,
    /// The data in the receipt-data property was malformed or missing.
    DataMalformed,
    /// The receipt could not be authenticated.
    ReceiptNotAuthenticated,
    /// The shared secret you provided does not match the shared secret on
    /// file for your account. Only returned for iOS 6 style transaction
    /// receipts for auto-renewable subscriptions.
    SharedSecretMismatch,
    /// The receipt server is not currently available.
    ServiceUnavailable,
    /// This receipt is valid but the subscription has expired. The receipt
    /// data is still decoded and returned as part of the response.
    ValidButSubscriptionExpired,
    /// This receipt is from the test environment, but it was sent to the
    /// production environment for verification.
    SandboxReceiptSentToProduction,
    /// This receipt is from the production environment, but it was sent to
    /// the test environment for verification.
    ProductionReceiptSentToSandbox,

    Unknown(i64),
}

impl ResultCode {
    pub fn code(self) -> i64 {
        match self {
            ResultCode::Ok => 0,
            ResultCode::AppStoreCannotRead => 21000,
            ResultCode::DataMalformed => 21002,
            ResultCode::ReceiptNotAuthenticated => 21003,
            ResultCode::SharedSecretMismatch => 21004,
            ResultCode::ServiceUnavailable => 21005,
            ResultCode::ValidButSubscriptionExpired => 21006,
            ResultCode::SandboxReceiptSentToProduction => 21007,
            ResultCode::ProductionReceiptSentToSandbox => 21008,
            ResultCode::Unknown(code) => code,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ResultCode::Ok => "receipt is valid",
            ResultCode::AppStoreCannotRead => "App Store could not read the request",
            ResultCode::DataMalformed => "receipt data malformed or missing",
            ResultCode::ReceiptNotAuthenticated => "receipt could not be authenticated",
            ResultCode::SharedSecretMismatch => "shared secret does not match",
            ResultCode::ServiceUnavailable => "receipt server unavailable",
            ResultCode::ValidButSubscriptionExpired => "receipt valid but subscription expired",
            ResultCode::SandboxReceiptSentToProduction => "sandbox receipt sent to production",
            ResultCode::ProductionReceiptSentToSandbox => "production receipt sent to sandbox",
            ResultCode::Unknown(_) => "unrecognized status code",
        }
    }

    /// True when the receipt must be resubmitted to the other environment's
    /// endpoint (21007 / 21008).
    pub fn is_environment_mismatch(self) -> bool {
        matches!(
            self,
            ResultCode::SandboxReceiptSentToProduction | ResultCode::ProductionReceiptSentToSandbox
        )
    }
}

impl From<i64> for ResultCode {
    fn from(code: i64) -> Self {
        match code {
            0 => ResultCode::Ok,
            21000 => ResultCode::AppStoreCannotRead,
            21002 => ResultCode::DataMalformed,
            21003 => ResultCode::ReceiptNotAuthenticated,
            21004 => ResultCode::SharedSecretMismatch,
            21005 => ResultCode::ServiceUnavailable,
            21006 => ResultCode::ValidButSubscriptionExpired,
            21007 => ResultCode::SandboxReceiptSentToProduction,
            21008 => ResultCode::ProductionReceiptSentToSandbox,
            other => ResultCode::Unknown(other),
        }
    }
}

impl From<ResultCode> for i64 {
    fn from(code: ResultCode) -> Self {
        code.code()
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.description())
    }
}
