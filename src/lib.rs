pub(crate) mod data {
    pub(crate) mod models {
        pub(crate) mod verify_receipt {
            pub(crate) mod response_shape;
        }
    }
    pub(crate) mod repositories {
        pub(crate) mod receipt_response_repository_impl;
    }
}

pub mod domain {
    pub mod entities {
        pub mod purchase_entry;
        pub mod result_code;
        pub mod verify_receipt_response;
    }
    pub mod repositories {
        pub mod receipt_response_repository;
    }
}

pub mod errors;
pub mod util;

pub use domain::entities::{
    purchase_entry::PurchaseEntry,
    result_code::ResultCode,
    verify_receipt_response::{ResponseKind, VerifyReceiptResponse},
};
pub use errors::ReceiptResponseError;
pub use util::ResponseParser;
