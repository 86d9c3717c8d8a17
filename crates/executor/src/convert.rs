//! Conversion from store errors to executor errors.

use normstore_core::StoreError;

use crate::Error;

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateIdentifier { id } => Error::DuplicateIdentifier { id },
            StoreError::MissingIdentifier => Error::InvalidInput {
                reason: err.to_string(),
            },
            other => Error::Store {
                reason: other.to_string(),
            },
        }
    }
}
