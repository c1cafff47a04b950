//! Error conversion from the core error type.

use crate::Error;
use kindstore_core::Error as CoreError;

/// Convert a core error to an executor Error, keeping its category.
impl From<CoreError> for Error {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::MalformedKey(e) => Error::InvalidKey {
                reason: e.to_string(),
                code: e.reason_code().to_string(),
            },
            CoreError::BadRequest(reason) => Error::BadRequest { reason },
            CoreError::NeedIndex(reason) => Error::NeedIndex { reason },
            CoreError::Storage(reason) => Error::Storage { reason },
            CoreError::Internal(reason) => Error::Internal { reason },
        }
    }
}
