use thiserror::Error;

use crate::global_constants;

/// Everything that can go wrong between picking a file and receiving a result.
///
/// The `Display` output is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UploadError {
    #[error("{}", global_constants::USER_MESSAGE_UNSUPPORTED_TYPE)]
    UnsupportedType { mime_type: String },

    #[error("{}", global_constants::USER_MESSAGE_FILE_TOO_LARGE)]
    FileTooLarge { size: u64 },

    #[error("{}", global_constants::USER_MESSAGE_NO_FILE_SELECTED)]
    NoFileSelected,

    #[error("{}{}", global_constants::USER_MESSAGE_PROCESSING_FAILED_PREFIX, .0)]
    BackendLogical(String),

    #[error("{}{}", global_constants::USER_MESSAGE_UPLOAD_FAILED_PREFIX, .0)]
    Transport(String),
}
