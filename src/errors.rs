use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorType {
    /// The worker pool for the frame update could not be created.
    ThreadPoolUnavailable,
    /// The configured batch size was zero.
    InvalidBatchSize,
    /// An element's update panicked. The element is skipped for the frame, siblings still update.
    ElementUpdateFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub type_: ErrorType,
    pub text: String,
}

impl Error {
    pub(crate) fn new(type_: ErrorType, text: impl Into<String>) -> Self {
        Self {
            type_,
            text: text.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(type: {:?}) {}", self.type_, self.text)
    }
}

impl std::error::Error for Error {}
