use thiserror::Error;

pub type FinchatResult<T> = Result<T, FinchatError>;

/// Application error type. Transport problems of every flavor (connection,
/// bad status, unparseable body) collapse into `RequestFailed`; the chat
/// screen recovers them all with the same fallback reply.
#[derive(Debug, Error)]
pub enum FinchatError {
    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("config error: {0}")]
    ConfigError(String),
}

impl FinchatError {
    pub fn request_error(msg: impl Into<String>) -> Self {
        FinchatError::RequestFailed(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        FinchatError::ConfigError(msg.into())
    }
}
