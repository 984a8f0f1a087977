// src/errors.rs

use thiserror::Error;

pub type SidechatResult<T> = Result<T, SidechatError>;

/// Setup-time failures. A failed send never travels this path; it is
/// absorbed into the transcript as the fallback message instead.
#[derive(Debug, Error)]
pub enum SidechatError {
    #[error("config error: {0}")]
    Config(String),

    #[error("api error: {0}")]
    Api(String),
}

impl SidechatError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn api_error(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }
}
