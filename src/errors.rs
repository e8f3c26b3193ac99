use thiserror::Error;

/// Network-level failure while talking to the target. Never fatal: the
/// runner downgrades every variant to a Warn finding and continues.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("connection to {url} failed: {reason}")]
    Connect { url: String, reason: String },

    #[error("request to {url} failed: {reason}")]
    Other { url: String, reason: String },
}

impl TransportError {
    pub fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout {
                url: url.to_string(),
            }
        } else if err.is_connect() {
            TransportError::Connect {
                url: url.to_string(),
                reason: err.to_string(),
            }
        } else {
            TransportError::Other {
                url: url.to_string(),
                reason: err.to_string(),
            }
        }
    }
}
