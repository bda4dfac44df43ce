use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("unsupported url scheme: {0}")]
    UnsupportedScheme(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request timed out")]
    Timeout,

    #[error("too many redirects")]
    RedirectLoop,

    #[error("http error {status}")]
    Http { status: StatusCode },

    #[error("page too large (over {0} bytes)")]
    BodyTooLarge(u64),

    #[error("unsupported content-type: {0}")]
    UnsupportedContentType(String),

    #[error("client setup failed: {0}")]
    Client(String),

    #[error("transport error: {0}")]
    Transport(String),
}

impl FetchError {
    /// Whether trying the same URL again later could succeed.
    pub fn is_retriable(&self) -> bool {
        match self {
            Self::Connect(_) | Self::Timeout | Self::Transport(_) => true,
            Self::Http { status } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            Self::InvalidUrl(_)
            | Self::UnsupportedScheme(_)
            | Self::RedirectLoop
            | Self::BodyTooLarge(_)
            | Self::UnsupportedContentType(_)
            | Self::Client(_) => false,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_redirect() {
            Self::RedirectLoop
        } else if let Some(status) = err.status() {
            Self::Http { status }
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else if err.is_builder() {
            Self::Client(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retriable_classification() {
        assert!(FetchError::Timeout.is_retriable());
        assert!(FetchError::Connect("refused".into()).is_retriable());
        assert!(
            FetchError::Http {
                status: StatusCode::BAD_GATEWAY
            }
            .is_retriable()
        );
        assert!(
            FetchError::Http {
                status: StatusCode::TOO_MANY_REQUESTS
            }
            .is_retriable()
        );
        assert!(
            !FetchError::Http {
                status: StatusCode::NOT_FOUND
            }
            .is_retriable()
        );
        assert!(!FetchError::BodyTooLarge(10).is_retriable());
        assert!(!FetchError::UnsupportedContentType("image/png".into()).is_retriable());
    }
}
