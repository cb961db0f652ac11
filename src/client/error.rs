use thiserror::Error;

use crate::transport::TransportError;

/// Coarse classification of a client failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No status code was obtained
    Transport,
    /// The API answered with a non-200 status
    Api,
    /// A 200 response body did not have the expected shape
    Decode,
    /// The request body could not be serialized
    Encode,
}

/// Errors returned by the rules client.
///
/// `action` names the step that failed, e.g. "create detection index".
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("could not {action}: {source}")]
    Transport {
        action: &'static str,
        #[source]
        source: TransportError,
    },

    #[error("could not {action}; API status code = {status}; response body = {body}")]
    Api {
        action: &'static str,
        status: u16,
        body: String,
    },

    #[error("could not {action}: {source}")]
    Decode {
        action: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not {action}: {source}")]
    Encode {
        action: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Transport { .. } => ErrorKind::Transport,
            ClientError::Api { .. } => ErrorKind::Api,
            ClientError::Decode { .. } => ErrorKind::Decode,
            ClientError::Encode { .. } => ErrorKind::Encode,
        }
    }

    /// HTTP status for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The step that failed.
    pub fn action(&self) -> &'static str {
        match self {
            ClientError::Transport { action, .. }
            | ClientError::Api { action, .. }
            | ClientError::Decode { action, .. }
            | ClientError::Encode { action, .. } => *action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message() {
        let err = ClientError::Api {
            action: "close signals",
            status: 403,
            body: r#"{"message":"forbidden"}"#.to_string(),
        };

        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.status(), Some(403));
        assert_eq!(
            err.to_string(),
            r#"could not close signals; API status code = 403; response body = {"message":"forbidden"}"#
        );
    }

    #[test]
    fn test_transport_error_message() {
        let err = ClientError::Transport {
            action: "bulk create rules",
            source: TransportError::Connection("connection refused".to_string()),
        };

        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.status(), None);
        assert_eq!(err.action(), "bulk create rules");
        assert_eq!(
            err.to_string(),
            "could not bulk create rules: connection failed: connection refused"
        );
    }
}
