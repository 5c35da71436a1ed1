//! # Client Errors
//!
//! One error type for everything the transport layer can fail with. The
//! engine crates never see these directly; the [`From`] impl at the bottom
//! folds them into [`GatewayError`] at the adapter boundary.

use thiserror::Error;

use vela_engine::GatewayError;

/// Errors from the REST boundary and session storage.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a usable response (DNS, connect,
    /// timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status. `detail` carries
    /// the server's own message when the body had one.
    #[error("remote error (status {status}): {}", detail.as_deref().unwrap_or("no detail"))]
    Remote {
        status: u16,
        detail: Option<String>,
    },

    /// 401 from the backend: the token is missing, expired, or revoked.
    /// Callers force a logout on this.
    #[error("authentication required")]
    Unauthorized,

    /// A success response whose body did not match the expected shape.
    #[error("response decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Session storage failed to read or write.
    #[error("session storage error: {0}")]
    Storage(String),

    /// Persisted session data exists but cannot be parsed. The store is
    /// reset and the user must log in again.
    #[error("persisted session is corrupt: {0}")]
    StorageCorruption(String),
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

impl From<ClientError> for GatewayError {
    /// Collapses transport detail into the two cases the engine
    /// distinguishes: the server said no, or the server was never heard
    /// from.
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Remote { status, detail } => GatewayError::Remote { status, detail },
            ClientError::Unauthorized => GatewayError::Remote {
                status: 401,
                detail: None,
            },
            other => GatewayError::Network(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_maps_with_detail() {
        let err = ClientError::Remote {
            status: 400,
            detail: Some("Stock insuficiente".to_string()),
        };
        match GatewayError::from(err) {
            GatewayError::Remote { status, detail } => {
                assert_eq!(status, 400);
                assert_eq!(detail.as_deref(), Some("Stock insuficiente"));
            }
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn test_unauthorized_maps_to_401() {
        match GatewayError::from(ClientError::Unauthorized) {
            GatewayError::Remote { status, detail } => {
                assert_eq!(status, 401);
                assert!(detail.is_none());
            }
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn test_storage_maps_to_network() {
        let err = ClientError::Storage("disk full".to_string());
        assert!(matches!(GatewayError::from(err), GatewayError::Network(_)));
    }
}
