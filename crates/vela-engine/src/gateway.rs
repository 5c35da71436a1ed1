//! # Gateway Traits
//!
//! The seams between the controllers and the transport layer. vela-client
//! implements these over HTTP; tests implement them with in-memory fakes.
//!
//! ## Error Shape
//! Remote failures keep the server's `detail` message when one was
//! decodable, because the UI surfaces it verbatim (a stock conflict from
//! the backend reads better than "request failed"). Transport-level
//! failures carry whatever the transport said; for display purposes the
//! two are treated identically.

use async_trait::async_trait;
use thiserror::Error;

use vela_core::cart::SaleDraft;
use vela_core::paginate::{PageQuery, PageResult};
use vela_core::types::{Product, Sale};

use crate::inventory::CatalogFilter;

// =============================================================================
// Gateway Error
// =============================================================================

/// What a controller sees when a remote call fails.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// Non-2xx HTTP response. `detail` is the server's error message when
    /// the body carried a decodable one.
    #[error("remote error (status {status})")]
    Remote {
        status: u16,
        detail: Option<String>,
    },

    /// Transport-level failure (connection refused, timeout, bad TLS).
    #[error("network failure: {0}")]
    Network(String),
}

/// Fallback shown when the server gave us nothing usable.
const GENERIC_FAILURE: &str = "The request could not be completed";

impl GatewayError {
    /// The message to show the user: the server detail verbatim when
    /// available, a generic message otherwise.
    pub fn display_message(&self) -> String {
        match self {
            GatewayError::Remote {
                detail: Some(detail),
                ..
            } if !detail.trim().is_empty() => detail.clone(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

/// Convenience type alias for Results with GatewayError.
pub type GatewayResult<T> = Result<T, GatewayError>;

// =============================================================================
// Traits
// =============================================================================

/// Commits a sale draft to the backend.
#[async_trait]
pub trait SaleGateway {
    /// `POST` the draft; returns the persisted sale with its
    /// server-assigned number and total.
    async fn create_sale(&self, draft: &SaleDraft) -> GatewayResult<Sale>;
}

/// Fetches the sellable catalog for the inventory snapshot.
#[async_trait]
pub trait InventorySource {
    async fn fetch_products(&self, filter: &CatalogFilter) -> GatewayResult<Vec<Product>>;
}

/// Fetches one page of a list screen's collection.
///
/// Implementations normalize whatever shape the backend answers with
/// (pre-paginated envelope or raw array) down to [`PageResult`] before it
/// gets here; controllers never see the difference.
#[async_trait]
pub trait PageFetcher<T> {
    async fn fetch_page(&self, query: &PageQuery) -> GatewayResult<PageResult<T>>;
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_message_prefers_server_detail() {
        let err = GatewayError::Remote {
            status: 409,
            detail: Some("Stock insuficiente para Camiseta".to_string()),
        };
        assert_eq!(err.display_message(), "Stock insuficiente para Camiseta");
    }

    #[test]
    fn test_display_message_falls_back_when_detail_missing_or_blank() {
        let err = GatewayError::Remote {
            status: 500,
            detail: None,
        };
        assert_eq!(err.display_message(), GENERIC_FAILURE);

        let err = GatewayError::Remote {
            status: 500,
            detail: Some("   ".to_string()),
        };
        assert_eq!(err.display_message(), GENERIC_FAILURE);

        let err = GatewayError::Network("connection refused".to_string());
        assert_eq!(err.display_message(), GENERIC_FAILURE);
    }
}
