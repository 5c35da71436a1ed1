//! # Inventory Snapshot
//!
//! A point-in-time copy of the sellable catalog, fetched at POS-open time
//! and re-fetched after every committed sale (committed stock changed
//! server-side).
//!
//! ## Staleness Is Normal
//! The snapshot is a copy, not a reservation. Another session can sell the
//! same stock while this one holds a cart; the backend is the final
//! arbiter and rejects the sale with a stock conflict at submission time.
//! That rejection is an expected, non-fatal path, not a bug.

use chrono::{DateTime, Utc};

use vela_core::types::{CatalogRef, Product};

use crate::gateway::{GatewayResult, InventorySource};

// =============================================================================
// Catalog Filter
// =============================================================================

/// The POS catalog filters: free-text search plus category/brand pickers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    pub search: String,
    pub category: Option<CatalogRef>,
    pub brand: Option<CatalogRef>,
}

// =============================================================================
// Inventory Snapshot
// =============================================================================

/// The in-memory product list consumed by the POS screen and the cart's
/// stock checks.
#[derive(Debug, Clone, Default)]
pub struct InventorySnapshot {
    products: Vec<Product>,
    filter: CatalogFilter,
    fetched_at: Option<DateTime<Utc>>,
}

impl InventorySnapshot {
    /// An empty snapshot; the first [`InventorySnapshot::refresh`] fills it.
    pub fn new() -> Self {
        InventorySnapshot::default()
    }

    /// Re-fetches using the last filter (or the default, before any
    /// filtered fetch happened).
    pub async fn refresh<S: InventorySource>(&mut self, source: &S) -> GatewayResult<()> {
        let filter = self.filter.clone();
        self.refresh_with(source, filter).await
    }

    /// Fetches with a new filter and remembers it for later refreshes.
    pub async fn refresh_with<S: InventorySource>(
        &mut self,
        source: &S,
        filter: CatalogFilter,
    ) -> GatewayResult<()> {
        let products = source.fetch_products(&filter).await?;
        tracing::debug!(count = products.len(), "inventory snapshot refreshed");

        self.products = products;
        self.filter = filter;
        self.fetched_at = Some(Utc::now());
        Ok(())
    }

    /// The products in the snapshot, in backend order.
    #[inline]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Looks up a product by id.
    pub fn product(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    /// Stock level for a product, `None` when the product is not in the
    /// snapshot (filtered out or removed server-side).
    pub fn stock_for(&self, product_id: &str) -> Option<i64> {
        self.product(product_id).map(|p| p.stock)
    }

    /// When the snapshot was last refreshed, if ever.
    #[inline]
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    /// The filter the snapshot was last fetched with.
    #[inline]
    pub fn filter(&self) -> &CatalogFilter {
        &self.filter
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
