//! # Gateway Adapters
//!
//! Where the engine's seams meet this crate's resource clients. Each impl
//! delegates to a resource call and folds [`crate::ClientError`] into
//! [`GatewayError`]; no other file in the workspace mentions both sides.

use async_trait::async_trait;

use vela_core::cart::SaleDraft;
use vela_core::paginate::{PageQuery, PageResult};
use vela_core::types::{Brand, Category, Client, Product, Sale, User};
use vela_engine::{
    CatalogFilter, GatewayResult, InventorySource, PageFetcher, SaleGateway,
};

use crate::http::ApiClient;
use crate::resources::{BrandsApi, CategoriesApi, ClientsApi, ProductsApi, SalesApi, UsersApi};

/// The production gateway: sales and inventory over the REST backend.
///
/// One of these backs the checkout orchestrator and the POS inventory
/// snapshot. It is cheap to clone and shares the caller's [`ApiClient`].
#[derive(Debug, Clone)]
pub struct BackendGateway {
    products: ProductsApi,
    sales: SalesApi,
}

impl BackendGateway {
    pub fn new(api: ApiClient) -> Self {
        BackendGateway {
            products: ProductsApi::new(api.clone()),
            sales: SalesApi::new(api),
        }
    }
}

#[async_trait]
impl SaleGateway for BackendGateway {
    async fn create_sale(&self, draft: &SaleDraft) -> GatewayResult<Sale> {
        self.sales.create(draft).await.map_err(Into::into)
    }
}

#[async_trait]
impl InventorySource for BackendGateway {
    async fn fetch_products(&self, filter: &CatalogFilter) -> GatewayResult<Vec<Product>> {
        self.products.catalog(filter).await.map_err(Into::into)
    }
}

// =============================================================================
// Page fetchers
// =============================================================================
// Each resource client doubles as the page fetcher for its list screen.

#[async_trait]
impl PageFetcher<Product> for ProductsApi {
    async fn fetch_page(&self, query: &PageQuery) -> GatewayResult<PageResult<Product>> {
        self.list(query).await.map_err(Into::into)
    }
}

#[async_trait]
impl PageFetcher<Client> for ClientsApi {
    async fn fetch_page(&self, query: &PageQuery) -> GatewayResult<PageResult<Client>> {
        self.list(query).await.map_err(Into::into)
    }
}

#[async_trait]
impl PageFetcher<User> for UsersApi {
    async fn fetch_page(&self, query: &PageQuery) -> GatewayResult<PageResult<User>> {
        self.list(query).await.map_err(Into::into)
    }
}

#[async_trait]
impl PageFetcher<Brand> for BrandsApi {
    async fn fetch_page(&self, query: &PageQuery) -> GatewayResult<PageResult<Brand>> {
        self.list(query).await.map_err(Into::into)
    }
}

#[async_trait]
impl PageFetcher<Category> for CategoriesApi {
    async fn fetch_page(&self, query: &PageQuery) -> GatewayResult<PageResult<Category>> {
        self.list(query).await.map_err(Into::into)
    }
}

#[async_trait]
impl PageFetcher<Sale> for SalesApi {
    async fn fetch_page(&self, query: &PageQuery) -> GatewayResult<PageResult<Sale>> {
        self.history(query).await.map_err(Into::into)
    }
}
