//! Sales resource (`/api/admin/sales`): committing sales, history, and
//! the dashboard aggregates that hang off the same endpoint.

use tracing::info;

use vela_core::cart::SaleDraft;
use vela_core::paginate::{PageQuery, PageResult};
use vela_core::types::{DashboardSummary, Sale, TopProduct};

use crate::envelope::ListEnvelope;
use crate::error::ClientResult;
use crate::http::ApiClient;

const BASE: &str = "/api/admin/sales";

/// Client for the sales resource.
#[derive(Debug, Clone)]
pub struct SalesApi {
    api: ApiClient,
}

impl SalesApi {
    pub fn new(api: ApiClient) -> Self {
        SalesApi { api }
    }

    /// Commits a draft. The backend is the arbiter of stock and prices;
    /// the answer carries the assigned sale number and computed total.
    pub async fn create(&self, draft: &SaleDraft) -> ClientResult<Sale> {
        let sale: Sale = self.api.post(BASE, draft).await?;
        info!(sale_number = %sale.sale_number, total = %sale.total, "sale committed");
        Ok(sale)
    }

    pub async fn get(&self, id: &str) -> ClientResult<Sale> {
        self.api.get(&format!("{BASE}/{id}")).await
    }

    /// One page of past sales, newest first per the backend's ordering.
    ///
    /// The history screen's controls all travel as query parameters: the
    /// free-text search plus the `start_date`, `end_date`, and
    /// `metodo_pago` filters, with server-side pagination.
    pub async fn history(&self, query: &PageQuery) -> ClientResult<PageResult<Sale>> {
        let envelope: ListEnvelope<Sale> = self
            .api
            .get_with_query(BASE, &history_params(query))
            .await?;
        Ok(envelope.into_page(query))
    }

    /// Aggregate metrics for the dashboard screen.
    pub async fn dashboard(&self) -> ClientResult<DashboardSummary> {
        self.api.get(&format!("{BASE}/dashboard")).await
    }

    /// Best sellers, capped at `limit` rows.
    pub async fn top_products(&self, limit: u32) -> ClientResult<Vec<TopProduct>> {
        self.api
            .get_with_query(&format!("{BASE}/top-products"), &[("limit", limit.to_string())])
            .await
    }
}

/// Query parameters for the history fetch. Only filter keys the endpoint
/// understands are forwarded.
fn history_params(query: &PageQuery) -> Vec<(&'static str, String)> {
    let mut params: Vec<(&'static str, String)> = Vec::new();
    if !query.search_term.is_empty() {
        params.push(("search", query.search_term.clone()));
    }
    for key in ["start_date", "end_date", "metodo_pago"] {
        if let Some(value) = query.filters.get(key) {
            params.push((key, value.clone()));
        }
    }
    params.push(("skip", query.skip().to_string()));
    params.push(("limit", query.limit().to_string()));
    params
}
