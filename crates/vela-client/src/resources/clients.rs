//! Clients (customers) resource (`/api/admin/clients`).
//!
//! This endpoint answers the whole search-filtered collection as a raw
//! array, so pagination is client-side through the envelope
//! normalization.

use vela_core::paginate::{PageQuery, PageResult};
use vela_core::types::Client;

use crate::envelope::ListEnvelope;
use crate::error::ClientResult;
use crate::http::ApiClient;

const BASE: &str = "/api/admin/clients";

/// Client for the customers resource.
#[derive(Debug, Clone)]
pub struct ClientsApi {
    api: ApiClient,
}

impl ClientsApi {
    pub fn new(api: ApiClient) -> Self {
        ClientsApi { api }
    }

    /// One page of customers. Only the search term goes to the server;
    /// the page is cut from the returned collection.
    pub async fn list(&self, query: &PageQuery) -> ClientResult<PageResult<Client>> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if !query.search_term.is_empty() {
            params.push(("search", query.search_term.clone()));
        }

        let envelope: ListEnvelope<Client> = self.api.get_with_query(BASE, &params).await?;
        Ok(envelope.into_page(query))
    }

    pub async fn get(&self, id: &str) -> ClientResult<Client> {
        self.api.get(&format!("{BASE}/{id}")).await
    }

    /// Exact lookup by cédula, the POS client-picker fast path.
    pub async fn by_national_id(&self, national_id: &str) -> ClientResult<Client> {
        self.api.get(&format!("{BASE}/cedula/{national_id}")).await
    }

    pub async fn create(&self, client: &Client) -> ClientResult<Client> {
        self.api.post(BASE, client).await
    }

    pub async fn update(&self, id: &str, client: &Client) -> ClientResult<Client> {
        self.api.put(&format!("{BASE}/{id}"), client).await
    }

    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        self.api.delete(&format!("{BASE}/{id}")).await
    }
}
