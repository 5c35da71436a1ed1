//! Brands and categories (`/api/admin/brands`, `/api/admin/categories`).
//!
//! Two identical thin CRUD resources over name-only catalog entities.

use serde::Serialize;

use vela_core::paginate::{PageQuery, PageResult};
use vela_core::types::{Brand, Category};

use crate::envelope::ListEnvelope;
use crate::error::ClientResult;
use crate::http::ApiClient;

/// Create/update payload shared by both catalogs.
#[derive(Debug, Serialize)]
struct NamePayload<'a> {
    #[serde(rename = "nombre")]
    name: &'a str,
}

macro_rules! catalog_api {
    ($(#[$doc:meta])* $api:ident, $item:ty, $base:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $api {
            api: ApiClient,
        }

        impl $api {
            pub fn new(api: ApiClient) -> Self {
                Self { api }
            }

            /// One page, server-paginated through `skip`/`limit`.
            pub async fn list(&self, query: &PageQuery) -> ClientResult<PageResult<$item>> {
                let params = [
                    ("skip", query.skip().to_string()),
                    ("limit", query.limit().to_string()),
                ];
                let envelope: ListEnvelope<$item> =
                    self.api.get_with_query($base, &params).await?;
                Ok(envelope.into_page(query))
            }

            /// The whole catalog, for dropdowns and filters.
            pub async fn all(&self) -> ClientResult<Vec<$item>> {
                let envelope: ListEnvelope<$item> = self.api.get($base).await?;
                Ok(envelope.into_items())
            }

            pub async fn get(&self, id: &str) -> ClientResult<$item> {
                self.api.get(&format!(concat!($base, "/{}"), id)).await
            }

            pub async fn create(&self, name: &str) -> ClientResult<$item> {
                self.api.post($base, &NamePayload { name }).await
            }

            pub async fn update(&self, id: &str, name: &str) -> ClientResult<$item> {
                self.api
                    .put(&format!(concat!($base, "/{}"), id), &NamePayload { name })
                    .await
            }

            pub async fn delete(&self, id: &str) -> ClientResult<()> {
                self.api.delete(&format!(concat!($base, "/{}"), id)).await
            }
        }
    };
}

catalog_api!(
    /// Client for the brands resource.
    BrandsApi,
    Brand,
    "/api/admin/brands"
);

catalog_api!(
    /// Client for the categories resource.
    CategoriesApi,
    Category,
    "/api/admin/categories"
);
