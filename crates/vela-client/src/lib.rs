//! # vela-client: REST Boundary for the Vela POS Backend
//!
//! Everything between the engine's gateway traits and the wire.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                             vela-client                                 │
//! │                                                                         │
//! │   adapters   SaleGateway / InventorySource / PageFetcher impls          │
//! │      │                                                                  │
//! │   resources  products, clients, brands, categories, users, sales,       │
//! │      │       images (endpoint paths + wire DTOs live here)              │
//! │      │                                                                  │
//! │   envelope   {items, total} OR raw array  ──►  PageResult               │
//! │      │                                                                  │
//! │   http       ApiClient: reqwest + base URL + bearer token               │
//! │      │                                                                  │
//! │   session    login / restore / logout, pluggable SessionStore           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```no_run
//! use vela_client::{ApiClient, ClientConfig, MemorySessionStore, Session};
//!
//! # async fn run() -> Result<(), vela_client::ClientError> {
//! let api = ApiClient::new(&ClientConfig::from_env())?;
//! let mut session = Session::new(api.clone(), MemorySessionStore::new());
//! session.login("maria@example.com", "secret").await?;
//!
//! let gateway = vela_client::BackendGateway::new(api);
//! # let _ = gateway;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod resources;
pub mod session;

pub use adapters::BackendGateway;
pub use config::ClientConfig;
pub use envelope::ListEnvelope;
pub use error::{ClientError, ClientResult};
pub use http::ApiClient;
pub use resources::{
    BrandsApi, CategoriesApi, ClientsApi, ImagesApi, ProductForm, ProductsApi, SalesApi, UsersApi,
};
pub use session::{
    FileSessionStore, MemorySessionStore, Session, SessionStore, StoredSession,
};
