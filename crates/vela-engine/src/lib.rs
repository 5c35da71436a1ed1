//! # vela-engine: Controllers for the Vela POS Client
//!
//! The stateful pieces a UI binds to. Everything here runs on a
//! single-threaded, event-driven model: the only suspension points are the
//! async gateway calls, there is no parallelism and there are no locks.
//!
//! ## Modules
//!
//! - [`gateway`] - Async traits the transport layer implements, plus the
//!   detail-preserving [`gateway::GatewayError`]
//! - [`checkout`] - The validate → confirm → submit → reconcile sale flow
//! - [`list`] - The paginated list controller shared by all six list
//!   screens, with last-write-wins response ordering
//! - [`inventory`] - Point-in-time product/stock snapshot for the POS
//!
//! ## Ordering Guarantee
//! Within one controller instance, overlapping fetches resolve with "last
//! request wins": every fetch is issued under a monotonically increasing
//! token and a response is discarded unless its token is the newest one
//! issued. Staleness is handled by discarding, never by aborting the
//! transport.

pub mod checkout;
pub mod gateway;
pub mod inventory;
pub mod list;

pub use checkout::{Checkout, CheckoutError, CheckoutState, SubmitBlock};
pub use gateway::{GatewayError, GatewayResult, InventorySource, PageFetcher, SaleGateway};
pub use inventory::{CatalogFilter, InventorySnapshot};
pub use list::{Applied, FetchTicket, ListController};
