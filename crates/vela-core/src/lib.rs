//! # vela-core: Pure Business Logic for the Vela POS Client
//!
//! This crate is the **heart** of the Vela POS client. It holds every rule
//! the point-of-sale flow relies on, as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Vela POS Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    UI (whatever renders)                        │   │
//! │  │    Catalog view ──► Cart view ──► Confirm ──► Receipt           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                vela-engine (controllers)                        │   │
//! │  │    Checkout orchestrator, list controller, inventory snapshot   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vela-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │    cart    │  │ paginate  │  │   │
//! │  │   │  Product  │  │   Money   │  │    Cart    │  │ PageQuery │  │   │
//! │  │   │   Sale    │  │  Percent  │  │  CartLine  │  │PageResult │  │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 vela-client (REST boundary)                     │   │
//! │  │          reqwest transport, endpoints, session storage          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Client, Sale, User, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The cart model and sale-draft derivation
//! - [`paginate`] - Pagination queries, results, and page math
//! - [`validation`] - Form-level input validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network and file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are cents (i64) internally;
//!    the wire talks decimal major units and converts at the serde boundary
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod paginate;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, SaleDraft, SaleDraftLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use paginate::{PageQuery, PageResult};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart.
///
/// ## Business Reason
/// Prevents runaway carts and keeps a single ticket reviewable on the
/// confirmation screen.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line in the cart.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// Stock checks usually bind first; this cap is the backstop for
/// non-tracked items.
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Default page size for the admin list screens.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Page size used when loading the POS catalog and client pickers.
/// The POS screen wants "everything sellable" in one fetch.
pub const CATALOG_PAGE_SIZE: u32 = 100;
