//! # Domain Types
//!
//! Core domain types used throughout the Vela POS client.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Sale        │   │    Client       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  code           │   │  sale_number    │   │  national_id    │       │
//! │  │  price (Money)  │   │  total (Money)  │   │  names          │       │
//! │  │  stock          │   │  lines          │   │  contact info   │       │
//! │  │  category (ref) │   │  payment_method │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   CatalogRef    │   │ PaymentMethod   │   │   User / Role   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Id("64ab…")    │   │  Cash           │   │  Admin          │       │
//! │  │  Name("Nike")   │   │  Card           │   │  Seller         │       │
//! │  └─────────────────┘   │  Transfer       │   └─────────────────┘       │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Naming
//! The backend speaks Spanish field names (`nombre`, `precio`,
//! `numero_venta`). Rust field names stay English; serde renames bridge the
//! wire. Monetary wire fields are decimal major units, mapped through
//! [`crate::money::as_major_units`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Catalog Reference
// =============================================================================

/// An explicit, tagged reference to a category or brand.
///
/// ## Why Not a Bare String?
/// Earlier backend revisions put either an ObjectId or a display name in
/// the product's `categoria`/`marca` field, and the client guessed which
/// by string shape (24 chars, no spaces ⇒ id). That heuristic is gone:
/// whichever adapter produces a `CatalogRef` states what it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CatalogRef {
    /// A backend-assigned identifier.
    Id(String),
    /// A human-entered display name.
    Name(String),
}

impl CatalogRef {
    /// Returns the underlying string, whatever it refers to.
    pub fn raw(&self) -> &str {
        match self {
            CatalogRef::Id(v) | CatalogRef::Name(v) => v,
        }
    }

    /// True when this reference carries a backend identifier.
    pub fn is_id(&self) -> bool {
        matches!(self, CatalogRef::Id(_))
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// This is the normalized domain shape; the wire DTO (Spanish field names,
/// decimal prices, bare category strings) lives in the client crate and is
/// converted exactly once at that boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Backend identifier.
    pub id: String,

    /// Business code shown on tickets and used for quick lookup.
    pub code: String,

    /// Display name.
    pub name: String,

    /// Unit price in cents.
    pub price: Money,

    /// Units currently available according to the last fetch. This is a
    /// snapshot, not a reservation; the backend re-checks at sale time.
    pub stock: i64,

    /// Threshold below which the product counts as low-stock.
    pub min_stock: Option<i64>,

    /// Category reference, tagged by the producing adapter.
    pub category: CatalogRef,

    /// Brand reference, tagged by the producing adapter.
    pub brand: CatalogRef,

    /// Optional long description.
    pub description: Option<String>,

    /// Available sizes (apparel).
    pub sizes: Vec<String>,

    /// Available colors (apparel).
    pub colors: Vec<String>,

    /// Uploaded image URL, if any.
    pub image_url: Option<String>,
}

impl Product {
    /// Checks whether the product has any sellable stock at all.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Checks whether stock has fallen to or below the low-stock line.
    pub fn is_low_stock(&self) -> bool {
        match self.min_stock {
            Some(min) => self.stock <= min,
            None => false,
        }
    }
}

// =============================================================================
// Brand & Category
// =============================================================================

/// A product brand. Thin catalog entity; the backend only tracks a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
}

/// A product category. Same shape as [`Brand`] on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
}

// =============================================================================
// Client (customer)
// =============================================================================

/// A customer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// National identity number (cédula), 10 to 13 digits.
    #[serde(rename = "cedula")]
    pub national_id: String,

    #[serde(rename = "nombres")]
    pub first_names: String,

    #[serde(rename = "apellidos")]
    pub last_names: String,

    #[serde(rename = "telefono", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(rename = "correo", default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(rename = "direccion", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(rename = "ciudad", default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl Client {
    /// Full display name, the way receipts and pickers show it.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_names, self.last_names)
    }
}

// =============================================================================
// User & Role
// =============================================================================

/// Account role. Admins manage inventory and users; sellers run the POS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(rename = "VENDEDOR")]
    Seller,
}

/// A system user (cashier or administrator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "cedula")]
    pub national_id: String,

    #[serde(rename = "nombres")]
    pub first_names: String,

    #[serde(rename = "apellidos")]
    pub last_names: String,

    #[serde(rename = "correo")]
    pub email: String,

    #[serde(rename = "rol")]
    pub role: Role,

    #[serde(rename = "activo")]
    pub active: bool,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_names, self.last_names)
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Payload for creating a user. Same as [`User`] plus the initial password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    #[serde(rename = "cedula")]
    pub national_id: String,
    #[serde(rename = "nombres")]
    pub first_names: String,
    #[serde(rename = "apellidos")]
    pub last_names: String,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "rol")]
    pub role: Role,
    pub password: String,
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale was paid. Wire values are the backend's Spanish constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "EFECTIVO")]
    Cash,
    #[serde(rename = "TARJETA")]
    Card,
    #[serde(rename = "TRANSFERENCIA")]
    Transfer,
}

impl Default for PaymentMethod {
    /// Cash is the POS screen's preselected method.
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A line of a persisted sale, as the backend returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleLine {
    #[serde(rename = "producto_id")]
    pub product_id: String,

    #[serde(rename = "nombre_producto")]
    pub product_name: String,

    #[serde(rename = "cantidad")]
    pub quantity: i64,

    #[serde(rename = "precio_unitario", with = "crate::money::as_major_units")]
    pub unit_price: Money,

    #[serde(rename = "subtotal", with = "crate::money::as_major_units")]
    pub line_total: Money,
}

/// A persisted sale. The sale number and total are server-assigned; the
/// client never computes them for committed sales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "numero_venta")]
    pub sale_number: String,

    #[serde(rename = "fecha")]
    pub date: DateTime<Utc>,

    #[serde(rename = "cliente_id")]
    pub client_id: String,

    #[serde(rename = "cliente_nombre")]
    pub client_name: String,

    #[serde(rename = "usuario_id")]
    pub user_id: String,

    #[serde(rename = "usuario_nombre")]
    pub user_name: String,

    #[serde(rename = "detalles")]
    pub lines: Vec<SaleLine>,

    #[serde(rename = "total", with = "crate::money::as_major_units")]
    pub total: Money,

    #[serde(rename = "metodo_pago")]
    pub payment_method: PaymentMethod,
}

// =============================================================================
// Dashboard DTOs
// =============================================================================

/// Best-selling product row on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopProduct {
    pub product_id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "categoria", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "imagen", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(rename = "total_vendido")]
    pub units_sold: i64,
    #[serde(rename = "total_monto", with = "crate::money::as_major_units")]
    pub amount: Money,
}

/// Best-performing seller row on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopSeller {
    #[serde(rename = "usuario_id")]
    pub user_id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "total_ventas")]
    pub sale_count: i64,
    #[serde(rename = "total_monto", with = "crate::money::as_major_units")]
    pub amount: Money,
}

/// Aggregate metrics for the dashboard screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    #[serde(rename = "ventas_hoy")]
    pub sales_today: i64,
    #[serde(rename = "ventas_mes")]
    pub sales_this_month: i64,
    #[serde(rename = "total_vendido_hoy", with = "crate::money::as_major_units")]
    pub revenue_today: Money,
    #[serde(rename = "total_vendido_mes", with = "crate::money::as_major_units")]
    pub revenue_this_month: Money,
    #[serde(rename = "total_clientes")]
    pub client_count: i64,
    #[serde(rename = "productos_bajo_stock")]
    pub low_stock_products: i64,
    #[serde(rename = "top_productos", default)]
    pub top_products: Vec<TopProduct>,
    #[serde(rename = "top_vendedores", default)]
    pub top_sellers: Vec<TopSeller>,
}

// =============================================================================
// Unit Tests
// =============================================================================
