//! # Resource Clients
//!
//! One thin client per backend resource, each owning its endpoint paths
//! and wire DTOs. All of them share a cloned [`crate::ApiClient`], so a
//! single login authenticates every resource.

pub mod catalog;
pub mod clients;
pub mod images;
pub mod products;
pub mod sales;
pub mod users;

pub use catalog::{BrandsApi, CategoriesApi};
pub use clients::ClientsApi;
pub use images::ImagesApi;
pub use products::{ProductForm, ProductsApi};
pub use sales::SalesApi;
pub use users::UsersApi;
