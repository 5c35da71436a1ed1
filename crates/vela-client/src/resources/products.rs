//! Products resource (`/api/admin/products`).
//!
//! The only resource with a wire shape that differs from the domain
//! shape: prices are decimal major units, and `categoria`/`marca` are
//! bare ObjectId strings. Both conversions happen here, exactly once.

use serde::{Deserialize, Serialize};

use vela_core::money::{as_major_units, Money};
use vela_core::paginate::{PageQuery, PageResult};
use vela_core::types::{CatalogRef, Product};
use vela_core::CATALOG_PAGE_SIZE;
use vela_engine::CatalogFilter;

use crate::envelope::ListEnvelope;
use crate::error::ClientResult;
use crate::http::ApiClient;

const BASE: &str = "/api/admin/products";

// =============================================================================
// Wire DTO
// =============================================================================

/// Product as the backend speaks it.
#[derive(Debug, Deserialize)]
struct ProductDto {
    #[serde(rename = "_id", default)]
    id: Option<String>,
    #[serde(rename = "nombre")]
    name: String,
    #[serde(rename = "codigo")]
    code: String,
    #[serde(rename = "precio", with = "as_major_units")]
    price: Money,
    stock: i64,
    #[serde(rename = "stock_minimo", default)]
    min_stock: Option<i64>,
    #[serde(rename = "categoria")]
    category_id: String,
    #[serde(rename = "marca")]
    brand_id: String,
    #[serde(rename = "descripcion", default)]
    description: Option<String>,
    #[serde(rename = "tallas", default)]
    sizes: Vec<String>,
    #[serde(rename = "colores", default)]
    colors: Vec<String>,
    #[serde(rename = "imagen", default)]
    image_url: Option<String>,
}

impl From<ProductDto> for Product {
    fn from(dto: ProductDto) -> Self {
        Product {
            id: dto.id.unwrap_or_default(),
            code: dto.code,
            name: dto.name,
            price: dto.price,
            stock: dto.stock,
            min_stock: dto.min_stock,
            // The admin API always answers with catalog ids here, so the
            // tag is known, not guessed.
            category: CatalogRef::Id(dto.category_id),
            brand: CatalogRef::Id(dto.brand_id),
            description: dto.description,
            sizes: dto.sizes,
            colors: dto.colors,
            image_url: dto.image_url,
        }
    }
}

/// Payload for creating or updating a product.
#[derive(Debug, Clone, Serialize)]
pub struct ProductForm {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "precio", with = "as_major_units")]
    pub price: Money,
    pub stock: i64,
    #[serde(rename = "stock_minimo", skip_serializing_if = "Option::is_none")]
    pub min_stock: Option<i64>,
    #[serde(rename = "categoria")]
    pub category_id: String,
    #[serde(rename = "marca")]
    pub brand_id: String,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "tallas")]
    pub sizes: Vec<String>,
    #[serde(rename = "colores")]
    pub colors: Vec<String>,
    #[serde(rename = "imagen", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

// =============================================================================
// API
// =============================================================================

/// Client for the products resource.
#[derive(Debug, Clone)]
pub struct ProductsApi {
    api: ApiClient,
}

impl ProductsApi {
    pub fn new(api: ApiClient) -> Self {
        ProductsApi { api }
    }

    /// One page of products for a list screen. Understands the `search`,
    /// `category`, and `brand` filters; pagination happens server-side.
    pub async fn list(&self, query: &PageQuery) -> ClientResult<PageResult<Product>> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if !query.search_term.is_empty() {
            params.push(("search", query.search_term.clone()));
        }
        if let Some(category) = query.filters.get("category") {
            params.push(("category", category.clone()));
        }
        if let Some(brand) = query.filters.get("brand") {
            params.push(("brand", brand.clone()));
        }
        params.push(("skip", query.skip().to_string()));
        params.push(("limit", query.limit().to_string()));

        let envelope: ListEnvelope<ProductDto> =
            self.api.get_with_query(BASE, &params).await?;
        let page = envelope.into_page(query);
        Ok(PageResult {
            items: page.items.into_iter().map(Product::from).collect(),
            total_count: page.total_count,
        })
    }

    /// The sellable catalog for the POS screen, optionally narrowed by
    /// search term, category, or brand.
    pub async fn catalog(&self, filter: &CatalogFilter) -> ClientResult<Vec<Product>> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if !filter.search.is_empty() {
            params.push(("search", filter.search.clone()));
        }
        if let Some(category) = &filter.category {
            params.push(("category", category.raw().to_string()));
        }
        if let Some(brand) = &filter.brand {
            params.push(("brand", brand.raw().to_string()));
        }
        params.push(("limit", CATALOG_PAGE_SIZE.to_string()));

        let envelope: ListEnvelope<ProductDto> =
            self.api.get_with_query(BASE, &params).await?;
        Ok(envelope.into_items().into_iter().map(Product::from).collect())
    }

    pub async fn get(&self, id: &str) -> ClientResult<Product> {
        let dto: ProductDto = self.api.get(&format!("{BASE}/{id}")).await?;
        Ok(dto.into())
    }

    /// Quick lookup by business code, the barcode-scanner path.
    pub async fn by_code(&self, code: &str) -> ClientResult<Product> {
        let dto: ProductDto = self.api.get(&format!("{BASE}/code/{code}")).await?;
        Ok(dto.into())
    }

    pub async fn create(&self, form: &ProductForm) -> ClientResult<Product> {
        let dto: ProductDto = self.api.post(BASE, form).await?;
        Ok(dto.into())
    }

    pub async fn update(&self, id: &str, form: &ProductForm) -> ClientResult<Product> {
        let dto: ProductDto = self.api.put(&format!("{BASE}/{id}"), form).await?;
        Ok(dto.into())
    }

    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        self.api.delete(&format!("{BASE}/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dto_to_domain() {
        let json = r#"{
            "_id": "64ab0f3e9d1c2b0012345678",
            "nombre": "Camiseta",
            "codigo": "CAM-001",
            "precio": 12.5,
            "stock": 8,
            "categoria": "64ab0f3e9d1c2b0012340001",
            "marca": "64ab0f3e9d1c2b0012340002",
            "tallas": ["S", "M"],
            "colores": ["negro"]
        }"#;

        let dto: ProductDto = serde_json::from_str(json).unwrap();
        let product = Product::from(dto);

        assert_eq!(product.price.cents(), 1250);
        assert_eq!(product.category, CatalogRef::Id("64ab0f3e9d1c2b0012340001".to_string()));
        assert!(product.category.is_id());
        assert_eq!(product.sizes, ["S", "M"]);
        assert!(product.min_stock.is_none());
        assert!(product.image_url.is_none());
    }

    #[test]
    fn test_form_serializes_wire_names() {
        let form = ProductForm {
            name: "Camiseta".to_string(),
            code: "CAM-001".to_string(),
            price: Money::from_cents(1250),
            stock: 8,
            min_stock: Some(2),
            category_id: "cat1".to_string(),
            brand_id: "br1".to_string(),
            description: None,
            sizes: vec!["S".to_string()],
            colors: vec![],
            image_url: None,
        };

        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["nombre"], "Camiseta");
        assert_eq!(json["precio"], 12.5);
        assert_eq!(json["stock_minimo"], 2);
        assert!(json.get("descripcion").is_none());
    }
}
