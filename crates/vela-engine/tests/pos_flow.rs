//! End-to-end POS flow against an in-memory backend: refresh the
//! catalog, build a cart with a discount, confirm the sale, and watch
//! stock and state reconcile.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use vela_core::cart::SaleDraft;
use vela_core::money::Money;
use vela_core::types::{CatalogRef, PaymentMethod, Product, Sale, SaleLine};
use vela_engine::{
    Checkout, CheckoutState, GatewayError, GatewayResult, InventorySnapshot, InventorySource,
    SaleGateway,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Backend fake that actually decrements stock when a sale commits.
struct InMemoryBackend {
    products: Mutex<Vec<Product>>,
    sales_committed: Mutex<u32>,
}

impl InMemoryBackend {
    fn with_products(products: Vec<Product>) -> Self {
        InMemoryBackend {
            products: Mutex::new(products),
            sales_committed: Mutex::new(0),
        }
    }
}

#[async_trait]
impl InventorySource for InMemoryBackend {
    async fn fetch_products(
        &self,
        _filter: &vela_engine::CatalogFilter,
    ) -> GatewayResult<Vec<Product>> {
        Ok(self.products.lock().unwrap().clone())
    }
}

#[async_trait]
impl SaleGateway for InMemoryBackend {
    async fn create_sale(&self, draft: &SaleDraft) -> GatewayResult<Sale> {
        let mut products = self.products.lock().unwrap();

        // Stock check first, mutate only if every line fits.
        for line in &draft.lines {
            let product = products
                .iter()
                .find(|p| p.id == line.product_id)
                .ok_or_else(|| GatewayError::Remote {
                    status: 404,
                    detail: Some("Producto no encontrado".to_string()),
                })?;
            if product.stock < line.quantity {
                return Err(GatewayError::Remote {
                    status: 400,
                    detail: Some(format!("Stock insuficiente para {}", product.name)),
                });
            }
        }

        let mut lines = Vec::new();
        let mut total = Money::zero();
        for line in &draft.lines {
            let product = products
                .iter_mut()
                .find(|p| p.id == line.product_id)
                .ok_or_else(|| GatewayError::Network("product vanished".to_string()))?;
            product.stock -= line.quantity;
            let line_total = product.price.multiply_quantity(line.quantity);
            total += line_total;
            lines.push(SaleLine {
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                quantity: line.quantity,
                unit_price: product.price,
                line_total,
            });
        }

        let mut count = self.sales_committed.lock().unwrap();
        *count += 1;
        Ok(Sale {
            id: Some(format!("s{count}")),
            sale_number: format!("V-{:06}", count),
            date: Utc::now(),
            client_id: draft.client_id.clone(),
            client_name: "Ana Suarez".to_string(),
            user_id: "u1".to_string(),
            user_name: "Caja 1".to_string(),
            lines,
            total,
            payment_method: draft.payment_method,
        })
    }
}

fn product(id: &str, name: &str, cents: i64, stock: i64) -> Product {
    Product {
        id: id.to_string(),
        code: format!("{}-001", name.to_uppercase()),
        name: name.to_string(),
        price: Money::from_cents(cents),
        stock,
        min_stock: None,
        category: CatalogRef::Id("cat1".to_string()),
        brand: CatalogRef::Id("br1".to_string()),
        description: None,
        sizes: vec![],
        colors: vec![],
        image_url: None,
    }
}

#[tokio::test]
async fn full_sale_flow_reconciles_stock_and_state() {
    init_tracing();
    let backend = InMemoryBackend::with_products(vec![
        product("p1", "Camiseta", 1000, 5),
        product("p2", "Gorra", 500, 2),
    ]);

    let mut inventory = InventorySnapshot::new();
    inventory.refresh(&backend).await.unwrap();
    assert_eq!(inventory.stock_for("p1"), Some(5));

    let mut checkout = Checkout::new();
    let camiseta = inventory.product("p1").unwrap().clone();
    let gorra = inventory.product("p2").unwrap().clone();
    checkout.cart_mut().add_line(&camiseta, 3).unwrap();
    checkout.cart_mut().add_line(&gorra, 1).unwrap();
    checkout.cart_mut().set_discount_percent(10.0);

    // 3 x 10.00 + 1 x 5.00 = 35.00, minus 10% = 31.50
    assert_eq!(checkout.cart().subtotal(), Money::from_cents(3500));
    assert_eq!(checkout.cart().total(), Money::from_cents(3150));

    checkout.select_client("c1");
    checkout.set_payment_method(PaymentMethod::Card);
    checkout.begin().unwrap();

    let sale = checkout.confirm(&backend, &mut inventory).await.unwrap();
    assert_eq!(sale.sale_number, "V-000001");
    assert_eq!(sale.payment_method, PaymentMethod::Card);
    // The backend committed at undiscounted prices; it is the arbiter.
    assert_eq!(sale.total, Money::from_cents(3500));

    assert!(matches!(checkout.state(), CheckoutState::Succeeded { .. }));
    assert!(checkout.cart().is_empty());
    assert_eq!(inventory.stock_for("p1"), Some(2));
    assert_eq!(inventory.stock_for("p2"), Some(1));
}

#[tokio::test]
async fn stock_conflict_surfaces_server_detail_and_keeps_cart() {
    init_tracing();
    let backend = InMemoryBackend::with_products(vec![product("p1", "Camiseta", 1000, 5)]);

    let mut inventory = InventorySnapshot::new();
    inventory.refresh(&backend).await.unwrap();

    let mut checkout = Checkout::new();
    let camiseta = inventory.product("p1").unwrap().clone();
    checkout.cart_mut().add_line(&camiseta, 4).unwrap();
    checkout.select_client("c1");

    // Another till sells 3 units while we are confirming.
    backend
        .create_sale(&SaleDraft {
            client_id: "c2".to_string(),
            lines: vec![vela_core::cart::SaleDraftLine {
                product_id: "p1".to_string(),
                quantity: 3,
            }],
            payment_method: PaymentMethod::Cash,
        })
        .await
        .unwrap();

    checkout.begin().unwrap();
    let err = checkout.confirm(&backend, &mut inventory).await.unwrap_err();
    assert!(matches!(
        err,
        vela_engine::CheckoutError::Submission(GatewayError::Remote { status: 400, .. })
    ));

    match checkout.state() {
        CheckoutState::Failed { message } => {
            assert_eq!(message, "Stock insuficiente para Camiseta");
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    // Cart survives so the cashier can adjust and retry.
    assert_eq!(checkout.cart().line_count(), 4);
}
