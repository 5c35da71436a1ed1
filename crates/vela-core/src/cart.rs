//! # Cart Model
//!
//! The client-held, uncommitted collection of product lines for an
//! in-progress sale, plus the discount and total derivation.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cart Operations                                   │
//! │                                                                         │
//! │  UI Action                 Cart Method             State Change         │
//! │  ─────────                 ───────────             ────────────         │
//! │                                                                         │
//! │  Click product ──────────► add_line() ───────────► insert / qty += n    │
//! │                                                                         │
//! │  Edit quantity ──────────► set_quantity() ───────► qty = n (or remove)  │
//! │                                                                         │
//! │  Click remove ───────────► remove_line() ────────► line removed         │
//! │                                                                         │
//! │  Edit discount % ────────► set_discount_percent ─► clamped to [0,100]   │
//! │                                                                         │
//! │  Sale committed ─────────► clear() ──────────────► empty, discount = 0  │
//! │                                                                         │
//! │  Stock checks use the availability FROZEN on the line when it was       │
//! │  created. Stock is re-validated server-side at submission, never        │
//! │  locked client-side.                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by `product_id` (adding the same product increments)
//! - `line_total == unit_price × quantity` always, recomputed on read
//! - `1 <= quantity <= available_stock` after every successful mutation
//! - Failed mutations leave the cart byte-for-byte unchanged

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::{Money, Percent};
use crate::types::{PaymentMethod, Product};
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

// =============================================================================
// Cart Line
// =============================================================================

/// One product's line in the cart.
///
/// ## Price and Stock Freezing
/// `unit_price` and `available_stock` are copied from the product when the
/// line is created. If the catalog changes afterwards, the line keeps its
/// original numbers; the backend is the source of truth at commit time and
/// prices are not even sent in the sale payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product identifier (unique per cart).
    pub product_id: String,

    /// Business code at the time of adding (frozen).
    pub code: String,

    /// Product name at the time of adding (frozen).
    pub name: String,

    /// Unit price at the time of adding (frozen).
    pub unit_price: Money,

    /// Units of this product in the cart.
    pub quantity: i64,

    /// Stock available when the line was created (frozen snapshot).
    pub available_stock: i64,
}

impl CartLine {
    fn from_product(product: &Product, quantity: i64) -> Self {
        CartLine {
            product_id: product.id.clone(),
            code: product.code.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            quantity,
            available_stock: product.stock,
        }
    }

    /// Line total: `unit_price × quantity`, recomputed on every read.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The in-progress sale cart.
///
/// Ordered collection of [`CartLine`] keyed by product id, plus the
/// ticket-level discount. Owned exclusively by the active checkout session;
/// discarded on successful submission or explicit clear.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
    discount: Percent,
}

impl Cart {
    /// Creates a new empty cart with no discount.
    pub fn new() -> Self {
        Cart::default()
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Adds `quantity` units of a product, inserting a new line or
    /// incrementing the existing one.
    ///
    /// ## Behavior
    /// - `OutOfStock` when the product has no stock at all
    /// - Increment path: the WHOLE increment is rejected with
    ///   `InsufficientStock` if the resulting quantity would exceed the
    ///   stock frozen on the line (no partial fill)
    /// - New line path: freezes `available_stock = product.stock`
    pub fn add_line(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        if quantity < 1 {
            return Err(ValidationError::OutOfRange {
                field: "quantity",
                min: 1,
                max: MAX_LINE_QUANTITY,
            }
            .into());
        }

        if product.stock <= 0 {
            return Err(CoreError::OutOfStock {
                code: product.code.clone(),
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            let new_qty = line.quantity + quantity;
            if new_qty > line.available_stock {
                return Err(CoreError::InsufficientStock {
                    code: line.code.clone(),
                    available: line.available_stock,
                    requested: new_qty,
                });
            }
            if new_qty > MAX_LINE_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_LINE_QUANTITY,
                });
            }
            line.quantity = new_qty;
            return Ok(());
        }

        if self.lines.len() >= MAX_CART_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            });
        }
        if quantity > product.stock {
            return Err(CoreError::InsufficientStock {
                code: product.code.clone(),
                available: product.stock,
                requested: quantity,
            });
        }
        if quantity > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_LINE_QUANTITY,
            });
        }

        self.lines.push(CartLine::from_product(product, quantity));
        Ok(())
    }

    /// Convenience for the POS click path: add one unit.
    #[inline]
    pub fn add_one(&mut self, product: &Product) -> CoreResult<()> {
        self.add_line(product, 1)
    }

    /// Sets the quantity of an existing line.
    ///
    /// ## Behavior
    /// - `new_quantity <= 0` is equivalent to [`Cart::remove_line`]
    /// - Exceeding the frozen stock fails with `InsufficientStock` and
    ///   leaves the line unchanged
    /// - Absent line is a no-op (the UI may race a removal)
    pub fn set_quantity(&mut self, product_id: &str, new_quantity: i64) -> CoreResult<()> {
        if new_quantity <= 0 {
            self.remove_line(product_id);
            return Ok(());
        }

        let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) else {
            return Ok(());
        };

        if new_quantity > line.available_stock {
            return Err(CoreError::InsufficientStock {
                code: line.code.clone(),
                available: line.available_stock,
                requested: new_quantity,
            });
        }
        if new_quantity > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: new_quantity,
                max: MAX_LINE_QUANTITY,
            });
        }

        line.quantity = new_quantity;
        Ok(())
    }

    /// Removes a line by product id. Idempotent: removing an absent line
    /// is a silent no-op.
    pub fn remove_line(&mut self, product_id: &str) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// Empties all lines and resets the discount to zero.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.discount = Percent::zero();
    }

    /// Sets the ticket discount from a raw percentage, clamping silently
    /// into `[0, 100]`. Clamp-don't-reject is deliberate: the discount box
    /// on the POS screen pipes keystrokes straight in here.
    pub fn set_discount_percent(&mut self, percent: f64) {
        self.discount = Percent::from_percent(percent);
    }

    // -------------------------------------------------------------------------
    // Derived accessors (pure functions of current state)
    // -------------------------------------------------------------------------

    /// Current discount rate.
    #[inline]
    pub fn discount_percent(&self) -> Percent {
        self.discount
    }

    /// The lines, in insertion order.
    #[inline]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Looks up a line by product id.
    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// Total units across all lines (the badge number on the cart icon).
    pub fn line_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Number of distinct lines.
    #[inline]
    pub fn distinct_lines(&self) -> usize {
        self.lines.len()
    }

    /// Checks if the cart is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of line totals, before discount.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(|l| l.line_total()).sum()
    }

    /// Discount amount: `subtotal × discount / 100`.
    pub fn discount_amount(&self) -> Money {
        self.subtotal().percentage(self.discount)
    }

    /// Ticket total: `subtotal - discount_amount`.
    pub fn total(&self) -> Money {
        self.subtotal() - self.discount_amount()
    }

    // -------------------------------------------------------------------------
    // Sale draft derivation
    // -------------------------------------------------------------------------

    /// Builds the minimal submission payload from the current lines.
    ///
    /// Unit prices are intentionally absent: the backend prices the sale at
    /// commit time and assigns the sale number and total.
    pub fn to_draft(&self, client_id: &str, payment_method: PaymentMethod) -> SaleDraft {
        SaleDraft {
            client_id: client_id.to_string(),
            lines: self
                .lines
                .iter()
                .map(|l| SaleDraftLine {
                    product_id: l.product_id.clone(),
                    quantity: l.quantity,
                })
                .collect(),
            payment_method,
        }
    }
}

// =============================================================================
// Sale Draft
// =============================================================================

/// One line of the sale-creation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleDraftLine {
    pub product_id: String,
    #[serde(rename = "cantidad")]
    pub quantity: i64,
}

/// The minimal payload sent to `POST /api/admin/sales`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleDraft {
    #[serde(rename = "cliente_id")]
    pub client_id: String,
    #[serde(rename = "detalles")]
    pub lines: Vec<SaleDraftLine>,
    #[serde(rename = "metodo_pago")]
    pub payment_method: PaymentMethod,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CatalogRef;

    fn test_product(id: &str, price_cents: i64, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            code: format!("CODE-{}", id),
            name: format!("Product {}", id),
            price: Money::from_cents(price_cents),
            stock,
            min_stock: None,
            category: CatalogRef::Id("cat".to_string()),
            brand: CatalogRef::Id("brand".to_string()),
            description: None,
            sizes: vec![],
            colors: vec![],
            image_url: None,
        }
    }

    #[test]
    fn test_add_line_and_totals() {
        let mut cart = Cart::new();
        cart.add_line(&test_product("1", 999, 10), 2).unwrap();

        assert_eq!(cart.distinct_lines(), 1);
        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.subtotal().cents(), 1998);
        assert_eq!(cart.line("1").unwrap().line_total().cents(), 1998);
    }

    #[test]
    fn test_add_same_product_increments() {
        let mut cart = Cart::new();
        let product = test_product("1", 999, 10);

        cart.add_line(&product, 2).unwrap();
        cart.add_line(&product, 3).unwrap();

        assert_eq!(cart.distinct_lines(), 1);
        assert_eq!(cart.line_count(), 5);
    }

    #[test]
    fn test_out_of_stock_never_mutates() {
        let mut cart = Cart::new();
        let err = cart.add_one(&test_product("1", 999, 0)).unwrap_err();

        assert!(matches!(err, CoreError::OutOfStock { .. }));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_increment_rejected_whole_when_exceeding_stock() {
        // add(stock=2), add again -> qty 2; a third add fails and the
        // cart stays at quantity 2
        let mut cart = Cart::new();
        let product = test_product("a", 1000, 2);

        cart.add_one(&product).unwrap();
        cart.add_one(&product).unwrap();
        assert_eq!(cart.line("a").unwrap().quantity, 2);
        assert_eq!(cart.line("a").unwrap().line_total().cents(), 2000);

        let err = cart.add_one(&product).unwrap_err();
        assert_eq!(
            err,
            CoreError::InsufficientStock {
                code: "CODE-a".to_string(),
                available: 2,
                requested: 3,
            }
        );
        assert_eq!(cart.line("a").unwrap().quantity, 2);
    }

    #[test]
    fn test_set_quantity_over_stock_leaves_cart_unchanged() {
        let mut cart = Cart::new();
        cart.add_line(&test_product("1", 500, 4), 2).unwrap();

        let before = cart.clone();
        let err = cart.set_quantity("1", 9).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { available: 4, requested: 9, .. }));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = Cart::new();
        cart.add_line(&test_product("1", 500, 4), 2).unwrap();

        cart.set_quantity("1", 0).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_absent_line_is_noop() {
        let mut cart = Cart::new();
        cart.set_quantity("ghost", 3).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_line_idempotent() {
        let mut cart = Cart::new();
        cart.add_line(&test_product("1", 500, 4), 1).unwrap();

        cart.remove_line("1");
        cart.remove_line("1"); // second call: same effect, no error
        assert!(cart.is_empty());
    }

    #[test]
    fn test_subtotal_invariant_over_mutation_sequences() {
        let mut cart = Cart::new();
        let a = test_product("a", 999, 50);
        let b = test_product("b", 250, 50);

        cart.add_line(&a, 3).unwrap();
        cart.add_line(&b, 1).unwrap();
        cart.set_quantity("a", 5).unwrap();
        cart.add_line(&b, 4).unwrap();
        cart.set_quantity("b", 2).unwrap();

        let expected: i64 = cart
            .lines()
            .iter()
            .map(|l| l.unit_price.cents() * l.quantity)
            .sum();
        assert_eq!(cart.subtotal().cents(), expected);
        assert_eq!(cart.subtotal().cents(), 5 * 999 + 2 * 250);
    }

    #[test]
    fn test_discount_scenario() {
        // one line {unitPrice: 10, quantity: 3}, 10% off
        // subtotal = 30, discount = 3, total = 27
        let mut cart = Cart::new();
        cart.add_line(&test_product("1", 1000, 10), 3).unwrap();
        cart.set_discount_percent(10.0);

        assert_eq!(cart.subtotal().cents(), 3000);
        assert_eq!(cart.discount_amount().cents(), 300);
        assert_eq!(cart.total().cents(), 2700);
    }

    #[test]
    fn test_discount_clamps_not_rejects() {
        let mut cart = Cart::new();

        cart.set_discount_percent(150.0);
        assert_eq!(cart.discount_percent().basis_points(), 10_000);

        cart.set_discount_percent(-20.0);
        assert_eq!(cart.discount_percent().basis_points(), 0);

        cart.set_discount_percent(12.5);
        assert_eq!(cart.discount_percent().basis_points(), 1250);
    }

    #[test]
    fn test_clear_resets_discount() {
        let mut cart = Cart::new();
        cart.add_line(&test_product("1", 1000, 10), 1).unwrap();
        cart.set_discount_percent(25.0);

        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.discount_percent().is_zero());
        assert_eq!(cart.total().cents(), 0);
    }

    #[test]
    fn test_draft_has_no_prices() {
        let mut cart = Cart::new();
        cart.add_line(&test_product("p9", 1000, 10), 3).unwrap();

        let draft = cart.to_draft("client-1", PaymentMethod::Transfer);
        let json = serde_json::to_value(&draft).unwrap();

        assert_eq!(json["cliente_id"], "client-1");
        assert_eq!(json["metodo_pago"], "TRANSFERENCIA");
        assert_eq!(json["detalles"][0]["product_id"], "p9");
        assert_eq!(json["detalles"][0]["cantidad"], 3);
        assert!(json["detalles"][0].get("precio_unitario").is_none());
    }

    #[test]
    fn test_cart_line_cap() {
        let mut cart = Cart::new();
        for i in 0..MAX_CART_LINES {
            cart.add_one(&test_product(&format!("p{}", i), 100, 5)).unwrap();
        }
        let err = cart.add_one(&test_product("overflow", 100, 5)).unwrap_err();
        assert!(matches!(err, CoreError::CartTooLarge { .. }));
    }
}
