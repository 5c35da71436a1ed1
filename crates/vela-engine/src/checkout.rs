//! # Checkout Orchestrator
//!
//! Sequences "validate → confirm → submit → reconcile" for a sale.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Checkout States                                    │
//! │                                                                         │
//! │                 begin()                confirm()                        │
//! │   ┌────────┐ guard passes ┌──────────────────────┐      ┌────────────┐ │
//! │   │  Idle  ├─────────────►│ AwaitingConfirmation ├─────►│ Submitting │ │
//! │   └────▲───┘              └──────────┬───────────┘      └─────┬──────┘ │
//! │        │                             │ cancel()               │        │
//! │        └─────────────────────────────┘                        │        │
//! │                                              remote ok        │        │
//! │   ┌───────────┐◄──────────────────────────────────────────────┤        │
//! │   │ Succeeded │   cart cleared, inventory refreshed           │        │
//! │   └───────────┘                                               │        │
//! │   ┌───────────┐◄──────────────────────────────────────────────┘        │
//! │   │  Failed   │   cart KEPT, message surfaced; a fresh begin() is      │
//! │   └───────────┘   required before any new submission                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why the Interposed Confirmation
//! `confirm()` is only legal from `AwaitingConfirmation`, which only
//! `begin()` can enter. The UI cannot submit a sale without an explicit
//! user confirmation step in between, and a failed submission drops back
//! out of `AwaitingConfirmation`, so a retry needs a fresh confirmation
//! too. There is NO automatic retry: sale creation carries no client-side
//! idempotency key, so a silent retry could double-charge inventory.

use thiserror::Error;
use tracing::{debug, info, warn};

use vela_core::cart::Cart;
use vela_core::types::{PaymentMethod, Sale};

use crate::gateway::{GatewayError, InventorySource, SaleGateway};
use crate::inventory::InventorySnapshot;

// =============================================================================
// States & Errors
// =============================================================================

/// Where the checkout currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutState {
    /// Nothing in flight; cart edits happen here.
    Idle,
    /// Submit requested and the guard passed; waiting for the user to
    /// confirm (or cancel).
    AwaitingConfirmation,
    /// The remote call is in flight.
    Submitting,
    /// Last submission committed; `sale_number` is server-assigned.
    Succeeded { sale_number: String },
    /// Last submission failed; the message is ready for display.
    Failed { message: String },
}

impl CheckoutState {
    /// States from which a new submission may begin.
    fn is_resting(&self) -> bool {
        !matches!(
            self,
            CheckoutState::AwaitingConfirmation | CheckoutState::Submitting
        )
    }
}

/// Which submit precondition failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitBlock {
    #[error("the cart is empty")]
    EmptyCart,
    #[error("no client is selected")]
    NoClientSelected,
}

/// Checkout failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// `begin()` guard failed; reports which precondition broke.
    #[error("cannot submit: {0}")]
    Blocked(#[from] SubmitBlock),

    /// `confirm()` or `cancel()` called out of order.
    #[error("no submission awaiting confirmation")]
    NotAwaitingConfirmation,

    /// The remote sale creation failed.
    #[error("sale submission failed: {0}")]
    Submission(#[from] GatewayError),
}

// =============================================================================
// Checkout
// =============================================================================

/// The POS checkout session: cart, client/payment selection, and the
/// submission state machine. One instance per open POS screen.
#[derive(Debug)]
pub struct Checkout {
    cart: Cart,
    client_id: Option<String>,
    payment_method: PaymentMethod,
    state: CheckoutState,
}

impl Default for Checkout {
    fn default() -> Self {
        Checkout {
            cart: Cart::new(),
            client_id: None,
            payment_method: PaymentMethod::default(),
            state: CheckoutState::Idle,
        }
    }
}

impl Checkout {
    /// A fresh checkout session: empty cart, nothing selected, `Idle`.
    pub fn new() -> Self {
        Checkout::default()
    }

    // -------------------------------------------------------------------------
    // Session state
    // -------------------------------------------------------------------------

    /// The cart, for totals and line listing.
    #[inline]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Mutable cart access for line edits and the discount field.
    #[inline]
    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    /// Current state of the submission machine.
    #[inline]
    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// Selects the client the sale will be billed to.
    pub fn select_client(&mut self, client_id: impl Into<String>) {
        self.client_id = Some(client_id.into());
    }

    /// Clears the client selection.
    pub fn clear_client(&mut self) {
        self.client_id = None;
    }

    #[inline]
    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    #[inline]
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// The submit guard: a non-empty cart and a selected client.
    /// Reports the FIRST failing precondition (cart checked before client,
    /// matching the order the screen validates in).
    pub fn can_submit(&self) -> Result<(), SubmitBlock> {
        if self.cart.is_empty() {
            return Err(SubmitBlock::EmptyCart);
        }
        if self.client_id.is_none() {
            return Err(SubmitBlock::NoClientSelected);
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// `Idle → AwaitingConfirmation` (also legal from the `Succeeded` and
    /// `Failed` resting states). On a guard failure the state does not
    /// move and the failed precondition is reported.
    pub fn begin(&mut self) -> Result<(), CheckoutError> {
        if !self.state.is_resting() {
            return Err(CheckoutError::NotAwaitingConfirmation);
        }
        self.can_submit()?;

        debug!(
            lines = self.cart.distinct_lines(),
            total = %self.cart.total(),
            "submission requested, awaiting confirmation"
        );
        self.state = CheckoutState::AwaitingConfirmation;
        Ok(())
    }

    /// `AwaitingConfirmation → Idle`, no side effects. A no-op in any
    /// other state (the dialog's close button can fire twice).
    pub fn cancel(&mut self) {
        if matches!(self.state, CheckoutState::AwaitingConfirmation) {
            self.state = CheckoutState::Idle;
        }
    }

    /// `AwaitingConfirmation → Submitting → {Succeeded | Failed}`.
    ///
    /// Builds the [`vela_core::cart::SaleDraft`] from the current cart and
    /// selection, submits it, and reconciles:
    /// - success: cart cleared, selection reset, inventory snapshot
    ///   refreshed (committed stock changed server-side), server-assigned
    ///   sale surfaced to the caller
    /// - failure: cart kept for editing or retry, server detail surfaced
    ///   verbatim when present, and the machine parks in `Failed` so a new
    ///   submission must pass through `begin()` again
    pub async fn confirm<G>(
        &mut self,
        gateway: &G,
        inventory: &mut InventorySnapshot,
    ) -> Result<Sale, CheckoutError>
    where
        G: SaleGateway + InventorySource,
    {
        if !matches!(self.state, CheckoutState::AwaitingConfirmation) {
            return Err(CheckoutError::NotAwaitingConfirmation);
        }

        // The guard held at begin(); client_id is present.
        let Some(client_id) = self.client_id.clone() else {
            return Err(CheckoutError::Blocked(SubmitBlock::NoClientSelected));
        };

        let draft = self.cart.to_draft(&client_id, self.payment_method);
        self.state = CheckoutState::Submitting;

        match gateway.create_sale(&draft).await {
            Ok(sale) => {
                info!(
                    sale_number = %sale.sale_number,
                    total = %sale.total,
                    "sale committed"
                );

                self.cart.clear();
                self.client_id = None;
                self.payment_method = PaymentMethod::default();

                // Committed stock changed server-side; re-fetch the
                // snapshot. The sale already succeeded, so a refresh
                // failure only logs.
                if let Err(err) = inventory.refresh(gateway).await {
                    warn!(error = %err, "inventory refresh after sale failed");
                }

                self.state = CheckoutState::Succeeded {
                    sale_number: sale.sale_number.clone(),
                };
                Ok(sale)
            }
            Err(err) => {
                warn!(error = %err, "sale submission failed");
                self.state = CheckoutState::Failed {
                    message: err.display_message(),
                };
                Err(CheckoutError::Submission(err))
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
