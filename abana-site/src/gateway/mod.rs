//! Form submission gateway
//!
//! Turns the storefront's order and contact forms into document writes.
//! Every outcome is published on the [`NotificationBus`] and also returned,
//! so the page can react to it and callers can assert on it.
//!
//! An order is two writes: the order itself, then a short message so the
//! order shows up in the admin inbox. They are not atomic. Once the order
//! is stored the submission counts as a success even if the message write
//! fails.

pub mod forms;

use std::sync::Arc;

use abana_client::{DocumentStore, DocumentWrite};
use rust_decimal::Decimal;
use serde::Serialize;
use shared::error::ErrorCode;
use shared::models::{CREATED_AT_FIELD, Message, Order, collections};

use crate::cart::CartStore;
use crate::money::{DEFAULT_CURRENCY_SYMBOL, format_amount};
use crate::notify::NotificationBus;
use crate::utils::{AppError, AppResult};

pub use forms::{CONTACT_FIELDS_MISSING, ContactForm, ORDER_FIELDS_MISSING, OrderForm};

pub const ORDER_PLACED: &str = "Order placed successfully! We will contact you shortly.";
pub const MESSAGE_SENT: &str = "Message sent successfully! We will get back to you soon.";
pub const PAYMENT_PROMPT: &str = "Please click the Paystack button to complete payment";

/// Result of a stored order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderReceipt {
    pub order_id: String,
    /// `None` when the companion message could not be written
    pub message_id: Option<String>,
    pub total: Decimal,
    /// Link to open for payment, from checkout
    pub payment_link: Option<String>,
}

#[derive(Clone)]
pub struct SubmissionGateway {
    store: Arc<dyn DocumentStore>,
    notifications: NotificationBus,
    currency_symbol: String,
}

impl std::fmt::Debug for SubmissionGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionGateway")
            .field("currency_symbol", &self.currency_symbol)
            .finish_non_exhaustive()
    }
}

impl SubmissionGateway {
    pub fn new(store: Arc<dyn DocumentStore>, notifications: NotificationBus) -> Self {
        Self {
            store,
            notifications,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }

    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    /// Store the cart as a pending order.
    ///
    /// Nothing is written when the cart is empty or a required field is
    /// blank. On success the cart and form are cleared; on failure both are
    /// left as they were.
    pub async fn submit_order(
        &self,
        cart: &mut CartStore,
        form: &mut OrderForm,
    ) -> AppResult<OrderReceipt> {
        if cart.is_empty() {
            return Err(self.reject(AppError::cart_empty()));
        }
        form.validate().map_err(|e| self.reject(e))?;

        let order = Order::pending(
            form.name.trim(),
            form.phone.trim(),
            form.email.trim(),
            form.address.trim(),
            form.instructions.trim(),
            cart.cart().lines().to_vec(),
        );
        let total = order.total;

        let order_id = match self.write_order(&order).await {
            Ok(id) => id,
            Err(e) => {
                tracing::error!(error = %e, "Error saving order");
                let err = AppError::new(ErrorCode::OrderSubmitFailed).with_detail("cause", e.message);
                self.notifications.error(err.message.clone());
                return Err(err);
            }
        };
        tracing::info!(order_id = %order_id, total = %total, "Order placed");

        let summary = Message::order_summary(
            &order.name,
            &order.email,
            &order.phone,
            format!(
                "New order placed from {}. Total: {}",
                order.name,
                format_amount(&self.currency_symbol, total)
            ),
        );
        let message_id = match self.write_message(&summary).await {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!(order_id = %order_id, error = %e, "Order stored but summary message failed");
                None
            }
        };

        cart.clear();
        form.reset();
        self.notifications.success(ORDER_PLACED);

        Ok(OrderReceipt {
            order_id,
            message_id,
            total,
            payment_link: None,
        })
    }

    /// Pay-button flow: submit the order and hand back the payment link to
    /// open.
    pub async fn checkout(
        &self,
        cart: &mut CartStore,
        form: &mut OrderForm,
        payment_link: &str,
    ) -> AppResult<OrderReceipt> {
        if cart.is_empty() {
            return Err(self.reject(AppError::cart_empty()));
        }
        let mut receipt = self.submit_order(cart, form).await?;
        receipt.payment_link = Some(payment_link.to_string());
        Ok(receipt)
    }

    /// Plain order button; payment goes through the pay button.
    pub fn prompt_payment(&self) {
        self.notifications.info(PAYMENT_PROMPT);
    }

    /// Store a contact message and return its id
    pub async fn submit_contact(&self, form: &mut ContactForm) -> AppResult<String> {
        form.validate().map_err(|e| self.reject(e))?;

        let message = Message::contact(form.name.trim(), form.email.trim(), form.message.trim());
        match self.write_message(&message).await {
            Ok(id) => {
                tracing::info!(message_id = %id, "Contact message stored");
                form.reset();
                self.notifications.success(MESSAGE_SENT);
                Ok(id)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error sending message");
                let err =
                    AppError::new(ErrorCode::MessageSubmitFailed).with_detail("cause", e.message);
                self.notifications.error(err.message.clone());
                Err(err)
            }
        }
    }

    async fn write_order(&self, order: &Order) -> AppResult<String> {
        let write = DocumentWrite::from_record(order)?.with_server_timestamp(CREATED_AT_FIELD);
        Ok(self.store.add_document(collections::ORDERS, write).await?)
    }

    async fn write_message(&self, message: &Message) -> AppResult<String> {
        let write = DocumentWrite::from_record(message)?.with_server_timestamp(CREATED_AT_FIELD);
        Ok(self.store.add_document(collections::MESSAGES, write).await?)
    }

    fn reject(&self, err: AppError) -> AppError {
        tracing::debug!(code = %err.code, message = %err.message, "Submission rejected");
        self.notifications.error(err.message.clone());
        err
    }
}
