//! Checkout message and WhatsApp deep link.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use thiserror::Error;
use url::Url;

use crate::{money::format_brl, storage::Store};

use super::{Cart, CartEngine};

/// Messaging service the checkout link points at.
pub const CHECKOUT_BASE_URL: &str = "https://wa.me/";

/// Characters left bare in the message text; everything else is `%XX` encoded,
/// spaces included.
const MESSAGE_TEXT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Errors raised while building a checkout link.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// There is nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// The destination is not a digits-only international phone number.
    #[error("invalid destination phone {0:?}")]
    InvalidPhone(String),
}

impl Cart {
    /// Human-readable order summary sent through the checkout link.
    pub fn checkout_message(&self) -> String {
        let mut message = String::from("🧁 *Pedido da Confeitaria Doce Sabor*\n\n");

        for (index, line) in self.items.iter().enumerate() {
            let product = line.product();

            message.push_str(&format!(
                "{}. *{}*\n   Quantidade: {}\n   Valor unitário: {}\n   Subtotal: {}\n\n",
                index + 1,
                product.name,
                line.quantity(),
                product.formatted_price,
                format_brl(line.subtotal()),
            ));
        }

        message.push_str(&format!(
            "💰 *Total do Pedido: {}*\n\nGostaria de finalizar este pedido. Aguardo contato!",
            self.formatted_total
        ));

        message
    }

    /// Deep link that opens a chat with `destination_phone` pre-filled with
    /// [`Cart::checkout_message`].
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::EmptyCart`]: the cart has no lines.
    /// - [`CheckoutError::InvalidPhone`]: the phone is empty or not all digits.
    pub fn checkout_link(&self, destination_phone: &str) -> Result<Url, CheckoutError> {
        if self.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let phone = destination_phone.trim();

        if phone.is_empty() || !phone.chars().all(|c| c.is_ascii_digit()) {
            return Err(CheckoutError::InvalidPhone(destination_phone.to_string()));
        }

        let message = self.checkout_message();
        let text = utf8_percent_encode(&message, MESSAGE_TEXT);

        Url::parse(&format!("{CHECKOUT_BASE_URL}{phone}?text={text}"))
            .map_err(|_parse_error| CheckoutError::InvalidPhone(destination_phone.to_string()))
    }
}

impl<S: Store> CartEngine<S> {
    /// Order summary for the current cart.
    pub fn checkout_message(&self) -> String {
        self.cart.checkout_message()
    }

    /// Checkout deep link for the current cart.
    ///
    /// # Errors
    ///
    /// See [`Cart::checkout_link`].
    pub fn build_checkout_link(&self, destination_phone: &str) -> Result<Url, CheckoutError> {
        self.cart.checkout_link(destination_phone)
    }
}
