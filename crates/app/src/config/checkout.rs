//! Checkout config

use clap::Args;

/// Default WhatsApp number orders are sent to.
pub const DEFAULT_WHATSAPP_NUMBER: &str = "5515996747692";

/// Checkout settings.
#[derive(Debug, Clone, Args)]
pub struct CheckoutConfig {
    /// Digits-only international number that receives orders
    #[arg(
        long,
        env = "CONFEITARIA_WHATSAPP_NUMBER",
        default_value = DEFAULT_WHATSAPP_NUMBER,
        global = true
    )]
    pub whatsapp_number: String,
}
