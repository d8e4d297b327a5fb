//! Confeitaria storefront application: HTTP clients, configuration, logging
//! and the storefront context used by the `confeitaria` binary.

pub mod api;
pub mod config;
pub mod context;
pub mod observability;

#[cfg(test)]
mod test_helpers;
