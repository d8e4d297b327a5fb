//! Confeitaria
//!
//! Client-side core of the Confeitaria Doce Sabor storefront: catalog models,
//! the shopping cart engine, the authentication session and the access guard.

pub mod cart;
pub mod catalog;
pub mod gateway;
pub mod guard;
pub mod money;
pub mod products;
pub mod session;
pub mod storage;
pub mod users;
pub mod validation;

#[cfg(test)]
mod test_support;
