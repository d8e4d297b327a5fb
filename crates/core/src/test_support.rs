//! Shared test fixtures.

use rust_decimal::Decimal;

use crate::{
    products::Product,
    users::{Role, User},
};

pub(crate) fn brigadeiro() -> Product {
    Product {
        id: 1,
        name: "Brigadeiro".to_string(),
        price: Decimal::new(1250, 2),
        formatted_price: "R$ 12,50".to_string(),
        description: Some("Brigadeiro gourmet".to_string()),
        image: None,
        available: true,
        availability_status: "Disponível".to_string(),
    }
}

pub(crate) fn beijinho() -> Product {
    Product {
        id: 2,
        name: "Beijinho".to_string(),
        price: Decimal::new(399, 2),
        formatted_price: "R$ 3,99".to_string(),
        description: None,
        image: Some("https://example.com/beijinho.png".to_string()),
        available: true,
        availability_status: "Disponível".to_string(),
    }
}

pub(crate) fn admin_user() -> User {
    User {
        id: 1,
        username: "admin".to_string(),
        email: "admin@docesabor.com.br".to_string(),
        first_name: "Ana".to_string(),
        last_name: "Souza".to_string(),
        role: Role::Admin,
    }
}

pub(crate) fn customer_user() -> User {
    User {
        id: 7,
        username: "cliente".to_string(),
        email: "cliente@example.com".to_string(),
        first_name: "Bruno".to_string(),
        last_name: "Lima".to_string(),
        role: Role::User,
    }
}
