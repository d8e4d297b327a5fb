//! Products
//!
//! Catalog records as served by the storefront API. The wire format keeps the
//! backend's Portuguese field names; the Rust side uses English ones.

use jiff::civil::DateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product identifier assigned by the backend.
pub type ProductId = i64;

/// Catalog product (`Doce`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product id.
    pub id: ProductId,

    /// Product name.
    #[serde(rename = "nome")]
    pub name: String,

    /// Unit price in BRL.
    #[serde(rename = "valor", with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Unit price as formatted by the backend.
    #[serde(rename = "valorFormatado")]
    pub formatted_price: String,

    /// Optional description.
    #[serde(rename = "descricao", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Optional image URL.
    #[serde(rename = "imagem", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Whether the product can currently be ordered.
    #[serde(rename = "disponivel")]
    pub available: bool,

    /// Availability label as rendered by the backend.
    #[serde(rename = "statusDisponibilidade")]
    pub availability_status: String,
}

/// Public catalog listing (`DoceResponse`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductPage {
    /// Matching products.
    #[serde(rename = "doces")]
    pub products: Vec<Product>,

    /// Number of matching products.
    pub total: u64,

    /// Availability summary label.
    #[serde(rename = "disponibilidade")]
    pub availability: String,
}

/// Product as seen by the admin panel (`AdminDoceResponse`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AdminProduct {
    /// Catalog fields.
    #[serde(flatten)]
    pub product: Product,

    /// Creation time.
    #[serde(rename = "criadoEm")]
    pub created_at: DateTime,

    /// Last update time.
    #[serde(rename = "atualizadoEm")]
    pub updated_at: DateTime,
}

/// Admin listing (`AdminDoceListResponse`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AdminProductPage {
    /// Matching products, available or not.
    #[serde(rename = "doces")]
    pub products: Vec<AdminProduct>,

    /// Number of matching products.
    pub total: u64,
}

/// Admin dashboard statistics.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DashboardStats {
    /// Total number of products.
    #[serde(rename = "totalDoces")]
    pub total_products: u64,

    /// Products currently available.
    #[serde(rename = "docesDisponiveis")]
    pub available_products: u64,

    /// Products currently unavailable.
    #[serde(rename = "docesIndisponiveis")]
    pub unavailable_products: u64,

    /// Share of available products, in percent.
    #[serde(rename = "percentualDisponiveis")]
    pub available_percentage: f64,

    /// Lowest price in the catalog.
    #[serde(
        rename = "precoMinimo",
        default,
        with = "rust_decimal::serde::float_option"
    )]
    pub min_price: Option<Decimal>,

    /// Highest price in the catalog.
    #[serde(
        rename = "precoMaximo",
        default,
        with = "rust_decimal::serde::float_option"
    )]
    pub max_price: Option<Decimal>,

    /// Average price in the catalog.
    #[serde(
        rename = "precoMedio",
        default,
        with = "rust_decimal::serde::float_option"
    )]
    pub average_price: Option<Decimal>,
}

/// New product payload (`CreateDoceRequest`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductDraft {
    /// Product name.
    #[serde(rename = "nome")]
    pub name: String,

    /// Unit price in BRL.
    #[serde(rename = "valor", with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Optional description.
    #[serde(rename = "descricao", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Optional image URL.
    #[serde(rename = "imagem", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Initial availability; the backend decides when omitted.
    #[serde(rename = "disponivel", skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

/// Partial product update (`UpdateDoceRequest`). Only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductPatch {
    /// New name.
    #[serde(rename = "nome", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New unit price.
    #[serde(
        rename = "valor",
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub price: Option<Decimal>,

    /// New description.
    #[serde(rename = "descricao", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// New image URL.
    #[serde(rename = "imagem", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// New availability.
    #[serde(rename = "disponivel", skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

impl ProductPatch {
    /// Whether the patch carries no changes.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.description.is_none()
            && self.image.is_none()
            && self.available.is_none()
    }
}
