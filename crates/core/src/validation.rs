//! Admin product form validation.
//!
//! Runs before any create or update request; a form with field errors is
//! never sent.

use std::{collections::BTreeMap, fmt};

use rust_decimal::Decimal;
use thiserror::Error;

use crate::products::{ProductDraft, ProductPatch};

/// Minimum product name length, in characters.
pub const NAME_MIN_CHARS: usize = 2;

/// Maximum product name length, in characters.
pub const NAME_MAX_CHARS: usize = 100;

/// Maximum description length, in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

/// Maximum image URL length, in characters.
pub const IMAGE_MAX_CHARS: usize = 500;

/// Product form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    /// `nome`
    Name,

    /// `valor`
    Price,

    /// `descricao`
    Description,

    /// `imagem`
    Image,
}

impl Field {
    /// Wire name of the field.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "nome",
            Self::Price => "valor",
            Self::Description => "descricao",
            Self::Image => "imagem",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("invalid product form: {}", summarize(.errors))]
pub struct FieldErrors {
    errors: BTreeMap<Field, String>,
}

impl FieldErrors {
    /// Message for `field`, if it failed.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Whether every field passed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Failing fields and their messages, in field order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }

    fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

fn summarize(errors: &BTreeMap<Field, String>) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validate a new product.
///
/// # Errors
///
/// Returns every failing field at once.
pub fn validate_draft(draft: &ProductDraft) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();

    check_name(&mut errors, &draft.name);
    check_price(&mut errors, draft.price);
    check_optional_text(
        &mut errors,
        Field::Description,
        draft.description.as_deref(),
        DESCRIPTION_MAX_CHARS,
    );
    check_optional_text(
        &mut errors,
        Field::Image,
        draft.image.as_deref(),
        IMAGE_MAX_CHARS,
    );

    errors.into_result()
}

/// Validate a partial update. Only the fields present in the patch are checked.
///
/// # Errors
///
/// Returns every failing field at once.
pub fn validate_patch(patch: &ProductPatch) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();

    if let Some(name) = &patch.name {
        check_name(&mut errors, name);
    }

    if let Some(price) = patch.price {
        check_price(&mut errors, price);
    }

    check_optional_text(
        &mut errors,
        Field::Description,
        patch.description.as_deref(),
        DESCRIPTION_MAX_CHARS,
    );
    check_optional_text(
        &mut errors,
        Field::Image,
        patch.image.as_deref(),
        IMAGE_MAX_CHARS,
    );

    errors.into_result()
}

fn check_name(errors: &mut FieldErrors, name: &str) {
    let chars = name.chars().count();

    if name.trim().is_empty() {
        errors.insert(Field::Name, "name is required");
    } else if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&chars) {
        errors.insert(
            Field::Name,
            format!("name must be between {NAME_MIN_CHARS} and {NAME_MAX_CHARS} characters"),
        );
    }
}

fn check_price(errors: &mut FieldErrors, price: Decimal) {
    if price <= Decimal::ZERO {
        errors.insert(Field::Price, "price must be greater than zero");
    }
}

fn check_optional_text(errors: &mut FieldErrors, field: Field, value: Option<&str>, max: usize) {
    if value.is_some_and(|value| value.chars().count() > max) {
        errors.insert(field, format!("{field} must be at most {max} characters"));
    }
}
