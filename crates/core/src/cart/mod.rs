//! Cart
//!
//! The cart engine owns the shopping cart, keeps its total in step with its
//! lines and writes the whole cart back to the store after every mutation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::{
    money::format_brl,
    products::{Product, ProductId},
    storage::{Store, keys},
};

mod checkout;

pub use checkout::{CHECKOUT_BASE_URL, CheckoutError};

/// A product snapshot and how many units of it are in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(rename = "doce")]
    product: Product,

    #[serde(rename = "quantidade")]
    quantity: u32,
}

impl CartLine {
    /// Product snapshot taken when the line was created.
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Number of units, always at least one.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price × quantity.
    pub fn subtotal(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// Cart contents with the derived total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartLine>,

    #[serde(with = "rust_decimal::serde::float")]
    total: Decimal,

    #[serde(rename = "totalFormatado")]
    formatted_total: String,
}

impl Default for Cart {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: Decimal::ZERO,
            formatted_total: format_brl(Decimal::ZERO),
        }
    }
}

impl Cart {
    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.items
    }

    /// Sum of price × quantity over all lines.
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Total formatted as BRL.
    pub fn formatted_total(&self) -> &str {
        &self.formatted_total
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all line quantities.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.items
            .iter_mut()
            .find(|line| line.product.id == product_id)
    }

    /// Fold lines sharing a product id into the first one, summing quantities.
    fn merge_duplicate_lines(&mut self) {
        let mut merged: Vec<CartLine> = Vec::with_capacity(self.items.len());

        for line in self.items.drain(..) {
            match merged
                .iter_mut()
                .find(|kept| kept.product.id == line.product.id)
            {
                Some(kept) => kept.quantity = kept.quantity.saturating_add(line.quantity),
                None => merged.push(line),
            }
        }

        self.items = merged;
    }

    fn recompute(&mut self) {
        self.items.retain(|line| line.quantity > 0);
        self.total = self.items.iter().map(CartLine::subtotal).sum();
        self.formatted_total = format_brl(self.total);
    }
}

/// Shopping cart state machine backed by a [`Store`].
#[derive(Debug)]
pub struct CartEngine<S: Store> {
    cart: Cart,
    store: S,
}

impl<S: Store> CartEngine<S> {
    /// Restore the cart from `store`.
    ///
    /// A missing, unreadable or corrupt cart is logged and replaced by an empty
    /// one. Lines repeating a product id are merged and the restored total is
    /// recomputed from the restored lines.
    pub fn load(store: S) -> Self {
        let cart = match store.get(keys::CART) {
            Ok(Some(json)) => match serde_json::from_str::<Cart>(&json) {
                Ok(mut cart) => {
                    cart.merge_duplicate_lines();
                    cart.recompute();
                    debug!(lines = cart.items.len(), "restored cart");
                    cart
                }
                Err(source) => {
                    warn!("discarding unreadable cart: {source}");
                    Cart::default()
                }
            },
            Ok(None) => Cart::default(),
            Err(source) => {
                warn!("failed to read stored cart: {source}");
                Cart::default()
            }
        };

        Self { cart, store }
    }

    /// Add `quantity` units of `product`, merging with an existing line.
    ///
    /// Adding zero units leaves the cart unchanged.
    pub fn add_item(&mut self, product: Product, quantity: u32) {
        if quantity == 0 {
            debug!(product_id = product.id, "ignoring zero quantity add");
            return;
        }

        debug!(product_id = product.id, quantity, "adding to cart");

        match self.cart.line_mut(product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.cart.items.push(CartLine { product, quantity }),
        }

        self.commit();
    }

    /// Add a single unit of `product`.
    pub fn add_one(&mut self, product: Product) {
        self.add_item(product, 1);
    }

    /// Set the quantity of a line. Zero or less removes the line.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }

        debug!(product_id, quantity, "updating cart quantity");

        if let Some(line) = self.cart.line_mut(product_id) {
            line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }

        self.commit();
    }

    /// Remove the line for `product_id`, if any.
    pub fn remove_item(&mut self, product_id: ProductId) {
        debug!(product_id, "removing from cart");

        self.cart.items.retain(|line| line.product.id != product_id);

        self.commit();
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        debug!("clearing cart");

        self.cart = Cart::default();

        self.commit();
    }

    /// Current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    /// Current total.
    pub fn total(&self) -> Decimal {
        self.cart.total()
    }

    /// Current total formatted as BRL.
    pub fn formatted_total(&self) -> &str {
        self.cart.formatted_total()
    }

    /// Sum of all line quantities, used for the cart badge.
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Recompute derived fields and persist the cart.
    ///
    /// Persistence failures are logged; the in-memory cart stays authoritative.
    fn commit(&mut self) {
        self.cart.recompute();

        let json = match serde_json::to_string(&self.cart) {
            Ok(json) => json,
            Err(source) => {
                error!("failed to serialize cart: {source}");
                return;
            }
        };

        if let Err(source) = self.store.set(keys::CART, &json) {
            error!("failed to persist cart: {source}");
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        storage::{MemoryStore, MockStore, StoreError},
        test_support::{beijinho, brigadeiro},
    };

    use super::*;

    fn engine() -> CartEngine<MemoryStore> {
        CartEngine::load(MemoryStore::new())
    }

    fn sum_of_lines(engine: &CartEngine<MemoryStore>) -> Decimal {
        engine
            .lines()
            .iter()
            .map(|line| line.product().price * Decimal::from(line.quantity()))
            .sum()
    }

    #[test]
    fn starts_empty() {
        let engine = engine();

        assert!(engine.is_empty());
        assert_eq!(engine.total(), Decimal::ZERO);
        assert_eq!(engine.formatted_total(), "R$ 0,00");
        assert_eq!(engine.item_count(), 0);
    }

    #[test]
    fn add_update_remove_walkthrough() {
        let mut engine = engine();

        engine.add_item(brigadeiro(), 2);

        assert_eq!(engine.total(), Decimal::new(2500, 2));
        assert_eq!(engine.item_count(), 2);
        assert_eq!(engine.formatted_total(), "R$ 25,00");

        engine.update_quantity(1, 5);

        assert_eq!(engine.total(), Decimal::new(6250, 2));
        assert_eq!(engine.formatted_total(), "R$ 62,50");

        engine.remove_item(1);

        assert!(engine.is_empty());
        assert_eq!(engine.total(), Decimal::ZERO);
    }

    #[test]
    fn adding_same_product_twice_merges_lines() {
        let mut engine = engine();

        engine.add_item(brigadeiro(), 2);
        engine.add_item(brigadeiro(), 3);

        assert_eq!(engine.lines().len(), 1);
        assert_eq!(engine.lines().first().map(CartLine::quantity), Some(5));
    }

    #[test]
    fn add_one_adds_a_single_unit() {
        let mut engine = engine();

        engine.add_one(beijinho());
        engine.add_one(beijinho());

        assert_eq!(engine.item_count(), 2);
        assert_eq!(engine.total(), Decimal::new(798, 2));
    }

    #[test]
    fn adding_zero_units_is_a_no_op() {
        let mut engine = engine();

        engine.add_item(brigadeiro(), 0);

        assert!(engine.is_empty());
        assert!(engine.store().is_empty());
    }

    #[test]
    fn lines_keep_insertion_order() {
        let mut engine = engine();

        engine.add_item(beijinho(), 1);
        engine.add_item(brigadeiro(), 1);
        engine.add_item(beijinho(), 1);

        let ids: Vec<ProductId> = engine.lines().iter().map(|l| l.product().id).collect();

        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn update_quantity_sets_exact_value() {
        let mut engine = engine();

        engine.add_item(brigadeiro(), 4);
        engine.update_quantity(1, 2);

        assert_eq!(engine.item_count(), 2);
    }

    #[test]
    fn update_quantity_to_zero_removes_line() {
        let mut engine = engine();

        engine.add_item(brigadeiro(), 3);
        engine.add_item(beijinho(), 2);

        let before = engine.item_count();

        engine.update_quantity(1, 0);

        assert_eq!(engine.lines().len(), 1);
        assert_eq!(engine.item_count(), before - 3);
    }

    #[test]
    fn update_quantity_negative_removes_line() {
        let mut engine = engine();

        engine.add_item(brigadeiro(), 3);
        engine.update_quantity(1, -4);

        assert!(engine.is_empty());
    }

    #[test]
    fn update_quantity_for_unknown_product_is_a_no_op() {
        let mut engine = engine();

        engine.add_item(brigadeiro(), 1);
        engine.update_quantity(99, 5);

        assert_eq!(engine.item_count(), 1);
        assert_eq!(engine.lines().len(), 1);
    }

    #[test]
    fn remove_unknown_product_is_a_no_op() {
        let mut engine = engine();

        engine.add_item(brigadeiro(), 1);
        engine.remove_item(42);

        assert_eq!(engine.lines().len(), 1);
    }

    #[test]
    fn clear_always_empties_cart() {
        let mut engine = engine();

        engine.add_item(brigadeiro(), 3);
        engine.add_item(beijinho(), 7);
        engine.clear();

        assert!(engine.is_empty());
        assert_eq!(engine.total(), Decimal::ZERO);
        assert_eq!(engine.formatted_total(), "R$ 0,00");
    }

    #[test]
    fn total_never_drifts_from_lines() {
        let mut engine = engine();

        let steps: [(&str, ProductId, i64); 8] = [
            ("add", 1, 2),
            ("add", 2, 5),
            ("update", 1, 7),
            ("add", 1, 1),
            ("update", 2, 0),
            ("add", 2, 3),
            ("remove", 1, 0),
            ("update", 2, 11),
        ];

        for (op, id, quantity) in steps {
            let product = if id == 1 { brigadeiro() } else { beijinho() };

            match op {
                "add" => engine.add_item(product, u32::try_from(quantity).unwrap_or(0)),
                "update" => engine.update_quantity(id, quantity),
                _ => engine.remove_item(id),
            }

            assert_eq!(engine.total(), sum_of_lines(&engine), "after {op} {id}");
        }
    }

    #[test]
    fn every_mutation_persists_the_cart() -> TestResult {
        let mut engine = engine();

        engine.add_item(brigadeiro(), 2);

        let stored = engine.store().get(keys::CART)?.unwrap_or_default();
        let cart: Cart = serde_json::from_str(&stored)?;

        assert_eq!(&cart, engine.cart());

        engine.clear();

        let stored = engine.store().get(keys::CART)?.unwrap_or_default();

        assert_eq!(serde_json::from_str::<Cart>(&stored)?, Cart::default());

        Ok(())
    }

    #[test]
    fn reload_restores_structurally_equal_cart() -> TestResult {
        let mut engine = engine();

        engine.add_item(brigadeiro(), 2);
        engine.add_item(beijinho(), 1);

        let before = engine.cart().clone();
        let restored = CartEngine::load(engine.store().clone());

        assert_eq!(restored.cart(), &before);

        Ok(())
    }

    #[test]
    fn persisted_shape_uses_storefront_field_names() -> TestResult {
        let mut engine = engine();

        engine.add_item(brigadeiro(), 2);

        let stored = engine.store().get(keys::CART)?.unwrap_or_default();
        let value: serde_json::Value = serde_json::from_str(&stored)?;

        assert_eq!(value["total"], serde_json::json!(25.0));
        assert_eq!(value["totalFormatado"], serde_json::json!("R$ 25,00"));
        assert_eq!(value["items"][0]["quantidade"], serde_json::json!(2));
        assert_eq!(value["items"][0]["doce"]["nome"], serde_json::json!("Brigadeiro"));

        Ok(())
    }

    #[test]
    fn corrupt_cart_falls_back_to_empty() -> TestResult {
        let mut store = MemoryStore::new();

        store.set(keys::CART, "{not json")?;

        let engine = CartEngine::load(store);

        assert!(engine.is_empty());

        Ok(())
    }

    #[test]
    fn restored_total_is_recomputed() -> TestResult {
        let mut store = MemoryStore::new();
        let product = serde_json::to_value(brigadeiro())?;

        store.set(
            keys::CART,
            &serde_json::json!({
                "items": [{ "doce": product, "quantidade": 2 }],
                "total": 999.0,
                "totalFormatado": "R$ 999,00"
            })
            .to_string(),
        )?;

        let engine = CartEngine::load(store);

        assert_eq!(engine.total(), Decimal::new(2500, 2));
        assert_eq!(engine.formatted_total(), "R$ 25,00");

        Ok(())
    }

    #[test]
    fn restored_duplicate_lines_are_merged() -> TestResult {
        let mut store = MemoryStore::new();
        let product = serde_json::to_value(brigadeiro())?;

        store.set(
            keys::CART,
            &serde_json::json!({
                "items": [
                    { "doce": product, "quantidade": 2 },
                    { "doce": product, "quantidade": 3 }
                ],
                "total": 0.0,
                "totalFormatado": "R$ 0,00"
            })
            .to_string(),
        )?;

        let mut engine = CartEngine::load(store);

        assert_eq!(engine.lines().len(), 1, "expected a single merged line");
        assert_eq!(engine.item_count(), 5);
        assert_eq!(engine.total(), Decimal::new(6250, 2));

        engine.update_quantity(brigadeiro().id, 1);

        assert_eq!(engine.lines().len(), 1);
        assert_eq!(engine.item_count(), 1);
        assert_eq!(engine.formatted_total(), "R$ 12,50");

        Ok(())
    }

    #[test]
    fn unreadable_store_falls_back_to_empty() {
        let mut store = MockStore::new();

        store.expect_get().returning(|key| {
            Err(StoreError::InvalidKey(key.to_string()))
        });

        let engine = CartEngine::load(store);

        assert!(engine.is_empty());
    }

    #[test]
    fn failed_write_keeps_in_memory_state() {
        let mut store = MockStore::new();

        store.expect_get().returning(|_| Ok(None));
        store
            .expect_set()
            .times(2)
            .returning(|key, _| Err(StoreError::InvalidKey(key.to_string())));

        let mut engine = CartEngine::load(store);

        engine.add_item(brigadeiro(), 2);
        engine.add_item(beijinho(), 1);

        assert_eq!(engine.item_count(), 3);
        assert_eq!(engine.total(), Decimal::new(2899, 2));
    }
}
