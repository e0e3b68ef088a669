//! Cart aggregation with quantity-merged line items.
//!
//! The cart holds at most one line item per product id; adding an existing
//! product increases its quantity instead of duplicating the row. Line items
//! keep insertion order so the rendered cart and the checkout text are
//! stable.

use indexmap::IndexMap;

use crate::types::{CartItem, Product};

/// Quantity-merging shopping cart.
///
/// # Example
///
/// ```rust
/// use shop_core::{demo_catalog, Cart};
///
/// let catalog = demo_catalog();
/// let mut cart = Cart::new();
///
/// cart.add(catalog[0].clone(), 1);
/// cart.add(catalog[0].clone(), 2);
///
/// assert_eq!(cart.len(), 1);
/// assert_eq!(cart.items().next().unwrap().quantity, 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Cart {
    /// Line items keyed by product id, in insertion order.
    items: IndexMap<String, CartItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product to the cart.
    ///
    /// If a line item with the same product id exists, its quantity
    /// increases by `quantity`; otherwise a new line item is created.
    /// There is no upper bound on quantity.
    ///
    /// `quantity == 0` violates the caller contract and is treated as a
    /// no-op; returns `false` in that case, `true` otherwise.
    pub fn add(&mut self, product: Product, quantity: u32) -> bool {
        if quantity == 0 {
            return false;
        }

        if let Some(item) = self.items.get_mut(&product.id) {
            item.quantity = item.quantity.saturating_add(quantity);
        } else {
            self.items
                .insert(product.id.clone(), CartItem { product, quantity });
        }
        true
    }

    /// Adjust a line item's quantity by `delta`, clamped so it never drops
    /// below 1. Reaching the floor does not remove the item; removal is an
    /// explicit separate action.
    ///
    /// An unknown id is a silent no-op; returns whether the id was found.
    pub fn update_quantity(&mut self, id: &str, delta: i64) -> bool {
        match self.items.get_mut(id) {
            Some(item) => {
                let current = i64::from(item.quantity);
                item.quantity = current
                    .saturating_add(delta)
                    .clamp(1, i64::from(u32::MAX)) as u32;
                true
            }
            None => false,
        }
    }

    /// Remove a line item. No-op if the id is not present.
    pub fn remove(&mut self, id: &str) -> Option<CartItem> {
        self.items.shift_remove(id)
    }

    /// Current total: `Σ price * quantity` over all line items.
    ///
    /// Recomputed on every call; never cached.
    pub fn total(&self) -> u64 {
        self.items.values().map(CartItem::subtotal).sum()
    }

    /// Iterate line items in insertion order.
    pub fn items(&self) -> impl Iterator<Item = &CartItem> {
        self.items.values()
    }

    /// Look up a line item by product id.
    pub fn get(&self, id: &str) -> Option<&CartItem> {
        self.items.get(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Snapshot the cart as a plain list for persistence.
    pub fn snapshot(&self) -> Vec<CartItem> {
        self.items.values().cloned().collect()
    }

    /// Rebuild a cart from a persisted snapshot.
    ///
    /// Zero-quantity entries in a (hand-edited or corrupt) snapshot are
    /// dropped rather than carried into a live cart.
    pub fn from_snapshot(items: Vec<CartItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            cart.add(item.product, item.quantity);
        }
        cart
    }
}
