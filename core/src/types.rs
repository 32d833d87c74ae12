//! Shared primitive types used across the whole panel.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A store identifier. Stores are numbered from 1.
pub type StoreId = u32;

/// A product identifier. Products are numbered from 1.
pub type ProductId = u32;

/// A whole-unit stock quantity (inventory, sold, ordered).
pub type Units = u32;

/// A (store, product) combination that exists in the simulated catalog.
///
/// Ordering is store-major, then product, which is also the export order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PairKey {
    pub store_id:   StoreId,
    pub product_id: ProductId,
}

impl PairKey {
    pub fn new(store_id: StoreId, product_id: ProductId) -> Self {
        Self { store_id, product_id }
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "store {} / product {}", self.store_id, self.product_id)
    }
}
