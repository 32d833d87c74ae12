//! Attribute stage: one category per product, one region per store.
//!
//! Assignment is drawn once per distinct key, in ascending id order, then
//! looked up onto every row. Same seed, same catalog: same assignment.

use std::collections::BTreeMap;

use crate::{
    error::GenResult,
    event::GenEvent,
    panel::{Category, Panel, Region, CATEGORY_COUNT, REGION_COUNT},
    rng::StageRng,
    stage::PanelStage,
    types::{ProductId, StoreId},
};

#[derive(Default)]
pub struct AttributeStage;

impl AttributeStage {
    pub fn new() -> Self {
        Self
    }

    pub fn assign_categories(
        products: &[ProductId],
        rng: &mut StageRng,
    ) -> BTreeMap<ProductId, Category> {
        products
            .iter()
            .map(|&id| (id, Category(1 + rng.next_u64_below(u64::from(CATEGORY_COUNT)) as u8)))
            .collect()
    }

    pub fn assign_regions(stores: &[StoreId], rng: &mut StageRng) -> BTreeMap<StoreId, Region> {
        stores
            .iter()
            .map(|&id| (id, Region(1 + rng.next_u64_below(u64::from(REGION_COUNT)) as u8)))
            .collect()
    }
}

impl PanelStage for AttributeStage {
    fn name(&self) -> &'static str { "attributes" }

    fn apply(&mut self, panel: &mut Panel, rng: &mut StageRng) -> GenResult<Vec<GenEvent>> {
        // Categories first, then regions: the draw order is part of the stream.
        panel.categories = Self::assign_categories(&panel.product_ids(), rng);
        panel.regions = Self::assign_regions(&panel.store_ids(), rng);

        for row in &mut panel.rows {
            row.category = panel.categories.get(&row.product_id).copied();
            row.region = panel.regions.get(&row.store_id).copied();
        }

        log::debug!(
            "attributes: {} products categorised, {} stores regioned",
            panel.categories.len(),
            panel.regions.len()
        );

        Ok(vec![GenEvent::AttributesAssigned {
            products: panel.categories.len(),
            stores:   panel.regions.len(),
        }])
    }
}
