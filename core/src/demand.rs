//! Demand stage: seed inventory per pair, a noisy demand forecast per row,
//! and the pre-rollforward sold/ordered quantities.
//!
//! Quantities here are row-local. They do not yet reflect depletion or
//! restock; the rollforward applies those in date order afterwards.

use std::collections::BTreeMap;

use crate::{
    error::GenResult,
    event::GenEvent,
    panel::Panel,
    rng::StageRng,
    stage::PanelStage,
    types::{PairKey, Units},
};

pub const SEED_INVENTORY_RANGE: (Units, Units) = (20, 200);
pub const BASE_DEMAND: f64 = 5.0;
pub const SEASONALITY_WEIGHT: f64 = 0.1;
pub const DEMAND_NOISE_SD: f64 = 2.0;
pub const PROMOTION_DEMAND_BUMP: f64 = 8.0;
pub const REORDER_THRESHOLD: Units = 15;
pub const REORDER_BASE_QUANTITY: Units = 40;
pub const REORDER_EXTRA_SPREAD: u64 = 20;

/// Demand before noise is added.
pub fn expected_demand(seasonality: f64, promotion: bool) -> f64 {
    let bump = if promotion { PROMOTION_DEMAND_BUMP } else { 0.0 };
    BASE_DEMAND + SEASONALITY_WEIGHT * seasonality + bump
}

/// Whole units sold: demand capped by what is on hand, rounded down.
pub fn units_sold(inventory: Units, demand_forecast: f64) -> Units {
    f64::from(inventory).min(demand_forecast.max(0.0)).floor() as Units
}

/// Restock trigger: nothing at or above the threshold, otherwise a base
/// quantity plus 0..19 extra units.
pub fn reorder_quantity(inventory: Units, rng: &mut StageRng) -> Units {
    if inventory >= REORDER_THRESHOLD {
        0
    } else {
        REORDER_BASE_QUANTITY + rng.next_u64_below(REORDER_EXTRA_SPREAD) as Units
    }
}

#[derive(Default)]
pub struct DemandStage;

impl DemandStage {
    pub fn new() -> Self {
        Self
    }

    pub fn draw_seed_inventory(pairs: &[PairKey], rng: &mut StageRng) -> BTreeMap<PairKey, Units> {
        pairs
            .iter()
            .map(|&pair| (pair, rng.int_inclusive(SEED_INVENTORY_RANGE.0, SEED_INVENTORY_RANGE.1)))
            .collect()
    }
}

impl PanelStage for DemandStage {
    fn name(&self) -> &'static str { "demand" }

    fn apply(&mut self, panel: &mut Panel, rng: &mut StageRng) -> GenResult<Vec<GenEvent>> {
        panel.seed_inventory = Self::draw_seed_inventory(&panel.pairs, rng);

        let mut restock_rows = 0usize;
        for row in &mut panel.rows {
            let seed = panel.seed_inventory.get(&row.pair()).copied().unwrap_or_default();
            row.inventory_level = seed;

            let noise = rng.normal(0.0, DEMAND_NOISE_SD);
            row.demand_forecast = (expected_demand(row.seasonality, row.promotion) + noise).max(0.0);

            row.units_sold = units_sold(row.inventory_level, row.demand_forecast);
            row.units_ordered = reorder_quantity(row.inventory_level, rng);
            if row.units_ordered > 0 {
                restock_rows += 1;
            }
        }

        log::debug!(
            "demand: seeded {} pairs, {restock_rows} restock rows",
            panel.seed_inventory.len()
        );

        Ok(vec![GenEvent::DemandGenerated {
            pairs: panel.seed_inventory.len(),
            restock_rows,
        }])
    }
}
