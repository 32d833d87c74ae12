//! Universe stage: decides which (store, product) pairs exist and expands
//! each one across every day of the range.

use crate::{
    calendar::DateRange,
    error::GenResult,
    event::GenEvent,
    panel::{Panel, PanelRow},
    rng::StageRng,
    stage::PanelStage,
    types::{PairKey, ProductId, StoreId},
};

pub struct UniverseStage {
    store_count:          StoreId,
    product_count:        ProductId,
    presence_probability: f64,
    range:                DateRange,
}

impl UniverseStage {
    pub fn new(
        store_count: StoreId,
        product_count: ProductId,
        presence_probability: f64,
        range: DateRange,
    ) -> Self {
        Self { store_count, product_count, presence_probability, range }
    }

    /// One independent Bernoulli draw per (store, product), store-major.
    pub fn draw_pairs(&self, rng: &mut StageRng) -> Vec<PairKey> {
        let mut pairs = Vec::new();
        for store in 1..=self.store_count {
            for product in 1..=self.product_count {
                if rng.chance(self.presence_probability) {
                    pairs.push(PairKey::new(store, product));
                }
            }
        }
        pairs
    }

    /// Cross-join pairs with every day of the range. Rows come out grouped
    /// by pair and date-ascending within each pair.
    pub fn expand(&self, pairs: &[PairKey]) -> Vec<PanelRow> {
        let mut rows = Vec::with_capacity(pairs.len() * self.range.len());
        for pair in pairs {
            rows.extend(self.range.days().map(|date| PanelRow::new(*pair, date)));
        }
        rows
    }
}

impl PanelStage for UniverseStage {
    fn name(&self) -> &'static str { "universe" }

    fn apply(&mut self, panel: &mut Panel, rng: &mut StageRng) -> GenResult<Vec<GenEvent>> {
        let pairs = self.draw_pairs(rng);
        if pairs.is_empty() {
            log::warn!(
                "universe: no catalog pairs drawn (presence_probability={}); panel will be empty",
                self.presence_probability
            );
        }
        panel.rows = self.expand(&pairs);
        panel.pairs = pairs;

        let possible = u64::from(self.store_count) * u64::from(self.product_count);
        log::debug!(
            "universe: {} of {possible} pairs present, {} days, {} rows",
            panel.pairs.len(),
            self.range.len(),
            panel.rows.len()
        );

        Ok(vec![GenEvent::UniverseBuilt {
            pairs: panel.pairs.len(),
            days:  self.range.len(),
            rows:  panel.rows.len(),
        }])
    }
}
