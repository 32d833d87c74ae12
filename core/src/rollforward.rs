//! Inventory rollforward: the only order-dependent step in the pipeline.
//!
//! CONTRACT:
//!   - Rows are processed grouped by (store, product) and date-ascending
//!     within each group. `roll_forward` sorts its input to guarantee this,
//!     so callers may pass rows in any order.
//!   - The running level for a pair starts from the ledger if the pair is
//!     already there, otherwise from the first row's seeded inventory level.
//!   - Each row: level = max(previous - sold + ordered, 0). The result is
//!     written to the row and carried to the pair's next row.
//!   - Pairs evolve independently of each other.

use std::collections::BTreeMap;

use crate::{
    error::GenResult,
    event::GenEvent,
    panel::{Panel, PanelRow},
    rng::StageRng,
    stage::PanelStage,
    types::{PairKey, Units},
};

/// One day's transition, clamped at zero.
pub fn step(previous: Units, sold: Units, ordered: Units) -> Units {
    previous.saturating_add(ordered).saturating_sub(sold)
}

/// Running inventory per pair. Owned by a single rollforward call:
/// pass one in, get the updated one back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryLedger {
    levels: BTreeMap<PairKey, Units>,
}

impl InventoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) a pair from a known level.
    pub fn seed(&mut self, pair: PairKey, level: Units) {
        self.levels.insert(pair, level);
    }

    pub fn level(&self, pair: PairKey) -> Option<Units> {
        self.levels.get(&pair).copied()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PairKey, Units)> + '_ {
        self.levels.iter().map(|(k, v)| (*k, *v))
    }

    /// Apply one row to its pair and return the new level.
    fn apply(&mut self, row: &PanelRow) -> Units {
        let previous = *self.levels.entry(row.pair()).or_insert(row.inventory_level);
        let next = step(previous, row.units_sold, row.units_ordered);
        self.levels.insert(row.pair(), next);
        next
    }
}

/// Sort rows by (store, product, date), then overwrite every row's
/// inventory level with its rolled-forward value.
pub fn roll_forward(rows: &mut [PanelRow], mut ledger: InventoryLedger) -> InventoryLedger {
    rows.sort_by_key(|r| (r.store_id, r.product_id, r.date));
    for row in rows.iter_mut() {
        row.inventory_level = ledger.apply(row);
    }
    ledger
}

#[derive(Default)]
pub struct RollforwardStage {
    /// Closing level per pair after the last run.
    pub closing: InventoryLedger,
}

impl RollforwardStage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PanelStage for RollforwardStage {
    fn name(&self) -> &'static str { "rollforward" }

    // Pure arithmetic; the stream is never drawn from.
    fn apply(&mut self, panel: &mut Panel, _rng: &mut StageRng) -> GenResult<Vec<GenEvent>> {
        self.closing = roll_forward(&mut panel.rows, InventoryLedger::new());

        let stockout_rows = panel.rows.iter().filter(|r| r.inventory_level == 0).count();
        log::debug!(
            "rollforward: {} pairs, {stockout_rows} stock-out rows",
            self.closing.len()
        );

        Ok(vec![GenEvent::InventoryRolledForward {
            pairs: self.closing.len(),
            stockout_rows,
        }])
    }
}
