//! End-of-run figures printed by the runner.

use chrono::NaiveDate;
use serde::Serialize;
use std::path::PathBuf;

use crate::panel::Panel;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub rows:           usize,
    pub pairs:          usize,
    pub stores:         usize,
    pub products:       usize,
    pub first_date:     Option<NaiveDate>,
    pub last_date:      Option<NaiveDate>,
    pub promotion_rows: usize,
    pub restock_rows:   usize,
    pub stockout_rows:  usize,
    pub output_path:    Option<PathBuf>,
}

impl RunSummary {
    pub fn from_panel(panel: &Panel) -> Self {
        Self {
            rows:           panel.rows.len(),
            pairs:          panel.pairs.len(),
            stores:         panel.store_ids().len(),
            products:       panel.product_ids().len(),
            first_date:     panel.rows.iter().map(|r| r.date).min(),
            last_date:      panel.rows.iter().map(|r| r.date).max(),
            promotion_rows: panel.rows.iter().filter(|r| r.promotion).count(),
            restock_rows:   panel.rows.iter().filter(|r| r.units_ordered > 0).count(),
            stockout_rows:  panel.rows.iter().filter(|r| r.inventory_level == 0).count(),
            output_path:    None,
        }
    }

    pub fn with_output(mut self, path: PathBuf) -> Self {
        self.output_path = Some(path);
        self
    }
}
