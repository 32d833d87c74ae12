//! The run log: what each stage did, in emission order.
//!
//! RULE: Stages report through events only. The runner and the tests read
//! the log; they never reach into a stage's internal state.

use serde::{Deserialize, Serialize};

/// Every event emitted during a run.
/// Variants may be added; never removed or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GenEvent {
    // ── Engine events ──────────────────────────────
    RunInitialized {
        seed:     u64,
        stores:   u32,
        products: u32,
        weeks:    u32,
    },

    // ── Stage events ───────────────────────────────
    UniverseBuilt {
        pairs: usize,
        days:  usize,
        rows:  usize,
    },
    AttributesAssigned {
        products: usize,
        stores:   usize,
    },
    SignalsGenerated {
        rows:           usize,
        promotion_rows: usize,
    },
    DemandGenerated {
        pairs:        usize,
        restock_rows: usize,
    },
    InventoryRolledForward {
        pairs:         usize,
        stockout_rows: usize,
    },

    // ── Export ─────────────────────────────────────
    PanelExported {
        rows: usize,
        path: String,
    },
}

impl GenEvent {
    /// Stable name for log lines.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::RunInitialized { .. }         => "run_initialized",
            Self::UniverseBuilt { .. }          => "universe_built",
            Self::AttributesAssigned { .. }     => "attributes_assigned",
            Self::SignalsGenerated { .. }       => "signals_generated",
            Self::DemandGenerated { .. }        => "demand_generated",
            Self::InventoryRolledForward { .. } => "inventory_rolled_forward",
            Self::PanelExported { .. }          => "panel_exported",
        }
    }
}

/// One entry in the in-memory run log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub stage:      String,
    pub event_type: String,
    pub payload:    String,
}
