//! Stage trait.
//!
//! RULE: Every generation step implements PanelStage.
//! The engine calls apply() on each registered stage exactly once,
//! in registration order. The order is fixed and documented in engine.rs.

use crate::{error::GenResult, event::GenEvent, panel::Panel, rng::StageRng};

/// The contract every stage must fulfill.
pub trait PanelStage {
    /// Unique stable name for this stage.
    fn name(&self) -> &'static str;

    /// Called once per run by the engine.
    ///
    /// - `panel`: the panel as left by earlier stages
    /// - `rng`:   this stage's deterministic RNG stream
    ///
    /// Returns the events describing what the stage did.
    fn apply(&mut self, panel: &mut Panel, rng: &mut StageRng) -> GenResult<Vec<GenEvent>>;
}
