//! The generation engine.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Universe: catalog pairs × every day of the range
//!   2. Attributes: category per product, region per store
//!   3. Signals: seasonality, weather, promotion, prices, discount
//!   4. Demand: seed inventory, demand forecast, sold / ordered
//!   5. Rollforward: sequential inventory per pair, clamped at zero
//!
//! RULES:
//!   - Each stage runs exactly once, in registration order.
//!   - All randomness flows through the RngBank, one stream per stage.
//!   - Every stage reports through the event log.

use std::path::PathBuf;

use crate::{
    attributes::AttributeStage,
    config::GeneratorConfig,
    demand::DemandStage,
    error::{GenError, GenResult},
    event::{EventLogEntry, GenEvent},
    export,
    panel::Panel,
    rng::{RngBank, StageSlot},
    rollforward::RollforwardStage,
    signals::SignalStage,
    stage::PanelStage,
    summary::RunSummary,
    universe::UniverseStage,
};

pub struct PanelEngine {
    pub config:   GeneratorConfig,
    pub rng_bank: RngBank,
    stages:       Vec<(StageSlot, Box<dyn PanelStage>)>,
    event_log:    Vec<EventLogEntry>,
}

impl PanelEngine {
    /// An engine with no stages registered. Validates the config.
    pub fn new(config: GeneratorConfig) -> GenResult<Self> {
        config.validate()?;
        Ok(Self {
            rng_bank:  RngBank::new(config.seed),
            config,
            stages:    Vec::new(),
            event_log: Vec::new(),
        })
    }

    /// Build a fully wired engine with every stage registered.
    /// Call this instead of new() + manual register() calls.
    pub fn build(config: GeneratorConfig) -> GenResult<Self> {
        let mut engine = PanelEngine::new(config)?;
        let range = engine.config.date_range();

        // EXECUTION ORDER: fixed, documented, never reordered.
        engine.register(
            StageSlot::Universe,
            Box::new(UniverseStage::new(
                engine.config.store_count,
                engine.config.product_count,
                engine.config.presence_probability,
                range,
            )),
        );
        engine.register(StageSlot::Attributes, Box::new(AttributeStage::new()));
        engine.register(StageSlot::Signals, Box::new(SignalStage::new()));
        engine.register(StageSlot::Demand, Box::new(DemandStage::new()));
        engine.register(StageSlot::Rollforward, Box::new(RollforwardStage::new()));
        Ok(engine)
    }

    /// Register a stage. Call in the documented execution order.
    pub fn register(&mut self, slot: StageSlot, stage: Box<dyn PanelStage>) {
        self.stages.push((slot, stage));
    }

    /// Run every stage once and return the finished panel.
    pub fn generate(&mut self) -> GenResult<Panel> {
        self.event_log.clear();
        self.record(
            "engine",
            GenEvent::RunInitialized {
                seed:     self.config.seed,
                stores:   self.config.store_count,
                products: self.config.product_count,
                weeks:    self.config.weeks,
            },
        )?;

        let mut panel = Panel::default();
        for (slot, stage) in &mut self.stages {
            let mut rng = self.rng_bank.for_stage(*slot);
            // Events are logged as each stage finishes, so a later failure
            // keeps everything recorded before it.
            for event in stage.apply(&mut panel, &mut rng)? {
                append_event(&mut self.event_log, stage.name(), event)?;
            }
        }
        Ok(panel)
    }

    /// Generate, then write the panel to the configured output path.
    pub fn run(&mut self) -> GenResult<RunSummary> {
        log::info!(
            "generating panel: seed={} stores={} products={} weeks={} presence={}",
            self.config.seed,
            self.config.store_count,
            self.config.product_count,
            self.config.weeks,
            self.config.presence_probability
        );
        let panel = self.generate()?;
        let path: PathBuf = self.config.output_path.clone();
        let rows = export::write_panel_file(&panel, &path)?;
        self.record(
            "export",
            GenEvent::PanelExported { rows, path: path.display().to_string() },
        )?;
        Ok(RunSummary::from_panel(&panel).with_output(path))
    }

    /// Events of the last run, in emission order.
    pub fn event_log(&self) -> &[EventLogEntry] {
        &self.event_log
    }

    /// The events themselves, decoded from the log.
    pub fn events(&self) -> GenResult<Vec<GenEvent>> {
        self.event_log
            .iter()
            .map(|e| serde_json::from_str(&e.payload).map_err(GenError::from))
            .collect()
    }

    fn record(&mut self, stage: &str, event: GenEvent) -> GenResult<()> {
        append_event(&mut self.event_log, stage, event)
    }
}

fn append_event(log: &mut Vec<EventLogEntry>, stage: &str, event: GenEvent) -> GenResult<()> {
    let entry = EventLogEntry {
        stage:      stage.to_string(),
        event_type: event.type_name().to_string(),
        payload:    serde_json::to_string(&event)?,
    };
    log::debug!("[{}] {} {}", entry.stage, entry.event_type, entry.payload);
    log.push(entry);
    Ok(())
}
