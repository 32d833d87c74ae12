//! Universe construction: catalog sparsity and the pair × date cross-join.

use chrono::NaiveDate;
use panelgen_core::{
    calendar::DateRange,
    config::GeneratorConfig,
    engine::PanelEngine,
    rng::{RngBank, StageSlot},
    universe::UniverseStage,
};
use std::collections::{BTreeSet, HashSet};

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 1, 1).unwrap()
}

#[test]
fn full_presence_builds_every_triple() {
    let stage = UniverseStage::new(2, 100, 1.0, DateRange::new(start(), 156));
    let mut rng = RngBank::new(42).for_stage(StageSlot::Universe);

    let pairs = stage.draw_pairs(&mut rng);
    assert_eq!(pairs.len(), 200);

    let rows = stage.expand(&pairs);
    assert_eq!(rows.len(), 2 * 100 * (156 * 7 + 1));

    let unique: HashSet<_> = rows.iter().map(|r| (r.store_id, r.product_id, r.date)).collect();
    assert_eq!(unique.len(), rows.len(), "duplicate (store, product, date) keys");
}

#[test]
fn zero_presence_yields_empty_catalog() {
    let stage = UniverseStage::new(5, 50, 0.0, DateRange::new(start(), 4));
    let mut rng = RngBank::new(1).for_stage(StageSlot::Universe);
    let pairs = stage.draw_pairs(&mut rng);
    assert!(pairs.is_empty());
    assert!(stage.expand(&pairs).is_empty());
}

#[test]
fn empty_catalog_runs_through_the_whole_pipeline() {
    let config = GeneratorConfig {
        presence_probability: 0.0,
        ..GeneratorConfig::default_test()
    };
    let mut engine = PanelEngine::build(config).unwrap();
    let panel = engine.generate().unwrap();
    assert!(panel.is_empty());
    assert!(panel.categories.is_empty());
    assert!(panel.regions.is_empty());
}

#[test]
fn partial_presence_creates_holes() {
    let stage = UniverseStage::new(10, 100, 0.65, DateRange::new(start(), 1));
    let mut rng = RngBank::new(7).for_stage(StageSlot::Universe);
    let pairs = stage.draw_pairs(&mut rng);

    // 1000 Bernoulli(0.65) draws: far from both 0 and 1000.
    assert!(pairs.len() > 550 && pairs.len() < 750, "got {}", pairs.len());
}

#[test]
fn no_orphan_rows() {
    let mut engine = PanelEngine::build(GeneratorConfig::default_test()).unwrap();
    let panel = engine.generate().unwrap();

    let included: BTreeSet<_> = panel.pairs.iter().copied().collect();
    assert!(panel.rows.iter().all(|r| included.contains(&r.pair())));

    let days = GeneratorConfig::default_test().date_range().len();
    for pair in &panel.pairs {
        assert_eq!(panel.rows_for(*pair).count(), days, "{pair}");
    }
}
