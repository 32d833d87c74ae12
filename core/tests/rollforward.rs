//! Inventory rollforward: sequencing, clamping and ledger hand-off.

use chrono::NaiveDate;
use panelgen_core::{
    panel::PanelRow,
    rollforward::{roll_forward, step, InventoryLedger},
    types::{PairKey, Units},
};

fn day(n: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 1, n).unwrap()
}

fn row(pair: PairKey, date: NaiveDate, seed: Units, sold: Units, ordered: Units) -> PanelRow {
    let mut r = PanelRow::new(pair, date);
    r.inventory_level = seed;
    r.units_sold = sold;
    r.units_ordered = ordered;
    r
}

fn levels(rows: &[PanelRow], pair: PairKey) -> Vec<Units> {
    rows.iter().filter(|r| r.pair() == pair).map(|r| r.inventory_level).collect()
}

#[test]
fn clamp_activates_when_sales_exceed_stock() {
    let pair = PairKey::new(1, 7);
    let mut rows = vec![
        row(pair, day(1), 50, 10, 0),
        row(pair, day(2), 50, 45, 0),
        row(pair, day(3), 50, 0, 40),
    ];

    let ledger = roll_forward(&mut rows, InventoryLedger::new());

    assert_eq!(levels(&rows, pair), vec![40, 0, 40]);
    assert_eq!(ledger.level(pair), Some(40));
}

#[test]
fn rows_are_sorted_by_pair_then_date_before_rolling() {
    let a = PairKey::new(1, 1);
    let b = PairKey::new(2, 1);
    // Interleaved pairs and shuffled dates.
    let mut rows = vec![
        row(b, day(2), 30, 5, 0),
        row(a, day(3), 100, 10, 0),
        row(a, day(1), 100, 20, 0),
        row(b, day(1), 30, 10, 0),
        row(a, day(2), 100, 30, 0),
    ];

    roll_forward(&mut rows, InventoryLedger::new());

    let keys: Vec<_> = rows.iter().map(|r| (r.store_id, r.product_id, r.date)).collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);

    assert_eq!(levels(&rows, a), vec![80, 50, 40]);
    assert_eq!(levels(&rows, b), vec![20, 15]);
}

#[test]
fn pairs_evolve_independently() {
    let a = PairKey::new(1, 1);
    let b = PairKey::new(1, 2);
    let mut rows = vec![
        row(a, day(1), 10, 10, 0),
        row(a, day(2), 10, 5, 0),
        row(b, day(1), 200, 1, 0),
        row(b, day(2), 200, 1, 0),
    ];

    let ledger = roll_forward(&mut rows, InventoryLedger::new());

    assert_eq!(levels(&rows, a), vec![0, 0]);
    assert_eq!(levels(&rows, b), vec![199, 198]);
    assert_eq!(ledger.len(), 2);
}

#[test]
fn seeded_ledger_overrides_row_seed() {
    let pair = PairKey::new(3, 9);
    let mut ledger = InventoryLedger::new();
    ledger.seed(pair, 5);

    let mut rows = vec![row(pair, day(1), 100, 2, 0), row(pair, day(2), 100, 0, 10)];
    let ledger = roll_forward(&mut rows, ledger);

    assert_eq!(levels(&rows, pair), vec![3, 13]);
    assert_eq!(ledger.level(pair), Some(13));
}

#[test]
fn closing_ledger_continues_a_later_batch() {
    let pair = PairKey::new(1, 1);
    let mut first = vec![row(pair, day(1), 60, 10, 0), row(pair, day(2), 60, 10, 0)];
    let ledger = roll_forward(&mut first, InventoryLedger::new());

    let mut second = vec![row(pair, day(3), 60, 10, 0)];
    let ledger = roll_forward(&mut second, ledger);

    assert_eq!(second[0].inventory_level, 30);
    assert_eq!(ledger.level(pair), Some(30));
}

#[test]
fn empty_input_is_a_no_op() {
    let mut rows: Vec<PanelRow> = Vec::new();
    let ledger = roll_forward(&mut rows, InventoryLedger::new());
    assert!(ledger.is_empty());
}

#[test]
fn every_transition_matches_the_step_rule() {
    let pair = PairKey::new(1, 1);
    let pattern: [(Units, Units); 8] =
        [(7, 0), (9, 0), (30, 0), (0, 45), (12, 0), (50, 0), (3, 41), (0, 0)];
    let mut rows: Vec<PanelRow> = pattern
        .iter()
        .enumerate()
        .map(|(i, (sold, ordered))| row(pair, day(i as u32 + 1), 25, *sold, *ordered))
        .collect();
    let originals = rows.clone();

    roll_forward(&mut rows, InventoryLedger::new());

    assert_eq!(rows[0].inventory_level, step(25, 7, 0));
    for i in 1..rows.len() {
        let expected = step(
            rows[i - 1].inventory_level,
            originals[i].units_sold,
            originals[i].units_ordered,
        );
        assert_eq!(rows[i].inventory_level, expected, "day {}", i + 1);
    }
}
