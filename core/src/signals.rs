//! Behavioral signal stage: seasonality, weather, promotions and pricing.
//!
//! Everything here is per row and stateless, except the base price, which
//! is drawn once per product and shared by all of that product's rows.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::f64::consts::PI;

use crate::{
    calendar::day_of_year,
    error::GenResult,
    event::GenEvent,
    panel::{Panel, Weather},
    rng::StageRng,
    stage::PanelStage,
    types::ProductId,
};

pub const PROMOTION_PROBABILITY: f64 = 0.08;
pub const COMPETITOR_PRICE_RANGE: (f64, f64) = (8.0, 80.0);
pub const BASE_PRICE_RANGE: (f64, f64) = (10.0, 50.0);
pub const PRICE_JITTER: f64 = 3.0;
pub const DISCOUNT_RANGE: (f64, f64) = (0.05, 0.25);

/// 10 + 5·sin(2π·dayOfYear/365). Ranges over [5, 15].
pub fn seasonality(date: NaiveDate) -> f64 {
    10.0 + 5.0 * (2.0 * PI * f64::from(day_of_year(date)) / 365.0).sin()
}

/// Round half away from zero to two decimal places.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Default)]
pub struct SignalStage;

impl SignalStage {
    pub fn new() -> Self {
        Self
    }

    pub fn draw_base_prices(products: &[ProductId], rng: &mut StageRng) -> BTreeMap<ProductId, f64> {
        products
            .iter()
            .map(|&id| (id, rng.uniform(BASE_PRICE_RANGE.0, BASE_PRICE_RANGE.1)))
            .collect()
    }
}

impl PanelStage for SignalStage {
    fn name(&self) -> &'static str { "signals" }

    fn apply(&mut self, panel: &mut Panel, rng: &mut StageRng) -> GenResult<Vec<GenEvent>> {
        panel.base_prices = Self::draw_base_prices(&panel.product_ids(), rng);

        let mut promotion_rows = 0usize;
        for row in &mut panel.rows {
            row.seasonality = seasonality(row.date);
            row.weather = *rng.pick(&Weather::ALL);
            row.promotion = rng.chance(PROMOTION_PROBABILITY);
            row.competitor_price =
                round_cents(rng.uniform(COMPETITOR_PRICE_RANGE.0, COMPETITOR_PRICE_RANGE.1));

            let base = panel.base_prices.get(&row.product_id).copied().unwrap_or_default();
            row.price = base + rng.uniform(-PRICE_JITTER, PRICE_JITTER);

            row.discount = if row.promotion {
                promotion_rows += 1;
                rng.uniform(DISCOUNT_RANGE.0, DISCOUNT_RANGE.1)
            } else {
                0.0
            };
        }

        log::debug!(
            "signals: {} rows, {promotion_rows} on promotion, {} base prices",
            panel.rows.len(),
            panel.base_prices.len()
        );

        Ok(vec![GenEvent::SignalsGenerated {
            rows: panel.rows.len(),
            promotion_rows,
        }])
    }
}
