//! The store × product × day panel and its row type.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::types::{PairKey, ProductId, StoreId, Units};

pub const CATEGORY_COUNT: u8 = 5;
pub const REGION_COUNT: u8 = 4;

/// Product category, `Category_1` through `Category_5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Category(pub u8);

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Category_{}", self.0)
    }
}

/// Store region, `Region_1` through `Region_4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Region(pub u8);

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Region_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    Sunny,
    Rainy,
    Cloudy,
}

impl Weather {
    pub const ALL: [Weather; 3] = [Weather::Sunny, Weather::Rainy, Weather::Cloudy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sunny  => "sunny",
            Self::Rainy  => "rainy",
            Self::Cloudy => "cloudy",
        }
    }
}

/// One record per (store, product, date).
///
/// The universe stage creates rows with neutral values; later stages fill
/// in their own fields. Only the rollforward rewrites `inventory_level`
/// after the demand stage seeds it.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelRow {
    pub date:             NaiveDate,
    pub store_id:         StoreId,
    pub product_id:       ProductId,
    pub category:         Option<Category>,
    pub region:           Option<Region>,
    pub inventory_level:  Units,
    pub units_sold:       Units,
    pub units_ordered:    Units,
    pub demand_forecast:  f64,
    pub price:            f64,
    pub discount:         f64,
    pub weather:          Weather,
    pub promotion:        bool,
    pub competitor_price: f64,
    pub seasonality:      f64,
}

impl PanelRow {
    pub fn new(pair: PairKey, date: NaiveDate) -> Self {
        Self {
            date,
            store_id:         pair.store_id,
            product_id:       pair.product_id,
            category:         None,
            region:           None,
            inventory_level:  0,
            units_sold:       0,
            units_ordered:    0,
            demand_forecast:  0.0,
            price:            0.0,
            discount:         0.0,
            weather:          Weather::Sunny,
            promotion:        false,
            competitor_price: 0.0,
            seasonality:      0.0,
        }
    }

    pub fn pair(&self) -> PairKey {
        PairKey::new(self.store_id, self.product_id)
    }
}

/// The full panel for one run, plus the per-key lookups built along the way.
#[derive(Debug, Clone, Default)]
pub struct Panel {
    /// Catalog pairs included by the universe stage, in (store, product) order.
    pub pairs:          Vec<PairKey>,
    pub rows:           Vec<PanelRow>,
    pub categories:     BTreeMap<ProductId, Category>,
    pub regions:        BTreeMap<StoreId, Region>,
    pub base_prices:    BTreeMap<ProductId, f64>,
    /// Seed inventory per pair, used for the pair's first date.
    pub seed_inventory: BTreeMap<PairKey, Units>,
}

impl Panel {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Distinct product ids present in the catalog, ascending.
    pub fn product_ids(&self) -> Vec<ProductId> {
        let mut ids: Vec<_> = self.pairs.iter().map(|p| p.product_id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Distinct store ids present in the catalog, ascending.
    pub fn store_ids(&self) -> Vec<StoreId> {
        let mut ids: Vec<_> = self.pairs.iter().map(|p| p.store_id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Rows for one pair, in their current order.
    pub fn rows_for(&self, pair: PairKey) -> impl Iterator<Item = &PanelRow> + '_ {
        self.rows.iter().filter(move |r| r.pair() == pair)
    }
}
