//! CSV export of the finished panel.
//!
//! Column order is the field order of `PanelRecord`; the renames give the
//! published header names.

use chrono::NaiveDate;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::{
    error::{GenError, GenResult},
    panel::{Panel, PanelRow},
    types::{ProductId, StoreId, Units},
};

pub const COLUMNS: [&str; 15] = [
    "Date",
    "Store ID",
    "Product ID",
    "Category",
    "Region",
    "Inventory Level",
    "Units Sold",
    "Units Ordered",
    "Demand Forecast",
    "Price",
    "Discount",
    "Weather Condition",
    "Holiday/Promotion",
    "Competitor Pricing",
    "Seasonality",
];

/// One exported line.
#[derive(Debug, Clone, Serialize)]
pub struct PanelRecord {
    #[serde(rename = "Date")]
    pub date:              NaiveDate,
    #[serde(rename = "Store ID")]
    pub store_id:          StoreId,
    #[serde(rename = "Product ID")]
    pub product_id:        ProductId,
    #[serde(rename = "Category")]
    pub category:          String,
    #[serde(rename = "Region")]
    pub region:            String,
    #[serde(rename = "Inventory Level")]
    pub inventory_level:   Units,
    #[serde(rename = "Units Sold")]
    pub units_sold:        Units,
    #[serde(rename = "Units Ordered")]
    pub units_ordered:     Units,
    #[serde(rename = "Demand Forecast")]
    pub demand_forecast:   f64,
    #[serde(rename = "Price")]
    pub price:             f64,
    #[serde(rename = "Discount")]
    pub discount:          f64,
    #[serde(rename = "Weather Condition")]
    pub weather:           &'static str,
    #[serde(rename = "Holiday/Promotion")]
    pub promotion:         u8,
    #[serde(rename = "Competitor Pricing")]
    pub competitor_price:  f64,
    #[serde(rename = "Seasonality")]
    pub seasonality:       f64,
}

impl TryFrom<&PanelRow> for PanelRecord {
    type Error = GenError;

    fn try_from(row: &PanelRow) -> GenResult<Self> {
        let (Some(category), Some(region)) = (row.category, row.region) else {
            return Err(GenError::UnassignedAttribute {
                store:   row.store_id,
                product: row.product_id,
            });
        };
        Ok(Self {
            date:             row.date,
            store_id:         row.store_id,
            product_id:       row.product_id,
            category:         category.to_string(),
            region:           region.to_string(),
            inventory_level:  row.inventory_level,
            units_sold:       row.units_sold,
            units_ordered:    row.units_ordered,
            demand_forecast:  row.demand_forecast,
            price:            row.price,
            discount:         row.discount,
            weather:          row.weather.as_str(),
            promotion:        u8::from(row.promotion),
            competitor_price: row.competitor_price,
            seasonality:      row.seasonality,
        })
    }
}

/// Write the panel as CSV, sorted by (store, product, date).
/// Returns the number of data rows written.
pub fn write_panel<W: Write>(panel: &Panel, writer: W) -> GenResult<usize> {
    let mut ordered: Vec<&PanelRow> = panel.rows.iter().collect();
    ordered.sort_by_key(|r| (r.store_id, r.product_id, r.date));

    let mut csv_writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    // Written explicitly so an empty panel still gets a header line.
    csv_writer.write_record(COLUMNS)?;
    for row in &ordered {
        csv_writer.serialize(PanelRecord::try_from(*row)?)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(ordered.len())
}

/// Write the panel to `path`. The parent directory must already exist;
/// a failed write is fatal for the run.
pub fn write_panel_file(panel: &Panel, path: &Path) -> GenResult<usize> {
    let file = File::create(path).map_err(|e| GenError::io(path, e))?;
    let mut buffered = BufWriter::new(file);
    let rows = write_panel(panel, &mut buffered).map_err(|e| with_path(path, e))?;
    buffered.flush().map_err(|e| GenError::io(path, e))?;
    log::info!("wrote {rows} rows to {}", path.display());
    Ok(rows)
}

/// Report I/O failures surfaced through the CSV writer as I/O on `path`.
fn with_path(path: &Path, err: GenError) -> GenError {
    match err {
        GenError::Csv(e) if e.is_io_error() => match e.into_kind() {
            csv::ErrorKind::Io(source) => GenError::io(path, source),
            other => GenError::io(path, std::io::Error::other(format!("{other:?}"))),
        },
        other => other,
    }
}
