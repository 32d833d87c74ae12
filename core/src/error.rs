use std::path::PathBuf;
use thiserror::Error;

use crate::types::{ProductId, StoreId};

#[derive(Error, Debug)]
pub enum GenError {
    #[error("Invalid configuration: {field} {reason}")]
    Config { field: &'static str, reason: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Row for store {store} / product {product} has no category or region")]
    UnassignedAttribute { store: StoreId, product: ProductId },
}

impl GenError {
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Config { field, reason: reason.into() }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

pub type GenResult<T> = Result<T, GenError>;
