//! Tabulated data shared across control primitives: `(x, y)` lookup records
//! and dated time-series records, with the interpolation behavior attached to
//! a lookup table.

use serde::{Deserialize, Serialize};

/// One `(x, y)` sample of a tabulated function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableRecord {
    pub x: f64,
    pub y: f64,
}

impl TableRecord {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One dated sample of a time series. The timestamp stays in its textual
/// form; the upstream parser does not commit to a calendar here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeValueRecord {
    pub time: String,
    pub value: f64,
}

/// How values between two table samples are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interpolation {
    Linear,
    Constant,
}

/// How values beyond the table's domain are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Extrapolation {
    Linear,
    Constant,
}

/// A tabulated function together with its interpolation behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupTable {
    pub records: Vec<TableRecord>,
    pub interpolation: Interpolation,
    pub extrapolation: Extrapolation,
}
