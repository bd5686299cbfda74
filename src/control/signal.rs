//! Signals: named intermediate lookup values other elements reference by
//! name through `[Signal]` connection points.

use serde::{Deserialize, Serialize};

use crate::control::table::LookupTable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupSignal {
    pub name: String,
    pub table: LookupTable,
}
