use serde::Serialize;

use crate::data::model::TableId;
use crate::error::Result;

use super::base::Measure;
use super::category::Category;

/// Snapshot of everything a runner needs to list or schedule a measure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeasureInfo {
    pub name: String,
    pub identifier: String,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub data_sources: Vec<String>,
    pub data_tables: Vec<TableId>,
}

impl MeasureInfo {
    pub fn of(measure: &dyn Measure) -> Self {
        Self {
            name: measure.name().to_string(),
            identifier: measure.identifier().into_owned(),
            category: measure.category(),
            description: measure.description().map(str::to_string),
            data_sources: measure.data_sources(),
            data_tables: measure.data_tables(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
