use std::collections::BTreeMap;
use std::fmt;

use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

use crate::error::Result;

/// Output of [`Measure::estimate`](super::Measure::estimate): the result table
/// and a human-readable label per result column.
#[derive(Debug, Clone)]
pub struct Estimation {
    table: RecordBatch,
    labels: BTreeMap<String, String>,
}

impl Estimation {
    pub fn new<I, K, V>(table: RecordBatch, labels: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let labels = labels
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { table, labels }
    }

    pub fn table(&self) -> &RecordBatch {
        &self.table
    }

    pub fn labels(&self) -> &BTreeMap<String, String> {
        &self.labels
    }

    pub fn label(&self, column: &str) -> Option<&str> {
        self.labels.get(column).map(String::as_str)
    }

    /// Result columns with no label, in schema order.
    pub fn unlabelled_columns(&self) -> Vec<String> {
        self.table
            .schema()
            .fields()
            .iter()
            .map(|f| f.name())
            .filter(|name| !self.labels.contains_key(name.as_str()))
            .cloned()
            .collect()
    }

    /// Render the result table as text. Fails for column types the Arrow
    /// pretty printer does not support.
    pub fn render(&self) -> Result<String> {
        Ok(pretty_format_batches(std::slice::from_ref(&self.table))?.to_string())
    }

    pub fn into_parts(self) -> (RecordBatch, BTreeMap<String, String>) {
        (self.table, self.labels)
    }
}

impl fmt::Display for Estimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.render() {
            Ok(rendered) => f.write_str(&rendered),
            Err(e) => {
                log::warn!("could not render estimation table: {e}");
                write!(f, "<unrenderable table: {e}>")
            }
        }
    }
}
