use std::fmt;

use serde::{Deserialize, Serialize};

use super::table::Table;

// ---------------------------------------------------------------------------
// TableId – (source, library, table) triple
// ---------------------------------------------------------------------------

/// Fully qualified identifier of a table in the data catalogue.
///
/// Ordered field by field so sets of table ids iterate deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TableId {
    pub source: String,
    pub library: String,
    pub table: String,
}

impl TableId {
    pub fn new(
        source: impl Into<String>,
        library: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            library: library.into(),
            table: table.into(),
        }
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.source, self.library, self.table)
    }
}

impl<S, L, T> From<(S, L, T)> for TableId
where
    S: Into<String>,
    L: Into<String>,
    T: Into<String>,
{
    fn from((source, library, table): (S, L, T)) -> Self {
        Self::new(source, library, table)
    }
}

// ---------------------------------------------------------------------------
// Dataset – one table a measure needs, plus the columns it reads
// ---------------------------------------------------------------------------

/// Descriptor of a dataset a measure depends on.
///
/// The table id is derived from the stored fields, so `table_id().source`
/// and `source()` always agree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dataset {
    source: String,
    library: String,
    table: String,
    /// Columns read from the table, in the order the measure expects them.
    #[serde(default)]
    vars: Vec<String>,
    /// Columns among `vars` that hold dates.
    #[serde(default)]
    date_vars: Vec<String>,
}

impl Dataset {
    pub fn new(
        source: impl Into<String>,
        library: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            library: library.into(),
            table: table.into(),
            vars: Vec::new(),
            date_vars: Vec::new(),
        }
    }

    pub fn with_vars<I, S>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vars = vars.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_date_vars<I, S>(mut self, date_vars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.date_vars = date_vars.into_iter().map(Into::into).collect();
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn library(&self) -> &str {
        &self.library
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn vars(&self) -> &[String] {
        &self.vars
    }

    pub fn date_vars(&self) -> &[String] {
        &self.date_vars
    }

    pub fn table_id(&self) -> TableId {
        TableId::new(&self.source, &self.library, &self.table)
    }

    /// Declared `vars` that the given table does not carry, in declaration order.
    pub fn missing_vars(&self, table: &Table) -> Vec<String> {
        let schema = table.schema();
        self.vars
            .iter()
            .filter(|v| schema.index_of(v).is_err())
            .cloned()
            .collect()
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.source, self.library, self.table)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::{Float64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::record_batch::RecordBatch;

    use super::*;

    #[test]
    fn table_id_follows_fields() {
        let ds = Dataset::new("wrds", "comp", "funda");
        assert_eq!(ds.table_id(), TableId::new("wrds", "comp", "funda"));
        assert_eq!(ds.table_id().source, ds.source());
        assert_eq!(ds.table_id().to_string(), "wrds.comp.funda");
    }

    #[test]
    fn table_id_from_tuple() {
        let id: TableId = ("WRDS", "bank", "call_reports").into();
        assert_eq!(id.library, "bank");
        assert_eq!(id.table, "call_reports");
    }

    #[test]
    fn table_ids_order_by_source_then_library_then_table() {
        let a = TableId::new("a", "z", "z");
        let b = TableId::new("b", "a", "a");
        let c = TableId::new("b", "a", "b");
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn missing_vars_reports_absent_columns_in_order() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("gvkey", DataType::Utf8, false),
            Field::new("at", DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(vec!["001004"])),
                Arc::new(Float64Array::from(vec![Some(1.0)])),
            ],
        )
        .unwrap();

        let ds = Dataset::new("wrds", "comp", "funda").with_vars(["gvkey", "lt", "at", "ceq"]);
        assert_eq!(ds.missing_vars(&batch), vec!["lt".to_string(), "ceq".to_string()]);
    }

    #[test]
    fn deserializes_without_optional_columns() {
        let ds: Dataset =
            serde_json::from_str(r#"{"source":"wrds","library":"comp","table":"funda"}"#).unwrap();
        assert!(ds.vars().is_empty());
        assert!(ds.date_vars().is_empty());
    }
}
