use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;

use crate::data::model::{Dataset, TableId};
use crate::data::table::Table;
use crate::error::{MeasureError, Result};

use super::category::Category;
use super::estimation::Estimation;

// ---------------------------------------------------------------------------
// MeasureBase – the state every measure carries
// ---------------------------------------------------------------------------

/// Name, dependencies and classification of a measure.
///
/// Concrete measures hold one of these and hand it out through
/// [`Measure::base`]. All fields are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasureBase {
    name: String,
    datasets_required: Vec<Dataset>,
    category: Category,
}

impl MeasureBase {
    /// An uncategorised measure. The dependency list is taken as is: it may be
    /// empty and may repeat datasets.
    pub fn new(name: impl Into<String>, datasets_required: Vec<Dataset>) -> Self {
        Self::categorised(Category::Unset, name.into(), datasets_required)
    }

    pub fn corporate_finance(name: impl Into<String>, datasets_required: Vec<Dataset>) -> Self {
        Self::categorised(Category::CorporateFinance, name.into(), datasets_required)
    }

    pub fn banking(name: impl Into<String>, datasets_required: Vec<Dataset>) -> Self {
        Self::categorised(Category::Banking, name.into(), datasets_required)
    }

    pub fn market_microstructure(
        name: impl Into<String>,
        datasets_required: Vec<Dataset>,
    ) -> Self {
        Self::categorised(Category::MarketMicrostructure, name.into(), datasets_required)
    }

    fn categorised(category: Category, name: String, datasets_required: Vec<Dataset>) -> Self {
        log::debug!(
            "measure '{name}' ({category}) declared with {} dataset(s)",
            datasets_required.len()
        );
        Self {
            name,
            datasets_required,
            category,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn datasets_required(&self) -> &[Dataset] {
        &self.datasets_required
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Unique sources across the required datasets, sorted.
    pub fn data_sources(&self) -> Vec<String> {
        self.datasets_required
            .iter()
            .map(|ds| ds.source().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Unique `(source, library, table)` ids across the required datasets, sorted.
    pub fn data_tables(&self) -> Vec<TableId> {
        self.datasets_required
            .iter()
            .map(Dataset::table_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl fmt::Display for MeasureBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// ---------------------------------------------------------------------------
// Measure – the contract runners program against
// ---------------------------------------------------------------------------

/// A named computation over one table per required dataset.
///
/// Implementors supply [`base`](Measure::base) and override
/// [`estimate`](Measure::estimate); everything else has a working default.
/// Per-type constants such as the documentation URL are exposed by
/// overriding [`description`](Measure::description).
///
/// ```ignore
/// struct Roa {
///     base: MeasureBase,
/// }
///
/// impl Measure for Roa {
///     fn base(&self) -> &MeasureBase {
///         &self.base
///     }
///
///     fn estimate(&self, inputs: &[Table]) -> Result<Estimation> {
///         ensure_input_count(self, inputs)?;
///         // ...
///     }
/// }
/// ```
pub trait Measure: Send + Sync {
    fn base(&self) -> &MeasureBase;

    fn name(&self) -> &str {
        self.base().name()
    }

    /// Text identifying this configuration of the measure. Defaults to the
    /// name; measures with parameters (a window length, a threshold) should
    /// include them so two configurations can be told apart.
    fn identifier(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.name())
    }

    fn datasets_required(&self) -> &[Dataset] {
        self.base().datasets_required()
    }

    fn data_sources(&self) -> Vec<String> {
        self.base().data_sources()
    }

    fn data_tables(&self) -> Vec<TableId> {
        self.base().data_tables()
    }

    fn category(&self) -> Category {
        self.base().category()
    }

    /// Documentation URL for the measure, if the type declares one.
    fn description(&self) -> Option<&'static str> {
        None
    }

    /// Compute the measure.
    ///
    /// `inputs` holds one table per entry of
    /// [`datasets_required`](Measure::datasets_required), in the same order.
    /// The result pairs the output table with a label for each output column.
    ///
    /// Every concrete measure must override this. The default only reports
    /// [`MeasureError::NotImplemented`].
    fn estimate(&self, inputs: &[Table]) -> Result<Estimation> {
        let measure = self.identifier().into_owned();
        log::debug!("'{measure}' has no estimate ({} input(s) ignored)", inputs.len());
        Err(MeasureError::NotImplemented { measure })
    }
}

impl fmt::Display for dyn Measure + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier())
    }
}

impl fmt::Debug for dyn Measure + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Measure")
            .field("identifier", &self.identifier())
            .field("category", &self.category())
            .field("datasets_required", &self.datasets_required())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn funda() -> Dataset {
        Dataset::new("wrds", "comp", "funda").with_vars(["gvkey", "datadate", "at"])
    }

    fn dsf() -> Dataset {
        Dataset::new("wrds", "crsp", "dsf").with_vars(["permno", "date", "ret"])
    }

    fn call_reports() -> Dataset {
        Dataset::new("fdic", "bank", "call_reports")
    }

    struct Bare {
        base: MeasureBase,
    }

    impl Measure for Bare {
        fn base(&self) -> &MeasureBase {
            &self.base
        }
    }

    #[test]
    fn accessors_return_constructor_arguments() {
        let base = MeasureBase::corporate_finance("ROA", vec![funda(), dsf()]);
        assert_eq!(base.name(), "ROA");
        assert_eq!(base.datasets_required(), &[funda(), dsf()]);
        assert_eq!(base.category(), Category::CorporateFinance);
        assert_eq!(base.to_string(), "ROA");
    }

    #[test]
    fn constructors_fix_category() {
        assert_eq!(MeasureBase::new("x", vec![]).category(), Category::Unset);
        assert_eq!(MeasureBase::banking("x", vec![]).category(), Category::Banking);
        assert_eq!(
            MeasureBase::market_microstructure("x", vec![]).category(),
            Category::MarketMicrostructure
        );
    }

    #[test]
    fn sources_and_tables_are_deduplicated() {
        let base = MeasureBase::new("dup", vec![dsf(), funda(), call_reports(), funda()]);
        assert_eq!(base.data_sources(), vec!["fdic".to_string(), "wrds".to_string()]);
        assert_eq!(
            base.data_tables(),
            vec![
                TableId::new("fdic", "bank", "call_reports"),
                TableId::new("wrds", "comp", "funda"),
                TableId::new("wrds", "crsp", "dsf"),
            ]
        );
    }

    #[test]
    fn same_table_with_different_vars_counts_once() {
        let narrow = Dataset::new("wrds", "comp", "funda").with_vars(["at"]);
        let base = MeasureBase::new("x", vec![funda(), narrow]);
        assert_eq!(base.data_tables(), vec![TableId::new("wrds", "comp", "funda")]);
    }

    #[test]
    fn empty_dependencies_are_accepted() {
        let base = MeasureBase::new("constant", vec![]);
        assert!(base.data_sources().is_empty());
        assert!(base.data_tables().is_empty());
    }

    #[test]
    fn trait_defaults_delegate_to_base() {
        let m = Bare {
            base: MeasureBase::banking("Z-score", vec![call_reports()]),
        };
        assert_eq!(m.name(), "Z-score");
        assert_eq!(m.identifier(), "Z-score");
        assert_eq!(m.category(), Category::Banking);
        assert_eq!(m.description(), None);
        assert_eq!(m.data_sources(), vec!["fdic".to_string()]);

        let dynamic: &dyn Measure = &m;
        assert_eq!(dynamic.to_string(), "Z-score");
        assert!(format!("{dynamic:?}").contains("Banking"));
    }

    #[test]
    fn default_estimate_is_not_implemented() {
        let m = Bare {
            base: MeasureBase::new("unfinished", vec![funda()]),
        };
        match m.estimate(&[]) {
            Err(MeasureError::NotImplemented { measure }) => assert_eq!(measure, "unfinished"),
            other => panic!("expected NotImplemented, got {other:?}"),
        }
    }
}
