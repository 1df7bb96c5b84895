//! Financial research measures.
//!
//! A measure is a named, documented computation (a corporate-finance ratio, a
//! banking risk metric, ...) that declares the datasets it needs and turns one
//! Arrow table per dataset into a result table with column labels.
//!
//! - [`Measure`] - the contract concrete measures implement
//! - [`MeasureBase`] - name, dependencies and [`Category`] held by each measure
//! - [`Dataset`] / [`TableId`] - dependency descriptors
//! - [`Estimation`] - result table plus variable labels
//! - [`MeasureInfo`] - serializable summary for runners and catalogues

pub mod data;
pub mod error;
pub mod measure;

pub use data::model::{Dataset, TableId};
pub use data::table::Table;
pub use error::{MeasureError, Result};
pub use measure::{Category, Estimation, Measure, MeasureBase, MeasureInfo};
