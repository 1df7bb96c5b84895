//! The measure contract: classification, dependency declaration and the
//! `estimate` entry point shared by every measure.

pub mod base;
pub mod category;
pub mod estimation;
pub mod info;

pub use base::{Measure, MeasureBase};
pub use category::Category;
pub use estimation::Estimation;
pub use info::MeasureInfo;
