//! Data layer: dataset descriptors and typed access to input tables.
//!
//! Architecture:
//! ```text
//!   Dataset (source, library, table, vars)
//!        │  declared by each measure
//!        ▼
//!   ┌──────────┐
//!   │  model    │  TableId / Dataset descriptors
//!   └──────────┘
//!        │  caller loads one Table per Dataset
//!        ▼
//!   ┌──────────┐
//!   │  table    │  RecordBatch → typed column vectors
//!   └──────────┘
//! ```

pub mod model;
pub mod table;
