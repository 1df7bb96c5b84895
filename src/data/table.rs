use arrow::array::{Array, ArrayRef, AsArray, BooleanArray, Int32Array, Int64Array};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::record_batch::RecordBatch;

use crate::error::{MeasureError, Result};
use crate::measure::Measure;

/// One input or output table. Columns are named and typed; each row is one
/// observation.
pub type Table = RecordBatch;

// ---------------------------------------------------------------------------
// Input shape
// ---------------------------------------------------------------------------

/// Check that `inputs` holds exactly one table per dataset the measure requires.
pub fn ensure_input_count(measure: &dyn Measure, inputs: &[Table]) -> Result<()> {
    let expected = measure.datasets_required().len();
    if inputs.len() != expected {
        return Err(MeasureError::InputCount {
            measure: measure.identifier().into_owned(),
            expected,
            found: inputs.len(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Column access
// ---------------------------------------------------------------------------

/// Look up a column by name.
pub fn column<'a>(table: &'a Table, name: &str) -> Result<&'a ArrayRef> {
    table
        .column_by_name(name)
        .ok_or_else(|| MeasureError::MissingColumn {
            column: name.to_string(),
        })
}

/// Read a numeric column as `f64`; nulls become `None`.
///
/// `Float32` and `Int32` convert exactly. `Int64` magnitudes above 2^53 round
/// to the nearest representable `f64`; use [`i64_column`] for exact values.
pub fn f64_column(table: &Table, name: &str) -> Result<Vec<Option<f64>>> {
    let col = column(table, name)?;
    let values: Vec<Option<f64>> = match col.data_type() {
        DataType::Float64 => col.as_primitive::<Float64Type>().iter().collect(),
        DataType::Float32 => col
            .as_primitive::<Float32Type>()
            .iter()
            .map(|v| v.map(f64::from))
            .collect(),
        DataType::Int64 => col
            .as_primitive::<Int64Type>()
            .iter()
            .map(|v| v.map(|i| i as f64))
            .collect(),
        DataType::Int32 => col
            .as_primitive::<Int32Type>()
            .iter()
            .map(|v| v.map(f64::from))
            .collect(),
        other => return Err(type_mismatch(name, "a numeric type", other)),
    };
    Ok(values)
}

/// Read an integer column as `i64`.
pub fn i64_column(table: &Table, name: &str) -> Result<Vec<Option<i64>>> {
    let col = column(table, name)?;
    match col.data_type() {
        DataType::Int64 => Ok(downcast::<Int64Array>(col, name, "Int64")?.iter().collect()),
        DataType::Int32 => Ok(downcast::<Int32Array>(col, name, "Int32")?
            .iter()
            .map(|v| v.map(i64::from))
            .collect()),
        other => Err(type_mismatch(name, "Int32 or Int64", other)),
    }
}

/// Read a string column. Both `Utf8` and `LargeUtf8` are accepted.
pub fn str_column(table: &Table, name: &str) -> Result<Vec<Option<String>>> {
    let col = column(table, name)?;
    match col.data_type() {
        DataType::Utf8 => Ok(col
            .as_string::<i32>()
            .iter()
            .map(|v| v.map(str::to_string))
            .collect()),
        DataType::LargeUtf8 => Ok(col
            .as_string::<i64>()
            .iter()
            .map(|v| v.map(str::to_string))
            .collect()),
        other => Err(type_mismatch(name, "Utf8 or LargeUtf8", other)),
    }
}

pub fn bool_column(table: &Table, name: &str) -> Result<Vec<Option<bool>>> {
    let col = column(table, name)?;
    Ok(downcast::<BooleanArray>(col, name, "Boolean")?.iter().collect())
}

// -- helpers --

fn downcast<'a, A: Array + 'static>(
    col: &'a ArrayRef,
    name: &str,
    expected: &'static str,
) -> Result<&'a A> {
    col.as_any()
        .downcast_ref::<A>()
        .ok_or_else(|| type_mismatch(name, expected, col.data_type()))
}

fn type_mismatch(name: &str, expected: &'static str, found: &DataType) -> MeasureError {
    log::debug!("column '{name}' rejected: {found:?} is not {expected}");
    MeasureError::ColumnType {
        column: name.to_string(),
        expected,
        found: found.clone(),
    }
}
