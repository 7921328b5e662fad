//! Typed column sinks: the paired value/default inserter dispatch
//!
//! One [`ColumnSink`] per bound column wraps the matching Arrow builder. The
//! coercion expectation table lives in `append_value`: a present field must
//! hold the column's expected dynamic kind or materialization fails. An
//! absent field goes through `append_default`, which appends the canonical
//! zero/empty value. Both paths are exhaustive matches over the same enum,
//! so adding a column type forces both to be extended together.

use crate::document::{FieldKind, FieldValue};
use crate::errors::{Result, StreamError};
use crate::schema::ColumnPlan;
use crate::types::ColumnType;
use arrow::array::{
    ArrayRef, Date32Builder, Float32Builder, Float64Builder, Int16Builder, Int32Builder,
    Int64Builder, Int8Builder, StringBuilder, TimestampSecondBuilder, UInt16Builder,
    UInt32Builder, UInt64Builder, UInt8Builder,
};
use std::sync::Arc;

const SECONDS_PER_DAY: i64 = 86_400;

/// Append-only typed column under construction.
pub(crate) enum ColumnSink {
    UInt8(UInt8Builder),
    UInt16(UInt16Builder),
    UInt32(UInt32Builder),
    UInt64(UInt64Builder),
    Int8(Int8Builder),
    Int16(Int16Builder),
    Int32(Int32Builder),
    Int64(Int64Builder),
    Float32(Float32Builder),
    Float64(Float64Builder),
    Utf8(StringBuilder),
    Date(Date32Builder),
    DateTime(TimestampSecondBuilder),
}

impl ColumnSink {
    /// Allocate the builder for one bound column. Timestamp builders adopt
    /// the bound field's exact Arrow type so timezone annotations survive
    /// into the produced batch.
    pub(crate) fn for_plan(plan: &ColumnPlan, capacity: usize) -> ColumnSink {
        match plan.column_type() {
            ColumnType::UInt8 => ColumnSink::UInt8(UInt8Builder::with_capacity(capacity)),
            ColumnType::UInt16 => ColumnSink::UInt16(UInt16Builder::with_capacity(capacity)),
            ColumnType::UInt32 => ColumnSink::UInt32(UInt32Builder::with_capacity(capacity)),
            ColumnType::UInt64 => ColumnSink::UInt64(UInt64Builder::with_capacity(capacity)),
            ColumnType::Int8 => ColumnSink::Int8(Int8Builder::with_capacity(capacity)),
            ColumnType::Int16 => ColumnSink::Int16(Int16Builder::with_capacity(capacity)),
            ColumnType::Int32 => ColumnSink::Int32(Int32Builder::with_capacity(capacity)),
            ColumnType::Int64 => ColumnSink::Int64(Int64Builder::with_capacity(capacity)),
            ColumnType::Float32 => ColumnSink::Float32(Float32Builder::with_capacity(capacity)),
            ColumnType::Float64 => ColumnSink::Float64(Float64Builder::with_capacity(capacity)),
            ColumnType::Utf8 => ColumnSink::Utf8(StringBuilder::with_capacity(capacity, 1024)),
            ColumnType::Date => ColumnSink::Date(Date32Builder::with_capacity(capacity)),
            ColumnType::DateTime => ColumnSink::DateTime(
                TimestampSecondBuilder::with_capacity(capacity)
                    .with_data_type(plan.data_type().clone()),
            ),
        }
    }

    /// Append a present field value, validating its dynamic kind against the
    /// column's expectation before coercing.
    pub(crate) fn append_value(&mut self, field: &str, value: &FieldValue) -> Result<()> {
        match self {
            ColumnSink::UInt8(builder) => {
                let flag = value
                    .as_bool()
                    .ok_or_else(|| mismatch(field, FieldKind::Boolean, value))?;
                builder.append_value(flag as u8);
            }
            ColumnSink::UInt16(builder) => {
                builder.append_value(narrow_int(field, value)? as u16);
            }
            ColumnSink::UInt32(builder) => {
                builder.append_value(narrow_int(field, value)? as u32);
            }
            ColumnSink::UInt64(builder) => {
                builder.append_value(wide_int(field, value)? as u64);
            }
            ColumnSink::Int8(builder) => {
                builder.append_value(narrow_int(field, value)? as i8);
            }
            ColumnSink::Int16(builder) => {
                builder.append_value(narrow_int(field, value)? as i16);
            }
            ColumnSink::Int32(builder) => {
                builder.append_value(narrow_int(field, value)?);
            }
            ColumnSink::Int64(builder) => {
                builder.append_value(wide_int(field, value)?);
            }
            ColumnSink::Float32(builder) => {
                builder.append_value(float(field, value)? as f32);
            }
            ColumnSink::Float64(builder) => {
                builder.append_value(float(field, value)?);
            }
            ColumnSink::Utf8(builder) => {
                let text = value
                    .as_str()
                    .ok_or_else(|| mismatch(field, FieldKind::String, value))?;
                builder.append_value(text);
            }
            ColumnSink::Date(builder) => {
                let instant = value
                    .as_datetime()
                    .ok_or_else(|| mismatch(field, FieldKind::DateTime, value))?;
                builder.append_value(instant.timestamp().div_euclid(SECONDS_PER_DAY) as i32);
            }
            ColumnSink::DateTime(builder) => {
                let instant = value
                    .as_datetime()
                    .ok_or_else(|| mismatch(field, FieldKind::DateTime, value))?;
                builder.append_value(instant.timestamp());
            }
        }
        Ok(())
    }

    /// Append the canonical default for an absent field: zero for numeric
    /// and temporal columns, the empty string for Utf8.
    pub(crate) fn append_default(&mut self) {
        // TODO: take per-column defaults from the table definition once schema metadata carries them
        match self {
            ColumnSink::UInt8(builder) => builder.append_value(0),
            ColumnSink::UInt16(builder) => builder.append_value(0),
            ColumnSink::UInt32(builder) => builder.append_value(0),
            ColumnSink::UInt64(builder) => builder.append_value(0),
            ColumnSink::Int8(builder) => builder.append_value(0),
            ColumnSink::Int16(builder) => builder.append_value(0),
            ColumnSink::Int32(builder) => builder.append_value(0),
            ColumnSink::Int64(builder) => builder.append_value(0),
            ColumnSink::Float32(builder) => builder.append_value(0.0),
            ColumnSink::Float64(builder) => builder.append_value(0.0),
            ColumnSink::Utf8(builder) => builder.append_value(""),
            ColumnSink::Date(builder) => builder.append_value(0),
            ColumnSink::DateTime(builder) => builder.append_value(0),
        }
    }

    /// Seal the column into an immutable array.
    pub(crate) fn finish(&mut self) -> ArrayRef {
        match self {
            ColumnSink::UInt8(builder) => Arc::new(builder.finish()),
            ColumnSink::UInt16(builder) => Arc::new(builder.finish()),
            ColumnSink::UInt32(builder) => Arc::new(builder.finish()),
            ColumnSink::UInt64(builder) => Arc::new(builder.finish()),
            ColumnSink::Int8(builder) => Arc::new(builder.finish()),
            ColumnSink::Int16(builder) => Arc::new(builder.finish()),
            ColumnSink::Int32(builder) => Arc::new(builder.finish()),
            ColumnSink::Int64(builder) => Arc::new(builder.finish()),
            ColumnSink::Float32(builder) => Arc::new(builder.finish()),
            ColumnSink::Float64(builder) => Arc::new(builder.finish()),
            ColumnSink::Utf8(builder) => Arc::new(builder.finish()),
            ColumnSink::Date(builder) => Arc::new(builder.finish()),
            ColumnSink::DateTime(builder) => Arc::new(builder.finish()),
        }
    }
}

fn mismatch(field: &str, expected: FieldKind, value: &FieldValue) -> StreamError {
    StreamError::type_mismatch(field, expected, value.kind())
}

/// Narrow (32-bit) integer read of a numeric source.
fn narrow_int(field: &str, value: &FieldValue) -> Result<i32> {
    value
        .as_i32()
        .ok_or_else(|| mismatch(field, FieldKind::Number, value))
}

/// Wide (64-bit) integer read of a numeric source.
fn wide_int(field: &str, value: &FieldValue) -> Result<i64> {
    value
        .as_i64()
        .ok_or_else(|| mismatch(field, FieldKind::Number, value))
}

/// Floating-point read of a numeric source.
fn float(field: &str, value: &FieldValue) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| mismatch(field, FieldKind::Number, value))
}
