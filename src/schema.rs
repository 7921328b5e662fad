//! Schema binding: target Arrow schema to ordered column plan
//!
//! Binding happens once per stream, at construction. Each field resolves to a
//! [`ColumnType`] by exact match and keeps its name for document lookups
//! (documents are looked up by name, never by position, because the source
//! does not guarantee field order) plus its original Arrow type so
//! timezone-annotated timestamp columns round-trip exactly.

use crate::errors::{Result, StreamError};
use crate::types::ColumnType;
use arrow::datatypes::{DataType, Schema};
use std::collections::HashSet;

/// One bound column of the target schema.
#[derive(Debug, Clone)]
pub struct ColumnPlan {
    name: String,
    column_type: ColumnType,
    data_type: DataType,
}

impl ColumnPlan {
    /// Field name used for document lookups.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bound logical column type.
    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    /// The target field's exact Arrow type.
    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }
}

/// Bind every field of the target schema, in schema order.
///
/// Fails on the first unsupported Arrow type or duplicate field name; no
/// rows are read before binding succeeds.
pub fn bind_schema(schema: &Schema) -> Result<Vec<ColumnPlan>> {
    let mut seen = HashSet::with_capacity(schema.fields().len());
    let mut plans = Vec::with_capacity(schema.fields().len());
    for field in schema.fields() {
        if !seen.insert(field.name().clone()) {
            return Err(StreamError::DuplicateField(field.name().clone()));
        }
        plans.push(ColumnPlan {
            name: field.name().clone(),
            column_type: ColumnType::from_arrow(field.data_type())?,
            data_type: field.data_type().clone(),
        });
    }
    Ok(plans)
}
