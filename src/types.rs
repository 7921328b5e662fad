//! ColumnType - the closed set of supported target column types
//!
//! The stream understands exactly these logical column types. Binding a
//! target schema resolves every Arrow field to one of them by exact match;
//! any other Arrow type is rejected up front, at construction, never per row.
//! Each type knows the dynamic source kind a document field must hold for it
//! and its canonical Arrow type.

use crate::document::FieldKind;
use crate::errors::{Result, StreamError};
use arrow::datatypes::{DataType, TimeUnit};
use std::fmt;

/// Supported target column types.
///
/// UInt8 is the boolean-flag column: it takes a boolean source stored as 0/1,
/// not general 8-bit numeric ingestion. Date is day resolution (Arrow
/// `Date32`), DateTime second resolution (Arrow `Timestamp(Second, _)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// 8-bit unsigned, fed from boolean sources as 0/1
    UInt8,

    /// 16-bit unsigned
    UInt16,

    /// 32-bit unsigned
    UInt32,

    /// 64-bit unsigned
    UInt64,

    /// 8-bit signed
    Int8,

    /// 16-bit signed
    Int16,

    /// 32-bit signed
    Int32,

    /// 64-bit signed
    Int64,

    /// 32-bit floating point
    Float32,

    /// 64-bit floating point
    Float64,

    /// UTF-8 string
    Utf8,

    /// Calendar day (days since epoch)
    Date,

    /// Instant at second resolution (seconds since epoch)
    DateTime,
}

impl ColumnType {
    /// Resolve an Arrow type by exact match.
    ///
    /// Arrow `Boolean` is intentionally not a target: boolean flags travel as
    /// UInt8 columns, keeping a single boolean path. Timestamps bind at
    /// second resolution with any timezone annotation.
    pub fn from_arrow(data_type: &DataType) -> Result<Self> {
        match data_type {
            DataType::UInt8 => Ok(ColumnType::UInt8),
            DataType::UInt16 => Ok(ColumnType::UInt16),
            DataType::UInt32 => Ok(ColumnType::UInt32),
            DataType::UInt64 => Ok(ColumnType::UInt64),
            DataType::Int8 => Ok(ColumnType::Int8),
            DataType::Int16 => Ok(ColumnType::Int16),
            DataType::Int32 => Ok(ColumnType::Int32),
            DataType::Int64 => Ok(ColumnType::Int64),
            DataType::Float32 => Ok(ColumnType::Float32),
            DataType::Float64 => Ok(ColumnType::Float64),
            DataType::Utf8 => Ok(ColumnType::Utf8),
            DataType::Date32 => Ok(ColumnType::Date),
            DataType::Timestamp(TimeUnit::Second, _) => Ok(ColumnType::DateTime),
            other => Err(StreamError::UnsupportedColumnType(other.clone())),
        }
    }

    /// Canonical Arrow type (timestamps without a timezone annotation).
    pub fn arrow_type(&self) -> DataType {
        match self {
            ColumnType::UInt8 => DataType::UInt8,
            ColumnType::UInt16 => DataType::UInt16,
            ColumnType::UInt32 => DataType::UInt32,
            ColumnType::UInt64 => DataType::UInt64,
            ColumnType::Int8 => DataType::Int8,
            ColumnType::Int16 => DataType::Int16,
            ColumnType::Int32 => DataType::Int32,
            ColumnType::Int64 => DataType::Int64,
            ColumnType::Float32 => DataType::Float32,
            ColumnType::Float64 => DataType::Float64,
            ColumnType::Utf8 => DataType::Utf8,
            ColumnType::Date => DataType::Date32,
            ColumnType::DateTime => DataType::Timestamp(TimeUnit::Second, None),
        }
    }

    /// The dynamic source kind a document field must hold for this column.
    pub fn expected_kind(&self) -> FieldKind {
        match self {
            ColumnType::UInt8 => FieldKind::Boolean,
            ColumnType::UInt16
            | ColumnType::UInt32
            | ColumnType::UInt64
            | ColumnType::Int8
            | ColumnType::Int16
            | ColumnType::Int32
            | ColumnType::Int64
            | ColumnType::Float32
            | ColumnType::Float64 => FieldKind::Number,
            ColumnType::Utf8 => FieldKind::String,
            ColumnType::Date | ColumnType::DateTime => FieldKind::DateTime,
        }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::UInt8 => "UInt8",
            ColumnType::UInt16 => "UInt16",
            ColumnType::UInt32 => "UInt32",
            ColumnType::UInt64 => "UInt64",
            ColumnType::Int8 => "Int8",
            ColumnType::Int16 => "Int16",
            ColumnType::Int32 => "Int32",
            ColumnType::Int64 => "Int64",
            ColumnType::Float32 => "Float32",
            ColumnType::Float64 => "Float64",
            ColumnType::Utf8 => "Utf8",
            ColumnType::Date => "Date",
            ColumnType::DateTime => "DateTime",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_arrow_supported_types() {
        assert_eq!(ColumnType::from_arrow(&DataType::UInt8).unwrap(), ColumnType::UInt8);
        assert_eq!(ColumnType::from_arrow(&DataType::UInt16).unwrap(), ColumnType::UInt16);
        assert_eq!(ColumnType::from_arrow(&DataType::UInt32).unwrap(), ColumnType::UInt32);
        assert_eq!(ColumnType::from_arrow(&DataType::UInt64).unwrap(), ColumnType::UInt64);
        assert_eq!(ColumnType::from_arrow(&DataType::Int8).unwrap(), ColumnType::Int8);
        assert_eq!(ColumnType::from_arrow(&DataType::Int16).unwrap(), ColumnType::Int16);
        assert_eq!(ColumnType::from_arrow(&DataType::Int32).unwrap(), ColumnType::Int32);
        assert_eq!(ColumnType::from_arrow(&DataType::Int64).unwrap(), ColumnType::Int64);
        assert_eq!(ColumnType::from_arrow(&DataType::Float32).unwrap(), ColumnType::Float32);
        assert_eq!(ColumnType::from_arrow(&DataType::Float64).unwrap(), ColumnType::Float64);
        assert_eq!(ColumnType::from_arrow(&DataType::Utf8).unwrap(), ColumnType::Utf8);
        assert_eq!(ColumnType::from_arrow(&DataType::Date32).unwrap(), ColumnType::Date);
        assert_eq!(
            ColumnType::from_arrow(&DataType::Timestamp(TimeUnit::Second, None)).unwrap(),
            ColumnType::DateTime
        );
    }

    #[test]
    fn test_int64_and_float64_bind_independently() {
        let wide = ColumnType::from_arrow(&DataType::Int64).unwrap();
        let float = ColumnType::from_arrow(&DataType::Float64).unwrap();
        assert_eq!(wide, ColumnType::Int64);
        assert_eq!(float, ColumnType::Float64);
        assert_ne!(wide, float);
        assert_eq!(wide.expected_kind(), FieldKind::Number);
        assert_eq!(float.expected_kind(), FieldKind::Number);
    }

    #[test]
    fn test_from_arrow_unsupported_types() {
        let unsupported = vec![
            DataType::Boolean,
            DataType::Date64,
            DataType::LargeUtf8,
            DataType::Binary,
            DataType::Timestamp(TimeUnit::Millisecond, None),
            DataType::Timestamp(TimeUnit::Microsecond, None),
            DataType::Null,
        ];
        for data_type in unsupported {
            let err = ColumnType::from_arrow(&data_type).unwrap_err();
            assert!(
                err.to_string().contains(&format!("{}", data_type)),
                "error should name the offending type: {}",
                err
            );
        }
    }

    #[test]
    fn test_timestamp_binds_with_any_timezone() {
        let zoned = DataType::Timestamp(TimeUnit::Second, Some("UTC".into()));
        assert_eq!(ColumnType::from_arrow(&zoned).unwrap(), ColumnType::DateTime);
    }

    #[test]
    fn test_arrow_type_round_trip() {
        let all = vec![
            ColumnType::UInt8,
            ColumnType::UInt16,
            ColumnType::UInt32,
            ColumnType::UInt64,
            ColumnType::Int8,
            ColumnType::Int16,
            ColumnType::Int32,
            ColumnType::Int64,
            ColumnType::Float32,
            ColumnType::Float64,
            ColumnType::Utf8,
            ColumnType::Date,
            ColumnType::DateTime,
        ];
        for column_type in all {
            let round_tripped = ColumnType::from_arrow(&column_type.arrow_type()).unwrap();
            assert_eq!(round_tripped, column_type);
        }
    }

    #[test]
    fn test_expected_kinds() {
        assert_eq!(ColumnType::UInt8.expected_kind(), FieldKind::Boolean);
        assert_eq!(ColumnType::UInt16.expected_kind(), FieldKind::Number);
        assert_eq!(ColumnType::Int64.expected_kind(), FieldKind::Number);
        assert_eq!(ColumnType::Float32.expected_kind(), FieldKind::Number);
        assert_eq!(ColumnType::Utf8.expected_kind(), FieldKind::String);
        assert_eq!(ColumnType::Date.expected_kind(), FieldKind::DateTime);
        assert_eq!(ColumnType::DateTime.expected_kind(), FieldKind::DateTime);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(ColumnType::UInt8.to_string(), "UInt8");
        assert_eq!(ColumnType::Utf8.to_string(), "Utf8");
        assert_eq!(ColumnType::DateTime.to_string(), "DateTime");
    }
}
