//! Shared types and enums used across the crate.
//! Includes the numeric element types a variable may carry (`DataType`),
//! the product variant selectors (`ProductVariant`, `ProductLevel`), and
//! the typed fill-value wrapper (`FillValue`).
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Numeric element types supported by variables and their on-disk encodings.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
pub enum DataType {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    F32,
    F64,
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DataType::I8 => "int8",
            DataType::U8 => "uint8",
            DataType::I16 => "int16",
            DataType::U16 => "uint16",
            DataType::I32 => "int32",
            DataType::U32 => "uint32",
            DataType::I64 => "int64",
            DataType::F32 => "float32",
            DataType::F64 => "float64",
        };
        write!(f, "{}", s)
    }
}

impl DataType {
    /// Whether values of this type are floating point.
    pub fn is_float(&self) -> bool {
        matches!(self, DataType::F32 | DataType::F64)
    }

    /// Smallest and largest value representable by an integer type.
    /// Returns `None` for floating-point types.
    pub fn integer_range(&self) -> Option<(f64, f64)> {
        match self {
            DataType::I8 => Some((i8::MIN as f64, i8::MAX as f64)),
            DataType::U8 => Some((0.0, u8::MAX as f64)),
            DataType::I16 => Some((i16::MIN as f64, i16::MAX as f64)),
            DataType::U16 => Some((0.0, u16::MAX as f64)),
            DataType::I32 => Some((i32::MIN as f64, i32::MAX as f64)),
            DataType::U32 => Some((0.0, u32::MAX as f64)),
            DataType::I64 => Some((i64::MIN as f64, i64::MAX as f64)),
            DataType::F32 | DataType::F64 => None,
        }
    }
}

/// A fill value carrying its own element type.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum FillValue {
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    F32(f32),
    F64(f64),
}

impl FillValue {
    pub fn dtype(&self) -> DataType {
        match self {
            FillValue::I8(_) => DataType::I8,
            FillValue::U8(_) => DataType::U8,
            FillValue::I16(_) => DataType::I16,
            FillValue::U16(_) => DataType::U16,
            FillValue::I32(_) => DataType::I32,
            FillValue::U32(_) => DataType::U32,
            FillValue::I64(_) => DataType::I64,
            FillValue::F32(_) => DataType::F32,
            FillValue::F64(_) => DataType::F64,
        }
    }

    /// Lossy view of the fill value as f64, used for packing float data.
    pub fn as_f64(&self) -> f64 {
        match *self {
            FillValue::I8(v) => v as f64,
            FillValue::U8(v) => v as f64,
            FillValue::I16(v) => v as f64,
            FillValue::U16(v) => v as f64,
            FillValue::I32(v) => v as f64,
            FillValue::U32(v) => v as f64,
            FillValue::I64(v) => v as f64,
            FillValue::F32(v) => v as f64,
            FillValue::F64(v) => v,
        }
    }
}

impl std::fmt::Display for FillValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            FillValue::I8(v) => write!(f, "{v}"),
            FillValue::U8(v) => write!(f, "{v}"),
            FillValue::I16(v) => write!(f, "{v}"),
            FillValue::U16(v) => write!(f, "{v}"),
            FillValue::I32(v) => write!(f, "{v}"),
            FillValue::U32(v) => write!(f, "{v}"),
            FillValue::I64(v) => write!(f, "{v}"),
            FillValue::F32(v) => write!(f, "{v}"),
            FillValue::F64(v) => write!(f, "{v}"),
        }
    }
}

/// FCDR template variant selecting which variable catalog is populated.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
pub enum ProductVariant {
    /// The sensor's original level-1 variable set.
    Original,
    /// Reduced, aggregated uncertainty breakdown.
    Easy,
    /// Complete per-effect uncertainty budget.
    Full,
}

impl std::fmt::Display for ProductVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductVariant::Original => write!(f, "Original"),
            ProductVariant::Easy => write!(f, "Easy"),
            ProductVariant::Full => write!(f, "Full"),
        }
    }
}

/// Processing-level token used in output file names.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
pub enum ProductLevel {
    L2,
    L3,
    Easy,
    Full,
    Ensemble,
}

impl std::fmt::Display for ProductLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ProductLevel::L2 => "L2",
            ProductLevel::L3 => "L3",
            ProductLevel::Easy => "EASY",
            ProductLevel::Full => "FULL",
            ProductLevel::Ensemble => "ENSEMBLE",
        };
        write!(f, "{}", s)
    }
}
