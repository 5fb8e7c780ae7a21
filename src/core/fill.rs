//! Default fill values and filled-array allocation.
//!
//! The constants follow the CF-conventions defaults used across the climate
//! data community: floating-point types use the canonical ~9.97e36 sentinel,
//! signed integers use `MIN + 1`, unsigned integers use their maximum.
use ndarray::ArrayD;

use crate::core::data::ArrayData;
use crate::error::{Error, Result};
use crate::types::{DataType, FillValue};

pub const FILL_I8: i8 = -127;
pub const FILL_U8: u8 = u8::MAX;
pub const FILL_I16: i16 = -32767;
pub const FILL_U16: u16 = u16::MAX;
pub const FILL_I32: i32 = -2_147_483_647;
pub const FILL_U32: u32 = u32::MAX;
pub const FILL_I64: i64 = -9_223_372_036_854_775_806;
pub const FILL_F32: f32 = 9.96921e36;
pub const FILL_F64: f64 = 9.969_209_968_386_869e36;

/// The default fill value for an element type.
pub fn default_fill_value(dtype: DataType) -> FillValue {
    match dtype {
        DataType::I8 => FillValue::I8(FILL_I8),
        DataType::U8 => FillValue::U8(FILL_U8),
        DataType::I16 => FillValue::I16(FILL_I16),
        DataType::U16 => FillValue::U16(FILL_U16),
        DataType::I32 => FillValue::I32(FILL_I32),
        DataType::U32 => FillValue::U32(FILL_U32),
        DataType::I64 => FillValue::I64(FILL_I64),
        DataType::F32 => FillValue::F32(FILL_F32),
        DataType::F64 => FillValue::F64(FILL_F64),
    }
}

/// Allocate an array of the given shape, uniformly filled with the type's
/// default fill value or a caller-supplied override of the same type.
pub fn filled(dtype: DataType, shape: &[usize], fill: Option<FillValue>) -> Result<ArrayData> {
    let fill = match fill {
        Some(f) if f.dtype() != dtype => {
            return Err(Error::FillValueType {
                fill: f.dtype().to_string(),
                dtype: dtype.to_string(),
            });
        }
        Some(f) => f,
        None => default_fill_value(dtype),
    };

    let data = match fill {
        FillValue::I8(v) => ArrayData::I8(ArrayD::from_elem(shape, v)),
        FillValue::U8(v) => ArrayData::U8(ArrayD::from_elem(shape, v)),
        FillValue::I16(v) => ArrayData::I16(ArrayD::from_elem(shape, v)),
        FillValue::U16(v) => ArrayData::U16(ArrayD::from_elem(shape, v)),
        FillValue::I32(v) => ArrayData::I32(ArrayD::from_elem(shape, v)),
        FillValue::U32(v) => ArrayData::U32(ArrayD::from_elem(shape, v)),
        FillValue::I64(v) => ArrayData::I64(ArrayD::from_elem(shape, v)),
        FillValue::F32(v) => ArrayData::F32(ArrayD::from_elem(shape, v)),
        FillValue::F64(v) => ArrayData::F64(ArrayD::from_elem(shape, v)),
    };
    Ok(data)
}

/// Allocate a 1-D filled vector.
pub fn default_vector(n: usize, dtype: DataType, fill: Option<FillValue>) -> Result<ArrayData> {
    filled(dtype, &[n], fill)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_fill_constants() {
        assert_eq!(default_fill_value(DataType::I8), FillValue::I8(-127));
        assert_eq!(default_fill_value(DataType::U8), FillValue::U8(255));
        assert_eq!(default_fill_value(DataType::I16), FillValue::I16(-32767));
        assert_eq!(default_fill_value(DataType::U16), FillValue::U16(65535));
        assert_eq!(
            default_fill_value(DataType::I32),
            FillValue::I32(-2147483647)
        );
        assert_eq!(
            default_fill_value(DataType::U32),
            FillValue::U32(4294967295)
        );
        assert_eq!(
            default_fill_value(DataType::I64),
            FillValue::I64(-9223372036854775806)
        );
        assert_eq!(default_fill_value(DataType::F32), FillValue::F32(9.96921e36));
        assert_eq!(
            default_fill_value(DataType::F64),
            FillValue::F64(9.969209968386869e36)
        );
    }

    #[test]
    fn filled_vector_uses_default() {
        let data = default_vector(13, DataType::I16, None).unwrap();
        match data {
            ArrayData::I16(a) => {
                assert_eq!(a.shape(), &[13]);
                assert!(a.iter().all(|&v| v == -32767));
            }
            other => panic!("unexpected dtype: {:?}", other.dtype()),
        }
    }

    #[test]
    fn filled_vector_honors_override() {
        let data = default_vector(4, DataType::U8, Some(FillValue::U8(7))).unwrap();
        match data {
            ArrayData::U8(a) => assert!(a.iter().all(|&v| v == 7)),
            other => panic!("unexpected dtype: {:?}", other.dtype()),
        }
    }

    #[test]
    fn filled_rejects_mismatched_override() {
        let err = filled(DataType::I16, &[2, 2], Some(FillValue::F32(0.0))).unwrap_err();
        assert!(matches!(err, Error::FillValueType { .. }));
    }

    #[test]
    fn filled_allocates_up_to_four_dims() {
        let data = filled(DataType::F32, &[2, 3, 4, 5], None).unwrap();
        assert_eq!(data.shape(), &[2, 3, 4, 5]);
        assert_eq!(data.len(), 120);
    }
}
