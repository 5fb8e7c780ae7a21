//! Typed n-dimensional array container backing every stored variable.
use ndarray::ArrayD;

use crate::types::DataType;

/// An n-dimensional array with one of the supported element types.
#[derive(Clone, Debug, PartialEq)]
pub enum ArrayData {
    I8(ArrayD<i8>),
    U8(ArrayD<u8>),
    I16(ArrayD<i16>),
    U16(ArrayD<u16>),
    I32(ArrayD<i32>),
    U32(ArrayD<u32>),
    I64(ArrayD<i64>),
    F32(ArrayD<f32>),
    F64(ArrayD<f64>),
}

impl ArrayData {
    pub fn dtype(&self) -> DataType {
        match self {
            ArrayData::I8(_) => DataType::I8,
            ArrayData::U8(_) => DataType::U8,
            ArrayData::I16(_) => DataType::I16,
            ArrayData::U16(_) => DataType::U16,
            ArrayData::I32(_) => DataType::I32,
            ArrayData::U32(_) => DataType::U32,
            ArrayData::I64(_) => DataType::I64,
            ArrayData::F32(_) => DataType::F32,
            ArrayData::F64(_) => DataType::F64,
        }
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            ArrayData::I8(a) => a.shape(),
            ArrayData::U8(a) => a.shape(),
            ArrayData::I16(a) => a.shape(),
            ArrayData::U16(a) => a.shape(),
            ArrayData::I32(a) => a.shape(),
            ArrayData::U32(a) => a.shape(),
            ArrayData::I64(a) => a.shape(),
            ArrayData::F32(a) => a.shape(),
            ArrayData::F64(a) => a.shape(),
        }
    }

    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.shape().iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lossy conversion to an f64 array, used by the expression evaluator
    /// and the scale/offset packer.
    pub fn to_f64(&self) -> ArrayD<f64> {
        match self {
            ArrayData::I8(a) => a.mapv(|v| v as f64),
            ArrayData::U8(a) => a.mapv(|v| v as f64),
            ArrayData::I16(a) => a.mapv(|v| v as f64),
            ArrayData::U16(a) => a.mapv(|v| v as f64),
            ArrayData::I32(a) => a.mapv(|v| v as f64),
            ArrayData::U32(a) => a.mapv(|v| v as f64),
            ArrayData::I64(a) => a.mapv(|v| v as f64),
            ArrayData::F32(a) => a.mapv(|v| v as f64),
            ArrayData::F64(a) => a.clone(),
        }
    }

    pub fn as_u8(&self) -> Option<&ArrayD<u8>> {
        match self {
            ArrayData::U8(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_u8_mut(&mut self) -> Option<&mut ArrayD<u8>> {
        match self {
            ArrayData::U8(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<&ArrayD<u32>> {
        match self {
            ArrayData::U32(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<&ArrayD<f32>> {
        match self {
            ArrayData::F32(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_f32_mut(&mut self) -> Option<&mut ArrayD<f32>> {
        match self {
            ArrayData::F32(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<&ArrayD<f64>> {
        match self {
            ArrayData::F64(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_f64_mut(&mut self) -> Option<&mut ArrayD<f64>> {
        match self {
            ArrayData::F64(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_i16_mut(&mut self) -> Option<&mut ArrayD<i16>> {
        match self {
            ArrayData::I16(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_i32_mut(&mut self) -> Option<&mut ArrayD<i32>> {
        match self {
            ArrayData::I32(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_u32_mut(&mut self) -> Option<&mut ArrayD<u32>> {
        match self {
            ArrayData::U32(a) => Some(a),
            _ => None,
        }
    }
}
