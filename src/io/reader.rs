//! NetCDF dataset reader.
//!
//! Rebuilds an in-memory `Dataset` from a product file. Scale/offset-packed
//! variables are decoded back to f64 with fill values mapped to NaN, and
//! variables flagged `virtual` come back as lazy derived variables evaluated
//! on first load.
use std::path::Path;

use ndarray::{ArrayD, IxDyn};
use netcdf::AttributeValue;
use tracing::debug;

use crate::core::attributes::{Attributes, RECOGNIZED_KEYS};
use crate::core::data::ArrayData;
use crate::core::dataset::Dataset;
use crate::core::variable::{Encoding, Variable, VariableData};
use crate::error::{Error, Result};
use crate::types::FillValue;

/// Read a product file back into an in-memory dataset.
pub fn open(path: &Path) -> Result<Dataset> {
    let file = netcdf::open(path)?;
    let mut ds = Dataset::new();

    for attr in file.attributes() {
        let name = attr.name().to_string();
        if let Some(value) = super::from_nc_attribute(attr.value()?) {
            ds.set_attribute(&name, value);
        }
    }

    for var in file.variables() {
        let name = var.name();
        if is_virtual(&var)? {
            let expression = attr_str(&var, "expression")?.ok_or(Error::MissingAttribute(
                "expression",
            ))?;
            ds.add_variable(&name, Variable::derived(&expression))?;
            continue;
        }
        let rebuilt = read_stored(&var)?;
        ds.add_variable(&name, rebuilt)?;
    }
    Ok(ds)
}

fn is_virtual(var: &netcdf::Variable) -> Result<bool> {
    Ok(attr_str(var, "virtual")?.as_deref() == Some("true"))
}

fn attr_str(var: &netcdf::Variable, key: &str) -> Result<Option<String>> {
    match var.attribute(key) {
        Some(attr) => match attr.value()? {
            AttributeValue::Str(s) => Ok(Some(s)),
            _ => Ok(None),
        },
        None => Ok(None),
    }
}

fn attr_f64(var: &netcdf::Variable, key: &str) -> Result<Option<f64>> {
    match var.attribute(key) {
        Some(attr) => Ok(super::from_nc_attribute(attr.value()?).and_then(|v| v.as_f64())),
        None => Ok(None),
    }
}

/// The writer always records `_FillValue`; its attribute flavor tells us the
/// on-disk element type without relying on the library's type descriptors.
fn fill_value_of(var: &netcdf::Variable) -> Result<FillValue> {
    let attr = var
        .attribute("_FillValue")
        .ok_or(Error::MissingAttribute("_FillValue"))?;
    let fill = match attr.value()? {
        AttributeValue::Schar(v) => FillValue::I8(v),
        AttributeValue::Uchar(v) => FillValue::U8(v),
        AttributeValue::Short(v) => FillValue::I16(v),
        AttributeValue::Ushort(v) => FillValue::U16(v),
        AttributeValue::Int(v) => FillValue::I32(v),
        AttributeValue::Uint(v) => FillValue::U32(v),
        AttributeValue::Longlong(v) => FillValue::I64(v),
        AttributeValue::Float(v) => FillValue::F32(v),
        AttributeValue::Double(v) => FillValue::F64(v),
        other => {
            return Err(Error::FillValueType {
                fill: format!("{other:?}"),
                dtype: "scalar".to_string(),
            });
        }
    };
    Ok(fill)
}

fn read_stored(var: &netcdf::Variable) -> Result<Variable> {
    let fill = fill_value_of(var)?;
    let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
    let dims: Vec<String> = var.dimensions().iter().map(|d| d.name()).collect();
    let scale = attr_f64(var, "scale_factor")?;
    let offset = attr_f64(var, "add_offset")?;

    let data = if scale.is_some() || offset.is_some() {
        // Packed variable: decode to f64 with fill mapped to NaN.
        let scale = scale.unwrap_or(1.0);
        let offset = offset.unwrap_or(0.0);
        let fill_raw = fill.as_f64();
        let raw: Vec<f64> = var.get_values::<f64, _>(..)?;
        let decoded: Vec<f64> = raw
            .iter()
            .map(|&v| {
                if v == fill_raw {
                    f64::NAN
                } else {
                    v * scale + offset
                }
            })
            .collect();
        ArrayData::F64(ArrayD::from_shape_vec(IxDyn(&shape), decoded)?)
    } else {
        read_native(var, &shape, fill)?
    };

    let mut attrs = Attributes::new();
    for attr in var.attributes() {
        let key = attr.name().to_string();
        if key == "_FillValue" || key == "scale_factor" || key == "add_offset" {
            continue;
        }
        if !RECOGNIZED_KEYS.contains(&key.as_str()) {
            debug!(variable = %var.name(), attribute = %key, "skipping unrecognized attribute");
            continue;
        }
        if let Some(value) = super::from_nc_attribute(attr.value()?) {
            attrs.set(&key, value)?;
        }
    }

    Ok(Variable {
        dims,
        data: VariableData::Stored(data),
        attrs,
        encoding: Encoding {
            dtype: fill.dtype(),
            scale_factor: scale,
            add_offset: offset,
            fill_value: Some(fill),
            chunk_sizes: None,
        },
    })
}

fn read_native(var: &netcdf::Variable, shape: &[usize], fill: FillValue) -> Result<ArrayData> {
    macro_rules! read_as {
        ($ty:ty, $variant:ident) => {{
            let values: Vec<$ty> = var.get_values::<$ty, _>(..)?;
            ArrayData::$variant(ArrayD::from_shape_vec(IxDyn(shape), values)?)
        }};
    }
    let data = match fill {
        FillValue::I8(_) => read_as!(i8, I8),
        FillValue::U8(_) => read_as!(u8, U8),
        FillValue::I16(_) => read_as!(i16, I16),
        FillValue::U16(_) => read_as!(u16, U16),
        FillValue::I32(_) => read_as!(i32, I32),
        FillValue::U32(_) => read_as!(u32, U32),
        FillValue::I64(_) => read_as!(i64, I64),
        FillValue::F32(f) => {
            let values: Vec<f32> = var.get_values::<f32, _>(..)?;
            let mapped: Vec<f32> = values
                .iter()
                .map(|&v| if v == f { f32::NAN } else { v })
                .collect();
            ArrayData::F32(ArrayD::from_shape_vec(IxDyn(shape), mapped)?)
        }
        FillValue::F64(f) => {
            let values: Vec<f64> = var.get_values::<f64, _>(..)?;
            let mapped: Vec<f64> = values
                .iter()
                .map(|&v| if v == f { f64::NAN } else { v })
                .collect();
            ArrayData::F64(ArrayD::from_shape_vec(IxDyn(shape), mapped)?)
        }
    };
    Ok(data)
}
