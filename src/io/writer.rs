//! NetCDF dataset writer.
//!
//! Applies a uniform deflate configuration to every variable, then overlays
//! the per-variable encoding recorded by the builders: chunk shape, on-disk
//! dtype, scale/offset packing, and fill value. Float arrays hold NaN for
//! missing pixels in memory; the writer substitutes the encoding fill value
//! on the way out.
use std::path::Path;

use netcdf::AttributeValue;
use tracing::info;

use crate::core::data::ArrayData;
use crate::core::dataset::Dataset;
use crate::core::fill::{default_fill_value, FILL_F64};
use crate::core::variable::Variable;
use crate::error::{Error, Result};
use crate::types::{DataType, FillValue};

/// Default deflate level applied to every variable.
pub const DEFAULT_COMPRESSION: i32 = 5;

/// Serialize `ds` to a NetCDF file at `path`.
///
/// Fails if `path` exists and `overwrite` is false; with `overwrite` the
/// existing file is removed first. The mandatory global attributes must be
/// set before writing.
pub fn write(ds: &Dataset, path: &Path, compression_level: i32, overwrite: bool) -> Result<()> {
    // Validate before touching the filesystem so a rejected dataset never
    // removes a previously written file.
    ds.ensure_mandatory_attributes()?;
    if path.exists() {
        if !overwrite {
            return Err(Error::FileExists {
                path: path.display().to_string(),
            });
        }
        std::fs::remove_file(path)?;
    }

    let mut file = netcdf::create(path)?;
    for (key, value) in ds.attributes() {
        file.add_attribute(key, super::to_nc_attribute(value))?;
    }
    for (dim, len) in ds.dimensions() {
        file.add_dimension(dim, len)?;
    }
    for (name, var) in ds.variables() {
        write_variable(&mut file, name, var, compression_level)?;
    }
    info!(path = %path.display(), variables = ds.len(), "wrote dataset");
    Ok(())
}

fn write_variable(
    file: &mut netcdf::FileMut,
    name: &str,
    var: &Variable,
    level: i32,
) -> Result<()> {
    let data = match var.data() {
        Some(data) => data,
        None => return write_virtual(file, name, var),
    };
    let dims: Vec<&str> = var.dims().iter().map(String::as_str).collect();

    let enc = var.encoding();
    let fill = enc.fill_value.unwrap_or_else(|| default_fill_value(enc.dtype));
    let mut attrs: Vec<(String, AttributeValue)> = var
        .attrs()
        .iter()
        .filter(|(key, _)| *key != "scale_factor" && *key != "add_offset")
        .map(|(key, value)| (key.to_string(), super::to_nc_attribute(value)))
        .collect();
    if let Some(scale) = enc.scale_factor {
        attrs.push(("scale_factor".to_string(), AttributeValue::Double(scale)));
    }
    if let Some(offset) = enc.add_offset {
        attrs.push(("add_offset".to_string(), AttributeValue::Double(offset)));
    }
    let chunks = clamped_chunks(enc.chunk_sizes.as_deref(), data.shape());

    if enc.dtype != data.dtype() {
        // Pack float values into the integer storage type; NaN becomes the
        // fill value directly, skipping the scale/offset arithmetic.
        crate::core::scaling::verify_scaling(name, var)?;
        let scale = enc.scale_factor.unwrap_or(1.0);
        let offset = enc.add_offset.unwrap_or(0.0);
        let packed: Vec<f64> = data
            .to_f64()
            .iter()
            .map(|&v| {
                if v.is_nan() {
                    fill.as_f64()
                } else {
                    ((v - offset) / scale).round()
                }
            })
            .collect();
        macro_rules! put_packed {
            ($ty:ty, $f:expr) => {{
                let values: Vec<$ty> = packed.iter().map(|&v| v as $ty).collect();
                put_variable(file, name, &dims, &values, $f, level, chunks.as_deref(), &attrs)
            }};
        }
        match (enc.dtype, fill) {
            (DataType::I8, FillValue::I8(f)) => put_packed!(i8, f),
            (DataType::U8, FillValue::U8(f)) => put_packed!(u8, f),
            (DataType::I16, FillValue::I16(f)) => put_packed!(i16, f),
            (DataType::U16, FillValue::U16(f)) => put_packed!(u16, f),
            (DataType::I32, FillValue::I32(f)) => put_packed!(i32, f),
            (DataType::U32, FillValue::U32(f)) => put_packed!(u32, f),
            (DataType::I64, FillValue::I64(f)) => put_packed!(i64, f),
            _ => Err(Error::FillValueType {
                fill: fill.dtype().to_string(),
                dtype: enc.dtype.to_string(),
            }),
        }
    } else {
        macro_rules! put_native {
            ($a:expr, $f:expr) => {{
                let values: Vec<_> = $a.iter().copied().collect();
                put_variable(file, name, &dims, &values, $f, level, chunks.as_deref(), &attrs)
            }};
        }
        match (data, fill) {
            (ArrayData::I8(a), FillValue::I8(f)) => put_native!(a, f),
            (ArrayData::U8(a), FillValue::U8(f)) => put_native!(a, f),
            (ArrayData::I16(a), FillValue::I16(f)) => put_native!(a, f),
            (ArrayData::U16(a), FillValue::U16(f)) => put_native!(a, f),
            (ArrayData::I32(a), FillValue::I32(f)) => put_native!(a, f),
            (ArrayData::U32(a), FillValue::U32(f)) => put_native!(a, f),
            (ArrayData::I64(a), FillValue::I64(f)) => put_native!(a, f),
            (ArrayData::F32(a), FillValue::F32(f)) => {
                let values: Vec<f32> = a.iter().map(|&v| if v.is_nan() { f } else { v }).collect();
                put_variable(file, name, &dims, &values, f, level, chunks.as_deref(), &attrs)
            }
            (ArrayData::F64(a), FillValue::F64(f)) => {
                let values: Vec<f64> = a.iter().map(|&v| if v.is_nan() { f } else { v }).collect();
                put_variable(file, name, &dims, &values, f, level, chunks.as_deref(), &attrs)
            }
            _ => Err(Error::FillValueType {
                fill: fill.dtype().to_string(),
                dtype: data.dtype().to_string(),
            }),
        }
    }
}

/// A virtual variable serializes as a scalar placeholder: the expression and
/// marker attributes carry the semantics, the value is a fill.
fn write_virtual(file: &mut netcdf::FileMut, name: &str, var: &Variable) -> Result<()> {
    let mut nc_var = file.add_variable::<f64>(name, &[])?;
    for (key, value) in var.attrs().iter() {
        nc_var.put_attribute(key, super::to_nc_attribute(value))?;
    }
    nc_var.put_values(&[FILL_F64], ..)?;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn put_variable<T: netcdf::NcTypeDescriptor + Copy>(
    file: &mut netcdf::FileMut,
    name: &str,
    dims: &[&str],
    values: &[T],
    fill: T,
    level: i32,
    chunks: Option<&[usize]>,
    attrs: &[(String, AttributeValue)],
) -> Result<()> {
    let mut var = file.add_variable::<T>(name, dims)?;
    var.set_compression(level, true)?;
    if let Some(chunks) = chunks {
        var.set_chunking(chunks)?;
    }
    var.set_fill_value(fill)?;
    for (key, value) in attrs {
        var.put_attribute(key, value.clone())?;
    }
    var.put_values(values, ..)?;
    Ok(())
}

/// Chunk shapes configured by the templates describe full-size products;
/// clamp each axis to the actual dimension length.
fn clamped_chunks(chunks: Option<&[usize]>, shape: &[usize]) -> Option<Vec<usize>> {
    let chunks = chunks?;
    if chunks.len() != shape.len() {
        return None;
    }
    Some(
        chunks
            .iter()
            .zip(shape)
            .map(|(&chunk, &len)| chunk.min(len).max(1))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunks_are_clamped_to_the_grid() {
        assert_eq!(
            clamped_chunks(Some(&[1280, 409]), &[100, 409]),
            Some(vec![100, 409])
        );
        assert_eq!(
            clamped_chunks(Some(&[500, 500]), &[5000, 5000]),
            Some(vec![500, 500])
        );
    }

    #[test]
    fn mismatched_chunk_rank_is_dropped() {
        assert_eq!(clamped_chunks(Some(&[10, 512, 56]), &[4, 56]), None);
        assert_eq!(clamped_chunks(None, &[4, 56]), None);
    }
}
