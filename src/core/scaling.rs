//! Scale/offset range checking for packed variables.
use crate::core::variable::Variable;
use crate::error::{Error, Result};

/// Verify that every value of a scale/offset-encoded variable packs into the
/// representable range of its storage dtype. Fill values (NaN) are skipped.
/// Variables without a scale/offset encoding pass trivially.
pub fn verify_scaling(name: &str, var: &Variable) -> Result<()> {
    let encoding = var.encoding();
    let (scale, offset) = match (encoding.scale_factor, encoding.add_offset) {
        (Some(s), o) => (s, o.unwrap_or(0.0)),
        _ => return Ok(()),
    };
    let (lo, hi) = match encoding.dtype.integer_range() {
        Some(range) => range,
        None => return Ok(()),
    };
    let data = match var.data() {
        Some(d) => d.to_f64(),
        None => return Ok(()),
    };

    let mut packed_min = f64::INFINITY;
    let mut packed_max = f64::NEG_INFINITY;
    for &v in data.iter() {
        if v.is_nan() {
            continue;
        }
        let packed = ((v - offset) / scale).round();
        packed_min = packed_min.min(packed);
        packed_max = packed_max.max(packed);
    }
    if packed_min < lo || packed_max > hi {
        return Err(Error::ScaleRange {
            name: name.to_string(),
            dtype: encoding.dtype.to_string(),
            min: packed_min,
            max: packed_max,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::VariableBuilder;
    use crate::types::{DataType, FillValue};

    #[test]
    fn in_range_data_passes() {
        let mut var = VariableBuilder::new(DataType::F32, &[2, 2], &["y", "x"])
            .unwrap()
            .encoding(DataType::I16, 0.01, 0.0, FillValue::I16(-32767))
            .build()
            .unwrap();
        var.data_mut()
            .unwrap()
            .as_f32_mut()
            .unwrap()
            .fill(100.0);
        verify_scaling("bt", &var).unwrap();
    }

    #[test]
    fn out_of_range_data_is_reported_with_extrema() {
        let mut var = VariableBuilder::new(DataType::F32, &[2, 2], &["y", "x"])
            .unwrap()
            .encoding(DataType::I16, 0.01, 0.0, FillValue::I16(-32767))
            .build()
            .unwrap();
        var.data_mut().unwrap().as_f32_mut().unwrap().fill(400.0);
        let err = verify_scaling("bt", &var).unwrap_err();
        match err {
            Error::ScaleRange { min, max, .. } => {
                assert_eq!(min, 40000.0);
                assert_eq!(max, 40000.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn nan_fill_values_are_ignored() {
        let mut var = VariableBuilder::new(DataType::F32, &[2], &["y"])
            .unwrap()
            .fill_value(FillValue::F32(f32::NAN))
            .encoding(DataType::I16, 0.01, 0.0, FillValue::I16(-32767))
            .build()
            .unwrap();
        var.data_mut().unwrap().as_f32_mut().unwrap()[[0]] = 1.0;
        verify_scaling("bt", &var).unwrap();
    }
}
