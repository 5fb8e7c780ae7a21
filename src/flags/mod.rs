//! Global quality-flag aggregation.
//!
//! Every product carries the small 8-bit global quality bitmask; each sensor
//! family folds its private flag variables into it through a fixed bit table.
//! Mappers only ever set bits, so applying one twice is a no-op.
use ndarray::ArrayD;

use crate::core::data::ArrayData;
use crate::core::dataset::Dataset;
use crate::error::{Error, Result};

pub mod avhrr;
pub mod hirs;
pub mod mviri;

/// Global quality bits, identical across every product family.
pub const INVALID: u8 = 1;
pub const USE_WITH_CAUTION: u8 = 2;
pub const INVALID_INPUT: u8 = 4;
pub const INVALID_GEOLOC: u8 = 8;
pub const INVALID_TIME: u8 = 16;
pub const SENSOR_ERROR: u8 = 32;
pub const PADDED_DATA: u8 = 64;
pub const INCOMPLETE_CHANNEL_DATA: u8 = 128;

pub const GLOBAL_FLAG_MASKS: [u8; 8] = [
    INVALID,
    USE_WITH_CAUTION,
    INVALID_INPUT,
    INVALID_GEOLOC,
    INVALID_TIME,
    SENSOR_ERROR,
    PADDED_DATA,
    INCOMPLETE_CHANNEL_DATA,
];

pub const GLOBAL_FLAG_MEANINGS: &str = "invalid use_with_caution invalid_input \
invalid_geoloc invalid_time sensor_error padded_data incomplete_channel_data";

/// Name of the global quality-flag variable present in every product.
pub const GLOBAL_FLAG_VARIABLE: &str = "quality_pixel_bitmask";

/// Folds sensor-specific quality flags into the global bitmask.
pub trait FlagMapper: Sync {
    fn map_global_flags(&self, ds: &mut Dataset) -> Result<()>;
}

/// No-op mapper for sensors without a private flag layer.
pub struct DefaultFlagMapper;

impl FlagMapper for DefaultFlagMapper {
    fn map_global_flags(&self, _ds: &mut Dataset) -> Result<()> {
        Ok(())
    }
}

static DEFAULT: DefaultFlagMapper = DefaultFlagMapper;
static AVHRR: avhrr::AvhrrFlagMapper = avhrr::AvhrrFlagMapper;
static HIRS: hirs::HirsFlagMapper = hirs::HirsFlagMapper;
static MVIRI: mviri::MviriFlagMapper = mviri::MviriFlagMapper;

/// Look up the mapper for a template key; unmapped sensors get the no-op.
pub fn get_flag_mapper(template_key: &str) -> &'static dyn FlagMapper {
    match template_key {
        "AVHRR" => &AVHRR,
        "HIRS2" | "HIRS3" | "HIRS4" => &HIRS,
        "MVIRI" => &MVIRI,
        _ => &DEFAULT,
    }
}

/// Read a flag variable as a u32 bit array.
pub(crate) fn read_bitmask(ds: &Dataset, name: &str) -> Result<ArrayD<u32>> {
    let data = ds
        .variable(name)
        .and_then(|v| v.data())
        .ok_or_else(|| Error::NoSuchVariable(name.to_string()))?;
    match data {
        ArrayData::U8(a) => Ok(a.mapv(|v| v as u32)),
        ArrayData::U16(a) => Ok(a.mapv(|v| v as u32)),
        ArrayData::U32(a) => Ok(a.clone()),
        ArrayData::I32(a) => Ok(a.mapv(|v| v as u32)),
        other => Err(Error::InvalidArgument {
            arg: "bitmask dtype",
            value: other.dtype().to_string(),
        }),
    }
}

/// OR mapped global bits into the pixel bitmask wherever a source bit is set.
/// Source and target must share the per-pixel shape.
pub(crate) fn apply_pixel_table(
    ds: &mut Dataset,
    source_name: &str,
    table: &[(u32, u8)],
) -> Result<()> {
    let source = read_bitmask(ds, source_name)?;
    let target = ds
        .variable_mut(GLOBAL_FLAG_VARIABLE)
        .and_then(|v| v.data_mut())
        .and_then(ArrayData::as_u8_mut)
        .ok_or_else(|| Error::NoSuchVariable(GLOBAL_FLAG_VARIABLE.to_string()))?;
    for (dst, &src_bits) in target.iter_mut().zip(source.iter()) {
        for &(src_bit, global_bit) in table {
            if src_bits & src_bit != 0 {
                *dst |= global_bit;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_bits_are_distinct_powers_of_two() {
        let mut seen = 0u16;
        for &bit in &GLOBAL_FLAG_MASKS {
            assert!(bit.is_power_of_two());
            assert_eq!(seen & bit as u16, 0);
            seen |= bit as u16;
        }
        assert_eq!(GLOBAL_FLAG_MEANINGS.split_whitespace().count(), 8);
    }

    #[test]
    fn invalid_bit_survives_combination() {
        let combined = INVALID | SENSOR_ERROR | PADDED_DATA;
        assert_ne!(combined & INVALID, 0);
    }

    #[test]
    fn unmapped_keys_get_the_noop_mapper() {
        let mut ds = Dataset::new();
        get_flag_mapper("SST").map_global_flags(&mut ds).unwrap();
        assert!(ds.is_empty());
    }
}
