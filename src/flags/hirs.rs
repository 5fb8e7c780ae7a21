//! HIRS flag aggregation.
//!
//! Three passes feed the global bitmask: a per-pixel table over
//! `data_quality_bitmask`, a scanline-level pass over the 32-bit
//! `quality_scanline_bitmask` (one value marks the whole row), and the
//! channel escalation rule over `quality_channel_bitmask`: a row where every
//! channel carries the do-not-use bit is invalid, a row where only some
//! channels carry it is usable with caution.
use ndarray::Ix2;

use crate::core::data::ArrayData;
use crate::core::dataset::Dataset;
use crate::error::{Error, Result};
use crate::flags::{self, FlagMapper};

// data_quality_bitmask (per pixel, u8)
pub const DO_NOT_USE_SCAN: u32 = 1;
pub const TIME_SEQUENCE_ERROR: u32 = 2;
pub const DATA_GAP_PRECEDES: u32 = 4;
pub const NO_CALIBRATION: u32 = 8;
pub const NO_EARTH_LOCATION: u32 = 16;

// quality_scanline_bitmask (per row, u32)
pub const TIME_FIELD_BAD: u32 = 1;
pub const TIME_FIELD_INFERRED: u32 = 2;
pub const INCONSISTENT_SEQUENCE: u32 = 4;
pub const UNCALIBRATED_BAD_TIME: u32 = 8;
pub const CALIBRATION_MARGINAL: u32 = 16;
pub const UNCALIBRATED_CHANNELS: u32 = 32;
pub const NO_LOCATION: u32 = 64;
pub const BAD_TEMPERATURES: u32 = 128;

// quality_channel_bitmask (per row and channel, u8)
pub const CHANNEL_DO_NOT_USE: u32 = 1;

const PIXEL_TABLE: &[(u32, u8)] = &[
    (DO_NOT_USE_SCAN, flags::INVALID),
    (TIME_SEQUENCE_ERROR, flags::INVALID_TIME),
    (DATA_GAP_PRECEDES, flags::USE_WITH_CAUTION),
    (NO_CALIBRATION, flags::INVALID_INPUT),
    (NO_EARTH_LOCATION, flags::INVALID_GEOLOC),
];

const SCANLINE_TABLE: &[(u32, u8)] = &[
    (TIME_FIELD_BAD, flags::INVALID_TIME),
    (TIME_FIELD_INFERRED, flags::USE_WITH_CAUTION),
    (INCONSISTENT_SEQUENCE, flags::USE_WITH_CAUTION),
    (UNCALIBRATED_BAD_TIME, flags::INVALID_INPUT),
    (CALIBRATION_MARGINAL, flags::USE_WITH_CAUTION),
    (UNCALIBRATED_CHANNELS, flags::INCOMPLETE_CHANNEL_DATA),
    (NO_LOCATION, flags::INVALID_GEOLOC),
    (BAD_TEMPERATURES, flags::SENSOR_ERROR),
];

pub struct HirsFlagMapper;

impl FlagMapper for HirsFlagMapper {
    fn map_global_flags(&self, ds: &mut Dataset) -> Result<()> {
        flags::apply_pixel_table(ds, "data_quality_bitmask", PIXEL_TABLE)?;
        map_scanline_flags(ds)?;
        map_channel_flags(ds)
    }
}

/// OR mapped bits into every pixel of a row whose scanline flag is set.
fn map_scanline_flags(ds: &mut Dataset) -> Result<()> {
    let scanline = flags::read_bitmask(ds, "quality_scanline_bitmask")?
        .into_dimensionality::<ndarray::Ix1>()
        .map_err(|_| Error::InvalidArgument {
            arg: "quality_scanline_bitmask",
            value: "expected a (y,) array".to_string(),
        })?;
    let mut target = global_bitmask_mut(ds)?;
    let (rows, cols) = target.dim();
    for row in 0..rows {
        let src_bits = scanline[row];
        let mut row_bits = 0u8;
        for &(src_bit, global_bit) in SCANLINE_TABLE {
            if src_bits & src_bit != 0 {
                row_bits |= global_bit;
            }
        }
        if row_bits != 0 {
            for col in 0..cols {
                target[[row, col]] |= row_bits;
            }
        }
    }
    Ok(())
}

/// Severity escalation over the per-channel do-not-use bit.
fn map_channel_flags(ds: &mut Dataset) -> Result<()> {
    let channel = flags::read_bitmask(ds, "quality_channel_bitmask")?;
    let channel = channel
        .into_dimensionality::<Ix2>()
        .map_err(|_| Error::InvalidArgument {
            arg: "quality_channel_bitmask",
            value: "expected a (y, channel) array".to_string(),
        })?;
    let num_channels = channel.ncols();
    // An empty channel axis carries no evidence either way; without this
    // guard every row would count as "all channels set".
    if num_channels == 0 {
        return Ok(());
    }
    let mut target = global_bitmask_mut(ds)?;
    let (rows, cols) = target.dim();
    for row in 0..rows {
        let mut set_count = 0usize;
        for ch in 0..num_channels {
            if channel[[row, ch]] & CHANNEL_DO_NOT_USE != 0 {
                set_count += 1;
            }
        }
        let row_bits = if set_count == num_channels {
            flags::INVALID
        } else if set_count > 0 {
            flags::USE_WITH_CAUTION
        } else {
            continue;
        };
        for col in 0..cols {
            target[[row, col]] |= row_bits;
        }
    }
    Ok(())
}

fn global_bitmask_mut(ds: &mut Dataset) -> Result<ndarray::ArrayViewMut2<'_, u8>> {
    ds.variable_mut(flags::GLOBAL_FLAG_VARIABLE)
        .and_then(|v| v.data_mut())
        .and_then(ArrayData::as_u8_mut)
        .ok_or_else(|| Error::NoSuchVariable(flags::GLOBAL_FLAG_VARIABLE.to_string()))?
        .view_mut()
        .into_dimensionality::<Ix2>()
        .map_err(|_| Error::InvalidArgument {
            arg: flags::GLOBAL_FLAG_VARIABLE,
            value: "expected a (y, x) array".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::VariableBuilder;
    use crate::types::{DataType, FillValue};

    const HEIGHT: usize = 3;
    const WIDTH: usize = 4;
    const CHANNELS: usize = 5;

    fn dataset() -> Dataset {
        let mut ds = Dataset::new();
        crate::core::builder::add_quality_flags(&mut ds, HEIGHT, WIDTH).unwrap();
        let pixel = VariableBuilder::new(DataType::U8, &[HEIGHT, WIDTH], &["y", "x"])
            .unwrap()
            .fill_value(FillValue::U8(0))
            .build()
            .unwrap();
        ds.add_variable("data_quality_bitmask", pixel).unwrap();
        let scanline = VariableBuilder::new(DataType::U32, &[HEIGHT], &["y"])
            .unwrap()
            .fill_value(FillValue::U32(0))
            .build()
            .unwrap();
        ds.add_variable("quality_scanline_bitmask", scanline).unwrap();
        let channel = VariableBuilder::new(DataType::U8, &[HEIGHT, CHANNELS], &["y", "channel"])
            .unwrap()
            .fill_value(FillValue::U8(0))
            .build()
            .unwrap();
        ds.add_variable("quality_channel_bitmask", channel).unwrap();
        ds
    }

    fn global(ds: &Dataset) -> ndarray::ArrayD<u8> {
        ds.variable(flags::GLOBAL_FLAG_VARIABLE)
            .and_then(|v| v.data())
            .and_then(ArrayData::as_u8)
            .unwrap()
            .clone()
    }

    #[test]
    fn scanline_flags_mark_the_whole_row() {
        let mut ds = dataset();
        ds.data_mut("quality_scanline_bitmask")
            .unwrap()
            .as_u32_mut()
            .unwrap()[[1]] = TIME_FIELD_BAD | BAD_TEMPERATURES;
        HirsFlagMapper.map_global_flags(&mut ds).unwrap();
        let g = global(&ds);
        for col in 0..WIDTH {
            assert_eq!(g[[1, col]], flags::INVALID_TIME | flags::SENSOR_ERROR);
            assert_eq!(g[[0, col]], 0);
        }
    }

    #[test]
    fn all_channels_bad_escalates_to_invalid() {
        let mut ds = dataset();
        {
            let ch = ds
                .data_mut("quality_channel_bitmask")
                .unwrap()
                .as_u8_mut()
                .unwrap();
            for c in 0..CHANNELS {
                ch[[0, c]] = CHANNEL_DO_NOT_USE as u8;
            }
            ch[[2, 1]] = CHANNEL_DO_NOT_USE as u8;
        }
        HirsFlagMapper.map_global_flags(&mut ds).unwrap();
        let g = global(&ds);
        for col in 0..WIDTH {
            assert_eq!(g[[0, col]], flags::INVALID);
            assert_eq!(g[[1, col]], 0);
            assert_eq!(g[[2, col]], flags::USE_WITH_CAUTION);
        }
    }

    #[test]
    fn empty_channel_axis_escalates_nothing() {
        let mut ds = Dataset::new();
        crate::core::builder::add_quality_flags(&mut ds, HEIGHT, WIDTH).unwrap();
        let channel = VariableBuilder::new(DataType::U8, &[HEIGHT, 0], &["y", "channel"])
            .unwrap()
            .fill_value(FillValue::U8(0))
            .build()
            .unwrap();
        ds.add_variable("quality_channel_bitmask", channel).unwrap();

        map_channel_flags(&mut ds).unwrap();
        assert!(global(&ds).iter().all(|&v| v == 0));
    }

    #[test]
    fn combined_passes_are_idempotent() {
        let mut ds = dataset();
        ds.data_mut("data_quality_bitmask")
            .unwrap()
            .as_u8_mut()
            .unwrap()[[0, 0]] = (DO_NOT_USE_SCAN | NO_CALIBRATION) as u8;
        ds.data_mut("quality_scanline_bitmask")
            .unwrap()
            .as_u32_mut()
            .unwrap()[[2]] = CALIBRATION_MARGINAL;
        ds.data_mut("quality_channel_bitmask")
            .unwrap()
            .as_u8_mut()
            .unwrap()[[2, 0]] = CHANNEL_DO_NOT_USE as u8;

        HirsFlagMapper.map_global_flags(&mut ds).unwrap();
        let once = global(&ds);
        HirsFlagMapper.map_global_flags(&mut ds).unwrap();
        assert_eq!(global(&ds), once);
        assert_eq!(once[[0, 0]], flags::INVALID | flags::INVALID_INPUT);
        assert_eq!(once[[2, 3]], flags::USE_WITH_CAUTION);
    }
}
