//! AVHRR flag aggregation: a fixed per-pixel bit table over the sensor's
//! `data_quality_bitmask`.
use crate::core::dataset::Dataset;
use crate::error::Result;
use crate::flags::{self, FlagMapper};

pub const BAD_NAVIGATION: u32 = 1;
pub const BAD_CALIBRATION: u32 = 2;
pub const BAD_TIMING: u32 = 4;
pub const MISSING_LINE: u32 = 8;
pub const SOLAR_CONTAMINATION: u32 = 16;

const PIXEL_TABLE: &[(u32, u8)] = &[
    (BAD_NAVIGATION, flags::INVALID_GEOLOC),
    (BAD_CALIBRATION, flags::INVALID_INPUT),
    (BAD_TIMING, flags::INVALID_TIME),
    (MISSING_LINE, flags::INVALID),
    (SOLAR_CONTAMINATION, flags::USE_WITH_CAUTION),
];

pub struct AvhrrFlagMapper;

impl FlagMapper for AvhrrFlagMapper {
    fn map_global_flags(&self, ds: &mut Dataset) -> Result<()> {
        flags::apply_pixel_table(ds, "data_quality_bitmask", PIXEL_TABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::VariableBuilder;
    use crate::core::data::ArrayData;
    use crate::types::{DataType, FillValue};

    fn dataset(height: usize, width: usize) -> Dataset {
        let mut ds = Dataset::new();
        crate::core::builder::add_quality_flags(&mut ds, height, width).unwrap();
        let sensor_flags = VariableBuilder::new(DataType::U8, &[height, width], &["y", "x"])
            .unwrap()
            .fill_value(FillValue::U8(0))
            .build()
            .unwrap();
        ds.add_variable("data_quality_bitmask", sensor_flags).unwrap();
        ds
    }

    #[test]
    fn pixel_bits_are_mapped() {
        let mut ds = dataset(2, 2);
        {
            let sensor = ds.data_mut("data_quality_bitmask").unwrap();
            let arr = sensor.as_u8_mut().unwrap();
            arr[[0, 0]] = BAD_NAVIGATION as u8;
            arr[[0, 1]] = (BAD_CALIBRATION | MISSING_LINE) as u8;
            arr[[1, 1]] = SOLAR_CONTAMINATION as u8;
        }
        AvhrrFlagMapper.map_global_flags(&mut ds).unwrap();

        let global = ds
            .variable("quality_pixel_bitmask")
            .and_then(|v| v.data())
            .and_then(ArrayData::as_u8)
            .unwrap()
            .clone();
        assert_eq!(global[[0, 0]], flags::INVALID_GEOLOC);
        assert_eq!(global[[0, 1]], flags::INVALID_INPUT | flags::INVALID);
        assert_eq!(global[[1, 0]], 0);
        assert_eq!(global[[1, 1]], flags::USE_WITH_CAUTION);
    }

    #[test]
    fn mapping_is_idempotent() {
        let mut ds = dataset(3, 4);
        ds.data_mut("data_quality_bitmask")
            .unwrap()
            .as_u8_mut()
            .unwrap()
            .fill((BAD_TIMING | BAD_NAVIGATION) as u8);

        AvhrrFlagMapper.map_global_flags(&mut ds).unwrap();
        let once = ds
            .variable("quality_pixel_bitmask")
            .and_then(|v| v.data())
            .and_then(ArrayData::as_u8)
            .unwrap()
            .clone();
        AvhrrFlagMapper.map_global_flags(&mut ds).unwrap();
        let twice = ds
            .variable("quality_pixel_bitmask")
            .and_then(|v| v.data())
            .and_then(ArrayData::as_u8)
            .unwrap()
            .clone();
        assert_eq!(once, twice);
    }
}
