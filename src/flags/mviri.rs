//! MVIRI flag aggregation: per-pixel bit table over the full-disk
//! `data_quality_bitmask`.
use crate::core::dataset::Dataset;
use crate::error::Result;
use crate::flags::{self, FlagMapper};

pub const UNCERTAINTY_SUSPICIOUS: u32 = 1;
pub const UNCERTAINTY_TOO_LARGE: u32 = 2;
pub const SPACE_VIEW_SUSPICIOUS: u32 = 4;
pub const NOT_ON_EARTH: u32 = 8;

const PIXEL_TABLE: &[(u32, u8)] = &[
    (UNCERTAINTY_SUSPICIOUS, flags::USE_WITH_CAUTION),
    (UNCERTAINTY_TOO_LARGE, flags::INVALID),
    (SPACE_VIEW_SUSPICIOUS, flags::USE_WITH_CAUTION),
    (NOT_ON_EARTH, flags::INVALID_GEOLOC),
];

pub struct MviriFlagMapper;

impl FlagMapper for MviriFlagMapper {
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

    #[test]
    fn space_pixels_are_flagged_invalid_geoloc() {
        let mut ds = Dataset::new();
        crate::core::builder::add_quality_flags(&mut ds, 2, 2).unwrap();
        let sensor = VariableBuilder::new(DataType::U8, &[2, 2], &["y", "x"])
            .unwrap()
            .fill_value(FillValue::U8(0))
            .build()
            .unwrap();
        ds.add_variable("data_quality_bitmask", sensor).unwrap();
        ds.data_mut("data_quality_bitmask")
            .unwrap()
            .as_u8_mut()
            .unwrap()[[1, 0]] = NOT_ON_EARTH as u8;

        MviriFlagMapper.map_global_flags(&mut ds).unwrap();
        let global = ds
            .variable("quality_pixel_bitmask")
            .and_then(|v| v.data())
            .and_then(ArrayData::as_u8)
            .unwrap();
        assert_eq!(global[[1, 0]], flags::INVALID_GEOLOC);
        assert_eq!(global[[0, 0]], 0);
    }
}
