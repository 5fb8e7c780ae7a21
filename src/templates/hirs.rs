//! HIRS/2, /3 and /4 swath templates. All three generations share one
//! catalog; only the platform metadata differs, which the caller stamps.
use crate::core::builder::{self, VariableBuilder};
use crate::core::dataset::Dataset;
use crate::core::fill::default_fill_value;
use crate::core::variable::Variable;
use crate::error::Result;
use crate::templates::{angle_variable, correlation_matrix, time_vector, FcdrTemplate};
use crate::types::{DataType, FillValue};

pub const SWATH_WIDTH: usize = 56;
pub const NUM_CHANNELS: usize = 19;
pub const CHUNKING_3D: [usize; 3] = [10, 512, SWATH_WIDTH];

pub struct Hirs;

impl FcdrTemplate for Hirs {
    fn add_original_variables(&self, ds: &mut Dataset, height: usize) -> Result<()> {
        builder::add_swath_geolocation(ds, height, SWATH_WIDTH)?;
        builder::add_quality_flags(ds, height, SWATH_WIDTH)?;
        time_vector(ds, height)?;

        ds.add_variable("bt", brightness_temperature_cube(height)?)?;

        let pixel_flags =
            VariableBuilder::new(DataType::U8, &[height, SWATH_WIDTH], &["y", "x"])?
                .fill_value(FillValue::U8(0))
                .standard_name("status_flag")
                .long_name("bitmask for quality per pixel")
                .attr("flag_masks", vec![1u8, 2, 4, 8, 16])
                .attr(
                    "flag_meanings",
                    "do_not_use_scan time_sequence_error data_gap_preceding_scan \
                     no_calibration no_earth_location",
                )
                .coordinates()
                .build()?;
        ds.add_variable("data_quality_bitmask", pixel_flags)?;

        let scanline_flags = VariableBuilder::new(DataType::U32, &[height], &["y"])?
            .fill_value(FillValue::U32(0))
            .standard_name("status_flag")
            .long_name("bitmask for quality per scanline")
            .build()?;
        ds.add_variable("quality_scanline_bitmask", scanline_flags)?;

        let channel_flags =
            VariableBuilder::new(DataType::U8, &[height, NUM_CHANNELS], &["y", "channel"])?
                .fill_value(FillValue::U8(0))
                .standard_name("status_flag")
                .long_name("bitmask for quality per channel")
                .build()?;
        ds.add_variable("quality_channel_bitmask", channel_flags)?;

        let scanline = VariableBuilder::new(DataType::I16, &[height], &["y"])?
            .long_name("Scanline number")
            .build()?;
        ds.add_variable("scanline", scanline)?;
        let l1b_scanline = VariableBuilder::new(DataType::I16, &[height], &["y"])?
            .long_name("Scanline number in the level 1b source file")
            .build()?;
        ds.add_variable("l1b_scanline_number", l1b_scanline)?;

        for name in [
            "satellite_zenith_angle",
            "solar_zenith_angle",
            "local_azimuth_angle",
        ] {
            ds.add_variable(name, angle_variable(height, SWATH_WIDTH, name)?)?;
        }
        Ok(())
    }

    fn add_easy_variables(&self, ds: &mut Dataset, height: usize) -> Result<()> {
        self.add_original_variables(ds, height)?;

        for (name, effects) in [
            ("u_independent", "independent effects"),
            ("u_structured", "structured effects"),
            ("u_common", "common effects"),
        ] {
            let var = VariableBuilder::new(
                DataType::F32,
                &[NUM_CHANNELS, height, SWATH_WIDTH],
                &["channel", "y", "x"],
            )?
            .long_name(format!("uncertainty of brightness temperature from {effects}").as_str())
            .units("K")
            .encoding(DataType::I16, 0.001, 0.0, default_fill_value(DataType::I16))
            .chunking(&CHUNKING_3D)
            .coordinates()
            .build()?;
            ds.add_variable(name, var)?;
        }

        ds.add_variable(
            "channel_correlation_matrix_independent",
            correlation_matrix(NUM_CHANNELS, "Channel error correlation matrix - independent effects")?,
        )?;
        ds.add_variable(
            "channel_correlation_matrix_structured",
            correlation_matrix(NUM_CHANNELS, "Channel error correlation matrix - structured effects")?,
        )
    }

    fn add_full_variables(&self, ds: &mut Dataset, height: usize) -> Result<()> {
        self.add_original_variables(ds, height)?;

        let counts = VariableBuilder::new(
            DataType::I32,
            &[NUM_CHANNELS, height, SWATH_WIDTH],
            &["channel", "y", "x"],
        )?
        .long_name("Earth view counts")
        .chunking(&CHUNKING_3D)
        .coordinates()
        .build()?;
        ds.add_variable("counts", counts)?;
        let u_counts = VariableBuilder::new(
            DataType::F32,
            &[NUM_CHANNELS, height, SWATH_WIDTH],
            &["channel", "y", "x"],
        )?
        .long_name("uncertainty of Earth view counts")
        .chunking(&CHUNKING_3D)
        .coordinates()
        .build()?;
        ds.add_variable("u_counts", u_counts)?;

        for name in ["u_latitude", "u_longitude"] {
            let var = VariableBuilder::new(DataType::F32, &[height, SWATH_WIDTH], &["y", "x"])?
                .long_name(name)
                .units("degree")
                .coordinates()
                .build()?;
            ds.add_variable(name, var)?;
        }
        let u_time = VariableBuilder::new(DataType::F64, &[height], &["y"])?
            .long_name("uncertainty of acquisition time")
            .units("s")
            .build()?;
        ds.add_variable("u_time", u_time)?;

        for name in ["u_satellite_zenith_angle", "u_solar_zenith_angle"] {
            let var = VariableBuilder::new(DataType::F32, &[height, SWATH_WIDTH], &["y", "x"])?
                .long_name(name)
                .units("degree")
                .coordinates()
                .build()?;
            ds.add_variable(name, var)?;
        }

        for (name, long_name) in [
            ("u_bt_random", "random uncertainty of brightness temperature"),
            ("u_bt_systematic", "systematic uncertainty of brightness temperature"),
        ] {
            let var = VariableBuilder::new(
                DataType::F32,
                &[NUM_CHANNELS, height, SWATH_WIDTH],
                &["channel", "y", "x"],
            )?
            .long_name(long_name)
            .units("K")
            .encoding(DataType::I16, 0.001, 0.0, default_fill_value(DataType::I16))
            .chunking(&CHUNKING_3D)
            .coordinates()
            .build()?;
            ds.add_variable(name, var)?;
        }
        Ok(())
    }
}

fn brightness_temperature_cube(height: usize) -> Result<Variable> {
    VariableBuilder::new(
        DataType::F32,
        &[NUM_CHANNELS, height, SWATH_WIDTH],
        &["channel", "y", "x"],
    )?
    .standard_name("toa_brightness_temperature")
    .units("K")
    .encoding(DataType::I16, 0.01, 273.15, default_fill_value(DataType::I16))
    .chunking(&CHUNKING_3D)
    .coordinates()
    .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::ArrayData;

    #[test]
    fn original_catalog_has_13_variables() {
        let mut ds = Dataset::new();
        Hirs.add_original_variables(&mut ds, 6).unwrap();
        assert_eq!(ds.len(), 13);
    }

    #[test]
    fn easy_catalog_has_18_variables() {
        let mut ds = Dataset::new();
        Hirs.add_easy_variables(&mut ds, 6).unwrap();
        assert_eq!(ds.len(), 18);
    }

    #[test]
    fn full_catalog_has_22_variables() {
        let mut ds = Dataset::new();
        Hirs.add_full_variables(&mut ds, 6).unwrap();
        assert_eq!(ds.len(), 22);
    }

    #[test]
    fn flag_mapper_inputs_are_present() {
        let mut ds = Dataset::new();
        Hirs.add_original_variables(&mut ds, 6).unwrap();
        let scan = ds.variable("quality_scanline_bitmask").unwrap();
        assert!(matches!(scan.data(), Some(ArrayData::U32(_))));
        assert_eq!(scan.shape(), &[6]);
        let channel = ds.variable("quality_channel_bitmask").unwrap();
        assert_eq!(channel.shape(), &[6, NUM_CHANNELS]);
    }
}
