//! AMSU-B / MHS swath templates. The two instruments share one catalog.
//!
//! Catalog sizes: original 16 variables, easy 21, full 29.
use crate::core::builder::{self, VariableBuilder};
use crate::core::dataset::Dataset;
use crate::core::fill::default_fill_value;
use crate::core::variable::Variable;
use crate::error::Result;
use crate::templates::{angle_variable, correlation_matrix, time_vector, FcdrTemplate};
use crate::types::{DataType, FillValue};

pub const SWATH_WIDTH: usize = 90;
pub const NUM_CHANNELS: usize = 5;
pub const CHUNKING_3D: [usize; 3] = [NUM_CHANNELS, 512, SWATH_WIDTH];

pub struct AmsubMhs;

const ANGLES: [&str; 4] = [
    "satellite_azimuth_angle",
    "satellite_zenith_angle",
    "solar_azimuth_angle",
    "solar_zenith_angle",
];

impl FcdrTemplate for AmsubMhs {
    fn add_original_variables(&self, ds: &mut Dataset, height: usize) -> Result<()> {
        builder::add_swath_geolocation(ds, height, SWATH_WIDTH)?;
        builder::add_quality_flags(ds, height, SWATH_WIDTH)?;

        ds.add_variable("btemps", brightness_temperature_cube(height)?)?;

        let chanqual = VariableBuilder::new(
            DataType::U32,
            &[NUM_CHANNELS, height],
            &["channel", "y"],
        )?
        .fill_value(FillValue::U32(0))
        .long_name("Channel quality flags")
        .build()?;
        ds.add_variable("chanqual", chanqual)?;

        let instrtemp = VariableBuilder::new(DataType::I32, &[height], &["y"])?
            .long_name("Instrument temperature")
            .units("K")
            .scale_offset(0.01, 0.0)
            .build()?;
        ds.add_variable("instrtemp", instrtemp)?;

        for name in ["qualind", "scanqual"] {
            let var = VariableBuilder::new(DataType::U32, &[height], &["y"])?
                .fill_value(FillValue::U32(0))
                .long_name("Quality indicator bitfield")
                .build()?;
            ds.add_variable(name, var)?;
        }
        for (name, long_name) in [
            ("scnlin", "Scan line number"),
            ("scnlindy", "Acquisition day of year of scan"),
            ("scnlintime", "Acquisition time of scan in milliseconds"),
            ("scnlinyr", "Acquisition year of scan"),
        ] {
            let var = VariableBuilder::new(DataType::I32, &[height], &["y"])?
                .long_name(long_name)
                .build()?;
            ds.add_variable(name, var)?;
        }

        for name in ANGLES {
            ds.add_variable(name, angle_variable(height, SWATH_WIDTH, name)?)?;
        }
        Ok(())
    }

    fn add_easy_variables(&self, ds: &mut Dataset, height: usize) -> Result<()> {
        builder::add_swath_geolocation(ds, height, SWATH_WIDTH)?;
        builder::add_quality_flags(ds, height, SWATH_WIDTH)?;
        time_vector(ds, height)?;

        ds.add_variable("bt", brightness_temperature_cube(height)?)?;

        for name in ANGLES {
            ds.add_variable(name, angle_variable(height, SWATH_WIDTH, name)?)?;
        }

        let scanline = VariableBuilder::new(DataType::I16, &[height], &["y"])?
            .long_name("Scan line number")
            .build()?;
        ds.add_variable("scanline", scanline)?;

        for (name, effects) in [
            ("u_independent", "independent effects"),
            ("u_structured", "structured effects"),
            ("u_common", "common effects"),
        ] {
            ds.add_variable(name, uncertainty_cube(height, effects)?)?;
        }

        let instr_temp = VariableBuilder::new(DataType::F32, &[height], &["y"])?
            .long_name("Instrument temperature")
            .units("K")
            .encoding(DataType::I16, 0.01, 273.15, default_fill_value(DataType::I16))
            .build()?;
        ds.add_variable("instrument_temperature", instr_temp)?;

        ds.add_variable("channel", channel_coordinate()?)?;

        let scan_flags = VariableBuilder::new(DataType::U32, &[height], &["y"])?
            .fill_value(FillValue::U32(0))
            .long_name("quality_scanline_bitmask")
            .standard_name("status_flag")
            .build()?;
        ds.add_variable("quality_scanline_bitmask", scan_flags)?;
        let channel_flags =
            VariableBuilder::new(DataType::U8, &[height, NUM_CHANNELS], &["y", "channel"])?
                .fill_value(FillValue::U8(0))
                .long_name("quality_channel_bitmask")
                .standard_name("status_flag")
                .build()?;
        ds.add_variable("quality_channel_bitmask", channel_flags)?;

        let file_map = VariableBuilder::new(DataType::I16, &[height], &["y"])?
            .long_name("Index of the level 1b original file for this scanline")
            .build()?;
        ds.add_variable("scanline_map_to_origl1bfile", file_map)?;
        let line_map = VariableBuilder::new(DataType::I16, &[height], &["y"])?
            .long_name("Scanline number in the level 1b original file")
            .build()?;
        ds.add_variable("scanline_origl1b", line_map)?;

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

        for (name, long_name) in [
            ("u_btemps", "Total uncertainty of brightness temperature"),
            ("u_syst_btemps", "Systematic uncertainty of brightness temperature"),
            ("u_random_btemps", "Noise on brightness temperature"),
        ] {
            ds.add_variable(name, uncertainty_cube(height, long_name)?)?;
        }

        let u_instrtemp = VariableBuilder::new(DataType::F32, &[height], &["y"])?
            .long_name("uncertainty of instrument temperature")
            .units("K")
            .build()?;
        ds.add_variable("u_instrtemp", u_instrtemp)?;

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
        for name in ANGLES {
            let var = VariableBuilder::new(DataType::F32, &[height, SWATH_WIDTH], &["y", "x"])?
                .long_name(format!("uncertainty of {name}").as_str())
                .units("degree")
                .coordinates()
                .build()?;
            ds.add_variable(&format!("u_{name}"), var)?;
        }

        ds.add_variable("channel", channel_coordinate()?)?;

        let antenna = VariableBuilder::new(
            DataType::F32,
            &[NUM_CHANNELS, height, SWATH_WIDTH],
            &["channel", "y", "x"],
        )?
        .long_name("uncertainty from antenna pattern correction")
        .units("K")
        .chunking(&CHUNKING_3D)
        .build()?;
        ds.add_variable("u_antenna_pattern", antenna)
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

fn uncertainty_cube(height: usize, long_name: &str) -> Result<Variable> {
    VariableBuilder::new(
        DataType::F32,
        &[NUM_CHANNELS, height, SWATH_WIDTH],
        &["channel", "y", "x"],
    )?
    .long_name(long_name)
    .units("K")
    .encoding(DataType::I16, 0.001, 0.0, default_fill_value(DataType::I16))
    .chunking(&CHUNKING_3D)
    .coordinates()
    .build()
}

fn channel_coordinate() -> Result<Variable> {
    VariableBuilder::new(DataType::I16, &[NUM_CHANNELS], &["channel"])?
        .long_name("Channel number")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::FcdrTemplate;

    #[test]
    fn original_catalog_has_16_variables() {
        let mut ds = Dataset::new();
        AmsubMhs.add_original_variables(&mut ds, 4).unwrap();
        assert_eq!(ds.len(), 16);
    }

    #[test]
    fn easy_catalog_has_21_variables() {
        let mut ds = Dataset::new();
        AmsubMhs.add_easy_variables(&mut ds, 4).unwrap();
        assert_eq!(ds.len(), 21);
    }

    #[test]
    fn full_catalog_has_29_variables() {
        let mut ds = Dataset::new();
        AmsubMhs.add_full_variables(&mut ds, 4).unwrap();
        assert_eq!(ds.len(), 29);
    }

    #[test]
    fn brightness_temperatures_are_channel_stacked() {
        let mut ds = Dataset::new();
        AmsubMhs.add_easy_variables(&mut ds, 4).unwrap();
        let bt = ds.variable("bt").unwrap();
        assert_eq!(bt.shape(), &[NUM_CHANNELS, 4, SWATH_WIDTH]);
        assert_eq!(
            bt.dims(),
            &["channel".to_string(), "y".to_string(), "x".to_string()]
        );
    }
}
