//! AVHRR swath templates.
//!
//! Catalog sizes: original 15 variables, easy 29, full 71.
use crate::core::builder::{self, VariableBuilder};
use crate::core::dataset::Dataset;
use crate::core::fill::default_fill_value;
use crate::error::Result;
use crate::templates::{angle_variable, correlation_matrix, time_vector, FcdrTemplate};
use crate::types::{DataType, FillValue};

pub const SWATH_WIDTH: usize = 409;
pub const NUM_PRT: usize = 3;
pub const CHUNKING: [usize; 2] = [1280, 409];

/// Channel names in instrument order; the first three are reflective,
/// the last three thermal.
pub const CHANNELS: [&str; 6] = ["Ch1", "Ch2", "Ch3a", "Ch3b", "Ch4", "Ch5"];
const REFLECTIVE: usize = 3;

pub struct Avhrr;

impl FcdrTemplate for Avhrr {
    fn add_original_variables(&self, ds: &mut Dataset, height: usize) -> Result<()> {
        builder::add_swath_geolocation(ds, height, SWATH_WIDTH)?;
        builder::add_quality_flags(ds, height, SWATH_WIDTH)?;
        time_vector(ds, height)?;

        let scanline = VariableBuilder::new(DataType::I16, &[height], &["y"])?
            .long_name("Level 1b line number")
            .attr("valid_min", 0.0)
            .build()?;
        ds.add_variable("scanline", scanline)?;

        for name in [
            "relative_azimuth_angle",
            "satellite_zenith_angle",
            "solar_zenith_angle",
        ] {
            ds.add_variable(name, angle_variable(height, SWATH_WIDTH, name)?)?;
        }

        for (i, ch) in CHANNELS.iter().enumerate() {
            let var = if i < REFLECTIVE {
                reflectance_variable(height)?
            } else {
                brightness_temperature_variable(height)?
            };
            ds.add_variable(ch, var)?;
        }

        let sensor_flags = VariableBuilder::new(DataType::U8, &[height, SWATH_WIDTH], &["y", "x"])?
            .fill_value(FillValue::U8(0))
            .standard_name("status_flag")
            .long_name("data_quality_bitmask")
            .attr("flag_masks", vec![1u8, 2, 4, 8, 16])
            .attr(
                "flag_meanings",
                "bad_navigation bad_calibration bad_timing missing_line solar_contamination",
            )
            .coordinates()
            .build()?;
        ds.add_variable("data_quality_bitmask", sensor_flags)
    }

    fn add_easy_variables(&self, ds: &mut Dataset, height: usize) -> Result<()> {
        self.add_original_variables(ds, height)?;

        for ch in CHANNELS {
            ds.add_variable(
                &format!("u_independent_{ch}"),
                uncertainty_variable(height, "independent effects")?,
            )?;
        }
        for ch in CHANNELS {
            ds.add_variable(
                &format!("u_structured_{ch}"),
                uncertainty_variable(height, "structured effects")?,
            )?;
        }

        ds.add_variable(
            "channel_correlation_matrix_independent",
            correlation_matrix(CHANNELS.len(), "Channel error correlation matrix - independent effects")?,
        )?;
        ds.add_variable(
            "channel_correlation_matrix_structured",
            correlation_matrix(CHANNELS.len(), "Channel error correlation matrix - structured effects")?,
        )
    }

    fn add_full_variables(&self, ds: &mut Dataset, height: usize) -> Result<()> {
        self.add_original_variables(ds, height)?;

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
        for name in [
            "u_satellite_zenith_angle",
            "u_solar_zenith_angle",
            "u_relative_azimuth_angle",
        ] {
            let var = VariableBuilder::new(DataType::F32, &[height, SWATH_WIDTH], &["y", "x"])?
                .long_name(name)
                .units("degree")
                .coordinates()
                .build()?;
            ds.add_variable(name, var)?;
        }

        for ch in CHANNELS {
            ds.add_variable(&format!("{ch}_counts"), counts_variable(height)?)?;
        }
        for ch in CHANNELS {
            ds.add_variable(
                &format!("u_independent_{ch}"),
                uncertainty_variable(height, "independent effects")?,
            )?;
        }
        for ch in CHANNELS {
            ds.add_variable(
                &format!("u_structured_{ch}"),
                uncertainty_variable(height, "structured effects")?,
            )?;
        }
        for ch in CHANNELS {
            ds.add_variable(
                &format!("u_common_{ch}"),
                uncertainty_variable(height, "common effects")?,
            )?;
        }
        for ch in CHANNELS {
            ds.add_variable(&format!("space_counts_{ch}"), counts_variable(height)?)?;
        }
        for ch in CHANNELS {
            ds.add_variable(&format!("ict_counts_{ch}"), counts_variable(height)?)?;
        }

        let prt_counts = VariableBuilder::new(DataType::U16, &[height, NUM_PRT], &["y", "n_prt"])?
            .long_name("Platinum resistance thermometer counts")
            .units("count")
            .build()?;
        ds.add_variable("prt_counts", prt_counts)?;
        let u_prt = VariableBuilder::new(DataType::F32, &[height, NUM_PRT], &["y", "n_prt"])?
            .long_name("uncertainty of PRT counts")
            .units("count")
            .build()?;
        ds.add_variable("u_prt_counts", u_prt)?;
        let ict = VariableBuilder::new(DataType::F32, &[height], &["y"])?
            .long_name("Temperature of the internal calibration target")
            .units("K")
            .encoding(DataType::I16, 0.01, 273.15, default_fill_value(DataType::I16))
            .build()?;
        ds.add_variable("ict_temperature", ict)?;
        let u_ict = VariableBuilder::new(DataType::F32, &[height], &["y"])?
            .long_name("uncertainty of ICT temperature")
            .units("K")
            .build()?;
        ds.add_variable("u_ict_temperature", u_ict)?;

        for ch in &CHANNELS[..REFLECTIVE] {
            let var = VariableBuilder::new(DataType::F32, &[height], &["y"])?
                .long_name(format!("uncertainty of solar irradiance {ch}").as_str())
                .units("W m-2")
                .build()?;
            ds.add_variable(&format!("u_solar_irradiance_{ch}"), var)?;
        }
        for ch in &CHANNELS[REFLECTIVE..] {
            let var = VariableBuilder::new(DataType::F32, &[height], &["y"])?
                .long_name(format!("uncertainty of nonlinearity correction {ch}").as_str())
                .units("K")
                .build()?;
            ds.add_variable(&format!("u_nonlinearity_{ch}"), var)?;
        }

        let scan_flags = VariableBuilder::new(DataType::U8, &[height], &["y"])?
            .fill_value(FillValue::U8(0))
            .long_name("quality_scanline_bitmask")
            .standard_name("status_flag")
            .build()?;
        ds.add_variable("quality_scanline_bitmask", scan_flags)?;
        let channel_flags =
            VariableBuilder::new(DataType::U8, &[height, CHANNELS.len()], &["y", "channel"])?
                .fill_value(FillValue::U8(0))
                .long_name("quality_channel_bitmask")
                .standard_name("status_flag")
                .build()?;
        ds.add_variable("quality_channel_bitmask", channel_flags)?;

        for name in ["u_electronics", "u_digitization"] {
            let var = VariableBuilder::new(DataType::F32, &[height], &["y"])?
                .long_name(name)
                .units("count")
                .build()?;
            ds.add_variable(name, var)?;
        }
        Ok(())
    }
}

fn reflectance_variable(height: usize) -> Result<crate::core::variable::Variable> {
    VariableBuilder::new(DataType::F32, &[height, SWATH_WIDTH], &["y", "x"])?
        .standard_name("toa_bidirectional_reflectance")
        .units("1")
        .encoding(DataType::I16, 1e-4, 0.0, default_fill_value(DataType::I16))
        .chunking(&CHUNKING)
        .coordinates()
        .build()
}

fn brightness_temperature_variable(height: usize) -> Result<crate::core::variable::Variable> {
    VariableBuilder::new(DataType::F32, &[height, SWATH_WIDTH], &["y", "x"])?
        .standard_name("toa_brightness_temperature")
        .units("K")
        .encoding(DataType::I16, 0.01, 273.15, default_fill_value(DataType::I16))
        .chunking(&CHUNKING)
        .coordinates()
        .build()
}

fn counts_variable(height: usize) -> Result<crate::core::variable::Variable> {
    VariableBuilder::new(DataType::I32, &[height, SWATH_WIDTH], &["y", "x"])?
        .units("count")
        .chunking(&CHUNKING)
        .coordinates()
        .build()
}

fn uncertainty_variable(height: usize, effects: &str) -> Result<crate::core::variable::Variable> {
    VariableBuilder::new(DataType::F32, &[height, SWATH_WIDTH], &["y", "x"])?
        .long_name(format!("uncertainty from {effects}").as_str())
        .units("1")
        .encoding(DataType::I16, 1e-3, 0.0, default_fill_value(DataType::I16))
        .chunking(&CHUNKING)
        .coordinates()
        .build()
}
