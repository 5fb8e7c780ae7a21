//! SSM/T-2 swath templates.
use crate::core::builder::{self, VariableBuilder};
use crate::core::dataset::Dataset;
use crate::core::fill::default_fill_value;
use crate::core::variable::Variable;
use crate::error::Result;
use crate::templates::{angle_variable, correlation_matrix, time_vector, FcdrTemplate};
use crate::types::{DataType, FillValue};

pub const SWATH_WIDTH: usize = 28;
pub const NUM_CHANNELS: usize = 5;

pub struct Ssmt2;

const ANGLES: [&str; 4] = [
    "satellite_azimuth_angle",
    "satellite_zenith_angle",
    "solar_azimuth_angle",
    "solar_zenith_angle",
];

impl FcdrTemplate for Ssmt2 {
    fn add_original_variables(&self, ds: &mut Dataset, height: usize) -> Result<()> {
        builder::add_swath_geolocation(ds, height, SWATH_WIDTH)?;
        builder::add_quality_flags(ds, height, SWATH_WIDTH)?;
        time_vector(ds, height)?;

        ds.add_variable("tb", brightness_temperature_cube(height)?)?;

        for name in ANGLES {
            ds.add_variable(name, angle_variable(height, SWATH_WIDTH, name)?)?;
        }

        let channel_quality =
            VariableBuilder::new(DataType::U8, &[NUM_CHANNELS, height], &["channel", "y"])?
                .fill_value(FillValue::U8(0))
                .long_name("SSMT2 channel quality flag")
                .build()?;
        ds.add_variable("channel_quality_flag", channel_quality)?;

        let gain = VariableBuilder::new(DataType::I16, &[height], &["y"])?
            .long_name("Gain control")
            .build()?;
        ds.add_variable("gain_control", gain)?;
        let thermal = VariableBuilder::new(DataType::F32, &[height], &["y"])?
            .long_name("Thermal reference")
            .units("K")
            .build()?;
        ds.add_variable("thermal_reference", thermal)?;

        for (name, long_name) in [
            ("cold_counts", "Cold calibration counts"),
            ("warm_counts", "Warm calibration counts"),
        ] {
            let var = VariableBuilder::new(
                DataType::I32,
                &[NUM_CHANNELS, height],
                &["channel", "y"],
            )?
            .long_name(long_name)
            .build()?;
            ds.add_variable(name, var)?;
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
            ds.add_variable(name, uncertainty_cube(height, effects)?)?;
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

        for (name, long_name) in [
            ("u_tb_random", "random uncertainty of brightness temperature"),
            ("u_tb_systematic", "systematic uncertainty of brightness temperature"),
        ] {
            ds.add_variable(name, uncertainty_cube(height, long_name)?)?;
        }

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
        ds.add_variable("u_time", u_time)
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
    .coordinates()
    .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::FcdrTemplate;

    #[test]
    fn original_catalog_has_14_variables() {
        let mut ds = Dataset::new();
        Ssmt2.add_original_variables(&mut ds, 4).unwrap();
        assert_eq!(ds.len(), 14);
    }

    #[test]
    fn easy_catalog_has_19_variables() {
        let mut ds = Dataset::new();
        Ssmt2.add_easy_variables(&mut ds, 4).unwrap();
        assert_eq!(ds.len(), 19);
    }

    #[test]
    fn full_catalog_has_19_variables() {
        let mut ds = Dataset::new();
        Ssmt2.add_full_variables(&mut ds, 4).unwrap();
        assert_eq!(ds.len(), 19);
    }

    #[test]
    fn swath_width_is_28() {
        let mut ds = Dataset::new();
        Ssmt2.add_original_variables(&mut ds, 4).unwrap();
        assert_eq!(ds.variable("tb").unwrap().shape(), &[NUM_CHANNELS, 4, 28]);
    }
}
