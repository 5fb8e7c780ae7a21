//! MVIRI full-disk templates. The visible-band disk is square, so a single
//! `height` argument sizes both axes.
use crate::core::builder::{self, VariableBuilder};
use crate::core::dataset::Dataset;
use crate::core::fill::default_fill_value;
use crate::core::variable::Variable;
use crate::error::Result;
use crate::templates::{angle_variable, time_vector, FcdrTemplate};
use crate::types::{DataType, FillValue};

pub const CHUNKING: [usize; 2] = [500, 500];

/// Reflectance packing step for the u16 encoding, 1 / 65535.
const REFLECTANCE_SCALE: f64 = 1.525_902e-5;

pub struct Mviri;

const ANGLES: [&str; 4] = [
    "solar_zenith_angle",
    "solar_azimuth_angle",
    "satellite_zenith_angle",
    "satellite_azimuth_angle",
];

impl FcdrTemplate for Mviri {
    fn add_original_variables(&self, ds: &mut Dataset, height: usize) -> Result<()> {
        builder::add_swath_geolocation(ds, height, height)?;
        builder::add_quality_flags(ds, height, height)?;
        time_vector(ds, height)?;

        let counts = VariableBuilder::new(DataType::U8, &[height, height], &["y", "x"])?
            .long_name("Image counts, visible channel")
            .units("count")
            .chunking(&CHUNKING)
            .coordinates()
            .build()?;
        ds.add_variable("count_vis", counts)?;

        let pixel_flags = VariableBuilder::new(DataType::U8, &[height, height], &["y", "x"])?
            .fill_value(FillValue::U8(0))
            .standard_name("status_flag")
            .long_name("bitmask for quality per pixel")
            .attr("flag_masks", vec![1u8, 2, 4, 8])
            .attr(
                "flag_meanings",
                "uncertainty_suspicious uncertainty_too_large \
                 space_view_suspicious not_on_earth",
            )
            .chunking(&CHUNKING)
            .coordinates()
            .build()?;
        ds.add_variable("data_quality_bitmask", pixel_flags)?;

        for name in ANGLES {
            ds.add_variable(name, angle_variable(height, height, name)?)?;
        }
        Ok(())
    }

    fn add_easy_variables(&self, ds: &mut Dataset, height: usize) -> Result<()> {
        self.add_original_variables(ds, height)?;

        let reflectance = VariableBuilder::new(DataType::F32, &[height, height], &["y", "x"])?
            .standard_name("toa_bidirectional_reflectance_vis")
            .units("1")
            .encoding(
                DataType::U16,
                REFLECTANCE_SCALE,
                0.0,
                default_fill_value(DataType::U16),
            )
            .chunking(&CHUNKING)
            .coordinates()
            .build()?;
        ds.add_variable("toa_bidirectional_reflectance", reflectance)?;

        for (name, effects) in [
            ("u_independent_toa_bidirectional_reflectance", "independent effects"),
            ("u_structured_toa_bidirectional_reflectance", "structured effects"),
            ("u_common_toa_bidirectional_reflectance", "common effects"),
        ] {
            let var = VariableBuilder::new(DataType::F32, &[height, height], &["y", "x"])?
                .long_name(format!("uncertainty of reflectance from {effects}").as_str())
                .units("1")
                .encoding(
                    DataType::U16,
                    REFLECTANCE_SCALE,
                    0.0,
                    default_fill_value(DataType::U16),
                )
                .chunking(&CHUNKING)
                .coordinates()
                .build()?;
            ds.add_variable(name, var)?;
        }

        ds.add_variable("solar_irradiance_vis", scalar_f32("Solar effective irradiance", "W*m-2")?)?;
        ds.add_variable(
            "u_solar_irradiance_vis",
            scalar_f32("uncertainty of solar effective irradiance", "W*m-2")?,
        )
    }

    fn add_full_variables(&self, ds: &mut Dataset, height: usize) -> Result<()> {
        self.add_original_variables(ds, height)?;

        for name in ["u_latitude", "u_longitude"] {
            let var = VariableBuilder::new(DataType::F32, &[height, height], &["y", "x"])?
                .long_name(name)
                .units("degree")
                .chunking(&CHUNKING)
                .coordinates()
                .build()?;
            ds.add_variable(name, var)?;
        }
        let u_time = VariableBuilder::new(DataType::F64, &[height], &["y"])?
            .long_name("uncertainty of acquisition time")
            .units("s")
            .build()?;
        ds.add_variable("u_time", u_time)?;

        ds.add_variable("a0_vis", scalar_f32("Calibration coefficient at launch", "W*m-2*sr-1/count")?)?;
        ds.add_variable(
            "u_a0_vis",
            scalar_f32("uncertainty of calibration coefficient", "W*m-2*sr-1/count")?,
        )?;
        ds.add_variable("mean_count_space_vis", scalar_f32("Mean space view counts", "count")?)?;
        ds.add_variable(
            "u_mean_count_space_vis",
            scalar_f32("uncertainty of mean space view counts", "count")?,
        )
    }
}

fn scalar_f32(long_name: &str, units: &str) -> Result<Variable> {
    VariableBuilder::new(DataType::F32, &[1], &["calibration"])?
        .long_name(long_name)
        .units(units)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::FcdrTemplate;

    #[test]
    fn original_catalog_has_10_variables() {
        let mut ds = Dataset::new();
        Mviri.add_original_variables(&mut ds, 8).unwrap();
        assert_eq!(ds.len(), 10);
    }

    #[test]
    fn easy_catalog_has_16_variables() {
        let mut ds = Dataset::new();
        Mviri.add_easy_variables(&mut ds, 8).unwrap();
        assert_eq!(ds.len(), 16);
    }

    #[test]
    fn full_catalog_has_17_variables() {
        let mut ds = Dataset::new();
        Mviri.add_full_variables(&mut ds, 8).unwrap();
        assert_eq!(ds.len(), 17);
    }

    #[test]
    fn disk_is_square_and_chunked() {
        let mut ds = Dataset::new();
        Mviri.add_easy_variables(&mut ds, 8).unwrap();
        let refl = ds.variable("toa_bidirectional_reflectance").unwrap();
        assert_eq!(refl.shape(), &[8, 8]);
        assert_eq!(refl.encoding().chunk_sizes.as_deref(), Some(&CHUNKING[..]));
    }
}
