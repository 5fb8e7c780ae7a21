//! Surface albedo CDR template on a regular lat/lon grid.
use crate::core::builder::{self, VariableBuilder};
use crate::core::dataset::Dataset;
use crate::core::fill::default_fill_value;
use crate::core::variable::Variable;
use crate::error::Result;
use crate::templates::CdrTemplate;
use crate::types::DataType;

pub const CHUNKING: [usize; 2] = [500, 500];

pub struct Albedo;

impl CdrTemplate for Albedo {
    fn add_variables(
        &self,
        ds: &mut Dataset,
        width: usize,
        height: usize,
        _num_samples: Option<usize>,
    ) -> Result<()> {
        builder::add_gridded_geolocation(ds, width, height)?;
        builder::add_gridded_quality_flags(ds, width, height)?;

        ds.add_variable(
            "surface_albedo",
            gridded_fraction(width, height, "surface_albedo", "Surface albedo")?,
        )?;
        for (name, effects) in [
            ("u_independent_surface_albedo", "independent effects"),
            ("u_structured_surface_albedo", "structured effects"),
        ] {
            ds.add_variable(
                name,
                gridded_fraction(
                    width,
                    height,
                    name,
                    &format!("uncertainty of surface albedo from {effects}"),
                )?,
            )?;
        }

        let count = VariableBuilder::new(DataType::I32, &[height, width], &["lat", "lon"])?
            .long_name("Number of observations contributing to the cell")
            .units("1")
            .chunking(&CHUNKING)
            .build()?;
        ds.add_variable("observation_count", count)
    }
}

fn gridded_fraction(
    width: usize,
    height: usize,
    name: &str,
    long_name: &str,
) -> Result<Variable> {
    let mut builder = VariableBuilder::new(DataType::F32, &[height, width], &["lat", "lon"])?
        .long_name(long_name)
        .units("1")
        .encoding(DataType::I16, 1e-4, 0.0, default_fill_value(DataType::I16))
        .chunking(&CHUNKING);
    if name == "surface_albedo" {
        builder = builder.standard_name("surface_albedo");
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_9_variables() {
        let mut ds = Dataset::new();
        Albedo.add_variables(&mut ds, 10, 6, None).unwrap();
        assert_eq!(ds.len(), 9);
    }

    #[test]
    fn grid_axes_use_lat_lon_dimensions() {
        let mut ds = Dataset::new();
        Albedo.add_variables(&mut ds, 10, 6, None).unwrap();
        let albedo = ds.variable("surface_albedo").unwrap();
        assert_eq!(albedo.shape(), &[6, 10]);
        assert_eq!(albedo.dims(), &["lat".to_string(), "lon".to_string()]);
        assert!(ds.variable("lat_bnds").is_some());
    }
}
