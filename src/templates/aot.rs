//! Aerosol optical thickness CDR template on the sensor swath grid.
use crate::core::builder::{self, VariableBuilder};
use crate::core::dataset::Dataset;
use crate::core::fill::default_fill_value;
use crate::core::variable::Variable;
use crate::error::Result;
use crate::templates::{time_vector, CdrTemplate};
use crate::types::DataType;

pub struct Aot;

impl CdrTemplate for Aot {
    fn add_variables(
        &self,
        ds: &mut Dataset,
        width: usize,
        height: usize,
        _num_samples: Option<usize>,
    ) -> Result<()> {
        builder::add_swath_geolocation(ds, height, width)?;
        builder::add_quality_flags(ds, height, width)?;
        time_vector(ds, height)?;

        let aot = swath_fraction(width, height, "Aerosol optical thickness at 550 nm")?;
        ds.add_variable("aot", aot)?;

        for (name, effects) in [
            ("u_independent_aot", "independent effects"),
            ("u_structured_aot", "structured effects"),
            ("u_common_aot", "common effects"),
        ] {
            ds.add_variable(
                name,
                swath_fraction(
                    width,
                    height,
                    &format!("uncertainty of aerosol optical thickness from {effects}"),
                )?,
            )?;
        }
        Ok(())
    }
}

fn swath_fraction(width: usize, height: usize, long_name: &str) -> Result<Variable> {
    VariableBuilder::new(DataType::F32, &[height, width], &["y", "x"])?
        .long_name(long_name)
        .units("1")
        .encoding(DataType::I16, 1e-4, 0.0, default_fill_value(DataType::I16))
        .coordinates()
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_8_variables() {
        let mut ds = Dataset::new();
        Aot.add_variables(&mut ds, 9, 5, None).unwrap();
        assert_eq!(ds.len(), 8);
    }

    #[test]
    fn aot_is_swath_shaped() {
        let mut ds = Dataset::new();
        Aot.add_variables(&mut ds, 9, 5, None).unwrap();
        assert_eq!(ds.variable("aot").unwrap().shape(), &[5, 9]);
    }
}
