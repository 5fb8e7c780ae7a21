//! Sea surface temperature CDR templates: the plain retrieval and the
//! ensemble variant carrying `num_samples` realizations per pixel.
use crate::core::builder::{self, VariableBuilder};
use crate::core::dataset::Dataset;
use crate::core::fill::default_fill_value;
use crate::core::variable::Variable;
use crate::error::{Error, Result};
use crate::templates::{time_vector, CdrTemplate};
use crate::types::DataType;

pub struct Sst;
pub struct SstEnsemble;

impl CdrTemplate for Sst {
    fn add_variables(
        &self,
        ds: &mut Dataset,
        width: usize,
        height: usize,
        _num_samples: Option<usize>,
    ) -> Result<()> {
        add_common_variables(ds, width, height)
    }
}

impl CdrTemplate for SstEnsemble {
    fn add_variables(
        &self,
        ds: &mut Dataset,
        width: usize,
        height: usize,
        num_samples: Option<usize>,
    ) -> Result<()> {
        let num_samples = num_samples.ok_or(Error::MissingArgument {
            arg: "num_samples",
        })?;
        add_common_variables(ds, width, height)?;

        let ensemble = VariableBuilder::new(
            DataType::F32,
            &[num_samples, height, width],
            &["sample", "y", "x"],
        )?
        .long_name("Ensemble of sea surface temperature realizations")
        .units("K")
        .encoding(DataType::I16, 0.005, 293.15, default_fill_value(DataType::I16))
        .coordinates()
        .build()?;
        ds.add_variable("sst_ensemble", ensemble)
    }
}

fn add_common_variables(ds: &mut Dataset, width: usize, height: usize) -> Result<()> {
    builder::add_swath_geolocation(ds, height, width)?;
    builder::add_quality_flags(ds, height, width)?;
    time_vector(ds, height)?;

    let sst = VariableBuilder::new(DataType::F32, &[height, width], &["y", "x"])?
        .standard_name("sea_surface_skin_temperature")
        .units("K")
        .encoding(DataType::I16, 0.005, 293.15, default_fill_value(DataType::I16))
        .coordinates()
        .build()?;
    ds.add_variable("sst", sst)?;

    let dtime = VariableBuilder::new(DataType::F32, &[height, width], &["y", "x"])?
        .long_name("Deviation from the scanline acquisition time")
        .units("s")
        .coordinates()
        .build()?;
    ds.add_variable("sst_dtime", dtime)?;

    for (name, effects) in [
        ("u_independent_sst", "independent effects"),
        ("u_structured_sst", "structured effects"),
        ("u_common_sst", "common effects"),
    ] {
        let var = uncertainty_variable(
            width,
            height,
            &format!("uncertainty of sea surface temperature from {effects}"),
        )?;
        ds.add_variable(name, var)?;
    }
    Ok(())
}

fn uncertainty_variable(width: usize, height: usize, long_name: &str) -> Result<Variable> {
    VariableBuilder::new(DataType::F32, &[height, width], &["y", "x"])?
        .long_name(long_name)
        .units("K")
        .encoding(DataType::I16, 0.001, 0.0, default_fill_value(DataType::I16))
        .coordinates()
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_catalog_has_9_variables() {
        let mut ds = Dataset::new();
        Sst.add_variables(&mut ds, 8, 6, None).unwrap();
        assert_eq!(ds.len(), 9);
    }

    #[test]
    fn ensemble_adds_the_sample_stack() {
        let mut ds = Dataset::new();
        SstEnsemble.add_variables(&mut ds, 8, 6, Some(3)).unwrap();
        assert_eq!(ds.len(), 10);
        assert_eq!(ds.variable("sst_ensemble").unwrap().shape(), &[3, 6, 8]);
    }

    #[test]
    fn ensemble_requires_num_samples() {
        let mut ds = Dataset::new();
        let err = SstEnsemble.add_variables(&mut ds, 8, 6, None).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingArgument {
                arg: "num_samples"
            }
        ));
    }
}
