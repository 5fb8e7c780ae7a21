//! Upper tropospheric humidity CDR template: a regular grid with separate
//! ascending- and descending-node aggregates.
use crate::core::builder::{self, VariableBuilder};
use crate::core::dataset::Dataset;
use crate::core::fill::default_fill_value;
use crate::core::variable::Variable;
use crate::error::Result;
use crate::templates::CdrTemplate;
use crate::types::DataType;

pub struct Uth;

const NODES: [&str; 2] = ["ascend", "descend"];

impl CdrTemplate for Uth {
    fn add_variables(
        &self,
        ds: &mut Dataset,
        width: usize,
        height: usize,
        _num_samples: Option<usize>,
    ) -> Result<()> {
        builder::add_gridded_geolocation(ds, width, height)?;
        builder::add_gridded_quality_flags(ds, width, height)?;

        for node in NODES {
            let uth = VariableBuilder::new(DataType::F32, &[height, width], &["lat", "lon"])?
                .long_name(format!("Upper tropospheric humidity, {node}ing passes").as_str())
                .units("%")
                .encoding(DataType::I16, 0.01, 0.0, default_fill_value(DataType::I16))
                .build()?;
            ds.add_variable(&format!("uth_{node}"), uth)?;

            for (prefix, effects) in [
                ("u_independent_uth", "independent effects"),
                ("u_structured_uth", "structured effects"),
            ] {
                let var = uncertainty_cell(
                    width,
                    height,
                    &format!("uncertainty of UTH from {effects}, {node}ing passes"),
                )?;
                ds.add_variable(&format!("{prefix}_{node}"), var)?;
            }

            let count = VariableBuilder::new(DataType::I32, &[height, width], &["lat", "lon"])?
                .long_name(format!("Number of observations, {node}ing passes").as_str())
                .units("1")
                .build()?;
            ds.add_variable(&format!("observation_count_{node}"), count)?;
        }
        Ok(())
    }
}

fn uncertainty_cell(width: usize, height: usize, long_name: &str) -> Result<Variable> {
    VariableBuilder::new(DataType::F32, &[height, width], &["lat", "lon"])?
        .long_name(long_name)
        .units("%")
        .encoding(DataType::I16, 0.01, 0.0, default_fill_value(DataType::I16))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_13_variables() {
        let mut ds = Dataset::new();
        Uth.add_variables(&mut ds, 12, 7, None).unwrap();
        assert_eq!(ds.len(), 13);
    }

    #[test]
    fn both_nodes_are_present() {
        let mut ds = Dataset::new();
        Uth.add_variables(&mut ds, 12, 7, None).unwrap();
        for node in NODES {
            assert!(ds.variable(&format!("uth_{node}")).is_some());
            assert!(ds.variable(&format!("observation_count_{node}")).is_some());
        }
    }
}
