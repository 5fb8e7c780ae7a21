//! The `Dataset` container: an ordered mapping of variable names to variables
//! plus the global attribute map, with dimension-length consistency enforced
//! at insertion time.
use std::sync::Arc;

use indexmap::IndexMap;
use ndarray::ArrayD;
use tracing::debug;

use crate::core::attributes::AttrValue;
use crate::core::data::ArrayData;
use crate::core::variable::{Variable, VariableData};
use crate::error::{Error, Result};
use crate::expr;

/// Global attributes the caller must supply before a dataset may be written.
pub const MANDATORY_GLOBAL_ATTRIBUTES: &[&str] = &[
    "institution",
    "title",
    "source",
    "history",
    "references",
    "comment",
];

/// Conventions tag stamped on every product.
pub const CONVENTIONS: &str = "CF-1.6";

/// License string stamped on every product.
pub const LICENSE: &str = "This dataset is released for use under a CC-BY licence \
and was developed in the EC FIDUCEO project \"Fidelity and Uncertainty in Climate \
Data Records from Earth Observations\".";

/// An in-memory array dataset: ordered variables plus global attributes.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    variables: IndexMap<String, Variable>,
    attrs: IndexMap<String, AttrValue>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty dataset pre-stamped with the conventions tag, license,
    /// writer version, and the template key used to build it.
    pub fn with_standard_attributes(template_key: &str) -> Self {
        let mut ds = Self::new();
        ds.set_attribute("Conventions", CONVENTIONS);
        ds.set_attribute("licence", LICENSE);
        ds.set_attribute("writer_version", crate::WRITER_VERSION);
        ds.set_attribute("template_key", template_key);
        ds
    }

    /// Insert a variable, verifying that every dimension name it shares with
    /// an existing variable agrees on length.
    pub fn add_variable(&mut self, name: &str, var: Variable) -> Result<()> {
        if self.variables.contains_key(name) {
            return Err(Error::DuplicateVariable(name.to_string()));
        }
        let dims = self.dimensions();
        for (dim, len) in var.dims().iter().zip(var.shape()) {
            if let Some(&existing) = dims.get(dim.as_str()) {
                if existing != *len {
                    return Err(Error::DimensionMismatch {
                        name: dim.clone(),
                        expected: existing,
                        actual: *len,
                    });
                }
            }
        }
        debug!(variable = name, dims = ?var.dims(), "adding variable");
        self.variables.insert(name.to_string(), var);
        Ok(())
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    pub fn variable_mut(&mut self, name: &str) -> Option<&mut Variable> {
        self.variables.get_mut(name)
    }

    /// Mutable access to a stored variable's array, for filling in values.
    pub fn data_mut(&mut self, name: &str) -> Result<&mut ArrayData> {
        self.variables
            .get_mut(name)
            .ok_or_else(|| Error::NoSuchVariable(name.to_string()))?
            .data_mut()
            .ok_or_else(|| Error::VirtualVariable(name.to_string()))
    }

    pub fn variables(&self) -> impl Iterator<Item = (&str, &Variable)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// The named axes shared across variables, in first-use order.
    pub fn dimensions(&self) -> IndexMap<&str, usize> {
        let mut dims = IndexMap::new();
        for var in self.variables.values() {
            for (dim, len) in var.dims().iter().zip(var.shape()) {
                dims.entry(dim.as_str()).or_insert(*len);
            }
        }
        dims
    }

    pub fn set_attribute<V: Into<AttrValue>>(&mut self, key: &str, value: V) {
        self.attrs.insert(key.to_string(), value.into());
    }

    pub fn attribute(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.get(key)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The template key stamped by the builder, if any.
    pub fn template_key(&self) -> Option<&str> {
        self.attribute("template_key").and_then(AttrValue::as_str)
    }

    /// Verify the mandatory global attributes are present and non-empty.
    pub fn ensure_mandatory_attributes(&self) -> Result<()> {
        for &key in MANDATORY_GLOBAL_ATTRIBUTES {
            let present = self
                .attrs
                .get(key)
                .map(|v| v.as_str().map_or(true, |s| !s.is_empty()))
                .unwrap_or(false);
            if !present {
                return Err(Error::MissingAttribute(key));
            }
        }
        Ok(())
    }

    /// Load a variable's values as f64. For a stored variable this is a
    /// plain conversion; for a virtual variable the expression is evaluated
    /// against the dataset's stored variables at most once, and the cached
    /// result is returned on every later call.
    pub fn load(&mut self, name: &str) -> Result<Arc<ArrayD<f64>>> {
        let var = self
            .variables
            .get(name)
            .ok_or_else(|| Error::NoSuchVariable(name.to_string()))?;

        let expression = match &var.data {
            VariableData::Stored(data) => return Ok(Arc::new(data.to_f64())),
            VariableData::Derived { expression, cache } => {
                if let Some(cached) = cache {
                    return Ok(Arc::clone(cached));
                }
                expression.clone()
            }
        };

        let mut inputs = IndexMap::new();
        for (var_name, v) in &self.variables {
            if let VariableData::Stored(data) = &v.data {
                inputs.insert(var_name.clone(), data.to_f64());
            }
        }
        debug!(variable = name, expression = %expression, "evaluating virtual variable");
        let result = Arc::new(expr::evaluate(&expression, &inputs)?);

        if let Some(VariableData::Derived { cache, .. }) =
            self.variables.get_mut(name).map(|v| &mut v.data)
        {
            *cache = Some(Arc::clone(&result));
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::VariableBuilder;
    use crate::types::DataType;

    #[test]
    fn dimension_conflict_is_rejected() {
        let mut ds = Dataset::new();
        let a = VariableBuilder::new(DataType::F32, &[3, 4], &["y", "x"])
            .unwrap()
            .build()
            .unwrap();
        let b = VariableBuilder::new(DataType::F32, &[3, 5], &["y", "x"])
            .unwrap()
            .build()
            .unwrap();
        ds.add_variable("a", a).unwrap();
        let err = ds.add_variable("b", b).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { .. }));
    }

    #[test]
    fn duplicate_variable_is_rejected() {
        let mut ds = Dataset::new();
        let make = || {
            VariableBuilder::new(DataType::U8, &[2], &["y"])
                .unwrap()
                .build()
                .unwrap()
        };
        ds.add_variable("flags", make()).unwrap();
        let err = ds.add_variable("flags", make()).unwrap_err();
        assert!(matches!(err, Error::DuplicateVariable(_)));
    }

    #[test]
    fn mandatory_attributes_check() {
        let mut ds = Dataset::with_standard_attributes("AVHRR");
        assert!(ds.ensure_mandatory_attributes().is_err());
        for key in MANDATORY_GLOBAL_ATTRIBUTES {
            ds.set_attribute(key, "filled in");
        }
        assert!(ds.ensure_mandatory_attributes().is_ok());
    }

    #[test]
    fn standard_attributes_are_stamped() {
        let ds = Dataset::with_standard_attributes("HIRS3");
        assert_eq!(ds.template_key(), Some("HIRS3"));
        assert_eq!(
            ds.attribute("Conventions").and_then(AttrValue::as_str),
            Some(CONVENTIONS)
        );
        assert!(ds.attribute("licence").is_some());
        assert!(ds.attribute("writer_version").is_some());
    }

    #[test]
    fn virtual_variable_has_no_mutable_array() {
        let mut ds = Dataset::new();
        ds.add_variable("ratio", Variable::derived("a / b")).unwrap();
        let err = ds.data_mut("ratio").unwrap_err();
        assert!(matches!(err, Error::VirtualVariable(ref name) if name == "ratio"));
        let err = ds.data_mut("absent").unwrap_err();
        assert!(matches!(err, Error::NoSuchVariable(_)));
    }
}
