//! The `Variable` type: a named multi-dimensional array plus semantic
//! attributes and a storage encoding.
//!
//! A variable is either `Stored` (a typed in-memory array) or `Derived` (a
//! lazy virtual variable carrying an arithmetic expression over its sibling
//! variables, with a memoized result cache).
use std::sync::Arc;

use ndarray::ArrayD;

use crate::core::attributes::Attributes;
use crate::core::data::ArrayData;
use crate::types::{DataType, FillValue};

/// Storage encoding: the on-disk element type plus packing parameters and
/// chunking. Every variable produced by a builder carries an internally
/// consistent encoding.
#[derive(Clone, Debug, PartialEq)]
pub struct Encoding {
    /// Target on-disk element type.
    pub dtype: DataType,
    pub scale_factor: Option<f64>,
    pub add_offset: Option<f64>,
    pub fill_value: Option<FillValue>,
    /// Fixed chunk shape for the outermost dimensions, if any.
    pub chunk_sizes: Option<Vec<usize>>,
}

impl Encoding {
    /// An identity encoding: stored exactly as held in memory.
    pub fn plain(dtype: DataType) -> Self {
        Encoding {
            dtype,
            scale_factor: None,
            add_offset: None,
            fill_value: None,
            chunk_sizes: None,
        }
    }
}

/// Variable payload: a concrete array, or an unevaluated expression.
#[derive(Clone, Debug)]
pub enum VariableData {
    Stored(ArrayData),
    Derived {
        expression: String,
        cache: Option<Arc<ArrayD<f64>>>,
    },
}

/// A labeled multi-dimensional array with dimension names, semantic
/// attributes, and a storage encoding. Attributes and encoding are fixed at
/// build time; the array contents stay mutable until the dataset is written.
#[derive(Clone, Debug)]
pub struct Variable {
    pub(crate) dims: Vec<String>,
    pub(crate) data: VariableData,
    pub(crate) attrs: Attributes,
    pub(crate) encoding: Encoding,
}

impl Variable {
    /// A virtual variable computed on demand from `expression`.
    pub fn derived(expression: &str) -> Self {
        let mut attrs = Attributes::new();
        // Infallible: both keys are in the recognized catalog.
        let _ = attrs.set("virtual", "true");
        let _ = attrs.set("expression", expression);
        Variable {
            dims: Vec::new(),
            data: VariableData::Derived {
                expression: expression.to_string(),
                cache: None,
            },
            attrs,
            encoding: Encoding::plain(DataType::F64),
        }
    }

    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    pub fn attrs(&self) -> &Attributes {
        &self.attrs
    }

    pub fn encoding(&self) -> &Encoding {
        &self.encoding
    }

    pub fn is_virtual(&self) -> bool {
        matches!(self.data, VariableData::Derived { .. })
    }

    pub fn expression(&self) -> Option<&str> {
        match &self.data {
            VariableData::Derived { expression, .. } => Some(expression),
            VariableData::Stored(_) => None,
        }
    }

    /// The stored array, if this variable is not virtual.
    pub fn data(&self) -> Option<&ArrayData> {
        match &self.data {
            VariableData::Stored(d) => Some(d),
            VariableData::Derived { .. } => None,
        }
    }

    /// Mutable access to the stored array for filling in real values.
    pub fn data_mut(&mut self) -> Option<&mut ArrayData> {
        match &mut self.data {
            VariableData::Stored(d) => Some(d),
            VariableData::Derived { .. } => None,
        }
    }

    pub fn shape(&self) -> &[usize] {
        match &self.data {
            VariableData::Stored(d) => d.shape(),
            VariableData::Derived { .. } => &[],
        }
    }
}
