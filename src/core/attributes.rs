//! Variable and global attribute handling.
//!
//! Attribute keys form a closed, enumerated catalog validated at construction
//! time rather than a free-form bag: a typo in a CF attribute name surfaces as
//! an error when the variable is built, not as a silently unused attribute in
//! the output file.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Attribute keys recognized on variables. Grouped by variable category:
/// CF identity, value semantics, flag semantics, uncertainty correlation
/// descriptors, and the virtual-variable markers.
pub const RECOGNIZED_KEYS: &[&str] = &[
    // CF identity
    "standard_name",
    "long_name",
    "units",
    "description",
    "calendar",
    "coordinates",
    "bounds",
    "ancillary_variables",
    // value semantics
    "valid_min",
    "valid_max",
    "add_offset",
    "scale_factor",
    // flag semantics
    "flag_masks",
    "flag_meanings",
    // uncertainty correlation descriptors
    "pixel_correlation_form",
    "pixel_correlation_units",
    "pixel_correlation_scales",
    "scan_correlation_form",
    "scan_correlation_units",
    "scan_correlation_scales",
    "image_correlation_form",
    "image_correlation_units",
    "image_correlation_scales",
    "time_correlation_form",
    "time_correlation_units",
    "time_correlation_scales",
    "pdf_shape",
    // virtual variables
    "virtual",
    "expression",
];

/// A scalar or small-vector attribute value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    Str(String),
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    F32(f32),
    F64(f64),
    U8s(Vec<u8>),
    I32s(Vec<i32>),
    U32s(Vec<u32>),
    F64s(Vec<f64>),
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Str(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::Str(v)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::F64(v)
    }
}

impl From<f32> for AttrValue {
    fn from(v: f32) -> Self {
        AttrValue::F32(v)
    }
}

impl From<i32> for AttrValue {
    fn from(v: i32) -> Self {
        AttrValue::I32(v)
    }
}

impl From<Vec<u8>> for AttrValue {
    fn from(v: Vec<u8>) -> Self {
        AttrValue::U8s(v)
    }
}

impl From<Vec<u32>> for AttrValue {
    fn from(v: Vec<u32>) -> Self {
        AttrValue::U32s(v)
    }
}

impl AttrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            AttrValue::I8(v) => Some(v as f64),
            AttrValue::U8(v) => Some(v as f64),
            AttrValue::I16(v) => Some(v as f64),
            AttrValue::U16(v) => Some(v as f64),
            AttrValue::I32(v) => Some(v as f64),
            AttrValue::U32(v) => Some(v as f64),
            AttrValue::I64(v) => Some(v as f64),
            AttrValue::F32(v) => Some(v as f64),
            AttrValue::F64(v) => Some(v),
            _ => None,
        }
    }
}

/// An ordered mapping of recognized attribute keys to values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Attributes(IndexMap<String, AttrValue>);

impl Attributes {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Set an attribute, rejecting keys outside the recognized catalog.
    pub fn set<V: Into<AttrValue>>(&mut self, key: &str, value: V) -> Result<()> {
        if !RECOGNIZED_KEYS.contains(&key) {
            return Err(Error::UnknownAttribute {
                key: key.to_string(),
            });
        }
        self.0.insert(key.to_string(), value.into());
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(AttrValue::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get_recognized_key() {
        let mut attrs = Attributes::new();
        attrs.set("units", "K").unwrap();
        assert_eq!(attrs.get_str("units"), Some("K"));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let mut attrs = Attributes::new();
        let err = attrs.set("unitz", "K").unwrap_err();
        assert!(matches!(err, Error::UnknownAttribute { .. }));
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut attrs = Attributes::new();
        attrs.set("standard_name", "latitude").unwrap();
        attrs.set("units", "degrees_north").unwrap();
        attrs.set("valid_min", -90.0).unwrap();
        let keys: Vec<&str> = attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["standard_name", "units", "valid_min"]);
    }
}
