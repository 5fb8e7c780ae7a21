//! High-level library API: build a template dataset from a sensor/product
//! key, map sensor flags into the global quality bitmask, and read or write
//! product files. Prefer these entrypoints over the lower-level modules when
//! embedding the crate.
use tracing::info;

use crate::core::dataset::Dataset;
use crate::error::{Error, Result};
use crate::flags;
use crate::templates::{self, Template};
use crate::types::ProductVariant;

pub use crate::io::{create_file_name_cdr, create_file_name_fcdr, open, write};
pub use crate::io::DEFAULT_COMPRESSION;

/// Build an FCDR template dataset for `key` (e.g. `"AVHRR"`, `"HIRS3"`),
/// populated with the variable catalog of the requested variant and sized to
/// `height` scanlines.
pub fn create_fcdr_template(key: &str, variant: ProductVariant, height: usize) -> Result<Dataset> {
    let template = match templates::get_template(key)? {
        Template::Fcdr(t) => t,
        Template::Cdr(_) => {
            return Err(Error::InvalidArgument {
                arg: "key",
                value: format!("{key} is a CDR product, use create_cdr_template"),
            });
        }
    };
    let mut ds = Dataset::with_standard_attributes(key);
    match variant {
        ProductVariant::Original => template.add_original_variables(&mut ds, height)?,
        ProductVariant::Easy => template.add_easy_variables(&mut ds, height)?,
        ProductVariant::Full => template.add_full_variables(&mut ds, height)?,
    }
    info!(key, %variant, height, variables = ds.len(), "created FCDR template");
    Ok(ds)
}

/// Build a CDR template dataset for `key` (e.g. `"AOT"`, `"SST_ENSEMBLE"`)
/// on a `width` by `height` grid. `num_samples` is required by the ensemble
/// products and ignored by the rest.
pub fn create_cdr_template(
    key: &str,
    width: usize,
    height: usize,
    num_samples: Option<usize>,
) -> Result<Dataset> {
    let template = match templates::get_template(key)? {
        Template::Cdr(t) => t,
        Template::Fcdr(_) => {
            return Err(Error::InvalidArgument {
                arg: "key",
                value: format!("{key} is an FCDR product, use create_fcdr_template"),
            });
        }
    };
    let mut ds = Dataset::with_standard_attributes(key);
    template.add_variables(&mut ds, width, height, num_samples)?;
    info!(key, width, height, variables = ds.len(), "created CDR template");
    Ok(ds)
}

/// Aggregate the sensor-specific quality bitmasks of `ds` into the global
/// `quality_pixel_bitmask`, using the mapper registered for the template key
/// the dataset was built from. Datasets without a sensor flag layer pass
/// through unchanged.
pub fn map_global_flags(ds: &mut Dataset) -> Result<()> {
    let key = ds.template_key().unwrap_or_default().to_string();
    flags::get_flag_mapper(&key).map_global_flags(ds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fcdr_key_on_cdr_entrypoint_is_rejected() {
        let err = create_cdr_template("AVHRR", 10, 10, None).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { arg: "key", .. }));
    }

    #[test]
    fn cdr_key_on_fcdr_entrypoint_is_rejected() {
        let err = create_fcdr_template("UTH", ProductVariant::Easy, 10).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { arg: "key", .. }));
    }

    #[test]
    fn created_template_carries_its_key() {
        let ds = create_fcdr_template("AVHRR", ProductVariant::Easy, 4).unwrap();
        assert_eq!(ds.template_key(), Some("AVHRR"));
        assert_eq!(ds.len(), 29);
    }

    #[test]
    fn flag_mapping_without_sensor_flags_is_a_no_op() {
        let mut ds = create_cdr_template("AOT", 6, 4, None).unwrap();
        let before = ds.len();
        map_global_flags(&mut ds).unwrap();
        assert_eq!(ds.len(), before);
    }
}
