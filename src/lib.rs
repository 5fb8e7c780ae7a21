#![doc = r#"
CDRKIT: template and metadata tooling for FIDUCEO-style climate data records.

This crate builds fully specified NetCDF product templates for satellite
climate data records (CDR) and fundamental climate data records (FCDR): each
supported sensor or product key expands into a dataset pre-populated with
geolocation, quality-flag, channel, and uncertainty variables carrying
complete CF attributes and storage encodings. On top of the templates it
provides sensor-flag aggregation into a shared global quality bitmask, a
compressed NetCDF writer/reader pair, the product file-naming convention,
and lazy "virtual" variables computed from arithmetic expressions over their
sibling variables.

Quick start: build, fill, and write an FCDR template
----------------------------------------------------
```rust,no_run
use std::path::Path;
use cdrkit::{create_fcdr_template, map_global_flags, write, ProductVariant};

fn main() -> cdrkit::Result<()> {
    let mut ds = cdrkit::create_fcdr_template("AVHRR", ProductVariant::Easy, 12835)?;

    // Fill in the mandatory global attributes, then real pixel data.
    for key in cdrkit::MANDATORY_GLOBAL_ATTRIBUTES {
        ds.set_attribute(key, "...");
    }

    map_global_flags(&mut ds)?;
    write(&ds, Path::new("/out/avhrr_easy.nc"), cdrkit::DEFAULT_COMPRESSION, false)
}
```

Virtual variables
-----------------
```rust
use cdrkit::core::builder::VariableBuilder;
use cdrkit::core::dataset::Dataset;
use cdrkit::core::variable::Variable;
use cdrkit::types::DataType;

fn derived() -> cdrkit::Result<()> {
    let mut ds = Dataset::new();
    let bt = VariableBuilder::new(DataType::F32, &[3, 4], &["y", "x"])?.build()?;
    ds.add_variable("bt", bt)?;
    ds.add_variable("bt_celsius", Variable::derived("bt - 273.15"))?;
    let values = ds.load("bt_celsius")?; // evaluated once, cached afterwards
    assert_eq!(values.shape(), &[3, 4]);
    Ok(())
}
```
"#]

pub mod api;
pub mod core;
pub mod error;
pub mod expr;
pub mod flags;
pub mod io;
pub mod templates;
pub mod types;

pub use api::{
    create_cdr_template, create_fcdr_template, create_file_name_cdr, create_file_name_fcdr,
    map_global_flags, open, write, DEFAULT_COMPRESSION,
};
pub use core::dataset::{Dataset, CONVENTIONS, LICENSE, MANDATORY_GLOBAL_ATTRIBUTES};
pub use error::{Error, Result};
pub use templates::{get_template, Template, CDR_KEYS, FCDR_KEYS};
pub use types::{DataType, FillValue, ProductLevel, ProductVariant};

/// Version string stamped into global attributes and output file names.
pub const WRITER_VERSION: &str = env!("CARGO_PKG_VERSION");
