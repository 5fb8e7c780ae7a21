//! End-to-end tests: build a template, fill it, write the NetCDF file, and
//! read it back.
use std::path::PathBuf;
use std::sync::Arc;

use cdrkit::core::builder::VariableBuilder;
use cdrkit::core::variable::Variable;
use cdrkit::{
    create_cdr_template, create_fcdr_template, map_global_flags, open, write, DataType, Dataset,
    Error, ProductVariant, DEFAULT_COMPRESSION, MANDATORY_GLOBAL_ATTRIBUTES,
};

fn fill_mandatory_attributes(ds: &mut Dataset) {
    for key in MANDATORY_GLOBAL_ATTRIBUTES {
        ds.set_attribute(key, "integration test");
    }
}

fn out_path(dir: &tempfile::TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

#[test]
fn cdr_template_roundtrip_decodes_packed_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = out_path(&dir, "aot.nc");

    let mut ds = create_cdr_template("AOT", 4, 3, None).unwrap();
    fill_mandatory_attributes(&mut ds);
    // One real value; the rest of the swath stays NaN.
    ds.data_mut("aot").unwrap().as_f32_mut().unwrap()[[0, 0]] = 0.5;

    write(&ds, &path, DEFAULT_COMPRESSION, false).unwrap();
    let back = open(&path).unwrap();

    assert_eq!(back.len(), ds.len());
    assert_eq!(
        back.attribute("institution").and_then(|v| v.as_str()),
        Some("integration test")
    );

    // The aot variable is scale/offset packed, so it comes back decoded
    // to f64 with fill mapped to NaN.
    let aot = back.variable("aot").unwrap();
    assert_eq!(aot.encoding().dtype, DataType::I16);
    let values = aot.data().unwrap().as_f64().unwrap();
    assert!((values[[0, 0]] - 0.5).abs() < 1e-6);
    assert!(values[[0, 1]].is_nan());
    assert!(values[[2, 3]].is_nan());

    // The flag variable is stored natively and unpacked.
    let flags = back.variable("quality_pixel_bitmask").unwrap();
    assert!(flags.data().unwrap().as_u8().unwrap().iter().all(|&v| v == 0));
}

#[test]
fn existing_file_is_not_replaced_without_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = out_path(&dir, "sst.nc");

    let mut ds = create_cdr_template("SST", 4, 3, None).unwrap();
    fill_mandatory_attributes(&mut ds);
    ds.set_attribute("title", "first write");
    write(&ds, &path, DEFAULT_COMPRESSION, false).unwrap();

    ds.set_attribute("title", "second write");
    let err = write(&ds, &path, DEFAULT_COMPRESSION, false).unwrap_err();
    assert!(matches!(err, Error::FileExists { .. }));

    // The original file is untouched by the failed write.
    let back = open(&path).unwrap();
    assert_eq!(
        back.attribute("title").and_then(|v| v.as_str()),
        Some("first write")
    );

    write(&ds, &path, DEFAULT_COMPRESSION, true).unwrap();
    let back = open(&path).unwrap();
    assert_eq!(
        back.attribute("title").and_then(|v| v.as_str()),
        Some("second write")
    );
}

#[test]
fn missing_mandatory_attribute_blocks_the_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = out_path(&dir, "incomplete.nc");

    let ds = create_cdr_template("AOT", 4, 3, None).unwrap();
    let err = write(&ds, &path, DEFAULT_COMPRESSION, false).unwrap_err();
    assert!(matches!(err, Error::MissingAttribute(_)));
    assert!(!path.exists());
}

#[test]
fn rejected_overwrite_keeps_the_previous_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = out_path(&dir, "aot.nc");

    let mut ds = create_cdr_template("AOT", 4, 3, None).unwrap();
    fill_mandatory_attributes(&mut ds);
    ds.set_attribute("title", "good product");
    write(&ds, &path, DEFAULT_COMPRESSION, false).unwrap();

    // Overwriting with a dataset that fails validation must leave the
    // earlier file in place rather than deleting it and then erroring.
    let incomplete = create_cdr_template("AOT", 4, 3, None).unwrap();
    let err = write(&incomplete, &path, DEFAULT_COMPRESSION, true).unwrap_err();
    assert!(matches!(err, Error::MissingAttribute(_)));

    let back = open(&path).unwrap();
    assert_eq!(
        back.attribute("title").and_then(|v| v.as_str()),
        Some("good product")
    );
}

#[test]
fn virtual_variable_survives_roundtrip_and_is_memoized() {
    let dir = tempfile::tempdir().unwrap();
    let path = out_path(&dir, "virtual.nc");

    let mut ds = Dataset::new();
    fill_mandatory_attributes(&mut ds);
    let bt = VariableBuilder::new(DataType::F32, &[2, 3], &["y", "x"])
        .unwrap()
        .units("K")
        .build()
        .unwrap();
    ds.add_variable("bt", bt).unwrap();
    {
        let data = ds.data_mut("bt").unwrap().as_f32_mut().unwrap();
        for (i, v) in data.iter_mut().enumerate() {
            *v = 280.0 + i as f32;
        }
    }
    ds.add_variable("bt_celsius", Variable::derived("bt - 273.15"))
        .unwrap();

    write(&ds, &path, DEFAULT_COMPRESSION, false).unwrap();
    let mut back = open(&path).unwrap();

    let var = back.variable("bt_celsius").unwrap();
    assert!(var.is_virtual());
    assert_eq!(var.expression(), Some("bt - 273.15"));

    let first = back.load("bt_celsius").unwrap();
    assert_eq!(first.shape(), &[2, 3]);
    assert!((first[[0, 0]] - (280.0 - 273.15)).abs() < 1e-6);
    assert!((first[[1, 2]] - (285.0 - 273.15)).abs() < 1e-6);

    // Second load returns the identical cached array.
    let second = back.load("bt_celsius").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn hirs_channel_escalation_survives_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = out_path(&dir, "hirs.nc");

    let mut ds = create_fcdr_template("HIRS3", ProductVariant::Original, 4).unwrap();
    fill_mandatory_attributes(&mut ds);
    {
        // Row 1: every channel flagged do-not-use. Row 2: a single channel.
        let channel_flags = ds
            .data_mut("quality_channel_bitmask")
            .unwrap()
            .as_u8_mut()
            .unwrap();
        for c in 0..cdrkit::templates::hirs::NUM_CHANNELS {
            channel_flags[[1, c]] = 1;
        }
        channel_flags[[2, 0]] = 1;
    }
    map_global_flags(&mut ds).unwrap();

    write(&ds, &path, DEFAULT_COMPRESSION, false).unwrap();
    let back = open(&path).unwrap();

    let global = back.variable("quality_pixel_bitmask").unwrap();
    let global = global.data().unwrap().as_u8().unwrap();
    assert_eq!(global[[0, 0]], 0);
    assert_eq!(global[[1, 0]], cdrkit::flags::INVALID);
    assert_eq!(global[[2, 0]], cdrkit::flags::USE_WITH_CAUTION);
}
