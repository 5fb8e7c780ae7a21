//! Variable construction: the composable `VariableBuilder` and the composite
//! helpers shared by many sensor templates (geolocation pairs, gridded
//! coordinate axes, the standard global quality-flag variable).
use crate::core::attributes::{AttrValue, Attributes};
use crate::core::dataset::Dataset;
use crate::core::fill;
use crate::core::variable::{Encoding, Variable, VariableData};
use crate::error::Result;
use crate::flags;
use crate::types::{DataType, FillValue};

/// Scale factor packing longitudes (±180°) into the i16 range.
pub const LON_SCALE: f64 = 360.0 / 65534.0;
/// Scale factor packing latitudes (±90°) into the i16 range.
pub const LAT_SCALE: f64 = 180.0 / 65534.0;

/// Builds a single `Variable`: allocates the filled array up front, then
/// collects attributes and encoding settings, validating everything at
/// `build` time.
pub struct VariableBuilder {
    dtype: DataType,
    shape: Vec<usize>,
    dims: Vec<String>,
    fill: Option<FillValue>,
    attrs: Vec<(String, AttrValue)>,
    encoding: Encoding,
}

impl VariableBuilder {
    pub fn new(dtype: DataType, shape: &[usize], dims: &[&str]) -> Result<Self> {
        if shape.len() != dims.len() || shape.is_empty() || shape.len() > 4 {
            return Err(crate::error::Error::InvalidArgument {
                arg: "dims",
                value: format!("{} dims for {} axes", dims.len(), shape.len()),
            });
        }
        Ok(VariableBuilder {
            dtype,
            shape: shape.to_vec(),
            dims: dims.iter().map(|d| d.to_string()).collect(),
            fill: None,
            attrs: Vec::new(),
            encoding: Encoding::plain(dtype),
        })
    }

    /// Override the array fill value (and record it in the encoding).
    pub fn fill_value(mut self, fill: FillValue) -> Self {
        self.fill = Some(fill);
        self.encoding.fill_value = Some(fill);
        self
    }

    pub fn attr<V: Into<AttrValue>>(mut self, key: &str, value: V) -> Self {
        self.attrs.push((key.to_string(), value.into()));
        self
    }

    pub fn units(self, units: &str) -> Self {
        self.attr("units", units)
    }

    pub fn standard_name(self, name: &str) -> Self {
        self.attr("standard_name", name)
    }

    pub fn long_name(self, name: &str) -> Self {
        self.attr("long_name", name)
    }

    /// CF back-reference linking a data variable to its geolocation.
    pub fn coordinates(self) -> Self {
        self.attr("coordinates", "longitude latitude")
    }

    pub fn scale_offset(mut self, scale: f64, offset: f64) -> Self {
        self.encoding.scale_factor = Some(scale);
        self.encoding.add_offset = Some(offset);
        self
    }

    pub fn chunking(mut self, chunks: &[usize]) -> Self {
        self.encoding.chunk_sizes = Some(chunks.to_vec());
        self
    }

    /// Compound encoding: on-disk dtype, scale/offset, and fill together.
    pub fn encoding(mut self, dtype: DataType, scale: f64, offset: f64, fill: FillValue) -> Self {
        self.encoding.dtype = dtype;
        self.encoding.scale_factor = Some(scale);
        self.encoding.add_offset = Some(offset);
        self.encoding.fill_value = Some(fill);
        self
    }

    pub fn build(self) -> Result<Variable> {
        // Float arrays start as NaN in memory; the provider constant is the
        // on-disk sentinel. Integer arrays start at the on-disk fill directly.
        let data_fill = match (self.fill, self.dtype) {
            (Some(f), _) => Some(f),
            (None, DataType::F32) => Some(FillValue::F32(f32::NAN)),
            (None, DataType::F64) => Some(FillValue::F64(f64::NAN)),
            (None, _) => None,
        };
        let data = fill::filled(self.dtype, &self.shape, data_fill)?;
        let mut attrs = Attributes::new();
        for (key, value) in self.attrs {
            attrs.set(&key, value)?;
        }
        let mut encoding = self.encoding;
        if encoding.fill_value.is_none() {
            encoding.fill_value = Some(fill::default_fill_value(encoding.dtype));
        }
        Ok(Variable {
            dims: self.dims,
            data: VariableData::Stored(data),
            attrs,
            encoding,
        })
    }
}

/// Add the 2-D swath latitude/longitude pair, f32 in memory and i16-encoded
/// on disk at ~0.003°/0.005° resolution.
pub fn add_swath_geolocation(ds: &mut Dataset, height: usize, width: usize) -> Result<()> {
    let latitude = VariableBuilder::new(DataType::F32, &[height, width], &["y", "x"])?
        .standard_name("latitude")
        .units("degrees_north")
        .attr("valid_min", -90.0)
        .attr("valid_max", 90.0)
        .encoding(DataType::I16, LAT_SCALE, 0.0, fill::default_fill_value(DataType::I16))
        .build()?;
    ds.add_variable("latitude", latitude)?;

    let longitude = VariableBuilder::new(DataType::F32, &[height, width], &["y", "x"])?
        .standard_name("longitude")
        .units("degrees_east")
        .attr("valid_min", -180.0)
        .attr("valid_max", 180.0)
        .encoding(DataType::I16, LON_SCALE, 0.0, fill::default_fill_value(DataType::I16))
        .build()?;
    ds.add_variable("longitude", longitude)
}

/// Add 1-D latitude/longitude axes plus cell boundaries for regular-grid
/// products.
pub fn add_gridded_geolocation(ds: &mut Dataset, width: usize, height: usize) -> Result<()> {
    let lat = VariableBuilder::new(DataType::F32, &[height], &["lat"])?
        .standard_name("latitude")
        .units("degrees_north")
        .attr("bounds", "lat_bnds")
        .build()?;
    ds.add_variable("lat", lat)?;

    let lon = VariableBuilder::new(DataType::F32, &[width], &["lon"])?
        .standard_name("longitude")
        .units("degrees_east")
        .attr("bounds", "lon_bnds")
        .build()?;
    ds.add_variable("lon", lon)?;

    let lat_bnds = VariableBuilder::new(DataType::F32, &[height, 2], &["lat", "bnds"])?
        .long_name("latitude cell boundaries")
        .units("degrees_north")
        .build()?;
    ds.add_variable("lat_bnds", lat_bnds)?;

    let lon_bnds = VariableBuilder::new(DataType::F32, &[width, 2], &["lon", "bnds"])?
        .long_name("longitude cell boundaries")
        .units("degrees_east")
        .build()?;
    ds.add_variable("lon_bnds", lon_bnds)
}

/// Add the standard 8-bit global quality-flag variable shared by every
/// product family.
pub fn add_quality_flags(ds: &mut Dataset, height: usize, width: usize) -> Result<()> {
    add_quality_flags_on(ds, &[height, width], &["y", "x"], true)
}

/// Quality-flag variant for regular-grid products on the lat/lon axes.
pub fn add_gridded_quality_flags(ds: &mut Dataset, width: usize, height: usize) -> Result<()> {
    add_quality_flags_on(ds, &[height, width], &["lat", "lon"], false)
}

fn add_quality_flags_on(
    ds: &mut Dataset,
    shape: &[usize],
    dims: &[&str],
    coordinates: bool,
) -> Result<()> {
    let mut builder = VariableBuilder::new(DataType::U8, shape, dims)?
        .fill_value(FillValue::U8(0))
        .standard_name("status_flag")
        .long_name("quality_pixel_bitmask")
        .attr("flag_masks", flags::GLOBAL_FLAG_MASKS.to_vec())
        .attr("flag_meanings", flags::GLOBAL_FLAG_MEANINGS);
    if coordinates {
        builder = builder.coordinates();
    }
    ds.add_variable("quality_pixel_bitmask", builder.build()?)
}
