//! NetCDF serialization: the dataset writer, the reader with virtual-variable
//! support, and the product file-name convention.
pub mod filename;
pub mod reader;
pub mod writer;

pub use filename::{create_file_name_cdr, create_file_name_fcdr};
pub use reader::open;
pub use writer::{write, DEFAULT_COMPRESSION};

use netcdf::AttributeValue;

use crate::core::attributes::AttrValue;

/// Convert an in-memory attribute to the on-disk representation.
pub(crate) fn to_nc_attribute(value: &AttrValue) -> AttributeValue {
    match value {
        AttrValue::Str(s) => AttributeValue::Str(s.clone()),
        AttrValue::I8(v) => AttributeValue::Schar(*v),
        AttrValue::U8(v) => AttributeValue::Uchar(*v),
        AttrValue::I16(v) => AttributeValue::Short(*v),
        AttrValue::U16(v) => AttributeValue::Ushort(*v),
        AttrValue::I32(v) => AttributeValue::Int(*v),
        AttrValue::U32(v) => AttributeValue::Uint(*v),
        AttrValue::I64(v) => AttributeValue::Longlong(*v),
        AttrValue::F32(v) => AttributeValue::Float(*v),
        AttrValue::F64(v) => AttributeValue::Double(*v),
        AttrValue::U8s(v) => AttributeValue::Uchars(v.clone()),
        AttrValue::I32s(v) => AttributeValue::Ints(v.clone()),
        AttrValue::U32s(v) => AttributeValue::Uints(v.clone()),
        AttrValue::F64s(v) => AttributeValue::Doubles(v.clone()),
    }
}

/// Convert an on-disk attribute back to the in-memory representation.
/// Attribute flavors this crate never writes map to `None` and are skipped.
pub(crate) fn from_nc_attribute(value: AttributeValue) -> Option<AttrValue> {
    match value {
        AttributeValue::Str(s) => Some(AttrValue::Str(s)),
        AttributeValue::Schar(v) => Some(AttrValue::I8(v)),
        AttributeValue::Uchar(v) => Some(AttrValue::U8(v)),
        AttributeValue::Short(v) => Some(AttrValue::I16(v)),
        AttributeValue::Ushort(v) => Some(AttrValue::U16(v)),
        AttributeValue::Int(v) => Some(AttrValue::I32(v)),
        AttributeValue::Uint(v) => Some(AttrValue::U32(v)),
        AttributeValue::Longlong(v) => Some(AttrValue::I64(v)),
        AttributeValue::Float(v) => Some(AttrValue::F32(v)),
        AttributeValue::Double(v) => Some(AttrValue::F64(v)),
        AttributeValue::Uchars(v) => Some(AttrValue::U8s(v)),
        AttributeValue::Ints(v) => Some(AttrValue::I32s(v)),
        AttributeValue::Uints(v) => Some(AttrValue::U32s(v)),
        AttributeValue::Doubles(v) => Some(AttrValue::F64s(v)),
        _ => None,
    }
}
