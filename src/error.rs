//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Converts underlying I/O and NetCDF errors, and provides semantic variants for
//! configuration mistakes, precondition violations, and data-range failures.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("NetCDF error: {0}")]
    NetCdf(#[from] netcdf::Error),

    #[error("Array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("Unknown template key: {key}")]
    UnknownTemplate { key: String },

    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: &'static str },

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Unrecognized attribute key `{key}` for variable metadata")]
    UnknownAttribute { key: String },

    #[error("Fill value type {fill} does not match element type {dtype}")]
    FillValueType { fill: String, dtype: String },

    #[error("Dimension `{name}` has length {actual}, expected {expected}")]
    DimensionMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("Variable `{0}` already exists in dataset")]
    DuplicateVariable(String),

    #[error("No variable named `{0}` in dataset")]
    NoSuchVariable(String),

    #[error("Variable `{0}` is virtual and has no stored array; evaluate it with Dataset::load")]
    VirtualVariable(String),

    #[error("Missing mandatory global attribute `{0}`")]
    MissingAttribute(&'static str),

    #[error("File already exists: {path} (pass overwrite=true to replace it)")]
    FileExists { path: String },

    #[error(
        "Scaled values [{min}, {max}] exceed the representable range of {dtype} for variable `{name}`"
    )]
    ScaleRange {
        name: String,
        dtype: String,
        min: f64,
        max: f64,
    },

    #[error("Expression error: {0}")]
    Expression(String),
}
