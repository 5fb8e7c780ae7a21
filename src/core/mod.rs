//! Core data model: typed arrays, fill values, attributes, variables,
//! datasets, and the variable builder.
pub mod attributes;
pub mod builder;
pub mod data;
pub mod dataset;
pub mod fill;
pub mod scaling;
pub mod variable;
