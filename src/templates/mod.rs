//! Per-sensor template builders and the name-keyed factory.
//!
//! Each sensor module populates a dataset with its fixed variable catalog,
//! sized by the caller-supplied pixel grid. The factory resolves a template
//! key to the matching builder; keys are matched exactly, with no fuzzy
//! lookup or case folding.
use crate::core::builder::VariableBuilder;
use crate::core::dataset::Dataset;
use crate::core::variable::Variable;
use crate::error::{Error, Result};
use crate::types::{DataType, FillValue};

pub mod albedo;
pub mod amsub_mhs;
pub mod aot;
pub mod avhrr;
pub mod hirs;
pub mod mviri;
pub mod ssmt2;
pub mod sst;
pub mod uth;

/// FCDR template keys.
pub const FCDR_KEYS: &[&str] = &[
    "AVHRR", "HIRS2", "HIRS3", "HIRS4", "MVIRI", "AMSUB", "MHS", "SSMT2",
];

/// CDR template keys.
pub const CDR_KEYS: &[&str] = &["ALBEDO", "AOT", "SST", "SST_ENSEMBLE", "UTH"];

/// A swath-sensor template producing FCDR variants. The swath width is a
/// per-sensor constant; callers size the template by scanline count only.
pub trait FcdrTemplate: Sync {
    fn add_original_variables(&self, ds: &mut Dataset, height: usize) -> Result<()>;
    fn add_easy_variables(&self, ds: &mut Dataset, height: usize) -> Result<()>;
    fn add_full_variables(&self, ds: &mut Dataset, height: usize) -> Result<()>;
}

/// A CDR product template sized by an explicit grid, optionally with an
/// ensemble dimension.
pub trait CdrTemplate: Sync {
    fn add_variables(
        &self,
        ds: &mut Dataset,
        width: usize,
        height: usize,
        num_samples: Option<usize>,
    ) -> Result<()>;
}

pub enum Template {
    Fcdr(&'static dyn FcdrTemplate),
    Cdr(&'static dyn CdrTemplate),
}

static AVHRR: avhrr::Avhrr = avhrr::Avhrr;
static HIRS: hirs::Hirs = hirs::Hirs;
static MVIRI: mviri::Mviri = mviri::Mviri;
static AMSUB_MHS: amsub_mhs::AmsubMhs = amsub_mhs::AmsubMhs;
static SSMT2: ssmt2::Ssmt2 = ssmt2::Ssmt2;
static ALBEDO: albedo::Albedo = albedo::Albedo;
static AOT: aot::Aot = aot::Aot;
static SST: sst::Sst = sst::Sst;
static SST_ENSEMBLE: sst::SstEnsemble = sst::SstEnsemble;
static UTH: uth::Uth = uth::Uth;

/// Resolve a template key to its builder.
pub fn get_template(key: &str) -> Result<Template> {
    let template = match key {
        "AVHRR" => Template::Fcdr(&AVHRR),
        "HIRS2" | "HIRS3" | "HIRS4" => Template::Fcdr(&HIRS),
        "MVIRI" => Template::Fcdr(&MVIRI),
        "AMSUB" | "MHS" => Template::Fcdr(&AMSUB_MHS),
        "SSMT2" => Template::Fcdr(&SSMT2),
        "ALBEDO" => Template::Cdr(&ALBEDO),
        "AOT" => Template::Cdr(&AOT),
        "SST" => Template::Cdr(&SST),
        "SST_ENSEMBLE" => Template::Cdr(&SST_ENSEMBLE),
        "UTH" => Template::Cdr(&UTH),
        _ => {
            return Err(Error::UnknownTemplate {
                key: key.to_string(),
            });
        }
    };
    Ok(template)
}

/// Acquisition time along the scanline axis, seconds since the Unix epoch.
pub(crate) fn time_vector(ds: &mut Dataset, height: usize) -> Result<()> {
    let time = VariableBuilder::new(DataType::F64, &[height], &["y"])?
        .standard_name("time")
        .long_name("Acquisition time in seconds since 1970-01-01 00:00:00")
        .units("s")
        .build()?;
    ds.add_variable("time", time)
}

/// A viewing/solar geometry angle, i16-packed at 0.01° resolution.
pub(crate) fn angle_variable(
    height: usize,
    width: usize,
    standard_name: &str,
) -> Result<Variable> {
    VariableBuilder::new(DataType::F32, &[height, width], &["y", "x"])?
        .standard_name(standard_name)
        .units("degree")
        .encoding(
            DataType::I16,
            0.01,
            0.0,
            crate::core::fill::default_fill_value(DataType::I16),
        )
        .coordinates()
        .build()
}

/// A per-channel correlation matrix, f32 on the channel axes.
pub(crate) fn correlation_matrix(channels: usize, long_name: &str) -> Result<Variable> {
    VariableBuilder::new(
        DataType::F32,
        &[channels, channels],
        &["channel", "channel"],
    )?
    .long_name(long_name)
    .units("1")
    .fill_value(FillValue::F32(f32::NAN))
    .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_registered_key_resolves() {
        for key in FCDR_KEYS.iter().chain(CDR_KEYS) {
            assert!(get_template(key).is_ok(), "key {key} did not resolve");
        }
    }

    #[test]
    fn unknown_key_is_rejected_without_normalization() {
        assert!(matches!(
            get_template("avhrr"),
            Err(Error::UnknownTemplate { .. })
        ));
        assert!(matches!(
            get_template("NOT_A_SENSOR"),
            Err(Error::UnknownTemplate { .. })
        ));
    }

    #[test]
    fn fcdr_templates_populate_each_variant() {
        for key in FCDR_KEYS {
            let template = match get_template(key).unwrap() {
                Template::Fcdr(t) => t,
                Template::Cdr(_) => panic!("{key} should be an FCDR template"),
            };
            for variant in 0..3 {
                let mut ds = Dataset::with_standard_attributes(key);
                match variant {
                    0 => template.add_original_variables(&mut ds, 7).unwrap(),
                    1 => template.add_easy_variables(&mut ds, 7).unwrap(),
                    _ => template.add_full_variables(&mut ds, 7).unwrap(),
                }
                assert!(!ds.is_empty(), "{key} produced an empty dataset");
                assert!(ds.variable("quality_pixel_bitmask").is_some());
            }
        }
    }

    #[test]
    fn cdr_templates_populate() {
        for key in CDR_KEYS {
            let template = match get_template(key).unwrap() {
                Template::Cdr(t) => t,
                Template::Fcdr(_) => panic!("{key} should be a CDR template"),
            };
            let mut ds = Dataset::with_standard_attributes(key);
            template.add_variables(&mut ds, 8, 6, Some(3)).unwrap();
            assert!(!ds.is_empty(), "{key} produced an empty dataset");
        }
    }

    #[test]
    fn ensemble_template_requires_num_samples() {
        let template = match get_template("SST_ENSEMBLE").unwrap() {
            Template::Cdr(t) => t,
            _ => unreachable!(),
        };
        let mut ds = Dataset::new();
        let err = template.add_variables(&mut ds, 8, 6, None).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingArgument {
                arg: "num_samples"
            }
        ));
    }
}
