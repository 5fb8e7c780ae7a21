use std::fs;

use indexmap::IndexMap;
use tracing::info;

use cdrkit::templates::{get_template, Template};

use super::args::CliArgs;
use super::errors::AppError;

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }

    if !(0..=9).contains(&args.compression) {
        return Err(AppError::InvalidCompression {
            level: args.compression,
        }
        .into());
    }

    let mut ds = match get_template(&args.key)? {
        Template::Fcdr(_) => cdrkit::create_fcdr_template(&args.key, args.variant, args.height)?,
        Template::Cdr(_) => {
            let width = args.width.ok_or(AppError::MissingArgument {
                arg: "--width".to_string(),
            })?;
            cdrkit::create_cdr_template(&args.key, width, args.height, args.num_samples)?
        }
    };

    ds.set_attribute("institution", args.institution.as_str());
    ds.set_attribute("title", args.title.as_str());
    ds.set_attribute("source", args.source.as_str());
    ds.set_attribute("history", args.history.as_str());
    ds.set_attribute("references", args.references.as_str());
    ds.set_attribute("comment", args.comment.as_str());

    if let Some(path) = &args.global_attrs {
        let text = fs::read_to_string(path)?;
        let attrs: IndexMap<String, String> =
            serde_json::from_str(&text).map_err(|e| AppError::InvalidAttrsFile {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        for (key, value) in &attrs {
            ds.set_attribute(key, value.as_str());
        }
    }

    cdrkit::map_global_flags(&mut ds)?;
    cdrkit::write(&ds, &args.output, args.compression, args.overwrite)?;

    info!("Template {} written to {:?}", args.key, args.output);
    println!("Wrote {} ({} variables)", args.output.display(), ds.len());
    Ok(())
}
