use clap::Parser;
use std::path::PathBuf;

use cdrkit::types::ProductVariant;

#[derive(Parser)]
#[command(name = "cdrkit", version, about = "CDRKIT template generator")]
pub struct CliArgs {
    /// Template key (e.g. AVHRR, HIRS3, AMSUB for FCDR; AOT, SST_ENSEMBLE for CDR)
    #[arg(short, long)]
    pub key: String,

    /// Output filename
    #[arg(short, long)]
    pub output: PathBuf,

    /// Number of scanlines (FCDR) or grid rows (CDR)
    #[arg(long)]
    pub height: usize,

    /// Grid columns, required for CDR products
    #[arg(long)]
    pub width: Option<usize>,

    /// Ensemble size, required for ensemble products
    #[arg(long)]
    pub num_samples: Option<usize>,

    /// FCDR variant (original, easy or full)
    #[arg(long, value_enum, default_value_t = ProductVariant::Easy)]
    pub variant: ProductVariant,

    /// Deflate level applied to every variable (0-9)
    #[arg(long, default_value_t = cdrkit::DEFAULT_COMPRESSION)]
    pub compression: i32,

    /// Replace the output file if it already exists
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,

    /// JSON file of global attributes to stamp on the dataset
    /// (an object of string keys to string values); values given here
    /// override the individual attribute flags below
    #[arg(long)]
    pub global_attrs: Option<PathBuf>,

    /// Value of the mandatory `institution` global attribute
    #[arg(long, default_value = "not specified")]
    pub institution: String,

    /// Value of the mandatory `title` global attribute
    #[arg(long, default_value = "not specified")]
    pub title: String,

    /// Value of the mandatory `source` global attribute
    #[arg(long, default_value = "not specified")]
    pub source: String,

    /// Value of the mandatory `history` global attribute
    #[arg(long, default_value = "not specified")]
    pub history: String,

    /// Value of the mandatory `references` global attribute
    #[arg(long, default_value = "not specified")]
    pub references: String,

    /// Value of the mandatory `comment` global attribute
    #[arg(long, default_value = "not specified")]
    pub comment: String,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
