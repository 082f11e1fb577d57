pub mod standardize;

use clap::Parser;

use crate::normalizer::Profile;

#[derive(Parser)]
#[command(
    name = "stmtfix",
    about = "Standardize bank and credit card statement CSV exports into one transaction table."
)]
pub struct Cli {
    /// Statement CSV to standardize
    pub file: String,
    /// Output path (default: "Input" replaced by "Output", or <name>-Output.<ext>)
    #[arg(long, short)]
    pub output: Option<String>,
    /// Normalizer profile; overrides settings.json
    #[arg(long, value_enum)]
    pub profile: Option<Profile>,
    /// Force a statement layout instead of detecting it (format1..format4)
    #[arg(long)]
    pub format: Option<String>,
    /// Log detection and section changes to stderr
    #[arg(long, short)]
    pub verbose: bool,
}
