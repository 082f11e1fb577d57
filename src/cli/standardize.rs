use std::path::PathBuf;

use crate::dialect::Dialect;
use crate::error::Result;
use crate::importer::{output_path_for, standardize_file, Options};
use crate::normalizer::Profile;
use crate::settings::load_settings;

pub fn run(
    file: &str,
    output: Option<&str>,
    profile: Option<Profile>,
    format: Option<&str>,
) -> Result<()> {
    let input = PathBuf::from(file);
    let output = output
        .map(PathBuf::from)
        .unwrap_or_else(|| output_path_for(&input));

    let settings = load_settings();
    let options = Options {
        policy: settings.policy(profile),
        dialect: format.map(Dialect::from_key).transpose()?,
    };

    let result = standardize_file(&input, &output, &options)?;

    println!(
        "{} transactions ({}, {}) -> {}",
        result.transactions.len(),
        result.dialect.key(),
        result.dialect.name(),
        output.display()
    );
    if result.stats.dropped > 0 {
        println!("{} rows skipped (missing required columns)", result.stats.dropped);
    }

    Ok(())
}
