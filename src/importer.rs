use std::path::{Path, PathBuf};

use crate::dialect::Dialect;
use crate::error::{Result, StmtError};
use crate::models::{parse_rows, NormalizedTransaction, RawRow, OUTPUT_HEADERS};
use crate::normalizer::Policy;
use crate::scanner::{classify, ScanContext, ScanStats};

#[derive(Debug, Clone, Default)]
pub struct Options {
    pub policy: Policy,
    /// Skip detection and read every row under this dialect.
    pub dialect: Option<Dialect>,
}

#[derive(Debug, Clone)]
pub struct Standardized {
    pub dialect: Dialect,
    pub transactions: Vec<NormalizedTransaction>,
    pub stats: ScanStats,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Run already-parsed rows through context tracking and extraction under a
/// single dialect.
pub fn scan_rows(
    rows: &[RawRow],
    dialect: Dialect,
    policy: &Policy,
) -> (Vec<NormalizedTransaction>, ScanStats) {
    let (_, transactions, stats) = rows.iter().fold(
        (ScanContext::default(), Vec::new(), ScanStats::default()),
        |(mut ctx, mut out, mut stats), row| {
            if ctx.apply(classify(dialect, row), &mut stats) {
                match dialect.extract(row, ctx.section, &ctx.card_name, policy) {
                    Some(txn) => {
                        stats.extracted += 1;
                        out.push(txn);
                    }
                    None => stats.dropped += 1,
                }
            }
            (ctx, out, stats)
        },
    );
    (transactions, stats)
}

pub fn standardize(content: &str, options: &Options) -> Result<Standardized> {
    let rows = parse_rows(content)?;
    let dialect = options.dialect.unwrap_or_else(|| Dialect::detect(&rows));
    tracing::info!("detected {} ({})", dialect.key(), dialect.name());
    if dialect == Dialect::Unknown {
        tracing::warn!("no known statement layout in the first rows; output will be empty");
    }

    let (transactions, stats) = scan_rows(&rows, dialect, &options.policy);
    tracing::debug!(
        "{} rows: {} extracted, {} blank, {} markers, {} headers, {} dropped",
        stats.rows,
        stats.extracted,
        stats.blank,
        stats.markers,
        stats.headers,
        stats.dropped
    );
    Ok(Standardized {
        dialect,
        transactions,
        stats,
    })
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Render the fixed header plus one line per transaction. Fields holding a
/// comma or quote are quoted with embedded quotes doubled.
pub fn write_transactions(transactions: &[NormalizedTransaction]) -> Result<String> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    wtr.write_record(OUTPUT_HEADERS)?;
    for txn in transactions {
        wtr.serialize(txn)?;
    }
    let bytes = wtr.into_inner()?;
    String::from_utf8(bytes).map_err(|e| StmtError::Other(e.to_string()))
}

/// `statement-Input.csv` becomes `statement-Output.csv`; anything without
/// "Input" in its path gets `-Output` before the extension.
pub fn output_path_for(input: &Path) -> PathBuf {
    let raw = input.to_string_lossy();
    if raw.contains("Input") {
        return PathBuf::from(raw.replacen("Input", "Output", 1));
    }
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let file_name = match input.extension() {
        Some(ext) => format!("{stem}-Output.{}", ext.to_string_lossy()),
        None => format!("{stem}-Output"),
    };
    input.with_file_name(file_name)
}

/// Read `input` whole, standardize it and write `output` in one go. Nothing
/// is written unless the whole file was processed.
pub fn standardize_file(input: &Path, output: &Path, options: &Options) -> Result<Standardized> {
    let content = std::fs::read_to_string(input)?;
    let result = standardize(&content, options)?;
    let rendered = write_transactions(&result.transactions)?;
    std::fs::write(output, rendered)?;
    tracing::info!(
        "{} transactions written to {}",
        result.transactions.len(),
        output.display()
    );
    Ok(result)
}
