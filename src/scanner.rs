use crate::dialect::Dialect;
use crate::models::{RawRow, Section};

const HEADER_LABELS: &[&str] = &["Transaction Details", "Date", "Transaction Description"];

/// What a single row means to the scan, decided before any extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    Blank,
    Section(Section),
    CardName(String),
    Header,
    Data,
}

pub fn classify(dialect: Dialect, row: &RawRow) -> RowKind {
    if row.is_blank() {
        return RowKind::Blank;
    }
    if let Some(section) = dialect.section_marker(row) {
        return RowKind::Section(section);
    }
    if let Some(name) = dialect.name_marker(row) {
        return RowKind::CardName(name);
    }
    if is_header_row(row) {
        return RowKind::Header;
    }
    RowKind::Data
}

fn is_header_row(row: &RawRow) -> bool {
    [row.cell(0).trim(), row.cell(1).trim()]
        .iter()
        .any(|cell| HEADER_LABELS.contains(cell))
}

/// Running state carried from row to row; only marker rows change it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanContext {
    pub section: Section,
    pub card_name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub rows: usize,
    pub blank: usize,
    pub markers: usize,
    pub headers: usize,
    pub dropped: usize,
    pub extracted: usize,
}

impl ScanContext {
    /// Fold one classified row into the context. Returns true when the row
    /// should go on to extraction.
    pub fn apply(&mut self, kind: RowKind, stats: &mut ScanStats) -> bool {
        stats.rows += 1;
        match kind {
            RowKind::Blank => stats.blank += 1,
            RowKind::Section(section) => {
                if section != self.section {
                    tracing::debug!("section -> {}", section.as_str());
                }
                self.section = section;
                stats.markers += 1;
            }
            RowKind::CardName(name) => {
                tracing::debug!("card holder -> {name}");
                self.card_name = name;
                stats.markers += 1;
            }
            RowKind::Header => stats.headers += 1,
            RowKind::Data => return true,
        }
        false
    }
}
