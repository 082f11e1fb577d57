use serde::Serialize;

use crate::error::Result;

/// Number of positional cells every statement row is padded or truncated to.
pub const ROW_WIDTH: usize = 5;

/// One input line reduced to five trimmed, unquoted cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: [String; ROW_WIDTH],
}

impl RawRow {
    pub fn from_cells<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut row = RawRow::default();
        for (slot, cell) in row.cells.iter_mut().zip(cells) {
            *slot = clean_cell(cell.as_ref());
        }
        row
    }

    pub fn parse_line(line: &str) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(line.as_bytes());
        match rdr.records().next() {
            Some(record) => Ok(RawRow::from_cells(record?.iter())),
            None => Ok(RawRow::default()),
        }
    }

    /// Zero-based cell accessor; out-of-range indexes read as empty.
    pub fn cell(&self, idx: usize) -> &str {
        self.cells.get(idx).map(String::as_str).unwrap_or("")
    }

    pub fn is_empty_at(&self, idx: usize) -> bool {
        self.cell(idx).is_empty()
    }

    /// Blank rows carry nothing in the first four cells; the fifth is ignored.
    pub fn is_blank(&self) -> bool {
        (0..4).all(|i| self.is_empty_at(i))
    }
}

fn clean_cell(raw: &str) -> String {
    let s = raw.trim();
    let s = s.strip_prefix('"').unwrap_or(s);
    let s = s.strip_suffix('"').unwrap_or(s);
    s.to_string()
}

/// Split a whole statement export into rows. Blank lines are kept so that
/// row positions match physical lines.
pub fn parse_rows(content: &str) -> Result<Vec<RawRow>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    content.lines().map(RawRow::parse_line).collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    #[default]
    Domestic,
    International,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Domestic => "domestic",
            Self::International => "international",
        }
    }

    pub fn is_international(&self) -> bool {
        matches!(self, Self::International)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedTransaction {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Transaction Description")]
    pub description: String,
    #[serde(rename = "Debit")]
    pub debit: String,
    #[serde(rename = "Credit")]
    pub credit: String,
    #[serde(rename = "Currency")]
    pub currency: String,
    #[serde(rename = "CardName")]
    pub card_name: String,
    #[serde(rename = "Transaction")]
    pub section: Section,
    #[serde(rename = "Location")]
    pub location: String,
}

/// Output column titles, in write order.
pub const OUTPUT_HEADERS: [&str; 8] = [
    "Date",
    "Transaction Description",
    "Debit",
    "Credit",
    "Currency",
    "CardName",
    "Transaction",
    "Location",
];
