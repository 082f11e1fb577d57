use crate::error::{Result, StmtError};
use crate::models::{NormalizedTransaction, RawRow, Section};
use crate::normalizer::{plain_amount, signed_amount, Amount, Policy};

/// Detection only looks at this many leading rows.
pub const DETECT_WINDOW: usize = 5;

const INTL_SECTION: &str = "International Transactions";
const DOMESTIC_SECTION: &str = "Domestic Transactions";
const INTL_SECTION_SINGULAR: &str = "International Transaction";

// ---------------------------------------------------------------------------
// Dialect kinds: enum dispatch, chosen once per file
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Domestic/International section rows in col3, debit/credit split.
    FormatA,
    /// "Transaction Description" + "Amount" header, signed amounts.
    FormatB,
    /// "International Transaction" marker, debit/credit split.
    FormatC,
    /// "Transaction Details" + "Date" header, description first.
    FormatD,
    Unknown,
}

enum AmountCells {
    /// One cell with an optional `cr` suffix.
    Signed(usize),
    Split { debit: usize, credit: usize },
}

struct Layout {
    date: usize,
    description: usize,
    amount: AmountCells,
    required: &'static [usize],
}

const ALL_DIALECTS: &[Dialect] = &[
    Dialect::FormatA,
    Dialect::FormatB,
    Dialect::FormatC,
    Dialect::FormatD,
];

impl Dialect {
    pub fn key(&self) -> &'static str {
        match self {
            Self::FormatA => "format1",
            Self::FormatB => "format2",
            Self::FormatC => "format3",
            Self::FormatD => "format4",
            Self::Unknown => "unknown",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::FormatA => "Sectioned debit/credit statement",
            Self::FormatB => "Signed amount statement",
            Self::FormatC => "Cardholder debit/credit statement",
            Self::FormatD => "Transaction details statement",
            Self::Unknown => "Unrecognized statement",
        }
    }

    pub fn from_key(key: &str) -> Result<Self> {
        ALL_DIALECTS
            .iter()
            .find(|d| d.key() == key)
            .copied()
            .ok_or_else(|| StmtError::UnknownFormat(key.to_string()))
    }

    /// Classify a file from its leading rows. The first row in the window
    /// that satisfies any rule decides; FormatC evidence is gathered from
    /// the whole file.
    pub fn detect(rows: &[RawRow]) -> Self {
        let format_c = rows.iter().any(|r| r.cell(2) == INTL_SECTION_SINGULAR)
            && rows.iter().any(|r| r.cell(1).trim() == "Transaction Description");

        for row in rows.iter().take(DETECT_WINDOW) {
            if Self::FormatD.matches_header(row) {
                return Self::FormatD;
            }
            if format_c {
                return Self::FormatC;
            }
            if Self::FormatA.matches_header(row) {
                return Self::FormatA;
            }
            if Self::FormatB.matches_header(row) {
                return Self::FormatB;
            }
        }
        Self::Unknown
    }

    /// Row-local detection rule. FormatC has none; it needs cross-row evidence.
    pub fn matches_header(&self, row: &RawRow) -> bool {
        match self {
            Self::FormatD => {
                row.cell(0).trim() == "Transaction Details" && row.cell(1).trim() == "Date"
            }
            Self::FormatA => {
                row.cell(2) == DOMESTIC_SECTION || row.cell(2) == INTL_SECTION
            }
            Self::FormatB => {
                row.cell(2) == "Amount" && row.cell(1).trim() == "Transaction Description"
            }
            Self::FormatC | Self::Unknown => false,
        }
    }

    pub fn section_marker(&self, row: &RawRow) -> Option<Section> {
        let any_is = |cols: &[usize], text: &str| cols.iter().any(|&i| row.cell(i) == text);
        match self {
            Self::FormatD => {
                if any_is(&[0, 1, 2], INTL_SECTION) {
                    Some(Section::International)
                } else if any_is(&[0, 1, 2, 4], DOMESTIC_SECTION) {
                    Some(Section::Domestic)
                } else {
                    None
                }
            }
            Self::FormatA => section_from_text(row.cell(2)),
            Self::FormatB => section_from_text(row.cell(1)),
            Self::FormatC => {
                (row.cell(2) == INTL_SECTION_SINGULAR).then_some(Section::International)
            }
            Self::Unknown => None,
        }
    }

    /// A cardholder row: a single named cell with its neighbours empty.
    pub fn name_marker(&self, row: &RawRow) -> Option<String> {
        let (empty, name): (&[usize], usize) = match self {
            Self::FormatA | Self::FormatC => (&[0, 1, 3][..], 2),
            Self::FormatB => (&[0, 2][..], 1),
            Self::FormatD => (&[0][..], 1),
            Self::Unknown => return None,
        };
        let name_cell = row.cell(name).trim();
        if empty.iter().all(|&i| row.is_empty_at(i)) && !name_cell.is_empty() {
            Some(name_cell.to_string())
        } else {
            None
        }
    }

    /// Reports a trailing fixed currency code on domestic rows too.
    pub fn code_in_any_section(&self) -> bool {
        matches!(self, Self::FormatD)
    }

    /// FormatC statements keep their description cell as-is, code included.
    pub fn keeps_raw_description(&self) -> bool {
        matches!(self, Self::FormatC)
    }

    fn layout(&self) -> Option<Layout> {
        let layout = match self {
            Self::FormatD => Layout {
                date: 1,
                description: 0,
                amount: AmountCells::Signed(2),
                required: &[0, 1, 2],
            },
            Self::FormatA => Layout {
                date: 0,
                description: 3,
                amount: AmountCells::Split { debit: 1, credit: 2 },
                required: &[0, 3],
            },
            Self::FormatB => Layout {
                date: 0,
                description: 1,
                amount: AmountCells::Signed(2),
                required: &[0, 1],
            },
            Self::FormatC => Layout {
                date: 0,
                description: 1,
                amount: AmountCells::Split { debit: 2, credit: 3 },
                required: &[0, 1],
            },
            Self::Unknown => return None,
        };
        Some(layout)
    }

    /// Map a data row to a transaction. `None` when a required cell is empty.
    pub fn extract(
        &self,
        row: &RawRow,
        section: Section,
        card_name: &str,
        policy: &Policy,
    ) -> Option<NormalizedTransaction> {
        let layout = self.layout()?;
        if layout.required.iter().any(|&i| row.is_empty_at(i)) {
            return None;
        }

        let raw_desc = row.cell(layout.description);
        let Amount { debit, credit } = match layout.amount {
            AmountCells::Signed(i) => signed_amount(row.cell(i)),
            AmountCells::Split { debit, credit } => Amount {
                debit: plain_amount(row.cell(debit)),
                credit: plain_amount(row.cell(credit)),
            },
        };

        Some(NormalizedTransaction {
            date: policy.normalize_date(row.cell(layout.date)),
            description: if self.keeps_raw_description() {
                raw_desc.to_string()
            } else {
                policy.description(raw_desc)
            },
            debit,
            credit,
            currency: policy.currency(raw_desc, section, self.code_in_any_section()),
            card_name: card_name.to_string(),
            section,
            location: policy.location(raw_desc, section),
        })
    }
}

fn section_from_text(text: &str) -> Option<Section> {
    match text {
        INTL_SECTION => Some(Section::International),
        DOMESTIC_SECTION => Some(Section::Domestic),
        _ => None,
    }
}
