/*!
 * Findings and outcomes of a schema check, and their console rendering.
 */

use std::fmt;
use std::io::Write;

use serde::Serialize;
use serde_json::Value;

/// Compatibility of one translatable column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnReport {
    pub column: String,
    /// Leading word of the declared type, lowercased
    pub column_type: String,
    pub compatible: bool,
}

/// A stored value that is not yet a locale map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepairFinding {
    /// Primary key of the affected row
    pub record_id: Value,
    pub attribute: String,
    /// Value as currently stored
    pub raw_value: Value,
    /// Encoded single-locale map that would replace it
    pub proposed: String,
}

/// Terminal result of a check run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "details", rename_all = "snake_case")]
pub enum CheckOutcome {
    /// The model has no translation capability
    NotTranslatable,
    /// The model declares no translatable attributes
    NoTranslatableAttributes,
    /// The backing table does not exist
    MissingTable(String),
    /// Some translatable columns cannot hold translations
    IncompatibleColumns(Vec<ColumnReport>),
    /// Legacy values were found and left untouched
    RepairDeclined(Vec<RepairFinding>),
    /// Legacy values were found and rewritten
    Repaired(Vec<RepairFinding>),
    /// Everything is in order
    Compliant,
}

impl CheckOutcome {
    /// Whether the model can be used for translations
    pub fn is_usable(&self) -> bool {
        matches!(
            self,
            CheckOutcome::RepairDeclined(_) | CheckOutcome::Repaired(_) | CheckOutcome::Compliant
        )
    }

    /// Number of the stage that produced this outcome
    pub fn stage(&self) -> usize {
        match self {
            CheckOutcome::NotTranslatable => 1,
            CheckOutcome::NoTranslatableAttributes => 2,
            CheckOutcome::MissingTable(_) | CheckOutcome::IncompatibleColumns(_) => 3,
            CheckOutcome::RepairDeclined(_) | CheckOutcome::Repaired(_) | CheckOutcome::Compliant => 4,
        }
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckOutcome::NotTranslatable => write!(f, "model is not translatable"),
            CheckOutcome::NoTranslatableAttributes => {
                write!(f, "model declares no translatable attributes")
            }
            CheckOutcome::MissingTable(table) => write!(f, "table {} does not exist", table),
            CheckOutcome::IncompatibleColumns(columns) => write!(
                f,
                "{} incompatible column(s)",
                columns.iter().filter(|c| !c.compatible).count()
            ),
            CheckOutcome::RepairDeclined(findings) => {
                write!(f, "{} value(s) without locale left as-is", findings.len())
            }
            CheckOutcome::Repaired(findings) => write!(f, "{} value(s) repaired", findings.len()),
            CheckOutcome::Compliant => write!(f, "compliant"),
        }
    }
}

/// Console styles for check output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    Info,
    Comment,
    Warning,
    Error,
    Success,
    Label,
}

impl Style {
    fn codes(&self) -> Option<&'static str> {
        match self {
            Style::Plain => None,
            Style::Info => Some("32"),
            Style::Comment => Some("33"),
            Style::Warning => Some("30;43"),
            Style::Error => Some("37;41"),
            Style::Success => Some("30;42"),
            Style::Label => Some("30;47"),
        }
    }
}

/// Writes styled lines, with or without ANSI colors
pub struct ConsoleWriter<'w> {
    out: &'w mut dyn Write,
    colored: bool,
}

impl<'w> ConsoleWriter<'w> {
    pub fn new(out: &'w mut dyn Write, colored: bool) -> Self {
        Self { out, colored }
    }

    pub fn line(&mut self, style: Style, text: &str) -> std::io::Result<()> {
        match style.codes() {
            Some(codes) if self.colored => writeln!(self.out, "\x1B[{}m{}\x1B[0m", codes, text),
            _ => writeln!(self.out, "{}", text),
        }
    }

    pub fn blank(&mut self) -> std::io::Result<()> {
        writeln!(self.out)
    }

    /// Render rows as a boxed table
    pub fn table(&mut self, headers: &[&str], rows: &[Vec<String>]) -> std::io::Result<()> {
        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let border = format!(
            "+{}+",
            widths
                .iter()
                .map(|w| "-".repeat(w + 2))
                .collect::<Vec<_>>()
                .join("+")
        );
        let render = |cells: Vec<&str>| {
            let padded: Vec<String> = cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| {
                    format!(" {}{} ", cell, " ".repeat(width - cell.chars().count()))
                })
                .collect();
            format!("|{}|", padded.join("|"))
        };

        writeln!(self.out, "{}", border)?;
        writeln!(self.out, "{}", render(headers.to_vec()))?;
        writeln!(self.out, "{}", border)?;
        for row in rows {
            writeln!(self.out, "{}", render(row.iter().map(String::as_str).collect()))?;
        }
        writeln!(self.out, "{}", border)
    }
}
