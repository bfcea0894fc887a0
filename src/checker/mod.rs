/*!
 * Schema check and repair for translatable models.
 *
 * Runs four stages against one model and stops at the first that fails:
 * 1. the model carries translation capability
 * 2. it declares at least one translatable attribute
 * 3. every translatable column has a wide text type
 * 4. every stored value parses as JSON; plain legacy values can be
 *    rewritten as `{locale: value}` after confirmation
 *
 * Stage failures are reported as outcomes. Only database and I/O failures
 * are returned as errors.
 */

pub mod prompt;
pub mod report;

use std::io::Write;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use log::{info, warn};
use regex::Regex;
use serde_json::{Map, Value};

use crate::database::schema::{self, ColumnInfo};
use crate::database::Repository;
use crate::errors::DecodeError;
use crate::model::ModelDefinition;
use crate::translation::locale_map::{self, LocaleMap};

pub use prompt::{AutoConfirm, Confirm, PromptConfirm};
pub use report::{CheckOutcome, ColumnReport, ConsoleWriter, RepairFinding, Style};

/// Column types able to hold a serialized locale map
pub const COMPATIBLE_COLUMN_TYPES: &[&str] = &["text", "mediumtext", "longtext", "clob"];

static COLUMN_TYPE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\w+)").expect("valid column type pattern"));

/// Leading word of a declared column type, lowercased
pub fn base_column_type(declared_type: &str) -> String {
    COLUMN_TYPE_PATTERN
        .captures(declared_type)
        .and_then(|captures| captures.get(1))
        .map(|word| word.as_str().to_lowercase())
        .unwrap_or_default()
}

/// Compatibility report for the translatable columns of a table, in table order
pub fn check_columns(columns: &[ColumnInfo], translatable: &[String]) -> Vec<ColumnReport> {
    columns
        .iter()
        .filter(|column| translatable.contains(&column.name))
        .map(|column| {
            let column_type = base_column_type(&column.declared_type);
            ColumnReport {
                compatible: COMPATIBLE_COLUMN_TYPES.contains(&column_type.as_str()),
                column: column.name.clone(),
                column_type,
            }
        })
        .collect()
}

/// Stored values that are not valid JSON, in row order
///
/// Valid JSON that is not an object, such as `[]` for an empty map, is left alone.
pub fn find_repairs(
    rows: &[Map<String, Value>],
    translatable: &[String],
    primary_key: &str,
    locale: &str,
) -> Result<Vec<RepairFinding>> {
    let mut findings = Vec::new();

    for row in rows {
        let record_id = row
            .get(primary_key)
            .cloned()
            .with_context(|| format!("Primary key column {} not found", primary_key))?;

        for attribute in translatable {
            let Some(raw_value) = row.get(attribute) else {
                continue;
            };
            if !matches!(
                locale_map::try_decode(Some(raw_value)),
                Err(DecodeError::InvalidJson(_))
            ) {
                continue;
            }

            let mut proposed = LocaleMap::new();
            proposed.insert(locale.to_string(), raw_value.clone());

            findings.push(RepairFinding {
                record_id: record_id.clone(),
                attribute: attribute.clone(),
                raw_value: raw_value.clone(),
                proposed: locale_map::encode(&proposed)?,
            });
        }
    }

    Ok(findings)
}

/// Staged diagnostic for one model against its backing table
pub struct SchemaRepairChecker<'a> {
    repo: &'a Repository,
    model: &'a ModelDefinition,
    locale: String,
    colored: bool,
}

impl<'a> SchemaRepairChecker<'a> {
    /// Create a checker proposing repairs for `locale`
    pub fn new(repo: &'a Repository, model: &'a ModelDefinition, locale: impl Into<String>) -> Self {
        Self {
            repo,
            model,
            locale: locale.into(),
            colored: false,
        }
    }

    /// Emit ANSI colors in the report
    pub fn colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// Run all stages, writing the report to `out`
    pub fn run(&self, confirm: &mut dyn Confirm, out: &mut dyn Write) -> Result<CheckOutcome> {
        let mut console = ConsoleWriter::new(out, self.colored);
        let outcome = self.run_stages(confirm, &mut console)?;

        info!("Check of model {} finished: {}", self.model.name, outcome);
        Ok(outcome)
    }

    fn run_stages(&self, confirm: &mut dyn Confirm, console: &mut ConsoleWriter<'_>) -> Result<CheckOutcome> {
        let mut stage = 0;

        stage += 1;
        heading(console, stage, "Checking for translation capability...")?;
        let Some(settings) = self.model.translation.as_ref() else {
            console.line(Style::Error, " Failed. The model does not carry translation capability. ")?;
            return Ok(CheckOutcome::NotTranslatable);
        };
        console.line(Style::Info, "Good. The model carries translation capability.")?;

        stage += 1;
        heading(console, stage, "Checking for declared translatable attributes...")?;
        if settings.attributes.is_empty() {
            console.line(Style::Error, " Not good. The model declares no translatable attributes. ")?;
            return Ok(CheckOutcome::NoTranslatableAttributes);
        }
        console.line(Style::Info, "Good. The model declares translatable attributes.")?;

        stage += 1;
        heading(console, stage, "Checking the column types in the database...")?;
        if let Some(outcome) = self.check_column_stage(&settings.attributes, console)? {
            return Ok(outcome);
        }

        stage += 1;
        heading(console, stage, "Checking the stored values...")?;
        let outcome = self.check_value_stage(&settings.attributes, confirm, console)?;

        console.blank()?;
        console.line(Style::Label, " FINAL RESULT: ")?;
        match &outcome {
            CheckOutcome::RepairDeclined(_) => console.line(
                Style::Success,
                " OK. The model is translatable, but some stored values have no locale yet. ",
            )?,
            _ => console.line(
                Style::Success,
                " Everything is good. The model is translatable. ",
            )?,
        }

        Ok(outcome)
    }

    fn check_column_stage(
        &self,
        translatable: &[String],
        console: &mut ConsoleWriter<'_>,
    ) -> Result<Option<CheckOutcome>> {
        let table = &self.model.table;
        let columns = self.repo.connection().execute(|conn| {
            if !schema::table_exists(conn, table)? {
                return Ok(None);
            }
            schema::table_columns(conn, table).map(Some)
        })?;

        let Some(columns) = columns else {
            console.line(
                Style::Error,
                &format!(" Table \"{}\" of the model does not exist. Stopping here. ", table),
            )?;
            return Ok(Some(CheckOutcome::MissingTable(table.clone())));
        };

        let reports = check_columns(&columns, translatable);
        let rows: Vec<Vec<String>> = reports
            .iter()
            .map(|r| vec![r.column.clone(), r.column_type.clone(), r.compatible.to_string()])
            .collect();
        console.table(&["Column name", "Column type", "Compatible ?"], &rows)?;

        if reports.iter().all(|r| r.compatible) {
            console.blank()?;
            console.line(Style::Info, "Good. The translatable columns have compatible types.")?;
            return Ok(None);
        }

        console.blank()?;
        console.line(
            Style::Error,
            " Not good. Some columns cannot store translations with their current type. ",
        )?;
        console.blank()?;
        console.line(
            Style::Comment,
            &format!(
                "Compatible column types are: {}.",
                COMPATIBLE_COLUMN_TYPES.join(", ")
            ),
        )?;
        console.line(Style::Comment, "Change the incompatible columns in your database and run the check again.")?;

        Ok(Some(CheckOutcome::IncompatibleColumns(reports)))
    }

    fn check_value_stage(
        &self,
        translatable: &[String],
        confirm: &mut dyn Confirm,
        console: &mut ConsoleWriter<'_>,
    ) -> Result<CheckOutcome> {
        let rows = self.repo.fetch_rows(&self.model.table, &[])?;
        if rows.is_empty() {
            console.line(Style::Info, "Passed. The table has no records yet.")?;
            return Ok(CheckOutcome::Compliant);
        }

        let fields = describe_fields(translatable);
        let findings = find_repairs(&rows, translatable, &self.model.primary_key, &self.locale)?;

        if findings.is_empty() {
            console.line(Style::Info, &format!("Good. Every value in {} is a locale map.", fields))?;
            return Ok(CheckOutcome::Compliant);
        }

        console.line(
            Style::Warning,
            &format!(" Not good. {} value(s) in {} have no locale yet. ", findings.len(), fields),
        )?;
        console.blank()?;
        console.line(Style::Comment, "Reading these values still works; they resolve as empty translations.")?;
        console.line(Style::Comment, "Assigning them a locale makes them visible again.")?;

        let question = format!(
            "Assign these values to the current locale \"{}\"?",
            self.locale
        );
        if !confirm.confirm(&question, true)? {
            warn!("Left {} value(s) without locale in {}", findings.len(), self.model.table);
            return Ok(CheckOutcome::RepairDeclined(findings));
        }

        self.apply_repairs(&findings)?;
        console.line(Style::Info, &format!("Repaired {} value(s).", findings.len()))?;
        Ok(CheckOutcome::Repaired(findings))
    }

    /// One update per affected row; rows already written stay written on failure
    fn apply_repairs(&self, findings: &[RepairFinding]) -> Result<()> {
        let mut rows: Vec<(&Value, Map<String, Value>)> = Vec::new();

        for finding in findings {
            let same_row = rows
                .last()
                .is_some_and(|(id, _)| *id == &finding.record_id);
            if !same_row {
                rows.push((&finding.record_id, Map::new()));
            }
            if let Some((_, updates)) = rows.last_mut() {
                updates.insert(finding.attribute.clone(), Value::String(finding.proposed.clone()));
            }
        }

        for (id, updates) in &rows {
            self.update_row(id, updates)?;
        }
        Ok(())
    }

    fn update_row(&self, id: &Value, updates: &Map<String, Value>) -> Result<()> {
        let changed = self
            .repo
            .update_row(&self.model.table, &self.model.primary_key, id, updates)?;
        if changed == 0 {
            warn!("Row {} of {} was not updated", id, self.model.table);
        } else {
            info!("Repaired row {} of {}", id, self.model.table);
        }
        Ok(())
    }
}

fn heading(console: &mut ConsoleWriter<'_>, stage: usize, text: &str) -> std::io::Result<()> {
    console.blank()?;
    console.line(Style::Plain, &format!("[{}]. {}", stage, text))
}

fn describe_fields(fields: &[String]) -> String {
    let noun = if fields.len() >= 2 { "fields" } else { "field" };
    format!("the \"{}\" {}", fields.join("\", \""), noun)
}
