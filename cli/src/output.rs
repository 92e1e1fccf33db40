//! Output formatting for tables, rows and option maps.

use mounttab_core::{FieldValue, NormalizedRow, OptionMap, OptionValue, encode_options};
use serde::Serialize;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
    Table,
}

/// Formats rows in the requested output format.
pub fn format_rows(rows: &[NormalizedRow], format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json | OutputFormat::Yaml => serialize(&rows, format),
        OutputFormat::Table => Ok(rows_to_table(rows)),
    }
}

/// Formats a single row in the requested output format.
pub fn format_row(row: &NormalizedRow, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json | OutputFormat::Yaml => serialize(row, format),
        OutputFormat::Table => Ok(row_to_table(row)),
    }
}

/// Formats an option map in the requested output format.
pub fn format_options(options: &OptionMap, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json | OutputFormat::Yaml => serialize(options, format),
        OutputFormat::Table => Ok(options_to_table(options)),
    }
}

fn serialize<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Yaml => {
            serde_yaml::to_string(value).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        _ => serde_json::to_string_pretty(value)
            .map_err(|e| format!("JSON serialization failed: {e}")),
    }
}

fn cell(value: &FieldValue) -> String {
    match value {
        FieldValue::Integer(n) => n.to_string(),
        FieldValue::Text(s) => s.clone(),
        FieldValue::Options(opts) => encode_options(opts),
    }
}

fn rows_to_table(rows: &[NormalizedRow]) -> String {
    let mut columns: Vec<&str> = Vec::new();
    for row in rows {
        for (column, _) in row.iter() {
            if !columns.contains(&column) {
                columns.push(column);
            }
        }
    }
    if columns.is_empty() {
        return String::new();
    }

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| row.get(column).map(cell).unwrap_or_default())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(column.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    push_line(&mut out, columns.iter().copied(), &widths);
    for row in &cells {
        push_line(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_line<'a>(out: &mut String, values: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let padded: Vec<String> = values
        .zip(widths)
        .map(|(value, width)| format!("{value:<width$}"))
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}

fn row_to_table(row: &NormalizedRow) -> String {
    let max_name = row.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    let mut out = String::new();
    for (column, value) in row.iter() {
        out.push_str(&format!("{column:<max_name$}  {}\n", cell(value)));
    }
    out
}

fn options_to_table(options: &OptionMap) -> String {
    let max_name = options.keys().map(str::len).max().unwrap_or(0);
    let mut out = String::new();
    for (name, value) in options {
        let shown = match value {
            OptionValue::Flag(set) => set.to_string(),
            OptionValue::Value(v) => v.clone(),
        };
        out.push_str(&format!("{name:<max_name$}  {shown}\n"));
    }
    out
}
