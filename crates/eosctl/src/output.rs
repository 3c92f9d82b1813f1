//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use eos_core::{ApplyReport, Change};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` derive to build a pretty table
/// - `json` / `json-compact`: serializes the original data via serde
/// - `yaml`: serializes via serde_yaml
/// - `plain`: calls `id_fn` on each item to emit one identifier per line
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Ok(render_table(&rows))
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => Ok(data.iter().map(&id_fn).collect::<Vec<_>>().join("\n")),
    }
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table rendering uses a custom `detail_fn` that returns a pre-formatted string,
/// since single-item detail views don't use `Tabled` derive.
pub fn render_single<T>(
    format: &OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => Ok(detail_fn(data)),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => Ok(id_fn(data)),
    }
}

/// Render the outcome of one `apply`.
///
/// Table and plain show `kind name: change` lines (`in sync` for a no-op);
/// structured formats serialize the report.
pub fn render_report(
    format: &OutputFormat,
    report: &ApplyReport,
    color: bool,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Table | OutputFormat::Plain => Ok(report_lines(report, color)),
        OutputFormat::Json => render_json(report, false),
        OutputFormat::JsonCompact => render_json(report, true),
        OutputFormat::Yaml => render_yaml(report),
    }
}

/// Render the outcomes of a manifest run, in order.
pub fn render_reports(
    format: &OutputFormat,
    reports: &[ApplyReport],
    color: bool,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Table | OutputFormat::Plain => Ok(reports
            .iter()
            .map(|r| report_lines(r, color))
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => render_json(reports, false),
        OutputFormat::JsonCompact => render_json(reports, true),
        OutputFormat::Yaml => render_yaml(reports),
    }
}

fn report_lines(report: &ApplyReport, color: bool) -> String {
    let subject = format!("{} {}", report.kind, report.name);
    if report.is_noop() {
        let status = if color {
            "in sync".dimmed().to_string()
        } else {
            "in sync".to_owned()
        };
        return format!("{subject}: {status}");
    }
    report
        .changes
        .iter()
        .map(|change| {
            let text = change.to_string();
            let text = if color {
                match change {
                    Change::Created => text.green().to_string(),
                    Change::Destroyed => text.red().to_string(),
                    Change::Set { .. } => text.yellow().to_string(),
                }
            } else {
                text
            };
            format!("{subject}: {text}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> Result<String, CliError> {
    let out = if compact {
        serde_json::to_string(data)?
    } else {
        serde_json::to_string_pretty(data)?
    };
    Ok(out)
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    Ok(serde_yaml::to_string(data)?)
}

/// Placeholder for unset optional values in tables and detail views.
pub fn or_dash(value: Option<impl ToString>) -> String {
    value.map_or_else(|| "-".into(), |v| v.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(serde::Serialize)]
    struct Item {
        id: u32,
    }

    #[derive(Tabled)]
    struct ItemRow {
        #[tabled(rename = "ID")]
        id: u32,
    }

    #[test]
    fn plain_lists_one_id_per_line() {
        let items = [Item { id: 10 }, Item { id: 20 }];
        let out = render_list(
            &OutputFormat::Plain,
            &items,
            |i| ItemRow { id: i.id },
            |i| i.id.to_string(),
        )
        .unwrap();
        assert_eq!(out, "10\n20");
    }

    #[test]
    fn table_has_header_and_rows() {
        let items = [Item { id: 10 }];
        let out = render_list(
            &OutputFormat::Table,
            &items,
            |i| ItemRow { id: i.id },
            |i| i.id.to_string(),
        )
        .unwrap();
        assert!(out.contains("ID"));
        assert!(out.contains("10"));
    }

    #[test]
    fn noop_report_reads_in_sync() {
        let report = ApplyReport::new("vlan", "10");
        let out = render_report(&OutputFormat::Table, &report, false).unwrap();
        assert_eq!(out, "vlan 10: in sync");
    }

    #[test]
    fn report_lists_each_change() {
        let mut report = ApplyReport::new("vlan", "10");
        report.changes.push(Change::Created);
        report.changes.push(Change::Set {
            property: "vlan_name".into(),
            from: None,
            to: "web".into(),
        });
        let out = render_report(&OutputFormat::Plain, &report, false).unwrap();
        assert_eq!(out, "vlan 10: created\nvlan 10: vlan_name: 'web'");

        let json = render_report(&OutputFormat::JsonCompact, &report, false).unwrap();
        assert!(json.contains(r#""change":"created""#));
    }

    #[test]
    fn dash_for_missing_values() {
        assert_eq!(or_dash(None::<u32>), "-");
        assert_eq!(or_dash(Some(1500)), "1500");
    }
}
