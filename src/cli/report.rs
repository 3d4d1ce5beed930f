//! Report formatting and printing utilities.
//!
//! Findings are printed cargo-style; listings use aligned columns. Kept apart
//! from the engine so the library can be used without any terminal output.

use std::io::{self, Write};

use colored::{ColoredString, Colorize};
use unicode_width::UnicodeWidthStr;

use crate::{
    core::StyleValue,
    findings::{Finding, Report, Severity},
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print findings in cargo-style format to stderr.
pub fn report(findings: &[Finding]) {
    report_to(findings, &mut io::stderr().lock());
}

/// Print findings to a custom writer.
///
/// Findings are sorted by token alias, then rule.
pub fn report_to<W: Write>(findings: &[Finding], writer: &mut W) {
    if findings.is_empty() {
        return;
    }

    let mut sorted: Vec<&Finding> = findings.iter().collect();
    sorted.sort_by(|a, b| {
        a.token_name()
            .cmp(b.token_name())
            .then_with(|| a.report_rule().cmp(&b.report_rule()))
    });

    for finding in &sorted {
        print_finding(finding, writer);
    }

    print_summary(&sorted, writer);
}

/// Print a success line.
pub fn print_success_to<W: Write>(message: &str, writer: &mut W) {
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), message.green());
}

/// Pad `text` to `width` terminal columns.
pub fn pad(text: &str, width: usize) -> String {
    let shown = UnicodeWidthStr::width(text);
    format!("{}{}", text, " ".repeat(width.saturating_sub(shown)))
}

/// Widest entry in terminal columns.
pub fn column_width<'a>(items: impl IntoIterator<Item = &'a str>) -> usize {
    items
        .into_iter()
        .map(UnicodeWidthStr::width)
        .max()
        .unwrap_or(0)
}

/// Print `label value` rows with the labels aligned.
pub fn print_pairs<W: Write>(rows: &[(&str, String)], writer: &mut W) -> io::Result<()> {
    let width = column_width(rows.iter().map(|(label, _)| *label));
    for (label, value) in rows {
        writeln!(writer, "  {}  {}", pad(label, width).dimmed(), value)?;
    }
    Ok(())
}

/// One-line rendering of an exported value.
pub fn format_style_value(value: Option<&StyleValue>) -> String {
    match value {
        Some(StyleValue::Scalar(scalar)) => scalar.clone(),
        Some(other) => serde_json::to_string(other).unwrap_or_default(),
        None => "(no value)".to_string(),
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn severity_label(severity: Severity) -> ColoredString {
    match severity {
        Severity::Warning => "warning".bold().yellow(),
        Severity::Note => "note".bold().blue(),
    }
}

fn print_finding<W: Write>(finding: &Finding, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_label(finding.report_severity()),
        finding.message(),
        finding.report_rule().to_string().dimmed().cyan()
    );
    let _ = writeln!(writer, "  {} {}", "-->".blue(), finding.token_name());

    if let Some(hint) = finding.hint() {
        let _ = writeln!(writer, "  {} {} {}", "=".blue(), "hint:".bold().cyan(), hint);
    }

    let _ = writeln!(writer); // Empty line between findings
}

fn print_summary<W: Write>(findings: &[&Finding], writer: &mut W) {
    let total_warnings = findings
        .iter()
        .filter(|f| f.report_severity() == Severity::Warning)
        .count();
    let total_notes = findings.len() - total_warnings;

    let _ = writeln!(
        writer,
        "{} {} {} ({} {}, {} {})",
        FAILURE_MARK.red(),
        findings.len(),
        if findings.len() == 1 { "finding" } else { "findings" },
        total_warnings,
        if total_warnings == 1 { "warning" } else { "warnings" }.yellow(),
        total_notes,
        if total_notes == 1 { "note" } else { "notes" }.blue()
    );
}

// ============================================================
// Tests
// ============================================================
