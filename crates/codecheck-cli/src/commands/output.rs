//! Shared output formatting for scan results.

use anyhow::Result;
use codecheck_core::{Finding, ScanReport};
use std::io::{self, IsTerminal, Write};

use crate::OutputFormat;

const CARET_COLOR: &str = "\x1b[32;01m";
const RESET: &str = "\x1b[0m";

/// Print scan results in the specified format.
///
/// Findings go to stdout; unreadable files go to stderr except in JSON mode,
/// where they are part of the report.
pub fn print(report: &ScanReport, format: OutputFormat) -> Result<()> {
    let color = io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
    let mut out = io::stdout().lock();

    match format {
        OutputFormat::Text => write_text(&mut out, report, color)?,
        OutputFormat::Compact => write_compact(&mut out, report)?,
        OutputFormat::Json => return write_json(&mut out, report),
    }

    let mut err = io::stderr().lock();
    for error in &report.errors {
        writeln!(err, "{error}")?;
    }
    Ok(())
}

fn write_text(out: &mut impl Write, report: &ScanReport, color: bool) -> io::Result<()> {
    for finding in &report.findings {
        write_finding(out, finding, color)?;
    }

    let (errors, warnings, infos) = report.count_by_severity();
    let summary = format!(
        "Found {} error(s), {} warning(s), {} info(s) in {} file(s)",
        errors, warnings, infos, report.files_checked
    );
    if !color {
        return writeln!(out, "\n{summary}");
    }

    let summary_color = if report.is_clean() {
        "\x1b[32m"
    } else if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[36m"
    };
    writeln!(out, "\n{summary_color}{summary}{RESET}")
}

fn write_finding(out: &mut impl Write, finding: &Finding, color: bool) -> io::Result<()> {
    let block = finding.format();
    match block.strip_suffix("^\n") {
        Some(body) if color => writeln!(out, "{body}{CARET_COLOR}^{RESET}"),
        _ => out.write_all(block.as_bytes()),
    }
}

fn write_compact(out: &mut impl Write, report: &ScanReport) -> io::Result<()> {
    for finding in &report.findings {
        writeln!(out, "{finding}")?;
    }
    Ok(())
}

fn write_json(out: &mut impl Write, report: &ScanReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use codecheck_core::{FileError, Severity};
    use std::path::PathBuf;

    fn sample_report() -> ScanReport {
        let mut report = ScanReport::new();
        report.files_checked = 2;
        report.findings.push(Finding {
            file: PathBuf::from("src/a.rs"),
            line: 2,
            column: 4,
            rule: "no-bad".to_string(),
            severity: Severity::Warning,
            message: "BAD is forbidden".to_string(),
            line_text: "bar BAD baz\n".to_string(),
            matched: "BAD".to_string(),
        });
        report.errors.push(FileError {
            file: PathBuf::from("src/b.rs"),
            message: "permission denied".to_string(),
        });
        report
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn text_output_without_color() {
        let report = sample_report();
        let text = render(|out| write_text(out, &report, false));
        assert_eq!(
            text,
            "src/a.rs:2: BAD is forbidden\nbar BAD baz\n    ^\n\n\
             Found 0 error(s), 1 warning(s), 0 info(s) in 2 file(s)\n"
        );
    }

    #[test]
    fn text_output_colors_the_caret() {
        let report = sample_report();
        let text = render(|out| write_text(out, &report, true));
        assert!(text.contains("    \x1b[32;01m^\x1b[0m\n"));
        assert!(text.contains("\x1b[33mFound 0 error(s)"));
    }

    #[test]
    fn finding_block_matches_core_rendering() {
        let mut finding = sample_report().findings.remove(0);
        finding.line_text = "héllo BAD".to_string();
        finding.column = 7;

        let plain = render(|out| write_finding(out, &finding, false));
        assert_eq!(plain, finding.format());

        let colored = render(|out| write_finding(out, &finding, true));
        assert_eq!(
            colored,
            "src/a.rs:2: BAD is forbidden\nhéllo BAD\n      \x1b[32;01m^\x1b[0m\n"
        );
    }

    #[test]
    fn summary_color_follows_worst_severity() {
        let mut report = sample_report();
        report.findings[0].severity = Severity::Info;
        let text = render(|out| write_text(out, &report, true));
        assert!(text.contains("\x1b[36mFound 0 error(s), 0 warning(s), 1 info(s)"));

        report.findings.clear();
        let text = render(|out| write_text(out, &report, true));
        assert_eq!(text, "\n\x1b[32mFound 0 error(s), 0 warning(s), 0 info(s) in 2 file(s)\x1b[0m\n");
    }

    #[test]
    fn compact_output_is_one_line_per_finding() {
        let report = sample_report();
        let text = render(|out| write_compact(out, &report));
        assert_eq!(
            text,
            "src/a.rs:2:5: warning: BAD is forbidden [no-bad]\n"
        );
    }

    #[test]
    fn json_output_includes_errors() {
        let report = sample_report();
        let mut buf = Vec::new();
        write_json(&mut buf, &report).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value["files_checked"], 2);
        assert_eq!(value["findings"][0]["line"], 2);
        assert_eq!(value["findings"][0]["severity"], "warning");
        assert_eq!(value["errors"][0]["message"], "permission denied");
    }
}
