//! Output formatters.

use std::path::PathBuf;

use miette::{IntoDiagnostic, Result};

use shirabe_core::{LintResult, Severity};

pub fn output_text(reports: &[(PathBuf, LintResult)]) {
    for (path, result) in reports {
        if result.findings.is_empty() {
            continue;
        }

        println!("\n{}:", path.display());
        for finding in &result.findings {
            let severity = match finding.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
                Severity::Info => "info",
            };
            // Canonical positions are 0-based; display 1-based.
            println!(
                "  {}:{} {} [{}]: {}",
                finding.position.line + 1,
                finding.position.column + 1,
                severity,
                finding.rule_id,
                finding.message
            );
        }
    }

    let total_issues: usize = reports.iter().map(|(_, r)| r.total_issues).sum();
    let fixable_issues: usize = reports.iter().map(|(_, r)| r.fixable_issues).sum();

    println!();
    println!(
        "Checked {} files, found {} issues ({} fixable)",
        reports.len(),
        total_issues,
        fixable_issues
    );
}

pub fn output_json(reports: &[(PathBuf, LintResult)]) -> Result<()> {
    let output: Vec<_> = reports
        .iter()
        .map(|(path, result)| {
            serde_json::json!({
                "path": path.display().to_string(),
                "findings": result.findings,
                "total_issues": result.total_issues,
                "fixable_issues": result.fixable_issues,
            })
        })
        .collect();
    println!(
        "{}",
        serde_json::to_string_pretty(&output).into_diagnostic()?
    );
    Ok(())
}
