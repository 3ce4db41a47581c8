//! Effect file checking command

use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::PfxConfig;
use crate::effect::check_files;
use crate::validate::Severity;

use super::{EXIT_ERROR, EXIT_SUCCESS};

/// Execute the check command
pub fn run_check(files: &[PathBuf], config: &PfxConfig, json: bool) -> ExitCode {
    let strict = config.check.strict;
    let reports = check_files(files, &config.parser);
    let failed = reports.iter().filter(|r| !r.passed(strict)).count();

    if json {
        let output = serde_json::json!({
            "valid": failed == 0,
            "strict": strict,
            "files": reports,
        });
        match serde_json::to_string_pretty(&output) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        for report in &reports {
            let status = if report.passed(strict) { "ok" } else { "FAILED" };
            match &report.error {
                Some(error) => println!("{}: {} - {}", report.path.display(), status, error),
                None => println!(
                    "{}: {} ({} emitters, {} properties)",
                    report.path.display(),
                    status,
                    report.emitters,
                    report.properties
                ),
            }
            for issue in &report.issues {
                println!("  {}", issue);
            }
        }

        let errors: usize = reports
            .iter()
            .map(|r| r.issues.iter().filter(|i| i.severity == Severity::Error).count())
            .sum();
        let warnings: usize = reports
            .iter()
            .map(|r| r.issues.iter().filter(|i| i.severity == Severity::Warning).count())
            .sum();
        println!();
        println!(
            "Checked {} files: {} failed, {} errors, {} warnings{}",
            reports.len(),
            failed,
            errors,
            warnings,
            if strict { " (strict)" } else { "" }
        );
    }

    if failed > 0 {
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}
