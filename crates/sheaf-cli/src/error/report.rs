//! Conversion of CLI errors into miette reports.

use miette::Report;
use sheaf_plan::PlanError;

use super::CliError;

/// Convert a `CliError` into a miette report, attaching its hint as help.
pub fn cli_error_to_miette(err: CliError) -> Report {
    let help = err.hint();
    match (&err, help) {
        (CliError::Plan(PlanError::Diagnostic(diagnostic)), Some(help)) => {
            miette::miette!(help = help, "{}", diagnostic)
        }
        (_, Some(help)) => miette::miette!(help = help, "{}", err),
        (_, None) => miette::miette!("{}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheaf_config::ConfigError;
    use sheaf_plan::Diagnostic;

    #[test]
    fn test_hint_becomes_help() {
        let report = cli_error_to_miette(ConfigError::NoGroups.into());
        let help = report.help().map(|h| h.to_string());
        assert_eq!(
            help.as_deref(),
            Some("Add at least one [[groups]] table with a 'pattern' glob")
        );
    }

    #[test]
    fn test_diagnostic_report_includes_code() {
        let diagnostic = Diagnostic::warning("Unknown option 'foo'").with_code("UNKNOWN_OPTION");
        let report = cli_error_to_miette(PlanError::Diagnostic(Box::new(diagnostic)).into());
        assert!(report.to_string().contains("UNKNOWN_OPTION"));
        assert!(report.to_string().contains("Unknown option 'foo'"));
    }

    #[test]
    fn test_plain_error_without_help() {
        let report = cli_error_to_miette(CliError::FileNotFound("plan.json".into()));
        assert_eq!(report.to_string(), "File not found: plan.json");
        assert!(report.help().is_none());
    }
}
