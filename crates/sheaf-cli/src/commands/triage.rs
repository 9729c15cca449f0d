//! Triage command implementation.
//!
//! Feeds build-engine diagnostics through the allow-list. The first
//! diagnostic that is not allowed ends the run with a non-zero exit.

use crate::cli::{ProjectArgs, TriageArgs};
use crate::commands::utils::{self, Overrides};
use crate::error::{Result, ResultExt};
use crate::ui;
use sheaf_plan::{Diagnostic, DiagnosticPolicy, Diagnostics};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::debug;

/// Execute the triage command.
pub async fn execute(args: TriageArgs, project: &ProjectArgs) -> Result<()> {
    let root = utils::project_root(project)?;
    let loaded = utils::load_config(project, &root, &Overrides::default())?;
    let mut diagnostics = Diagnostics::new(DiagnosticPolicy::from_config(
        &loaded.config.diagnostics,
    ));

    let count = match &args.input {
        Some(path) => {
            let file = tokio::fs::File::open(path).await.with_path(path)?;
            triage(BufReader::new(file), &mut diagnostics).await?
        }
        None => triage(BufReader::new(tokio::io::stdin()), &mut diagnostics).await?,
    };

    ui::success(&format!(
        "{} diagnostics checked, {} allow-listed",
        count,
        diagnostics.suppressed().len()
    ));
    Ok(())
}

/// Report every diagnostic line of `reader`, stopping at the first fatal one.
///
/// Returns the number of diagnostics seen. Blank lines are skipped.
pub async fn triage<R>(reader: R, diagnostics: &mut Diagnostics) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut count = 0;

    while let Some(line) = lines.next_line().await? {
        let Some(diagnostic) = Diagnostic::parse_line(&line) else {
            continue;
        };
        count += 1;
        debug!("triaging {}", diagnostic);
        diagnostics.report(diagnostic)?;
    }

    Ok(count)
}
