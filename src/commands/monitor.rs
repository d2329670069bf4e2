use crate::MonitorContext;
use crate::output;
use crate::session;
use anyhow::Result;
use std::io;

/// Scan `folder`, then run the interactive session on stdin/stdout.
///
/// # Errors
///
/// Returns an error if the folder is invalid, the initial scan fails, or the
/// terminal cannot be read or written.
pub fn execute(ctx: &MonitorContext, folder: &str) -> Result<()> {
    let folder = super::resolve_folder(folder)?;
    let mut registry = ctx.open_registry(&folder)?;
    output::info(&format!(
        "Monitoring {} ({} file(s) tracked)",
        folder.display(),
        registry.len()
    ));

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    session::run(
        &mut registry,
        stdin.lock(),
        &mut stdout,
        ctx.config.session.pause_after_command(),
    )
}
