use crate::MonitorContext;
use crate::output;
use crate::registry::FileRegistry;
use crate::tracking::Timestamp;
use anyhow::Result;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};
use tracing::debug;

/// Poll `folder` and print files whose change state flips.
///
/// Runs until `iterations` polls have been made, or forever when `None`.
///
/// # Errors
///
/// Returns an error if the folder is invalid or the initial scan fails.
/// Failures of individual polls are reported and the loop continues.
pub fn execute(
    ctx: &MonitorContext,
    folder: &str,
    interval: Option<Duration>,
    iterations: Option<u64>,
) -> Result<()> {
    let folder = super::resolve_folder(folder)?;
    let registry = ctx.open_registry(&folder)?;
    let interval = interval.unwrap_or_else(|| ctx.config.session.watch_interval());

    output::info(&format!(
        "Watching {} file(s) in {} every {}",
        registry.len(),
        folder.display(),
        humantime::format_duration(interval)
    ));

    let mut reported = BTreeSet::new();
    let mut poll = 0u64;
    loop {
        poll += 1;
        match poll_once(&registry, &mut reported) {
            Ok(lines) => {
                for line in lines {
                    println!("{line}");
                }
            }
            Err(e) => output::warning(&format!("Poll failed: {e}")),
        }

        if iterations.is_some_and(|limit| poll >= limit) {
            debug!(polls = poll, "Watch finished");
            return Ok(());
        }
        std::thread::sleep(interval);
    }
}

/// Runs one status scan and returns the lines for files whose state changed
/// since the previous scan.
///
/// # Errors
///
/// Propagates status failures (a tracked file disappeared).
pub fn poll_once(
    registry: &FileRegistry,
    reported: &mut BTreeSet<PathBuf>,
) -> Result<Vec<String>> {
    let now = Timestamp::from_system_time(SystemTime::now());
    let mut lines = Vec::new();

    for entry in registry.status()? {
        if entry.changed && reported.insert(entry.path.clone()) {
            lines.push(format!("[{now}] {entry}"));
        } else if !entry.changed && reported.remove(&entry.path) {
            lines.push(format!(
                "[{now}] File '{}' is back to its baseline.",
                entry.path.display()
            ));
        }
    }

    Ok(lines)
}
