use crate::MonitorContext;
use crate::output;
use crate::registry::StatusEntry;
use anyhow::Result;
use colored::Colorize;

/// Print the change state of every file in `folder`.
///
/// # Errors
///
/// Returns an error if the folder is invalid or a file disappears while the
/// status is computed.
pub fn execute(ctx: &MonitorContext, folder: &str, changed_only: bool, short: bool) -> Result<()> {
    let folder = super::resolve_folder(folder)?;
    let registry = ctx.open_registry(&folder)?;

    let mut statuses = registry.status()?;
    if changed_only {
        statuses.retain(|entry| entry.changed);
    }

    if statuses.iter().all(|entry| !entry.changed) {
        output::info("No changes detected");
    }

    if short {
        for entry in &statuses {
            println!("{}", output::format_status_short(entry));
        }
    } else {
        print_status_group(&statuses, true, "Changed since the last snapshot:");
        print_status_group(&statuses, false, "Unchanged:");
    }

    Ok(())
}

fn print_status_group(statuses: &[StatusEntry], changed: bool, header: &str) {
    let filtered: Vec<&StatusEntry> = statuses
        .iter()
        .filter(|entry| entry.changed == changed)
        .collect();

    if !filtered.is_empty() {
        println!("\n{}", header.bold());
        for entry in filtered {
            println!("{}", output::format_status_long(entry));
        }
    }
}
