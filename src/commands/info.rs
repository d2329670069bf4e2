use crate::MonitorContext;
use crate::output;
use anyhow::{Context, Result};

/// Print freshly derived statistics for one file, or every tracked file.
///
/// # Errors
///
/// Returns an error if the folder is invalid, `file` is not tracked, or a
/// file's statistics cannot be derived.
pub fn execute(ctx: &MonitorContext, folder: &str, file: Option<&str>) -> Result<()> {
    let folder = super::resolve_folder(folder)?;
    let mut registry = ctx.open_registry(&folder)?;

    match file {
        Some(name) if name != "all" => {
            if !registry.contains(name) {
                anyhow::bail!("File not found: {name}");
            }
            println!("{}", registry.describe_one(name)?);
        }
        _ => {
            if registry.is_empty() {
                output::info("No files tracked");
                return Ok(());
            }
            let lines = registry
                .describe_all()
                .context("Failed to describe tracked files")?;
            for line in lines {
                println!("{line}");
            }
        }
    }

    Ok(())
}
