use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{Generator, generate};
use colored::Colorize;
use foldermon::cli::{Cli, Commands};
use foldermon::output::{self, Verbosity};
use foldermon::{MonitorContext, commands, logging};
use std::io;
use std::process;

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet)?;
    output::set_verbosity(if cli.verbose {
        Verbosity::Verbose
    } else if cli.quiet {
        Verbosity::Quiet
    } else {
        Verbosity::Normal
    });

    if let Commands::Completion { shell } = cli.command {
        print_completions(shell, &mut Cli::command());
        return Ok(());
    }

    let mut ctx = MonitorContext::new(cli.config)?;

    match cli.command {
        Commands::Monitor { folder } => commands::monitor::execute(&ctx, &folder)?,
        Commands::Info { folder, file } => {
            commands::info::execute(&ctx, &folder, file.as_deref())?;
        }
        Commands::Status {
            folder,
            changed,
            short,
        } => commands::status::execute(&ctx, &folder, changed, short)?,
        Commands::Watch {
            folder,
            interval,
            iterations,
        } => commands::watch::execute(&ctx, &folder, interval, iterations)?,
        Commands::Config {
            key,
            value,
            unset,
            list,
        } => commands::config::execute(
            &mut ctx,
            key.as_deref(),
            value.as_deref(),
            unset,
            list,
        )?,
        Commands::Completion { .. } => {}
    }

    Ok(())
}

fn print_completions<G: Generator>(g: G, cmd: &mut clap::Command) {
    generate(g, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
