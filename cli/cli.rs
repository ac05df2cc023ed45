use srcfix_core::{
    CliArgs, Command as CoreCommand, NamePattern, Reporter, RunOptions, RunSummary, SrcfixArgs,
    TaskRegistry, accept_set, ignore_set, run, scan, tasks,
};
mod interaction;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use console::style;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

fn print_completions_cli(shell: clap_complete::Shell) {
    let mut cmd = CliArgs::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
}

/// The default pipeline plus the opt-in tasks the flags enable.
/// Registration order is significant and fixed.
fn build_registry(args: &SrcfixArgs) -> Result<TaskRegistry> {
    let mut registry = TaskRegistry::new();
    registry.register(Box::new(tasks::StripBom));
    registry.register(Box::new(tasks::NormalizeLineEndings));
    if let Some(width) = args.tabs {
        registry.register_for(
            Box::new(tasks::TabsToSpaces::new(width)),
            NamePattern::parse("!makefile,makefile.*,*.mk")?,
        );
    }
    registry.register_for(
        Box::new(tasks::TrailingWhitespace),
        NamePattern::parse("!*.md,*.markdown")?,
    );
    if args.collapse_blank_lines {
        registry.register(Box::new(tasks::CollapseBlankLines));
    }
    registry.register(Box::new(tasks::ControlChars));
    registry.register(Box::new(tasks::FinalNewline));
    Ok(registry)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli: CliArgs = CliArgs::parse();

    if let Some(command_enum_val) = cli.command {
        match command_enum_val {
            CoreCommand::Completion(args) => {
                print_completions_cli(args.shell);
                return Ok(ExitCode::SUCCESS);
            }
        }
    }

    let args = cli.main_opts;

    if !args.path.exists() {
        eprintln!(
            "{}",
            style(format!("Path not found: {}", args.path.display())).red()
        );
        return Ok(ExitCode::FAILURE);
    }

    let accept = match accept_set(&args) {
        Ok(set) => set,
        Err(e) => {
            eprintln!("{}", style(format!("Invalid pattern: {}", e)).red());
            return Ok(ExitCode::FAILURE);
        }
    };
    let ignore = match ignore_set(&args) {
        Ok(set) => set,
        Err(e) => {
            eprintln!("{}", style(format!("Invalid pattern: {}", e)).red());
            return Ok(ExitCode::FAILURE);
        }
    };

    let registry = match build_registry(&args) {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("{}", style(format!("Task setup failed: {}", e)).red());
            return Ok(ExitCode::FAILURE);
        }
    };

    let files_to_scan: Vec<PathBuf> = scan(&args.path, &accept, &ignore).collect();
    if files_to_scan.is_empty() {
        println!("No files found matching the criteria.");
        return Ok(ExitCode::SUCCESS);
    }

    println!("Found {} files:", files_to_scan.len());
    for file in files_to_scan.iter().take(10) {
        println!("  {}", style(file.display()).dim());
    }
    if files_to_scan.len() > 10 {
        println!("  ... and {} more.", files_to_scan.len() - 10);
    }

    if !args.check {
        match interaction::confirm_rewrite(files_to_scan.len(), args.no_confirm) {
            Ok(true) => {}
            Ok(false) => return Ok(ExitCode::SUCCESS),
            Err(e) => {
                eprintln!(
                    "{}",
                    style(format!("Error during confirmation: {}", e)).red()
                );
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    let color = !args.no_color && console::colors_enabled();
    let reporter = Reporter::new(color);
    let options = RunOptions {
        read_only: args.check,
        progress: !args.no_progress,
    };

    let summary: RunSummary = match run(&args.path, &accept, &ignore, &registry, &reporter, options)
    {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("{}", style(format!("Error during scan: {}", e)).red());
            return Ok(ExitCode::FAILURE);
        }
    };

    println!(
        "Result: {} {} scanned, {} rewritten, {} {} failed.",
        style(summary.scanned).cyan(),
        if summary.scanned == 1 { "file" } else { "files" },
        style(summary.rewritten).green(),
        style(summary.failed).red(),
        if summary.failed == 1 { "file" } else { "files" }
    );

    if summary.success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
