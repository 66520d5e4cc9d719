//! dbguard CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use dbguard::cli::{Cli, CommandContext, CommandDispatcher};
use dbguard::shell::is_ci;
use dbguard::ui::{create_ui, OutputMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("dbguard=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dbguard=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("dbguard starting with args: {:?}", cli);

    let output_mode = if cli.quiet {
        OutputMode::Quiet
    } else if cli.verbose {
        OutputMode::Verbose
    } else {
        OutputMode::Normal
    };

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let ci = cli.ci || is_ci();
    let mut ui = create_ui(!ci, output_mode);

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            ui.error(&format!("Error: cannot read current directory: {}", e));
            return ExitCode::from(1);
        }
    };
    let context = CommandContext::for_project(cli.project.as_deref(), cli.config.as_deref(), &cwd)
        .with_ci(ci)
        .with_assume_yes(cli.yes);
    let dispatcher = CommandDispatcher::new(context);

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => exit_code(result.exit_code),
        Err(e) => {
            let code = e.exit_code();
            if code == 0 {
                ui.message(&e.to_string());
            } else {
                ui.error(&format!("Error: {}", e));
            }
            for suggestion in e.suggestions() {
                ui.show_hint(suggestion);
            }
            exit_code(code)
        }
    }
}
