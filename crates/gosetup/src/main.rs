#![allow(clippy::print_stdout, clippy::print_stderr)]

use gosetup::cli::parse;
use gosetup::commands::{Command, execute};
use gosetup::errors::{CliError, EXIT_OK, exit_code_for, render_error};
use gosetup::prompt::TerminalPrompter;
use gosetup::tracing::init_tracing;

fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("gosetup panicked: {panic_info}");
        eprintln!("Internal error occurred. Run with RUST_LOG=debug for more information.");
    }));

    let code = match run() {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
            EXIT_OK
        }
        Err(error) => {
            let code = exit_code_for(&error);
            render_error(error);
            code
        }
    };
    std::process::exit(code);
}

fn run() -> Result<String, CliError> {
    let cli = parse();
    init_tracing(cli.tracing_config())?;

    let command = Command::try_from(cli.command)?;
    tracing::debug!(?command, "Parsed command");

    let mut prompter = TerminalPrompter::stdio();
    execute(&command, &mut prompter)
}
