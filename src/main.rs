use anyhow::{Context, Result};
use colored::Colorize;
use revx::cli::{self, Cli};
use revx::error::EXIT_CANCELLED;
use revx::{CancelToken, config, inputs_from_args, logger, process_inputs};
use signal_hook::consts::{SIGINT, SIGTERM};
use std::io::{self, BufWriter, IsTerminal};
use std::process::ExitCode;

fn main() -> ExitCode {
    if !io::stderr().is_terminal() {
        colored::control::set_override(false);
    }

    match execute(cli::parse_args()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "revx: error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: Cli) -> Result<ExitCode> {
    if cli.init_config {
        let path = match &cli.config {
            Some(path) => path.clone(),
            None => config::config_file_path()?,
        };
        if path.exists() {
            anyhow::bail!("Config file already exists: {}", path.display());
        }
        config::save_default_config(&path)?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let config = match &cli.config {
        Some(path) => config::load_config_from(path)?,
        None => config::load_config()?,
    };

    if cli.show_config {
        print!("{}", config::to_toml(&cli.effective_config(&config))?);
        return Ok(ExitCode::SUCCESS);
    }

    let settings = cli.resolve(&config);
    if let Some(path) = logger::init_logging(settings.debug, &settings.log_level)? {
        tracing::info!("Debug logging to {}", path.display());
    }

    let token = CancelToken::new();
    for signal in [SIGINT, SIGTERM] {
        // First signal cancels cooperatively, a second one exits on the spot
        signal_hook::flag::register_conditional_shutdown(signal, i32::from(EXIT_CANCELLED), token.flag())
            .and_then(|_| signal_hook::flag::register(signal, token.flag()))
            .with_context(|| format!("Failed to register handler for signal {}", signal))?;
    }
    if let Some(timeout) = settings.timeout {
        let _timer = token.cancel_after(timeout);
    }

    let inputs = inputs_from_args(&settings.files);
    let stdin = io::stdin().lock();
    let stdout = BufWriter::new(io::stdout().lock());

    match process_inputs(&inputs, stdin, stdout, settings.policy, &token) {
        Ok(batch) => {
            tracing::debug!("Done: {:?}", batch);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if e.is_broken_pipe() => {
            tracing::debug!("Output closed early: {}", e);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::info!("Run failed: {}", e);
            eprintln!("{} {}", "revx: error:".red().bold(), e);
            Ok(ExitCode::from(e.exit_code()))
        }
    }
}
