use crate::config::Config;
use crate::reverse::ReversalPolicy;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "

Copyright (c) 2025 InkyQuill
License: MIT
Source: https://github.com/InkyQuill/revx
Rust Edition: 2024"
);

#[derive(Parser, Debug)]
#[command(name = "revx")]
#[command(about = "Reverse lines character by character, or word by word")]
#[command(long_about = "RevX reverses the characters of every input line.

Reversal works on Unicode code points, not bytes, so multi-byte text such as
'日本語' comes out as '語本日' instead of garbage. Input is streamed one line at
a time, so arbitrarily large inputs use constant memory.

MODES:
  (default)        Reverse the whole line, whitespace included
  -s, --separate   Reverse each word in place; words are rejoined by single spaces

STDIN/STDOUT:
  When no files are specified, revx reads from stdin. Use '-' to read stdin
  between named files. Output always goes to stdout.

CANCELLATION:
  Ctrl-C or --timeout stops the run between lines. A line that was being
  reversed when the run stopped is not written. Exit status is 130.

EXAMPLES:
  echo 'hello world' | revx          Prints 'dlrow olleh'
  echo 'hello world' | revx -s       Prints 'olleh dlrow'
  revx notes.txt todo.txt            Reverse both files in order
  revx --timeout 5 huge.log          Give up after 5 seconds")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = LONG_VERSION)]
pub struct Cli {
    /// Files to process (stdin when omitted)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Reverse each word separately
    #[arg(short = 's', long, conflicts_with = "no_separate")]
    #[arg(help = "Reverse each whitespace-delimited word separately\nRuns of whitespace collapse to a single space")]
    pub separate: bool,

    /// Reverse whole lines even if the config file enables --separate
    #[arg(long = "no-separate")]
    pub no_separate: bool,

    /// Stop after this many seconds
    #[arg(short = 't', long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Write debug logs to ~/.revx/revx.log
    #[arg(long)]
    pub debug: bool,

    /// Use a different configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long = "show-config", conflicts_with = "init_config")]
    pub show_config: bool,

    /// Write a commented default config file and exit
    #[arg(long = "init-config")]
    pub init_config: bool,
}

/// Effective settings after merging the config file and flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub files: Vec<PathBuf>,
    pub policy: ReversalPolicy,
    pub timeout: Option<Duration>,
    pub debug: bool,
    pub log_level: String,
}

impl Cli {
    /// Merge flags over `config`; flags win
    pub fn resolve(&self, config: &Config) -> Settings {
        let separate = if self.separate {
            true
        } else if self.no_separate {
            false
        } else {
            config.reverse.separate
        };

        let timeout_secs = self.timeout.or(config.processing.timeout_secs);

        Settings {
            files: self.files.clone(),
            policy: ReversalPolicy::from_separate(separate),
            timeout: timeout_secs.map(Duration::from_secs),
            debug: self.debug || config.logging.debug,
            log_level: config.logging.level.clone(),
        }
    }

    /// Fold flags back into a config, for `--show-config`
    pub fn effective_config(&self, config: &Config) -> Config {
        let settings = self.resolve(config);
        let mut effective = config.clone();
        effective.reverse.separate = settings.policy == ReversalPolicy::PerWord;
        effective.processing.timeout_secs = settings.timeout.map(|t| t.as_secs());
        effective.logging.debug = settings.debug;
        effective
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
