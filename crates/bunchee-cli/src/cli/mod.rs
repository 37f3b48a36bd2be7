//! Command-line argument parsing for bunchee.
//!
//! Flags are declared with clap's derive macros, but bunchee parses in a
//! permissive mode: any token clap does not know about (an unknown flag or a
//! plain value) is kept as a positional token instead of being rejected. The
//! first positional token is the entry source.
//!
//! Parsing is split in two passes:
//!
//! 1. [`split_permissive`] walks the raw vector and separates tokens that name
//!    a declared flag (plus the value that follows a value-taking flag) from
//!    everything else.
//! 2. clap parses the flag tokens, resolving short aliases and validating typed
//!    values, and the result is folded into [`ParsedOptions`].

pub mod enums;

use clap::{CommandFactory, Parser};
use std::path::PathBuf;

use crate::error::Result;

pub use enums::*;

/// bunchee - zero-config bundler for JavaScript/TypeScript packages
#[derive(Parser, Debug)]
#[command(
    name = "bunchee",
    no_binary_name = true,
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true
)]
pub struct Cli {
    /// Output the version number
    #[arg(short = 'v', long)]
    pub version: bool,

    /// Watch source files and rebuild on change
    #[arg(short = 'w', long)]
    pub watch: bool,

    /// Compress output
    #[arg(short = 'm', long)]
    pub minify: bool,

    /// Output file, relative to the working directory
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output module format
    #[arg(short = 'f', long, value_enum, value_name = "FORMAT")]
    pub format: Option<Format>,

    /// Output usage information
    #[arg(short = 'h', long)]
    pub help: bool,

    /// External dependencies, separated by comma
    #[arg(long, value_name = "MODS")]
    pub external: Option<String>,

    /// Treat every dependency as external
    #[arg(long)]
    pub no_external: bool,

    /// JavaScript language target
    #[arg(long, value_name = "TARGET")]
    pub target: Option<String>,

    /// Build runtime
    #[arg(long, value_enum, value_name = "RUNTIME")]
    pub runtime: Option<Runtime>,

    /// Environment variables to inline, separated by comma
    #[arg(long, value_name = "VARS")]
    pub env: Option<String>,

    /// Working directory
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Generate source maps
    #[arg(long)]
    pub sourcemap: bool,

    /// Generate TypeScript declaration files
    #[arg(long)]
    pub dts: bool,
}

/// A boolean option that distinguishes "not specified" from an explicit value.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum Toggle {
    On,
    Off,
    #[default]
    Unset,
}

impl Toggle {
    /// Resolve to a plain boolean, using `default` when unset.
    pub fn resolve(self, default: bool) -> bool {
        match self {
            Toggle::On => true,
            Toggle::Off => false,
            Toggle::Unset => default,
        }
    }
}

/// External dependency selection as written on the command line.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum ExternalArg {
    /// Neither `--external` nor `--no-external` was given
    #[default]
    Unset,
    /// `--external a,b,c`
    List(String),
    /// `--no-external`: every dependency stays external
    All,
}

/// Options produced by the argument parser.
///
/// Built once per invocation and never mutated afterwards.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ParsedOptions {
    /// Positional tokens in command-line order, including unknown flags
    pub positionals: Vec<String>,
    pub format: Option<Format>,
    pub file: Option<PathBuf>,
    pub watch: bool,
    pub minify: bool,
    pub sourcemap: Toggle,
    pub dts: bool,
    pub help: bool,
    pub version: bool,
    pub runtime: Option<Runtime>,
    pub target: Option<String>,
    pub cwd: Option<PathBuf>,
    pub external: ExternalArg,
    pub env: Option<String>,
}

impl ParsedOptions {
    /// The entry source path, if one was given.
    pub fn source(&self) -> Option<&str> {
        self.positionals.first().map(String::as_str)
    }
}

impl From<Cli> for ParsedOptions {
    fn from(cli: Cli) -> Self {
        let external = if cli.no_external {
            ExternalArg::All
        } else {
            cli.external.map_or(ExternalArg::Unset, ExternalArg::List)
        };

        Self {
            positionals: Vec::new(),
            format: cli.format,
            file: cli.output,
            watch: cli.watch,
            minify: cli.minify,
            sourcemap: if cli.sourcemap {
                Toggle::On
            } else {
                Toggle::Unset
            },
            dts: cli.dts,
            help: cli.help,
            version: cli.version,
            runtime: cli.runtime,
            target: cli.target,
            cwd: cli.cwd,
            external,
            env: cli.env,
        }
    }
}

/// Parse a raw argument vector (without the binary name).
///
/// # Errors
///
/// Returns [`CliError::Parse`](crate::error::CliError::Parse) when a
/// value-taking flag has no value or a typed flag receives an unknown value.
pub fn parse_args<I, T>(args: I) -> Result<ParsedOptions>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let (flags, positionals) = split_permissive(args.into_iter().map(Into::into));
    let cli = Cli::try_parse_from(flags)?;

    let mut options = ParsedOptions::from(cli);
    options.positionals = positionals;
    tracing::debug!(?options, "parsed command line");
    Ok(options)
}

/// Separate declared flags (and their values) from positional tokens.
///
/// Returns `(flag_tokens, positional_tokens)`, both in command-line order.
/// Everything after a bare `--` is positional.
pub fn split_permissive(args: impl IntoIterator<Item = String>) -> (Vec<String>, Vec<String>) {
    let command = Cli::command();
    let mut flags = Vec::new();
    let mut positionals = Vec::new();
    let mut iter = args.into_iter();

    while let Some(token) = iter.next() {
        if token == "--" {
            positionals.extend(iter.by_ref());
            break;
        }

        match lookup_flag(&command, &token) {
            Some(FlagToken {
                takes_value: true,
                inline_value: false,
            }) => {
                flags.push(token);
                // A missing value is left for clap to report
                if let Some(value) = iter.next() {
                    flags.push(value);
                }
            }
            Some(_) => flags.push(token),
            None => positionals.push(token),
        }
    }

    (flags, positionals)
}

struct FlagToken {
    takes_value: bool,
    inline_value: bool,
}

fn lookup_flag(command: &clap::Command, token: &str) -> Option<FlagToken> {
    if let Some(long) = token.strip_prefix("--") {
        let (name, inline_value) = match long.split_once('=') {
            Some((name, _)) => (name, true),
            None => (long, false),
        };
        let arg = command
            .get_arguments()
            .find(|arg| arg.get_long() == Some(name))?;
        return Some(FlagToken {
            takes_value: arg.get_action().takes_values(),
            inline_value,
        });
    }

    // A short group like `-mo` is a run of switches, optionally ending in a
    // value-taking flag whose value is the rest of the group or the next token
    let shorts = token.strip_prefix('-')?;
    if shorts.is_empty() {
        return None;
    }
    for (idx, short) in shorts.char_indices() {
        let arg = command
            .get_arguments()
            .find(|arg| arg.get_short() == Some(short))?;
        if arg.get_action().takes_values() {
            return Some(FlagToken {
                takes_value: true,
                inline_value: idx + short.len_utf8() < shorts.len(),
            });
        }
    }
    Some(FlagToken {
        takes_value: false,
        inline_value: false,
    })
}
