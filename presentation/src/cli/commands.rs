//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Theme selection for the `theme` command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeChoice {
    Light,
    Dark,
    /// Switch to the other theme
    Toggle,
}

/// CLI arguments for llmdesk
#[derive(Parser, Debug)]
#[command(name = "llmdesk")]
#[command(author, version, about = "Terminal client for a multi-provider LLM chat and evaluation backend")]
#[command(long_about = r#"
llmdesk signs you in to an llmdesk backend, keeps the session token between
runs, and manages your account and provider API keys.

Configuration files are loaded from (in priority order):
1. LLMDESK_API_URL     Environment override for the backend URL
2. --config <path>     Explicit config file
3. ./llmdesk.toml      Project-level config
4. ~/.config/llmdesk/config.toml   Global config

Example:
  llmdesk login -e ada@example.com
  llmdesk api-keys --openai sk-...
  llmdesk whoami
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Keep session state in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Sign in with email and password
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "LLMDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account and sign in
    Register {
        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "LLMDESK_PASSWORD", hide_env_values = true)]
        password: String,

        /// Display name (defaults to the part of the email before '@')
        #[arg(short, long, default_value = "")]
        name: String,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in user (default)
    Whoami,

    /// Show or update provider API keys
    ApiKeys {
        #[arg(long, value_name = "KEY")]
        openai: Option<String>,

        #[arg(long, value_name = "KEY")]
        google: Option<String>,

        #[arg(long, value_name = "KEY")]
        anthropic: Option<String>,
    },

    /// Show or update the profile
    Profile {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,
    },

    /// Change the account password
    ChangePassword {
        #[arg(long, env = "LLMDESK_PASSWORD", hide_env_values = true)]
        current: String,

        #[arg(long = "new", env = "LLMDESK_NEW_PASSWORD", hide_env_values = true)]
        new_password: String,
    },

    /// Show or change the color theme
    Theme {
        #[arg(value_enum)]
        choice: Option<ThemeChoice>,
    },

    /// List LLM providers and whether a key is configured
    Providers,
}

impl Command {
    /// Whether the command needs a restored session before it runs
    pub fn needs_session(&self) -> bool {
        !matches!(
            self,
            Command::Login { .. } | Command::Register { .. } | Command::Theme { .. }
        )
    }
}
