// src/cli/args.rs
use crate::domain::operation::LanguageCode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, disable_version_flag = true)]
/// Search or translate the clipboard in a new browser tab
pub struct Cli {
    /// Print version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,

    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Turn debugging information on
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Print the default configuration and exit
    #[arg(long = "generate-config")]
    pub generate_config: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the clipboard text
    Search {
        #[arg(short = 'b', long = "browser", help = "browser to open (default: firefox)")]
        browser: Option<String>,
    },
    /// Translate the clipboard text
    Translate {
        #[arg(short = 'b', long = "browser", help = "browser to open (default: firefox)")]
        browser: Option<String>,

        #[arg(short = 'f', long = "from", help = "source language (default: en)")]
        from: Option<LanguageCode>,

        #[arg(short = 't', long = "to", help = "target language (default: ru)")]
        to: Option<LanguageCode>,
    },
    /// Generate shell completion script
    Completion {
        /// Shell to generate completion for (bash, zsh, fish)
        shell: String,
    },
}
