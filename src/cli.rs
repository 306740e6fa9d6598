//! CLI definitions for fieldguard.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// fieldguard CLI.
#[derive(Parser)]
#[command(name = "fieldguard")]
#[command(about = "Detect hidden form fields that can harvest autofill data")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the HTTP server (default)
    Serve {
        /// Bind host, overrides `server.host`
        #[arg(long)]
        host: Option<String>,

        /// Bind port, overrides `server.port`
        #[arg(long)]
        port: Option<u16>,
    },

    /// Scan a single page and print the report as JSON
    Scan {
        /// Page URL (http or https)
        url: String,

        /// Scan level: simple, medium or advanced
        #[arg(long, default_value = "simple")]
        level: String,

        /// Omit `<input type="hidden">` fields from the report
        #[arg(long)]
        skip_explicit_hidden: bool,

        /// Pretty-print the JSON report
        #[arg(long)]
        pretty: bool,
    },
}
