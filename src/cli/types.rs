//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "negin")]
#[command(about = "Negin - Drug interaction checker", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this file instead of .negin/
    #[arg(short, long, global = true, env = "NEGIN_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the relay server
    Serve {
        /// Address to bind (overrides relay.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides relay.port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Look up drugs by partial name through the relay
    Search {
        /// Partial drug name
        query: String,
    },

    /// Check interactions between two or more drugs
    ///
    /// Each name is resolved to its first autocomplete match.
    Check {
        /// Drug names
        #[arg(required = true, num_args = 2..)]
        names: Vec<String>,
    },
}
