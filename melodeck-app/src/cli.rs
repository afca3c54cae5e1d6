use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "melodeck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Show the synchronized lyrics of a local track
    Lyrics {
        /// Audio file; lyrics are read from the `.lrc` file next to it
        track: PathBuf,

        /// Playback position in seconds
        #[arg(long, default_value_t = 0.0)]
        at: f64,

        /// Keep printing the current line as playback advances
        #[arg(long)]
        follow: bool,

        /// Lines shown before and after the current one
        #[arg(long, default_value_t = 1)]
        context: usize,
    },

    /// Search the remote catalog
    Search {
        /// Search keywords
        #[arg(required = true)]
        keywords: Vec<String>,

        /// Maximum number of results to show
        #[arg(long, default_value_t = 10)]
        limit: usize,

        /// Also load lyrics for each result
        #[arg(long)]
        lyrics: bool,
    },
}
