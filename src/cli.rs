use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "trendscope")]
#[command(about = "YouTube trend scanner with script and thumbnail-prompt generation")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Force CLI mode (skip TUI)
    #[arg(long)]
    pub cli: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan for trending videos and print the ranked results
    Scan {
        /// Search keyword (required unless --history is set)
        keyword: Option<String>,

        /// Lookback window in days
        #[arg(short, long, default_value_t = 7, value_parser = clap::value_parser!(u32).range(1..=30))]
        days: u32,

        /// Minimum view count
        #[arg(long, default_value_t = 8000)]
        min_views: u64,

        /// Maximum channel subscriber count
        #[arg(long, default_value_t = 3000)]
        max_subs: u64,

        /// Use the built-in history niche keyword set instead of a keyword
        #[arg(long)]
        history: bool,
    },

    /// Print a narration script for a video title
    Script {
        /// Video title to build the script around
        title: String,

        /// Keyword woven into the script body
        #[arg(short, long, default_value = "this topic")]
        keyword: String,

        /// Use the history niche narrative template
        #[arg(long)]
        history: bool,
    },

    /// Print a thumbnail image prompt for a video title
    Prompt {
        /// Video title for the trailing context line
        title: String,

        /// Use the history niche thumbnail template
        #[arg(long)]
        history: bool,
    },

    /// Open TUI interface
    Tui,
}
