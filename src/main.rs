mod cli;
mod config;
mod core;
mod error;
mod tui;

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::core::{
    ScanProfile, ScriptStyle, SearchCriteria, YouTubeClient, narration_script, rank, scan_keyword,
    thumbnail_prompt,
};
use crate::error::{Error, Result};
use crate::tui::{App, EventHandler, init as tui_init, restore as tui_restore, ui};
use chrono::Utc;
use clap::Parser;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Scan {
            keyword,
            days,
            min_views,
            max_subs,
            history,
        }) => {
            init_tracing();
            run_cli_scan(keyword, days, min_views, max_subs, history).await?;
        }
        Some(Commands::Script {
            title,
            keyword,
            history,
        }) => {
            let style = if history {
                ScriptStyle::Napoleon
            } else {
                ScriptStyle::Generic
            };
            println!("{}", narration_script(style, &title, &keyword));
        }
        Some(Commands::Prompt { title, history }) => {
            let style = if history {
                ScriptStyle::Napoleon
            } else {
                ScriptStyle::Generic
            };
            println!("{}", thumbnail_prompt(style, &title));
        }
        Some(Commands::Tui) | None => {
            if cli.cli {
                println!("Use 'trendscope --help' for available commands");
            } else {
                run_tui().await?;
            }
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

async fn run_cli_scan(
    keyword: Option<String>,
    days: u32,
    min_views: u64,
    max_subs: u64,
    history: bool,
) -> Result<()> {
    let profile = if history {
        ScanProfile::history()
    } else {
        let keyword = keyword
            .ok_or_else(|| Error::custom("A keyword is required unless --history is set"))?;
        if keyword.trim().is_empty() {
            return Err(Error::custom("Keyword cannot be empty"));
        }
        ScanProfile::generic(keyword)
    };

    let criteria = SearchCriteria {
        lookback_days: days,
        min_views,
        max_subs,
    };

    let client = YouTubeClient::new(Config::from_env()?)?;
    let now = Utc::now();

    let mut results = Vec::new();
    for keyword in &profile.keywords {
        println!("Searching: {keyword}");
        let found = scan_keyword(&client, keyword, &criteria, profile.max_results, now).await?;
        results.extend(found);
    }

    if results.is_empty() {
        println!("No videos met the filters (duration/views/subs).");
        return Ok(());
    }

    rank(&mut results);
    println!();
    println!("Found {} trending videos:", results.len());
    println!();

    for result in &results {
        println!("{}", result.title);
        println!("  Trend:    {}", result.trend_summary());
        println!(
            "  Stats:    {} min | {} views | {} subs",
            result.duration_minutes, result.view_count, result.subscriber_count
        );
        println!("  Keyword:  {}", result.keyword);
        println!("  Watch:    {}", result.url);
        println!();
    }

    Ok(())
}

async fn run_tui() -> Result<()> {
    // Build the app before touching the terminal so a missing API key
    // prints a readable error instead of garbling the alternate screen.
    let mut app = App::new()?;
    let event_handler = EventHandler::new();

    let mut terminal = tui_init()?;

    let (tx, rx) = mpsc::unbounded_channel();
    app.scan_tx = Some(tx);
    app.scan_rx = Some(rx);

    let result = loop {
        let event = match event_handler.next_event() {
            Ok(event) => event,
            Err(e) => break Err(e),
        };
        if let Err(e) = app.handle_event(event) {
            break Err(e);
        }

        if let Err(e) = terminal.draw(|f| ui::draw(f, &mut app)) {
            break Err(e.into());
        }

        if app.should_quit {
            break Ok(());
        }
    };

    tui_restore()?;
    result
}
