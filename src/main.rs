use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;

use schedcal::event::{parse_event_time, ParsedEvent, DEFAULT_TZ};
use schedcal::gemini::GeminiParser;
use schedcal::state::AppState;
use schedcal::{config, gcal, ics};

/// Sample notification text, for trying the tool without an email at hand.
const SAMPLE_TEXT: &str = "主題: 11/5(三) 21:10-22:00 Emily 伸展瑜伽\n\
時間: 2025年11月5日 09:00 下午 台北\n\
\n\
加入Zoom會議\n\
https://us06web.zoom.us/j/88661239954?pwd=tjAPYL6K2ZBiBfn9pb650aoX19wKvT.1\n\
\n\
會議ID: 886 6123 9954\n\
密碼: emily";

#[derive(Parser)]
#[command(name = "schedcal")]
#[command(about = "Turn class notification emails into Google Calendar links and .ics files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse schedule text and print the events with their calendar links
    Parse {
        /// File containing the schedule text (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Write all events to a single .ics file at this path
        #[arg(long)]
        ics: Option<PathBuf>,

        /// Print only the Google Calendar links, one per line
        #[arg(long)]
        links: bool,
    },
    /// Print a sample schedule text to try the tool out
    Sample,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { file, ics, links } => cmd_parse(file, ics, links).await,
        Commands::Sample => {
            println!("{}", SAMPLE_TEXT);
            Ok(())
        }
    }
}

async fn cmd_parse(file: Option<PathBuf>, ics_path: Option<PathBuf>, links_only: bool) -> Result<()> {
    let text = read_input(file)?;
    if text.trim().is_empty() {
        anyhow::bail!("No schedule text provided.");
    }

    let api_key = config::load_api_key()?;
    let parser = GeminiParser::new(api_key);

    let state = AppState::new().with_input(text).start_parsing();

    let state = match parser.parse_schedule(&state.input_text).await {
        Ok(events) => state.parsed(events),
        Err(err) => {
            let state = state.failed("無法解析內容，請確認 API Key 是否設定，或內容格式是否正確。");
            if let Some(message) = &state.error_message {
                eprintln!("{}", message);
            }
            return Err(err).context("Schedule parsing failed");
        }
    };

    if state.events.is_empty() {
        println!("No events found in the text.");
        return Ok(());
    }

    if links_only {
        for link in gcal::google_calendar_links(&state.events) {
            println!("{}", link);
        }
    } else {
        println!("已找到 {} 堂課程\n", state.events.len());
        for (index, event) in state.events.iter().enumerate() {
            print_event(index, event);
        }
    }

    if let Some(path) = ics_path {
        let path = if path.is_dir() {
            let today = chrono::Utc::now().with_timezone(&DEFAULT_TZ).date_naive();
            path.join(ics::export_filename(today))
        } else {
            path
        };
        let content = ics::encode_calendar(&state.events);
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write calendar file to {}", path.display()))?;
        println!("\nWrote {} events to {}", state.events.len(), path.display());
    }

    Ok(())
}

fn read_input(file: Option<PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read schedule text from {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read schedule text from stdin")?;
            Ok(text)
        }
    }
}

fn print_event(index: usize, event: &ParsedEvent) {
    println!("課程 {}: {}", index + 1, event.title);
    println!("  時間: {} - {}", display_time(&event.start), display_time(&event.end));

    if let Some(ref location) = event.location {
        println!("  地點: {}", location);
    }
    if let Some(ref description) = event.description {
        for line in description.lines() {
            println!("  {}", line);
        }
    }

    println!("  加入 Google 行事曆: {}", gcal::google_calendar_link(event));
    println!();
}

/// Render a timestamp in the default zone for display, falling back to the
/// raw string when it fails to parse.
fn display_time(s: &str) -> String {
    match parse_event_time(s) {
        Some(dt) => dt
            .with_timezone(&DEFAULT_TZ)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
        None => s.to_string(),
    }
}
