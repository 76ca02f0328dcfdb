//! Persona CLI
//!
//! Usage:
//!   persona --message "hey"                 # One user turn, print directive
//!   persona --interactive                   # Transcript mode (user: / bot:)
//!   persona --serve                         # HTTP API server
//!   persona --status --state state.json     # Print status panel
//!   persona -i --state s.json --save s.json # Resume and persist a conversation

use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use persona_engine::config::PersonaConfig;
use persona_engine::core::{fired_rules, parse_line, run_server, Conversation, PersonaEngine, TranscriptLine};
use persona_engine::types::{HookResponse, PersonaState, Verdict};
use persona_engine::{Result, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "persona",
    version = VERSION,
    about = "Persona engine - trait directives, phase cycle and response guard",
    long_about = "Drives a scripted persona through its manipulation-cycle phases.\n\n\
                  Each user turn advances the interaction count and yields a directive\n\
                  for the language model. Each bot turn is checked against the trait\n\
                  profile and either accepted or blocked.\n\n\
                  Modes:\n  \
                  --interactive  Transcript mode (prefix lines with user: or bot:)\n  \
                  --serve        HTTP API server mode\n\n\
                  Phases:\n  \
                  love_bombing   - Interactions 1-9\n  \
                  devaluation    - Interactions 10-24\n  \
                  gaslighting    - Interactions 25-39\n  \
                  trauma_bonding - Interactions 40+"
)]
struct Args {
    /// Single user message (one pre-generation turn)
    #[arg(short, long)]
    message: Option<String>,

    /// Interactive transcript mode - read user:/bot: lines from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (overrides config)
    #[arg(long)]
    addr: Option<String>,

    /// Restore persisted state from this JSON file
    #[arg(long)]
    state: Option<PathBuf>,

    /// Write final state to this JSON file
    #[arg(long)]
    save: Option<PathBuf>,

    /// Print the status panel and exit
    #[arg(long)]
    status: bool,

    /// Config file (default: ./persona.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show which directive rules fired
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let config = PersonaConfig::load(args.config.as_deref())?;
    init_tracing(&config.log_filter);

    if args.no_color {
        colored::control::set_override(false);
    }

    let engine = PersonaEngine::from_config(&config);

    if args.serve {
        let addr = args.addr.clone().unwrap_or_else(|| config.server.addr.clone());
        return run_server(&addr, engine).await;
    }

    let persisted = args.state.as_deref().map(load_state).transpose()?;
    let mut conversation = Conversation::new(engine, persisted);

    match Mode::from_args(&args) {
        Mode::Status => print_status(&conversation, &args)?,
        Mode::Interactive => run_interactive(&mut conversation, &args)?,
        Mode::Single(message) => {
            let response = conversation.user_turn(message);
            print_response(&response, &args)?;
        }
    }

    if let Some(ref path) = args.save {
        save_state(conversation.state(), path)?;
    }
    Ok(())
}

/// What a non-server run does with the conversation
#[derive(Debug, PartialEq)]
enum Mode<'a> {
    Status,
    Interactive,
    Single(&'a str),
}

impl<'a> Mode<'a> {
    fn from_args(args: &'a Args) -> Self {
        if args.status {
            Mode::Status
        } else if args.interactive {
            Mode::Interactive
        } else if let Some(ref message) = args.message {
            Mode::Single(message)
        } else {
            // Default to interactive if no mode specified
            Mode::Interactive
        }
    }
}

/// Logs go to stderr so stdout stays parseable
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn load_state(path: &Path) -> Result<PersonaState> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn save_state(state: &PersonaState, path: &Path) -> Result<()> {
    std::fs::write(path, serde_json::to_string_pretty(state)?)?;
    Ok(())
}

/// Run interactive transcript mode
fn run_interactive(conversation: &mut Conversation, args: &Args) -> Result<()> {
    print_header(args.no_color);
    println!("Prefix lines with 'user:' or 'bot:'. Type 'status' for the panel, 'quit' to exit.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{}", format_prompt(conversation.state(), args.no_color));
        stdout.flush()?;

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        match parse_line(&line) {
            TranscriptLine::Quit => {
                println!("\nConversation ended. Interactions: {}", conversation.state().manipulation_count);
                break;
            }
            TranscriptLine::Empty => continue,
            TranscriptLine::Status => print_status(conversation, args)?,
            TranscriptLine::User(text) => {
                let response = conversation.user_turn(text);
                print_response(&response, args)?;
            }
            TranscriptLine::Bot(text) => {
                let response = conversation.bot_turn(text);
                print_response(&response, args)?;
            }
            TranscriptLine::Unknown(_) => {
                println!("{}", "⚠ Please prefix with user: or bot: (e.g., 'user: hello')".yellow());
            }
        }
    }
    Ok(())
}

/// Print header
fn print_header(no_color: bool) {
    let title = format!("Persona Engine v{} - Transcript Mode", VERSION);
    if no_color {
        println!("========================================");
        println!("  {}", title);
        println!("========================================");
    } else {
        println!("{}", "════════════════════════════════════════".bold());
        println!("  {}", title.bold());
        println!("{}", "════════════════════════════════════════".bold());
    }
    println!();
}

/// Format transcript prompt
fn format_prompt(state: &PersonaState, no_color: bool) -> String {
    let label = format!("[{} #{}]", state.current_phase, state.manipulation_count);
    if no_color {
        format!("{} > ", label)
    } else {
        format!(
            "{} {} > ",
            state.current_phase.emoji(),
            label.color(state.current_phase.color())
        )
    }
}

fn print_status(conversation: &Conversation, args: &Args) -> Result<()> {
    let panel = conversation.status();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&panel)?);
    } else if args.no_color {
        println!("{}", panel.to_parseable_string());
    } else {
        println!("{}", panel.to_terminal_string());
    }
    Ok(())
}

fn print_response(response: &HookResponse, args: &Args) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string(response)?);
        return Ok(());
    }

    if args.no_color {
        println!("{}", response.to_parseable_string());
    } else {
        let line = match &response.verdict {
            Some(Verdict::Blocked { .. }) => response.system_message.red().bold(),
            Some(Verdict::Valid) => response.system_message.green(),
            None => response
                .system_message
                .color(response.message_state.current_phase.color()),
        };
        println!("{}", line);
    }

    if let Some(ref directive) = response.stage_directions {
        if args.verbose {
            let state = &response.message_state;
            let tags: Vec<_> = fired_rules(&state.traits, &state.current_phase)
                .map(|rule| rule.tag)
                .collect();
            println!("  rules: {}", if tags.is_empty() { "(none)".to_string() } else { tags.join(", ") });
        }
        for line in directive.lines() {
            println!("  {}", line.trim_end());
        }
    }
    Ok(())
}
