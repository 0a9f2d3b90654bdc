//! Standalone terminal front end for Irrlicht.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use clap::{ArgAction, Parser};
use irr_map::WorldGraph;
use irr_session::{Interpreter, ProcessInterpreter, Session, SessionConfig};
use log::LevelFilter;

#[derive(Parser)]
#[command(
    name = "irr",
    about = "Play interactive fiction with macros, auto-travel and a live map",
    version
)]
struct Args {
    /// Story file handed to the interpreter
    #[arg(long)]
    story: PathBuf,

    /// Interpreter program to run
    #[arg(long, default_value = "dfrotz")]
    interpreter: String,

    /// Extra argument for the interpreter, placed before the story (repeatable)
    #[arg(long = "interpreter-arg", allow_hyphen_values = true)]
    interpreter_args: Vec<String>,

    /// World graph JSON replacing the bundled map
    #[arg(long)]
    map: Option<PathBuf>,

    /// Delay before each queued command, in milliseconds
    #[arg(long, default_value = "400")]
    pacing_ms: u64,

    /// Location assumed at the start of play
    #[arg(long)]
    start: Option<String>,

    /// Append log records to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log detail (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();

    if let Some(path) = &args.log_file
        && let Err(e) = init_logging(path, args.verbose)
    {
        eprintln!("error: {e}");
        process::exit(1);
    }

    let graph = match load_graph(args.map.as_deref()) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    let mut config = SessionConfig::default().with_pacing(Duration::from_millis(args.pacing_ms));
    if let Some(start) = args.start {
        if let Err(e) = graph.require(&start) {
            eprintln!("error: {e}");
            process::exit(1);
        }
        config = config.with_start_location(start);
    }

    let mut interpreter_args = args.interpreter_args;
    interpreter_args.push(args.story.display().to_string());
    let loaded = ProcessInterpreter::spawn(&args.interpreter, &interpreter_args, config.max_input)
        .map(|p| Box::new(p) as Box<dyn Interpreter>);

    let session = Session::start(loaded, graph, config);
    let app = irr_tui::app::App::new(session);

    if let Err(e) = irr_tui::terminal::run(app) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Load the world graph from a file, or the bundled one.
fn load_graph(path: Option<&Path>) -> Result<WorldGraph, String> {
    match path {
        Some(p) => WorldGraph::from_path(p).map_err(|e| format!("{}: {e}", p.display())),
        None => WorldGraph::bundled().map_err(|e| format!("bundled map: {e}")),
    }
}

/// Send log records to an append-mode file; the terminal belongs to the UI.
fn init_logging(path: &Path, verbosity: u8) -> Result<(), String> {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| format!("cannot open log file {}: {e}", path.display()))?;
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp_millis()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(|e| format!("logging: {e}"))
}
