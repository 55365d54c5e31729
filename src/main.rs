use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use minefield::config::{MAX_HEIGHT, MAX_MINES_COUNT, MAX_WIDTH, MIN_HEIGHT, MIN_MINES_COUNT, MIN_WIDTH};
use minefield::{tui, Button, Event, GameConfig, GameSession, Status};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "minefield", about = "Terminal Minesweeper", version)]
struct Args {
    /// Game mode: easy, normal, hard or custom
    #[arg(short = 'g', long, default_value = "easy")]
    game_mode: String,
    /// Cells in a column (custom mode only)
    #[arg(long, value_parser = clap::value_parser!(u16).range(MIN_HEIGHT as i64..=MAX_HEIGHT as i64))]
    height: Option<u16>,
    /// Cells in a row (custom mode only)
    #[arg(long, value_parser = clap::value_parser!(u16).range(MIN_WIDTH as i64..=MAX_WIDTH as i64))]
    width: Option<u16>,
    /// Mines on the field (custom mode only)
    #[arg(long, value_parser = clap::value_parser!(u16).range(MIN_MINES_COUNT as i64..=MAX_MINES_COUNT as i64))]
    mines_count: Option<u16>,
    /// Seed (0 = random)
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Launch TUI mode
    #[arg(long)]
    tui: bool,
    /// Log at debug level
    #[arg(long)]
    debug: bool,
    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_tracing(args: &Args) -> io::Result<()> {
    let level = if args.debug { Level::DEBUG } else { Level::WARN };
    match &args.log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt().with_max_level(level).with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        // The TUI owns the terminal; only log there when a file was given.
        None if args.tui => {}
        None => tracing_subscriber::fmt().with_max_level(level).with_writer(io::stderr).init(),
    }
    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  o row col  - open cell at row, col (1-based)");
    println!("  f row col  - toggle flag at row, col (1-based)");
    println!("  n          - restart with a new field");
    println!("  q          - quit");
    println!("  h/help     - show this help");
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = init_tracing(&args) {
        eprintln!("cannot open log file: {}", e);
        return ExitCode::FAILURE;
    }

    let config = match GameConfig::parse(
        &args.game_mode,
        args.mines_count.map(usize::from),
        args.height.map(usize::from),
        args.width.map(usize::from),
    ) {
        Ok(c) => c,
        Err(e) => { eprintln!("{}", e); return ExitCode::FAILURE; }
    };
    let session = if args.seed != 0 { GameSession::with_seed(config, args.seed) } else { GameSession::new(config) };
    let session = match session {
        Ok(s) => s,
        Err(e) => { eprintln!("{}", e); return ExitCode::FAILURE; }
    };

    let res = if args.tui { tui::run_tui(session) } else { run_lines(session, args.seed) };
    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => { eprintln!("error: {}", e); ExitCode::FAILURE }
    }
}

fn run_lines(mut session: GameSession, seed: u64) -> io::Result<()> {
    let c = *session.config();
    println!("Minesweeper {} {}x{} with {} mines{}", c.mode(), c.height(), c.width(), c.mines_count(), if seed != 0 { format!(" (seed {})", seed) } else { String::new() });
    println!("Coordinates are 1-based, row first. Type 'h' for help.");
    print_help();

    let mut input = String::new();
    loop {
        println!("\nMines left: {}  Time: {}s", session.remaining_mines(), session.elapsed().as_secs());
        println!("{}", session.field());
        match session.status() {
            Status::Lost => println!("Boom! You hit a mine. 'n' to play again, 'q' to quit."),
            Status::Won => println!("Congratulations! You cleared the field in {}s. 'n' to play again, 'q' to quit.", session.elapsed().as_secs()),
            Status::Playing => {}
        }

        print!("> ");
        io::stdout().flush()?;
        input.clear();
        if io::stdin().read_line(&mut input)? == 0 { break; }
        let line = input.trim();
        if line.is_empty() { continue; }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let event = match parts[0].to_lowercase().as_str() {
            "q" | "quit" | "exit" => Event::Quit,
            "h" | "help" => { print_help(); continue; }
            "n" | "new" | "restart" => Event::Restart,
            cmd @ ("o" | "open" | "f" | "flag") => {
                let Some((row, col)) = parse_coords(&parts) else { continue };
                let button = if cmd.starts_with('o') { Button::Primary } else { Button::Secondary };
                Event::Click { row, col, button }
            }
            other => {
                println!("Unknown command '{}'. Type 'h' for help.", other);
                continue;
            }
        };
        if !session.handle_event(event).map_err(|e| io::Error::new(io::ErrorKind::Other, e))? { break; }
    }
    Ok(())
}

/// Reads `row col` (1-based) from a command line, reporting problems to the player.
fn parse_coords(parts: &[&str]) -> Option<(usize, usize)> {
    if parts.len() < 3 { println!("Usage: {} row col", parts[0]); return None; }
    let row = match parts[1].parse::<usize>() { Ok(v) => v, Err(_) => { println!("Invalid row"); return None; } };
    let col = match parts[2].parse::<usize>() { Ok(v) => v, Err(_) => { println!("Invalid col"); return None; } };
    if row == 0 || col == 0 { println!("Use 1-based coordinates"); return None; }
    Some((row - 1, col - 1))
}
