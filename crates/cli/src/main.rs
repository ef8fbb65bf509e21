//! Terminal front end for Filipino draughts.
//!
//! Play against the learning agent, inspect the win statistics, or reset
//! the persisted state. All game rules live in `draughts_core`; this
//! binary only renders snapshots and forwards square selections.

use std::env;
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use draughts_core::{Owner, Piece, Pos, Rank, BOARD_SIZE};
use session::{GameSession, Snapshot, Store, Turn};

/// Pause before the agent moves, presented as thinking time.
const AGENT_THINK_DELAY: Duration = Duration::from_millis(320);

fn print_usage() {
    println!("Filipino Draughts");
    println!();
    println!("Usage:");
    println!("  draughts play [--dir PATH]");
    println!("  draughts stats [--dir PATH]");
    println!("  draughts reset-agent [--dir PATH]");
    println!("  draughts reset-stats [--dir PATH]");
    println!();
    println!("The data directory (default '.') holds the win statistics and");
    println!("the agent's learned value table as JSON files.");
}

fn parse_dir(args: &[String]) -> String {
    let mut dir = ".".to_string();
    let mut i = 0;
    while i < args.len() {
        if args[i] == "--dir" && i + 1 < args.len() {
            dir = args[i + 1].clone();
            i += 1;
        }
        i += 1;
    }
    dir
}

fn piece_symbol(pc: Option<Piece>) -> char {
    match pc {
        None => '.',
        Some(pc) => match (pc.owner, pc.rank) {
            (Owner::Human, Rank::Man) => 'w',
            (Owner::Human, Rank::King) => 'W',
            (Owner::Agent, Rank::Man) => 'b',
            (Owner::Agent, Rank::King) => 'B',
        },
    }
}

fn render(snap: &Snapshot) {
    println!();
    println!("     0 1 2 3 4 5 6 7");
    for row in 0..BOARD_SIZE {
        print!("  {}  ", row);
        for col in 0..BOARD_SIZE {
            print!("{} ", piece_symbol(snap.board.piece_at(Pos::new(row, col))));
        }
        println!();
    }

    if let Some(sel) = snap.selected {
        let targets: Vec<String> = snap
            .targets
            .iter()
            .map(|p| format!("{} {}", p.row, p.col))
            .collect();
        println!(
            "  Selected {} {}  ->  land on: {}",
            sel.row,
            sel.col,
            targets.join(" | ")
        );
    }

    println!("  {}", snap.status);
    println!(
        "  You {} - {} Agent, draws {}, streak {} (best {}) | exploration {:.0}%, {} learned states",
        snap.stats.human_wins,
        snap.stats.agent_wins,
        snap.stats.draws,
        snap.stats.current_streak,
        snap.stats.best_streak,
        snap.epsilon * 100.0,
        snap.states_learned
    );
}

fn read_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

fn parse_square(input: &str) -> Option<Pos> {
    let mut parts = input.split_whitespace();
    let row: i8 = parts.next()?.parse().ok()?;
    let col: i8 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    draughts_core::pos(row, col)
}

fn cmd_play(args: &[String]) {
    let store = Store::new(parse_dir(args));
    let mut session = GameSession::new(store);

    println!("Enter a square as 'row col' (0-7). Commands: new, quit.");

    loop {
        let snap = session.snapshot();
        render(&snap);

        if snap.turn == Turn::Agent {
            thread::sleep(AGENT_THINK_DELAY);
            session.run_agent_turn();
            continue;
        }

        let prompt = if snap.game_over {
            "  [new/quit] > "
        } else {
            "  > "
        };
        let input = match read_line(prompt) {
            Some(line) => line,
            None => break,
        };

        match input.as_str() {
            "" => {}
            "quit" | "q" | "exit" => break,
            "new" | "n" => session.new_game("New game started. Your turn."),
            other => match parse_square(other) {
                Some(p) => session.select_square(p),
                None => println!("  Could not read that. Try 'row col', 'new' or 'quit'."),
            },
        }
    }
}

fn cmd_stats(args: &[String]) {
    let store = Store::new(parse_dir(args));
    let stats = store.load_stats().unwrap_or_default();
    let learning = store.load_learning().unwrap_or_default();

    println!("Games played: {}", stats.games);
    println!("  You:   {}", stats.human_wins);
    println!("  Agent: {}", stats.agent_wins);
    println!("  Draws: {}", stats.draws);
    println!(
        "Streak: {} (best {})",
        stats.current_streak, stats.best_streak
    );
    println!(
        "Agent: {} learned states, exploration {:.1}%, {} games trained",
        learning.states_learned(),
        learning.epsilon * 100.0,
        learning.games
    );
}

fn confirm(question: &str) -> bool {
    matches!(read_line(question), Some(answer) if answer == "y" || answer == "yes")
}

fn cmd_reset_agent(args: &[String]) {
    if !confirm("Reset agent memory and learned states? [y/N] ") {
        println!("Nothing changed.");
        return;
    }
    let mut session = GameSession::new(Store::new(parse_dir(args)));
    session.reset_agent();
    println!("{}", session.status());
}

fn cmd_reset_stats(args: &[String]) {
    if !confirm("Reset your win stats? [y/N] ") {
        println!("Nothing changed.");
        return;
    }
    let mut session = GameSession::new(Store::new(parse_dir(args)));
    session.reset_stats();
    println!("{}", session.status());
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "play" => cmd_play(&args[2..]),
        "stats" => cmd_stats(&args[2..]),
        "reset-agent" => cmd_reset_agent(&args[2..]),
        "reset-stats" => cmd_reset_stats(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_usage();
        }
    }
}
