//! Console front-end for Taskline.
//!
//! # Responsibility
//! - Own all presentation: greeting, prompt, printing responses.
//! - Wire the file store and logging into the core tracker.
//!
//! # Invariants
//! - Core never writes to stdout/stderr; every response printed here came
//!   back from `Tracker::handle` as a string.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use taskline_core::{
    core_version, default_log_level, init_logging, parse_command, CommandKind, FileTaskStore,
    Tracker,
};

const DATA_DIR_ENV: &str = "TASKLINE_DATA_DIR";
const DEFAULT_DATA_DIR: &str = "taskline-data";

fn main() {
    let data_dir = resolve_data_dir();

    if let Some(log_dir) = data_dir.join("logs").to_str() {
        if let Err(message) = init_logging(default_log_level(), log_dir) {
            eprintln!("logging disabled: {message}");
        }
    }

    let store = FileTaskStore::new(data_dir.join("tasks.txt"));
    let mut tracker = Tracker::open(store);

    println!("Hello! I'm Taskline v{}.", core_version());
    println!("Tell me what you need to get done. Type `help` for the command list.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let Some(Ok(line)) = lines.next() else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let is_bye = parse_command(input).kind == CommandKind::Bye;
        println!("{}", tracker.handle(input));
        if is_bye {
            break;
        }
    }
}

fn resolve_data_dir() -> PathBuf {
    let base = std::env::var_os(DATA_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
    if base.is_absolute() {
        return base;
    }
    // Logging requires an absolute directory; anchor relative paths to cwd.
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(base),
        Err(_) => base,
    }
}
