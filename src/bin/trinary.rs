//! Reads commands from stdin and applies them to a trinary tree of `i64`s.
//!
//! ```text
//! insert 6 5 4
//! delete 5
//! print
//! ```

use std::env;
use std::io::{self, BufRead, Write};

use log::{debug, info, warn};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use trinary::long;
use trinary::tree::Tree;

static USAGE: &str = "\
Commands:
  insert <n>...  insert each number
  delete <n>...  delete one occurrence of each number, printing whether it was found
  print          print the tree
  demo           replay the sample scenarios on fresh trees
  help           show this message
  quit           exit";

fn initialize_logging(level: LevelFilter) {
    if let Err(e) = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("Could not set up logging: {}", e);
    }
}

/// Picks the log level from `-q`, `-v` and `-vv`. Anything else is ignored.
fn log_level(args: impl Iterator<Item = String>) -> LevelFilter {
    let mut level = LevelFilter::Warn;
    for arg in args {
        match arg.as_str() {
            "-q" => level = LevelFilter::Off,
            "-v" => level = LevelFilter::Debug,
            "-vv" => level = LevelFilter::Trace,
            other => eprintln!("Ignoring unknown argument {:?}", other),
        }
    }

    level
}

/// Parses every word as a number, reporting and skipping the ones that aren't.
fn numbers<'a>(words: impl Iterator<Item = &'a str>) -> Vec<i64> {
    words
        .filter_map(|word| match long::try_parse(word) {
            Ok(n) => Some(n),
            Err(e) => {
                warn!("Skipping {:?}: {}", word, e);
                eprintln!("Skipping {:?}: {}.", word, e);
                None
            }
        })
        .collect()
}

/// Replays the root-only and the composite scenarios, printing as it goes.
fn demo(out: &mut impl Write) -> io::Result<()> {
    let mut just_root = Tree::new();
    just_root.insert(10);
    just_root.write_tree(&mut *out)?;
    just_root.delete(&10);
    just_root.write_tree(&mut *out)?;
    writeln!(out, "{}", just_root.delete(&10))?;
    just_root.insert(10);
    writeln!(out, "{}", just_root.delete(&11))?;

    let mut tree = Tree::new();
    for n in [6, 5, 4, 9, 3, 5, 7, 2, 2] {
        tree.insert(n);
    }
    tree.delete(&9);
    for n in [9, 9, 9, 7, 7] {
        tree.insert(n);
    }
    for n in [9, 7] {
        tree.delete(&n);
    }
    tree.insert(4);
    tree.delete(&6);
    tree.write_tree(&mut *out)
}

/// Applies a single line of input. Returns `false` once the user asks to quit.
fn execute_command(line: &str, tree: &mut Tree<i64>, out: &mut impl Write) -> io::Result<bool> {
    let mut words = line.split_whitespace();
    let command = match words.next() {
        Some(command) => command,
        None => return Ok(true),
    };

    match command.to_lowercase().as_str() {
        "insert" => {
            let inserted = numbers(words);
            debug!("Inserting {} values", inserted.len());
            for n in inserted {
                tree.insert(n);
            }
        }
        "delete" => {
            for n in numbers(words) {
                writeln!(out, "{}", tree.delete(&n))?;
            }
        }
        "print" => tree.write_tree(&mut *out)?,
        "demo" => demo(out)?,
        "help" => writeln!(out, "{}", USAGE)?,
        "quit" | "exit" => return Ok(false),
        other => writeln!(out, "Unknown command {:?}. Type 'help' for a list.", other)?,
    }

    Ok(true)
}

fn main() -> io::Result<()> {
    initialize_logging(log_level(env::args().skip(1)));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut tree = Tree::new();

    for line in io::stdin().lock().lines() {
        if !execute_command(&line?, &mut tree, &mut out)? {
            break;
        }
        out.flush()?;
    }

    info!("Done with {} values in the tree", tree.len());
    Ok(())
}
