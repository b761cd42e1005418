//! Interactive console: grow and shrink a tree one line at a time and look at it.
//!
//! ```text
//! cargo run --example console --features graphviz -- dot -Tx11
//! ```
//!
//! A number inserts it, `d <n>` removes one node holding `n`, `f <n>` looks
//! `n` up. An empty line or end of input quits. After every change the tree is
//! written as a Graphviz graph to stdout, or piped into the viewer command.

#![cfg_attr(test, allow(dead_code))]

use std::io::{self, BufRead, Write};
use std::process::{Child, Command, Stdio};

use anyhow::{anyhow, bail, Context};
use clap::Parser;
use log::{debug, info, warn};
use rbtree_arena::RbTree;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

#[derive(Debug, Parser)]
#[command(about = "Insert and remove numbers in a red-black tree and render every snapshot")]
struct Args {
    /// Wait for the viewer to exit before reading the next line
    #[arg(long)]
    wait: bool,
    /// Log verbosity written to stderr
    #[arg(long, default_value = "info")]
    log_level: String,
    /// Viewer command fed each snapshot on stdin, e.g. `dot -Tx11`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    viewer: Vec<String>,
}

#[derive(Debug, PartialEq, Eq)]
enum Line {
    Insert(i64),
    Remove(i64),
    Find(i64),
    Quit,
}

fn parse_line(line: &str) -> anyhow::Result<Line> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Line::Quit);
    }
    let number = |s: &str| {
        s.trim()
            .parse::<i64>()
            .with_context(|| format!("not a number: {s:?}"))
    };
    match line.split_once(char::is_whitespace) {
        Some(("d", rest)) => Ok(Line::Remove(number(rest)?)),
        Some(("f", rest)) => Ok(Line::Find(number(rest)?)),
        Some((cmd, _)) => bail!("unknown command: {cmd:?}"),
        None => Ok(Line::Insert(number(line)?)),
    }
}

/// Where each snapshot goes.
struct Renderer {
    viewer: Vec<String>,
    wait: bool,
    running: Vec<Child>,
}

impl Renderer {
    fn render(&mut self, tree: &RbTree<i64>) -> anyhow::Result<()> {
        let Some((program, args)) = self.viewer.split_first() else {
            let stdout = io::stdout();
            return Ok(tree.write_dot(stdout.lock())?);
        };

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to start viewer {program:?}"))?;
        // Dropping the pipe sends EOF to the viewer.
        let written = match child.stdin.take() {
            Some(stdin) => tree.write_dot(io::BufWriter::new(stdin)),
            None => Ok(()),
        };
        if self.wait {
            let status = child.wait().context("failed to wait for viewer")?;
            debug!("viewer exited with {status}");
        } else {
            self.running.push(child);
        }
        written.context("failed to write snapshot to viewer")
    }

    fn reap(&mut self) {
        self.running
            .retain_mut(|child| !matches!(child.try_wait(), Ok(Some(_))));
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let level: LevelFilter = args
        .log_level
        .parse()
        .map_err(|_| anyhow!("invalid log level: {:?}", args.log_level))?;
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let mut tree = RbTree::new();
    let mut renderer = Renderer {
        viewer: args.viewer,
        wait: args.wait,
        running: Vec::new(),
    };

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        eprint!("Enter number, d <n> or f <n> (none to finish): ");
        io::stderr().flush()?;
        let Some(line) = lines.next().transpose()? else {
            break;
        };
        let changed = match parse_line(&line) {
            Ok(Line::Quit) => break,
            Ok(Line::Insert(n)) => {
                let node = tree.insert(n);
                debug!("inserted {n} as {node:?}");
                true
            }
            Ok(Line::Remove(n)) => match tree.find(&n) {
                Some(node) => tree.remove(node).is_some(),
                None => {
                    warn!("{n} is not in the tree");
                    false
                }
            },
            Ok(Line::Find(n)) => {
                match tree.find(&n).and_then(|node| tree.node(node)) {
                    Some(node) => info!("found {n} at {:?} ({:?})", node.index(), node.color()),
                    None => info!("{n} is not in the tree"),
                }
                false
            }
            Err(err) => {
                warn!("skipping line: {err:#}");
                false
            }
        };
        if changed {
            if let Err(err) = renderer.render(&tree) {
                warn!("render failed: {err:#}");
            }
        }
        renderer.reap();
    }

    info!("{} keys left", tree.len());
    for mut child in renderer.running {
        let _ = child.wait();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_line_is_ok() {
        assert_eq!(parse_line("42").unwrap(), Line::Insert(42));
        assert_eq!(parse_line(" -7 ").unwrap(), Line::Insert(-7));
        assert_eq!(parse_line("d 3").unwrap(), Line::Remove(3));
        assert_eq!(parse_line("f  9").unwrap(), Line::Find(9));
        assert_eq!(parse_line("").unwrap(), Line::Quit);
        assert!(parse_line("x 1").is_err());
        assert!(parse_line("12abc").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn render_keeps_viewer_that_stopped_reading() {
        let mut tree = RbTree::new();
        for k in 0..20_000 {
            let _ignore = tree.insert(k);
        }
        let mut renderer = Renderer {
            viewer: vec!["true".to_string()],
            wait: false,
            running: Vec::new(),
        };
        // The viewer may exit before the snapshot is written; either way it is tracked.
        let _ignore = renderer.render(&tree);
        assert_eq!(renderer.running.len(), 1);
        for mut child in renderer.running {
            child.wait().unwrap();
        }
    }
}
