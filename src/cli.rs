//! Command-line argument parsing for the replay tool
//!
//! Supports:
//! - Seeding the buffer with initial text
//! - Viewport size for layout and scrolling
//! - A sequence of edit steps applied in order

use clap::Parser;
use std::path::PathBuf;

/// Replay edit steps against a headless text editor
#[derive(Parser, Debug)]
#[command(name = "caret", version, about = "Replay edit steps against a headless text editor")]
pub struct CliArgs {
    /// Initial buffer contents
    #[arg(short, long, default_value = "")]
    pub text: String,

    /// Viewport width in pixels
    #[arg(long, value_name = "W", default_value_t = 320.0)]
    pub width: f32,

    /// Viewport height in pixels
    #[arg(long, value_name = "H", default_value_t = 160.0)]
    pub height: f32,

    /// Config file (defaults to ~/.config/caret/config.yaml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Steps: type=TEXT, select=START,LEN, replace=TEXT, click=X,Y or a command name
    #[arg(value_name = "STEPS")]
    pub steps: Vec<String>,
}

/// One replayed action
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Type(String),
    Select { start: usize, length: usize },
    Replace(String),
    Click { x: f32, y: f32 },
    Command(String),
}

fn parse_pair<T: std::str::FromStr>(value: &str, what: &str) -> Result<(T, T), String> {
    let (a, b) = value
        .split_once(',')
        .ok_or_else(|| format!("Expected {}=A,B, got '{}'", what, value))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<T>()
            .map_err(|_| format!("Invalid number '{}' in {}", s, what))
    };
    Ok((parse(a)?, parse(b)?))
}

impl Step {
    pub fn parse(raw: &str) -> Result<Step, String> {
        match raw.split_once('=') {
            Some(("type", text)) => Ok(Step::Type(text.to_string())),
            Some(("replace", text)) => Ok(Step::Replace(text.to_string())),
            Some(("select", range)) => {
                let (start, length) = parse_pair(range, "select")?;
                Ok(Step::Select { start, length })
            }
            Some(("click", point)) => {
                let (x, y) = parse_pair(point, "click")?;
                Ok(Step::Click { x, y })
            }
            Some((key, _)) => Err(format!("Unknown step '{}'", key)),
            None => Ok(Step::Command(raw.to_string())),
        }
    }
}

impl CliArgs {
    /// Parse every step, failing on the first malformed one
    pub fn parsed_steps(&self) -> Result<Vec<Step>, String> {
        self.steps.iter().map(|s| Step::parse(s)).collect()
    }
}
