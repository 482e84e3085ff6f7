//! Line-oriented host loop: reads commands, drives the session, writes scenes.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use serde_json::json;
use tracing::{info, info_span, warn};

use crate::command::{Command, HELP};
use crate::config::Config;
use crate::session::{MoveOutcome, Session, SessionError};

enum Reply {
    Scene,
    Help,
}

/// Runs one interactive session until `quit` or end of input.
///
/// Every command produces exactly one JSON line on `output`: the scene after
/// the command, the help text, or `{"error": ...}` for rejected input.
///
/// # Errors
/// Fails on invalid settings or when reading input / writing output fails.
/// Rejected commands are reported on `output` and do not end the loop.
pub fn run<I, W>(config: &Config, input: I, mut output: W) -> Result<()>
where
    I: BufRead,
    W: Write,
{
    let settings = config
        .session_settings()
        .context("invalid session settings")?;
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut session = Session::new(settings, rng).context("failed to start session")?;
    write_line(&mut output, &session.scene())?;

    for line in input.lines() {
        let line = line.context("failed to read command")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => command,
            Err(error) => {
                warn!(error = %error, line = %line.trim(), "rejected command");
                write_line(&mut output, &json!({ "error": error.to_string() }))?;
                continue;
            }
        };

        let _span = info_span!("command", ?command).entered();
        match dispatch(&mut session, command) {
            Ok(Reply::Scene) => write_line(&mut output, &session.scene())?,
            Ok(Reply::Help) => write_line(&mut output, &json!({ "help": HELP }))?,
            Err(error) => {
                warn!(error = %error, "command failed");
                write_line(&mut output, &json!({ "error": error.to_string() }))?;
            }
        }
    }

    info!("host loop finished");
    output.flush().context("failed to flush output")
}

fn dispatch<R: rand::Rng>(session: &mut Session<R>, command: Command) -> Result<Reply, SessionError> {
    match command {
        Command::Assign => {
            session.assign()?;
        }
        Command::Move => {
            if session.move_centroids()? == MoveOutcome::NotAssigned {
                info!("assign points before moving centroids");
            }
        }
        Command::Restart => session.restart(),
        Command::SelectK(k) => session.select_k(k)?,
        Command::Show | Command::Quit => {}
        Command::Help => return Ok(Reply::Help),
    }
    Ok(Reply::Scene)
}

fn write_line<W: Write, T: Serialize>(output: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer(&mut *output, value).context("failed to serialize output")?;
    writeln!(output).context("failed to write output")
}
