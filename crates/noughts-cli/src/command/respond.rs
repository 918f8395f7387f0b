use std::io::{self, BufRead as _, Write};

use anyhow::Context as _;
use log::warn;
use noughts_engine::Board;
use noughts_training::opponent::LearningOpponent;
use serde::Deserialize;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct RespondArg {
    /// Answer a single board instead of reading stdin.
    ///
    /// Accepts a JSON array of nine "X"/"O"/"" strings, `{"board": [...]}`, or
    /// the compact form such as "X.../.O./...".
    #[arg(long)]
    board: Option<String>,
}

/// One move request as sent by a game front end.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Request {
    Wrapped { board: Board },
    Bare(Board),
}

pub(crate) fn run(engine: &mut LearningOpponent, arg: &RespondArg) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    if let Some(board) = &arg.board {
        let board = parse_request(board)?;
        return write_json_line(&mut stdout, &engine.respond(board));
    }

    for (i, line) in io::stdin().lock().lines().enumerate() {
        let line = line.context("Failed to read request from stdin")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_request(line) {
            Ok(board) => write_json_line(&mut stdout, &engine.respond(board))?,
            Err(e) => {
                warn!("request #{}: {e:#}", i + 1);
                let error = serde_json::json!({ "error": format!("{e:#}") });
                write_json_line(&mut stdout, &error)?;
            }
        }
    }
    Ok(())
}

fn parse_request(s: &str) -> anyhow::Result<Board> {
    if s.starts_with(['[', '{']) {
        let request: Request =
            serde_json::from_str(s).with_context(|| format!("Invalid board JSON: {s}"))?;
        return Ok(match request {
            Request::Wrapped { board } | Request::Bare(board) => board,
        });
    }
    s.parse().with_context(|| format!("Invalid board: {s}"))
}

fn write_json_line<W, T>(out: &mut W, value: &T) -> anyhow::Result<()>
where
    W: Write,
    T: serde::Serialize,
{
    serde_json::to_writer(&mut *out, value).context("Failed to write response")?;
    writeln!(out).context("Failed to write response")?;
    out.flush().context("Failed to flush stdout")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use noughts_engine::{Mark, Move};

    use super::*;

    #[test]
    fn test_request_forms() {
        let expected: Board = "X../.O./...".parse().unwrap();
        for input in [
            r#"["X","","","","O","","","",""]"#,
            r#"{"board": ["X","","","","O","","","",""]}"#,
            "X...O....",
        ] {
            assert_eq!(parse_request(input).unwrap(), expected, "{input}");
        }
    }

    #[test]
    fn test_malformed_requests_are_errors() {
        for input in [
            r#"["X","",""]"#,
            r#"["Z","","","","","","","",""]"#,
            r#"{"cells": []}"#,
            "XO",
        ] {
            assert!(parse_request(input).is_err(), "{input}");
        }
    }

    #[test]
    fn test_json_line_output() {
        let mut out = Vec::new();
        let board = Board::new().with_mark(Move::CENTER, Mark::Player);
        write_json_line(&mut out, &board).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[\"\",\"\",\"\",\"\",\"X\",\"\",\"\",\"\",\"\"]\n"
        );
    }
}
