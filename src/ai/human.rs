use std::io::{self, BufRead, Cursor, Stdin, Stdout, Write};

use tracing::debug;

use crate::game::{Board, MoveError};

use super::agent::Agent;

const PROMPT: &str = "Enter the column where you'd like to drop your piece: ";

/// Source of typed lines.
pub trait LineReader {
    /// Append the next line to `buf`, returning the bytes read (0 at end of input).
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize>;
}

// Locks stdin only for the duration of each read, so several agents can share it.
impl LineReader for Stdin {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        Stdin::read_line(self, buf)
    }
}

impl<T: AsRef<[u8]>> LineReader for Cursor<T> {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

/// A player typing column numbers, one per line.
///
/// Unparsable lines and rejected drops are reported on `output` and the
/// prompt is repeated until a drop succeeds.
pub struct HumanAgent<R, W> {
    input: R,
    output: W,
    name: String,
}

impl HumanAgent<Stdin, Stdout> {
    /// Human reading from stdin and prompting on stdout.
    pub fn stdio(name: impl Into<String>) -> Self {
        Self::new(io::stdin(), io::stdout(), name)
    }
}

impl<R: LineReader, W: Write> HumanAgent<R, W> {
    pub fn new(input: R, output: W, name: impl Into<String>) -> Self {
        HumanAgent {
            input,
            output,
            name: name.into(),
        }
    }

    /// Consume the agent, returning what was written to the player.
    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> Result<String, MoveError> {
        write!(self.output, "{PROMPT}").map_err(input_error)?;
        self.output.flush().map_err(input_error)?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(input_error)?;
        if read == 0 {
            return Err(MoveError::Input("end of input".into()));
        }
        Ok(line.trim().to_string())
    }
}

fn input_error(err: io::Error) -> MoveError {
    MoveError::Input(err.to_string())
}

impl<R: LineReader, W: Write> Agent for HumanAgent<R, W> {
    fn play(&mut self, board: &mut Board) -> Result<usize, MoveError> {
        if board.legal_columns().is_empty() {
            return Err(MoveError::NoLegalMoves);
        }

        loop {
            let line = self.read_line()?;
            let typed: i64 = match line.parse() {
                Ok(typed) => typed,
                Err(_) => {
                    writeln!(self.output, "'{line}' is not a column number")
                        .map_err(input_error)?;
                    continue;
                }
            };

            // Negative and oversized numbers go through the same bounds check
            let column = usize::try_from(typed).unwrap_or(usize::MAX);
            match board.drop_piece(column) {
                Ok(_) => return Ok(column),
                Err(err) => {
                    debug!(column, %err, "rejected human move");
                    writeln!(self.output, "Invalid move: {err}").map_err(input_error)?;
                }
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
