//! The synchronous read-line loop: `read byte -> parse -> lookup
//! binding -> execute action -> record change -> redraw`, driven one
//! [`core_input::KeyEvent`] at a time until the line is accepted, aborted,
//! interrupted, or the input stream ends.

use core_input::{ByteSource, InputError, KeyParser};
use tracing::debug;

use crate::dispatch::Dispatched;
use crate::engine::Engine;

/// What a single `read_line` call ended with: the four terminal states
/// for one interactive line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadLineOutcome {
    Accepted(String),
    Aborted,
    Interrupted,
    Eof,
}

impl Engine {
    /// Drives one line of interactive editing to completion. The caller
    /// owns `parser` (and therefore its underlying [`ByteSource`]) so it
    /// can be reused across multiple `read_line` calls in a shell loop.
    pub fn read_line<S: ByteSource>(
        &mut self,
        prompt: &str,
        parser: &mut KeyParser<S>,
        out: &mut impl std::io::Write,
    ) -> std::io::Result<ReadLineOutcome> {
        self.force_full_redraw();
        self.render_to(prompt, out)?;
        out.flush()?;

        loop {
            let event = match parser.next_event() {
                Ok(event) => event,
                Err(InputError::EndOfStream) => return Ok(ReadLineOutcome::Eof),
                Err(err) => {
                    debug!(target: "actions.readline", error = ?err, "input stream error, treating as eof");
                    return Ok(ReadLineOutcome::Eof);
                }
            };

            match self.dispatch(event) {
                Dispatched::Redraw => {
                    self.render_to(prompt, out)?;
                    out.flush()?;
                }
                Dispatched::NoChange => {}
                Dispatched::ClearScreen => {
                    out.write_all(b"\x1b[2J\x1b[H")?;
                    self.force_full_redraw();
                    self.render_to(prompt, out)?;
                    out.flush()?;
                }
                Dispatched::Accepted(text) => {
                    self.render_to(prompt, out)?;
                    out.write_all(b"\r\n")?;
                    out.flush()?;
                    return Ok(ReadLineOutcome::Accepted(text));
                }
                Dispatched::Aborted => {
                    self.render_to(prompt, out)?;
                    out.write_all(b"\r\n")?;
                    out.flush()?;
                    return Ok(ReadLineOutcome::Aborted);
                }
                Dispatched::Interrupted => {
                    out.write_all(b"^C\r\n")?;
                    out.flush()?;
                    return Ok(ReadLineOutcome::Interrupted);
                }
                Dispatched::Suspend => {
                    out.flush()?;
                }
                Dispatched::Eof => {
                    out.write_all(b"\r\n")?;
                    out.flush()?;
                    return Ok(ReadLineOutcome::Eof);
                }
            }
        }
    }
}
