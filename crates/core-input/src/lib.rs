//! Terminal input: turns a stream of raw bytes into a stream of
//! [`KeyEvent`]s. Single-threaded and synchronous throughout — there is no
//! background reader task, no channel, no async runtime. Callers drive the
//! parser by calling [`KeyParser::next_event`] from their own read loop,
//! which blocks exactly as long as the terminal has no input pending.

pub mod error;
pub mod event;
pub mod parser;
pub mod reader;

pub use error::{InputError, InputResult};
pub use event::{KeyCode, KeyEvent, KeyModifiers};
pub use parser::{KeyParser, ESCAPE_TIMEOUT};
pub use reader::{ByteSource, FixedByteSource, TtyByteSource};
