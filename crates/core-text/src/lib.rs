//! Gap-buffer text storage, change-operation undo/redo, and the buffer
//! manager (component B of the line editor engine).
//!
//! The buffer manager exclusively owns every managed buffer; each managed
//! buffer exclusively owns its [`Buffer`] and [`ChangeTracker`]. Cursor
//! coordinates are tracked in both byte and codepoint space throughout so
//! callers never need to re-derive one from the other on the hot path.

pub mod buffer;
pub mod change;
pub mod error;
pub mod killring;
pub mod manager;

pub use buffer::{Buffer, CursorPos};
pub use change::{ChangeKind, ChangeOp, ChangeSequence, ChangeTracker};
pub use error::{TextError, TextResult};
pub use killring::{DEFAULT_KILL_RING_CAPACITY, KillAppend, KillRing, YankSpan};
pub use manager::{BufferManager, ManagedBuffer};
