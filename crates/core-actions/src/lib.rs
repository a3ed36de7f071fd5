//! The glue layer: owns every other component and turns key events into
//! buffer mutations, undo history, and render passes. This is the crate a
//! host links against to get a complete, Readline-compatible line editor
//! — it is the only crate in the workspace that knows how all the others
//! fit together.

pub mod actions;
pub mod completion;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod persistence;
pub mod readline;
pub mod session;

pub use completion::{Candidate, CandidateKind, CompletionSource};
pub use dispatch::Dispatched;
pub use engine::{engine_init, Engine};
pub use error::{EngineError, EngineResult};
pub use persistence::{HistoryPersistence, NullHistoryPersistence, PersistedEntry};
pub use readline::ReadLineOutcome;
pub use session::SessionMode;
