//! Cantor Prompter
//!
//! Auto-scrolling teleprompter for a resolved setlist: the flattened lyric
//! sheet, the scroll engine (fixed step per tick, speed mapped to tick
//! frequency), and the tokio ticker that drives it.

#![forbid(unsafe_code)]

pub mod document;
pub mod engine;
pub mod ticker;
pub mod types;

pub use document::{LyricSheet, SheetEntry};
pub use engine::{ScrollEngine, MAX_SPEED, MIN_SPEED, STEP_PX};
pub use ticker::Prompter;
pub use types::FontSize;
