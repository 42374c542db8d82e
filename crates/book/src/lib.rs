//! Opening book generation.
//!
//! A [`BookSession`] grows a set of positions by walking the game tree from a
//! root, either through every legal move or only through moves an engine
//! rates within a score band. The set can be pruned by re-searching each
//! position, then printed or saved as EPD or PGN.

pub mod band;
pub mod error;
pub mod expand;
pub mod filter;
pub mod format;
pub mod options;
pub mod session;
pub mod store;

pub use band::{ScoreBand, white_pov};
pub use error::BookError;
pub use expand::{ExpandReport, Selection, expand};
pub use filter::{FilterParams, FilterReport, filter_entries};
pub use format::{movetext, write_book, write_epd, write_pgn};
pub use options::{BookFormat, BookOptions, OptionError};
pub use session::{BookSession, ExpandMode};
pub use store::{BookLine, EntryStore, trim_fen};
