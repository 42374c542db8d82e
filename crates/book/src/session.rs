//! Book generation session: the engine, options, root position and
//! accumulated entries that every book command operates on.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use chess_core::{Engine, Position, SearchLimits};
use tracing::{debug, info};

use crate::band::ScoreBand;
use crate::error::BookError;
use crate::expand::{ExpandReport, Selection, expand};
use crate::filter::{FilterParams, FilterReport, filter_entries};
use crate::format::write_book;
use crate::options::{BookOptions, OptionError};
use crate::store::EntryStore;

/// How `expand` picks the moves to follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandMode {
    /// Every legal move.
    Exhaustive,
    /// Engine candidates inside the `MoveScoreRange` band.
    Guided,
}

pub struct BookSession {
    engine: Box<dyn Engine>,
    options: BookOptions,
    root: Position,
    store: EntryStore,
}

impl BookSession {
    pub fn new(engine: Box<dyn Engine>, options: BookOptions) -> Self {
        Self {
            engine,
            options,
            root: Position::startpos(),
            store: EntryStore::new(),
        }
    }

    pub fn options(&self) -> &BookOptions {
        &self.options
    }

    /// Update one option by name. The book is not touched.
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), OptionError> {
        self.options.set(name, value)?;
        debug!(name, value, "option set");
        Ok(())
    }

    pub fn root(&self) -> &Position {
        &self.root
    }

    /// Root used by subsequent expansions.
    pub fn set_root(&mut self, root: Position) {
        self.root = root;
    }

    pub fn engine(&self) -> &dyn Engine {
        self.engine.as_ref()
    }

    pub fn engine_mut(&mut self) -> &mut dyn Engine {
        self.engine.as_mut()
    }

    /// Search limits for commands that name none.
    pub fn default_limits(&self) -> SearchLimits {
        SearchLimits::depth(self.options.depth)
    }

    /// Expand `depth` plies from the root and merge the leaves into the book.
    ///
    /// `limits` bounds each engine search in guided mode and is unused in
    /// exhaustive mode.
    pub fn expand(&mut self, depth: u8, mode: ExpandMode, limits: &SearchLimits) -> ExpandReport {
        let opts = &self.options;
        let mut selection = match mode {
            ExpandMode::Exhaustive => Selection::All,
            ExpandMode::Guided => Selection::ScoreGated {
                engine: self.engine.as_mut(),
                limits: limits.clone(),
                multipv: opts.multipv,
                band: ScoreBand {
                    range: opts.move_score_range,
                    bias: opts.abs_score_bias,
                    absolute: opts.abs_move_score,
                },
                depth_factor: opts.depth_factor,
            },
        };
        let report = expand(&self.root, depth, &mut selection, opts.trim_fen, &mut self.store);
        debug!(
            depth,
            ?mode,
            leaves = report.leaves,
            inserted = report.inserted,
            size = self.store.len(),
            "expansion finished"
        );
        report
    }

    /// Re-search every entry and keep those inside the configured bands.
    pub fn filter(&mut self, limits: &SearchLimits) -> FilterReport {
        let opts = &self.options;
        let params = FilterParams {
            multipv: opts.multipv,
            band: ScoreBand {
                range: opts.move_score_range,
                bias: opts.abs_score_bias,
                absolute: opts.abs_move_score,
            },
            abs_range: opts.abs_score_range,
        };
        let (kept, report) = filter_entries(&self.store, self.engine.as_mut(), limits, &params);
        self.store = kept;
        report
    }

    pub fn clear(&mut self) {
        self.store.clear();
    }

    pub fn size(&self) -> usize {
        self.store.len()
    }

    pub fn entries(&self) -> &EntryStore {
        &self.store
    }

    /// Write the book in the configured format.
    pub fn print<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write_book(
            &self.store,
            self.options.book_format,
            &self.options.variant,
            out,
        )
    }

    /// Save the book to the configured target and return its path.
    pub fn save(&self) -> Result<PathBuf, BookError> {
        let path = self.options.save_target();
        let io_err = |source| BookError::Io {
            path: path.clone(),
            source,
        };

        let file = File::create(&path).map_err(io_err)?;
        let mut out = BufWriter::new(file);
        self.print(&mut out).map_err(io_err)?;
        out.flush().map_err(io_err)?;

        info!(
            path = %path.display(),
            entries = self.store.len(),
            format = %self.options.book_format,
            "book saved"
        );
        Ok(path)
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
