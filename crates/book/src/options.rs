//! Book generation options.
//!
//! Options are addressed by their UCI names (`MultiPV`, `MoveScoreRange`,
//! ...) both in `setoption` commands and in TOML config files. Names are
//! matched case-insensitively. Score options are in centipawns.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::error::BookError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    #[error("No such option: {0}")]
    Unknown(String),
    #[error("invalid value '{value}' for option {name}")]
    Invalid { name: &'static str, value: String },
    #[error("value {value} for option {name} is outside {min}..={max}")]
    OutOfRange {
        name: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}

/// Output encoding of the book.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookFormat {
    /// One position per line.
    #[default]
    Epd,
    /// One game record per entry, with the move path as movetext.
    Pgn,
}

impl BookFormat {
    pub fn extension(self) -> &'static str {
        match self {
            BookFormat::Epd => "epd",
            BookFormat::Pgn => "pgn",
        }
    }
}

impl fmt::Display for BookFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for BookFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "epd" => Ok(BookFormat::Epd),
            "pgn" => Ok(BookFormat::Pgn),
            _ => Err(()),
        }
    }
}

/// Everything that shapes how a book is grown, filtered and written.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BookOptions {
    /// Candidates requested from the engine per search.
    #[serde(rename = "MultiPV")]
    pub multipv: usize,
    /// Selection band for candidate moves.
    #[serde(rename = "MoveScoreRange")]
    pub move_score_range: i32,
    /// Filter band for the best move of a stored position.
    #[serde(rename = "AbsScoreRange")]
    pub abs_score_range: i32,
    /// Centre of the absolute band, from White's point of view.
    #[serde(rename = "AbsScoreBias")]
    pub abs_score_bias: i32,
    /// Judge candidates against the bias instead of against the best move.
    #[serde(rename = "AbsMoveScore")]
    pub abs_move_score: bool,
    /// Percentage applied to the selection band at every ply.
    #[serde(rename = "DepthFactor")]
    pub depth_factor: i32,
    /// Drop the halfmove clock and fullmove number from stored FENs.
    #[serde(rename = "TrimFEN")]
    pub trim_fen: bool,
    #[serde(rename = "BookFormat")]
    pub book_format: BookFormat,
    /// Base name for saved books; the format's extension is appended.
    #[serde(rename = "BookPath")]
    pub book_path: String,
    /// EPD target used when `BookPath` is empty.
    #[serde(rename = "EPDPath")]
    pub epd_path: String,
    /// Written to the `Variant` tag of PGN output.
    #[serde(rename = "UCI_Variant")]
    pub variant: String,
    /// Search depth when a command names no limit.
    #[serde(rename = "Depth")]
    pub depth: u8,
}

impl Default for BookOptions {
    fn default() -> Self {
        Self {
            multipv: 1,
            move_score_range: 10,
            abs_score_range: 50,
            abs_score_bias: 0,
            abs_move_score: false,
            depth_factor: 100,
            trim_fen: false,
            book_format: BookFormat::Epd,
            book_path: String::new(),
            epd_path: "book.epd".to_string(),
            variant: "chess".to_string(),
            depth: 4,
        }
    }
}

const MULTIPV: (i64, i64) = (1, 500);
const SCORE_RANGE: (i64, i64) = (0, 10_000);
const SCORE_BIAS: (i64, i64) = (-10_000, 10_000);
const DEPTH_FACTOR: (i64, i64) = (0, 1_000);
const DEPTH: (i64, i64) = (1, 64);

impl BookOptions {
    /// Load options from a TOML file. Keys that are absent keep their default.
    pub fn load(path: &Path) -> Result<Self, BookError> {
        let text = std::fs::read_to_string(path).map_err(|source| BookError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|err| match err {
            ConfigError::Toml(source) => BookError::ParseConfig {
                path: path.to_path_buf(),
                source,
            },
            ConfigError::Option(e) => BookError::Option(e),
        })
    }

    fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let options: BookOptions = toml::from_str(text).map_err(ConfigError::Toml)?;
        options.validate().map_err(ConfigError::Option)?;
        Ok(options)
    }

    /// Range-check every numeric option.
    pub fn validate(&self) -> Result<(), OptionError> {
        check_range("MultiPV", self.multipv as i64, MULTIPV)?;
        check_range("MoveScoreRange", self.move_score_range.into(), SCORE_RANGE)?;
        check_range("AbsScoreRange", self.abs_score_range.into(), SCORE_RANGE)?;
        check_range("AbsScoreBias", self.abs_score_bias.into(), SCORE_BIAS)?;
        check_range("DepthFactor", self.depth_factor.into(), DEPTH_FACTOR)?;
        check_range("Depth", self.depth.into(), DEPTH)?;
        Ok(())
    }

    /// Apply a `setoption name <name> value <value>` pair.
    ///
    /// On error the options are left untouched.
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), OptionError> {
        let value = value.trim();
        match name.trim().to_ascii_lowercase().as_str() {
            "multipv" => self.multipv = parse_spin("MultiPV", value, MULTIPV)? as usize,
            "movescorerange" => {
                self.move_score_range = parse_spin("MoveScoreRange", value, SCORE_RANGE)? as i32
            }
            "absscorerange" => {
                self.abs_score_range = parse_spin("AbsScoreRange", value, SCORE_RANGE)? as i32
            }
            "absscorebias" => {
                self.abs_score_bias = parse_spin("AbsScoreBias", value, SCORE_BIAS)? as i32
            }
            "absmovescore" => self.abs_move_score = parse_check("AbsMoveScore", value)?,
            "depthfactor" => {
                self.depth_factor = parse_spin("DepthFactor", value, DEPTH_FACTOR)? as i32
            }
            "trimfen" => self.trim_fen = parse_check("TrimFEN", value)?,
            "bookformat" => {
                self.book_format = value.parse().map_err(|_| OptionError::Invalid {
                    name: "BookFormat",
                    value: value.to_string(),
                })?
            }
            "bookpath" => self.book_path = value.to_string(),
            "epdpath" => self.epd_path = value.to_string(),
            "uci_variant" => self.variant = value.to_string(),
            "depth" => self.depth = parse_spin("Depth", value, DEPTH)? as u8,
            _ => return Err(OptionError::Unknown(name.trim().to_string())),
        }
        Ok(())
    }

    /// Where `save` writes for the current format.
    pub fn save_target(&self) -> PathBuf {
        let ext = self.book_format.extension();
        if !self.book_path.is_empty() {
            let path = PathBuf::from(&self.book_path);
            if path.extension().is_some_and(|e| e.eq_ignore_ascii_case(ext)) {
                return path;
            }
            return PathBuf::from(format!("{}.{ext}", self.book_path));
        }
        match self.book_format {
            BookFormat::Epd => PathBuf::from(&self.epd_path),
            BookFormat::Pgn => PathBuf::from("book.pgn"),
        }
    }

    /// Option declarations in UCI `option name ...` form, with defaults.
    pub fn uci_declarations() -> Vec<String> {
        let d = BookOptions::default();
        let spin = |name: &str, default: i64, (min, max): (i64, i64)| {
            format!("option name {name} type spin default {default} min {min} max {max}")
        };
        let check = |name: &str, default: bool| format!("option name {name} type check default {default}");
        let string = |name: &str, default: &str| {
            let default = if default.is_empty() { "<empty>" } else { default };
            format!("option name {name} type string default {default}")
        };
        vec![
            spin("Depth", d.depth.into(), DEPTH),
            spin("MultiPV", d.multipv as i64, MULTIPV),
            spin("MoveScoreRange", d.move_score_range.into(), SCORE_RANGE),
            spin("AbsScoreRange", d.abs_score_range.into(), SCORE_RANGE),
            spin("AbsScoreBias", d.abs_score_bias.into(), SCORE_BIAS),
            check("AbsMoveScore", d.abs_move_score),
            spin("DepthFactor", d.depth_factor.into(), DEPTH_FACTOR),
            check("TrimFEN", d.trim_fen),
            format!(
                "option name BookFormat type combo default {} var epd var pgn",
                d.book_format
            ),
            string("BookPath", &d.book_path),
            string("EPDPath", &d.epd_path),
            string("UCI_Variant", &d.variant),
        ]
    }
}

enum ConfigError {
    Toml(toml::de::Error),
    Option(OptionError),
}

fn check_range(name: &'static str, value: i64, (min, max): (i64, i64)) -> Result<(), OptionError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(OptionError::OutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}

fn parse_spin(name: &'static str, value: &str, bounds: (i64, i64)) -> Result<i64, OptionError> {
    let parsed: i64 = value.parse().map_err(|_| OptionError::Invalid {
        name,
        value: value.to_string(),
    })?;
    check_range(name, parsed, bounds)?;
    Ok(parsed)
}

fn parse_check(name: &'static str, value: &str) -> Result<bool, OptionError> {
    match value.to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(OptionError::Invalid {
            name,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "options_tests.rs"]
mod options_tests;
