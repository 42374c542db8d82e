//! Forsyth-Edwards Notation parsing and formatting.

use thiserror::Error;

use crate::board::{CastlingRights, Position};
use crate::types::*;

/// FEN of the standard starting position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected at least 4 FEN fields, found {0}")]
    TooFewFields(usize),
    #[error("expected 8 ranks in board field, found {0}")]
    RankCount(usize),
    #[error("invalid piece character '{0}'")]
    InvalidPiece(char),
    #[error("rank {rank} does not describe exactly 8 files")]
    RankWidth { rank: usize },
    #[error("invalid side to move '{0}'")]
    SideToMove(String),
    #[error("invalid castling character '{0}'")]
    Castling(char),
    #[error("invalid en-passant square '{0}'")]
    EnPassant(String),
    #[error("invalid {field} '{value}'")]
    Counter { field: &'static str, value: String },
    #[error("{0:?} must have exactly one king")]
    KingCount(Color),
}

impl Position {
    /// Parse a FEN string. The halfmove and fullmove fields are optional and
    /// default to `0` and `1`, so trimmed book FENs load back unchanged.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::TooFewFields(parts.len()));
        }

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }

        let mut board = [None; 64];
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let mut file: i8 = 0;
            let rank: i8 = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                } else {
                    let kind = PieceKind::from_char(ch).ok_or(FenError::InvalidPiece(ch))?;
                    let color = if ch.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let s = sq(file, rank).ok_or(FenError::RankWidth { rank: 8 - rank_idx })?;
                    board[s as usize] = Some(Piece { color, kind });
                    file += 1;
                }
                if file > 8 {
                    return Err(FenError::RankWidth { rank: 8 - rank_idx });
                }
            }
            if file != 8 {
                return Err(FenError::RankWidth { rank: 8 - rank_idx });
            }
        }

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::SideToMove(other.to_string())),
        };

        let mut castling = CastlingRights::NONE;
        if parts[2] != "-" {
            for c in parts[2].chars() {
                match c {
                    'K' => castling.wk = true,
                    'Q' => castling.wq = true,
                    'k' => castling.bk = true,
                    'q' => castling.bq = true,
                    _ => return Err(FenError::Castling(c)),
                }
            }
        }

        let en_passant = match parts[3] {
            "-" => None,
            ep => Some(coord_to_sq(ep).ok_or_else(|| FenError::EnPassant(ep.to_string()))?),
        };

        let halfmove_clock = parse_counter("halfmove clock", parts.get(4).copied().unwrap_or("0"))?;
        let fullmove_number =
            parse_counter("fullmove number", parts.get(5).copied().unwrap_or("1"))?;

        let pos = Position {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number: fullmove_number.max(1),
        };

        for color in [Color::White, Color::Black] {
            let kings = pos
                .board
                .iter()
                .flatten()
                .filter(|pc| pc.color == color && pc.kind == PieceKind::King)
                .count();
            if kings != 1 {
                return Err(FenError::KingCount(color));
            }
        }

        Ok(pos)
    }

    /// Canonical FEN text. The en-passant field is only written when a
    /// capture on it is actually available.
    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(90);
        for rank in (0..8i8).rev() {
            let mut empty = 0;
            for file in 0..8i8 {
                let s = (rank * 8 + file) as u8;
                match self.piece_at(s) {
                    Some(pc) => {
                        if empty > 0 {
                            out.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        out.push(pc.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push(char::from(b'0' + empty));
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        let rights = [
            (self.castling.wk, 'K'),
            (self.castling.wq, 'Q'),
            (self.castling.bk, 'k'),
            (self.castling.bq, 'q'),
        ];
        let before = out.len();
        out.extend(rights.iter().filter(|(on, _)| *on).map(|(_, c)| *c));
        if out.len() == before {
            out.push('-');
        }

        out.push(' ');
        match self.capturable_en_passant() {
            Some(ep) => out.push_str(&sq_to_coord(ep)),
            None => out.push('-'),
        }

        out.push_str(&format!(
            " {} {}",
            self.halfmove_clock, self.fullmove_number
        ));
        out
    }
}

fn parse_counter(field: &'static str, value: &str) -> Result<u32, FenError> {
    value.parse().map_err(|_| FenError::Counter {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
#[path = "fen_tests.rs"]
mod fen_tests;
