use thiserror::Error;

use crate::{
    board::Position,
    fen::{FenError, START_FEN},
    movegen::legal_moves,
    types::*,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionCommandError {
    #[error("expected 'startpos' or 'fen', found '{0}'")]
    UnknownSource(String),
    #[error(transparent)]
    Fen(#[from] FenError),
    #[error("illegal or malformed move '{mv}' at index {index}")]
    IllegalMove { mv: String, index: usize },
}

pub fn move_to_uci(mv: Move) -> String {
    let mut s = String::with_capacity(5);
    s.push_str(&sq_to_coord(mv.from));
    s.push_str(&sq_to_coord(mv.to));
    if let Some(p) = mv.promo {
        s.push(p.to_char());
    }
    s
}

/// Resolve coordinate notation against the legal moves of `pos`, so castling
/// and en-passant flags come out right. Returns `None` for anything that is
/// not a legal move here.
pub fn parse_uci_move(pos: &Position, txt: &str) -> Option<Move> {
    if !(4..=5).contains(&txt.len()) || !txt.is_ascii() {
        return None;
    }
    let from = coord_to_sq(&txt[0..2])?;
    let to = coord_to_sq(&txt[2..4])?;
    let promo = match txt.as_bytes().get(4) {
        Some(&b) => Some(PieceKind::from_char(b as char)?),
        None => None,
    };

    legal_moves(pos)
        .into_iter()
        .find(|m| m.from == from && m.to == to && m.promo == promo)
}

/// Apply the arguments of a UCI `position` command:
/// `startpos [moves ...]` or `fen <fields...> [moves ...]`.
pub fn parse_position_command(args: &[&str]) -> Result<Position, PositionCommandError> {
    let (fen, rest) = match args.split_first() {
        None => (START_FEN.to_string(), &args[0..0]),
        Some((&"startpos", rest)) => (START_FEN.to_string(), rest),
        Some((&"fen", rest)) => {
            let end = rest.iter().position(|&t| t == "moves").unwrap_or(rest.len());
            (rest[..end].join(" "), &rest[end..])
        }
        Some((other, _)) => return Err(PositionCommandError::UnknownSource(other.to_string())),
    };

    let mut pos = Position::from_fen(&fen)?;
    let moves = match rest.split_first() {
        Some((&"moves", moves)) => moves,
        _ => &[],
    };
    for (index, txt) in moves.iter().enumerate() {
        let mv = parse_uci_move(&pos, txt).ok_or_else(|| PositionCommandError::IllegalMove {
            mv: txt.to_string(),
            index,
        })?;
        pos.make_move(mv);
    }
    Ok(pos)
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
