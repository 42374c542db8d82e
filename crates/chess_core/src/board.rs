use std::ops::{Deref, DerefMut};

use crate::types::*;
use crate::zobrist::ZOBRIST;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights {
        wk: false,
        wq: false,
        bk: false,
        bq: false,
    };

    pub const ALL: CastlingRights = CastlingRights {
        wk: true,
        wq: true,
        bk: true,
        bq: true,
    };
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>, // square behind a pawn that just advanced 2
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

#[derive(Clone, Debug)]
pub struct Undo {
    pub captured: Option<Piece>,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    pub moved_piece: Piece,
    pub rook_move: Option<(u8, u8)>, // (rook_from, rook_to) for castling
    pub ep_captured_sq: Option<u8>,  // square actually captured in en-passant
}

/// A move applied to a position for the lifetime of the guard.
///
/// Dropping the guard retracts the move, so every exit path out of a
/// recursive walk (including `?` and early `return`) leaves the position
/// exactly as it found it.
pub struct Played<'a> {
    pos: &'a mut Position,
    mv: Move,
    undo: Option<Undo>,
}

impl Deref for Played<'_> {
    type Target = Position;

    fn deref(&self) -> &Position {
        self.pos
    }
}

impl DerefMut for Played<'_> {
    fn deref_mut(&mut self) -> &mut Position {
        self.pos
    }
}

impl Drop for Played<'_> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            self.pos.unmake_move(self.mv, undo);
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    pub fn startpos() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        let mut board = [None; 64];
        for (file, kind) in BACK_RANK.into_iter().enumerate() {
            for (color, home, pawns) in [(Color::White, 0, 8), (Color::Black, 56, 48)] {
                board[home + file] = Some(Piece { color, kind });
                board[pawns + file] = Some(Piece {
                    color,
                    kind: PieceKind::Pawn,
                });
            }
        }
        Position {
            board,
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    pub fn king_sq(&self, c: Color) -> Option<u8> {
        let king = Piece {
            color: c,
            kind: PieceKind::King,
        };
        self.board
            .iter()
            .position(|&slot| slot == Some(king))
            .map(|i| i as u8)
    }

    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.board[sq as usize]
    }
    pub fn set_piece(&mut self, sq: u8, pc: Option<Piece>) {
        self.board[sq as usize] = pc;
    }

    pub fn in_check(&self, c: Color) -> bool {
        self.king_sq(c)
            .is_some_and(|k| self.is_square_attacked(k, c.other()))
    }

    /// En-passant square only when a pawn of the side to move stands ready to
    /// take on it. FEN output and hashing both go through this so that a
    /// double push nobody can answer does not split otherwise equal positions.
    pub fn capturable_en_passant(&self) -> Option<u8> {
        let ep = self.en_passant?;
        let us = self.side_to_move;
        // our pawns capture toward the ep square from one rank behind it
        let behind = match us {
            Color::White => -1,
            Color::Black => 1,
        };
        let capturer = [-1i8, 1].into_iter().any(|df| {
            sq(file_of(ep) + df, rank_of(ep) + behind)
                .and_then(|s| self.piece_at(s))
                .is_some_and(|pc| pc.color == us && pc.kind == PieceKind::Pawn)
        });
        capturer.then_some(ep)
    }

    /// Full Zobrist hash of the position (pieces, side, castling, capturable ep file).
    pub fn position_hash(&self) -> u64 {
        let mut h = 0u64;
        for (i, slot) in self.board.iter().enumerate() {
            if let Some(pc) = slot {
                h ^= ZOBRIST.piece_key(*pc, i as u8);
            }
        }
        if self.side_to_move == Color::Black {
            h ^= ZOBRIST.black_to_move();
        }
        let rights = [
            self.castling.wk,
            self.castling.wq,
            self.castling.bk,
            self.castling.bq,
        ];
        for (i, _) in rights.iter().enumerate().filter(|(_, on)| **on) {
            h ^= ZOBRIST.castling_key(i);
        }
        if let Some(ep) = self.capturable_en_passant() {
            h ^= ZOBRIST.ep_key(file_of(ep) as u8);
        }
        h
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Dead positions by material: K v K, K+minor v K, and K+B v K+B with
    /// both bishops on the same square colour.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors = 0;
        let mut bishop_colors = Vec::with_capacity(2);
        for (i, slot) in self.board.iter().enumerate() {
            let Some(pc) = slot else { continue };
            match pc.kind {
                PieceKind::King => {}
                PieceKind::Knight => minors += 1,
                PieceKind::Bishop => {
                    minors += 1;
                    bishop_colors.push((pc.color, (file_of(i as u8) + rank_of(i as u8)) % 2));
                }
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
            }
        }
        match minors {
            0 | 1 => true,
            2 => {
                bishop_colors.len() == 2
                    && bishop_colors[0].0 != bishop_colors[1].0
                    && bishop_colors[0].1 == bishop_colors[1].1
            }
            _ => false,
        }
    }

    pub fn is_square_attacked(&self, target: u8, by: Color) -> bool {
        let tf = file_of(target);
        let tr = rank_of(target);
        // Pawns attack the target from one rank behind their direction of travel.
        let pawn_dirs: &[(i8, i8)] = match by {
            Color::White => &[(-1, -1), (1, -1)],
            Color::Black => &[(-1, 1), (1, 1)],
        };
        for (df, dr) in pawn_dirs {
            if let Some(s) = sq(tf + df, tr + dr)
                && self.holds(s, by, &[PieceKind::Pawn])
            {
                return true;
            }
        }

        for (df, dr) in KNIGHT_DELTAS {
            if let Some(s) = sq(tf + df, tr + dr)
                && self.holds(s, by, &[PieceKind::Knight])
            {
                return true;
            }
        }

        for (df, dr) in KING_DELTAS {
            if let Some(s) = sq(tf + df, tr + dr)
                && self.holds(s, by, &[PieceKind::King])
            {
                return true;
            }
        }

        let rays: [(&[(i8, i8)], [PieceKind; 2]); 2] = [
            (&DIAGONALS, [PieceKind::Bishop, PieceKind::Queen]),
            (&ORTHOGONALS, [PieceKind::Rook, PieceKind::Queen]),
        ];
        for (dirs, sliders) in rays {
            for (df, dr) in dirs {
                let mut f = tf + df;
                let mut r = tr + dr;
                while let Some(s) = sq(f, r) {
                    if self.piece_at(s).is_some() {
                        if self.holds(s, by, &sliders) {
                            return true;
                        }
                        break;
                    }
                    f += df;
                    r += dr;
                }
            }
        }

        false
    }

    fn holds(&self, s: u8, by: Color, kinds: &[PieceKind]) -> bool {
        self.piece_at(s)
            .is_some_and(|pc| pc.color == by && kinds.contains(&pc.kind))
    }

    /// Apply `mv` and hand back a guard that retracts it on drop.
    pub fn play(&mut self, mv: Move) -> Played<'_> {
        let undo = self.make_move(mv);
        Played {
            pos: self,
            mv,
            undo: Some(undo),
        }
    }

    /// Apply a legal move. The returned `Undo` must go back to
    /// `unmake_move` with the same move.
    pub fn make_move(&mut self, mv: Move) -> Undo {
        let moved = self.piece_at(mv.from).expect("make_move: empty from-square");
        let mut undo = Undo {
            captured: self.piece_at(mv.to),
            castling: self.castling.clone(),
            en_passant: self.en_passant.take(),
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            moved_piece: moved,
            rook_move: None,
            ep_captured_sq: None,
        };

        if mv.is_en_passant {
            // The captured pawn sits beside the mover, on the rank it left.
            let victim = sq(file_of(mv.to), rank_of(mv.from));
            if let Some(v) = victim {
                undo.captured = self.piece_at(v);
                undo.ep_captured_sq = victim;
                self.set_piece(v, None);
            }
        }

        let landed = match mv.promo {
            Some(kind) if moved.kind == PieceKind::Pawn && is_last_rank(moved.color, mv.to) => {
                Piece { kind, ..moved }
            }
            None if moved.kind == PieceKind::Pawn && is_last_rank(moved.color, mv.to) => Piece {
                kind: PieceKind::Queen,
                ..moved
            },
            _ => moved,
        };
        self.set_piece(mv.from, None);
        self.set_piece(mv.to, Some(landed));

        if mv.is_castle
            && moved.kind == PieceKind::King
            && let Some((rf, rt)) = castle_rook(mv.from, mv.to)
        {
            let rook = self.piece_at(rf);
            self.set_piece(rf, None);
            self.set_piece(rt, rook);
            undo.rook_move = Some((rf, rt));
        }

        self.update_castling(moved, mv);

        if moved.kind == PieceKind::Pawn && rank_of(mv.from).abs_diff(rank_of(mv.to)) == 2 {
            self.en_passant = sq(file_of(mv.from), (rank_of(mv.from) + rank_of(mv.to)) / 2);
        }

        let irreversible = moved.kind == PieceKind::Pawn || undo.captured.is_some();
        self.halfmove_clock = if irreversible {
            0
        } else {
            self.halfmove_clock + 1
        };
        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();

        undo
    }

    /// A king move loses both of its side's rights; any move from or onto a
    /// corner loses that corner's right.
    fn update_castling(&mut self, moved: Piece, mv: Move) {
        let rights = &mut self.castling;
        if moved.kind == PieceKind::King {
            match moved.color {
                Color::White => (rights.wk, rights.wq) = (false, false),
                Color::Black => (rights.bk, rights.bq) = (false, false),
            }
        }
        for corner in [mv.from, mv.to] {
            match corner {
                0 => rights.wq = false,
                7 => rights.wk = false,
                56 => rights.bq = false,
                63 => rights.bk = false,
                _ => {}
            }
        }
    }

    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        if let Some((rf, rt)) = undo.rook_move {
            self.board.swap(rf as usize, rt as usize);
        }

        self.set_piece(mv.from, Some(undo.moved_piece));
        match undo.ep_captured_sq {
            Some(v) => {
                self.set_piece(mv.to, None);
                self.set_piece(v, undo.captured);
            }
            None => self.set_piece(mv.to, undo.captured),
        }

        self.side_to_move = self.side_to_move.other();
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;
    }
}

/// Rook from/to squares for a king's castling move.
fn castle_rook(king_from: u8, king_to: u8) -> Option<(u8, u8)> {
    match (king_from, king_to) {
        (4, 6) => Some((7, 5)),
        (4, 2) => Some((0, 3)),
        (60, 62) => Some((63, 61)),
        (60, 58) => Some((56, 59)),
        _ => None,
    }
}

fn is_last_rank(c: Color, s: u8) -> bool {
    match c {
        Color::White => rank_of(s) == 7,
        Color::Black => rank_of(s) == 0,
    }
}

pub(crate) const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

pub(crate) const KING_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
