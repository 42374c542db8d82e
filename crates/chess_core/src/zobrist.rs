//! Zobrist keys for position hashing.
//!
//! The engine uses the hash to spot repetitions along the search path, so
//! only the parts of a position that decide repetition are keyed: pieces,
//! side to move, castling rights and a capturable en-passant file. Move
//! counters are not.

use crate::types::Piece;

/// 12 piece kinds x 64 squares.
const PIECE_KEYS: usize = 12 * 64;

pub struct ZobristKeys {
    /// Indexed by `(color * 6 + kind) * 64 + square`.
    pieces: [u64; PIECE_KEYS],
    black_to_move: u64,
    /// White kingside, white queenside, black kingside, black queenside.
    castling: [u64; 4],
    en_passant: [u64; 8],
}

/// splitmix64 step: advances `state` and returns the next output.
const fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

impl ZobristKeys {
    const fn generate(seed: u64) -> Self {
        let mut state = seed;

        let mut pieces = [0u64; PIECE_KEYS];
        let mut i = 0;
        while i < PIECE_KEYS {
            pieces[i] = splitmix64(&mut state);
            i += 1;
        }

        let black_to_move = splitmix64(&mut state);

        let mut castling = [0u64; 4];
        let mut i = 0;
        while i < 4 {
            castling[i] = splitmix64(&mut state);
            i += 1;
        }

        let mut en_passant = [0u64; 8];
        let mut i = 0;
        while i < 8 {
            en_passant[i] = splitmix64(&mut state);
            i += 1;
        }

        Self {
            pieces,
            black_to_move,
            castling,
            en_passant,
        }
    }

    #[inline]
    pub fn piece_key(&self, piece: Piece, sq: u8) -> u64 {
        self.pieces[(piece.color.idx() * 6 + piece.kind.idx()) * 64 + sq as usize]
    }

    #[inline]
    pub fn black_to_move(&self) -> u64 {
        self.black_to_move
    }

    /// `right`: 0 = white kingside, 1 = white queenside, 2 = black kingside,
    /// 3 = black queenside.
    #[inline]
    pub fn castling_key(&self, right: usize) -> u64 {
        self.castling[right]
    }

    #[inline]
    pub fn ep_key(&self, file: u8) -> u64 {
        self.en_passant[file as usize]
    }

    #[cfg(test)]
    fn all_keys(&self) -> impl Iterator<Item = u64> + '_ {
        self.pieces
            .iter()
            .chain(std::iter::once(&self.black_to_move))
            .chain(self.castling.iter())
            .chain(self.en_passant.iter())
            .copied()
    }
}

/// Keys shared by every position, built at compile time from a fixed seed.
pub static ZOBRIST: ZobristKeys = ZobristKeys::generate(0x0B00_C0DE_5EED_2024);

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
