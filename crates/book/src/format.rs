//! EPD and PGN output for an [`EntryStore`].

use std::io::{self, Write};

use chess_core::START_FEN;

use crate::options::BookFormat;
use crate::store::EntryStore;

/// Movetext lines are wrapped before this width.
const PGN_LINE_WIDTH: usize = 79;

/// Write the book in `format`. `variant` fills the PGN `Variant` tag.
pub fn write_book<W: Write>(
    store: &EntryStore,
    format: BookFormat,
    variant: &str,
    out: &mut W,
) -> io::Result<()> {
    match format {
        BookFormat::Epd => write_epd(store, out),
        BookFormat::Pgn => write_pgn(store, variant, out),
    }
}

/// One FEN per line, in store order.
pub fn write_epd<W: Write>(store: &EntryStore, out: &mut W) -> io::Result<()> {
    for (fen, _) in store.iter() {
        writeln!(out, "{fen}")?;
    }
    Ok(())
}

/// One game record per entry: the move path from its root as movetext.
pub fn write_pgn<W: Write>(store: &EntryStore, variant: &str, out: &mut W) -> io::Result<()> {
    for (_, line) in store.iter() {
        writeln!(out, "[Event \"?\"]")?;
        writeln!(out, "[Site \"?\"]")?;
        writeln!(out, "[Date \"????.??.??\"]")?;
        writeln!(out, "[Round \"?\"]")?;
        writeln!(out, "[White \"?\"]")?;
        writeln!(out, "[Black \"?\"]")?;
        writeln!(out, "[Result \"*\"]")?;
        writeln!(out, "[Variant \"{variant}\"]")?;
        if &*line.root != START_FEN {
            writeln!(out, "[SetUp \"1\"]")?;
            writeln!(out, "[FEN \"{}\"]", line.root)?;
        }
        writeln!(out)?;
        for text in wrap(&movetext(&line.root, &line.moves)) {
            writeln!(out, "{text}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Numbered movetext for `moves` played from `root_fen`, ending in `*`.
///
/// Numbering continues from the root's fullmove number; a path that starts
/// with Black to move opens with `N...`.
pub fn movetext(root_fen: &str, moves: &[String]) -> String {
    let mut fields = root_fen.split_whitespace().skip(1);
    let mut black = fields.next() == Some("b");
    let mut number: u32 = fields.nth(3).and_then(|n| n.parse().ok()).unwrap_or(1);

    let mut out = String::new();
    for (i, mv) in moves.iter().enumerate() {
        if !black {
            out.push_str(&format!("{number}. "));
        } else if i == 0 {
            out.push_str(&format!("{number}... "));
        }
        out.push_str(mv);
        out.push(' ');
        if black {
            number += 1;
        }
        black = !black;
    }
    out.push('*');
    out
}

/// Split movetext on spaces into lines shorter than `PGN_LINE_WIDTH`.
fn wrap(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for token in text.split(' ') {
        if !current.is_empty() && current.len() + 1 + token.len() > PGN_LINE_WIDTH {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(token);
    }
    lines.push(current);
    lines
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod format_tests;
