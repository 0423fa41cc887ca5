// src/board/fen.rs
//
// FEN dialect: the standard piece-placement grammar plus a `+` prefix
// marking the next piece letter as neutral (a blocker for both sides).
// Malformed placement is recovered: a diagnostic is logged and the
// partial position is returned.

use tracing::warn;

use super::{Board, CASTLE_BK, CASTLE_BQ, CASTLE_WK, CASTLE_WQ};
use crate::utils::{lsb_index, square_index};

impl Board {
    /// Parses a FEN-like string. The placement field ends at the first
    /// space; the standard side / castling / en-passant / clock fields
    /// are applied when present and left at their defaults otherwise.
    pub fn from_fen(fen: &str) -> Board {
        let mut board = Board::new_empty();

        let mut rank: i32 = 7;
        let mut file: i32 = 0;
        let mut neutral = false;

        let mut rest: &str = "";

        for (pos, c) in fen.char_indices() {
            if c == ' ' {
                rest = &fen[pos + 1..];
                break;
            }
            if c == '/' {
                rank -= 1;
                file = 0;
                if rank < 0 {
                    warn!("FEN placement has too many ranks; truncating at `{fen}`");
                    break;
                }
                continue;
            }
            if let Some(d) = c.to_digit(10) {
                file += d as i32;
                continue;
            }
            if c == '+' {
                neutral = true;
                continue;
            }

            if file > 7 {
                warn!("FEN rank overflows file 8 at `{c}`; piece dropped");
                neutral = false;
                continue;
            }

            let bit = 1u64 << square_index(rank as usize, file as usize);
            *board.piece_boards.entry(c).or_insert(0) |= bit;
            board.occupancy |= bit;
            if neutral {
                board.occ_white |= bit;
                board.occ_black |= bit;
                neutral = false;
            } else if c.is_ascii_uppercase() {
                board.occ_white |= bit;
            } else {
                board.occ_black |= bit;
            }
            file += 1;
        }

        board.apply_fen_suffix(rest);
        board.refresh_zobrist();
        board
    }

    fn apply_fen_suffix(&mut self, rest: &str) {
        let mut fields = rest.split_whitespace();

        if let Some(side) = fields.next() {
            match side {
                "w" => self.white_to_move = true,
                "b" => self.white_to_move = false,
                other => warn!("unrecognised side-to-move field `{other}`"),
            }
        }

        if let Some(castling) = fields.next() {
            self.castling_rights = 0;
            if castling != "-" {
                for c in castling.chars() {
                    match c {
                        'K' => self.castling_rights |= CASTLE_WK,
                        'Q' => self.castling_rights |= CASTLE_WQ,
                        'k' => self.castling_rights |= CASTLE_BK,
                        'q' => self.castling_rights |= CASTLE_BQ,
                        other => warn!("unrecognised castling flag `{other}`"),
                    }
                }
            }
        }

        if let Some(ep) = fields.next() {
            if ep != "-" {
                self.en_passant = parse_ep_square(ep).unwrap_or_else(|| {
                    warn!("unrecognised en-passant field `{ep}`");
                    0
                });
            }
        }

        if let Some(halfmove) = fields.next() {
            self.halfmove_clock = halfmove.parse().unwrap_or_else(|_| {
                warn!("unrecognised halfmove clock `{halfmove}`");
                0
            });
        }
        if let Some(fullmove) = fields.next() {
            self.fullmove_number = fullmove.parse().unwrap_or_else(|_| {
                warn!("unrecognised fullmove number `{fullmove}`");
                1
            });
        }
    }

    /// Serialises the position back to the FEN dialect, emitting `+`
    /// before letters on neutral squares.
    pub fn to_fen(&self) -> String {
        let neutral = self.neutral_squares();
        let mut out = String::new();

        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                let sq = square_index(rank, file);
                match self.piece_letter_at(sq) {
                    Some(letter) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        if neutral & (1u64 << sq) != 0 {
                            out.push('+');
                        }
                        out.push(letter);
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(if self.white_to_move { 'w' } else { 'b' });

        out.push(' ');
        if self.castling_rights == 0 {
            out.push('-');
        } else {
            if self.castling_rights & CASTLE_WK != 0 {
                out.push('K');
            }
            if self.castling_rights & CASTLE_WQ != 0 {
                out.push('Q');
            }
            if self.castling_rights & CASTLE_BK != 0 {
                out.push('k');
            }
            if self.castling_rights & CASTLE_BQ != 0 {
                out.push('q');
            }
        }

        out.push(' ');
        if self.en_passant == 0 {
            out.push('-');
        } else {
            let sq = lsb_index(self.en_passant);
            out.push((b'a' + sq % 8) as char);
            out.push((b'1' + sq / 8) as char);
        }

        out.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        out
    }
}

fn parse_ep_square(s: &str) -> Option<u64> {
    let mut chars = s.chars();
    let file = chars.next()?;
    let rank = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
        return None;
    }
    let sq = square_index(rank as usize - '1' as usize, file as usize - 'a' as usize);
    Some(1u64 << sq)
}
