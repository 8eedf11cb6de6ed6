//! Legal move generation.
//!
//! Moves come out in a fixed order: origin squares a1..h8, and for each piece
//! its step/ray tables in declaration order (promotions Q, R, B, N). Search
//! tie-breaking depends on this order, so it must stay deterministic.

use crate::{board::Position, types::*};

/// Generate all legal moves, returning a freshly allocated vector.
/// Internally delegates to `legal_moves_into`, cloning the position only once.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves(pos, out);

    let mover = pos.side_to_move;
    out.retain(|&mv| leaves_king_safe(pos, mv, mover));
}

/// True as soon as one legal move exists; cheaper than a full generation.
pub fn has_legal_move(pos: &Position) -> bool {
    let mut tmp = pos.clone();
    let mut pseudo = Vec::with_capacity(64);
    pseudo_moves(&tmp, &mut pseudo);

    let mover = tmp.side_to_move;
    pseudo
        .into_iter()
        .any(|mv| leaves_king_safe(&mut tmp, mv, mover))
}

fn leaves_king_safe(pos: &mut Position, mv: Move, mover: Color) -> bool {
    let undo = pos.make_move(mv);
    let safe = !pos.in_check(mover);
    pos.unmake_move(mv, undo);
    safe
}

fn pseudo_moves(pos: &Position, out: &mut Vec<Move>) {
    for from in 0..64u8 {
        let pc = match pos.piece_at(from) {
            Some(p) if p.color == pos.side_to_move => p,
            _ => continue,
        };
        match pc.kind {
            PieceKind::Pawn => gen_pawn(pos, from, pc.color, out),
            PieceKind::Knight => gen_steps(pos, from, pc.color, &KNIGHT_DELTAS, out),
            PieceKind::Bishop => gen_rays(pos, from, pc.color, &DIAGONALS, out),
            PieceKind::Rook => gen_rays(pos, from, pc.color, &ORTHOGONALS, out),
            PieceKind::Queen => {
                gen_rays(pos, from, pc.color, &DIAGONALS, out);
                gen_rays(pos, from, pc.color, &ORTHOGONALS, out);
            }
            PieceKind::King => {
                gen_steps(pos, from, pc.color, &KING_DELTAS, out);
                gen_castle(pos, from, pc.color, out);
            }
        }
    }
}

fn push_pawn_move(from: u8, to: u8, promo_rank: i8, out: &mut Vec<Move>) {
    if rank_of(to) == promo_rank {
        out.extend(PieceKind::PROMOTIONS.iter().map(|&pk| Move {
            promo: Some(pk),
            ..Move::new(from, to)
        }));
    } else {
        out.push(Move::new(from, to));
    }
}

fn gen_pawn(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);
    let (dir, start_rank, promo_rank) = match c {
        Color::White => (1, 1, 7),
        Color::Black => (-1, 6, 0),
    };

    if let Some(to) = sq(f, r + dir)
        && pos.piece_at(to).is_none()
    {
        push_pawn_move(from, to, promo_rank, out);

        if r == start_rank
            && let Some(to2) = sq(f, r + 2 * dir)
            && pos.piece_at(to2).is_none()
        {
            out.push(Move::new(from, to2));
        }
    }

    for df in [-1, 1] {
        let Some(to) = sq(f + df, r + dir) else {
            continue;
        };
        match pos.piece_at(to) {
            Some(target) if target.color != c => push_pawn_move(from, to, promo_rank, out),
            None if pos.en_passant == Some(to) => out.push(Move {
                is_en_passant: true,
                ..Move::new(from, to)
            }),
            _ => {}
        }
    }
}

/// Single-step pieces: knight and king.
fn gen_steps(pos: &Position, from: u8, c: Color, deltas: &[(i8, i8)], out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);
    for (df, dr) in deltas {
        if let Some(to) = sq(f + df, r + dr) {
            match pos.piece_at(to) {
                Some(pc) if pc.color == c => {}
                _ => out.push(Move::new(from, to)),
            }
        }
    }
}

fn gen_rays(pos: &Position, from: u8, c: Color, dirs: &[(i8, i8)], out: &mut Vec<Move>) {
    for (df, dr) in dirs {
        let mut f = file_of(from) + df;
        let mut r = rank_of(from) + dr;
        while let Some(to) = sq(f, r) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) => {
                    if pc.color != c {
                        out.push(Move::new(from, to));
                    }
                    break;
                }
            }
            f += df;
            r += dr;
        }
    }
}

/// King destination, squares that must be empty, and squares the king must
/// not cross while attacked. King side first, then queen side.
type CastleSpec = (u8, &'static [u8], [u8; 2]);

const WHITE_CASTLES: [CastleSpec; 2] = [(6, &[5, 6], [5, 6]), (2, &[3, 2, 1], [3, 2])];
const BLACK_CASTLES: [CastleSpec; 2] = [
    (62, &[61, 62], [61, 62]),
    (58, &[59, 58, 57], [59, 58]),
];

fn gen_castle(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    let (home, rights, specs) = match c {
        Color::White => (4u8, [pos.castling.wk, pos.castling.wq], &WHITE_CASTLES),
        Color::Black => (60u8, [pos.castling.bk, pos.castling.bq], &BLACK_CASTLES),
    };
    if from != home || pos.in_check(c) {
        return;
    }

    let enemy = c.other();
    for (right, &(to, empty, safe)) in rights.into_iter().zip(specs) {
        if right
            && empty.iter().all(|&s| pos.piece_at(s).is_none())
            && safe.iter().all(|&s| !pos.is_square_attacked(s, enemy))
        {
            out.push(Move {
                is_castle: true,
                ..Move::new(from, to)
            });
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
