use crate::{board::Position, error::UciError, movegen::legal_moves, types::*};

pub fn move_to_uci(mv: Move) -> String {
    let mut s = String::with_capacity(5);
    s.push_str(&sq_to_coord(mv.from));
    s.push_str(&sq_to_coord(mv.to));
    if let Some(p) = mv.promo {
        s.push(p.to_char());
    }
    s
}

/// Resolve long algebraic notation (`e2e4`, `e7e8q`) against the legal moves
/// of `pos`, so castling and en-passant flags come out right. A promotion
/// without a suffix resolves to the queen.
pub fn parse_uci_move(pos: &Position, txt: &str) -> Option<Move> {
    if !(4..=5).contains(&txt.len()) || !txt.is_ascii() {
        return None;
    }
    let from = coord_to_sq(&txt[0..2])?;
    let to = coord_to_sq(&txt[2..4])?;
    let promo = match txt[4..].chars().next() {
        Some(c) => {
            let kind = PieceKind::from_char(c)
                .filter(|k| PieceKind::PROMOTIONS.contains(k))?;
            Some(kind)
        }
        None => None,
    };

    legal_moves(pos)
        .into_iter()
        .find(|m| m.from == from && m.to == to && (promo.is_none() || m.promo == promo))
}

/// Apply the arguments of a UCI `position` command:
/// `startpos [moves ...]` or `fen <fields> [moves ...]`.
pub fn set_position_from_uci(pos: &mut Position, args: &[&str]) -> Result<(), UciError> {
    let moves_at = args.iter().position(|&a| a == "moves").unwrap_or(args.len());
    let (setup, moves) = args.split_at(moves_at);

    let mut next = match setup.split_first() {
        None => Position::startpos(),
        Some((&"startpos", _)) => Position::startpos(),
        Some((&"fen", fields)) => Position::from_fen(&fields.join(" "))?,
        Some((other, _)) => return Err(UciError::UnknownPosition(other.to_string())),
    };

    for &txt in moves.iter().skip(1) {
        let mv = parse_uci_move(&next, txt)
            .ok_or_else(|| UciError::IllegalMove(txt.to_string()))?;
        next.make_move(mv);
    }

    *pos = next;
    Ok(())
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
