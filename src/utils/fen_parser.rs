//! FEN-to-PositionRecord parser.
//!
//! Reads piece placement, side to move, castling rights and the en-passant
//! target. The halfmove and fullmove fields are validated when present but
//! not kept; the engine does not track move clocks.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{CastleSide, CastlingRights, Color, PieceKind, Square};
use crate::game_state::position_record::{PlacedPiece, PositionRecord};
use crate::utils::algebraic::{algebraic_to_square, char_to_piece};

pub fn parse_fen(fen: &str) -> ChessResult<PositionRecord> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| fen_error("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| fen_error("missing side-to-move"))?;
    let castling_part = parts.next().ok_or_else(|| fen_error("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| fen_error("missing en-passant square"))?;

    for (name, field) in ["halfmove clock", "fullmove number"].into_iter().zip(parts.by_ref()) {
        field
            .parse::<u16>()
            .map_err(|_| fen_error(format!("invalid {name}: {field}")))?;
    }
    if parts.next().is_some() {
        return Err(fen_error("extra trailing fields"));
    }

    Ok(PositionRecord {
        pieces: parse_board(board_part)?,
        side_to_move: parse_side_to_move(side_part)?,
        castling_rights: parse_castling_rights(castling_part)?,
        en_passant_target: parse_en_passant_square(en_passant_part)?,
    })
}

fn fen_error(reason: impl Into<String>) -> ChessError {
    ChessError::InvalidFen(reason.into())
}

fn parse_board(board_part: &str) -> ChessResult<Vec<PlacedPiece>> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(fen_error("board layout must contain 8 ranks"));
    }

    let mut pieces = Vec::with_capacity(32);
    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(fen_error(format!("invalid empty-square count '{ch}'")));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(fen_error("board rank has too many files"));
                }
                continue;
            }

            let (color, kind) = piece_from_fen_char(ch)?;
            if file >= 8 {
                return Err(fen_error("board rank has too many files"));
            }
            pieces.push(PlacedPiece::new(kind, color, board_rank * 8 + file));
            file += 1;
        }

        if file != 8 {
            return Err(fen_error("board rank does not sum to 8 files"));
        }
    }

    Ok(pieces)
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(fen_error(format!("invalid side-to-move field: {side_part}"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    let mut rights = CastlingRights::NONE;
    if castling_part == "-" {
        return Ok(rights);
    }

    for ch in castling_part.chars() {
        let (color, side) = match ch {
            'K' => (Color::White, CastleSide::Kingside),
            'Q' => (Color::White, CastleSide::Queenside),
            'k' => (Color::Black, CastleSide::Kingside),
            'q' => (Color::Black, CastleSide::Queenside),
            _ => return Err(fen_error(format!("invalid castling rights character: {ch}"))),
        };
        match side {
            CastleSide::Kingside => rights.kingside[color.index()] = true,
            CastleSide::Queenside => rights.queenside[color.index()] = true,
        }
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }
    algebraic_to_square(en_passant_part)
        .map(Some)
        .map_err(|err| fen_error(format!("invalid en-passant square: {err}")))
}

fn piece_from_fen_char(ch: char) -> ChessResult<(Color, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    let kind = char_to_piece(ch)
        .map_err(|_| fen_error(format!("invalid piece character '{ch}' in board layout")))?;
    Ok((color, kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;

    #[test]
    fn parse_starting_fen() {
        let record = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        assert_eq!(record.pieces.len(), 32);
        assert_eq!(record.side_to_move, Color::White);
        assert_eq!(record.castling_rights, CastlingRights::ALL);
        assert_eq!(record.en_passant_target, None);
        assert!(record
            .pieces
            .contains(&PlacedPiece::new(PieceKind::King, Color::Black, 60)));
    }

    #[test]
    fn clocks_are_optional() {
        let record = parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6").expect("four-field FEN parses");
        assert_eq!(record.en_passant_target, Some(43));
        assert_eq!(record.castling_rights, CastlingRights::NONE);
    }

    #[test]
    fn rejects_malformed_fen() {
        for fen in [
            "",
            "8/8/8/8/8/8/8 w - - 0 1",
            "9/8/8/8/8/8/8/8 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 x - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w X - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - z9 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - - a 1",
            "4k3/8/8/8/8/8/8/4K3 w - - 0 1 extra",
            "4k3/8/8/8/8/8/8/4KX2 w - - 0 1",
        ] {
            assert!(
                matches!(parse_fen(fen), Err(ChessError::InvalidFen(_))),
                "{fen:?} should be rejected"
            );
        }
    }
}
