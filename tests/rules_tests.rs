use manto_chess::game_state::chess_rules::STARTING_POSITION_FEN;
use manto_chess::utils::fen_generator::generate_fen;
use manto_chess::utils::fen_parser::parse_fen;
use manto_chess::utils::long_algebraic::long_algebraic_to_move_spec;
use manto_chess::{
    BlockedMoves, CastleSide, ChessError, Color, Game, GameStatus, Move, MoveSpec, PieceKind,
};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
const POSITION_4: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";
const POSITION_6: &str = "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10";

fn load(fen: &str) -> Game {
    let record = parse_fen(fen).expect("test FEN should parse");
    Game::from_record(&record).expect("test position should load")
}

fn play(game: &mut Game, text: &str) -> Move {
    let spec = long_algebraic_to_move_spec(text, game).expect("move text should parse");
    game.apply_move(&spec)
        .unwrap_or_else(|err| panic!("{text} should be legal: {err}"))
}

fn has_move(game: &mut Game, from: u8, to: u8) -> bool {
    let side = game.side_to_move();
    game.legal_moves(side)
        .iter()
        .any(|mv| mv.from == from && mv.to == to)
}

#[test]
fn make_unmake_round_trips_every_legal_move() {
    for fen in [
        STARTING_POSITION_FEN,
        KIWIPETE,
        POSITION_3,
        POSITION_4,
        POSITION_5,
        POSITION_6,
    ] {
        let mut game = load(fen);
        let before = game.clone();
        let side = game.side_to_move();
        for mv in game.legal_moves(side) {
            game.make_move(mv)
                .unwrap_or_else(|err| panic!("legal move rejected in {fen}: {err}"));
            assert!(game.board().is_consistent());
            assert_eq!(game.unmake_move(), Some(mv));
            assert_eq!(game, before, "unmake diverged in {fen} after {mv:?}");
        }
    }
}

#[test]
fn regeneration_is_idempotent() {
    for fen in [STARTING_POSITION_FEN, KIWIPETE, POSITION_4] {
        let mut game = load(fen);
        let first = game.pseudo_legal_moves(Color::White, BlockedMoves::Include);
        game.regenerate_moves();
        game.regenerate_moves();
        assert_eq!(game.pseudo_legal_moves(Color::White, BlockedMoves::Include), first);
    }
}

#[test]
fn castling_blocked_by_occupied_square() {
    let mut game = load("r3k2r/8/8/8/8/8/8/RN2K1NR w KQkq - 0 1");
    assert!(!has_move(&mut game, 4, 6));
    assert!(!has_move(&mut game, 4, 2));
    assert!(matches!(
        game.apply_move(&MoveSpec::Castle(CastleSide::Kingside)),
        Err(ChessError::InvalidMovement(_))
    ));
}

#[test]
fn castling_rejected_while_in_check() {
    let mut game = load("r3k2r/8/8/8/4r3/8/8/R3K2R w KQkq - 0 1");
    assert!(game.is_in_check(Color::White));
    assert!(!has_move(&mut game, 4, 6));
    assert!(!has_move(&mut game, 4, 2));
}

#[test]
fn castling_rejected_through_or_into_attacked_square() {
    // Bishop on a6 covers f1: kingside passes through an attack.
    let mut game = load("4k3/8/b7/8/8/8/8/R3K2R w KQ - 0 1");
    assert!(!has_move(&mut game, 4, 6));
    assert!(has_move(&mut game, 4, 2));

    // Knight on a3 covers b1, which the king never crosses.
    let mut game = load("4k3/8/8/8/8/n7/8/R3K2R w KQ - 0 1");
    assert!(has_move(&mut game, 4, 6));
    assert!(has_move(&mut game, 4, 2));

    // Rook on g8 covers the kingside landing square.
    let mut game = load("4k1r1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    assert!(!has_move(&mut game, 4, 6));
    assert!(has_move(&mut game, 4, 2));
}

#[test]
fn castling_moves_the_rook_and_unmake_restores_it() {
    let mut game = load("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let before = game.clone();
    let mv = game
        .apply_move(&MoveSpec::Castle(CastleSide::Queenside))
        .expect("queenside castling is available");
    assert_eq!(mv.castle, Some(CastleSide::Queenside));
    assert_eq!(game.board().piece_on(2).map(|p| p.kind), Some(PieceKind::King));
    assert_eq!(game.board().piece_on(3).map(|p| p.kind), Some(PieceKind::Rook));
    assert!(game.board().piece_on(0).is_none());
    assert!(!game.castling_rights().allows(Color::White, CastleSide::Kingside));

    game.unmake_move();
    assert_eq!(game, before);
}

#[test]
fn rights_revoked_by_king_and_rook_moves() {
    let mut game = load("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    play(&mut game, "h1h2");
    assert!(!game.castling_rights().allows(Color::White, CastleSide::Kingside));
    assert!(game.castling_rights().allows(Color::White, CastleSide::Queenside));

    play(&mut game, "e8d8");
    assert!(!game.castling_rights().allows(Color::Black, CastleSide::Kingside));
    assert!(!game.castling_rights().allows(Color::Black, CastleSide::Queenside));

    // Returning the rook home does not restore the right.
    play(&mut game, "h2h1");
    play(&mut game, "d8e8");
    assert!(!has_move(&mut game, 4, 6));
    assert!(has_move(&mut game, 4, 2));
}

#[test]
fn rights_revoked_by_rook_capture_on_home_square() {
    let mut game = load("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    play(&mut game, "a1a8");
    assert!(!game.castling_rights().allows(Color::Black, CastleSide::Queenside));
    assert!(game.castling_rights().allows(Color::Black, CastleSide::Kingside));
    assert!(!game.castling_rights().allows(Color::White, CastleSide::Queenside));
}

#[test]
fn en_passant_removes_the_passed_pawn() {
    let mut game = load("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1");
    play(&mut game, "d7d5");
    assert_eq!(game.en_passant_target(), Some(43));

    let mv = play(&mut game, "e5d6");
    assert!(mv.captured.is_some());
    assert!(game.board().piece_on(35).is_none(), "d5 pawn must be removed");
    assert_eq!(game.board().piece_on(43).map(|p| p.kind), Some(PieceKind::Pawn));
    assert_eq!(game.en_passant_target(), None);
    assert_eq!(game.material_balance(), 1);

    game.unmake_move();
    assert_eq!(game.board().piece_on(35).map(|p| p.color), Some(Color::Black));
    assert_eq!(game.en_passant_target(), Some(43));
}

#[test]
fn en_passant_expires_after_one_move() {
    let mut game = load("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1");
    play(&mut game, "d7d5");
    play(&mut game, "e1e2");
    play(&mut game, "e8e7");
    assert!(!has_move(&mut game, 36, 43));
}

#[test]
fn en_passant_cannot_expose_own_king() {
    // Capturing would clear the fifth rank between the rook and the king.
    let mut game = load("8/8/8/K2pP2r/8/8/8/4k3 w - d6 0 1");
    assert!(!has_move(&mut game, 36, 43));
}

#[test]
fn promotion_requires_a_piece_and_offers_four() {
    let mut game = load("8/4P3/8/8/8/8/k7/4K3 w - - 0 1");
    let promotions: Vec<_> = game
        .legal_moves(Color::White)
        .into_iter()
        .filter(|mv| mv.from == 52)
        .map(|mv| mv.promotion)
        .collect();
    assert_eq!(
        promotions,
        vec![
            Some(PieceKind::Queen),
            Some(PieceKind::Rook),
            Some(PieceKind::Bishop),
            Some(PieceKind::Knight)
        ]
    );

    let missing = MoveSpec::from_to(PieceKind::Pawn, 52, 60, None);
    assert!(matches!(
        game.apply_move(&missing),
        Err(ChessError::InvalidMovement(_))
    ));

    play(&mut game, "e7e8r");
    assert_eq!(game.board().piece_on(60).map(|p| p.kind), Some(PieceKind::Rook));
    assert_eq!(game.material_balance(), 5);
}

#[test]
fn checkmate_and_stalemate_are_distinguished() {
    // Fool's mate.
    let mut game = Game::new_game();
    for text in ["f2f3", "e7e5", "g2g4", "d8h4"] {
        play(&mut game, text);
    }
    assert!(game.is_in_check(Color::White));
    assert!(game.legal_moves(Color::White).is_empty());
    assert_eq!(
        game.status(),
        GameStatus::Checkmate {
            winner: Color::Black
        }
    );

    let mut stalemate = load("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    assert!(!stalemate.is_in_check(Color::Black));
    assert!(stalemate.legal_moves(Color::Black).is_empty());
    assert_eq!(stalemate.status(), GameStatus::Stalemate);
}

#[test]
fn status_invariant_holds_across_reference_positions() {
    for fen in [
        STARTING_POSITION_FEN,
        KIWIPETE,
        POSITION_3,
        POSITION_4,
        POSITION_5,
        POSITION_6,
    ] {
        let mut game = load(fen);
        let side = game.side_to_move();
        let no_moves = game.legal_moves(side).is_empty();
        let checked = game.is_in_check(side);
        let status = game.status();
        assert_eq!(no_moves && checked, matches!(status, GameStatus::Checkmate { .. }));
        assert_eq!(no_moves && !checked, status == GameStatus::Stalemate);
    }
}

#[test]
fn rejected_moves_leave_the_game_unchanged() {
    let mut game = load(KIWIPETE);
    let before = game.clone();
    let spec = MoveSpec::from_to(PieceKind::Knight, 18, 35, None); // c3-d5, own pawn
    assert!(game.apply_move(&spec).is_err());
    assert_eq!(game, before);
    assert_eq!(generate_fen(&game), KIWIPETE);
}

#[test]
fn make_move_rejects_the_side_not_to_move() {
    let mut game = Game::new_game();
    let before = game.clone();
    let e7e5 = game
        .legal_moves(Color::Black)
        .into_iter()
        .find(|mv| mv.from == 52 && mv.to == 36)
        .expect("e7e5 is legal for Black");

    assert!(matches!(
        game.make_move(e7e5),
        Err(ChessError::InvalidMovement(_))
    ));
    assert_eq!(game, before);
    assert_eq!(game.side_to_move(), Color::White);
    assert_eq!(game.history_len(), 0);
}

#[test]
fn make_move_rejects_moving_a_pinned_piece() {
    let mut game = load("4r2k/8/8/8/8/8/4N3/4K3 w - - 0 1");
    let before = game.clone();
    // Ne2-c3 is geometrically fine but uncovers the e-file.
    let pinned = game
        .pseudo_legal_moves(Color::White, BlockedMoves::Exclude)
        .into_iter()
        .find(|mv| mv.from == 12 && mv.to == 18)
        .expect("Ne2-c3 is pseudo-legal");

    assert!(matches!(
        game.make_move(pinned),
        Err(ChessError::InvalidMovement(_))
    ));
    assert_eq!(game, before);
    assert!(!game.is_in_check(Color::White));
}

#[test]
fn make_move_rejects_king_stepping_into_attack() {
    let mut game = load("4r2k/8/8/8/8/8/8/3K4 w - - 0 1");
    let into_file = game
        .pseudo_legal_moves(Color::White, BlockedMoves::Exclude)
        .into_iter()
        .find(|mv| mv.from == 3 && mv.to == 4)
        .expect("Kd1-e1 is pseudo-legal");
    assert!(game.make_move(into_file).is_err());
    assert_eq!(game.board().king_square(Color::White), Some(3));
}

#[test]
fn loading_rejects_missing_or_extra_kings() {
    for fen in ["8/8/8/8/8/8/8/4K3 w - - 0 1", "4k3/8/8/8/8/8/8/3KK3 w - - 0 1"] {
        let record = parse_fen(fen).expect("placement parses");
        assert!(matches!(
            Game::from_record(&record),
            Err(ChessError::InvalidPosition(_))
        ));
    }
}
