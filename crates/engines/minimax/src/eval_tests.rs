use super::*;
use chess_core::Position;

fn eval_fen(fen: &str) -> Score {
    let pos = Position::from_fen(fen).unwrap();
    evaluate(&pos)
}

#[test]
fn test_piece_values() {
    assert_eq!(piece_value(PieceKind::Pawn), 1);
    assert_eq!(piece_value(PieceKind::Knight), 3);
    assert_eq!(piece_value(PieceKind::Bishop), 3);
    assert_eq!(piece_value(PieceKind::Rook), 5);
    assert_eq!(piece_value(PieceKind::Queen), 9);
    assert_eq!(piece_value(PieceKind::King), 0);
}

#[test]
fn test_startpos_is_balanced() {
    assert_eq!(evaluate(&Position::startpos()), 0);
}

#[test]
fn test_white_mated_scores_negative_mate() {
    // Fool's mate, White to move
    let score = eval_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
    assert_eq!(score, -MATE_SCORE);
}

#[test]
fn test_black_mated_scores_positive_mate() {
    // Scholar's mate, Black to move
    let score = eval_fen("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4");
    assert_eq!(score, MATE_SCORE);
}

#[test]
fn test_stalemate_ignores_material() {
    // White is a queen up, but Black has no move
    assert_eq!(eval_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1"), DRAW_SCORE);
}

#[test]
fn test_dead_positions_are_draws() {
    assert_eq!(eval_fen("8/8/8/4k3/8/8/8/4K3 w - - 0 1"), DRAW_SCORE);
    assert_eq!(eval_fen("8/8/8/4k3/8/8/8/2B1K3 w - - 0 1"), DRAW_SCORE);
    assert_eq!(eval_fen("8/8/8/4k3/8/8/8/1N2K3 b - - 0 1"), DRAW_SCORE);
}

#[test]
fn test_material_difference() {
    // R + 3P against N
    assert_eq!(eval_fen("4k3/8/2n5/8/8/8/PPP5/R3K3 w - - 0 1"), 5);
    // Q against R, side to move does not matter
    assert_eq!(eval_fen("3qk3/8/8/8/8/8/8/4K2R b - - 0 1"), -4);
    assert_eq!(eval_fen("3qk3/8/8/8/8/8/8/4K2R w - - 0 1"), -4);
}

#[test]
fn test_check_without_mate_is_material_only() {
    // Black king in check from the rook but can step aside
    assert_eq!(eval_fen("4k3/8/8/8/8/8/8/4R1K1 b - - 0 1"), 5);
}

#[test]
fn test_material_evaluator_matches_free_function() {
    let fens = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        "k7/2K5/1Q6/8/8/8/8/8 b - - 0 1",
        "4k3/8/2n5/8/8/8/PPP5/R3K3 w - - 0 1",
    ];
    for fen in fens {
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(MaterialEvaluator.evaluate(&pos), evaluate(&pos), "{fen}");
    }
}
