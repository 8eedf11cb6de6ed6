use super::*;
use crate::eval::{evaluate, MATE_SCORE};
use chess_core::{move_to_uci, Position};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::cell::RefCell;

// =============================================================================
// Synthetic game tree: a move is the id of the child node to step into
// =============================================================================

#[derive(Debug, Clone, Default)]
struct Tree {
    values: Vec<Score>,
    children: Vec<Vec<usize>>,
    current: usize,
}

impl Tree {
    fn add_node(&mut self, value: Score) -> usize {
        self.values.push(value);
        self.children.push(Vec::new());
        self.values.len() - 1
    }

    fn add_child(&mut self, parent: usize, value: Score) -> usize {
        let id = self.add_node(value);
        self.children[parent].push(id);
        id
    }

    /// Root with one inner node per branch, each holding its leaves.
    fn two_ply(branches: &[&[Score]]) -> Self {
        let mut tree = Tree::default();
        let root = tree.add_node(0);
        for leaves in branches {
            let inner = tree.add_child(root, 0);
            for &v in leaves.iter() {
                tree.add_child(inner, v);
            }
        }
        tree
    }

    /// Root whose children are all leaves.
    fn one_ply(leaves: &[Score]) -> Self {
        let mut tree = Tree::default();
        let root = tree.add_node(0);
        for &v in leaves {
            tree.add_child(root, v);
        }
        tree
    }

    fn random(rng: &mut StdRng, max_depth: u8) -> Self {
        let mut tree = Tree::default();
        let root = tree.add_node(rng.gen_range(-50..50));
        tree.grow(rng, root, max_depth);
        tree
    }

    fn grow(&mut self, rng: &mut StdRng, node: usize, depth: u8) {
        if depth == 0 {
            return;
        }
        // The root always branches; deeper nodes may end early.
        let min_width = if node == 0 { 1 } else { 0 };
        for _ in 0..rng.gen_range(min_width..=4) {
            let child = self.add_child(node, rng.gen_range(-50..50));
            self.grow(rng, child, depth - 1);
        }
    }
}

impl GameRules for Tree {
    type Move = usize;
    type Undo = usize;

    fn legal_moves(&self) -> Vec<usize> {
        self.children[self.current].clone()
    }

    fn apply(&mut self, mv: usize) -> usize {
        std::mem::replace(&mut self.current, mv)
    }

    fn undo(&mut self, _mv: usize, undo: usize) {
        self.current = undo;
    }

    fn is_terminal(&self) -> bool {
        self.children[self.current].is_empty()
    }
}

/// Reads the node value and records which values were looked at.
#[derive(Default)]
struct RecordingEval {
    seen: RefCell<Vec<Score>>,
}

impl Evaluator<Tree> for RecordingEval {
    fn evaluate(&self, pos: &Tree) -> Score {
        let v = pos.values[pos.current];
        self.seen.borrow_mut().push(v);
        v
    }
}

/// Plain minimax without pruning.
fn exhaustive(tree: &Tree, node: usize, depth: u8, maximizing: bool) -> Score {
    let kids = &tree.children[node];
    if depth == 0 || kids.is_empty() {
        return tree.values[node];
    }
    let scores = kids
        .iter()
        .map(|&c| exhaustive(tree, c, depth - 1, !maximizing));
    if maximizing {
        scores.max().unwrap()
    } else {
        scores.min().unwrap()
    }
}

fn open_search(
    tree: &mut Tree,
    eval: &RecordingEval,
    depth: u8,
    maximizing: bool,
) -> SearchOutcome<usize> {
    search_with(
        tree,
        eval,
        depth,
        -SCORE_INFINITY,
        SCORE_INFINITY,
        maximizing,
    )
}

#[test]
fn test_textbook_tree_prunes_expected_leaves() {
    let mut tree = Tree::two_ply(&[&[3, 12, 8], &[2, 4, 6], &[14, 5, 2]]);
    let eval = RecordingEval::default();

    let out = open_search(&mut tree, &eval, 2, true);

    assert_eq!(out.score, 3);
    assert_eq!(out.best_move, Some(tree.children[0][0]));
    // Second branch is cut after its first leaf
    assert_eq!(*eval.seen.borrow(), vec![3, 12, 8, 2, 14, 5, 2]);
    // root + 3 inner + 7 leaves
    assert_eq!(out.nodes, 11);
    assert_eq!(tree.current, 0);
}

#[test]
fn test_minimizing_root_mirrors_maximizing() {
    let mut tree = Tree::two_ply(&[&[-3, -12, -8], &[-2, -4, -6], &[-14, -5, -2]]);
    let eval = RecordingEval::default();

    let out = open_search(&mut tree, &eval, 2, false);

    assert_eq!(out.score, -3);
    assert_eq!(out.best_move, Some(tree.children[0][0]));
    assert_eq!(*eval.seen.borrow(), vec![-3, -12, -8, -2, -14, -5, -2]);
}

#[test]
fn test_ties_keep_first_move() {
    let mut max_tree = Tree::one_ply(&[5, 5, 3]);
    let out = open_search(&mut max_tree, &RecordingEval::default(), 1, true);
    assert_eq!(out.score, 5);
    assert_eq!(out.best_move, Some(max_tree.children[0][0]));

    let mut min_tree = Tree::one_ply(&[2, 1, 1]);
    let out = open_search(&mut min_tree, &RecordingEval::default(), 1, false);
    assert_eq!(out.score, 1);
    assert_eq!(out.best_move, Some(min_tree.children[0][1]));
}

#[test]
fn test_depth_zero_evaluates_root_only() {
    let mut tree = Tree::one_ply(&[7, 8]);
    tree.values[0] = 42;
    let eval = RecordingEval::default();

    let out = open_search(&mut tree, &eval, 0, true);

    assert_eq!(
        out,
        SearchOutcome {
            score: 42,
            best_move: None,
            nodes: 1,
        }
    );
    assert_eq!(*eval.seen.borrow(), vec![42]);
}

#[test]
fn test_depth_limit_stops_at_inner_nodes() {
    let mut tree = Tree::two_ply(&[&[100], &[-100]]);
    tree.values[1] = 4;
    tree.values[3] = 6;

    let out = open_search(&mut tree, &RecordingEval::default(), 1, true);

    assert_eq!(out.score, 6);
    assert_eq!(out.best_move, Some(3));
}

#[test]
fn test_random_trees_match_exhaustive_minimax() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for round in 0..200 {
        let mut tree = Tree::random(&mut rng, 5);
        let depth = rng.gen_range(1..=5);
        let maximizing = rng.gen_bool(0.5);

        let expected = exhaustive(&tree, 0, depth, maximizing);
        let first_best = tree.children[0]
            .iter()
            .copied()
            .find(|&c| exhaustive(&tree, c, depth - 1, !maximizing) == expected);

        let eval = RecordingEval::default();
        let out = open_search(&mut tree, &eval, depth, maximizing);

        assert_eq!(out.score, expected, "round {round}");
        assert_eq!(out.best_move, first_best, "round {round}");
        assert_eq!(tree.current, 0, "round {round}");
    }
}

// =============================================================================
// Chess positions
// =============================================================================

fn chess_search(fen: &str, depth: u8) -> (Position, SearchOutcome<chess_core::Move>) {
    let mut pos = Position::from_fen(fen).unwrap();
    let out = best_move(&mut pos, depth);
    (pos, out)
}

#[test]
fn test_depth_zero_returns_static_eval() {
    let fen = "4k3/8/2n5/8/8/8/PPP5/R3K3 w - - 0 1";
    let (pos, out) = chess_search(fen, 0);
    assert_eq!(out.score, evaluate(&pos));
    assert_eq!(out.best_move, None);
    assert_eq!(out.nodes, 1);
}

#[test]
fn test_checkmated_root_returns_mate_without_move() {
    let (_, out) = chess_search(
        "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        3,
    );
    assert_eq!(out.score, -MATE_SCORE);
    assert_eq!(out.best_move, None);

    let (_, out) = chess_search(
        "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4",
        3,
    );
    assert_eq!(out.score, MATE_SCORE);
    assert_eq!(out.best_move, None);
}

#[test]
fn test_drawn_roots_return_zero_without_move() {
    for fen in ["k7/2K5/1Q6/8/8/8/8/8 b - - 0 1", "8/8/8/4k3/8/8/8/4K3 w - - 0 1"] {
        let (_, out) = chess_search(fen, 3);
        assert_eq!(out.score, 0, "{fen}");
        assert_eq!(out.best_move, None, "{fen}");
        assert_eq!(out.nodes, 1, "{fen}");
    }
}

#[test]
fn test_white_finds_back_rank_mate() {
    let (_, out) = chess_search("6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1", 2);
    assert_eq!(out.score, MATE_SCORE);
    assert_eq!(out.best_move.map(move_to_uci).as_deref(), Some("e1e8"));
}

#[test]
fn test_black_finds_back_rank_mate() {
    let mut pos = Position::from_fen("4q1k1/5ppp/8/8/8/8/5PPP/6K1 b - - 0 1").unwrap();
    let out = search(&mut pos, 2, -SCORE_INFINITY, SCORE_INFINITY, false);
    assert_eq!(out.score, -MATE_SCORE);
    assert_eq!(out.best_move.map(move_to_uci).as_deref(), Some("e8e1"));
}

#[test]
fn test_quiet_depth_one_keeps_material() {
    // No captures available: every reply leaves the count unchanged
    let fen = "4k3/8/8/8/8/8/PPP5/R3K3 w - - 0 1";
    let (pos, out) = chess_search(fen, 1);
    assert_eq!(out.score, evaluate(&pos));
    assert_eq!(out.score, 8);
    assert!(out.best_move.is_some());
}

#[test]
fn test_no_winning_capture_keeps_score() {
    // Nxe5 dxe5 only trades a knight for a knight. The search keeps the
    // first move reaching that score, the quiet Ng5.
    let fen = "4k3/8/3p4/4n3/8/5N2/6K1/8 w - - 0 1";
    let (mut pos, out) = chess_search(fen, 2);
    let before = evaluate(&pos);
    assert_eq!(before, -1);
    assert_eq!(out.score, before);

    let mv = out.best_move.unwrap();
    assert_eq!(move_to_uci(mv), "f3g5");
    let undo = pos.make_move(mv);
    assert_eq!(evaluate(&pos), before);
    pos.unmake_move(mv, undo);
}

#[test]
fn test_search_leaves_position_unchanged() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let original = Position::from_fen(fen).unwrap();
    let (pos, out) = chess_search(fen, 2);
    assert_eq!(pos, original);
    assert!(out.best_move.is_some());
    assert!(out.nodes > 48);
}

#[test]
fn test_pruning_does_not_change_chess_result() {
    struct Plain;
    impl Evaluator<Position> for Plain {
        fn evaluate(&self, pos: &Position) -> Score {
            evaluate(pos)
        }
    }

    fn minimax(pos: &mut Position, depth: u8, maximizing: bool) -> Score {
        if depth == 0 || pos.is_terminal() {
            return evaluate(pos);
        }
        let scores: Vec<Score> = chess_core::legal_moves(pos)
            .into_iter()
            .map(|mv| {
                let undo = pos.make_move(mv);
                let s = minimax(pos, depth - 1, !maximizing);
                pos.unmake_move(mv, undo);
                s
            })
            .collect();
        if maximizing {
            scores.into_iter().max().unwrap()
        } else {
            scores.into_iter().min().unwrap()
        }
    }

    let fens = [
        "4k3/8/3p4/4n3/8/5N2/6K1/8 w - - 0 1",
        "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5Q2/PPPP1PPP/RNB1K1NR w KQkq - 2 3",
        "4q1k1/5ppp/8/8/8/8/5PPP/6K1 b - - 0 1",
    ];
    for fen in fens {
        let mut pos = Position::from_fen(fen).unwrap();
        let maximizing = pos.side_to_move == chess_core::Color::White;
        let expected = minimax(&mut pos, 3, maximizing);
        let first_best = chess_core::legal_moves(&pos).into_iter().find(|&mv| {
            let undo = pos.make_move(mv);
            let s = minimax(&mut pos, 2, !maximizing);
            pos.unmake_move(mv, undo);
            s == expected
        });

        let out = search_with(
            &mut pos,
            &Plain,
            3,
            -SCORE_INFINITY,
            SCORE_INFINITY,
            maximizing,
        );
        assert_eq!(out.score, expected, "{fen}");
        assert_eq!(out.best_move, first_best, "{fen}");
    }
}
