//! Search agents: pruning equivalence, horizon values, and tie-breaking

mod common;

use common::{position, random_playout};
use push_battle::{
    evaluation::{
        Evaluator, LOSS_SCORE, MaterialEvaluator, MotifEvaluator, MotifWeights, Score, WIN_SCORE,
    },
    ports::Agent,
    rules::{Move, Player},
    search::{SearchAgent, SearchConfig, SearchEngine, TieBreak},
};

const IMMEDIATE_WIN: &str =
    "1.12...2/......../......../......../......../......../......../........";

#[test]
fn test_alpha_beta_matches_minimax() {
    for seed in 0..5 {
        let (mut state, _) = random_playout(seed, 4 + seed as usize);
        if state.is_terminal() {
            continue;
        }
        let agent = state.to_move();
        let before = state;

        let mut minimax = SearchEngine::new(SearchConfig::minimax(2)).unwrap();
        let mut alpha_beta = SearchEngine::new(SearchConfig::alpha_beta(2)).unwrap();
        let full = minimax.search(&mut state, agent).unwrap();
        let pruned = alpha_beta.search(&mut state, agent).unwrap();

        assert_eq!(pruned.best_move, full.best_move, "seed {seed}");
        assert_eq!(pruned.value, full.value, "seed {seed}");
        assert!(pruned.nodes <= full.nodes, "seed {seed}");
        assert_eq!(state, before);
    }
}

#[test]
fn test_alpha_beta_matches_minimax_for_the_waiting_side() {
    let (mut state, _) = random_playout(21, 5);
    let waiting = state.to_move().opponent();
    let full = SearchEngine::new(SearchConfig::minimax(2))
        .unwrap()
        .search(&mut state, waiting)
        .unwrap();
    let pruned = SearchEngine::new(SearchConfig::alpha_beta(2))
        .unwrap()
        .search(&mut state, waiting)
        .unwrap();
    assert_eq!(pruned.best_move, full.best_move);
    assert_eq!(pruned.value, full.value);
}

#[test]
fn test_depth_one_value_is_best_static_evaluation() {
    let (mut state, _) = random_playout(5, 6);
    let mover = state.to_move();
    let material = MaterialEvaluator;
    let expected = state
        .legal_moves()
        .into_iter()
        .map(|mv| {
            let child = state.play(mv);
            match child.check_winner() {
                Some(winner) if winner == mover => WIN_SCORE,
                Some(_) => LOSS_SCORE,
                None => material.evaluate(&child, mover),
            }
        })
        .max()
        .unwrap();

    let outcome = SearchEngine::new(SearchConfig::minimax(1))
        .unwrap()
        .search(&mut state, mover)
        .unwrap();
    assert_eq!(outcome.value, expected);
}

#[test]
fn test_every_variant_keeps_a_forced_win() {
    let winning = Move::place(0, 1).unwrap();
    for config in [
        SearchConfig::minimax(2),
        SearchConfig::alpha_beta(2),
        SearchConfig::hybrid(2).with_seed(9),
        SearchConfig::alpha_beta(1).with_tie_break(TieBreak::Random).with_seed(9),
    ] {
        let mut state = position(IMMEDIATE_WIN, [2, 2], Player::One);
        let mut agent = SearchAgent::new(Player::One, config.clone()).unwrap();
        let outcome = agent.search(&mut state).unwrap();
        assert_eq!(outcome.best_move, winning, "{config:?}");
        assert_eq!(outcome.value, WIN_SCORE);
    }
}

#[test]
fn test_hybrid_prefers_best_shape_among_material_ties() {
    let material = MaterialEvaluator;
    let motif = MotifEvaluator::new(MotifWeights::default());
    let mut checked = 0;
    for seed in 0..6 {
        let (mut state, _) = random_playout(seed, 3 + seed as usize % 3);
        let mover = state.to_move();
        let scored: Vec<(Move, Option<Score>, Score)> = state
            .legal_moves()
            .into_iter()
            .map(|mv| {
                let child = state.play(mv);
                let value = match child.check_winner() {
                    Some(_) => None,
                    None => Some(material.evaluate(&child, mover)),
                };
                (mv, value, motif.evaluate(&child, mover))
            })
            .collect();
        if scored.iter().any(|&(_, value, _)| value.is_none()) {
            continue;
        }
        let best = scored.iter().filter_map(|&(_, value, _)| value).max().unwrap();
        let tied: Vec<_> = scored.iter().filter(|&&(_, value, _)| value == Some(best)).collect();
        let top_shape = tied.iter().map(|&&(_, _, shape)| shape).max().unwrap();

        let mut agent = SearchAgent::new(mover, SearchConfig::hybrid(1).with_seed(seed)).unwrap();
        let chosen = agent.search(&mut state).unwrap();
        assert_eq!(chosen.value, best, "seed {seed}");
        let &&(_, _, shape) = tied
            .iter()
            .find(|&&&(mv, _, _)| mv == chosen.best_move)
            .expect("chosen move is among the material ties");
        assert_eq!(shape, top_shape, "seed {seed}: {} tied moves", tied.len());
        checked += 1;
    }
    assert!(checked > 0);
}

#[test]
fn test_seeded_hybrid_is_reproducible() {
    let (state, _) = random_playout(13, 3);
    let pick = |seed| {
        let mut agent =
            SearchAgent::new(state.to_move(), SearchConfig::hybrid(1).with_seed(seed)).unwrap();
        agent.select_move(&state).unwrap()
    };
    assert_eq!(pick(4), pick(4));
}

#[test]
fn test_agent_plays_either_seat() {
    // The same agent answers for whichever side is to move.
    let mut agent = SearchAgent::new(Player::Two, SearchConfig::alpha_beta(1)).unwrap();
    let state = position(IMMEDIATE_WIN, [2, 2], Player::One);
    assert_eq!(agent.select_move(&state).unwrap(), Move::place(0, 1).unwrap());
}
