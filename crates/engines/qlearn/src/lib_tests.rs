use super::*;
use draughts_core::{Move, Outcome, Pos};

fn slide(fr: u8, fc: u8, tr: u8, tc: u8) -> Move {
    Move::slide(Pos::new(fr, fc), Pos::new(tr, tc))
}

#[test]
fn training_an_empty_episode_changes_nothing() {
    let mut agent = QLearnAgent::default();
    let epsilon_before = agent.learning.epsilon;

    agent.train_episode(Outcome::AgentWins);

    assert_eq!(agent.learning.epsilon, epsilon_before);
    assert_eq!(agent.learning.games, 0);
    assert!(agent.learning.q.is_empty());
}

#[test]
fn agent_win_back_propagates_discounted_return() {
    let mut agent = QLearnAgent::default();
    agent.record_step("s1".into(), "50-41".into(), 0.0);

    agent.train_episode(Outcome::AgentWins);

    // G = 0 + 0.92 * 8, value = 0 + 0.22 * G, rounded to 5 decimals.
    assert_eq!(agent.learning.q_value("s1", "50-41"), 1.6192);
    assert_eq!(agent.learning.games, 1);
    assert_eq!(agent.learning.epsilon, 0.2 * 0.985);
    assert_eq!(agent.episode_len(), 0);
}

#[test]
fn human_win_pushes_values_down() {
    let mut agent = QLearnAgent::default();
    agent.record_step("s1".into(), "50-41".into(), 0.0);

    agent.train_episode(Outcome::HumanWins);

    assert_eq!(agent.learning.q_value("s1", "50-41"), -1.6192);
}

#[test]
fn draw_carries_only_step_rewards() {
    let mut agent = QLearnAgent::default();
    agent.record_step("s1".into(), "50-41".into(), 1.0);

    agent.train_episode(Outcome::Draw);

    // G = 1 + 0.92 * 0, value = 0.22.
    assert_eq!(agent.learning.q_value("s1", "50-41"), 0.22);
}

#[test]
fn episode_is_walked_backward() {
    let mut agent = QLearnAgent::default();
    agent.record_step("s1".into(), "a1".into(), 1.0);
    agent.record_step("s2".into(), "a2".into(), 0.0);

    agent.train_episode(Outcome::AgentWins);

    // Last step first: G2 = 0 + 0.92 * 8, then G1 = 1 + 0.92 * G2.
    assert_eq!(agent.learning.q_value("s2", "a2"), 1.6192);
    assert_eq!(agent.learning.q_value("s1", "a1"), 1.70966);
}

#[test]
fn epsilon_never_decays_below_the_floor() {
    let mut agent = QLearnAgent::default();
    agent.learning.epsilon = agent.learning.min_epsilon;
    agent.record_step("s1".into(), "a1".into(), 0.0);

    agent.train_episode(Outcome::Draw);

    assert_eq!(agent.learning.epsilon, agent.learning.min_epsilon);
}

#[test]
fn greedy_selection_takes_the_best_valued_move() {
    let mut agent = QLearnAgent::default();
    agent.learning.epsilon = 0.0;

    let good = slide(5, 0, 4, 1);
    let bad = slide(5, 2, 4, 3);
    agent.learning.set_q("s", &action_key(good), 2.5);
    agent.learning.set_q("s", &action_key(bad), -1.0);

    for _ in 0..20 {
        assert_eq!(agent.select_move("s", &[bad, good]), Some(good));
    }
}

#[test]
fn unseen_moves_are_worth_zero_to_the_policy() {
    let mut agent = QLearnAgent::default();
    agent.learning.epsilon = 0.0;

    let seen = slide(5, 0, 4, 1);
    let unseen = slide(5, 2, 4, 3);
    agent.learning.set_q("s", &action_key(seen), -0.1);

    // A negative learned value loses to the 0.0 of an unseen action.
    assert_eq!(agent.select_move("s", &[seen, unseen]), Some(unseen));
}

#[test]
fn ties_pick_among_the_tied_moves() {
    let mut agent = QLearnAgent::default();
    agent.learning.epsilon = 0.0;

    let a = slide(5, 0, 4, 1);
    let b = slide(5, 2, 4, 3);
    let worse = slide(5, 4, 4, 5);
    agent.learning.set_q("s", &action_key(a), 1.0);
    agent.learning.set_q("s", &action_key(b), 1.0);
    agent.learning.set_q("s", &action_key(worse), 0.5);

    for _ in 0..20 {
        let picked = agent.select_move("s", &[a, b, worse]).unwrap();
        assert!(picked == a || picked == b);
    }
}

#[test]
fn no_moves_means_no_selection() {
    let agent = QLearnAgent::default();
    assert_eq!(agent.select_move("s", &[]), None);
}

#[test]
fn reset_restores_defaults_and_drops_the_episode() {
    let mut agent = QLearnAgent::default();
    agent.learning.epsilon = 0.5;
    agent.learning.games = 40;
    agent.learning.set_q("s", "a", 3.0);
    agent.record_step("s".into(), "a".into(), 1.0);

    agent.reset();

    assert_eq!(agent.learning.epsilon, state::DEFAULT_EPSILON);
    assert_eq!(agent.learning.games, 0);
    assert!(agent.learning.q.is_empty());
    assert_eq!(agent.episode_len(), 0);

    // Nothing left to train on.
    agent.train_episode(Outcome::AgentWins);
    assert_eq!(agent.learning.games, 0);
}
