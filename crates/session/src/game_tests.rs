use super::*;
use draughts_core::Piece;

/// Store pointed at an unwritable path: loads yield defaults and saves
/// fail, which the session must shrug off.
fn offline_session() -> GameSession {
    GameSession::new(Store::new("/proc/no_such_place/draughts"))
}

#[test]
fn opening_slide_passes_the_turn_to_the_agent() {
    let mut session = offline_session();

    session.select_square(Pos::new(5, 0));
    assert_eq!(session.snapshot().selected, Some(Pos::new(5, 0)));

    session.select_square(Pos::new(4, 1));
    assert_eq!(session.turn(), Turn::Agent);
    assert_eq!(session.status(), "Agent is thinking...");
    assert_eq!(
        session.board().piece_at(Pos::new(4, 1)),
        Some(Piece::man(Owner::Human))
    );

    session.run_agent_turn();
    assert_eq!(session.turn(), Turn::Human);
    assert_eq!(session.agent().episode_len(), 1);
}

#[test]
fn selecting_nothing_keeps_state_unchanged() {
    let mut session = offline_session();
    let board_before = session.board().clone();

    // Light square, enemy piece, empty square: all silently rejected.
    for p in [Pos::new(4, 4), Pos::new(2, 1), Pos::new(4, 1)] {
        session.select_square(p);
        assert_eq!(session.snapshot().selected, None);
        assert_eq!(session.turn(), Turn::Human);
    }
    assert_eq!(session.status(), "Select a piece.");
    assert_eq!(*session.board(), board_before);
}

#[test]
fn simple_move_is_rejected_while_a_capture_exists() {
    let mut session = offline_session();
    session.board = Board::empty();
    session.board.set_piece(Pos::new(4, 1), Some(Piece::man(Owner::Human)));
    session.board.set_piece(Pos::new(3, 2), Some(Piece::man(Owner::Agent)));
    session.board.set_piece(Pos::new(6, 1), Some(Piece::man(Owner::Human)));
    session.legal = legal_moves(&session.board, Owner::Human);

    // The man at (6,1) has quiet moves but a capture exists elsewhere.
    session.select_square(Pos::new(6, 1));
    assert_eq!(session.snapshot().selected, None);
    assert_eq!(
        session.status(),
        "Capture is mandatory. Pick a piece on a longest capture line."
    );

    session.select_square(Pos::new(4, 1));
    session.select_square(Pos::new(2, 3));

    // That capture took the agent's last piece.
    assert!(session.game_over());
    assert_eq!(session.stats().human_wins, 1);
    assert!(session.status().starts_with("You win!"));
    // No agent episode was recorded, so nothing was trained.
    assert_eq!(session.agent().learning.games, 0);
}

#[test]
fn capture_chain_keeps_the_turn_and_defers_removal() {
    let mut session = offline_session();
    session.board = Board::empty();
    session.board.set_piece(Pos::new(4, 1), Some(Piece::man(Owner::Human)));
    session.board.set_piece(Pos::new(3, 2), Some(Piece::man(Owner::Agent)));
    session.board.set_piece(Pos::new(1, 2), Some(Piece::man(Owner::Agent)));
    session.board.set_piece(Pos::new(0, 5), Some(Piece::man(Owner::Agent)));
    session.legal = legal_moves(&session.board, Owner::Human);

    session.select_square(Pos::new(4, 1));
    session.select_square(Pos::new(2, 3));

    assert_eq!(session.turn(), Turn::HumanChain);
    // The jumped man stays on its square until the chain is finalized.
    assert_eq!(
        session.board().piece_at(Pos::new(3, 2)),
        Some(Piece::man(Owner::Agent))
    );
    assert_eq!(session.snapshot().pending, vec![Pos::new(3, 2)]);

    session.select_square(Pos::new(0, 1));

    assert_eq!(session.turn(), Turn::Agent);
    assert_eq!(session.board().piece_at(Pos::new(3, 2)), None);
    assert_eq!(session.board().piece_at(Pos::new(1, 2)), None);
    // Chain ended on the back rank: the man is crowned there.
    assert_eq!(
        session.board().piece_at(Pos::new(0, 1)),
        Some(Piece::king(Owner::Human))
    );
    assert!(session.snapshot().pending.is_empty());
}

#[test]
fn chain_through_the_back_rank_does_not_crown_mid_chain() {
    // Backward captures let a man jump into row 0 and keep going; crowning
    // only applies where the chain actually ends.
    let mut session = offline_session();
    session.board = Board::empty();
    session.board.set_piece(Pos::new(2, 1), Some(Piece::man(Owner::Human)));
    session.board.set_piece(Pos::new(1, 2), Some(Piece::man(Owner::Agent)));
    session.board.set_piece(Pos::new(1, 4), Some(Piece::man(Owner::Agent)));
    session.board.set_piece(Pos::new(5, 6), Some(Piece::man(Owner::Agent)));
    session.legal = legal_moves(&session.board, Owner::Human);

    session.select_square(Pos::new(2, 1));
    session.select_square(Pos::new(0, 3));

    // On the back rank with the chain still open: not a king yet.
    assert_eq!(session.turn(), Turn::HumanChain);
    assert_eq!(
        session.board().piece_at(Pos::new(0, 3)),
        Some(Piece::man(Owner::Human))
    );

    session.select_square(Pos::new(2, 5));

    // The chain ended off the back rank, so the man was never crowned.
    assert_eq!(session.turn(), Turn::Agent);
    assert_eq!(
        session.board().piece_at(Pos::new(2, 5)),
        Some(Piece::man(Owner::Human))
    );
    assert_eq!(session.board().piece_at(Pos::new(1, 2)), None);
    assert_eq!(session.board().piece_at(Pos::new(1, 4)), None);
}

#[test]
fn agent_win_trains_the_episode() {
    let mut session = offline_session();
    session.board = Board::empty();
    session.board.set_piece(Pos::new(3, 2), Some(Piece::man(Owner::Agent)));
    session.board.set_piece(Pos::new(4, 3), Some(Piece::man(Owner::Human)));
    session.turn = Turn::Agent;
    session.legal.clear();

    let state_before = state_key(&session.board, None, &PendingSet::new());
    session.run_agent_turn();

    assert!(session.game_over());
    assert_eq!(session.stats().agent_wins, 1);
    assert_eq!(session.agent().learning.games, 1);
    assert_eq!(session.agent().learning.epsilon, 0.2 * 0.985);
    assert_eq!(session.agent().episode_len(), 0);

    // Capturing the last man: step reward +1, G = 1 + 0.92 * 8,
    // value = 0.22 * G rounded to 5 decimals.
    assert_eq!(
        session.agent().learning.q_value(&state_before, "32-54x43"),
        1.8392
    );
}

#[test]
fn finished_game_ignores_further_input() {
    let mut session = offline_session();
    session.board = Board::empty();
    session.board.set_piece(Pos::new(4, 1), Some(Piece::man(Owner::Human)));
    session.board.set_piece(Pos::new(3, 2), Some(Piece::man(Owner::Agent)));
    session.legal = legal_moves(&session.board, Owner::Human);

    session.select_square(Pos::new(4, 1));
    session.select_square(Pos::new(2, 3));
    assert!(session.game_over());

    let stats_before = session.stats().clone();
    session.select_square(Pos::new(2, 3));
    session.run_agent_turn();
    assert!(session.game_over());
    assert_eq!(*session.stats(), stats_before);

    session.new_game("New game started. Your turn.");
    assert_eq!(session.turn(), Turn::Human);
    assert_eq!(session.board().count(Owner::Human), 12);
}

#[test]
fn abandoning_a_game_drops_the_recorded_episode() {
    let mut session = offline_session();
    session.select_square(Pos::new(5, 0));
    session.select_square(Pos::new(4, 1));
    session.run_agent_turn();
    assert_eq!(session.agent().episode_len(), 1);

    session.new_game("New game started. Your turn.");
    assert_eq!(session.agent().episode_len(), 0);
}

#[test]
fn snapshot_reports_selection_and_targets() {
    let mut session = offline_session();
    session.select_square(Pos::new(5, 2));

    let snap = session.snapshot();
    assert_eq!(snap.selected, Some(Pos::new(5, 2)));
    assert_eq!(snap.targets, vec![Pos::new(4, 1), Pos::new(4, 3)]);
    assert!(!snap.game_over);
    assert_eq!(snap.epsilon, 0.2);
    assert_eq!(snap.states_learned, 0);
}

#[test]
fn resets_restore_defaults() {
    let mut session = offline_session();
    session.stats.record(Outcome::HumanWins);
    session.agent.learning.set_q("s", "a", 1.0);
    session.agent.learning.epsilon = 0.5;

    session.reset_agent();
    assert_eq!(session.agent().learning.states_learned(), 0);
    assert_eq!(session.agent().learning.epsilon, 0.2);

    session.reset_stats();
    assert_eq!(*session.stats(), Stats::default());
}
