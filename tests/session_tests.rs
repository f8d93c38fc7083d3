//! Full-game integration tests.
//!
//! These drive `MemoryGame` the way a host would: reveal cards, let time
//! pass, start new games, and read the scoreboard.

use memory_match::game::{MemoryGame, MemoryGameBuilder};
use memory_match::history::MessageTier;
use memory_match::rules::{GameStatus, TerminationEvaluator};
use memory_match::session::{IgnoreReason, RevealOutcome, SessionSnapshot};
use memory_match::store::{JsonFileStore, KeyValueStore, MemoryStore, HIGH_SCORE_KEY};
use memory_match::{CardId, OutcomeRecord};
use tempfile::TempDir;

// =============================================================================
// Helpers
// =============================================================================

fn game(seed: u64) -> MemoryGame<MemoryStore> {
    MemoryGameBuilder::new().seed(seed).build(MemoryStore::new()).unwrap()
}

/// Card ids grouped into pairs, in the order symbols first appear on the table.
fn pairs(snap: &SessionSnapshot) -> Vec<(CardId, CardId)> {
    let mut out: Vec<(CardId, CardId)> = Vec::new();
    let mut seen: Vec<(&str, CardId)> = Vec::new();
    for card in &snap.cards {
        match seen.iter().position(|(s, _)| *s == card.symbol.as_str()) {
            Some(i) => out.push((seen[i].1, card.id)),
            None => seen.push((card.symbol.as_str(), card.id)),
        }
    }
    out
}

fn play_match<S: KeyValueStore>(game: &mut MemoryGame<S>, (a, b): (CardId, CardId)) {
    game.reveal(a);
    game.reveal(b);
    game.settle();
}

fn play_mismatch<S: KeyValueStore>(game: &mut MemoryGame<S>, a: CardId, b: CardId) -> RevealOutcome {
    game.reveal(a);
    let outcome = game.reveal(b);
    game.settle();
    outcome
}

fn win<S: KeyValueStore>(game: &mut MemoryGame<S>) {
    for pair in pairs(&game.snapshot()) {
        play_match(game, pair);
    }
}

fn lose_by_score<S: KeyValueStore>(game: &mut MemoryGame<S>) {
    let p = pairs(&game.snapshot());
    while !game.snapshot().is_over() {
        play_mismatch(game, p[0].0, p[1].0);
    }
}

// =============================================================================
// Full Games
// =============================================================================

/// Eight matches in eight moves win with 40 points.
#[test]
fn test_perfect_game_wins() {
    let mut game = game(1);
    win(&mut game);

    let snap = game.snapshot();
    assert_eq!(snap.status, GameStatus::Won);
    assert_eq!(snap.score, 40);
    assert_eq!(snap.moves, 8);
    assert_eq!(snap.wrong_moves, 0);
    assert_eq!(snap.matched_pairs, 8);
    assert!(snap.cards.iter().all(|c| c.matched && c.revealed));

    assert_eq!(game.recent_results(), &[OutcomeRecord::new(true, 40)]);
    assert_eq!(game.high_score(), 40);
    assert_eq!(game.outcome_message(), Some("Good job!"));
}

/// Eight straight mismatches hit -16 and lose on the spot.
#[test]
fn test_score_threshold_loses_immediately() {
    let mut game = game(2);
    let p = pairs(&game.snapshot());

    for _ in 0..7 {
        let outcome = play_mismatch(&mut game, p[0].0, p[1].0);
        assert_eq!(outcome, RevealOutcome::Mismatched { status: GameStatus::InProgress });
    }

    game.reveal(p[0].0);
    let outcome = game.reveal(p[1].0);

    // Lost before the conceal timer has fired
    assert_eq!(outcome, RevealOutcome::Mismatched { status: GameStatus::Lost });
    let snap = game.snapshot();
    assert_eq!(snap.score, -16);
    assert_eq!(snap.moves, 8);
    assert_eq!(snap.pending.len(), 2);
    assert_eq!(game.recent_results(), &[OutcomeRecord::new(false, -16)]);
    assert_eq!(game.outcome_message(), Some("WASTED"));

    // The conceal still runs
    game.settle();
    assert!(game.snapshot().pending.is_empty());
    assert!(game.snapshot().cards.iter().all(|c| !c.revealed));
}

/// Six matches then twenty mismatches trip the move cap at move 26.
#[test]
fn test_move_cap_loses() {
    let mut game = game(3);
    let p = pairs(&game.snapshot());

    for &pair in &p[..6] {
        play_match(&mut game, pair);
    }
    assert_eq!(game.snapshot().score, 30);

    for _ in 0..19 {
        play_mismatch(&mut game, p[6].0, p[7].0);
    }
    let snap = game.snapshot();
    assert_eq!(snap.moves, 25);
    assert_eq!(snap.score, -8);
    assert_eq!(snap.status, GameStatus::InProgress);
    assert_eq!(snap.remaining_moves(), 0);

    let outcome = play_mismatch(&mut game, p[6].0, p[7].0);

    assert_eq!(outcome, RevealOutcome::Mismatched { status: GameStatus::Lost });
    let snap = game.snapshot();
    assert_eq!(snap.moves, 26);
    assert_eq!(snap.score, -10);
    assert_eq!(snap.lucky_moves(), 6);
    assert_eq!(game.recent_results(), &[OutcomeRecord::new(false, -10)]);
}

/// Finishing the last pair on move 26 is still a win.
#[test]
fn test_last_match_past_move_cap_wins() {
    let mut game = game(4);
    let p = pairs(&game.snapshot());

    for &pair in &p[..6] {
        play_match(&mut game, pair);
    }
    for _ in 0..18 {
        play_mismatch(&mut game, p[6].0, p[7].0);
    }
    play_match(&mut game, p[6]);
    assert_eq!(game.snapshot().moves, 25);

    play_match(&mut game, p[7]);

    let snap = game.snapshot();
    assert_eq!(snap.moves, 26);
    assert_eq!(snap.status, GameStatus::Won);
}

/// A match on move 26 that leaves pairs unfound loses once it is confirmed.
#[test]
fn test_move_cap_trips_on_match_confirmation() {
    let mut game = game(15);
    let p = pairs(&game.snapshot());

    for &pair in &p[..6] {
        play_match(&mut game, pair);
    }
    for _ in 0..19 {
        play_mismatch(&mut game, p[6].0, p[7].0);
    }
    assert_eq!(game.snapshot().moves, 25);

    game.reveal(p[6].0);
    assert_eq!(game.reveal(p[6].1), RevealOutcome::Matched);

    let snap = game.snapshot();
    assert_eq!(snap.moves, 26);
    assert_eq!(snap.score, -3);
    assert_eq!(snap.status, GameStatus::InProgress);
    assert!(game.recent_results().is_empty());

    assert_eq!(game.advance(499), 0);
    assert_eq!(game.snapshot().status, GameStatus::InProgress);
    assert_eq!(game.advance(1), 1);

    let snap = game.snapshot();
    assert_eq!(snap.status, GameStatus::Lost);
    assert_eq!(snap.matched_pairs, 7);
    assert_eq!(game.recent_results(), &[OutcomeRecord::new(false, -3)]);

    game.settle();
    game.advance(10_000);
    assert_eq!(game.recent_results().len(), 1);
}

// =============================================================================
// Ignored Reveals
// =============================================================================

#[test]
fn test_disallowed_reveals_change_nothing() {
    let mut game = game(5);
    let p = pairs(&game.snapshot());

    game.reveal(p[0].0);
    assert_eq!(game.reveal(p[0].0), RevealOutcome::Ignored(IgnoreReason::AlreadyRevealed));
    assert_eq!(game.reveal(CardId::new(99)), RevealOutcome::Ignored(IgnoreReason::UnknownCard));

    game.reveal(p[1].0);
    let before = game.snapshot();
    assert_eq!(game.reveal(p[2].0), RevealOutcome::Ignored(IgnoreReason::PairPending));
    assert_eq!(game.snapshot(), before);
}

#[test]
fn test_reveals_ignored_after_game_over() {
    let mut game = game(6);
    win(&mut game);
    let before = game.snapshot();

    let outcome = game.reveal(before.cards[0].id);

    assert_eq!(outcome, RevealOutcome::Ignored(IgnoreReason::SessionOver));
    assert_eq!(game.snapshot(), before);
}

#[test]
fn test_reveals_ignored_after_loss_is_concealed() {
    let mut game = game(16);
    lose_by_score(&mut game);
    assert_eq!(game.pending_timers(), 0);

    let before = game.snapshot();
    assert_eq!(before.status, GameStatus::Lost);
    assert!(before.pending.is_empty());

    for card in before.cards.iter() {
        assert_eq!(game.reveal(card.id), RevealOutcome::Ignored(IgnoreReason::SessionOver));
    }
    assert_eq!(game.advance(5_000), 0);
    assert_eq!(game.snapshot(), before);
    assert_eq!(game.recent_results().len(), 1);
}

// =============================================================================
// Generations
// =============================================================================

/// A conceal scheduled by a replaced session never reaches the new one.
#[test]
fn test_new_game_drops_stale_conceal() {
    let mut game = game(7);
    let p = pairs(&game.snapshot());
    game.reveal(p[0].0);
    game.reveal(p[1].0);

    let fresh = game.new_game();
    let first = fresh.cards[0].id;
    game.reveal(first);

    assert_eq!(game.advance(5_000), 0);
    let snap = game.snapshot();
    assert_eq!(snap.pending, vec![first]);
    assert!(snap.card(first).unwrap().revealed);
    assert_eq!(snap.score, 0);
}

#[test]
fn test_new_game_deals_fresh_session() {
    let mut game = game(8);
    win(&mut game);
    let first = game.snapshot();

    let second = game.new_game();

    assert_eq!(second.generation, first.generation.next());
    assert_eq!(second.status, GameStatus::InProgress);
    assert_eq!(second.score, 0);
    assert!(second.cards.iter().all(|c| !c.revealed && !c.matched));
    assert!(game.game_over().is_none());
    assert_eq!(game.recent_results().len(), 1);
}

// =============================================================================
// History
// =============================================================================

#[test]
fn test_outcome_recorded_once() {
    let mut game = game(9);
    lose_by_score(&mut game);
    game.settle();
    game.advance(10_000);

    assert_eq!(game.recent_results().len(), 1);
    assert_eq!(game.recent_scores(), &[-16]);
}

#[test]
fn test_loss_streak_messages() {
    let mut game = game(10);
    let mut tiers = Vec::new();

    for _ in 0..4 {
        lose_by_score(&mut game);
        tiers.push(game.game_over().unwrap().tier);
        game.new_game();
    }

    assert_eq!(
        tiers,
        vec![
            MessageTier::PlainLoss,
            MessageTier::ModerateLoss,
            MessageTier::SevereLoss,
            MessageTier::SevereLoss,
        ]
    );
    assert_eq!(game.outcome_message(), None);
}

#[test]
fn test_repeat_win_message() {
    let mut game = game(11);
    win(&mut game);
    assert_eq!(game.game_over().unwrap().tier, MessageTier::FirstWin);

    game.new_game();
    win(&mut game);
    assert_eq!(game.game_over().unwrap().tier, MessageTier::RepeatWin);
    assert_eq!(game.outcome_message(), Some("Good, now do something productive"));
}

#[test]
fn test_history_limits_hold_over_many_games() {
    let mut game = MemoryGameBuilder::new()
        .seed(12)
        .termination(TerminationEvaluator::new(-2, 25))
        .build(MemoryStore::new())
        .unwrap();

    for _ in 0..12 {
        lose_by_score(&mut game);
        game.new_game();
    }

    assert_eq!(game.recent_scores().len(), 5);
    assert_eq!(game.recent_results().len(), 10);
}

#[test]
fn test_history_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("memory.json");

    {
        let store = JsonFileStore::open(&path).unwrap();
        let mut game = MemoryGameBuilder::new().seed(13).build(store).unwrap();
        win(&mut game);
        assert_eq!(game.recorder().store().get(HIGH_SCORE_KEY).unwrap().as_deref(), Some("40"));
    }

    let store = JsonFileStore::open(&path).unwrap();
    let game = MemoryGameBuilder::new().seed(14).build(store).unwrap();

    assert_eq!(game.high_score(), 40);
    assert_eq!(game.recent_scores(), &[40]);
    assert_eq!(game.recent_results(), &[OutcomeRecord::new(true, 40)]);
}

#[test]
fn test_corrupt_history_file_loads_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("memory.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = JsonFileStore::open(&path).unwrap();
    let mut game = MemoryGameBuilder::new().seed(17).build(store).unwrap();

    assert_eq!(game.high_score(), 0);
    assert!(game.recent_results().is_empty());

    win(&mut game);
    assert_eq!(game.recorder().store().get(HIGH_SCORE_KEY).unwrap().as_deref(), Some("40"));
}

#[test]
fn test_hand_written_history_file_loads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("memory.json");
    std::fs::write(&path, r#"{"highScore": 40, "recentScores": [12]}"#).unwrap();

    let store = JsonFileStore::open(&path).unwrap();
    let game = MemoryGameBuilder::new().seed(18).build(store).unwrap();

    assert_eq!(game.high_score(), 40);
    assert_eq!(game.recent_scores(), &[12]);
}
