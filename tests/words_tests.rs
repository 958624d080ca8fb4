//! Word Weavers integration tests.

use std::time::Duration;

use eduplay_games::core::{FeedbackKind, GameRng, ScriptedRng, WordsConfig};
use eduplay_games::games::words::{
    LetterDraw, LetterPool, StaticWordList, WordList, WordVerdict, WordsGame, WordsStatus,
};
use eduplay_games::MiniGame;

fn letters(s: &str) -> LetterDraw {
    LetterDraw::from_letters(s.chars())
}

fn game_with(s: &str) -> WordsGame {
    let mut game = WordsGame::new(WordsConfig::default(), GameRng::new(12));
    game.start_with_letters(letters(s));
    game
}

/// Accepts anything; lets tests isolate the other checks.
struct Everything;

impl WordList for Everything {
    fn contains(&self, _word: &str) -> bool {
        true
    }
}

// =============================================================================
// Multiset Tests
// =============================================================================

#[test]
fn test_ball_needs_two_ls() {
    assert!(letters("BALLXYZ").can_form("BALL"));
    assert!(!letters("BALXYZW").can_form("BALL"));
}

#[test]
fn test_ball_through_engine() {
    let mut game =
        WordsGame::with_word_list(WordsConfig::default(), GameRng::new(1), Everything);
    game.start_with_letters(letters("BALXYZW"));
    assert_eq!(game.submit("ball"), WordVerdict::CannotForm);

    game.start_with_letters(letters("BALLXYZ"));
    assert!(game.submit("ball").is_accepted());
}

// =============================================================================
// Scoring Tests
// =============================================================================

#[test]
fn test_duplicate_word_scores_once() {
    let mut game = game_with("TREATSX");
    assert!(game.submit("treat").is_accepted());
    assert_eq!(game.score(), 3);

    assert_eq!(game.submit("TREAT"), WordVerdict::AlreadyFound);
    assert_eq!(game.score(), 3);
    assert_eq!(game.feedback().map(|f| f.kind), Some(FeedbackKind::Info));
}

#[test]
fn test_seven_letter_word_bonus() {
    let mut game = game_with("MERCURY");
    assert_eq!(
        game.submit("mercury"),
        WordVerdict::Accepted {
            word: "MERCURY".into(),
            points: 6
        }
    );
}

#[test]
fn test_found_words_sorted() {
    let mut game = game_with("STARECM");
    for word in ["TEAM", "CAT", "STAR", "ACE"] {
        assert!(game.submit(word).is_accepted(), "{word}");
    }
    assert_eq!(
        game.found_words().collect::<Vec<_>>(),
        vec!["ACE", "CAT", "STAR", "TEAM"]
    );
    let snap = game.snapshot();
    assert_eq!(snap.found.len(), 4);
    assert_eq!(snap.score, 1 + 1 + 2 + 2);
}

#[test]
fn test_rejection_messages() {
    let mut game = game_with("CATSXYZ");

    game.submit("ca");
    assert_eq!(
        game.feedback().map(|f| f.message.as_str()),
        Some("Word must be at least 3 letters long.")
    );
    game.submit("dog");
    assert_eq!(
        game.feedback().map(|f| f.message.as_str()),
        Some("The word uses letters not available in the scramble!")
    );
    game.submit("tax");
    assert_eq!(
        game.feedback().map(|f| f.message.as_str()),
        Some("Not a valid word in our dictionary.")
    );
    assert_eq!(game.score(), 0);
}

// =============================================================================
// Letter Pool Tests
// =============================================================================

#[test]
fn test_scripted_draw() {
    // Lowest and highest offsets into the default pool.
    let pool = LetterPool::default();
    let mut rng = ScriptedRng::new(vec![0, 97]);
    assert_eq!(pool.draw(&mut rng, 2), letters("AZ"));
}

#[test]
fn test_init_draws_configured_count() {
    let config = WordsConfig::default().with_letter_count(9);
    let mut game = WordsGame::new(config, GameRng::new(30));
    game.init();
    assert_eq!(game.letters().len(), 9);
    assert_eq!(game.status(), WordsStatus::Active);
}

#[test]
fn test_same_seed_same_scramble() {
    let mut a = WordsGame::new(WordsConfig::default(), GameRng::new(77));
    let mut b = WordsGame::new(WordsConfig::default(), GameRng::new(77));
    a.init();
    b.init();
    assert_eq!(a.letters(), b.letters());
}

#[test]
fn test_reset_returns_to_idle() {
    let mut game = game_with("CATSXYZ");
    game.submit("cat");
    game.reset();

    assert_eq!(game.status(), WordsStatus::Idle);
    assert!(game.letters().is_empty());
    assert!(game.feedback().is_none());
    assert_eq!(game.submit("cat"), WordVerdict::Ignored);
    game.advance(Duration::from_secs(10));
    assert!(game.feedback().is_none());
}

#[test]
fn test_word_list_by_reference() {
    let list = StaticWordList::empty().with_words(["OWL"]);
    let mut game = WordsGame::with_word_list(WordsConfig::default(), GameRng::new(1), &list);
    game.start_with_letters(letters("OWLXXXX"));
    assert!(game.submit("owl").is_accepted());
}
