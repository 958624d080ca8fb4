//! Pattern Detectives integration tests.

use std::time::Duration;

use eduplay_games::core::{FeedbackKind, GameRng, SequenceConfig};
use eduplay_games::games::sequence::{
    generate_distractors, ChoiceOutcome, Color, Item, Pattern, PatternRule, Round, SequenceGame,
    SequenceStatus, Shape,
};
use eduplay_games::MiniGame;
use rustc_hash::FxHashSet;

// =============================================================================
// Pattern Rule Tests
// =============================================================================

#[test]
fn test_color_cycle_keeps_shape() {
    let items: Vec<Item> = (0..4)
        .map(|step| PatternRule::ColorCycles.item_at(step, 2, 0))
        .collect();
    assert!(items.iter().all(|item| item.shape == Shape::Triangle));
    assert_eq!(
        items.iter().map(|item| item.color).collect::<Vec<_>>(),
        vec![Color::Red, Color::Blue, Color::Green, Color::Orange]
    );
}

#[test]
fn test_shape_cycle_wraps() {
    let item = PatternRule::ShapeCycles.item_at(4, 1, 3);
    assert_eq!(item, Item::new(Shape::Square, Color::Orange));
}

#[test]
fn test_both_cycle_steps_color_by_two() {
    let items: Vec<Item> = (0..3)
        .map(|step| PatternRule::BothCycle.item_at(step, 0, 4))
        .collect();
    assert_eq!(
        items,
        vec![
            Item::new(Shape::Circle, Color::Indigo),
            Item::new(Shape::Square, Color::Blue),
            Item::new(Shape::Triangle, Color::Orange),
        ]
    );
}

#[test]
fn test_pattern_next_follows_rule() {
    let mut rng = GameRng::new(17);
    for _ in 0..100 {
        let pattern = Pattern::generate(&mut rng, 4);
        assert_eq!(pattern.visible.len(), 4);
        let step_shape = |a: Item, b: Item| {
            (Shape::ALL.iter().position(|s| *s == b.shape).unwrap() + Shape::ALL.len()
                - Shape::ALL.iter().position(|s| *s == a.shape).unwrap())
                % Shape::ALL.len()
        };
        // The held-out item moves exactly like the visible run does.
        assert_eq!(
            step_shape(pattern.visible[2], pattern.visible[3]),
            step_shape(pattern.visible[3], pattern.next)
        );
    }
}

// =============================================================================
// Choice Generation Tests
// =============================================================================

#[test]
fn test_round_has_one_correct_choice() {
    let mut rng = GameRng::new(99);
    let config = SequenceConfig::default();
    for _ in 0..500 {
        let round = Round::generate(&mut rng, &config);
        let correct = round
            .choices
            .iter()
            .filter(|c| **c == round.answer())
            .count();
        assert_eq!(correct, 1);
        let distinct: FxHashSet<Item> = round.choices.iter().copied().collect();
        assert_eq!(distinct.len(), 4);
    }
}

#[test]
fn test_distractors_without_budget_use_fallback() {
    let mut rng = GameRng::new(3);
    let correct = Item::new(Shape::Star, Color::Green);
    let distractors = generate_distractors(&mut rng, correct, 0);
    let distinct: FxHashSet<Item> = distractors.iter().copied().collect();
    assert_eq!(distinct.len(), 3);
    assert!(!distinct.contains(&correct));
}

#[test]
fn test_color_hex_codes() {
    assert_eq!(Color::Red.hex(), "#EF4444");
    assert_eq!(Color::Indigo.hex(), "#6366F1");
}

// =============================================================================
// Session Tests
// =============================================================================

#[test]
fn test_full_run_completes() {
    let mut game = SequenceGame::new(SequenceConfig::default(), GameRng::new(8));
    game.start();

    for level in 1..=10 {
        assert_eq!(game.level(), Some(level));
        let index = game.round().unwrap().answer_index();
        assert_eq!(game.choose_index(index), ChoiceOutcome::Correct);
        game.run_pending(Duration::from_secs(5));
    }

    assert_eq!(game.status(), SequenceStatus::Completed { final_score: 10 });
    assert_eq!(game.snapshot().choices.len(), 0);
}

#[test]
fn test_wrong_then_right_on_same_level() {
    let mut game = SequenceGame::new(SequenceConfig::default(), GameRng::new(21));
    game.start();
    let round = game.round().unwrap().clone();
    let wrong = (0..4).find(|i| *i != round.answer_index()).unwrap();

    assert_eq!(game.choose_index(wrong), ChoiceOutcome::Incorrect);
    assert_eq!(
        game.feedback().map(|f| f.message.as_str()),
        Some("Incorrect. Analyze the sequence!")
    );
    let waited = game.run_pending(Duration::from_secs(5));
    assert_eq!(waited, Duration::from_secs(2));
    assert_eq!(game.level(), Some(1));

    let index = game.round().unwrap().answer_index();
    assert_eq!(game.choose_index(index), ChoiceOutcome::Correct);
    assert_eq!(game.feedback().map(|f| f.kind), Some(FeedbackKind::Success));
    assert_eq!(game.score(), 1);
}

#[test]
fn test_feedback_stays_until_next_round() {
    let mut game = SequenceGame::new(SequenceConfig::default(), GameRng::new(2));
    game.start();
    let index = game.round().unwrap().answer_index();
    game.choose_index(index);

    game.advance(Duration::from_millis(999));
    assert_eq!(
        game.feedback().map(|f| f.message.as_str()),
        Some("Correct! Pattern solved.")
    );
}

#[test]
fn test_snapshot_hides_answer_position() {
    let mut game = SequenceGame::new(SequenceConfig::default(), GameRng::new(6));
    game.start();
    let snap = game.snapshot();
    let round = game.round().unwrap();
    assert_eq!(snap.sequence, round.pattern.visible);
    assert_eq!(snap.choices, round.choices.to_vec());
    assert_eq!(snap.max_levels, 10);
}
