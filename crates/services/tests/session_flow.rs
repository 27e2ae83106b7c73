use std::sync::Arc;

use satprep_core::Difficulty;
use satprep_core::model::{FailureKind, OptionIndex, QuestionDraft, SessionPhase};
use satprep_core::time::fixed_clock;
use services::{ScriptedQuestionSource, SessionController, SourceError};

fn draft(correct_index: i64) -> QuestionDraft {
    QuestionDraft {
        stem: "f(x) = x² − 4x + 3. For what value of x is f(x) minimized?".into(),
        options: vec!["1".into(), "−2".into(), "2".into(), "3".into()],
        correct_index,
        explanation: "The vertex is at x = −b/2a = 2.".into(),
        topic: "Quadratic Functions".into(),
        svg: None,
        explanation_svg: Some("<svg viewBox=\"0 0 300 300\"></svg>".into()),
    }
}

fn idx(value: usize) -> OptionIndex {
    OptionIndex::new(value).unwrap()
}

async fn started(source: &ScriptedQuestionSource) -> SessionController {
    SessionController::start(Arc::new(source.clone()), fixed_clock()).await
}

async fn answer(controller: &mut SessionController, option: usize) -> bool {
    assert!(controller.select_option(idx(option)));
    let outcome = controller.submit().expect("answer scored");
    assert!(controller.next().await);
    outcome.is_correct
}

#[tokio::test]
async fn right_right_wrong_adjusts_difficulty_and_streak() {
    let source = ScriptedQuestionSource::new();
    for _ in 0..4 {
        source.push_question(draft(2));
    }
    let mut controller = started(&source).await;
    assert_eq!(controller.difficulty().value(), 8.0);
    assert_eq!(controller.streak(), 0);

    assert!(answer(&mut controller, 2).await);
    assert_eq!((controller.difficulty().value(), controller.streak()), (8.5, 1));

    assert!(answer(&mut controller, 2).await);
    assert_eq!((controller.difficulty().value(), controller.streak()), (9.0, 2));

    assert!(!answer(&mut controller, 1).await);
    assert_eq!((controller.difficulty().value(), controller.streak()), (8.0, 0));

    assert_eq!(
        source.requests(),
        vec![
            Difficulty::new(8.0),
            Difficulty::new(8.5),
            Difficulty::new(9.0),
            Difficulty::new(8.0),
        ]
    );
    assert_eq!(controller.stats().answered, 3);
    assert_eq!(controller.stats().correct, 2);
}

#[tokio::test]
async fn network_failure_is_terminal_and_stops_requests() {
    let source = ScriptedQuestionSource::new();
    source.push_question(draft(2));
    source.push_failure(SourceError::HttpStatus(reqwest::StatusCode::BAD_GATEWAY));
    source.push_question(draft(2));

    let mut controller = started(&source).await;
    controller.select_option(idx(0));
    controller.submit().unwrap();
    assert!(controller.next().await);

    assert_eq!(controller.phase(), SessionPhase::Error);
    assert_eq!(
        controller.state().failure(),
        Some(FailureKind::SourceUnavailable)
    );
    assert!(!controller.next().await);
    assert!(!controller.skip().await);
    assert!(!controller.select_option(idx(1)));
    assert_eq!(source.request_count(), 2);
}

#[tokio::test]
async fn three_options_end_in_error() {
    let source = ScriptedQuestionSource::new();
    let mut short = draft(0);
    short.options.pop();
    source.push_question(short);

    let controller = started(&source).await;
    assert_eq!(controller.phase(), SessionPhase::Error);
    assert_eq!(
        controller.state().failure(),
        Some(FailureKind::MalformedResponse)
    );
}

#[tokio::test]
async fn skip_from_active_and_review_keeps_rating() {
    let source = ScriptedQuestionSource::new();
    for _ in 0..4 {
        source.push_question(draft(2));
    }
    let mut controller = started(&source).await;

    assert!(controller.skip().await);
    assert_eq!(controller.difficulty().value(), 8.0);
    assert_eq!(controller.streak(), 0);

    controller.select_option(idx(2));
    controller.submit().unwrap();
    let (difficulty, streak) = (controller.difficulty(), controller.streak());
    assert!(controller.skip().await);
    assert_eq!(controller.difficulty(), difficulty);
    assert_eq!(controller.streak(), streak);
    assert_eq!(controller.phase(), SessionPhase::Active);
    assert!(controller.selected_option().is_none());

    assert_eq!(
        source.requests(),
        vec![
            Difficulty::new(8.0),
            Difficulty::new(8.0),
            Difficulty::new(8.5),
        ]
    );
}

#[tokio::test]
async fn submit_without_selection_is_ignored() {
    let source = ScriptedQuestionSource::new();
    source.push_question(draft(2));
    let mut controller = started(&source).await;

    let before = controller.state().clone();
    assert!(controller.submit().is_none());
    assert_eq!(controller.state(), &before);
    assert!(!controller.next().await);
    assert_eq!(source.request_count(), 1);
}

#[tokio::test]
async fn wrong_answers_bottom_out_at_four() {
    let source = ScriptedQuestionSource::new();
    for _ in 0..8 {
        source.push_question(draft(3));
    }
    let mut controller = started(&source).await;

    for _ in 0..6 {
        assert!(!answer(&mut controller, 0).await);
        assert!(controller.difficulty().value() >= 4.0);
        assert_eq!(controller.streak(), 0);
    }
    assert_eq!(controller.difficulty().value(), 4.0);
}
