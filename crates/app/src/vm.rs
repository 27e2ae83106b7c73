use satprep_core::Difficulty;
use satprep_core::model::{OptionIndex, SessionPhase, SessionState};

const GAUGE_SEGMENTS: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderVm {
    pub difficulty_gauge: String,
    pub difficulty_label: String,
    pub streak_label: String,
    pub streak_active: bool,
}

#[must_use]
pub fn map_header(difficulty: Difficulty, streak: u32) -> HeaderVm {
    let filled = difficulty.filled_segments().min(GAUGE_SEGMENTS);
    let difficulty_gauge = format!(
        "{}{}",
        "■".repeat(filled),
        "□".repeat(GAUGE_SEGMENTS - filled)
    );

    HeaderVm {
        difficulty_gauge,
        difficulty_label: format!("{difficulty} ({})", difficulty.tier()),
        streak_label: streak.to_string(),
        streak_active: streak > 0,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionMark {
    Plain,
    Selected,
    Correct,
    WrongPick,
    Dimmed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub letter: char,
    pub text: String,
    pub mark: OptionMark,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewVm {
    pub is_correct: bool,
    pub badge: &'static str,
    pub heading: &'static str,
    pub explanation: String,
    pub has_explanation_diagram: bool,
    pub footer: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub topic: String,
    pub stem: String,
    pub has_diagram: bool,
    pub options: Vec<OptionVm>,
    pub review: Option<ReviewVm>,
    pub can_check: bool,
}

/// Map the visible question, if any, for the current phase.
///
/// The previous question stays on screen while the next one loads.
#[must_use]
pub fn map_question(state: &SessionState) -> Option<QuestionVm> {
    let question = state.current_question()?;
    let selected = state.selected_option();
    let review = state.last_answer().map(|answer| {
        let is_correct = answer.is_correct;
        ReviewVm {
            is_correct,
            badge: if is_correct { "Correct" } else { "Incorrect" },
            heading: if is_correct {
                "Explanation"
            } else {
                "Incorrect - Detailed Solution & Tips"
            },
            explanation: question.explanation().to_string(),
            has_explanation_diagram: question.explanation_svg().is_some(),
            footer: if is_correct {
                "Good job! Getting ready for the next challenge..."
            } else {
                "Don't worry, the next one will adjust to help you learn."
            },
        }
    });

    let reviewing = review.is_some();
    let options = OptionIndex::all()
        .map(|index| {
            let mark = if reviewing {
                if index == question.correct_index() {
                    OptionMark::Correct
                } else if Some(index) == selected {
                    OptionMark::WrongPick
                } else {
                    OptionMark::Dimmed
                }
            } else if Some(index) == selected {
                OptionMark::Selected
            } else {
                OptionMark::Plain
            };
            OptionVm {
                letter: index.letter(),
                text: question.option(index).to_string(),
                mark,
            }
        })
        .collect();

    Some(QuestionVm {
        topic: question.topic().to_string(),
        stem: question.stem().to_string(),
        has_diagram: question.svg().is_some(),
        options,
        review,
        can_check: state.phase() == SessionPhase::Active && selected.is_some(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use satprep_core::model::{QuestionDraft, QuestionId};
    use satprep_core::time::fixed_now;

    fn active_state(correct_index: i64) -> SessionState {
        let (mut state, ticket) = SessionState::start();
        let question = QuestionDraft {
            stem: "What is the slope of y = 2x + 1?".into(),
            options: vec!["1".into(), "2".into(), "3".into(), "4".into()],
            correct_index,
            explanation: "Slope-intercept form.".into(),
            topic: "Linear Functions".into(),
            svg: None,
            explanation_svg: Some("<svg></svg>".into()),
        }
        .validate(QuestionId::generate(), ticket.difficulty(), fixed_now())
        .unwrap();
        state.accept_question(ticket, question);
        state
    }

    fn idx(value: usize) -> OptionIndex {
        OptionIndex::new(value).unwrap()
    }

    #[test]
    fn header_gauge_tracks_difficulty() {
        let header = map_header(Difficulty::new(8.5), 0);
        assert_eq!(header.difficulty_gauge, "■■■■■■■■■□");
        assert_eq!(header.difficulty_label, "8.5 (very hard)");
        assert!(!header.streak_active);

        let header = map_header(Difficulty::new(4.0), 3);
        assert_eq!(header.difficulty_gauge.chars().filter(|c| *c == '■').count(), 4);
        assert_eq!(header.streak_label, "3");
        assert!(header.streak_active);
    }

    #[test]
    fn loading_without_question_has_nothing_to_show() {
        let (state, _ticket) = SessionState::start();
        assert!(map_question(&state).is_none());
    }

    #[test]
    fn active_question_marks_selection() {
        let mut state = active_state(1);
        let vm = map_question(&state).unwrap();
        assert!(!vm.can_check);
        assert!(vm.review.is_none());
        assert!(vm.options.iter().all(|o| o.mark == OptionMark::Plain));

        state.select_option(idx(3));
        let vm = map_question(&state).unwrap();
        assert!(vm.can_check);
        assert_eq!(vm.options[3].mark, OptionMark::Selected);
        assert_eq!(vm.options[3].letter, 'D');
    }

    #[test]
    fn wrong_answer_review_marks_both_options() {
        let mut state = active_state(1);
        state.select_option(idx(2));
        state.submit().unwrap();

        let vm = map_question(&state).unwrap();
        let review = vm.review.unwrap();
        assert!(!review.is_correct);
        assert_eq!(review.badge, "Incorrect");
        assert_eq!(review.heading, "Incorrect - Detailed Solution & Tips");
        assert!(review.has_explanation_diagram);
        let marks: Vec<_> = vm.options.iter().map(|o| o.mark).collect();
        assert_eq!(
            marks,
            [
                OptionMark::Dimmed,
                OptionMark::Correct,
                OptionMark::WrongPick,
                OptionMark::Dimmed
            ]
        );
    }

    #[test]
    fn correct_answer_review_uses_explanation_heading() {
        let mut state = active_state(1);
        state.select_option(idx(1));
        state.submit().unwrap();

        let review = map_question(&state).unwrap().review.unwrap();
        assert!(review.is_correct);
        assert_eq!(review.heading, "Explanation");
        assert_eq!(
            review.footer,
            "Good job! Getting ready for the next challenge..."
        );
    }

    #[test]
    fn previous_question_stays_visible_while_loading() {
        let mut state = active_state(1);
        state.select_option(idx(1));
        state.submit().unwrap();
        let _ticket = state.next().unwrap();

        let vm = map_question(&state).unwrap();
        assert_eq!(vm.topic, "Linear Functions");
        assert!(vm.review.is_none());
        assert!(!vm.can_check);
    }
}
