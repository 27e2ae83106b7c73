use std::fmt::Write as _;

use owo_colors::{OwoColorize, Style};
use satprep_core::model::SessionStats;

use crate::vm::{HeaderVm, OptionMark, OptionVm, QuestionVm};

const RULE: &str = "────────────────────────────────────────────────────────────";

/// Turns view models into terminal text.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    #[must_use]
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.color {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    #[must_use]
    pub fn header(&self, header: &HeaderVm) -> String {
        let title = format!(
            "{}{}",
            self.paint("SatPrep", Style::new().bold()),
            self.paint(".ai", Style::new().bold().blue())
        );
        let streak_style = if header.streak_active {
            Style::new().bold().green()
        } else {
            Style::new().dimmed()
        };
        format!(
            "{title}  |  Section: Math (Advanced)\nDifficulty {} {}   Streak {}\n{RULE}",
            self.paint(&header.difficulty_gauge, Style::new().magenta()),
            header.difficulty_label,
            self.paint(&header.streak_label, streak_style),
        )
    }

    #[must_use]
    pub fn question(&self, vm: &QuestionVm) -> String {
        let mut out = String::new();

        let mut tags = self.paint(&format!(" {} ", vm.topic), Style::new().reversed());
        if let Some(review) = &vm.review {
            let style = if review.is_correct {
                Style::new().bold().green()
            } else {
                Style::new().bold().red()
            };
            tags.push(' ');
            tags.push_str(&self.paint(review.badge, style));
        }
        let _ = writeln!(out, "{tags}\n");
        let _ = writeln!(out, "{}", vm.stem);
        if vm.has_diagram {
            let _ = writeln!(out, "{}", self.paint("[diagram attached: v to print]", Style::new().dimmed()));
        }
        let _ = writeln!(out);

        for option in &vm.options {
            let _ = writeln!(out, "{}", self.option(option));
        }

        if let Some(review) = &vm.review {
            let style = if review.is_correct {
                Style::new().bold().green()
            } else {
                Style::new().bold().red()
            };
            let _ = writeln!(out, "\n{}", self.paint(review.heading, style));
            let _ = writeln!(out, "{}", review.explanation);
            if review.has_explanation_diagram {
                let _ = writeln!(
                    out,
                    "{}",
                    self.paint("[solution graph attached: v to print]", Style::new().dimmed())
                );
            }
            let _ = writeln!(out, "\n{}", self.paint(review.footer, Style::new().italic()));
        }

        let _ = write!(out, "{RULE}");
        out
    }

    fn option(&self, option: &OptionVm) -> String {
        let (marker, style) = match option.mark {
            OptionMark::Plain => (' ', Style::new()),
            OptionMark::Selected => ('>', Style::new().bold().cyan()),
            OptionMark::Correct => ('✓', Style::new().bold().green()),
            OptionMark::WrongPick => ('✗', Style::new().red()),
            OptionMark::Dimmed => (' ', Style::new().dimmed()),
        };
        self.paint(
            &format!("{marker} {}. {}", option.letter, option.text),
            style,
        )
    }

    /// Key hints for the question on screen.
    #[must_use]
    pub fn hints(&self, vm: &QuestionVm) -> String {
        let text = if vm.review.is_some() {
            "[enter] next question  [s] skip  [v] diagrams  [q] quit"
        } else if vm.can_check {
            "[a-d] select  [enter] check answer  [s] skip  [v] diagrams  [q] quit"
        } else {
            "[a-d] select an answer  [s] skip  [v] diagrams  [q] quit"
        };
        self.paint(text, Style::new().dimmed())
    }

    #[must_use]
    pub fn error_screen(&self) -> String {
        format!(
            "{}\nWe couldn't generate a question. Please check your connection.\n{}",
            self.paint("Something went wrong", Style::new().bold().red()),
            self.paint("[r] restart  [q] quit", Style::new().dimmed())
        )
    }

    #[must_use]
    pub fn farewell(&self, stats: SessionStats) -> String {
        format!(
            "Answered {} ({} correct, {} incorrect). See you next time.",
            stats.answered,
            stats.correct,
            stats.incorrect()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::ReviewVm;

    fn vm(review: Option<ReviewVm>) -> QuestionVm {
        QuestionVm {
            topic: "Circle Theorems".into(),
            stem: "Find the arc length.".into(),
            has_diagram: true,
            options: vec![
                OptionVm { letter: 'A', text: "π".into(), mark: OptionMark::Correct },
                OptionVm { letter: 'B', text: "2π".into(), mark: OptionMark::WrongPick },
                OptionVm { letter: 'C', text: "3π".into(), mark: OptionMark::Dimmed },
                OptionVm { letter: 'D', text: "4π".into(), mark: OptionMark::Dimmed },
            ],
            review,
            can_check: false,
        }
    }

    #[test]
    fn plain_rendering_has_no_escape_codes() {
        let renderer = Renderer::new(false);
        let text = renderer.question(&vm(None));
        assert!(!text.contains('\u{1b}'));
        assert!(text.contains("✓ A. π"));
        assert!(text.contains("✗ B. 2π"));
        assert!(text.contains("[diagram attached: v to print]"));
    }

    #[test]
    fn review_shows_badge_heading_and_footer() {
        let renderer = Renderer::new(false);
        let review = ReviewVm {
            is_correct: false,
            badge: "Incorrect",
            heading: "Incorrect - Detailed Solution & Tips",
            explanation: "Arc length is rθ.".into(),
            has_explanation_diagram: false,
            footer: "Don't worry, the next one will adjust to help you learn.",
        };
        let text = renderer.question(&vm(Some(review)));
        assert!(text.contains(" Circle Theorems  Incorrect"));
        assert!(text.contains("Arc length is rθ."));
        assert!(text.contains("Don't worry"));
        assert!(!text.contains("solution graph"));
    }

    #[test]
    fn colored_rendering_wraps_text() {
        let renderer = Renderer::new(true);
        let text = renderer.error_screen();
        assert!(text.contains('\u{1b}'));
        assert!(text.contains("Something went wrong"));
    }

    #[test]
    fn hints_follow_question_state() {
        let renderer = Renderer::new(false);
        let mut question = vm(None);
        assert!(renderer.hints(&question).contains("select an answer"));

        question.can_check = true;
        assert!(renderer.hints(&question).contains("check answer"));

        let reviewing = vm(Some(ReviewVm {
            is_correct: true,
            badge: "Correct",
            heading: "Explanation",
            explanation: String::new(),
            has_explanation_diagram: false,
            footer: "",
        }));
        assert!(renderer.hints(&reviewing).contains("next question"));
    }

    #[test]
    fn error_screen_offers_restart() {
        let text = Renderer::new(false).error_screen();
        assert!(text.contains("Please check your connection."));
        assert!(text.ends_with("[r] restart  [q] quit"));
    }

    #[test]
    fn farewell_summarizes_stats() {
        let renderer = Renderer::new(false);
        let text = renderer.farewell(SessionStats { answered: 5, correct: 3 });
        assert_eq!(text, "Answered 5 (3 correct, 2 incorrect). See you next time.");
    }
}
