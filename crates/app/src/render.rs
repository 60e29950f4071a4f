//! Plain-text rendering of controller output.

use std::fmt::Write as _;

use services::{
    ControllerEvent, EndReason, HomeScreen, OptionMark, SessionSnapshot, SessionSummary, Verdict,
};

pub const HELP: &str = "\
Commands:
  test | train        start a timed test or an untimed training run
  1..n                select an option
  n, next             next question (reveals the answer first in training)
  p, prev             previous question
  j <n>, jump <n>     go to question n
  h, home             abandon the session and return home
  d, theme            toggle dark mode
  ?, help             show this help
  q, quit             exit";

/// `HH:MM:SS`.
#[must_use]
pub fn format_remaining(secs: u32) -> String {
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

#[must_use]
pub fn event(event: &ControllerEvent) -> String {
    match event {
        ControllerEvent::Session(snapshot) => self::snapshot(snapshot),
        ControllerEvent::Finished(summary) => self::summary(summary),
        ControllerEvent::Home(screen) => home(screen),
        ControllerEvent::ThemeChanged(theme) => {
            format!("Theme: {}", if theme.is_dark() { "dark" } else { "light" })
        }
    }
}

#[must_use]
pub fn home(screen: &HomeScreen) -> String {
    let theme = if screen.theme.is_dark() { "dark" } else { "light" };
    format!(
        "== Quiz ==\nQuestions available: {}\nSuccess rate: {}\nTheme: {theme}\nType `test` or `train` to begin, `?` for help.",
        screen.bank_size, screen.success_rate
    )
}

#[must_use]
pub fn snapshot(snapshot: &SessionSnapshot) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "[{}] Question {} of {} ({} answered)",
        snapshot.mode,
        snapshot.position + 1,
        snapshot.total,
        snapshot.answered
    );
    if let Some(secs) = snapshot.remaining_secs {
        let _ = write!(out, "  time left {}", format_remaining(secs));
    }
    let _ = write!(out, "\n{}\n", snapshot.question);

    for option in &snapshot.options {
        let cursor = if option.selected { '>' } else { ' ' };
        let mark = match option.mark {
            Some(OptionMark::Correct) => "  (correct)",
            Some(OptionMark::Incorrect) => "  (wrong)",
            None => "",
        };
        let _ = writeln!(out, "{cursor} {}. {}{mark}", option.index + 1, option.text);
    }

    if let Some(feedback) = &snapshot.feedback {
        let _ = writeln!(out, "{feedback}");
    }

    let mut actions = vec![format!("n: {}", snapshot.next_label)];
    if snapshot.can_go_back {
        actions.push("p: Previous".to_owned());
    }
    if snapshot.home_visible {
        actions.push("h: Home".to_owned());
    }
    out.push_str(&actions.join("  "));
    out
}

#[must_use]
pub fn summary(summary: &SessionSummary) -> String {
    let mut out = String::new();
    if summary.ended_by == EndReason::TimeExpired {
        out.push_str("Time is up!\n");
    }
    let _ = writeln!(
        out,
        "== {} finished ==\nScore: {} / {} ({:.2}%)",
        summary.mode,
        summary.score.correct(),
        summary.score.total(),
        summary.percentage
    );
    match summary.verdict {
        Some(Verdict::Passed) => out.push_str("Result: PASSED\n"),
        Some(Verdict::Failed) => out.push_str("Result: FAILED\n"),
        None => {}
    }

    for review in &summary.questions {
        let status = if review.is_correct { "ok " } else { "xx " };
        let chosen = review.chosen.as_deref().unwrap_or("(no answer)");
        let _ = write!(
            out,
            "\n{status}{}. {}\n    yours: {chosen}\n    correct: {}",
            review.position + 1,
            review.question,
            review.correct
        );
    }
    out
}
