//! Live progress reporting while a session runs

use crate::output::console::participant_color;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;
use traitor_application::SessionObserver;
use traitor_domain::{Participant, SessionPhase, SessionResult, Utterance, Vote};

const NARRATOR_LABEL: &str = "GAME MASTER";

/// Spinner for the speaker who is "typing", with chat lines printed above it
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.dim} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn with_spinner(&self, f: impl FnOnce(&ProgressBar)) {
        let mut guard = match self.spinner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let spinner = guard.get_or_insert_with(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(Self::spinner_style());
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });
        f(spinner);
    }

    fn finish(&self) {
        if let Ok(mut guard) = self.spinner.lock()
            && let Some(pb) = guard.take()
        {
            pb.finish_and_clear();
        }
    }

    fn chat_line(speaker: &Participant, text: &str) -> String {
        format!(
            "{}: {}",
            speaker.name.color(participant_color(speaker.slot)).bold(),
            text
        )
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionObserver for ProgressReporter {
    fn on_phase_change(&self, phase: SessionPhase) {
        match phase {
            SessionPhase::Running | SessionPhase::Voting => self.with_spinner(|pb| {
                pb.println(format!("{} {}", "->".cyan(), phase.display_name().bold()));
                pb.set_prefix(phase.display_name());
                pb.set_message("");
            }),
            SessionPhase::Cancelled => {
                self.with_spinner(|pb| pb.println("Session cancelled".yellow().to_string()));
                self.finish();
            }
            SessionPhase::Idle | SessionPhase::Complete => {}
        }
    }

    fn on_narration(&self, utterance: &Utterance) {
        self.with_spinner(|pb| {
            pb.println(format!("{}: {}", NARRATOR_LABEL.dimmed().bold(), utterance.text));
        });
    }

    fn on_speaker_start(&self, speaker: &Participant, turn: usize, max_turns: usize) {
        self.with_spinner(|pb| {
            pb.set_prefix(format!("turn {}/{}", turn, max_turns));
            pb.set_message(format!("{} is typing...", speaker.name));
        });
    }

    fn on_utterance(&self, speaker: &Participant, utterance: &Utterance) {
        self.with_spinner(|pb| pb.println(Self::chat_line(speaker, &utterance.text)));
    }

    fn on_speaker_end(&self, _speaker: &Participant) {
        self.with_spinner(|pb| pb.set_message(""));
    }

    fn on_vote_cast(&self, voter: &Participant, _vote: &Vote) {
        // ballots stay secret until the result is printed
        self.with_spinner(|pb| {
            pb.println(format!("  {} {} has voted", "v".green(), voter.name));
        });
    }

    fn on_result(&self, _result: &SessionResult) {
        self.finish();
    }
}

/// Simple text-based progress (no spinner), for non-terminal stderr
pub struct SimpleProgress;

impl SessionObserver for SimpleProgress {
    fn on_phase_change(&self, phase: SessionPhase) {
        if matches!(phase, SessionPhase::Running | SessionPhase::Voting) {
            eprintln!("{} {}", "->".cyan(), phase.display_name().bold());
        }
    }

    fn on_narration(&self, utterance: &Utterance) {
        eprintln!("{}: {}", NARRATOR_LABEL.dimmed().bold(), utterance.text);
    }

    fn on_utterance(&self, speaker: &Participant, utterance: &Utterance) {
        eprintln!("{}", ProgressReporter::chat_line(speaker, &utterance.text));
    }

    fn on_vote_cast(&self, voter: &Participant, _vote: &Vote) {
        eprintln!("  {} {} has voted", "v".green(), voter.name);
    }
}
