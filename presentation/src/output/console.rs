//! Console output formatter for session results

use crate::output::formatter::OutputFormatter;
use colored::{Color, Colorize};
use traitor_domain::{Accusation, Author, Participant, Role, SessionResult, Side};

const NARRATOR_LABEL: &str = "GAME MASTER";

const PALETTE: [Color; 6] = [
    Color::Cyan,
    Color::Magenta,
    Color::Yellow,
    Color::Green,
    Color::Blue,
    Color::BrightRed,
];

/// Stable per-seat color, shared by the formatter and the live reporter
pub fn participant_color(slot: usize) -> Color {
    PALETTE[slot % PALETTE.len()]
}

pub fn role_label(role: Role) -> &'static str {
    match role {
        Role::Ordinary => "Detective",
        Role::Weak => "TRAITOR",
    }
}

/// Formats session results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Lineup, transcript, ballots and scoreboard
    pub fn format(result: &SessionResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Turing Traitor Results"));
        output.push('\n');

        output.push_str(&Self::section_header("Lineup"));
        for p in result.roster.iter() {
            output.push_str(&format!(
                "  {:<8} {:<28} {:<12} {}\n",
                Self::name(p),
                p.model.as_str(),
                p.persona_short(),
                Self::role(p.role)
            ));
        }

        output.push_str(&Self::section_header("Discussion"));
        for utterance in result.transcript.utterances() {
            let speaker = match &utterance.author {
                Author::Narrator => NARRATOR_LABEL.dimmed().bold().to_string(),
                Author::Participant(id) => match result.roster.get(id) {
                    Some(p) => Self::name(p),
                    None => id.as_str().to_string(),
                },
            };
            output.push_str(&format!("{}: {}\n", speaker, utterance.text));
        }

        output.push_str(&Self::section_header("Ballots"));
        for vote in &result.votes {
            let voter = match result.roster.get(&vote.voter) {
                Some(p) => Self::name(p),
                None => vote.voter.as_str().to_string(),
            };
            let target = match &vote.accusation {
                Accusation::Accused(id) => match result.roster.get(id) {
                    Some(p) => Self::name(p),
                    None => id.as_str().to_string(),
                },
                Accusation::Abstain => "(abstain)".dimmed().to_string(),
            };
            output.push_str(&format!(
                "  {} -> {}  {}\n",
                voter,
                target,
                format!("\"{}\"", vote.justification).dimmed()
            ));
        }

        output.push_str(&Self::section_header("Tally"));
        for (id, count) in &result.vote_counts {
            output.push_str(&format!(
                "  {:<8} {}\n",
                result.roster.name_of(id),
                "#".repeat(*count)
            ));
        }

        output.push('\n');
        output.push_str(&Self::verdict(result));
        output.push_str(&Self::scoreboard(result));
        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(result: &SessionResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Verdict, reveal and scoreboard (concise output)
    pub fn format_summary(result: &SessionResult) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "{}\n\n",
            "=== Turing Traitor Verdict ===".cyan().bold()
        ));
        output.push_str(&Self::verdict(result));
        output.push_str(&Self::scoreboard(result));
        output
    }

    fn verdict(result: &SessionResult) -> String {
        let mut output = String::new();

        let banner = match result.winning_side {
            Side::Ordinary => "DETECTIVES WIN".green().bold(),
            Side::Weak => "TRAITOR WINS".red().bold(),
        };
        output.push_str(&format!("{}  {}\n\n", banner, result.reason));

        let eliminated = result.eliminated_name().unwrap_or("nobody");
        output.push_str(&format!(
            "{} {}\n",
            "Eliminated:".cyan().bold(),
            eliminated
        ));
        output.push_str(&format!(
            "{} {} ({})\n",
            "The Traitor was:".cyan().bold(),
            result.weak_name().red().bold(),
            result.weak_model
        ));

        output
    }

    fn scoreboard(result: &SessionResult) -> String {
        let mut output = format!("\n{}\n", "Scores:".cyan().bold());
        let mut rows: Vec<&Participant> = result.roster.iter().collect();
        // highest score first, seat order among equals
        rows.sort_by_key(|p| std::cmp::Reverse(result.score_of(&p.id)));
        for p in rows {
            output.push_str(&format!(
                "  {:>4}  {} ({})\n",
                result.score_of(&p.id),
                Self::name(p),
                p.model
            ));
        }
        output
    }

    fn name(p: &Participant) -> String {
        p.name.color(participant_color(p.slot)).bold().to_string()
    }

    fn role(role: Role) -> String {
        match role {
            Role::Ordinary => role_label(role).normal().to_string(),
            Role::Weak => role_label(role).red().bold().to_string(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_full(&self, result: &SessionResult) -> String {
        Self::format(result)
    }

    fn format_summary(&self, result: &SessionResult) -> String {
        Self::format_summary(result)
    }

    fn format_json(&self, result: &SessionResult) -> String {
        Self::format_json(result)
    }
}
