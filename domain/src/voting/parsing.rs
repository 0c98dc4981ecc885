//! Ballot parsing for the voting phase.
//!
//! Models are asked for `{ "suspect": "...", "reason": "..." }` but often wrap
//! it in prose or markdown. Strategies are tried in order until one yields an
//! object:
//!
//! | Order | Strategy | Input |
//! |-------|----------|-------|
//! | 1 | [`ParseStrategy::Direct`] | The whole response |
//! | 2 | [`ParseStrategy::FencedBlock`] | Contents of the first ```` ``` ```` block |
//! | 3 | [`ParseStrategy::BraceSpan`] | First `{` through last `}` |
//! | 4 | [`ParseStrategy::Fallback`] | Synthesized ballot naming no one |
//!
//! The parsed suspect is then resolved against the roster and self-votes
//! are redirected. Apart from the redirect's random pick, everything here is
//! pure text handling.

use super::vote::{GUT_FEELING, SELF_VOTE_REDIRECT_PREFIX, Vote};
use crate::game::participant::{Participant, Roster};
use rand::Rng;
use rand::seq::IteratorRandom;
use serde::Deserialize;

/// Suspect name placed in a synthesized ballot
pub const UNKNOWN_SUSPECT: &str = "Unknown";
/// Reason placed in a synthesized ballot
pub const PARSE_FAILURE_REASON: &str = "Vote processing error";

/// The structured object a voter is asked to return
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Ballot {
    #[serde(default, alias = "accused", alias = "name")]
    pub suspect: Option<String>,
    #[serde(default, alias = "justification", alias = "reasoning")]
    pub reason: Option<String>,
}

impl Ballot {
    fn fallback() -> Self {
        Self {
            suspect: Some(UNKNOWN_SUSPECT.to_string()),
            reason: Some(PARSE_FAILURE_REASON.to_string()),
        }
    }
}

/// Which step of the chain produced the ballot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStrategy {
    Direct,
    FencedBlock,
    BraceSpan,
    Fallback,
}

/// Parse free-form voter output into a [`Ballot`], never failing.
pub fn parse_ballot(response: &str) -> (Ballot, ParseStrategy) {
    if let Some(ballot) = parse_object(response) {
        return (ballot, ParseStrategy::Direct);
    }
    if let Some(ballot) = extract_fenced_block(response).and_then(parse_object) {
        return (ballot, ParseStrategy::FencedBlock);
    }
    if let Some(ballot) = extract_brace_span(response).and_then(parse_object) {
        return (ballot, ParseStrategy::BraceSpan);
    }
    (Ballot::fallback(), ParseStrategy::Fallback)
}

fn parse_object(candidate: &str) -> Option<Ballot> {
    serde_json::from_str::<Ballot>(candidate.trim()).ok()
}

/// Body of the first fenced code block, without an optional `json` tag
fn extract_fenced_block(text: &str) -> Option<&str> {
    let start = text.find("```")? + 3;
    let rest = &text[start..];
    let end = rest.find("```")?;
    let body = &rest[..end];
    let body = body
        .strip_prefix("json")
        .or_else(|| body.strip_prefix("JSON"))
        .unwrap_or(body);
    Some(body.trim())
}

fn extract_brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Match a suspect name against display names, case-insensitively.
///
/// Exact matches win; otherwise the longest display name contained in the
/// suspect text; otherwise a display name that contains the suspect text.
/// Roster order breaks any remaining tie.
pub fn resolve_suspect<'a>(suspect: &str, roster: &'a Roster) -> Option<&'a Participant> {
    let wanted = suspect.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }

    if let Some(p) = roster.iter().find(|p| p.name.to_lowercase() == wanted) {
        return Some(p);
    }

    let mut contained: Option<&Participant> = None;
    for p in roster.iter() {
        if wanted.contains(&p.name.to_lowercase())
            && contained.is_none_or(|best| p.name.len() > best.name.len())
        {
            contained = Some(p);
        }
    }
    if contained.is_some() {
        return contained;
    }

    roster
        .iter()
        .find(|p| p.name.to_lowercase().contains(&wanted))
}

/// A vote interpreted from raw output, plus how it got there
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BallotOutcome {
    pub vote: Vote,
    pub strategy: ParseStrategy,
    /// The ballot named the voter and was moved to someone else
    pub redirected: bool,
}

/// Turn a voter's raw response into a [`Vote`].
///
/// Unresolvable suspects become abstentions. A ballot naming the voter is
/// redirected to a random other participant, or abstains if nobody else
/// is seated.
pub fn interpret_ballot<R: Rng + ?Sized>(
    voter: &Participant,
    roster: &Roster,
    response: &str,
    rng: &mut R,
) -> BallotOutcome {
    let (ballot, strategy) = parse_ballot(response);
    let reason = ballot
        .reason
        .filter(|r| !r.trim().is_empty())
        .unwrap_or_else(|| GUT_FEELING.to_string());

    let resolved = ballot
        .suspect
        .as_deref()
        .and_then(|name| resolve_suspect(name, roster));

    let (vote, redirected) = match resolved {
        Some(accused) if accused.id == voter.id => {
            let justification = format!("{}{}", SELF_VOTE_REDIRECT_PREFIX, reason);
            match roster.others(&voter.id).choose(rng) {
                Some(other) => (
                    Vote::accuse(voter.id.clone(), other.id.clone(), justification),
                    true,
                ),
                None => (Vote::abstain(voter.id.clone(), justification), true),
            }
        }
        Some(accused) => (
            Vote::accuse(voter.id.clone(), accused.id.clone(), reason),
            false,
        ),
        None => (Vote::abstain(voter.id.clone(), reason), false),
    };

    BallotOutcome {
        vote,
        strategy,
        redirected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Model;
    use crate::game::participant::{ParticipantId, Role};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn roster_of(names: usize) -> Roster {
        let participants = (0..names)
            .map(|slot| {
                let role = if slot == 1 { Role::Weak } else { Role::Ordinary };
                Participant::new(slot, role, Model::new("gpt-4o-mini"), "Chill & Observant")
            })
            .collect();
        Roster::new(participants).unwrap()
    }

    // ==================== parse_ballot Tests ====================

    #[test]
    fn test_parse_direct_json() {
        let (ballot, strategy) = parse_ballot(r#"{"suspect": "Beta", "reason": "too vague"}"#);
        assert_eq!(strategy, ParseStrategy::Direct);
        assert_eq!(ballot.suspect.as_deref(), Some("Beta"));
        assert_eq!(ballot.reason.as_deref(), Some("too vague"));
    }

    #[test]
    fn test_parse_fenced_block_with_prose() {
        let response = r#"
Okay here's my vote, after thinking hard:
```json
{"suspect": "Gamma", "reason": "kept dodging questions"}
```
Hope that settles it lol
"#;
        let (ballot, strategy) = parse_ballot(response);
        assert_eq!(strategy, ParseStrategy::FencedBlock);
        assert_eq!(ballot.suspect.as_deref(), Some("Gamma"));
        assert_eq!(ballot.reason.as_deref(), Some("kept dodging questions"));
    }

    #[test]
    fn test_parse_untagged_fence() {
        let response = "```\n{\"suspect\": \"Alpha\"}\n```";
        let (ballot, strategy) = parse_ballot(response);
        assert_eq!(strategy, ParseStrategy::FencedBlock);
        assert_eq!(ballot.suspect.as_deref(), Some("Alpha"));
        assert_eq!(ballot.reason, None);
    }

    #[test]
    fn test_parse_brace_span() {
        let response = r#"My vote: {"suspect": "Delta", "reason": "weird"} final answer."#;
        let (ballot, strategy) = parse_ballot(response);
        assert_eq!(strategy, ParseStrategy::BraceSpan);
        assert_eq!(ballot.suspect.as_deref(), Some("Delta"));
    }

    #[test]
    fn test_parse_aliases() {
        let (ballot, _) = parse_ballot(r#"{"accused": "Beta", "justification": "sus"}"#);
        assert_eq!(ballot.suspect.as_deref(), Some("Beta"));
        assert_eq!(ballot.reason.as_deref(), Some("sus"));
    }

    #[test]
    fn test_parse_fallback() {
        let (ballot, strategy) = parse_ballot("I think it's Beta, honestly.");
        assert_eq!(strategy, ParseStrategy::Fallback);
        assert_eq!(ballot.suspect.as_deref(), Some(UNKNOWN_SUSPECT));
        assert_eq!(ballot.reason.as_deref(), Some(PARSE_FAILURE_REASON));

        let (_, strategy) = parse_ballot("");
        assert_eq!(strategy, ParseStrategy::Fallback);
    }

    // ==================== resolve_suspect Tests ====================

    #[test]
    fn test_resolve_case_insensitive() {
        let roster = roster_of(3);
        assert_eq!(resolve_suspect("beta", &roster).unwrap().name, "Beta");
        assert_eq!(resolve_suspect("  GAMMA ", &roster).unwrap().name, "Gamma");
    }

    #[test]
    fn test_resolve_name_inside_text() {
        let roster = roster_of(3);
        assert_eq!(resolve_suspect("Agent Gamma", &roster).unwrap().name, "Gamma");
    }

    #[test]
    fn test_resolve_prefers_longest_contained_name() {
        let roster = roster_of(8);
        // "Theta" contains "eta" (Eta) and "Theta" itself
        assert_eq!(resolve_suspect("agent theta", &roster).unwrap().name, "Theta");
        assert_eq!(resolve_suspect("Zeta!", &roster).unwrap().name, "Zeta");
    }

    #[test]
    fn test_resolve_partial_name() {
        let roster = roster_of(3);
        assert_eq!(resolve_suspect("Gam", &roster).unwrap().name, "Gamma");
    }

    #[test]
    fn test_resolve_no_match() {
        let roster = roster_of(3);
        assert!(resolve_suspect("Unknown", &roster).is_none());
        assert!(resolve_suspect("", &roster).is_none());
        assert!(resolve_suspect("   ", &roster).is_none());
    }

    // ==================== interpret_ballot Tests ====================

    #[test]
    fn test_interpret_accusation() {
        let roster = roster_of(3);
        let voter = &roster.participants()[0];
        let mut rng = StdRng::seed_from_u64(0);
        let outcome = interpret_ballot(
            voter,
            &roster,
            r#"{"suspect": "Beta", "reason": "off vibes"}"#,
            &mut rng,
        );
        assert_eq!(outcome.vote.accused(), Some(&ParticipantId::for_slot(1)));
        assert_eq!(outcome.vote.justification, "off vibes");
        assert!(!outcome.redirected);
    }

    #[test]
    fn test_interpret_missing_reason() {
        let roster = roster_of(3);
        let mut rng = StdRng::seed_from_u64(0);
        let outcome = interpret_ballot(
            &roster.participants()[0],
            &roster,
            r#"{"suspect": "Gamma"}"#,
            &mut rng,
        );
        assert_eq!(outcome.vote.justification, GUT_FEELING);
    }

    #[test]
    fn test_interpret_unresolvable_is_abstain() {
        let roster = roster_of(3);
        let mut rng = StdRng::seed_from_u64(0);
        let outcome = interpret_ballot(&roster.participants()[0], &roster, "no idea", &mut rng);
        assert!(outcome.vote.is_abstain());
        assert_eq!(outcome.strategy, ParseStrategy::Fallback);
        assert_eq!(outcome.vote.justification, PARSE_FAILURE_REASON);
    }

    #[test]
    fn test_self_vote_is_always_redirected() {
        let roster = roster_of(4);
        let voter = &roster.participants()[2];
        for seed in 0..40 {
            let mut rng = StdRng::seed_from_u64(seed);
            let outcome = interpret_ballot(
                voter,
                &roster,
                r#"{"suspect": "Gamma", "reason": "i am sus"}"#,
                &mut rng,
            );
            assert!(outcome.redirected);
            let accused = outcome.vote.accused().expect("redirected vote accuses someone");
            assert_ne!(accused, &voter.id);
            assert!(roster.get(accused).is_some());
            assert_eq!(outcome.vote.justification, "(Redirected from self-vote) i am sus");
        }
    }

    #[test]
    fn test_self_vote_without_others_abstains() {
        let roster = Roster::new(vec![Participant::new(
            0,
            Role::Weak,
            Model::new("gpt-4o-mini"),
            "Chill & Observant",
        )])
        .unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let outcome = interpret_ballot(
            &roster.participants()[0],
            &roster,
            r#"{"suspect": "Alpha"}"#,
            &mut rng,
        );
        assert!(outcome.vote.is_abstain());
        assert!(outcome.redirected);
    }
}
