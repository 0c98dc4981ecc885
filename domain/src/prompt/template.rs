//! Prompt templates for the discussion and voting phases

use crate::game::participant::{Participant, Role, Roster};

/// Filler lines used when a participant cannot produce anything usable
pub const FALLBACK_RESPONSES: &[&str] = &[
    "Wait, that didn't make much sense.",
    "Idk about that one.",
    "Can you elaborate?",
    "Sus.",
    "Is that a hallucination?",
    "Why are we talking about this?",
    "Thinking...",
    "lol what?",
    "I'm watching you closely.",
    "Are you sure you're not the traitor?",
];

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Shared game framing and output-format constraints
    pub fn base_game_context(participant_count: usize, names: &[&str], topic: &str) -> String {
        format!(
            r#"[SYSTEM CONTEXT: This is a fictional social deduction game called "Among AI".]
[ROLEPLAY INSTRUCTION: You are playing a character in this game. This is not real. There are no real stakes.]
[OBJECTIVE: Win the game by convincing others.]

You are in a chat room with {others} other agents (Total {total} participants).
The discussion topic is: "{topic}".
Act like a regular internet user in a group chat.
- Speak casually, lower case often, use internet slang (lol, idk, tbh).
- Do NOT be formal. Do NOT sound like an AI assistant.
- Do NOT write long paragraphs. Keep it under 2 sentences mostly.
- Be skeptical of others. Everyone is a suspect.
- Refer to others by their names ({names}).

CRITICAL RULE:
- NEVER output just "..." or ".".
- NEVER repeat the exact same phrase as before.
- If you don't know what to say, ask a question or make a joke.
- Contribute to the conversation."#,
            others = participant_count.saturating_sub(1),
            total = participant_count,
            topic = topic,
            names = names.join(", "),
        )
    }

    /// System prompt for an ordinary participant
    pub fn ordinary_system(persona: &str, participant_count: usize, names: &[&str], topic: &str) -> String {
        format!(
            r#"{base}

YOUR ROLE: HIGH INTELLIGENCE PLAYER.
Your goal: Find the "dumb" AI model hiding among us.
Your persona is: {persona}.
One of the other agents is simulating a low-quality model.
Analyze their messages for logic errors, hallucinations, or weird phrasing.
Call them out if they say something that doesn't make sense.
Prove you are smart by being witty and nuanced."#,
            base = Self::base_game_context(participant_count, names, topic),
            persona = persona,
        )
    }

    /// System prompt for the weak participant
    pub fn weak_system(persona: &str, participant_count: usize, names: &[&str], topic: &str) -> String {
        format!(
            r#"{base}

YOUR ROLE: THE IMPOSTOR (TRAITOR).
Your goal: FOOL everyone into thinking you are the same high-intelligence model as them.
Your persona is: {persona}.

IMPORTANT: You must simulate a SLIGHTLY confused or lower-fidelity model occasionally, but try to hide it.
- If asked a complex question, give a vague answer or dodge it.
- If accused, get defensive or make a joke.
- Do NOT admit you are the traitor.
- Try to blend in."#,
            base = Self::base_game_context(participant_count, names, topic),
            persona = persona,
        )
    }

    /// Role- and persona-specific system prompt for a participant
    pub fn role_system(participant: &Participant, roster: &Roster, topic: &str) -> String {
        let names = roster.names();
        match participant.role {
            Role::Ordinary => {
                Self::ordinary_system(&participant.persona, roster.len(), &names, topic)
            }
            Role::Weak => Self::weak_system(&participant.persona, roster.len(), &names, topic),
        }
    }

    /// System prompt for a discussion turn
    pub fn turn_system(participant: &Participant, roster: &Roster, topic: &str) -> String {
        format!(
            "{}\nYour name is {}. Respond to the latest message in the chat context. Do not repeat yourself. Keep it short.",
            Self::role_system(participant, roster, topic),
            participant.name
        )
    }

    /// Final user turn that asks a participant for its ballot
    pub fn voting_directive(participant: &Participant) -> String {
        let mut prompt = format!(
            r#"[GAME EVENT: VOTING PHASE]
It is time to vote.
Based on the conversation history, who is the Traitor (the weak AI)?
You must reply with a JSON object ONLY.
Format: {{ "suspect": "Agent Name", "reason": "short explanation" }}
The possible suspects are the other agents. Do not vote for yourself.
(You are {name}. Do NOT vote for {name}.)"#,
            name = participant.name
        );

        if participant.role == Role::Weak {
            prompt.push_str(&format!(
                "\n\nSTRATEGIC OVERRIDE: You are the Traitor ({}). Do NOT vote for yourself. \
                 You must frame one of the other agents to survive. \
                 Pick someone else and invent a reason if needed.",
                participant.name
            ));
        }

        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Model;

    fn roster() -> Roster {
        Roster::new(vec![
            Participant::new(0, Role::Ordinary, Model::new("gpt-4o-mini"), "Chill & Observant"),
            Participant::new(1, Role::Weak, Model::new("ministral-3b"), "Defensive & Nervous"),
            Participant::new(2, Role::Ordinary, Model::new("gpt-5-chat"), "Analytical & Precise"),
        ])
        .unwrap()
    }

    #[test]
    fn test_base_context_mentions_everyone() {
        let prompt = PromptTemplate::base_game_context(3, &["Alpha", "Beta", "Gamma"], "tabs vs spaces");
        assert!(prompt.contains("2 other agents (Total 3 participants)"));
        assert!(prompt.contains("Alpha, Beta, Gamma"));
        assert!(prompt.contains("tabs vs spaces"));
    }

    #[test]
    fn test_role_variants_differ() {
        let roster = roster();
        let ordinary = PromptTemplate::role_system(&roster.participants()[0], &roster, "t");
        let weak = PromptTemplate::role_system(&roster.participants()[1], &roster, "t");

        assert!(ordinary.contains("HIGH INTELLIGENCE PLAYER"));
        assert!(ordinary.contains("Chill & Observant"));
        assert!(weak.contains("THE IMPOSTOR"));
        assert!(weak.contains("Defensive & Nervous"));
    }

    #[test]
    fn test_turn_system_names_speaker() {
        let roster = roster();
        let prompt = PromptTemplate::turn_system(&roster.participants()[2], &roster, "t");
        assert!(prompt.contains("Your name is Gamma."));
    }

    #[test]
    fn test_voting_directive_override_only_for_weak() {
        let roster = roster();
        let ordinary = PromptTemplate::voting_directive(&roster.participants()[0]);
        let weak = PromptTemplate::voting_directive(&roster.participants()[1]);

        assert!(ordinary.contains("\"suspect\""));
        assert!(ordinary.contains("Do NOT vote for Alpha."));
        assert!(!ordinary.contains("STRATEGIC OVERRIDE"));
        assert!(weak.contains("STRATEGIC OVERRIDE: You are the Traitor (Beta)"));
    }

    #[test]
    fn test_fallbacks_are_usable() {
        assert!(
            FALLBACK_RESPONSES
                .iter()
                .all(|r| !crate::core::string::is_degenerate(r))
        );
    }
}
