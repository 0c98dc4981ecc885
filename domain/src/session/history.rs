//! Per-participant framing of the shared log
//!
//! Every completion call is stateless, so the whole transcript is replayed on
//! each turn, re-framed from the caller's point of view:
//!
//! | Author | Chat role | Content |
//! |--------|-----------|---------|
//! | narrator | user | `GAME MASTER: <text>` |
//! | the target itself | assistant | `<text>` |
//! | another participant | user | `<Name>: <text>` |

use super::entities::ChatMessage;
use crate::game::participant::{Participant, Roster};
use crate::game::transcript::{Author, Utterance};

/// Prefix for narrator lines
pub const NARRATOR_PREFIX: &str = "GAME MASTER";

/// Stand-in history for an empty log
pub const CONVERSATION_STARTER: &str = "Start the conversation.";

/// Build the message sequence `target` sees for a single completion call.
pub fn build_history(
    target: &Participant,
    roster: &Roster,
    utterances: &[Utterance],
) -> Vec<ChatMessage> {
    if utterances.is_empty() {
        return vec![ChatMessage::user(CONVERSATION_STARTER)];
    }

    utterances
        .iter()
        .map(|utterance| match &utterance.author {
            Author::Narrator => {
                ChatMessage::user(format!("{}: {}", NARRATOR_PREFIX, utterance.text))
            }
            Author::Participant(id) if *id == target.id => {
                ChatMessage::assistant(utterance.text.clone())
            }
            Author::Participant(id) => {
                ChatMessage::user(format!("{}: {}", roster.name_of(id), utterance.text))
            }
        })
        .collect()
}
