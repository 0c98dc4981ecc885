//! The shared, append-only discussion log

use super::participant::ParticipantId;
use serde::{Deserialize, Serialize};

/// Who wrote an utterance
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Author {
    /// Session framing messages (game start, phase changes)
    Narrator,
    Participant(ParticipantId),
}

impl Author {
    pub fn participant_id(&self) -> Option<&ParticipantId> {
        match self {
            Author::Narrator => None,
            Author::Participant(id) => Some(id),
        }
    }

    pub fn is_narrator(&self) -> bool {
        matches!(self, Author::Narrator)
    }
}

/// One message in the log (Entity). Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    pub id: String,
    pub author: Author,
    pub text: String,
    pub sequence: usize,
}

/// Ordered utterance log
///
/// Sequence indices start at 0 with the opening narrator line and grow by
/// one per append. There is no way to edit or remove an utterance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    utterances: Vec<Utterance>,
}

impl Transcript {
    /// Narrator line that opens every session
    pub fn opening_line(topic: &str) -> String {
        format!("Protocol Start. Subject topic: \"{}\" Discuss.", topic)
    }

    /// A transcript holding only the opening narrator line (sequence 0)
    pub fn open(topic: &str) -> Self {
        let mut transcript = Self::default();
        transcript.push(Author::Narrator, Self::opening_line(topic));
        transcript
    }

    /// Append a participant's utterance, returning the stored entry
    pub fn append(&mut self, author: ParticipantId, text: impl Into<String>) -> &Utterance {
        self.push(Author::Participant(author), text.into())
    }

    fn push(&mut self, author: Author, text: String) -> &Utterance {
        let sequence = self.utterances.len();
        let id = match &author {
            Author::Narrator => format!("narrator-{}", sequence),
            Author::Participant(pid) => format!("{}-{}", pid, sequence),
        };
        self.utterances.push(Utterance {
            id,
            author,
            text,
            sequence,
        });
        &self.utterances[sequence]
    }

    pub fn utterances(&self) -> &[Utterance] {
        &self.utterances
    }

    pub fn len(&self) -> usize {
        self.utterances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utterances.is_empty()
    }

    pub fn last(&self) -> Option<&Utterance> {
        self.utterances.last()
    }

    /// Participant who wrote the most recent utterance, if it wasn't the narrator
    pub fn last_speaker(&self) -> Option<&ParticipantId> {
        self.last().and_then(|u| u.author.participant_id())
    }

    /// Number of utterances written by participants
    pub fn participant_turns(&self) -> usize {
        self.utterances
            .iter()
            .filter(|u| !u.author.is_narrator())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_starts_at_sequence_zero() {
        let transcript = Transcript::open("pineapple on pizza");
        assert_eq!(transcript.len(), 1);
        let first = &transcript.utterances()[0];
        assert_eq!(first.sequence, 0);
        assert!(first.author.is_narrator());
        assert_eq!(
            first.text,
            "Protocol Start. Subject topic: \"pineapple on pizza\" Discuss."
        );
        assert_eq!(transcript.last_speaker(), None);
    }

    #[test]
    fn test_append_is_gapless() {
        let mut transcript = Transcript::open("t");
        transcript.append(ParticipantId::for_slot(1), "hi");
        transcript.append(ParticipantId::for_slot(0), "hey");
        transcript.append(ParticipantId::for_slot(1), "sup");

        let sequences: Vec<_> = transcript.utterances().iter().map(|u| u.sequence).collect();
        assert_eq!(sequences, vec![0, 1, 2, 3]);
        assert_eq!(transcript.participant_turns(), 3);
    }

    #[test]
    fn test_last_speaker() {
        let mut transcript = Transcript::open("t");
        let stored = transcript.append(ParticipantId::for_slot(2), "hello").clone();
        assert_eq!(stored.id, "agent-2-1");
        assert_eq!(transcript.last_speaker(), Some(&ParticipantId::for_slot(2)));
    }
}
