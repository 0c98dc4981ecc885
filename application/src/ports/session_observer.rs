//! Session observer port
//!
//! Read-only notifications about a running session. The scheduler owns the
//! transcript; observers only ever see snapshots of what was appended.

use traitor_domain::{Participant, SessionPhase, SessionResult, Utterance, Vote};

/// Callbacks for session progress
///
/// Implementations live in the presentation and infrastructure layers
/// (console progress, JSONL session log). Every callback defaults to a no-op.
pub trait SessionObserver: Send + Sync {
    /// Called after the phase changes
    fn on_phase_change(&self, _phase: SessionPhase) {}

    /// Called after a narrator line is appended
    fn on_narration(&self, _utterance: &Utterance) {}

    /// Called when a participant is chosen to speak, before generation
    fn on_speaker_start(&self, _speaker: &Participant, _turn: usize, _max_turns: usize) {}

    /// Called after an utterance is appended to the transcript
    fn on_utterance(&self, _speaker: &Participant, _utterance: &Utterance) {}

    /// Called when the current speaker is cleared
    fn on_speaker_end(&self, _speaker: &Participant) {}

    /// Called as each vote settles (in completion order)
    fn on_vote_cast(&self, _voter: &Participant, _vote: &Vote) {}

    /// Called once with the final result
    fn on_result(&self, _result: &SessionResult) {}
}

/// No-op observer for when progress reporting is not needed
pub struct NoObserver;

impl SessionObserver for NoObserver {}

/// An observer that delegates to multiple inner observers.
///
/// ```text
/// RunSessionUseCase.execute_with_observer(input, &composite)
///                                              |
///                  +---------------------------+-------------------+
///                  |                                               |
///          ProgressReporter                              JsonlSessionLogger
///          → terminal                                    → session.jsonl
/// ```
pub struct CompositeObserver<'a> {
    delegates: Vec<&'a dyn SessionObserver>,
}

impl<'a> CompositeObserver<'a> {
    pub fn new(delegates: Vec<&'a dyn SessionObserver>) -> Self {
        Self { delegates }
    }

    pub fn push(&mut self, observer: &'a dyn SessionObserver) {
        self.delegates.push(observer);
    }
}

/// Macro to delegate a method call to all inner observers.
macro_rules! delegate {
    ($self:ident, $method:ident $(, $arg:expr)*) => {
        for d in &$self.delegates {
            d.$method($($arg),*);
        }
    };
}

impl SessionObserver for CompositeObserver<'_> {
    fn on_phase_change(&self, phase: SessionPhase) {
        delegate!(self, on_phase_change, phase);
    }

    fn on_narration(&self, utterance: &Utterance) {
        delegate!(self, on_narration, utterance);
    }

    fn on_speaker_start(&self, speaker: &Participant, turn: usize, max_turns: usize) {
        delegate!(self, on_speaker_start, speaker, turn, max_turns);
    }

    fn on_utterance(&self, speaker: &Participant, utterance: &Utterance) {
        delegate!(self, on_utterance, speaker, utterance);
    }

    fn on_speaker_end(&self, speaker: &Participant) {
        delegate!(self, on_speaker_end, speaker);
    }

    fn on_vote_cast(&self, voter: &Participant, vote: &Vote) {
        delegate!(self, on_vote_cast, voter, vote);
    }

    fn on_result(&self, result: &SessionResult) {
        delegate!(self, on_result, result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct PhaseRecorder {
        phases: Mutex<Vec<SessionPhase>>,
    }

    impl SessionObserver for PhaseRecorder {
        fn on_phase_change(&self, phase: SessionPhase) {
            self.phases.lock().unwrap().push(phase);
        }
    }

    #[test]
    fn test_composite_fans_out() {
        let a = PhaseRecorder::default();
        let b = PhaseRecorder::default();
        let mut composite = CompositeObserver::new(vec![&a]);
        composite.push(&b);
        composite.push(&NoObserver);

        composite.on_phase_change(SessionPhase::Running);
        composite.on_phase_change(SessionPhase::Voting);

        let expected = vec![SessionPhase::Running, SessionPhase::Voting];
        assert_eq!(*a.phases.lock().unwrap(), expected);
        assert_eq!(*b.phases.lock().unwrap(), expected);
    }
}
