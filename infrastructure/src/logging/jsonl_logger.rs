//! JSONL file writer for session events.
//!
//! Each observed event is serialized as a single JSON line with a `type`
//! field and `timestamp`, appended to the file via a buffered writer.

use serde_json::{Value, json};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;
use traitor_application::SessionObserver;
use traitor_domain::{Participant, SessionPhase, SessionResult, Utterance, Vote};

/// JSONL session logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlSessionLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlSessionLogger {
    /// Create a new logger writing to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be created.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create session log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match File::create(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not create session log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn log(&self, event_type: &str, payload: Value) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let record = match payload {
            Value::Object(mut map) => {
                map.insert("type".to_string(), Value::String(event_type.to_string()));
                map.insert("timestamp".to_string(), Value::String(timestamp));
                Value::Object(map)
            }
            other => json!({
                "type": event_type,
                "timestamp": timestamp,
                "data": other,
            }),
        };

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            // flush per line so a killed session still leaves a readable log
            let _ = writer.flush();
        }
    }
}

impl SessionObserver for JsonlSessionLogger {
    fn on_phase_change(&self, phase: SessionPhase) {
        self.log("phase_change", json!({ "phase": phase.as_str() }));
    }

    fn on_narration(&self, utterance: &Utterance) {
        self.log(
            "narration",
            json!({
                "sequence": utterance.sequence,
                "text": utterance.text,
            }),
        );
    }

    fn on_utterance(&self, speaker: &Participant, utterance: &Utterance) {
        self.log(
            "utterance",
            json!({
                "sequence": utterance.sequence,
                "participant_id": speaker.id,
                "name": speaker.name,
                "model": speaker.model,
                "text": utterance.text,
            }),
        );
    }

    fn on_vote_cast(&self, voter: &Participant, vote: &Vote) {
        self.log(
            "vote",
            json!({
                "voter_id": voter.id,
                "voter_name": voter.name,
                "accused_id": vote.accused(),
                "justification": vote.justification,
            }),
        );
    }

    fn on_result(&self, result: &SessionResult) {
        let vote_counts: serde_json::Map<String, Value> = result
            .vote_counts
            .iter()
            .map(|(id, count)| (id.as_str().to_string(), json!(count)))
            .collect();

        self.log(
            "result",
            json!({
                "winning_side": result.winning_side,
                "weak_participant_id": result.weak_participant_id,
                "weak_model": result.weak_model,
                "eliminated_id": result.eliminated_id,
                "vote_counts": vote_counts,
                "scores": result.scores,
                "reason": result.reason,
                "turns": result.transcript.participant_turns(),
            }),
        );
    }
}

impl Drop for JsonlSessionLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
