//! Chat widget: open/closed toggle, draft, and an in-memory transcript.

use tracing::debug;

/// Shown in place of a reply whenever the relay fails, whatever the cause.
pub const FALLBACK_REPLY: &str = "Sorry, I'm having trouble connecting right now.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub role: Role,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessagePhase {
    Composing,
    Sending,
}

#[derive(Debug, Clone)]
pub struct ChatWidget {
    open: bool,
    draft: String,
    phase: MessagePhase,
    transcript: Vec<TranscriptEntry>,
}

impl Default for ChatWidget {
    fn default() -> Self {
        Self {
            open: false,
            draft: String::new(),
            phase: MessagePhase::Composing,
            transcript: Vec::new(),
        }
    }
}

impl ChatWidget {
    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn phase(&self) -> MessagePhase {
        self.phase
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// Moves the draft into the transcript and returns the text to relay.
    ///
    /// Returns `None`, leaving everything untouched, for a blank draft or while
    /// a previous message is still in flight.
    pub fn submit(&mut self) -> Option<String> {
        if self.phase == MessagePhase::Sending || self.draft.trim().is_empty() {
            return None;
        }
        let text = std::mem::take(&mut self.draft);
        self.transcript.push(TranscriptEntry {
            role: Role::User,
            text: text.clone(),
        });
        self.phase = MessagePhase::Sending;
        Some(text)
    }

    /// Appends the assistant's answer, or the fallback on any error.
    pub fn receive<E: std::fmt::Display>(&mut self, outcome: Result<String, E>) {
        if self.phase != MessagePhase::Sending {
            debug!("reply received with no message in flight; ignored");
            return;
        }
        let text = match outcome {
            Ok(reply) => reply,
            Err(e) => {
                debug!(error = %e, "relay failed; showing fallback");
                FALLBACK_REPLY.to_string()
            }
        };
        self.transcript.push(TranscriptEntry {
            role: Role::Assistant,
            text,
        });
        self.phase = MessagePhase::Composing;
    }
}
