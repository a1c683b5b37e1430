//! Canned-response chat assistant
//!
//! A deterministic helper widget: the user types or dictates a question and
//! gets an acknowledgement, optionally followed by a platform tip when a
//! known keyword appears. No language model, no network. Voice input only
//! produces a transcript; sending is always an explicit action.

mod responder;

pub use responder::{respond, ACKNOWLEDGEMENTS, GREETING, TIPS};

use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            sender,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    Idle,
    Composing,
    Sending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Idle,
    Listening,
}

/// The chat widget state machine.
///
/// Starts with the assistant greeting already in the transcript. Responses
/// are computed synchronously, so `send` passes through `Sending` and lands
/// back in `Idle` within one call.
pub struct ChatWidget {
    state: ChatState,
    voice: VoiceState,
    voice_supported: bool,
    transcript: Vec<ChatMessage>,
    sent_count: usize,
}

impl ChatWidget {
    pub fn new(voice_supported: bool) -> Self {
        Self {
            state: ChatState::Idle,
            voice: VoiceState::Idle,
            voice_supported,
            transcript: vec![ChatMessage::new(GREETING, Sender::Assistant)],
            sent_count: 0,
        }
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    pub fn voice_state(&self) -> VoiceState {
        self.voice
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn begin_composing(&mut self) {
        if self.state == ChatState::Idle {
            self.state = ChatState::Composing;
        }
    }

    /// Send a message and append the assistant's reply.
    /// Whitespace-only input sends nothing and returns None.
    pub fn send(&mut self, input: &str) -> Option<&ChatMessage> {
        let text = input.trim();
        if text.is_empty() {
            self.state = ChatState::Idle;
            return None;
        }

        self.state = ChatState::Sending;
        self.transcript.push(ChatMessage::new(text, Sender::User));

        let reply = respond(text, self.sent_count);
        self.sent_count += 1;
        self.transcript
            .push(ChatMessage::new(reply, Sender::Assistant));

        self.state = ChatState::Idle;
        self.transcript.last()
    }

    /// Returns false when voice input is unavailable on this device
    pub fn start_listening(&mut self) -> bool {
        if !self.voice_supported {
            return false;
        }
        self.voice = VoiceState::Listening;
        true
    }

    /// Stop dictation and return the captured text for the compose box.
    /// The transcript is untouched until the user sends.
    pub fn stop_listening(&mut self, captured: &str) -> String {
        self.voice = VoiceState::Idle;
        captured.to_string()
    }
}
