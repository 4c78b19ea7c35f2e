//! Chat controller
//!
//! On submit: render the user's message, clear the input, show the
//! placeholder, post `{message, use_rag}`, then remove the placeholder and
//! render exactly one assistant entry. A blank message is ignored before any
//! rendering or network activity.

use crate::api::{ApiError, ChatRequest, TutorApi};
use crate::markup;
use tracing::{debug, warn};

/// Assistant text shown when the request fails or the reply is malformed
pub const CHAT_FAILURE_MESSAGE: &str = "Sorry, there was an error processing your request.";

/// Element id of the loading placeholder
pub const LOADING_ENTRY_ID: &str = "loading-message";

/// The role of a transcript entry's author
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    /// Speaker label shown in front of the entry text
    pub fn label(&self) -> &'static str {
        match self {
            ChatRole::User => "You:",
            ChatRole::Assistant => "AI Music Teacher:",
        }
    }

    /// CSS classes of the entry container
    pub fn css_class(&self) -> &'static str {
        match self {
            ChatRole::User => "chat-message user-message",
            ChatRole::Assistant => "chat-message assistant-message",
        }
    }
}

/// One turn in the chat transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub role: ChatRole,
    pub content: String,
}

impl TranscriptEntry {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }

    /// Inner markup for the entry container
    pub fn markup(&self) -> String {
        markup::chat_entry(self.role.label(), &self.content)
    }
}

/// DOM nodes the chat controller reads and mutates
///
/// Implementations use interior mutability; every method runs on the page's
/// single UI thread.
pub trait ChatSurface {
    /// Current raw value of the message input
    fn message(&self) -> String;

    fn clear_message(&self);

    /// State of the RAG toggle, or `None` when the page has no toggle
    fn rag_toggle(&self) -> Option<bool>;

    /// Append an entry to the end of the transcript
    fn append_entry(&self, entry: &TranscriptEntry);

    /// Append the loading placeholder unless one is already present
    fn show_loading(&self);

    /// Remove the loading placeholder if present
    fn remove_loading(&self);

    /// Scroll the transcript to its last entry
    fn scroll_to_end(&self);
}

/// How a chat submission settled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    /// Blank message; nothing rendered or sent
    Ignored,
    /// Backend reply rendered
    Replied,
    /// Backend `error` field rendered as `Error: ...`
    ServerError(String),
    /// Transport or parse failure; generic message rendered
    Failed(String),
}

/// Chat controller bound to one transcript
pub struct ChatController<S, A> {
    surface: S,
    api: A,
}

impl<S: ChatSurface, A: TutorApi> ChatController<S, A> {
    pub fn new(surface: S, api: A) -> Self {
        Self { surface, api }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Handle one form submission
    pub async fn submit(&self) -> ChatOutcome {
        let message = self.surface.message().trim().to_string();
        if message.is_empty() {
            debug!("Empty message, not submitting");
            return ChatOutcome::Ignored;
        }

        self.render(&TranscriptEntry::user(message.as_str()));
        self.surface.clear_message();
        self.surface.show_loading();

        let request = ChatRequest {
            message,
            use_rag: self.surface.rag_toggle().unwrap_or(true),
        };
        let result = self.api.chat(&request).await;

        self.surface.remove_loading();
        match result {
            Ok(reply) => {
                self.render(&TranscriptEntry::assistant(reply));
                ChatOutcome::Replied
            }
            Err(ApiError::Server(error)) => {
                self.render(&TranscriptEntry::assistant(format!("Error: {error}")));
                ChatOutcome::ServerError(error)
            }
            Err(e) => {
                warn!("Chat request failed: {}", e);
                self.render(&TranscriptEntry::assistant(CHAT_FAILURE_MESSAGE));
                ChatOutcome::Failed(e.to_string())
            }
        }
    }

    fn render(&self, entry: &TranscriptEntry) {
        self.surface.append_entry(entry);
        self.surface.scroll_to_end();
    }
}
