//! Typed model of one input line.
//!
//! A line is either a chat record with a `messages` array or a flat
//! `prompt`/`completion` pair. Every field is optional; the defaults are
//! applied when the record is reduced to [`RoleContents`](crate::core::RoleContents):
//!
//! | Field | Missing or `null` |
//! |-------|-------------------|
//! | `messages` | record is read as the flat shape |
//! | `role` (or not a string) | message matches no role and is ignored |
//! | `content` | empty string |
//! | `prompt` / `completion` | empty string |
//!
//! Unknown keys (`name`, `weight`, `tool_calls`, ...) are ignored.
//!
//! # Example
//!
//! ```
//! use jsonl2csv::message::{Record, Role};
//!
//! let record: Record = serde_json::from_str(
//!     r#"{"messages": [{"role": "user", "content": "Hello!"}]}"#,
//! )?;
//!
//! let messages = record.messages.as_deref().unwrap_or_default();
//! assert_eq!(messages[0].role(), Some(Role::User));
//! assert_eq!(messages[0].text(), "Hello!");
//! # Ok::<(), serde_json::Error>(())
//! ```

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Speaker tags the transformer tracks.
///
/// Any other tag (`tool`, `function`, `developer`, ...) is not a `Role`
/// and its messages are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions that frame the conversation.
    System,
    /// The human turn.
    User,
    /// The model turn, exported as the completion.
    Assistant,
}

impl Role {
    /// Matches an exact lowercase role tag.
    ///
    /// ```
    /// use jsonl2csv::message::Role;
    ///
    /// assert_eq!(Role::parse("assistant"), Some(Role::Assistant));
    /// assert_eq!(Role::parse("tool"), None);
    /// assert_eq!(Role::parse("User"), None);
    /// ```
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "system" => Some(Role::System),
            "user" => Some(Role::User),
            "assistant" => Some(Role::Assistant),
            _ => None,
        }
    }

    /// Returns the wire tag for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    /// Returns all tracked roles, in three-column order.
    pub fn all() -> &'static [Role] {
        &[Role::System, Role::User, Role::Assistant]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which of the two input shapes a record has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordShape {
    /// `{"messages": [...]}`
    #[default]
    Chat,
    /// `{"prompt": "...", "completion": "..."}`
    Flat,
}

/// One JSON line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Chat messages in conversation order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<ChatMessage>>,

    /// Flat-shape prompt, read only when `messages` is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,

    /// Flat-shape completion, read only when `messages` is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion: Option<String>,
}

impl Record {
    /// Creates a chat-shape record.
    pub fn chat(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages: Some(messages),
            ..Self::default()
        }
    }

    /// Creates a flat-shape record.
    pub fn flat(prompt: impl Into<String>, completion: impl Into<String>) -> Self {
        Self {
            messages: None,
            prompt: Some(prompt.into()),
            completion: Some(completion.into()),
        }
    }

    /// Returns the shape this record will be read as.
    pub fn shape(&self) -> RecordShape {
        if self.messages.is_some() {
            RecordShape::Chat
        } else {
            RecordShape::Flat
        }
    }

    /// Flat-shape prompt, empty if absent.
    pub fn prompt_or_default(&self) -> &str {
        self.prompt.as_deref().unwrap_or_default()
    }

    /// Flat-shape completion, empty if absent.
    pub fn completion_or_default(&self) -> &str {
        self.completion.as_deref().unwrap_or_default()
    }
}

/// One entry of a `messages` array.
///
/// Reading a message never fails on an entry the transformer ignores: a
/// `role` that is not a string, or an entry that is not an object, leaves
/// `role` unset. `content` must be a string or a parts array only when the
/// role is tracked; otherwise an unreadable body is dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct ChatMessage {
    /// Raw role tag as written in the input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Message body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<MessageContent>,
}

impl ChatMessage {
    /// Creates a message with a role tag and plain-text content.
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Some(role.into()),
            content: Some(MessageContent::Text(content.into())),
        }
    }

    /// Returns the tracked role, or `None` for a missing or unknown tag.
    pub fn role(&self) -> Option<Role> {
        self.role.as_deref().and_then(Role::parse)
    }

    /// Returns the message text, empty if `content` is missing.
    pub fn text(&self) -> Cow<'_, str> {
        match &self.content {
            Some(content) => content.to_text(),
            None => Cow::Borrowed(""),
        }
    }
}

impl TryFrom<Value> for ChatMessage {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(mut fields) = value else {
            return Ok(Self::default());
        };

        let role = match fields.remove("role") {
            Some(Value::String(tag)) => Some(tag),
            _ => None,
        };
        let tracked = role.as_deref().and_then(Role::parse).is_some();

        let content = match fields.remove("content") {
            None | Some(Value::Null) => None,
            Some(body) if tracked => Some(MessageContent::deserialize(body)?),
            Some(body) => MessageContent::deserialize(body).ok(),
        };

        Ok(Self { role, content })
    }
}

/// Message body: a string, or an array of typed content parts.
///
/// ```json
/// "content": "Hello"
/// "content": [{"type": "text", "text": "Hello"}, {"type": "image_url", "image_url": {...}}]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Plain string content.
    Text(String),
    /// Multi-part content.
    Parts(Vec<ContentPart>),
}

impl MessageContent {
    /// Reduces the content to text.
    ///
    /// Parts are joined with `\n`; parts without a `text` field (images,
    /// audio) contribute nothing.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            MessageContent::Text(text) => Cow::Borrowed(text),
            MessageContent::Parts(parts) => {
                let texts: Vec<&str> = parts.iter().filter_map(|p| p.text.as_deref()).collect();
                match texts.as_slice() {
                    [] => Cow::Borrowed(""),
                    [single] => Cow::Borrowed(*single),
                    _ => Cow::Owned(texts.join("\n")),
                }
            }
        }
    }
}

/// One element of a multi-part `content` array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentPart {
    /// Part type (`text`, `image_url`, ...).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Text of a `text` part.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}
