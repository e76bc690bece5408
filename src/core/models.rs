//! Output shapes: [`Mode`], [`RoleContents`] and [`Row`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::message::{ChatMessage, Record, RecordShape, Role};

/// Output shape selector.
///
/// ```rust
/// use jsonl2csv::core::Mode;
///
/// assert_eq!(Mode::TwoColumn.headers(), &["prompt", "completion"]);
/// assert_eq!(Mode::ThreeColumn.headers(), &["system", "user", "assistant"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// `prompt` (system and user merged), `completion`.
    #[default]
    TwoColumn,
    /// `system`, `user`, `assistant`.
    ThreeColumn,
}

impl Mode {
    /// Column names in output order.
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            Mode::TwoColumn => &["prompt", "completion"],
            Mode::ThreeColumn => &["system", "user", "assistant"],
        }
    }

    /// Number of columns in a row of this mode.
    pub fn column_count(&self) -> usize {
        self.headers().len()
    }

    /// Returns all mode names including aliases.
    pub fn all_names() -> &'static [&'static str] {
        &[
            "two-column",
            "two",
            "prompt-completion",
            "three-column",
            "three",
            "roles",
        ]
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::TwoColumn => write!(f, "two-column"),
            Mode::ThreeColumn => write!(f, "three-column"),
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "two-column" | "two" | "prompt-completion" | "2" => Ok(Mode::TwoColumn),
            "three-column" | "three" | "roles" | "3" => Ok(Mode::ThreeColumn),
            _ => Err(format!(
                "Unknown mode: '{}'. Expected one of: {}",
                s,
                Mode::all_names().join(", ")
            )),
        }
    }
}

/// The last content seen for each tracked role in one record.
///
/// Values are stored untrimmed; trimming happens when the [`Row`] is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleContents {
    /// Last `system` content.
    pub system: String,
    /// Last `user` content (flat shape: `prompt`).
    pub user: String,
    /// Last `assistant` content (flat shape: `completion`).
    pub assistant: String,
    /// Shape of the record these contents came from.
    pub shape: RecordShape,
}

impl RoleContents {
    /// Creates chat-shape contents directly.
    pub fn new(
        system: impl Into<String>,
        user: impl Into<String>,
        assistant: impl Into<String>,
    ) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            assistant: assistant.into(),
            shape: RecordShape::Chat,
        }
    }

    /// Walks `messages` in order; a later message overwrites an earlier one
    /// with the same role. Messages with a missing or unknown role are skipped.
    ///
    /// ```rust
    /// use jsonl2csv::core::RoleContents;
    /// use jsonl2csv::message::ChatMessage;
    ///
    /// let contents = RoleContents::from_messages(&[
    ///     ChatMessage::new("user", "first"),
    ///     ChatMessage::new("tool", "ignored"),
    ///     ChatMessage::new("user", "second"),
    /// ]);
    /// assert_eq!(contents.user, "second");
    /// assert_eq!(contents.system, "");
    /// ```
    pub fn from_messages(messages: &[ChatMessage]) -> Self {
        let mut contents = Self::default();

        for message in messages {
            let slot = match message.role() {
                Some(Role::System) => &mut contents.system,
                Some(Role::User) => &mut contents.user,
                Some(Role::Assistant) => &mut contents.assistant,
                None => continue,
            };
            *slot = message.text().into_owned();
        }

        contents
    }

    /// Reduces a record: chat shape through [`from_messages`](Self::from_messages),
    /// flat shape as `system = ""`, `user = prompt`, `assistant = completion`.
    pub fn from_record(record: &Record) -> Self {
        match &record.messages {
            Some(messages) => Self::from_messages(messages),
            None => Self {
                system: String::new(),
                user: record.prompt_or_default().to_string(),
                assistant: record.completion_or_default().to_string(),
                shape: RecordShape::Flat,
            },
        }
    }

    /// Returns `true` if the record has a system message with visible text.
    ///
    /// Flat records never do, whatever their prompt says.
    pub fn has_system(&self) -> bool {
        !self.system.trim().is_empty()
    }

    /// Returns the content tracked for `role`.
    pub fn get(&self, role: Role) -> &str {
        match role {
            Role::System => &self.system,
            Role::User => &self.user,
            Role::Assistant => &self.assistant,
        }
    }
}

/// One output row.
///
/// Serializes as an object keyed by the mode's column names, which is the
/// shape the JSON and JSONL writers emit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Row {
    /// Two-column row.
    TwoColumn {
        /// Labelled system + user text.
        prompt: String,
        /// Assistant text.
        completion: String,
    },
    /// Three-column row.
    ThreeColumn {
        /// System text.
        system: String,
        /// User text.
        user: String,
        /// Assistant text.
        assistant: String,
    },
}

impl Row {
    /// Builds the row for `mode`.
    ///
    /// Two-column chat records get the labelled prompt from
    /// [`prompt_template`](Self::prompt_template). Flat records are already
    /// prompt/completion pairs, so their prompt is kept as is (trimmed).
    pub fn build(contents: &RoleContents, mode: Mode) -> Self {
        match mode {
            Mode::TwoColumn => {
                let prompt = match contents.shape {
                    RecordShape::Chat => Self::prompt_template(&contents.system, &contents.user),
                    RecordShape::Flat => contents.user.trim().to_string(),
                };
                Row::TwoColumn {
                    prompt,
                    completion: contents.assistant.trim().to_string(),
                }
            }
            Mode::ThreeColumn => Row::ThreeColumn {
                system: contents.system.trim().to_string(),
                user: contents.user.trim().to_string(),
                assistant: contents.assistant.trim().to_string(),
            },
        }
    }

    /// Merges system and user content into one labelled prompt.
    ///
    /// The `System:` block is present only when `system` is non-empty.
    ///
    /// ```rust
    /// use jsonl2csv::core::Row;
    ///
    /// assert_eq!(
    ///     Row::prompt_template("You are helpful.", "Hello!"),
    ///     "System: You are helpful.\n\nUser: Hello!"
    /// );
    /// assert_eq!(Row::prompt_template("", "Hello!"), "User: Hello!");
    /// ```
    pub fn prompt_template(system: &str, user: &str) -> String {
        let mut prompt = String::with_capacity(system.len() + user.len() + 16);
        if !system.is_empty() {
            prompt.push_str("System: ");
            prompt.push_str(system);
            prompt.push_str("\n\n");
        }
        prompt.push_str("User: ");
        prompt.push_str(user);
        prompt.trim().to_string()
    }

    /// Returns the mode this row belongs to.
    pub fn mode(&self) -> Mode {
        match self {
            Row::TwoColumn { .. } => Mode::TwoColumn,
            Row::ThreeColumn { .. } => Mode::ThreeColumn,
        }
    }

    /// Column values in header order.
    pub fn values(&self) -> Vec<&str> {
        match self {
            Row::TwoColumn { prompt, completion } => vec![prompt.as_str(), completion.as_str()],
            Row::ThreeColumn {
                system,
                user,
                assistant,
            } => vec![system.as_str(), user.as_str(), assistant.as_str()],
        }
    }

    /// The completion side: `completion` or `assistant`.
    pub fn completion(&self) -> &str {
        match self {
            Row::TwoColumn { completion, .. } => completion,
            Row::ThreeColumn { assistant, .. } => assistant,
        }
    }

    /// Number of characters on the prompt side (`prompt`, or `system` + `user`).
    pub fn prompt_chars(&self) -> usize {
        match self {
            Row::TwoColumn { prompt, .. } => prompt.chars().count(),
            Row::ThreeColumn { system, user, .. } => {
                system.chars().count() + user.chars().count()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chat(messages: &[(&str, &str)]) -> RoleContents {
        let messages: Vec<ChatMessage> = messages
            .iter()
            .map(|(role, content)| ChatMessage::new(*role, *content))
            .collect();
        RoleContents::from_messages(&messages)
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("two-column".parse::<Mode>().unwrap(), Mode::TwoColumn);
        assert_eq!("prompt-completion".parse::<Mode>().unwrap(), Mode::TwoColumn);
        assert_eq!("THREE".parse::<Mode>().unwrap(), Mode::ThreeColumn);
        assert_eq!("roles".parse::<Mode>().unwrap(), Mode::ThreeColumn);
        assert!("four-column".parse::<Mode>().is_err());
    }

    #[test]
    fn test_mode_display_and_serde() {
        assert_eq!(Mode::TwoColumn.to_string(), "two-column");
        assert_eq!(
            serde_json::to_string(&Mode::ThreeColumn).unwrap(),
            "\"three-column\""
        );
        assert_eq!(Mode::default(), Mode::TwoColumn);
        assert_eq!(Mode::ThreeColumn.column_count(), 3);
    }

    #[test]
    fn test_last_role_wins() {
        let contents = chat(&[("user", "first"), ("assistant", "A"), ("user", "second")]);
        assert_eq!(contents.user, "second");
        assert_eq!(contents.assistant, "A");
    }

    #[test]
    fn test_missing_role_is_unmatched() {
        let messages = vec![
            ChatMessage {
                role: None,
                content: Some(crate::message::MessageContent::Text("lost".into())),
            },
            ChatMessage::new("user", "kept"),
        ];
        let contents = RoleContents::from_messages(&messages);
        assert_eq!(contents.user, "kept");
        assert_eq!(contents.system, "");
        assert_eq!(contents.assistant, "");
    }

    #[test]
    fn test_later_empty_content_overwrites() {
        let messages = vec![
            ChatMessage::new("assistant", "draft"),
            ChatMessage {
                role: Some("assistant".into()),
                content: None,
            },
        ];
        assert_eq!(RoleContents::from_messages(&messages).assistant, "");
    }

    #[test]
    fn test_from_record_flat() {
        let contents = RoleContents::from_record(&Record::flat("P", "C"));
        assert_eq!(contents.shape, RecordShape::Flat);
        assert_eq!(contents.get(Role::System), "");
        assert_eq!(contents.get(Role::User), "P");
        assert_eq!(contents.get(Role::Assistant), "C");
    }

    #[test]
    fn test_has_system() {
        assert!(chat(&[("system", "S"), ("user", "U")]).has_system());
        assert!(!chat(&[("system", "  \n"), ("user", "U")]).has_system());
        assert!(!chat(&[("user", "System: U")]).has_system());
        assert!(!RoleContents::from_record(&Record::flat("System: be terse", "C")).has_system());
    }

    #[test]
    fn test_two_column_with_system() {
        let contents = chat(&[("system", "You are helpful."), ("user", "Hello!"), ("assistant", "Hi!")]);
        assert_eq!(
            Row::build(&contents, Mode::TwoColumn),
            Row::TwoColumn {
                prompt: "System: You are helpful.\n\nUser: Hello!".into(),
                completion: "Hi!".into(),
            }
        );
    }

    #[test]
    fn test_two_column_without_system() {
        let contents = chat(&[("user", "Hello!"), ("assistant", "  Hi!\n")]);
        let row = Row::build(&contents, Mode::TwoColumn);
        assert_eq!(row.values(), vec!["User: Hello!", "Hi!"]);
    }

    #[test]
    fn test_two_column_trims_whole_prompt() {
        let contents = chat(&[("system", "  padded  "), ("user", "question \n")]);
        let row = Row::build(&contents, Mode::TwoColumn);
        assert_eq!(row.values()[0], "System:   padded  \n\nUser: question");
    }

    #[test]
    fn test_two_column_flat_passthrough() {
        let contents = RoleContents::from_record(&Record::flat(" P ", "C"));
        assert_eq!(
            Row::build(&contents, Mode::TwoColumn),
            Row::TwoColumn {
                prompt: "P".into(),
                completion: "C".into(),
            }
        );
    }

    #[test]
    fn test_three_column_trimmed() {
        let contents = chat(&[("system", " S "), ("user", "\tU"), ("assistant", "A\n")]);
        assert_eq!(
            Row::build(&contents, Mode::ThreeColumn),
            Row::ThreeColumn {
                system: "S".into(),
                user: "U".into(),
                assistant: "A".into(),
            }
        );
    }

    #[test]
    fn test_row_accessors() {
        let row = Row::ThreeColumn {
            system: "S".into(),
            user: "ÜÜ".into(),
            assistant: "A".into(),
        };
        assert_eq!(row.mode(), Mode::ThreeColumn);
        assert_eq!(row.completion(), "A");
        assert_eq!(row.prompt_chars(), 3);
    }

    #[test]
    fn test_row_serializes_with_column_names() {
        let row = Row::TwoColumn {
            prompt: "p".into(),
            completion: "c".into(),
        };
        assert_eq!(
            serde_json::to_string(&row).unwrap(),
            r#"{"prompt":"p","completion":"c"}"#
        );

        let back: Row = serde_json::from_str(r#"{"system":"s","user":"u","assistant":"a"}"#).unwrap();
        assert_eq!(back.mode(), Mode::ThreeColumn);
    }
}
