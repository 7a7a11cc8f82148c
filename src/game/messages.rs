//! # Message Log
//!
//! Ordered narrative log. Consecutive identical messages stack into a single
//! entry with a repeat counter instead of flooding the log.

use crate::game::colors::Rgb;

/// A single log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Text without the repeat suffix
    pub plain_text: String,
    /// Foreground colour
    pub color: Rgb,
    /// How many times this text arrived in a row, always at least 1
    pub count: u32,
}

impl Message {
    pub fn new(text: impl Into<String>, color: Rgb) -> Self {
        Self {
            plain_text: text.into(),
            color,
            count: 1,
        }
    }

    /// The text to display, including `(xN)` when the message has stacked.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Message, WHITE};
    ///
    /// let mut message = Message::new("Orc attacks", WHITE);
    /// assert_eq!(message.full_text(), "Orc attacks");
    /// message.count = 3;
    /// assert_eq!(message.full_text(), "Orc attacks (x3)");
    /// ```
    pub fn full_text(&self) -> String {
        if self.count > 1 {
            format!("{} (x{})", self.plain_text, self.count)
        } else {
            self.plain_text.clone()
        }
    }
}

/// Append-only log of messages.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a message. With `stack` set, a message whose text matches the
    /// most recent entry bumps that entry's counter instead of appending.
    pub fn add(&mut self, text: impl Into<String>, color: Rgb, stack: bool) {
        let text = text.into();
        if stack {
            if let Some(last) = self.messages.last_mut() {
                if last.plain_text == text {
                    last.count += 1;
                    return;
                }
            }
        }
        self.messages.push(Message::new(text, color));
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The last `n` messages, oldest first.
    pub fn recent(&self, n: usize) -> &[Message] {
        let start = self.messages.len().saturating_sub(n);
        &self.messages[start..]
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
