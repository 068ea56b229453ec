//! Translatable messages and the sinks that deliver them.
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::constants::{
    MSG_ARG_VALUE, MSG_LENGTH_BELOW_MINIMUM, MSG_LENGTH_CORRECTED, MSG_LENGTH_NOT_MULTIPLE,
};
use crate::i18n;
use crate::validation::CorrectionEvent;

/// Translation key plus ordered named arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub key: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<(String, String)>,
}

impl Message {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_arg(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.args.push((name.into(), value.to_string()));
        self
    }

    /// Render through the bundled translation table.
    #[must_use]
    pub fn render(&self, lang: &str) -> String {
        let args: HashMap<&str, &str> = self
            .args
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        i18n::tr(lang, &self.key, Some(&args))
    }
}

impl From<&CorrectionEvent> for Message {
    fn from(event: &CorrectionEvent) -> Self {
        match *event {
            CorrectionEvent::BelowMinimum => Self::new(MSG_LENGTH_BELOW_MINIMUM),
            CorrectionEvent::NotAMultiple { original } => {
                Self::new(MSG_LENGTH_NOT_MULTIPLE).with_arg(MSG_ARG_VALUE, original)
            }
            CorrectionEvent::CorrectedTo { value } => {
                Self::new(MSG_LENGTH_CORRECTED).with_arg(MSG_ARG_VALUE, value)
            }
        }
    }
}

/// Destination for messages addressed to whoever changed a rule.
pub trait NotificationSink {
    fn send(&mut self, message: &Message);
}

impl<S: NotificationSink + ?Sized> NotificationSink for &mut S {
    fn send(&mut self, message: &Message) {
        (**self).send(message);
    }
}

/// Keeps every message in delivery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectingSink {
    pub messages: Vec<Message>,
}

impl CollectingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.messages)
    }
}

impl NotificationSink for CollectingSink {
    fn send(&mut self, message: &Message) {
        self.messages.push(message.clone());
    }
}

/// Renders messages and emits them through the `log` facade.
#[derive(Debug, Clone)]
pub struct LogSink {
    lang: String,
}

impl LogSink {
    #[must_use]
    pub fn new(lang: impl Into<String>) -> Self {
        Self { lang: lang.into() }
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new(i18n::DEFAULT_LANG)
    }
}

impl NotificationSink for LogSink {
    fn send(&mut self, message: &Message) {
        log::info!(target: "advagri::notify", "{}", message.render(&self.lang));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deliver<S: NotificationSink>(mut sink: S, message: &Message) {
        sink.send(message);
    }

    #[test]
    fn events_map_to_keys_and_arguments() {
        let below = Message::from(&CorrectionEvent::BelowMinimum);
        assert_eq!(below.key, MSG_LENGTH_BELOW_MINIMUM);
        assert!(below.args.is_empty());

        let original = Message::from(&CorrectionEvent::NotAMultiple { original: 30 });
        assert_eq!(original.key, MSG_LENGTH_NOT_MULTIPLE);
        assert_eq!(original.args, vec![("value".to_string(), "30".to_string())]);

        let corrected = Message::from(&CorrectionEvent::CorrectedTo { value: 48 });
        assert_eq!(
            corrected.render("en"),
            "Length of year has been corrected to 48."
        );
    }

    #[test]
    fn collecting_sink_preserves_order() {
        let mut sink = CollectingSink::new();
        sink.send(&Message::new("a"));
        deliver(&mut sink, &Message::new("b"));
        let keys: Vec<_> = sink.drain().into_iter().map(|m| m.key).collect();
        assert_eq!(keys, ["a", "b"]);
        assert!(sink.messages.is_empty());
    }

    #[test]
    fn log_sink_renders_in_its_language() {
        let message = Message::from(&CorrectionEvent::BelowMinimum);
        let mut sink = LogSink::new("zh");
        sink.send(&message);
        assert_eq!(sink.lang, "zh");
        assert_eq!(message.render(&sink.lang), "一年的长度必须大于节气数量。");
        assert_eq!(LogSink::default().lang, "en");
        assert_eq!(
            message.render(&LogSink::default().lang),
            "Length of year must be greater than the solar term count."
        );
    }
}
