#[cfg(test)]
use std::sync::Mutex;

/// A single line of operator-facing output
#[derive(Debug, Clone, PartialEq)]
pub enum OutputMessage {
    Success(String),
    Warning(String),
    Info(String),
    Section(String),
    Subsection(String),
    KeyValue(String, String),
    Highlight(String, String),
    Dimmed(String),
    ListItem(String),
    Plain(String),
    Blank,
}

/// Sink for operator-facing output.
///
/// Implementors only provide `emit`; the helpers build the message.
pub trait Output: Send + Sync {
    fn emit(&self, message: OutputMessage);

    fn success(&self, message: &str) {
        self.emit(OutputMessage::Success(message.to_string()));
    }

    fn warning(&self, message: &str) {
        self.emit(OutputMessage::Warning(message.to_string()));
    }

    fn info(&self, message: &str) {
        self.emit(OutputMessage::Info(message.to_string()));
    }

    fn section(&self, title: &str) {
        self.emit(OutputMessage::Section(title.to_string()));
    }

    fn subsection(&self, title: &str) {
        self.emit(OutputMessage::Subsection(title.to_string()));
    }

    fn key_value(&self, key: &str, value: &str) {
        self.emit(OutputMessage::KeyValue(key.to_string(), value.to_string()));
    }

    /// Key-value pair whose value is emphasised
    fn key_value_highlight(&self, key: &str, value: &str) {
        self.emit(OutputMessage::Highlight(key.to_string(), value.to_string()));
    }

    fn dimmed(&self, message: &str) {
        self.emit(OutputMessage::Dimmed(message.to_string()));
    }

    /// One line of a numbered listing
    fn list_item(&self, text: &str) {
        self.emit(OutputMessage::ListItem(text.to_string()));
    }

    /// Unstyled text, safe to pipe
    fn plain(&self, text: &str) {
        self.emit(OutputMessage::Plain(text.to_string()));
    }

    fn blank(&self) {
        self.emit(OutputMessage::Blank);
    }
}

/// Colored terminal output
pub struct TerminalOutput;

impl Output for TerminalOutput {
    fn emit(&self, message: OutputMessage) {
        use crate::output;

        match message {
            OutputMessage::Success(text) => output::success(&text),
            OutputMessage::Warning(text) => output::warning(&text),
            OutputMessage::Info(text) => output::info(&text),
            OutputMessage::Section(title) => output::section(&title),
            OutputMessage::Subsection(title) => output::subsection(&title),
            OutputMessage::KeyValue(key, value) => output::key_value(&key, &value),
            OutputMessage::Highlight(key, value) => output::key_value_highlight(&key, &value),
            OutputMessage::Dimmed(text) => output::dimmed(&text),
            OutputMessage::ListItem(text) => output::list_item(&text),
            OutputMessage::Plain(text) => output::plain(&text),
            OutputMessage::Blank => output::blank(),
        }
    }
}

/// Records every emitted message for assertions
#[cfg(test)]
#[derive(Default)]
pub struct MockOutput {
    messages: Mutex<Vec<OutputMessage>>,
}

#[cfg(test)]
impl MockOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_messages(&self) -> Vec<OutputMessage> {
        self.messages.lock().unwrap().clone()
    }

    pub fn contains_message(&self, message: &OutputMessage) -> bool {
        self.messages.lock().unwrap().contains(message)
    }

    pub fn has_success(&self) -> bool {
        self.get_messages()
            .iter()
            .any(|m| matches!(m, OutputMessage::Success(_)))
    }

    pub fn get_warnings(&self) -> Vec<String> {
        self.texts(|m| match m {
            OutputMessage::Warning(text) => Some(text),
            _ => None,
        })
    }

    /// Listing lines in the order they were printed
    pub fn get_list_items(&self) -> Vec<String> {
        self.texts(|m| match m {
            OutputMessage::ListItem(text) => Some(text),
            _ => None,
        })
    }

    /// Everything printed, one message per line
    pub fn to_text(&self) -> String {
        self.get_messages()
            .into_iter()
            .map(|m| match m {
                OutputMessage::KeyValue(key, value) | OutputMessage::Highlight(key, value) => {
                    format!("{}: {}", key, value)
                }
                OutputMessage::Blank => String::new(),
                OutputMessage::Success(text)
                | OutputMessage::Warning(text)
                | OutputMessage::Info(text)
                | OutputMessage::Section(text)
                | OutputMessage::Subsection(text)
                | OutputMessage::Dimmed(text)
                | OutputMessage::ListItem(text)
                | OutputMessage::Plain(text) => text,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn texts<F>(&self, select: F) -> Vec<String>
    where
        F: Fn(&OutputMessage) -> Option<&String>,
    {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter_map(|m| select(m).cloned())
            .collect()
    }
}

#[cfg(test)]
impl Output for MockOutput {
    fn emit(&self, message: OutputMessage) {
        self.messages.lock().unwrap().push(message);
    }
}
