//! Message accumulator for batch error reporting.
//!
//! Element parsers keep a local [`Logger`]; when an element is finished the
//! local messages are prefixed with the element class and moved into the
//! enclosing logger. The outermost logger is turned into a single
//! [`SpdxParsingError`] with [`Logger::raise_if_nonempty`].

use crate::error::SpdxParsingError;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Logger {
    messages: Vec<String>,
}

impl Logger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn extend<I, S>(&mut self, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.messages.extend(messages.into_iter().map(Into::into));
    }

    /// Moves the messages of an element-local logger into this one, wrapped in
    /// `Error while parsing <class>: [...]`.
    pub fn append_element(&mut self, class_name: &str, local: Self) {
        if local.has_messages() {
            self.append(format!(
                "Error while parsing {class_name}: {}",
                render_list(&local.messages)
            ));
        }
    }

    #[must_use]
    pub fn has_messages(&self) -> bool {
        !self.messages.is_empty()
    }

    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    #[must_use]
    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }

    /// Returns an aggregated error if anything was logged.
    pub fn raise_if_nonempty(self) -> Result<(), SpdxParsingError> {
        if self.messages.is_empty() {
            Ok(())
        } else {
            Err(SpdxParsingError::new(self.messages))
        }
    }
}

/// Renders messages as `['a', 'b']`, the shape nested element errors use.
#[must_use]
pub fn render_list(messages: &[String]) -> String {
    let quoted: Vec<String> = messages.iter().map(|m| format!("'{m}'")).collect();
    format!("[{}]", quoted.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_logger_does_not_raise() {
        assert!(Logger::new().raise_if_nonempty().is_ok());
    }

    #[test]
    fn test_element_messages_are_prefixed() {
        let mut local = Logger::new();
        local.append("PackageName is missing");
        local.append("bad checksum");

        let mut outer = Logger::new();
        outer.append_element("Package", local);
        outer.append_element("File", Logger::new());

        let err = outer.raise_if_nonempty().unwrap_err();
        assert_eq!(
            err.messages,
            vec!["Error while parsing Package: ['PackageName is missing', 'bad checksum']"]
        );
    }

    #[test]
    fn test_extend_keeps_order() {
        let mut logger = Logger::new();
        logger.extend(["a", "b"]);
        logger.append("c");
        assert_eq!(logger.messages(), &["a", "b", "c"]);
    }
}
