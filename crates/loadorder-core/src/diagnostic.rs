//! Warning output for items that could not be loaded.

/// Receives human-readable warnings from the resolver.
///
/// Fire-and-forget: the resolver never inspects what the sink does with a
/// message.
pub trait DiagnosticSink {
    fn warn(&mut self, message: &str);
}

/// Forwards warnings to `tracing` at WARN level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn warn(&mut self, message: &str) {
        tracing::warn!("{message}");
    }
}

/// Collects warnings in memory, in emission order.
impl DiagnosticSink for Vec<String> {
    fn warn(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn warn(&mut self, message: &str) {
        (**self).warn(message);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Box<S> {
    fn warn(&mut self, message: &str) {
        (**self).warn(message);
    }
}

/// The warning emitted for an item whose prerequisites never became ready.
pub fn unmet_dependencies_message(name: &str) -> String {
    format!("{name} has unmet dependencies and was not loaded!")
}
