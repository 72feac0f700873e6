use serde::Serialize;

/// A single log entry as accepted by the logging endpoint.
///
/// `stack`, `level` and `package` are lower-cased on construction; `message`
/// is kept exactly as given. Field order matches the wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub stack: String,
    pub level: String,
    pub package: String,
    pub message: String,
}

impl LogEntry {
    pub fn new(
        stack: impl AsRef<str>,
        level: impl AsRef<str>,
        package: impl AsRef<str>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            stack: stack.as_ref().to_lowercase(),
            level: level.as_ref().to_lowercase(),
            package: package.as_ref().to_lowercase(),
            message: message.into(),
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}
