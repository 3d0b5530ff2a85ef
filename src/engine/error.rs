use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Connection failure, timeout or an undecodable body.
    #[error("engine request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("engine responded with status {status}")]
    Status { status: u16, body: String },

    /// One leg of a dual-cluster fan-out failed.
    #[error("{cluster}: {source}")]
    Replica {
        cluster: &'static str,
        #[source]
        source: Box<EngineError>,
    },
}

impl EngineError {
    pub fn replica(cluster: &'static str, source: EngineError) -> Self {
        Self::Replica {
            cluster,
            source: Box::new(source),
        }
    }

    /// HTTP status the engine answered with, if it answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Status { status, .. } => Some(*status),
            Self::Replica { source, .. } => source.status(),
        }
    }

    /// The engine's own error payload when it sent JSON, otherwise the error text.
    pub fn details(&self) -> Value {
        match self {
            Self::Status { body, .. } => serde_json::from_str(body)
                .unwrap_or_else(|_| Value::String(self.to_string())),
            Self::Replica { cluster, source } => match source.details() {
                Value::String(text) => Value::String(format!("{}: {}", cluster, text)),
                other => other,
            },
            Self::Transport(_) => Value::String(self.to_string()),
        }
    }
}
