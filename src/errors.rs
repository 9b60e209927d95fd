use std::fmt;

#[derive(Debug)]
pub enum ClientError {
    Api {
        status: u16,
        message: String,
        details: Vec<String>,
    },
    Transport(reqwest::Error),
    Decode(serde_json::Error),
}

impl ClientError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
            details: Vec::new(),
        }
    }

    // One-line text for notices, with the envelope's `details` joined in.
    pub fn summary(&self) -> String {
        match self {
            Self::Api { message, details, .. } => {
                if details.is_empty() {
                    message.clone()
                } else {
                    format!("{}: {}", message, details.join(", "))
                }
            }
            Self::Transport(err) => err.to_string(),
            Self::Decode(err) => format!("unexpected response body: {err}"),
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api { status, .. } => write!(f, "{} ({})", self.summary(), status),
            Self::Transport(err) => write!(f, "request failed: {err}"),
            Self::Decode(err) => write!(f, "unexpected response body: {err}"),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Decode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err)
    }
}
