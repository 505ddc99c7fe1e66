use pharmadesk_core::FieldError;

/// Failure of a client operation.
///
/// Validation failures never reach the network. Transport and conflict
/// failures leave any previously loaded state untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// One or more field-level rule violations, local or reported by the backend.
    Validation(Vec<FieldError>),
    /// The backend was unreachable (`status: None`) or answered with a
    /// non-success status.
    Transport {
        status: Option<u16>,
        message: String,
    },
    /// The backend rejected the write because of a state conflict, such as a
    /// duplicate name.
    Conflict { field: String, message: String },
    /// The request body could not be built locally; nothing was sent.
    Encode(String),
    /// The caller's cancellation token fired before a response arrived.
    Cancelled,
}

impl ApiError {
    pub fn unreachable(message: impl Into<String>) -> Self {
        ApiError::Transport {
            status: None,
            message: message.into(),
        }
    }

    pub fn encode(message: impl Into<String>) -> Self {
        ApiError::Encode(message.into())
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Transport { status, .. } => *status,
            ApiError::Conflict { .. } => Some(409),
            _ => None,
        }
    }

    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ApiError::Validation(errors) => errors,
            _ => &[],
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Text suitable for showing to the person who triggered the operation.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation(errors) => {
                let details: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                format!("Please correct the form: {}", details.join("; "))
            }
            ApiError::Transport { status: None, .. } => {
                "The server could not be reached. Check your connection and try again.".to_string()
            }
            ApiError::Transport {
                status: Some(401), ..
            } => "Your session has expired. Please sign in again.".to_string(),
            ApiError::Transport {
                status: Some(403), ..
            } => "You do not have permission to do that.".to_string(),
            ApiError::Transport {
                status: Some(404), ..
            } => "The record no longer exists.".to_string(),
            ApiError::Transport {
                status: Some(status),
                message,
            } if message.is_empty() => format!("The server rejected the request ({status})."),
            ApiError::Transport {
                status: Some(status),
                message,
            } => format!("The server rejected the request ({status}): {message}"),
            ApiError::Conflict { field, message } => format!("{field}: {message}"),
            ApiError::Encode(message) => format!("The request could not be prepared: {message}"),
            ApiError::Cancelled => "The request was cancelled.".to_string(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Validation(errors) => write!(f, "Validation failed: {} errors", errors.len()),
            ApiError::Transport {
                status: Some(status),
                message,
            } => write!(f, "Transport error ({status}): {message}"),
            ApiError::Transport {
                status: None,
                message,
            } => write!(f, "Backend unreachable: {message}"),
            ApiError::Conflict { field, message } => write!(f, "Conflict on '{field}': {message}"),
            ApiError::Encode(message) => write!(f, "Failed to encode request: {message}"),
            ApiError::Cancelled => write!(f, "Request cancelled"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<Vec<FieldError>> for ApiError {
    fn from(errors: Vec<FieldError>) -> Self {
        ApiError::Validation(errors)
    }
}
