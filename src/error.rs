use thiserror::Error;

/// Failures surfaced by the call-placement side of the crate.  Webhook
/// parse failures are answered inline by the handler and never reach this
/// type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingEnv(Vec<&'static str>),

    #[error("invalid connection string: {0}")]
    ConnectionString(&'static str),

    #[error("request signing failed: {0}")]
    Signing(String),

    /// The provider rejected the call-creation request.  Carries whatever
    /// the provider reported; there is no retry.
    #[error("call request failed: {message}")]
    Call {
        message: String,
        status_code: Option<u16>,
        error_code: Option<String>,
    },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
