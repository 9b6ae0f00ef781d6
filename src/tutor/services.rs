use thiserror::Error;
use tracing::{error, info, instrument, warn};

use super::client::TutorClient;
use super::prompt::build_prompt;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("message must not be empty")]
    EmptyMessage,
    #[error("tutor API key not configured")]
    MissingCredential,
    #[error("tutor service failed")]
    Upstream(#[source] anyhow::Error),
}

/// Forwards one student message to the tutor backend and returns its answer.
///
/// Calls are independent: earlier turns are not sent along.
#[instrument(skip(client, api_key, message), fields(chars = message.len()))]
pub async fn relay(
    client: &dyn TutorClient,
    api_key: Option<&str>,
    message: &str,
) -> Result<String, RelayError> {
    let message = message.trim();
    if message.is_empty() {
        return Err(RelayError::EmptyMessage);
    }

    let Some(api_key) = api_key.map(str::trim).filter(|k| !k.is_empty()) else {
        warn!("tutor API key missing; not contacting upstream");
        return Err(RelayError::MissingCredential);
    };

    let prompt = build_prompt(message);
    match client.generate(api_key, &prompt).await {
        Ok(reply) => {
            info!(reply_chars = reply.len(), "tutor replied");
            Ok(reply)
        }
        Err(e) => {
            error!(error = ?e, "tutor upstream call failed");
            Err(RelayError::Upstream(e))
        }
    }
}
