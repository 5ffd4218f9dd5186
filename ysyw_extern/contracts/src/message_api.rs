use std::future::Future;

use ysyw_models::contact::{ChallengeToken, MessagePayload};

/// Client of the backend that persists contact messages.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait MessageApiService: Send + Sync + 'static {
    /// Store a contact message, forwarding the challenge token if present.
    ///
    /// Returns [`SaveMessageResponse::Skipped`] without sending a request if
    /// no backend has been configured.
    fn save_message(
        &self,
        payload: MessagePayload,
        challenge_token: Option<ChallengeToken>,
    ) -> impl Future<Output = anyhow::Result<SaveMessageResponse>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveMessageResponse {
    /// The backend accepted the message and responded with this text.
    Saved { message: String },
    /// No backend is configured.
    Skipped,
}

#[cfg(feature = "mock")]
impl MockMessageApiService {
    pub fn with_save_message(
        mut self,
        payload: MessagePayload,
        challenge_token: Option<ChallengeToken>,
        result: anyhow::Result<SaveMessageResponse>,
    ) -> Self {
        self.expect_save_message()
            .once()
            .with(
                mockall::predicate::eq(payload),
                mockall::predicate::eq(challenge_token),
            )
            .return_once(|_, _| Box::pin(std::future::ready(result)));
        self
    }
}
