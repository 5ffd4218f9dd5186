use std::future::Future;

use thiserror::Error;
use ysyw_models::{
    contact::{ChallengeToken, ContactFormFields},
    notice::Notice,
};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Returns the site key of the challenge widget, or `None` if submissions
    /// are not gated by a challenge.
    fn challenge_sitekey(&self) -> Option<String>;

    /// Validate the contact form and deliver the message through the
    /// persistence api and by email.
    ///
    /// Both channels are contacted concurrently. The submission only fails
    /// if both of them fail.
    fn submit(
        &self,
        fields: ContactFormFields,
        challenge_token: Option<ChallengeToken>,
    ) -> impl Future<Output = Result<ContactSubmitOutcome, ContactSubmitError>> + Send;
}

/// Result of a submission in which at least one channel succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactSubmitOutcome {
    /// The message has been saved and sent by email.
    Delivered,
    /// The message has been saved but the email could not be sent.
    Saved { email_error: String },
    /// The message has been sent by email but could not be saved.
    Emailed { api_error: String },
}

impl ContactSubmitOutcome {
    pub fn notices(&self) -> Vec<Notice> {
        match self {
            Self::Delivered => vec![Notice::success(
                "Message sent successfully! We'll get back to you soon. 🎉",
            )],
            Self::Saved { email_error } => vec![
                Notice::success("Message saved successfully! 📝"),
                Notice::warning(format!("Email notification failed: {email_error}")),
            ],
            Self::Emailed { api_error } => vec![
                Notice::success("Email sent successfully! 📧"),
                Notice::warning(format!("Database save failed: {api_error}")),
            ],
        }
    }
}

#[derive(Debug, Error)]
pub enum ContactSubmitError {
    #[error("All fields are required!")]
    MissingFields,
    #[error("Please select a subject or provide a custom subject!")]
    MissingSubject,
    /// `field` is the label of the offending field as shown to the visitor.
    #[error("The {field} is too long!")]
    TooLong { field: &'static str },
    #[error("Please complete the reCAPTCHA verification!")]
    ChallengeRequired,
    #[error("Captcha verification failed!")]
    ChallengeFailed,
    #[error("Both services failed - API: {api}, Email: {email}")]
    BothFailed { api: String, email: String },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ContactSubmitError {
    /// Returns the notice shown to the visitor. Unexpected errors are
    /// reported with a generic text.
    pub fn notice(&self) -> Notice {
        match self {
            Self::Other(_) => Notice::error("Something went wrong. Please try again."),
            err => Notice::error(err.to_string()),
        }
    }

    /// Whether the submission was rejected before any channel was contacted.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::MissingFields | Self::MissingSubject | Self::TooLong { .. }
        )
    }
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_challenge_sitekey(mut self, sitekey: Option<&str>) -> Self {
        self.expect_challenge_sitekey()
            .return_const(sitekey.map(str::to_owned));
        self
    }

    pub fn with_submit(
        mut self,
        fields: ContactFormFields,
        challenge_token: Option<ChallengeToken>,
        result: Result<ContactSubmitOutcome, ContactSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(
                mockall::predicate::eq(fields),
                mockall::predicate::eq(challenge_token),
            )
            .return_once(|_, _| Box::pin(std::future::ready(result)));
        self
    }
}
