use tracing::error;
use ysyw_core_contact_contracts::{ContactFeatureService, ContactSubmitError};
use ysyw_models::{
    contact::{ChallengeToken, ContactFormField, ContactFormFields},
    notice::Notice,
};

/// State of the contact form shown to a single visitor.
///
/// The fields are reset after a submission in which at least one channel
/// succeeded and retained otherwise, so the visitor can correct and retry.
#[derive(Debug)]
pub struct ContactForm<'a, Contact> {
    service: &'a Contact,
    challenge_required: bool,
    fields: ContactFormFields,
    challenge_token: Option<ChallengeToken>,
    submitting: bool,
    error: Option<String>,
}

impl<'a, Contact> ContactForm<'a, Contact>
where
    Contact: ContactFeatureService,
{
    pub fn new(service: &'a Contact, challenge_required: bool) -> Self {
        Self {
            service,
            challenge_required,
            fields: ContactFormFields::default(),
            challenge_token: None,
            submitting: false,
            error: None,
        }
    }

    pub fn with_fields(self, fields: ContactFormFields) -> Self {
        Self { fields, ..self }
    }

    pub fn update_field(&mut self, field: ContactFormField, value: String) {
        self.fields.set(field, value);
    }

    /// Called when the challenge widget reports a solved challenge.
    pub fn set_challenge_token(&mut self, token: ChallengeToken) {
        self.challenge_token = Some(token);
    }

    /// Called when the challenge widget reports that the token expired.
    pub fn expire_challenge(&mut self) {
        self.challenge_token = None;
    }

    pub fn can_submit(&self) -> bool {
        !self.submitting && (!self.challenge_required || self.challenge_token.is_some())
    }

    pub fn fields(&self) -> &ContactFormFields {
        &self.fields
    }

    /// The error of the last submission, if it failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn challenge_token(&self) -> Option<&ChallengeToken> {
        self.challenge_token.as_ref()
    }

    /// Submits the current fields and returns the notices to show.
    pub async fn submit(&mut self) -> Vec<Notice> {
        self.error = None;

        let result = {
            let _submitting = SubmittingGuard::start(&mut self.submitting);
            self.service
                .submit(self.fields.clone(), self.challenge_token.clone())
                .await
        };

        match result {
            Ok(outcome) => {
                self.fields = ContactFormFields::default();
                self.challenge_token = None;
                outcome.notices()
            }
            Err(err) => {
                // only a submission rejected by validation leaves the token unspent
                if !err.is_validation_error() {
                    self.challenge_token = None;
                }
                self.fail(err)
            }
        }
    }

    fn fail(&mut self, err: ContactSubmitError) -> Vec<Notice> {
        if let ContactSubmitError::Other(err) = &err {
            error!("Failed to submit contact form: {err:#}");
        }

        let notice = err.notice();
        self.error = Some(notice.text.clone());
        vec![notice]
    }
}

/// Keeps the submitting flag set until dropped, so it is cleared even if the
/// submission future is dropped before completion.
struct SubmittingGuard<'a>(&'a mut bool);

impl<'a> SubmittingGuard<'a> {
    fn start(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

#[cfg(test)]
mod tests {
    use std::{future::Future, pin::Pin, task::Poll};

    use anyhow::anyhow;
    use pretty_assertions::assert_eq;
    use ysyw_core_contact_contracts::{ContactSubmitOutcome, MockContactFeatureService};
    use ysyw_models::notice::NoticeLevel;

    use super::*;

    fn fields() -> ContactFormFields {
        ContactFormFields {
            name: "Max Mustermann".into(),
            email: "max@example.com".into(),
            subject: "careers".into(),
            custom_subject: String::new(),
            message: "Hello World!".into(),
        }
    }

    fn token() -> ChallengeToken {
        "challenge token".try_into().unwrap()
    }

    #[test]
    fn can_submit() {
        // Arrange
        let service = MockContactFeatureService::new();
        let mut with_challenge = ContactForm::new(&service, true);
        let without_challenge = ContactForm::new(&service, false);

        // Act + Assert
        assert!(without_challenge.can_submit());
        assert!(!with_challenge.can_submit());

        with_challenge.set_challenge_token(token());
        assert!(with_challenge.can_submit());

        with_challenge.expire_challenge();
        assert!(!with_challenge.can_submit());
        assert_eq!(with_challenge.challenge_token(), None);
    }

    #[test]
    fn update_field() {
        // Arrange
        let service = MockContactFeatureService::new();
        let mut sut = ContactForm::new(&service, false);

        // Act
        sut.update_field(ContactFormField::Subject, "other".into());
        sut.update_field(ContactFormField::CustomSubject, "Scouting".into());

        // Assert
        assert_eq!(sut.fields().subject, "other");
        assert_eq!(sut.fields().custom_subject, "Scouting");
    }

    #[tokio::test]
    async fn submit_delivered_resets_form() {
        // Arrange
        let service = MockContactFeatureService::new().with_submit(
            fields(),
            Some(token()),
            Ok(ContactSubmitOutcome::Delivered),
        );
        let mut sut = ContactForm::new(&service, true).with_fields(fields());
        sut.set_challenge_token(token());

        // Act
        let notices = sut.submit().await;

        // Assert
        assert_eq!(
            notices,
            [Notice::success(
                "Message sent successfully! We'll get back to you soon. 🎉"
            )]
        );
        assert!(sut.fields().is_empty());
        assert_eq!(sut.challenge_token(), None);
        assert_eq!(sut.error(), None);
        assert!(!sut.is_submitting());
    }

    #[tokio::test]
    async fn submit_partial_success_resets_form() {
        // Arrange
        let service = MockContactFeatureService::new().with_submit(
            fields(),
            None,
            Ok(ContactSubmitOutcome::Emailed {
                api_error: "Failed to save message to database".into(),
            }),
        );
        let mut sut = ContactForm::new(&service, false).with_fields(fields());

        // Act
        let notices = sut.submit().await;

        // Assert
        assert_eq!(
            notices,
            [
                Notice::success("Email sent successfully! 📧"),
                Notice::warning("Database save failed: Failed to save message to database"),
            ]
        );
        assert!(sut.fields().is_empty());
    }

    #[tokio::test]
    async fn submit_both_failed_retains_fields() {
        // Arrange
        let service = MockContactFeatureService::new().with_submit(
            fields(),
            Some(token()),
            Err(ContactSubmitError::BothFailed {
                api: "Failed to save message to database".into(),
                email: "Failed to send email. Status: 400".into(),
            }),
        );
        let mut sut = ContactForm::new(&service, true).with_fields(fields());
        sut.set_challenge_token(token());

        // Act
        let notices = sut.submit().await;

        // Assert
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert_eq!(
            sut.error(),
            Some(
                "Both services failed - API: Failed to save message to database, Email: Failed \
                 to send email. Status: 400"
            )
        );
        assert_eq!(sut.fields(), &fields());
        assert_eq!(sut.challenge_token(), None);
        assert!(!sut.is_submitting());
    }

    #[tokio::test]
    async fn submit_validation_error_keeps_token() {
        // Arrange
        let incomplete = ContactFormFields {
            message: String::new(),
            ..fields()
        };
        let service = MockContactFeatureService::new().with_submit(
            incomplete.clone(),
            Some(token()),
            Err(ContactSubmitError::MissingFields),
        );
        let mut sut = ContactForm::new(&service, true).with_fields(incomplete.clone());
        sut.set_challenge_token(token());

        // Act
        let notices = sut.submit().await;

        // Assert
        assert_eq!(notices, [Notice::error("All fields are required!")]);
        assert_eq!(sut.error(), Some("All fields are required!"));
        assert_eq!(sut.fields(), &incomplete);
        assert_eq!(sut.challenge_token(), Some(&token()));
    }

    #[tokio::test]
    async fn submit_unexpected_error() {
        // Arrange
        let service = MockContactFeatureService::new().with_submit(
            fields(),
            None,
            Err(ContactSubmitError::Other(anyhow!("task panicked"))),
        );
        let mut sut = ContactForm::new(&service, false).with_fields(fields());

        // Act
        let notices = sut.submit().await;

        // Assert
        assert_eq!(
            notices,
            [Notice::error("Something went wrong. Please try again.")]
        );
        assert_eq!(sut.fields(), &fields());
        assert!(!sut.is_submitting());
    }

    #[tokio::test]
    async fn submit_unexpected_error_spends_token() {
        // Arrange
        let service = MockContactFeatureService::new().with_submit(
            fields(),
            Some(token()),
            Err(ContactSubmitError::Other(anyhow!("siteverify timed out"))),
        );
        let mut sut = ContactForm::new(&service, true).with_fields(fields());
        sut.set_challenge_token(token());

        // Act
        sut.submit().await;

        // Assert
        assert_eq!(sut.challenge_token(), None);
        assert!(!sut.can_submit());
        assert_eq!(sut.fields(), &fields());
    }

    #[tokio::test]
    async fn submit_challenge_failed_spends_token() {
        // Arrange
        let service = MockContactFeatureService::new().with_submit(
            fields(),
            Some(token()),
            Err(ContactSubmitError::ChallengeFailed),
        );
        let mut sut = ContactForm::new(&service, true).with_fields(fields());
        sut.set_challenge_token(token());

        // Act
        let notices = sut.submit().await;

        // Assert
        assert_eq!(notices, [Notice::error("Captcha verification failed!")]);
        assert_eq!(sut.challenge_token(), None);
        assert_eq!(sut.fields(), &fields());
    }

    #[tokio::test]
    async fn submitting_flag_cleared_when_cancelled() {
        // Arrange
        let mut service = MockContactFeatureService::new();
        service
            .expect_submit()
            .once()
            .return_once(|_, _| Box::pin(std::future::pending()));
        let mut sut = ContactForm::new(&service, false).with_fields(fields());

        // Act
        {
            let submission = std::pin::pin!(sut.submit());
            assert!(poll_once(submission).await);
        }

        // Assert
        assert!(!sut.is_submitting());
        assert!(sut.can_submit());
        assert_eq!(sut.fields(), &fields());
    }

    /// Polls the future once and returns whether it is still pending.
    async fn poll_once<F: Future + Unpin>(mut future: F) -> bool {
        std::future::poll_fn(|cx| Poll::Ready(Pin::new(&mut future).poll(cx).is_pending())).await
    }

    #[test]
    fn submitting_guard_clears_flag() {
        let mut flag = false;
        {
            let _guard = SubmittingGuard::start(&mut flag);
        }
        assert!(!flag);
    }
}
