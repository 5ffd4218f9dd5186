use tracing::{error, warn};
use ysyw_core_contact_contracts::{ContactFeatureService, ContactSubmitError, ContactSubmitOutcome};
use ysyw_di::Build;
use ysyw_email_contracts::{ContactEmailResult, ContactEmailService};
use ysyw_extern_contracts::message_api::{MessageApiService, SaveMessageResponse};
use ysyw_models::contact::{
    ChallengeToken, ContactAuthorEmail, ContactAuthorName, ContactFormFields,
    ContactMessageContent, ContactSubjectText, ContactSubmission,
};
use ysyw_shared_contracts::captcha::{CaptchaCheckError, CaptchaService};
use ysyw_utils::trace_instrument;

pub mod form;

/// Reason reported to the visitor if the message could not be saved.
const API_FAILURE: &str = "Failed to save message to database";

#[derive(Debug, Clone, Build)]
pub struct ContactFeatureServiceImpl<Captcha, ContactEmail, MessageApi> {
    captcha: Captcha,
    contact_email: ContactEmail,
    message_api: MessageApi,
}

impl<Captcha, ContactEmail, MessageApi> ContactFeatureService
    for ContactFeatureServiceImpl<Captcha, ContactEmail, MessageApi>
where
    Captcha: CaptchaService,
    ContactEmail: ContactEmailService,
    MessageApi: MessageApiService,
{
    fn challenge_sitekey(&self) -> Option<String> {
        self.captcha.get_recaptcha_sitekey()
    }

    #[trace_instrument(skip(self, challenge_token))]
    async fn submit(
        &self,
        fields: ContactFormFields,
        challenge_token: Option<ChallengeToken>,
    ) -> Result<ContactSubmitOutcome, ContactSubmitError> {
        let submission = validate(&fields)?;

        // the token is only meaningful to the backend if the widget is enabled
        let challenge_token = challenge_token.filter(|_| self.challenge_sitekey().is_some());

        match self
            .captcha
            .check(challenge_token.as_deref().map(String::as_str))
            .await
        {
            Ok(()) => {}
            Err(CaptchaCheckError::Required) => return Err(ContactSubmitError::ChallengeRequired),
            Err(CaptchaCheckError::Failed) => return Err(ContactSubmitError::ChallengeFailed),
            Err(CaptchaCheckError::Other(err)) => return Err(err.into()),
        }

        let (api, email) = tokio::join!(
            self.message_api
                .save_message(submission.message_payload(), challenge_token),
            self.contact_email
                .send_contact_email(submission.email_payload()),
        );

        reconcile(api, email)
    }
}

/// Checks the form fields in order and resolves the effective subject.
pub fn validate(fields: &ContactFormFields) -> Result<ContactSubmission, ContactSubmitError> {
    if !fields.has_required_fields() {
        return Err(ContactSubmitError::MissingFields);
    }

    let subject = fields
        .effective_subject()
        .ok_or(ContactSubmitError::MissingSubject)?;

    Ok(ContactSubmission {
        name: ContactAuthorName::try_new(fields.name.clone()).map_err(too_long("name"))?,
        email: ContactAuthorEmail::try_new(fields.email.clone())
            .map_err(too_long("email address"))?,
        subject: ContactSubjectText::try_new(subject.to_owned())
            .map_err(too_long("subject"))?,
        message: ContactMessageContent::try_new(fields.message.clone())
            .map_err(too_long("message"))?,
    })
}

fn too_long<E>(field: &'static str) -> impl FnOnce(E) -> ContactSubmitError {
    move |_| ContactSubmitError::TooLong { field }
}

/// Combines the outcomes of both channels. The submission succeeds if at
/// least one of them succeeded.
pub fn reconcile(
    api: anyhow::Result<SaveMessageResponse>,
    email: ContactEmailResult,
) -> Result<ContactSubmitOutcome, ContactSubmitError> {
    let api = api
        .inspect(|response| {
            if *response == SaveMessageResponse::Skipped {
                warn!("Message api not configured, skipped");
            }
        })
        .inspect_err(|err| error!("Failed to save message: {err:#}"));

    match (api, email.success) {
        (Ok(_), true) => Ok(ContactSubmitOutcome::Delivered),
        (Ok(_), false) => Ok(ContactSubmitOutcome::Saved {
            email_error: email.message,
        }),
        (Err(_), true) => Ok(ContactSubmitOutcome::Emailed {
            api_error: API_FAILURE.into(),
        }),
        (Err(_), false) => Err(ContactSubmitError::BothFailed {
            api: API_FAILURE.into(),
            email: email.message,
        }),
    }
}
