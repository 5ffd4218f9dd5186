use serde::{Deserialize, Serialize};
use ysyw_models::{
    contact::{ChallengeToken, ContactFormFields},
    notice::Notice,
};

#[derive(Serialize)]
pub struct ApiError<D> {
    pub detail: D,
}

/// Contact form as posted by the landing page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LandingContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub custom_subject: String,
    pub message: String,
    /// Filled in by the challenge widget
    #[serde(rename = "g-recaptcha-response")]
    pub challenge_token: String,
}

impl LandingContactForm {
    pub fn into_parts(self) -> (ContactFormFields, Option<ChallengeToken>) {
        let fields = ContactFormFields {
            name: self.name,
            email: self.email,
            subject: self.subject,
            custom_subject: self.custom_subject,
            message: self.message,
        };
        (fields, ChallengeToken::try_new(self.challenge_token).ok())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiContactRequest {
    #[serde(flatten)]
    pub fields: ContactFormFields,
    #[serde(default)]
    pub captcha_token: Option<String>,
}

impl ApiContactRequest {
    pub fn challenge_token(&self) -> Option<ChallengeToken> {
        self.captcha_token
            .clone()
            .and_then(|token| ChallengeToken::try_new(token).ok())
    }
}

#[derive(Debug, Serialize)]
pub struct ApiContactResponse {
    pub notices: Vec<Notice>,
    /// Whether the client should reset the form
    pub reset: bool,
}

#[derive(Serialize)]
pub struct ApiHealth {
    pub http: bool,
}
