use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{macros::nutype_string, Sensitive};

/// Topics offered by the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactSubject {
    Advertise,
    Branding,
    Admission,
    Careers,
    /// Replaced by the visitor's free-text subject.
    Other,
}

impl ContactSubject {
    pub const ALL: [Self; 5] = [
        Self::Advertise,
        Self::Branding,
        Self::Admission,
        Self::Careers,
        Self::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Advertise => "advertise",
            Self::Branding => "branding",
            Self::Admission => "admission",
            Self::Careers => "careers",
            Self::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Advertise => "Advertise with Us",
            Self::Branding => "Branding Partnership",
            Self::Admission => "Regarding Admission",
            Self::Careers => "Careers",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ContactSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown contact subject: {0:?}")]
pub struct UnknownContactSubject(pub String);

impl FromStr for ContactSubject {
    type Err = UnknownContactSubject;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|subject| subject.as_str() == s)
            .ok_or_else(|| UnknownContactSubject(s.into()))
    }
}

/// Raw contents of the contact form, exactly as entered by the visitor.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactFormFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub custom_subject: String,
    pub message: String,
}

impl fmt::Debug for ContactFormFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactFormFields")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("subject", &self.subject)
            .field("custom_subject", &self.custom_subject)
            .field("message", &Sensitive(&self.message))
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactFormField {
    Name,
    Email,
    Subject,
    CustomSubject,
    Message,
}

impl ContactFormFields {
    pub fn set(&mut self, field: ContactFormField, value: String) {
        let slot = match field {
            ContactFormField::Name => &mut self.name,
            ContactFormField::Email => &mut self.email,
            ContactFormField::Subject => &mut self.subject,
            ContactFormField::CustomSubject => &mut self.custom_subject,
            ContactFormField::Message => &mut self.message,
        };
        *slot = value;
    }

    /// Whether all fields are blank, i.e. the form is in its initial state.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether name, email and message have been filled in.
    pub fn has_required_fields(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty() && !self.message.is_empty()
    }

    /// Returns the subject that is sent downstream: the selected subject, or
    /// the trimmed custom subject if "other" was selected.
    ///
    /// Returns `None` if no valid subject has been provided.
    pub fn effective_subject(&self) -> Option<&str> {
        match self.subject.parse::<ContactSubject>().ok()? {
            ContactSubject::Other => {
                Some(self.custom_subject.trim()).filter(|subject| !subject.is_empty())
            }
            subject => Some(subject.as_str()),
        }
    }
}

nutype_string!(
    /// Full name of the visitor
    ContactAuthorName(validate(not_empty, len_char_max = 256))
);

nutype_string!(
    /// Email address of the visitor, as entered
    ContactAuthorEmail(validate(not_empty, len_char_max = 256))
);

nutype_string!(
    /// The effective subject of a message
    ContactSubjectText(validate(not_empty, len_char_max = 256))
);

nutype_string!(
    /// Body of a message
    ContactMessageContent(sensitive, validate(not_empty, len_char_max = 4096))
);

nutype_string!(
    /// Opaque proof-of-human token issued by the challenge widget
    ChallengeToken(sensitive, validate(not_empty, len_char_max = 2048))
);

/// Validated snapshot of the contact form with the subject resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: ContactAuthorName,
    pub email: ContactAuthorEmail,
    pub subject: ContactSubjectText,
    pub message: ContactMessageContent,
}

impl ContactSubmission {
    /// Payload for the persistence endpoint.
    pub fn message_payload(&self) -> MessagePayload {
        MessagePayload {
            name: (*self.name).clone(),
            email: (*self.email).clone(),
            subject: (*self.subject).clone(),
            message: (*self.message).clone().into(),
        }
    }

    /// Payload for the email-delivery provider.
    pub fn email_payload(&self) -> ContactEmailPayload {
        ContactEmailPayload {
            from_name: (*self.name).clone(),
            from_email: (*self.email).clone(),
            subject: (*self.subject).clone(),
            message: (*self.message).clone().into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessagePayload {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: Sensitive<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEmailPayload {
    pub from_name: String,
    pub from_email: String,
    pub subject: String,
    pub message: Sensitive<String>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn fields(subject: &str, custom_subject: &str) -> ContactFormFields {
        ContactFormFields {
            name: "Max Mustermann".into(),
            email: "max@example.com".into(),
            subject: subject.into(),
            custom_subject: custom_subject.into(),
            message: "Hello World!".into(),
        }
    }

    #[test]
    fn subject_round_trips_through_str() {
        for subject in ContactSubject::ALL {
            assert_eq!(subject.as_str().parse::<ContactSubject>(), Ok(subject));
        }
        assert!("sponsoring".parse::<ContactSubject>().is_err());
    }

    #[test]
    fn effective_subject() {
        assert_eq!(fields("careers", "ignored").effective_subject(), Some("careers"));
        assert_eq!(
            fields("other", "  Scouting  ").effective_subject(),
            Some("Scouting")
        );
        assert_eq!(fields("other", "   ").effective_subject(), None);
        assert_eq!(fields("", "Scouting").effective_subject(), None);
        assert_eq!(fields("unknown", "").effective_subject(), None);
    }

    #[test]
    fn required_fields() {
        assert!(fields("careers", "").has_required_fields());

        let mut missing = fields("careers", "");
        missing.set(ContactFormField::Email, String::new());
        assert!(!missing.has_required_fields());
    }

    #[test]
    fn reset_state() {
        let mut form = ContactFormFields::default();
        assert!(form.is_empty());
        form.set(ContactFormField::CustomSubject, "x".into());
        assert!(!form.is_empty());
    }

    #[test]
    fn form_fields_use_camel_case() {
        let fields = serde_json::from_str::<ContactFormFields>(
            r#"{"name": "Max", "subject": "other", "customSubject": "Scouting"}"#,
        )
        .unwrap();
        assert_eq!(fields.custom_subject, "Scouting");
        assert_eq!(fields.email, "");
    }

    #[test]
    fn payloads() {
        let submission = ContactSubmission {
            name: "Max".try_into().unwrap(),
            email: "max@example.com".try_into().unwrap(),
            subject: "careers".try_into().unwrap(),
            message: "Hi".try_into().unwrap(),
        };

        assert_eq!(
            submission.message_payload(),
            MessagePayload {
                name: "Max".into(),
                email: "max@example.com".into(),
                subject: "careers".into(),
                message: "Hi".to_owned().into(),
            }
        );
        assert_eq!(
            submission.email_payload(),
            ContactEmailPayload {
                from_name: "Max".into(),
                from_email: "max@example.com".into(),
                subject: "careers".into(),
                message: "Hi".to_owned().into(),
            }
        );
    }

    #[test]
    fn message_content_is_redacted() {
        let content = ContactMessageContent::try_new("private".to_owned()).unwrap();
        assert_eq!(format!("{content:?}"), "[sensitive]");
        assert!(ContactMessageContent::try_new("x".repeat(4097)).is_err());
    }
}
