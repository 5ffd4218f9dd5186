use std::future::Future;

use serde::Serialize;
use ysyw_models::contact::ContactEmailPayload;

/// Delivery of contact form messages by email.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactEmailService: Send + Sync + 'static {
    /// Send the contact message to the site owner and an auto-reply to the
    /// visitor.
    ///
    /// Never fails. Configuration and transport errors are reported in the
    /// returned [`ContactEmailResult`].
    fn send_contact_email(
        &self,
        payload: ContactEmailPayload,
    ) -> impl Future<Output = ContactEmailResult> + Send;

    /// Send the auto-reply to the visitor. Failures are only logged.
    fn send_auto_reply(&self, email: String, name: String) -> impl Future<Output = ()> + Send;

    /// Returns which configuration values are present.
    fn config_status(&self) -> EmailConfigStatus;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEmailResult {
    pub success: bool,
    pub message: String,
}

impl ContactEmailResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmailConfigStatus {
    pub service_id: bool,
    pub template_id: bool,
    pub auto_reply_template_id: bool,
    pub public_key: bool,
    pub private_key: bool,
    pub is_valid: bool,
}

#[cfg(feature = "mock")]
impl MockContactEmailService {
    pub fn with_send_contact_email(
        mut self,
        payload: ContactEmailPayload,
        result: ContactEmailResult,
    ) -> Self {
        self.expect_send_contact_email()
            .once()
            .with(mockall::predicate::eq(payload))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_config_status(mut self, status: EmailConfigStatus) -> Self {
        self.expect_config_status().once().return_const(status);
        self
    }
}
