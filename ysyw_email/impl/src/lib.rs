use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};
use ysyw_di::Build;
use ysyw_email_contracts::{ContactEmailResult, ContactEmailService, EmailConfigStatus};
use ysyw_extern_contracts::emailjs::{EmailJsApiService, EmailJsSendRequest, TemplateParams};
use ysyw_models::{contact::ContactEmailPayload, Sensitive};
use ysyw_shared_contracts::time::TimeService;
use ysyw_utils::trace_instrument;

const DEFAULT_SUBJECT: &str = "General Inquiry";
const SENT_AT_FORMAT: &str = "%B %-d, %Y at %I:%M %p UTC";

#[derive(Debug, Clone, Build)]
pub struct ContactEmailServiceImpl<Time, EmailJsApi> {
    time: Time,
    emailjs_api: EmailJsApi,
    config: Arc<ContactEmailServiceConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEmailServiceConfig {
    pub service_id: String,
    pub template_id: String,
    pub auto_reply_template_id: Option<String>,
    pub public_key: String,
    pub private_key: Option<Sensitive<String>>,
    /// Name of the recipient of contact messages.
    pub recipient_name: String,
    pub auto_reply: AutoReplySender,
}

/// Sender details shown in the auto-reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoReplySender {
    pub from_name: String,
    pub from_email: String,
    pub reply_to: String,
}

impl ContactEmailServiceConfig {
    pub fn status(&self) -> EmailConfigStatus {
        let service_id = !self.service_id.is_empty();
        let template_id = !self.template_id.is_empty();
        let public_key = !self.public_key.is_empty();
        EmailConfigStatus {
            service_id,
            template_id,
            auto_reply_template_id: self.auto_reply_template_id.is_some(),
            public_key,
            private_key: self.private_key.is_some(),
            is_valid: service_id && template_id && public_key,
        }
    }

    fn request(&self, template_id: &str, template_params: TemplateParams) -> EmailJsSendRequest {
        EmailJsSendRequest {
            service_id: self.service_id.clone(),
            template_id: template_id.into(),
            public_key: self.public_key.clone(),
            private_key: self.private_key.clone(),
            template_params,
        }
    }
}

impl<Time, EmailJsApi> ContactEmailService for ContactEmailServiceImpl<Time, EmailJsApi>
where
    Time: TimeService,
    EmailJsApi: EmailJsApiService,
{
    #[trace_instrument(skip(self))]
    async fn send_contact_email(&self, payload: ContactEmailPayload) -> ContactEmailResult {
        let status = self.config.status();
        if !status.is_valid {
            error!(?status, "EmailJS configuration is incomplete");
            return ContactEmailResult::failure(
                "EmailJS configuration is incomplete. Please check your configuration. Run \
                 `ysyw check-config` to debug.",
            );
        }

        let sent_at = self.time.now();
        let subject = Some(payload.subject)
            .filter(|subject| !subject.is_empty())
            .unwrap_or_else(|| DEFAULT_SUBJECT.into());

        let template_params = TemplateParams::new()
            .with("from_name", &payload.from_name)
            .with("from_email", &payload.from_email)
            .with("subject", subject)
            .with("message", payload.message.into_inner())
            .with("to_name", &self.config.recipient_name)
            .with("reply_to", &payload.from_email)
            .with("sent_at", format_sent_at(sent_at));

        info!(?template_params, "Sending contact email");

        let request = self.config.request(&self.config.template_id, template_params);
        if let Err(err) = self.emailjs_api.send(request).await {
            error!("Failed to send contact email: {err:#}");
            return ContactEmailResult::failure(format!("{err:#}"));
        }

        info!("Contact email sent successfully");

        self.auto_reply(payload.from_email, payload.from_name, sent_at)
            .await;

        ContactEmailResult::success(
            "Your message has been sent successfully! We'll get back to you soon.",
        )
    }

    #[trace_instrument(skip(self))]
    async fn send_auto_reply(&self, email: String, name: String) {
        self.auto_reply(email, name, self.time.now()).await;
    }

    fn config_status(&self) -> EmailConfigStatus {
        self.config.status()
    }
}

impl<Time, EmailJsApi> ContactEmailServiceImpl<Time, EmailJsApi>
where
    EmailJsApi: EmailJsApiService,
{
    async fn auto_reply(&self, email: String, name: String, sent_at: DateTime<Utc>) {
        let Some(template_id) = &self.config.auto_reply_template_id else {
            warn!("Auto-reply template id not configured. Skipping auto-reply.");
            return;
        };

        info!(to = %email, "Sending auto-reply");

        let sender = &self.config.auto_reply;
        let template_params = TemplateParams::new()
            .with("to_email", &email)
            .with("to_name", name)
            .with("from_name", &sender.from_name)
            .with("from_email", &sender.from_email)
            .with("reply_to", &sender.reply_to)
            .with("sent_at", format_sent_at(sent_at));

        match self
            .emailjs_api
            .send(self.config.request(template_id, template_params))
            .await
        {
            Ok(()) => info!(to = %email, "Auto-reply sent successfully"),
            Err(err) => error!("Auto-reply failed: {err:#}"),
        }
    }
}

fn format_sent_at(time: DateTime<Utc>) -> String {
    time.format(SENT_AT_FORMAT).to_string()
}
