use std::sync::Arc;

use ysyw_api_web::WebServerConfig;
use ysyw_config::Config;
use ysyw_di::provider;
use ysyw_email_impl::{AutoReplySender, ContactEmailServiceConfig};
use ysyw_extern_impl::{
    emailjs::EmailJsApiServiceConfig, http::HttpClient, message_api::MessageApiServiceConfig,
    recaptcha::RecaptchaApiServiceConfig,
};
use ysyw_models::Sensitive;
use ysyw_shared_impl::captcha::{CaptchaServiceConfig, RecaptchaCaptchaServiceConfig};

pub mod types;

provider! {
    /// The default provider, capable of providing all the dependencies
    pub Provider {
        // API
        web_server_config: WebServerConfig,

        // Extern
        http_client: HttpClient,
        message_api_service_config: MessageApiServiceConfig,
        emailjs_api_service_config: EmailJsApiServiceConfig,
        recaptcha_api_service_config: RecaptchaApiServiceConfig,

        // Shared
        captcha_service_config: CaptchaServiceConfig,

        // Email
        contact_email_service_config: Arc<ContactEmailServiceConfig>,
    }
}

impl Provider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        // API
        let web_server_config = WebServerConfig {
            addr: config.http.address,
            site_title: config.site.title.as_str().into(),
        };

        // Extern
        let http_client = HttpClient::new(*config.http.client_timeout)?;

        let message_api_service_config =
            MessageApiServiceConfig::new(config.api.as_ref().map(|api| &api.base_url))?;

        let emailjs_api_service_config = EmailJsApiServiceConfig::new(&config.emailjs.endpoint)?;

        let recaptcha_api_service_config = RecaptchaApiServiceConfig::new(
            config
                .recaptcha
                .as_ref()
                .and_then(|recaptcha| recaptcha.siteverify_endpoint_override.clone()),
        )?;

        // Shared
        let captcha_service_config = match &config.recaptcha {
            Some(recaptcha) => {
                anyhow::ensure!(
                    !recaptcha.sitekey.is_empty(),
                    "recaptcha.sitekey must not be empty"
                );
                anyhow::ensure!(
                    (0.0..=1.0).contains(&recaptcha.min_score),
                    "recaptcha.min_score must be between 0 and 1"
                );
                CaptchaServiceConfig::Recaptcha(RecaptchaCaptchaServiceConfig {
                    sitekey: recaptcha.sitekey.clone(),
                    secret: non_empty(recaptcha.secret.as_deref()).map(Sensitive),
                    min_score: recaptcha.min_score,
                })
            }
            None => CaptchaServiceConfig::Disabled,
        };

        // Email
        let contact_email_service_config = ContactEmailServiceConfig {
            service_id: config.emailjs.service_id.clone(),
            template_id: config.emailjs.template_id.clone(),
            auto_reply_template_id: non_empty(Some(&config.emailjs.auto_reply_template_id)),
            public_key: config.emailjs.public_key.clone(),
            private_key: non_empty(config.emailjs.private_key.as_deref()).map(Sensitive),
            recipient_name: config.contact.recipient_name.clone(),
            auto_reply: AutoReplySender {
                from_name: config.auto_reply.from_name.clone(),
                from_email: config.auto_reply.from_email.clone(),
                reply_to: config.auto_reply.reply_to.clone(),
            },
        }
        .into();

        Ok(Self {
            _cache: Default::default(),

            // API
            web_server_config,

            // Extern
            http_client,
            message_api_service_config,
            emailjs_api_service_config,
            recaptcha_api_service_config,

            // Shared
            captcha_service_config,

            // Email
            contact_email_service_config,
        })
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|value| !value.is_empty()).cloned()
}

#[cfg(test)]
mod tests {
    use ysyw_di::Provide;
    use ysyw_email_contracts::ContactEmailService;

    use super::*;
    use crate::environment::types::{ContactEmail, WebServer};

    #[test]
    fn provide_web_server() {
        let config = ysyw_config::load_dev_config().unwrap();
        let mut provider = Provider::new(&config).unwrap();
        let _: WebServer = provider.provide();
    }

    #[test]
    fn empty_optional_values_are_disabled() {
        // Arrange
        let config = ysyw_config::load_with_override(
            &[ysyw_config::DEV_CONFIG_PATH],
            &[r#"
                [emailjs]
                auto_reply_template_id = ""
                private_key = ""

                [recaptcha]
                sitekey = "test-sitekey"
                secret = ""
            "#],
        )
        .unwrap();

        // Act
        let mut provider = Provider::new(&config).unwrap();

        // Assert
        let contact_email: ContactEmail = provider.provide();
        let status = contact_email.config_status();
        assert!(status.is_valid);
        assert!(!status.auto_reply_template_id);
        assert!(!status.private_key);

        let captcha: CaptchaServiceConfig = provider.provide();
        ysyw_utils::assert_matches!(
            captcha,
            CaptchaServiceConfig::Recaptcha(RecaptchaCaptchaServiceConfig { secret: None, .. })
        );
    }

    #[test]
    fn invalid_min_score() {
        let config = ysyw_config::load_with_override(
            &[ysyw_config::DEV_CONFIG_PATH],
            &["recaptcha.min_score = 1.5"],
        )
        .unwrap();
        assert!(Provider::new(&config).is_err());
    }
}
