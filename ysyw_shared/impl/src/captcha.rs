use ysyw_di::Build;
use ysyw_extern_contracts::recaptcha::RecaptchaApiService;
use ysyw_models::Sensitive;
use ysyw_shared_contracts::captcha::{CaptchaCheckError, CaptchaService};
use ysyw_utils::trace_instrument;

#[derive(Debug, Clone, Build)]
pub struct CaptchaServiceImpl<RecaptchaApi> {
    config: CaptchaServiceConfig,
    recaptcha_api: RecaptchaApi,
}

#[derive(Debug, Clone)]
pub enum CaptchaServiceConfig {
    Disabled,
    Recaptcha(RecaptchaCaptchaServiceConfig),
}

#[derive(Debug, Clone)]
pub struct RecaptchaCaptchaServiceConfig {
    pub sitekey: String,
    /// Responses are only verified with the siteverify endpoint if a secret
    /// is configured. Otherwise the presence of a response is sufficient.
    pub secret: Option<Sensitive<String>>,
    /// Only applied to responses that carry a score.
    pub min_score: f64,
}

impl<RecaptchaApi> CaptchaService for CaptchaServiceImpl<RecaptchaApi>
where
    RecaptchaApi: RecaptchaApiService,
{
    fn get_recaptcha_sitekey(&self) -> Option<String> {
        match &self.config {
            CaptchaServiceConfig::Disabled => None,
            CaptchaServiceConfig::Recaptcha(config) => Some(config.sitekey.clone()),
        }
    }

    #[trace_instrument(skip(self, response))]
    async fn check(&self, response: Option<&str>) -> Result<(), CaptchaCheckError> {
        let CaptchaServiceConfig::Recaptcha(config) = &self.config else {
            return Ok(());
        };

        let response = response
            .filter(|response| !response.is_empty())
            .ok_or(CaptchaCheckError::Required)?;

        let Some(secret) = &config.secret else {
            return Ok(());
        };

        let response = self.recaptcha_api.siteverify(response, secret).await?;
        // checkbox (v2) responses carry no score
        let ok = response.success
            && response
                .score
                .is_none_or(|score| score >= config.min_score);
        ok.then_some(()).ok_or(CaptchaCheckError::Failed)
    }
}

#[cfg(test)]
mod tests {
    use ysyw_extern_contracts::recaptcha::{MockRecaptchaApiService, RecaptchaSiteverifyResponse};
    use ysyw_utils::assert_matches;

    use super::*;

    fn make_sut(
        min_score: f64,
        secret: Option<&str>,
        recaptcha_api: MockRecaptchaApiService,
    ) -> CaptchaServiceImpl<MockRecaptchaApiService> {
        CaptchaServiceImpl {
            config: CaptchaServiceConfig::Recaptcha(RecaptchaCaptchaServiceConfig {
                sitekey: "sitekey".into(),
                secret: secret.map(|secret| secret.to_owned().into()),
                min_score,
            }),
            recaptcha_api,
        }
    }

    fn siteverify(success: bool, score: Option<f64>) -> MockRecaptchaApiService {
        MockRecaptchaApiService::new().with_siteverify(
            "captcha response".into(),
            "secret".into(),
            RecaptchaSiteverifyResponse { success, score },
        )
    }

    #[test]
    fn sitekey() {
        // Arrange
        let enabled = make_sut(0.5, None, MockRecaptchaApiService::new());
        let disabled = CaptchaServiceImpl {
            config: CaptchaServiceConfig::Disabled,
            recaptcha_api: MockRecaptchaApiService::new(),
        };

        // Act
        let enabled = enabled.get_recaptcha_sitekey();
        let disabled = disabled.get_recaptcha_sitekey();

        // Assert
        assert_eq!(enabled.as_deref(), Some("sitekey"));
        assert_eq!(disabled, None);
    }

    #[tokio::test]
    async fn ok() {
        // Arrange
        let sut = make_sut(0.5, Some("secret"), siteverify(true, Some(0.7)));

        // Act
        let result = sut.check(Some("captcha response")).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn ok_no_score() {
        // Arrange
        let sut = make_sut(0.0, Some("secret"), siteverify(true, None));

        // Act
        let result = sut.check(Some("captcha response")).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn ok_without_secret() {
        // Arrange
        let sut = make_sut(0.5, None, MockRecaptchaApiService::new());

        // Act
        let result = sut.check(Some("captcha response")).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn ok_disabled_no_response() {
        // Arrange
        let sut = CaptchaServiceImpl {
            config: CaptchaServiceConfig::Disabled,
            recaptcha_api: MockRecaptchaApiService::new(),
        };

        // Act
        let result = sut.check(None).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn ok_checkbox_response_ignores_min_score() {
        // Arrange
        let sut = make_sut(0.5, Some("secret"), siteverify(true, None));

        // Act
        let result = sut.check(Some("captcha response")).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn failed_insufficient_score() {
        // Arrange
        let sut = make_sut(0.7, Some("secret"), siteverify(true, Some(0.3)));

        // Act
        let result = sut.check(Some("captcha response")).await;

        // Assert
        assert_matches!(result, Err(CaptchaCheckError::Failed));
    }

    #[tokio::test]
    async fn failed_no_success() {
        // Arrange
        let sut = make_sut(0.5, Some("secret"), siteverify(false, None));

        // Act
        let result = sut.check(Some("captcha response")).await;

        // Assert
        assert_matches!(result, Err(CaptchaCheckError::Failed));
    }

    #[tokio::test]
    async fn required() {
        for response in [None, Some("")] {
            // Arrange
            let sut = make_sut(0.5, Some("secret"), MockRecaptchaApiService::new());

            // Act
            let result = sut.check(response).await;

            // Assert
            assert_matches!(result, Err(CaptchaCheckError::Required));
        }
    }
}
