use std::future::Future;

use thiserror::Error;

/// Human verification of form submissions.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait CaptchaService: Send + Sync + 'static {
    /// Returns the public site key of the challenge widget, or `None` if
    /// captcha verification is disabled.
    fn get_recaptcha_sitekey(&self) -> Option<String>;

    /// Checks the response token produced by the challenge widget.
    fn check<'a>(
        &self,
        response: Option<&'a str>,
    ) -> impl Future<Output = Result<(), CaptchaCheckError>> + Send;
}

#[derive(Debug, Error)]
pub enum CaptchaCheckError {
    #[error("A captcha response is required.")]
    Required,
    #[error("The response is invalid or the user is probably not human.")]
    Failed,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockCaptchaService {
    pub fn with_get_recaptcha_sitekey(mut self, sitekey: Option<&str>) -> Self {
        self.expect_get_recaptcha_sitekey()
            .return_const(sitekey.map(str::to_owned));
        self
    }

    pub fn with_check(
        mut self,
        response: Option<&'static str>,
        result: Result<(), CaptchaCheckError>,
    ) -> Self {
        self.expect_check()
            .once()
            .withf(move |x| *x == response)
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }
}
