use ysyw_core_contact_impl::ContactFeatureServiceImpl;
use ysyw_email_impl::ContactEmailServiceImpl;
use ysyw_extern_impl::{
    emailjs::EmailJsApiServiceImpl, message_api::MessageApiServiceImpl,
    recaptcha::RecaptchaApiServiceImpl,
};
use ysyw_shared_impl::{captcha::CaptchaServiceImpl, time::TimeServiceImpl};
use ysyw_templates_impl::TemplateServiceImpl;

// API
pub type WebServer = ysyw_api_web::WebServer<ContactFeature, Template>;

// Core
pub type ContactFeature = ContactFeatureServiceImpl<Captcha, ContactEmail, MessageApi>;

// Email
pub type ContactEmail = ContactEmailServiceImpl<Time, EmailJsApi>;

// Extern
pub type EmailJsApi = EmailJsApiServiceImpl;
pub type MessageApi = MessageApiServiceImpl;
pub type RecaptchaApi = RecaptchaApiServiceImpl;

// Shared
pub type Captcha = CaptchaServiceImpl<RecaptchaApi>;
pub type Time = TimeServiceImpl;

// Templates
pub type Template = TemplateServiceImpl;
