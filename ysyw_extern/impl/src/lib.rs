pub mod emailjs;
pub mod http;
pub mod message_api;
pub mod recaptcha;
