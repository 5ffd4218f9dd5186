pub mod emailjs;
pub mod message_api;
pub mod recaptcha;
