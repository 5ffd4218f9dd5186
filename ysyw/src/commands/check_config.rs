use ysyw_config::Config;
use ysyw_di::Provide;
use ysyw_email_contracts::ContactEmailService;

use crate::environment::{types::ContactEmail, Provider};

/// Builds all services from the config and reports the email configuration.
pub fn check_config(config: &Config, verbose: bool) -> anyhow::Result<()> {
    let mut provider = Provider::new(config)?;
    let contact_email: ContactEmail = provider.provide();
    let status = contact_email.config_status();

    verbose.then(|| println!("{config:#?}"));

    println!("EmailJS configuration:");
    println!("  service id:             {}", present(status.service_id));
    println!("  template id:            {}", present(status.template_id));
    println!(
        "  auto reply template id: {}",
        present(status.auto_reply_template_id)
    );
    println!("  public key:             {}", present(status.public_key));
    println!("  private key:            {}", present(status.private_key));

    if !status.is_valid {
        // without an email channel the message api is the only way to deliver messages
        anyhow::ensure!(
            config.api.is_some(),
            "Neither EmailJS nor the message api are configured"
        );
        println!("EmailJS configuration is incomplete, messages are only saved");
    }
    println!("Config is valid");

    Ok(())
}

fn present(value: bool) -> &'static str {
    if value {
        "set"
    } else {
        "missing"
    }
}
