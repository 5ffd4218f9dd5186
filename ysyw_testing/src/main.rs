use std::net::IpAddr;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing::info;
use ysyw_testing::{api::MessageApi, emailjs::EmailJs, recaptcha, start_server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Recaptcha { host, port, secret } => {
            info!("Recaptcha siteverify endpoint: http://{host}:{port}{}", recaptcha::SITEVERIFY_ROUTE);
            info!("Secret: {secret:?}");
            info!(
                "Valid recaptcha responses are \"success\" and \"success-SCORE\", where SCORE is a \
                 floating point number between 0 and 1"
            );
            start_server(host, port, recaptcha::router(secret)).await?
        }
        Command::Emailjs { host, port } => {
            info!("EmailJS endpoint: http://{host}:{port}/");
            info!("Public key: {:?}", ysyw_testing::emailjs::PUBLIC_KEY);
            info!(
                "Emails using the template {:?} are rejected",
                ysyw_testing::emailjs::FAILING_TEMPLATE_ID
            );
            start_server(host, port, EmailJs::default().router()).await?
        }
        Command::Api { host, port } => {
            info!("Message api base url: http://{host}:{port}/");
            info!(
                "Messages with the captcha token {:?} are rejected, messages from {:?} fail",
                ysyw_testing::api::INVALID_CAPTCHA_TOKEN,
                ysyw_testing::api::FAILING_NAME
            );
            start_server(host, port, MessageApi::default().router()).await?
        }
        Command::Completion { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                env!("CARGO_BIN_NAME"),
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the recaptcha testing server
    Recaptcha {
        #[arg(long, default_value = "127.0.0.1")]
        host: IpAddr,
        #[arg(long, default_value = "8001")]
        port: u16,
        #[arg(long, default_value = "test-secret")]
        secret: String,
    },
    /// Start the emailjs testing server
    Emailjs {
        #[arg(long, default_value = "127.0.0.1")]
        host: IpAddr,
        #[arg(long, default_value = "8003")]
        port: u16,
    },
    /// Start the message api testing server
    Api {
        #[arg(long, default_value = "127.0.0.1")]
        host: IpAddr,
        #[arg(long, default_value = "8004")]
        port: u16,
    },
    /// Generate shell completions
    Completion {
        /// The shell to generate completions for
        #[clap(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli() {
        Cli::command().debug_assert();
    }
}
