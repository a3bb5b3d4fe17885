use std::sync::Arc;

use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::config::MailConfig;

#[derive(Debug, Clone)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub text: Option<String>,
    pub html: Option<String>,
    pub cc: Option<String>,
}

/// Outbound SMTP mailer. OTP mails are awaited by their callers; courtesy
/// notifications go through [`Mailer::send_detached`] and only log on
/// failure.
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl Mailer {
    pub fn from_config(config: &MailConfig) -> anyhow::Result<Self> {
        let mut builder = if config.encryption == "ssl" {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?.port(config.port)
        } else {
            // Plaintext transport for local relays (MailHog and friends).
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host).port(config.port)
        };

        if !config.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            from: config.from_address.clone(),
        })
    }

    pub async fn send(&self, message: MailMessage) -> anyhow::Result<()> {
        let MailMessage {
            to,
            subject,
            text,
            html,
            cc,
        } = message;

        let mut builder = Message::builder()
            .from(self.from.parse()?)
            .to(to.parse()?)
            .subject(subject);

        if let Some(cc) = cc {
            builder = builder.cc(cc.parse()?);
        }

        let email = match (html, text) {
            (Some(html), _) => builder.header(ContentType::TEXT_HTML).body(html)?,
            (None, Some(text)) => builder.header(ContentType::TEXT_PLAIN).body(text)?,
            (None, None) => builder.body(String::new())?,
        };

        self.transport.send(email).await?;
        Ok(())
    }

    /// Fire-and-forget delivery; a failed send is logged, never surfaced.
    pub fn send_detached(self: &Arc<Self>, message: MailMessage) {
        let mailer = Arc::clone(self);
        tokio::spawn(async move {
            let to = message.to.clone();
            if let Err(err) = mailer.send(message).await {
                tracing::warn!(recipient = %to, error = %err, "failed to send notification mail");
            }
        });
    }
}
