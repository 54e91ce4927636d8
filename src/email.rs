use async_trait::async_trait;
use lettre::{
    message::header::ContentType,
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::info;

use crate::config::EmailConfig;

/// Outbound mail collaborator, injected through `AppState` so the
/// authentication engine never touches a global transporter.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpMailer {
    pub fn from_config(cfg: &EmailConfig) -> anyhow::Result<Self> {
        let host = cfg
            .host
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("EMAIL_HOST not set"))?;
        let user = cfg
            .user
            .clone()
            .ok_or_else(|| anyhow::anyhow!("EMAIL_USER not set"))?;
        let pass = cfg
            .pass
            .clone()
            .ok_or_else(|| anyhow::anyhow!("EMAIL_PASS not set"))?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(host)?
            .credentials(Credentials::new(user.clone(), pass));
        if let Some(port) = cfg.port {
            builder = builder.port(port);
        }

        let from = cfg
            .from
            .clone()
            .unwrap_or_else(|| format!("\"TalentHub\" <{}>", user));

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        let message = Message::builder()
            .from(self.from.parse()?)
            .to(to.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;
        self.transport.send(message).await?;
        Ok(())
    }
}

/// Used when SMTP is not configured and in tests: logs instead of sending.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, _body: &str) -> anyhow::Result<()> {
        info!(%to, %subject, "email delivery skipped (no SMTP configured)");
        Ok(())
    }
}

pub fn otp_email_body(otp: &str) -> String {
    format!("Your OTP is {}. Valid for 15 minutes.", otp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingMailer {
        sent: Mutex<Vec<(String, String, String)>>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
            self.sent
                .lock()
                .unwrap()
                .push((to.into(), subject.into(), body.into()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn recording_double_captures_the_message() {
        let mailer = RecordingMailer {
            sent: Mutex::new(Vec::new()),
        };
        mailer
            .send("ana@x.com", "Password Reset OTP", &otp_email_body("123456"))
            .await
            .unwrap();

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "ana@x.com");
        assert!(sent[0].2.contains("123456"));
    }

    #[test]
    fn otp_body_contains_code_and_validity() {
        let body = otp_email_body("654321");
        assert!(body.contains("654321"));
        assert!(body.contains("15 minutes"));
    }
}
