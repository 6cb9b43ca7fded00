use std::sync::Arc;

use anyhow::Context as _;
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::ApiConfig;
use crate::domain::repository::Mailer;
use crate::error::ApiServiceError;

const OTP_SUBJECT: &str = "Verify your email for MENTPAT";

/// SMTP mailer over STARTTLS. With no relay host configured every send fails
/// with `MailDeliveryFailed`.
#[derive(Clone)]
pub struct SmtpMailer {
    inner: Option<(Arc<AsyncSmtpTransport<Tokio1Executor>>, Mailbox)>,
}

impl SmtpMailer {
    pub fn new(config: &ApiConfig) -> anyhow::Result<Self> {
        if config.mail_host.is_empty() {
            tracing::warn!("MAIL_HOST not set, otp requests will fail");
            return Ok(Self::disabled());
        }

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.mail_host)
            .context("build smtp transport")?
            .port(config.mail_port)
            .credentials(Credentials::new(
                config.mail_user.clone(),
                config.mail_pass.clone(),
            ))
            .build();
        let from: Mailbox = format!("{} <{}>", config.mail_from_name, config.mail_user)
            .parse()
            .context("parse MAIL_FROM_NAME / MAIL_USER as a mailbox")?;

        Ok(Self {
            inner: Some((Arc::new(transport), from)),
        })
    }

    pub fn disabled() -> Self {
        Self { inner: None }
    }
}

impl Mailer for SmtpMailer {
    async fn send_otp(&self, email: &str, code: &str) -> Result<(), ApiServiceError> {
        let Some((transport, from)) = &self.inner else {
            tracing::error!("no smtp relay configured, cannot send otp");
            return Err(ApiServiceError::MailDeliveryFailed);
        };

        let to: Mailbox = email.parse().map_err(|e| {
            tracing::warn!(error = %e, "recipient is not a valid mailbox");
            ApiServiceError::MailDeliveryFailed
        })?;
        let message = Message::builder()
            .from(from.clone())
            .to(to)
            .subject(OTP_SUBJECT)
            .header(ContentType::TEXT_HTML)
            .body(otp_html(code))
            .map_err(|e| {
                tracing::error!(error = %e, "failed to build otp message");
                ApiServiceError::MailDeliveryFailed
            })?;

        transport.send(message).await.map_err(|e| {
            tracing::error!(error = %e, "smtp delivery failed");
            ApiServiceError::MailDeliveryFailed
        })?;
        Ok(())
    }
}

fn otp_html(code: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
  <body style="font-family: Arial, sans-serif; background: #f4f4f7; padding: 24px;">
    <div style="max-width: 480px; margin: 0 auto; background: #ffffff; border-radius: 8px; padding: 32px;">
      <h2 style="margin-top: 0;">Welcome to MENTPAT</h2>
      <p>Use the code below to verify your email address.</p>
      <p style="font-size: 32px; font-weight: bold; letter-spacing: 6px; text-align: center;">{code}</p>
      <p>This code expires in 5 minutes. If you did not request it, ignore this email.</p>
    </div>
  </body>
</html>"#
    )
}
