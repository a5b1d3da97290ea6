//! Outbound email delivery over SMTP.
//!
//! When SMTP is not configured the mailer logs the message instead of
//! sending it, so local development works without a mail server.

use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::config::SmtpConfig;
use crate::errors::{AppError, AppResult};

#[derive(Clone)]
pub struct Mailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
}

impl Mailer {
    /// Build a mailer from SMTP settings. Returns a log-only mailer
    /// when no SMTP host is configured.
    pub fn from_config(config: &SmtpConfig) -> AppResult<Self> {
        let from = config.from.clone();

        let Some(host) = config.host.as_deref() else {
            tracing::warn!("SMTP not configured, emails will be logged instead of sent");
            return Ok(Self {
                transport: None,
                from,
            });
        };

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|e| AppError::internal(format!("Invalid SMTP host: {}", e)))?
            .port(config.port);

        if let (Some(user), Some(pass)) = (config.user.clone(), config.pass.clone()) {
            builder = builder.credentials(Credentials::new(user, pass));
        }

        Ok(Self {
            transport: Some(builder.build()),
            from,
        })
    }

    /// Send the account verification email containing the activation link.
    pub async fn send_verification_email(
        &self,
        to: &str,
        name: &str,
        verify_url: &str,
    ) -> AppResult<()> {
        let subject = "Verifikasi Akun Videobelajar";
        let body = format!(
            "Halo {},\n\n\
             Terima kasih telah mendaftar di Videobelajar.\n\
             Klik tautan berikut untuk memverifikasi akun Anda:\n\n\
             {}\n\n\
             Abaikan email ini jika Anda tidak merasa mendaftar.",
            name, verify_url
        );

        self.send(to, subject, &body).await
    }

    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        let Some(transport) = &self.transport else {
            tracing::info!(to = %to, subject = %subject, "Email (log-only): {}", body);
            return Ok(());
        };

        let message = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|e| AppError::internal(format!("Invalid sender address: {}", e)))?,
            )
            .to(to
                .parse()
                .map_err(|e| AppError::internal(format!("Invalid recipient address: {}", e)))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| AppError::internal(format!("Failed to build email: {}", e)))?;

        transport
            .send(message)
            .await
            .map_err(|e| AppError::internal(format!("Failed to send email: {}", e)))?;

        tracing::info!(to = %to, subject = %subject, "Email sent");
        Ok(())
    }
}
