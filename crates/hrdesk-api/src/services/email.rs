//! Email service for sending invite notifications via SMTP.

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;

use hrdesk_core::Config;

/// Email service for sending invite notifications.
/// No-op if invite emails are disabled or SMTP is not configured.
#[derive(Clone)]
pub struct EmailService {
    mailer: Arc<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
    frontend_url: Option<String>,
}

impl EmailService {
    /// Create email service from config. Returns `None` if disabled or SMTP not configured.
    pub fn from_config(config: &Config) -> Option<Self> {
        if !config.invite_emails_enabled() {
            tracing::debug!("Invite emails disabled (INVITE_EMAILS_ENABLED=false)");
            return None;
        }
        let host = config.smtp_host()?;
        let from = config.smtp_from()?.to_string();
        let port = config.smtp_port().unwrap_or(587);

        let mailer = if config.smtp_tls() {
            let b = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host).ok()?;
            let b = b.port(port);
            let b = if let (Some(u), Some(p)) = (config.smtp_user(), config.smtp_password()) {
                b.credentials(Credentials::new(u.to_string(), p.to_string()))
            } else {
                b
            };
            tracing::info!(
                host = %host,
                port = port,
                "Email service initialized (SMTP with STARTTLS)"
            );
            b.build()
        } else {
            let b = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host).port(port);
            let b = if let (Some(u), Some(p)) = (config.smtp_user(), config.smtp_password()) {
                b.credentials(Credentials::new(u.to_string(), p.to_string()))
            } else {
                b
            };
            tracing::info!(host = %host, port = port, "Email service initialized (SMTP)");
            b.build()
        };

        Some(Self {
            mailer: Arc::new(mailer),
            from,
            frontend_url: config.frontend_url().map(String::from),
        })
    }

    /// Send the invite email with the redemption token. The token appears only
    /// here and in the issuance response, never in listings.
    pub async fn send_invite(
        &self,
        to: &str,
        organization_name: &str,
        token: &str,
    ) -> Result<(), String> {
        let to_addr: Mailbox = to
            .parse()
            .map_err(|_| format!("Invalid recipient address: {}", to))?;
        let from_addr: Mailbox = self
            .from
            .parse()
            .map_err(|e| format!("Invalid SMTP_FROM: {}", e))?;

        let body = match &self.frontend_url {
            Some(base) => format!(
                "You have been invited to join {} on HRDesk.\n\n\
                 Accept your invite here: {}/invites/accept?token={}\n\n\
                 The invite expires in 7 days.",
                organization_name, base, token
            ),
            None => format!(
                "You have been invited to join {} on HRDesk.\n\n\
                 Your invite token: {}\n\n\
                 The invite expires in 7 days.",
                organization_name, token
            ),
        };

        let email = Message::builder()
            .from(from_addr)
            .to(to_addr)
            .subject(format!("Invitation to join {}", organization_name))
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| e.to_string())?;

        self.mailer.send(email).await.map_err(|e| e.to_string())?;
        tracing::info!(organization = %organization_name, "Invite email sent");
        Ok(())
    }
}
