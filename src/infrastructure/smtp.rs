//! SMTP adapter for the notification gateway.

use std::time::Duration;

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::application::identity_service::OTP_VALIDITY_MINUTES;
use crate::config::SmtpConfig;
use crate::domain::errors::DomainError;
use crate::domain::ports::NotificationGateway;

/// Cap on how long a single delivery attempt may take.
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

pub struct SmtpNotificationGateway {
    mailer: SmtpTransport,
    from_address: String,
}

impl SmtpNotificationGateway {
    pub fn new(config: &SmtpConfig) -> Result<Self, DomainError> {
        let mut builder = SmtpTransport::starttls_relay(&config.host)
            .map_err(|e| DomainError::Internal(format!("SMTP transport setup failed: {e}")))?
            .port(config.port)
            .timeout(Some(SEND_TIMEOUT));

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            mailer: builder.build(),
            from_address: config.from_address.clone(),
        })
    }
}

impl NotificationGateway for SmtpNotificationGateway {
    fn send_otp(&self, contact: &str, code: &str) -> Result<(), DomainError> {
        let message = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|e| DomainError::Internal(format!("bad sender address: {e}")))?,
            )
            .to(contact
                .parse()
                .map_err(|_| DomainError::Validation("invalid contact address".to_string()))?)
            .subject("Your verification code")
            .header(ContentType::TEXT_PLAIN)
            .body(format!(
                "Your one-time passcode is {code}. It expires in {OTP_VALIDITY_MINUTES} minutes."
            ))
            .map_err(|e| DomainError::Internal(format!("message build failed: {e}")))?;

        // The transport detail stays in the log; callers see an opaque error.
        self.mailer.send(&message).map_err(|e| {
            log::error!("passcode delivery to {contact} failed: {e}");
            DomainError::Internal("passcode delivery failed".to_string())
        })?;

        log::info!("passcode dispatched to {contact}");
        Ok(())
    }
}
