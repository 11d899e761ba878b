use std::sync::Arc;

use chrono::{Duration, Utc};
use rand::Rng;
use uuid::Uuid;

use crate::domain::account::{contact_is_well_formed, Account, LookupKey, NewAccount, OtpProbe};
use crate::domain::errors::DomainError;
use crate::domain::ports::{AccountRepository, NotificationGateway};

use super::credentials;

/// Minimum password length for the password-based registration path.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Passcodes are valid for exactly this long after issuance.
pub const OTP_VALIDITY_MINUTES: i64 = 3;

/// Stored for federated registrations. Not a PHC string, so
/// `credentials::verify` can never accept it; the slot stays compatible with
/// every password-based code path until a real digest replaces it.
const FEDERATED_PLACEHOLDER: &str = "!federated";

/// Generate a 6-digit numeric passcode.
pub fn generate_otp_code() -> String {
    let code: u32 = rand::rng().random_range(100_000..1_000_000);
    code.to_string()
}

#[derive(Clone)]
pub struct IdentityService {
    accounts: Arc<dyn AccountRepository>,
    notifier: Arc<dyn NotificationGateway>,
}

impl IdentityService {
    pub fn new(accounts: Arc<dyn AccountRepository>, notifier: Arc<dyn NotificationGateway>) -> Self {
        Self { accounts, notifier }
    }

    pub fn register(
        &self,
        name: &str,
        mail: &str,
        phone: &str,
        password: &str,
    ) -> Result<Account, DomainError> {
        if name.trim().is_empty() || mail.trim().is_empty() || phone.trim().is_empty() {
            return Err(DomainError::Validation(
                "name, mail and phone are required".to_string(),
            ));
        }
        if !contact_is_well_formed(mail) {
            return Err(DomainError::Validation("invalid mail format".to_string()));
        }
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::Validation(format!(
                "password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }

        let password_hash = credentials::hash(password)?;
        self.accounts.create(NewAccount {
            name: name.to_string(),
            mail: mail.to_string(),
            phone: phone.to_string(),
            password_hash,
        })
    }

    /// Registration on behalf of an external identity provider that has
    /// already verified the contact address. No password, no strength check.
    pub fn register_federated(&self, name: &str, mail: &str) -> Result<Account, DomainError> {
        if name.trim().is_empty() || mail.trim().is_empty() {
            return Err(DomainError::Validation(
                "name and mail are required".to_string(),
            ));
        }
        if !contact_is_well_formed(mail) {
            return Err(DomainError::Validation("invalid mail format".to_string()));
        }

        self.accounts.create(NewAccount {
            name: name.to_string(),
            mail: mail.to_string(),
            phone: String::new(),
            password_hash: FEDERATED_PLACEHOLDER.to_string(),
        })
    }

    pub fn lookup(&self, key: &LookupKey) -> Result<Account, DomainError> {
        self.accounts
            .find(key)?
            .ok_or(DomainError::NotFound("account"))
    }

    pub fn change_password(&self, account_id: Uuid, new_password: &str) -> Result<(), DomainError> {
        if new_password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::Validation(format!(
                "password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }

        let password_hash = credentials::hash(new_password)?;
        if !self.accounts.update_password(account_id, &password_hash)? {
            return Err(DomainError::NotFound("account"));
        }
        Ok(())
    }

    /// Issue a fresh passcode, replacing any pending one, and dispatch it.
    /// Success is reported only after the send attempt completed.
    pub fn issue_otp(&self, contact: &str) -> Result<(), DomainError> {
        let code = generate_otp_code();
        let expires_at = Utc::now() + Duration::minutes(OTP_VALIDITY_MINUTES);

        if !self.accounts.store_otp(contact, &code, expires_at)? {
            return Err(DomainError::NotFound("account"));
        }

        self.notifier.send_otp(contact, &code)
    }

    /// Single-use verification: exactly one correct-code-before-expiry call
    /// consumes the passcode. The claim is a compare-and-clear at the store,
    /// so a concurrent invalidation cannot be read as still valid.
    pub fn verify_otp(&self, contact: &str, code: &str) -> Result<(), DomainError> {
        let now = Utc::now();
        if self.accounts.claim_otp(contact, code, now)? {
            return Ok(());
        }

        match self.accounts.otp_state(contact)? {
            OtpProbe::NoAccount => Err(DomainError::NotFound("account")),
            OtpProbe::NoneIssued => Err(DomainError::OtpMismatch),
            OtpProbe::Present(otp) => {
                if otp.code != code {
                    Err(DomainError::OtpMismatch)
                } else if otp.expires_at <= now {
                    Err(DomainError::OtpExpired)
                } else {
                    // Matching, unexpired, yet the claim lost: consumed or
                    // replaced between the two statements.
                    Err(DomainError::OtpMismatch)
                }
            }
        }
    }
}
