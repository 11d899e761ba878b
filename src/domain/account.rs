use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Key for resolving an account. Callers state which identifier kind they
/// hold instead of the store sniffing string formats.
#[derive(Debug, Clone)]
pub enum LookupKey {
    ById(Uuid),
    ByContact(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishlistLine {
    pub product_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub id: Uuid,
    pub recipient: String,
    pub street: String,
    pub district: String,
    pub state: String,
    pub pincode: String,
    pub contact_phone: String,
}

#[derive(Debug, Clone)]
pub struct NewAddress {
    pub recipient: String,
    pub street: String,
    pub district: String,
    pub state: String,
    pub pincode: String,
    pub contact_phone: String,
}

/// One-time passcode state. The code and its expiry are written and cleared
/// together, never separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredOtp {
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

/// Result of inspecting an account's OTP slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtpProbe {
    NoAccount,
    NoneIssued,
    Present(StoredOtp),
}

#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub mail: String,
    pub phone: String,
    pub password_hash: String,
    pub cart: Vec<CartLine>,
    pub wishlist: Vec<WishlistLine>,
    pub addresses: Vec<Address>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub mail: String,
    pub phone: String,
    pub password_hash: String,
}

/// Check the `local@domain.tld` shape: exactly one `@`, no whitespace, a
/// non-empty local part, and a dot-separated domain with non-empty labels
/// around the last dot.
pub fn contact_is_well_formed(contact: &str) -> bool {
    if contact.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = contact.splitn(2, '@');
    let (Some(local), Some(domain)) = (parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_address() {
        assert!(contact_is_well_formed("user@example.com"));
    }

    #[test]
    fn accepts_subdomains_and_tags() {
        assert!(contact_is_well_formed("user.name+tag@mail.example.co.uk"));
    }

    #[test]
    fn rejects_missing_at() {
        assert!(!contact_is_well_formed("not-an-email"));
    }

    #[test]
    fn rejects_missing_domain_dot() {
        assert!(!contact_is_well_formed("user@localhost"));
    }

    #[test]
    fn rejects_empty_local_part() {
        assert!(!contact_is_well_formed("@example.com"));
    }

    #[test]
    fn rejects_empty_domain() {
        assert!(!contact_is_well_formed("user@"));
    }

    #[test]
    fn rejects_whitespace() {
        assert!(!contact_is_well_formed("user name@example.com"));
    }

    #[test]
    fn rejects_double_at() {
        assert!(!contact_is_well_formed("user@@example.com"));
    }

    #[test]
    fn rejects_trailing_dot_domain() {
        assert!(!contact_is_well_formed("user@example."));
    }
}
