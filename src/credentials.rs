use crate::config::Account;
use chrono::Utc;

/// Credentials for one run.
///
/// The email embeds the Unix time in whole seconds, so two runs started
/// within the same second produce the same address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Fresh credentials stamped with the current time.
    pub fn generate(account: &Account) -> Self {
        Self::at(account, Utc::now().timestamp())
    }

    /// Credentials for a given Unix timestamp (seconds).
    pub fn at(account: &Account, timestamp: i64) -> Self {
        Self {
            name: account.name.clone(),
            email: format!("user_{}@{}", timestamp, account.email_domain),
            password: account.password.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_format() {
        let creds = Credentials::at(&Account::default(), 1_700_000_000);
        assert_eq!(creds.email, "user_1700000000@example.com");
        assert_eq!(creds.password, "password123");
        assert_eq!(creds.name, "Test User");
    }

    #[test]
    fn test_same_second_collides() {
        let account = Account::default();
        assert_eq!(
            Credentials::at(&account, 42).email,
            Credentials::at(&account, 42).email
        );
    }

    #[test]
    fn test_one_second_apart_differs() {
        let account = Account::default();
        assert_ne!(
            Credentials::at(&account, 42).email,
            Credentials::at(&account, 43).email
        );
    }

    #[test]
    fn test_generate_uses_current_time() {
        let before = Utc::now().timestamp();
        let creds = Credentials::generate(&Account::default());
        let after = Utc::now().timestamp();

        let stamp: i64 = creds
            .email
            .trim_start_matches("user_")
            .trim_end_matches("@example.com")
            .parse()
            .unwrap();
        assert!(stamp >= before && stamp <= after);
    }

    #[test]
    fn test_custom_domain() {
        let account = Account {
            email_domain: "test.local".into(),
            ..Account::default()
        };
        let creds = Credentials::at(&account, 7);
        assert_eq!(creds.email, "user_7@test.local");
    }
}
