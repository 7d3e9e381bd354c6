//! Credential store: username -> password digest and registration time.
//!
//! Passwords are digested with unsalted SHA-256. That is only adequate for a
//! local, single-user tool; anything exposed needs a salted, slow KDF.

use std::sync::Arc;

use chrono::Local;
use indexmap::IndexMap;
use ring::digest;

use crate::error::{Error, Result};
use crate::model::UserRecord;
use crate::storage::{self, Backend, Namespace};

const MIN_USERNAME_LEN: usize = 3;
const MIN_PASSWORD_LEN: usize = 6;

type Users = IndexMap<String, UserRecord>;

pub struct CredentialStore {
    backend: Arc<dyn Backend>,
}

impl CredentialStore {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    // Register a new user and persist the record before returning
    pub fn register(&self, username: &str, password: &str) -> Result<()> {
        validate_credentials(username, password)?;

        let mut users = self.load();
        if users.contains_key(username) {
            return Err(Error::DuplicateUser(username.to_string()));
        }

        users.insert(
            username.to_string(),
            UserRecord {
                password_hash: hash_password(password),
                created_at: Local::now().naive_local(),
            },
        );
        storage::save(self.backend.as_ref(), &Namespace::Users, &users)?;

        tracing::info!(username, "user registered");
        Ok(())
    }

    // Check a username/password pair against the stored digest
    pub fn login(&self, username: &str, password: &str) -> Result<()> {
        if username.is_empty() || password.is_empty() {
            return Err(Error::validation("Username and password cannot be empty"));
        }

        let users = self.load();
        match users.get(username) {
            Some(record) if record.password_hash == hash_password(password) => {
                tracing::info!(username, "login succeeded");
                Ok(())
            }
            _ => {
                tracing::info!(username, "login rejected");
                Err(Error::Authentication)
            }
        }
    }

    pub fn user_exists(&self, username: &str) -> bool {
        self.load().contains_key(username)
    }

    /// Usernames in registration order.
    pub fn list_usernames(&self) -> Vec<String> {
        self.load().into_keys().collect()
    }

    fn load(&self) -> Users {
        storage::load_or_default(self.backend.as_ref(), &Namespace::Users)
    }
}

fn validate_credentials(username: &str, password: &str) -> Result<()> {
    if username.is_empty() || password.is_empty() {
        return Err(Error::validation("Username and password cannot be empty"));
    }
    if username.chars().count() < MIN_USERNAME_LEN {
        return Err(Error::validation(format!(
            "Username must be at least {} characters long",
            MIN_USERNAME_LEN
        )));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(Error::validation(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LEN
        )));
    }

    // Letters, digits and underscores, with at least one letter or digit
    let allowed = username.chars().all(|c| c.is_alphanumeric() || c == '_');
    let has_alnum = username.chars().any(char::is_alphanumeric);
    if !allowed || !has_alnum {
        return Err(Error::validation(
            "Username can only contain letters, numbers, and underscores",
        ));
    }

    Ok(())
}

fn hash_password(password: &str) -> String {
    let digest = digest::digest(&digest::SHA256, password.as_bytes());
    hex::encode(digest.as_ref())
}
