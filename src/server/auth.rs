// file: src/server/auth.rs
// description: admin credential check against a configured salted password hash
// reference: https://docs.rs/sha2

use crate::config::AdminConfig;
use rand::Rng;
use rand::distributions::Alphanumeric;
use sha2::{Digest, Sha256};

const SALT_LENGTH: usize = 16;

/// Hash iterations; each round feeds the previous digest back in.
const ROUNDS: u32 = 10_000;

/// Salted, iterated SHA-256 in the `<salt>$<hex digest>` form stored in
/// `admin.password_hash`. A fresh random salt is drawn on every call.
pub fn hash_password(password: &str) -> String {
    let salt: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SALT_LENGTH)
        .map(char::from)
        .collect();
    hash_password_with_salt(&salt, password)
}

pub fn hash_password_with_salt(salt: &str, password: &str) -> String {
    let mut digest = Sha256::new()
        .chain_update(salt.as_bytes())
        .chain_update(password.as_bytes())
        .finalize();

    for _ in 1..ROUNDS {
        digest = Sha256::new()
            .chain_update(digest)
            .chain_update(salt.as_bytes())
            .chain_update(password.as_bytes())
            .finalize();
    }

    format!("{}${:x}", salt, digest)
}

#[derive(Debug, Clone)]
pub struct AdminCredentials {
    username: String,
    password_hash: Option<String>,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password_hash: Option<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.map(|stored| match stored.split_once('$') {
                Some((salt, digest)) => format!("{}${}", salt, digest.to_ascii_lowercase()),
                None => stored,
            }),
        }
    }

    pub fn from_config(config: &AdminConfig) -> Self {
        Self::new(config.username.clone(), config.password_hash.clone())
    }

    pub fn login_enabled(&self) -> bool {
        self.password_hash.is_some()
    }

    pub fn verify(&self, username: &str, password: &str) -> bool {
        let Some(expected) = &self.password_hash else {
            return false;
        };
        let Some((salt, _)) = expected.split_once('$') else {
            return false;
        };
        let actual = hash_password_with_salt(salt, password);
        let digest_matches = actual
            .bytes()
            .zip(expected.bytes())
            .fold(actual.len() == expected.len(), |eq, (a, b)| eq & (a == b));
        digest_matches && username == self.username
    }
}
