use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chirpy_auth::config::PasswordConfig;
use chirpy_auth::AuthConfig;
use chirpy_auth::Authenticator;
use chirpy_auth::Credential;
use chirpy_auth::CredentialStore;
use chirpy_auth::CredentialStoreError;
use chirpy_auth::SubjectId;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Credential store backed by a map, standing in for the user database.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    credentials: RwLock<HashMap<String, Credential>>,
}

impl InMemoryCredentialStore {
    pub fn insert(&self, credential: Credential) {
        self.credentials
            .write()
            .unwrap()
            .insert(credential.email.clone(), credential);
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>, CredentialStoreError> {
        Ok(self.credentials.read().unwrap().get(email).cloned())
    }
}

/// Authenticator with cheap hashing parameters and a registered user store.
pub struct TestApp {
    pub authenticator: Authenticator,
    pub store: InMemoryCredentialStore,
}

impl TestApp {
    pub fn new() -> Self {
        let mut config = AuthConfig::from_secret(TEST_SECRET);
        config.password = PasswordConfig {
            memory_kib: 8 * 1024,
            iterations: 1,
            parallelism: 1,
        };

        Self {
            authenticator: Authenticator::new(&config).expect("Failed to build authenticator"),
            store: InMemoryCredentialStore::default(),
        }
    }

    /// Register a user and return their subject ID.
    pub fn register(&self, email: &str, password: &str) -> SubjectId {
        let subject_id = SubjectId::new();
        let hashed_password = self
            .authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        self.store.insert(Credential {
            subject_id,
            email: email.to_string(),
            hashed_password,
        });

        subject_id
    }
}
