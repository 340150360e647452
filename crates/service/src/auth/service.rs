use std::sync::Arc;

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use serde_json::Value;
use tracing::{info, instrument, warn};

use super::domain::{AuthSession, Claims, LoginInput};
use super::errors::AuthError;
use crate::repository::ResourceRepository;
use crate::resources::{PASSWORD_FIELD, USERS};

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>, token_ttl_secs: u64) -> Self {
        Self { jwt_secret: jwt_secret.into(), token_ttl_secs }
    }
}

/// Auth business service independent of web framework
pub struct AuthService {
    repo: Arc<ResourceRepository>,
    cfg: AuthConfig,
}

impl AuthService {
    pub fn new(repo: Arc<ResourceRepository>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    /// Check a username/password pair against the stored users and issue a token.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::{AuthConfig, AuthService, domain::LoginInput};
    /// use service::repository::ResourceRepository;
    /// use service::resources::USERS;
    /// use service::storage::memory_store::MemoryStore;
    ///
    /// let repo = Arc::new(ResourceRepository::new(Arc::new(MemoryStore::default())));
    /// let mut alice = serde_json::Map::new();
    /// alice.insert("username".into(), "alice".into());
    /// alice.insert("password".into(), "pw".into());
    /// tokio_test::block_on(repo.create(&USERS, alice));
    ///
    /// let svc = AuthService::new(repo, AuthConfig::new("secret", 3600));
    /// let input = LoginInput { username: "alice".into(), password: "pw".into() };
    /// let session = tokio_test::block_on(svc.login(input)).unwrap();
    /// assert_eq!(session.message, "Successfully logged in as alice");
    /// assert_eq!(svc.decode(&session.token).unwrap().username, "alice");
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let user = self
            .repo
            .find_first(&USERS, |r| r.get("username").and_then(Value::as_str) == Some(input.username.as_str()))
            .await;
        let matched = user
            .as_ref()
            .and_then(|u| u.get(PASSWORD_FIELD))
            .and_then(Value::as_str)
            .is_some_and(|stored| stored == input.password);
        if !matched {
            warn!("login_failed");
            return Err(AuthError::Unauthorized(input.username));
        }

        let token = self.issue(&input.username)?;
        info!("login_succeeded");
        Ok(AuthSession { message: format!("Successfully logged in as {}", input.username), token })
    }

    /// Sign a token for `username`, valid for the configured ttl.
    pub fn issue(&self, username: &str) -> Result<String, AuthError> {
        let now = chrono::Utc::now().timestamp() as usize;
        let claims = Claims { username: username.to_string(), iat: now, exp: now + self.cfg.token_ttl_secs as usize };
        encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Verify signature and expiry; returns the claims.
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        let key = DecodingKey::from_secret(self.cfg.jwt_secret.as_bytes());
        decode::<Claims>(token, &key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }
}
