//! User service.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use guardmogo_common::{AppError, AppResult, IdGenerator};
use guardmogo_db::{entities::user, repositories::UserRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// User service for business logic.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

/// Input for creating a new account.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupInput {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    #[validate(length(max = 64))]
    pub first_name: Option<String>,

    #[validate(length(max = 64))]
    pub last_name: Option<String>,

    #[validate(length(max = 128))]
    pub display_name: Option<String>,
}

/// Input for signing in.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SigninInput {
    #[validate(length(min = 1))]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub fn new(user_repo: UserRepository) -> Self {
        Self {
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a new account and return the user with a session token.
    pub async fn signup(&self, input: SignupInput) -> AppResult<(user::Model, String)> {
        input.validate()?;

        let email = input.email.trim().to_string();

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict(
                "An account with this email already exists".to_string(),
            ));
        }

        let password_hash = hash_password(&input.password)?;
        let user_id = self.id_gen.generate();
        let token = self.id_gen.generate_token();

        let display_name = input.display_name.or_else(|| {
            match (input.first_name.as_deref(), input.last_name.as_deref()) {
                (Some(first), Some(last)) => Some(format!("{first} {last}")),
                (Some(name), None) | (None, Some(name)) => Some(name.to_string()),
                (None, None) => None,
            }
        });

        let model = user::ActiveModel {
            id: Set(user_id),
            email: Set(email.clone()),
            email_lower: Set(email.to_lowercase()),
            display_name: Set(display_name),
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            role: Set(user::Role::User),
            password_hash: Set(password_hash),
            token: Set(Some(token.clone())),
            reports_count: Set(0),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(None),
        };

        let user = self.user_repo.create(model).await?;

        Ok((user, token))
    }

    /// Authenticate by email and password, returning the user with a session
    /// token.
    ///
    /// Wrong email and wrong password produce the same error so the endpoint
    /// cannot be used to probe which addresses are registered.
    pub async fn signin(&self, input: SigninInput) -> AppResult<(user::Model, String)> {
        input.validate()?;

        let user = self
            .user_repo
            .find_by_email(&input.email)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !verify_password(&input.password, &user.password_hash)? {
            return Err(AppError::Unauthorized);
        }

        // Reuse the active session token, minting one if the account has none.
        if let Some(ref token) = user.token {
            let token = token.clone();
            return Ok((user, token));
        }

        let token = self.id_gen.generate_token();
        let mut active: user::ActiveModel = user.into();
        active.token = Set(Some(token.clone()));
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        let user = self.user_repo.update(active).await?;

        Ok((user, token))
    }

    /// Authenticate a user by session token.
    pub async fn authenticate_by_token(&self, token: &str) -> AppResult<user::Model> {
        self.user_repo
            .find_by_token(token)
            .await?
            .ok_or(AppError::Unauthorized)
    }

    /// Invalidate the user's current session by rotating the token.
    pub async fn signout(&self, user_id: &str) -> AppResult<()> {
        let user = self.user_repo.get_by_id(user_id).await?;
        let new_token = self.id_gen.generate_token();

        let mut active: user::ActiveModel = user.into();
        active.token = Set(Some(new_token));
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.user_repo.update(active).await?;

        Ok(())
    }

    /// Get a user by ID.
    pub async fn get(&self, id: &str) -> AppResult<user::Model> {
        self.user_repo.get_by_id(id).await
    }
}

/// Hash a password using Argon2.
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_user(id: &str, email: &str, password: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            email: email.to_string(),
            email_lower: email.to_lowercase(),
            display_name: Some("Kofi".to_string()),
            first_name: Some("Kofi".to_string()),
            last_name: Some("Asante".to_string()),
            role: user::Role::User,
            password_hash: hash_password(password).unwrap(),
            token: Some("token123".to_string()),
            reports_count: 0,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn service_with_results(results: Vec<Vec<user::Model>>) -> UserService {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results(results)
                .into_connection(),
        );
        UserService::new(UserRepository::new(db))
    }

    #[test]
    fn test_hash_password() {
        let hash = hash_password("correct horse battery").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(hash.len() > 50);
    }

    #[test]
    fn test_verify_password_correct() {
        let hash = hash_password("correct horse battery").unwrap();

        assert!(verify_password("correct horse battery", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_wrong() {
        let hash = hash_password("correct horse battery").unwrap();

        assert!(!verify_password("wrong horse", &hash).unwrap());
    }

    #[tokio::test]
    async fn test_signup_rejects_invalid_email() {
        let service = service_with_results(vec![]);

        let result = service
            .signup(SignupInput {
                email: "not-an-email".to_string(),
                password: "password123".to_string(),
                first_name: None,
                last_name: None,
                display_name: None,
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_signup_rejects_short_password() {
        let service = service_with_results(vec![]);

        let result = service
            .signup(SignupInput {
                email: "ama@example.com".to_string(),
                password: "short".to_string(),
                first_name: None,
                last_name: None,
                display_name: None,
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_signup_rejects_duplicate_email() {
        let existing = create_test_user("user1", "ama@example.com", "password123");
        let service = service_with_results(vec![vec![existing]]);

        let result = service
            .signup(SignupInput {
                email: "ama@example.com".to_string(),
                password: "password123".to_string(),
                first_name: None,
                last_name: None,
                display_name: None,
            })
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_signin_wrong_password_is_unauthorized() {
        let existing = create_test_user("user1", "ama@example.com", "password123");
        let service = service_with_results(vec![vec![existing]]);

        let result = service
            .signin(SigninInput {
                email: "ama@example.com".to_string(),
                password: "wrong-password".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_signin_unknown_email_is_unauthorized() {
        let service = service_with_results(vec![vec![]]);

        let result = service
            .signin(SigninInput {
                email: "nobody@example.com".to_string(),
                password: "password123".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_signin_returns_session_token() {
        let existing = create_test_user("user1", "ama@example.com", "password123");
        let service = service_with_results(vec![vec![existing]]);

        let (user, token) = service
            .signin(SigninInput {
                email: "ama@example.com".to_string(),
                password: "password123".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(user.id, "user1");
        assert_eq!(token, "token123");
    }

    #[tokio::test]
    async fn test_authenticate_by_token_invalid() {
        let service = service_with_results(vec![vec![]]);

        let result = service.authenticate_by_token("bogus").await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }
}
