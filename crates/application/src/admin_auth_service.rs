use std::fmt::Write;
use std::sync::Arc;

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use portal_core::{AdminIdentity, AppError, AppResult};

/// Repository port resolving stored bearer token hashes.
#[async_trait]
pub trait AdminTokenRepository: Send + Sync {
    /// Finds the admin owning an unexpired token with this SHA-256 hash.
    async fn find_admin_by_token_hash(&self, token_hash: &str)
    -> AppResult<Option<AdminIdentity>>;
}

/// Computes the SHA-256 hex digest under which a bearer token is stored.
#[must_use]
pub fn hash_token(raw_token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw_token.as_bytes());
    let result = hasher.finalize();

    result
        .iter()
        .fold(String::with_capacity(64), |mut acc, byte| {
            let _ = write!(acc, "{byte:02x}");
            acc
        })
}

/// Resolves bearer tokens into admin identities.
///
/// Token issuance belongs to the login flow; this service only answers
/// "is this caller an admin".
#[derive(Clone)]
pub struct AdminAuthService {
    repository: Arc<dyn AdminTokenRepository>,
}

impl AdminAuthService {
    /// Creates a service from a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn AdminTokenRepository>) -> Self {
        Self { repository }
    }

    /// Authenticates a raw bearer token and requires the admin role.
    pub async fn authenticate_bearer(&self, raw_token: &str) -> AppResult<AdminIdentity> {
        let raw_token = raw_token.trim();
        if raw_token.is_empty() {
            return Err(AppError::Unauthorized("No token provided".to_owned()));
        }

        let identity = self
            .repository
            .find_admin_by_token_hash(hash_token(raw_token).as_str())
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid token".to_owned()))?;

        if !identity.is_admin() {
            return Err(AppError::Forbidden("Admin access required".to_owned()));
        }

        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;

    use portal_core::{AdminIdentity, AppError, AppResult};

    use super::{AdminAuthService, AdminTokenRepository, hash_token};

    struct FakeTokenRepository {
        tokens: HashMap<String, AdminIdentity>,
    }

    #[async_trait]
    impl AdminTokenRepository for FakeTokenRepository {
        async fn find_admin_by_token_hash(
            &self,
            token_hash: &str,
        ) -> AppResult<Option<AdminIdentity>> {
            Ok(self.tokens.get(token_hash).cloned())
        }
    }

    fn service() -> AdminAuthService {
        AdminAuthService::new(Arc::new(FakeTokenRepository {
            tokens: HashMap::from([
                (
                    hash_token("admin-token"),
                    AdminIdentity::new(1, "admin", "admin"),
                ),
                (
                    hash_token("support-token"),
                    AdminIdentity::new(2, "support", "support"),
                ),
            ]),
        }))
    }

    #[test]
    fn hash_is_lowercase_sha256_hex() {
        assert_eq!(
            hash_token("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[tokio::test]
    async fn admin_token_resolves_identity() {
        let identity = service().authenticate_bearer("admin-token").await;
        assert!(matches!(identity, Ok(ref admin) if admin.admin_id() == 1));
    }

    #[tokio::test]
    async fn unknown_token_is_unauthorized() {
        let result = service().authenticate_bearer("forged").await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn non_admin_role_is_forbidden() {
        let result = service().authenticate_bearer("support-token").await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
