//! Token Manager
//!
//! Issues, validates and revokes the per-account session token.
//!
//! ```text
//! NoToken --issue--> Live(token, expiry) --time passes--> Expired
//!                     |    ^                               |
//!                     |    +--issue (<= 60s left)----------+
//!                     +--revoke (expiry = now - 61s)--> Expired
//! ```
//!
//! Expiry is only ever checked lazily in `validate`; nothing sweeps
//! expired rows.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use platform::clock::Clock;

use crate::application::account_directory::AccountDirectory;
use crate::application::config::{AuthConfig, to_chrono};
use crate::domain::entity::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{AccountId, SessionToken};
use crate::error::{AuthError, AuthResult};

type TokenGenerator = Arc<dyn Fn() -> SessionToken + Send + Sync>;

/// Result of an issue call
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: SessionToken,
    pub expires_at: DateTime<Utc>,
    /// The existing live token was handed out again
    pub reused: bool,
}

pub struct TokenManager<R>
where
    R: AccountRepository,
{
    directory: AccountDirectory<R>,
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
    config: Arc<AuthConfig>,
    generate: TokenGenerator,
}

impl<R> TokenManager<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>, config: Arc<AuthConfig>) -> Self {
        Self {
            directory: AccountDirectory::new(repo.clone()),
            repo,
            clock,
            config,
            generate: Arc::new(SessionToken::generate),
        }
    }

    /// Swap the random source (collision tests)
    pub fn with_token_generator<F>(mut self, generate: F) -> Self
    where
        F: Fn() -> SessionToken + Send + Sync + 'static,
    {
        self.generate = Arc::new(generate);
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Issue with the configured TTL
    pub async fn issue(&self, account_id: AccountId) -> AuthResult<IssuedToken> {
        self.issue_with_ttl(account_id, self.config.token_ttl).await
    }

    /// Issue a token, or hand back the current one if it is still fresh
    ///
    /// A live token with more than `token_min_freshness` left is returned
    /// unchanged. Otherwise a new token replaces it with
    /// `expiry = now + ttl`. A candidate the store rejects because another
    /// account holds it live is discarded and regenerated.
    pub async fn issue_with_ttl(
        &self,
        account_id: AccountId,
        ttl: Duration,
    ) -> AuthResult<IssuedToken> {
        let mut account = self
            .directory
            .find_by_id(account_id)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        let now = self.clock.now();

        if let (Some(remaining), Some(token), Some(expires_at)) = (
            account.token_remaining(now),
            account.token.clone(),
            account.token_expires_at,
        ) {
            if remaining > self.config.token_min_freshness_chrono() {
                tracing::debug!(
                    account_id = %account_id,
                    token = %token.fingerprint(),
                    "Reusing live session token"
                );
                return Ok(IssuedToken {
                    token,
                    expires_at,
                    reused: true,
                });
            }
        }

        let expires_at = now + to_chrono(ttl);
        let token = self.store_fresh_token(&mut account, expires_at, now).await?;

        tracing::info!(
            account_id = %account_id,
            token = %token.fingerprint(),
            expires_at = %expires_at,
            "Issued session token"
        );

        Ok(IssuedToken {
            token,
            expires_at,
            reused: false,
        })
    }

    async fn store_fresh_token(
        &self,
        account: &mut Account,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> AuthResult<SessionToken> {
        for attempt in 1..=self.config.token_issue_attempts.max(1) {
            let candidate = (self.generate)();
            account.set_token(candidate.clone(), expires_at);

            match self.repo.save(account, now).await {
                Ok(()) => return Ok(candidate),
                Err(AuthError::TokenCollision) => {
                    tracing::warn!(
                        account_id = %account.account_id,
                        attempt,
                        "Generated token collides with a live token, retrying"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Err(AuthError::Internal(
            "could not allocate a unique session token".into(),
        ))
    }

    /// Resolve a token to its account; expired or unknown tokens yield `None`
    ///
    /// Never refreshes, clears or deletes anything.
    pub async fn validate(&self, token: &str) -> AuthResult<Option<Account>> {
        if token.is_empty() {
            return Ok(None);
        }

        let Some(account) = self.directory.find_by_token(token).await? else {
            return Ok(None);
        };

        if account.has_live_token(self.clock.now()) {
            Ok(Some(account))
        } else {
            tracing::debug!(account_id = %account.account_id, "Expired session token presented");
            Ok(None)
        }
    }

    /// Force the account's token into the past
    ///
    /// The token string stays in place, so the last active token remains
    /// traceable while reading as expired.
    pub async fn revoke(&self, account_id: AccountId) -> AuthResult<()> {
        let mut account = self
            .directory
            .find_by_id(account_id)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        let Some(token) = account.token.clone() else {
            return Ok(());
        };

        let now = self.clock.now();
        account.backdate_token(now, self.config.revoke_backdate_chrono());
        self.repo.save(&account, now).await?;

        tracing::info!(
            account_id = %account_id,
            token = %token.fingerprint(),
            "Revoked session token"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::NewAccount;
    use crate::domain::value_object::{Email, UserPassword};
    use crate::infra::memory::InMemoryAccountRepository;
    use chrono::Duration as ChronoDuration;
    use platform::clock::ManualClock;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixture {
        repo: Arc<InMemoryAccountRepository>,
        clock: ManualClock,
        manager: TokenManager<InMemoryAccountRepository>,
    }

    fn fixture() -> Fixture {
        let repo = Arc::new(InMemoryAccountRepository::new());
        let clock = ManualClock::at_epoch();
        let manager = TokenManager::new(
            repo.clone(),
            Arc::new(clock.clone()),
            Arc::new(AuthConfig::default()),
        );
        Fixture {
            repo,
            clock,
            manager,
        }
    }

    async fn seed(repo: &InMemoryAccountRepository, email: &str) -> AccountId {
        repo.create(&NewAccount {
            email: Email::new(email).unwrap(),
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            password_hash: UserPassword::from_db("$argon2id$stub"),
            is_admin: false,
            created_on: Utc::now(),
        })
        .await
        .unwrap()
        .account_id
    }

    #[tokio::test]
    async fn test_issue_reuses_fresh_token() {
        let f = fixture();
        let id = seed(&f.repo, "a@x.com").await;

        let first = f.manager.issue(id).await.unwrap();
        assert!(!first.reused);

        f.clock.advance(ChronoDuration::seconds(30));
        let second = f.manager.issue(id).await.unwrap();

        assert!(second.reused);
        assert_eq!(first.token, second.token);
        assert_eq!(first.expires_at, second.expires_at);
    }

    #[tokio::test]
    async fn test_issue_rotates_near_expiry() {
        let f = fixture();
        let id = seed(&f.repo, "a@x.com").await;
        let ttl = Duration::from_secs(100);

        let first = f.manager.issue_with_ttl(id, ttl).await.unwrap();

        // 40s left: inside the 60s freshness floor
        f.clock.advance(ChronoDuration::seconds(60));
        let second = f.manager.issue_with_ttl(id, ttl).await.unwrap();

        assert!(!second.reused);
        assert_ne!(first.token, second.token);
        assert_eq!(second.expires_at, f.clock.now() + ChronoDuration::seconds(100));

        // The old string no longer resolves
        assert!(f.manager.validate(first.token.as_str()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_exactly_sixty_seconds_left_rotates() {
        let f = fixture();
        let id = seed(&f.repo, "a@x.com").await;

        let first = f.manager.issue_with_ttl(id, Duration::from_secs(120)).await.unwrap();
        f.clock.advance(ChronoDuration::seconds(60));
        let second = f.manager.issue(id).await.unwrap();

        assert_ne!(first.token, second.token);
    }

    #[tokio::test]
    async fn test_validate_expiry_boundary() {
        let f = fixture();
        let id = seed(&f.repo, "a@x.com").await;
        let issued = f.manager.issue_with_ttl(id, Duration::from_secs(100)).await.unwrap();

        f.clock.set(issued.expires_at - ChronoDuration::seconds(1));
        let found = f.manager.validate(issued.token.as_str()).await.unwrap();
        assert_eq!(found.map(|a| a.account_id), Some(id));

        f.clock.set(issued.expires_at + ChronoDuration::seconds(1));
        assert!(f.manager.validate(issued.token.as_str()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_validate_does_not_delete_expired() {
        let f = fixture();
        let id = seed(&f.repo, "a@x.com").await;
        let issued = f.manager.issue_with_ttl(id, Duration::from_secs(10)).await.unwrap();

        f.clock.advance(ChronoDuration::seconds(20));
        assert!(f.manager.validate(issued.token.as_str()).await.unwrap().is_none());

        let row = f.repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(row.token, Some(issued.token));
    }

    #[tokio::test]
    async fn test_revoke_backdates_and_keeps_row() {
        let f = fixture();
        let id = seed(&f.repo, "a@x.com").await;
        let issued = f.manager.issue(id).await.unwrap();

        f.manager.revoke(id).await.unwrap();

        assert!(f.manager.validate(issued.token.as_str()).await.unwrap().is_none());
        let row = f.repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(row.token.as_ref(), Some(&issued.token));
        assert_eq!(
            row.token_expires_at,
            Some(f.clock.now() - ChronoDuration::seconds(61))
        );

        // A revoked token is never handed out again
        let next = f.manager.issue(id).await.unwrap();
        assert!(!next.reused);
        assert_ne!(next.token, issued.token);
    }

    #[tokio::test]
    async fn test_revoke_without_token_is_noop() {
        let f = fixture();
        let id = seed(&f.repo, "a@x.com").await;
        f.manager.revoke(id).await.unwrap();
        assert!(f.repo.find_by_id(id).await.unwrap().unwrap().token_expires_at.is_none());
    }

    #[tokio::test]
    async fn test_issue_unknown_account() {
        let f = fixture();
        let err = f.manager.issue(AccountId::new(99)).await.unwrap_err();
        assert!(matches!(err, AuthError::AccountNotFound));
    }

    #[tokio::test]
    async fn test_collision_with_live_token_retries() {
        let f = fixture();
        let alice = seed(&f.repo, "alice@x.com").await;
        let bob = seed(&f.repo, "bob@x.com").await;

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let manager = TokenManager::new(
            f.repo.clone(),
            Arc::new(f.clock.clone()),
            Arc::new(AuthConfig::default()),
        )
        .with_token_generator(move || {
            // First two candidates are the same string
            match counter.fetch_add(1, Ordering::SeqCst) {
                0 | 1 => SessionToken::from_db("dup"),
                _ => SessionToken::from_db("unique"),
            }
        });

        let a = manager.issue(alice).await.unwrap();
        assert_eq!(a.token.as_str(), "dup");

        let b = manager.issue(bob).await.unwrap();
        assert_eq!(b.token.as_str(), "unique");
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        // Alice still owns her token
        let found = manager.validate("dup").await.unwrap().unwrap();
        assert_eq!(found.account_id, alice);
    }

    #[tokio::test]
    async fn test_expired_token_string_may_be_reused() {
        let f = fixture();
        let alice = seed(&f.repo, "alice@x.com").await;
        let bob = seed(&f.repo, "bob@x.com").await;

        let manager = TokenManager::new(
            f.repo.clone(),
            Arc::new(f.clock.clone()),
            Arc::new(AuthConfig::default()),
        )
        .with_token_generator(|| SessionToken::from_db("same"));

        manager.issue_with_ttl(alice, Duration::from_secs(10)).await.unwrap();
        f.clock.advance(ChronoDuration::seconds(20));

        let b = manager.issue(bob).await.unwrap();
        assert_eq!(b.token.as_str(), "same");
        let found = manager.validate("same").await.unwrap().unwrap();
        assert_eq!(found.account_id, bob);
    }

    #[tokio::test]
    async fn test_collision_retries_are_bounded() {
        let f = fixture();
        let alice = seed(&f.repo, "alice@x.com").await;
        let bob = seed(&f.repo, "bob@x.com").await;

        let manager = TokenManager::new(
            f.repo.clone(),
            Arc::new(f.clock.clone()),
            Arc::new(AuthConfig::default()),
        )
        .with_token_generator(|| SessionToken::from_db("stuck"));

        manager.issue(alice).await.unwrap();
        let err = manager.issue(bob).await.unwrap_err();
        assert!(matches!(err, AuthError::Internal(_)));

        // The live holder keeps the string; the loser stores nothing
        let found = manager.validate("stuck").await.unwrap().unwrap();
        assert_eq!(found.account_id, alice);
        let row = f.repo.find_by_id(bob).await.unwrap().unwrap();
        assert!(row.token.is_none());
    }

    #[tokio::test]
    async fn test_validate_empty_token() {
        let f = fixture();
        assert!(f.manager.validate("").await.unwrap().is_none());
    }
}
