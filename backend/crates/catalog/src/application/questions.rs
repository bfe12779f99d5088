//! Question Board
//!
//! Every mutation requires the admin flag. On top of that, updating needs
//! the caller's id in the question's ownership tag, while deleting compares
//! the whole author string with the caller's email. The two ownership
//! checks are deliberately not merged.

use std::sync::Arc;

use auth::models::OwnershipTag;
use auth::{AuthorizationPolicy, Principal};
use kernel::id::QuestionId;
use platform::clock::Clock;

use crate::domain::entities::{NewQuestion, Question, QuestionPatch};
use crate::domain::repository::QuestionRepository;
use crate::error::{CatalogError, CatalogResult};

pub struct QuestionBoard<Q>
where
    Q: QuestionRepository,
{
    repo: Arc<Q>,
    policy: Arc<dyn AuthorizationPolicy>,
    clock: Arc<dyn Clock>,
}

impl<Q> QuestionBoard<Q>
where
    Q: QuestionRepository,
{
    pub fn new(repo: Arc<Q>, policy: Arc<dyn AuthorizationPolicy>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo,
            policy,
            clock,
        }
    }

    pub async fn list(&self) -> CatalogResult<Vec<Question>> {
        self.repo.list().await
    }

    pub async fn ask(
        &self,
        principal: &Principal,
        question: String,
        answer: String,
    ) -> CatalogResult<Question> {
        self.require_admin(principal)?;

        let author = OwnershipTag::for_account(&principal.first_name, principal.account_id)?;

        let created = self
            .repo
            .create(&NewQuestion {
                question,
                answer,
                author,
                created_on: self.clock.now(),
            })
            .await?;

        tracing::info!(
            account_id = %principal.account_id,
            question_id = %created.id,
            "Question created"
        );

        Ok(created)
    }

    pub async fn update(
        &self,
        principal: &Principal,
        id: QuestionId,
        patch: QuestionPatch,
    ) -> CatalogResult<Question> {
        self.require_admin(principal)?;
        let question = self.find(id).await?;

        if !self.policy.owns_resource(principal, &question.author) {
            tracing::warn!(
                account_id = %principal.account_id,
                question_id = %id,
                "Question update denied: not the owner"
            );
            return Err(CatalogError::Forbidden);
        }

        let updated = question.apply(patch);
        self.repo.save(&updated).await?;

        tracing::info!(account_id = %principal.account_id, question_id = %id, "Question updated");
        Ok(updated)
    }

    pub async fn delete(&self, principal: &Principal, id: QuestionId) -> CatalogResult<()> {
        self.require_admin(principal)?;
        let question = self.find(id).await?;

        if !self
            .policy
            .is_author_by_identifier(principal, question.author.as_str())
        {
            tracing::warn!(
                account_id = %principal.account_id,
                question_id = %id,
                "Question delete denied: author mismatch"
            );
            return Err(CatalogError::Forbidden);
        }

        if !self.repo.delete(id).await? {
            return Err(CatalogError::QuestionNotFound);
        }

        tracing::info!(account_id = %principal.account_id, question_id = %id, "Question deleted");
        Ok(())
    }

    async fn find(&self, id: QuestionId) -> CatalogResult<Question> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::QuestionNotFound)
    }

    fn require_admin(&self, principal: &Principal) -> CatalogResult<()> {
        if self.policy.require_admin(principal) {
            Ok(())
        } else {
            tracing::warn!(account_id = %principal.account_id, "Admin required");
            Err(CatalogError::Forbidden)
        }
    }
}
