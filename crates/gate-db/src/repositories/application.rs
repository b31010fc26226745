//! PostgreSQL implementation of ApplicationRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use gate_core::entities::Application;
use gate_core::error::DomainError;
use gate_core::traits::{ApplicationRepository, RepoResult};
use gate_core::value_objects::UserId;

use crate::models::ApplicationModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of ApplicationRepository
#[derive(Clone)]
pub struct PgApplicationRepository {
    pool: PgPool,
}

impl PgApplicationRepository {
    /// Create a new PgApplicationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationRepository for PgApplicationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Application>> {
        let result = sqlx::query_as::<_, ApplicationModel>(
            r#"
            SELECT id, user_id, status, invite_id, created_at, updated_at
            FROM applications
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Application::from))
    }

    #[instrument(skip(self))]
    async fn find_pending_by_user(&self, user_id: UserId) -> RepoResult<Option<Application>> {
        let result = sqlx::query_as::<_, ApplicationModel>(
            r#"
            SELECT id, user_id, status, invite_id, created_at, updated_at
            FROM applications
            WHERE user_id = $1 AND status = 'pending'
            "#,
        )
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Application::from))
    }

    #[instrument(skip(self, application))]
    async fn create(&self, application: &Application) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO applications (id, user_id, status, invite_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(application.id)
        .bind(application.user_id.into_inner())
        .bind(application.status.as_str())
        .bind(application.invite_id)
        .bind(application.created_at)
        .bind(application.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::PendingApplicationExists))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM applications WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete_all_for_user(&self, user_id: UserId) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM applications WHERE user_id = $1
            "#,
        )
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
