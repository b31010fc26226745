//! PostgreSQL implementation of InviteRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use gate_core::entities::Invite;
use gate_core::error::DomainError;
use gate_core::traits::{InviteRepository, RepoResult};

use crate::models::InviteModel;

use super::error::map_db_error;

/// PostgreSQL implementation of InviteRepository
#[derive(Clone)]
pub struct PgInviteRepository {
    pool: PgPool,
}

impl PgInviteRepository {
    /// Create a new PgInviteRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InviteRepository for PgInviteRepository {
    #[instrument(skip(self))]
    async fn find_by_link(&self, invite_link: &str) -> RepoResult<Option<Invite>> {
        let result = sqlx::query_as::<_, InviteModel>(
            r#"
            SELECT id, chat_id, invite_link, bound_user_id, expires_at, max_uses,
                   creates_join_request, is_revoked, created_at, updated_at
            FROM invites
            WHERE invite_link = $1
            "#,
        )
        .bind(invite_link)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Invite::from))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Invite>> {
        let result = sqlx::query_as::<_, InviteModel>(
            r#"
            SELECT id, chat_id, invite_link, bound_user_id, expires_at, max_uses,
                   creates_join_request, is_revoked, created_at, updated_at
            FROM invites
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Invite::from))
    }

    #[instrument(skip(self))]
    async fn revoke(&self, id: Uuid) -> RepoResult<bool> {
        // Conditional flip: rows_affected tells whether this call consumed it
        let result = sqlx::query(
            r#"
            UPDATE invites
            SET is_revoked = TRUE, updated_at = NOW()
            WHERE id = $1 AND is_revoked = FALSE
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }

        // Distinguish "already revoked" from "no such invite"
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM invites WHERE id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        if exists {
            Ok(false)
        } else {
            Err(DomainError::InviteNotFound(id.to_string()))
        }
    }
}
