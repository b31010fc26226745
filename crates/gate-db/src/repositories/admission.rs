//! PostgreSQL implementation of AdmissionStore
//!
//! The two multi-row sequences of the admission flow run here, each inside a
//! single transaction so an inbound event commits all of its row changes or
//! none of them.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use gate_core::entities::{Invite, MemberRole, UserProfile};
use gate_core::error::DomainError;
use gate_core::traits::{AdmissionStore, AdmitOutcome, RepoResult};
use gate_core::value_objects::UserId;

use crate::models::MemberModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of AdmissionStore
#[derive(Clone)]
pub struct PgAdmissionStore {
    pool: PgPool,
}

impl PgAdmissionStore {
    /// Create a new PgAdmissionStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdmissionStore for PgAdmissionStore {
    #[instrument(skip(self, invite))]
    async fn approve_application(&self, application_id: Uuid, invite: &Invite) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO invites (id, chat_id, invite_link, bound_user_id, expires_at,
                                 max_uses, creates_join_request, is_revoked,
                                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(invite.id)
        .bind(invite.chat_id.into_inner())
        .bind(&invite.invite_link)
        .bind(invite.bound_user_id.into_inner())
        .bind(invite.expires_at)
        .bind(invite.max_uses)
        .bind(invite.creates_join_request)
        .bind(invite.is_revoked)
        .bind(invite.created_at)
        .bind(invite.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::InviteLinkExists))?;

        let result = sqlx::query(
            r#"
            UPDATE applications
            SET status = 'approved', invite_id = $2, updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(application_id)
        .bind(invite.id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            tx.rollback().await.map_err(map_db_error)?;
            return Err(DomainError::ApplicationNotPending(application_id));
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self, profile))]
    async fn admit_member(
        &self,
        invite_id: Uuid,
        user_id: UserId,
        profile: &UserProfile,
    ) -> RepoResult<AdmitOutcome> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // The conditional revoke is the serialization point: of two racing
        // attempts exactly one sees a row change here.
        let consumed = sqlx::query(
            r#"
            UPDATE invites
            SET is_revoked = TRUE, updated_at = NOW()
            WHERE id = $1 AND is_revoked = FALSE
            "#,
        )
        .bind(invite_id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if consumed.rows_affected() == 0 {
            tx.rollback().await.map_err(map_db_error)?;
            return Ok(AdmitOutcome::AlreadyConsumed);
        }

        let member = sqlx::query_as::<_, MemberModel>(
            r#"
            INSERT INTO members (id, user_id, username, first_name, last_name, role, bio)
            VALUES ($1, $2, $3, $4, $5, $6, '')
            ON CONFLICT (user_id) DO UPDATE
            SET username = EXCLUDED.username,
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                updated_at = NOW()
            RETURNING id, user_id, username, first_name, last_name, role, bio,
                      created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id.into_inner())
        .bind(&profile.username)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(MemberRole::Member.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r#"
            DELETE FROM applications WHERE user_id = $1
            "#,
        )
        .bind(user_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(AdmitOutcome::Admitted(member.into()))
    }
}
