//! PostgreSQL implementation of MemberRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use gate_core::entities::{Member, MemberRole, UserProfile};
use gate_core::traits::{MemberRepository, RepoResult};
use gate_core::value_objects::UserId;

use crate::models::MemberModel;

use super::error::map_db_error;

/// PostgreSQL implementation of MemberRepository
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    /// Create a new PgMemberRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    #[instrument(skip(self))]
    async fn find_by_user_id(&self, user_id: UserId) -> RepoResult<Option<Member>> {
        let result = sqlx::query_as::<_, MemberModel>(
            r#"
            SELECT id, user_id, username, first_name, last_name, role, bio,
                   created_at, updated_at
            FROM members
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Member::from))
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<Member>> {
        let result = sqlx::query_as::<_, MemberModel>(
            r#"
            SELECT id, user_id, username, first_name, last_name, role, bio,
                   created_at, updated_at
            FROM members
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Member::from))
    }

    #[instrument(skip(self, profile))]
    async fn upsert_by_user_id(
        &self,
        user_id: UserId,
        profile: &UserProfile,
    ) -> RepoResult<Member> {
        // Conflict resolution: name fields follow the platform, bio and role stay
        let result = sqlx::query_as::<_, MemberModel>(
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
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Member::from(result))
    }

    #[instrument(skip(self, profile, bio))]
    async fn set_bio(
        &self,
        user_id: UserId,
        profile: &UserProfile,
        bio: &str,
    ) -> RepoResult<Member> {
        let result = sqlx::query_as::<_, MemberModel>(
            r#"
            INSERT INTO members (id, user_id, username, first_name, last_name, role, bio)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_id) DO UPDATE
            SET username = EXCLUDED.username,
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                bio = EXCLUDED.bio,
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
        .bind(bio)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Member::from(result))
    }

    #[instrument(skip(self))]
    async fn delete_by_user_id(&self, user_id: UserId) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM members WHERE user_id = $1
            "#,
        )
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
