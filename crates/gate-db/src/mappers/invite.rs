//! Invite entity <-> model mapper

use gate_core::entities::Invite;
use gate_core::value_objects::{ChatId, UserId};

use crate::models::InviteModel;

/// Convert InviteModel to Invite entity
impl From<InviteModel> for Invite {
    fn from(model: InviteModel) -> Self {
        Invite {
            id: model.id,
            chat_id: ChatId::new(model.chat_id),
            invite_link: model.invite_link,
            bound_user_id: UserId::new(model.bound_user_id),
            expires_at: model.expires_at,
            max_uses: model.max_uses,
            creates_join_request: model.creates_join_request,
            is_revoked: model.is_revoked,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
