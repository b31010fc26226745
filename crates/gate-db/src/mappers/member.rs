//! Member entity <-> model mapper

use gate_core::entities::{Member, MemberRole};
use gate_core::value_objects::UserId;

use crate::models::MemberModel;

/// Convert MemberModel to Member entity
impl From<MemberModel> for Member {
    fn from(model: MemberModel) -> Self {
        Member {
            id: model.id,
            user_id: UserId::new(model.user_id),
            username: model.username,
            first_name: model.first_name,
            last_name: model.last_name,
            role: MemberRole::from_str_lossy(&model.role),
            bio: model.bio,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
