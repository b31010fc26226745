//! Application entity <-> model mapper

use gate_core::entities::{Application, ApplicationStatus};
use gate_core::value_objects::UserId;

use crate::models::ApplicationModel;

/// Convert ApplicationModel to Application entity
impl From<ApplicationModel> for Application {
    fn from(model: ApplicationModel) -> Self {
        Application {
            id: model.id,
            user_id: UserId::new(model.user_id),
            status: ApplicationStatus::from_str_lossy(&model.status),
            invite_id: model.invite_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
