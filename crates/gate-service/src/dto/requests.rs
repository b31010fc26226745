//! Request DTOs for service inputs

use serde::Deserialize;
use validator::Validate;

/// Set-bio request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetBioRequest {
    #[validate(length(min = 1, max = 4000, message = "Bio must be 1-4000 characters"))]
    pub bio: String,
}
