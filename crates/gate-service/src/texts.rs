//! User-facing message texts
//!
//! Every notification the engine sends through the gateway is built here, so
//! the wording lives in one place. Texts are short and non-technical;
//! internal detail stays in the logs.

use gate_core::entities::{Member, UserProfile};
use gate_core::value_objects::UserId;

pub const WELCOME_TEXT: &str = "Hello! This community is invite-only.\n\
    Send /apply to request membership. Once the administrator approves you, \
    you'll receive a personal invite link.\n\n\
    Other commands:\n\
    /setbio <text> - set your member bio\n\
    /look_bio <username> - look up a member's bio";

pub const ALREADY_MEMBER_TEXT: &str = "You are already a member of this community.";

pub const APPLICATION_SUBMITTED_TEXT: &str =
    "Your application has been submitted for review. You'll hear back once the \
     administrator makes a decision.";

pub const APPLICATION_APPROVED_ADMIN_TEXT: &str = "Approved - invite sent to the applicant.";

pub const APPLICATION_DENIED_ADMIN_TEXT: &str = "Application denied and removed.";

pub const APPLICATION_NOT_FOUND_TEXT: &str = "Application not found.";

pub const APPROVAL_FAILED_TEXT: &str =
    "Could not issue the invite right now. The application is still pending - please try again.";

pub const WELCOME_ABOARD_TEXT: &str = "Welcome aboard! You're now a member of the community.";

pub const BIO_SAVED_TEXT: &str = "Bio saved.";

pub const BIO_USAGE_TEXT: &str = "Usage: /setbio <text>";

pub const BIO_LOOKUP_USAGE_TEXT: &str = "Usage: /look_bio <username>";

pub const MEMBER_NOT_FOUND_TEXT: &str = "That member is not in the community records.";

pub const UNKNOWN_COMMAND_TEXT: &str = "Unknown command. Try /help or /apply.";

pub const SOMETHING_WENT_WRONG_TEXT: &str = "Oops, something went wrong. We're on it.";

/// Notification sent to the administrator when someone applies
pub fn application_received(requester: UserId, profile: &UserProfile) -> String {
    let username = profile
        .username
        .as_deref()
        .map_or_else(|| "\u{2014}".to_string(), |u| format!("@{u}"));
    format!(
        "New membership application\n\
         Name: {}\n\
         Username: {username}\n\
         Id: {requester}\n\n\
         What should happen with it?",
        profile.full_name(),
    )
}

/// Message delivering the personal invite link to an approved applicant
pub fn invite_issued(invite_link: &str, ttl_hours: i64) -> String {
    format!(
        "Your personal invite link (valid {ttl_hours} hours, single use):\n\n\
         {invite_link}\n\n\
         Note: the link opens a join request - press \"Request to join\" and \
         you'll be let in."
    )
}

/// Bio card shown for a member lookup
pub fn bio_card(member: &Member) -> String {
    let username = member
        .username
        .as_deref()
        .map_or_else(|| "\u{2014}".to_string(), |u| format!("@{u}"));
    let bio = if member.bio.is_empty() {
        "\u{2014}"
    } else {
        member.bio.as_str()
    };
    format!("{}\nUsername: {username}\n\n{bio}", member.display_name())
}
