//! Outcome types returned by the admission services
//!
//! Rejections are ordinary values here, not errors: a turned-away join
//! attempt or a missing application is a handled, expected result of the
//! state machine.

use gate_core::entities::{Application, Invite, Member};

/// Result of an apply request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// A pending application now exists (created now or found from before)
    Submitted(Application),
    /// The requester is already a member; nothing was created
    AlreadyMember,
}

/// Result of an administrator decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionOutcome {
    /// Application approved; the credential went out to the applicant
    Approved(Invite),
    /// Application denied and deleted
    Denied,
    /// The application no longer exists (or was already resolved)
    NotFound,
}

/// Why a join attempt was turned away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// No invite link was presented
    NoInvite,
    /// The link is not one of ours
    UnknownInvite,
    /// The credential was already consumed or revoked
    Revoked,
    /// The credential is bound to a different chat
    WrongChat,
    /// The credential is past its expiry
    Expired,
}

/// Result of a join attempt validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// The attempt passed every gate; the member row exists now
    Admitted(Member),
    /// The attempt was declined
    Rejected(RejectReason),
    /// The attempting identity did not match the invite's bound identity;
    /// the invite was burned for everyone
    ImpersonationRejected,
}

/// Result of a membership change notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepartureOutcome {
    /// The member row was deleted
    Departed,
    /// Nothing to do: wrong chat, not a departure, or no such member
    Ignored,
}

/// Result of a bio command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BioOutcome {
    /// Bio stored on the (possibly freshly upserted) member row
    Saved(Member),
    /// Lookup found the member
    Found(Member),
    /// Lookup found nothing
    NotFound,
}

/// Unified outcome for dispatched gateway events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Apply(ApplyOutcome),
    Decision(DecisionOutcome),
    Join(JoinOutcome),
    Departure(DepartureOutcome),
    Bio(BioOutcome),
}
