//! End-to-end tests for the admission funnel
//!
//! Each test drives the engine through dispatched gateway events, exactly as
//! the transport would, and inspects the in-memory store plus the recorded
//! gateway calls.

use chrono::{Duration, Utc};
use uuid::Uuid;

use gate_core::entities::{Invite, Member};
use gate_core::events::{Decision, GatewayEvent, MembershipStatus};
use gate_core::value_objects::{ChatId, UserId};
use gate_service::dto::{
    ApplyOutcome, BioOutcome, DecisionOutcome, DepartureOutcome, EventOutcome, JoinOutcome,
    RejectReason,
};

use integration_tests::{apply_event, join_event, profile, TestEngine, ADMIN, GROUP_CHAT};

/// Drive user `n` through apply + approve and return the issued invite
async fn apply_and_approve(engine: &TestEngine, n: i64) -> Invite {
    let EventOutcome::Apply(ApplyOutcome::Submitted(application)) =
        engine.handle(apply_event(n)).await
    else {
        panic!("expected submitted application");
    };

    let EventOutcome::Decision(DecisionOutcome::Approved(invite)) = engine
        .handle(GatewayEvent::DecisionMade {
            application_id: application.id,
            decision: Decision::Approve,
        })
        .await
    else {
        panic!("expected approval");
    };

    invite
}

// ============================================================================
// Applying
// ============================================================================

#[tokio::test]
async fn repeated_apply_yields_exactly_one_application() {
    let engine = TestEngine::new();
    let user = UserId::new(1);

    let EventOutcome::Apply(ApplyOutcome::Submitted(first)) = engine.handle(apply_event(1)).await
    else {
        panic!("expected submitted application");
    };
    let EventOutcome::Apply(ApplyOutcome::Submitted(second)) = engine.handle(apply_event(1)).await
    else {
        panic!("expected submitted application");
    };

    // Idempotent: same row both times, exactly one stored
    assert_eq!(first.id, second.id);
    assert_eq!(engine.store.application_count_for(user), 1);

    // The administrator is notified on every apply, with approve/deny actions
    let admin_messages = engine.gateway.messages_to(ADMIN);
    assert_eq!(admin_messages.len(), 2);
    assert!(admin_messages[0].contains("User1"));
}

#[tokio::test]
async fn existing_member_cannot_apply() {
    let engine = TestEngine::new();
    let user = UserId::new(2);
    engine
        .store
        .insert_member(Member::new(user, &profile(2)));

    let outcome = engine.handle(apply_event(2)).await;
    assert_eq!(outcome, EventOutcome::Apply(ApplyOutcome::AlreadyMember));
    assert_eq!(engine.store.application_count_for(user), 0);
    // The administrator was not bothered
    assert!(engine.gateway.messages_to(ADMIN).is_empty());
}

// ============================================================================
// Scenario A: deny
// ============================================================================

#[tokio::test]
async fn deny_deletes_application_without_minting_invite() {
    let engine = TestEngine::new();
    let user = UserId::new(3);

    let EventOutcome::Apply(ApplyOutcome::Submitted(application)) =
        engine.handle(apply_event(3)).await
    else {
        panic!("expected submitted application");
    };

    let outcome = engine
        .handle(GatewayEvent::DecisionMade {
            application_id: application.id,
            decision: Decision::Deny,
        })
        .await;

    assert_eq!(outcome, EventOutcome::Decision(DecisionOutcome::Denied));
    assert_eq!(engine.store.application_count_for(user), 0);
    assert_eq!(engine.store.invite_count(), 0);
}

#[tokio::test]
async fn deciding_a_missing_application_reports_not_found() {
    let engine = TestEngine::new();

    for decision in [Decision::Deny, Decision::Approve] {
        let outcome = engine
            .handle(GatewayEvent::DecisionMade {
                application_id: Uuid::new_v4(),
                decision,
            })
            .await;
        assert_eq!(outcome, EventOutcome::Decision(DecisionOutcome::NotFound));
    }
}

// ============================================================================
// Scenario B: the happy funnel
// ============================================================================

#[tokio::test]
async fn approved_user_joins_with_personal_invite() {
    let engine = TestEngine::new();
    let user = UserId::new(4);

    let invite = apply_and_approve(&engine, 4).await;

    // The credential is bound to the requester, single use, join-request
    assert_eq!(invite.bound_user_id, user);
    assert_eq!(invite.chat_id, GROUP_CHAT);
    assert_eq!(invite.max_uses, 1);
    assert!(invite.creates_join_request);
    assert!(!invite.is_revoked);

    // The applicant got the link
    let user_messages = engine.gateway.messages_to(user);
    assert!(user_messages.iter().any(|m| m.contains(&invite.invite_link)));

    // Join with the right identity
    let outcome = engine.handle(join_event(4, Some(&invite.invite_link))).await;
    let EventOutcome::Join(JoinOutcome::Admitted(member)) = outcome else {
        panic!("expected admission, got {outcome:?}");
    };
    assert_eq!(member.user_id, user);

    // Exactly one member row, zero application rows, invite consumed
    assert!(engine.store.member(user).is_some());
    assert_eq!(engine.store.application_count_for(user), 0);
    assert!(engine.store.invite(invite.id).unwrap().is_revoked);

    // The platform was told to let the user in and the link was revoked
    assert!(engine.gateway.approved_join_for(user));
    assert!(!engine.gateway.declined_join_for(user));
}

#[tokio::test]
async fn consumed_invite_rejects_every_later_attempt() {
    let engine = TestEngine::new();
    let user = UserId::new(5);

    let invite = apply_and_approve(&engine, 5).await;
    engine.handle(join_event(5, Some(&invite.invite_link))).await;

    // The same link again, same legitimate user
    let outcome = engine.handle(join_event(5, Some(&invite.invite_link))).await;
    assert_eq!(
        outcome,
        EventOutcome::Join(JoinOutcome::Rejected(RejectReason::Revoked))
    );
    assert!(engine.gateway.declined_join_for(user));
}

// ============================================================================
// Scenario C: impersonation
// ============================================================================

#[tokio::test]
async fn impersonation_burns_the_invite_for_everyone() {
    let engine = TestEngine::new();
    let legit = UserId::new(6);
    let attacker = UserId::new(66);

    let invite = apply_and_approve(&engine, 6).await;

    // The attacker presents the stolen link
    let outcome = engine
        .handle(join_event(66, Some(&invite.invite_link)))
        .await;
    assert_eq!(
        outcome,
        EventOutcome::Join(JoinOutcome::ImpersonationRejected)
    );

    // Declined, removed, link revoked on the platform and locally
    assert!(engine.gateway.declined_join_for(attacker));
    assert!(engine.gateway.removed_member(attacker));
    assert!(engine.store.invite(invite.id).unwrap().is_revoked);
    assert!(engine.store.member(attacker).is_none());

    // The legitimate holder is locked out too, by design
    let outcome = engine.handle(join_event(6, Some(&invite.invite_link))).await;
    assert_eq!(
        outcome,
        EventOutcome::Join(JoinOutcome::Rejected(RejectReason::Revoked))
    );
    assert!(engine.gateway.declined_join_for(legit));
    assert!(engine.store.member(legit).is_none());
}

// ============================================================================
// Join gates
// ============================================================================

#[tokio::test]
async fn join_without_link_is_declined() {
    let engine = TestEngine::new();

    let outcome = engine.handle(join_event(7, None)).await;
    assert_eq!(
        outcome,
        EventOutcome::Join(JoinOutcome::Rejected(RejectReason::NoInvite))
    );
    assert!(engine.gateway.declined_join_for(UserId::new(7)));
}

#[tokio::test]
async fn unknown_link_is_declined() {
    let engine = TestEngine::new();

    let outcome = engine
        .handle(join_event(8, Some("https://t.me/+nobody-issued-this")))
        .await;
    assert_eq!(
        outcome,
        EventOutcome::Join(JoinOutcome::Rejected(RejectReason::UnknownInvite))
    );
}

#[tokio::test]
async fn invite_for_another_chat_is_declined() {
    let engine = TestEngine::new();
    let invite = Invite::new(
        ChatId::new(-77),
        UserId::new(9),
        "https://t.me/+other-chat",
        Utc::now() + Duration::hours(24),
    );
    engine.store.insert_invite(invite.clone());

    let outcome = engine.handle(join_event(9, Some(&invite.invite_link))).await;
    assert_eq!(
        outcome,
        EventOutcome::Join(JoinOutcome::Rejected(RejectReason::WrongChat))
    );
    // Wrong-chat presentation does not consume the credential
    assert!(!engine.store.invite(invite.id).unwrap().is_revoked);
}

#[tokio::test]
async fn expired_invite_is_declined_and_revoked() {
    let engine = TestEngine::new();
    let invite = Invite::new(
        GROUP_CHAT,
        UserId::new(10),
        "https://t.me/+stale",
        Utc::now() - Duration::minutes(1),
    );
    engine.store.insert_invite(invite.clone());

    let outcome = engine
        .handle(join_event(10, Some(&invite.invite_link)))
        .await;
    assert_eq!(
        outcome,
        EventOutcome::Join(JoinOutcome::Rejected(RejectReason::Expired))
    );

    // The lazily observed expiry is persisted as a revocation
    assert!(engine.store.invite(invite.id).unwrap().is_revoked);
    assert!(engine.store.member(UserId::new(10)).is_none());
}

// ============================================================================
// Upstream failure during approval
// ============================================================================

#[tokio::test]
async fn failed_link_creation_leaves_application_pending() {
    let engine = TestEngine::new();
    let user = UserId::new(11);

    let EventOutcome::Apply(ApplyOutcome::Submitted(application)) =
        engine.handle(apply_event(11)).await
    else {
        panic!("expected submitted application");
    };

    engine.gateway.fail_invite_creation(true);
    let result = engine
        .dispatcher
        .handle(GatewayEvent::DecisionMade {
            application_id: application.id,
            decision: Decision::Approve,
        })
        .await;

    let err = result.expect_err("approval should surface the upstream failure");
    assert!(err.is_retryable());

    // No partial state: still pending, no invite row
    assert_eq!(engine.store.application_count_for(user), 1);
    assert_eq!(engine.store.invite_count(), 0);

    // Retry succeeds once the platform recovers
    engine.gateway.fail_invite_creation(false);
    let outcome = engine
        .handle(GatewayEvent::DecisionMade {
            application_id: application.id,
            decision: Decision::Approve,
        })
        .await;
    assert!(matches!(
        outcome,
        EventOutcome::Decision(DecisionOutcome::Approved(_))
    ));
}

// ============================================================================
// Scenario D: departures
// ============================================================================

#[tokio::test]
async fn departure_removes_member_and_repeats_are_noops() {
    let engine = TestEngine::new();
    let user = UserId::new(12);
    engine.store.insert_member(Member::new(user, &profile(12)));

    let kicked = GatewayEvent::MembershipChanged {
        user,
        chat: GROUP_CHAT,
        status: MembershipStatus::Kicked,
    };

    let outcome = engine.handle(kicked.clone()).await;
    assert_eq!(outcome, EventOutcome::Departure(DepartureOutcome::Departed));
    assert!(engine.store.member(user).is_none());

    // Second identical event: no error, no-op
    let outcome = engine.handle(kicked).await;
    assert_eq!(outcome, EventOutcome::Departure(DepartureOutcome::Ignored));
}

#[tokio::test]
async fn changes_outside_the_governed_chat_are_ignored() {
    let engine = TestEngine::new();
    let user = UserId::new(13);
    engine.store.insert_member(Member::new(user, &profile(13)));

    let outcome = engine
        .handle(GatewayEvent::MembershipChanged {
            user,
            chat: ChatId::new(-55),
            status: MembershipStatus::Banned,
        })
        .await;

    assert_eq!(outcome, EventOutcome::Departure(DepartureOutcome::Ignored));
    assert!(engine.store.member(user).is_some());
}

#[tokio::test]
async fn non_departure_statuses_are_ignored() {
    let engine = TestEngine::new();
    let user = UserId::new(14);
    engine.store.insert_member(Member::new(user, &profile(14)));

    let outcome = engine
        .handle(GatewayEvent::MembershipChanged {
            user,
            chat: GROUP_CHAT,
            status: MembershipStatus::Joined,
        })
        .await;

    assert_eq!(outcome, EventOutcome::Departure(DepartureOutcome::Ignored));
    assert!(engine.store.member(user).is_some());
}

// ============================================================================
// Bios
// ============================================================================

#[tokio::test]
async fn set_bio_then_lookup_round_trips() {
    let engine = TestEngine::new();
    let user = UserId::new(15);

    let outcome = engine
        .handle(GatewayEvent::BioSet {
            user,
            profile: profile(15),
            bio: "keeper of the gate".to_string(),
        })
        .await;
    assert!(matches!(outcome, EventOutcome::Bio(BioOutcome::Saved(_))));

    let outcome = engine
        .handle(GatewayEvent::BioLookup {
            requester: ADMIN,
            username: "@user15".to_string(),
        })
        .await;
    let EventOutcome::Bio(BioOutcome::Found(member)) = outcome else {
        panic!("expected lookup hit");
    };
    assert_eq!(member.bio, "keeper of the gate");

    // The requester received the bio card
    let messages = engine.gateway.messages_to(ADMIN);
    assert!(messages.iter().any(|m| m.contains("keeper of the gate")));
}

#[tokio::test]
async fn bio_lookup_tolerates_missing_member() {
    let engine = TestEngine::new();

    let outcome = engine
        .handle(GatewayEvent::BioLookup {
            requester: ADMIN,
            username: "nobody".to_string(),
        })
        .await;
    assert_eq!(outcome, EventOutcome::Bio(BioOutcome::NotFound));
}

#[tokio::test]
async fn joining_preserves_a_previously_set_bio() {
    let engine = TestEngine::new();
    let user = UserId::new(16);

    let invite = apply_and_approve(&engine, 16).await;

    // The applicant sets a bio after approval but before joining; the
    // upsert creates their row early
    engine
        .handle(GatewayEvent::BioSet {
            user,
            profile: profile(16),
            bio: "wrote this before joining".to_string(),
        })
        .await;

    let outcome = engine
        .handle(join_event(16, Some(&invite.invite_link)))
        .await;
    assert!(matches!(
        outcome,
        EventOutcome::Join(JoinOutcome::Admitted(_))
    ));

    // The join-time upsert refreshed names but kept the bio
    assert_eq!(
        engine.store.member(user).unwrap().bio,
        "wrote this before joining"
    );
}
