//! Invite lifecycle integration tests.
//!
//! Run with: `cargo test -p hrdesk-api --test invites_test`
//! Requires Docker for testcontainers (Postgres).

mod helpers;

use chrono::{Duration, Utc};
use helpers::auth::{issue_invite, provision_organization, sign_in, super_admin_token};
use helpers::{api_path, setup_test_app};
use hrdesk_api::services::invites::generate_invite_token;
use hrdesk_core::models::OrganizationInvite;
use hrdesk_core::Role;
use hrdesk_db::{InviteRepository, UserRepository};
use serde_json::{json, Value};

#[tokio::test]
async fn test_invite_token_redeems_only_once() {
    let app = setup_test_app().await;
    let client = app.client();

    let org = provision_organization(client, "Hiring Org", "admin@hiring.example").await;
    let (_, token) = issue_invite(client, &org.admin_token, "new@hiring.example", "employee").await;

    let response = client
        .post(&api_path("/invites/accept"))
        .json(&json!({
            "token": token,
            "full_name": "New Member",
            "password": "NewMemberPass1!",
        }))
        .await;
    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    assert_eq!(body["user"]["email"], "new@hiring.example");
    assert_eq!(body["user"]["role"], "employee");

    // The invite was consumed inside the redemption transaction, so the same
    // token never resolves a second time.
    let response = client
        .post(&api_path("/invites/accept"))
        .json(&json!({
            "token": token,
            "full_name": "Someone Else",
            "password": "AnotherPass1!",
        }))
        .await;
    assert_eq!(response.status_code(), 404);

    // The member created by the first redemption can sign in.
    sign_in(client, "new@hiring.example", "NewMemberPass1!").await;
}

#[tokio::test]
async fn test_redeeming_into_suspended_organization_rejected() {
    let app = setup_test_app().await;
    let client = app.client();

    let org = provision_organization(client, "Soon Suspended", "admin@soon.example").await;
    let (_, token) = issue_invite(client, &org.admin_token, "late@soon.example", "employee").await;

    let su_token = super_admin_token(client).await;
    let response = client
        .put(&api_path(&format!(
            "/organizations/{}/status",
            org.organization_id
        )))
        .add_header("Authorization", format!("Bearer {su_token}"))
        .json(&json!({ "status": "suspended" }))
        .await;
    assert_eq!(response.status_code(), 200);

    let response = client
        .post(&api_path("/invites/accept"))
        .json(&json!({
            "token": token,
            "full_name": "Late Joiner",
            "password": "LateJoiner1!",
        }))
        .await;
    assert_eq!(response.status_code(), 403);

    // The rejection rolled back: no account was created and the invite is
    // still pending, so it becomes redeemable again if the org is reinstated.
    let users = UserRepository::new(app.pool().clone());
    assert!(!users.exists_by_email("late@soon.example").await.unwrap());

    let invites = InviteRepository::new(app.pool().clone());
    let pending = invites
        .list_by_organization(org.organization_id)
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);

    let response = client
        .put(&api_path(&format!(
            "/organizations/{}/status",
            org.organization_id
        )))
        .add_header("Authorization", format!("Bearer {su_token}"))
        .json(&json!({ "status": "active" }))
        .await;
    assert_eq!(response.status_code(), 200);

    let response = client
        .post(&api_path("/invites/accept"))
        .json(&json!({
            "token": token,
            "full_name": "Late Joiner",
            "password": "LateJoiner1!",
        }))
        .await;
    assert_eq!(response.status_code(), 201);
}

#[tokio::test]
async fn test_colliding_token_insert_signals_retry() {
    let app = setup_test_app().await;
    let client = app.client();

    let org = provision_organization(client, "Token Org", "admin@token.example").await;

    let invites = InviteRepository::new(app.pool().clone());
    let token = generate_invite_token();
    let expires_at = OrganizationInvite::expiry_from(Utc::now());

    let first = invites
        .try_create(
            org.organization_id,
            "first@token.example",
            Role::Employee,
            &token,
            org.admin_id,
            expires_at,
        )
        .await
        .unwrap();
    assert!(first.is_some());

    // A token collision comes back as None so the caller regenerates; it is
    // not the Conflict reserved for duplicate pending invites.
    let collided = invites
        .try_create(
            org.organization_id,
            "second@token.example",
            Role::Employee,
            &token,
            org.admin_id,
            expires_at,
        )
        .await
        .unwrap();
    assert!(collided.is_none());

    let retried = invites
        .try_create(
            org.organization_id,
            "second@token.example",
            Role::Employee,
            &generate_invite_token(),
            org.admin_id,
            expires_at,
        )
        .await
        .unwrap();
    assert!(retried.is_some());
}

#[tokio::test]
async fn test_expired_invite_rejected_with_gone() {
    let app = setup_test_app().await;
    let client = app.client();

    let org = provision_organization(client, "Slow Org", "admin@slow.example").await;

    let invites = InviteRepository::new(app.pool().clone());
    let token = generate_invite_token();
    invites
        .try_create(
            org.organization_id,
            "slow@slow.example",
            Role::Employee,
            &token,
            org.admin_id,
            Utc::now() - Duration::hours(1),
        )
        .await
        .unwrap()
        .expect("invite inserted");

    let response = client
        .post(&api_path("/invites/accept"))
        .json(&json!({
            "token": token,
            "full_name": "Slow Joiner",
            "password": "SlowJoiner1!",
        }))
        .await;
    assert_eq!(response.status_code(), 410);
}
