//! Member management integration tests.
//!
//! Run with: `cargo test -p hrdesk-api --test members_test`
//! Requires Docker for testcontainers (Postgres).

mod helpers;

use helpers::auth::{issue_invite, provision_organization};
use helpers::{api_path, setup_test_app};
use serde_json::{json, Value};

#[tokio::test]
async fn test_remove_member_who_issued_pending_invites() {
    let app = setup_test_app().await;
    let client = app.client();

    let org = provision_organization(client, "Turnover Org", "founder@turnover.example").await;

    // The founder brings in a second admin and leaves another invite pending.
    let (_, token) = issue_invite(
        client,
        &org.admin_token,
        "successor@turnover.example",
        "org_admin",
    )
    .await;
    issue_invite(
        client,
        &org.admin_token,
        "pending@turnover.example",
        "employee",
    )
    .await;

    let response = client
        .post(&api_path("/invites/accept"))
        .json(&json!({
            "token": token,
            "full_name": "Successor",
            "password": "Successor1!",
        }))
        .await;
    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    let successor_token = body["token"].as_str().unwrap().to_string();

    // Removing the founder must succeed even though they issued invites that
    // are still pending; those invites go with them.
    let response = client
        .delete(&api_path(&format!("/members/{}", org.admin_id)))
        .add_header("Authorization", format!("Bearer {successor_token}"))
        .await;
    assert_eq!(response.status_code(), 204);

    let response = client
        .get(&api_path("/invites"))
        .add_header("Authorization", format!("Bearer {successor_token}"))
        .await;
    assert_eq!(response.status_code(), 200);
    let pending: Value = response.json();
    assert!(pending.as_array().expect("invite list").is_empty());

    let response = client
        .get(&api_path("/members"))
        .add_header("Authorization", format!("Bearer {successor_token}"))
        .await;
    assert_eq!(response.status_code(), 200);
    let members: Value = response.json();
    let members = members.as_array().expect("member list");
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["email"], "successor@turnover.example");
}

#[tokio::test]
async fn test_member_cannot_remove_own_account() {
    let app = setup_test_app().await;
    let client = app.client();

    let org = provision_organization(client, "Solo Org", "admin@solo.example").await;

    let response = client
        .delete(&api_path(&format!("/members/{}", org.admin_id)))
        .add_header("Authorization", format!("Bearer {}", org.admin_token))
        .await;
    assert_eq!(response.status_code(), 400);
}
