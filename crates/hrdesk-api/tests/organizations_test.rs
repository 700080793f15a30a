//! Organization lifecycle integration tests.
//!
//! Run with: `cargo test -p hrdesk-api --test organizations_test`
//! Requires Docker for testcontainers (Postgres).

mod helpers;

use helpers::auth::{
    provision_organization, sign_in, super_admin_token, MEMBER_PASSWORD, SUPER_ADMIN_EMAIL,
    SUPER_ADMIN_PASSWORD,
};
use helpers::{api_path, setup_test_app};
use serde_json::{json, Value};

#[tokio::test]
async fn test_provision_organization_with_admin() {
    let app = setup_test_app().await;
    let client = app.client();

    let org = provision_organization(client, "مؤسسة تجريبية", "admin@demo.example").await;

    let su_token = super_admin_token(client).await;
    let response = client
        .get(&api_path("/organizations"))
        .add_header("Authorization", format!("Bearer {su_token}"))
        .await;
    assert_eq!(response.status_code(), 200);

    let directory: Value = response.json();
    let entries = directory.as_array().expect("directory is an array");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["name"], "مؤسسة تجريبية");
    assert_eq!(entries[0]["status"], "active");
    assert_eq!(entries[0]["user_count"], 1);

    // The admin can sign in immediately and carries the org_admin role.
    let response = client
        .get(&api_path("/auth/me"))
        .add_header("Authorization", format!("Bearer {}", org.admin_token))
        .await;
    assert_eq!(response.status_code(), 200);
    let me: Value = response.json();
    assert_eq!(me["role"], "org_admin");
    assert_eq!(
        helpers::auth::parse_uuid(&me["organization_id"]),
        org.organization_id
    );
}

#[tokio::test]
async fn test_failed_provisioning_leaves_nothing_behind() {
    let app = setup_test_app().await;
    let client = app.client();

    provision_organization(client, "First Org", "taken@demo.example").await;

    // Reusing the admin email fails, and the second organization must not
    // exist afterwards: both inserts run in one transaction.
    let su_token = super_admin_token(client).await;
    let response = client
        .post(&api_path("/organizations"))
        .add_header("Authorization", format!("Bearer {su_token}"))
        .json(&json!({
            "name": "Second Org",
            "admin_full_name": "Someone Else",
            "admin_email": "taken@demo.example",
            "admin_password": MEMBER_PASSWORD,
        }))
        .await;
    assert_eq!(response.status_code(), 409);

    let response = client
        .get(&api_path("/organizations"))
        .add_header("Authorization", format!("Bearer {su_token}"))
        .await;
    let directory: Value = response.json();
    let entries = directory.as_array().expect("directory is an array");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["name"], "First Org");
}

#[tokio::test]
async fn test_delete_organization_removes_everything_scoped_to_it() {
    let app = setup_test_app().await;
    let client = app.client();

    let org = provision_organization(client, "Doomed Org", "admin@doomed.example").await;
    helpers::auth::issue_invite(client, &org.admin_token, "pending@doomed.example", "employee")
        .await;

    let su_token = super_admin_token(client).await;
    let response = client
        .delete(&api_path(&format!("/organizations/{}", org.organization_id)))
        .add_header("Authorization", format!("Bearer {su_token}"))
        .await;
    assert_eq!(response.status_code(), 204);

    let response = client
        .get(&api_path("/organizations"))
        .add_header("Authorization", format!("Bearer {su_token}"))
        .await;
    let directory: Value = response.json();
    assert!(directory.as_array().expect("directory is an array").is_empty());

    // Only the super admin remains; members and invites went with the org.
    let (user_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(app.pool())
        .await
        .expect("count users");
    assert_eq!(user_count, 1);

    let (invite_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM organization_invites")
        .fetch_one(app.pool())
        .await
        .expect("count invites");
    assert_eq!(invite_count, 0);

    // The removed admin can no longer authenticate.
    let response = client
        .post(&api_path("/auth/login"))
        .json(&json!({ "email": org.admin_email, "password": MEMBER_PASSWORD }))
        .await;
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_suspended_organization_blocks_sign_in() {
    let app = setup_test_app().await;
    let client = app.client();

    let org = provision_organization(client, "Paused Org", "admin@paused.example").await;

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
        .post(&api_path("/auth/login"))
        .json(&json!({ "email": org.admin_email, "password": MEMBER_PASSWORD }))
        .await;
    assert_eq!(response.status_code(), 403);

    // The super admin is unaffected.
    sign_in(client, SUPER_ADMIN_EMAIL, SUPER_ADMIN_PASSWORD).await;
}
