//! Sign-in and provisioning helpers for integration tests.

use axum_test::TestServer;
use serde_json::{json, Value};
use uuid::Uuid;

/// Super admin credentials (must match setup_test_app's bootstrap).
pub const SUPER_ADMIN_EMAIL: &str = "root@example.com";
pub const SUPER_ADMIN_PASSWORD: &str = "a-real-test-password";

/// Password given to every member created through these helpers.
pub const MEMBER_PASSWORD: &str = "MemberPassword1!";

/// A provisioned organization with its first admin signed in.
pub struct TestOrg {
    pub organization_id: Uuid,
    pub admin_id: Uuid,
    pub admin_email: String,
    pub admin_token: String,
}

/// Sign in and return the session token.
pub async fn sign_in(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post(&super::api_path("/auth/login"))
        .json(&json!({ "email": email, "password": password }))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    body["token"]
        .as_str()
        .expect("login response carries a token")
        .to_string()
}

pub async fn super_admin_token(server: &TestServer) -> String {
    sign_in(server, SUPER_ADMIN_EMAIL, SUPER_ADMIN_PASSWORD).await
}

/// Provision an organization with its first admin and sign the admin in.
pub async fn provision_organization(server: &TestServer, name: &str, admin_email: &str) -> TestOrg {
    let su_token = super_admin_token(server).await;

    let response = server
        .post(&super::api_path("/organizations"))
        .add_header("Authorization", format!("Bearer {su_token}"))
        .json(&json!({
            "name": name,
            "admin_full_name": "Org Admin",
            "admin_email": admin_email,
            "admin_password": MEMBER_PASSWORD,
        }))
        .await;
    assert_eq!(response.status_code(), 201);

    let body: Value = response.json();
    let organization_id = parse_uuid(&body["organization"]["id"]);
    let admin_id = parse_uuid(&body["admin"]["id"]);

    let admin_token = sign_in(server, admin_email, MEMBER_PASSWORD).await;

    TestOrg {
        organization_id,
        admin_id,
        admin_email: admin_email.to_string(),
        admin_token,
    }
}

/// Issue an invite as the given member; returns (invite id, token).
pub async fn issue_invite(
    server: &TestServer,
    issuer_token: &str,
    email: &str,
    role: &str,
) -> (Uuid, String) {
    let response = server
        .post(&super::api_path("/invites"))
        .add_header("Authorization", format!("Bearer {issuer_token}"))
        .json(&json!({ "email": email, "role": role }))
        .await;
    assert_eq!(response.status_code(), 201);

    let body: Value = response.json();
    let token = body["token"]
        .as_str()
        .expect("issuance response carries the token")
        .to_string();
    (parse_uuid(&body["id"]), token)
}

pub fn parse_uuid(value: &Value) -> Uuid {
    value
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .expect("valid UUID in response body")
}
