mod common;

use entity::user;
use platform_authn::{JwtConfig, JwtService};
use sea_orm::EntityTrait;
use serde_json::json;

use common::{PASSWORD, setup};

const TOKEN_AUTH: &str = r#"
    mutation Login($username: String!, $password: String!) {
        tokenAuth(username: $username, password: $password) { token payload refreshExpiresIn }
    }
"#;

fn code(resp: &async_graphql::Response) -> Option<String> {
    resp.errors.first().and_then(|err| {
        err.extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .map(|code| code.to_string().trim_matches('"').to_string())
    })
}

#[tokio::test]
async fn token_auth_issues_a_verifiable_token() {
    let env = setup().await;
    let resp = env
        .exec_as(
            None,
            TOKEN_AUTH,
            json!({ "username": "admin", "password": PASSWORD }),
        )
        .await;
    assert!(resp.errors.is_empty(), "unexpected errors: {:?}", resp.errors);
    let data = resp.data.into_json().unwrap();
    let issued = &data["tokenAuth"];
    let token = issued["token"].as_str().unwrap().to_string();
    assert_eq!(issued["payload"]["username"], "admin");
    assert_eq!(issued["payload"]["sub"], env.viewer.user_id.to_string());
    assert!(issued["refreshExpiresIn"].as_i64().unwrap() > issued["payload"]["exp"].as_i64().unwrap());

    let account = user::Entity::find_by_id(env.viewer.user_id)
        .one(env.db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert!(account.last_login.is_some());

    let resp = env
        .exec_as(
            None,
            "mutation V($token: String!) { verifyToken(token: $token) { payload } }",
            json!({ "token": token }),
        )
        .await;
    assert!(resp.errors.is_empty());
    let data = resp.data.into_json().unwrap();
    assert_eq!(data["verifyToken"]["payload"]["username"], "admin");

    let resp = env
        .exec_as(
            None,
            "mutation R($token: String!) { refreshToken(token: $token) { token payload } }",
            json!({ "token": token }),
        )
        .await;
    assert!(resp.errors.is_empty());
    let data = resp.data.into_json().unwrap();
    assert_eq!(
        data["refreshToken"]["payload"]["origIat"],
        issued["payload"]["origIat"]
    );
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let env = setup().await;
    let resp = env
        .exec_as(
            None,
            TOKEN_AUTH,
            json!({ "username": "admin", "password": "nope" }),
        )
        .await;
    assert_eq!(resp.errors.len(), 1);
    assert_eq!(resp.errors[0].message, "Please enter valid credentials");
    assert_eq!(code(&resp).as_deref(), Some("UNAUTHENTICATED"));
}

#[tokio::test]
async fn foreign_tokens_fail_verification() {
    let env = setup().await;
    let other = JwtService::new(JwtConfig::new("another-secret", 5, 7));
    let (token, _) = other.issue(&env.viewer.user_id.to_string(), "admin").unwrap();

    let resp = env
        .exec_as(
            None,
            "mutation V($token: String!) { verifyToken(token: $token) { payload } }",
            json!({ "token": token }),
        )
        .await;
    assert_eq!(resp.errors.len(), 1);
    assert_eq!(code(&resp).as_deref(), Some("UNAUTHENTICATED"));
}

#[tokio::test]
async fn tokens_resolve_to_viewers() {
    let env = setup().await;
    let (token, _) = env
        .jwt
        .issue(&env.viewer.user_id.to_string(), "admin")
        .unwrap();
    let viewer = api::auth::viewer_from_token(env.db.as_ref(), &env.jwt, &token)
        .await
        .unwrap();
    assert_eq!(viewer, env.viewer);
    assert!(viewer.is_staff);
}

#[tokio::test]
async fn session_checks_are_also_queries() {
    let env = setup().await;
    let resp = env
        .exec_as(
            None,
            TOKEN_AUTH,
            json!({ "username": "admin", "password": PASSWORD }),
        )
        .await;
    let data = resp.data.into_json().unwrap();
    let token = data["tokenAuth"]["token"].as_str().unwrap().to_string();

    let resp = env
        .exec_as(
            None,
            r#"
                query Session($token: String!) {
                    verifyToken(token: $token) { payload }
                    refreshToken(token: $token) { token refreshExpiresIn }
                }
            "#,
            json!({ "token": token }),
        )
        .await;
    assert!(resp.errors.is_empty(), "unexpected errors: {:?}", resp.errors);
    let data = resp.data.into_json().unwrap();
    assert_eq!(data["verifyToken"]["payload"]["username"], "admin");
    assert!(data["refreshToken"]["token"].is_string());

    let resp = env
        .exec_as(
            None,
            "query { verifyToken(token: \"garbage\") { payload } }",
            json!({}),
        )
        .await;
    assert_eq!(code(&resp).as_deref(), Some("UNAUTHENTICATED"));
}
