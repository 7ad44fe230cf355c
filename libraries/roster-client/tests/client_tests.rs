//! Tests for the Roster client library.
//!
//! These tests use mock servers to verify client behavior without
//! requiring a real backend.

use chrono::NaiveDate;
use roster_client::{ClientConfig, ClientError, RosterClient, Session};
use roster_core::{Gender, UserFields};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, session: Session) -> RosterClient {
    RosterClient::new(ClientConfig::new(server.uri()), session).unwrap()
}

fn authed_session(token: &str) -> Session {
    let session = Session::in_memory();
    session.set(token).unwrap();
    session
}

fn user_json(id: i64, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "birth_year": 1990,
        "gender": "male",
        "is_admin": false,
        "created_at": "01-02-2024 10:15",
        "created_by": "root",
        "avatar_path": null
    })
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
}

// =============================================================================
// Authentication Tests
// =============================================================================

mod authentication {
    use super::*;

    #[tokio::test]
    async fn test_login_stores_token_and_me_succeeds() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(serde_json::json!({"username": "root", "password": "pw"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"token": "tok-1"})),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .and(header("X-Token", "tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json(1, "root")))
            .mount(&server)
            .await;

        let session = Session::in_memory();
        let client = client_for(&server, session.clone());

        let token = client.login("root", "pw").await.unwrap();
        assert_eq!(token, "tok-1");
        assert_eq!(session.get().as_deref(), Some("tok-1"));

        let me = client.current_user().await.unwrap();
        assert_eq!(me.id, 1);
        assert_eq!(me.name, "root");
    }

    #[tokio::test]
    async fn test_login_failure_stores_no_token() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "status": false,
                "error": "Username or password incorrect",
                "extra_data": {}
            })))
            .mount(&server)
            .await;

        let session = authed_session("stale");
        let client = client_for(&server, session.clone());

        let result = client.login("root", "wrong").await;
        match result.unwrap_err() {
            ClientError::AuthFailed(msg) => assert_eq!(msg, "Username or password incorrect"),
            e => panic!("Expected AuthFailed, got: {:?}", e),
        }
        assert!(session.get().is_none());
    }

    #[tokio::test]
    async fn test_login_failure_without_body_has_default_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = client_for(&server, Session::in_memory());
        match client.login("x", "y").await.unwrap_err() {
            ClientError::AuthFailed(msg) => assert!(msg.contains("Invalid")),
            e => panic!("Expected AuthFailed, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_logout_clears_token_even_when_server_fails() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/logout"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&server)
            .await;

        let session = authed_session("tok");
        let client = client_for(&server, session.clone());

        client.logout().await;
        assert!(!client.is_authenticated());
        assert!(session.get().is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_token_when_server_unreachable() {
        let session = authed_session("tok");
        let client =
            RosterClient::new(ClientConfig::new("http://127.0.0.1:1"), session.clone()).unwrap();

        client.logout().await;
        assert!(session.get().is_none());
    }

    #[tokio::test]
    async fn test_logout_sends_token() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/logout"))
            .and(header("X-Token", "tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, authed_session("tok"));
        client.logout().await;
    }

    #[tokio::test]
    async fn test_me_without_token_omits_header() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "status": false,
                "error": "Token not provided",
                "extra_data": {}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, Session::in_memory());
        let err = client.current_user().await.unwrap_err();
        assert!(err.is_auth_error());
        assert_eq!(err.user_message(), "Token not provided");

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].headers.get("x-token").is_none());
    }

    #[tokio::test]
    async fn test_empty_token_is_never_sent() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"token": ""})))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json(1, "root")))
            .mount(&server)
            .await;

        let session = Session::in_memory();
        let client = client_for(&server, session.clone());

        client.login("root", "pw").await.unwrap();
        assert!(!client.is_authenticated());
        client.current_user().await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 2);
        assert!(requests[1].headers.get("x-token").is_none());
    }

    #[tokio::test]
    async fn test_login_sends_stored_token() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(header("X-Token", "old"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"token": "new"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let session = authed_session("old");
        let client = client_for(&server, session.clone());

        assert_eq!(client.login("a", "b").await.unwrap(), "new");
        assert_eq!(session.get().as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_auth_required() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = client_for(&server, authed_session("expired"));
        assert!(matches!(
            client.current_user().await,
            Err(ClientError::AuthRequired)
        ));
    }

    #[tokio::test]
    async fn test_custom_token_header() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user/"))
            .and(header("Authorization-Token", "tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let config = ClientConfig::new(server.uri()).with_token_header("Authorization-Token");
        let client = RosterClient::new(config, authed_session("tok")).unwrap();
        assert!(client.list_users().await.unwrap().is_empty());
    }
}

// =============================================================================
// User Management Tests
// =============================================================================

mod users {
    use super::*;

    #[tokio::test]
    async fn test_list_users() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user/"))
            .and(header("X-Token", "tok"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([user_json(1, "a"), user_json(2, "b")])),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, authed_session("tok"));
        let users = client.list_users().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[1].name, "b");
        assert_eq!(users[0].created_by.as_deref(), Some("root"));
    }

    #[tokio::test]
    async fn test_list_users_non_array_is_unexpected_format() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"users": []})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, authed_session("tok"));
        match client.list_users().await.unwrap_err() {
            ClientError::UnexpectedFormat(msg) => assert!(msg.contains("an object")),
            e => panic!("Expected UnexpectedFormat, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_list_users_invalid_json() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let client = client_for(&server, authed_session("tok"));
        assert!(matches!(
            client.list_users().await,
            Err(ClientError::ParseError(_))
        ));
    }

    #[tokio::test]
    async fn test_create_user_sends_fields() {
        let server = MockServer::start().await;

        let mut fields = UserFields::new("Anna", 2001, Gender::Female, "secret");
        fields.avatar_base64 = Some("QUJD".into());

        Mock::given(method("POST"))
            .and(path("/user/create"))
            .and(header("X-Token", "tok"))
            .and(body_json(serde_json::json!({
                "name": "Anna",
                "birth_year": 2001,
                "gender": "female",
                "is_admin": false,
                "avatar_base64": "QUJD",
                "password": "secret"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, authed_session("tok"));
        let status = client.create_user(&fields).await.unwrap();
        assert!(status.status);
    }

    #[tokio::test]
    async fn test_create_user_rejects_missing_password_locally() {
        let server = MockServer::start().await;
        let client = client_for(&server, authed_session("tok"));

        let fields = UserFields::new("Anna", 2001, Gender::Female, "");
        assert!(matches!(
            client.create_user(&fields).await,
            Err(ClientError::Invalid(_))
        ));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_user_passes_id_as_query() {
        let server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/user/update"))
            .and(query_param("user_id", "42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, authed_session("tok"));
        // empty password keeps the current one
        let fields = UserFields::new("Ivan", 1990, Gender::Male, "");
        client.update_user(42, &fields).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_user() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/user/delete"))
            .and(query_param("user_id", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, authed_session("tok"));
        assert!(client.delete_user(7).await.unwrap().status);
    }

    #[tokio::test]
    async fn test_delete_missing_user_is_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/user/delete"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "status": false,
                "error": "User 99 not found",
                "extra_data": {"user_id": 99}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, authed_session("tok"));
        match client.delete_user(99).await.unwrap_err() {
            ClientError::NotFound(msg) => assert_eq!(msg, "User 99 not found"),
            e => panic!("Expected NotFound, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_server_error_keeps_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/user/create"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "status": false,
                "error": "ValidationError",
                "extra_data": {"errors": []}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, authed_session("tok"));
        let fields = UserFields::new("Anna", 2001, Gender::Female, "pw");
        match client.create_user(&fields).await.unwrap_err() {
            ClientError::ServerError { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "ValidationError");
            }
            e => panic!("Expected ServerError, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let client =
            RosterClient::new(ClientConfig::new("http://127.0.0.1:1"), Session::in_memory())
                .unwrap();

        match client.list_users().await.unwrap_err() {
            ClientError::ServerUnreachable(_) | ClientError::Request(_) => {}
            e => panic!("Expected ServerUnreachable or Request error, got: {:?}", e),
        }
    }
}

// =============================================================================
// Statistics Tests
// =============================================================================

mod stats {
    use super::*;

    #[tokio::test]
    async fn test_group_by_hours() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user/group_by_hours"))
            .and(query_param("day", "2024-03-05"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"05": 3, "10": 1})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, authed_session("tok"));
        let buckets = client.group_by_hours(day()).await.unwrap();
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets.get("05"), Some(&3));
    }

    #[tokio::test]
    async fn test_group_by_minutes_with_hour() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user/group_by_minutes"))
            .and(query_param("day", "2024-03-05"))
            .and(query_param("hour", "14"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"14:00": 2, "14:30": 5})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, authed_session("tok"));
        let buckets = client.group_by_minutes(day(), Some(14)).await.unwrap();
        assert_eq!(buckets.get("14:30"), Some(&5));
    }

    #[tokio::test]
    async fn test_group_by_minutes_without_hour_omits_param() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user/group_by_minutes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = client_for(&server, authed_session("tok"));
        assert!(client.group_by_minutes(day(), None).await.unwrap().is_empty());

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), Some("day=2024-03-05"));
    }

    #[tokio::test]
    async fn test_group_by_minutes_rejects_bad_hour() {
        let server = MockServer::start().await;
        let client = client_for(&server, authed_session("tok"));

        assert!(matches!(
            client.group_by_minutes(day(), Some(24)).await,
            Err(ClientError::Invalid(_))
        ));
    }
}

// =============================================================================
// Avatar Tests
// =============================================================================

mod avatars {
    use super::*;

    #[tokio::test]
    async fn test_download_avatar() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/uploads/abc.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8, 2, 3, 4]))
            .mount(&server)
            .await;

        let client = client_for(&server, authed_session("tok"));
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out").join("avatar.jpg");

        let written = client.download_avatar("uploads/abc.jpg", &dest).await.unwrap();
        assert_eq!(written, 4);
        assert_eq!(std::fs::read(&dest).unwrap(), vec![1u8, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_download_missing_avatar() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server, authed_session("tok"));
        let dir = tempfile::tempdir().unwrap();
        let result = client
            .download_avatar("uploads/missing.jpg", &dir.path().join("a.jpg"))
            .await;
        assert!(matches!(result, Err(ClientError::NotFound(_))));
    }
}
