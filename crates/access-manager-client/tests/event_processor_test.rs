//! Contract tests for the write side of AccessManagerClient.
//!
//! Every write is a POST (add) or DELETE (remove) with no meaningful body, and
//! the service acknowledges both with 201 Created.
//!
//! ## Endpoints Tested
//!
//! | Method | Path (relative to `/api/v1`) | Test |
//! |--------|------------------------------|------|
//! | POST/DELETE | `/users/{user}` | `add_user_*`, `remove_user_*` |
//! | POST/DELETE | `/groups/{group}` | `add_group_*`, `remove_group_*` |
//! | POST/DELETE | `/userToGroupMappings/user/{u}/group/{g}` | `*_user_to_group_mapping_*` |
//! | POST/DELETE | `/groupToGroupMappings/fromGroup/{g1}/toGroup/{g2}` | `*_group_to_group_mapping_*` |
//! | POST/DELETE | `/userToApplicationComponentAndAccessLevelMappings/...` | `*_user_to_component_*` |
//! | POST/DELETE | `/groupToApplicationComponentAndAccessLevelMappings/...` | `*_group_to_component_*` |
//! | POST/DELETE | `/entityTypes/{t}`, `/entityTypes/{t}/entities/{e}` | `*_entity_type_*`, `*_entity_*` |
//! | POST/DELETE | `/userToEntityMappings/...`, `/groupToEntityMappings/...` | `*_to_entity_mapping_*` |

use access_manager_client::{
    AccessManagerClient, AccessManagerClientConfig, AccessManagerError, AccessManagerEventProcessor, HttpMethod,
    Stringifiers,
};
use wiremock::matchers::{any, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

type StringClient = AccessManagerClient<String, String, String, String>;

/// Build a string-typed client pointed at a wiremock server.
fn test_client(mock_server: &MockServer) -> StringClient {
    let config = AccessManagerClientConfig::from_url_str(&mock_server.uri())
        .unwrap()
        .with_timeout_secs(5);
    AccessManagerClient::new(config, Stringifiers::strings()).unwrap()
}

/// Expect exactly one `verb` request on `api_path`, answered with 201.
async fn expect_write(mock_server: &MockServer, verb: &str, api_path: &str) {
    Mock::given(method(verb))
        .and(path(api_path))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(mock_server)
        .await;
}

fn s(value: &str) -> String {
    value.to_string()
}

// ── users / groups ───────────────────────────────────────────────────

#[tokio::test]
async fn add_user_posts_to_user_path() {
    let mock_server = MockServer::start().await;
    expect_write(&mock_server, "POST", "/api/v1/users/user1").await;

    test_client(&mock_server).add_user(&s("user1")).await.unwrap();
}

#[tokio::test]
async fn remove_user_deletes_user_path() {
    let mock_server = MockServer::start().await;
    expect_write(&mock_server, "DELETE", "/api/v1/users/user1").await;

    test_client(&mock_server).remove_user(&s("user1")).await.unwrap();
}

#[tokio::test]
async fn add_and_remove_group() {
    let mock_server = MockServer::start().await;
    expect_write(&mock_server, "POST", "/api/v1/groups/group1").await;
    expect_write(&mock_server, "DELETE", "/api/v1/groups/group1").await;

    let client = test_client(&mock_server);
    client.add_group(&s("group1")).await.unwrap();
    client.remove_group(&s("group1")).await.unwrap();
}

// ── mappings ─────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_remove_user_to_group_mapping() {
    let mock_server = MockServer::start().await;
    let api_path = "/api/v1/userToGroupMappings/user/user1/group/group1";
    expect_write(&mock_server, "POST", api_path).await;
    expect_write(&mock_server, "DELETE", api_path).await;

    let client = test_client(&mock_server);
    client.add_user_to_group_mapping(&s("user1"), &s("group1")).await.unwrap();
    client
        .remove_user_to_group_mapping(&s("user1"), &s("group1"))
        .await
        .unwrap();
}

#[tokio::test]
async fn add_and_remove_group_to_group_mapping() {
    let mock_server = MockServer::start().await;
    let api_path = "/api/v1/groupToGroupMappings/fromGroup/group1/toGroup/group2";
    expect_write(&mock_server, "POST", api_path).await;
    expect_write(&mock_server, "DELETE", api_path).await;

    let client = test_client(&mock_server);
    client.add_group_to_group_mapping(&s("group1"), &s("group2")).await.unwrap();
    client
        .remove_group_to_group_mapping(&s("group1"), &s("group2"))
        .await
        .unwrap();
}

#[tokio::test]
async fn add_and_remove_user_to_component_mapping() {
    let mock_server = MockServer::start().await;
    let api_path =
        "/api/v1/userToApplicationComponentAndAccessLevelMappings/user/user1/applicationComponent/Order/accessLevel/View";
    expect_write(&mock_server, "POST", api_path).await;
    expect_write(&mock_server, "DELETE", api_path).await;

    let client = test_client(&mock_server);
    client
        .add_user_to_application_component_and_access_level_mapping(&s("user1"), &s("Order"), &s("View"))
        .await
        .unwrap();
    client
        .remove_user_to_application_component_and_access_level_mapping(&s("user1"), &s("Order"), &s("View"))
        .await
        .unwrap();
}

#[tokio::test]
async fn add_and_remove_group_to_component_mapping() {
    let mock_server = MockServer::start().await;
    let api_path =
        "/api/v1/groupToApplicationComponentAndAccessLevelMappings/group/group1/applicationComponent/Summary/accessLevel/Modify";
    expect_write(&mock_server, "POST", api_path).await;
    expect_write(&mock_server, "DELETE", api_path).await;

    let client = test_client(&mock_server);
    client
        .add_group_to_application_component_and_access_level_mapping(&s("group1"), &s("Summary"), &s("Modify"))
        .await
        .unwrap();
    client
        .remove_group_to_application_component_and_access_level_mapping(&s("group1"), &s("Summary"), &s("Modify"))
        .await
        .unwrap();
}

// ── entity types / entities ──────────────────────────────────────────

#[tokio::test]
async fn add_and_remove_entity_type() {
    let mock_server = MockServer::start().await;
    expect_write(&mock_server, "POST", "/api/v1/entityTypes/ClientAccount").await;
    expect_write(&mock_server, "DELETE", "/api/v1/entityTypes/ClientAccount").await;

    let client = test_client(&mock_server);
    client.add_entity_type("ClientAccount").await.unwrap();
    client.remove_entity_type("ClientAccount").await.unwrap();
}

#[tokio::test]
async fn add_and_remove_entity() {
    let mock_server = MockServer::start().await;
    let api_path = "/api/v1/entityTypes/ClientAccount/entities/CompanyA";
    expect_write(&mock_server, "POST", api_path).await;
    expect_write(&mock_server, "DELETE", api_path).await;

    let client = test_client(&mock_server);
    client.add_entity("ClientAccount", "CompanyA").await.unwrap();
    client.remove_entity("ClientAccount", "CompanyA").await.unwrap();
}

#[tokio::test]
async fn add_and_remove_user_to_entity_mapping() {
    let mock_server = MockServer::start().await;
    let api_path = "/api/v1/userToEntityMappings/user/user1/entityType/ClientAccount/entity/CompanyA";
    expect_write(&mock_server, "POST", api_path).await;
    expect_write(&mock_server, "DELETE", api_path).await;

    let client = test_client(&mock_server);
    client
        .add_user_to_entity_mapping(&s("user1"), "ClientAccount", "CompanyA")
        .await
        .unwrap();
    client
        .remove_user_to_entity_mapping(&s("user1"), "ClientAccount", "CompanyA")
        .await
        .unwrap();
}

#[tokio::test]
async fn add_and_remove_group_to_entity_mapping() {
    let mock_server = MockServer::start().await;
    let api_path = "/api/v1/groupToEntityMappings/group/group1/entityType/ClientAccount/entity/CompanyA";
    expect_write(&mock_server, "POST", api_path).await;
    expect_write(&mock_server, "DELETE", api_path).await;

    let client = test_client(&mock_server);
    client
        .add_group_to_entity_mapping(&s("group1"), "ClientAccount", "CompanyA")
        .await
        .unwrap();
    client
        .remove_group_to_entity_mapping(&s("group1"), "ClientAccount", "CompanyA")
        .await
        .unwrap();
}

// ── request shape ────────────────────────────────────────────────────

#[tokio::test]
async fn reserved_characters_stay_inside_one_segment() {
    let mock_server = MockServer::start().await;
    expect_write(&mock_server, "POST", "/api/v1/users/user%2Fwith%3Freserved%23chars").await;

    test_client(&mock_server)
        .add_user(&s("user/with?reserved#chars"))
        .await
        .unwrap();
}

#[tokio::test]
async fn dot_and_empty_identifiers_are_rejected_without_a_request() {
    let mock_server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    for id in ["", ".", ".."] {
        match client.add_user(&s(id)).await {
            Err(AccessManagerError::UnroutableIdentifier { identifier }) => assert_eq!(identifier, id),
            other => panic!("expected UnroutableIdentifier for {id:?}, got: {other:?}"),
        }
    }
    let result = client.add_user_to_group_mapping(&s(".."), &s("group1")).await;
    assert!(matches!(result, Err(AccessManagerError::UnroutableIdentifier { .. })));
}

#[tokio::test]
async fn identifiers_made_of_dots_and_text_are_sent_as_is() {
    let mock_server = MockServer::start().await;
    expect_write(&mock_server, "POST", "/api/v1/users/...").await;
    expect_write(&mock_server, "POST", "/api/v1/users/.hidden").await;

    let client = test_client(&mock_server);
    client.add_user(&s("...")).await.unwrap();
    client.add_user(&s(".hidden")).await.unwrap();
}

#[tokio::test]
async fn base_url_path_is_kept_before_api_prefix() {
    let mock_server = MockServer::start().await;
    expect_write(&mock_server, "POST", "/access-manager/api/v1/users/user1").await;

    let config = AccessManagerClientConfig::from_url_str(&format!("{}/access-manager", mock_server.uri())).unwrap();
    let client: StringClient = AccessManagerClient::new(config, Stringifiers::strings()).unwrap();
    client.add_user(&s("user1")).await.unwrap();
}

#[tokio::test]
async fn zero_timeout_does_not_expire_requests() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/users/user1"))
        .respond_with(ResponseTemplate::new(201).set_delay(std::time::Duration::from_millis(50)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = AccessManagerClientConfig::from_url_str(&mock_server.uri())
        .unwrap()
        .with_timeout_secs(0);
    let client: StringClient = AccessManagerClient::new(config, Stringifiers::strings()).unwrap();
    client.add_user(&s("user1")).await.unwrap();
}

#[tokio::test]
async fn configured_headers_are_sent_with_every_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/users/user1"))
        .and(header("X-Tenant", "acme"))
        .and(header("Authorization", "Bearer token-1"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = AccessManagerClientConfig::from_url_str(&mock_server.uri())
        .unwrap()
        .with_header("X-Tenant", "acme")
        .with_header("Authorization", "Bearer token-1");
    let client: StringClient = AccessManagerClient::new(config, Stringifiers::strings()).unwrap();
    client.add_user(&s("user1")).await.unwrap();
}

// ── status contract ──────────────────────────────────────────────────

#[tokio::test]
async fn delete_answered_with_200_is_rejected() {
    let mock_server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/users/user1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let result = test_client(&mock_server).remove_user(&s("user1")).await;
    match result {
        Err(AccessManagerError::UnexpectedStatus {
            method, status, body, ..
        }) => {
            assert_eq!(method, HttpMethod::Delete);
            assert_eq!(status, 200);
            assert!(body.is_none());
        }
        other => panic!("expected UnexpectedStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn add_existing_user_surfaces_service_message() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/users/user1"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": {
                "code": "ArgumentException",
                "message": "User 'user1' already exists.",
                "target": "user"
            }
        })))
        .mount(&mock_server)
        .await;

    let result = test_client(&mock_server).add_user(&s("user1")).await;
    match result {
        Err(AccessManagerError::InvalidArgument { message }) => {
            assert_eq!(message, "User 'user1' already exists.");
        }
        other => panic!("expected InvalidArgument, got: {other:?}"),
    }
}
