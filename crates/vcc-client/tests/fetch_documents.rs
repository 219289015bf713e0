//! Tests for ConsoleClient document fetching against a mock server.

use serde_json::json;
use tokio_util::sync::CancellationToken;
use url::Url;
use vcc_client::{ClientError, ConsoleClient};
use vcc_core::{AppError, AppErrorKind, ConsoleConfig};
use vcc_schema::AttributeType;
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> ConsoleClient {
    ConsoleClient::new(&ConsoleConfig::local(&server.uri()).unwrap()).unwrap()
}

#[tokio::test]
async fn fetch_schema_builds_attribute_tree() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/schemas/kyc.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "object",
            "required": ["birthday"],
            "properties": {
                "birthday": {"type": "integer"},
                "documentType": {"type": "integer"}
            }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let url = format!("{}/schemas/kyc.json", server.uri());
    let root = client
        .fetch_schema(&url, &CancellationToken::new())
        .await
        .unwrap();

    let object = root.as_object().unwrap();
    assert_eq!(object.children().len(), 2);
    assert!(object.child("birthday").unwrap().required());
    assert_eq!(
        object.child("documentType").unwrap().attribute_type(),
        AttributeType::Integer
    );
}

#[tokio::test]
async fn fetch_json_ld_types_from_context() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/contexts/kyc.json-ld"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "@context": [{
                "@version": 1.1,
                "KYCAgeCredential": {
                    "@id": "urn:kyc:KYCAgeCredential",
                    "@context": {"birthday": {"@id": "kyc:birthday"}}
                }
            }]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let types = client
        .fetch_json_ld_types(
            &format!("{}/contexts/kyc.json-ld", server.uri()),
            &CancellationToken::new(),
        )
        .await
        .unwrap();
    assert_eq!(types.len(), 1);
    assert_eq!(types[0].name, "KYCAgeCredential");
    assert_eq!(types[0].id, "urn:kyc:KYCAgeCredential");
}

#[tokio::test]
async fn ipfs_urls_resolve_through_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ipfs/QmSchemaCid"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"type": "string"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let root = client
        .fetch_schema("ipfs://QmSchemaCid", &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(root.attribute_type(), AttributeType::String);
}

#[tokio::test]
async fn error_status_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "Schema not found"})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .fetch_json(&format!("{}/missing.json", server.uri()), &CancellationToken::new())
        .await
        .unwrap_err();
    match &err {
        ClientError::Status { failure, .. } => {
            assert_eq!(failure.status, Some(404));
            assert_eq!(failure.message, "Schema not found");
        }
        other => panic!("expected Status, got {other:?}"),
    }

    let app = AppError::from(err);
    assert_eq!(app.kind(), AppErrorKind::RequestError);
    assert_eq!(app.status(), Some(404));
}

#[tokio::test]
async fn non_json_body_is_deserialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .fetch_json(&server.uri(), &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Deserialization { .. }));
    assert_eq!(AppError::from(err).kind(), AppErrorKind::GeneralError);
}

#[tokio::test]
async fn cancelled_token_yields_cancel_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"type": "string"}))
                .set_delay(std::time::Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        canceller.cancel();
    });

    let err = client.fetch_json(&server.uri(), &token).await.unwrap_err();
    assert!(matches!(err, ClientError::Cancelled { .. }));
    assert!(AppError::from(err).is_cancellation());
}

#[tokio::test]
async fn backend_requests_use_basic_auth() {
    let server = MockServer::start().await;
    // "user:secret" in base64.
    Mock::given(method("GET"))
        .and(path("/v1/status"))
        .and(header("authorization", "Basic dXNlcjpzZWNyZXQ="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "up"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = ConsoleConfig::local(&server.uri()).unwrap();
    config.api_username = Some("user".into());
    config.api_password = Some("secret".into());
    let client = ConsoleClient::new(&config).unwrap();

    let body = client
        .fetch_api_json("v1/status", &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(body, json!({"status": "up"}));
}

#[tokio::test]
async fn documents_elsewhere_are_fetched_without_credentials() {
    let backend = MockServer::start().await;
    let documents = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&documents)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"type": "boolean"})))
        .mount(&documents)
        .await;

    let mut config = ConsoleConfig::local(&backend.uri()).unwrap();
    config.api_username = Some("user".into());
    config.api_password = Some("secret".into());
    config.ipfs_gateway_url = Url::parse(&documents.uri()).unwrap();
    let client = ConsoleClient::new(&config).unwrap();

    let root = client
        .fetch_schema(&format!("{}/schema.json", documents.uri()), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(root.attribute_type(), AttributeType::Boolean);
}

#[tokio::test]
async fn already_cancelled_token_never_reaches_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"type": "string"})))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let token = CancellationToken::new();
    token.cancel();

    let err = client
        .fetch_schema(&format!("{}/schema.json", server.uri()), &token)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Cancelled { .. }));
}
