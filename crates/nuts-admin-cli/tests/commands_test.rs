//! Subcommand handlers against a wiremock console backend.

use std::sync::Arc;

use nuts_admin_cli::credentials::{run_credentials, CredentialsArgs, CredentialsCommand};
use nuts_admin_cli::discovery::{run_discovery, DiscoveryArgs, DiscoveryCommand};
use nuts_admin_cli::identities::{run_identities, IdentitiesArgs, IdentitiesCommand};
use nuts_admin_cli::{connect, ConnectionArgs, EXIT_SIGN_IN};
use nuts_admin_client::{AdminClient, ApiConfig, NoToken};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer, forbidden_route: Option<&str>) -> AdminClient {
    let mut config = ApiConfig::new(server.uri().parse().unwrap());
    if let Some(route) = forbidden_route {
        config = config.with_forbidden_route(route);
    }
    AdminClient::new(&config, Arc::new(NoToken)).unwrap()
}

#[tokio::test]
async fn identities_list_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "acme", "did": "did:web:example.com:iam:acme"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let args = IdentitiesArgs {
        command: IdentitiesCommand::List { json: false },
    };
    assert_eq!(run_identities(&args, &client(&server, None)).await.unwrap(), 0);
}

#[tokio::test]
async fn unauthorized_prints_sign_in_hint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/id"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let args = IdentitiesArgs {
        command: IdentitiesCommand::List { json: true },
    };
    let code = run_identities(&args, &client(&server, Some("/login")))
        .await
        .unwrap();
    assert_eq!(code, EXIT_SIGN_IN);
}

#[tokio::test]
async fn unauthorized_without_route_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/id"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;

    let args = IdentitiesArgs {
        command: IdentitiesCommand::List { json: true },
    };
    let err = run_identities(&args, &client(&server, None))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn upload_reads_file_and_posts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/proxy/internal/vcr/v2/holder/did:web:example.com:iam:acme/vc"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("vc.json");
    std::fs::write(&file, r#"{"id": "vc-1"}"#).unwrap();

    let args = CredentialsArgs {
        command: CredentialsCommand::Upload {
            subject: "did:web:example.com:iam:acme".into(),
            file,
        },
    };
    assert_eq!(run_credentials(&args, &client(&server, None)).await.unwrap(), 0);
}

#[tokio::test]
async fn requirements_for_unknown_service_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/proxy/internal/discovery/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let args = DiscoveryArgs {
        command: DiscoveryCommand::Requirements {
            service: "urn:missing".into(),
        },
    };
    let err = run_discovery(&args, &client(&server, None)).await.unwrap_err();
    assert!(err.to_string().contains("urn:missing"));
}

#[tokio::test]
async fn connect_uses_session_file_token() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/proxy/internal/discovery/v1/urn:svc/did:web:x"))
        .and(header("authorization", "Bearer from-file"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let session = dir.path().join("session");
    std::fs::write(&session, "from-file\n").unwrap();

    let connection = ConnectionArgs {
        url: Some(server.uri().parse().unwrap()),
        session_file: Some(session),
    };
    let client = connect(&connection).unwrap();
    let args = DiscoveryArgs {
        command: DiscoveryCommand::Deactivate {
            service: "urn:svc".into(),
            subject: "did:web:x".into(),
        },
    };
    assert_eq!(run_discovery(&args, &client).await.unwrap(), 0);
}
