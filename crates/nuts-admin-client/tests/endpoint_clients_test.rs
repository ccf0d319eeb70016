//! Contract tests for the typed identity, issuer and discovery clients.
//!
//! ## Endpoints Tested
//!
//! | Client | Method | Path | Test |
//! |--------|--------|------|------|
//! | identities | GET | `/api/id` | `list_identities_*` |
//! | identities | POST | `/api/id` | `create_identity_*` |
//! | identities | GET | `/api/id/{did}` | `get_identity_*` |
//! | issuer | GET | `/api/issuer/vc` | `issued_credentials_*` |
//! | issuer | POST | `/api/proxy/internal/vcr/v2/issuer/vc` | `issue_*` |
//! | issuer | GET | `/api/proxy/internal/vcr/v2/issuer/vc/search` | `search_issued_*` |
//! | issuer | POST | `/api/proxy/internal/vcr/v2/holder/{subject}/vc` | `load_into_wallet_*` |
//! | discovery | GET | `/api/proxy/internal/discovery/v1` | `services_*`, `requirements_*` |
//! | discovery | GET | `/api/proxy/internal/discovery/v1/{service}` | `search_*` |
//! | discovery | POST/DELETE | `/api/proxy/internal/discovery/v1/{service}/{subject}` | `activate_*`, `deactivate_*` |

use std::sync::Arc;

use nuts_admin_client::{AdminClient, ApiConfig, ApiError, StaticToken};
use nuts_admin_vc::TemplateRegistry;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> AdminClient {
    let config = ApiConfig::new(server.uri().parse().unwrap());
    AdminClient::new(&config, Arc::new(StaticToken::new("test-token"))).unwrap()
}

fn discovery_services() -> serde_json::Value {
    json!([
        {
            "id": "urn:nuts.nl:usecase:eOverdrachtDev2023",
            "endpoint": "https://discovery.example.com/eoverdracht",
            "presentation_max_validity": 2764800,
            "presentation_definition": {
                "id": "pd_care_organization",
                "input_descriptors": [{
                    "id": "id_nuts_care_organization_cred",
                    "constraints": {"fields": [
                        {"path": ["$.type"], "filter": {"type": "string", "const": "NutsOrganizationCredential"}},
                        {"path": ["$.credentialSubject.organization.name"], "filter": {"type": "string"}}
                    ]}
                }]
            }
        },
        {
            "id": "urn:nuts.nl:usecase:empty",
            "endpoint": "https://discovery.example.com/empty",
            "presentation_definition": {"input_descriptors": []}
        }
    ])
}

// ── /api/id ──────────────────────────────────────────────────────────

#[tokio::test]
async fn list_identities_returns_named_dids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/id"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "acme", "did": "did:web:example.com:iam:acme"},
            {"name": "did:nuts:B8PUHs2AUHbFF1xLLK4eZjgErEcMXHxs68FteY7NDtCY", "did": "did:nuts:B8PUHs2AUHbFF1xLLK4eZjgErEcMXHxs68FteY7NDtCY"}
        ])))
        .mount(&server)
        .await;

    let identities = test_client(&server).identities().list().await.unwrap();
    assert_eq!(identities.len(), 2);
    assert_eq!(identities[0].name, "acme");
    assert_eq!(identities[0].did.method(), "web");
    assert_eq!(identities[1].did.method(), "nuts");
}

#[tokio::test]
async fn list_identities_rejects_malformed_did() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/id"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"name": "x", "did": "not-a-did"}])),
        )
        .mount(&server)
        .await;

    let err = test_client(&server).identities().list().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode { .. }));
}

#[tokio::test]
async fn create_identity_posts_subject() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/id"))
        .and(body_json(json!({"subject": "acme"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"name": "acme", "did": "did:web:example.com:iam:acme"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let identity = test_client(&server).identities().create("acme").await.unwrap();
    assert_eq!(identity.did.as_str(), "did:web:example.com:iam:acme");
}

#[tokio::test]
async fn create_identity_surfaces_backend_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/id"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({"error": "DID already exists"})))
        .mount(&server)
        .await;

    let err = test_client(&server).identities().create("acme").await.unwrap_err();
    assert_eq!(err.status(), Some(409));
    assert!(err.to_string().contains("DID already exists"));
}

#[tokio::test]
async fn get_identity_encodes_did_and_sorts_services() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/id/did:web:example.com%253A8443:iam:acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "acme",
            "did": "did:web:example.com%3A8443:iam:acme",
            "did_document": {"id": "did:web:example.com%3A8443:iam:acme"},
            "discovery_services": [
                {"id": "urn:z", "active": false},
                {"id": "urn:a", "active": true, "vp": "eyJ..."}
            ],
            "wallet_credentials": [{"type": ["VerifiableCredential", "NutsUraCredential"]}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let details = test_client(&server)
        .identities()
        .get("did:web:example.com%3A8443:iam:acme")
        .await
        .unwrap();
    assert_eq!(details.identity.name, "acme");
    let ids: Vec<_> = details
        .discovery_services
        .iter()
        .map(|s| s.service_id.as_str())
        .collect();
    assert_eq!(ids, vec!["urn:a", "urn:z"]);
    assert!(details.discovery_services[0].presentation.is_some());
    assert_eq!(details.wallet_credentials.len(), 1);
}

#[tokio::test]
async fn get_identity_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/id/did:web:missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "DID not found"})))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .identities()
        .get("did:web:missing")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(err.to_string().contains("DID not found"));
}

// ── Issuer ───────────────────────────────────────────────────────────

#[tokio::test]
async fn issued_credentials_joins_types() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/issuer/vc"))
        .and(query_param("credentialTypes", "NutsUraCredential,NutsOrganizationCredential"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "vc-1"}])))
        .expect(1)
        .mount(&server)
        .await;

    let issued = test_client(&server)
        .issuer()
        .issued_credentials(&["NutsUraCredential", "NutsOrganizationCredential"])
        .await
        .unwrap();
    assert_eq!(issued, vec![json!({"id": "vc-1"})]);
}

#[tokio::test]
async fn issue_from_template_posts_rendered_document() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/proxy/internal/vcr/v2/issuer/vc"))
        .and(body_json(json!({
            "@context": ["https://nuts.nl/credentials/v1", "https://www.w3.org/2018/credentials/v1"],
            "issuer": "did:nuts:issuer",
            "credentialSubject": {"id": "did:nuts:subject", "organization": {"ura": "12345678"}},
            "type": ["NutsURACredential", "VerifiableCredential"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "did:nuts:issuer#1", "proof": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let signed = test_client(&server)
        .issuer()
        .issue_from_template(
            &TemplateRegistry::standard(),
            "NutsURACredential",
            "did:nuts:issuer",
            "did:nuts:subject",
            &["12345678".to_string()],
        )
        .await
        .unwrap();
    assert_eq!(signed["id"], "did:nuts:issuer#1");
}

#[tokio::test]
async fn issue_from_template_fails_before_sending() {
    let server = MockServer::start().await;
    let client = test_client(&server);
    let registry = TemplateRegistry::standard();

    let err = client
        .issuer()
        .issue_from_template(&registry, "NoSuchCredential", "did:nuts:i", "did:nuts:s", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::UnknownTemplate(ref t) if t == "NoSuchCredential"));

    let err = client
        .issuer()
        .issue_from_template(&registry, "NutsOrganizationCredential", "did:nuts:i", "did:nuts:s", &["Acme".into()])
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Template(_)));

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn search_issued_sends_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/proxy/internal/vcr/v2/issuer/vc/search"))
        .and(query_param("issuer", "did:web:example.com"))
        .and(query_param("credentialType", "NutsUraCredential"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "verifiableCredentials": [
                {"verifiableCredential": {"id": "vc-1"}},
                {"verifiableCredential": {"id": "vc-2"}, "revocation": {"reason": "expired"}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let results = test_client(&server)
        .issuer()
        .search_issued("did:web:example.com", Some("NutsUraCredential"))
        .await
        .unwrap();
    assert_eq!(results.verifiable_credentials.len(), 2);
    assert!(results.verifiable_credentials[1].revocation.is_some());
}

#[tokio::test]
async fn load_into_wallet_accepts_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/proxy/internal/vcr/v2/holder/did:web:example.com:iam:acme/vc"))
        .and(body_json(json!({"id": "vc-1"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    test_client(&server)
        .issuer()
        .load_into_wallet("did:web:example.com:iam:acme", &json!({"id": "vc-1"}))
        .await
        .unwrap();
}

// ── Discovery ────────────────────────────────────────────────────────

#[tokio::test]
async fn services_lists_definitions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/proxy/internal/discovery/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(discovery_services()))
        .mount(&server)
        .await;

    let services = test_client(&server).discovery().services().await.unwrap();
    assert_eq!(services.len(), 2);
    assert_eq!(services[1].endpoint, "https://discovery.example.com/empty");
}

#[tokio::test]
async fn requirements_for_known_service() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/proxy/internal/discovery/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(discovery_services()))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let required: Vec<_> = client
        .discovery()
        .requirements("urn:nuts.nl:usecase:eOverdrachtDev2023")
        .await
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(required, vec!["NutsOrganizationCredential"]);

    let none = client
        .discovery()
        .requirements("urn:nuts.nl:usecase:empty")
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn requirements_for_unknown_service() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/proxy/internal/discovery/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(discovery_services()))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .discovery()
        .requirements("urn:unknown")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::ServiceNotFound(ref s) if s == "urn:unknown"));
}

#[tokio::test]
async fn search_passes_field_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/proxy/internal/discovery/v1/urn:nuts.nl:usecase:eOverdrachtDev2023"))
        .and(query_param("credentialSubject.organization.city", "Utrecht"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "vp-1"}])))
        .expect(1)
        .mount(&server)
        .await;

    let hits = test_client(&server)
        .discovery()
        .search(
            "urn:nuts.nl:usecase:eOverdrachtDev2023",
            &[("credentialSubject.organization.city".into(), "Utrecht".into())],
        )
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
}

#[tokio::test]
async fn activate_with_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/proxy/internal/discovery/v1/urn:svc/did:web:example.com:iam:acme"))
        .and(body_json(json!({"registrationParameters": {"fhir": "https://fhir.example.com"}})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut params = serde_json::Map::new();
    params.insert("fhir".into(), json!("https://fhir.example.com"));
    let activation = test_client(&server)
        .discovery()
        .activate("urn:svc", "did:web:example.com:iam:acme", Some(params))
        .await
        .unwrap();
    assert_eq!(activation.reason, None);
}

#[tokio::test]
async fn activate_pending_reports_reason() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/proxy/internal/discovery/v1/urn:svc/did:web:x"))
        .respond_with(
            ResponseTemplate::new(202).set_body_json(json!({"reason": "missing credentials"})),
        )
        .mount(&server)
        .await;

    let activation = test_client(&server)
        .discovery()
        .activate("urn:svc", "did:web:x", None)
        .await
        .unwrap();
    assert_eq!(activation.reason.as_deref(), Some("missing credentials"));
}

#[tokio::test]
async fn deactivate_sends_delete() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/proxy/internal/discovery/v1/urn:svc/did:web:x"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    test_client(&server)
        .discovery()
        .deactivate("urn:svc", "did:web:x")
        .await
        .unwrap();
}
