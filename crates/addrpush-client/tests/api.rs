//! Client tests against a mock device API.

use addrpush_client::{Location, PanosClient, PanosError};
use addrpush_core::{AddressEntry, AddressGroup, AddressKind, BatchBuilder, DeviceType, Scope};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "LUFRPT1TESTKEY=";

fn xml(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "application/xml")
}

fn success(result: &str) -> ResponseTemplate {
    xml(&format!(r#"<response status="success"><result>{result}</result></response>"#))
}

async fn client(server: &MockServer) -> PanosClient {
    PanosClient::builder("unused")
        .base_url(server.uri())
        .api_key(KEY)
        .build()
        .unwrap()
}

#[tokio::test]
async fn keygen_returns_authenticated_client() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/"))
        .and(query_param("type", "keygen"))
        .and(query_param("user", "admin"))
        .and(query_param("password", "s3cret&more"))
        .respond_with(success(&format!("<key>{KEY}</key>")))
        .expect(1)
        .mount(&server)
        .await;

    let anon = PanosClient::builder("unused").base_url(server.uri()).build().unwrap();
    assert!(!anon.is_authenticated());

    let authed = anon.authenticate("admin", "s3cret&more").await.unwrap();
    assert!(authed.is_authenticated());
}

#[tokio::test]
async fn keygen_error_is_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(query_param("type", "keygen"))
        .respond_with(
            ResponseTemplate::new(403).set_body_raw(
                r#"<response status="error" code="403"><result><msg>Invalid Credential</msg></result></response>"#,
                "application/xml",
            ),
        )
        .mount(&server)
        .await;

    let anon = PanosClient::builder("unused").base_url(server.uri()).build().unwrap();
    let err = anon.authenticate("admin", "wrong").await.err().unwrap();
    assert!(err.is_auth_error(), "{err:?}");
    assert_eq!(err.to_string(), "authentication failed: Invalid Credential");
}

#[tokio::test]
async fn connection_failure_is_not_auth_error() {
    let anon = PanosClient::builder("unused")
        .base_url("http://127.0.0.1:1")
        .build()
        .unwrap();
    let err = anon.authenticate("admin", "pw").await.err().unwrap();
    assert!(!err.is_auth_error());
    assert!(err.is_connection_error(), "{err:?}");
}

#[tokio::test]
async fn config_call_without_key_fails_locally() {
    let anon = PanosClient::builder("unused").base_url("http://127.0.0.1:1").build().unwrap();
    let err = anon.objects().device_groups().await.unwrap_err();
    assert!(matches!(err, PanosError::MissingKey));
}

#[tokio::test]
async fn detects_panorama_and_firewall() {
    let server = MockServer::start().await;
    Mock::given(query_param("xpath", "/config/devices/entry[@name='localhost.localdomain']/device-group"))
        .and(query_param("key", KEY))
        .respond_with(success(
            r#"<device-group><entry name="branch"/><entry name="emea"/></device-group>"#,
        ))
        .mount(&server)
        .await;

    let client = client(&server).await;
    assert_eq!(client.objects().device_groups().await.unwrap(), ["branch", "emea"]);
    assert_eq!(client.objects().detect_device_type().await.unwrap(), DeviceType::Panorama);

    let server = MockServer::start().await;
    Mock::given(query_param("action", "get"))
        .respond_with(success(""))
        .mount(&server)
        .await;
    let client = crate::client(&server).await;
    assert_eq!(client.objects().detect_device_type().await.unwrap(), DeviceType::Firewall);
}

#[tokio::test]
async fn device_group_ancestors_from_hierarchy() {
    let server = MockServer::start().await;
    Mock::given(query_param("type", "op"))
        .and(query_param("cmd", "<show><dg-hierarchy></dg-hierarchy></show>"))
        .respond_with(success(
            r#"<dg-hierarchy><dg name="global"><dg name="emea"><dg name="branch"/></dg></dg></dg-hierarchy>"#,
        ))
        .mount(&server)
        .await;

    let client = client(&server).await;
    let op = client.op();
    assert_eq!(op.device_group_ancestors("branch").await.unwrap(), ["emea", "global"]);
    assert!(op.device_group_ancestors("unknown").await.unwrap().is_empty());
}

#[tokio::test]
async fn multi_vsys_setting() {
    let server = MockServer::start().await;
    Mock::given(query_param("type", "op"))
        .respond_with(success("on"))
        .mount(&server)
        .await;
    assert!(client(&server).await.op().multi_vsys().await.unwrap());

    let server = MockServer::start().await;
    Mock::given(query_param("type", "op"))
        .respond_with(success("maybe"))
        .mount(&server)
        .await;
    let err = client(&server).await.op().multi_vsys().await.unwrap_err();
    assert!(matches!(err, PanosError::UnexpectedResponse(_)));
}

#[tokio::test]
async fn existing_names_cover_lineage_and_shared() {
    let server = MockServer::start().await;
    for (location, names) in [
        (Location::DeviceGroup("branch".into()), r#"<entry name="a"/>"#),
        (Location::DeviceGroup("emea".into()), r#"<entry name="b"/>"#),
        (Location::Shared, r#"<entry name="c"/><entry name="d"/>"#),
    ] {
        Mock::given(query_param("xpath", location.addresses().as_str()))
            .respond_with(success(&format!("<address>{names}</address>")))
            .expect(1)
            .mount(&server)
            .await;
    }

    let scope = Scope::DeviceGroup { name: "branch".into(), ancestors: vec!["emea".into()] };
    let names = client(&server).await.objects().existing_names(&scope).await.unwrap();
    assert_eq!(names, ["a", "b", "c", "d"]);
}

#[tokio::test]
async fn create_addresses_sends_element() {
    let server = MockServer::start().await;
    let location = Location::Vsys("vsys1".into());
    let entries = vec![
        AddressEntry::new("web", "10.1.1.1", AddressKind::NetworkHost),
        AddressEntry::new("ftp.example.com", "ftp.example.com", AddressKind::Fqdn),
    ];
    let expected = entries.iter().map(AddressEntry::fragment).collect::<String>();

    Mock::given(query_param("action", "set"))
        .and(query_param("xpath", location.addresses().as_str()))
        .and(query_param("element", expected.as_str()))
        .respond_with(xml(r#"<response status="success" code="20"><msg>command succeeded</msg></response>"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server).await;
    let objects = client.objects();
    let batches = objects.address_batcher(&location, 5000).pack_entries(&entries).unwrap();
    assert_eq!(batches.len(), 1);
    objects.create_addresses(&location, &batches[0]).await.unwrap();
}

#[tokio::test]
async fn rejected_push_reports_redacted_request() {
    let server = MockServer::start().await;
    Mock::given(query_param("action", "set"))
        .respond_with(xml(
            r#"<response status="error" code="12"><msg><line>address-group -> g is invalid</line></msg></response>"#,
        ))
        .mount(&server)
        .await;

    let client = client(&server).await;
    let location = Location::Shared;
    let group = AddressGroup::new("g", vec!["web".into()]).unwrap();
    let batches = BatchBuilder::default().pack_members(&group).unwrap();

    let err = client
        .objects()
        .create_group(&location, &group, &batches[0])
        .await
        .unwrap_err();

    let request = err.rejected_request().expect("push error carries the request");
    assert!(request.contains("action=set"));
    assert!(request.contains("key=*****"));
    assert!(!request.contains(KEY));
    assert!(err.to_string().contains("address-group -> g is invalid"));
}

#[tokio::test]
async fn non_xml_http_error_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let err = client(&server).await.objects().vsys_names().await.unwrap_err();
    assert!(matches!(err, PanosError::Api { code: Some(502), .. }), "{err:?}");
}
