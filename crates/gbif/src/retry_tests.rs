use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::client::GbifClient;
use crate::error::GbifError;
use crate::retry::RetryPolicy;

fn fast_client(server: &MockServer, max_retries: usize) -> GbifClient {
    GbifClient::new(&server.uri())
        .unwrap()
        .with_retry_policy(RetryPolicy::new(max_retries, Duration::from_millis(5)))
}

fn occurrences_body() -> serde_json::Value {
    json!({
        "offset": 0,
        "limit": 20,
        "endOfRecords": true,
        "results": [{
            "species": "Banksia serrata",
            "speciesKey": 3928915,
            "media": [{ "type": "StillImage", "identifier": "https://img.example/1.jpg" }]
        }]
    })
}

#[test]
fn default_delays_double_from_one_second() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.max_retries, 3);
    assert_eq!(policy.delay_for(1), Duration::from_secs(1));
    assert_eq!(policy.delay_for(2), Duration::from_secs(2));
    assert_eq!(policy.delay_for(3), Duration::from_secs(4));
}

#[test]
fn huge_retry_numbers_do_not_overflow() {
    let policy = RetryPolicy::new(100, Duration::from_millis(1));
    assert!(policy.delay_for(90) >= policy.delay_for(10));
    assert_eq!(RetryPolicy::none().delay_for(3), Duration::ZERO);
}

#[tokio::test]
async fn retries_503_then_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/occurrence/search"))
        .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/occurrence/search"))
        .and(query_param("speciesKey", "3928915"))
        .respond_with(ResponseTemplate::new(200).set_body_json(occurrences_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_client(&server, 3);
    let images = client.find_images_for_species("3928915").await.unwrap();
    assert_eq!(images.len(), 1);
}

#[tokio::test]
async fn retries_429_then_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/occurrence/search"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/occurrence/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(occurrences_body()))
        .mount(&server)
        .await;

    let client = fast_client(&server, 3);
    let images = client.find_images_for_species("3928915").await.unwrap();
    assert_eq!(images[0].url, "https://img.example/1.jpg");
}

#[tokio::test]
async fn does_not_retry_client_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/occurrence/search"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad speciesKey"))
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_client(&server, 3);
    let err = client.find_images_for_species("not-a-key").await.unwrap_err();
    match err {
        GbifError::HttpStatus { code, body } => {
            assert_eq!(code, 400);
            assert_eq!(body, "bad speciesKey");
        },
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn gives_up_after_max_retries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/species/3928915/vernacularNames"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .expect(4)
        .mount(&server)
        .await;

    let client = fast_client(&server, 3);
    let err = client.find_vernacular_names(3_928_915).await.unwrap_err();
    match err {
        GbifError::RetriesExhausted(last) => {
            assert!(matches!(*last, GbifError::HttpStatus { code: 502, .. }));
        },
        other => panic!("expected RetriesExhausted, got {other:?}"),
    }
}

#[tokio::test]
async fn no_retry_policy_makes_a_single_attempt() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/occurrence/search"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = GbifClient::new(&server.uri()).unwrap().with_retry_policy(RetryPolicy::none());
    let err = client.find_images_for_species("1").await.unwrap_err();
    assert!(matches!(err, GbifError::RetriesExhausted(_)));
}

#[tokio::test]
async fn malformed_json_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/occurrence/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"results\": [oops"))
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_client(&server, 3);
    let err = client.find_images_for_species("1").await.unwrap_err();
    match err {
        GbifError::JsonParse { context, .. } => assert!(context.contains("occurrence search")),
        other => panic!("expected JsonParse, got {other:?}"),
    }
}
