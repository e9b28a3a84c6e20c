//! End-to-end lookup tests with every external API served by one wiremock
//! server. `Mock::expect` counts prove which upstream calls were made.

use chrono::FixedOffset;
use rentscout_core::LatLng;
use rentscout_extract::ExtractClient;
use rentscout_jinka::JinkaClient;
use rentscout_maps::{CategoryOutcome, MapsClient, MapsEndpoints, MapsKeys, CATEGORIES};
use rentscout_pipeline::{LookupError, Scout};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const AD_PATH: &str = "/apiv2/alert/alert-tok/ad/123";
const SOURCE_PATH: &str = "/alert_result_view_ad";
const LLM_PATH: &str = "/responses";
const GEOCODE_PATH: &str = "/maps/api/geocode/json";
const PLACES_PATH: &str = "/v1/places:searchNearby";
const ROUTES_PATH: &str = "/directions/v2:computeRoutes";

const LISTING_URL: &str = "https://www.jinka.fr/alert_result?token=alert-tok&ad=123";

fn scout(server: &MockServer) -> Scout {
    let uri = server.uri();
    let ua = "rentscout-test/0.1";
    let jinka = JinkaClient::with_base_url("alert-tok", 5, ua, &uri).expect("jinka client");
    let extract =
        ExtractClient::with_base_url("sk-test", "gpt-4.1-nano", 5, ua, &uri).expect("llm client");
    let keys = MapsKeys {
        geocoding: "geo-key".to_owned(),
        places: "places-key".to_owned(),
        routes: "routes-key".to_owned(),
    };
    let endpoints = MapsEndpoints::under(&uri).expect("endpoints");
    let maps = MapsClient::with_endpoints(keys, 5, ua, endpoints).expect("maps client");

    Scout::new(
        jinka,
        extract,
        maps,
        LatLng::new(48.8924, 2.2369),
        FixedOffset::east_opt(3600).expect("valid offset"),
    )
}

async fn mount_ad(server: &MockServer, ad: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(AD_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ad": ad })))
        .mount(server)
        .await;
}

fn llm_reply(address: &str, points_of_interest: &[&str]) -> ResponseTemplate {
    let text = json!({ "address": address, "pointOfInterests": points_of_interest }).to_string();
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "resp_1",
        "object": "response",
        "status": "completed",
        "output": [{
            "type": "message",
            "role": "assistant",
            "content": [{ "type": "output_text", "text": text, "annotations": [] }]
        }]
    }))
}

fn geocode_reply(top_type: &str, lat: f64, lng: f64) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "status": "OK",
        "results": [{
            "geometry": { "location": { "lat": lat, "lng": lng } },
            "types": [top_type, "political"]
        }]
    }))
}

/// Geocode mock for one exact query string, expected exactly once.
async fn expect_geocode(server: &MockServer, query: &str, reply: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .and(query_param("address", query))
        .respond_with(reply)
        .expect(1)
        .mount(server)
        .await;
}

/// Fails the test if any geocode query other than the expected ones is sent.
async fn forbid_other_geocodes(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ZERO_RESULTS",
            "results": []
        })))
        .with_priority(10)
        .expect(0)
        .mount(server)
        .await;
}

async fn mount_survey_apis(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(PLACES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "places": [{
                "displayName": { "text": "Le Comptoir" },
                "rating": 4.2,
                "userRatingCount": 87,
                "types": ["cafe", "food", "establishment"],
                "googleMapsUri": "https://maps.google.com/?cid=7",
                "location": { "latitude": 48.8568, "longitude": 2.3525 }
            }]
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(ROUTES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "routes": [{
                "legs": [{ "steps": [
                    { "travelMode": "WALK" },
                    { "travelMode": "TRANSIT", "transitDetails": { "transitLine": {
                        "nameShort": "1", "vehicle": { "type": "SUBWAY" } } } }
                ]}],
                "localizedValues": { "duration": { "text": "28 min" } }
            }]
        })))
        .mount(server)
        .await;
}

fn unplaced_ad() -> serde_json::Value {
    json!({
        "id": 123,
        "lat": null,
        "lng": null,
        "city": "Paris",
        "quartier_name": null,
        "description": "Deux pièces lumineux"
    })
}

#[tokio::test]
async fn known_coordinates_skip_extraction_and_geocoding() {
    let server = MockServer::start().await;
    mount_ad(
        &server,
        json!({ "id": 123, "lat": 48.85, "lng": 2.35, "city": "Paris" }),
    )
    .await;
    mount_survey_apis(&server).await;

    Mock::given(method("POST"))
        .and(path(LLM_PATH))
        .respond_with(llm_reply("", &[]))
        .expect(0)
        .mount(&server)
        .await;
    forbid_other_geocodes(&server).await;

    let survey = scout(&server)
        .lookup_ad_url(LISTING_URL)
        .await
        .expect("lookup should succeed");

    assert_eq!(survey.position, LatLng::new(48.85, 2.35));
    assert_eq!(survey.maps_url, "https://www.google.com/maps/search/?q=48.85,2.35");
    assert_eq!(survey.route.modes, vec!["walking", "subway 1"]);
    assert_eq!(survey.route.duration, "28 min");
    assert_eq!(survey.points_of_interest.len(), CATEGORIES.len());
    assert!(survey
        .points_of_interest
        .iter()
        .all(|g| matches!(&g.outcome, CategoryOutcome::Places { places } if places.len() == 1)));
}

#[tokio::test]
async fn extracted_address_is_geocoded() {
    let server = MockServer::start().await;
    mount_ad(&server, unplaced_ad()).await;
    mount_survey_apis(&server).await;

    Mock::given(method("POST"))
        .and(path(LLM_PATH))
        .respond_with(llm_reply("10 Rue de Rivoli, Paris", &[]))
        .expect(1)
        .mount(&server)
        .await;
    expect_geocode(
        &server,
        "10 Rue de Rivoli, Paris",
        geocode_reply("route", 48.8556, 2.3601),
    )
    .await;
    forbid_other_geocodes(&server).await;

    let survey = scout(&server).lookup_ad_url(LISTING_URL).await.unwrap();
    assert_eq!(survey.position, LatLng::new(48.8556, 2.3601));
}

#[tokio::test]
async fn postal_code_result_falls_through_to_point_of_interest() {
    let server = MockServer::start().await;
    mount_ad(&server, unplaced_ad()).await;
    mount_survey_apis(&server).await;

    Mock::given(method("POST"))
        .and(path(LLM_PATH))
        .respond_with(llm_reply("75011 Paris", &["Métro Oberkampf", "Cirque d'Hiver"]))
        .expect(1)
        .mount(&server)
        .await;
    expect_geocode(&server, "75011 Paris", geocode_reply("postal_code", 48.86, 2.37)).await;
    expect_geocode(
        &server,
        "Métro Oberkampf",
        geocode_reply("subway_station", 48.8648, 2.3681),
    )
    .await;
    forbid_other_geocodes(&server).await;

    let survey = scout(&server).lookup_ad_url(LISTING_URL).await.unwrap();
    assert_eq!(survey.position, LatLng::new(48.8648, 2.3681));
}

#[tokio::test]
async fn empty_address_geocodes_first_point_of_interest() {
    let server = MockServer::start().await;
    mount_ad(&server, unplaced_ad()).await;
    mount_survey_apis(&server).await;

    Mock::given(method("POST"))
        .and(path(LLM_PATH))
        .respond_with(llm_reply("", &["Tour Eiffel"]))
        .mount(&server)
        .await;
    expect_geocode(
        &server,
        "Tour Eiffel",
        geocode_reply("tourist_attraction", 48.8584, 2.2945),
    )
    .await;
    forbid_other_geocodes(&server).await;

    let survey = scout(&server).lookup_ad_url(LISTING_URL).await.unwrap();
    assert_eq!(survey.position, LatLng::new(48.8584, 2.2945));
}

#[tokio::test]
async fn neighbourhood_and_city_are_the_last_record_fallback() {
    let server = MockServer::start().await;
    let mut ad = unplaced_ad();
    ad["quartier_name"] = json!("Marais");
    mount_ad(&server, ad).await;
    mount_survey_apis(&server).await;

    Mock::given(method("POST"))
        .and(path(LLM_PATH))
        .respond_with(llm_reply("", &[]))
        .expect(1)
        .mount(&server)
        .await;
    expect_geocode(
        &server,
        "Marais, Paris",
        geocode_reply("neighborhood", 48.8590, 2.3620),
    )
    .await;
    forbid_other_geocodes(&server).await;

    Mock::given(method("GET"))
        .and(path(SOURCE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .expect(0)
        .mount(&server)
        .await;

    let survey = scout(&server).lookup_ad_url(LISTING_URL).await.unwrap();
    assert_eq!(survey.position, LatLng::new(48.8590, 2.3620));
}

#[tokio::test]
async fn listing_source_is_the_final_fallback() {
    let server = MockServer::start().await;
    let html = "<html><body><p>Appartement rue de Charonne</p></body></html>";
    mount_ad(&server, unplaced_ad()).await;
    mount_survey_apis(&server).await;

    Mock::given(method("GET"))
        .and(path(SOURCE_PATH))
        .and(query_param("alert_token", "alert-tok"))
        .and(query_param("ad", "123"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(LLM_PATH))
        .and(body_partial_json(json!({ "input": html })))
        .respond_with(llm_reply("Rue de Charonne, Paris", &[]))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(LLM_PATH))
        .respond_with(llm_reply("", &[]))
        .with_priority(2)
        .expect(1)
        .mount(&server)
        .await;

    expect_geocode(
        &server,
        "Rue de Charonne, Paris",
        geocode_reply("route", 48.8531, 2.3806),
    )
    .await;
    forbid_other_geocodes(&server).await;

    let survey = scout(&server).lookup_ad_url(LISTING_URL).await.unwrap();
    assert_eq!(survey.position, LatLng::new(48.8531, 2.3806));
}

#[tokio::test]
async fn postal_code_neighbourhood_falls_through_to_listing_source() {
    let server = MockServer::start().await;
    let html = "<html><body><p>Proche place des Vosges</p></body></html>";
    let mut ad = unplaced_ad();
    ad["quartier_name"] = json!("Marais");
    mount_ad(&server, ad).await;
    mount_survey_apis(&server).await;

    Mock::given(method("GET"))
        .and(path(SOURCE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(LLM_PATH))
        .and(body_partial_json(json!({ "input": html })))
        .respond_with(llm_reply("Place des Vosges, Paris", &[]))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(LLM_PATH))
        .respond_with(llm_reply("", &[]))
        .with_priority(2)
        .expect(1)
        .mount(&server)
        .await;

    expect_geocode(
        &server,
        "Marais, Paris",
        geocode_reply("postal_code", 48.86, 2.36),
    )
    .await;
    expect_geocode(
        &server,
        "Place des Vosges, Paris",
        geocode_reply("route", 48.8556, 2.3655),
    )
    .await;
    forbid_other_geocodes(&server).await;

    let survey = scout(&server).lookup_ad_url(LISTING_URL).await.unwrap();
    assert_eq!(survey.position, LatLng::new(48.8556, 2.3655));
}

#[tokio::test]
async fn postal_code_source_address_falls_through_to_source_point_of_interest() {
    let server = MockServer::start().await;
    let html = "<html><body><p>75004, à deux pas de Saint-Paul</p></body></html>";
    mount_ad(&server, unplaced_ad()).await;
    mount_survey_apis(&server).await;

    Mock::given(method("GET"))
        .and(path(SOURCE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(LLM_PATH))
        .and(body_partial_json(json!({ "input": html })))
        .respond_with(llm_reply("75004 Paris", &["Métro Saint-Paul", "Rue de Rivoli"]))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(LLM_PATH))
        .respond_with(llm_reply("", &[]))
        .with_priority(2)
        .expect(1)
        .mount(&server)
        .await;

    expect_geocode(&server, "75004 Paris", geocode_reply("postal_code", 48.854, 2.357)).await;
    expect_geocode(
        &server,
        "Métro Saint-Paul",
        geocode_reply("subway_station", 48.8551, 2.3608),
    )
    .await;
    forbid_other_geocodes(&server).await;

    let survey = scout(&server).lookup_ad_url(LISTING_URL).await.unwrap();
    assert_eq!(survey.position, LatLng::new(48.8551, 2.3608));
}

#[tokio::test]
async fn rejected_source_fetch_is_address_not_found() {
    let server = MockServer::start().await;
    mount_ad(&server, unplaced_ad()).await;

    Mock::given(method("POST"))
        .and(path(LLM_PATH))
        .respond_with(llm_reply("", &[]))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(SOURCE_PATH))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;
    forbid_other_geocodes(&server).await;

    let err = scout(&server).lookup_ad_url(LISTING_URL).await.unwrap_err();
    assert!(matches!(err, LookupError::AddressNotFound), "got: {err:?}");
}

#[tokio::test]
async fn malformed_listing_url_makes_no_requests() {
    let server = MockServer::start().await;

    let err = scout(&server)
        .lookup_ad_url("https://www.jinka.fr/alert_result?token=alert-tok")
        .await
        .unwrap_err();

    assert!(matches!(err, LookupError::InvalidAdUrl), "got: {err:?}");
    assert_eq!(err.user_message(), "Could not extract ad ID from URL");
    let requests = server.received_requests().await.expect("recorded requests");
    assert!(requests.is_empty(), "unexpected requests: {}", requests.len());
}

#[tokio::test]
async fn missing_ad_is_ad_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(AD_PATH))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let err = scout(&server).lookup_ad_url(LISTING_URL).await.unwrap_err();
    assert!(matches!(err, LookupError::AdNotFound), "got: {err:?}");
}

#[tokio::test]
async fn malformed_extraction_is_an_upstream_failure() {
    let server = MockServer::start().await;
    mount_ad(&server, unplaced_ad()).await;

    Mock::given(method("POST"))
        .and(path(LLM_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "output": [{
                "type": "message",
                "content": [{ "type": "output_text", "text": "{\"street\":\"nope\"}" }]
            }]
        })))
        .mount(&server)
        .await;

    let err = scout(&server).lookup_ad_url(LISTING_URL).await.unwrap_err();
    assert!(matches!(err, LookupError::Upstream(_)), "got: {err:?}");
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn free_text_address_is_geocoded_directly() {
    let server = MockServer::start().await;
    mount_survey_apis(&server).await;
    expect_geocode(
        &server,
        "12 Rue Oberkampf, Paris",
        geocode_reply("street_address", 48.8645, 2.3700),
    )
    .await;

    let survey = scout(&server)
        .lookup_address("  12 Rue Oberkampf, Paris ")
        .await
        .unwrap();
    assert_eq!(survey.position, LatLng::new(48.8645, 2.3700));
}

#[tokio::test]
async fn postal_code_free_text_is_address_not_found() {
    let server = MockServer::start().await;
    expect_geocode(&server, "75011", geocode_reply("postal_code", 48.86, 2.37)).await;

    let err = scout(&server).lookup_address("75011").await.unwrap_err();
    assert!(matches!(err, LookupError::AddressNotFound), "got: {err:?}");
}

#[tokio::test]
async fn blank_free_text_makes_no_requests() {
    let server = MockServer::start().await;

    let err = scout(&server).lookup_address("   ").await.unwrap_err();
    assert!(matches!(err, LookupError::AddressNotFound), "got: {err:?}");
    let requests = server.received_requests().await.expect("recorded requests");
    assert!(requests.is_empty());
}

#[tokio::test]
async fn route_failure_fails_the_lookup() {
    let server = MockServer::start().await;
    expect_geocode(
        &server,
        "12 Rue Oberkampf, Paris",
        geocode_reply("street_address", 48.8645, 2.3700),
    )
    .await;
    Mock::given(method("POST"))
        .and(path(PLACES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(ROUTES_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let err = scout(&server)
        .lookup_address("12 Rue Oberkampf, Paris")
        .await
        .unwrap_err();
    assert!(matches!(err, LookupError::Upstream(_)), "got: {err:?}");
}
