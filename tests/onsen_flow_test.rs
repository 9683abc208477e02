use anyhow::Result;
use httpmock::prelude::*;
use kiroku::core::geo;
use kiroku::core::onsen::{OnsenService, VisitInput};
use kiroku::domain::model::GeoPoint;
use kiroku::{LocalStore, NominatimClient};
use tempfile::TempDir;

const HOME: GeoPoint = GeoPoint {
    lat: 35.6812,
    lon: 139.7671,
};

fn service(
    server: &MockServer,
    data_dir: &TempDir,
    home: Option<GeoPoint>,
) -> OnsenService<LocalStore, NominatimClient> {
    let store = LocalStore::new(data_dir.path().to_str().unwrap().to_string());
    let geocoder = NominatimClient::new(
        server.base_url(),
        "kiroku-test/0.1",
        Some("Japan".to_string()),
    );
    OnsenService::new(store, geocoder, home)
}

fn visit(name: &str, address: &str) -> VisitInput {
    VisitInput {
        name: name.to_string(),
        address: address.to_string(),
        visited_on: "2026-08-20".parse().unwrap(),
        notes: String::new(),
    }
}

#[tokio::test]
async fn test_record_visit_with_distance_from_home() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    let geocode_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/search")
            .query_param("q", "神奈川県足柄下郡箱根町湯本, Japan");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                {"lat": "35.2323", "lon": "139.1069", "display_name": "Hakone-Yumoto"}
            ]));
    });

    let onsen = service(&server, &temp_dir, Some(HOME));
    let record = onsen
        .record_visit(visit("箱根湯本温泉", "神奈川県足柄下郡箱根町湯本"))
        .await?;

    geocode_mock.assert();
    let point = record.coords.expect("address should geocode");
    assert_eq!(point, GeoPoint { lat: 35.2323, lon: 139.1069 });
    assert_eq!(record.distance_km, Some(geo::distance_km(HOME, point)));

    // Persisted: a fresh service over the same directory lists the visit.
    let reopened = service(&server, &temp_dir, Some(HOME));
    let visits = reopened.list().await?;
    assert_eq!(visits.len(), 1);
    assert_eq!(visits[0].name, "箱根湯本温泉");
    assert_eq!(visits[0].distance_km, record.distance_km);

    Ok(())
}

#[tokio::test]
async fn test_unresolvable_address_still_records_the_visit() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([]));
    });

    let onsen = service(&server, &temp_dir, Some(HOME));
    let record = onsen.record_visit(visit("謎の温泉", "存在しない住所")).await?;

    assert!(record.coords.is_none());
    assert!(record.distance_km.is_none());
    assert_eq!(onsen.list().await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_geocoder_outage_still_records_the_visit() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(503);
    });

    let onsen = service(&server, &temp_dir, Some(HOME));
    let record = onsen.record_visit(visit("テスト温泉", "どこか")).await?;

    assert!(record.coords.is_none());
    assert!(record.distance_km.is_none());

    Ok(())
}

#[tokio::test]
async fn test_no_home_configured_means_no_distance() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                {"lat": "35.2323", "lon": "139.1069", "display_name": "Hakone-Yumoto"}
            ]));
    });

    let onsen = service(&server, &temp_dir, None);
    let record = onsen.record_visit(visit("箱根湯本温泉", "箱根町湯本")).await?;

    assert!(record.coords.is_some());
    assert!(record.distance_km.is_none());

    Ok(())
}

#[tokio::test]
async fn test_visits_list_newest_first() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([]));
    });

    let onsen = service(&server, &temp_dir, None);
    onsen.record_visit(visit("first", "a")).await?;
    // Millisecond ids double as creation order; make sure the clock moved.
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    onsen.record_visit(visit("second", "b")).await?;

    let visits = onsen.list().await?;
    assert_eq!(visits.len(), 2);
    assert_eq!(visits[0].name, "second");
    assert_eq!(visits[1].name, "first");

    Ok(())
}
