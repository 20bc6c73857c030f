use airboard_tui::config::Config;
use airboard_tui::error::{ApiError, ConfigError, SearchError};
use airboard_tui::events::Event;
use airboard_tui::models::StatusFilter;
use airboard_tui::search::FlightSearch;
use airboard_tui::status::{Severity, StatusMessage};
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::{json, Value};
use tokio::sync::mpsc;

fn config_for(server: &ServerGuard, key: Option<&str>) -> Config {
    let mut config = Config::default();
    config.api.base_url = server.url();
    config.api.access_key = key.map(str::to_string);
    config
}

fn flights(iata: &str, prefix: &str, count: usize) -> Value {
    let data: Vec<Value> = (1..=count)
        .map(|n| {
            json!({
                "flight_status": "active",
                "airline": { "name": "LATAM Airlines" },
                "flight": { "iata": format!("{}{}", prefix, n) },
                "departure": { "iata": iata },
                "arrival": { "iata": "LIM" }
            })
        })
        .collect();
    json!({ "data": data })
}

async fn mock_flights(server: &mut ServerGuard, iata: &str, body: Value, expected: usize) -> Mock {
    server
        .mock("GET", "/flights")
        .match_query(Matcher::UrlEncoded("dep_iata".into(), iata.into()))
        .with_status(200)
        .with_body(body.to_string())
        .expect(expected)
        .create_async()
        .await
}

fn drain_status(rx: &mut mpsc::UnboundedReceiver<Event>) -> Vec<StatusMessage> {
    let mut out = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let Event::Status(msg) = event {
            out.push(msg);
        }
    }
    out
}

#[tokio::test]
async fn chile_search_fills_cap_from_first_two_airports() {
    let mut server = Server::new_async().await;
    let airports = server
        .mock("GET", "/airports")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("access_key".into(), "key".into()),
            Matcher::UrlEncoded("country_iso2".into(), "CL".into()),
        ]))
        .with_status(200)
        .with_body(
            json!({ "data": [
                { "airport_name": "Arturo Merino Benitez", "iata_code": "SCL" },
                { "airport_name": "Private strip", "iata_code": null },
                { "airport_name": "Cerro Moreno", "iata_code": "ANF" },
                { "airport_name": "El Tepual", "iata_code": "PMC" }
            ]})
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;
    let scl = mock_flights(&mut server, "SCL", flights("SCL", "LA", 6), 1).await;
    let anf = mock_flights(&mut server, "ANF", flights("ANF", "JA", 6), 1).await;
    let pmc = mock_flights(&mut server, "PMC", flights("PMC", "H2", 6), 0).await;

    let search = FlightSearch::from_config(&config_for(&server, Some("key"))).unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let result = search.run("CL", StatusFilter::All, &tx).await.unwrap();

    assert_eq!(result.len(), 10);
    assert!(result[..6].iter().all(|f| f.origin.identifier == "SCL"));
    assert!(result[6..].iter().all(|f| f.origin.identifier == "ANF"));
    assert_eq!(result[0].origin.name.as_deref(), Some("Arturo Merino Benitez"));

    airports.assert_async().await;
    scl.assert_async().await;
    anf.assert_async().await;
    pmc.assert_async().await;

    let statuses = drain_status(&mut rx);
    assert_eq!(
        statuses.last(),
        Some(&StatusMessage::new("Showing 10 flight(s).", Severity::Ok))
    );
}

#[tokio::test]
async fn missing_key_sends_nothing_upstream() {
    let mut server = Server::new_async().await;
    let any = server
        .mock("GET", Matcher::Any)
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let search = FlightSearch::from_config(&config_for(&server, None)).unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let err = search.run("CL", StatusFilter::All, &tx).await.unwrap_err();

    assert!(matches!(err, SearchError::Config(ConfigError::MissingAccessKey)));
    assert_eq!(
        drain_status(&mut rx),
        vec![StatusMessage::new("Missing API key configuration.", Severity::Err)]
    );
    any.assert_async().await;
}

#[tokio::test]
async fn airport_error_envelope_stops_the_search() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/airports")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({ "error": { "code": "invalid_access_key", "info": "Invalid key." } }).to_string())
        .create_async()
        .await;
    let flights_mock = server
        .mock("GET", "/flights")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let search = FlightSearch::from_config(&config_for(&server, Some("bad"))).unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let err = search.run("CL", StatusFilter::Active, &tx).await.unwrap_err();

    assert!(matches!(err, SearchError::Api(ApiError::Upstream(ref m)) if m == "Invalid key."));
    assert_eq!(
        drain_status(&mut rx).last(),
        Some(&StatusMessage::new("Failed to fetch data: Invalid key.", Severity::Err))
    );
    flights_mock.assert_async().await;
}

#[tokio::test]
async fn status_filter_reaches_flight_queries() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/airports")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({ "data": [{ "iata_code": "EZE" }] }).to_string())
        .create_async()
        .await;
    let landed = server
        .mock("GET", "/flights")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("dep_iata".into(), "EZE".into()),
            Matcher::UrlEncoded("flight_status".into(), "landed".into()),
        ]))
        .with_status(200)
        .with_body(flights("EZE", "AR", 2).to_string())
        .expect(1)
        .create_async()
        .await;

    let search = FlightSearch::from_config(&config_for(&server, Some("key"))).unwrap();
    let (tx, _rx) = mpsc::unbounded_channel::<Event>();
    let result = search.run("AR", StatusFilter::Landed, &tx).await.unwrap();

    assert_eq!(result.len(), 2);
    landed.assert_async().await;
}

#[tokio::test]
async fn failure_status_does_not_expose_the_access_key() {
    let mut config = Config::default();
    config.api.base_url = "http://127.0.0.1:1".to_string();
    config.api.access_key = Some("SECRET-KEY-123".to_string());
    config.api.timeout_seconds = 2;

    let search = FlightSearch::from_config(&config).unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let err = search.run("CL", StatusFilter::All, &tx).await.unwrap_err();

    assert!(matches!(err, SearchError::Api(ApiError::Network(_))));
    assert!(!err.to_string().contains("SECRET-KEY-123"));
    let last = drain_status(&mut rx).pop().unwrap();
    assert_eq!(last.severity, Severity::Err);
    assert!(last.text.starts_with("Failed to fetch data: "));
    assert!(!last.text.contains("SECRET-KEY-123"));
}

#[tokio::test]
async fn null_airport_data_is_an_empty_result() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/airports")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({ "data": null }).to_string())
        .create_async()
        .await;
    let flights_mock = server
        .mock("GET", "/flights")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let search = FlightSearch::from_config(&config_for(&server, Some("key"))).unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let result = search.run("CL", StatusFilter::All, &tx).await.unwrap();

    assert!(result.is_empty());
    assert_eq!(
        drain_status(&mut rx).last(),
        Some(&StatusMessage::new("Showing 0 flight(s).", Severity::Ok))
    );
    flights_mock.assert_async().await;
}
