use std::time::{Duration, Instant};

use porthole_common::config::Config;
use porthole_common::models::PortStatus;
use porthole_common::network::port::Port;
use porthole_common::network::target::Target;
use porthole_core::diagnostics::{DiagnosticsService, UNAVAILABLE};
use porthole_core::error::{ApiError, Endpoint, GENERIC_FAILURE};
use porthole_core::gateway::DiagnosticsApi;
use porthole_core::network::http::HttpClient;

use crate::utils::{Route, StubServer, healthy_routes};

fn service_for(server: &StubServer, timeout_secs: u64) -> DiagnosticsService {
    let cfg: Config = Config::new(&server.url(), timeout_secs).unwrap();
    DiagnosticsService::new(Box::new(HttpClient::new(&cfg).unwrap()))
}

fn replace(routes: &mut Vec<(&'static str, Route)>, path: &'static str, route: Route) {
    routes.retain(|(p, _)| *p != path);
    routes.push((path, route));
}

fn cloudflare() -> Target {
    "1.1.1.1".parse().unwrap()
}

fn https() -> Port {
    "443".parse().unwrap()
}

#[tokio::test]
async fn check_collects_all_four_lookups() {
    let server = StubServer::start(healthy_routes()).await.unwrap();
    let service = service_for(&server, 5);

    let report = service.run_check(&cloudflare(), https()).await.unwrap();

    assert_eq!(report.target, "1.1.1.1");
    assert_eq!(report.port, 443);
    assert_eq!(report.port_check.status, PortStatus::Open);
    assert!(report.ping.reachable);
    assert_eq!(report.ping.latency_label().as_deref(), Some("18.46 ms"));
    assert_eq!(report.geo.region_name.as_deref(), Some("Queensland"));
    assert_eq!(report.geo.isp.as_deref(), Some("Cloudflare, Inc"));
    assert_eq!(report.whois.asn.as_deref(), Some("13335"));
    assert_eq!(report.whois.emails.len(), 1);

    assert_eq!(
        server.requests(),
        vec![
            "/check-port?ip=1.1.1.1&port=443".to_string(),
            "/geolocate?ip=1.1.1.1".to_string(),
            "/ping?ip=1.1.1.1".to_string(),
            "/whois?ip=1.1.1.1".to_string(),
        ]
    );
}

#[tokio::test]
async fn hostnames_are_passed_through_unresolved() {
    let server = StubServer::start(healthy_routes()).await.unwrap();
    let cfg: Config = Config::new(&server.url(), 5).unwrap();
    let client = HttpClient::new(&cfg).unwrap();

    let target: Target = "camera.example.net".parse().unwrap();
    client.ping(&target).await.unwrap();

    assert_eq!(server.requests(), vec!["/ping?ip=camera.example.net".to_string()]);
}

#[tokio::test]
async fn one_failing_lookup_fails_the_whole_check() {
    let mut routes = healthy_routes();
    routes.retain(|(path, _)| *path != "/whois");
    let server = StubServer::start(routes).await.unwrap();
    let service = service_for(&server, 5);

    let err = service.run_check(&cloudflare(), https()).await.unwrap_err();

    match &err {
        ApiError::Status { endpoint, status, detail } => {
            assert_eq!(*endpoint, Endpoint::Whois);
            assert_eq!(*status, 404);
            assert_eq!(detail.as_deref(), Some("Not Found"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.user_message(), "Not Found");
}

#[tokio::test]
async fn status_without_detail_reports_the_code() {
    let mut routes = healthy_routes();
    replace(&mut routes, "/ping", Route::json("").status(502));
    let server = StubServer::start(routes).await.unwrap();
    let service = service_for(&server, 5);

    let err = service.run_check(&cloudflare(), https()).await.unwrap_err();
    assert_eq!(err.endpoint(), Some(Endpoint::Ping));
    assert_eq!(err.user_message(), "HTTP 502");
}

#[tokio::test]
async fn slow_lookup_times_out() {
    let mut routes = healthy_routes();
    replace(
        &mut routes,
        "/geolocate",
        Route::json(r#"{"country":"Nowhere"}"#).delayed(Duration::from_secs(4)),
    );
    let server = StubServer::start(routes).await.unwrap();
    let service = service_for(&server, 1);

    let started = Instant::now();
    let err = service.run_check(&cloudflare(), https()).await.unwrap_err();

    assert!(started.elapsed() < Duration::from_secs(3), "took {:?}", started.elapsed());
    assert!(
        matches!(err, ApiError::Timeout { endpoint: Endpoint::Geolocate, .. }),
        "unexpected error: {err:?}"
    );
    assert_eq!(err.user_message(), GENERIC_FAILURE);
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let mut routes = healthy_routes();
    replace(&mut routes, "/check-port", Route::json("<html>oops</html>"));
    let server = StubServer::start(routes).await.unwrap();
    let service = service_for(&server, 5);

    let err = service.run_check(&cloudflare(), https()).await.unwrap_err();
    assert!(
        matches!(err, ApiError::Decode { endpoint: Endpoint::CheckPort, .. }),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn closed_port_and_unreachable_host_still_succeed() {
    let mut routes = healthy_routes();
    replace(&mut routes, "/check-port", Route::json(r#"{"status":"closed"}"#));
    replace(
        &mut routes,
        "/ping",
        Route::json(r#"{"reachable":false,"error":"Operation not permitted"}"#),
    );
    let server = StubServer::start(routes).await.unwrap();
    let service = service_for(&server, 5);

    let report = service.run_check(&cloudflare(), https()).await.unwrap();
    assert!(!report.port_check.status.is_open());
    assert!(!report.ping.reachable);
    assert_eq!(report.ping.avg_latency_ms, None);
    assert_eq!(report.ping.error.as_deref(), Some("Operation not permitted"));
}

#[tokio::test]
async fn client_ip_lookup() {
    let server = StubServer::start(healthy_routes()).await.unwrap();
    let service = service_for(&server, 5);
    assert_eq!(service.lookup_client_ip().await, "203.0.113.50");

    let server = StubServer::start(Vec::new()).await.unwrap();
    let service = service_for(&server, 5);
    assert_eq!(service.lookup_client_ip().await, UNAVAILABLE);
}
