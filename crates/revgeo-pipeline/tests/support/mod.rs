//! Test doubles for the map surface and device locator, plus wiremock
//! fixtures for the geocoding and summary endpoints.

#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use revgeo_core::Coordinates;
use revgeo_geocoding::GeocodingClient;
use revgeo_pipeline::{
    ControllerOptions, DeviceLocator, GeolocationError, LocationResolver, MapInteractionController,
    MapSurface,
};
use revgeo_summary::SummaryClient;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use tracing::subscriber::DefaultGuard;
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCommand {
    PlaceMarker(Coordinates, String),
    ClearMarkers,
    Recenter(Coordinates),
}

/// Records every command instead of drawing anything.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Mutex<Vec<SurfaceCommand>>,
}

impl RecordingSurface {
    pub fn commands(&self) -> Vec<SurfaceCommand> {
        self.commands.lock().unwrap().clone()
    }

    fn push(&self, command: SurfaceCommand) {
        self.commands.lock().unwrap().push(command);
    }
}

impl MapSurface for RecordingSurface {
    fn place_marker(&self, at: Coordinates, popup_title: &str) {
        self.push(SurfaceCommand::PlaceMarker(at, popup_title.to_string()));
    }

    fn clear_markers(&self) {
        self.push(SurfaceCommand::ClearMarkers);
    }

    fn recenter(&self, at: Coordinates) {
        self.push(SurfaceCommand::Recenter(at));
    }
}

/// Always answers with the same fix or failure.
#[derive(Debug, Clone)]
pub struct StubLocator(pub Result<Coordinates, GeolocationError>);

impl DeviceLocator for StubLocator {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        self.0.clone()
    }
}

/// Reports `at` only after `delay`, like a GPS fix that takes a while.
#[derive(Debug, Clone)]
pub struct SlowLocator {
    pub at: Coordinates,
    pub delay: Duration,
}

impl DeviceLocator for SlowLocator {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.at)
    }
}

pub type TestController = MapInteractionController<RecordingSurface, StubLocator>;

pub fn coords(lat: f64, lng: f64) -> Coordinates {
    Coordinates::new(lat, lng).expect("test coordinates should be valid")
}

pub fn resolver_with(geocoder_uri: &str, summary_uri: &str) -> LocationResolver {
    let geocoder = GeocodingClient::with_base_url(geocoder_uri, 5, "revgeo-test/0.1")
        .expect("geocoding client should build");
    let summaries =
        SummaryClient::with_base_url(&format!("{summary_uri}/w/api.php"), 5, "revgeo-test/0.1", 10)
            .expect("summary client should build");
    LocationResolver::new(geocoder, summaries)
}

pub fn resolver_for(server: &MockServer) -> LocationResolver {
    resolver_with(&server.uri(), &server.uri())
}

pub fn controller_for(
    server: &MockServer,
    locator: StubLocator,
    options: ControllerOptions,
) -> TestController {
    MapInteractionController::new(
        resolver_for(server),
        RecordingSurface::default(),
        locator,
        options,
    )
}

/// Nothing listens on port 1, so requests fail at the transport level.
pub const UNREACHABLE_URI: &str = "http://127.0.0.1:1";

pub async fn mount_reverse(
    server: &MockServer,
    at: Coordinates,
    address: serde_json::Value,
    delay: Duration,
) {
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .and(query_param("lat", at.lat.to_string()))
        .and(query_param("lon", at.lng.to_string()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "address": address }))
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

pub async fn mount_summary(server: &MockServer, title: &str, extract: &str) {
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("titles", title))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": { "pages": { "1": { "title": title, "extract": extract } } }
        })))
        .mount(server)
        .await;
}

pub async fn mount_search(server: &MockServer, query: &str, hits: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", query))
        .respond_with(ResponseTemplate::new(200).set_body_json(hits))
        .mount(server)
        .await;
}

/// Fails the test on drop if the summary endpoint is ever called.
pub async fn forbid_summary_calls(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}

/// Collects formatted log output from the current thread.
///
/// `#[tokio::test]` runs on a single thread, so the guard returned by
/// [`LogCapture::install`] covers every event the test awaits.
#[derive(Debug, Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn install(&self) -> DefaultGuard {
        let sink = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || sink.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .without_time()
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Whether some line was logged at `level` and contains `message`.
    pub fn contains(&self, level: &str, message: &str) -> bool {
        self.lines()
            .iter()
            .any(|line| line.contains(level) && line.contains(message))
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
