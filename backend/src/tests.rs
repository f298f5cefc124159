//! Tests for the service bootstrap, covering configuration and readiness
//! signalling.

use std::net::SocketAddr;
use std::time::Duration;

use super::server::{ServerConfig, create_server};
use actix_web::web;
use problem_service::inbound::http::health::HealthState;
use problem_service::settings::ServerSettings;
use rstest::{fixture, rstest};

#[fixture]
fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

#[fixture]
fn bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 0))
}

fn settings(expose_docs: bool, public_url: Option<&str>) -> ServerSettings {
    ServerSettings {
        host: Some("127.0.0.1".to_owned()),
        port: Some(0),
        work_delay_ms: Some(25),
        public_url: public_url.map(str::to_owned),
        expose_docs,
    }
}

#[rstest]
#[actix_rt::test]
async fn create_server_marks_ready(health_state: web::Data<HealthState>, bind_address: SocketAddr) {
    assert!(!health_state.is_ready(), "state should start unready");

    let _server = create_server(health_state.clone(), ServerConfig::new(bind_address))
        .expect("server should bind an ephemeral port");

    assert!(
        health_state.is_ready(),
        "server creation should mark readiness"
    );
}

#[rstest]
fn config_from_settings_carries_bind_addr_and_delay() {
    let config =
        ServerConfig::from_settings(&settings(true, Some("https://things.example.com")))
            .expect("settings are valid");

    assert_eq!(config.bind_addr(), SocketAddr::from(([127, 0, 0, 1], 0)));
    assert_eq!(config.work_delay, Duration::from_millis(25));
    let docs = config.docs.expect("docs enabled");
    assert_eq!(docs.public_url.as_deref(), Some("https://things.example.com"));
}

#[rstest]
#[case(true)]
#[case(false)]
fn invalid_public_url_fails_startup(#[case] expose_docs: bool) {
    let result = ServerConfig::from_settings(&settings(expose_docs, Some("things.example.com")));
    assert!(result.is_err(), "scheme-less public URL should be rejected");
}
