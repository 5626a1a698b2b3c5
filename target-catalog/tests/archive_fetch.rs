//! Fetch pipeline against a mock TAP endpoint

use std::process::Command;
use target_catalog::catalogs::{MissionSource, TargetCatalog, TargetSet};
use target_catalog::config::ArchiveConfig;
use target_catalog::data::ArchiveError;
use target_catalog::pipeline::{fetch_target_list, FetchError};
use test_helpers::sample_archive_csv;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer, dir: &tempfile::TempDir) -> ArchiveConfig {
    ArchiveConfig {
        endpoint: format!("{}/TAP/sync", server.uri()),
        output: dir.path().join("ASTR502_Mega_Target_List.csv"),
        ..ArchiveConfig::default()
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_posts_flattened_query_as_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/TAP/sync"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("format=csv"))
        .and(body_string_contains("query=SELECT+pl_name%2C+hostname%2C+gaia_dr3_id"))
        .and(body_string_contains("FROM+pscomppars+WHERE+tran_flag+%3D+1+ORDER+BY+ra"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_archive_csv()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&server, &dir);
    let output = config.output.clone();

    let report = tokio::task::spawn_blocking(move || fetch_target_list(&config))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(report.planets, 8);
    assert_eq!(report.unique_hosts, 7);
    assert_eq!(report.breakdown[0], (MissionSource::Kepler, 2));
    assert_eq!(report.output, output);

    let saved = TargetCatalog::load(&output).unwrap();
    assert_eq!(saved.len(), 8);
    assert_eq!(saved.mission_breakdown(), report.breakdown);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_error_status_is_fatal_and_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/TAP/sync"))
        .respond_with(ResponseTemplate::new(500).set_body_string("service unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&server, &dir);
    let output = config.output.clone();

    let result = tokio::task::spawn_blocking(move || fetch_target_list(&config))
        .await
        .unwrap();

    match result {
        Err(FetchError::Archive(ArchiveError::Status { status, body })) => {
            assert_eq!(status, 500);
            assert_eq!(body, "service unavailable");
        }
        other => panic!("Expected status error, got {other:?}"),
    }
    assert!(!output.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_votable_error_document_is_reported() {
    let server = MockServer::start().await;
    let votable = r#"<?xml version="1.0" encoding="UTF-8"?>
<VOTABLE version="1.3"><RESOURCE type="results">
<INFO name="QUERY_STATUS" value="ERROR">Unknown column st_agee</INFO>
</RESOURCE></VOTABLE>"#;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(votable))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&server, &dir);

    let result = tokio::task::spawn_blocking(move || fetch_target_list(&config))
        .await
        .unwrap();

    match result {
        Err(FetchError::Archive(ArchiveError::ServiceError(message))) => {
            assert!(message.contains("Unknown column"));
        }
        other => panic!("Expected service error, got {other:?}"),
    }
}

/// A local port with nothing listening on it
fn closed_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

#[test]
fn test_unreachable_endpoint_is_request_error() {
    let port = closed_port();

    let dir = tempfile::tempdir().unwrap();
    let config = ArchiveConfig {
        endpoint: format!("http://127.0.0.1:{port}/TAP/sync"),
        output: dir.path().join("targets.csv"),
        ..ArchiveConfig::default()
    };

    let result = fetch_target_list(&config);
    assert!(matches!(
        result,
        Err(FetchError::Archive(ArchiveError::Request(_)))
    ));
    assert!(!config.output.exists());
}

#[test]
fn test_generator_binary_reports_error_and_exits_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let output_file = dir.path().join("targets.csv");
    let endpoint = format!("http://127.0.0.1:{}/TAP/sync", closed_port());

    let output = Command::new(env!("CARGO_BIN_EXE_generate_targets"))
        .arg("--endpoint")
        .arg(&endpoint)
        .arg("--output")
        .arg(&output_file)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Querying NASA Exoplanet Archive"));
    assert!(stdout.contains("Error: Request failed:"));
    assert!(!output_file.exists());
}
