//! HTTP source against a local one-shot server.
//!
//! Each fixture binds 127.0.0.1:0, answers a single request with a canned
//! response, and shuts down. No external network access is needed.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use climadash_core::config::SourceConfig;
use climadash_core::data::{DataError, DataSource, DatasetSource, HttpSource, TableCache};

const OWID_SNIPPET: &str = "country,year,iso_code,co2,temperature_change_from_co2\n\
                            Afghanistan,2020,AFG,11.9,0.001\n\
                            World,2019,OWID_WRL,37082.559,0.98\n\
                            World,2020,OWID_WRL,35264.086,1.0\n";

/// Serve one response, optionally after a delay, and return the bound URL.
fn serve_once(status_line: &'static str, body: &'static str, delay: Duration) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();

        // Drain the request head.
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line).unwrap_or(0) == 0 || line == "\r\n" {
                break;
            }
        }

        thread::sleep(delay);
        let response = format!(
            "{status_line}\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = stream.write_all(response.as_bytes());
    });
    (format!("http://{addr}/owid-co2-data.csv"), handle)
}

fn config(url: String, timeout_secs: u64) -> SourceConfig {
    SourceConfig {
        url,
        timeout_secs,
        ..SourceConfig::default()
    }
}

#[test]
fn fetches_and_loads_world_rows() {
    let (url, server) = serve_once("HTTP/1.1 200 OK", OWID_SNIPPET, Duration::ZERO);
    let source = HttpSource::new(&config(url.clone(), 5)).unwrap();
    assert_eq!(source.url(), url);

    let cache = TableCache::new(source, "World");
    let table = cache.get_table().unwrap();
    server.join().unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.year_span(), Some((2019, 2020)));
    assert_eq!(table.records()[1].co2, Some(35264.086));

    // Server is gone; a second call must still succeed from the cache.
    assert!(cache.get_table().is_ok());
}

#[test]
fn raw_payload_is_tagged_http() {
    let (url, server) = serve_once("HTTP/1.1 200 OK", OWID_SNIPPET, Duration::ZERO);
    let raw = HttpSource::new(&config(url, 5)).unwrap().fetch().unwrap();
    server.join().unwrap();
    assert_eq!(raw.source, DataSource::Http);
    assert_eq!(raw.bytes, OWID_SNIPPET.as_bytes());
}

#[test]
fn non_success_status_is_http_status_error() {
    let (url, server) = serve_once("HTTP/1.1 503 Service Unavailable", "down", Duration::ZERO);
    let err = HttpSource::new(&config(url, 5)).unwrap().fetch().unwrap_err();
    server.join().unwrap();
    match err {
        DataError::HttpStatus { status, .. } => assert_eq!(status, 503),
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[test]
fn slow_server_times_out() {
    let (url, server) = serve_once("HTTP/1.1 200 OK", OWID_SNIPPET, Duration::from_secs(3));
    let err = HttpSource::new(&config(url, 1)).unwrap().fetch().unwrap_err();
    assert!(matches!(err, DataError::NetworkUnreachable(_)), "{err:?}");
    assert!(err.is_fetch());
    let _ = server.join();
}

#[test]
fn unreachable_host_is_network_error() {
    // Bind then drop so the port is (almost certainly) closed.
    let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
    let url = format!("http://127.0.0.1:{port}/owid.csv");
    let err = HttpSource::new(&config(url, 2)).unwrap().fetch().unwrap_err();
    assert!(matches!(err, DataError::NetworkUnreachable(_)), "{err:?}");
}

#[test]
fn html_error_page_is_parse_error() {
    let (url, server) = serve_once(
        "HTTP/1.1 200 OK",
        "<!DOCTYPE html>\n<html><body>Too many requests</body></html>\n",
        Duration::ZERO,
    );
    let cache = TableCache::new(HttpSource::new(&config(url, 5)).unwrap(), "World");
    let err = cache.get_table().unwrap_err();
    server.join().unwrap();
    assert!(err.is_parse(), "{err:?}");
}
