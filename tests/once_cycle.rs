//! End-to-end single-cycle test: real CSV file, real HTTP over a local
//! stub server, real log files. SMTP is never reached because the checked
//! rows carry no recipients.

use std::io::Write;
use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use watchpost::Config;

/// Serve canned HTTP responses on a local port: `/ok` answers 200,
/// everything else 500
async fn spawn_stub_server() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let (mut socket, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => break,
            };
            tokio::spawn(async move {
                let mut buf = [0u8; 4096];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]);
                let status_line = if request.starts_with("GET /ok ") {
                    "HTTP/1.1 200 OK"
                } else {
                    "HTTP/1.1 500 Internal Server Error"
                };
                let response =
                    format!("{status_line}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n");
                let _ = socket.write_all(response.as_bytes()).await;
            });
        }
    });

    addr
}

#[tokio::test(flavor = "multi_thread")]
async fn one_cycle_end_to_end() {
    let addr = spawn_stub_server().await;
    let dir = tempfile::tempdir().unwrap();

    let csv_path = dir.path().join("requests.csv");
    let mut csv = std::fs::File::create(&csv_path).unwrap();
    writeln!(
        csv,
        "client;project_name;endpoint;expected_http_status;notify_emails;body_json;headers_json;http_method"
    )
    .unwrap();
    writeln!(csv, "Acme;Up;http://{addr}/ok;200;;;;GET").unwrap();
    writeln!(csv, "Acme;Down;http://{addr}/broken;200;;;;GET").unwrap();
    writeln!(csv, "Acme;Gone;http://127.0.0.1:1/;200;;;;GET").unwrap();

    let config = Config {
        requests_csv: csv_path,
        logs_dir: dir.path().join("logs"),
        summary_log: dir.path().join("resume.log"),
        retention_days: 30,
        check_interval_seconds: 1800,
        smtp: Default::default(),
    };

    let summary = watchpost::run_once(config.clone()).await.unwrap();
    assert_eq!(summary.total_checked, 3);
    assert_eq!(summary.total_alerting, 2);

    let up = std::fs::read_to_string(config.logs_dir.join("Up.log")).unwrap();
    assert!(up.contains("expected=200"));
    assert!(up.contains("actual=200"));
    assert!(up.contains("status=OK"));

    let down = std::fs::read_to_string(config.logs_dir.join("Down.log")).unwrap();
    assert!(down.contains("actual=500"));
    assert!(down.contains("status=ALERT"));

    let gone = std::fs::read_to_string(config.logs_dir.join("Gone.log")).unwrap();
    assert!(gone.contains("actual=ERROR"));
    assert!(gone.contains("status=ALERT"));
    assert!(gone.contains("detail=GET http://127.0.0.1:1/ failed:"));

    let resume = std::fs::read_to_string(&config.summary_log).unwrap();
    let lines: Vec<&str> = resume.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("| 3 analysed projects | 2 projects in alert"));
}

#[tokio::test]
async fn cycle_against_missing_csv_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        requests_csv: dir.path().join("nonexistent.csv"),
        logs_dir: dir.path().join("logs"),
        summary_log: dir.path().join("resume.log"),
        ..Config::default()
    };

    let err = watchpost::run_once(config).await.unwrap_err();
    assert!(err.to_string().contains("Failed to read checks file"));
}
