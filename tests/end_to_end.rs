//! End-to-end tests through the `goose` facade.
//!
//! These exercise a small application shape: components holding alerts, a
//! configuration file applied at startup, and log output sent to a file or a
//! syslog listener.

use std::fs;
use std::io::{Read, Seek, SeekFrom};
use std::net::UdpSocket;
use std::time::Duration;

use goose::sink::{self, Decoration};
use goose::syslog::{Facility, Priority, Severity, use_network_syslog};
use goose::{Alert, Registry, alert_log, disable_trace, enable_trace, impl_component};
use test_support::{log_file, serial};

struct Listener {
    level: Alert,
    accept: Alert,
}

impl_component!(Listener { level, accept });

struct Cache {
    level: Alert,
}

impl_component!(Cache { level });

#[inline(never)]
fn serve(listener: &Listener) -> u32 {
    alert_log!(listener.accept, 2, "accepted {} from {}", 3, "10.0.0.7");
    line!() - 1
}

// ============================================================================
// File Output
// ============================================================================

/// Startup configuration from a file, then timestamped records into a log file.
#[test]
fn configured_components_log_to_a_file() {
    let _lock = serial();
    disable_trace();

    let config = tempfile::NamedTempFile::new().expect("config file");
    fs::write(
        config.path(),
        br#"{"Goose": {"listener": {"level": 1, "accept": 2}, "cache": {"level": 5}}}"#,
    )
    .expect("write config");

    let listener = Listener {
        level: Alert::new(1),
        accept: Alert::new(1),
    };
    let cache = Cache {
        level: Alert::default(),
    };
    let mut registry = Registry::new();
    registry.insert("listener", &listener);
    registry.insert("cache", &cache);

    let report = registry
        .configure(&fs::read(config.path()).expect("read config"))
        .expect("valid config");
    assert_eq!(report.updated, 2);
    assert_eq!(cache.level.get(), 0);

    let mut file = log_file().expect("log file");
    let writer = file.reopen().expect("reopen log file");
    let guard = sink::redirect(writer, Decoration::Timestamp);

    serve(&listener);
    alert_log!(cache.level, 1, "cache miss");
    drop(guard);

    let mut contents = String::new();
    file.seek(SeekFrom::Start(0)).expect("rewind");
    file.read_to_string(&mut contents).expect("read log");

    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 1, "log: {contents}");
    let (stamp, message) = lines[0].split_at(20);
    assert_eq!(message, "accepted 3 from 10.0.0.7");
    assert_eq!(&stamp[4..5], "/");
    assert_eq!(&stamp[19..], " ");
}

/// With tracing on, file records name the emitting function.
#[test]
fn traced_records_name_the_emitting_function() {
    let _lock = serial();
    let mut file = log_file().expect("log file");
    let guard = sink::redirect(file.reopen().expect("reopen"), Decoration::Plain);

    let listener = Listener {
        level: Alert::new(2),
        accept: Alert::new(2),
    };
    enable_trace();
    let line = serve(&listener);
    disable_trace();
    drop(guard);

    let mut contents = String::new();
    file.read_to_string(&mut contents).expect("read log");
    assert_eq!(
        contents,
        format!("{{end_to_end}}[end_to_end.rs]<serve>({line}): accepted 3 from 10.0.0.7\n")
    );
}

// ============================================================================
// Syslog Output
// ============================================================================

/// Switching to syslog sends the same records to the daemon.
#[test]
fn records_reach_a_syslog_listener() {
    let _lock = serial();
    disable_trace();
    let _restore = sink::redirect(std::io::sink(), Decoration::Timestamp);

    let server = UdpSocket::bind("127.0.0.1:0").expect("bind");
    server
        .set_read_timeout(Some(Duration::from_secs(5)))
        .expect("timeout");
    let address = server.local_addr().expect("addr").to_string();

    use_network_syslog("udp4", &address, Priority::new(Facility::Daemon, Severity::Error))
        .expect("dial");

    let listener = Listener {
        level: Alert::new(2),
        accept: Alert::new(2),
    };
    serve(&listener);

    let mut buffer = [0_u8; 2048];
    let received = server.recv(&mut buffer).expect("receive");
    let record = std::str::from_utf8(&buffer[..received]).expect("utf-8");
    assert!(record.starts_with("<27>"), "record: {record}");
    assert!(record.ends_with("]: accepted 3 from 10.0.0.7\n"), "record: {record}");
}
