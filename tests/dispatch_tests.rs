//! Tests for verb dispatch against a recording in-memory transport.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use lensed::config::TransportConfig;
use lensed::dispatch::{
    Payload, delete_with, get, get_with, head_with, options_with, patch_with, post_with, put_with,
    request,
};
use lensed::optics::Setter;
use lensed::options::{Auth, Options, Redirects, Session, auth, header, param, redirects, session, timeout};
use lensed::transport::{Method, RawResponse, Request, TransportError};
use rstest::rstest;

/// A transport that records every request and answers with a fixed response.
#[derive(Clone, Default)]
struct Recorder {
    seen: Arc<Mutex<Vec<Request>>>,
}

impl Recorder {
    fn session(&self) -> Session {
        let seen = Arc::clone(&self.seen);
        Session::new(move |request: &Request| -> Result<RawResponse, TransportError> {
            seen.lock().map_err(|error| TransportError::Other(error.to_string()))?.push(request.clone());
            Ok(RawResponse::new(200, "OK")
                .with_header("Content-Type", "application/json")
                .with_body(r#"{"ok": true}"#))
        })
    }

    fn last(&self) -> Request {
        self.seen.lock().unwrap().last().cloned().unwrap()
    }

    fn count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn options_for(recorder: &Recorder) -> Options {
    session().set(Options::default(), Some(recorder.session()))
}

#[test]
fn test_get_serializes_params_into_url() {
    init_tracing();
    let recorder = Recorder::default();
    let opts = param("foo").set(options_for(&recorder), vec!["bar".to_string(), "quux".to_string()]);

    let response = get_with(&opts, "http://httpbin.org/get").unwrap();

    assert_eq!(response.status().code(), 200);
    let sent = recorder.last();
    assert_eq!(sent.method, Method::Get);
    assert_eq!(sent.url, "http://httpbin.org/get?foo=bar&foo=quux");
    assert_eq!(sent.body, None);
}

#[test]
fn test_request_passes_options_through() {
    init_tracing();
    let recorder = Recorder::default();
    let opts = options_for(&recorder);
    let opts = header("Accept").set(opts, vec!["application/json".to_string()]);
    let opts = auth().set(opts, Some(Auth::bearer("token")));
    let opts = redirects().set(opts, Redirects::NoFollow);
    let opts = timeout().set(opts, Some(Duration::from_secs(3)));

    request(Method::Custom("PURGE".to_string()), "http://cache.test/item", &opts, Payload::Empty).unwrap();

    let sent = recorder.last();
    assert_eq!(sent.method.as_str(), "PURGE");
    assert_eq!(sent.headers.first("accept"), Some("application/json"));
    assert_eq!(sent.auth, Some(Auth::bearer("token")));
    assert_eq!(sent.redirects, Redirects::NoFollow);
    assert_eq!(sent.timeout, Some(Duration::from_secs(3)));
}

#[rstest]
#[case(Method::Get)]
#[case(Method::Delete)]
#[case(Method::Head)]
#[case(Method::Options)]
fn test_bodiless_verbs(#[case] method: Method) {
    let recorder = Recorder::default();
    let opts = options_for(&recorder);
    let url = "http://x.test/resource";
    match method {
        Method::Get => get_with(&opts, url),
        Method::Delete => delete_with(&opts, url),
        Method::Head => head_with(&opts, url),
        _ => options_with(&opts, url),
    }
    .unwrap();
    assert_eq!(recorder.last().method, method);
}

#[rstest]
#[case(Method::Post)]
#[case(Method::Put)]
#[case(Method::Patch)]
fn test_body_verbs_send_json(#[case] method: Method) {
    let recorder = Recorder::default();
    let opts = options_for(&recorder);
    let payload = Payload::json(serde_json::json!({ "name": "lensed" }));
    let url = "http://x.test/resource";
    match method {
        Method::Post => post_with(&opts, url, payload),
        Method::Put => put_with(&opts, url, payload),
        _ => patch_with(&opts, url, payload),
    }
    .unwrap();

    let sent = recorder.last();
    assert_eq!(sent.method, method);
    assert_eq!(sent.headers.first("content-type"), Some("application/json"));
    assert_eq!(sent.body, Some(br#"{"name":"lensed"}"#.to_vec()));
}

#[test]
fn test_form_payload() {
    let recorder = Recorder::default();
    let opts = options_for(&recorder);
    post_with(&opts, "http://x.test/form", Payload::form([("q", "a b")])).unwrap();

    let sent = recorder.last();
    assert_eq!(
        sent.headers.first("Content-Type"),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(sent.body, Some(b"q=a%20b".to_vec()));
}

#[test]
fn test_session_is_shared_across_requests() {
    let recorder = Recorder::default();
    let opts = options_for(&recorder);
    get_with(&opts, "http://x.test/1").unwrap();
    get_with(&opts.clone(), "http://x.test/2").unwrap();
    assert_eq!(recorder.count(), 2);
}

#[test]
fn test_transport_error_is_surfaced_unchanged() {
    let failing = Session::new(|_: &Request| -> Result<RawResponse, TransportError> {
        Err(TransportError::Connection("refused".to_string()))
    });
    let opts = session().set(Options::default(), Some(failing));
    let result = get_with(&opts, "http://x.test/");
    assert_eq!(result.err(), Some(TransportError::Connection("refused".to_string())));
}

#[test]
fn test_error_statuses_are_responses() {
    let not_found = Session::new(|_: &Request| -> Result<RawResponse, TransportError> {
        Ok(RawResponse::new(404, "Not Found"))
    });
    let opts = session().set(Options::default(), Some(not_found));
    let response = get_with(&opts, "http://x.test/missing").unwrap();
    assert_eq!(response.status().code(), 404);
    assert!(!response.status().is_success());
}

/// Accepts one connection, answers `200 OK` and returns the request head.
#[cfg(feature = "ureq")]
fn serve_once(listener: TcpListener) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut head = Vec::new();
        let mut buffer = [0_u8; 1024];
        while !head.windows(4).any(|window| window == b"\r\n\r\n") {
            let read = stream.read(&mut buffer).unwrap();
            if read == 0 {
                break;
            }
            head.extend_from_slice(&buffer[..read]);
        }
        stream
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok")
            .unwrap();
        String::from_utf8_lossy(&head).to_ascii_lowercase()
    })
}

#[cfg(feature = "ureq")]
#[test]
fn test_request_without_session_uses_environment_config() {
    init_tracing();
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/agent", listener.local_addr().unwrap());
    let server = serve_once(listener);

    let response = get(&url).unwrap();
    let head = server.join().unwrap();

    assert_eq!(response.status().code(), 200);
    assert_eq!(response.body().as_slice(), b"ok");
    let expected = TransportConfig::from_env_or_default().user_agent.to_ascii_lowercase();
    assert!(
        head.contains(&format!("user-agent: {expected}\r\n")),
        "request head was {head:?}"
    );
}
