use std::future::Future;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use clap::Parser;

use crate::args::VerifyArgs;

use super::executor::{RequestUnit, execute_unit};
use super::{build_client, resolve_target_url};

struct ServerHandle {
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

fn spawn_http_server(response: &'static [u8]) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            match listener.accept() {
                Ok((stream, _)) => {
                    thread::spawn(move || handle_client(stream, response));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(10));
                }
                Err(_) => break,
            }
        }
    });

    Ok((
        format!("http://{}", addr),
        ServerHandle {
            shutdown: shutdown_tx,
            thread: Some(handle),
        },
    ))
}

fn handle_client(mut stream: TcpStream, response: &'static [u8]) {
    let mut buffer = [0u8; 1024];
    if stream.read(&mut buffer).is_err() {
        return;
    }
    if stream.write_all(response).is_err() {
        return;
    }
    if stream.flush().is_err() {
        return;
    }
    drop(stream.shutdown(Shutdown::Both));
}

const OK_JSON_RESPONSE: &[u8] = b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 15\r\nConnection: close\r\n\r\n{\"status\":\"ok\"}";
const SERVER_ERROR_RESPONSE: &[u8] =
    b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 2\r\nConnection: close\r\n\r\n{}";
const PLAIN_TEXT_RESPONSE: &[u8] =
    b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 5\r\nConnection: close\r\n\r\nhello";

fn test_args(url: &str) -> Result<VerifyArgs, String> {
    VerifyArgs::try_parse_from(["loadcheck", "-u", url, "--connect-timeout", "1s"])
        .map_err(|err| format!("clap parse failed: {}", err))
}

fn probe_unit(id: u64) -> RequestUnit {
    RequestUnit {
        id,
        body: Arc::new(r#"{"test":"data","number":123}"#.to_owned()),
    }
}

fn run_async_test<F>(future: F) -> Result<(), String>
where
    F: Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(future)
}

#[test]
fn resolve_target_url_requires_a_parseable_host() -> Result<(), String> {
    let args = test_args("http://localhost:8888/")?;
    let url = resolve_target_url(&args).map_err(|err| format!("resolve failed: {}", err))?;
    if !url.starts_with("http://localhost:8888/") {
        return Err(format!("Unexpected normalized URL: {}", url));
    }

    let mut missing = args.clone();
    missing.url = None;
    if resolve_target_url(&missing).is_ok() {
        return Err("Expected a missing URL to be rejected.".to_owned());
    }

    let mut garbage = args;
    garbage.url = Some("not a url".to_owned());
    if resolve_target_url(&garbage).is_ok() {
        return Err("Expected an invalid URL to be rejected.".to_owned());
    }
    Ok(())
}

#[test]
fn expected_status_classifies_success() -> Result<(), String> {
    run_async_test(async {
        let (url, _server) = spawn_http_server(OK_JSON_RESPONSE)?;
        let args = test_args(&url)?;
        let client = build_client(&args).map_err(|err| format!("client failed: {}", err))?;

        let sample = execute_unit(&client, &url, &probe_unit(1), 200, false).await;
        if !sample.success || sample.status_code != Some(200) {
            return Err(format!(
                "Expected success with 200, got success={} status={:?}",
                sample.success, sample.status_code
            ));
        }
        if sample.elapsed_ms() <= 0.0 {
            return Err("Expected a positive elapsed time.".to_owned());
        }
        Ok(())
    })
}

#[test]
fn server_error_is_failure_with_status() -> Result<(), String> {
    run_async_test(async {
        let (url, _server) = spawn_http_server(SERVER_ERROR_RESPONSE)?;
        let args = test_args(&url)?;
        let client = build_client(&args).map_err(|err| format!("client failed: {}", err))?;

        let sample = execute_unit(&client, &url, &probe_unit(2), 200, false).await;
        if sample.success || sample.status_code != Some(500) {
            return Err(format!(
                "Expected failed sample with 500, got success={} status={:?}",
                sample.success, sample.status_code
            ));
        }
        Ok(())
    })
}

#[test]
fn connection_refused_is_a_transport_failure() -> Result<(), String> {
    run_async_test(async {
        let unused_port = {
            let listener = TcpListener::bind("127.0.0.1:0")
                .map_err(|err| format!("bind failed: {}", err))?;
            listener
                .local_addr()
                .map_err(|err| format!("addr failed: {}", err))?
                .port()
        };
        let url = format!("http://127.0.0.1:{}/", unused_port);
        let args = test_args(&url)?;
        let client = build_client(&args).map_err(|err| format!("client failed: {}", err))?;

        let sample = execute_unit(&client, &url, &probe_unit(3), 200, false).await;
        if sample.success || sample.status_code.is_some() {
            return Err(format!(
                "Expected transport failure, got success={} status={:?}",
                sample.success, sample.status_code
            ));
        }
        Ok(())
    })
}

#[test]
fn expect_json_rejects_non_json_bodies() -> Result<(), String> {
    run_async_test(async {
        let (url, _server) = spawn_http_server(PLAIN_TEXT_RESPONSE)?;
        let args = test_args(&url)?;
        let client = build_client(&args).map_err(|err| format!("client failed: {}", err))?;

        let relaxed = execute_unit(&client, &url, &probe_unit(4), 200, false).await;
        if !relaxed.success {
            return Err("Expected a plain 200 to pass without --expect-json.".to_owned());
        }

        let strict = execute_unit(&client, &url, &probe_unit(5), 200, true).await;
        if strict.success || strict.status_code != Some(200) {
            return Err(format!(
                "Expected JSON validation to fail the sample, got success={} status={:?}",
                strict.success, strict.status_code
            ));
        }
        Ok(())
    })
}
