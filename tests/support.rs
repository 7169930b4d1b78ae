use std::ffi::OsStr;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::process::{Command, Output};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// How the fixture server answers each request.
#[derive(Debug, Clone, Copy)]
pub enum ServerBehavior {
    /// 200 with a small JSON body.
    OkJson,
    /// 500 on every request.
    ServerError,
    /// 500 on every Nth request (1-based arrival order), 200 JSON otherwise.
    FailEveryNth(u64),
    /// 200 with a body that is not JSON.
    PlainText,
}

pub struct ServerHandle {
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

/// Spawn a lightweight HTTP server for tests.
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub fn spawn_http_server(behavior: ServerBehavior) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel();
    let counter = Arc::new(AtomicU64::new(0));

    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            match listener.accept() {
                Ok((stream, _)) => {
                    let seq = counter.fetch_add(1, Ordering::SeqCst).saturating_add(1);
                    thread::spawn(move || handle_client(stream, behavior, seq));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(2));
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

/// Bind an ephemeral port and release it so connections get refused.
///
/// # Errors
///
/// Returns an error if no port can be reserved.
pub fn reserve_unused_port() -> Result<u16, String> {
    let listener =
        TcpListener::bind("127.0.0.1:0").map_err(|err| format!("bind failed: {}", err))?;
    let port = listener
        .local_addr()
        .map_err(|err| format!("addr failed: {}", err))?
        .port();
    Ok(port)
}

const OK_JSON_RESPONSE: &[u8] = b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 15\r\nConnection: close\r\n\r\n{\"status\":\"ok\"}";
const SERVER_ERROR_RESPONSE: &[u8] =
    b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 2\r\nConnection: close\r\n\r\n{}";
const PLAIN_TEXT_RESPONSE: &[u8] =
    b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 5\r\nConnection: close\r\n\r\nhello";

fn handle_client(mut stream: TcpStream, behavior: ServerBehavior, seq: u64) {
    if read_request(&mut stream).is_err() {
        return;
    }
    let response = match behavior {
        ServerBehavior::OkJson => OK_JSON_RESPONSE,
        ServerBehavior::ServerError => SERVER_ERROR_RESPONSE,
        ServerBehavior::FailEveryNth(n) => {
            if n > 0 && seq % n == 0 {
                SERVER_ERROR_RESPONSE
            } else {
                OK_JSON_RESPONSE
            }
        }
        ServerBehavior::PlainText => PLAIN_TEXT_RESPONSE,
    };
    if stream.write_all(response).is_err() {
        return;
    }
    if stream.flush().is_err() {
        return;
    }
    drop(stream.shutdown(Shutdown::Both));
}

/// Reads the request head plus the Content-Length body so large payloads are
/// fully consumed before the response is written.
fn read_request(stream: &mut TcpStream) -> Result<(), ()> {
    let mut buffer: Vec<u8> = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let read = stream.read(&mut chunk).map_err(|_ignored| ())?;
        if read == 0 {
            return Err(());
        }
        buffer.extend_from_slice(chunk.get(..read).unwrap_or_default());
        if let Some(pos) = find_subsequence(&buffer, b"\r\n\r\n") {
            break pos.saturating_add(4);
        }
        if buffer.len() > 65_536 {
            return Err(());
        }
    };

    let content_length = parse_content_length(buffer.get(..header_end).unwrap_or_default());
    let expected_total = header_end.saturating_add(content_length);
    while buffer.len() < expected_total {
        let read = stream.read(&mut chunk).map_err(|_ignored| ())?;
        if read == 0 {
            return Err(());
        }
        buffer.extend_from_slice(chunk.get(..read).unwrap_or_default());
    }
    Ok(())
}

fn parse_content_length(head: &[u8]) -> usize {
    let head = String::from_utf8_lossy(head);
    for line in head.lines() {
        if let Some((name, value)) = line.split_once(':')
            && name.trim().eq_ignore_ascii_case("content-length")
        {
            return value.trim().parse().unwrap_or(0);
        }
    }
    0
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Run the `loadcheck` binary and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_loadcheck<I, S>(args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = loadcheck_bin()?;
    Command::new(bin)
        .args(args)
        .env("RUST_LOG", "error")
        .output()
        .map_err(|err| format!("run loadcheck failed: {}", err))
}

fn loadcheck_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_loadcheck").map_or_else(
        || Err("CARGO_BIN_EXE_loadcheck missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}
