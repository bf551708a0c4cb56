//! Network sink with automatic reconnection
//!
//! Ships composed lines to a remote TCP peer. A dedicated reactor thread
//! runs a single-threaded async runtime driving an explicit connection
//! state machine: `Disconnected -> Connecting -> Connected`, falling back
//! to `Disconnected` with a fixed backoff on any failure, and
//! short-circuiting every transition once shutdown is requested.
//!
//! Lines posted while the peer is unreachable accumulate in an unbounded
//! FIFO queue. A persistently unreachable peer therefore grows memory
//! without bound; callers needing bounded memory must police the queue
//! themselves. A failed write is pushed back to the front of the queue so
//! it is retried before anything newer.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::Notify;
use tokio::time::{sleep_until, Instant};

/// Fixed delay before retrying a failed connection.
pub const RECONNECT_BACKOFF: Duration = Duration::from_secs(2);

enum Command {
    Send(String),
    Shutdown,
}

/// Connection state shared between the reactor and the rest of the engine.
#[derive(Debug)]
pub struct LinkState {
    connected: AtomicBool,
    sending: AtomicBool,
    shutdown: AtomicBool,
    connect_attempts: AtomicU64,
    delivered: AtomicU64,
    shutdown_signal: Notify,
}

impl LinkState {
    fn new() -> Self {
        Self {
            connected: AtomicBool::new(false),
            sending: AtomicBool::new(false),
            shutdown: AtomicBool::new(false),
            connect_attempts: AtomicU64::new(0),
            delivered: AtomicU64::new(0),
            shutdown_signal: Notify::new(),
        }
    }

    #[inline]
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// True while exactly one write is in flight.
    #[inline]
    pub fn is_sending(&self) -> bool {
        self.sending.load(Ordering::Acquire)
    }

    #[inline]
    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }

    #[inline]
    pub fn connect_attempts(&self) -> u64 {
        self.connect_attempts.load(Ordering::Relaxed)
    }

    /// Lines confirmed written to the socket.
    #[inline]
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::Release);
    }

    fn set_sending(&self, sending: bool) {
        self.sending.store(sending, Ordering::Release);
    }

    fn request_shutdown(&self) {
        self.shutdown.store(true, Ordering::Release);
        // notify_one leaves a permit when the reactor is not parked on the
        // signal yet, so a later await still observes the request.
        self.shutdown_signal.notify_one();
    }

    fn record_connect_attempt(&self) {
        self.connect_attempts.fetch_add(1, Ordering::Relaxed);
    }

    fn record_delivered(&self) {
        self.delivered.fetch_add(1, Ordering::Relaxed);
    }
}

/// Handle owned by the logger; the reactor thread lives behind it.
pub struct NetworkSink {
    host: String,
    port: u16,
    tx: UnboundedSender<Command>,
    link: Arc<LinkState>,
    reactor: Option<thread::JoinHandle<()>>,
}

impl NetworkSink {
    /// Register the target and start connecting in the background.
    pub fn connect(host: String, port: u16) -> Self {
        let link = Arc::new(LinkState::new());
        let (tx, rx) = mpsc::unbounded_channel();

        let reactor_link = Arc::clone(&link);
        let reactor_host = host.clone();
        let reactor = thread::spawn(move || {
            match tokio::runtime::Builder::new_current_thread()
                .enable_io()
                .enable_time()
                .build()
            {
                Ok(runtime) => {
                    runtime.block_on(Reactor::new(reactor_host, port, rx, reactor_link).run());
                }
                Err(e) => {
                    eprintln!("[FANLOG ERROR] Failed to start network reactor: {}", e);
                }
            }
        });

        Self {
            host,
            port,
            tx,
            link,
            reactor: Some(reactor),
        }
    }

    /// Hand a composed line to the reactor. Fire and forget: never blocks,
    /// and a post after shutdown is silently dropped.
    pub fn post(&self, line: String) {
        let _ = self.tx.send(Command::Send(line));
    }

    /// Stop the reactor: cancel any pending reconnect or in-flight write,
    /// discard undelivered lines, close the socket, join the thread.
    /// Idempotent.
    pub fn shutdown(&mut self) {
        self.link.request_shutdown();
        let _ = self.tx.send(Command::Shutdown);
        if let Some(handle) = self.reactor.take() {
            let _ = handle.join();
        }
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    #[must_use]
    pub fn link(&self) -> &LinkState {
        &self.link
    }
}

impl Drop for NetworkSink {
    fn drop(&mut self) {
        self.shutdown();
    }
}

enum Phase {
    Disconnected { retry_at: Instant },
    Connecting,
    Connected(TcpStream),
    ShuttingDown,
}

struct Reactor {
    host: String,
    port: u16,
    rx: UnboundedReceiver<Command>,
    queue: VecDeque<String>,
    link: Arc<LinkState>,
}

impl Reactor {
    fn new(host: String, port: u16, rx: UnboundedReceiver<Command>, link: Arc<LinkState>) -> Self {
        Self {
            host,
            port,
            rx,
            queue: VecDeque::new(),
            link,
        }
    }

    async fn run(mut self) {
        let mut phase = Phase::Connecting;
        loop {
            if self.link.is_shutdown() {
                phase = Phase::ShuttingDown;
            }
            phase = match phase {
                Phase::Disconnected { retry_at } => self.await_retry(retry_at).await,
                Phase::Connecting => self.attempt_connect().await,
                Phase::Connected(stream) => self.drive(stream).await,
                Phase::ShuttingDown => break,
            };
        }

        // Undelivered lines are discarded on shutdown; the socket, if any,
        // was dropped with its phase.
        self.queue.clear();
        self.link.set_connected(false);
        self.link.set_sending(false);
    }

    /// Absorb a command received from the engine side. Returns true when
    /// the command (or a closed channel) requests shutdown.
    fn absorb(&mut self, command: Option<Command>) -> bool {
        match command {
            Some(Command::Send(line)) => {
                self.queue.push_back(line);
                false
            }
            Some(Command::Shutdown) | None => true,
        }
    }

    /// Disconnected: keep accepting lines while the backoff timer runs.
    async fn await_retry(&mut self, retry_at: Instant) -> Phase {
        loop {
            tokio::select! {
                _ = sleep_until(retry_at) => return Phase::Connecting,
                _ = self.link.shutdown_signal.notified() => return Phase::ShuttingDown,
                command = self.rx.recv() => {
                    if self.absorb(command) {
                        return Phase::ShuttingDown;
                    }
                }
            }
        }
    }

    async fn attempt_connect(&mut self) -> Phase {
        if self.link.is_shutdown() {
            return Phase::ShuttingDown;
        }
        self.link.record_connect_attempt();

        // The future owns its copy of the target so the command handlers
        // below can borrow the reactor mutably while it is pending.
        let attempt = TcpStream::connect((self.host.clone(), self.port));
        tokio::pin!(attempt);

        loop {
            tokio::select! {
                result = &mut attempt => {
                    return match result {
                        Ok(stream) => {
                            // Low-latency delivery; failure to set the
                            // option is not worth losing the connection.
                            let _ = stream.set_nodelay(true);
                            self.link.set_connected(true);
                            Phase::Connected(stream)
                        }
                        Err(_) => self.lose_connection(),
                    };
                }
                _ = self.link.shutdown_signal.notified() => return Phase::ShuttingDown,
                command = self.rx.recv() => {
                    if self.absorb(command) {
                        return Phase::ShuttingDown;
                    }
                }
            }
        }
    }

    /// Connected: drain the queue one write at a time; while idle, watch
    /// the read half purely for disconnect detection.
    async fn drive(&mut self, stream: TcpStream) -> Phase {
        let (mut reader, mut writer) = stream.into_split();
        let mut probe = [0u8; 64];

        loop {
            if self.link.is_shutdown() {
                return Phase::ShuttingDown;
            }

            if let Some(line) = self.queue.pop_front() {
                self.link.set_sending(true);
                let result = tokio::select! {
                    result = writer.write_all(line.as_bytes()) => Some(result),
                    _ = self.link.shutdown_signal.notified() => None,
                };
                self.link.set_sending(false);

                match result {
                    // Cancelled mid-write; the line is abandoned along
                    // with the rest of the queue.
                    None => return Phase::ShuttingDown,
                    Some(Ok(())) => self.link.record_delivered(),
                    Some(Err(_)) => {
                        // Retry the failed line before anything newer.
                        self.queue.push_front(line);
                        return self.lose_connection();
                    }
                }
                continue;
            }

            tokio::select! {
                command = self.rx.recv() => {
                    if self.absorb(command) {
                        return Phase::ShuttingDown;
                    }
                }
                read = reader.read(&mut probe) => match read {
                    // EOF or error from the passive read means the peer
                    // went away; payload, if any, is ignored.
                    Ok(0) | Err(_) => return self.lose_connection(),
                    Ok(_) => {}
                },
                _ = self.link.shutdown_signal.notified() => return Phase::ShuttingDown,
            }
        }
    }

    fn lose_connection(&mut self) -> Phase {
        self.link.set_connected(false);
        Phase::Disconnected {
            retry_at: Instant::now() + RECONNECT_BACKOFF,
        }
    }
}
