// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! QUIC server helpers for the brew and menu services.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use quinn::{Endpoint, Incoming, RecvStream, SendStream, ServerConfig, TransportConfig};
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

use crate::frame::{Frame, FrameError, read_frame, write_frame};

/// Errors that can occur in the QUIC server
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("bind error: {0}")]
    Bind(#[from] std::io::Error),

    #[error("connection error: {0}")]
    Connection(#[from] quinn::ConnectionError),

    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    #[error("TLS error: {0}")]
    Tls(String),

    #[error("invalid transport setting: {0}")]
    Transport(String),

    #[error("invalid {var}: {message}")]
    Config { var: &'static str, message: String },

    #[error("server closed")]
    Closed,
}

/// Configuration for the QUIC server
#[derive(Debug, Clone)]
pub struct CoffeeServerConfig {
    /// Address to bind to
    pub bind_addr: SocketAddr,
    /// TLS certificate chain (PEM format)
    pub cert_pem: Vec<u8>,
    /// TLS private key (PEM format)
    pub key_pem: Vec<u8>,
    /// Maximum concurrent bidirectional streams per connection
    pub max_bi_streams: u32,
    /// Idle timeout in milliseconds
    pub idle_timeout_ms: u64,
    /// UDP receive/send buffer size in bytes (0 for OS default)
    pub udp_buffer_size: usize,
    /// Maximum concurrent connection handlers (0 for unlimited)
    pub max_concurrent_handlers: u32,
}

impl Default for CoffeeServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 50051)),
            cert_pem: Vec::new(),
            key_pem: Vec::new(),
            max_bi_streams: 256,
            idle_timeout_ms: 60_000,
            udp_buffer_size: 1024 * 1024,
            max_concurrent_handlers: 0,
        }
    }
}

impl CoffeeServerConfig {
    /// Transport tuning from the environment, falling back to defaults for
    /// unset variables. A set but unparsable value is an error naming it.
    ///
    /// - `COFFEE_QUIC_MAX_BI_STREAMS` (default: 256)
    /// - `COFFEE_QUIC_IDLE_TIMEOUT_MS` (default: 60000, at most 2^62 - 1)
    /// - `COFFEE_QUIC_UDP_BUFFER` (default: 1048576)
    /// - `COFFEE_QUIC_MAX_HANDLERS`, 0 for unlimited (default: 0)
    pub fn from_env() -> Result<Self, ServerError> {
        fn var<T>(name: &'static str, default: T) -> Result<T, ServerError>
        where
            T: std::str::FromStr,
            T::Err: std::fmt::Display,
        {
            match std::env::var(name) {
                Ok(value) => value.trim().parse().map_err(|e| ServerError::Config {
                    var: name,
                    message: format!("'{}': {}", value, e),
                }),
                Err(_) => Ok(default),
            }
        }

        let default = Self::default();
        let idle_timeout_ms = var("COFFEE_QUIC_IDLE_TIMEOUT_MS", default.idle_timeout_ms)?;
        quinn::IdleTimeout::try_from(Duration::from_millis(idle_timeout_ms)).map_err(|e| {
            ServerError::Config {
                var: "COFFEE_QUIC_IDLE_TIMEOUT_MS",
                message: format!("'{}': {}", idle_timeout_ms, e),
            }
        })?;

        Ok(Self {
            max_bi_streams: var("COFFEE_QUIC_MAX_BI_STREAMS", default.max_bi_streams)?,
            idle_timeout_ms,
            udp_buffer_size: var("COFFEE_QUIC_UDP_BUFFER", default.udp_buffer_size)?,
            max_concurrent_handlers: var(
                "COFFEE_QUIC_MAX_HANDLERS",
                default.max_concurrent_handlers,
            )?,
            ..default
        })
    }
}

/// QUIC endpoint serving one of the coffee protocols.
pub struct CoffeeServer {
    endpoint: Endpoint,
    config: CoffeeServerConfig,
}

impl CoffeeServer {
    pub fn new(config: CoffeeServerConfig) -> Result<Self, ServerError> {
        use socket2::{Domain, Protocol, Socket, Type};

        let server_config = Self::build_server_config(&config)?;

        let domain = if config.bind_addr.is_ipv6() {
            Domain::IPV6
        } else {
            Domain::IPV4
        };
        let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;

        if config.udp_buffer_size > 0 {
            if let Err(e) = socket.set_recv_buffer_size(config.udp_buffer_size) {
                warn!(size = config.udp_buffer_size, error = %e, "Failed to set UDP receive buffer size");
            }
            if let Err(e) = socket.set_send_buffer_size(config.udp_buffer_size) {
                warn!(size = config.udp_buffer_size, error = %e, "Failed to set UDP send buffer size");
            }
        }

        socket.bind(&config.bind_addr.into())?;
        let std_socket: std::net::UdpSocket = socket.into();

        let runtime = quinn::default_runtime()
            .ok_or_else(|| ServerError::Bind(std::io::Error::other("no async runtime found")))?;
        let endpoint = Endpoint::new_with_abstract_socket(
            quinn::EndpointConfig::default(),
            Some(server_config),
            runtime.wrap_udp_socket(std_socket)?,
            runtime,
        )?;

        info!(
            addr = %config.bind_addr,
            max_bi_streams = config.max_bi_streams,
            idle_timeout_ms = config.idle_timeout_ms,
            max_handlers = config.max_concurrent_handlers,
            "QUIC server bound"
        );

        Ok(Self { endpoint, config })
    }

    /// Server with a freshly generated self-signed certificate for `localhost`
    /// and transport settings from [`CoffeeServerConfig::from_env`].
    pub fn localhost(bind_addr: SocketAddr) -> Result<Self, ServerError> {
        Self::localhost_with_config(bind_addr, CoffeeServerConfig::from_env()?)
    }

    pub fn localhost_with_config(
        bind_addr: SocketAddr,
        mut config: CoffeeServerConfig,
    ) -> Result<Self, ServerError> {
        let cert = rcgen::generate_simple_self_signed(vec!["localhost".to_string()])
            .map_err(|e| ServerError::Tls(e.to_string()))?;

        config.bind_addr = bind_addr;
        config.cert_pem = cert.cert.pem().into_bytes();
        config.key_pem = cert.key_pair.serialize_pem().into_bytes();

        Self::new(config)
    }

    pub fn config(&self) -> &CoffeeServerConfig {
        &self.config
    }

    fn build_server_config(config: &CoffeeServerConfig) -> Result<ServerConfig, ServerError> {
        let certs = rustls_pemfile::certs(&mut config.cert_pem.as_slice())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ServerError::Tls(format!("failed to parse certificates: {}", e)))?;

        let key = rustls_pemfile::private_key(&mut config.key_pem.as_slice())
            .map_err(|e| ServerError::Tls(format!("failed to parse private key: {}", e)))?
            .ok_or_else(|| ServerError::Tls("no private key found".to_string()))?;

        let crypto = rustls::ServerConfig::builder()
            .with_no_client_auth()
            .with_single_cert(certs, key)
            .map_err(|e| ServerError::Tls(e.to_string()))?;

        let idle_timeout = quinn::IdleTimeout::try_from(Duration::from_millis(
            config.idle_timeout_ms,
        ))
        .map_err(|e| ServerError::Transport(format!("idle timeout: {}", e)))?;

        let mut transport = TransportConfig::default();
        transport.max_idle_timeout(Some(idle_timeout));
        transport.max_concurrent_bidi_streams(config.max_bi_streams.into());
        transport.max_concurrent_uni_streams(0u32.into());

        let mut server_config = ServerConfig::with_crypto(Arc::new(
            quinn::crypto::rustls::QuicServerConfig::try_from(crypto)
                .map_err(|e| ServerError::Tls(e.to_string()))?,
        ));
        server_config.transport_config(Arc::new(transport));

        Ok(server_config)
    }

    pub async fn accept(&self) -> Option<Incoming> {
        self.endpoint.accept().await
    }

    /// Address actually bound (useful when binding port 0).
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.endpoint.local_addr()?)
    }

    pub fn close(&self) {
        self.endpoint.close(0u32.into(), b"server closing");
    }

    /// Accept connections until the endpoint is closed, handing each to `handler`.
    #[instrument(skip(self, handler), fields(addr = %self.config.bind_addr))]
    pub async fn run<H, Fut>(&self, handler: H) -> Result<(), ServerError>
    where
        H: Fn(ConnectionHandler) -> Fut + Send + Sync + Clone + 'static,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        use tokio::sync::Semaphore;

        info!("QUIC server running");

        let semaphore = (self.config.max_concurrent_handlers > 0).then(|| {
            Arc::new(Semaphore::new(self.config.max_concurrent_handlers as usize))
        });

        while let Some(incoming) = self.accept().await {
            let handler = handler.clone();
            let semaphore = semaphore.clone();

            tokio::spawn(async move {
                let _permit = match semaphore {
                    Some(sem) => match sem.acquire_owned().await {
                        Ok(permit) => Some(permit),
                        Err(_) => {
                            warn!("semaphore closed, dropping connection");
                            return;
                        }
                    },
                    None => None,
                };

                match incoming.await {
                    Ok(connection) => {
                        debug!(remote_addr = %connection.remote_address(), "accepted connection");
                        handler(ConnectionHandler::new(connection)).await;
                    }
                    Err(e) => {
                        warn!("failed to accept connection: {}", e);
                    }
                }
            });
        }

        Ok(())
    }
}

/// Handler for an individual QUIC connection
pub struct ConnectionHandler {
    connection: quinn::Connection,
}

impl ConnectionHandler {
    pub fn new(connection: quinn::Connection) -> Self {
        Self { connection }
    }

    pub fn remote_address(&self) -> SocketAddr {
        self.connection.remote_address()
    }

    pub async fn accept_bi(&self) -> Result<(SendStream, RecvStream), ServerError> {
        Ok(self.connection.accept_bi().await?)
    }

    /// Spawn `handler` for every bidirectional stream until the peer goes away.
    #[instrument(skip(self, handler), fields(remote = %self.remote_address()))]
    pub async fn run<H, Fut>(&self, handler: H)
    where
        H: Fn(StreamHandler) -> Fut + Send + Sync + Clone + 'static,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        loop {
            match self.accept_bi().await {
                Ok((send, recv)) => {
                    let handler = handler.clone();
                    tokio::spawn(async move {
                        handler(StreamHandler::new(send, recv)).await;
                    });
                }
                Err(ServerError::Connection(
                    quinn::ConnectionError::ApplicationClosed(_)
                    | quinn::ConnectionError::LocallyClosed
                    | quinn::ConnectionError::TimedOut,
                )) => {
                    debug!("connection closed");
                    break;
                }
                Err(e) => {
                    error!("error accepting stream: {}", e);
                    break;
                }
            }
        }
    }

    pub fn close(&self, code: u32, reason: &[u8]) {
        self.connection.close(code.into(), reason);
    }
}

/// One request/response exchange on a bidirectional stream.
pub struct StreamHandler {
    send: SendStream,
    recv: RecvStream,
}

impl StreamHandler {
    pub fn new(send: SendStream, recv: RecvStream) -> Self {
        Self { send, recv }
    }

    pub async fn read_frame(&mut self) -> Result<Frame, ServerError> {
        Ok(read_frame(&mut self.recv).await?)
    }

    pub async fn write_frame(&mut self, frame: &Frame) -> Result<(), ServerError> {
        Ok(write_frame(&mut self.send, frame).await?)
    }

    /// Read one request, run `handler`, write its response.
    ///
    /// A handler error becomes an empty `Error` frame; application errors
    /// belong inside `Resp`.
    pub async fn handle_request<Req, Resp, H, Fut>(&mut self, handler: H) -> Result<(), ServerError>
    where
        Req: prost::Message + Default,
        Resp: prost::Message,
        H: FnOnce(Req) -> Fut,
        Fut: std::future::Future<Output = Result<Resp, ServerError>>,
    {
        let request: Req = self.read_frame().await?.decode()?;

        match handler(request).await {
            Ok(response) => {
                self.write_frame(&Frame::response(&response)?).await?;
            }
            Err(e) => {
                error!("request handler error: {}", e);
                self.write_frame(&Frame::transport_error()).await?;
            }
        }

        Ok(())
    }

    /// Signal that no more data will be written.
    pub fn finish(&mut self) -> Result<(), ServerError> {
        self.send
            .finish()
            .map_err(|e| ServerError::Frame(FrameError::Io(std::io::Error::other(e))))
    }
}
