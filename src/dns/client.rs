//! The single-query CAA client.

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use hickory_resolver::proto::error::ProtoError;
use hickory_resolver::proto::op::ResponseCode;
use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, UdpSocket};

use super::lookup::{CaaLookup, CaaRecord};
use super::records::{build_query, decode_response, rcode_name, CaaResponse, EDNS_PAYLOAD};
use crate::error_handling::QueryError;

/// Failures below the DNS layer of one exchange.
#[derive(Error, Debug)]
enum ExchangeError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("malformed DNS message: {0}")]
    Proto(#[from] ProtoError),

    #[error("response id {got} does not match query id {expected}")]
    IdMismatch { expected: u16, got: u16 },

    #[error("query of {0} octets does not fit a TCP frame")]
    Oversized(usize),
}

/// Sends CAA queries to one recursive resolver.
///
/// Every query goes out over UDP with a fresh id; a truncated answer is
/// fetched again over TCP. There is no cache and no retry, and each call is
/// bounded by the client's timeout.
#[derive(Debug, Clone)]
pub struct CaaClient {
    server: SocketAddr,
    timeout: Duration,
}

impl CaaClient {
    pub fn new(server: SocketAddr, timeout: Duration) -> Self {
        Self { server, timeout }
    }

    pub fn server(&self) -> SocketAddr {
        self.server
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Queries CAA records for a single domain.
    ///
    /// # Arguments
    ///
    /// * `domain` - The domain to query, without a trailing dot
    ///
    /// # Returns
    ///
    /// The CAA records of the answer section in the order they were received.
    /// A NOERROR response without CAA records yields an empty vector.
    ///
    /// # Errors
    ///
    /// Returns a `QueryError` if the query times out, the transport fails, the
    /// response cannot be framed, or the resolver answers with a non-success
    /// response code (NXDOMAIN, SERVFAIL, ...).
    pub async fn query(&self, domain: &str) -> Result<Vec<CaaRecord>, QueryError> {
        let response = match tokio::time::timeout(self.timeout, self.exchange(domain)).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                log::warn!("Failed to lookup CAA records for {domain}: {e}");
                return Err(QueryError::Transport {
                    domain: domain.to_string(),
                    cause: e.to_string(),
                });
            }
            Err(_) => {
                log::warn!("CAA lookup timed out for {domain}");
                return Err(QueryError::Timeout {
                    domain: domain.to_string(),
                    timeout_ms: self.timeout.as_millis() as u64,
                });
            }
        };

        if response.response_code != ResponseCode::NoError {
            log::warn!(
                "CAA lookup for {domain} answered {:?}",
                response.response_code
            );
            return Err(QueryError::Status {
                domain: domain.to_string(),
                rcode: rcode_name(response.response_code),
            });
        }

        Ok(response.records)
    }

    async fn exchange(&self, domain: &str) -> Result<CaaResponse, ExchangeError> {
        let id = rand::random::<u16>();
        let request = build_query(id, domain)?;

        let response = self.exchange_udp(id, &request).await?;
        if !response.truncated {
            return Ok(response);
        }

        log::debug!("CAA answer for {domain} truncated, retrying over TCP");
        self.exchange_tcp(id, &request).await
    }

    async fn exchange_udp(&self, id: u16, request: &[u8]) -> Result<CaaResponse, ExchangeError> {
        let local: SocketAddr = if self.server.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let socket = UdpSocket::bind(local).await?;
        socket.connect(self.server).await?;
        socket.send(request).await?;

        let mut buf = vec![0u8; usize::from(EDNS_PAYLOAD).max(4096)];
        loop {
            let len = socket.recv(&mut buf).await?;
            let response = decode_response(&buf[..len])?;
            if response.id == id {
                return Ok(response);
            }
            // Late answer to an earlier query on a reused port
            log::debug!(
                "Ignoring DNS response with id {} while waiting for {id}",
                response.id
            );
        }
    }

    async fn exchange_tcp(&self, id: u16, request: &[u8]) -> Result<CaaResponse, ExchangeError> {
        let frame_len =
            u16::try_from(request.len()).map_err(|_| ExchangeError::Oversized(request.len()))?;

        let mut stream = TcpStream::connect(self.server).await?;
        stream.write_all(&frame_len.to_be_bytes()).await?;
        stream.write_all(request).await?;

        let mut len_buf = [0u8; 2];
        stream.read_exact(&mut len_buf).await?;
        let mut buf = vec![0u8; usize::from(u16::from_be_bytes(len_buf))];
        stream.read_exact(&mut buf).await?;

        let response = decode_response(&buf)?;
        if response.id != id {
            return Err(ExchangeError::IdMismatch {
                expected: id,
                got: response.id,
            });
        }
        Ok(response)
    }
}

impl CaaLookup for CaaClient {
    fn query_caa<'a>(&'a self, domain: &'a str) -> BoxFuture<'a, Result<Vec<CaaRecord>, QueryError>> {
        self.query(domain).boxed()
    }
}
