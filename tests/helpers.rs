// Shared test helpers: a scripted in-process DNS server and a scripted lookup.
//
// The server speaks real DNS over UDP and TCP on 127.0.0.1 so the CAA client
// can be exercised end to end without network access.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;
use futures::FutureExt;
use hickory_resolver::proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_resolver::proto::rr::rdata::{CAA, NULL};
use hickory_resolver::proto::rr::{Name, RData, Record, RecordType};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::task::JoinHandle;

use caa_worker::{CaaLookup, CaaRecord, QueryError};

/// How the fake server answers a query for one name.
#[allow(dead_code)]
#[derive(Clone)]
pub enum Reply {
    /// NOERROR with these records in the answer section
    Caa(Vec<RData>),
    /// NOERROR, empty answer section
    Empty,
    /// Empty response with this response code
    Rcode(ResponseCode),
    /// Truncated empty answer over UDP; these records over TCP
    Truncated(Vec<RData>),
    /// No response at all
    Silent,
}

/// A CAA `issue` record for `ca`.
#[allow(dead_code)]
pub fn issue(ca: &str) -> RData {
    RData::CAA(CAA::new_issue(
        false,
        Some(Name::from_ascii(ca).unwrap()),
        Vec::new(),
    ))
}

/// A CAA `issuewild` record for `ca`.
#[allow(dead_code)]
pub fn issuewild(ca: &str) -> RData {
    RData::CAA(CAA::new_issuewild(
        false,
        Some(Name::from_ascii(ca).unwrap()),
        Vec::new(),
    ))
}

/// A CAA record written octet by octet, so the value can be anything.
#[allow(dead_code)]
pub fn raw_caa(flags: u8, tag: &str, value: &str) -> RData {
    let mut rdata = vec![flags, tag.len() as u8];
    rdata.extend_from_slice(tag.as_bytes());
    rdata.extend_from_slice(value.as_bytes());
    RData::Unknown {
        code: RecordType::CAA,
        rdata: NULL::with(rdata),
    }
}

type Replies = Arc<HashMap<String, Reply>>;
type Seen = Arc<Mutex<Vec<String>>>;

pub struct FakeDns {
    pub addr: SocketAddr,
    queries: Seen,
    handles: Vec<JoinHandle<()>>,
}

#[allow(dead_code)]
impl FakeDns {
    /// Starts a server answering from `replies`; unknown names get `Reply::Empty`.
    pub async fn start(replies: HashMap<&str, Reply>) -> Self {
        let replies: Replies = Arc::new(
            replies
                .into_iter()
                .map(|(name, reply)| (name.to_string(), reply))
                .collect(),
        );
        let socket = UdpSocket::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake DNS socket");
        let addr = socket.local_addr().expect("Failed to read local address");
        let listener = TcpListener::bind(addr)
            .await
            .expect("Failed to bind fake DNS listener");
        let queries: Seen = Arc::new(Mutex::new(Vec::new()));

        let udp = {
            let (replies, seen) = (Arc::clone(&replies), Arc::clone(&queries));
            tokio::spawn(async move {
                let mut buf = vec![0u8; 4096];
                loop {
                    let Ok((len, peer)) = socket.recv_from(&mut buf).await else {
                        return;
                    };
                    if let Some(bytes) = respond(&buf[..len], &replies, &seen, false) {
                        let _ = socket.send_to(&bytes, peer).await;
                    }
                }
            })
        };

        let tcp = {
            let (replies, seen) = (Arc::clone(&replies), Arc::clone(&queries));
            tokio::spawn(async move {
                loop {
                    let Ok((mut stream, _)) = listener.accept().await else {
                        return;
                    };
                    let mut len_buf = [0u8; 2];
                    if stream.read_exact(&mut len_buf).await.is_err() {
                        continue;
                    }
                    let mut buf = vec![0u8; usize::from(u16::from_be_bytes(len_buf))];
                    if stream.read_exact(&mut buf).await.is_err() {
                        continue;
                    }
                    if let Some(bytes) = respond(&buf, &replies, &seen, true) {
                        let _ = stream.write_all(&(bytes.len() as u16).to_be_bytes()).await;
                        let _ = stream.write_all(&bytes).await;
                    }
                }
            })
        };

        Self {
            addr,
            queries,
            handles: vec![udp, tcp],
        }
    }

    /// Names queried so far over either transport, in arrival order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl Drop for FakeDns {
    fn drop(&mut self) {
        for handle in &self.handles {
            handle.abort();
        }
    }
}

fn respond(request: &[u8], replies: &Replies, seen: &Seen, over_tcp: bool) -> Option<Vec<u8>> {
    let request = Message::from_vec(request).ok()?;
    let query = request.queries().first().cloned()?;
    let name = query
        .name()
        .to_ascii()
        .trim_end_matches('.')
        .to_ascii_lowercase();
    seen.lock().unwrap().push(name.clone());

    let reply = replies.get(&name).cloned().unwrap_or(Reply::Empty);
    let mut response = Message::new();
    response
        .set_id(request.id())
        .set_message_type(MessageType::Response)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(request.recursion_desired())
        .set_recursion_available(true)
        .add_query(query.clone());

    let answers = match reply {
        Reply::Silent => return None,
        Reply::Empty => Vec::new(),
        Reply::Rcode(code) => {
            response.set_response_code(code);
            Vec::new()
        }
        Reply::Caa(records) => records,
        Reply::Truncated(records) if over_tcp => records,
        Reply::Truncated(_) => {
            response.set_truncated(true);
            Vec::new()
        }
    };
    for rdata in answers {
        response.add_answer(Record::from_rdata(query.name().clone(), 300, rdata));
    }

    Some(response.to_vec().expect("Failed to encode response"))
}

/// A lookup that answers from a fixed table and records every query.
/// Domains without an entry answer successfully with no records.
#[allow(dead_code)]
#[derive(Default)]
pub struct ScriptedLookup {
    pub answers: HashMap<String, Result<Vec<CaaRecord>, QueryError>>,
    pub queries: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl ScriptedLookup {
    pub fn answer(mut self, domain: &str, records: Vec<CaaRecord>) -> Self {
        self.answers.insert(domain.to_string(), Ok(records));
        self
    }

    pub fn fail(mut self, domain: &str, error: QueryError) -> Self {
        self.answers.insert(domain.to_string(), Err(error));
        self
    }

    pub fn queried(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl CaaLookup for ScriptedLookup {
    fn query_caa<'a>(
        &'a self,
        domain: &'a str,
    ) -> BoxFuture<'a, Result<Vec<CaaRecord>, QueryError>> {
        self.queries.lock().unwrap().push(domain.to_string());
        let answer = self
            .answers
            .get(domain)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()));
        async move { answer }.boxed()
    }
}
