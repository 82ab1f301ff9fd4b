use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::{Record, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio::sync::oneshot;

/// How the server answers an AXFR request.
#[derive(Clone)]
pub enum AxfrReply {
    /// One message with this rcode and no records.
    Rcode(ResponseCode),
    /// One message per inner vector, then the connection stays open.
    Messages(Vec<Vec<Record>>),
    /// These messages, then the connection is closed.
    MessagesThenClose(Vec<Vec<Record>>),
}

/// What the mock server knows.
#[derive(Clone)]
pub struct MockZone {
    pub answers: HashMap<RecordType, Vec<Record>>,
    /// Set TC and drop the answers on UDP responses.
    pub truncate_udp: bool,
    /// Answer UDP queries with a different message ID.
    pub wrong_udp_id: bool,
    pub axfr: AxfrReply,
}

impl MockZone {
    pub fn new() -> Self {
        Self {
            answers: HashMap::new(),
            truncate_udp: false,
            wrong_udp_id: false,
            axfr: AxfrReply::Rcode(ResponseCode::Refused),
        }
    }

    pub fn with_answers(mut self, record_type: RecordType, records: Vec<Record>) -> Self {
        self.answers.insert(record_type, records);
        self
    }

    pub fn truncating_udp(mut self) -> Self {
        self.truncate_udp = true;
        self
    }

    pub fn with_wrong_udp_id(mut self) -> Self {
        self.wrong_udp_id = true;
        self
    }

    pub fn with_axfr(mut self, reply: AxfrReply) -> Self {
        self.axfr = reply;
        self
    }
}

/// Local DNS server answering over UDP and TCP on the same port.
pub struct MockDnsServer {
    addr: SocketAddr,
    udp_queries: Arc<AtomicUsize>,
    tcp_queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(zone: MockZone) -> Result<Self, std::io::Error> {
        let (socket, listener) = Self::bind_pair().await?;
        let addr = socket.local_addr()?;

        let udp_queries = Arc::new(AtomicUsize::new(0));
        let tcp_queries = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let zone = Arc::new(zone);
        let udp_counter = udp_queries.clone();
        let tcp_counter = tcp_queries.clone();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            udp_counter.fetch_add(1, Ordering::SeqCst);
                            if let Some(response) = Self::udp_response(&zone, &buf[..len]) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                    accepted = listener.accept() => {
                        if let Ok((stream, _)) = accepted {
                            let zone = zone.clone();
                            let counter = tcp_counter.clone();
                            tokio::spawn(async move {
                                let _ = Self::serve_tcp(stream, zone, counter).await;
                            });
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            udp_queries,
            tcp_queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn udp_queries(&self) -> usize {
        self.udp_queries.load(Ordering::SeqCst)
    }

    pub fn tcp_queries(&self) -> usize {
        self.tcp_queries.load(Ordering::SeqCst)
    }

    async fn bind_pair() -> Result<(UdpSocket, TcpListener), std::io::Error> {
        let mut last_error = None;
        for _ in 0..10 {
            let socket = UdpSocket::bind("127.0.0.1:0").await?;
            let addr = socket.local_addr()?;
            match TcpListener::bind(addr).await {
                Ok(listener) => return Ok((socket, listener)),
                Err(e) => last_error = Some(e),
            }
        }
        Err(last_error.unwrap_or_else(|| std::io::Error::other("no free port")))
    }

    fn udp_response(zone: &MockZone, query: &[u8]) -> Option<Vec<u8>> {
        let request = Message::from_vec(query).ok()?;
        let id = if zone.wrong_udp_id {
            request.id().wrapping_add(1)
        } else {
            request.id()
        };

        let response = if zone.truncate_udp {
            let mut truncated = Self::reply_with_id(&request, id);
            truncated.set_truncated(true);
            truncated
        } else {
            Self::answer_with_id(zone, &request, id)
        };

        Some(Self::encode(&response))
    }

    async fn serve_tcp(
        mut stream: TcpStream,
        zone: Arc<MockZone>,
        counter: Arc<AtomicUsize>,
    ) -> std::io::Result<()> {
        loop {
            let mut len_buf = [0u8; 2];
            stream.read_exact(&mut len_buf).await?;
            let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
            stream.read_exact(&mut query).await?;
            counter.fetch_add(1, Ordering::SeqCst);

            let request = match Message::from_vec(&query) {
                Ok(request) => request,
                Err(_) => return Ok(()),
            };

            let is_axfr = request
                .queries()
                .first()
                .is_some_and(|q| q.query_type() == RecordType::AXFR);

            if !is_axfr {
                Self::write_frame(&mut stream, &Self::encode(&Self::answer(&zone, &request))).await?;
                continue;
            }

            match &zone.axfr {
                AxfrReply::Rcode(rcode) => {
                    let mut reply = Self::reply_to(&request);
                    reply.set_response_code(*rcode);
                    Self::write_frame(&mut stream, &Self::encode(&reply)).await?;
                }
                AxfrReply::Messages(batches) => {
                    Self::write_batches(&mut stream, &request, batches).await?;
                }
                AxfrReply::MessagesThenClose(batches) => {
                    Self::write_batches(&mut stream, &request, batches).await?;
                    return stream.shutdown().await;
                }
            }
        }
    }

    async fn write_batches(
        stream: &mut TcpStream,
        request: &Message,
        batches: &[Vec<Record>],
    ) -> std::io::Result<()> {
        for batch in batches {
            let mut reply = Self::reply_to(request);
            for record in batch {
                reply.add_answer(record.clone());
            }
            Self::write_frame(stream, &Self::encode(&reply)).await?;
        }
        Ok(())
    }

    fn reply_to(request: &Message) -> Message {
        Self::reply_with_id(request, request.id())
    }

    fn reply_with_id(request: &Message, id: u16) -> Message {
        let mut reply = Message::new(id, MessageType::Response, OpCode::Query);
        reply.set_recursion_desired(request.recursion_desired());
        reply.set_recursion_available(true);
        for query in request.queries() {
            reply.add_query(query.clone());
        }
        reply
    }

    fn answer(zone: &MockZone, request: &Message) -> Message {
        Self::answer_with_id(zone, request, request.id())
    }

    fn answer_with_id(zone: &MockZone, request: &Message, id: u16) -> Message {
        let mut reply = Self::reply_with_id(request, id);
        if let Some(query) = request.queries().first() {
            if let Some(records) = zone.answers.get(&query.query_type()) {
                for record in records {
                    reply.add_answer(record.clone());
                }
            }
        }
        reply
    }

    fn encode(message: &Message) -> Vec<u8> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);
        message.emit(&mut encoder).unwrap();
        buf
    }

    async fn write_frame(stream: &mut TcpStream, bytes: &[u8]) -> std::io::Result<()> {
        stream.write_all(&(bytes.len() as u16).to_be_bytes()).await?;
        stream.write_all(bytes).await?;
        stream.flush().await
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
