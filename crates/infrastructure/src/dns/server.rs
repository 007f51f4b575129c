use super::query_parser::{parse_query, DnsHeader, MalformedReason, OPCODE_QUERY};
use super::wire_response::{build_error_response, build_format_error, build_refused};
use dns_sieve_application::use_cases::{HandleDnsQueryUseCase, QueryOutcome};
use dns_sieve_domain::{DnsQuery, DnsRequest, ResponseCode};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, warn};

/// Drives one inbound datagram from raw bytes to the bytes (if any) that go
/// back to the client.
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self { use_case }
    }

    /// `None` means the datagram is dropped without a reply.
    pub async fn handle_datagram(&self, buf: &[u8], client: SocketAddr) -> Option<Vec<u8>> {
        let message = match parse_query(buf) {
            Ok(message) => message,
            Err(reason @ (MalformedReason::TooShort | MalformedReason::NotAQuery)) => {
                debug!(client = %client, bytes = buf.len(), reason = %reason, "Datagram dropped");
                return None;
            }
            Err(reason) => {
                debug!(client = %client, reason = %reason, "Malformed query, sending FORMERR");
                return DnsHeader::parse(buf).map(|header| build_format_error(&header));
            }
        };

        let header = message.header;
        let question = &message.question;

        if header.opcode() != OPCODE_QUERY {
            debug!(
                client = %client,
                id = header.id,
                opcode = header.opcode(),
                "Unsupported opcode, sending NOTIMP"
            );
            return Some(build_error_response(&message, buf, ResponseCode::NotImp));
        }

        debug!(
            client = %client,
            id = header.id,
            domain = %question.name,
            record_type = %question.qtype,
            class = %question.qclass,
            "DNS query received"
        );

        let query = DnsQuery::new(
            header.id,
            question.name.as_str(),
            question.qtype,
            question.qclass,
        );
        let request = DnsRequest::new(query, client, buf);

        match self.use_case.execute(&request).await {
            Ok(QueryOutcome::Refused(_)) => Some(build_refused(&message, buf)),
            Ok(QueryOutcome::Relayed(reply)) => Some(reply),
            Err(e) => {
                warn!(
                    client = %client,
                    id = header.id,
                    domain = %question.name,
                    error = %e,
                    "Upstream exchange failed, sending SERVFAIL"
                );
                Some(build_error_response(&message, buf, ResponseCode::ServFail))
            }
        }
    }
}
