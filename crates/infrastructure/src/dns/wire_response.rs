use super::query_parser::{DnsHeader, DnsMessage, HEADER_LEN};
use dns_sieve_domain::ResponseCode;

const FLAG_QR: u16 = 0x8000;
const FLAG_RD: u16 = 0x0100;
const FLAG_RA: u16 = 0x0080;
const OPCODE_MASK: u16 = 0x7800;

/// Response flags derived from a query: QR and RA set, opcode and RD copied.
#[inline]
fn response_flags(query: &DnsHeader, rcode: ResponseCode) -> u16 {
    FLAG_QR
        | FLAG_RA
        | (query.flags & (OPCODE_MASK | FLAG_RD))
        | rcode.low_bits() as u16
}

fn write_header(buf: &mut Vec<u8>, id: u16, flags: u16, qdcount: u16) {
    buf.extend_from_slice(&id.to_be_bytes());
    buf.extend_from_slice(&flags.to_be_bytes());
    buf.extend_from_slice(&qdcount.to_be_bytes());
    buf.extend_from_slice(&[0, 0, 0, 0, 0, 0]);
}

/// Builds a reply that echoes the query's id and question with `rcode` set and
/// no answer, authority or additional records.
///
/// `query_buf` must be the buffer `message` was parsed from.
pub fn build_error_response(
    message: &DnsMessage,
    query_buf: &[u8],
    rcode: ResponseCode,
) -> Vec<u8> {
    let question = query_buf
        .get(HEADER_LEN..message.question_end)
        .unwrap_or_default();

    let mut buf = Vec::with_capacity(HEADER_LEN + question.len());
    let qdcount = if question.is_empty() { 0 } else { 1 };
    write_header(
        &mut buf,
        message.header.id,
        response_flags(&message.header, rcode),
        qdcount,
    );
    buf.extend_from_slice(question);
    buf
}

pub fn build_refused(message: &DnsMessage, query_buf: &[u8]) -> Vec<u8> {
    build_error_response(message, query_buf, ResponseCode::Refused)
}

/// FORMERR for a query whose question could not be trusted: only the header
/// fields are echoed, every section count is zero.
pub fn build_format_error(header: &DnsHeader) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_LEN);
    write_header(
        &mut buf,
        header.id,
        response_flags(header, ResponseCode::FormErr),
        0,
    );
    buf
}

/// Overwrites the transaction id in place. Buffers shorter than two bytes are
/// left untouched.
#[inline]
pub fn rewrite_id(packet: &mut [u8], id: u16) {
    if let Some(slot) = packet.get_mut(0..2) {
        slot.copy_from_slice(&id.to_be_bytes());
    }
}
