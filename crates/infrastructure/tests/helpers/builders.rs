use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RData, RecordType};
use std::net::Ipv4Addr;
use std::str::FromStr;

pub fn build_query(id: u16, domain: &str, record_type: RecordType) -> Vec<u8> {
    build_query_with_class(id, domain, record_type, DNSClass::IN)
}

pub fn build_query_with_class(
    id: u16,
    domain: &str,
    record_type: RecordType,
    class: DNSClass,
) -> Vec<u8> {
    let mut query = Query::new();
    query.set_name(Name::from_str(domain).unwrap());
    query.set_query_type(record_type);
    query.set_query_class(class);

    let mut message = Message::new(id, MessageType::Query, OpCode::Query);
    message.metadata.recursion_desired = true;
    message.add_query(query);
    message.to_vec().unwrap()
}

/// Header-only packet with arbitrary flags and question count.
pub fn raw_header(id: u16, flags: u16, qdcount: u16) -> Vec<u8> {
    let mut buf = Vec::with_capacity(12);
    buf.extend_from_slice(&id.to_be_bytes());
    buf.extend_from_slice(&flags.to_be_bytes());
    buf.extend_from_slice(&qdcount.to_be_bytes());
    buf.extend_from_slice(&[0, 0, 0, 0, 0, 0]);
    buf
}

pub fn response_id(reply: &[u8]) -> u16 {
    u16::from_be_bytes([reply[0], reply[1]])
}

pub fn rcode(reply: &[u8]) -> u8 {
    reply[3] & 0x0F
}

pub fn is_response(reply: &[u8]) -> bool {
    reply[2] & 0x80 != 0
}

pub fn section_counts(reply: &[u8]) -> [u16; 4] {
    [
        u16::from_be_bytes([reply[4], reply[5]]),
        u16::from_be_bytes([reply[6], reply[7]]),
        u16::from_be_bytes([reply[8], reply[9]]),
        u16::from_be_bytes([reply[10], reply[11]]),
    ]
}

pub fn answer_ips(reply: &[u8]) -> Vec<Ipv4Addr> {
    let message = Message::from_vec(reply).unwrap();
    message
        .answers
        .iter()
        .filter_map(|record| match &record.data {
            RData::A(a) => Some(a.0),
            _ => None,
        })
        .collect()
}

pub const RCODE_NOERROR: u8 = 0;
pub const RCODE_FORMERR: u8 = 1;
pub const RCODE_SERVFAIL: u8 = 2;
pub const RCODE_NXDOMAIN: u8 = 3;
pub const RCODE_NOTIMP: u8 = 4;
pub const RCODE_REFUSED: u8 = 5;
