use compact_str::CompactString;
use dns_sieve_domain::{QueryClass, RecordType};
use thiserror::Error;

pub const HEADER_LEN: usize = 12;

/// RFC 1035 §3.1: length octets plus label octets, terminating zero included.
const MAX_WIRE_NAME_LEN: usize = 255;

const FLAG_QR: u16 = 0x8000;
const FLAG_RD: u16 = 0x0100;

pub const OPCODE_QUERY: u8 = 0;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    #[error("packet shorter than the 12-byte header")]
    TooShort,

    #[error("QR bit set, packet is a response")]
    NotAQuery,

    #[error("expected exactly one question, got {0}")]
    BadQuestionCount(u16),

    #[error("unparseable question: {0}")]
    BadQuestion(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DnsHeader {
    pub id: u16,
    pub flags: u16,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

impl DnsHeader {
    /// Reads the fixed header; `None` when fewer than 12 bytes are available.
    pub fn parse(buf: &[u8]) -> Option<Self> {
        let h = buf.get(..HEADER_LEN)?;
        let word = |i: usize| u16::from_be_bytes([h[i], h[i + 1]]);
        Some(Self {
            id: word(0),
            flags: word(2),
            qdcount: word(4),
            ancount: word(6),
            nscount: word(8),
            arcount: word(10),
        })
    }

    #[inline]
    pub fn is_response(&self) -> bool {
        self.flags & FLAG_QR != 0
    }

    #[inline]
    pub fn opcode(&self) -> u8 {
        ((self.flags >> 11) & 0x0F) as u8
    }

    #[inline]
    pub fn recursion_desired(&self) -> bool {
        self.flags & FLAG_RD != 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Presentation form: lowercase, no trailing dot, `\DDD` for unsafe bytes.
    /// The root name renders as the empty string.
    pub name: CompactString,
    pub qtype: RecordType,
    pub qclass: QueryClass,
}

/// Structured view of a single-question query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsMessage {
    pub header: DnsHeader,
    pub question: Question,
    /// Offset just past QCLASS; `buf[12..question_end]` is the raw question.
    pub question_end: usize,
}

/// Parses an inbound datagram. Every read is bounds-checked against `buf`.
///
/// Anything after the question (answer, authority, additional sections such as
/// an EDNS0 OPT record) is left untouched and travels upstream verbatim.
pub fn parse_query(buf: &[u8]) -> Result<DnsMessage, MalformedReason> {
    let header = DnsHeader::parse(buf).ok_or(MalformedReason::TooShort)?;

    if header.is_response() {
        return Err(MalformedReason::NotAQuery);
    }
    if header.qdcount != 1 {
        return Err(MalformedReason::BadQuestionCount(header.qdcount));
    }

    let (name, pos) = read_name(buf, HEADER_LEN)?;

    let fixed = buf
        .get(pos..pos + 4)
        .ok_or(MalformedReason::BadQuestion("truncated QTYPE/QCLASS"))?;
    let qtype = u16::from_be_bytes([fixed[0], fixed[1]]);
    let qclass = u16::from_be_bytes([fixed[2], fixed[3]]);

    Ok(DnsMessage {
        header,
        question: Question {
            name,
            qtype: RecordType::from_u16(qtype),
            qclass: QueryClass::from_u16(qclass),
        },
        question_end: pos + 4,
    })
}

fn read_name(buf: &[u8], mut pos: usize) -> Result<(CompactString, usize), MalformedReason> {
    let mut name = CompactString::default();
    let mut wire_len = 0usize;

    loop {
        let label_len = *buf
            .get(pos)
            .ok_or(MalformedReason::BadQuestion("name runs past end of packet"))?
            as usize;
        pos += 1;

        wire_len += 1 + label_len;
        if wire_len > MAX_WIRE_NAME_LEN {
            return Err(MalformedReason::BadQuestion("name exceeds 255 bytes"));
        }
        if label_len == 0 {
            break;
        }
        // 0b11 is a compression pointer, 0b01/0b10 are reserved label types.
        if label_len & 0xC0 != 0 {
            return Err(MalformedReason::BadQuestion(
                "compression pointer or extended label in question",
            ));
        }

        let label = buf
            .get(pos..pos + label_len)
            .ok_or(MalformedReason::BadQuestion("label runs past end of packet"))?;
        if !name.is_empty() {
            name.push('.');
        }
        push_label(&mut name, label);
        pos += label_len;
    }

    Ok((name, pos))
}

fn push_label(out: &mut CompactString, label: &[u8]) {
    for &b in label {
        match b {
            b'.' | b'\\' => push_escaped(out, b),
            0x21..=0x7E => out.push(b.to_ascii_lowercase() as char),
            _ => push_escaped(out, b),
        }
    }
}

fn push_escaped(out: &mut CompactString, b: u8) {
    out.push('\\');
    out.push((b'0' + b / 100) as char);
    out.push((b'0' + (b / 10) % 10) as char);
    out.push((b'0' + b % 10) as char);
}
