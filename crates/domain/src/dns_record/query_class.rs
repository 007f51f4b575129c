use std::fmt;

/// QCLASS values (RFC 1035 §3.2.4). Anything other than `IN` is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryClass {
    IN,
    CH,
    HS,
    NONE,
    ANY,
    Unknown(u16),
}

impl QueryClass {
    pub fn from_u16(value: u16) -> Self {
        match value {
            1 => QueryClass::IN,
            3 => QueryClass::CH,
            4 => QueryClass::HS,
            254 => QueryClass::NONE,
            255 => QueryClass::ANY,
            other => QueryClass::Unknown(other),
        }
    }
}

impl fmt::Display for QueryClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryClass::IN => f.write_str("IN"),
            QueryClass::CH => f.write_str("CH"),
            QueryClass::HS => f.write_str("HS"),
            QueryClass::NONE => f.write_str("NONE"),
            QueryClass::ANY => f.write_str("ANY"),
            QueryClass::Unknown(value) => write!(f, "CLASS{}", value),
        }
    }
}
