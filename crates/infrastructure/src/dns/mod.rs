pub mod block_filter;
pub mod query_parser;
pub mod server;
pub mod transport;
pub mod wire_response;

pub use block_filter::BlockFilterEngine;
pub use query_parser::{parse_query, DnsHeader, DnsMessage, MalformedReason, Question};
pub use server::DnsServerHandler;
pub use transport::{PendingExchanges, UdpUpstream};
