//! Upstream transport: one shared UDP socket and the table that matches its
//! replies back to waiting query tasks.

pub mod pending;
pub mod udp;

pub use pending::{PendingExchange, PendingExchanges};
pub use udp::UdpUpstream;
