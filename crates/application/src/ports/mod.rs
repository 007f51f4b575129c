mod block_filter_engine;
mod filter_source;
mod pending_exchanges;
mod upstream_resolver;

pub use block_filter_engine::{BlockFilterPort, FilterDecision};
pub use filter_source::FilterSourcePort;
pub use pending_exchanges::PendingExchangePort;
pub use upstream_resolver::UpstreamPort;
