pub mod blocklist;
pub mod dns;

pub use blocklist::ReloadFilterUseCase;
pub use dns::{HandleDnsQueryUseCase, QueryOutcome, RefusalReason};
