pub mod exchange_sweep;
pub mod filter_reload;
pub mod runner;

pub use exchange_sweep::ExchangeSweepJob;
pub use filter_reload::FilterReloadJob;
pub use runner::JobRunner;
