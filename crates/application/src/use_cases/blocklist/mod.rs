mod reload_filter;

pub use reload_filter::ReloadFilterUseCase;
