pub mod exchange_rate;
pub mod file_cpi;
pub mod http_cpi;
pub mod util;

pub(crate) const USER_AGENT: &str = concat!("infl/", env!("CARGO_PKG_VERSION"));
