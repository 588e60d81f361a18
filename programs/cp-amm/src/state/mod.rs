pub mod amm_config;
pub mod observation;
pub mod pool;

pub use amm_config::*;
pub use observation::*;
pub use pool::*;
