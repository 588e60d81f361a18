pub mod create_amm_config;
pub mod deposit;
pub mod initialize;
pub mod swap_base_input;
pub mod swap_base_output;
pub mod update_pool_status;
pub mod withdraw;

pub use create_amm_config::*;
pub use deposit::*;
pub use initialize::*;
pub use swap_base_input::*;
pub use update_pool_status::*;
pub use withdraw::*;
