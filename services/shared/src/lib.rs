pub mod constants;
pub mod errors;
pub mod profile;
pub mod risk;
pub mod stats;
pub mod types;
pub mod wallet;

pub use constants::*;
pub use profile::*;
pub use types::*;
