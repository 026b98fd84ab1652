pub mod config;
pub mod fees;
pub mod nonce;
pub mod role;
pub mod sibling;
pub mod trip;

pub use config::*;
pub use fees::*;
pub use nonce::*;
pub use role::*;
pub use sibling::*;
pub use trip::*;
