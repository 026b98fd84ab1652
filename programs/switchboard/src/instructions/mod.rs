pub mod fees;
pub mod initialize;
pub mod rescue;
pub mod roles;
pub mod sibling;
pub mod trip;
pub mod views;

pub use fees::*;
pub use initialize::*;
pub use rescue::*;
pub use roles::*;
pub use sibling::*;
pub use trip::*;
pub use views::*;
