pub mod access;
pub mod accounts;
pub mod authorize;
pub mod digest;
pub mod funds;
pub mod guard;
pub mod packet;
pub mod signature;
pub mod socket;
