pub mod config;
pub mod signer;
