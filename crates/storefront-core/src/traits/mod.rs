//! Core traits for request transport.

mod transport;

pub use transport::Transport;
