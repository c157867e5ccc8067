// Hetzner Cloud API modules
pub mod client;
pub mod servers;

// Re-export commonly used items
pub use client::{set_silent, HetznerClient};

