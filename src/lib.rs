//! winroute - IPv4 routing table manager for the Windows IP Helper API
//!
//! The library is platform-neutral: the route table gateway works against the
//! [`routing::IpHelperApi`] trait, and only the `routing::sys` bindings are
//! Windows-specific.

pub mod addr;
pub mod app;
pub mod cli;
pub mod error;
pub mod mem;
pub mod network;
pub mod routing;

pub use error::AppError;
