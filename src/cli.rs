//! Command-line argument parsing

use clap::Parser;
use std::net::Ipv4Addr;
use tracing::warn;

/// Command-line arguments structure
#[derive(Parser, Debug)]
#[command(name = "winroute")]
#[command(about = "IPv4 routing table manager for the Windows IP Helper API")]
#[command(version)]
pub struct CliArgs {
    /// Gateway address
    #[arg(short, long, help = "Interface (IPv4) address serving as a gateway")]
    pub gateway: Option<String>,

    /// Debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,
}

impl CliArgs {
    /// Parsed gateway address; invalid text is logged as a warning and
    /// treated as absent.
    pub fn gateway_address(&self) -> Option<Ipv4Addr> {
        let text = self.gateway.as_deref()?;
        match text.parse() {
            Ok(addr) => Some(addr),
            Err(_) => {
                warn!(address = text, "Invalid gateway address specified");
                None
            }
        }
    }

    /// Log filter directive for the subscriber.
    pub fn log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }
}
