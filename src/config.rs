use std::path::PathBuf;

use clap::Parser;

/// Startup options: where to listen and which directory `/files` serves.
#[derive(Clone, Debug, Parser)]
#[command(name = "waiter", about = "Minimal HTTP/1.1 file and echo server")]
pub struct Config {
    /// Address to bind, on all interfaces by default
    #[arg(long = "listen", env = "LISTEN", default_value = "0.0.0.0:4221")]
    pub listen_addr: String,

    /// Root directory for `/files`
    #[arg(long, default_value = ".")]
    pub directory: PathBuf,
}

impl Config {
    /// Reads the process arguments and the `LISTEN` variable.
    ///
    /// Exits with status 2 on invalid arguments.
    pub fn load() -> Self {
        Self::parse()
    }
}
