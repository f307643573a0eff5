// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub bind_addr: SocketAddr,
    /// User file the snapshot is built from. Sidecars live next to it.
    pub snapshot_path: Option<PathBuf>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            snapshot_path: None,
        }
    }
}

/// Command line for the `por-node` binary.
#[derive(Parser, Debug)]
#[command(author, version, about = "Serve proof-of-reserve inclusion proofs", long_about = None)]
pub struct NodeArgs {
    /// Path to the proof-of-reserve user file
    #[arg(short = 'p', long = "path")]
    pub path: PathBuf,

    /// Address to listen on
    #[arg(short = 'b', long = "bind")]
    pub bind: Option<SocketAddr>,
}

impl From<NodeArgs> for NodeConfig {
    fn from(args: NodeArgs) -> Self {
        let defaults = NodeConfig::default();
        Self {
            bind_addr: args.bind.unwrap_or(defaults.bind_addr),
            snapshot_path: Some(args.path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_override_defaults() {
        let args = NodeArgs::parse_from(["por-node", "-p", "users.txt"]);
        let cfg = NodeConfig::from(args);
        assert_eq!(cfg.bind_addr, NodeConfig::default().bind_addr);
        assert_eq!(cfg.snapshot_path, Some(PathBuf::from("users.txt")));

        let args = NodeArgs::parse_from(["por-node", "--path", "db", "--bind", "0.0.0.0:9000"]);
        let cfg = NodeConfig::from(args);
        assert_eq!(cfg.bind_addr.port(), 9000);
    }

    #[test]
    fn test_path_is_required() {
        assert!(NodeArgs::try_parse_from(["por-node"]).is_err());
    }
}
