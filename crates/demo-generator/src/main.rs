use anyhow::{Context, Result};
use clap::Parser;
use por_kernel::{PorDb, SnapshotStore};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate a sample proof-of-reserve user file", long_about = None)]
struct Args {
    /// Number of users (ids 1..=N)
    #[arg(short, long, default_value_t = 1000)]
    users: u64,

    /// Output user file
    #[arg(short, long, default_value = "users.txt")]
    out: PathBuf,

    /// Seed for the balance generator
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Also build the index and merkle sidecars
    #[arg(long)]
    build: bool,
}

// Deterministic "random" balance (splitmix64)
fn balance(seed: u64, id: u64) -> u64 {
    let mut z = seed.wrapping_add(id.wrapping_mul(0x9e3779b97f4a7c15));
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    (z ^ (z >> 31)) % 1_000_000_000
}

fn main() -> Result<()> {
    let args = Args::parse();

    let file = File::create(&args.out).with_context(|| format!("cannot create {:?}", args.out))?;
    let mut w = BufWriter::new(file);
    writeln!(w, "{}", args.users)?;
    for id in 1..=args.users {
        writeln!(w, "({},{})", id, balance(args.seed, id))?;
    }
    w.flush()?;
    println!("Wrote {} users to {:?}", args.users, args.out);

    if args.build {
        let db = PorDb::load(&args.out).context("failed to build snapshot sidecars")?;
        if let Some(root) = db.root() {
            println!("Merkle root: {}", por_kernel::hash::to_hex(&root));
        }
    }

    Ok(())
}
