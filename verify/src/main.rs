use anyhow::{bail, Context, Result};
use clap::Parser;
use por_kernel::codec::parse_record;
use por_kernel::hash::to_hex;
use por_kernel::verify::verify_proof;
use por_kernel::wire::PorResponse;
use por_kernel::UserProof;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Check a proof-of-reserve inclusion proof", long_about = None)]
struct Args {
    /// JSON body returned by `GET /por?id=..`
    #[arg(required_unless_present = "record")]
    response: Option<PathBuf>,

    /// Raw store record instead of a JSON response
    #[arg(long, conflicts_with = "response")]
    record: Option<String>,

    /// Published root the proof must commit to
    #[arg(long)]
    root: Option<String>,
}

fn load_proof(args: &Args) -> Result<UserProof> {
    if let Some(raw) = &args.record {
        return parse_record(raw).context("Failed to parse raw record");
    }

    let path = args.response.as_ref().context("no response file given")?;
    let body = fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;
    let resp: PorResponse =
        serde_json::from_slice(&body).context("Failed to parse proof response JSON")?;

    Ok(UserProof::from(resp.user))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let proof = load_proof(&args)?;
    eprintln!(
        "User {} balance {} ({} path steps)",
        proof.id(),
        proof.balance(),
        proof.path().len()
    );

    let root = verify_proof(&proof).context("Proof does not verify")?;
    let root_hex = to_hex(&root);

    if let Some(expected) = &args.root {
        if !expected.eq_ignore_ascii_case(&root_hex) {
            bail!("Proof commits to {} but the published root is {}", root_hex, expected);
        }
    }

    println!("VALID {}", root_hex);
    Ok(())
}
