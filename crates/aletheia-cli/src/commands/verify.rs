use std::error::Error;
use std::path::PathBuf;

use aletheia_cert::{verify_against, verify_certificate};
use clap::Args;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Certificate to verify.
    pub path: PathBuf,
    /// File digest printed when the certificate was written.
    #[arg(long)]
    pub expect: Option<String>,
}

pub fn run(args: &VerifyArgs) -> Result<(), Box<dyn Error>> {
    let report = match &args.expect {
        Some(expected) => verify_against(&args.path, expected)?,
        None => verify_certificate(&args.path)?,
    };
    println!("Computed certificate hash: {}", report.certificate_hash);
    println!("File sha256: {}", report.file_hash);
    if args.expect.is_some() {
        println!("File digest matches");
    }
    Ok(())
}
