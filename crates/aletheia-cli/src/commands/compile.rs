use std::env;
use std::error::Error;
use std::path::PathBuf;

use aletheia_belief::DEFAULT_POSTERIOR_SAMPLES;
use aletheia_cert::{certificate_hash, save_certificate, Certificate};
use aletheia_core::{load_claim_set, ClaimEntry, ClaimSet, DIGEST_PREFIX};
use aletheia_falsify::{ClaimResult, FalsificationEngine};
use aletheia_plugins::{demo_claims, faulty_demo_claims};
use clap::Args;
use tracing::info;

use super::{compare, shared_registry, sweep};

const DEFAULT_TRIALS: u64 = 20_000;

#[derive(Args, Debug)]
pub struct CompileArgs {
    /// Master seed for trial derivation.
    #[arg(long)]
    pub seed: String,
    /// Trial budget per claim; overrides the claims file when given.
    #[arg(long)]
    pub trials: Option<u64>,
    /// Worker threads (0 picks a default).
    #[arg(long, default_value_t = 0)]
    pub workers: usize,
    /// Certificate output path.
    #[arg(long, default_value = "aletheia_certificate.json")]
    pub out: PathBuf,
    /// Program hash recorded in the certificate (random when omitted).
    #[arg(long)]
    pub program_hash: Option<String>,
    /// YAML claim set replacing the built-in demo claims.
    #[arg(long)]
    pub claims: Option<PathBuf>,
    /// Machine identifier recorded in the certificate.
    #[arg(long)]
    pub machine: Option<String>,
    /// First run the demo claims against known-faulty implementations.
    #[arg(long)]
    pub show_bug: bool,
    /// Attach the comparative belief and the distinctness decision rule.
    #[arg(long)]
    pub performance: bool,
}

pub fn run(args: &CompileArgs) -> Result<(), Box<dyn Error>> {
    let registry = shared_registry();
    let engine = FalsificationEngine::new(registry.clone());
    let set = claim_set(args)?;

    if args.show_bug {
        let faulty = faulty_demo_claims(args.trials.unwrap_or(DEFAULT_TRIALS));
        for entry in &faulty {
            let result =
                engine.evaluate(&entry.claim, &entry.implementation, &args.seed, args.workers)?;
            report_faulty(entry, &result);
        }
    }

    let mut results = Vec::with_capacity(set.claims.len());
    for entry in &set.claims {
        let result =
            engine.evaluate(&entry.claim, &entry.implementation, &args.seed, args.workers)?;
        println!(
            "{} @ {}: {} failures in {} trials",
            entry.claim.id, entry.implementation, result.failures, result.trials_run
        );
        results.push(result);
    }

    let program_hash = args
        .program_hash
        .clone()
        .unwrap_or_else(|| format!("{DIGEST_PREFIX}{}", hex::encode(rand::random::<[u8; 32]>())));
    let machine = args.machine.clone().unwrap_or_else(machine_id);
    let mut cert = Certificate::build(program_hash, machine, &results);
    if args.performance {
        let report = compare::evaluate(
            &registry,
            &args.seed,
            1_200,
            args.workers,
            DEFAULT_POSTERIOR_SAMPLES,
        )?;
        let rule = sweep::evaluate(&registry, &args.seed, 120, args.workers)?;
        cert = cert
            .with_beliefs(vec![report.summary])
            .with_decision_rules(vec![rule]);
    }

    let file_hash = save_certificate(&cert, &args.out)?;
    let cert_hash = certificate_hash(&cert)?;
    info!(claims = cert.claims.len(), holds = cert.all_claims_hold(), "compile finished");
    println!("Wrote certificate to {}", args.out.display());
    println!("Certificate hash: {cert_hash}");
    println!("File sha256: {file_hash}");
    Ok(())
}

fn claim_set(args: &CompileArgs) -> Result<ClaimSet, Box<dyn Error>> {
    let set = match &args.claims {
        Some(path) => load_claim_set(path)?,
        None => ClaimSet {
            claims: demo_claims(DEFAULT_TRIALS),
        },
    };
    Ok(match args.trials {
        Some(trials) => set.with_trials(trials),
        None => set,
    })
}

fn report_faulty(entry: &ClaimEntry, result: &ClaimResult) {
    match result.counterexample() {
        Some(sample) => match (sample.details.get("observed"), sample.details.get("baseline")) {
            (Some(observed), Some(baseline)) => println!(
                "{} deviated at trial {}: observed {observed} vs baseline {baseline}",
                entry.implementation, sample.index
            ),
            _ => println!(
                "Bug caught in {} at trial {}: input {}",
                entry.implementation, sample.index, sample.input
            ),
        },
        None => println!(
            "{} passed all {} sampled trials",
            entry.implementation, result.trials_run
        ),
    }
}

fn machine_id() -> String {
    env::var("HOSTNAME")
        .or_else(|_| env::var("COMPUTERNAME"))
        .unwrap_or_else(|_| format!("{}-{}", env::consts::OS, env::consts::ARCH))
}
