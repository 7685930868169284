use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use log::info;

use afafuzz::fixture_harness;
use afafuzz::FuzzConfig;
use afarust_utilities::random_generator;

#[derive(Parser, Debug)]
#[command(
    name = "afafuzz",
    about = "Compares the acceptance of random words by a DFA, NFA and AFA with a regular expression",
)]
struct Cli {
    #[arg(long, default_value_t = 10, help = "Number of iterations, every iteration checks one word over {a, b} and one over a..z")]
    count: usize,

    #[arg(long, default_value_t = 0)]
    min_len: usize,

    #[arg(long, default_value_t = 12)]
    max_len: usize,

    #[arg(long, help = "Seed for the random number generator, random when omitted")]
    seed: Option<u64>,

    #[arg(long, default_value_t = false, help = "Only print discrepancies")]
    quiet: bool,
}

fn main() -> Result<ExitCode> {
    env_logger::init();

    let cli = Cli::parse();

    let config = FuzzConfig {
        word_count: cli.count,
        min_len: cli.min_len,
        max_len: cli.max_len,
        ..FuzzConfig::default()
    };
    info!("Fuzzing with {config:?}");

    let harness = fixture_harness()?;
    let mut rng = random_generator(cli.seed);

    let report = harness.run(&config, &mut rng, |verdicts| {
        if !cli.quiet || !verdicts.agree() {
            println!("{verdicts}");
        }
    });

    println!("{report}");
    if report.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
