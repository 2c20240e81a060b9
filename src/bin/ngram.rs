use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use hmmtag::{config::check_input_file, NGramModel};
use rand::{rngs::StdRng, SeedableRng};

/// N-gram random text generator
/// Learn an n-gram model from the input text and generate random text from it
#[derive(Debug, Parser)]
#[command(name = "ngram")]
struct Argv {
    /// file containing text for learning
    #[arg(long, value_name = "PATH")]
    input_file: PathBuf,
    /// the 'n' in n-gram
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    n: u32,
    /// number of words to output
    #[arg(long, default_value_t = 100)]
    output_length: usize,
    /// seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

fn run(argv: &Argv) -> hmmtag::Result<()> {
    check_input_file("input", &argv.input_file)?;
    let model = NGramModel::read_file(&argv.input_file, argv.n as usize)?;
    let mut rng = match argv.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    println!("{}", model.generate(argv.output_length, &mut rng).join(" "));
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let argv = Argv::parse();
    log::debug!("{:?}", argv);
    match run(&argv) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
