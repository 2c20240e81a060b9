use std::{io::stdout, path::PathBuf, process::ExitCode};

use clap::Parser;
use hmmtag::{pipeline, Config, MalformedPolicy, Strategy, SMOOTHING_FLOOR};

/// Part-of-speech labeler
/// Learn a hidden Markov model from tagged training data (word_TAG tokens),
/// tag the test data with it and report the results against its gold tags
#[derive(Debug, Parser)]
#[command(name = "hmmtag")]
struct Argv {
    /// file containing training data for part-of-speech labeling
    #[arg(long, value_name = "PATH")]
    training_data: PathBuf,
    /// file containing test data for part-of-speech labeling
    #[arg(long, value_name = "PATH")]
    test_data: PathBuf,
    /// the 'n' in n-gram: number of previous tags in a transition context
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    n: u32,
    /// how tags are read off the decoding lattice
    #[arg(long, value_enum, default_value_t = Strategy::Viterbi)]
    decoder: Strategy,
    /// numerator used in place of a zero count
    #[arg(long, default_value_t = SMOOTHING_FLOOR)]
    smoothing: f64,
    /// skip malformed tokens with a warning instead of failing
    #[arg(long)]
    lenient: bool,
    /// suppress the per-token lines
    #[arg(short, long)]
    quiet: bool,
    /// write the report as JSON
    #[arg(long)]
    json: bool,
}

impl From<&Argv> for Config {
    fn from(argv: &Argv) -> Self {
        let mut config = Config::new(&argv.training_data, &argv.test_data);
        config.order = argv.n as usize;
        config.strategy = argv.decoder;
        config.smoothing = argv.smoothing;
        config.malformed = if argv.lenient { MalformedPolicy::Lenient } else { MalformedPolicy::Strict };
        config
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let argv = Argv::parse();
    log::debug!("{:?}", argv);
    let config = Config::from(&argv);

    let result = pipeline::run(&config).and_then(|report| {
        let mut out = stdout().lock();
        if argv.json {
            report.write_json(&mut out)
        } else {
            report.write_text(&mut out, argv.quiet)
        }
    });
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
