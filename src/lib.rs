//! First-order Hidden Markov Model tagger.
//!
//! Training counts `word_TAG` tokens into an [`HmmTrainer`], which freezes
//! into an immutable [`HmmModel`]. An [`HmmTagger`] decodes word sequences in
//! log-space and an [`Evaluation`] scores the output against gold tags.

pub mod config;
pub mod dataset;
pub mod error;
pub mod evaluation;
pub mod hmm;
pub mod ngram;
pub mod pipeline;
pub mod quark;
pub mod report;

pub use config::Config;
pub use dataset::{Corpus, MalformedPolicy, TaggedToken};
pub use error::{Error, Result};
pub use evaluation::{ConfusionMatrix, Estimation, Evaluation};
pub use hmm::{
    context::Context,
    model::HmmModel,
    tagger::{HmmTagger, Prediction, Strategy, Tagger},
    trainer::{HmmTrainer, SMOOTHING_FLOOR},
};
pub use ngram::NGramModel;
pub use quark::{Quark, StringTable, TextVectorizer};
pub use report::Report;
