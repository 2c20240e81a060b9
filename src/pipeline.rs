use crate::{
    config::Config,
    dataset::Corpus,
    error::Result,
    hmm::{model::HmmModel, trainer::HmmTrainer},
    report::Report,
};

/// Counts a training corpus and freezes the result.
pub fn train(corpus: &Corpus, order: usize, smoothing: f64) -> Result<HmmModel> {
    let mut trainer = HmmTrainer::new(order).with_smoothing(smoothing)?;
    trainer.train(corpus);
    let model = trainer.finish()?;
    log::info!(
        "model: {} tokens, {} tags, {} words, {} contexts (n = {})",
        model.num_tokens(),
        model.num_tags(),
        model.num_words(),
        model.contexts().len(),
        model.order()
    );
    Ok(model)
}

/// Validate, read, train, decode and score.
pub fn run(config: &Config) -> Result<Report> {
    config.validate()?;
    log::info!("creating model from {}", config.training_data.display());
    let training = Corpus::read_file(&config.training_data, config.malformed)?;
    let test = Corpus::read_file(&config.test_data, config.malformed)?;
    let model = train(&training, config.order, config.smoothing)?;
    let report = Report::build(&model, &test, config.strategy)?;
    log::info!(
        "tagged {} tokens, accuracy {:.4}",
        report.evaluation.num_items(),
        report.estimation.accuracy
    );
    Ok(report)
}
