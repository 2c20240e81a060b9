use std::io::Write;

use serde::Serialize;

use crate::{
    dataset::Corpus,
    error::Result,
    evaluation::{ConfusionMatrix, Estimation, Evaluation},
    hmm::{
        model::HmmModel,
        tagger::{Strategy, Tagger},
    },
    quark::StringTable,
};

#[derive(Debug, Clone, Serialize)]
pub struct TagSummary {
    pub tag: String,
    pub tokens: usize,
    pub initial_probability: f64,
}

/// Training-side statistics, in tag registry order.
#[derive(Debug, Clone, Serialize)]
pub struct ModelSummary {
    pub order: usize,
    pub num_tokens: usize,
    pub num_words: usize,
    pub tags: Vec<TagSummary>,
}

impl ModelSummary {
    pub fn from_model(model: &HmmModel) -> Self {
        let tags = model
            .tags()
            .iter()
            .map(|(t, tag)| TagSummary {
                tag: tag.to_string(),
                tokens: model.tag_count(t),
                initial_probability: model.initial_probability(t),
            })
            .collect();
        Self { order: model.order(), num_tokens: model.num_tokens(), num_words: model.num_words(), tags }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenLine {
    pub word: String,
    pub gold: String,
    pub predicted: String,
    pub score: f64,
}

/// Result of decoding and scoring one test corpus.
#[derive(Debug, Serialize)]
pub struct Report {
    pub strategy: Strategy,
    pub model: ModelSummary,
    pub tokens: Vec<TokenLine>,
    pub estimation: Estimation,
    pub evaluation: Evaluation,
}

impl Report {
    /// Decodes the words of `test` and scores them against its gold tags.
    pub fn build(model: &HmmModel, test: &Corpus, strategy: Strategy) -> Result<Self> {
        let tagger = model.tagger(strategy);
        let words = test.words();
        let gold = test.tags();
        let predictions = tagger.decode(&words);
        let predicted: Vec<&str> =
            predictions.iter().map(|p| model.tags().to_str(p.tag).unwrap_or_default()).collect();

        let mut evaluation = Evaluation::default();
        evaluation.score(&predicted, &gold)?;
        let estimation = evaluation.evaluate();

        let tokens = words
            .iter()
            .zip(&gold)
            .zip(predicted.iter().zip(&predictions))
            .map(|((word, gold), (tag, p))| TokenLine {
                word: word.to_string(),
                gold: gold.to_string(),
                predicted: tag.to_string(),
                score: p.score,
            })
            .collect();

        Ok(Self { strategy, model: ModelSummary::from_model(model), tokens, estimation, evaluation })
    }

    pub fn write_text<W: Write>(&self, w: &mut W, quiet: bool) -> Result<()> {
        write_model_summary(w, &self.model)?;
        if !quiet {
            write_tokens(w, &self.tokens)?;
        }
        writeln!(w)?;
        write!(w, "{}", self.evaluation)?;
        writeln!(w)?;
        write_confusion_matrix(w, self.evaluation.confusion())?;
        Ok(())
    }

    pub fn write_json<W: Write>(&self, w: &mut W) -> Result<()> {
        serde_json::to_writer_pretty(&mut *w, self)?;
        writeln!(w)?;
        Ok(())
    }
}

pub fn write_model_summary<W: Write>(w: &mut W, summary: &ModelSummary) -> std::io::Result<()> {
    writeln!(w, "Total number of words read: {}", summary.num_tokens)?;
    writeln!(w)?;
    writeln!(w, "POS Tag  POS Tokens  POS Probability")?;
    writeln!(w, "=======  ==========  ===============")?;
    for t in &summary.tags {
        writeln!(w, " {:>5}    {:>7}    {:>12.13}", t.tag, t.tokens, t.initial_probability)?;
    }
    Ok(())
}

pub fn write_tokens<W: Write>(w: &mut W, tokens: &[TokenLine]) -> std::io::Result<()> {
    writeln!(w)?;
    writeln!(w, "Word\tGold\tPredicted\tLog-probability")?;
    for t in tokens {
        writeln!(w, "{}\t{}\t{}\t{:.6}", t.word, t.gold, t.predicted, t.score)?;
    }
    Ok(())
}

/// Rows are gold tags, columns are predicted tags.
pub fn write_confusion_matrix<W: Write>(w: &mut W, confusion: &ConfusionMatrix) -> std::io::Result<()> {
    writeln!(w, "Confusion matrix (row: gold, column: predicted):")?;
    let labels: Vec<&str> = confusion.labels().into_iter().collect();
    let width = labels.iter().map(|l| l.len()).max().unwrap_or(0).max(6);
    write!(w, "{:>width$}", "")?;
    for l in &labels {
        write!(w, " {l:>width$}")?;
    }
    writeln!(w)?;
    for gold in &labels {
        write!(w, "{gold:>width$}")?;
        for predicted in &labels {
            write!(w, " {:>width$}", confusion.get(gold, predicted))?;
        }
        writeln!(w)?;
    }
    writeln!(w, "Total: {}, correct: {}", confusion.total(), confusion.correct())
}
