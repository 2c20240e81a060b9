use std::collections::HashMap;

use super::{context::Context, model::HmmModel};
use crate::{
    dataset::Corpus,
    error::{Error, Result},
    quark::{Quark, StringTable, TextVectorizer},
};

/// Numerator substituted for a zero count when estimating probabilities.
pub const SMOOTHING_FLOOR: f64 = 1e-10;

/// Increments `row[idx]`, growing the row with zeros if the column is new.
fn bump(row: &mut Vec<usize>, idx: usize) {
    if row.len() <= idx {
        row.resize(idx + 1, 0);
    }
    row[idx] += 1;
}

/// Frequency Model: accumulates emission and transition counts.
///
/// The trainer is the only mutable stage. [`HmmTrainer::finish`] consumes it
/// and returns a read-only [`HmmModel`], so counts cannot change once
/// decoding starts.
#[derive(Debug)]
pub struct HmmTrainer {
    order: usize,
    smoothing: f64,
    tags: Quark,
    words: Quark,
    contexts: Vec<Context>,
    context_ids: HashMap<Context, usize>,
    /// [tag][word] counts. Rows are ragged until `finish` pads them.
    emission: Vec<Vec<usize>>,
    emission_total: Vec<usize>,
    /// [context][tag] counts.
    transition: Vec<Vec<usize>>,
    transition_total: Vec<usize>,
    num_tokens: usize,
}

impl HmmTrainer {
    pub fn new(order: usize) -> Self {
        Self {
            order,
            smoothing: SMOOTHING_FLOOR,
            tags: Quark::default(),
            words: Quark::default(),
            contexts: Vec::new(),
            context_ids: HashMap::new(),
            emission: Vec::new(),
            emission_total: Vec::new(),
            transition: Vec::new(),
            transition_total: Vec::new(),
            num_tokens: 0,
        }
    }

    /// Overrides the smoothing floor. Must lie strictly between 0 and 1.
    pub fn with_smoothing(mut self, smoothing: f64) -> Result<Self> {
        if !(smoothing > 0.0 && smoothing < 1.0) {
            return Err(Error::config(format!("smoothing floor must be in (0, 1), got {smoothing}")));
        }
        self.smoothing = smoothing;
        Ok(self)
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn num_tokens(&self) -> usize {
        self.num_tokens
    }

    pub fn num_tags(&self) -> usize {
        self.tags.len()
    }

    /// The all-sentinel window that conditions the first token.
    pub fn initial_context(&self) -> Context {
        Context::initial(self.order)
    }

    fn context_id(&mut self, context: &Context) -> usize {
        if let Some(&id) = self.context_ids.get(context) {
            return id;
        }
        let id = self.contexts.len();
        self.contexts.push(context.clone());
        self.context_ids.insert(context.clone(), id);
        self.transition.push(Vec::new());
        self.transition_total.push(0);
        id
    }

    /// Records one training token and returns the context for the next one.
    pub fn observe(&mut self, context: &Context, tag: &str, word: &str) -> Context {
        debug_assert_eq!(self.order, context.order(), "context order mismatch");
        self.num_tokens += 1;

        let t = self.tags.find_or_insert(tag);
        if t == self.emission.len() {
            self.emission.push(Vec::new());
            self.emission_total.push(0);
        }
        let w = self.words.find_or_insert(word);
        bump(&mut self.emission[t], w);
        self.emission_total[t] += 1;

        let c = self.context_id(context);
        bump(&mut self.transition[c], t);
        self.transition_total[c] += 1;

        context.shift(t)
    }

    /// Feeds a whole corpus as one sequence starting from the initial context.
    pub fn train(&mut self, corpus: &Corpus) {
        let mut context = self.initial_context();
        for token in corpus {
            context = self.observe(&context, &token.tag, &token.word);
        }
        log::debug!(
            "observed {} tokens, {} tags, {} words, {} contexts",
            self.num_tokens,
            self.tags.len(),
            self.words.len(),
            self.contexts.len()
        );
    }

    pub fn finish(self) -> Result<HmmModel> {
        if self.num_tokens == 0 {
            return Err(Error::EmptyCorpus);
        }
        let num_tags = self.tags.len();
        let num_words = self.words.len();

        let mut emission = vec![0; num_tags * num_words];
        for (t, row) in self.emission.iter().enumerate() {
            emission[num_words * t..num_words * t + row.len()].copy_from_slice(row);
        }
        let mut transition = vec![0; self.contexts.len() * num_tags];
        for (c, row) in self.transition.iter().enumerate() {
            transition[num_tags * c..num_tags * c + row.len()].copy_from_slice(row);
        }

        /* Initial probabilities: share of all tokens carrying the tag. */
        let initial: Vec<f64> =
            self.emission_total.iter().map(|&n| n as f64 / self.num_tokens as f64).collect();

        let mut contexts_ending_in = vec![Vec::new(); num_tags];
        for (c, ctx) in self.contexts.iter().enumerate() {
            if let Some(t) = ctx.last() {
                contexts_ending_in[t].push(c);
            }
        }

        for (t, tag) in self.tags.iter() {
            log::debug!("tag {tag}: {} tokens, p0 = {:.6}", self.emission_total[t], initial[t]);
        }

        Ok(HmmModel {
            order: self.order,
            smoothing: self.smoothing,
            tags: self.tags,
            words: self.words,
            contexts: self.contexts,
            context_ids: self.context_ids,
            emission,
            emission_total: self.emission_total,
            transition,
            transition_total: self.transition_total,
            initial,
            contexts_ending_in,
            num_tokens: self.num_tokens,
        })
    }
}
