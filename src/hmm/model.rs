use std::collections::HashMap;

use super::{
    context::Context,
    tagger::{HmmTagger, Strategy},
};
use crate::quark::{Quark, StringTable};

/// Trained first-order HMM: frozen counts plus the Probability Estimator.
///
/// Built by [`super::trainer::HmmTrainer::finish`]. All tables are dense and
/// indexed by registry ids; per-row totals are kept next to the rows so no
/// probability lookup ever re-sums.
#[derive(Debug)]
pub struct HmmModel {
    pub(super) order: usize,
    pub(super) smoothing: f64,
    pub(super) tags: Quark,
    pub(super) words: Quark,
    pub(super) contexts: Vec<Context>,
    pub(super) context_ids: HashMap<Context, usize>,
    /**
     * Emission counts.
     *  This is a [L][W] matrix whose element [t][w] is the number of times
     *  word #w was observed with tag #t.
     */
    pub(super) emission: Vec<usize>,
    pub(super) emission_total: Vec<usize>,
    /**
     * Transition counts.
     *  This is a [C][L] matrix whose element [c][t] is the number of times
     *  tag #t followed context #c.
     */
    pub(super) transition: Vec<usize>,
    pub(super) transition_total: Vec<usize>,
    pub(super) initial: Vec<f64>,
    /// For each tag, the ids of observed contexts whose newest slot is that tag.
    pub(super) contexts_ending_in: Vec<Vec<usize>>,
    pub(super) num_tokens: usize,
}

impl HmmModel {
    pub fn order(&self) -> usize {
        self.order
    }

    pub fn smoothing(&self) -> f64 {
        self.smoothing
    }

    pub fn tags(&self) -> &Quark {
        &self.tags
    }

    pub fn words(&self) -> &Quark {
        &self.words
    }

    pub fn num_tags(&self) -> usize {
        self.tags.len()
    }

    pub fn num_words(&self) -> usize {
        self.words.len()
    }

    pub fn num_tokens(&self) -> usize {
        self.num_tokens
    }

    pub fn contexts(&self) -> &[Context] {
        &self.contexts
    }

    pub fn context_id(&self, context: &Context) -> Option<usize> {
        self.context_ids.get(context).copied()
    }

    pub fn contexts_ending_in(&self, tag: usize) -> &[usize] {
        &self.contexts_ending_in[tag]
    }

    /// Total emission count of a tag, i.e. how many training tokens carried it.
    pub fn tag_count(&self, tag: usize) -> usize {
        self.emission_total[tag]
    }

    pub fn emission_count(&self, tag: usize, word: usize) -> usize {
        self.emission[self.num_words() * tag + word]
    }

    pub fn transition_count(&self, context: usize, tag: usize) -> usize {
        self.transition[self.num_tags() * context + tag]
    }

    pub fn initial_probabilities(&self) -> &[f64] {
        &self.initial
    }

    pub fn initial_probability(&self, tag: usize) -> f64 {
        self.initial[tag]
    }

    /// P(word | tag). Unknown words and unseen pairs use the smoothing floor as numerator.
    pub fn emission_probability(&self, tag: usize, word: &str) -> f64 {
        self.emission_probability_by_id(tag, self.words.to_id(word))
    }

    pub fn emission_probability_by_id(&self, tag: usize, word: Option<usize>) -> f64 {
        let count = word.map_or(0, |w| self.emission_count(tag, w));
        let numerator = if count > 0 { count as f64 } else { self.smoothing };
        numerator / self.emission_total[tag] as f64
    }

    /// P(tag | context). Unseen pairs use the smoothing floor as numerator.
    pub fn transition_probability(&self, context: &Context, tag: usize) -> f64 {
        self.transition_probability_by_id(self.context_id(context), tag)
    }

    /// A context never observed during training has no total to divide by;
    /// it yields the bare smoothing floor.
    pub fn transition_probability_by_id(&self, context: Option<usize>, tag: usize) -> f64 {
        let Some(c) = context else {
            return self.smoothing;
        };
        let total = self.transition_total[c];
        if total == 0 {
            return self.smoothing;
        }
        let count = self.transition_count(c, tag);
        let numerator = if count > 0 { count as f64 } else { self.smoothing };
        numerator / total as f64
    }

    pub fn tagger(&self, strategy: Strategy) -> HmmTagger<'_> {
        HmmTagger::new(self, strategy)
    }
}
