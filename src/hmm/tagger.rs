use serde::Serialize;

use super::model::HmmModel;
use crate::quark::StringTable;

/// How per-position tags are read off the lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Follow backpointers from the best final cell: the globally optimal path.
    #[default]
    Viterbi,
    /// Take the best cell at every position independently, no traceback.
    Greedy,
}

/// Decoded tag at one position with its lattice score (a log-probability).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub tag: usize,
    pub score: f64,
}

pub trait Tagger {
    /// One prediction per input word. Empty input gives empty output.
    fn decode(&self, words: &[&str]) -> Vec<Prediction>;
}

/// Per-position scores of the forward pass.
#[derive(Debug, Default, Clone)]
pub struct Lattice {
    num_labels: usize,
    num_items: usize,
    /**
     * Best path scores.
     *  This is a [T][L] matrix whose element [t][l] is the maximum summed
     *  log-probability of any tag prefix ending with label #l at #t.
     */
    score: Vec<f64>,
    /**
     * Backward edges.
     *  This is a [T][L] matrix whose element [t][j] is the label #i at #t-1
     *  that yields the maximum score to arrive at (t, j).
     */
    backward_edge: Vec<usize>,
}

impl Lattice {
    fn new(num_labels: usize, num_items: usize) -> Self {
        Self {
            num_labels,
            num_items,
            score: vec![0.0; num_labels * num_items],
            backward_edge: vec![0; num_labels * num_items],
        }
    }

    pub fn len(&self) -> usize {
        self.num_items
    }

    pub fn is_empty(&self) -> bool {
        self.num_items == 0
    }

    pub fn score(&self, t: usize, l: usize) -> f64 {
        self.score[self.num_labels * t + l]
    }

    pub fn row(&self, t: usize) -> &[f64] {
        &self.score[self.num_labels * t..self.num_labels * (t + 1)]
    }

    pub fn backward_edge(&self, t: usize, l: usize) -> usize {
        self.backward_edge[self.num_labels * t + l]
    }

    /// First label with the maximum score; ties go to the lower tag id.
    fn argmax(&self, t: usize) -> usize {
        let mut max_score = f64::NEG_INFINITY;
        let mut best = 0;
        for (l, &s) in self.row(t).iter().enumerate() {
            if max_score < s {
                max_score = s;
                best = l;
            }
        }
        best
    }
}

/// Sequence Decoder over a trained [`HmmModel`].
///
/// The model conditions transitions on contexts, while lattice states are
/// single tags. A move from previous tag #i to tag #j is scored with the best
/// transition among observed contexts whose newest slot is #i; for order 1
/// that is exactly the context `(i,)`. A tag that never conditioned anything
/// falls back to the smoothing floor.
pub struct HmmTagger<'a> {
    model: &'a HmmModel,
    strategy: Strategy,
    num_labels: usize,
    /// [L][L] log transition scores from previous tag #i to tag #j.
    trans: Vec<f64>,
}

impl<'a> HmmTagger<'a> {
    pub fn new(model: &'a HmmModel, strategy: Strategy) -> Self {
        let l = model.num_tags();
        let mut trans = vec![f64::NEG_INFINITY; l * l];
        for i in 0..l {
            let contexts = model.contexts_ending_in(i);
            for j in 0..l {
                trans[l * i + j] = if contexts.is_empty() {
                    model.transition_probability_by_id(None, j).ln()
                } else {
                    contexts
                        .iter()
                        .map(|&c| model.transition_probability_by_id(Some(c), j).ln())
                        .fold(f64::NEG_INFINITY, f64::max)
                };
            }
        }
        Self { model, strategy, num_labels: l, trans }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Runs the forward pass in log-space.
    pub fn lattice(&self, words: &[&str]) -> Lattice {
        let l_count = self.num_labels;
        let t_count = words.len();
        let mut lattice = Lattice::new(l_count, t_count);
        if t_count == 0 {
            return lattice;
        }
        let word_ids: Vec<Option<usize>> = words.iter().map(|w| self.model.words().to_id(w)).collect();

        /* Compute the scores at (0, *). */
        for j in 0..l_count {
            lattice.score[j] = self.model.initial_probability(j).ln();
        }
        /* Compute the scores at (t, *). */
        for t in 1..t_count {
            for j in 0..l_count {
                let mut max_score = f64::NEG_INFINITY;
                let mut argmax_score = 0;
                for i in 0..l_count {
                    /* Transit from (t-1, i) to (t, j). */
                    let score = lattice.score[l_count * (t - 1) + i] + self.trans[l_count * i + j];
                    if max_score < score {
                        max_score = score;
                        argmax_score = i;
                    }
                }
                lattice.backward_edge[l_count * t + j] = argmax_score;
                let emit = self.model.emission_probability_by_id(j, word_ids[t]).ln();
                lattice.score[l_count * t + j] = max_score + emit;
            }
        }
        lattice
    }

    fn viterbi(&self, lattice: &Lattice) -> Vec<Prediction> {
        let t_count = lattice.len();
        let mut labels = vec![0; t_count];
        labels[t_count - 1] = lattice.argmax(t_count - 1);
        /* Tag labels by tracing the backward links. */
        for t in (0..t_count - 1).rev() {
            labels[t] = lattice.backward_edge(t + 1, labels[t + 1]);
        }
        labels
            .into_iter()
            .enumerate()
            .map(|(t, tag)| Prediction { tag, score: lattice.score(t, tag) })
            .collect()
    }

    fn greedy(&self, lattice: &Lattice) -> Vec<Prediction> {
        (0..lattice.len())
            .map(|t| {
                let tag = lattice.argmax(t);
                Prediction { tag, score: lattice.score(t, tag) }
            })
            .collect()
    }

    /// Decodes and resolves tag ids to names.
    pub fn tag(&self, words: &[&str]) -> Vec<&'a str> {
        let tags = self.model.tags();
        self.decode(words).iter().filter_map(|p| tags.to_str(p.tag)).collect()
    }
}

impl<'a> Tagger for HmmTagger<'a> {
    fn decode(&self, words: &[&str]) -> Vec<Prediction> {
        if words.is_empty() {
            return Vec::new();
        }
        let lattice = self.lattice(words);
        let predictions = match self.strategy {
            Strategy::Viterbi => self.viterbi(&lattice),
            Strategy::Greedy => self.greedy(&lattice),
        };
        log::debug!("decoded {} words with {:?}", words.len(), self.strategy);
        predictions
    }
}
