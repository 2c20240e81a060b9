use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::Path,
};

use rand::Rng;

use crate::{
    error::Result,
    hmm::context::Context,
    quark::{Quark, StringTable, TextVectorizer},
};

/// Order-`n` Markov chain over words for random text generation.
///
/// Successor counts are keyed by the same sliding [`Context`] the tagger
/// uses for tags, here holding word ids.
#[derive(Debug)]
pub struct NGramModel {
    order: usize,
    words: Quark,
    contexts: Vec<Context>,
    context_ids: HashMap<Context, usize>,
    /// [context] -> word id -> count
    successors: Vec<BTreeMap<usize, usize>>,
    totals: Vec<usize>,
}

impl NGramModel {
    pub fn new(order: usize) -> Self {
        Self {
            order,
            words: Quark::default(),
            contexts: Vec::new(),
            context_ids: HashMap::new(),
            successors: Vec::new(),
            totals: Vec::new(),
        }
    }

    pub fn from_text(text: &str, order: usize) -> Self {
        let mut model = Self::new(order);
        model.train(text.split_whitespace());
        model
    }

    pub fn read_file<P: AsRef<Path>>(path: P, order: usize) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let model = Self::from_text(&text, order);
        log::info!(
            "n-gram model from {}: {} words, {} contexts",
            path.as_ref().display(),
            model.words.len(),
            model.contexts.len()
        );
        Ok(model)
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn num_contexts(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    pub fn words(&self) -> &Quark {
        &self.words
    }

    /// Records `word` as a successor of `context`; returns the next context.
    pub fn observe(&mut self, context: &Context, word: &str) -> Context {
        let c = match self.context_ids.get(context) {
            Some(&c) => c,
            None => {
                let c = self.contexts.len();
                self.contexts.push(context.clone());
                self.context_ids.insert(context.clone(), c);
                self.successors.push(BTreeMap::new());
                self.totals.push(0);
                c
            }
        };
        let w = self.words.find_or_insert(word);
        *self.successors[c].entry(w).or_default() += 1;
        self.totals[c] += 1;
        context.shift(w)
    }

    pub fn train<'a, I: IntoIterator<Item = &'a str>>(&mut self, words: I) {
        let mut context = Context::initial(self.order);
        for word in words {
            context = self.observe(&context, word);
        }
    }

    /// Successor word counts of an observed context.
    pub fn successors(&self, context: &Context) -> Option<&BTreeMap<usize, usize>> {
        self.context_ids.get(context).map(|&c| &self.successors[c])
    }

    /// Uniformly random observed context id.
    fn select_context<R: Rng>(&self, rng: &mut R) -> usize {
        rng.gen_range(0..self.contexts.len())
    }

    /// Word id drawn proportionally to its successor count.
    fn select_word<R: Rng>(&self, c: usize, rng: &mut R) -> usize {
        let successors = &self.successors[c];
        let num = rng.gen_range(1..=self.totals[c]);
        let mut high = 0;
        for (&w, &count) in successors {
            high += count;
            if num <= high {
                return w;
            }
        }
        // Unreachable while totals match the counts.
        *successors.keys().next().unwrap_or(&0)
    }

    /// Generates `length` words. A context with no successors restarts the
    /// walk from a random observed context.
    pub fn generate<R: Rng>(&self, length: usize, rng: &mut R) -> Vec<&str> {
        let mut output = Vec::with_capacity(length);
        if self.is_empty() {
            return output;
        }
        let mut c = self.select_context(rng);
        while output.len() < length {
            let w = self.select_word(c, rng);
            output.push(self.words.to_str(w).unwrap_or_default());
            let next = self.contexts[c].shift(w);
            c = match self.context_ids.get(&next) {
                Some(&id) => id,
                None => {
                    log::debug!("dead end at {next}, restarting");
                    self.select_context(rng)
                }
            };
        }
        output
    }
}
