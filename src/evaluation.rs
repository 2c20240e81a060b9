use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::Display,
    iter::zip,
};

use serde::Serialize;

use crate::error::{Error, Result};

/// Counts of gold tag versus predicted tag.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(transparent)]
pub struct ConfusionMatrix {
    cells: BTreeMap<String, BTreeMap<String, usize>>,
}

impl ConfusionMatrix {
    fn add(&mut self, gold: &str, predicted: &str) {
        *self
            .cells
            .entry(gold.to_string())
            .or_default()
            .entry(predicted.to_string())
            .or_default() += 1;
    }

    pub fn get(&self, gold: &str, predicted: &str) -> usize {
        self.cells.get(gold).and_then(|row| row.get(predicted)).copied().unwrap_or_default()
    }

    /// Number of evaluated tokens.
    pub fn total(&self) -> usize {
        self.cells.values().flat_map(|row| row.values()).sum()
    }

    /// Sum of the diagonal, i.e. correctly predicted tokens.
    pub fn correct(&self) -> usize {
        self.cells.iter().filter_map(|(gold, row)| row.get(gold)).sum()
    }

    /// Every tag that appears as gold or as prediction, sorted.
    pub fn labels(&self) -> BTreeSet<&str> {
        let mut labels = BTreeSet::new();
        for (gold, row) in &self.cells {
            labels.insert(gold.as_str());
            labels.extend(row.keys().map(String::as_str));
        }
        labels
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Label-wise performance values.
#[derive(Debug, Default, Clone, Serialize)]
pub struct LabelMeasure {
    /// Number of correct predictions.
    pub num_correct: usize,
    /// Number of occurrences of the label in the gold-standard data.
    pub num_observation: usize,
    /// Number of predictions.
    pub num_prediction: usize,
    pub precision: f64,
    pub recall: f64,
    pub fmeasure: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Estimation {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub fmeasure: f64,
}

/// Evaluator: accumulates a confusion matrix and derives accuracy figures.
#[derive(Debug, Default, Serialize)]
pub struct Evaluation {
    confusion: ConfusionMatrix,
    /// Array of label-wise evaluations.
    labels: BTreeMap<String, LabelMeasure>,
    item_total_correct: usize,
    item_total_num: usize,
    item_accuracy: f64,
    macro_precision: f64,
    macro_recall: f64,
    macro_fmeasure: f64,
}

impl Evaluation {
    /// Compares one predicted sequence against its gold tags.
    ///
    /// Nothing is recorded when the lengths differ.
    pub fn score<P: AsRef<str>, G: AsRef<str>>(&mut self, predicted: &[P], gold: &[G]) -> Result<()> {
        if predicted.len() != gold.len() {
            return Err(Error::LengthMismatch { predicted: predicted.len(), gold: gold.len() });
        }
        for (p, g) in zip(predicted, gold) {
            let (p, g) = (p.as_ref(), g.as_ref());
            self.confusion.add(g, p);
            self.labels.entry(g.to_string()).or_default().num_observation += 1;
            self.labels.entry(p.to_string()).or_default().num_prediction += 1;
            if p == g {
                self.labels.entry(g.to_string()).or_default().num_correct += 1;
            }
        }
        Ok(())
    }

    /// Recomputes the derived measures from the counts gathered so far.
    pub fn evaluate(&mut self) -> Estimation {
        self.item_total_num = self.confusion.total();
        self.item_total_correct = self.confusion.correct();
        self.macro_precision = 0.0;
        self.macro_recall = 0.0;
        self.macro_fmeasure = 0.0;

        let mut num_labels = 0;
        for lev in self.labels.values_mut() {
            lev.precision = 0.0;
            lev.recall = 0.0;
            lev.fmeasure = 0.0;

            if lev.num_prediction > 0 {
                lev.precision = lev.num_correct as f64 / lev.num_prediction as f64;
            }
            if lev.num_observation > 0 {
                lev.recall = lev.num_correct as f64 / lev.num_observation as f64;
            }
            if lev.precision + lev.recall > 0.0 {
                lev.fmeasure = lev.precision * lev.recall * 2.0 / (lev.precision + lev.recall);
            }
            /* Labels only ever predicted do not enter the macro average. */
            if lev.num_observation == 0 {
                continue;
            }
            num_labels += 1;
            self.macro_precision += lev.precision;
            self.macro_recall += lev.recall;
            self.macro_fmeasure += lev.fmeasure;
        }

        if num_labels > 0 {
            self.macro_precision /= num_labels as f64;
            self.macro_recall /= num_labels as f64;
            self.macro_fmeasure /= num_labels as f64;
        }
        self.item_accuracy = if self.item_total_num > 0 {
            self.item_total_correct as f64 / self.item_total_num as f64
        } else {
            0.0
        };
        Estimation {
            accuracy: self.item_accuracy,
            precision: self.macro_precision,
            recall: self.macro_recall,
            fmeasure: self.macro_fmeasure,
        }
    }

    pub fn confusion(&self) -> &ConfusionMatrix {
        &self.confusion
    }

    pub fn label(&self, label: &str) -> Option<&LabelMeasure> {
        self.labels.get(label)
    }

    pub fn num_correct(&self) -> usize {
        self.confusion.correct()
    }

    pub fn num_items(&self) -> usize {
        self.confusion.total()
    }
}

impl Display for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Performance by label (#match, #model, #ref) (precision, recall, F1):")?;
        for (label, lev) in &self.labels {
            if lev.num_observation == 0 {
                writeln!(
                    f,
                    "\t{}: ({}, {}, {}) (******, ******, ******)",
                    label, lev.num_correct, lev.num_prediction, lev.num_observation
                )?;
            } else {
                writeln!(
                    f,
                    "\t{}: ({}, {}, {}) ({:.4}, {:.4}, {:.4})",
                    label, lev.num_correct, lev.num_prediction, lev.num_observation, lev.precision, lev.recall, lev.fmeasure
                )?;
            }
        }
        writeln!(
            f,
            "Macro-average precision, recall, F1: ({:.4}, {:.4}, {:.4})",
            self.macro_precision, self.macro_recall, self.macro_fmeasure
        )?;
        writeln!(f, "Item accuracy: {}/{} => {:.4}", self.item_total_correct, self.item_total_num, self.item_accuracy)
    }
}
