use std::path::Path;

use hmmtag::{pipeline, Config, Corpus, Error, Evaluation, MalformedPolicy, Report, Strategy};

fn data(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data").join(name)
}

#[test]
fn run_end_to_end() {
    let _ = env_logger::builder().is_test(true).try_init();
    let report = pipeline::run(&Config::new(data("train.txt"), data("test.txt"))).unwrap();

    assert_eq!(34, report.model.num_tokens);
    let tags: Vec<&str> = report.model.tags.iter().map(|t| t.tag.as_str()).collect();
    assert_eq!(vec!["DET", "NOUN", "VERB", "ADP", "PUNCT", "ADJ"], tags);
    assert_eq!(9, report.model.tags[0].tokens);
    let sum: f64 = report.model.tags.iter().map(|t| t.initial_probability).sum();
    assert!((sum - 1.0).abs() < 1e-12);

    let confusion = report.evaluation.confusion();
    assert_eq!(14, confusion.total());
    assert_eq!(14, confusion.correct());
    assert_eq!(1.0, report.estimation.accuracy);
    assert_eq!(14, report.tokens.len());
}

#[test]
fn greedy_confusion() {
    let mut config = Config::new(data("train.txt"), data("test.txt"));
    config.strategy = Strategy::Greedy;
    let report = pipeline::run(&config).unwrap();
    let confusion = report.evaluation.confusion();
    assert_eq!(14, confusion.total());
    assert_eq!(13, confusion.correct());
    assert_eq!(1, confusion.get("NOUN", "ADJ"));

    let diagonal: usize = confusion.labels().iter().map(|l| confusion.get(l, l)).sum();
    assert_eq!(confusion.correct(), diagonal);
}

#[test]
fn empty_test_corpus() {
    let training: Corpus = include_str!("data/train.txt").parse().unwrap();
    let model = pipeline::train(&training, 1, hmmtag::SMOOTHING_FLOOR).unwrap();
    let report = Report::build(&model, &Corpus::default(), Strategy::Viterbi).unwrap();
    assert!(report.tokens.is_empty());
    assert_eq!(0, report.evaluation.confusion().total());
    assert_eq!(0.0, report.estimation.accuracy);
}

#[test]
fn missing_file_is_config_error() {
    let err = pipeline::run(&Config::new(data("train.txt"), data("nope.txt"))).unwrap_err();
    assert!(matches!(err, Error::Config(_)), "{err}");
}

#[test]
fn malformed_policy_applies_to_both_files() {
    let strict = Config::new(data("malformed.txt"), data("test.txt"));
    assert!(matches!(pipeline::run(&strict), Err(Error::MalformedToken { line: 1, .. })));

    let mut lenient = Config::new(data("train.txt"), data("malformed.txt"));
    lenient.malformed = MalformedPolicy::Lenient;
    let report = pipeline::run(&lenient).unwrap();
    assert_eq!(2, report.tokens.len());
}

#[test]
fn length_mismatch() {
    let mut evaluation = Evaluation::default();
    let err = evaluation.score(&["DET"], &["DET", "NOUN"]).unwrap_err();
    assert!(matches!(err, Error::LengthMismatch { predicted: 1, gold: 2 }));
}

#[test]
fn text_and_json_reports() {
    let report = pipeline::run(&Config::new(data("train.txt"), data("test.txt"))).unwrap();

    let mut text = Vec::new();
    report.write_text(&mut text, false).unwrap();
    let text = String::from_utf8(text).unwrap();
    assert!(text.starts_with("Total number of words read: 34\n"));
    assert!(text.contains("POS Tag  POS Tokens  POS Probability"));
    assert!(text.contains("tree\tNOUN\tNOUN\t"));
    assert!(text.contains("Item accuracy: 14/14"));
    assert!(text.contains("Total: 14, correct: 14"));

    let mut quiet = Vec::new();
    report.write_text(&mut quiet, true).unwrap();
    assert!(!String::from_utf8(quiet).unwrap().contains("tree\t"));

    let mut json = Vec::new();
    report.write_json(&mut json).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
    assert_eq!("viterbi", value["strategy"]);
    assert_eq!(14, value["tokens"].as_array().unwrap().len());
    assert_eq!(Some(4), value["evaluation"]["confusion"]["DET"]["DET"].as_u64());
}
