use hmmtag::{Context, Corpus, HmmModel, HmmTrainer, StringTable, Strategy, Tagger, SMOOTHING_FLOOR};

fn train(text: &str, order: usize) -> HmmModel {
    let corpus: Corpus = text.parse().expect("failed to parse corpus");
    let mut trainer = HmmTrainer::new(order);
    trainer.train(&corpus);
    trainer.finish().expect("failed to finish model")
}

#[test]
fn round_trip() {
    let model = train("the_DET cat_NOUN sat_VERB", 1);
    let tagger = model.tagger(Strategy::Viterbi);
    let words = ["the", "cat", "sat"];
    assert_eq!(vec!["DET", "NOUN", "VERB"], tagger.tag(&words));

    let predictions = tagger.decode(&words);
    for pair in predictions.windows(2) {
        assert!(pair[1].score <= pair[0].score, "{:?}", predictions);
    }
    for p in &predictions {
        assert!(p.score.is_finite() && p.score <= 0.0);
    }
}

#[test]
fn alternating_scenario() {
    let model = train("a_A b_B a_A b_B", 1);
    let a = model.tags().to_id("A").unwrap();
    let b = model.tags().to_id("B").unwrap();
    assert_eq!(1.0, model.emission_probability(a, "a"));
    assert_eq!(1.0, model.transition_probability(&Context::initial(1).shift(a), b));
    assert_eq!(1.0, model.transition_probability(&Context::initial(1), a));
    assert_eq!(SMOOTHING_FLOOR / 2.0, model.emission_probability(a, "b"));
    assert_eq!(SMOOTHING_FLOOR / 2.0, model.transition_probability(&Context::initial(1).shift(a), a));
}

#[test]
fn decode_is_idempotent() {
    let model = train(include_str!("data/train.txt"), 1);
    let test: Corpus = include_str!("data/test.txt").parse().unwrap();
    let words = test.words();
    for strategy in [Strategy::Viterbi, Strategy::Greedy] {
        let tagger = model.tagger(strategy);
        assert_eq!(tagger.decode(&words), tagger.decode(&words));
    }
}

#[test]
fn empty_input_is_empty_output() {
    let model = train(include_str!("data/train.txt"), 1);
    for strategy in [Strategy::Viterbi, Strategy::Greedy] {
        assert!(model.tagger(strategy).decode(&[]).is_empty());
    }
}

#[test]
fn viterbi_recovers_unknown_word_from_context() {
    let model = train(include_str!("data/train.txt"), 1);
    let test: Corpus = include_str!("data/test.txt").parse().unwrap();
    let words = test.words();

    let viterbi = model.tagger(Strategy::Viterbi).tag(&words);
    assert_eq!(test.tags(), viterbi);

    /* "tree" was never seen; the greedy readout lets the smaller ADJ total win. */
    let greedy = model.tagger(Strategy::Greedy).tag(&words);
    let tree = words.iter().position(|w| *w == "tree").unwrap();
    assert_eq!("ADJ", greedy[tree]);
    assert_eq!(viterbi[..tree], greedy[..tree]);
}

#[test]
fn second_order_contexts() {
    let model = train(include_str!("data/train.txt"), 2);
    assert_eq!(2, model.order());
    let test: Corpus = include_str!("data/test.txt").parse().unwrap();
    let tagged = model.tagger(Strategy::Viterbi).tag(&test.words());
    assert_eq!(test.tags(), tagged);
}

#[test]
fn only_trained_tags_are_predicted() {
    let model = train("the_DET cat_NOUN", 1);
    let tagged = model.tagger(Strategy::Viterbi).tag(&["zebra", "quux", "the"]);
    assert_eq!(3, tagged.len());
    assert!(tagged.iter().all(|t| *t == "DET" || *t == "NOUN"));
}

#[test]
fn custom_smoothing_floor() {
    let corpus: Corpus = "a_A b_B".parse().unwrap();
    let mut trainer = HmmTrainer::new(1).with_smoothing(1e-3).unwrap();
    trainer.train(&corpus);
    let model = trainer.finish().unwrap();
    let a = model.tags().to_id("A").unwrap();
    assert_eq!(1e-3, model.smoothing());
    assert_eq!(1e-3, model.emission_probability(a, "b"));
}
