use llm_ner_align::{
    cli::Scheme,
    nlp::{parse_documents, parse_multi_label, parse_single_label, Document},
    Error,
};
use proptest::prelude::*;

fn span(hex: &str, phrase: &str) -> String {
    format!(r#"<span style="background-color: {hex}">{phrase}</span>"#)
}

#[test]
fn yellow_daily_is_tagged_without_type() {
    let doc = Document::new(
        "Patient takes aspirin 10mg daily",
        "O O B-Drug B-Dosage B-Frequency",
        format!("Patient takes aspirin 10mg {}", span("#FFFF00", "daily")),
    );
    let tags = parse_single_label(&[doc]).unwrap();
    assert_eq!(tags.predicted, vec![vec!["O", "O", "O", "O", "B"]]);
    assert_eq!(
        tags.ground_truth,
        vec![vec!["O", "O", "B-Drug", "B-Dosage", "B-Frequency"]]
    );
}

#[test]
fn single_label_ignores_other_colors() {
    let doc = Document::new(
        "aspirin daily",
        "O O",
        format!("{} {}", span("#808080", "aspirin"), span("#FFFF00", "daily")),
    );
    let tags = parse_single_label(&[doc]).unwrap();
    assert_eq!(tags.predicted[0], ["O", "B"]);
}

#[test]
fn multi_label_tags_carry_entity_names() {
    let html = format!(
        "take {} {} {} {}",
        span("#808080", "aspirin"),
        span("#0000FF", "81 mg"),
        span("#FFA500", "po"),
        span("#FFFF00", "daily"),
    );
    let doc = Document::new(
        "take aspirin 81 mg po daily",
        "O B-Drug B-Strength I-Strength B-Route B-Frequency",
        html,
    );
    let tags = parse_multi_label(&[doc]).unwrap();
    insta::assert_debug_snapshot!(tags.predicted[0], @r###"
    [
        "O",
        "B-Drug",
        "B-Strength",
        "I-Strength",
        "B-Route",
        "B-Frequency",
    ]
    "###);
}

#[test]
fn later_palette_color_overwrites_earlier_one() {
    // Drug is highlighted first in the HTML but comes last in the palette.
    let html = format!("{} {}", span("#808080", "aspirin"), span("#FF0000", "aspirin"));
    let doc = Document::new("aspirin", "B-Drug", html);
    let tags = parse_multi_label(&[doc]).unwrap();
    assert_eq!(tags.predicted[0], ["B-Drug"]);

    let html = format!("{} {}", span("#FFA500", "po tab"), span("#FF0000", "tab"));
    let doc = Document::new("po tab", "B-Route B-Form", html);
    let tags = parse_multi_label(&[doc]).unwrap();
    assert_eq!(tags.predicted[0], ["B-Route", "I-Route"]);
}

#[test]
fn each_color_restarts_its_own_cursor() {
    let html = format!("{} {}", span("#FFFF00", "daily"), span("#808080", "aspirin"));
    let doc = Document::new("aspirin daily", "B-Drug B-Frequency", html);
    let tags = parse_multi_label(&[doc]).unwrap();
    assert_eq!(tags.predicted[0], ["B-Drug", "B-Frequency"]);
}

#[test]
fn token_label_mismatch_aborts_batch() {
    let docs = vec![
        Document::new("a b", "O O", ""),
        Document::new("a b c", "O O", ""),
    ];
    for scheme in [Scheme::SingleLabel, Scheme::MultiLabel] {
        let err = parse_documents(&docs, scheme).unwrap_err();
        assert!(matches!(
            err,
            Error::TokenCountMismatch {
                row: 1,
                tokens: 3,
                labels: 2
            }
        ));
    }
}

#[test]
fn unclosed_span_aborts_batch() {
    let doc = Document::new("a", "O", r#"<span style="background-color: #808080">a"#);
    assert!(matches!(
        parse_multi_label(&[doc]),
        Err(Error::UnclosedSpan { .. })
    ));
}

fn document_strategy() -> impl Strategy<Value = (Vec<String>, Vec<bool>)> {
    prop::collection::vec("[a-z()\\-]{1,6}", 1..20).prop_flat_map(|tokens| {
        let n = tokens.len();
        (Just(tokens), prop::collection::vec(any::<bool>(), n))
    })
}

proptest! {
    #[test]
    fn prediction_length_matches_token_count((tokens, marked) in document_strategy()) {
        let text = tokens.join(" ");
        let labels = vec!["O"; tokens.len()].join(" ");
        let html = tokens
            .iter()
            .zip(&marked)
            .map(|(t, m)| if *m { span("#FFFF00", t) } else { t.clone() })
            .collect::<Vec<_>>()
            .join(" ");
        let doc = Document::new(text, labels, html);
        for scheme in [Scheme::SingleLabel, Scheme::MultiLabel] {
            let tags = parse_documents(std::slice::from_ref(&doc), scheme).unwrap();
            prop_assert_eq!(tags.predicted[0].len(), tokens.len());
            prop_assert_eq!(tags.ground_truth[0].len(), tokens.len());
        }
    }

    #[test]
    fn absent_phrase_never_tags(words in prop::collection::vec("[a-z]{1,8}", 1..20)) {
        let text = words.join(" ");
        let labels = vec!["O"; words.len()].join(" ");
        let html = span("#FFFF00", "ABSENT");
        let tags = parse_single_label(&[Document::new(text, labels, html)]).unwrap();
        prop_assert!(tags.predicted[0].iter().all(|t| t == "O"));
    }
}
