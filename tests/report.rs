use llm_ner_align::{
    metrics::{
        chunks::{chunks, Chunk},
        classification_report, EntityScorer, EvalMode,
    },
    Error,
};

fn seqs(rows: &[&str]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|r| r.split(' ').map(str::to_string).collect())
        .collect()
}

fn chunk(label: &str, start: usize, end: usize) -> Chunk {
    Chunk {
        label: label.into(),
        start,
        end,
    }
}

#[test]
fn inside_after_outside_opens_a_chunk() {
    let found = chunks(&["O", "I-Drug", "I-Drug", "B-Drug", "I-Route"]).unwrap();
    assert_eq!(
        found,
        vec![chunk("Drug", 1, 3), chunk("Drug", 3, 4), chunk("Route", 4, 5)]
    );
}

#[test]
fn bare_tags_use_untyped_label() {
    let found = chunks(&["B", "I", "O", "B"]).unwrap();
    assert_eq!(found, vec![chunk("ENTITY", 0, 2), chunk("ENTITY", 3, 4)]);
}

#[test]
fn malformed_tags_are_rejected() {
    for bad in ["X", "B-", "Bx", ""] {
        assert!(matches!(chunks(&[bad]), Err(Error::InvalidTag(_))), "{bad:?}");
    }
}

#[test]
fn strict_requires_exact_boundaries() {
    let truth = seqs(&["B-Drug I-Drug O B-Route"]);
    let pred = seqs(&["B-Drug O O B-Route"]);
    let report = classification_report(&truth, &pred, EvalMode::Strict, &EntityScorer).unwrap();

    let drug = report.label("Drug").unwrap();
    assert_eq!(drug.precision, 0.0);
    assert_eq!(drug.recall, 0.0);
    let route = report.label("Route").unwrap();
    assert_eq!(route.f1, 1.0);
    assert_eq!(report.micro_avg.precision, 0.5);
    assert_eq!(report.micro_avg.recall, 0.5);
    assert_eq!(report.macro_avg.f1, 0.5);
}

#[test]
fn lenient_credits_overlap() {
    let truth = seqs(&["B-Drug I-Drug O B-Route"]);
    let pred = seqs(&["B-Drug O O B-Route"]);
    let report = classification_report(&truth, &pred, EvalMode::Lenient, &EntityScorer).unwrap();
    assert_eq!(report.label("Drug").unwrap().f1, 1.0);
    assert_eq!(report.micro_avg.f1, 1.0);
}

#[test]
fn lenient_still_requires_same_label() {
    let truth = seqs(&["B-Drug I-Drug"]);
    let pred = seqs(&["B-Form I-Form"]);
    let report = classification_report(&truth, &pred, EvalMode::Lenient, &EntityScorer).unwrap();
    assert_eq!(report.label("Drug").unwrap().recall, 0.0);
    assert_eq!(report.label("Form").unwrap().precision, 0.0);
    assert_eq!(report.label("Form").unwrap().support, 0);
}

#[test]
fn labels_are_sorted() {
    let truth = seqs(&["B-Route B-Drug B-Ade"]);
    let report =
        classification_report(&truth, &truth, EvalMode::Strict, &EntityScorer).unwrap();
    let names: Vec<_> = report.labels.keys().cloned().collect();
    assert_eq!(names, ["Ade", "Drug", "Route"]);
}

#[test]
fn documents_are_flattened_in_order() {
    let truth = seqs(&["O B-Drug", "I-Drug O"]);
    let pred = seqs(&["O B-Drug", "O O"]);
    let report = classification_report(&truth, &pred, EvalMode::Strict, &EntityScorer).unwrap();
    let drug = report.label("Drug").unwrap();
    assert_eq!(drug.support, 1);
    assert_eq!(drug.precision, 0.0);
}

#[test]
fn unequal_totals_are_rejected() {
    let truth = seqs(&["O O", "O"]);
    let pred = seqs(&["O O"]);
    let err = classification_report(&truth, &pred, EvalMode::Lenient, &EntityScorer).unwrap_err();
    assert!(matches!(err, Error::LengthMismatch { truth: 3, pred: 2 }));
}

#[test]
fn no_entities_scores_zero() {
    let truth = seqs(&["O O"]);
    let report = classification_report(&truth, &truth, EvalMode::Strict, &EntityScorer).unwrap();
    assert!(report.labels.is_empty());
    assert_eq!(report.micro_avg.f1, 0.0);
}

#[test]
fn rendered_report_lists_labels_and_averages() {
    let truth = seqs(&["B I O"]);
    let report = classification_report(&truth, &truth, EvalMode::Strict, &EntityScorer).unwrap();
    let text = report.to_string();
    assert!(text.starts_with("mode: strict"));
    assert!(text.contains("ENTITY"));
    assert!(text.contains("micro avg"));
    assert!(text.contains("1.0000"));
}

#[test]
fn report_serializes_to_json() {
    let truth = seqs(&["B-Drug"]);
    let report = classification_report(&truth, &truth, EvalMode::Lenient, &EntityScorer).unwrap();
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["mode"], "lenient");
    assert_eq!(value["labels"]["Drug"]["support"], 1);
}

#[test]
fn csv_export_has_averages() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.csv");
    let truth = seqs(&["B-Drug O B-Route"]);
    let report = classification_report(&truth, &truth, EvalMode::Strict, &EntityScorer).unwrap();
    report.write_csv(&path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = written.lines().collect();
    assert_eq!(lines[0], "label,precision,recall,f1,support,predicted");
    assert_eq!(lines.len(), 5);
    assert!(lines[3].starts_with("micro avg,"));
}

#[test]
fn mode_parses_case_insensitively() {
    assert_eq!("STRICT".parse::<EvalMode>().unwrap(), EvalMode::Strict);
    assert_eq!(EvalMode::default(), EvalMode::Lenient);
    assert!("fuzzy".parse::<EvalMode>().is_err());
}
