use std::path::Path;

use llm_ner_align::{
    data::{write_frame, DocumentTable},
    nlp::parse_single_label,
    Error,
};

const DOCS_CSV: &str = r#"text,labels,gpt4
Patient takes aspirin 10mg daily,O O O O B,"Patient takes aspirin 10mg <span style=""background-color: #FFFF00"">daily</span>"
no findings,O O,no findings
"#;

fn write_docs(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("docs.csv");
    std::fs::write(&path, DOCS_CSV).unwrap();
    path
}

#[test]
fn csv_rows_become_documents() {
    let dir = tempfile::tempdir().unwrap();
    let table = DocumentTable::load(&write_docs(dir.path()), "text", "labels").unwrap();
    assert_eq!(table.height(), 2);

    let docs = table.documents("gpt4").unwrap();
    assert_eq!(docs[1].text, "no findings");
    assert!(docs[0].html.contains(r#"<span style="background-color: #FFFF00">daily"#));
}

#[test]
fn missing_html_column_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let table = DocumentTable::load(&write_docs(dir.path()), "text", "labels").unwrap();
    let err = table.documents("gpt35").unwrap_err();
    assert!(matches!(err, Error::MissingColumn(name) if name == "gpt35"));
}

#[test]
fn tag_columns_round_trip_through_csv() {
    let dir = tempfile::tempdir().unwrap();
    let mut table = DocumentTable::load(&write_docs(dir.path()), "text", "labels").unwrap();
    let tags = parse_single_label(&table.documents("gpt4").unwrap()).unwrap();
    table.with_tags("gpt4", &tags).unwrap();

    let out = dir.path().join("out/docs.tags.csv");
    write_frame(&mut table.frame, &out).unwrap();

    let reloaded = DocumentTable::load(&out, "text", "labels").unwrap();
    let pred = reloaded.tag_sequences("gpt4_pred").unwrap();
    let gold = reloaded.tag_sequences("gpt4_gt").unwrap();
    assert_eq!(pred, vec![vec!["O", "O", "O", "O", "B"], vec!["O", "O"]]);
    assert_eq!(gold, pred);
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("docs.txt");
    std::fs::write(&path, DOCS_CSV).unwrap();
    let err = DocumentTable::load(&path, "text", "labels").unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat(_)));
}
