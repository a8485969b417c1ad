//! Turn LLM highlight HTML into BIO tag sequences and score them against gold
//! labels.
//!
//! ```
//! use llm_ner_align::nlp::{parse_single_label, Document};
//!
//! let doc = Document::new(
//!     "Patient takes aspirin 10mg daily",
//!     "O O B-Drug B-Dosage B-Frequency",
//!     r#"Patient takes aspirin 10mg <span style="background-color: #FFFF00">daily</span>"#,
//! );
//! let tags = parse_single_label(&[doc]).unwrap();
//! assert_eq!(tags.predicted[0], ["O", "O", "O", "O", "B"]);
//! ```

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod nlp;

pub use error::{Error, Result};
