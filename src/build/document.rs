// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Corpus records and their normalized, indexable form.
//!
//! The crawler writes one JSON object per line. We only need five strings out
//! of it, so a record is flattened right after parsing and the section tree
//! is thrown away.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::Field;

/// One line of crawler output.
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct RawArticle {
    pub url: String,
    pub title: String,
    pub summary: String,
    pub sections: Vec<Section>,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Section {
    pub name: String,
    pub text: String,
    pub subsections: Vec<Subsection>,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Subsection {
    pub name: String,
    pub text: String,
}

/// The five indexable strings of an article.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedArticle {
    pub url: String,
    pub title: String,
    pub summary: String,
    /// Title, summary and every section/subsection name and body.
    pub all_text: String,
    /// Section names followed by their subsection names, one per line.
    pub section_name_text: String,
}

impl NormalizedArticle {
    /// Raw text of a field. For `url` this is the literal URL.
    pub fn field_text(&self, field: Field) -> &str {
        match field {
            Field::All => &self.all_text,
            Field::Title => &self.title,
            Field::Summary => &self.summary,
            Field::SectionName => &self.section_name_text,
            Field::Url => &self.url,
        }
    }
}

impl From<RawArticle> for NormalizedArticle {
    fn from(raw: RawArticle) -> Self {
        let mut section_text = String::new();
        let mut section_names: Vec<&str> = Vec::new();

        for section in &raw.sections {
            section_text.push_str(&section.name);
            section_text.push('\n');
            section_text.push_str(&section.text);
            section_text.push('\n');

            let subsections: Vec<String> = section
                .subsections
                .iter()
                .map(|sub| format!("{}\n{}\n", sub.name, sub.text))
                .collect();
            section_text.push_str(&subsections.join("\n"));
            section_text.push_str("\n\n");

            section_names.push(&section.name);
            section_names.extend(section.subsections.iter().map(|sub| sub.name.as_str()));
        }

        let all_text = format!("{}\n\n{}\n\n{}", raw.title, raw.summary, section_text);
        let section_name_text = section_names.join("\n");

        NormalizedArticle {
            url: raw.url,
            title: raw.title,
            summary: raw.summary,
            all_text,
            section_name_text,
        }
    }
}

/// Parse and normalize one corpus line.
///
/// `location` names the line in error messages (usually `file:line`).
pub fn parse_record(line: &str, location: &str) -> Result<NormalizedArticle> {
    serde_json::from_str::<RawArticle>(line)
        .map(NormalizedArticle::from)
        .map_err(|e| Error::MalformedRecord {
            location: location.to_string(),
            reason: e.to_string(),
        })
}
