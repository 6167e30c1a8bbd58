use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One source link, 1-indexed by its position in the sorted list.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Citation {
    pub rank: usize,
    pub url: String,
}

/// Render-ready list of the distinct sources behind one answer.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CitationBlock {
    pub entries: Vec<Citation>,
}

/// Collapse duplicate source urls and order the rest ascending by plain
/// string comparison, independent of retrieval ranking. Output is the
/// same for any iteration order of the same set.
pub fn format_sources(sources: impl IntoIterator<Item = String>) -> CitationBlock {
    let distinct: BTreeSet<String> = sources.into_iter().collect();
    let entries = distinct
        .into_iter()
        .enumerate()
        .map(|(i, url)| Citation { rank: i + 1, url })
        .collect();
    CitationBlock { entries }
}

impl CitationBlock {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Enumerated link list wrapped in a bounded-height scrollable
    /// container. Returns an empty string when there are no sources so
    /// the caller can suppress the disclosure control.
    pub fn to_html(&self) -> String {
        if self.entries.is_empty() {
            return String::new();
        }
        let mut out = String::from("<div class=\"source-container\">\n");
        for citation in &self.entries {
            out.push_str(&format!(
                "{}. <a href='{}' target='_blank'>{}</a><br>\n",
                citation.rank, citation.url, citation.url
            ));
        }
        out.push_str("</div>");
        out
    }
}
