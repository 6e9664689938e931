//! Whole text bodies: every paragraph and run of a `txBody`, with auto
//! numbering carried across paragraphs.

use super::{RUN_ELEMENTS, ResolvedStyle, StyleCascadeResolver};
use crate::bullet::CounterTable;
use crate::tree::Node;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedRun {
    pub text: String,
    pub style: ResolvedStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedParagraph {
    pub style: ResolvedStyle,
    pub runs: Vec<ResolvedRun>,
}

impl ResolvedParagraph {
    /// Concatenated run text, line breaks included.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// Resolves text bodies paragraph by paragraph.
pub struct TextBodyResolver<'c, 'a> {
    styles: StyleCascadeResolver<'c, 'a>,
    counters: CounterTable,
}

impl<'c, 'a> TextBodyResolver<'c, 'a> {
    pub fn new(styles: StyleCascadeResolver<'c, 'a>) -> Self {
        Self {
            styles,
            counters: CounterTable::new(),
        }
    }

    /// Resolve the text body of `owner` (a shape or table cell).
    ///
    /// `ancestors` leads down to `owner`. Numbering restarts for every body.
    pub fn resolve_body<'n>(&mut self, owner: &'n Node, ancestors: &[&'n Node]) -> Vec<ResolvedParagraph>
    where
        'a: 'n,
    {
        self.counters.reset();
        let Some(body) = owner.child("txBody") else {
            return Vec::new();
        };

        let mut path: Vec<&'n Node> = ancestors.to_vec();
        path.extend([owner, body]);

        let mut paragraphs = Vec::new();
        for p in body.children_named("p") {
            let style = self.styles.resolve_with(p, &path, &mut self.counters);

            path.push(p);
            let runs = p
                .children()
                .iter()
                .filter(|c| RUN_ELEMENTS.contains(&c.name()))
                .map(|run| ResolvedRun {
                    text: run_text(run),
                    style: self.styles.resolve(run, &path),
                })
                .collect();
            path.pop();

            paragraphs.push(ResolvedParagraph { style, runs });
        }
        tracing::trace!(paragraphs = paragraphs.len(), "resolved text body");
        paragraphs
    }
}

fn run_text(run: &Node) -> String {
    if run.is("br") {
        return "\n".to_string();
    }
    run.child("t").map(|t| t.text().to_string()).unwrap_or_default()
}
