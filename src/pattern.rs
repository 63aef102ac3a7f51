//! Route template compilation.
//!
//! A template is a path made of literal segments and `:name` placeholders,
//! optionally ending in a `*` segment that swallows the rest of the path:
//!
//! ```text
//! /blogs/:blog_id/posts/:id
//! /static/*
//! ```
//!
//! Compilation produces an anchored matcher with one capture group per
//! placeholder. Literal segments are escaped, so a `.` or `+` in a template
//! only ever matches itself.

use regex::Regex;

use crate::error::{Result, RouteError};

/// A compiled route template.
#[derive(Debug, Clone)]
pub struct Pattern {
    template: String,
    matcher: Regex,
    symbols: Vec<String>,
    wildcard: bool,
}

impl Pattern {
    /// Compile a route template.
    ///
    /// Fails if a symbol name is declared twice, if a placeholder has no
    /// name, or if a `*` segment is not the final segment.
    pub fn compile(template: &str) -> Result<Self> {
        let trimmed = template.strip_prefix('/').unwrap_or(template);
        let segments: Vec<&str> = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('/').collect()
        };

        let mut source = String::from("^");
        let mut symbols = Vec::new();
        let mut wildcard = false;

        for segment in &segments {
            if wildcard {
                return Err(RouteError::WildcardPosition {
                    template: template.to_string(),
                });
            }

            if *segment == "*" {
                source.push_str("/(.*)");
                wildcard = true;
            } else if let Some(name) = segment.strip_prefix(':') {
                if name.is_empty() {
                    return Err(RouteError::EmptySymbol {
                        template: template.to_string(),
                    });
                }
                if symbols.iter().any(|s| s == name) {
                    return Err(RouteError::DuplicateSymbol {
                        template: template.to_string(),
                        symbol: name.to_string(),
                    });
                }
                symbols.push(name.to_string());
                source.push_str("/([^/]+)");
            } else {
                source.push('/');
                source.push_str(&regex::escape(segment));
            }
        }

        if segments.is_empty() {
            source.push('/');
        }
        source.push('$');

        Ok(Self {
            template: template.to_string(),
            matcher: Regex::new(&source)?,
            symbols,
            wildcard,
        })
    }

    /// The original template string.
    #[inline]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Symbol names in declaration order.
    #[inline]
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Whether the template ends in a `*` segment.
    #[inline]
    pub fn has_wildcard(&self) -> bool {
        self.wildcard
    }

    /// Test a path against this pattern.
    ///
    /// On a match, returns the captured values in declaration order. The
    /// wildcard remainder, if any, comes last.
    pub fn matches(&self, path: &str) -> Option<Vec<String>> {
        let captures = self.matcher.captures(path)?;
        let mut values = Vec::with_capacity(captures.len() - 1);
        for i in 1..captures.len() {
            values.push(
                captures
                    .get(i)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default(),
            );
        }
        Some(values)
    }
}
