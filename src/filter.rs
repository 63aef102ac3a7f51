//! Symbol filter registry.
//!
//! A filter is an interceptor keyed to a symbol name. Whenever a matched
//! route declares that symbol, every filter registered for it runs before
//! the handler, receiving the captured value. Filters pass data forward
//! through the request stash and can abort the pipeline by raising a
//! signal.

use std::collections::HashMap;

use crate::request::Request;
use crate::signal::Flow;

/// A registered symbol filter.
///
/// Receives the request, the value captured for the filter's own symbol,
/// and the values of the symbols declared before it in the route.
pub type Filter = Box<dyn Fn(&mut Request, &str, &[String]) -> Flow + Send + Sync>;

/// Maps symbol names to ordered filter chains.
#[derive(Default)]
pub struct FilterRegistry {
    filters: HashMap<String, Vec<Filter>>,
}

impl FilterRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Default::default()
    }

    /// Appends a filter to the chain for `symbol`.
    ///
    /// Filters for one symbol run in the order they were registered.
    pub fn on<F>(&mut self, symbol: impl Into<String>, filter: F)
    where
        F: Fn(&mut Request, &str, &[String]) -> Flow + Send + Sync + 'static,
    {
        self.filters
            .entry(symbol.into())
            .or_insert_with(Vec::new)
            .push(Box::new(filter));
    }

    /// Runs the filters applicable to a match: for each symbol in pattern
    /// order, every filter registered for that symbol, in registration
    /// order. The first raised signal aborts the rest.
    pub(crate) fn run(
        &self,
        req: &mut Request,
        symbols: &[String],
        values: &[String],
    ) -> Flow {
        for (idx, symbol) in symbols.iter().enumerate() {
            if let Some(chain) = self.filters.get(symbol) {
                for filter in chain {
                    filter(req, &values[idx], &values[..idx])?;
                }
            }
        }
        Ok(())
    }
}
