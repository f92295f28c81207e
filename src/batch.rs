//! Parse many buffers at once.
//!
//! Each rayon worker builds its own [`Parser`] from the shared grammar, so
//! no mutable state crosses threads. Trees come back in input order.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;

use crate::error::Error;
use crate::grammar::Grammar;
use crate::parser::Parser;
use crate::syntax::SyntaxTree;

/// Parses every source in parallel.
///
/// The first failing parse (allocation or an oversized source) fails the
/// whole batch.
pub fn parse_batch<S>(grammar: &Arc<Grammar>, sources: &[S]) -> Result<Vec<SyntaxTree>, Error>
where
    S: AsRef<str> + Sync,
{
    debug!(count = sources.len(), "batch parse");
    sources
        .par_iter()
        .map_init(
            || Parser::new(Arc::clone(grammar)),
            |parser, source| match parser {
                Ok(parser) => parser.parse(source.as_ref(), None),
                Err(err) => Err(err.clone()),
            },
        )
        .collect()
}
