//! Infrastructure layer for ghostlog
//!
//! Tree-sitter plumbing and plain-text helpers.

pub mod ast;
pub mod text;

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Hash content for cache invalidation
#[inline]
pub fn hash_content(content: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    hasher.finish()
}
