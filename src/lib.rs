//! A PATRICIA trie (radix tree) set for hierarchical, path-like keys.
//!
//! `pathset` stores large sets of byte-string keys with heavy shared
//! prefixes, such as file paths or namespaced identifiers. There is no
//! payload per key; the structure answers existence, prefix, and
//! directory-style segment queries:
//!
//! - exact-match lookup and idempotent insertion with node splitting,
//! - cascading deletion of a key and everything stored beneath it,
//! - full prefix enumeration (every key under a prefix), and
//! - partial prefix enumeration (one entry per delimiter-bounded segment).
//!
//! ## Example
//!
//! ```rust
//! use pathset::{PathSet, ResultSink};
//!
//! let mut set = PathSet::new();
//! set.insert("usr/bin/env").unwrap();
//! set.insert("usr/bin/cat").unwrap();
//! set.insert("usr/lib/libc.so").unwrap();
//! set.insert("usr/lib/zlib.so").unwrap();
//!
//! assert!(set.contains("usr/bin/cat"));
//!
//! // Directory-style listing: one segment per child, no trailing
//! // delimiter, no descent past it.
//! let mut entries = ResultSink::new();
//! set.find_prefix_partial("usr/", &mut entries).unwrap();
//! let mut names: Vec<&[u8]> = entries.iter().collect();
//! names.sort();
//! assert_eq!(names, vec![&b"bin"[..], b"lib"]);
//!
//! // Deleting a shared prefix removes every key beneath it.
//! set.remove("usr/bin/");
//! assert!(!set.contains("usr/bin/env"));
//! assert!(set.contains("usr/lib/libc.so"));
//! ```

mod children;
mod fragment;
mod node;

pub mod error;
pub mod sink;
pub mod stats;
pub mod tree;

#[cfg(test)]
mod proptests;

pub use error::Error;
pub use sink::ResultSink;
pub use stats::TreeStats;
pub use tree::{PathSet, DEFAULT_DELIMITER};
