//! PATRICIA trie set implementation.
//!
//! This module contains the main [`PathSet`] type and the descent,
//! splitting, deletion, and prefix-enumeration machinery behind it.

use std::collections::HashSet;

use crate::error::Error;
use crate::fragment::Fragment;
use crate::node::Node;
use crate::sink::ResultSink;

/// Delimiter used by [`PathSet::new`] for segment-bounded enumeration.
pub const DEFAULT_DELIMITER: u8 = b'/';

/// A PATRICIA trie (radix tree) storing a set of byte-string keys.
///
/// The set is existence-only: there is no payload per key. It is built for
/// hierarchical, path-like keys such as file paths or namespaced
/// identifiers, where long shared prefixes dominate storage and listing
/// keys one directory-like segment at a time is a first-class operation.
///
/// Each node carries a multi-byte fragment of one or more keys; children
/// are kept in lexicographic order and no two siblings start with the same
/// byte, so matching a continuation is a single first-byte scan.
///
/// ## Examples
///
/// ```rust
/// use pathset::{PathSet, ResultSink};
///
/// let mut set = PathSet::new();
/// set.insert("etc/hosts").unwrap();
/// set.insert("etc/passwd").unwrap();
///
/// assert!(set.contains("etc/hosts"));
/// assert!(!set.contains("etc/shadow"));
///
/// // One result per stored key below the prefix.
/// let mut results = ResultSink::new();
/// assert!(set.find_prefix_full("etc/", &mut results).unwrap());
/// assert_eq!(results.len(), 2);
/// ```
pub struct PathSet {
    pub(crate) root: Node,
    delimiter: u8,
}

/// Outcome of matching a remaining key against one node's fragment,
/// evaluated in this order. Shared by lookup, insertion, and deletion;
/// they differ only in what they do at each outcome.
enum Step {
    /// The match consumes the node's whole fragment but not the whole key
    /// (or nothing matched at all, as at the root): strip the matched
    /// bytes and continue with the child owning the next byte.
    Descend(usize),
    /// The remaining key ends exactly at this node's fragment boundary.
    Exact,
    /// Key and fragment part ways inside the fragment; only insertion can
    /// act on this, by splitting the node at the divergence point.
    DivergeWithin(usize),
    /// The remaining key is a proper prefix of the fragment; insertion
    /// splits at the key's end, everything else reports not-found.
    KeyExhausted(usize),
}

fn classify(fragment: &Fragment, remaining: &[u8]) -> Step {
    let p = fragment.common_prefix_length(remaining);
    if p == 0 || (p < remaining.len() && p >= fragment.len()) {
        Step::Descend(p)
    } else if p == fragment.len() {
        Step::Exact
    } else if p < remaining.len() {
        Step::DivergeWithin(p)
    } else {
        Step::KeyExhausted(p)
    }
}

impl Default for PathSet {
    fn default() -> Self {
        Self::new()
    }
}

impl PathSet {
    /// Create an empty set with `/` as the segment delimiter.
    pub fn new() -> Self {
        Self::with_delimiter(DEFAULT_DELIMITER)
    }

    /// Create an empty set with a custom segment delimiter, used only by
    /// [`find_prefix_partial`](Self::find_prefix_partial).
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self {
            root: Node::root(),
            delimiter,
        }
    }

    /// The configured segment delimiter.
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Returns true if no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Add a key to the set.
    ///
    /// Returns `Ok(true)` if the key was not present before, `Ok(false)`
    /// if it already terminated at an existing fragment boundary (the
    /// insert is an idempotent no-op).
    ///
    /// # Errors
    ///
    /// [`Error::EmptyKey`] for the empty key; the tree is not touched.
    pub fn insert(&mut self, key: impl AsRef<[u8]>) -> Result<bool, Error> {
        let key = key.as_ref();
        if key.is_empty() {
            return Err(Error::EmptyKey);
        }

        let mut node = &mut self.root;
        let mut remaining = key;
        loop {
            match classify(&node.fragment, remaining) {
                Step::Descend(p) => {
                    remaining = &remaining[p..];
                    match node.children.position(remaining[0]) {
                        Some(idx) => node = node.children.node_mut(idx),
                        None => {
                            // No child continues this key; hang the whole
                            // unmatched suffix off here as a fresh leaf.
                            node.children.add(Node::new(Fragment::from_slice(remaining)));
                            return Ok(true);
                        }
                    }
                }
                Step::Exact => return Ok(false),
                Step::DivergeWithin(p) => {
                    // The shared prefix keeps this node's place; the old
                    // suffix and the new key's suffix become siblings.
                    node.split(p);
                    node.children.add(Node::new(Fragment::from_slice(&remaining[p..])));
                    return Ok(true);
                }
                Step::KeyExhausted(p) => {
                    // The key ends inside this fragment, so the fragment
                    // boundary moves back to the key's end.
                    node.split(p);
                    return Ok(true);
                }
            }
        }
    }

    /// Returns true if `key` terminates at an exact fragment boundary.
    ///
    /// Boundaries include interior nodes manufactured by splits: after
    /// inserting `"ab"` and `"ac"`, the shared node `"a"` is a boundary
    /// and `contains("a")` reports true.
    pub fn contains(&self, key: impl AsRef<[u8]>) -> bool {
        self.locate(key.as_ref()).is_some()
    }

    /// Remove `key` and every key below its fragment boundary.
    ///
    /// Deleting a key that is also a shared prefix of other stored keys
    /// frees the entire subtree, removing all of them. Returns `false`
    /// and leaves the tree untouched if no exact boundary matches.
    pub fn remove(&mut self, key: impl AsRef<[u8]>) -> bool {
        let key = key.as_ref();
        if key.is_empty() {
            return false;
        }

        let mut node = &mut self.root;
        let mut remaining = key;
        loop {
            match classify(&node.fragment, remaining) {
                Step::Descend(p) => {
                    remaining = &remaining[p..];
                    let Some(idx) = node.children.position(remaining[0]) else {
                        return false;
                    };
                    if node.children.node(idx).fragment.as_slice() == remaining {
                        // Exact boundary: detach and free the whole subtree.
                        drop(node.children.remove(idx));
                        return true;
                    }
                    node = node.children.node_mut(idx);
                }
                _ => return false,
            }
        }
    }

    /// Append every stored key beginning with `prefix` to `results`, one
    /// entry per leaf below the located boundary.
    ///
    /// Returns `Ok(false)` without touching `results` when the prefix does
    /// not terminate at a fragment boundary in the tree.
    ///
    /// # Errors
    ///
    /// [`Error::CapacityExceeded`] if `results` refuses a result; entries
    /// appended before the overflow remain in the sink.
    pub fn find_prefix_full(
        &self,
        prefix: impl AsRef<[u8]>,
        results: &mut ResultSink,
    ) -> Result<bool, Error> {
        let prefix = prefix.as_ref();
        let Some(node) = self.locate(prefix) else {
            return Ok(false);
        };

        // The located node's fragment is the tail of the matched prefix;
        // everything before it must be replayed in front of each result.
        let preceding = &prefix[..prefix.len() - node.fragment.len()];
        Self::emit_full(node, preceding, results)?;
        Ok(true)
    }

    /// Append one directory-style entry per child segment under `prefix`.
    ///
    /// The traversal stops at each child fragment ending with the
    /// configured delimiter, emitting the accumulated segment without the
    /// trailing delimiter, and emits the accumulated path at each leaf.
    /// Segments already present in `results` are suppressed. Returns
    /// `Ok(false)` when the prefix is not an exact fragment boundary.
    ///
    /// # Errors
    ///
    /// [`Error::CapacityExceeded`] if `results` refuses a result.
    pub fn find_prefix_partial(
        &self,
        prefix: impl AsRef<[u8]>,
        results: &mut ResultSink,
    ) -> Result<bool, Error> {
        let Some(node) = self.locate(prefix.as_ref()) else {
            return Ok(false);
        };
        Self::emit_partial(node, self.delimiter, results)?;
        Ok(true)
    }

    /// Walk down from the root, peeling matched prefixes, to the node
    /// whose fragment ends exactly where `key` ends.
    fn locate(&self, key: &[u8]) -> Option<&Node> {
        if key.is_empty() {
            return None;
        }

        let mut node = &self.root;
        let mut remaining = key;
        loop {
            match classify(&node.fragment, remaining) {
                Step::Descend(p) => {
                    remaining = &remaining[p..];
                    // Sibling fragments never share a first byte, so this
                    // byte identifies the only possible continuation.
                    let idx = node.children.position(remaining[0])?;
                    node = node.children.node(idx);
                }
                Step::Exact => return Some(node),
                Step::DivergeWithin(_) | Step::KeyExhausted(_) => return None,
            }
        }
    }

    /// Depth-first emission of every leaf path under `start`. Children are
    /// visited in list order, so output is lexicographic.
    fn emit_full(start: &Node, preceding: &[u8], results: &mut ResultSink) -> Result<(), Error> {
        let mut path = preceding.to_vec();
        path.extend_from_slice(start.fragment.as_slice());

        // (node, next child to visit, path length to restore on the way up)
        let mut stack: Vec<(&Node, usize, usize)> = vec![(start, 0, preceding.len())];
        while let Some(&mut (node, ref mut next_child, base)) = stack.last_mut() {
            if *next_child < node.children.len() {
                let child = node.children.node(*next_child);
                *next_child += 1;
                let child_base = path.len();
                path.extend_from_slice(child.fragment.as_slice());
                stack.push((child, 0, child_base));
            } else {
                if node.is_leaf() {
                    results.push(&path)?;
                }
                path.truncate(base);
                stack.pop();
            }
        }
        Ok(())
    }

    /// Depth-first emission of one segment per delimiter-terminated child
    /// fragment (sans delimiter) and per leaf, relative to `start`.
    /// `start`'s own fragment is not part of any segment.
    fn emit_partial(start: &Node, delimiter: u8, results: &mut ResultSink) -> Result<(), Error> {
        // A segment can be reached through more than one yield point while
        // the accumulated path is reused, so suppress exact duplicates
        // against everything already in the sink.
        let mut seen: HashSet<Vec<u8>> = results.iter().map(<[u8]>::to_vec).collect();

        if start.is_leaf() {
            // The prefix itself terminates here; surface that as a single
            // empty segment.
            if seen.insert(Vec::new()) {
                results.push(b"")?;
            }
            return Ok(());
        }

        let mut path: Vec<u8> = Vec::new();
        let mut stack: Vec<(&Node, usize, usize)> = vec![(start, 0, 0)];
        while let Some(&mut (node, ref mut next_child, base)) = stack.last_mut() {
            if *next_child < node.children.len() {
                let child = node.children.node(*next_child);
                *next_child += 1;
                let frag = child.fragment.as_slice();
                if child.fragment.last() == Some(delimiter) {
                    // Segment boundary: emit without the trailing
                    // delimiter and do not descend into this branch.
                    let mut segment = path.clone();
                    segment.extend_from_slice(&frag[..frag.len() - 1]);
                    if seen.insert(segment.clone()) {
                        results.push(&segment)?;
                    }
                } else if child.is_leaf() {
                    let mut segment = path.clone();
                    segment.extend_from_slice(frag);
                    if seen.insert(segment.clone()) {
                        results.push(&segment)?;
                    }
                } else {
                    let child_base = path.len();
                    path.extend_from_slice(frag);
                    stack.push((child, 0, child_base));
                }
            } else {
                path.truncate(base);
                stack.pop();
            }
        }
        Ok(())
    }
}
