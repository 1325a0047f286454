//! Scenario tree and its shared, lock-guarded handle.
//!
//! The tree is read by every sitting and mutated only through `merge`.
//! `SharedScenarioTree` wraps it in a `RwLock` so that a merge (which may touch
//! several top-level keys) is applied as one unit under the write lock.

use std::sync::Arc;
use tokio::sync::RwLock;

use super::{ScenarioError, ScenarioNode, ScenarioOption};

/// Counts returned by a successful merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    pub inserted: usize,
    pub replaced: usize,
}

/// The hierarchical scenario menu. Top-level nodes are kept in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioTree {
    roots: Vec<ScenarioNode>,
}

impl ScenarioTree {
    /// Builds a tree, validating every node.
    pub fn new(roots: Vec<ScenarioNode>) -> Result<Self, ScenarioError> {
        validate_entries(&roots)?;
        Ok(Self { roots })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn roots(&self) -> &[ScenarioNode] {
        &self.roots
    }

    pub fn into_roots(self) -> Vec<ScenarioNode> {
        self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total node count.
    pub fn size(&self) -> usize {
        self.roots.iter().map(ScenarioNode::size).sum()
    }

    /// Descends by successive keys. The empty path names no node.
    pub fn lookup<S: AsRef<str>>(&self, path: &[S]) -> Result<&ScenarioNode, ScenarioError> {
        let (first, rest) = path
            .split_first()
            .ok_or_else(|| ScenarioError::path_not_found(path))?;

        let mut node = self
            .roots
            .iter()
            .find(|n| n.key() == first.as_ref())
            .ok_or_else(|| ScenarioError::path_not_found(path))?;

        for segment in rest {
            node = node
                .child(segment.as_ref())
                .ok_or_else(|| ScenarioError::path_not_found(path))?;
        }
        Ok(node)
    }

    /// Options below `path`, in insertion order. The empty path lists the
    /// top-level scenarios; an empty result means `path` is a leaf.
    pub fn child_options<S: AsRef<str>>(
        &self,
        path: &[S],
    ) -> Result<Vec<ScenarioOption>, ScenarioError> {
        if path.is_empty() {
            return Ok(self.roots.iter().map(ScenarioNode::as_option).collect());
        }
        Ok(self.lookup(path)?.options())
    }

    /// Finds a top-level node whose key or label equals `text`, ignoring case.
    pub fn find_root(&self, text: &str) -> Option<&ScenarioNode> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.roots.iter().find(|n| {
            n.key().to_lowercase() == needle || n.visible().to_lowercase() == needle
        })
    }

    /// Grafts new top-level entries. An absent key is appended; a present key
    /// is overwritten in place, keeping its position. Nothing is applied if
    /// any entry is malformed.
    pub fn merge(&mut self, entries: Vec<ScenarioNode>) -> Result<MergeSummary, ScenarioError> {
        validate_entries(&entries)?;

        let mut summary = MergeSummary::default();
        for entry in entries {
            match self.roots.iter_mut().find(|n| n.key() == entry.key()) {
                Some(existing) => {
                    *existing = entry;
                    summary.replaced += 1;
                }
                None => {
                    self.roots.push(entry);
                    summary.inserted += 1;
                }
            }
        }
        Ok(summary)
    }
}

fn validate_entries(entries: &[ScenarioNode]) -> Result<(), ScenarioError> {
    let mut seen = std::collections::HashSet::new();
    for entry in entries {
        if !seen.insert(entry.key()) {
            return Err(ScenarioError::malformed(format!(
                "duplicate top-level key '{}'",
                entry.key()
            )));
        }
        entry.validate(&mut Vec::new())?;
    }
    Ok(())
}

/// Process-wide handle to the scenario tree.
///
/// Reads may come from any sitting; merges are serialized by the write lock.
#[derive(Debug, Clone, Default)]
pub struct SharedScenarioTree {
    inner: Arc<RwLock<ScenarioTree>>,
}

impl SharedScenarioTree {
    pub fn new(tree: ScenarioTree) -> Self {
        Self {
            inner: Arc::new(RwLock::new(tree)),
        }
    }

    pub async fn lookup<S: AsRef<str>>(&self, path: &[S]) -> Result<ScenarioNode, ScenarioError> {
        self.inner.read().await.lookup(path).cloned()
    }

    pub async fn child_options<S: AsRef<str>>(
        &self,
        path: &[S],
    ) -> Result<Vec<ScenarioOption>, ScenarioError> {
        self.inner.read().await.child_options(path)
    }

    pub async fn find_root(&self, text: &str) -> Option<ScenarioNode> {
        self.inner.read().await.find_root(text).cloned()
    }

    pub async fn merge(&self, entries: Vec<ScenarioNode>) -> Result<MergeSummary, ScenarioError> {
        let mut tree = self.inner.write().await;
        let summary = tree.merge(entries)?;
        tracing::info!(
            inserted = summary.inserted,
            replaced = summary.replaced,
            roots = tree.roots().len(),
            "Merged scenario entries"
        );
        Ok(summary)
    }

    /// Copy of the current tree.
    pub async fn snapshot(&self) -> ScenarioTree {
        self.inner.read().await.clone()
    }
}
