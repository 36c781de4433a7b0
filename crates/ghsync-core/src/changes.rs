//! Change set.

use std::fmt;

use indexmap::IndexMap;

use crate::types::GhCommit;

/// Kind of change applied to a path by a push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Added,
    Modified,
    Removed,
}

impl ChangeKind {
    pub fn to_str(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Modified => "modified",
            Self::Removed => "removed",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

/// A path with its change kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub path: String,
    pub kind: ChangeKind,
}

impl ChangeRecord {
    pub fn new<T: Into<String>>(path: T, kind: ChangeKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// Path to change kind mapping, folded from a commit list.
///
/// A path keeps the position of its first appearance, and the kind of its
/// last one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    entries: IndexMap<String, ChangeKind>,
}

impl ChangeSet {
    /// Fold commits in order.
    pub fn from_commits(commits: &[GhCommit]) -> Self {
        let mut set = Self::default();
        for commit in commits {
            set.fold_commit(commit);
        }

        set
    }

    fn fold_commit(&mut self, commit: &GhCommit) {
        let lists = [
            (&commit.added, ChangeKind::Added),
            (&commit.modified, ChangeKind::Modified),
            (&commit.removed, ChangeKind::Removed),
        ];

        for (paths, kind) in lists {
            for path in paths.iter().filter(|p| !p.is_empty()) {
                self.entries.insert(path.clone(), kind);
            }
        }
    }

    pub fn get(&self, path: &str) -> Option<ChangeKind> {
        self.entries.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ChangeKind)> {
        self.entries.iter().map(|(p, k)| (p.as_str(), *k))
    }

    /// Iterate changes under a folder, with the folder prefix stripped.
    ///
    /// Without folder, every change is returned unmodified.
    pub fn in_folder<'a>(
        &'a self,
        folder: Option<&'a str>,
    ) -> impl Iterator<Item = (&'a str, ChangeKind)> + 'a {
        self.iter().filter_map(move |(path, kind)| match folder {
            Some(folder) => path
                .strip_prefix(folder)
                .and_then(|rest| rest.strip_prefix('/'))
                .map(|local| (local, kind)),
            None => Some((path, kind)),
        })
    }
}
