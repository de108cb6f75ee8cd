//! Repository descriptors: which repository a git command is aimed at.

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// One repository to operate on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepositoryDescriptor {
    /// A working tree containing a `.git` directory
    Worktree { path: PathBuf },
    /// A bare git directory checked out onto a separate work tree
    Bare {
        git_dir: PathBuf,
        work_tree: PathBuf,
        name: Option<String>,
    },
}

impl RepositoryDescriptor {
    pub fn worktree(path: impl Into<PathBuf>) -> Self {
        Self::Worktree { path: path.into() }
    }

    pub fn bare(
        git_dir: impl Into<PathBuf>,
        work_tree: impl Into<PathBuf>,
        name: Option<String>,
    ) -> Self {
        Self::Bare {
            git_dir: git_dir.into(),
            work_tree: work_tree.into(),
            name,
        }
    }

    pub fn is_bare(&self) -> bool {
        matches!(self, Self::Bare { .. })
    }

    /// Display name: explicit name, else the final component of the
    /// working tree path (worktrees) or git dir (bare repositories)
    pub fn name(&self) -> String {
        match self {
            Self::Worktree { path } => name_from_path(path),
            Self::Bare { name: Some(name), .. } if !name.trim().is_empty() => name.clone(),
            Self::Bare { git_dir, .. } => name_from_path(git_dir),
        }
    }

    /// Leading git arguments selecting this repository
    pub fn git_args(&self) -> Vec<OsString> {
        match self {
            Self::Worktree { path } => vec![OsString::from("-C"), path.as_os_str().to_owned()],
            Self::Bare {
                git_dir, work_tree, ..
            } => {
                let mut git_dir_arg = OsString::from("--git-dir=");
                git_dir_arg.push(git_dir);
                let mut work_tree_arg = OsString::from("--work-tree=");
                work_tree_arg.push(work_tree);
                vec![git_dir_arg, work_tree_arg]
            }
        }
    }
}

fn name_from_path(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| path.display().to_string())
}
