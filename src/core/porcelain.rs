//! Parser for `git status --porcelain=2 -b` output.
//!
//! This module turns git's machine-readable status stream into a
//! [`RepositoryStatus`]. Parsing is pure and total: every input produces a
//! best-effort status, and every line that does not fit the grammar is reported
//! as a [`LineError`] next to it instead of aborting the whole parse.
//! Entry records in a stream without a `branch.oid` header are reported as
//! errors and dropped, so an offline status never carries entries.
//!
//! # Public API
//! - [`parse`]: Parse raw status text into a [`ParsedStatus`]
//! - [`ParsedStatus`]: Best-effort status plus all line-level errors
//! - [`LineError`] / [`LineErrorKind`]: Line-scoped grammar errors
//!
//! # Grammar
//! ```text
//! # branch.oid <commit> | (initial)
//! # branch.head <branch> | (detached)
//! # branch.upstream <upstream>
//! # branch.ab +<ahead> -<behind>
//! 1 <XY> <sub> <mH> <mI> <mW> <hH> <hI> <path>
//! 2 <XY> <sub> <mH> <mI> <mW> <hH> <hI> <X><score> <path><TAB><origPath>
//! u <XY> <sub> <m1> <m2> <m3> <mW> <h1> <h2> <h3> <path>
//! ? <path>
//! ! <path>
//! ```

use crate::core::error::StatusParseError;
use crate::core::git_status::{EntryCategory, StatusCode};
use crate::core::model::{BranchInfo, BranchState, ChangedEntry, Head, Oid, RepositoryStatus};
use serde::Serialize;
use thiserror::Error;

const ORDINARY_FIELDS: usize = 8;
const RENAMED_FIELDS: usize = 9;
const UNMERGED_FIELDS: usize = 10;

const KEY_OID: &str = "branch.oid";
const KEY_HEAD: &str = "branch.head";
const KEY_UPSTREAM: &str = "branch.upstream";
const KEY_AB: &str = "branch.ab";

/// What was wrong with a single status line
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LineErrorKind {
    #[error("malformed '{key}' header")]
    MalformedHeader { key: String },

    #[error("'branch.oid' header without '{key}'")]
    MissingHeader { key: &'static str },

    #[error("expected {expected} fields, found {found}")]
    MissingFields { expected: usize, found: usize },

    #[error("invalid status code '{code}'")]
    InvalidStatusCode { code: String },

    #[error("invalid rename score '{score}'")]
    InvalidScore { score: String },

    #[error("renamed entry without an original path")]
    MissingOriginalPath,

    #[error("entry without a path")]
    EmptyPath,

    #[error("unknown record type '{prefix}'")]
    UnknownRecord { prefix: char },

    #[error("entry record without a 'branch.oid' header")]
    MissingBranchHeaders,
}

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("line {line_number}: {kind}")]
pub struct LineError {
    /// 1-based line number in the raw status text
    pub line_number: usize,
    pub line: String,
    pub kind: LineErrorKind,
}

/// Result of parsing one status stream
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedStatus {
    pub status: RepositoryStatus,
    pub errors: Vec<LineError>,
}

impl ParsedStatus {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Strict view: the status only if every line parsed
    pub fn into_result(self) -> Result<RepositoryStatus, StatusParseError> {
        if self.errors.is_empty() {
            Ok(self.status)
        } else {
            Err(StatusParseError {
                errors: self.errors,
            })
        }
    }
}

#[derive(Default)]
struct BranchHeaders {
    oid: Option<(usize, Oid)>,
    head: Option<Head>,
    upstream: Option<String>,
    ahead_behind: Option<(u32, u32)>,
}

impl BranchHeaders {
    fn apply(&mut self, line_number: usize, line: &str) -> Result<(), LineErrorKind> {
        let rest = line.trim_start_matches('#').trim_start();
        let (key, value) = rest.split_once(' ').unwrap_or((rest, ""));
        let value = value.trim();

        match key {
            KEY_OID | KEY_HEAD | KEY_UPSTREAM | KEY_AB if value.is_empty() => {
                Err(LineErrorKind::MalformedHeader {
                    key: key.to_string(),
                })
            }
            KEY_OID => {
                self.oid = Some((line_number, Oid::parse(value)));
                Ok(())
            }
            KEY_HEAD => {
                self.head = Some(Head::parse(value));
                Ok(())
            }
            KEY_UPSTREAM => {
                self.upstream = Some(value.to_string());
                Ok(())
            }
            KEY_AB => {
                let counts = parse_ahead_behind(value).ok_or_else(|| {
                    LineErrorKind::MalformedHeader {
                        key: key.to_string(),
                    }
                })?;
                self.ahead_behind = Some(counts);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn into_branch(self, errors: &mut Vec<LineError>, lines: &[&str]) -> Option<BranchInfo> {
        let (oid_line, oid) = self.oid?;
        let Some(head) = self.head else {
            errors.push(LineError {
                line_number: oid_line,
                line: lines.get(oid_line - 1).unwrap_or(&"").to_string(),
                kind: LineErrorKind::MissingHeader { key: KEY_HEAD },
            });
            return None;
        };

        let mut info = BranchInfo::new(oid, head);
        info.upstream = self.upstream;
        if let Some((ahead, behind)) = self.ahead_behind {
            info.ahead = ahead;
            info.behind = behind;
        }
        Some(info)
    }
}

/// `+<ahead> -<behind>`
fn parse_ahead_behind(value: &str) -> Option<(u32, u32)> {
    let mut parts = value.split_whitespace();
    let ahead = parts.next()?.strip_prefix('+')?.parse().ok()?;
    let behind = parts.next()?.strip_prefix('-')?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((ahead, behind))
}

/// Split `count` leading space-separated fields off `line`; the remainder is
/// returned verbatim so paths containing spaces survive.
fn split_record(line: &str, count: usize) -> Result<(Vec<&str>, &str), LineErrorKind> {
    let mut parts: Vec<&str> = line.splitn(count + 1, ' ').collect();
    if parts.len() <= count {
        return Err(LineErrorKind::MissingFields {
            expected: count + 1,
            found: parts.len(),
        });
    }
    let rest = parts.pop().unwrap_or_default();
    if rest.is_empty() {
        return Err(LineErrorKind::EmptyPath);
    }
    Ok((parts, rest))
}

fn parse_xy(xy: &str) -> Result<(StatusCode, StatusCode), LineErrorKind> {
    StatusCode::parse_pair(xy).ok_or_else(|| LineErrorKind::InvalidStatusCode {
        code: xy.to_string(),
    })
}

fn changed_entry(
    xy: &str,
    path: &str,
    original_path: Option<String>,
    score: Option<u8>,
) -> Result<ChangedEntry, LineErrorKind> {
    let (index_status, worktree_status) = parse_xy(xy)?;
    let (category, staged) = EntryCategory::derive(index_status, worktree_status).ok_or_else(
        || LineErrorKind::InvalidStatusCode {
            code: xy.to_string(),
        },
    )?;

    Ok(ChangedEntry {
        path: path.to_string(),
        original_path,
        index_status,
        worktree_status,
        category,
        staged,
        score,
    })
}

fn parse_ordinary(line: &str) -> Result<ChangedEntry, LineErrorKind> {
    let (fields, path) = split_record(line, ORDINARY_FIELDS)?;
    changed_entry(fields[1], path, None, None)
}

/// `R100` or `C75`
fn parse_score(field: &str) -> Result<u8, LineErrorKind> {
    let invalid = || LineErrorKind::InvalidScore {
        score: field.to_string(),
    };
    let digits = field
        .strip_prefix('R')
        .or_else(|| field.strip_prefix('C'))
        .ok_or_else(invalid)?;
    match digits.parse::<u8>() {
        Ok(score) if score <= 100 => Ok(score),
        _ => Err(invalid()),
    }
}

fn parse_renamed(line: &str) -> Result<ChangedEntry, LineErrorKind> {
    let (fields, paths) = split_record(line, RENAMED_FIELDS)?;
    let score = parse_score(fields[8])?;
    let (path, original_path) = paths
        .split_once('\t')
        .ok_or(LineErrorKind::MissingOriginalPath)?;
    if path.is_empty() {
        return Err(LineErrorKind::EmptyPath);
    }
    if original_path.is_empty() {
        return Err(LineErrorKind::MissingOriginalPath);
    }
    changed_entry(fields[1], path, Some(original_path.to_string()), Some(score))
}

fn parse_unmerged(line: &str) -> Result<ChangedEntry, LineErrorKind> {
    let (fields, path) = split_record(line, UNMERGED_FIELDS)?;
    let (index_status, worktree_status) = parse_xy(fields[1])?;
    Ok(ChangedEntry {
        path: path.to_string(),
        original_path: None,
        index_status,
        worktree_status,
        category: EntryCategory::Unmerged,
        staged: false,
        score: None,
    })
}

/// `? <path>` and `! <path>`
fn parse_single_path(line: &str) -> Result<String, LineErrorKind> {
    match line.split_once(' ') {
        Some((_, path)) if !path.is_empty() => Ok(path.to_string()),
        Some(_) => Err(LineErrorKind::EmptyPath),
        None => Err(LineErrorKind::MissingFields {
            expected: 2,
            found: 1,
        }),
    }
}

/// Parse the raw output of `git status --porcelain=2 -b`.
///
/// Missing sections simply yield empty collections. When no `branch.oid`
/// header is present the repository is reported as offline.
pub fn parse(raw: &str) -> ParsedStatus {
    let lines: Vec<&str> = raw
        .lines()
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    let mut status = RepositoryStatus::default();
    let mut errors = Vec::new();
    let mut headers = BranchHeaders::default();
    let mut records = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let line_number = index + 1;
        let Some(prefix) = line.chars().next() else {
            continue;
        };

        let outcome = match prefix {
            '#' => headers.apply(line_number, line),
            '1' => parse_ordinary(line).map(|entry| status.entries.push(entry)),
            '2' => parse_renamed(line).map(|entry| status.entries.push(entry)),
            'u' => parse_unmerged(line).map(|entry| status.unmerged.push(entry)),
            '?' => parse_single_path(line).map(|path| status.untracked.push(path)),
            '!' => parse_single_path(line).map(|path| status.ignored.push(path)),
            other => Err(LineErrorKind::UnknownRecord { prefix: other }),
        };

        match outcome {
            Ok(()) if prefix != '#' => records.push(line_number),
            Ok(()) => {}
            Err(kind) => errors.push(LineError {
                line_number,
                line: line.to_string(),
                kind,
            }),
        }
    }

    status.online = headers.oid.is_some();
    // without branch.oid the repository is offline and reports no entries
    if !status.online {
        status.entries.clear();
        status.unmerged.clear();
        status.untracked.clear();
        status.ignored.clear();
        errors.extend(records.into_iter().map(|line_number| LineError {
            line_number,
            line: lines[line_number - 1].to_string(),
            kind: LineErrorKind::MissingBranchHeaders,
        }));
    }
    status.branch = headers
        .into_branch(&mut errors, &lines)
        .map(BranchState::Tracking);
    errors.sort_by_key(|e| e.line_number);

    ParsedStatus { status, errors }
}
