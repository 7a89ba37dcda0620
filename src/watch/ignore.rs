// src/watch/ignore.rs

use std::borrow::Cow;
use std::fmt;

use globset::{GlobBuilder, GlobMatcher};
use tracing::warn;

use crate::config::model::{ConfigFile, IgnoreSection};
use crate::types::TargetOs;
use crate::watch::path_utils::{base_name, extension};

/// Which ignore rule matched a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreRule {
    /// `ignore.extensions` entry, e.g. `.tmp`.
    Extension(String),
    /// `ignore.files` pattern matched against the base name.
    Filename(String),
    /// `ignore.directories` pattern matched against the full path.
    Directory(String),
}

impl fmt::Display for IgnoreRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnoreRule::Extension(ext) => write!(f, "extension match: {ext}"),
            IgnoreRule::Filename(pat) => write!(f, "filename match: {pat}"),
            IgnoreRule::Directory(pat) => write!(f, "directory match: {pat}"),
        }
    }
}

/// Result of evaluating a path against the ignore rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreVerdict {
    Pass,
    Ignored(IgnoreRule),
}

impl IgnoreVerdict {
    pub fn is_ignored(&self) -> bool {
        matches!(self, IgnoreVerdict::Ignored(_))
    }

    pub fn rule(&self) -> Option<&IgnoreRule> {
        match self {
            IgnoreVerdict::Pass => None,
            IgnoreVerdict::Ignored(rule) => Some(rule),
        }
    }

    /// Diagnostic text for log lines, e.g. `"extension match: .tmp"`.
    pub fn reason(&self) -> Option<String> {
        self.rule().map(ToString::to_string)
    }
}

/// A configured glob together with its compiled matcher.
///
/// `matcher` is `None` when the pattern failed to compile; such a pattern
/// never matches.
#[derive(Clone)]
struct CompiledPattern {
    source: String,
    matcher: Option<GlobMatcher>,
}

impl fmt::Debug for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledPattern")
            .field("source", &self.source)
            .field("valid", &self.matcher.is_some())
            .finish()
    }
}

impl CompiledPattern {
    fn is_match(&self, candidate: &str) -> bool {
        self.matcher
            .as_ref()
            .is_some_and(|m| m.is_match(candidate))
    }
}

/// Compiled ignore rules, checked in a fixed order:
/// extension, then file name, then directory. First match wins.
///
/// File-name globs never let `*` cross a separator (base names have none
/// anyway). Directory globs are matched against the whole path and `*` may
/// span several segments, so `*/node_modules/*` covers any depth below a
/// `node_modules` directory. For a Windows target, both sides are compared
/// in forward-slash form.
#[derive(Debug, Clone)]
pub struct IgnoreMatcher {
    extensions: Vec<String>,
    files: Vec<CompiledPattern>,
    directories: Vec<CompiledPattern>,
    target_os: TargetOs,
}

impl IgnoreMatcher {
    pub fn new(ignore: &IgnoreSection, target_os: TargetOs) -> Self {
        let files = ignore
            .files
            .iter()
            .map(|pat| compile("ignore.files", pat, pat, true, true))
            .collect();

        let directories = ignore
            .directories
            .iter()
            .map(|pat| match target_os {
                TargetOs::Posix => compile("ignore.directories", pat, pat, false, true),
                TargetOs::Windows => compile(
                    "ignore.directories",
                    pat,
                    &pat.replace('\\', "/"),
                    false,
                    false,
                ),
            })
            .collect();

        Self {
            extensions: ignore.extensions.clone(),
            files,
            directories,
            target_os,
        }
    }

    pub fn from_config(cfg: &ConfigFile) -> Self {
        Self::new(cfg.ignore(), cfg.target_os())
    }

    /// Decide whether a normalized path should be dropped.
    pub fn should_ignore(&self, normalized_path: &str) -> IgnoreVerdict {
        let ext = extension(normalized_path);
        if let Some(hit) = self.extensions.iter().find(|e| e.as_str() == ext) {
            return IgnoreVerdict::Ignored(IgnoreRule::Extension(hit.clone()));
        }

        let name = base_name(normalized_path);
        if let Some(p) = self.files.iter().find(|p| p.is_match(name)) {
            return IgnoreVerdict::Ignored(IgnoreRule::Filename(p.source.clone()));
        }

        let full = match self.target_os {
            TargetOs::Posix => Cow::Borrowed(normalized_path),
            TargetOs::Windows => Cow::Owned(normalized_path.replace('\\', "/")),
        };
        if let Some(p) = self.directories.iter().find(|p| p.is_match(&full)) {
            return IgnoreVerdict::Ignored(IgnoreRule::Directory(p.source.clone()));
        }

        IgnoreVerdict::Pass
    }
}

/// One-shot form of [`IgnoreMatcher::should_ignore`] that compiles the
/// rules from `cfg` on every call. The dispatcher keeps a compiled matcher
/// instead.
pub fn should_ignore(normalized_path: &str, cfg: &ConfigFile) -> IgnoreVerdict {
    IgnoreMatcher::from_config(cfg).should_ignore(normalized_path)
}

fn compile(
    section: &str,
    source: &str,
    glob: &str,
    literal_separator: bool,
    backslash_escape: bool,
) -> CompiledPattern {
    let matcher = match GlobBuilder::new(glob)
        .case_insensitive(false)
        .literal_separator(literal_separator)
        .backslash_escape(backslash_escape)
        .build()
    {
        Ok(g) => Some(g.compile_matcher()),
        Err(err) => {
            warn!(
                pattern = %source,
                error = %err,
                "invalid glob pattern in {section}; it will never match"
            );
            None
        }
    };

    CompiledPattern {
        source: source.to_string(),
        matcher,
    }
}
