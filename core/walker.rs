use crate::CoreError;
use crate::pattern::{NamePattern, PatternSet};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Parser, Clone)]
#[clap(
    version = "0.1.0",
    about = "Source tree linter and fixer (main arguments)",
    long_about = "These are the main arguments for scanning and fixing operations."
)]
pub struct SrcfixArgs {
    #[clap(help = "Path to the file or directory to scan", default_value = ".")]
    pub path: PathBuf,

    #[clap(
        long,
        help = "Report findings without rewriting any file (unfixed findings fail the run)"
    )]
    pub check: bool,

    #[clap( long, value_name = "PATTERN", help = "Glob pattern for file names to scan, replaces the default set [multiple allowed]", action = clap::ArgAction::Append )]
    pub include: Vec<String>,
    #[clap( long, value_name = "PATTERN", help = "Glob pattern for files/directories to skip [multiple allowed]", action = clap::ArgAction::Append )]
    pub exclude: Vec<String>,

    #[clap(
        long,
        value_name = "WIDTH",
        help = "Replace tab indentation with WIDTH spaces (skips make files)"
    )]
    pub tabs: Option<usize>,

    #[clap(long, help = "Collapse runs of blank lines into one")]
    pub collapse_blank_lines: bool,

    #[clap(long, help = "Skip the confirmation prompt")]
    pub no_confirm: bool,
    #[clap(long, help = "Do not print a progress mark per file")]
    pub no_progress: bool,
    #[clap(long, help = "Disable colored output")]
    pub no_color: bool,
}

impl Default for SrcfixArgs {
    fn default() -> Self {
        SrcfixArgs {
            path: PathBuf::from("."),
            check: false,
            include: Vec::new(),
            exclude: Vec::new(),
            tabs: None,
            collapse_blank_lines: false,
            no_confirm: false,
            no_progress: false,
            no_color: false,
        }
    }
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    #[clap(about = "Generate shell completion scripts")]
    Completion(CompletionArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct CompletionArgs {
    #[clap(value_parser = clap::value_parser!(clap_complete::Shell))]
    pub shell: clap_complete::Shell,
}

#[derive(Debug, Parser, Clone)]
#[clap(
    name = "srcfix",
    version = "0.1.0",
    about = "Source tree linter and fixer",
    long_about = "Walks a file tree, applies an ordered pipeline of text-level checks and\nfixes to each matching file, reports findings and optionally rewrites\nfiles in place.",
    propagate_version = true
)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: Option<Command>,

    #[clap(flatten)]
    pub main_opts: SrcfixArgs,
}

const SOURCE_PATTERNS: &str =
    "*.rs,*.c,*.h,*.cpp,*.hpp,*.go,*.py,*.rb,*.php,*.phpt,*.pl,*.lua,*.js,*.ts,*.sh,*.bash,*.fish";
const MARKUP_PATTERNS: &str = "*.html,*.htm,*.xml,*.css,*.scss,*.less,*.md,*.markdown";
const CONFIG_PATTERNS: &str = "*.toml,*.json,*.yaml,*.yml,*.ini,*.conf,*.txt,makefile,makefile.*,*.mk";

const VCS_DIRS: &str = ".git,.hg,.svn";
const GENERATED_DIRS: &str = "target,node_modules,vendor,__pycache__";
const GENERATED_FILES: &str = "*.min.js,*.min.css,*.lock";

/// Accept set: `--include` patterns when given, the built-in source file
/// set otherwise.
pub fn accept_set(args: &SrcfixArgs) -> Result<PatternSet, CoreError> {
    if args.include.is_empty() {
        PatternSet::from_patterns([SOURCE_PATTERNS, MARKUP_PATTERNS, CONFIG_PATTERNS])
    } else {
        PatternSet::from_patterns(&args.include)
    }
}

/// Ignore set: built-in VCS/build noise plus `--exclude` additions.
/// Ignore wins over accept and prunes whole directories.
pub fn ignore_set(args: &SrcfixArgs) -> Result<PatternSet, CoreError> {
    let mut set = PatternSet::from_patterns([VCS_DIRS, GENERATED_DIRS, GENERATED_FILES])?;
    for pattern in &args.exclude {
        set.push(NamePattern::parse(pattern)?);
    }
    Ok(set)
}

/// Lazily enumerates the regular files under `root` whose base name matches
/// the accept set and not the ignore set. Directories whose base name
/// matches the ignore set are never descended into.
///
/// A `root` naming a regular file is yielded as-is; explicit single-file
/// targets always pass. Traversal order is deterministic (lexical within
/// each directory). The sequence is single-pass; re-scanning requires a
/// new call.
pub fn scan<'a>(
    root: &'a Path,
    accept: &'a PatternSet,
    ignore: &'a PatternSet,
) -> Box<dyn Iterator<Item = PathBuf> + 'a> {
    if root.is_file() {
        return Box::new(std::iter::once(root.to_path_buf()));
    }
    let walk = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |e| e.depth() == 0 || !ignore.matches(&e.file_name().to_string_lossy()))
        .filter_map(move |entry| match entry {
            Ok(e) => {
                if e.file_type().is_file() && accept.matches(&e.file_name().to_string_lossy()) {
                    Some(e.into_path())
                } else {
                    None
                }
            }
            Err(e) => {
                eprintln!("Warn: {}", e);
                None
            }
        });
    Box::new(walk)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn tree(files: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for file in files {
            let path = dir.path().join(file);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&path, "content\n").unwrap();
        }
        dir
    }

    fn names(root: &Path, accept: &PatternSet, ignore: &PatternSet) -> Vec<String> {
        scan(root, accept, ignore)
            .map(|p| {
                p.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn ignored_directory_is_pruned() {
        let dir = tree(&["a.php", "b.txt", "vendor/c.php"]);
        let accept = PatternSet::from_patterns(["*.php"]).unwrap();
        let ignore = PatternSet::from_patterns(["vendor"]).unwrap();
        assert_eq!(names(dir.path(), &accept, &ignore), vec!["a.php"]);
    }

    #[test]
    fn ignore_wins_over_accept_for_files() {
        let dir = tree(&["keep.rs", "skip.rs"]);
        let accept = PatternSet::from_patterns(["*.rs"]).unwrap();
        let ignore = PatternSet::from_patterns(["skip.*"]).unwrap();
        assert_eq!(names(dir.path(), &accept, &ignore), vec!["keep.rs"]);
    }

    #[test]
    fn single_file_root_bypasses_filters() {
        let dir = tree(&["notes.bin"]);
        let target = dir.path().join("notes.bin");
        let accept = PatternSet::from_patterns(["*.php"]).unwrap();
        let ignore = PatternSet::from_patterns(["*.bin"]).unwrap();
        let found: Vec<PathBuf> = scan(&target, &accept, &ignore).collect();
        assert_eq!(found, vec![target]);
    }

    #[test]
    fn traversal_is_deterministic() {
        let dir = tree(&["b.rs", "a.rs", "sub/c.rs"]);
        let accept = PatternSet::from_patterns(["*.rs"]).unwrap();
        let ignore = PatternSet::new();
        assert_eq!(
            names(dir.path(), &accept, &ignore),
            vec!["a.rs", "b.rs", "sub/c.rs"]
        );
    }

    #[test]
    fn nested_ignored_directory_is_not_descended() {
        let dir = tree(&["src/ok.rs", "src/.git/sneaky.rs"]);
        let accept = PatternSet::from_patterns(["*.rs"]).unwrap();
        let ignore = PatternSet::from_patterns([VCS_DIRS]).unwrap();
        assert_eq!(names(dir.path(), &accept, &ignore), vec!["src/ok.rs"]);
    }

    #[test]
    fn default_sets_accept_sources_and_skip_noise() {
        let args = SrcfixArgs::default();
        let accept = accept_set(&args).unwrap();
        let ignore = ignore_set(&args).unwrap();
        assert!(accept.matches("main.rs"));
        assert!(accept.matches("Makefile"));
        assert!(!accept.matches("photo.png"));
        assert!(ignore.matches(".git"));
        assert!(ignore.matches("node_modules"));
        assert!(!ignore.matches("src"));
    }

    #[test]
    fn exclude_flag_extends_the_ignore_set() {
        let args = SrcfixArgs {
            exclude: vec!["generated_*".to_string()],
            ..SrcfixArgs::default()
        };
        let ignore = ignore_set(&args).unwrap();
        assert!(ignore.matches("generated_code"));
        assert!(ignore.matches(".git"));
    }
}
