//! Core analyzer for orchestrating audit execution.

use crate::config::Config;
use crate::context::{FileContext, FileKind};
use crate::rule::{Rule, RuleBox};
use crate::types::{Detail, LintResult, Severity, Violation};
use crate::walk::{walk, WalkError};

use miette::Diagnostic;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Rule name used for files that could not be read.
pub const READ_FILE_RULE: &str = "read-file";
/// Rule code used for files that could not be read.
pub const READ_FILE_CODE: &str = "SL000";

/// Errors that abort an audit.
///
/// Everything that goes wrong inside a single file is reported as a
/// violation instead.
#[derive(Debug, Error, Diagnostic)]
pub enum AnalyzerError {
    /// The site root does not exist.
    #[error("site root {} does not exist", .0.display())]
    #[diagnostic(
        code(sitelint::root_not_found),
        help("pass --root or set `analyzer.root` in sitelint.toml")
    )]
    RootNotFound(PathBuf),

    /// The site root is a file.
    #[error("site root {} is not a directory", .0.display())]
    #[diagnostic(code(sitelint::root_not_directory))]
    RootNotADirectory(PathBuf),

    /// A directory below the root could not be listed.
    #[error("failed to read {}", .path.display())]
    #[diagnostic(code(sitelint::walk))]
    Walk {
        /// Entry that failed.
        path: PathBuf,
        /// Underlying walk error.
        #[source]
        source: walkdir::Error,
    },

    /// Invalid exclude pattern.
    #[error("invalid exclude pattern `{pattern}`")]
    #[diagnostic(
        code(sitelint::exclude),
        help("exclude patterns are globs relative to the site root, e.g. `vendor/**`")
    )]
    Glob {
        /// Pattern as given.
        pattern: String,
        /// Glob compiler error.
        #[source]
        source: glob::PatternError,
    },

    /// The dedicated worker pool could not be started.
    #[error("failed to start worker pool")]
    #[diagnostic(code(sitelint::thread_pool))]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl From<WalkError> for AnalyzerError {
    fn from(err: WalkError) -> Self {
        match err {
            WalkError::NotFound(path) => Self::RootNotFound(path),
            WalkError::NotADirectory(path) => Self::RootNotADirectory(path),
            WalkError::Io { path, source } => Self::Walk { path, source },
        }
    }
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    parallelism: Option<usize>,
    config: Option<Config>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the site root to audit.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several boxed rules.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleBox>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the number of worker threads.
    #[must_use]
    pub fn parallelism(mut self, threads: usize) -> Self {
        self.parallelism = Some(threads);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the analyzer.
    ///
    /// The root falls back to `analyzer.root` from the configuration. It is
    /// kept as given so reports show the path the user typed.
    ///
    /// # Errors
    ///
    /// Returns an error if an exclude pattern is not a valid glob.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();
        let root = self
            .root
            .unwrap_or_else(|| config.analyzer.site_root().to_path_buf());

        let mut patterns = self.exclude_patterns;
        patterns.extend(config.analyzer.exclude.iter().cloned());
        let excludes = patterns
            .into_iter()
            .map(|pattern| {
                glob::Pattern::new(&pattern).map_err(|source| AnalyzerError::Glob {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Analyzer {
            root,
            rules: self.rules,
            excludes,
            parallelism: self.parallelism.or(config.analyzer.parallelism),
            config,
        })
    }
}

/// The auditor: walks the site root and runs every rule against each file.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<RuleBox>,
    excludes: Vec<glob::Pattern>,
    parallelism: Option<usize>,
    config: Config,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the site root being audited.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Runs the audit.
    ///
    /// Violations come back in walk order, and in registration order
    /// within a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the site root cannot be walked or the worker
    /// pool cannot be started.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!(root = %self.root.display(), rules = self.rules.len(), "starting audit");

        let active: Vec<&dyn Rule> = self
            .rules
            .iter()
            .filter(|rule| {
                let enabled = self.config.is_rule_enabled(rule.name());
                if !enabled {
                    debug!("Skipping disabled rule: {}", rule.name());
                }
                enabled
            })
            .map(|rule| &**rule)
            .collect();

        let files = self.discover_files(&active)?;
        info!("Found {} files to audit", files.len());

        let per_file = match self.parallelism {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?
                .install(|| self.evaluate_all(&files, &active)),
            None => self.evaluate_all(&files, &active),
        };

        let mut result = LintResult::new();
        result.files_checked = files.len();
        result.violations = per_file.into_iter().flatten().collect();

        info!(
            "Audit complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    fn evaluate_all(
        &self,
        files: &[(PathBuf, FileKind)],
        rules: &[&dyn Rule],
    ) -> Vec<Vec<Violation>> {
        files
            .par_iter()
            .map(|(path, kind)| self.analyze_file(path, *kind, rules))
            .collect()
    }

    /// Reads one file and runs every applicable rule against that read.
    fn analyze_file(&self, path: &Path, kind: FileKind, rules: &[&dyn Rule]) -> Vec<Violation> {
        debug!("Auditing: {}", path.display());

        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                return vec![Violation::new(
                    READ_FILE_CODE,
                    READ_FILE_RULE,
                    Severity::Error,
                    self.relative(path),
                    format!("cannot read file: {e}"),
                )];
            }
        };
        let content = String::from_utf8_lossy(&bytes);
        let ctx = FileContext::new(path, &content, &self.root, kind);

        let mut violations = Vec::new();
        for rule in rules.iter().filter(|r| r.file_kinds().contains(&kind)) {
            let outcome = rule.applies_to(&ctx).and_then(|selected| {
                if selected {
                    rule.check(&ctx)
                } else {
                    Ok(Vec::new())
                }
            });

            let rule_violations = match outcome {
                Ok(found) => found,
                Err(e) => {
                    warn!("Rule {} failed on {}: {}", rule.name(), path.display(), e);
                    vec![Violation::new(
                        rule.code(),
                        rule.name(),
                        Severity::Error,
                        ctx.relative_path.clone(),
                        format!("rule error: {e}"),
                    )
                    .with_detail(Detail::RuleError {
                        message: e.to_string(),
                    })]
                }
            };
            violations.extend(self.apply_severity_override(rule.name(), rule_violations));
        }

        violations
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(
        &self,
        rule_name: &str,
        mut violations: Vec<Violation>,
    ) -> Vec<Violation> {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            for v in &mut violations {
                v.severity = severity;
            }
        }
        violations
    }

    /// Walks the root and keeps the files some active rule can audit.
    fn discover_files(
        &self,
        rules: &[&dyn Rule],
    ) -> Result<Vec<(PathBuf, FileKind)>, AnalyzerError> {
        let mut files = Vec::new();

        for path in walk(&self.root)? {
            let Some(kind) = FileKind::from_path(&path) else {
                continue;
            };
            if !rules.iter().any(|r| r.file_kinds().contains(&kind)) {
                continue;
            }
            if self.should_exclude(&path) {
                debug!("Excluding: {}", path.display());
                continue;
            }
            files.push((path, kind));
        }

        Ok(files)
    }

    /// Checks the root-relative path against the exclude globs.
    fn should_exclude(&self, path: &Path) -> bool {
        let relative = self.relative(path);
        self.excludes.iter().any(|p| p.matches_path(&relative))
    }

    fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleConfig;
    use crate::rule::RuleError;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    fn site(files: &[(&str, &str)]) -> TempDir {
        let tmp = TempDir::new().unwrap();
        for (rel, content) in files {
            let path = tmp.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        tmp
    }

    /// Fires on every file whose content contains `needle`.
    struct Contains {
        needle: &'static str,
        kinds: &'static [FileKind],
        checked: AtomicUsize,
    }

    impl Contains {
        fn new(needle: &'static str) -> Self {
            Self {
                needle,
                kinds: &[FileKind::Html],
                checked: AtomicUsize::new(0),
            }
        }
    }

    impl Rule for Contains {
        fn name(&self) -> &str {
            "contains"
        }
        fn code(&self) -> &str {
            "T001"
        }
        fn file_kinds(&self) -> &[FileKind] {
            self.kinds
        }
        fn applies_to(&self, ctx: &FileContext) -> Result<bool, RuleError> {
            Ok(ctx.content.contains(self.needle))
        }
        fn check(&self, ctx: &FileContext) -> Result<Vec<Violation>, RuleError> {
            self.checked.fetch_add(1, Ordering::SeqCst);
            Ok(vec![Violation::new(
                self.code(),
                self.name(),
                Severity::Warning,
                ctx.relative_path.clone(),
                self.name(),
            )])
        }
    }

    struct Failing;

    impl Rule for Failing {
        fn name(&self) -> &str {
            "failing"
        }
        fn code(&self) -> &str {
            "T002"
        }
        fn check(&self, _ctx: &FileContext) -> Result<Vec<Violation>, RuleError> {
            Err(RuleError::Evaluation("boom".into()))
        }
    }

    #[test]
    fn test_root_falls_back_to_config() {
        let analyzer = Analyzer::builder().build().unwrap();
        assert_eq!(analyzer.root(), Path::new("HTML_TEMPLATE"));

        let analyzer = Analyzer::builder().root("public").build().unwrap();
        assert_eq!(analyzer.root(), Path::new("public"));
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let analyzer = Analyzer::builder()
            .root(tmp.path().join("nope"))
            .rule(Contains::new("x"))
            .build()
            .unwrap();
        assert!(matches!(
            analyzer.analyze(),
            Err(AnalyzerError::RootNotFound(_))
        ));
    }

    #[test]
    fn test_invalid_exclude_is_rejected() {
        let result = Analyzer::builder().exclude("[").build();
        assert!(matches!(result, Err(AnalyzerError::Glob { .. })));
    }

    #[test]
    fn test_check_only_runs_when_selector_matches() {
        let tmp = site(&[("a.html", "<img>"), ("b.html", "<p>"), ("c.css", "<img>")]);
        let analyzer = Analyzer::builder()
            .root(tmp.path())
            .rule(Contains::new("<img"))
            .build()
            .unwrap();

        let result = analyzer.analyze().unwrap();
        assert_eq!(result.files_checked, 2);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].file, PathBuf::from("a.html"));
    }

    #[test]
    fn test_rule_errors_become_violations() {
        let tmp = site(&[("a.html", ""), ("b.html", "needle")]);
        let analyzer = Analyzer::builder()
            .root(tmp.path())
            .rule(Failing)
            .rule(Contains::new("needle"))
            .build()
            .unwrap();

        let result = analyzer.analyze().unwrap();
        let rules: Vec<_> = result
            .violations
            .iter()
            .map(|v| (v.file.to_string_lossy().into_owned(), v.rule.as_str()))
            .collect();
        assert_eq!(
            rules,
            vec![
                ("a.html".to_string(), "failing"),
                ("b.html".to_string(), "failing"),
                ("b.html".to_string(), "contains"),
            ]
        );
        assert_eq!(
            result.violations[0].detail,
            Some(Detail::RuleError {
                message: "boom".into()
            })
        );
    }

    #[test]
    fn test_disabled_rules_and_severity_overrides() {
        let tmp = site(&[("a.html", "needle")]);
        let mut config = Config::default();
        config.rules.insert(
            "failing".into(),
            RuleConfig {
                enabled: Some(false),
                ..RuleConfig::default()
            },
        );
        config.rules.insert(
            "contains".into(),
            RuleConfig {
                severity: Some(Severity::Info),
                ..RuleConfig::default()
            },
        );

        let analyzer = Analyzer::builder()
            .root(tmp.path())
            .config(config)
            .rule(Failing)
            .rule(Contains::new("needle"))
            .build()
            .unwrap();

        let result = analyzer.analyze().unwrap();
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].severity, Severity::Info);
    }

    #[test]
    fn test_excludes_match_relative_paths() {
        let tmp = site(&[("index.html", "x"), ("vendor/lib/a.html", "x")]);
        let analyzer = Analyzer::builder()
            .root(tmp.path())
            .exclude("vendor/**")
            .rule(Contains::new("x"))
            .build()
            .unwrap();

        let result = analyzer.analyze().unwrap();
        assert_eq!(result.files_checked, 1);
        assert_eq!(result.violations[0].file, PathBuf::from("index.html"));
    }

    #[test]
    fn test_dedicated_pool_preserves_walk_order() {
        let files: Vec<(String, &str)> = (0..40)
            .map(|i| (format!("p{i:02}.html"), "x"))
            .collect();
        let refs: Vec<(&str, &str)> = files.iter().map(|(p, c)| (p.as_str(), *c)).collect();
        let tmp = site(&refs);

        let analyzer = Analyzer::builder()
            .root(tmp.path())
            .parallelism(4)
            .rule(Contains::new("x"))
            .build()
            .unwrap();

        let first = analyzer.analyze().unwrap();
        let second = analyzer.analyze().unwrap();
        let order: Vec<_> = first.violations.iter().map(|v| v.file.clone()).collect();
        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(order, sorted);
        assert_eq!(first.violations, second.violations);
    }

    #[test]
    fn test_non_utf8_content_is_still_audited() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.html"), b"\xff\xfe needle").unwrap();
        let analyzer = Analyzer::builder()
            .root(tmp.path())
            .rule(Contains::new("needle"))
            .build()
            .unwrap();

        assert_eq!(analyzer.analyze().unwrap().violations.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_file_is_a_violation() {
        use std::os::unix::fs::symlink;

        let tmp = site(&[("ok.html", "")]);
        symlink(tmp.path().join("gone.html"), tmp.path().join("dangling.html")).unwrap();
        let analyzer = Analyzer::builder()
            .root(tmp.path())
            .rule(Contains::new("never"))
            .build()
            .unwrap();

        let result = analyzer.analyze().unwrap();
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].rule, READ_FILE_RULE);
        assert!(result.violations[0].message.starts_with("cannot read file: "));
    }
}
