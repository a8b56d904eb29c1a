//! Audit command implementation (`links`, `a11y`, `seo`, `theme-assets`,
//! `all` and `check`).

use anyhow::Result;
use sitelint_core::{Analyzer, Config, RuleBox};
use sitelint_rules::{select_rules, Audit};
use std::process::ExitCode;

use crate::settings::Settings;
use crate::TargetArgs;

/// Which rules an audit runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// A preset, optionally with the strict rules.
    Audit(Audit, bool),
    /// Rules picked by name or code.
    Rules(Vec<String>),
}

impl Selection {
    /// Audit whose wording the report uses.
    fn audit(&self) -> Audit {
        match self {
            Self::Audit(audit, _) => *audit,
            Self::Rules(_) => Audit::All,
        }
    }
}

/// Runs an audit and returns the process exit code.
pub fn run(selection: &Selection, target: &TargetArgs, settings: Settings) -> Result<ExitCode> {
    let Settings {
        config,
        pattern_rules,
        root,
        ..
    } = settings;
    let rules = build_rules(selection, &config, pattern_rules)?;
    let fail_on = config.fail_on();

    let analyzer = Analyzer::builder()
        .root(root)
        .config(config)
        .rules(rules)
        .excludes(target.exclude.iter().cloned())
        .build()?;

    tracing::info!(
        "Auditing {} with {} rules",
        analyzer.root().display(),
        analyzer.rule_count()
    );

    let result = analyzer.analyze()?;

    let (errors, warnings, infos) = result.count_by_severity();
    tracing::info!(
        "Found {} error(s), {} warning(s), {} info(s) in {} file(s)",
        errors,
        warnings,
        infos,
        result.files_checked
    );

    let headings = selection.audit().headings(result.violations.len());
    super::output::print(&result, target.format, analyzer.root(), &headings)?;

    if result.has_violations_at(fail_on) {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Resolves the selection into rule instances.
///
/// Declarative rules join the `all` audit; `check` can name them too.
fn build_rules(
    selection: &Selection,
    config: &Config,
    pattern_rules: Vec<RuleBox>,
) -> Result<Vec<RuleBox>> {
    match selection {
        Selection::Audit(audit, strict) => {
            let mut rules = audit.rules(*strict, config);
            if *audit == Audit::All {
                rules.extend(pattern_rules);
            }
            Ok(rules)
        }
        Selection::Rules(names) => {
            let (custom, builtin): (Vec<&String>, Vec<&String>) = names
                .iter()
                .partition(|n| pattern_rules.iter().any(|r| r.name() == n.trim()));
            let mut rules = select_rules(&builtin, config)?;
            rules.extend(
                pattern_rules
                    .into_iter()
                    .filter(|r| custom.iter().any(|n| n.trim() == r.name())),
            );
            Ok(rules)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ConfigOrigin;
    use crate::OutputFormat;
    use sitelint_core::declarative::load_rules_from_toml;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn names(rules: &[RuleBox]) -> Vec<&str> {
        rules.iter().map(|r| r.name()).collect()
    }

    fn settings(config: &Path, target: &TargetArgs) -> Settings {
        let origin = ConfigOrigin::WorkingDir(config.to_path_buf());
        Settings::load(origin, target.root.as_deref()).unwrap()
    }

    fn favicon() -> Vec<RuleBox> {
        load_rules_from_toml(
            r#"
[[pattern-rule]]
name = "has-favicon"
selector = "<head"
require = "icon"
"#,
        )
        .unwrap()
    }

    #[test]
    fn pattern_rules_only_join_the_full_audit() {
        let config = Config::default();
        let seo = build_rules(&Selection::Audit(Audit::Seo, false), &config, favicon()).unwrap();
        assert_eq!(names(&seo), vec!["seo-tags"]);

        let all = build_rules(&Selection::Audit(Audit::All, false), &config, favicon()).unwrap();
        assert_eq!(all.len(), 9);
        assert_eq!(all.last().map(|r| r.name()), Some("has-favicon"));
    }

    #[test]
    fn check_mixes_builtin_and_pattern_rules() {
        let config = Config::default();
        let selection = Selection::Rules(vec!["has-favicon".into(), "SL002".into()]);
        let rules = build_rules(&selection, &config, favicon()).unwrap();
        assert_eq!(names(&rules), vec!["lang-attr", "has-favicon"]);

        let unknown = Selection::Rules(vec!["nope".into()]);
        assert!(build_rules(&unknown, &config, favicon()).is_err());
    }

    #[test]
    fn exit_codes_follow_fail_on() {
        let tmp = TempDir::new().unwrap();
        let site = tmp.path().join("site");
        fs::create_dir(&site).unwrap();
        fs::write(site.join("index.html"), "<html><body></body></html>").unwrap();

        let config = tmp.path().join("sitelint.toml");
        let target = TargetArgs {
            root: Some(site.clone()),
            format: OutputFormat::Compact,
            exclude: Vec::new(),
        };
        let selection = Selection::Audit(Audit::A11y, false);

        fs::write(&config, "[rules.lang-attr]\nseverity = \"warning\"\n").unwrap();
        let code = run(&selection, &target, settings(&config, &target)).unwrap();
        assert_eq!(code, ExitCode::from(1));

        fs::write(
            &config,
            "fail_on = \"error\"\n[rules.lang-attr]\nseverity = \"warning\"\n",
        )
        .unwrap();
        let code = run(&selection, &target, settings(&config, &target)).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
    }

    #[test]
    fn missing_root_is_an_analyzer_error() {
        let target = TargetArgs {
            root: Some(PathBuf::from("/definitely/not/here")),
            ..TargetArgs::default()
        };
        let settings = Settings::load(ConfigOrigin::Builtin, target.root.as_deref()).unwrap();
        let Err(err) = run(&Selection::Audit(Audit::Links, false), &target, settings) else {
            panic!("expected a fatal error");
        };
        assert!(err.downcast_ref::<sitelint_core::AnalyzerError>().is_some());
    }
}
