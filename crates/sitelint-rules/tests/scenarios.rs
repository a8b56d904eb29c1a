//! End-to-end audits over fixture site trees.

use sitelint_core::report::render_text;
use sitelint_core::{Analyzer, Config, Detail, LintResult};
use sitelint_rules::Audit;
use std::fs;
use std::path::Path;
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

fn audit(root: &Path, audit: Audit) -> LintResult {
    let config = Config::default();
    Analyzer::builder()
        .root(root)
        .rules(audit.rules(false, &config))
        .config(config)
        .build()
        .unwrap()
        .analyze()
        .unwrap()
}

fn rule_names(result: &LintResult) -> Vec<&str> {
    result.violations.iter().map(|v| v.rule.as_str()).collect()
}

#[test]
fn scenario_a_missing_lang_and_viewport() {
    let tmp = site(&[(
        "index.html",
        "<html>\n<head><title>Home</title></head>\n<body></body>\n</html>",
    )]);

    let result = audit(tmp.path(), Audit::A11y);
    assert_eq!(rule_names(&result), vec!["lang-attr", "viewport"]);

    let text = render_text(&result, Path::new("site"), &Audit::A11y.headings(2));
    insta::assert_snapshot!(text, @r"
    Accessibility check report:
    - site/index.html: lang-attr
    - site/index.html: viewport
    ");
}

#[test]
fn pages_without_images_never_fail_img_alt() {
    let tmp = site(&[
        ("plain.html", "<html lang=\"en\"><body><p>no images</p></body></html>"),
        ("css/site.css", "img { border: 0; }"),
    ]);
    let result = audit(tmp.path(), Audit::A11y);
    assert!(result.is_clean());
    assert_eq!(result.files_checked, 1);
}

#[test]
fn scenario_b_missing_image_reference() {
    let tmp = site(&[(
        "pages/index.html",
        r#"<a href="../about.html">About</a><img src="missing.png">"#,
    )]);
    fs::write(tmp.path().join("about.html"), "").unwrap();

    let result = audit(tmp.path(), Audit::Links);
    let refs: Vec<_> = result
        .violations
        .iter()
        .filter_map(|v| match &v.detail {
            Some(Detail::Reference {
                attribute, value, ..
            }) => Some(format!("{attribute}=\"{value}\"")),
            _ => None,
        })
        .collect();
    assert_eq!(refs, vec![r#"src="missing.png""#]);

    let text = render_text(&result, Path::new("site"), &Audit::Links.headings(1));
    insta::assert_snapshot!(text, @r#"
    Found 1 missing references:
    - src="missing.png" in site/pages/index.html
    "#);
}

#[test]
fn scenario_c_css_url_that_exists() {
    let tmp = site(&[
        ("css/site.css", "@font-face { src: url(fonts/brand.woff2); }"),
        ("css/fonts/brand.woff2", ""),
    ]);
    let result = audit(tmp.path(), Audit::Links);
    assert!(result.is_clean());
    assert_eq!(result.files_checked, 1);
}

#[test]
fn scenario_d_theme_variants() {
    let page = r#"<button class="themeswitch"></button><img src="logo.png">"#;
    let tmp = site(&[("index.html", page)]);

    assert!(audit(tmp.path(), Audit::ThemeAssets).is_clean());

    fs::write(tmp.path().join("logo-dark.png"), "").unwrap();
    let result = audit(tmp.path(), Audit::ThemeAssets);
    assert_eq!(result.violations.len(), 1);
    assert_eq!(
        result.violations[0].detail,
        Some(Detail::ThemeVariant {
            source: "logo.png".into(),
            missing: "logo-light.png".into(),
        })
    );
}

#[test]
fn external_references_never_fail() {
    let tmp = site(&[(
        "index.html",
        r##"<a href="https://example.com/x.png"></a><a href="mailto:a@b.com"></a><a href="#section"></a><img src="data:image/png;base64,AAAA">"##,
    )]);
    assert!(audit(tmp.path(), Audit::Links).is_clean());
}

#[test]
fn root_relative_references_resolve_from_any_depth() {
    let tmp = site(&[
        ("a/b.css", ""),
        ("index.html", r#"<link href="/a/b.css">"#),
        ("deep/er/page.html", r#"<link href="/a/b.css"><link href="/a/c.css">"#),
    ]);
    let result = audit(tmp.path(), Audit::Links);
    assert_eq!(result.violations.len(), 1);
    assert_eq!(
        result.violations[0].file,
        Path::new("deep/er/page.html").to_path_buf()
    );
}

#[test]
fn seo_findings_group_per_file() {
    let head = r#"<head><title>t</title>
<meta name="description" content="d">
<meta property="og:title" content="t"><meta property="og:description" content="d">
<meta property="og:type" content="website"><meta property="og:url" content="u">
<meta property="og:image" content="i"><meta name="twitter:card" content="c">
<meta name="twitter:title" content="t"><meta name="twitter:description" content="d">
</head>"#;
    let tmp = site(&[("index.html", head)]);

    let result = audit(tmp.path(), Audit::Seo);
    let text = render_text(
        &result,
        Path::new("site"),
        &Audit::Seo.headings(result.violations.len()),
    );
    insta::assert_snapshot!(text, @r"
    SEO check report:
    - site/index.html
      missing: twitterImage, canonical
    ");
}

#[test]
fn full_audit_is_idempotent() {
    let tmp = site(&[
        ("index.html", r#"<html><head></head><img src="x.png"><label>n</label></html>"#),
        ("about/index.html", r#"<html lang="en"><a href="../gone.html"></a></html>"#),
        ("css/a.css", "div { background: url('../img/bg.png') }"),
        (".hidden/skip.html", "<html>"),
    ]);

    let render = || {
        let result = audit(tmp.path(), Audit::All);
        render_text(
            &result,
            Path::new("site"),
            &Audit::All.headings(result.violations.len()),
        )
    };
    let first = render();
    assert_eq!(first, render());
    assert!(!first.contains(".hidden"));
}

#[test]
fn strict_mode_adds_element_scoped_rules() {
    let tmp = site(&[(
        "index.html",
        "<html lang=\"en\"><img src=\"a.png\" alt=\"a\">\n<img src=\"b.png\"></html>",
    )]);
    let config = Config::default();
    let result = Analyzer::builder()
        .root(tmp.path())
        .rules(Audit::A11y.rules(true, &config))
        .build()
        .unwrap()
        .analyze()
        .unwrap();

    assert_eq!(rule_names(&result), vec!["img-alt-strict"]);
    assert_eq!(result.violations[0].line, Some(2));
}

#[test]
fn declarative_rules_run_next_to_built_ins() {
    let toml = r#"
[[pattern-rule]]
name = "has-favicon"
selector = '(?i)<head\b'
require = '(?i)<link[^>]+rel="icon"'
scope = "head"
message = "page has no favicon"

[[pattern-rule]]
name = "broken"
selector = "("
require = "x"
"#;
    let tmp = site(&[("index.html", "<head></head>")]);
    let rules = sitelint_core::declarative::load_rules_from_toml(toml).unwrap();

    let result = Analyzer::builder()
        .root(tmp.path())
        .rules(rules)
        .build()
        .unwrap()
        .analyze()
        .unwrap();

    let messages: Vec<_> = result.violations.iter().map(|v| v.message.as_str()).collect();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0], "page has no favicon");
    assert!(messages[1].starts_with("rule error: invalid pattern `(`"));
}
