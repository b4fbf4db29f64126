//! Translation completeness.
//!
//! - every `t!("...")` key used under `src/` exists in the en-US fallback
//! - every other locale defines every fallback key, without duplicates
//!
//! Adding a locale means adding `i18n/<locale>/bodymetrics-ui.ftl` and
//! registering it in `LOCALES` below.

use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

const EN_US: &str = include_str!("../i18n/en-US/bodymetrics-ui.ftl");
const ES_ES: &str = include_str!("../i18n/es-ES/bodymetrics-ui.ftl");
const FR_FR: &str = include_str!("../i18n/fr-FR/bodymetrics-ui.ftl");

const LOCALES: &[(&str, &str)] = &[("es-ES", ES_ES), ("fr-FR", FR_FR)];

#[test]
fn all_locales_have_all_fallback_keys() {
    let fallback_keys = extract_keys(EN_US);
    assert!(!fallback_keys.is_empty(), "Fallback (en-US) contains no keys.");
    assert_no_dup_keys(EN_US, "en-US");

    let mut failures = Vec::new();
    for (locale, src) in LOCALES {
        assert_no_dup_keys(src, locale);

        let keys = extract_keys(src);
        let missing: BTreeSet<_> = fallback_keys.difference(&keys).cloned().collect();
        if !missing.is_empty() {
            failures.push(format!(
                "Locale {locale} is missing {} key(s):\n  {}",
                missing.len(),
                missing.into_iter().collect::<Vec<_>>().join("\n  ")
            ));
        }
    }

    if !failures.is_empty() {
        panic!(
            "Translation completeness check failed:\n\n{}\n\nHint: copy the missing keys from en-US, then translate.",
            failures.join("\n\n")
        );
    }
}

#[test]
fn referenced_keys_exist_in_fallback() {
    let src_root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src");
    let referenced = referenced_keys(&src_root);
    assert!(
        referenced.contains("nav-dashboard"),
        "Source scan found no navbar keys; did the macro name change?"
    );

    let fallback_keys: BTreeSet<_> = extract_keys(EN_US).into_iter().collect();
    let missing: Vec<_> = referenced
        .iter()
        .filter(|key| !fallback_keys.contains(*key))
        .cloned()
        .collect();
    assert!(
        missing.is_empty(),
        "Referenced translation keys missing in en-US:\n{}",
        missing.join("\n")
    );
}

/// Message ids: lines of the form `key = ...`. Comments, attributes and
/// terms are skipped.
fn extract_keys(src: &str) -> HashSet<String> {
    src.lines()
        .filter_map(message_key)
        .map(str::to_string)
        .collect()
}

fn message_key(line: &str) -> Option<&str> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') || line.starts_with('.') || line.starts_with('-') {
        return None;
    }
    let (left, _) = line.split_once('=')?;
    let key = left.trim();
    let valid = !key.is_empty() && key.chars().all(|c| matches!(c, 'a'..='z' | '0'..='9' | '-'));
    valid.then_some(key)
}

fn assert_no_dup_keys(src: &str, locale: &str) {
    let mut seen = HashSet::new();
    let dups: BTreeSet<_> = src
        .lines()
        .filter_map(message_key)
        .filter(|key| !seen.insert(*key))
        .collect();

    if !dups.is_empty() {
        panic!(
            "Duplicate key definitions in {locale}:\n  {}",
            dups.into_iter().collect::<Vec<_>>().join("\n  ")
        );
    }
}

/// Literal first arguments of `t!("...")` across the source tree.
fn referenced_keys(root: &Path) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    let mut stack = vec![root.to_path_buf()];
    let needle = "t!(\"";

    while let Some(path) = stack.pop() {
        if path.is_dir() {
            if let Ok(read_dir) = fs::read_dir(&path) {
                stack.extend(read_dir.flatten().map(|entry| entry.path()));
            }
            continue;
        }
        if path.extension().and_then(|s| s.to_str()) != Some("rs") {
            continue;
        }
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };

        let mut rest = content.as_str();
        while let Some(pos) = rest.find(needle) {
            rest = &rest[pos + needle.len()..];
            if let Some(end) = rest.find('"') {
                let key = &rest[..end];
                if key.chars().all(|c| matches!(c, 'a'..='z' | '0'..='9' | '-')) {
                    found.insert(key.to_string());
                }
                rest = &rest[end..];
            }
        }
    }

    found
}
