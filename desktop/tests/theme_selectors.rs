#![cfg(test)]
/*!
Theme selector lint for the desktop build.

The dashboard, log and goals components rely on these class names being
styled by the shared theme (`ui/assets/theme/main.css`). When renaming a
class in markup, update the theme and this list together.
*/

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

const REQUIRED_SELECTORS: &[&str] = &[
    // Global / layout
    ":root",
    "body {",
    ".page {",
    ".page__header",
    ".dashboard__split",
    // Panels
    ".panel {",
    ".panel__header",
    ".panel__title",
    ".panel__subtitle",
    ".panel__placeholder",
    ".panel__meta--success",
    ".panel__meta--error",
    // Buttons & toggles
    ".button {",
    ".button--primary",
    ".button--ghost",
    ".button--small",
    ".chip--active",
    // Snapshot cards
    ".snapshot__grid",
    ".metric-card {",
    ".metric-card--closing",
    ".metric-card__fill",
    ".metric-card__input",
    // Charts
    ".chart {",
    ".chart__grid",
    ".chart__tick",
    ".chart__goal",
    ".chart__goal-label",
    ".trend__toggles",
    // Insight
    ".insight__text--pending",
    // Log page
    ".entry-form__grid",
    ".field__input",
    ".history__table",
    ".export__actions",
    // Goals page
    ".goal-row {",
    ".goals__actions",
    // Notice banner
    ".notice {",
    // Responsive block
    "@media (max-width: 720px)",
];

#[test]
fn unified_theme_contains_required_selectors() {
    let missing: Vec<_> = REQUIRED_SELECTORS
        .iter()
        .copied()
        .filter(|sel| !THEME_CSS.contains(sel))
        .collect();

    if !missing.is_empty() {
        panic!(
            "Missing {} required CSS selectors/tokens in unified theme:\n{}",
            missing.len(),
            missing.join("\n")
        );
    }
}

#[test]
fn unified_theme_not_trivially_empty() {
    let non_ws_len = THEME_CSS.chars().filter(|c| !c.is_whitespace()).count();
    assert!(
        non_ws_len > 4_000,
        "Embedded theme appears unexpectedly small ({non_ws_len} non-whitespace chars) – \
         did the file get truncated or path change?"
    );
}
