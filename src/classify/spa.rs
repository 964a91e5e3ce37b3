//! Client-rendered (SPA) page detection
//!
//! Three kinds of signal are collected from the raw HTML:
//! - framework markers: build artifacts of common client-rendering frameworks
//! - structural: an empty root container such as `<div id="root"></div>`
//! - minimal content: fewer than [`MIN_VISIBLE_CHARS`] visible characters
//!
//! A framework marker on its own proves nothing, since server-rendered
//! pages ship the same bundles, so it only counts alongside at least one
//! other indicator (another framework, an empty root, or minimal content).
//! Minimal content counts on its own.

use crate::extract::visible_text_from_document;
use regex::Regex;
use scraper::Html;
use std::sync::OnceLock;

/// Pages with fewer visible characters than this look unrendered
pub const MIN_VISIBLE_CHARS: usize = 200;

/// A named framework and the substrings that betray it
struct FrameworkMarker {
    indicator: &'static str,
    needles: &'static [&'static str],
}

const FRAMEWORK_MARKERS: &[FrameworkMarker] = &[
    FrameworkMarker {
        indicator: "Next.js build markers",
        needles: &["__NEXT_DATA__", "/_next/static/"],
    },
    FrameworkMarker {
        indicator: "Nuxt build markers",
        needles: &["__NUXT__", "/_nuxt/"],
    },
    FrameworkMarker {
        indicator: "React root markers",
        needles: &["data-reactroot", "data-reactid"],
    },
    FrameworkMarker {
        indicator: "Create React App bundle",
        needles: &["/static/js/main.", "/static/js/bundle.js"],
    },
    FrameworkMarker {
        indicator: "Angular markers",
        needles: &["ng-version=", "ng-app", "<app-root"],
    },
    FrameworkMarker {
        indicator: "Vue app markers",
        needles: &["data-v-app", "id=\"app\" data-v-"],
    },
    FrameworkMarker {
        indicator: "Gatsby markers",
        needles: &["___gatsby", "/page-data/app-data.json"],
    },
    FrameworkMarker {
        indicator: "SvelteKit markers",
        needles: &["__sveltekit", "data-sveltekit"],
    },
    FrameworkMarker {
        indicator: "Ember markers",
        needles: &["ember-application", "ember-cli"],
    },
];

static EMPTY_ROOT_RE: OnceLock<Regex> = OnceLock::new();

fn empty_root_re() -> &'static Regex {
    EMPTY_ROOT_RE.get_or_init(|| {
        Regex::new(
            r#"(?is)<div\b[^>]*\bid\s*=\s*["'](?:root|app|__next|__nuxt|___gatsby|svelte)["'][^>]*>\s*</div>"#,
        )
        .expect("empty root regex is valid")
    })
}

/// Signals gathered from one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpaSignals {
    /// Indicators of every framework whose markers were found
    pub framework_markers: Vec<&'static str>,

    /// An empty root container was found
    pub empty_root: bool,

    /// Visible character count
    pub visible_chars: usize,
}

impl SpaSignals {
    /// Collects every signal from raw HTML
    pub fn collect(html: &str) -> Self {
        let document = Html::parse_document(html);
        let visible_chars = visible_text_from_document(&document).chars().count();

        let framework_markers = FRAMEWORK_MARKERS
            .iter()
            .filter(|marker| marker.needles.iter().any(|needle| html.contains(needle)))
            .map(|marker| marker.indicator)
            .collect();

        Self {
            framework_markers,
            empty_root: empty_root_re().is_match(html),
            visible_chars,
        }
    }

    fn minimal_content(&self) -> bool {
        self.visible_chars < MIN_VISIBLE_CHARS
    }

    fn has_framework_marker(&self) -> bool {
        !self.framework_markers.is_empty()
    }

    /// Human-readable descriptions of every signal that fired
    pub fn indicators(&self) -> Vec<String> {
        let mut indicators: Vec<String> = self
            .framework_markers
            .iter()
            .map(|indicator| indicator.to_string())
            .collect();

        if self.empty_root {
            indicators.push("Empty root container".to_string());
        }

        if self.minimal_content() {
            indicators.push(format!(
                "Minimal visible content ({} characters)",
                self.visible_chars
            ));
        }

        indicators
    }
}

/// A rule that classifies a page as client-rendered when its predicate holds
struct SpaRule {
    name: &'static str,
    applies: fn(&SpaSignals) -> bool,
}

/// Ordered rules; the first match decides
const SPA_RULES: &[SpaRule] = &[
    SpaRule {
        name: "minimal visible content",
        applies: SpaSignals::minimal_content,
    },
    SpaRule {
        name: "framework marker with another indicator",
        applies: framework_with_corroboration,
    },
];

fn framework_with_corroboration(signals: &SpaSignals) -> bool {
    signals.has_framework_marker() && signals.indicators().len() >= 2
}

/// Outcome of SPA detection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpaDetection {
    /// True if the page looks client-rendered
    pub is_spa: bool,

    /// Descriptions of every signal that fired, whether or not it decided
    /// the outcome
    pub indicators: Vec<String>,

    /// Name of the rule that classified the page
    pub matched_rule: Option<&'static str>,
}

/// Detects whether a page's content is rendered client-side
///
/// # Example
///
/// ```
/// use site_survey::classify::detect_spa;
///
/// let shell = r#"<html><body><div id="root"></div><script src="/static/js/main.js"></script></body></html>"#;
/// let detection = detect_spa(shell);
/// assert!(detection.is_spa);
/// assert!(detection.indicators.iter().any(|i| i.contains("Empty root")));
/// ```
pub fn detect_spa(html: &str) -> SpaDetection {
    let signals = SpaSignals::collect(html);
    classify_signals(&signals)
}

/// Applies [`SPA_RULES`] to already-collected signals
pub fn classify_signals(signals: &SpaSignals) -> SpaDetection {
    let matched_rule = SPA_RULES
        .iter()
        .find(|rule| (rule.applies)(signals))
        .map(|rule| rule.name);

    SpaDetection {
        is_spa: matched_rule.is_some(),
        indicators: signals.indicators(),
        matched_rule,
    }
}
