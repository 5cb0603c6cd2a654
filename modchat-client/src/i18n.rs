//! Translations
//!
//! Strings live in Fluent files under `locales/` and are embedded at build
//! time. The bundle is chosen once from the system locale; unknown locales
//! fall back to English, and unknown keys render as the key itself.

use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use once_cell::sync::Lazy;
use unic_langid::LanguageIdentifier;

/// Locale used when the system locale has no translation
pub const DEFAULT_LOCALE: &str = "en";

/// Embedded translations as (language, source)
const TRANSLATIONS: &[(&str, &str)] = &[("en", include_str!("../locales/en.ftl"))];

static BUNDLE: Lazy<FluentBundle<FluentResource>> = Lazy::new(|| {
    let locale = sys_locale::get_locale().unwrap_or_else(|| DEFAULT_LOCALE.to_string());
    build_bundle(&locale)
});

/// Pick the embedded translation for a locale tag like `de-AT` or `en_US`
fn resolve_translation(locale: &str) -> (&'static str, &'static str) {
    let language = locale
        .split(['-', '_', '.'])
        .next()
        .unwrap_or(DEFAULT_LOCALE)
        .to_lowercase();

    TRANSLATIONS
        .iter()
        .find(|(tag, _)| *tag == language)
        .or_else(|| TRANSLATIONS.iter().find(|(tag, _)| *tag == DEFAULT_LOCALE))
        .copied()
        .unwrap_or(("en", ""))
}

fn build_bundle(locale: &str) -> FluentBundle<FluentResource> {
    let (tag, source) = resolve_translation(locale);
    let langid: LanguageIdentifier = tag.parse().unwrap_or_default();

    let mut bundle = FluentBundle::new_concurrent(vec![langid]);
    // Unicode isolation marks render as boxes in some fonts
    bundle.set_use_isolating(false);

    let resource = match FluentResource::try_new(source.to_string()) {
        Ok(resource) => resource,
        Err((resource, errors)) => {
            tracing::warn!(locale = tag, ?errors, "translation file has syntax errors");
            resource
        }
    };

    if let Err(errors) = bundle.add_resource(resource) {
        tracing::warn!(locale = tag, ?errors, "duplicate translation keys");
    }

    bundle
}

fn format(bundle: &FluentBundle<FluentResource>, key: &str, args: Option<&FluentArgs>) -> String {
    let Some(pattern) = bundle.get_message(key).and_then(|m| m.value()) else {
        return key.to_string();
    };

    let mut errors = Vec::new();
    let value = bundle.format_pattern(pattern, args, &mut errors);
    if !errors.is_empty() {
        tracing::debug!(key, ?errors, "translation formatting errors");
    }
    value.into_owned()
}

/// Translate a key
pub fn t(key: &str) -> String {
    format(&BUNDLE, key, None)
}

/// Translate a key with string arguments
pub fn t_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut fluent_args = FluentArgs::new();
    for (name, value) in args {
        fluent_args.set(*name, value.to_string());
    }
    format(&BUNDLE, key, Some(&fluent_args))
}

/// Translate a key whose `$count` argument drives plural selection
pub fn t_count(key: &str, count: usize) -> String {
    let mut fluent_args = FluentArgs::new();
    fluent_args.set("count", FluentValue::from(count));
    format(&BUNDLE, key, Some(&fluent_args))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_translation_falls_back_to_english() {
        assert_eq!(resolve_translation("en-US").0, "en");
        assert_eq!(resolve_translation("en_GB.UTF-8").0, "en");
        assert_eq!(resolve_translation("xx-YY").0, "en");
        assert_eq!(resolve_translation("").0, "en");
    }

    #[test]
    fn test_english_bundle_formats() {
        let bundle = build_bundle("en-US");
        assert_eq!(format(&bundle, "button-ok", None), "OK");
        assert_eq!(format(&bundle, "no-such-key", None), "no-such-key");

        let mut args = FluentArgs::new();
        args.set("name", "Alice");
        assert_eq!(
            format(&bundle, "typing-one", Some(&args)),
            "Alice is typing..."
        );
    }

    #[test]
    fn test_member_count_plural() {
        let bundle = build_bundle("en");
        let mut one = FluentArgs::new();
        one.set("count", FluentValue::from(1usize));
        assert_eq!(format(&bundle, "member-count", Some(&one)), "1 member");

        let mut many = FluentArgs::new();
        many.set("count", FluentValue::from(3usize));
        assert_eq!(format(&bundle, "member-count", Some(&many)), "3 members");
    }

    #[test]
    fn test_moderation_alert_text() {
        assert!(t("alert-message-blocked").starts_with("Your message was blocked."));
    }
}
