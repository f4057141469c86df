// crates/biou-console-client/src/tests/i18n.rs
// ============================================================================
// Module: Catalog Tests
// Description: Unit tests for catalog parity and locale parsing.
// Purpose: Keep the English and Chinese catalogs in step.
// Dependencies: biou-console-client i18n module
// ============================================================================

//! ## Overview
//! Verifies both catalogs carry the same keys and placeholders, locale
//! parsing tolerates region tags, and translation falls back sensibly.

use std::collections::BTreeSet;

use crate::i18n::Locale;
use crate::i18n::MessageArg;
use crate::i18n::SUPPORTED_LOCALES;
use crate::i18n::catalog_entries_for;
use crate::i18n::catalog_for;
use crate::i18n::translate_in;

fn placeholder_names(template: &str) -> Result<BTreeSet<String>, String> {
    let mut names = BTreeSet::new();
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1 ..];
        let Some(close) = after.find('}') else {
            return Err(format!("unclosed '{{' in '{template}'"));
        };
        let name = &after[.. close];
        if name.is_empty() || !name.chars().all(|ch| ch.is_ascii_lowercase() || ch == '_') {
            return Err(format!("placeholder '{name}' must use [a-z_]"));
        }
        names.insert(name.to_string());
        rest = &after[close + 1 ..];
    }
    if rest.contains('}') {
        return Err(format!("unmatched '}}' in '{template}'"));
    }
    Ok(names)
}

#[test]
fn catalogs_have_matching_keys() {
    let en_keys: BTreeSet<&'static str> = catalog_for(Locale::En).keys().copied().collect();
    for locale in SUPPORTED_LOCALES {
        let locale_keys: BTreeSet<&'static str> = catalog_for(*locale).keys().copied().collect();
        assert_eq!(en_keys, locale_keys, "locale catalogs must stay in parity ({locale:?})");
    }
}

#[test]
fn catalogs_have_unique_keys_per_locale() {
    for locale in SUPPORTED_LOCALES {
        let entries = catalog_entries_for(*locale);
        let unique: BTreeSet<&str> = entries.iter().map(|(key, _)| *key).collect();
        assert_eq!(unique.len(), entries.len(), "duplicate catalog keys in {locale:?}");
    }
}

#[test]
fn catalogs_have_placeholder_parity_with_english() {
    for (key, en_template) in catalog_entries_for(Locale::En) {
        let en_names = placeholder_names(en_template).unwrap();
        let zh_template = catalog_for(Locale::ZhCn).get(key).copied().unwrap();
        let zh_names = placeholder_names(zh_template).unwrap();
        assert_eq!(en_names, zh_names, "placeholder mismatch for '{key}'");
    }
}

#[test]
fn chinese_notices_match_console_wording() {
    let zh = |key: &str| translate_in(Locale::ZhCn, key, Vec::new());
    assert_eq!(zh("notice.network_unreachable"), "网络连接异常，请检查网络设置");
    assert_eq!(zh("notice.session_expired"), "登录已过期，请重新登录");
    assert_eq!(zh("notice.forbidden"), "权限不足，请联系管理员");
    assert_eq!(zh("notice.endpoint_not_found"), "请求的接口不存在");
    assert_eq!(zh("notice.server_error"), "服务器内部错误，请稍后重试");
}

#[test]
fn locale_parse_accepts_region_tags_and_case() {
    assert_eq!(Locale::parse("en"), Some(Locale::En));
    assert_eq!(Locale::parse("EN-us"), Some(Locale::En));
    assert_eq!(Locale::parse("zh"), Some(Locale::ZhCn));
    assert_eq!(Locale::parse("zh-CN"), Some(Locale::ZhCn));
    assert_eq!(Locale::parse("zh_cn"), Some(Locale::ZhCn));
    assert_eq!(Locale::parse(""), None);
    assert_eq!(Locale::parse("fr"), None);
    assert_eq!(Locale::ZhCn.as_str(), "zh-CN");
}

#[test]
fn translate_substitutes_placeholders() {
    let output = translate_in(
        Locale::ZhCn,
        "notice.request_failed_status",
        vec![MessageArg::new("status", "502")],
    );
    assert_eq!(output, "请求失败: 502");
}

#[test]
fn translate_falls_back_to_key_when_missing() {
    assert_eq!(translate_in(Locale::ZhCn, "no.such.key", Vec::new()), "no.such.key");
}
