//! Bundled translation tables for rule names, terms, and correction messages.
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;

pub const DEFAULT_LANG: &str = "en";
pub const SUPPORTED_LANGS: [&str; 2] = ["en", "zh"];

#[allow(clippy::match_same_arms)]
fn load_translations(lang: &str) -> Option<Value> {
    let bundle = match lang {
        "en" => include_str!("../i18n/en.json"),
        "zh" => include_str!("../i18n/zh.json"),
        _ => include_str!("../i18n/en.json"), // Default to English
    };

    serde_json::from_str(bundle).ok()
}

fn bundle(lang: &str) -> &'static Value {
    static EN: OnceLock<Value> = OnceLock::new();
    static ZH: OnceLock<Value> = OnceLock::new();
    let cell = if lang == "zh" { &ZH } else { &EN };
    cell.get_or_init(|| {
        load_translations(lang).unwrap_or_else(|| Value::Object(serde_json::Map::new()))
    })
}

/// Resolve a dotted key; a literal key at any level wins over descending.
fn get_nested_value(obj: &Value, key: &str) -> Option<String> {
    if let Some(text) = obj.get(key).and_then(Value::as_str) {
        return Some(text.to_string());
    }
    let (head, rest) = key.split_once('.')?;
    get_nested_value(obj.get(head)?, rest)
}

#[must_use]
pub fn is_supported(lang: &str) -> bool {
    SUPPORTED_LANGS.contains(&lang)
}

#[must_use]
pub fn t(lang: &str, key: &str) -> String {
    tr(lang, key, None)
}

/// Translate `key`, falling back to English and then to the key itself.
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn tr(lang: &str, key: &str, args: Option<&HashMap<&str, &str>>) -> String {
    let result = get_nested_value(bundle(lang), key)
        .or_else(|| get_nested_value(bundle(DEFAULT_LANG), key));

    match result {
        Some(mut text) => {
            // Handle template variables like {{var}} and {var}
            if let Some(args_map) = args {
                for (k, v) in args_map {
                    let ph1 = format!("{{{{{k}}}}}"); // {{var}}
                    let ph2 = format!("{{{k}}}"); // {var}
                    text = text.replace(&ph1, v);
                    text = text.replace(&ph2, v);
                }
            }
            text
        }
        None => key.to_string(),
    }
}
