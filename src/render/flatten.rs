use crate::config::EngineConfig;
use crate::table::ColumnKey;

/// Compresses a label to the first letter of each word plus that word's
/// digits, keeping case: `"Chi Phí"` → `"CP"`, `"Năm 2024"` → `"N2024"`.
pub fn create_acronym(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let initial = word.chars().find(|character| character.is_alphabetic());
            let digits = word.chars().filter(char::is_ascii_digit);
            initial.into_iter().chain(digits).collect::<String>()
        })
        .collect()
}

fn is_placeholder(label: &str, config: &EngineConfig) -> bool {
    let label = label.trim();
    label.is_empty() || label == config.header_sentinel || label.starts_with(&config.unnamed_prefix)
}

/// One display name per column. A flat header is returned unchanged; a
/// multi-level key drops its placeholder parts, then keeps a single part
/// verbatim or joins acronyms of the outer parts with the leaf part.
pub fn flatten_column_names(columns: &[ColumnKey], config: &EngineConfig) -> Vec<String> {
    columns
        .iter()
        .map(|key| {
            if key.len() <= 1 {
                return key.to_string();
            }
            let parts: Vec<&str> = key
                .levels()
                .iter()
                .map(String::as_str)
                .filter(|label| !is_placeholder(label, config))
                .collect();
            match parts.split_last() {
                None => config.default_flat_label.to_owned(),
                Some((leaf, [])) => (*leaf).to_owned(),
                Some((leaf, outer)) => {
                    let mut words: Vec<String> = outer.iter().map(|part| create_acronym(part)).collect();
                    words.push((*leaf).to_owned());
                    words.join(" ")
                }
            }
        })
        .collect()
}
