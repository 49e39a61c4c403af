use serde::Serialize;
use std::fmt;

/// A column identifier: one label per header level, outermost first.
/// Flat tables use single-label keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ColumnKey(Vec<String>);

impl ColumnKey {
    pub fn new<S: Into<String>>(labels: impl IntoIterator<Item = S>) -> Self {
        ColumnKey(labels.into_iter().map(Into::into).collect())
    }

    pub fn levels(&self) -> &[String] {
        &self.0
    }

    pub fn level(&self, level: usize) -> Option<&str> {
        self.0.get(level).map(String::as_str)
    }

    pub(crate) fn set_level(&mut self, level: usize, label: String) {
        if let Some(slot) = self.0.get_mut(level) {
            *slot = label;
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if `name` appears at any level.
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|label| label == name)
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" - "))
    }
}

impl From<&str> for ColumnKey {
    fn from(label: &str) -> Self {
        ColumnKey(vec![label.to_owned()])
    }
}

impl<const N: usize> From<[&str; N]> for ColumnKey {
    fn from(labels: [&str; N]) -> Self {
        ColumnKey::new(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_and_display() {
        let key = ColumnKey::from(["Thời gian", "Hè"]);
        assert_eq!(key.len(), 2);
        assert_eq!(key.level(1), Some("Hè"));
        assert_eq!(key.level(2), None);
        assert!(key.contains("Thời gian"));
        assert_eq!(key.to_string(), "Thời gian - Hè");
        assert_eq!(serde_json::to_string(&key).unwrap(), r#"["Thời gian","Hè"]"#);
    }
}
