//! Options controlling how a rendered PDF is made fillable.

use std::collections::BTreeMap;

use crate::MarkerFormat;

/// Dropdown choices keyed by field name.
///
/// A flattened PDF carries no trace of a `<select>`'s options, so they
/// travel next to the PDF bytes instead.
pub type SelectOptions = BTreeMap<String, Vec<String>>;

/// Default text appearance for created text and choice fields:
/// auto-sized Helvetica, black.
pub const DEFAULT_APPEARANCE: &str = "/Helv 0 Tf 0 g";

/// Options for turning a rendered PDF into a fillable one.
///
/// Every setting has a sensible default; most callers only fill in
/// `select_options`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FillOptions {
    /// Marker URL format. Must match the one used to annotate the HTML.
    pub marker: MarkerFormat,
    /// Choices for `select` fields, keyed by field name.
    pub select_options: SelectOptions,
    /// Maximum input PDF size in bytes (default: None = no limit).
    pub max_input_bytes: Option<usize>,
    /// `/DA` string for created text and choice fields.
    pub default_appearance: String,
}

impl Default for FillOptions {
    fn default() -> Self {
        Self {
            marker: MarkerFormat::default(),
            select_options: SelectOptions::new(),
            max_input_bytes: None,
            default_appearance: DEFAULT_APPEARANCE.to_string(),
        }
    }
}

impl FillOptions {
    /// Default options with the given select choices.
    pub fn with_select_options(select_options: SelectOptions) -> Self {
        Self {
            select_options,
            ..Self::default()
        }
    }

    /// Merge `extra` choices in; entries already present are kept.
    pub fn merge_select_options(&mut self, extra: SelectOptions) {
        for (name, options) in extra {
            self.select_options.entry(name).or_insert(options);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let opts = FillOptions::default();
        assert_eq!(opts.marker, MarkerFormat::default());
        assert!(opts.select_options.is_empty());
        assert!(opts.max_input_bytes.is_none());
        assert_eq!(opts.default_appearance, "/Helv 0 Tf 0 g");
    }

    #[test]
    fn with_select_options_keeps_other_defaults() {
        let mut choices = SelectOptions::new();
        choices.insert("country".to_string(), vec!["US".to_string(), "FR".to_string()]);
        let opts = FillOptions::with_select_options(choices);
        assert_eq!(opts.select_options["country"], vec!["US", "FR"]);
        assert_eq!(opts.default_appearance, DEFAULT_APPEARANCE);
    }

    #[test]
    fn merge_select_options_keeps_existing_entries() {
        let mut opts = FillOptions::default();
        opts.select_options
            .insert("size".to_string(), vec!["S".to_string()]);

        let mut extra = SelectOptions::new();
        extra.insert("size".to_string(), vec!["XL".to_string()]);
        extra.insert("color".to_string(), vec!["red".to_string()]);
        opts.merge_select_options(extra);

        assert_eq!(opts.select_options["size"], vec!["S"]);
        assert_eq!(opts.select_options["color"], vec!["red"]);
    }
}
