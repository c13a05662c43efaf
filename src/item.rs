//! Chart input data: flat or hierarchical captioned items.
//!
//! Items are identified by caption, which must be unique among siblings.
//! A leaf carries a value; a branch carries child segments and its value is
//! the recursive sum of its leaves.

use std::path::Path;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::ChartError;
use crate::util::color::Color;

/// One data item handed to a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawItem", into = "RawItem")]
pub struct Item {
    /// Display label and identity key.
    pub caption: String,
    /// Explicit color; `None` lets the chart allocate one.
    pub color: Option<Color>,
    /// Image shown inside a bubble.
    pub image_path: Option<String>,
    /// Leaf value or child segments.
    pub kind: ItemKind,
}

/// Leaf or branch payload of an [`Item`].
#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    /// Terminal item with its own value.
    Leaf {
        /// Non-negative magnitude.
        value: f64,
    },
    /// Interior item whose value is the sum of its segments.
    Branch {
        /// Child items, never empty.
        segments: Vec<Item>,
    },
}

impl Item {
    /// Leaf item.
    pub fn leaf(caption: impl Into<String>, value: f64) -> Self {
        Self {
            caption: caption.into(),
            color: None,
            image_path: None,
            kind: ItemKind::Leaf { value },
        }
    }

    /// Branch item.
    pub fn branch(caption: impl Into<String>, segments: Vec<Item>) -> Self {
        Self {
            caption: caption.into(),
            color: None,
            image_path: None,
            kind: ItemKind::Branch { segments },
        }
    }

    /// Set the explicit color.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the bubble image path.
    #[must_use]
    pub fn with_image(mut self, path: impl Into<String>) -> Self {
        self.image_path = Some(path.into());
        self
    }

    /// Leaf value, or the recursive sum of a branch's leaves.
    #[must_use]
    pub fn value(&self) -> f64 {
        match &self.kind {
            ItemKind::Leaf { value } => *value,
            ItemKind::Branch { segments } => {
                segments.iter().map(Item::value).sum()
            }
        }
    }

    /// Whether this item has child segments.
    #[must_use]
    pub fn is_branch(&self) -> bool {
        matches!(self.kind, ItemKind::Branch { .. })
    }

    /// Child segments (empty for a leaf).
    #[must_use]
    pub fn segments(&self) -> &[Item] {
        match &self.kind {
            ItemKind::Leaf { .. } => &[],
            ItemKind::Branch { segments } => segments,
        }
    }

    /// Mutable child segments, `None` for a leaf.
    pub fn segments_mut(&mut self) -> Option<&mut [Item]> {
        match &mut self.kind {
            ItemKind::Leaf { .. } => None,
            ItemKind::Branch { segments } => Some(segments),
        }
    }

    /// Validate a sibling list and everything below it.
    ///
    /// Rejects duplicate sibling captions, negative or non-finite leaf
    /// values, and branches without segments.
    pub fn validate_all(items: &[Item]) -> Result<(), ChartError> {
        let mut seen = FxHashSet::default();
        for item in items {
            if !seen.insert(item.caption.as_str()) {
                return Err(ChartError::DuplicateCaption(item.caption.clone()));
            }
            match &item.kind {
                ItemKind::Leaf { value } => {
                    if !value.is_finite() || *value < 0.0 {
                        return Err(ChartError::InvalidValue {
                            caption: item.caption.clone(),
                            value: *value,
                        });
                    }
                }
                ItemKind::Branch { segments } => {
                    if segments.is_empty() {
                        return Err(ChartError::EmptyBranch(
                            item.caption.clone(),
                        ));
                    }
                    Self::validate_all(segments)?;
                }
            }
        }
        Ok(())
    }

    /// Largest sibling count anywhere in the tree (the root list included).
    #[must_use]
    pub fn max_sibling_count(items: &[Item]) -> usize {
        items
            .iter()
            .map(|item| Self::max_sibling_count(item.segments()))
            .fold(items.len(), usize::max)
    }

    /// Find an item by caption among `items`.
    #[must_use]
    pub fn find<'a>(items: &'a [Item], caption: &str) -> Option<&'a Item> {
        items.iter().find(|item| item.caption == caption)
    }

    /// Caption path from the root list down to `caption` (inclusive),
    /// searching depth first.
    #[must_use]
    pub fn path_to(items: &[Item], caption: &str) -> Option<Vec<String>> {
        for item in items {
            if item.caption == caption {
                return Some(vec![item.caption.clone()]);
            }
            if let Some(mut rest) = Self::path_to(item.segments(), caption) {
                rest.insert(0, item.caption.clone());
                return Some(rest);
            }
        }
        None
    }
}

/// Parse and validate a JSON item array.
pub fn parse_items(json: &str) -> Result<Vec<Item>, ChartError> {
    let items: Vec<Item> = serde_json::from_str(json)?;
    Item::validate_all(&items)?;
    Ok(items)
}

/// Load and validate a JSON item array from disk.
pub fn load_items(path: &Path) -> Result<Vec<Item>, ChartError> {
    let content = std::fs::read_to_string(path)?;
    let items = parse_items(&content)?;
    log::debug!("loaded {} items from {}", items.len(), path.display());
    Ok(items)
}

/// Wire shape: `{caption, value?, color?, imagePath?, segments?}`.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawItem {
    caption: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    segments: Option<Vec<Item>>,
}

impl TryFrom<RawItem> for Item {
    type Error = ChartError;

    fn try_from(raw: RawItem) -> Result<Self, Self::Error> {
        let kind = match (raw.segments, raw.value) {
            (Some(segments), _) if !segments.is_empty() => {
                ItemKind::Branch { segments }
            }
            (_, Some(value)) => ItemKind::Leaf { value },
            (Some(_), None) => return Err(ChartError::EmptyBranch(raw.caption)),
            (None, None) => return Err(ChartError::MissingValue(raw.caption)),
        };
        Ok(Self {
            caption: raw.caption,
            color: raw.color,
            image_path: raw.image_path,
            kind,
        })
    }
}

impl From<Item> for RawItem {
    fn from(item: Item) -> Self {
        let (value, segments) = match item.kind {
            ItemKind::Leaf { value } => (Some(value), None),
            ItemKind::Branch { segments } => (None, Some(segments)),
        };
        Self {
            caption: item.caption,
            value,
            color: item.color,
            image_path: item.image_path,
            segments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Item> {
        vec![
            Item::leaf("A", 10.0),
            Item::branch(
                "B",
                vec![
                    Item::leaf("B1", 2.0),
                    Item::branch(
                        "B2",
                        vec![Item::leaf("x", 1.0), Item::leaf("y", 4.0)],
                    ),
                ],
            ),
        ]
    }

    #[test]
    fn branch_value_is_recursive_sum() {
        let items = sample();
        assert_eq!(items[1].value(), 7.0);
        assert!(items[1].is_branch());
        assert!(items[0].segments().is_empty());
    }

    #[test]
    fn parses_camel_case_json() {
        let json = r##"[
            {"caption": "A", "value": 3, "color": "#ff0000", "imagePath": "a.png"},
            {"caption": "B", "segments": [{"caption": "b", "value": 1.5}]}
        ]"##;
        let items = parse_items(json).unwrap();
        assert_eq!(items[0].image_path.as_deref(), Some("a.png"));
        assert_eq!(items[0].color, Some(Color::rgb(255, 0, 0)));
        assert_eq!(items[0].value(), 3.0);
        assert_eq!(items[1].segments()[0].caption, "b");
    }

    #[test]
    fn empty_segments_fall_back_to_value() {
        let items = parse_items(r#"[{"caption": "A", "value": 2, "segments": []}]"#)
            .unwrap();
        assert!(!items[0].is_branch());
        assert!(parse_items(r#"[{"caption": "A", "segments": []}]"#).is_err());
        assert!(parse_items(r#"[{"caption": "A"}]"#).is_err());
    }

    #[test]
    fn rejects_duplicates_and_bad_values() {
        let dup = vec![Item::leaf("A", 1.0), Item::leaf("A", 2.0)];
        assert!(matches!(
            Item::validate_all(&dup),
            Err(ChartError::DuplicateCaption(c)) if c == "A"
        ));
        let nested_dup = vec![Item::branch(
            "P",
            vec![Item::leaf("c", 1.0), Item::leaf("c", 1.0)],
        )];
        assert!(Item::validate_all(&nested_dup).is_err());
        assert!(Item::validate_all(&[Item::leaf("n", -1.0)]).is_err());
        assert!(Item::validate_all(&[Item::leaf("n", f64::NAN)]).is_err());
        assert!(Item::validate_all(&[Item::branch("e", vec![])]).is_err());
        // Same caption at different levels is fine.
        let ok = vec![Item::branch("A", vec![Item::leaf("A", 1.0)])];
        assert!(Item::validate_all(&ok).is_ok());
    }

    #[test]
    fn serializes_back_to_wire_shape() {
        let json = serde_json::to_value(Item::leaf("A", 1.0)).unwrap();
        assert_eq!(json, serde_json::json!({"caption": "A", "value": 1.0}));
    }

    #[test]
    fn tree_queries() {
        let items = sample();
        assert_eq!(Item::max_sibling_count(&items), 2);
        assert_eq!(
            Item::path_to(&items, "y").unwrap(),
            vec!["B".to_owned(), "B2".to_owned(), "y".to_owned()]
        );
        assert!(Item::path_to(&items, "zzz").is_none());
        assert_eq!(Item::find(&items, "A").unwrap().value(), 10.0);
    }
}
