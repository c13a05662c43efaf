//! Flattened item tree for the segmented bar chart.
//!
//! Nodes live in one arena addressed by [`NodeId`]; `None` stands for the
//! virtual root whose children are the top-level items.

use crate::item::Item;
use crate::util::color::Color;

/// Arena index of a hierarchy node.
pub type NodeId = usize;

/// One item of the tree with its resolved value and color.
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyNode {
    /// Item caption.
    pub caption: String,
    /// Item color (black when the item carries none).
    pub color: Color,
    /// Recursive value.
    pub value: f64,
    /// Parent node, `None` at the top level.
    pub parent: Option<NodeId>,
    /// Child nodes in item order.
    pub children: Vec<NodeId>,
    /// Index path from the root item list to the source item.
    pub item_path: Vec<usize>,
}

/// Arena of [`HierarchyNode`]s built from an item list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hierarchy {
    nodes: Vec<HierarchyNode>,
    roots: Vec<NodeId>,
}

impl Hierarchy {
    /// Flatten `items` depth first.
    #[must_use]
    pub fn build(items: &[Item]) -> Self {
        let mut hierarchy = Self::default();
        let mut path = Vec::new();
        hierarchy.roots = hierarchy.push_level(items, None, &mut path);
        hierarchy
    }

    fn push_level(
        &mut self,
        items: &[Item],
        parent: Option<NodeId>,
        path: &mut Vec<usize>,
    ) -> Vec<NodeId> {
        let mut ids = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            path.push(i);
            let id = self.nodes.len();
            self.nodes.push(HierarchyNode {
                caption: item.caption.clone(),
                color: item.color.unwrap_or(Color::BLACK),
                value: item.value(),
                parent,
                children: Vec::new(),
                item_path: path.clone(),
            });
            let children = self.push_level(item.segments(), Some(id), path);
            self.nodes[id].children = children;
            ids.push(id);
            let _ = path.pop();
        }
        ids
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&HierarchyNode> {
        self.nodes.get(id)
    }

    /// Children of `parent`; the top-level nodes for `None`.
    #[must_use]
    pub fn children(&self, parent: Option<NodeId>) -> &[NodeId] {
        match parent {
            None => &self.roots,
            Some(id) => self.nodes.get(id).map_or(&[], |n| &n.children),
        }
    }

    /// Whether `id` has children.
    #[must_use]
    pub fn has_children(&self, id: NodeId) -> bool {
        !self.children(Some(id)).is_empty()
    }

    /// Parent of `id` (`None` at the top level or for unknown ids).
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    /// Value of `id`, 0 for unknown ids.
    #[must_use]
    pub fn value(&self, id: NodeId) -> f64 {
        self.nodes.get(id).map_or(0.0, |n| n.value)
    }

    /// Largest value among the children of `parent`, or the parent's own
    /// value when it has none.
    #[must_use]
    pub fn max_value(&self, parent: Option<NodeId>) -> f64 {
        let children = self.children(parent);
        if children.is_empty() {
            return parent.map_or(0.0, |id| self.value(id));
        }
        children
            .iter()
            .map(|&id| self.value(id))
            .fold(0.0, f64::max)
    }

    /// Largest sibling count anywhere in the tree.
    #[must_use]
    pub fn max_sibling_count(&self) -> usize {
        self.nodes
            .iter()
            .map(|n| n.children.len())
            .fold(self.roots.len(), usize::max)
    }

    /// Position of `id` among its siblings.
    #[must_use]
    pub fn sibling_index(&self, id: NodeId) -> Option<usize> {
        self.children(self.parent(id))
            .iter()
            .position(|&sibling| sibling == id)
    }

    /// Path from the top level down to `id`, inclusive.
    #[must_use]
    pub fn ancestry(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut cursor = self.nodes.get(id).map(|_| id);
        while let Some(node) = cursor {
            chain.push(node);
            cursor = self.parent(node);
        }
        chain.reverse();
        chain
    }

    /// Node reached by following `captions` from the top level.
    #[must_use]
    pub fn find_by_path<S: AsRef<str>>(&self, captions: &[S]) -> Option<NodeId> {
        let mut parent = None;
        for caption in captions {
            let next = self.children(parent).iter().copied().find(|&id| {
                self.nodes
                    .get(id)
                    .is_some_and(|n| n.caption == caption.as_ref())
            })?;
            parent = Some(next);
        }
        parent
    }

    /// Every caption in the tree.
    pub fn captions(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.caption.as_str())
    }

    /// Source item of `id` within the list the hierarchy was built from.
    #[must_use]
    pub fn item<'a>(&self, items: &'a [Item], id: NodeId) -> Option<&'a Item> {
        let path = &self.nodes.get(id)?.item_path;
        let (&first, rest) = path.split_first()?;
        let mut item = items.get(first)?;
        for &i in rest {
            item = item.segments().get(i)?;
        }
        Some(item)
    }

    /// First node, depth first, whose source item matches `wanted`.
    ///
    /// Captions, values and child structure must agree; colors are compared
    /// only when `wanted` carries one.
    #[must_use]
    pub fn locate(&self, items: &[Item], wanted: &Item) -> Option<NodeId> {
        (0..self.nodes.len()).find(|&id| {
            self.item(items, id)
                .is_some_and(|item| same_item(item, wanted))
        })
    }
}

fn same_item(stored: &Item, wanted: &Item) -> bool {
    stored.caption == wanted.caption
        && (wanted.color.is_none() || stored.color == wanted.color)
        && stored.is_branch() == wanted.is_branch()
        && stored.value() == wanted.value()
        && stored.segments().len() == wanted.segments().len()
        && stored
            .segments()
            .iter()
            .zip(wanted.segments())
            .all(|(a, b)| same_item(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Item> {
        vec![
            Item::branch(
                "fruit",
                vec![
                    Item::leaf("apple", 3.0),
                    Item::branch(
                        "berries",
                        vec![Item::leaf("straw", 1.0), Item::leaf("blue", 4.0)],
                    ),
                ],
            ),
            Item::leaf("bread", 2.0),
        ]
    }

    #[test]
    fn build_flattens_depth_first() {
        let items = sample();
        let h = Hierarchy::build(&items);
        assert_eq!(h.len(), 6);
        assert_eq!(h.children(None).len(), 2);
        let fruit = h.find_by_path(&["fruit"]).unwrap();
        assert_eq!(h.value(fruit), 8.0);
        let blue = h.find_by_path(&["fruit", "berries", "blue"]).unwrap();
        assert_eq!(h.ancestry(blue).len(), 3);
        assert_eq!(h.item(&items, blue).unwrap().caption, "blue");
        assert_eq!(h.sibling_index(blue), Some(1));
    }

    #[test]
    fn max_value_falls_back_to_own_value() {
        let h = Hierarchy::build(&sample());
        assert_eq!(h.max_value(None), 8.0);
        let berries = h.find_by_path(&["fruit", "berries"]).unwrap();
        assert_eq!(h.max_value(Some(berries)), 4.0);
        let bread = h.find_by_path(&["bread"]).unwrap();
        assert_eq!(h.max_value(Some(bread)), 2.0);
        assert_eq!(Hierarchy::default().max_value(None), 0.0);
    }

    #[test]
    fn locate_ignores_missing_color() {
        let mut items = sample();
        items[1].color = Some(Color::rgb(1, 2, 3));
        let h = Hierarchy::build(&items);
        let found = h.locate(&items, &Item::leaf("bread", 2.0));
        assert_eq!(found, h.find_by_path(&["bread"]));
        assert_eq!(h.locate(&items, &Item::leaf("bread", 5.0)), None);
        assert_eq!(h.max_sibling_count(), 2);
    }
}
