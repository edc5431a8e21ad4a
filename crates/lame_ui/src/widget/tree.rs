//! Widget tree for hierarchical UI management.
//!
//! Widgets live in an arena indexed by [`WidgetId`]. A container's children
//! are kept in insertion order, which is also paint order and layout order.

use super::{Panel, Widget, WidgetId, WidgetKind, WidgetState};
use crate::error::{UiError, UiResult};
use crate::layout::{LayoutItem, Rect};
use crate::render::Surface;

/// One widget plus its children and its painted surface.
struct Node {
    widget: Box<dyn Widget>,
    children: Vec<WidgetId>,
    surface: Surface,
}

impl Node {
    fn new(widget: Box<dyn Widget>) -> Self {
        let surface = Surface::new(widget.state().size);
        Self {
            widget,
            children: Vec::new(),
            surface,
        }
    }
}

/// Manages the widget hierarchy.
///
/// The tree always has a root container at [`WidgetTree::root`]. Widgets are
/// never removed, so ids stay valid for the lifetime of the tree.
pub struct WidgetTree {
    nodes: Vec<Node>,
}

impl WidgetTree {
    /// Creates a tree whose root is `root`.
    #[must_use]
    pub fn new(root: Panel) -> Self {
        let mut nodes = Vec::with_capacity(64);
        nodes.push(Node::new(Box::new(root)));
        Self { nodes }
    }

    /// Returns the root container.
    #[must_use]
    pub const fn root(&self) -> WidgetId {
        WidgetId(0)
    }

    /// Returns the number of widgets, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root exists from construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if `id` belongs to this tree.
    #[must_use]
    pub fn contains(&self, id: WidgetId) -> bool {
        id.0 < self.nodes.len()
    }

    fn node(&self, id: WidgetId) -> UiResult<&Node> {
        self.nodes.get(id.0).ok_or(UiError::UnknownWidget(id))
    }

    fn node_mut(&mut self, id: WidgetId) -> UiResult<&mut Node> {
        self.nodes.get_mut(id.0).ok_or(UiError::UnknownWidget(id))
    }

    /// Returns a widget.
    #[must_use]
    pub fn get(&self, id: WidgetId) -> Option<&dyn Widget> {
        self.nodes.get(id.0).map(|node| node.widget.as_ref())
    }

    /// Returns mutable access to a widget.
    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut dyn Widget> {
        let node = self.nodes.get_mut(id.0)?;
        Some(node.widget.as_mut())
    }

    /// Returns a widget as its concrete type.
    #[must_use]
    pub fn widget<T: Widget>(&self, id: WidgetId) -> Option<&T> {
        self.get(id)?.as_any().downcast_ref::<T>()
    }

    /// Returns a widget as its concrete type, mutably.
    pub fn widget_mut<T: Widget>(&mut self, id: WidgetId) -> Option<&mut T> {
        self.get_mut(id)?.as_any_mut().downcast_mut::<T>()
    }

    /// Returns a widget's state.
    #[must_use]
    pub fn state(&self, id: WidgetId) -> Option<&WidgetState> {
        self.get(id).map(Widget::state)
    }

    /// Returns a widget's state, mutably.
    pub fn state_mut(&mut self, id: WidgetId) -> Option<&mut WidgetState> {
        self.nodes.get_mut(id.0).map(|node| node.widget.state_mut())
    }

    /// Returns the children of a widget (empty for leaves).
    #[must_use]
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.nodes
            .get(id.0)
            .map_or(&[], |node| node.children.as_slice())
    }

    /// Returns the parent of a widget.
    #[must_use]
    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.state(id)?.parent
    }

    /// Returns true if the widget can hold children.
    #[must_use]
    pub fn is_container(&self, id: WidgetId) -> bool {
        self.get(id).is_some_and(|widget| widget.sizer().is_some())
    }

    /// Returns the painted surface of a widget.
    #[must_use]
    pub fn surface(&self, id: WidgetId) -> Option<&Surface> {
        self.nodes.get(id.0).map(|node| &node.surface)
    }

    /// Returns the painted surface of the root.
    #[must_use]
    pub fn root_surface(&self) -> &Surface {
        &self.nodes[0].surface
    }

    /// Attaches `widget` under `parent` without any relayout.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownWidget`] if `parent` is not in the tree and
    /// [`UiError::NotAContainer`] if it cannot hold children.
    pub fn insert(
        &mut self,
        parent: WidgetId,
        mut widget: Box<dyn Widget>,
    ) -> UiResult<WidgetId> {
        if self.node(parent)?.widget.sizer().is_none() {
            return Err(UiError::NotAContainer(parent));
        }

        let id = WidgetId(self.nodes.len());
        widget.state_mut().parent = Some(parent);
        self.nodes.push(Node::new(widget));
        self.node_mut(parent)?.children.push(id);
        Ok(id)
    }

    /// Attaches `widget` under `parent` and refreshes `parent` only.
    ///
    /// Ancestors of `parent` are not re-laid out.
    ///
    /// # Errors
    ///
    /// Same as [`WidgetTree::insert`], plus any redraw failure.
    pub fn add(&mut self, parent: WidgetId, widget: Box<dyn Widget>) -> UiResult<WidgetId> {
        let id = self.insert(parent, widget)?;
        self.recalculate(parent)?;
        Ok(id)
    }

    /// Returns the absolute top-left corner of a widget.
    #[must_use]
    pub fn absolute_position(&self, id: WidgetId) -> Option<(f32, f32)> {
        let mut state = self.state(id)?;
        let (mut x, mut y) = state.position;
        while let Some(parent) = state.parent {
            state = self.state(parent)?;
            x += state.position.0;
            y += state.position.1;
        }
        Some((x, y))
    }

    /// Returns the absolute bounds of a widget.
    #[must_use]
    pub fn absolute_rect(&self, id: WidgetId) -> Option<Rect> {
        let position = self.absolute_position(id)?;
        Some(Rect::from_pos_size(position, self.state(id)?.size))
    }

    /// Returns the topmost ancestor of a widget.
    #[must_use]
    pub fn root_of(&self, id: WidgetId) -> Option<WidgetId> {
        let mut current = id;
        while let Some(parent) = self.state(current)?.parent {
            current = parent;
        }
        Some(current)
    }

    /// Lays out the children of a container.
    ///
    /// Container children are laid out first, and every child is repainted
    /// before its size is read.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::NotAContainer`] for leaves, or the first redraw
    /// failure.
    pub fn calc_pos(&mut self, id: WidgetId) -> UiResult<()> {
        let node = self.node(id)?;
        let sizer = *node.widget.sizer().ok_or(UiError::NotAContainer(id))?;
        let container = node.widget.state().size;
        let children = node.children.clone();
        if children.is_empty() {
            return Ok(());
        }

        let mut items = Vec::with_capacity(children.len());
        for &child in &children {
            if self.is_container(child) {
                self.calc_pos(child)?;
            }
            self.paint(child)?;

            let state = self.node(child)?.widget.state();
            items.push(LayoutItem::new(state.size, state.base_position));
        }

        let positions = sizer.arrange(container, &items);
        for (child, position) in children.into_iter().zip(positions) {
            self.node_mut(child)?.widget.state_mut().position = position;
        }
        Ok(())
    }

    /// Repaints a widget and, recursively, everything below it.
    ///
    /// # Errors
    ///
    /// Returns the first redraw failure.
    pub fn redraw(&mut self, id: WidgetId) -> UiResult<()> {
        let children = self.node(id)?.children.clone();
        for child in children {
            self.redraw(child)?;
        }
        self.paint(id)
    }

    /// Lays out then repaints a container.
    ///
    /// # Errors
    ///
    /// Same as [`WidgetTree::calc_pos`].
    pub fn recalculate(&mut self, id: WidgetId) -> UiResult<()> {
        self.calc_pos(id)?;
        self.paint(id)
    }

    /// Repaints one widget and composites its children's current surfaces.
    fn paint(&mut self, id: WidgetId) -> UiResult<()> {
        let node = self.node_mut(id)?;
        let mut surface = std::mem::take(&mut node.surface);
        surface.reset(node.widget.state().size);

        let result = node.widget.redraw(&mut surface);
        if result.is_ok() {
            for &child in &self.nodes[id.0].children {
                let child = &self.nodes[child.0];
                surface.blit(&child.surface, child.widget.state().position);
            }
        }

        self.nodes[id.0].surface = surface;
        result
    }

    /// Changes a widget's size, rescales its surface and refreshes it.
    ///
    /// # Errors
    ///
    /// Same as [`WidgetTree::recalculate`] for containers, or the redraw
    /// failure for leaves.
    pub fn resize(&mut self, id: WidgetId, size: (f32, f32)) -> UiResult<()> {
        let node = self.node_mut(id)?;
        node.widget.state_mut().size = size;
        node.surface.scale(size);

        if self.is_container(id) {
            self.recalculate(id)
        } else {
            self.paint(id)
        }
    }

    /// Returns the deepest widget under `(x, y)` inside container `id`.
    ///
    /// None if the point lies outside the container. Children are tested in
    /// insertion order and the first hit wins; container children are
    /// searched recursively. A point over no child returns the container.
    #[must_use]
    pub fn component_at(&self, id: WidgetId, x: f32, y: f32) -> Option<WidgetId> {
        let origin = match self.parent(id) {
            Some(parent) => self.absolute_position(parent)?,
            None => (0.0, 0.0),
        };
        self.hit(id, origin, x, y)
    }

    fn hit(&self, id: WidgetId, origin: (f32, f32), x: f32, y: f32) -> Option<WidgetId> {
        let state = self.state(id)?;
        let rect = state.local_rect().translate(origin.0, origin.1);
        if !rect.contains(x, y) {
            return None;
        }

        let inner = (rect.x, rect.y);
        for &child in self.children(id) {
            if self.is_container(child) {
                if let Some(found) = self.hit(child, inner, x, y) {
                    return Some(found);
                }
            } else if self
                .state(child)
                .is_some_and(|s| s.local_rect().translate(inner.0, inner.1).contains(x, y))
            {
                return Some(child);
            }
        }
        Some(id)
    }

    /// Collects every descendant of `id` matching `predicate`, in pre-order.
    #[must_use]
    pub fn collect_where(
        &self,
        id: WidgetId,
        predicate: &dyn Fn(&dyn Widget) -> bool,
    ) -> Vec<WidgetId> {
        let mut found = Vec::new();
        let mut stack: Vec<WidgetId> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            if self.get(current).is_some_and(predicate) {
                found.push(current);
            }
            stack.extend(self.children(current).iter().rev().copied());
        }
        found
    }

    /// Collects every descendant of `id` of the given kind, in pre-order.
    #[must_use]
    pub fn collect_of_kind(&self, id: WidgetId, kind: WidgetKind) -> Vec<WidgetId> {
        self.collect_where(id, &|widget: &dyn Widget| widget.kind() == kind)
    }

    /// Returns all widget IDs in depth-first pre-order from the root.
    pub fn iter_dfs(&self) -> impl Iterator<Item = WidgetId> + '_ {
        WidgetDfsIterator {
            tree: self,
            stack: vec![self.root()],
        }
    }

    /// Advances every widget's timers by `dt` seconds, in pre-order.
    pub fn process_all(&mut self, dt: f32) {
        let order: Vec<WidgetId> = self.iter_dfs().collect();
        for id in order {
            self.nodes[id.0].widget.process(dt);
        }
    }
}

/// Depth-first iterator over widget tree.
struct WidgetDfsIterator<'a> {
    tree: &'a WidgetTree,
    stack: Vec<WidgetId>,
}

impl Iterator for WidgetDfsIterator<'_> {
    type Item = WidgetId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;

        // Push children in reverse order so they're processed left-to-right
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());

        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Alignment, Direction};
    use crate::style::Color;
    use crate::widget::{Button, Text, WidgetExt};

    fn row_tree() -> (WidgetTree, Vec<WidgetId>) {
        let root = Panel::new((700.0, 40.0), (0.0, 0.0))
            .with_direction(Direction::Horizontal)
            .with_alignment(Alignment::CenterHorizontal);
        let mut tree = WidgetTree::new(root);
        let ids = (0..3)
            .map(|_| {
                tree.add(tree.root(), Box::new(Panel::new((200.0, 40.0), (0.0, 0.0))))
                    .unwrap()
            })
            .collect();
        (tree, ids)
    }

    #[test]
    fn test_tree_hierarchy() {
        let (tree, ids) = row_tree();
        assert_eq!(tree.children(tree.root()), ids.as_slice());
        assert_eq!(tree.parent(ids[1]), Some(tree.root()));
        assert_eq!(tree.root_of(ids[2]), Some(tree.root()));
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_centered_row_layout() {
        let (tree, ids) = row_tree();
        let xs: Vec<f32> = ids.iter().map(|&id| tree.state(id).unwrap().position.0).collect();
        assert_eq!(xs, vec![50.0, 250.0, 450.0]);
    }

    #[test]
    fn test_layout_is_idempotent() {
        let (mut tree, ids) = row_tree();
        let before: Vec<_> = ids.iter().map(|&id| tree.state(id).unwrap().position).collect();
        tree.recalculate(tree.root()).unwrap();
        tree.recalculate(tree.root()).unwrap();
        let after: Vec<_> = ids.iter().map(|&id| tree.state(id).unwrap().position).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_add_under_leaf_fails() {
        let (mut tree, _) = row_tree();
        let text = tree.add(tree.root(), Box::new(Text::new("leaf"))).unwrap();

        assert!(matches!(
            tree.add(text, Box::new(Text::new("child"))),
            Err(UiError::NotAContainer(id)) if id == text
        ));
        assert!(matches!(
            tree.add(WidgetId(99), Box::new(Text::new("orphan"))),
            Err(UiError::UnknownWidget(_))
        ));
    }

    #[test]
    fn test_absolute_position_sums_chain() {
        let mut tree = WidgetTree::new(Panel::new((400.0, 400.0), (0.0, 0.0)));
        let outer = tree
            .add(tree.root(), Box::new(Panel::new((200.0, 200.0), (30.0, 40.0))))
            .unwrap();
        let inner = tree.add(outer, Box::new(Panel::new((50.0, 50.0), (5.0, 6.0)))).unwrap();

        assert_eq!(tree.absolute_position(inner), Some((35.0, 46.0)));
        assert_eq!(tree.absolute_rect(outer), Some(Rect::new(30.0, 40.0, 200.0, 200.0)));
    }

    #[test]
    fn test_component_at() {
        let mut tree = WidgetTree::new(Panel::new((400.0, 400.0), (0.0, 0.0)));
        let panel = tree
            .add(tree.root(), Box::new(Panel::new((200.0, 200.0), (100.0, 100.0))))
            .unwrap();
        let button = tree
            .add(panel, Box::new(Button::new((50.0, 20.0), (10.0, 10.0), "ok")))
            .unwrap();

        let root = tree.root();
        assert_eq!(tree.component_at(root, 115.0, 115.0), Some(button));
        assert_eq!(tree.component_at(root, 250.0, 250.0), Some(panel));
        assert_eq!(tree.component_at(root, 5.0, 5.0), Some(root));
        assert_eq!(tree.component_at(root, 500.0, 5.0), None);
    }

    #[test]
    fn test_collect_of_kind_is_preorder() {
        let mut tree = WidgetTree::new(Panel::new((400.0, 400.0), (0.0, 0.0)));
        let root = tree.root();
        let first = tree.add(root, Box::new(Text::new("a"))).unwrap();
        let panel = tree.add(root, Box::new(Panel::new((100.0, 100.0), (0.0, 0.0)))).unwrap();
        let nested = tree.add(panel, Box::new(Text::new("b"))).unwrap();
        let last = tree.add(root, Box::new(Text::new("c"))).unwrap();

        assert_eq!(tree.collect_of_kind(root, WidgetKind::Text), vec![first, nested, last]);
        assert_eq!(tree.collect_of_kind(root, WidgetKind::Panel), vec![panel]);
        assert_eq!(
            tree.collect_where(root, &|w: &dyn Widget| w.state().name == "named"),
            Vec::<WidgetId>::new()
        );
    }

    #[test]
    fn test_typed_access() {
        let mut tree = WidgetTree::new(Panel::new((100.0, 100.0), (0.0, 0.0)));
        let text = tree
            .add(tree.root(), Box::new(Text::new("typed").with_name("label")))
            .unwrap();

        assert_eq!(tree.widget::<Text>(text).map(Text::text), Some("typed"));
        assert!(tree.widget::<Panel>(text).is_none());

        tree.widget_mut::<Text>(text).unwrap().set_text("changed");
        assert_eq!(tree.widget::<Text>(text).unwrap().text(), "changed");
    }

    #[test]
    fn test_redraw_composites_children() {
        let (mut tree, _) = row_tree();
        let child = tree.children(tree.root())[0];
        tree.state_mut(child).unwrap().set_background(Color::WHITE);
        tree.redraw(tree.root()).unwrap();

        let root_surface = tree.surface(tree.root()).unwrap();
        assert!(!root_surface.is_empty());
        assert!(!tree.surface(child).unwrap().is_empty());
    }

    #[test]
    fn test_iter_dfs_order() {
        let mut tree = WidgetTree::new(Panel::new((100.0, 100.0), (0.0, 0.0)));
        let root = tree.root();
        let a = tree.add(root, Box::new(Panel::new((10.0, 10.0), (0.0, 0.0)))).unwrap();
        let a1 = tree.add(a, Box::new(Text::new("x"))).unwrap();
        let b = tree.add(root, Box::new(Text::new("y"))).unwrap();

        assert_eq!(tree.iter_dfs().collect::<Vec<_>>(), vec![root, a, a1, b]);
    }
}
