//! # UI Root
//!
//! Owns the widget tree and drives it one frame at a time:
//!
//! ```text
//! InputEvent ─→ dispatch ─→ process(dt) ─→ layout ─→ redraw ─→ present
//!                 │
//!                 ├─ pointer: hit test, press/release, drag capture
//!                 └─ keys/text: routed to the selection only
//! ```
//!
//! Hover and selection live here, per root, so independent roots never
//! share interaction state.

use crate::config::UiConfig;
use crate::error::{UiError, UiResult};
use crate::input::{InputEvent, Key, MouseButton, PointerState};
use crate::layout::{Alignment, Direction, Sizer};
use crate::render::{Surface, UIRenderer};
use crate::style::Color;
use crate::widget::{
    Panel, PressResponse, ReleaseResponse, TextEditable, Widget, WidgetExt, WidgetFlags, WidgetId,
    WidgetTree,
};

/// Top-level container plus hover and selection state.
pub struct UiRoot {
    tree: WidgetTree,
    config: UiConfig,
    pointer: PointerState,
    hovered: Option<WidgetId>,
    selected: Option<WidgetId>,
}

impl UiRoot {
    /// Creates a root of `size` with default configuration.
    #[must_use]
    pub fn new(size: (f32, f32), background: impl Into<Color>) -> Self {
        let mut config = UiConfig::default();
        config.root.width = size.0;
        config.root.height = size.1;
        config.root.background = background.into();
        Self::build(config)
    }

    /// Creates a root from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::Config`] if the configuration is out of range.
    pub fn with_config(config: UiConfig) -> UiResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: UiConfig) -> Self {
        let mut panel = Panel::new(config.root_size(), (0.0, 0.0))
            .with_name(config.root.name.clone())
            .with_background(config.root.background);
        panel.state_mut().set_highlight_delta(config.highlight_delta);

        tracing::debug!(
            "UI root created: {}x{} ({:?})",
            config.root.width,
            config.root.height,
            config.root.name
        );

        Self {
            tree: WidgetTree::new(panel),
            config,
            pointer: PointerState::new(),
            hovered: None,
            selected: None,
        }
    }

    /// Returns the root container id.
    #[must_use]
    pub fn root(&self) -> WidgetId {
        self.tree.root()
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Returns the widget tree.
    #[must_use]
    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    /// Returns the widget tree, mutably.
    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    /// Returns the last known pointer state.
    #[must_use]
    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    /// Returns the widget under the pointer as of the last frame.
    #[must_use]
    pub fn hovered(&self) -> Option<WidgetId> {
        self.hovered
    }

    /// Returns the current selection.
    #[must_use]
    pub fn selected(&self) -> Option<WidgetId> {
        self.selected
    }

    /// Attaches `widget` under `parent` and refreshes `parent`.
    ///
    /// The widget adopts the root's configuration first.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownWidget`] or [`UiError::NotAContainer`] for a
    /// bad parent, or a redraw failure from the refreshed container.
    pub fn add<W: Widget>(&mut self, parent: WidgetId, widget: W) -> UiResult<WidgetId> {
        let mut widget: Box<dyn Widget> = Box::new(widget);
        widget
            .state_mut()
            .set_highlight_delta(self.config.highlight_delta);
        widget.configure(&self.config);

        let kind = widget.kind();
        let id = self.tree.add(parent, widget)?;
        tracing::debug!("Added {} widget {} under {}", kind, id, parent);
        Ok(id)
    }

    /// Attaches `widget` directly under the root.
    ///
    /// # Errors
    ///
    /// Same as [`UiRoot::add`].
    pub fn add_to_root<W: Widget>(&mut self, widget: W) -> UiResult<WidgetId> {
        let root = self.root();
        self.add(root, widget)
    }

    /// Returns a widget as its concrete type.
    #[must_use]
    pub fn widget<T: Widget>(&self, id: WidgetId) -> Option<&T> {
        self.tree.widget::<T>(id)
    }

    /// Returns a widget as its concrete type, mutably.
    ///
    /// Changes are not laid out until the next frame; see [`UiRoot::modify`].
    pub fn widget_mut<T: Widget>(&mut self, id: WidgetId) -> Option<&mut T> {
        self.tree.widget_mut::<T>(id)
    }

    /// Mutates a widget, then refreshes its parent container.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownWidget`] for a bad id,
    /// [`UiError::WidgetType`] if the widget is not a `T`, or a redraw
    /// failure from the refreshed container.
    pub fn modify<T: Widget, R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut T) -> R,
    ) -> UiResult<R> {
        if !self.tree.contains(id) {
            return Err(UiError::UnknownWidget(id));
        }
        let widget = self.tree.widget_mut::<T>(id).ok_or(UiError::WidgetType {
            id,
            expected: std::any::type_name::<T>(),
        })?;
        let result = f(widget);

        let container = self.tree.parent(id).unwrap_or(id);
        self.tree.recalculate(container)?;
        Ok(result)
    }

    /// Changes the selection.
    ///
    /// The previous selection (if any) is unselected first, then the new one
    /// is selected. Re-selecting the current selection runs both hooks.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownWidget`] if `id` is not in the tree.
    pub fn set_selected(&mut self, id: Option<WidgetId>) -> UiResult<()> {
        if let Some(id) = id {
            if !self.tree.contains(id) {
                return Err(UiError::UnknownWidget(id));
            }
        }

        if let Some(previous) = self.selected.take() {
            if let Some(widget) = self.tree.get_mut(previous) {
                widget.on_unselect();
                widget.state_mut().flags.clear(WidgetFlags::FOCUSED);
            }
        }

        self.selected = id;
        if let Some(id) = id {
            if let Some(widget) = self.tree.get_mut(id) {
                widget.state_mut().flags.set(WidgetFlags::FOCUSED);
                widget.on_select();
            }
        }

        match id {
            Some(id) => tracing::debug!("Selection changed to {}", id),
            None => tracing::debug!("Selection cleared"),
        }
        Ok(())
    }

    /// Runs one pointer frame: drag, hover, layout and redraw.
    ///
    /// The selection receives the pointer if it supports dragging. Hover
    /// flags are set for the redraw and cleared again afterwards.
    ///
    /// # Errors
    ///
    /// Returns the first redraw failure in the tree.
    pub fn process_mouse_pos(&mut self) -> UiResult<()> {
        let pointer = self.pointer.position();

        if let Some(selected) = self.selected {
            if let Some(origin) = self.tree.absolute_position(selected) {
                if let Some(widget) = self.tree.get_mut(selected) {
                    widget.drag_to(origin, pointer);
                }
            }
        }

        let root = self.root();
        self.hovered = self.tree.component_at(root, pointer.0, pointer.1);
        if let Some(hovered) = self.hovered {
            if let Some(widget) = self.tree.get_mut(hovered) {
                if widget.is_hoverable() {
                    widget.set_hovered(true);
                    tracing::trace!("Hovering {}", hovered);
                }
            }
        }

        let result = self.tree.recalculate(root);

        let hoverable = self
            .tree
            .collect_where(root, &|widget: &dyn Widget| widget.is_hoverable());
        for id in hoverable {
            if let Some(widget) = self.tree.get_mut(id) {
                widget.set_hovered(false);
            }
        }
        result
    }

    /// Handles a pointer press at the last known pointer position.
    ///
    /// A press outside the root or on the root's own background clears the
    /// selection; otherwise the pressed widget decides.
    ///
    /// # Errors
    ///
    /// Propagates [`UiRoot::set_selected`] failures.
    pub fn on_mouse_press(&mut self, button: MouseButton) -> UiResult<()> {
        self.pointer.press(button);
        let (x, y) = self.pointer.position();
        let root = self.root();

        match self.tree.component_at(root, x, y) {
            Some(id) if id != root => {
                let response = self
                    .tree
                    .get_mut(id)
                    .map_or(PressResponse::Ignore, |widget| widget.on_press(button));
                tracing::trace!("Press {:?} on {} -> {:?}", button, id, response);

                match response {
                    PressResponse::Select => self.set_selected(Some(id)),
                    PressResponse::Ignore => Ok(()),
                }
            }
            _ => self.set_selected(None),
        }
    }

    /// Handles a pointer release, forwarded to the selection.
    ///
    /// # Errors
    ///
    /// Propagates [`UiRoot::set_selected`] failures.
    pub fn on_mouse_release(&mut self, button: MouseButton) -> UiResult<()> {
        self.pointer.release(button);
        let Some(selected) = self.selected else {
            return Ok(());
        };

        let response = self
            .tree
            .get_mut(selected)
            .map_or(ReleaseResponse::Keep, |widget| widget.on_release(button));
        match response {
            ReleaseResponse::Deselect => self.set_selected(None),
            ReleaseResponse::Keep => Ok(()),
        }
    }

    /// Forwards a key press to an editable selection.
    pub fn on_key_down(&mut self, key: Key) {
        self.route_text("key down", |editable| editable.key_down(key));
    }

    /// Forwards a key release to an editable selection.
    pub fn on_key_up(&mut self, key: Key) {
        self.route_text("key up", |editable| editable.key_up(key));
    }

    /// Forwards committed text to an editable selection.
    pub fn on_text_input(&mut self, text: &str) {
        self.route_text("text input", |editable| editable.text_input(text));
    }

    fn route_text(&mut self, input: &str, f: impl FnOnce(&mut dyn TextEditable)) {
        let Some(selected) = self.selected else {
            tracing::trace!("Dropped {}: nothing selected", input);
            return;
        };

        match self
            .tree
            .get_mut(selected)
            .and_then(|widget| widget.as_text_editable())
        {
            Some(editable) => f(editable),
            None => tracing::trace!("Dropped {}: {} is not editable", input, selected),
        }
    }

    /// Dispatches one input event.
    ///
    /// # Errors
    ///
    /// Propagates press, release and resize failures.
    pub fn handle_event(&mut self, event: InputEvent) -> UiResult<()> {
        match event {
            InputEvent::PointerMove { x, y } => {
                self.pointer.set_position(x, y);
                Ok(())
            }
            InputEvent::PointerDown(button) => self.on_mouse_press(button),
            InputEvent::PointerUp(button) => self.on_mouse_release(button),
            InputEvent::KeyDown(key) => {
                self.on_key_down(key);
                Ok(())
            }
            InputEvent::KeyUp(key) => {
                self.on_key_up(key);
                Ok(())
            }
            InputEvent::TextInput(text) => {
                self.on_text_input(&text);
                Ok(())
            }
            InputEvent::Resize { width, height } => self.resize((width, height)),
        }
    }

    /// Dispatches events in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Same as [`UiRoot::handle_event`].
    pub fn handle_events(&mut self, events: impl IntoIterator<Item = InputEvent>) -> UiResult<()> {
        events
            .into_iter()
            .try_for_each(|event| self.handle_event(event))
    }

    /// Advances every widget's timers by `dt` seconds.
    pub fn process(&mut self, dt: f32) {
        self.tree.process_all(dt);
    }

    /// Runs a full frame: events, timers, then layout and redraw.
    ///
    /// # Errors
    ///
    /// Returns the first event or redraw failure.
    pub fn frame(&mut self, events: impl IntoIterator<Item = InputEvent>, dt: f32) -> UiResult<()> {
        self.handle_events(events)?;
        self.process(dt);
        self.process_mouse_pos()
    }

    /// Resizes the root and relays out the whole tree.
    ///
    /// # Errors
    ///
    /// Returns the first redraw failure.
    pub fn resize(&mut self, size: (f32, f32)) -> UiResult<()> {
        tracing::debug!("Resizing root to {}x{}", size.0, size.1);
        let root = self.root();
        self.tree.resize(root, size)
    }

    /// Lays out and redraws the whole tree.
    ///
    /// # Errors
    ///
    /// Returns the first redraw failure.
    pub fn recalculate(&mut self) -> UiResult<()> {
        let root = self.root();
        self.tree.recalculate(root)
    }

    /// Repaints the whole tree without laying it out.
    ///
    /// Picks up appearance changes made through [`UiRoot::widget_mut`] or
    /// [`UiRoot::tree_mut`] that do not move anything.
    ///
    /// # Errors
    ///
    /// Returns the first redraw failure.
    pub fn redraw(&mut self) -> UiResult<()> {
        let root = self.root();
        self.tree.redraw(root)
    }

    /// Sets a container's layout direction and refreshes it.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::NotAContainer`] for leaves.
    pub fn set_direction(&mut self, id: WidgetId, direction: Direction) -> UiResult<()> {
        self.configure_sizer(id, |sizer| sizer.direction = direction)
    }

    /// Sets a container's spacing and refreshes it.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::NotAContainer`] for leaves.
    pub fn set_space_between(&mut self, id: WidgetId, space_between: f32) -> UiResult<()> {
        self.configure_sizer(id, |sizer| sizer.space_between = space_between)
    }

    /// Sets a container's alignment and refreshes it.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::NotAContainer`] for leaves.
    pub fn align(&mut self, id: WidgetId, alignment: Alignment) -> UiResult<()> {
        self.configure_sizer(id, |sizer| sizer.alignment = alignment)
    }

    /// Returns a container's layout direction.
    #[must_use]
    pub fn direction(&self, id: WidgetId) -> Option<Direction> {
        Some(self.tree.get(id)?.sizer()?.direction)
    }

    fn configure_sizer(&mut self, id: WidgetId, f: impl FnOnce(&mut Sizer)) -> UiResult<()> {
        let widget = self.tree.get_mut(id).ok_or(UiError::UnknownWidget(id))?;
        let sizer = widget.sizer_mut().ok_or(UiError::NotAContainer(id))?;
        f(sizer);
        self.tree.recalculate(id)
    }

    /// Returns the composed root surface.
    #[must_use]
    pub fn surface(&self) -> &Surface {
        self.tree.root_surface()
    }

    /// Composites the root surface onto `target` at `position`.
    pub fn draw_to(&self, target: &mut Surface, position: (f32, f32)) {
        target.blit(self.surface(), position);
    }

    /// Submits the root surface to a renderer frame.
    pub fn present(&self, renderer: &mut UIRenderer) {
        let position = self
            .tree
            .state(self.root())
            .map_or((0.0, 0.0), |state| state.position);
        renderer.submit(self.surface(), position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderCommand;
    use crate::widget::{Button, Slider, Text, TextInput};

    fn root() -> UiRoot {
        UiRoot::new((800.0, 600.0), (10, 10, 10))
    }

    fn click(ui: &mut UiRoot, x: f32, y: f32) {
        ui.handle_events([
            InputEvent::PointerMove { x, y },
            InputEvent::PointerDown(MouseButton::Left),
            InputEvent::PointerUp(MouseButton::Left),
        ])
        .unwrap();
    }

    #[test]
    fn test_press_on_background_clears_selection() {
        let mut ui = root();
        let text = ui.add_to_root(Text::new("select me")).unwrap();

        click(&mut ui, 2.0, 2.0);
        assert_eq!(ui.selected(), Some(text));

        click(&mut ui, 400.0, 400.0);
        assert_eq!(ui.selected(), None);

        ui.set_selected(Some(text)).unwrap();
        click(&mut ui, 900.0, 900.0);
        assert_eq!(ui.selected(), None);
    }

    #[test]
    fn test_selection_sets_focus_flag() {
        let mut ui = root();
        let a = ui.add_to_root(Text::new("a")).unwrap();
        let b = ui.add_to_root(Text::new("b")).unwrap();

        ui.set_selected(Some(a)).unwrap();
        ui.set_selected(Some(b)).unwrap();
        assert!(!ui.tree().state(a).unwrap().is_focused());
        assert!(ui.tree().state(b).unwrap().is_focused());

        assert!(matches!(
            ui.set_selected(Some(WidgetId(42))),
            Err(UiError::UnknownWidget(_))
        ));
        assert_eq!(ui.selected(), Some(b));
    }

    #[test]
    fn test_button_press_keeps_selection() {
        let mut ui = root();
        let input = ui.add_to_root(TextInput::new((200.0, 30.0), (0.0, 0.0))).unwrap();
        ui.add_to_root(Button::new((100.0, 30.0), (0.0, 0.0), "ok")).unwrap();

        click(&mut ui, 5.0, 5.0);
        assert_eq!(ui.selected(), Some(input));

        click(&mut ui, 5.0, 35.0);
        assert_eq!(ui.selected(), Some(input));
    }

    #[test]
    fn test_key_input_without_editable_selection_is_dropped() {
        let mut ui = root();
        let input = ui.add_to_root(TextInput::new((200.0, 30.0), (0.0, 0.0))).unwrap();

        ui.on_text_input("lost");
        assert_eq!(ui.widget::<TextInput>(input).unwrap().text(), "");

        let text = ui.add_to_root(Text::new("static")).unwrap();
        ui.set_selected(Some(text)).unwrap();
        ui.on_key_down(Key::Backspace);
        ui.on_text_input("also lost");
        assert_eq!(ui.widget::<Text>(text).unwrap().text(), "static");
    }

    #[test]
    fn test_modify_relays_out_parent() {
        let mut ui = root();
        let first = ui.add_to_root(Text::new("a")).unwrap();
        let second = ui.add_to_root(Text::new("b")).unwrap();
        assert_eq!(ui.tree().state(second).unwrap().position, (0.0, 12.0));

        ui.modify::<Text, _>(first, |text| text.set_font_size(20.0)).unwrap();
        assert_eq!(ui.tree().state(second).unwrap().position, (0.0, 24.0));

        assert!(matches!(
            ui.modify::<Slider, _>(first, |_| ()),
            Err(UiError::WidgetType { .. })
        ));
    }

    #[test]
    fn test_redraw_repaints_without_layout() {
        let mut ui = root();
        let panel = ui
            .add_to_root(Panel::new((50.0, 50.0), (10.0, 10.0)))
            .unwrap();
        let has_white = |ui: &UiRoot| {
            ui.surface().commands().iter().any(|command| {
                matches!(command, RenderCommand::Rect { color, .. } if *color == Color::WHITE)
            })
        };
        assert!(!has_white(&ui));

        ui.tree_mut()
            .state_mut(panel)
            .unwrap()
            .set_background(Color::WHITE);
        assert!(!has_white(&ui));

        ui.redraw().unwrap();
        assert!(has_white(&ui));
        assert_eq!(ui.tree().state(panel).unwrap().position, (10.0, 10.0));
    }

    #[test]
    fn test_sizer_configuration() {
        let mut ui = root();
        let root_id = ui.root();
        let text = ui.add_to_root(Text::new("leaf")).unwrap();

        ui.set_direction(root_id, Direction::Horizontal).unwrap();
        assert_eq!(ui.direction(root_id), Some(Direction::Horizontal));
        assert!(matches!(
            ui.set_space_between(text, 4.0),
            Err(UiError::NotAContainer(_))
        ));
        assert_eq!(ui.direction(text), None);
    }

    #[test]
    fn test_present_submits_root_surface() {
        let mut ui = root();
        ui.add_to_root(Text::new("hello")).unwrap();
        ui.frame(std::iter::empty(), 0.016).unwrap();

        let mut renderer = UIRenderer::new();
        renderer.begin_frame();
        ui.present(&mut renderer);
        assert!(renderer.command_count() > 0);

        let mut target = Surface::new((1000.0, 1000.0));
        ui.draw_to(&mut target, (10.0, 10.0));
        assert!(!target.is_empty());
    }
}
