//! UI rendering system.
//!
//! Every widget paints into its own [`Surface`]: an owned, sized render
//! target that records primitive draw commands instead of pixels. Containers
//! composite child surfaces with [`Surface::blit`], which clips to the
//! source bounds. The root surface is handed to a [`UIRenderer`] for
//! batching and, via [`tessellate`], to the GPU as [`UIVertex`] data.

use crate::layout::Rect;
use crate::style::Color;

/// A render command for the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Filled rectangle.
    Rect {
        /// Bounds.
        bounds: Rect,
        /// Fill color.
        color: Color,
        /// Corner radius.
        corner_radius: f32,
    },
    /// Filled circle.
    Circle {
        /// Center point.
        center: (f32, f32),
        /// Radius.
        radius: f32,
        /// Fill color.
        color: Color,
    },
    /// A single line of text with its top-left corner at `(x, y)`.
    Text {
        /// Text content.
        text: String,
        /// X position.
        x: f32,
        /// Y position.
        y: f32,
        /// Text color.
        color: Color,
        /// Font size in pixels.
        font_size: f32,
    },
    /// Scissor rect (clip following commands).
    PushClip {
        /// Clip bounds.
        bounds: Rect,
    },
    /// Pop scissor rect.
    PopClip,
}

impl RenderCommand {
    /// Returns the command moved by `(dx, dy)`.
    #[must_use]
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        match self {
            Self::Rect { bounds, color, corner_radius } => Self::Rect {
                bounds: bounds.translate(dx, dy),
                color: *color,
                corner_radius: *corner_radius,
            },
            Self::Circle { center, radius, color } => Self::Circle {
                center: (center.0 + dx, center.1 + dy),
                radius: *radius,
                color: *color,
            },
            Self::Text { text, x, y, color, font_size } => Self::Text {
                text: text.clone(),
                x: x + dx,
                y: y + dy,
                color: *color,
                font_size: *font_size,
            },
            Self::PushClip { bounds } => Self::PushClip {
                bounds: bounds.translate(dx, dy),
            },
            Self::PopClip => Self::PopClip,
        }
    }

    /// Returns the command with its geometry scaled per axis.
    ///
    /// Radii and font sizes follow the smaller factor so shapes stay round.
    #[must_use]
    pub fn scaled(&self, sx: f32, sy: f32) -> Self {
        let uniform = sx.min(sy);
        match self {
            Self::Rect { bounds, color, corner_radius } => Self::Rect {
                bounds: bounds.scale(sx, sy),
                color: *color,
                corner_radius: corner_radius * uniform,
            },
            Self::Circle { center, radius, color } => Self::Circle {
                center: (center.0 * sx, center.1 * sy),
                radius: radius * uniform,
                color: *color,
            },
            Self::Text { text, x, y, color, font_size } => Self::Text {
                text: text.clone(),
                x: x * sx,
                y: y * sy,
                color: *color,
                font_size: font_size * uniform,
            },
            Self::PushClip { bounds } => Self::PushClip {
                bounds: bounds.scale(sx, sy),
            },
            Self::PopClip => Self::PopClip,
        }
    }
}

/// An owned render target a widget draws itself onto.
///
/// Coordinates are local: origin top-left, Y down. A freshly created or
/// cleared surface is fully transparent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Surface {
    size: (f32, f32),
    commands: Vec<RenderCommand>,
}

impl Surface {
    /// Creates a transparent surface.
    #[must_use]
    pub fn new(size: (f32, f32)) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    /// Returns the surface size.
    #[must_use]
    pub fn size(&self) -> (f32, f32) {
        self.size
    }

    /// Returns the surface bounds in local coordinates.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size((0.0, 0.0), self.size)
    }

    /// Returns the recorded commands.
    #[must_use]
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Returns true if nothing has been drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Clears the surface to transparent.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Clears the surface and gives it a new size.
    pub fn reset(&mut self, size: (f32, f32)) {
        self.size = size;
        self.commands.clear();
    }

    /// Fills a rectangle. Fully transparent fills are dropped.
    pub fn fill_rect(&mut self, bounds: Rect, color: Color, corner_radius: f32) {
        if color.is_transparent() {
            return;
        }
        self.commands.push(RenderCommand::Rect {
            bounds,
            color,
            corner_radius,
        });
    }

    /// Fills the whole surface.
    pub fn fill(&mut self, color: Color, corner_radius: f32) {
        self.fill_rect(self.bounds(), color, corner_radius);
    }

    /// Fills a circle. Fully transparent fills are dropped.
    pub fn fill_circle(&mut self, center: (f32, f32), radius: f32, color: Color) {
        if color.is_transparent() {
            return;
        }
        self.commands.push(RenderCommand::Circle {
            center,
            radius,
            color,
        });
    }

    /// Records a line of text at `(x, y)`.
    pub fn draw_text(&mut self, text: &str, x: f32, y: f32, color: Color, font_size: f32) {
        if text.is_empty() {
            return;
        }
        self.commands.push(RenderCommand::Text {
            text: text.to_owned(),
            x,
            y,
            color,
            font_size,
        });
    }

    /// Composites `source` with its top-left corner at `dest`.
    ///
    /// The source is clipped to its own bounds and to this surface.
    pub fn blit(&mut self, source: &Self, dest: (f32, f32)) {
        if source.is_empty() {
            return;
        }
        let target = Rect::from_pos_size(dest, source.size);
        let Some(clip) = target.intersection(&self.bounds()) else {
            return;
        };

        self.commands.reserve(source.commands.len() + 2);
        self.commands.push(RenderCommand::PushClip { bounds: clip });
        self.commands.extend(
            source
                .commands
                .iter()
                .map(|command| command.translated(dest.0, dest.1)),
        );
        self.commands.push(RenderCommand::PopClip);
    }

    /// Rescales the surface and its current contents to `size`.
    pub fn scale(&mut self, size: (f32, f32)) {
        let sx = if self.size.0 > 0.0 { size.0 / self.size.0 } else { 1.0 };
        let sy = if self.size.1 > 0.0 { size.1 / self.size.1 } else { 1.0 };
        for command in &mut self.commands {
            *command = command.scaled(sx, sy);
        }
        self.size = size;
    }
}

/// Measures and rasterizes single-line text with fixed glyph metrics.
///
/// Every glyph advances `glyph_advance * font_size` pixels and a line is
/// `line_height * font_size` tall; extents are rounded up to whole pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextRasterizer {
    /// Horizontal advance per glyph, as a fraction of the font size.
    pub glyph_advance: f32,
    /// Line height, as a fraction of the font size.
    pub line_height: f32,
}

impl TextRasterizer {
    /// Monospace metrics used when nothing else is configured.
    pub const MONOSPACE: Self = Self {
        glyph_advance: 0.6,
        line_height: 1.2,
    };

    /// Returns the pixel extent of `text` at `font_size`.
    #[must_use]
    pub fn measure(&self, text: &str, font_size: f32) -> (f32, f32) {
        // Glyph counts never approach f32's exact integer range.
        #[allow(clippy::cast_precision_loss)]
        let glyphs = text.chars().count() as f32;
        (
            pixel_ceil(glyphs * font_size * self.glyph_advance),
            pixel_ceil(font_size * self.line_height),
        )
    }

    /// Rasterizes `text` into a surface sized to its extent.
    #[must_use]
    pub fn rasterize(&self, text: &str, font_size: f32, color: Color) -> Surface {
        let mut surface = Surface::new(self.measure(text, font_size));
        surface.draw_text(text, 0.0, 0.0, color, font_size);
        surface
    }
}

/// Rounds up to whole pixels, ignoring float noise below a thousandth.
fn pixel_ceil(value: f32) -> f32 {
    (value - 1e-3).ceil().max(0.0)
}

impl Default for TextRasterizer {
    fn default() -> Self {
        Self::MONOSPACE
    }
}

/// A batch of render commands with the same clip.
#[derive(Debug, Clone)]
pub struct UIBatch {
    /// Commands in this batch.
    pub commands: Vec<RenderCommand>,
    /// Clip rect (if any).
    pub clip: Option<Rect>,
}

impl UIBatch {
    /// Creates a new empty batch.
    #[must_use]
    pub fn new(clip: Option<Rect>) -> Self {
        Self {
            commands: Vec::new(),
            clip,
        }
    }
}

impl Default for UIBatch {
    fn default() -> Self {
        Self::new(None)
    }
}

/// UI renderer that collects a frame's commands and splits them into
/// batches by clip rect.
pub struct UIRenderer {
    /// All commands from the frame.
    commands: Vec<RenderCommand>,
    /// Final batches for rendering.
    batches: Vec<UIBatch>,
}

impl UIRenderer {
    /// Creates a new UI renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(1024),
            batches: Vec::with_capacity(64),
        }
    }

    /// Begins a new frame.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
        self.batches.clear();
    }

    /// Adds every command of a surface drawn at `position`.
    pub fn submit(&mut self, surface: &Surface, position: (f32, f32)) {
        self.commands.push(RenderCommand::PushClip {
            bounds: Rect::from_pos_size(position, surface.size()),
        });
        self.commands.extend(
            surface
                .commands()
                .iter()
                .map(|command| command.translated(position.0, position.1)),
        );
        self.commands.push(RenderCommand::PopClip);
    }

    /// Ends the frame and returns batches for rendering.
    ///
    /// Nested clips are intersected; a clip that intersects nothing drops
    /// every command until it is popped.
    pub fn end_frame(&mut self) -> &[UIBatch] {
        self.batches.clear();
        let mut clip_stack: Vec<Option<Rect>> = Vec::with_capacity(16);
        let mut current = UIBatch::new(None);

        for command in self.commands.drain(..) {
            match command {
                RenderCommand::PushClip { bounds } => {
                    let clip = match clip_stack.last() {
                        Some(Some(outer)) => outer.intersection(&bounds),
                        Some(None) => None,
                        None => Some(bounds),
                    };
                    clip_stack.push(clip);
                    let finished = std::mem::replace(&mut current, UIBatch::new(clip));
                    if !finished.commands.is_empty() {
                        self.batches.push(finished);
                    }
                }
                RenderCommand::PopClip => {
                    clip_stack.pop();
                    let clip = clip_stack.last().copied().flatten();
                    let finished = std::mem::replace(&mut current, UIBatch::new(clip));
                    if !finished.commands.is_empty() {
                        self.batches.push(finished);
                    }
                }
                other => {
                    // An empty intersection clips everything away.
                    if matches!(clip_stack.last(), Some(None)) {
                        continue;
                    }
                    current.commands.push(other);
                }
            }
        }
        if !current.commands.is_empty() {
            self.batches.push(current);
        }

        &self.batches
    }

    /// Returns the pending command count.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }
}

impl Default for UIRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Vertex for UI rendering.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct UIVertex {
    /// Position (x, y).
    pub position: [f32; 2],
    /// UV coordinates.
    pub uv: [f32; 2],
    /// Color (RGBA).
    pub color: [f32; 4],
}

impl UIVertex {
    /// Creates a new vertex.
    #[must_use]
    pub const fn new(x: f32, y: f32, u: f32, v: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            uv: [u, v],
            color,
        }
    }
}

/// Segments used to approximate a circle.
const CIRCLE_SEGMENTS: usize = 24;

/// Segments used per rounded corner.
const CORNER_SEGMENTS: usize = 6;

/// Converts rect and circle fills into triangle lists.
///
/// Rounded rects become a cross of three quads plus a fan per corner; the
/// radius is clamped to half the shorter side.
///
/// Text and clip commands produce no geometry; text goes through the
/// backend's glyph path and clips become scissor state.
#[must_use]
pub fn tessellate(commands: &[RenderCommand]) -> Vec<UIVertex> {
    let mut vertices = Vec::new();

    for command in commands {
        match command {
            RenderCommand::Rect { bounds, color, corner_radius } => {
                rect_vertices(&mut vertices, *bounds, color.to_array(), *corner_radius);
            }
            RenderCommand::Circle { center, radius, color } => {
                let c = color.to_array();
                let point = |i: usize| {
                    #[allow(clippy::cast_precision_loss)]
                    let angle = std::f32::consts::TAU * i as f32 / CIRCLE_SEGMENTS as f32;
                    let (sin, cos) = angle.sin_cos();
                    UIVertex::new(
                        center.0 + cos * radius,
                        center.1 + sin * radius,
                        0.5 + cos * 0.5,
                        0.5 + sin * 0.5,
                        c,
                    )
                };
                let middle = UIVertex::new(center.0, center.1, 0.5, 0.5, c);
                for i in 0..CIRCLE_SEGMENTS {
                    vertices.push(middle);
                    vertices.push(point(i));
                    vertices.push(point(i + 1));
                }
            }
            RenderCommand::Text { .. } | RenderCommand::PushClip { .. } | RenderCommand::PopClip => {}
        }
    }

    vertices
}

fn rect_vertices(out: &mut Vec<UIVertex>, bounds: Rect, c: [f32; 4], corner_radius: f32) {
    let (l, t, r, b) = (bounds.x, bounds.y, bounds.right(), bounds.bottom());
    let radius = corner_radius.min(bounds.width / 2.0).min(bounds.height / 2.0);

    if radius <= 0.0 {
        out.extend_from_slice(&[
            UIVertex::new(l, t, 0.0, 0.0, c),
            UIVertex::new(r, t, 1.0, 0.0, c),
            UIVertex::new(r, b, 1.0, 1.0, c),
            UIVertex::new(l, t, 0.0, 0.0, c),
            UIVertex::new(r, b, 1.0, 1.0, c),
            UIVertex::new(l, b, 0.0, 1.0, c),
        ]);
        return;
    }

    // A positive radius implies a non-empty rect.
    let vertex = |x: f32, y: f32| {
        UIVertex::new(x, y, (x - l) / bounds.width, (y - t) / bounds.height, c)
    };
    let mut quad = |x0: f32, y0: f32, x1: f32, y1: f32| {
        out.extend_from_slice(&[
            vertex(x0, y0),
            vertex(x1, y0),
            vertex(x1, y1),
            vertex(x0, y0),
            vertex(x1, y1),
            vertex(x0, y1),
        ]);
    };
    quad(l + radius, t, r - radius, b);
    quad(l, t + radius, l + radius, b - radius);
    quad(r - radius, t + radius, r, b - radius);

    let quarter = std::f32::consts::FRAC_PI_2;
    let corners = [
        ((r - radius, b - radius), 0.0),
        ((l + radius, b - radius), quarter),
        ((l + radius, t + radius), 2.0 * quarter),
        ((r - radius, t + radius), 3.0 * quarter),
    ];
    for ((cx, cy), start) in corners {
        let point = |i: usize| {
            #[allow(clippy::cast_precision_loss)]
            let angle = start + quarter * i as f32 / CORNER_SEGMENTS as f32;
            let (sin, cos) = angle.sin_cos();
            vertex(cx + cos * radius, cy + sin * radius)
        };
        for i in 0..CORNER_SEGMENTS {
            out.push(vertex(cx, cy));
            out.push(point(i));
            out.push(point(i + 1));
        }
    }
}
