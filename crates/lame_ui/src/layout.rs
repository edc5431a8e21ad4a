//! Layout system for UI positioning.
//!
//! A [`Sizer`] places the children of one container along a single axis.
//! It is a pure function of the children's sizes and base positions, the
//! container size and the sizer configuration; the recursion over nested
//! containers lives in [`WidgetTree::calc_pos`](crate::widget::WidgetTree::calc_pos).

/// A rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// X position (left edge).
    pub x: f32,
    /// Y position (top edge).
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// A zero-sized rect at the origin.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Creates a rectangle from position and size.
    #[must_use]
    pub const fn from_pos_size(pos: (f32, f32), size: (f32, f32)) -> Self {
        Self {
            x: pos.0,
            y: pos.1,
            width: size.0,
            height: size.1,
        }
    }

    /// Returns the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns true if the point is inside the rectangle.
    ///
    /// The right and bottom edges are exclusive.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Returns true if two rectangles intersect.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Returns the intersection of two rectangles, or None if they don't intersect.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.intersects(other) {
            return None;
        }

        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        Some(Self::new(x, y, right - x, bottom - y))
    }

    /// Returns the rectangle moved by `(dx, dy)`.
    #[must_use]
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Returns the rectangle with both position and size multiplied per axis.
    #[must_use]
    pub fn scale(&self, sx: f32, sy: f32) -> Self {
        Self::new(self.x * sx, self.y * sy, self.width * sx, self.height * sy)
    }
}

/// Layout direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Top to bottom.
    #[default]
    Vertical,
    /// Left to right.
    Horizontal,
}

/// Layout alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Children keep their offsets from the top-left corner.
    #[default]
    None,
    /// Center on the X axis.
    CenterHorizontal,
    /// Center on the Y axis.
    CenterVertical,
    /// Center on both axes.
    CenterBoth,
}

impl Alignment {
    /// Returns true if X is centered.
    #[must_use]
    pub const fn centers_x(self) -> bool {
        matches!(self, Self::CenterHorizontal | Self::CenterBoth)
    }

    /// Returns true if Y is centered.
    #[must_use]
    pub const fn centers_y(self) -> bool {
        matches!(self, Self::CenterVertical | Self::CenterBoth)
    }
}

/// What the sizer needs to know about one child.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutItem {
    /// Child size.
    pub size: (f32, f32),
    /// Author-specified offset.
    pub base_position: (f32, f32),
}

impl LayoutItem {
    /// Creates a layout item.
    #[must_use]
    pub const fn new(size: (f32, f32), base_position: (f32, f32)) -> Self {
        Self { size, base_position }
    }
}

/// Linear layout manager bound to one container.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sizer {
    /// Layout axis.
    pub direction: Direction,
    /// Centering applied after the running offset.
    pub alignment: Alignment,
    /// Pixels inserted between consecutive children.
    pub space_between: f32,
}

impl Sizer {
    /// Creates a sizer along `direction` with no alignment or spacing.
    #[must_use]
    pub const fn new(direction: Direction) -> Self {
        Self {
            direction,
            alignment: Alignment::None,
            space_between: 0.0,
        }
    }

    /// Creates a vertical sizer.
    #[must_use]
    pub const fn vertical() -> Self {
        Self::new(Direction::Vertical)
    }

    /// Creates a horizontal sizer.
    #[must_use]
    pub const fn horizontal() -> Self {
        Self::new(Direction::Horizontal)
    }

    /// Sets the alignment.
    #[must_use]
    pub const fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Sets the spacing between children.
    #[must_use]
    pub const fn with_space_between(mut self, space_between: f32) -> Self {
        self.space_between = space_between;
        self
    }

    /// Returns the aggregate extent of `items`.
    ///
    /// Both axes sum every child; spacing is only added on the layout axis,
    /// and only between children.
    #[must_use]
    pub fn total_extent(&self, items: &[LayoutItem]) -> (f32, f32) {
        let mut iter = items.iter();
        let Some(first) = iter.next() else {
            return (0.0, 0.0);
        };

        let (mut total_w, mut total_h) = first.size;
        for item in iter {
            total_w += item.size.0;
            total_h += item.size.1;
            match self.direction {
                Direction::Horizontal => total_w += self.space_between,
                Direction::Vertical => total_h += self.space_between,
            }
        }
        (total_w, total_h)
    }

    /// Computes the local position of every item inside a container of
    /// size `container`.
    ///
    /// The base offset of an item shifts it and every item after it.
    #[must_use]
    pub fn arrange(&self, container: (f32, f32), items: &[LayoutItem]) -> Vec<(f32, f32)> {
        if items.is_empty() {
            return Vec::new();
        }

        let (total_w, total_h) = self.total_extent(items);
        let center_x = container.0 / 2.0;
        let center_y = container.1 / 2.0;
        let center_x_axis = self.alignment.centers_x();
        let center_y_axis = self.alignment.centers_y();

        let mut offset = 0.0;
        let mut results = Vec::with_capacity(items.len());

        for item in items {
            let (base_x, base_y) = item.base_position;
            let (w, h) = item.size;
            let (mut x, mut y) = (base_x, base_y);

            match self.direction {
                Direction::Vertical => {
                    y += offset;
                    offset += h + self.space_between + base_y;

                    if center_x_axis {
                        x += center_x - w / 2.0;
                    }
                    if center_y_axis {
                        y += center_y - total_h / 2.0;
                    }
                }
                Direction::Horizontal => {
                    x += offset;
                    offset += w + self.space_between + base_x;

                    if center_x_axis {
                        x += center_x - total_w / 2.0;
                    }
                    if center_y_axis {
                        y += center_y - h / 2.0;
                    }
                }
            }

            results.push((x, y));
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(sizes: &[(f32, f32)]) -> Vec<LayoutItem> {
        sizes
            .iter()
            .map(|&size| LayoutItem::new(size, (0.0, 0.0)))
            .collect()
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);

        assert!(rect.contains(50.0, 30.0));
        assert!(rect.contains(10.0, 20.0));
        assert!(!rect.contains(110.0, 30.0));
        assert!(!rect.contains(5.0, 30.0));
        assert!(!rect.contains(50.0, 80.0));
    }

    #[test]
    fn test_horizontal_centered_row() {
        let sizer = Sizer::horizontal().with_alignment(Alignment::CenterHorizontal);
        let result = sizer.arrange((700.0, 40.0), &items(&[(200.0, 40.0); 3]));

        let xs: Vec<f32> = result.iter().map(|p| p.0).collect();
        assert_eq!(xs, vec![50.0, 250.0, 450.0]);
        assert!(result.iter().all(|p| p.1 == 0.0));
    }

    #[test]
    fn test_horizontal_center_vertical_uses_own_height() {
        let sizer = Sizer::horizontal().with_alignment(Alignment::CenterVertical);
        let result = sizer.arrange((300.0, 100.0), &items(&[(50.0, 20.0), (60.0, 40.0)]));

        // X runs from the left edge; each child is centered by its own height.
        assert_eq!(result, vec![(0.0, 40.0), (50.0, 30.0)]);
    }

    #[test]
    fn test_horizontal_spacing_is_between_only() {
        let sizer = Sizer::horizontal().with_space_between(10.0);
        let list = items(&[(50.0, 20.0), (60.0, 40.0), (30.0, 10.0)]);

        assert_eq!(sizer.total_extent(&list), (160.0, 70.0));

        let xs: Vec<f32> = sizer.arrange((300.0, 100.0), &list).iter().map(|p| p.0).collect();
        assert_eq!(xs, vec![0.0, 60.0, 130.0]);
    }

    #[test]
    fn test_horizontal_center_both_with_spacing() {
        let sizer = Sizer::horizontal()
            .with_alignment(Alignment::CenterBoth)
            .with_space_between(10.0);
        let list = items(&[(50.0, 20.0), (60.0, 40.0), (30.0, 10.0)]);
        let result = sizer.arrange((300.0, 100.0), &list);

        // Row of width 160 starts at 70.
        assert_eq!(result, vec![(70.0, 40.0), (130.0, 30.0), (200.0, 45.0)]);
    }

    #[test]
    fn test_vertical_spacing_is_between_only() {
        let sizer = Sizer::vertical().with_space_between(10.0);
        let list = items(&[(30.0, 20.0), (40.0, 20.0), (30.0, 20.0)]);

        assert_eq!(sizer.total_extent(&list), (100.0, 80.0));

        let ys: Vec<f32> = sizer.arrange((200.0, 200.0), &list).iter().map(|p| p.1).collect();
        assert_eq!(ys, vec![0.0, 30.0, 60.0]);
    }

    #[test]
    fn test_vertical_center_both() {
        let sizer = Sizer::vertical().with_alignment(Alignment::CenterBoth);
        let result = sizer.arrange((100.0, 100.0), &items(&[(20.0, 10.0), (40.0, 30.0)]));

        // Column of height 40 centered in 100; each child centered on X.
        assert_eq!(result, vec![(40.0, 30.0), (30.0, 40.0)]);
    }

    #[test]
    fn test_base_offsets_accumulate() {
        let sizer = Sizer::vertical();
        let list = vec![
            LayoutItem::new((10.0, 10.0), (0.0, 30.0)),
            LayoutItem::new((10.0, 10.0), (0.0, 15.0)),
            LayoutItem::new((10.0, 10.0), (5.0, 15.0)),
        ];

        let result = sizer.arrange((100.0, 100.0), &list);
        assert_eq!(result, vec![(0.0, 30.0), (0.0, 55.0), (5.0, 80.0)]);
    }

    #[test]
    fn test_empty_container_is_noop() {
        let sizer = Sizer::horizontal().with_alignment(Alignment::CenterBoth);
        assert!(sizer.arrange((100.0, 100.0), &[]).is_empty());
        assert_eq!(sizer.total_extent(&[]), (0.0, 0.0));
    }

    #[test]
    fn test_arrange_is_idempotent() {
        let sizer = Sizer::horizontal()
            .with_alignment(Alignment::CenterBoth)
            .with_space_between(7.0);
        let list = items(&[(13.0, 9.0), (21.0, 4.0), (5.0, 17.0)]);

        let first = sizer.arrange((320.0, 240.0), &list);
        let second = sizer.arrange((320.0, 240.0), &list);
        assert_eq!(first, second);
    }
}
