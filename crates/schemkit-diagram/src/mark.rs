//! Text marks and the anchor tables that position them.
//!
//! A mark never holds a reference into the geometry it annotates. It names
//! two slots in its owner's [`AnchorTable`] by index: the anchor it sits at
//! and a centre reference used to decide which side of the element it is on.
//! After any geometry change the owner rewrites its table and the marks
//! follow; there is no per-frame callback machinery.

use serde::{Deserialize, Serialize};

use schemkit_core::{cardinalized, Point, Vec3};

pub type AnchorIndex = usize;

/// Positions a markable element exposes for its marks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnchorTable {
    anchors: Vec<Point>,
}

impl AnchorTable {
    pub const CENTRE: AnchorIndex = 0;
    pub const LABEL: AnchorIndex = 1;
    pub const ANNOTATION: AnchorIndex = 2;

    pub fn new() -> Self {
        Self::default()
    }

    /// Write `point` into slot `index`, growing the table as needed.
    pub fn set(&mut self, index: AnchorIndex, point: Point) {
        if self.anchors.len() <= index {
            self.anchors.resize(index + 1, Point::default());
        }
        self.anchors[index] = point;
    }

    pub fn get(&self, index: AnchorIndex) -> Point {
        self.anchors.get(index).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}

/// Which of a component's two standard marks is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkKind {
    Label,
    Annotation,
}

/// Horizontal alignment of a rendered mark, derived from which side of its
/// element the mark sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkAlignment {
    Start,
    Middle,
    End,
}

/// A text mark attached to an anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    pub anchor: AnchorIndex,
    pub centre_ref: AnchorIndex,
    pub text: String,
}

impl Mark {
    pub fn new(anchor: AnchorIndex, centre_ref: AnchorIndex, text: impl Into<String>) -> Self {
        Self {
            anchor,
            centre_ref,
            text: text.into(),
        }
    }

    pub fn position(&self, table: &AnchorTable) -> Point {
        table.get(self.anchor)
    }

    /// Alignment of the mark text so it grows away from the element.
    ///
    /// The direction from the centre reference to the anchor is snapped to
    /// the nearest cardinal within `margin`; a mark straight above or below
    /// centres its text, one off to a side left- or right-aligns it.
    pub fn alignment(&self, table: &AnchorTable, margin: f64) -> MarkAlignment {
        let offset = table.get(self.anchor) - table.get(self.centre_ref);
        if offset.length() < schemkit_core::EPSILON {
            return MarkAlignment::Middle;
        }
        let snapped = cardinalized(offset, margin);
        if snapped.x.abs() < schemkit_core::EPSILON {
            MarkAlignment::Middle
        } else if snapped.x > 0.0 {
            MarkAlignment::Start
        } else {
            MarkAlignment::End
        }
    }

    /// Whether the mark sits below its centre reference, for baseline
    /// placement.
    pub fn below(&self, table: &AnchorTable) -> bool {
        let offset = table.get(self.anchor) - table.get(self.centre_ref);
        offset.y < 0.0
    }
}

/// A current arrow on a terminal, with its label.
///
/// `out` flips the arrow to point away from the component, `below` places
/// the label on the opposite side of the terminal stem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentMark {
    pub out: bool,
    pub below: bool,
    pub text: String,
}

impl CurrentMark {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            out: false,
            below: false,
            text: text.into(),
        }
    }

    /// Direction of the arrow head for a terminal pointing `direction`.
    pub fn arrow_direction(&self, direction: Vec3) -> Vec3 {
        if self.out {
            direction
        } else {
            -direction
        }
    }

    /// Offset from the terminal's tap point to the label position.
    pub fn label_offset(&self, direction: Vec3, distance: f64) -> Vec3 {
        let side = direction.cross_out();
        if self.below {
            side * distance
        } else {
            -side * distance
        }
    }
}

#[cfg(test)]
mod tests {
    use schemkit_core::{RIGHT, UP};

    use super::*;

    fn table_with(centre: Point, anchor: Point) -> AnchorTable {
        let mut table = AnchorTable::new();
        table.set(AnchorTable::CENTRE, centre);
        table.set(AnchorTable::LABEL, anchor);
        table
    }

    #[test]
    fn test_mark_above_centres_its_text() {
        let table = table_with(Point::default(), Vec3::xy(0.0, 1.0));
        let mark = Mark::new(AnchorTable::LABEL, AnchorTable::CENTRE, "R_1");
        assert_eq!(mark.alignment(&table, 0.1), MarkAlignment::Middle);
        assert!(!mark.below(&table));
    }

    #[test]
    fn test_mark_to_the_right_left_aligns() {
        let table = table_with(Point::default(), Vec3::xy(1.0, 0.02));
        let mark = Mark::new(AnchorTable::LABEL, AnchorTable::CENTRE, "R_1");
        assert_eq!(mark.alignment(&table, 0.1), MarkAlignment::Start);
    }

    #[test]
    fn test_anchor_table_grows_on_set() {
        let mut table = AnchorTable::new();
        table.set(AnchorTable::ANNOTATION, Vec3::xy(1.0, 2.0));
        assert_eq!(table.len(), 3);
        assert!(table.get(AnchorTable::CENTRE).approx_eq(Point::default()));
    }

    #[test]
    fn test_current_mark_orientation() {
        let mark = CurrentMark {
            out: true,
            below: false,
            text: "i".into(),
        };
        assert!(mark.arrow_direction(RIGHT).approx_eq(RIGHT));
        // Above a rightward stem means the +y side.
        assert!(mark.label_offset(RIGHT, 0.2).approx_eq(UP * 0.2));
    }
}
