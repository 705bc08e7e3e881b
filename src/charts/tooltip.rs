//! Tooltip
//! Single overlay owned by the chart viewer. Shown, moved and hidden as the
//! pointer enters, moves over and leaves marks; never recreated.

use crate::data::RaceRecord;

/// Offset of the tooltip from the pointer, in screen pixels.
pub const POINTER_OFFSET: [f32; 2] = [10.0, -10.0];
/// Opacity of the tooltip while it tracks the pointer.
pub const TRACKING_OPACITY: f32 = 0.9;

/// Text shown for a record.
pub fn tooltip_text(record: &RaceRecord) -> String {
    format!(
        "{}: {}\nYear: {}, Time: {}\n{}",
        record.name,
        record.nationality,
        record.year,
        record.display_time(),
        record.doping
    )
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tooltip {
    visible: bool,
    opacity: f32,
    /// Mark currently highlighted (dataset record index)
    highlighted: Option<usize>,
    content: String,
    position: [f32; 2],
}

impl Tooltip {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn position(&self) -> [f32; 2] {
        self.position
    }

    /// Pointer entered a mark: show the overlay and highlight the mark.
    pub fn pointer_enter(&mut self, record: usize) {
        self.visible = true;
        self.opacity = 1.0;
        self.highlighted = Some(record);
    }

    /// Pointer moved over a mark: refresh content and follow the pointer.
    pub fn pointer_move(&mut self, record: &RaceRecord, pointer: [f32; 2]) {
        self.content = tooltip_text(record);
        self.position = [pointer[0] + POINTER_OFFSET[0], pointer[1] + POINTER_OFFSET[1]];
        self.opacity = TRACKING_OPACITY;
    }

    /// Pointer left the mark: hide the overlay and drop the highlight.
    pub fn pointer_leave(&mut self) {
        self.visible = false;
        self.opacity = 0.0;
        self.highlighted = None;
    }

    /// Feed the mark under the pointer for this frame, emitting the
    /// leave / enter / move transitions it implies.
    pub fn track(&mut self, hit: Option<(usize, &RaceRecord)>, pointer: [f32; 2]) {
        let target = hit.map(|(i, _)| i);
        if self.highlighted.is_some() && self.highlighted != target {
            self.pointer_leave();
        }

        if let Some((index, record)) = hit {
            if self.highlighted != Some(index) {
                self.pointer_enter(index);
            }
            self.pointer_move(record, pointer);
        }
    }

    /// Forget everything, e.g. when the scene is replaced.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_record as record;

    fn pantani() -> RaceRecord {
        let mut r = record("Marco Pantani", 1995, 2210.0, "Alleged drug use");
        r.time = "36:50".to_string();
        r
    }

    #[test]
    fn text_joins_fields_with_literal_separators() {
        assert_eq!(
            tooltip_text(&pantani()),
            "Marco Pantani: ITA\nYear: 1995, Time: 36:50\nAlleged drug use"
        );
    }

    #[test]
    fn clean_rider_has_empty_last_line() {
        let r = record("Thibaut Pinot", 2015, 2357.0, "");
        assert_eq!(tooltip_text(&r), "Thibaut Pinot: ITA\nYear: 2015, Time: 39:17\n");
    }

    #[test]
    fn starts_hidden() {
        let tooltip = Tooltip::new();
        assert!(!tooltip.is_visible());
        assert_eq!(tooltip.opacity(), 0.0);
        assert_eq!(tooltip.highlighted(), None);
    }

    #[test]
    fn enter_move_leave_cycle() {
        let mut tooltip = Tooltip::new();
        let r = pantani();

        tooltip.pointer_enter(0);
        assert!(tooltip.is_visible());
        assert_eq!(tooltip.highlighted(), Some(0));

        tooltip.pointer_move(&r, [200.0, 100.0]);
        assert_eq!(tooltip.position(), [210.0, 90.0]);
        assert_eq!(tooltip.opacity(), 0.9);
        assert!(tooltip.content().contains("Marco Pantani: ITA"));
        assert!(tooltip.content().contains("Year: 1995, Time: 36:50"));

        tooltip.pointer_leave();
        assert!(!tooltip.is_visible());
        assert_eq!(tooltip.highlighted(), None);
    }

    #[test]
    fn track_switches_between_marks() {
        let mut tooltip = Tooltip::new();
        let a = pantani();
        let b = record("Iban Mayo", 2003, 2215.0, "");

        tooltip.track(Some((0, &a)), [10.0, 10.0]);
        assert_eq!(tooltip.highlighted(), Some(0));

        tooltip.track(Some((4, &b)), [30.0, 10.0]);
        assert_eq!(tooltip.highlighted(), Some(4));
        assert!(tooltip.content().starts_with("Iban Mayo"));
        assert!(tooltip.is_visible());

        tooltip.track(None, [500.0, 10.0]);
        assert!(!tooltip.is_visible());
        assert_eq!(tooltip.highlighted(), None);
    }

    #[test]
    fn track_without_hit_keeps_hidden_tooltip_untouched() {
        let mut tooltip = Tooltip::new();
        tooltip.track(None, [1.0, 1.0]);
        assert_eq!(tooltip, Tooltip::default());
    }
}
