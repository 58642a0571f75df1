//! Drag and drop mediation
//!
//! Mouse drag events and touch gestures are both reduced to `PointerInput`
//! and hit-tested against a `SlotLayout`, so one code path turns either into
//! `Board::move_card`. At most one drag session exists at a time; a second
//! start while one is in flight is ignored.

use glam::Vec2;

use super::board::Board;
use super::container::MoveOutcome;
use crate::error::MoveError;

/// A slot on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotRef {
    pub lane: usize,
    pub slot: usize,
}

impl SlotRef {
    pub fn new(lane: usize, slot: usize) -> Self {
        Self { lane, slot }
    }
}

/// Screen rectangle of one slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotRect {
    pub target: SlotRef,
    pub min: Vec2,
    pub max: Vec2,
}

impl SlotRect {
    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmplt(self.max).all()
    }
}

/// Where every visible slot currently is on screen
#[derive(Debug, Clone, Default)]
pub struct SlotLayout {
    rects: Vec<SlotRect>,
}

impl SlotLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.rects.clear();
    }

    pub fn insert(&mut self, target: SlotRef, min: Vec2, max: Vec2) {
        self.rects.push(SlotRect { target, min, max });
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Slot under `point`, if any
    pub fn slot_at(&self, point: Vec2) -> Option<SlotRef> {
        self.rects
            .iter()
            .find(|r| r.contains(point))
            .map(|r| r.target)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    Mouse,
    Touch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// One pointer event in page coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub phase: PointerPhase,
    pub source: PointerSource,
    pub position: Vec2,
}

impl PointerInput {
    pub fn new(phase: PointerPhase, source: PointerSource, position: Vec2) -> Self {
        Self {
            phase,
            source,
            position,
        }
    }
}

/// The drag in flight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub origin: SlotRef,
    pub source: PointerSource,
    pub start: Vec2,
    pub position: Vec2,
    /// Slot under the pointer (highlight only)
    pub hover: Option<SlotRef>,
}

impl DragSession {
    /// Distance travelled since the drag started
    pub fn offset(&self) -> Vec2 {
        self.position - self.start
    }
}

/// What a pointer event did
#[derive(Debug, Clone, PartialEq)]
pub enum DragFeedback {
    /// Nothing to do
    Idle,
    /// Start refused: another drag is active or the card can't be picked up
    Ignored,
    Started(SlotRef),
    /// Slot now under the pointer
    Hover(Option<SlotRef>),
    Dropped {
        from: SlotRef,
        to: SlotRef,
        outcome: MoveOutcome,
    },
    Rejected(MoveError),
    Cancelled,
}

#[derive(Debug, Clone, Default)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Feed one pointer event through the drag state machine
    pub fn handle(&mut self, input: PointerInput, layout: &SlotLayout, board: &mut Board) -> DragFeedback {
        // Events from the other device (e.g. emulated mouse after touch) don't
        // touch the active session
        if let Some(session) = &self.session {
            if session.source != input.source {
                return if input.phase == PointerPhase::Start {
                    DragFeedback::Ignored
                } else {
                    DragFeedback::Idle
                };
            }
        }

        match input.phase {
            PointerPhase::Start => self.start(input, layout, board),
            PointerPhase::Move => self.update(input, layout),
            PointerPhase::End => self.finish(input, layout, board),
            PointerPhase::Cancel => match self.session.take() {
                Some(_) => DragFeedback::Cancelled,
                None => DragFeedback::Idle,
            },
        }
    }

    fn start(&mut self, input: PointerInput, layout: &SlotLayout, board: &Board) -> DragFeedback {
        if self.session.is_some() {
            log::debug!("Drag already in progress, ignoring new drag");
            return DragFeedback::Ignored;
        }
        let Some(origin) = layout.slot_at(input.position) else {
            return DragFeedback::Idle;
        };
        if !board.can_drag(origin.lane, origin.slot) {
            return DragFeedback::Ignored;
        }
        self.session = Some(DragSession {
            origin,
            source: input.source,
            start: input.position,
            position: input.position,
            hover: Some(origin),
        });
        log::debug!("Drag started at {:?} ({:?})", origin, input.source);
        DragFeedback::Started(origin)
    }

    fn update(&mut self, input: PointerInput, layout: &SlotLayout) -> DragFeedback {
        let Some(session) = self.session.as_mut() else {
            return DragFeedback::Idle;
        };
        session.position = input.position;
        session.hover = layout.slot_at(input.position);
        DragFeedback::Hover(session.hover)
    }

    fn finish(&mut self, input: PointerInput, layout: &SlotLayout, board: &mut Board) -> DragFeedback {
        let Some(session) = self.session.take() else {
            return DragFeedback::Idle;
        };
        let from = session.origin;
        let to = match layout.slot_at(input.position) {
            Some(to) if to.lane == from.lane => to,
            _ => return DragFeedback::Cancelled,
        };
        match board.move_card(from.lane, from.slot, to.slot) {
            Ok(outcome) => DragFeedback::Dropped { from, to, outcome },
            Err(err) => {
                log::warn!("Drop {:?} -> {:?} rejected: {}", from, to, err);
                DragFeedback::Rejected(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::container::MoveKind;
    use crate::settings::{ContainerSettings, Settings, WinningMode};

    /// Two lanes of three 100x100 slots, lane 1 below lane 0
    fn layout() -> SlotLayout {
        let mut layout = SlotLayout::new();
        for lane in 0..2 {
            for slot in 0..3 {
                let min = Vec2::new(slot as f32 * 100.0, lane as f32 * 100.0);
                layout.insert(SlotRef::new(lane, slot), min, min + Vec2::splat(100.0));
            }
        }
        layout
    }

    fn board() -> Board {
        let lane = ContainerSettings::new(3, 0, 100, WinningMode::Ascending);
        Board::new(Settings::new(vec![lane.clone(), lane]), 4).unwrap()
    }

    fn at(phase: PointerPhase, source: PointerSource, x: f32, y: f32) -> PointerInput {
        PointerInput::new(phase, source, Vec2::new(x, y))
    }

    #[test]
    fn test_hit_testing() {
        let layout = layout();
        assert_eq!(layout.len(), 6);
        assert_eq!(layout.slot_at(Vec2::new(150.0, 50.0)), Some(SlotRef::new(0, 1)));
        assert_eq!(layout.slot_at(Vec2::new(250.0, 150.0)), Some(SlotRef::new(1, 2)));
        assert_eq!(layout.slot_at(Vec2::new(100.0, 0.0)), Some(SlotRef::new(0, 1)));
        assert_eq!(layout.slot_at(Vec2::new(350.0, 50.0)), None);
    }

    #[test]
    fn test_drop_uses_the_layout_measured_at_release() {
        let mut board = board();
        let mut drag = DragController::new();
        drag.handle(at(PointerPhase::Start, PointerSource::Mouse, 10.0, 10.0), &layout(), &mut board);

        // The page scrolled 100px down while the card was held
        let mut scrolled = SlotLayout::new();
        for lane in 0..2 {
            for slot in 0..3 {
                let min = Vec2::new(slot as f32 * 100.0, lane as f32 * 100.0 - 100.0);
                scrolled.insert(SlotRef::new(lane, slot), min, min + Vec2::splat(100.0));
            }
        }
        let release = at(PointerPhase::End, PointerSource::Mouse, 210.0, -50.0);
        assert_eq!(layout().slot_at(release.position), None);

        let feedback = drag.handle(release, &scrolled, &mut board);
        assert!(
            matches!(feedback, DragFeedback::Dropped { to, .. } if to == SlotRef::new(0, 2)),
            "got {:?}",
            feedback
        );
    }

    #[test]
    fn test_mouse_drag_swaps_cards() {
        let layout = layout();
        let mut board = board();
        let before = board.lanes()[0].active().current_order();
        let mut drag = DragController::new();

        assert_eq!(
            drag.handle(at(PointerPhase::Start, PointerSource::Mouse, 10.0, 10.0), &layout, &mut board),
            DragFeedback::Started(SlotRef::new(0, 0))
        );
        assert_eq!(
            drag.handle(at(PointerPhase::Move, PointerSource::Mouse, 120.0, 40.0), &layout, &mut board),
            DragFeedback::Hover(Some(SlotRef::new(0, 1)))
        );
        assert_eq!(drag.session().unwrap().offset(), Vec2::new(110.0, 30.0));

        let feedback = drag.handle(at(PointerPhase::End, PointerSource::Mouse, 120.0, 40.0), &layout, &mut board);
        let DragFeedback::Dropped { from, to, outcome } = feedback else {
            panic!("expected a drop, got {:?}", feedback);
        };
        assert_eq!((from, to), (SlotRef::new(0, 0), SlotRef::new(0, 1)));
        assert_eq!(outcome.kind, MoveKind::Swapped);
        assert!(!drag.is_dragging());

        if !outcome.check.is_win() {
            let after = board.lanes()[0].active().current_order();
            assert_eq!(after, vec![before[1], before[0], before[2]]);
        }
    }

    #[test]
    fn test_touch_uses_the_same_path() {
        let layout = layout();
        let mut board = board();
        let mut drag = DragController::new();
        drag.handle(at(PointerPhase::Start, PointerSource::Touch, 250.0, 150.0), &layout, &mut board);
        let feedback = drag.handle(at(PointerPhase::End, PointerSource::Touch, 50.0, 150.0), &layout, &mut board);
        assert!(matches!(
            feedback,
            DragFeedback::Dropped { from, to, .. } if from == SlotRef::new(1, 2) && to == SlotRef::new(1, 0)
        ));
    }

    #[test]
    fn test_second_drag_is_ignored() {
        let layout = layout();
        let mut board = board();
        let mut drag = DragController::new();
        drag.handle(at(PointerPhase::Start, PointerSource::Mouse, 10.0, 10.0), &layout, &mut board);
        assert_eq!(
            drag.handle(at(PointerPhase::Start, PointerSource::Mouse, 210.0, 10.0), &layout, &mut board),
            DragFeedback::Ignored
        );
        assert_eq!(
            drag.handle(at(PointerPhase::Start, PointerSource::Touch, 210.0, 10.0), &layout, &mut board),
            DragFeedback::Ignored
        );
        assert_eq!(drag.session().unwrap().origin, SlotRef::new(0, 0));

        // Stray events from the other device leave the session alone
        assert_eq!(
            drag.handle(at(PointerPhase::End, PointerSource::Touch, 210.0, 10.0), &layout, &mut board),
            DragFeedback::Idle
        );
        assert!(drag.is_dragging());
    }

    #[test]
    fn test_drops_outside_the_lane_cancel() {
        let layout = layout();
        let mut board = board();
        let before = board.lanes().to_vec();
        let mut drag = DragController::new();

        drag.handle(at(PointerPhase::Start, PointerSource::Mouse, 10.0, 10.0), &layout, &mut board);
        assert_eq!(
            drag.handle(at(PointerPhase::End, PointerSource::Mouse, 10.0, 150.0), &layout, &mut board),
            DragFeedback::Cancelled
        );
        drag.handle(at(PointerPhase::Start, PointerSource::Mouse, 10.0, 10.0), &layout, &mut board);
        assert_eq!(
            drag.handle(at(PointerPhase::End, PointerSource::Mouse, 900.0, 10.0), &layout, &mut board),
            DragFeedback::Cancelled
        );
        drag.handle(at(PointerPhase::Start, PointerSource::Mouse, 10.0, 10.0), &layout, &mut board);
        assert_eq!(
            drag.handle(at(PointerPhase::Cancel, PointerSource::Mouse, 0.0, 0.0), &layout, &mut board),
            DragFeedback::Cancelled
        );
        assert_eq!(board.lanes(), &before[..]);
    }

    #[test]
    fn test_start_on_empty_space_or_missing_slot() {
        let mut layout = layout();
        // A slot the board doesn't have
        layout.insert(SlotRef::new(0, 7), Vec2::new(300.0, 0.0), Vec2::new(400.0, 100.0));
        let mut board = board();
        let mut drag = DragController::new();
        assert_eq!(
            drag.handle(at(PointerPhase::Start, PointerSource::Mouse, 500.0, 500.0), &layout, &mut board),
            DragFeedback::Idle
        );
        assert_eq!(
            drag.handle(at(PointerPhase::Start, PointerSource::Mouse, 350.0, 50.0), &layout, &mut board),
            DragFeedback::Ignored
        );
        assert_eq!(
            drag.handle(at(PointerPhase::Move, PointerSource::Mouse, 10.0, 10.0), &layout, &mut board),
            DragFeedback::Idle
        );
    }

    #[test]
    fn test_drop_onto_unknown_slot_is_rejected() {
        let mut layout = layout();
        layout.insert(SlotRef::new(0, 7), Vec2::new(300.0, 0.0), Vec2::new(400.0, 100.0));
        let mut board = board();
        let mut drag = DragController::new();
        drag.handle(at(PointerPhase::Start, PointerSource::Mouse, 10.0, 10.0), &layout, &mut board);
        assert_eq!(
            drag.handle(at(PointerPhase::End, PointerSource::Mouse, 350.0, 50.0), &layout, &mut board),
            DragFeedback::Rejected(MoveError::SlotOutOfRange { index: 7, len: 3 })
        );
    }
}
