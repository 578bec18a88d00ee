//! The room grammar: `P -> P h P | P v P`.
//!
//! One room is cut into two under area and aspect-ratio limits until every
//! room is terminal. Running out of valid cuts is the normal way this stops.

use tracing::{debug, trace};

use crate::config::GeneratorConfig;
use crate::level::LevelSink;
use crate::rng::MapRng;
use crate::types::RoomId;

use super::context::GenerationContext;
use super::rooms::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum CutAxis {
    /// Cut line runs horizontally, splitting the height.
    Horizontal,
    /// Cut line runs vertically, splitting the width.
    Vertical,
}

impl CutAxis {
    fn other(self) -> Self {
        match self {
            CutAxis::Horizontal => CutAxis::Vertical,
            CutAxis::Vertical => CutAxis::Horizontal,
        }
    }

    /// `(split side, perpendicular side)` of `rect` for this axis.
    fn sides(self, rect: Rect) -> (i32, i32) {
        match self {
            CutAxis::Horizontal => (rect.h, rect.w),
            CutAxis::Vertical => (rect.w, rect.h),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct Cut {
    pub(super) axis: CutAxis,
    /// Interior size of the first child along the split side.
    pub(super) first: i32,
}

impl Cut {
    /// The two children, separated by one shared wall line.
    pub(super) fn apply(self, rect: Rect) -> (Rect, Rect) {
        let (side, _) = self.axis.sides(rect);
        let second = side - self.first - 1;
        match self.axis {
            CutAxis::Horizontal => (
                Rect::new(rect.x, rect.y, rect.w, self.first),
                Rect::new(rect.x, rect.y + self.first + 1, rect.w, second),
            ),
            CutAxis::Vertical => (
                Rect::new(rect.x, rect.y, self.first, rect.h),
                Rect::new(rect.x + self.first + 1, rect.y, second, rect.h),
            ),
        }
    }
}

/// Builds the root room covering the whole map and cuts it down.
pub(super) fn partition<L: LevelSink>(context: &mut GenerationContext<'_, L>) {
    let width = context.grid.width() as i32;
    let height = context.grid.height() as i32;
    let root = Rect::new(1, 1, width - 2, height - 2);
    let root_id = context.rooms.add(root);
    context.grid.draw_room(root_id, root);

    let mut pending: Vec<RoomId> = vec![root_id];
    while let Some(id) = pending.pop() {
        let rect = context.rooms.rect(id);
        let Some(cut) = choose_cut(rect, root.area(), context.config, context.rng) else {
            continue;
        };

        let (first, second) = cut.apply(rect);
        context.rooms.get_mut(id).rect = first;
        let new_id = context.rooms.add(second);
        context.grid.draw_room(new_id, second);
        context.grid.draw_room(id, first);
        trace!("cut room {id} {:?} at {} into {first:?} and {second:?}", cut.axis, cut.first);

        pending.push(new_id);
        pending.push(id);
    }

    debug!(rooms = context.rooms.len(), "partitioned {width}x{height} map");
}

/// Decides whether `rect` is cut again and where. `None` makes it terminal.
pub(super) fn choose_cut(
    rect: Rect,
    root_area: u32,
    config: &GeneratorConfig,
    rng: &mut MapRng,
) -> Option<Cut> {
    if rng.unit() >= cut_probability(rect.area(), root_area, config.min_room_area) {
        return None;
    }

    let preferred = if rng.coin() { CutAxis::Horizontal } else { CutAxis::Vertical };
    let (axis, (lo, hi)) = split_range(rect, preferred, config.worst_room_ratio)
        .map(|range| (preferred, range))
        .or_else(|| {
            let fallback = preferred.other();
            split_range(rect, fallback, config.worst_room_ratio).map(|range| (fallback, range))
        })?;

    let first = rng.range_inclusive(lo, hi);
    let (side, perpendicular) = axis.sides(rect);
    let second = side - first - 1;
    let min_side = config.min_room_side as i32;
    if first < min_side || second < min_side {
        return None;
    }

    let min_area = i64::from(config.min_room_area);
    let perpendicular = i64::from(perpendicular);
    if perpendicular * i64::from(first) < min_area || perpendicular * i64::from(second) < min_area {
        return None;
    }

    Some(Cut { axis, first })
}

/// Linear in area: the whole map is always a candidate, rooms near the
/// minimum area almost never are.
pub(super) fn cut_probability(area: u32, root_area: u32, min_area: u32) -> f64 {
    if root_area <= min_area {
        return 0.0;
    }
    let p = (f64::from(area) - f64::from(min_area)) / (f64::from(root_area) - f64::from(min_area));
    p.clamp(0.0, 1.0)
}

/// Inclusive range of first-child sizes along `axis` that keep both
/// children's interiors within `ratio`. The children share one wall line, so
/// their sizes add up to `side - 1`.
pub(super) fn split_range(rect: Rect, axis: CutAxis, ratio: f64) -> Option<(i32, i32)> {
    let (side, perpendicular) = axis.sides(rect);
    let perpendicular = f64::from(perpendicular);
    let lo = (perpendicular / ratio).ceil() as i32;
    let hi = (perpendicular * ratio).floor() as i32;

    let min = lo.max(side - 1 - hi).max(1);
    let max = hi.min(side - 1 - lo).min(side - 2);
    (min <= max).then_some((min, max))
}
