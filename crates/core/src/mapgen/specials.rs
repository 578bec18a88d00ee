//! Entrance and exit rooms with their teleporters.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::TeleportPair;
use crate::error::MapgenError;
use crate::level::{HalfPos, LevelSink, ObstacleKind, Portal, PortalHelper};
use crate::types::{Pos, RoomId};

use super::context::GenerationContext;
use super::graph::hop_distances;

const ENHANCERS: [(PortalHelper, i32, i32); 4] = [
    (PortalHelper::EnhancerRightUp, 1, -1),
    (PortalHelper::EnhancerLeftUp, -1, -1),
    (PortalHelper::EnhancerRightDown, 1, 1),
    (PortalHelper::EnhancerLeftDown, -1, 1),
];

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialRooms {
    pub entrance: Option<RoomId>,
    pub exits: Vec<RoomId>,
}

impl SpecialRooms {
    pub fn contains(&self, room: RoomId) -> bool {
        self.entrance == Some(room) || self.exits.contains(&room)
    }

    pub fn len(&self) -> usize {
        usize::from(self.entrance.is_some()) + self.exits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrance.is_none()
    }
}

/// Picks a random entrance and the `requested - 1` rooms farthest from it.
pub(super) fn choose_special_rooms<L: LevelSink>(
    context: &mut GenerationContext<'_, L>,
    requested: usize,
) -> Result<SpecialRooms, MapgenError> {
    let available = context.rooms.len();
    if requested > available {
        return Err(MapgenError::TooManySpecialRooms { requested, available });
    }
    if requested == 0 {
        return Ok(SpecialRooms::default());
    }

    let entrance = context.rng.below(available);
    let distances = hop_distances(&context.rooms, entrance);
    let mut by_distance: Vec<RoomId> =
        context.rooms.ids().filter(|&room| room != entrance).collect();
    by_distance.sort_by_key(|&room| (Reverse(distances[room]), room));
    by_distance.truncate(requested - 1);

    Ok(SpecialRooms { entrance: Some(entrance), exits: by_distance })
}

/// Writes labels, the portal and its helpers into every special room.
pub(super) fn place_teleports<L: LevelSink>(
    context: &mut GenerationContext<'_, L>,
    specials: &SpecialRooms,
) -> Result<(), MapgenError> {
    let pair = context.config.teleport_pair;
    let Some(entrance) = specials.entrance else {
        return Ok(());
    };
    add_teleport(context, 0, context.rooms.rect(entrance).center(), pair)?;
    for (index, &exit) in specials.exits.iter().enumerate() {
        add_teleport(context, index + 1, context.rooms.rect(exit).center(), pair)?;
    }
    debug!(entrance, exits = ?specials.exits, ?pair, "placed teleports");
    Ok(())
}

fn add_teleport<L: LevelSink>(
    context: &mut GenerationContext<'_, L>,
    number: usize,
    center: Pos,
    pair: TeleportPair,
) -> Result<(), MapgenError> {
    let level = context.output.level_number();
    let (x, y) = (center.x, center.y);
    context.output.add_map_label(x, y, format!("{level}toX{number}"));
    context.output.add_map_label(x + 1, y, format!("{level}fromX{number}"));

    let (kind, portal) = if number == 0 {
        (ObstacleKind::Entrance(pair.entrance()), pair.entrance())
    } else {
        (ObstacleKind::Exit(pair.exit()), pair.exit())
    };
    context.output.add_obstacle(HalfPos::cell_center(x, y), kind)?;

    if portal == Portal::Cloud {
        let nests = context.rng.coin();
        for (enhancer, dx, dy) in ENHANCERS {
            let helper = if nests { PortalHelper::DroidNest } else { enhancer };
            context.output.add_obstacle(
                HalfPos::cell_center(x + dx, y + dy),
                ObstacleKind::Helper(helper),
            )?;
        }
    }
    Ok(())
}
