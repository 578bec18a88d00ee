//! Reachability and hop distances over the room adjacency lists.

use std::collections::VecDeque;

use crate::types::RoomId;

use super::rooms::RoomTable;

pub(super) fn reachable_from(rooms: &RoomTable, start: RoomId) -> Vec<bool> {
    let mut seen = vec![false; rooms.len()];
    if start >= rooms.len() {
        return seen;
    }
    let mut stack = vec![start];
    while let Some(room) = stack.pop() {
        if seen[room] {
            continue;
        }
        seen[room] = true;
        stack.extend(rooms.get(room).neighbors.iter().copied().filter(|&next| !seen[next]));
    }
    seen
}

pub fn is_connected(rooms: &RoomTable) -> bool {
    reachable_from(rooms, 0).into_iter().all(|seen| seen)
}

/// Hop counts from `start`; `None` for rooms it cannot reach.
pub(super) fn hop_distances(rooms: &RoomTable, start: RoomId) -> Vec<Option<usize>> {
    let mut distances = vec![None; rooms.len()];
    if start >= rooms.len() {
        return distances;
    }
    distances[start] = Some(0);
    let mut queue = VecDeque::from([start]);
    while let Some(room) = queue.pop_front() {
        let next_distance = distances[room].map(|distance| distance + 1);
        for &next in &rooms.get(room).neighbors {
            if distances[next].is_none() {
                distances[next] = next_distance;
                queue.push_back(next);
            }
        }
    }
    distances
}

/// Room with the smallest eccentricity, lowest id on ties.
pub(super) fn middle_room(rooms: &RoomTable) -> Option<RoomId> {
    rooms
        .ids()
        .map(|room| {
            let eccentricity = hop_distances(rooms, room)
                .into_iter()
                .map(|distance| distance.unwrap_or(usize::MAX))
                .max()
                .unwrap_or(0);
            (eccentricity, room)
        })
        .min()
        .map(|(_, room)| room)
}
