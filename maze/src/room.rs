use rand::{seq::IteratorRandom, Rng};
use serde::{Deserialize, Serialize};

use crate::{error::RoomError, Coord, DoorPlacement, Sides};

/// Index of a room inside its maze, in creation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoomId(pub usize);

/// How a door has to be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoorOrientation {
    /// On a top or bottom side: wider than tall
    Horizontal,
    /// On a left or right side: taller than wide
    Vertical,
}

/// One end of a passage between two rooms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Door {
    placement: DoorPlacement,
    /// Position of the owning room
    room: Coord,
}

impl Door {
    #[inline(always)]
    #[must_use]
    pub const fn placement(&self) -> DoorPlacement {
        self.placement
    }

    /// Position of the room owning this door
    #[inline(always)]
    #[must_use]
    pub const fn room(&self) -> Coord {
        self.room
    }

    /// Position of the room on the other side
    #[inline(always)]
    #[must_use]
    pub const fn leads_to(&self) -> Coord {
        self.placement.neighbor(&self.room)
    }

    #[inline(always)]
    #[must_use]
    pub const fn orientation(&self) -> DoorOrientation {
        if self.placement.is_horizontal() {
            DoorOrientation::Horizontal
        } else {
            DoorOrientation::Vertical
        }
    }

    /// Position of the door middle inside its room, in room units
    /// ```
    /// use maze::Room;
    ///
    /// let mut room = Room::new([0, 0]);
    /// room.add_door(Some(maze::DoorPlacement::Top), &mut rand::thread_rng()).unwrap();
    /// assert_eq!(room.doors()[0].room_offset(), [0.5, 0.]);
    /// ```
    #[inline(always)]
    #[must_use]
    pub const fn room_offset(&self) -> [f64; 2] {
        match self.placement {
            DoorPlacement::Top => [0.5, 0.],
            DoorPlacement::Right => [1., 0.5],
            DoorPlacement::Bottom => [0.5, 1.],
            DoorPlacement::Left => [0., 0.5],
        }
    }
}

/// A node of the maze
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    /// Grid position, fixed at creation
    position: Coord,
    /// Doors, in the order they were added
    doors: Vec<Door>,
    /// Sides occupied by a door
    sides: Sides,
}

impl Room {
    /// A room without doors
    #[must_use]
    pub fn new(position: Coord) -> Self {
        Self {
            position,
            doors: Vec::with_capacity(4),
            sides: Sides::empty(),
        }
    }

    #[inline(always)]
    #[must_use]
    pub const fn position(&self) -> Coord {
        self.position
    }

    #[inline(always)]
    #[must_use]
    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    /// Sides that already have a door
    #[inline(always)]
    #[must_use]
    pub const fn sides(&self) -> Sides {
        self.sides
    }

    /// Sides without a door
    #[inline(always)]
    #[must_use]
    pub fn free_sides(&self) -> Sides {
        self.sides.complement()
    }

    /// Can another door be added
    #[inline(always)]
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.doors.len() < 4
    }

    /// Add a door, returning its placement
    ///
    /// With `None` the placement is drawn uniformly among the free sides.
    pub fn add_door<R>(
        &mut self,
        placement: Option<DoorPlacement>,
        rng: &mut R,
    ) -> Result<DoorPlacement, RoomError>
    where
        R: Rng + ?Sized,
    {
        if !self.is_available() {
            return Err(RoomError::NoFreeSlot(self.position));
        }
        let placement = match placement {
            Some(placement) => {
                if self.sides.contains(Sides::from(placement)) {
                    return Err(RoomError::DuplicatePlacement(self.position, placement));
                }
                placement
            }
            None => self
                .free_sides()
                .placements()
                .choose(rng)
                .ok_or(RoomError::NoFreeSlot(self.position))?,
        };
        self.sides |= Sides::from(placement);
        self.doors.push(Door {
            placement,
            room: self.position,
        });
        Ok(placement)
    }

    /// Remove the door with the given placement
    pub fn remove_door(&mut self, placement: DoorPlacement) -> Result<Door, RoomError> {
        let Some(idx) = self.doors.iter().position(|d| d.placement == placement) else {
            log::warn!("{:?}: no {placement} door to remove", self.position);
            return Err(RoomError::MissingDoor(self.position, placement));
        };
        self.sides -= Sides::from(placement);
        Ok(self.doors.remove(idx))
    }

    /// Door offsets inside the room, in room units
    pub fn doors_offset(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.doors.iter().map(Door::room_offset)
    }

    /// Door on the given side, if any
    #[must_use]
    pub fn door(&self, placement: DoorPlacement) -> Option<&Door> {
        self.doors.iter().find(|d| d.placement == placement)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_wyrand::WyRand;

    use super::*;

    #[test]
    fn random_doors_fill_every_side() {
        let mut rng = WyRand::seed_from_u64(42);
        let mut room = Room::new([2, -3]);
        for _ in 0..4 {
            assert!(room.is_available());
            room.add_door(None, &mut rng).unwrap();
        }
        assert!(!room.is_available());
        assert_eq!(room.sides(), Sides::all());
        let mut placements: Vec<_> = room.doors().iter().map(Door::placement).collect();
        placements.sort();
        assert_eq!(placements, DoorPlacement::ALL);
        assert_eq!(
            room.add_door(None, &mut rng),
            Err(RoomError::NoFreeSlot([2, -3]))
        );
    }

    #[test]
    fn explicit_placement_is_kept() {
        let mut rng = WyRand::seed_from_u64(0);
        let mut room = Room::new([0, 0]);
        assert_eq!(
            room.add_door(Some(DoorPlacement::Left), &mut rng),
            Ok(DoorPlacement::Left)
        );
        assert_eq!(
            room.add_door(Some(DoorPlacement::Left), &mut rng),
            Err(RoomError::DuplicatePlacement([0, 0], DoorPlacement::Left))
        );
        let door = room.door(DoorPlacement::Left).unwrap();
        assert_eq!(door.room(), [0, 0]);
        assert_eq!(door.leads_to(), [-1, 0]);
        assert_eq!(door.orientation(), DoorOrientation::Vertical);
    }

    #[test]
    fn random_door_avoids_taken_sides() {
        let mut rng = WyRand::seed_from_u64(7);
        for _ in 0..100 {
            let mut room = Room::new([0, 0]);
            room.add_door(Some(DoorPlacement::Top), &mut rng).unwrap();
            room.add_door(Some(DoorPlacement::Right), &mut rng).unwrap();
            let p = room.add_door(None, &mut rng).unwrap();
            assert!(matches!(p, DoorPlacement::Bottom | DoorPlacement::Left));
        }
    }

    #[test]
    fn removed_door_frees_its_side() {
        let mut rng = WyRand::seed_from_u64(1);
        let mut room = Room::new([5, 5]);
        let p = room.add_door(None, &mut rng).unwrap();
        let door = room.remove_door(p).unwrap();
        assert_eq!(door.placement(), p);
        assert!(room.doors().is_empty());
        assert_eq!(room.sides(), Sides::empty());
        assert_eq!(
            room.remove_door(p),
            Err(RoomError::MissingDoor([5, 5], p))
        );
    }

    #[test]
    fn offsets_sit_on_side_midpoints() {
        let mut rng = WyRand::seed_from_u64(3);
        let mut room = Room::new([0, 0]);
        for p in DoorPlacement::ALL {
            room.add_door(Some(p), &mut rng).unwrap();
        }
        assert_eq!(
            room.doors_offset().collect::<Vec<_>>(),
            [[0.5, 0.], [1., 0.5], [0.5, 1.], [0., 0.5]]
        );
    }
}
