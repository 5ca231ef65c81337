//! Placement of rooms and doors in pixel space
//!
//! A [`Layout`] maps grid positions to screen positions, so the same maze can
//! be drawn at full scale and as a minimap.

use serde::{Deserialize, Serialize};

use crate::{Door, DoorPlacement, Room};

/// Scale and offset of a drawing of the maze
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Distance between the top left corners of adjacent rooms
    pub spacing: f64,
    /// Pixel position of the top left corner of the first room
    pub origin: [f64; 2],
    /// Side of a room
    pub room_size: f64,
    /// Length and thickness of a door
    pub door_size: [f64; 2],
}

impl Layout {
    /// Full scale view
    pub const VIEW: Layout = Layout {
        spacing: 600.,
        origin: [0., 0.],
        room_size: 500.,
        door_size: [100., 20.],
    };

    /// Small overview in a screen corner
    pub const MINIMAP: Layout = Layout {
        spacing: 30.,
        origin: [20., 20.],
        room_size: 25.,
        door_size: [5., 1.],
    };

    /// Top left corner of every room, in the given order
    pub fn project_rooms<'r>(&self, rooms: impl IntoIterator<Item = &'r Room>) -> Vec<[f64; 2]> {
        rooms
            .into_iter()
            .map(|r| self.room_corner(r.position()))
            .collect()
    }

    /// Top left corner of every door, room by room
    pub fn project_doors<'r>(&self, rooms: impl IntoIterator<Item = &'r Room>) -> Vec<[f64; 2]> {
        rooms
            .into_iter()
            .flat_map(Room::doors)
            .map(|d| self.door_rect(d).corner())
            .collect()
    }

    /// Rectangles of every room
    pub fn room_rects<'r>(&self, rooms: impl IntoIterator<Item = &'r Room>) -> Vec<PixelRect> {
        rooms
            .into_iter()
            .map(|r| {
                let [x, y] = self.room_corner(r.position());
                PixelRect {
                    x,
                    y,
                    width: self.room_size,
                    height: self.room_size,
                }
            })
            .collect()
    }

    /// Rectangles of every door, room by room
    pub fn door_rects<'r>(&self, rooms: impl IntoIterator<Item = &'r Room>) -> Vec<PixelRect> {
        rooms
            .into_iter()
            .flat_map(Room::doors)
            .map(|d| self.door_rect(d))
            .collect()
    }

    fn room_corner(&self, [gx, gy]: [i64; 2]) -> [f64; 2] {
        [
            gx as f64 * self.spacing + self.origin[0],
            gy as f64 * self.spacing + self.origin[1],
        ]
    }

    /// The door is centered on its side, and inset so it lies inside the room
    pub fn door_rect(&self, door: &Door) -> PixelRect {
        let [rx, ry] = self.room_corner(door.room());
        let [ox, oy] = door.room_offset();
        let [mx, my] = [rx + ox * self.room_size, ry + oy * self.room_size];
        let [length, thickness] = self.door_size;
        match door.placement() {
            DoorPlacement::Top => PixelRect {
                x: mx - length / 2.,
                y: my,
                width: length,
                height: thickness,
            },
            DoorPlacement::Bottom => PixelRect {
                x: mx - length / 2.,
                y: my - thickness,
                width: length,
                height: thickness,
            },
            DoorPlacement::Left => PixelRect {
                x: mx,
                y: my - length / 2.,
                width: thickness,
                height: length,
            },
            DoorPlacement::Right => PixelRect {
                x: mx - thickness,
                y: my - length / 2.,
                width: thickness,
                height: length,
            },
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::VIEW
    }
}

/// An axis aligned rectangle in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    #[inline(always)]
    #[must_use]
    pub const fn corner(&self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Check if `other` lies completely inside `self`
    #[inline(always)]
    #[must_use]
    pub fn covers(&self, other: &PixelRect) -> bool {
        self.x <= other.x
            && other.x + other.width <= self.x + self.width
            && self.y <= other.y
            && other.y + other.height <= self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_wyrand::WyRand;

    use super::*;

    fn room_with_all_doors(position: [i64; 2]) -> Room {
        let mut rng = WyRand::seed_from_u64(0);
        let mut room = Room::new(position);
        for p in DoorPlacement::ALL {
            room.add_door(Some(p), &mut rng).unwrap();
        }
        room
    }

    const LAYOUT: Layout = Layout {
        spacing: 10.,
        origin: [100., 50.],
        room_size: 8.,
        door_size: [2., 1.],
    };

    #[test]
    fn rooms_are_scaled_and_offset() {
        let rooms = [Room::new([0, 0]), Room::new([1, -2])];
        assert_eq!(
            LAYOUT.project_rooms(&rooms),
            [[100., 50.], [110., 30.]]
        );
    }

    #[test]
    fn doors_sit_inside_their_room() {
        let room = room_with_all_doors([1, 1]);
        let [outer] = LAYOUT.room_rects([&room])[..] else {
            unreachable!()
        };
        let doors = LAYOUT.door_rects([&room]);
        assert_eq!(doors.len(), 4);
        for (door, rect) in room.doors().iter().zip(&doors) {
            assert!(outer.covers(rect), "{door:?} at {rect:?}");
            if door.placement().is_horizontal() {
                assert!(rect.width > rect.height);
            } else {
                assert!(rect.height > rect.width);
            }
        }
        assert_eq!(
            doors,
            [
                PixelRect { x: 113., y: 60., width: 2., height: 1. },
                PixelRect { x: 117., y: 63., width: 1., height: 2. },
                PixelRect { x: 113., y: 67., width: 2., height: 1. },
                PixelRect { x: 110., y: 63., width: 1., height: 2. },
            ]
        );
    }

    #[test]
    fn door_positions_match_rects() {
        let room = room_with_all_doors([-3, 2]);
        let corners: Vec<_> = LAYOUT.door_rects([&room]).iter().map(PixelRect::corner).collect();
        assert_eq!(LAYOUT.project_doors([&room]), corners);
    }
}
