use std::fmt::Display;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Position of a room on the maze grid
///
/// The `y` axis points down: `Top` is `y - 1`.
pub type Coord = [i64; 2];

/// Side of a room a door is placed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DoorPlacement {
    Top,
    Right,
    Bottom,
    Left,
}

impl DoorPlacement {
    /// All the real placements
    pub const ALL: [DoorPlacement; 4] = [
        DoorPlacement::Top,
        DoorPlacement::Right,
        DoorPlacement::Bottom,
        DoorPlacement::Left,
    ];

    /// The placement of the matching door in the neighbouring room
    /// ```
    /// use maze::DoorPlacement;
    ///
    /// assert_eq!(DoorPlacement::Top.opposite(), DoorPlacement::Bottom);
    /// assert_eq!(DoorPlacement::Left.opposite(), DoorPlacement::Right);
    /// ```
    #[inline(always)]
    #[must_use]
    pub const fn opposite(self) -> DoorPlacement {
        match self {
            DoorPlacement::Top => DoorPlacement::Bottom,
            DoorPlacement::Right => DoorPlacement::Left,
            DoorPlacement::Bottom => DoorPlacement::Top,
            DoorPlacement::Left => DoorPlacement::Right,
        }
    }

    /// Coordinate of the room on the other side of this placement
    /// ```
    /// use maze::DoorPlacement;
    ///
    /// assert_eq!(DoorPlacement::Top.neighbor(&[3, 4]), [3, 3]);
    /// assert_eq!(DoorPlacement::Right.neighbor(&[3, 4]), [4, 4]);
    /// ```
    #[inline(always)]
    #[must_use]
    pub const fn neighbor(self, [x, y]: &Coord) -> Coord {
        match self {
            DoorPlacement::Top => [*x, *y - 1],
            DoorPlacement::Right => [*x + 1, *y],
            DoorPlacement::Bottom => [*x, *y + 1],
            DoorPlacement::Left => [*x - 1, *y],
        }
    }

    /// Is the door on the top or bottom side
    #[inline(always)]
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, DoorPlacement::Top | DoorPlacement::Bottom)
    }
}

impl Display for DoorPlacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            DoorPlacement::Top => "top",
            DoorPlacement::Right => "right",
            DoorPlacement::Bottom => "bottom",
            DoorPlacement::Left => "left",
        })
    }
}

/// Free function form of [`DoorPlacement::opposite`]
#[inline(always)]
#[must_use]
pub const fn opposite(placement: DoorPlacement) -> DoorPlacement {
    placement.opposite()
}

/// Free function form of [`DoorPlacement::neighbor`]
#[inline(always)]
#[must_use]
pub const fn neighbor(coord: &Coord, placement: DoorPlacement) -> Coord {
    placement.neighbor(coord)
}

bitflags! {
    /// A set of sides of a room
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Sides: u8 {
        const Top    = 0b0001;
        const Right  = 0b0010;
        const Bottom = 0b0100;
        const Left   = 0b1000;
    }
}

impl Sides {
    /// Placements in this set, in `DoorPlacement::ALL` order
    pub fn placements(self) -> impl Iterator<Item = DoorPlacement> {
        DoorPlacement::ALL
            .into_iter()
            .filter(move |p| self.contains(Sides::from(*p)))
    }
}

impl From<DoorPlacement> for Sides {
    #[inline(always)]
    fn from(placement: DoorPlacement) -> Self {
        match placement {
            DoorPlacement::Top => Sides::Top,
            DoorPlacement::Right => Sides::Right,
            DoorPlacement::Bottom => Sides::Bottom,
            DoorPlacement::Left => Sides::Left,
        }
    }
}

/// A rectangle of grid cells
///
/// Minimums are inclusive, maximums exclusive.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub minx: i64,
    pub miny: i64,
    pub maxx: i64,
    pub maxy: i64,
}

impl Rect {
    /// The rect containing only `pos`
    #[inline(always)]
    #[must_use]
    pub const fn point([x, y]: &Coord) -> Self {
        Rect {
            minx: *x,
            miny: *y,
            maxx: *x + 1,
            maxy: *y + 1,
        }
    }

    /// Check if a points is inside this rect
    /// ```
    /// use maze::Rect;
    ///
    /// let rect = Rect { minx: -3, miny: 4, maxx: 1, maxy: 7};
    /// assert!(rect.contains(&[-3,5]))
    /// ```
    #[inline(always)]
    #[must_use]
    pub const fn contains(&self, [x, y]: &Coord) -> bool {
        self.minx <= *x && *x < self.maxx && self.miny <= *y && *y < self.maxy
    }

    #[inline(always)]
    #[must_use]
    pub const fn shape(&self) -> [u64; 2] {
        if self.maxx <= self.minx || self.maxy <= self.miny {
            return [0, 0];
        }
        [self.maxx.abs_diff(self.minx), self.maxy.abs_diff(self.miny)]
    }

    /// Number of cells, if it fits a `u64`
    /// ```
    /// use maze::Rect;
    ///
    /// let rect = Rect { minx: -3, miny: 4, maxx: 1, maxy: 7};
    /// assert_eq!(rect.area(), Some(12));
    /// ```
    #[inline(always)]
    #[must_use]
    pub const fn area(&self) -> Option<u64> {
        let [w, h] = self.shape();
        w.checked_mul(h)
    }

    /// Smallest rect containing both `self` and `pos`
    #[inline(always)]
    #[must_use]
    pub fn expanded(self, [x, y]: &Coord) -> Self {
        Rect {
            minx: self.minx.min(*x),
            miny: self.miny.min(*y),
            maxx: self.maxx.max(*x + 1),
            maxy: self.maxy.max(*y + 1),
        }
    }

    /// Iterate the cells row by row
    pub fn cells(self) -> impl Iterator<Item = Coord> {
        (self.miny..self.maxy).flat_map(move |y| (self.minx..self.maxx).map(move |x| [x, y]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_an_involution() {
        for p in DoorPlacement::ALL {
            assert_ne!(p.opposite(), p);
            assert_eq!(opposite(opposite(p)), p);
        }
    }

    #[test]
    fn neighbor_and_back() {
        let start = [-7, 12];
        for p in DoorPlacement::ALL {
            let n = neighbor(&start, p);
            assert_ne!(n, start);
            assert_eq!(neighbor(&n, p.opposite()), start);
        }
    }

    #[test]
    fn sides_roundtrip_placements() {
        let sides = Sides::Top | Sides::Left;
        assert_eq!(
            sides.placements().collect::<Vec<_>>(),
            [DoorPlacement::Top, DoorPlacement::Left]
        );
        assert_eq!(Sides::all().placements().count(), 4);
        assert_eq!(Sides::empty().placements().count(), 0);
    }

    #[test]
    fn rect_grows_around_points() {
        let r = Rect::point(&[0, 0]).expanded(&[2, -1]).expanded(&[-1, 1]);
        assert_eq!(
            r,
            Rect {
                minx: -1,
                miny: -1,
                maxx: 3,
                maxy: 2
            }
        );
        assert_eq!(r.area(), Some(12));
        assert_eq!(r.cells().count(), 12);
        assert!(r.cells().all(|c| r.contains(&c)));
    }

    #[test]
    fn degenerate_rect_is_empty() {
        let r = Rect {
            minx: 2,
            miny: 0,
            maxx: 1,
            maxy: 4,
        };
        assert_eq!(r.area(), Some(0));
        assert!(!r.contains(&[1, 1]));
    }
}
