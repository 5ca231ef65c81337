use std::collections::HashMap;

use rand::{seq::SliceRandom, SeedableRng};
use rand_wyrand::WyRand;

mod placement;
pub use placement::{neighbor, opposite, Coord, DoorPlacement, Rect, Sides};

mod room;
pub use room::{Door, DoorOrientation, Room, RoomId};

pub mod config;
pub use config::{Config, PartialConfig};

pub mod error;
pub use error::{ConfigError, Error, RoomError};

pub mod projection;
pub use projection::{Layout, PixelRect};

/// A maze of rooms connected by doors
///
/// Rooms sit on an integer grid and are connected like a tree: there is
/// exactly one path between any two rooms.
#[derive(Debug, Clone)]
pub struct Maze {
    /// Config the maze was built with
    config: Config,
    /// Rooms, in creation order
    rooms: Vec<Room>,
    /// Room occupying each grid cell
    occupied: HashMap<Coord, RoomId>,
    /// Number of doors tried, including the undone ones
    attempts: u64,
}

impl Maze {
    /// Position of the first room
    pub const FIRST_ROOM_POSITION: Coord = [0, 0];

    /// Build a complete maze
    pub fn new(config: Config) -> Result<Self, Error> {
        Generator::new(config)?.finish()
    }

    #[inline(always)]
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Number of rooms
    #[inline(always)]
    #[must_use]
    pub fn size(&self) -> usize {
        self.rooms.len()
    }

    /// Rooms, in creation order
    #[inline(always)]
    #[must_use]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    #[inline(always)]
    #[must_use]
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.0)
    }

    /// Room occupying a grid cell
    #[must_use]
    pub fn room_at(&self, pos: &Coord) -> Option<RoomId> {
        self.occupied.get(pos).copied()
    }

    /// Grid position of every room, in creation order
    pub fn rooms_position(&self) -> impl Iterator<Item = Coord> + '_ {
        self.rooms.iter().map(Room::position)
    }

    /// Every door of every room
    pub fn all_doors(&self) -> impl Iterator<Item = &Door> + '_ {
        self.rooms.iter().flat_map(Room::doors)
    }

    /// Rooms reachable through the doors of `id`
    pub fn neighbors(&self, id: RoomId) -> impl Iterator<Item = RoomId> + '_ {
        self.room(id)
            .into_iter()
            .flat_map(Room::doors)
            .filter_map(|d| self.room_at(&d.leads_to()))
    }

    /// Smallest grid rectangle containing every room
    #[must_use]
    pub fn bounding_box(&self) -> Rect {
        self.rooms_position()
            .fold(Rect::point(&Self::FIRST_ROOM_POSITION), |r, p| {
                r.expanded(&p)
            })
    }

    /// Number of doors tried while building, including the undone ones
    #[inline(always)]
    #[must_use]
    pub const fn attempts(&self) -> u64 {
        self.attempts
    }

    /// Top left corner of every room, in creation order
    pub fn project_rooms(&self, layout: &Layout) -> Vec<[f64; 2]> {
        layout.project_rooms(&self.rooms)
    }

    /// Top left corner of every door, in the order of [`Maze::all_doors`]
    pub fn project_doors(&self, layout: &Layout) -> Vec<[f64; 2]> {
        layout.project_doors(&self.rooms)
    }

    #[inline(always)]
    fn in_bounds(&self, pos: &Coord) -> bool {
        self.config.bounds.map_or(true, |b| b.contains(pos))
    }
}

/// Generation progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    Growing,
    Complete,
}

/// Grows a maze one room at a time
///
/// Between two calls of [`Generator::step`] the partial maze satisfies all
/// the invariants of a complete one, only with fewer rooms.
#[derive(Debug, Clone)]
pub struct Generator {
    maze: Maze,
    rng: WyRand,
    /// Rooms with at least one side that can still get a door
    open: Vec<RoomId>,
    /// Index of each room in `open`
    slots: Vec<Option<usize>>,
    /// Sides of each room facing an occupied or out of bounds cell
    sealed: Vec<Sides>,
}

impl Generator {
    /// Start a maze with only the first room
    pub fn new(config: Config) -> Result<Self, Error> {
        config.validate()?;
        log::info!(
            "Generating a maze of {} rooms with seed {}",
            config.size,
            config.seed
        );
        let first = RoomId(0);
        let mut this = Self {
            maze: Maze {
                config,
                rooms: vec![Room::new(Maze::FIRST_ROOM_POSITION)],
                occupied: HashMap::from([(Maze::FIRST_ROOM_POSITION, first)]),
                attempts: 0,
            },
            rng: WyRand::seed_from_u64(config.seed),
            open: vec![],
            slots: vec![],
            sealed: vec![],
        };
        this.register(first);
        Ok(this)
    }

    #[inline(always)]
    #[must_use]
    pub fn state(&self) -> State {
        if self.maze.rooms.len() < self.maze.config.size {
            State::Growing
        } else {
            State::Complete
        }
    }

    /// The maze built so far
    #[inline(always)]
    #[must_use]
    pub const fn partial(&self) -> &Maze {
        &self.maze
    }

    /// Add a room, returning it, or `None` if the maze is complete
    pub fn step(&mut self) -> Result<Option<RoomId>, Error> {
        if self.state() == State::Complete {
            return Ok(None);
        }
        let placed = self.maze.rooms.len();
        let max_attempts = self.maze.config.max_attempts;
        for attempt in 1..=max_attempts {
            self.maze.attempts += 1;
            let Some(&candidate) = self.open.choose(&mut self.rng) else {
                return Err(ConfigError::NoAvailableRoom {
                    placed,
                    target: self.maze.config.size,
                }
                .into());
            };
            let room = &mut self.maze.rooms[candidate.0];
            debug_assert!(room.is_available());
            let placement = room
                .add_door(None, &mut self.rng)
                .unwrap_or_else(|err| broken(err));
            let from = room.position();
            let target = placement.neighbor(&from);

            if self.maze.occupied.contains_key(&target) || !self.maze.in_bounds(&target) {
                log::trace!("{from:?}: {placement} door leads to a taken cell, removing it");
                self.maze.rooms[candidate.0]
                    .remove_door(placement)
                    .unwrap_or_else(|err| broken(err));
                if attempt == max_attempts / 2 {
                    log::warn!("Room {placed} still not placed after {attempt} attempts");
                }
                continue;
            }

            let id = RoomId(placed);
            let mut new_room = Room::new(target);
            new_room
                .add_door(Some(placement.opposite()), &mut self.rng)
                .unwrap_or_else(|err| broken(err));
            self.maze.rooms.push(new_room);
            self.maze.occupied.insert(target, id);
            self.register(id);
            log::debug!("{target:?}: Added room {placed}, reached from {from:?}");
            return Ok(Some(id));
        }
        Err(Error::AttemptsExhausted {
            placed,
            attempts: max_attempts,
        })
    }

    /// Grow until complete
    pub fn finish(mut self) -> Result<Maze, Error> {
        while self.step()?.is_some() {}
        log::info!(
            "Maze of {} rooms completed after {} attempts",
            self.maze.rooms.len(),
            self.maze.attempts
        );
        Ok(self.maze)
    }

    /// Track a newly created room, sealing the sides it shares with its neighbours
    fn register(&mut self, id: RoomId) {
        debug_assert_eq!(self.sealed.len(), id.0);
        let pos = self.maze.rooms[id.0].position();
        let mut sealed = Sides::empty();
        for p in DoorPlacement::ALL {
            let n = p.neighbor(&pos);
            if let Some(&other) = self.maze.occupied.get(&n) {
                sealed |= Sides::from(p);
                self.seal(other, p.opposite());
            } else if !self.maze.in_bounds(&n) {
                sealed |= Sides::from(p);
            }
        }
        self.sealed.push(sealed);
        self.slots.push(None);
        if self.is_open(id) {
            self.slots[id.0] = Some(self.open.len());
            self.open.push(id);
        }
    }

    fn seal(&mut self, id: RoomId, side: DoorPlacement) {
        self.sealed[id.0] |= Sides::from(side);
        if !self.is_open(id) {
            self.close(id);
        }
    }

    #[inline(always)]
    fn is_open(&self, id: RoomId) -> bool {
        !(self.maze.rooms[id.0].free_sides() - self.sealed[id.0]).is_empty()
    }

    fn close(&mut self, id: RoomId) {
        if let Some(slot) = self.slots[id.0].take() {
            self.open.swap_remove(slot);
            if let Some(moved) = self.open.get(slot) {
                self.slots[moved.0] = Some(slot);
            }
        }
    }
}

/// Door bookkeeping can only fail through a bug in the generator
#[cold]
fn broken(err: RoomError) -> ! {
    log::error!("Maze generation invariant violated: {err}");
    panic!("Maze generation invariant violated: {err}")
}
