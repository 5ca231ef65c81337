use std::{fs::read_to_string, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use image::{Rgb, RgbImage};
use serde::Deserialize;
use simple_logger::SimpleLogger;

use maze::{Layout, Maze, PartialConfig, PixelRect};

#[derive(Debug, Parser)]
struct Args {
    /// Configuration file for the maze
    #[clap(short)]
    config: Option<PathBuf>,
    /// Overrides of the maze configuration
    #[clap(flatten)]
    maze: PartialConfig,
    /// Output file
    #[clap(short, long)]
    output: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    maze: PartialConfig,
    view: Layout,
    minimap: Layout,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            maze: PartialConfig::default(),
            view: Layout {
                spacing: 40.,
                origin: [0., 0.],
                room_size: 32.,
                door_size: [10., 3.],
            },
            minimap: Layout {
                spacing: 8.,
                origin: [0., 0.],
                room_size: 6.,
                door_size: [2., 1.],
            },
        }
    }
}

const BACKGROUND: Rgb<u8> = Rgb([0, 0, 0]);
const ROOM_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
const DOOR_COLOR: Rgb<u8> = Rgb([0, 200, 0]);
const MINIMAP_ROOM_COLOR: Rgb<u8> = Rgb([200, 0, 0]);
const FIRST_ROOM_COLOR: Rgb<u8> = Rgb([0, 0, 255]);
const MARGIN: f64 = 10.;

fn fill(image: &mut RgbImage, rect: &PixelRect, color: Rgb<u8>) {
    let minx = rect.x.round().max(0.) as u32;
    let miny = rect.y.round().max(0.) as u32;
    let maxx = ((rect.x + rect.width).round().max(0.) as u32).min(image.width());
    let maxy = ((rect.y + rect.height).round().max(0.) as u32).min(image.height());
    for x in minx..maxx {
        for y in miny..maxy {
            image[(x, y)] = color;
        }
    }
}

/// Move the layout so the whole maze lands at `corner`
fn anchored(layout: Layout, maze: &Maze, corner: [f64; 2]) -> Layout {
    let bb = maze.bounding_box();
    Layout {
        origin: [
            corner[0] - bb.minx as f64 * layout.spacing,
            corner[1] - bb.miny as f64 * layout.spacing,
        ],
        ..layout
    }
}

fn main() -> anyhow::Result<()> {
    SimpleLogger::new()
        .without_timestamps()
        .with_level(if cfg!(debug_assertions) {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .env()
        .init()
        .context("While initializing logging")?;

    let Args {
        config,
        maze,
        output,
    } = Args::parse();
    let config: Config = config
        .map(|path| {
            read_to_string(path)
                .context("Cannot read config file")
                .and_then(|s| toml::from_str(&s).context("Cannot parse config file"))
        })
        .transpose()
        .context("While loading configs")?
        .unwrap_or_default();

    let maze = Maze::new(config.maze.merge(maze).or_defaults()).context("While generating")?;

    let [w, h] = maze.bounding_box().shape().map(|s| s as f64);
    let view = anchored(config.view, &maze, [MARGIN, MARGIN]);
    let minimap = anchored(config.minimap, &maze, [MARGIN, MARGIN]);
    let mut image = RgbImage::from_pixel(
        (w * view.spacing + 2. * MARGIN) as u32,
        (h * view.spacing + 2. * MARGIN) as u32,
        BACKGROUND,
    );

    for rect in view.room_rects(maze.rooms()) {
        fill(&mut image, &rect, ROOM_COLOR);
    }
    for rect in view.door_rects(maze.rooms()) {
        fill(&mut image, &rect, DOOR_COLOR);
    }
    let minimap_rooms = minimap.room_rects(maze.rooms());
    for rect in &minimap_rooms {
        fill(&mut image, rect, MINIMAP_ROOM_COLOR);
    }
    fill(&mut image, &minimap_rooms[0], FIRST_ROOM_COLOR);

    image.save(output).context("While saving the image")?;
    Ok(())
}
