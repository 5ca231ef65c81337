use std::str::FromStr;

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, Rect};

/// Config for a maze
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Number of rooms
    pub size: usize,
    /// Seed of the maze
    pub seed: u64,
    /// Cells the rooms are allowed to occupy.
    /// -> None means the grid is unbounded
    pub bounds: Option<Rect>,
    /// Maximum number of undone doors while placing a single room
    pub max_attempts: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size: 20,
            seed: 0,
            bounds: None,
            max_attempts: 1 << 20,
        }
    }
}

impl Config {
    /// A default config with the given size
    pub fn with_size(size: usize) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    /// Check that a maze can be built from this config
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size < 1 {
            return Err(ConfigError::ZeroSize);
        }
        if let Some(bounds) = self.bounds {
            if !bounds.contains(&[0, 0]) {
                return Err(ConfigError::OriginOutOfBounds(bounds));
            }
            // an unrepresentable area is bigger than any possible size
            if let Some(area) = bounds.area() {
                if self.size as u64 > area {
                    return Err(ConfigError::SizeExceedsBounds {
                        size: self.size,
                        area,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Partial config for a maze
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Parser, Default)]
pub struct PartialConfig {
    /// Number of rooms
    #[clap(long, short = 'n')]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    /// Seed of the maze
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Cells the rooms are allowed to occupy, as `minx,miny,maxx,maxy`
    #[clap(long, allow_hyphen_values = true)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Rect>,
    /// Maximum number of undone doors while placing a single room
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,
}
impl PartialConfig {
    pub fn merge(self, other: PartialConfig) -> Self {
        Self {
            size: other.size.or(self.size),
            seed: other.seed.or(self.seed),
            bounds: other.bounds.or(self.bounds),
            max_attempts: other.max_attempts.or(self.max_attempts),
        }
    }
    pub fn or_defaults(self) -> Config {
        let default = Config::default();
        Config {
            size: self.size.unwrap_or(default.size),
            seed: self.seed.unwrap_or(default.seed),
            bounds: self.bounds.or(default.bounds),
            max_attempts: self.max_attempts.unwrap_or(default.max_attempts),
        }
    }
}

impl FromStr for Rect {
    type Err = String;

    /// Parse `minx,miny,maxx,maxy`
    /// ```
    /// use maze::Rect;
    ///
    /// let rect: Rect = "-2,-2,3,3".parse().unwrap();
    /// assert_eq!(rect, Rect { minx: -2, miny: -2, maxx: 3, maxy: 3 });
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|v| v.trim().parse::<i64>().map_err(|err| format!("{v:?}: {err}")))
            .collect::<Result<Vec<_>, _>>()?;
        let [minx, miny, maxx, maxy] = values[..] else {
            return Err(format!(
                "expected 4 comma separated values, got {}",
                values.len()
            ));
        };
        if maxx <= minx || maxy <= miny {
            return Err(format!("empty rectangle {s:?}"));
        }
        Ok(Rect {
            minx,
            miny,
            maxx,
            maxy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_sources_win() {
        let file = PartialConfig {
            size: Some(10),
            seed: Some(1),
            ..Default::default()
        };
        let args = PartialConfig {
            seed: Some(99),
            max_attempts: Some(5),
            ..Default::default()
        };
        let config = file.merge(args).or_defaults();
        assert_eq!(
            config,
            Config {
                size: 10,
                seed: 99,
                bounds: None,
                max_attempts: 5
            }
        );
    }

    #[test]
    fn empty_partial_gives_defaults() {
        assert_eq!(PartialConfig::default().or_defaults(), Config::default());
    }

    #[test]
    fn args_are_parsed() {
        let args =
            PartialConfig::try_parse_from(["maze", "-n", "7", "--bounds=-1,-1,2,2"]).unwrap();
        assert_eq!(args.size, Some(7));
        assert_eq!(
            args.bounds,
            Some(Rect {
                minx: -1,
                miny: -1,
                maxx: 2,
                maxy: 2
            })
        );
        assert_eq!(args.seed, None);
    }

    #[test]
    fn bad_rects_are_rejected() {
        assert!("1,2,3".parse::<Rect>().is_err());
        assert!("1,2,3,x".parse::<Rect>().is_err());
        assert!("3,0,1,4".parse::<Rect>().is_err());
    }

    #[test]
    fn validation() {
        assert_eq!(Config::with_size(0).validate(), Err(ConfigError::ZeroSize));
        assert_eq!(Config::with_size(1).validate(), Ok(()));

        let bounds = Rect {
            minx: 0,
            miny: 0,
            maxx: 2,
            maxy: 2,
        };
        let config = Config {
            bounds: Some(bounds),
            ..Config::with_size(4)
        };
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(
            Config {
                size: 5,
                ..config
            }
            .validate(),
            Err(ConfigError::SizeExceedsBounds { size: 5, area: 4 })
        );

        let far = Rect {
            minx: 1,
            miny: 1,
            maxx: 4,
            maxy: 4,
        };
        assert_eq!(
            Config {
                bounds: Some(far),
                ..config
            }
            .validate(),
            Err(ConfigError::OriginOutOfBounds(far))
        );
    }
}
