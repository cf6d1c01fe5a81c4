//! Runner configuration read from the environment.

use std::env;
use std::path::PathBuf;

use flight_content::BUNDLED_DATA_DIR;

#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Content directory (`FLIGHT_DATA_DIR`).
    pub data_dir: PathBuf,
    /// Frames to simulate (`FLIGHT_FRAMES`).
    pub frames: u32,
    /// Real seconds per frame (`FLIGHT_FRAME_TIME`).
    pub frame_time: f64,
    /// World random seed (`FLIGHT_SEED`).
    pub seed: u64,
    /// Hull the player flies (`FLIGHT_PLAYER_SHIP`).
    pub player_ship: String,
    /// Comma separated fleets spawned around the player (`FLIGHT_FLEETS`).
    pub fleets: Vec<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(BUNDLED_DATA_DIR),
            frames: 1800,
            frame_time: 1.0 / 60.0,
            seed: 0x5eed,
            player_ship: "Vendetta".to_string(),
            fleets: vec![
                "Pirate Raiders".to_string(),
                "Merchant Convoy".to_string(),
                "Empire Patrol".to_string(),
            ],
        }
    }
}

impl RunnerConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("FLIGHT_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(frames) = read_env::<u32>("FLIGHT_FRAMES") {
            config.frames = frames;
        }
        if let Some(frame_time) = read_env::<f64>("FLIGHT_FRAME_TIME") {
            config.frame_time = frame_time.max(0.0);
        }
        if let Some(seed) = read_env::<u64>("FLIGHT_SEED") {
            config.seed = seed;
        }
        if let Ok(ship) = env::var("FLIGHT_PLAYER_SHIP") {
            config.player_ship = ship;
        }
        if let Ok(fleets) = env::var("FLIGHT_FLEETS") {
            config.fleets = parse_list(&fleets);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fleet_lists_ignore_blanks() {
        assert_eq!(
            parse_list(" Pirate Raiders, ,Empire Patrol "),
            vec!["Pirate Raiders".to_string(), "Empire Patrol".to_string()]
        );
    }
}
