use std::path::{Path, PathBuf};

use serde::Deserialize;

use carillon_types::{BlinkerConfig, SwitchChannel, ToneChannel};

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    output: OutputConfig,
    #[serde(default)]
    blink: BlinkConfig,
    #[serde(default)]
    tunes: TunesConfig,
}

#[derive(Deserialize, Default)]
struct OutputConfig {
    tone_channel: Option<u8>,
    led_channel: Option<u8>,
}

#[derive(Deserialize, Default)]
struct BlinkConfig {
    on_ms: Option<u32>,
    off_ms: Option<u32>,
}

#[derive(Deserialize, Default)]
struct TunesConfig {
    slot_a: Option<PathBuf>,
    slot_b: Option<PathBuf>,
}

pub struct Config {
    output: OutputConfig,
    blink: BlinkConfig,
    tunes: TunesConfig,
}

impl Config {
    pub fn load() -> Self {
        Self::load_with_override(user_config_path().as_deref())
    }

    /// Load the embedded defaults, then merge the user file on top if it
    /// exists. A malformed or unreadable user file is logged and ignored,
    /// never fatal.
    pub fn load_with_override(user_path: Option<&Path>) -> Self {
        let mut base: ConfigFile =
            toml::from_str(DEFAULT_CONFIG).expect("Failed to parse embedded config.toml");

        if let Some(path) = user_path {
            if path.exists() {
                match std::fs::read_to_string(path) {
                    Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                        Ok(user) => merge(&mut base, user),
                        Err(e) => {
                            log::warn!(target: "config", "ignoring malformed config {}: {}", path.display(), e)
                        }
                    },
                    Err(e) => {
                        log::warn!(target: "config", "could not read config {}: {}", path.display(), e)
                    }
                }
            }
        }

        Config {
            output: base.output,
            blink: base.blink,
            tunes: base.tunes,
        }
    }

    pub fn tone_channel(&self) -> ToneChannel {
        ToneChannel::new(self.output.tone_channel.unwrap_or(8))
    }

    pub fn switch_channel(&self) -> SwitchChannel {
        SwitchChannel::new(self.output.led_channel.unwrap_or(13))
    }

    pub fn blink(&self) -> BlinkerConfig {
        let fallback = BlinkerConfig::default();
        BlinkerConfig {
            on_ms: self.blink.on_ms.unwrap_or(fallback.on_ms),
            off_ms: self.blink.off_ms.unwrap_or(fallback.off_ms),
        }
    }

    pub fn tune_a_path(&self) -> Option<&Path> {
        self.tunes.slot_a.as_deref()
    }

    pub fn tune_b_path(&self) -> Option<&Path> {
        self.tunes.slot_b.as_deref()
    }
}

fn merge(base: &mut ConfigFile, user: ConfigFile) {
    if user.output.tone_channel.is_some() {
        base.output.tone_channel = user.output.tone_channel;
    }
    if user.output.led_channel.is_some() {
        base.output.led_channel = user.output.led_channel;
    }
    if user.blink.on_ms.is_some() {
        base.blink.on_ms = user.blink.on_ms;
    }
    if user.blink.off_ms.is_some() {
        base.blink.off_ms = user.blink.off_ms;
    }
    if user.tunes.slot_a.is_some() {
        base.tunes.slot_a = user.tunes.slot_a;
    }
    if user.tunes.slot_b.is_some() {
        base.tunes.slot_b = user.tunes.slot_b;
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("carillon").join("config.toml"))
}
