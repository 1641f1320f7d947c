//! User settings.
//!
//! Focus preferences stored in the key-value store next to tasks and stats,
//! in the same JSON shape the backup format carries.

use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StudyNestError;
use crate::features::focus::PhaseDurations;
use crate::storage::{load_json, save_json, KeyValueStore, SETTINGS_KEY};

/// Allowed work phase lengths in minutes.
pub const WORK_DURATION_RANGE: RangeInclusive<u32> = 1..=60;

/// Allowed break phase lengths in minutes.
pub const BREAK_DURATION_RANGE: RangeInclusive<u32> = 1..=30;

const DEFAULT_WORK_DURATION: u32 = 25;
const DEFAULT_BREAK_DURATION: u32 = 5;
const DEFAULT_VOLUME: f64 = 0.5;

/// Ambient sound played while focusing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sound {
    #[default]
    Rain,
    Whitenoise,
    Forest,
    Cafe,
    Ocean,
}

impl Sound {
    /// Every available sound.
    pub const ALL: [Self; 5] = [
        Self::Rain,
        Self::Whitenoise,
        Self::Forest,
        Self::Cafe,
        Self::Ocean,
    ];

    /// Identifier used in settings and on the command line.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Rain => "rain",
            Self::Whitenoise => "whitenoise",
            Self::Forest => "forest",
            Self::Cafe => "cafe",
            Self::Ocean => "ocean",
        }
    }
}

impl FromStr for Sound {
    type Err = StudyNestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|sound| sound.id() == s || (s == "white-noise" && *sound == Self::Whitenoise))
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|sound| sound.id()).collect();
                StudyNestError::InvalidInput(format!(
                    "Unknown sound '{s}' (expected one of: {})",
                    known.join(", ")
                ))
            })
    }
}

impl std::fmt::Display for Sound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl FromStr for Theme {
    type Err = StudyNestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(StudyNestError::InvalidInput(format!(
                "Unknown theme '{other}' (expected light or dark)"
            ))),
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

/// Focus preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Work phase length in minutes
    pub work_duration: u32,
    /// Break phase length in minutes
    pub break_duration: u32,
    pub default_sound: Sound,
    pub theme: Theme,
    /// Playback volume, 0.0 to 1.0
    pub volume: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            work_duration: DEFAULT_WORK_DURATION,
            break_duration: DEFAULT_BREAK_DURATION,
            default_sound: Sound::default(),
            theme: Theme::default(),
            volume: DEFAULT_VOLUME,
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults.
    ///
    /// Stored values outside their allowed ranges are pulled back in.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        load_json(store, SETTINGS_KEY, Self::default()).normalized()
    }

    /// Persist settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be written.
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &S) -> Result<(), StudyNestError> {
        save_json(store, SETTINGS_KEY, self)
    }

    /// Phase lengths for the timer.
    #[must_use]
    pub const fn durations(&self) -> PhaseDurations {
        PhaseDurations::new(self.work_duration, self.break_duration)
    }

    /// Set one setting from its textual form.
    ///
    /// Accepts kebab-case (`work-duration`) and the stored camelCase
    /// (`workDuration`) key spellings.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown key or an invalid value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), StudyNestError> {
        match key.trim() {
            "work-duration" | "workDuration" | "work" => {
                self.work_duration = parse_in_range(key, value, &WORK_DURATION_RANGE)?;
            }
            "break-duration" | "breakDuration" | "break" => {
                self.break_duration = parse_in_range(key, value, &BREAK_DURATION_RANGE)?;
            }
            "default-sound" | "defaultSound" | "sound" => self.default_sound = value.parse()?,
            "theme" => self.theme = value.parse()?,
            "volume" => {
                let volume: f64 = value.trim().parse().map_err(|_| {
                    StudyNestError::InvalidInput(format!("volume must be a number, got '{value}'"))
                })?;
                if !(0.0..=1.0).contains(&volume) {
                    return Err(StudyNestError::InvalidInput(format!(
                        "volume must be between 0 and 1, got {volume}"
                    )));
                }
                self.volume = volume;
            }
            other => {
                return Err(StudyNestError::InvalidInput(format!(
                    "Unknown setting '{other}' (expected work-duration, \
                     break-duration, default-sound, theme or volume)"
                )))
            }
        }
        Ok(())
    }

    /// Overlay the keys of a JSON object on top of these settings.
    ///
    /// Keys missing from `patch` keep their current values. The result must
    /// pass [`Settings::validate`].
    ///
    /// # Errors
    ///
    /// Returns an error if `patch` is not an object, a value has the wrong
    /// type, or the merged settings are out of range.
    pub fn merged_with(&self, patch: &Value) -> Result<Self, StudyNestError> {
        let Value::Object(patch) = patch else {
            return Err(StudyNestError::InvalidInput(
                "settings must be a JSON object".to_string(),
            ));
        };

        let mut merged = serde_json::to_value(self)?;
        if let Value::Object(base) = &mut merged {
            for (key, value) in patch {
                base.insert(key.clone(), value.clone());
            }
        }

        let settings: Self = serde_json::from_value(merged)
            .map_err(|e| StudyNestError::InvalidInput(format!("invalid settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check every value is within its allowed range.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first offending setting.
    pub fn validate(&self) -> Result<(), StudyNestError> {
        if !WORK_DURATION_RANGE.contains(&self.work_duration) {
            return Err(out_of_range("workDuration", self.work_duration, &WORK_DURATION_RANGE));
        }
        if !BREAK_DURATION_RANGE.contains(&self.break_duration) {
            return Err(out_of_range("breakDuration", self.break_duration, &BREAK_DURATION_RANGE));
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(StudyNestError::InvalidInput(format!(
                "volume must be between 0 and 1, got {}",
                self.volume
            )));
        }
        Ok(())
    }

    /// Pull out-of-range values back into range; zero durations take the default.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.work_duration = clamp_or_default(
            self.work_duration,
            &WORK_DURATION_RANGE,
            DEFAULT_WORK_DURATION,
        );
        self.break_duration = clamp_or_default(
            self.break_duration,
            &BREAK_DURATION_RANGE,
            DEFAULT_BREAK_DURATION,
        );
        self.volume = if self.volume.is_finite() {
            self.volume.clamp(0.0, 1.0)
        } else {
            DEFAULT_VOLUME
        };
        self
    }
}

fn parse_in_range(
    key: &str,
    value: &str,
    range: &RangeInclusive<u32>,
) -> Result<u32, StudyNestError> {
    let minutes = crate::core::parse_minutes(value).ok_or_else(|| {
        StudyNestError::InvalidInput(format!("{key} must be a number of minutes, got '{value}'"))
    })?;
    if !range.contains(&minutes) {
        return Err(out_of_range(key, minutes, range));
    }
    Ok(minutes)
}

fn out_of_range(key: &str, value: u32, range: &RangeInclusive<u32>) -> StudyNestError {
    StudyNestError::InvalidInput(format!(
        "{key} must be between {} and {} minutes, got {value}",
        range.start(),
        range.end()
    ))
}

fn clamp_or_default(value: u32, range: &RangeInclusive<u32>, default: u32) -> u32 {
    if value == 0 {
        default
    } else {
        value.clamp(*range.start(), *range.end())
    }
}
