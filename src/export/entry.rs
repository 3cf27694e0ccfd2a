use std::{fmt, str::FromStr};

use crate::foundation::error::{DiaryError, DiaryResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    #[default]
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
    Windy,
}

impl Weather {
    pub const ALL: [Weather; 5] = [
        Weather::Sunny,
        Weather::Cloudy,
        Weather::Rainy,
        Weather::Snowy,
        Weather::Windy,
    ];

    /// Text drawn after the weather label in the page header.
    pub fn label(self) -> &'static str {
        match self {
            Weather::Sunny => "Sunny",
            Weather::Cloudy => "Cloudy",
            Weather::Rainy => "Rainy",
            Weather::Snowy => "Snowy",
            Weather::Windy => "Windy",
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Weather {
    type Err = DiaryError;

    fn from_str(s: &str) -> DiaryResult<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|w| w.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DiaryError::invalid_input(format!("unknown weather '{s}'")))
    }
}

/// Header and body text of one diary page.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DiaryEntry {
    /// Free-form date text; `None` or blank means "not filled in".
    pub date: Option<String>,
    pub weather: Weather,
    pub body: String,
}

impl DiaryEntry {
    /// The entry's date, if it has a non-blank one.
    pub fn date_text(&self) -> Option<&str> {
        self.date.as_deref().map(str::trim).filter(|d| !d.is_empty())
    }

    /// `diary_<date>.png`, falling back to `default_date` when the entry has no date.
    pub fn file_name(&self, default_date: &str) -> String {
        let raw = self.date_text().unwrap_or(default_date);
        let mut component = sanitize_file_component(raw);
        if component.is_empty() {
            component = sanitize_file_component(default_date);
        }
        format!("diary_{component}.png")
    }
}

/// Replaces path separators, characters reserved on common filesystems, and control characters
/// with `-`.
pub fn sanitize_file_component(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/export/entry.rs"]
mod tests;
