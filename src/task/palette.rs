use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskColor {
    Blue,
    Green,
    Amber,
    Red,
    Purple,
    Gray,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown task color '{0}'")]
pub struct UnknownColor(pub String);

impl TaskColor {
    pub const ALL: [TaskColor; 6] = [
        TaskColor::Blue,
        TaskColor::Green,
        TaskColor::Amber,
        TaskColor::Red,
        TaskColor::Purple,
        TaskColor::Gray,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskColor::Blue => "blue",
            TaskColor::Green => "green",
            TaskColor::Amber => "amber",
            TaskColor::Red => "red",
            TaskColor::Purple => "purple",
            TaskColor::Gray => "gray",
        }
    }

    /// Cycles through the palette, with `None` between the last and first entry.
    pub fn cycle(current: Option<TaskColor>) -> Option<TaskColor> {
        match current {
            None => Some(Self::ALL[0]),
            Some(color) => {
                let position = Self::ALL.iter().position(|c| *c == color).unwrap_or(0);
                Self::ALL.get(position + 1).copied()
            }
        }
    }
}

impl fmt::Display for TaskColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskColor {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|color| color.as_str() == lowered)
            .ok_or_else(|| UnknownColor(s.to_string()))
    }
}
