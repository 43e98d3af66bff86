use serde::{Deserialize, Serialize};

/// One of the three character statistics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Stat {
    Muscle = 0,
    Mysticality = 1,
    Moxie = 2,
}

impl Stat {
    /// Every stat, in display order.
    pub const ALL: [Self; 3] = [Self::Muscle, Self::Mysticality, Self::Moxie];

    /// Returns the string representation of this stat.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::Muscle => "muscle",
            Self::Mysticality => "mysticality",
            Self::Moxie => "moxie",
        }
    }

    /// Whether this stat passes an optional single-stat filter.
    #[must_use]
    pub fn matches(self, filter: Option<Self>) -> bool {
        filter.is_none_or(|only| only == self)
    }
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Stat {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "muscle" => Ok(Self::Muscle),
            "mysticality" | "myst" => Ok(Self::Mysticality),
            "moxie" => Ok(Self::Moxie),
            _ => Err("unknown stat"),
        }
    }
}
