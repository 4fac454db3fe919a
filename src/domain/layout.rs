use serde::{Deserialize, Serialize};
use std::fmt;

/// Visual prominence tier of an article in the jigsaw feed.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Prominent,
    Average,
    Minor,
}

impl Layout {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Layout::Prominent => "prominent",
            Layout::Average => "average",
            Layout::Minor => "minor",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
