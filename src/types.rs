use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Task identifier, unique within a flow.
pub type TaskId = String;

/// Lifecycle of a single task.
///
/// - `Scheduling`: not started yet (waiting on deps, or ready but not picked up).
/// - `Running`: reported as started by the caller.
/// - `Done`: complete. Terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    Scheduling,
    Running,
    Done,
}

impl TaskState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskState::Scheduling => "scheduling",
            TaskState::Running => "running",
            TaskState::Done => "done",
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named priority heuristic, as written in the `[config]` section of a flow
/// file.
///
/// Deserialization goes through [`FromStr`], so flow files accept the same
/// spellings as `str::parse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Preference {
    /// Tasks with the longest chain of downstream work go first.
    LongestPath,
    /// Tasks declared earlier go first.
    InOrder,
}

impl FromStr for Preference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "longest_path" | "longest-path" => Ok(Preference::LongestPath),
            "in_order" | "in-order" => Ok(Preference::InOrder),
            other => Err(format!(
                "invalid preference: {other} (expected \"longest_path\" or \"in_order\")"
            )),
        }
    }
}

impl TryFrom<String> for Preference {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preference_parses_loosely() {
        assert_eq!(" Longest_Path ".parse::<Preference>(), Ok(Preference::LongestPath));
        assert_eq!("in-order".parse::<Preference>(), Ok(Preference::InOrder));
        assert!("fastest".parse::<Preference>().is_err());
    }

    #[test]
    fn preference_deserializes_like_it_parses() {
        let parsed: Vec<Preference> =
            serde_json::from_str(r#"["longest_path", "Longest-Path", " in-order "]"#)
                .expect("accepted spellings");
        assert_eq!(
            parsed,
            [Preference::LongestPath, Preference::LongestPath, Preference::InOrder]
        );
        assert!(serde_json::from_str::<Preference>(r#""fastest""#).is_err());

        // Output stays canonical.
        assert_eq!(
            serde_json::to_string(&Preference::InOrder).expect("encode"),
            r#""in_order""#
        );
    }

    #[test]
    fn task_state_displays_wire_name() {
        assert_eq!(TaskState::Scheduling.to_string(), "scheduling");
        assert_eq!(TaskState::Done.to_string(), "done");
    }
}
