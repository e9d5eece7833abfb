//! Homework review statuses and their verdict messages

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::HomeworkBotError;

/// Review status of a submission as reported by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub const ALL: [HomeworkStatus; 3] = [
        HomeworkStatus::Approved,
        HomeworkStatus::Reviewing,
        HomeworkStatus::Rejected,
    ];

    /// Raw status code used by the API
    pub fn as_str(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }

    /// Human-readable verdict phrase
    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HomeworkStatus {
    type Err = HomeworkBotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HomeworkStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| HomeworkBotError::InvalidStatus(format!("{:?}", s)))
    }
}

/// Build the status-change message for one homework record.
///
/// Fails with `MissingField` when `homework_name` is absent or not a string,
/// and with `InvalidStatus` when `status` is absent, null, empty or unknown.
pub fn parse_status(homework: &Value) -> crate::Result<String> {
    let name = homework
        .get("homework_name")
        .and_then(Value::as_str)
        .ok_or(HomeworkBotError::MissingField("homework_name"))?;

    let status = match homework.get("status") {
        Some(Value::String(raw)) if !raw.is_empty() => raw.parse::<HomeworkStatus>()?,
        Some(Value::String(_)) => {
            return Err(HomeworkBotError::InvalidStatus("empty".to_string()));
        }
        Some(Value::Null) | None => {
            return Err(HomeworkBotError::InvalidStatus("null".to_string()));
        }
        Some(other) => return Err(HomeworkBotError::InvalidStatus(other.to_string())),
    };

    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        name,
        status.verdict()
    ))
}
