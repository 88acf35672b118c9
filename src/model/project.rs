use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::lenient_amount;

/// A project owning purchase orders. Budgets are tracked in PHP only.
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub budget: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub contract_cost: f64,
    #[serde(default)]
    pub kind: ProjectKind,
    #[serde(default)]
    pub status: ProjectStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectKind {
    #[default]
    Capital,
    Operational,
}

impl ProjectKind {
    fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "operational" => ProjectKind::Operational,
            _ => ProjectKind::Capital,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectKind::Capital => "CAPITAL",
            ProjectKind::Operational => "OPERATIONAL",
        }
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl<'de> Deserialize<'de> for ProjectKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .as_deref()
            .map_or(ProjectKind::Capital, ProjectKind::from_tag))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Active,
    Completed,
    OnHold,
    Cancelled,
}

impl ProjectStatus {
    fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "completed" => ProjectStatus::Completed,
            "on_hold" => ProjectStatus::OnHold,
            "cancelled" => ProjectStatus::Cancelled,
            _ => ProjectStatus::Active,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "ACTIVE",
            ProjectStatus::Completed => "COMPLETED",
            ProjectStatus::OnHold => "ON HOLD",
            ProjectStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl<'de> Deserialize<'de> for ProjectStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .as_deref()
            .map_or(ProjectStatus::Active, ProjectStatus::from_tag))
    }
}
