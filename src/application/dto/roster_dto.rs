use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::models::roster::GroupStanding;
use crate::domain::models::student::{PointsLevel, Student};

/// Full roster as returned by read operations: the student list plus the
/// reconciled group display order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterSnapshotDto {
    pub students: Vec<Student>,

    #[serde(default)]
    pub group_order: Vec<String>,
}

/// DTO for creating a single student
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddStudentDto {
    pub name: String,
    pub group: String,
}

/// DTO for a bulk roster overwrite (import). When `group_order` is omitted
/// the previously stored order is retained.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRosterDto {
    pub students: Vec<Student>,

    #[serde(default)]
    pub group_order: Option<Vec<String>>,
}

/// Outcome of a point award, including everything the caller needs to
/// detect a level-threshold crossing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsAwardDto {
    pub student: Student,
    pub old_points: u32,
    pub new_points: u32,
    pub old_level: PointsLevel,
    pub new_level: PointsLevel,
    pub leveled_up: bool,
}

/// DTO for renaming a group
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameGroupDto {
    pub old_name: String,
    pub new_name: String,
}

/// Outcome of a group rename
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameGroupResultDto {
    /// Students carrying the new name after the rename; a merge counts the
    /// members of both groups
    pub updated_count: u32,
}

/// Individual and per-group rankings
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardDto {
    pub top_students: Vec<Student>,
    pub group_standings: Vec<GroupStanding>,
}

/// Download-ready snapshot of the whole roster
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterExportDto {
    pub exported_at: DateTime<Utc>,
    pub students: Vec<Student>,
    pub group_order: Vec<String>,
}

impl RosterExportDto {
    /// File name matching the board's download convention
    pub fn suggested_file_name(&self) -> String {
        format!("classroom-data-{}.json", self.exported_at.format("%Y-%m-%d"))
    }
}
