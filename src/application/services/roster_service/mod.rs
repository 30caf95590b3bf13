use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use crate::application::dto::roster_dto::{
    AddStudentDto, ImportRosterDto, LeaderboardDto, PointsAwardDto, RenameGroupDto,
    RenameGroupResultDto, RosterExportDto, RosterSnapshotDto,
};
use crate::domain::errors::DomainError;
use crate::domain::models::roster::{ClassStats, Roster};
use crate::domain::models::student::{PointsLevel, Student};
use crate::domain::repositories::key_value_store::KeyValueStore;


/// Key holding the serialized student collection
const STUDENTS_KEY: &str = "classroom_students";

/// Key holding the serialized group display order
const GROUP_ORDER_KEY: &str = "classroom_group_order";

/// Number of entries on the individual leaderboard
const LEADERBOARD_SIZE: usize = 8;

/// How `rename_group` treats a target name that already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenamePolicy {
    /// Fold both groups' members under the new name
    #[default]
    Merge,

    /// Refuse the rename with a validation error
    Reject,
}

impl FromStr for RenamePolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "merge" => Ok(Self::Merge),
            "reject" => Ok(Self::Reject),
            other => Err(format!("unknown rename policy: {other}")),
        }
    }
}

/// Service owning the classroom roster and its group display order.
///
/// The roster snapshot lives in the key-value store under two fixed keys;
/// every mutation is written through before it returns. The store is the
/// only authoritative copy, so a freshly constructed service over the same
/// store sees the same roster.
pub struct RosterService {
    store: Arc<dyn KeyValueStore>,
    rename_policy: RenamePolicy,
    /// Serializes every operation. The snapshot spans two keys, and the
    /// read-modify-write cycles here have no isolation of their own.
    write_lock: Mutex<()>,
}

impl RosterService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_policy(store, RenamePolicy::default())
    }

    pub fn with_policy(store: Arc<dyn KeyValueStore>, rename_policy: RenamePolicy) -> Self {
        Self {
            store,
            rename_policy,
            write_lock: Mutex::new(()),
        }
    }

    /// Get the full roster. A missing snapshot is an empty roster.
    pub async fn get_roster(&self) -> Result<RosterSnapshotDto, DomainError> {
        let _guard = self.write_lock.lock().await;

        let roster = self.load_roster().await?;
        Ok(snapshot_of(roster))
    }

    /// Bulk-overwrite the roster, e.g. from an imported file. The stored
    /// group order is kept untouched unless a new one is supplied.
    pub async fn replace_roster(
        &self,
        dto: ImportRosterDto,
    ) -> Result<RosterSnapshotDto, DomainError> {
        let _guard = self.write_lock.lock().await;

        let mut roster = self.load_roster().await?;
        roster.students = dto.students;
        if let Some(id) = roster.duplicate_id() {
            return Err(DomainError::InvalidData(format!(
                "duplicate student id: {id}"
            )));
        }

        let order_given = dto.group_order.is_some();
        if let Some(order) = dto.group_order {
            roster.group_order = dedup_order(order);
        }

        self.save_students(&roster).await?;
        if order_given {
            self.save_group_order(&roster).await?;
        }

        tracing::debug!("Replaced roster with {} students", roster.students.len());
        Ok(snapshot_of(roster))
    }

    /// Create a student with zeroed counters; a new group label is appended
    /// to the end of the display order.
    pub async fn add_student(&self, dto: AddStudentDto) -> Result<Student, DomainError> {
        let name = non_blank(&dto.name, "student name")?;
        let group = non_blank(&dto.group, "group name")?;

        let _guard = self.write_lock.lock().await;

        let mut roster = self.load_roster().await?;
        let student = Student::new(name.to_string(), group.to_string());
        roster.students.push(student.clone());
        let order_changed = roster.ensure_group_listed(group);

        self.save_students(&roster).await?;
        if order_changed {
            self.save_group_order(&roster).await?;
        }

        tracing::debug!("Added student {} to group {}", student.name, student.group);
        Ok(student)
    }

    /// Award points to a student. Any positive delta is accepted; the
    /// interaction counter advances by one per call regardless of the delta.
    pub async fn award_points(
        &self,
        student_id: &str,
        delta: u32,
    ) -> Result<PointsAwardDto, DomainError> {
        if delta == 0 {
            return Err(DomainError::InvalidData(
                "point award must be positive".to_string(),
            ));
        }

        let _guard = self.write_lock.lock().await;

        let mut roster = self.load_roster().await?;
        let student = roster
            .student_mut(student_id)
            .ok_or_else(|| DomainError::NotFound(format!("Student not found: {student_id}")))?;

        let old_points = student.points;
        student.points = student.points.saturating_add(delta);
        student.interaction_count += 1;
        let updated = student.clone();

        self.save_students(&roster).await?;

        let old_level = PointsLevel::for_points(old_points);
        let new_level = updated.level();
        tracing::debug!(
            "Awarded {} points to {} ({} -> {})",
            delta,
            updated.name,
            old_points,
            updated.points
        );

        Ok(PointsAwardDto {
            old_points,
            new_points: updated.points,
            old_level,
            new_level,
            leveled_up: old_level != new_level,
            student: updated,
        })
    }

    /// Record one homework submission
    pub async fn record_homework(&self, student_id: &str) -> Result<Student, DomainError> {
        let _guard = self.write_lock.lock().await;

        let mut roster = self.load_roster().await?;
        let student = roster
            .student_mut(student_id)
            .ok_or_else(|| DomainError::NotFound(format!("Student not found: {student_id}")))?;

        student.homework_count += 1;
        let updated = student.clone();

        self.save_students(&roster).await?;

        tracing::debug!("Recorded homework for {}", updated.name);
        Ok(updated)
    }

    /// Move a student to `target_group`, creating the group's order entry
    /// when needed. Moving a student to their current group is a no-op that
    /// still succeeds.
    pub async fn move_student_to_group(
        &self,
        student_id: &str,
        target_group: &str,
    ) -> Result<Student, DomainError> {
        let target = non_blank(target_group, "group name")?;

        let _guard = self.write_lock.lock().await;

        let mut roster = self.load_roster().await?;
        let student = roster
            .student_mut(student_id)
            .ok_or_else(|| DomainError::NotFound(format!("Student not found: {student_id}")))?;

        student.group = target.to_string();
        let updated = student.clone();
        let order_changed = roster.ensure_group_listed(target);

        self.save_students(&roster).await?;
        if order_changed {
            self.save_group_order(&roster).await?;
        }

        tracing::debug!("Moved {} to group {}", updated.name, updated.group);
        Ok(updated)
    }

    /// Rename a group, preserving its position in the display order.
    ///
    /// Renaming onto an existing group merges both member sets under the new
    /// name, or fails, depending on the configured [`RenamePolicy`].
    /// Renaming a group nobody belongs to succeeds and reports zero updates.
    pub async fn rename_group(
        &self,
        dto: RenameGroupDto,
    ) -> Result<RenameGroupResultDto, DomainError> {
        let old_name = non_blank(&dto.old_name, "group name")?;
        let new_name = non_blank(&dto.new_name, "group name")?;

        let _guard = self.write_lock.lock().await;

        let mut roster = self.load_roster().await?;

        if old_name == new_name {
            let updated_count = roster.students.iter().filter(|s| s.group == new_name).count();
            return Ok(RenameGroupResultDto {
                updated_count: updated_count as u32,
            });
        }

        if self.rename_policy == RenamePolicy::Reject && roster.contains_group(new_name) {
            return Err(DomainError::InvalidData(format!(
                "group already exists: {new_name}"
            )));
        }

        let updated_count = roster.rename_group(old_name, new_name);

        self.save_students(&roster).await?;
        self.save_group_order(&roster).await?;

        tracing::debug!(
            "Renamed group {} to {} ({} students affected)",
            old_name,
            new_name,
            updated_count
        );

        Ok(RenameGroupResultDto {
            updated_count: updated_count as u32,
        })
    }

    /// Clear the whole board. Irreversible.
    pub async fn reset_all(&self) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().await;

        self.store.del(STUDENTS_KEY).await?;
        self.store.del(GROUP_ORDER_KEY).await?;

        tracing::info!("Roster reset");
        Ok(())
    }

    /// Classroom-wide aggregates
    pub async fn class_stats(&self) -> Result<ClassStats, DomainError> {
        let _guard = self.write_lock.lock().await;

        let roster = self.load_roster().await?;
        Ok(roster.stats())
    }

    /// Individual top list and per-group standings
    pub async fn leaderboard(&self) -> Result<LeaderboardDto, DomainError> {
        let _guard = self.write_lock.lock().await;

        let roster = self.load_roster().await?;
        Ok(LeaderboardDto {
            top_students: roster.top_students(LEADERBOARD_SIZE),
            group_standings: roster.group_standings(),
        })
    }

    /// Download-ready snapshot stamped with the export time
    pub async fn export_roster(&self) -> Result<RosterExportDto, DomainError> {
        let _guard = self.write_lock.lock().await;

        let roster = self.load_roster().await?;
        Ok(RosterExportDto {
            exported_at: Utc::now(),
            group_order: roster.reconciled_group_order(),
            students: roster.students,
        })
    }

    async fn load_roster(&self) -> Result<Roster, DomainError> {
        let students = match self.store.get(STUDENTS_KEY).await? {
            Some(value) => serde_json::from_value(value).map_err(|e| {
                DomainError::InvalidData(format!("corrupt student snapshot: {e}"))
            })?,
            None => Vec::new(),
        };

        let group_order = match self.store.get(GROUP_ORDER_KEY).await? {
            Some(value) => serde_json::from_value(value).map_err(|e| {
                DomainError::InvalidData(format!("corrupt group order snapshot: {e}"))
            })?,
            None => Vec::new(),
        };

        Ok(Roster {
            students,
            group_order,
        })
    }

    async fn save_students(&self, roster: &Roster) -> Result<(), DomainError> {
        let value = serde_json::to_value(&roster.students)
            .map_err(|e| DomainError::InvalidData(format!("failed to serialize students: {e}")))?;
        self.store.set(STUDENTS_KEY, value).await
    }

    async fn save_group_order(&self, roster: &Roster) -> Result<(), DomainError> {
        let value = serde_json::to_value(&roster.group_order).map_err(|e| {
            DomainError::InvalidData(format!("failed to serialize group order: {e}"))
        })?;
        self.store.set(GROUP_ORDER_KEY, value).await
    }
}

fn snapshot_of(roster: Roster) -> RosterSnapshotDto {
    let group_order = roster.reconciled_group_order();
    RosterSnapshotDto {
        students: roster.students,
        group_order,
    }
}

fn dedup_order(order: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    order.into_iter().filter(|g| seen.insert(g.clone())).collect()
}

fn non_blank<'a>(value: &'a str, what: &str) -> Result<&'a str, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidData(format!("{what} must not be empty")));
    }
    Ok(trimmed)
}
