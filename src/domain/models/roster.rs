use std::collections::HashSet;

use serde::Serialize;

use super::student::Student;

/// The roster aggregate: every student on the board plus the display order
/// of their groups.
///
/// Groups are not entities of their own. They exist as the projection of
/// student `group` labels, reconciled against the stored order list. The
/// order list may also carry groups that currently have no members.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    pub students: Vec<Student>,
    pub group_order: Vec<String>,
}

impl Roster {
    pub fn student(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub fn student_mut(&mut self, id: &str) -> Option<&mut Student> {
        self.students.iter_mut().find(|s| s.id == id)
    }

    /// Group labels currently carried by students, in first-seen order
    pub fn live_groups(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut groups = Vec::new();
        for student in &self.students {
            if seen.insert(student.group.clone()) {
                groups.push(student.group.clone());
            }
        }
        groups
    }

    /// The stored order with any unlisted live group appended at the end,
    /// in first-seen order over the student list
    pub fn reconciled_group_order(&self) -> Vec<String> {
        let mut order = self.group_order.clone();
        for group in self.live_groups() {
            if !order.contains(&group) {
                order.push(group);
            }
        }
        order
    }

    /// Append `group` to the order if it is not listed yet. Returns whether
    /// the order changed.
    pub fn ensure_group_listed(&mut self, group: &str) -> bool {
        if self.group_order.iter().any(|g| g == group) {
            return false;
        }
        self.group_order.push(group.to_string());
        true
    }

    /// Whether `name` is known, either as a listed group or as the group of
    /// at least one student
    pub fn contains_group(&self, name: &str) -> bool {
        self.group_order.iter().any(|g| g == name) || self.students.iter().any(|s| s.group == name)
    }

    /// Move every member of `old_name` to `new_name` and replace the order
    /// entry in place, so the group keeps its display position. When the
    /// target group already exists the members merge and the order keeps the
    /// earlier of the two slots.
    ///
    /// Returns the number of students carrying `new_name` afterwards.
    pub fn rename_group(&mut self, old_name: &str, new_name: &str) -> usize {
        for student in &mut self.students {
            if student.group == old_name {
                student.group = new_name.to_string();
            }
        }

        for group in &mut self.group_order {
            if group == old_name {
                *group = new_name.to_string();
            }
        }
        // A merge can leave the target listed twice; keep the earliest slot.
        let mut seen = HashSet::new();
        self.group_order.retain(|group| seen.insert(group.clone()));

        self.students.iter().filter(|s| s.group == new_name).count()
    }

    /// First student id that appears more than once, if any
    pub fn duplicate_id(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        self.students
            .iter()
            .map(|s| s.id.as_str())
            .find(|id| !seen.insert(*id))
    }

    /// Aggregate counters across the whole roster
    pub fn stats(&self) -> ClassStats {
        let total_students = self.students.len() as u32;
        let total_points: u32 = self.students.iter().map(|s| s.points).sum();
        let total_homework: u32 = self.students.iter().map(|s| s.homework_count).sum();
        let total_interactions: u32 = self.students.iter().map(|s| s.interaction_count).sum();
        let active_students = self
            .students
            .iter()
            .filter(|s| s.interaction_count > 0)
            .count() as u32;
        let homework_students = self
            .students
            .iter()
            .filter(|s| s.homework_count > 0)
            .count() as u32;

        ClassStats {
            total_students,
            total_points,
            total_homework,
            total_interactions,
            average_points: ratio(total_points, total_students),
            active_students,
            active_rate: percentage(active_students, total_students),
            homework_rate: percentage(homework_students, total_students),
            group_count: self.live_groups().len() as u32,
        }
    }

    /// Students ranked by points, highest first, cut to `limit`
    pub fn top_students(&self, limit: usize) -> Vec<Student> {
        let mut ranked = self.students.clone();
        ranked.sort_by(|a, b| b.points.cmp(&a.points));
        ranked.truncate(limit);
        ranked
    }

    /// Per-group totals ranked by total points, highest first
    pub fn group_standings(&self) -> Vec<GroupStanding> {
        let mut standings: Vec<GroupStanding> = self
            .live_groups()
            .into_iter()
            .map(|group| {
                let mut member_count = 0u32;
                let mut total_points = 0u32;
                for student in self.students.iter().filter(|s| s.group == group) {
                    member_count += 1;
                    total_points += student.points;
                }
                GroupStanding {
                    group,
                    member_count,
                    total_points,
                    average_points: ratio(total_points, member_count),
                }
            })
            .collect();

        standings.sort_by(|a, b| b.total_points.cmp(&a.total_points));
        standings
    }
}

/// Classroom-wide aggregates shown on the stats board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassStats {
    pub total_students: u32,
    pub total_points: u32,
    pub total_homework: u32,
    pub total_interactions: u32,
    /// Rounded mean of points per student
    pub average_points: u32,
    /// Students with at least one recorded interaction
    pub active_students: u32,
    /// Percentage of students with at least one interaction, rounded
    pub active_rate: u32,
    /// Percentage of students with at least one homework submission, rounded
    pub homework_rate: u32,
    pub group_count: u32,
}

/// One group's entry in the group leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStanding {
    pub group: String,
    pub member_count: u32,
    pub total_points: u32,
    pub average_points: u32,
}

fn ratio(total: u32, count: u32) -> u32 {
    if count == 0 {
        0
    } else {
        (f64::from(total) / f64::from(count)).round() as u32
    }
}

fn percentage(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        0
    } else {
        (f64::from(part) * 100.0 / f64::from(whole)).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::super::student::Student;
    use super::Roster;

    fn student(id: &str, name: &str, group: &str, points: u32) -> Student {
        Student {
            id: id.to_string(),
            name: name.to_string(),
            group: group.to_string(),
            points,
            homework_count: 0,
            interaction_count: 0,
        }
    }

    #[test]
    fn reconciled_order_appends_unlisted_groups_in_first_seen_order() {
        let roster = Roster {
            students: vec![
                student("1", "Alice", "B", 0),
                student("2", "Bob", "C", 0),
                student("3", "Cara", "A", 0),
                student("4", "Dan", "C", 0),
            ],
            group_order: vec!["A".to_string()],
        };

        assert_eq!(roster.reconciled_group_order(), vec!["A", "B", "C"]);
    }

    #[test]
    fn reconciled_order_keeps_listed_groups_without_members() {
        let roster = Roster {
            students: vec![student("1", "Alice", "A", 0)],
            group_order: vec!["Empty".to_string(), "A".to_string()],
        };

        assert_eq!(roster.reconciled_group_order(), vec!["Empty", "A"]);
    }

    #[test]
    fn ensure_group_listed_appends_only_once() {
        let mut roster = Roster::default();

        assert!(roster.ensure_group_listed("A"));
        assert!(!roster.ensure_group_listed("A"));
        assert_eq!(roster.group_order, vec!["A"]);
    }

    #[test]
    fn rename_keeps_the_group_position() {
        let mut roster = Roster {
            students: vec![student("1", "Alice", "B", 0)],
            group_order: vec!["A".to_string(), "B".to_string(), "C".to_string()],
        };

        let updated = roster.rename_group("B", "Beta");

        assert_eq!(updated, 1);
        assert_eq!(roster.group_order, vec!["A", "Beta", "C"]);
        assert_eq!(roster.students[0].group, "Beta");
    }

    #[test]
    fn rename_onto_existing_group_merges_and_keeps_earlier_slot() {
        let mut roster = Roster {
            students: vec![
                student("1", "Alice", "A", 0),
                student("2", "Bob", "B", 0),
                student("3", "Cara", "B", 0),
            ],
            group_order: vec!["A".to_string(), "B".to_string(), "C".to_string()],
        };

        let updated = roster.rename_group("B", "A");

        assert_eq!(updated, 3);
        assert_eq!(roster.group_order, vec!["A", "C"]);
        assert!(roster.students.iter().all(|s| s.group == "A"));
    }

    #[test]
    fn rename_of_memberless_group_touches_only_the_order() {
        let mut roster = Roster {
            students: vec![student("1", "Alice", "A", 0)],
            group_order: vec!["A".to_string(), "Ghost".to_string()],
        };

        let updated = roster.rename_group("Ghost", "Spirit");

        assert_eq!(updated, 0);
        assert_eq!(roster.group_order, vec!["A", "Spirit"]);
    }

    #[test]
    fn duplicate_id_finds_the_repeated_entry() {
        let roster = Roster {
            students: vec![
                student("1", "Alice", "A", 0),
                student("2", "Bob", "A", 0),
                student("1", "Copy", "B", 0),
            ],
            group_order: Vec::new(),
        };

        assert_eq!(roster.duplicate_id(), Some("1"));
    }

    #[test]
    fn stats_on_an_empty_roster_are_all_zero() {
        let stats = Roster::default().stats();

        assert_eq!(stats.total_students, 0);
        assert_eq!(stats.average_points, 0);
        assert_eq!(stats.active_rate, 0);
        assert_eq!(stats.group_count, 0);
    }

    #[test]
    fn stats_aggregate_counters_and_rates() {
        let mut active = student("1", "Alice", "A", 30);
        active.interaction_count = 4;
        active.homework_count = 2;
        let idle = student("2", "Bob", "B", 11);

        let roster = Roster {
            students: vec![active, idle],
            group_order: Vec::new(),
        };
        let stats = roster.stats();

        assert_eq!(stats.total_students, 2);
        assert_eq!(stats.total_points, 41);
        assert_eq!(stats.total_homework, 2);
        assert_eq!(stats.total_interactions, 4);
        assert_eq!(stats.average_points, 21);
        assert_eq!(stats.active_students, 1);
        assert_eq!(stats.active_rate, 50);
        assert_eq!(stats.homework_rate, 50);
        assert_eq!(stats.group_count, 2);
    }

    #[test]
    fn top_students_rank_by_points_and_respect_the_limit() {
        let roster = Roster {
            students: vec![
                student("1", "Alice", "A", 5),
                student("2", "Bob", "A", 20),
                student("3", "Cara", "B", 10),
            ],
            group_order: Vec::new(),
        };

        let top = roster.top_students(2);

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "Bob");
        assert_eq!(top[1].name, "Cara");
    }

    #[test]
    fn group_standings_rank_groups_by_total_points() {
        let roster = Roster {
            students: vec![
                student("1", "Alice", "A", 5),
                student("2", "Bob", "B", 20),
                student("3", "Cara", "A", 10),
            ],
            group_order: Vec::new(),
        };

        let standings = roster.group_standings();

        assert_eq!(standings.len(), 2);
        assert_eq!(standings[0].group, "B");
        assert_eq!(standings[0].total_points, 20);
        assert_eq!(standings[0].member_count, 1);
        assert_eq!(standings[1].group, "A");
        assert_eq!(standings[1].total_points, 15);
        assert_eq!(standings[1].average_points, 8);
    }
}
