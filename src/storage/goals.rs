//! Goal repository for JSON storage
//!
//! Manages loading and saving savings goals to goals.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::debug;

use crate::error::FinsightError;
use crate::models::{Goal, GoalId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct GoalData {
    #[serde(default)]
    goals: Vec<Goal>,
}

/// Repository for goal persistence
pub struct GoalRepository {
    path: PathBuf,
    goals: RwLock<HashMap<GoalId, Goal>>,
}

impl GoalRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            goals: RwLock::new(HashMap::new()),
        }
    }

    /// Load goals from disk
    pub fn load(&self) -> Result<(), FinsightError> {
        let file_data: GoalData = read_json(&self.path)?;

        let mut goals = self
            .goals
            .write()
            .map_err(|e| FinsightError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        goals.clear();
        for goal in file_data.goals {
            goals.insert(goal.id, goal);
        }

        debug!(count = goals.len(), "loaded goals");
        Ok(())
    }

    /// Save goals to disk
    pub fn save(&self) -> Result<(), FinsightError> {
        let goals = self.get_all()?;
        write_json_atomic(&self.path, &GoalData { goals })
    }

    pub fn get(&self, id: GoalId) -> Result<Option<Goal>, FinsightError> {
        let goals = self
            .goals
            .read()
            .map_err(|e| FinsightError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(goals.get(&id).cloned())
    }

    /// Get all goals, unfinished first, then by target date
    pub fn get_all(&self) -> Result<Vec<Goal>, FinsightError> {
        let goals = self
            .goals
            .read()
            .map_err(|e| FinsightError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = goals.values().cloned().collect();
        list.sort_by(|a, b| {
            a.is_completed()
                .cmp(&b.is_completed())
                .then_with(|| match (a.target_date, b.target_date) {
                    (Some(x), Some(y)) => x.cmp(&y),
                    (Some(_), None) => std::cmp::Ordering::Less,
                    (None, Some(_)) => std::cmp::Ordering::Greater,
                    (None, None) => std::cmp::Ordering::Equal,
                })
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(list)
    }

    /// Get a goal by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Goal>, FinsightError> {
        let goals = self
            .goals
            .read()
            .map_err(|e| FinsightError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.trim().to_lowercase();
        Ok(goals
            .values()
            .find(|g| g.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Insert or update a goal
    pub fn upsert(&self, goal: Goal) -> Result<(), FinsightError> {
        let mut goals = self
            .goals
            .write()
            .map_err(|e| FinsightError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        goals.insert(goal.id, goal);
        Ok(())
    }

    /// Delete a goal
    pub fn delete(&self, id: GoalId) -> Result<bool, FinsightError> {
        let mut goals = self
            .goals
            .write()
            .map_err(|e| FinsightError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(goals.remove(&id).is_some())
    }

    pub fn count(&self) -> Result<usize, FinsightError> {
        let goals = self
            .goals
            .read()
            .map_err(|e| FinsightError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(goals.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_ordering() {
        let temp_dir = TempDir::new().unwrap();
        let repo = GoalRepository::new(temp_dir.path().join("goals.json"));

        let mut done = Goal::new("Done", Money::from_cents(100));
        done.current_amount = Money::from_cents(100);
        let open_ended = Goal::new("Someday", Money::from_cents(100));
        let mut soon = Goal::new("Soon", Money::from_cents(100));
        soon.target_date = NaiveDate::from_ymd_opt(2025, 6, 1);

        repo.upsert(done).unwrap();
        repo.upsert(open_ended).unwrap();
        repo.upsert(soon).unwrap();

        let names: Vec<_> = repo.get_all().unwrap().into_iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["Soon", "Someday", "Done"]);
    }

    #[test]
    fn test_save_reload_and_name_lookup() {
        let temp_dir = TempDir::new().unwrap();
        let repo = GoalRepository::new(temp_dir.path().join("goals.json"));
        let goal = Goal::new("Emergency Fund", Money::from_cents(500000));
        let id = goal.id;
        repo.upsert(goal).unwrap();
        repo.save().unwrap();

        let repo2 = GoalRepository::new(temp_dir.path().join("goals.json"));
        repo2.load().unwrap();
        assert_eq!(repo2.count().unwrap(), 1);
        assert_eq!(repo2.get_by_name("emergency fund").unwrap().unwrap().id, id);
        assert!(repo2.delete(id).unwrap());
    }
}
