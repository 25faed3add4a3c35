//! Goal service
//!
//! Provides business logic for savings goals: CRUD with unique names,
//! contributions and withdrawals.

use chrono::{NaiveDate, Utc};
use tracing::warn;

use crate::audit::EntityType;
use crate::error::{FinsightError, FinsightResult};
use crate::models::{Goal, GoalId, Money};
use crate::storage::Storage;

use super::match_short_id;

/// Service for savings goal management
pub struct GoalService<'a> {
    storage: &'a Storage,
}

/// Input for creating a new goal
#[derive(Debug, Clone)]
pub struct CreateGoalInput {
    pub name: String,
    pub target_amount: Money,
    pub current_amount: Option<Money>,
    pub target_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Fields to change on an existing goal
///
/// `target_date: Some(None)` clears the target date.
#[derive(Debug, Clone, Default)]
pub struct UpdateGoalInput {
    pub name: Option<String>,
    pub target_amount: Option<Money>,
    pub current_amount: Option<Money>,
    pub target_date: Option<Option<NaiveDate>>,
    pub notes: Option<String>,
}

impl<'a> GoalService<'a> {
    /// Create a new goal service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new goal
    pub fn create(&self, input: CreateGoalInput) -> FinsightResult<Goal> {
        let name = input.name.trim();
        self.check_name_free(name, None)?;

        let mut goal = Goal::new(name, input.target_amount);
        if let Some(current) = input.current_amount {
            goal.current_amount = current;
        }
        goal.target_date = input.target_date;
        if let Some(notes) = input.notes {
            goal.notes = notes;
        }

        goal.validate()
            .map_err(|e| FinsightError::Validation(e.to_string()))?;

        self.storage.goals.upsert(goal.clone())?;
        self.storage.goals.save()?;

        self.storage.log_create(
            EntityType::Goal,
            goal.id.to_string(),
            Some(goal.name.clone()),
            &goal,
        )?;

        Ok(goal)
    }

    /// Get a goal by ID
    pub fn get(&self, id: GoalId) -> FinsightResult<Option<Goal>> {
        self.storage.goals.get(id)
    }

    /// Find a goal by name, full ID, or short display ID
    pub fn find(&self, identifier: &str) -> FinsightResult<Option<Goal>> {
        if let Some(goal) = self.storage.goals.get_by_name(identifier)? {
            return Ok(Some(goal));
        }

        if let Ok(id) = identifier.parse::<GoalId>() {
            return self.storage.goals.get(id);
        }

        match_short_id(
            self.storage.goals.get_all()?,
            identifier,
            |g| g.id.matches_short(identifier),
            "Goal",
        )
    }

    /// Find a goal or fail with a not-found error
    pub fn require(&self, identifier: &str) -> FinsightResult<Goal> {
        self.find(identifier)?
            .ok_or_else(|| FinsightError::goal_not_found(identifier))
    }

    /// List goals, unfinished first
    pub fn list(&self) -> FinsightResult<Vec<Goal>> {
        self.storage.goals.get_all()
    }

    /// Update a goal
    pub fn update(&self, id: GoalId, input: UpdateGoalInput) -> FinsightResult<Goal> {
        let mut goal = self.load(id)?;
        let before = goal.clone();

        if let Some(name) = input.name {
            let name = name.trim();
            self.check_name_free(name, Some(id))?;
            goal.name = name.to_string();
        }
        if let Some(target) = input.target_amount {
            goal.target_amount = target;
        }
        if let Some(current) = input.current_amount {
            goal.current_amount = current;
        }
        if let Some(target_date) = input.target_date {
            goal.target_date = target_date;
        }
        if let Some(notes) = input.notes {
            goal.notes = notes;
        }

        goal.validate()
            .map_err(|e| FinsightError::Validation(e.to_string()))?;

        goal.updated_at = Utc::now();
        self.persist_update(&before, &goal)?;

        Ok(goal)
    }

    /// Add money to a goal
    pub fn contribute(&self, id: GoalId, amount: Money) -> FinsightResult<Goal> {
        let mut goal = self.load(id)?;
        let before = goal.clone();

        goal.contribute(amount)
            .map_err(|e| FinsightError::Goal(e.to_string()))?;

        self.persist_update(&before, &goal)?;
        Ok(goal)
    }

    /// Take money out of a goal
    pub fn withdraw(&self, id: GoalId, amount: Money) -> FinsightResult<Goal> {
        let mut goal = self.load(id)?;
        let before = goal.clone();

        goal.withdraw(amount).map_err(|e| {
            warn!(goal = %goal.name, %amount, "refused withdrawal");
            FinsightError::Goal(e.to_string())
        })?;

        self.persist_update(&before, &goal)?;
        Ok(goal)
    }

    /// Delete a goal
    pub fn delete(&self, id: GoalId) -> FinsightResult<Goal> {
        let goal = self.load(id)?;

        self.storage.goals.delete(id)?;
        self.storage.goals.save()?;

        self.storage.log_delete(
            EntityType::Goal,
            goal.id.to_string(),
            Some(goal.name.clone()),
            &goal,
        )?;

        Ok(goal)
    }

    fn load(&self, id: GoalId) -> FinsightResult<Goal> {
        self.storage
            .goals
            .get(id)?
            .ok_or_else(|| FinsightError::goal_not_found(id.to_string()))
    }

    fn persist_update(&self, before: &Goal, goal: &Goal) -> FinsightResult<()> {
        self.storage.goals.upsert(goal.clone())?;
        self.storage.goals.save()?;

        self.storage.log_update(
            EntityType::Goal,
            goal.id.to_string(),
            Some(goal.name.clone()),
            before,
            goal,
        )
    }

    fn check_name_free(&self, name: &str, except: Option<GoalId>) -> FinsightResult<()> {
        match self.storage.goals.get_by_name(name)? {
            Some(existing) if Some(existing.id) != except => {
                warn!(name, "refused duplicate goal");
                Err(FinsightError::Duplicate {
                    entity_type: "Goal",
                    identifier: name.to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}
