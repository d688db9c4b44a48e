//! In-memory workout collection backed by a [`Store`].
//!
//! Mutations build the next version of the map, persist it, and only then
//! replace the in-memory copy. If the save fails nothing changes.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;
use tracing::{info, warn};

use crate::error::{Result, WorkoutError};
use crate::models::{Exercise, Session, SetResult, WorkoutMap};
use crate::store::Store;

pub struct WorkoutCollection {
    store: Store,
    workouts: WorkoutMap,
}

impl WorkoutCollection {
    pub fn open(store: Store) -> Result<Self> {
        let workouts = store.load()?;
        Ok(WorkoutCollection { store, workouts })
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn workouts(&self) -> &WorkoutMap {
        &self.workouts
    }

    pub fn get(&self, name: &str) -> Option<&[Exercise]> {
        self.workouts.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.workouts.contains_key(name)
    }

    pub fn list_workout_names(&self) -> Vec<String> {
        self.workouts.keys().cloned().collect()
    }

    /// The last `n` workout names in insertion order.
    pub fn recent_workout_names(&self, n: usize) -> Vec<String> {
        let skip = self.workouts.len().saturating_sub(n);
        self.workouts.keys().skip(skip).cloned().collect()
    }

    pub fn total_workouts(&self) -> usize {
        self.workouts.len()
    }

    pub fn total_exercises(&self) -> usize {
        self.workouts.values().map(Vec::len).sum()
    }

    pub fn total_sessions(&self) -> usize {
        self.workouts
            .values()
            .flatten()
            .map(|ex| ex.tracking_history.len())
            .sum()
    }

    /// Inserts `name`, replacing any existing workout of that name along with
    /// its history.
    pub fn create_workout(&mut self, name: &str, exercises: Vec<Exercise>) -> Result<()> {
        if name.trim().is_empty() {
            return Err(rejected("please provide a workout name"));
        }
        if exercises.is_empty() {
            return Err(rejected("please add at least one exercise"));
        }
        ensure_unique_names(&exercises)?;

        let replaced = self.workouts.contains_key(name);
        let count = exercises.len();
        let mut next = self.workouts.clone();
        next.insert(name.to_string(), exercises);
        self.commit(next)?;

        info!(workout = name, exercises = count, replaced, "workout saved");
        Ok(())
    }

    /// Appends one session to every exercise of `workout_name`. Every exercise
    /// must have an entry in `per_exercise_sets` and no entry may name an
    /// exercise outside the workout.
    pub fn record_session(
        &mut self,
        workout_name: &str,
        per_exercise_sets: &HashMap<String, Vec<SetResult>>,
        timestamp: NaiveDateTime,
    ) -> Result<()> {
        let exercises = self
            .workouts
            .get(workout_name)
            .ok_or_else(|| WorkoutError::NotFound(workout_name.to_string()))?;

        if let Some(missing) = exercises
            .iter()
            .find(|ex| !per_exercise_sets.contains_key(&ex.name))
        {
            return Err(rejected(format!("no results entered for '{}'", missing.name)));
        }
        if let Some(unknown) = per_exercise_sets
            .keys()
            .find(|name| !exercises.iter().any(|ex| &ex.name == *name))
        {
            return Err(rejected(format!(
                "'{unknown}' is not an exercise in '{workout_name}'"
            )));
        }
        if per_exercise_sets
            .values()
            .flatten()
            .any(|set| !set.weight.is_finite() || set.weight < 0.0)
        {
            return Err(rejected("weights must be zero or more"));
        }

        let mut next = self.workouts.clone();
        if let Some(exercises) = next.get_mut(workout_name) {
            for ex in exercises.iter_mut() {
                let sets = per_exercise_sets[&ex.name].clone();
                ex.tracking_history.push(Session::new(timestamp, sets));
            }
        }
        self.commit(next)?;

        info!(workout = workout_name, %timestamp, "session recorded");
        Ok(())
    }

    /// Replaces `old_name` with `new_name` mapped to `new_exercises`.
    ///
    /// Histories are carried over by position: entry `i` of the new list takes
    /// the history of exercise `i` of the old list. New entries past the end
    /// of the old list start empty; old exercises past the end of the new
    /// list are dropped with their history. The renamed workout moves to the
    /// end of insertion order.
    pub fn rename_and_update_exercises(
        &mut self,
        old_name: &str,
        new_name: &str,
        new_exercises: Vec<Exercise>,
    ) -> Result<()> {
        let old_exercises = self
            .workouts
            .get(old_name)
            .ok_or_else(|| WorkoutError::NotFound(old_name.to_string()))?;

        if new_name.trim().is_empty() {
            return Err(rejected("please provide a workout name"));
        }
        if new_name != old_name && self.workouts.contains_key(new_name) {
            return Err(rejected(format!("a workout named '{new_name}' already exists")));
        }
        if new_exercises.is_empty() {
            return Err(rejected("a workout needs at least one exercise"));
        }
        ensure_unique_names(&new_exercises)?;

        let carried: Vec<Exercise> = new_exercises
            .into_iter()
            .enumerate()
            .map(|(idx, ex)| Exercise {
                tracking_history: old_exercises
                    .get(idx)
                    .map(|old| old.tracking_history.clone())
                    .unwrap_or_default(),
                ..ex
            })
            .collect();
        let count = carried.len();

        let mut next = self.workouts.clone();
        next.shift_remove(old_name);
        next.insert(new_name.to_string(), carried);
        self.commit(next)?;

        info!(from = old_name, to = new_name, exercises = count, "workout updated");
        Ok(())
    }

    pub fn delete_workout(&mut self, name: &str) -> Result<()> {
        if !self.workouts.contains_key(name) {
            return Err(WorkoutError::NotFound(name.to_string()));
        }
        let mut next = self.workouts.clone();
        next.shift_remove(name);
        self.commit(next)?;

        info!(workout = name, "workout deleted");
        Ok(())
    }

    fn commit(&mut self, next: WorkoutMap) -> Result<()> {
        self.store.save(&next)?;
        self.workouts = next;
        Ok(())
    }
}

/// Appends a new exercise to a caller-held staging buffer. Persisted state is
/// not touched.
pub fn stage_exercise(
    staging: &mut Vec<Exercise>,
    name: &str,
    target_sets: u32,
    target_reps: u32,
) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(rejected("please provide an exercise name"));
    }
    if target_sets < 1 || target_reps < 1 {
        return Err(rejected("sets and reps must be at least 1"));
    }
    if staging.iter().any(|ex| ex.name == name) {
        return Err(rejected(format!("'{name}' is already in this workout")));
    }
    staging.push(Exercise::new(name, target_sets, target_reps));
    Ok(())
}

fn ensure_unique_names(exercises: &[Exercise]) -> Result<()> {
    let mut seen = HashSet::new();
    for ex in exercises {
        if ex.name.trim().is_empty() {
            return Err(rejected("every exercise needs a name"));
        }
        if ex.target_sets < 1 || ex.target_reps < 1 {
            return Err(rejected(format!(
                "'{}' needs at least 1 set and 1 rep",
                ex.name
            )));
        }
        if !seen.insert(ex.name.as_str()) {
            return Err(rejected(format!("'{}' appears more than once", ex.name)));
        }
    }
    Ok(())
}

fn rejected(message: impl Into<String>) -> WorkoutError {
    let message = message.into();
    warn!(%message, "input rejected");
    WorkoutError::Validation(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn open(dir: &TempDir) -> WorkoutCollection {
        WorkoutCollection::open(Store::new(dir.path().join("workouts.json"))).unwrap()
    }

    fn sets(pairs: &[(u32, f64)]) -> Vec<SetResult> {
        pairs.iter().map(|&(r, w)| SetResult::new(r, w)).collect()
    }

    fn upper_body(collection: &mut WorkoutCollection) {
        collection
            .create_workout(
                "Upper",
                vec![Exercise::new("Bench", 3, 8), Exercise::new("Row", 3, 10)],
            )
            .unwrap();
    }

    fn track_upper(collection: &mut WorkoutCollection, day: u32) {
        let mut entries = HashMap::new();
        entries.insert("Bench".to_string(), sets(&[(8, 60.0), (8, 60.0), (7, 60.0)]));
        entries.insert("Row".to_string(), sets(&[(10, 50.0), (10, 50.0), (9, 50.0)]));
        collection.record_session("Upper", &entries, at(day, 18)).unwrap();
    }

    #[test]
    fn create_persists_exercises_with_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let mut collection = open(&dir);
        upper_body(&mut collection);

        let reloaded = open(&dir);
        let exercises = reloaded.get("Upper").unwrap();
        assert_eq!(exercises.len(), 2);
        assert_eq!(exercises[0], Exercise::new("Bench", 3, 8));
        assert!(exercises.iter().all(|ex| ex.tracking_history.is_empty()));
    }

    #[test]
    fn create_rejects_blank_name_and_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let mut collection = open(&dir);

        let err = collection
            .create_workout("", vec![Exercise::new("Squat", 3, 10)])
            .unwrap_err();
        assert!(err.is_validation());
        let err = collection.create_workout("Legs", vec![]).unwrap_err();
        assert!(err.is_validation());

        assert_eq!(collection.total_workouts(), 0);
        assert!(!dir.path().join("workouts.json").exists());
    }

    #[test]
    fn create_rejects_duplicate_exercise_names() {
        let dir = tempfile::tempdir().unwrap();
        let mut collection = open(&dir);
        let err = collection
            .create_workout(
                "Legs",
                vec![Exercise::new("Squat", 3, 10), Exercise::new("Squat", 5, 5)],
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert!(!collection.contains("Legs"));
    }

    #[test]
    fn create_over_existing_name_discards_history() {
        let dir = tempfile::tempdir().unwrap();
        let mut collection = open(&dir);
        upper_body(&mut collection);
        track_upper(&mut collection, 1);

        collection
            .create_workout("Upper", vec![Exercise::new("Press", 4, 6)])
            .unwrap();

        let exercises = collection.get("Upper").unwrap();
        assert_eq!(exercises, [Exercise::new("Press", 4, 6)]);
        assert_eq!(collection.total_sessions(), 0);
    }

    #[test]
    fn aggregates_and_recent_names() {
        let dir = tempfile::tempdir().unwrap();
        let mut collection = open(&dir);
        for (name, count) in [("A", 1), ("B", 2), ("C", 3), ("D", 1)] {
            let exercises = (0..count)
                .map(|i| Exercise::new(format!("{name}{i}"), 3, 10))
                .collect();
            collection.create_workout(name, exercises).unwrap();
        }

        assert_eq!(collection.total_workouts(), 4);
        assert_eq!(collection.total_exercises(), 7);
        assert_eq!(collection.list_workout_names(), ["A", "B", "C", "D"]);
        assert_eq!(collection.recent_workout_names(3), ["B", "C", "D"]);
        assert_eq!(collection.recent_workout_names(10).len(), 4);
        assert!(collection.recent_workout_names(0).is_empty());
    }

    #[test]
    fn record_session_appends_one_session_per_exercise() {
        let dir = tempfile::tempdir().unwrap();
        let mut collection = open(&dir);
        upper_body(&mut collection);
        track_upper(&mut collection, 1);
        track_upper(&mut collection, 3);

        let exercises = open(&dir).get("Upper").unwrap().to_vec();
        for ex in &exercises {
            assert_eq!(ex.tracking_history.len(), 2);
            assert_eq!(ex.tracking_history[0].date, "2024-01-01 18:00");
            assert_eq!(ex.tracking_history[1].date, "2024-01-03 18:00");
        }
        assert_eq!(exercises[1].tracking_history[0].sets[2], SetResult::new(9, 50.0));
    }

    #[test]
    fn record_session_on_unknown_workout_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workouts.json");
        let mut collection = open(&dir);
        upper_body(&mut collection);
        let before = fs::read_to_string(&path).unwrap();

        let err = collection
            .record_session("Lower", &HashMap::new(), at(2, 9))
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn record_session_requires_every_exercise() {
        let dir = tempfile::tempdir().unwrap();
        let mut collection = open(&dir);
        upper_body(&mut collection);

        let mut entries = HashMap::new();
        entries.insert("Bench".to_string(), sets(&[(8, 60.0)]));
        let err = collection.record_session("Upper", &entries, at(1, 9)).unwrap_err();
        assert!(err.is_validation());

        entries.insert("Row".to_string(), sets(&[(8, 60.0)]));
        entries.insert("Curl".to_string(), sets(&[(8, 10.0)]));
        let err = collection.record_session("Upper", &entries, at(1, 9)).unwrap_err();
        assert!(err.is_validation());

        assert_eq!(collection.total_sessions(), 0);
    }

    #[test]
    fn record_session_rejects_negative_weight() {
        let dir = tempfile::tempdir().unwrap();
        let mut collection = open(&dir);
        upper_body(&mut collection);

        let mut entries = HashMap::new();
        entries.insert("Bench".to_string(), sets(&[(8, -5.0)]));
        entries.insert("Row".to_string(), sets(&[(8, 50.0)]));
        let err = collection.record_session("Upper", &entries, at(1, 9)).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn rename_carries_history_by_position() {
        let dir = tempfile::tempdir().unwrap();
        let mut collection = open(&dir);
        upper_body(&mut collection);
        track_upper(&mut collection, 1);
        let original = collection.get("Upper").unwrap().to_vec();

        collection
            .rename_and_update_exercises(
                "Upper",
                "Upper v2",
                vec![Exercise::new("Incline Bench", 4, 6), Exercise::new("Row", 3, 12)],
            )
            .unwrap();

        let reloaded = open(&dir);
        assert!(!reloaded.contains("Upper"));
        let updated = reloaded.get("Upper v2").unwrap();
        assert_eq!(updated[0].name, "Incline Bench");
        assert_eq!(updated[0].target_sets, 4);
        assert_eq!(updated[0].tracking_history, original[0].tracking_history);
        assert_eq!(updated[1].target_reps, 12);
        assert_eq!(updated[1].tracking_history, original[1].tracking_history);
    }

    #[test]
    fn rename_with_longer_list_starts_new_entries_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut collection = open(&dir);
        upper_body(&mut collection);
        track_upper(&mut collection, 1);

        collection
            .rename_and_update_exercises(
                "Upper",
                "Upper",
                vec![
                    Exercise::new("Bench", 3, 8),
                    Exercise::new("Row", 3, 10),
                    Exercise::new("Dip", 3, 12),
                ],
            )
            .unwrap();

        let exercises = collection.get("Upper").unwrap();
        assert_eq!(exercises[0].tracking_history.len(), 1);
        assert_eq!(exercises[1].tracking_history.len(), 1);
        assert!(exercises[2].tracking_history.is_empty());
    }

    #[test]
    fn rename_with_shorter_list_drops_trailing_exercises() {
        let dir = tempfile::tempdir().unwrap();
        let mut collection = open(&dir);
        upper_body(&mut collection);
        track_upper(&mut collection, 1);

        collection
            .rename_and_update_exercises("Upper", "Push", vec![Exercise::new("Bench", 5, 5)])
            .unwrap();

        assert_eq!(collection.total_exercises(), 1);
        assert_eq!(collection.total_sessions(), 1);
    }

    #[test]
    fn rename_moves_workout_to_end_of_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut collection = open(&dir);
        upper_body(&mut collection);
        collection
            .create_workout("Lower", vec![Exercise::new("Squat", 3, 5)])
            .unwrap();

        collection
            .rename_and_update_exercises("Upper", "Upper B", vec![Exercise::new("Bench", 3, 8)])
            .unwrap();

        assert_eq!(collection.list_workout_names(), ["Lower", "Upper B"]);
    }

    #[test]
    fn rename_rejects_collision_and_unknown_source() {
        let dir = tempfile::tempdir().unwrap();
        let mut collection = open(&dir);
        upper_body(&mut collection);
        collection
            .create_workout("Lower", vec![Exercise::new("Squat", 3, 5)])
            .unwrap();

        let err = collection
            .rename_and_update_exercises("Upper", "Lower", vec![Exercise::new("Bench", 3, 8)])
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(collection.get("Lower").unwrap()[0].name, "Squat");

        let err = collection
            .rename_and_update_exercises("Arms", "Arms v2", vec![Exercise::new("Curl", 3, 8)])
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn delete_removes_key_and_unknown_name_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut collection = open(&dir);
        upper_body(&mut collection);

        collection.delete_workout("Upper").unwrap();
        assert_eq!(collection.total_workouts(), 0);
        assert!(open(&dir).workouts().is_empty());

        assert!(collection.delete_workout("Upper").unwrap_err().is_not_found());
    }

    #[test]
    fn failed_save_leaves_memory_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let mut collection = open(&dir);
        upper_body(&mut collection);

        fs::create_dir(dir.path().join("workouts.json.tmp")).unwrap();
        let err = collection.delete_workout("Upper").unwrap_err();

        assert!(matches!(err, WorkoutError::Io { .. }));
        assert!(collection.contains("Upper"));
    }

    #[test]
    fn staging_validates_and_appends() {
        let mut staging = Vec::new();
        stage_exercise(&mut staging, "Squat", 3, 10).unwrap();
        stage_exercise(&mut staging, "  Lunge ", 2, 12).unwrap();

        assert!(stage_exercise(&mut staging, "Deadlift", 0, 5).unwrap_err().is_validation());
        assert!(stage_exercise(&mut staging, "Deadlift", 3, 0).unwrap_err().is_validation());
        assert!(stage_exercise(&mut staging, "   ", 3, 5).unwrap_err().is_validation());
        assert!(stage_exercise(&mut staging, "Squat", 5, 5).unwrap_err().is_validation());

        assert_eq!(staging, [Exercise::new("Squat", 3, 10), Exercise::new("Lunge", 2, 12)]);
    }
}
