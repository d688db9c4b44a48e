//! Application state and the action dispatcher.
//!
//! Views never mutate the collection themselves: they render from
//! [`AppState`] and hand back an [`Action`], which [`AppState::dispatch`]
//! applies and answers with a [`Notice`] for the status line.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::collection::{stage_exercise, WorkoutCollection};
use crate::config::AppConfig;
use crate::error::{Result, WorkoutError};
use crate::models::{Exercise, SetResult};

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum View {
    Dashboard,
    CreateWorkout,
    TrackWorkout,
    ManageWorkouts,
}

impl View {
    pub const ALL: [View; 4] = [
        View::Dashboard,
        View::CreateWorkout,
        View::TrackWorkout,
        View::ManageWorkouts,
    ];

    pub fn title(self) -> &'static str {
        match self {
            View::Dashboard => "Home Dashboard",
            View::CreateWorkout => "Create Workout",
            View::TrackWorkout => "Track Workout",
            View::ManageWorkouts => "Edit/Delete Workout",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Navigate(View),
    StageExercise,
    ClearStaging,
    SaveNewWorkout,
    SelectTrackWorkout(String),
    SaveSession,
    SelectEditWorkout(String),
    AddEditRow,
    RemoveLastEditRow,
    SaveEdits,
    DeleteWorkout,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    Success(String),
    Error(String),
}

pub struct CreateForm {
    pub workout_name: String,
    pub exercise_name: String,
    pub sets: u32,
    pub reps: u32,
    pub staging: Vec<Exercise>,
    pub replace_existing: bool,
}

impl Default for CreateForm {
    fn default() -> Self {
        CreateForm {
            workout_name: String::new(),
            exercise_name: String::new(),
            sets: 3,
            reps: 10,
            staging: Vec::new(),
            replace_existing: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrackEntry {
    pub exercise: String,
    pub sets: Vec<SetResult>,
}

/// Per-set inputs for the workout selected on the track view.
#[derive(Default)]
pub struct TrackForm {
    pub selected: Option<String>,
    pub entries: Vec<TrackEntry>,
}

impl TrackForm {
    fn load(&mut self, name: Option<String>, collection: &WorkoutCollection) {
        self.entries = name
            .as_deref()
            .and_then(|n| collection.get(n))
            .map(|exercises| {
                exercises
                    .iter()
                    .map(|ex| TrackEntry {
                        exercise: ex.name.clone(),
                        sets: vec![SetResult::default(); ex.target_sets as usize],
                    })
                    .collect()
            })
            .unwrap_or_default();
        self.selected = name;
    }

    pub fn per_exercise_sets(&self) -> HashMap<String, Vec<SetResult>> {
        self.entries
            .iter()
            .map(|entry| (entry.exercise.clone(), entry.sets.clone()))
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExerciseRow {
    pub name: String,
    pub sets: u32,
    pub reps: u32,
}

/// Editable copy of the workout selected on the edit/delete view. Rows line
/// up by index with the stored exercises, which is how histories follow them.
#[derive(Default)]
pub struct EditForm {
    pub selected: Option<String>,
    pub new_name: String,
    pub rows: Vec<ExerciseRow>,
    pub confirm_delete: bool,
}

impl EditForm {
    fn load(&mut self, name: Option<String>, collection: &WorkoutCollection) {
        self.rows = name
            .as_deref()
            .and_then(|n| collection.get(n))
            .map(|exercises| {
                exercises
                    .iter()
                    .map(|ex| ExerciseRow {
                        name: ex.name.clone(),
                        sets: ex.target_sets,
                        reps: ex.target_reps,
                    })
                    .collect()
            })
            .unwrap_or_default();
        self.new_name = name.clone().unwrap_or_default();
        self.confirm_delete = false;
        self.selected = name;
    }

    pub fn exercises(&self) -> Vec<Exercise> {
        self.rows
            .iter()
            .map(|row| Exercise::new(row.name.trim(), row.sets, row.reps))
            .collect()
    }
}

pub struct AppState {
    pub config: AppConfig,
    pub collection: WorkoutCollection,
    pub view: View,
    pub create: CreateForm,
    pub track: TrackForm,
    pub edit: EditForm,
    pub notice: Option<Notice>,
}

impl AppState {
    pub fn new(config: AppConfig, collection: WorkoutCollection) -> Self {
        let mut state = AppState {
            config,
            collection,
            view: View::Dashboard,
            create: CreateForm::default(),
            track: TrackForm::default(),
            edit: EditForm::default(),
            notice: None,
        };
        state.sync_selections();
        state
    }

    /// Applies one user action. Failures are reported through the notice and
    /// leave the collection as it was.
    pub fn dispatch(&mut self, action: Action, now: NaiveDateTime) {
        debug!(?action, view = ?self.view, "dispatching");
        let outcome = match action {
            Action::Navigate(view) => {
                self.navigate(view);
                return;
            }
            Action::StageExercise => self.stage_exercise(),
            Action::ClearStaging => {
                self.create.staging.clear();
                return;
            }
            Action::SaveNewWorkout => self.save_new_workout(),
            Action::SelectTrackWorkout(name) => {
                self.track.load(Some(name), &self.collection);
                return;
            }
            Action::SaveSession => self.save_session(now),
            Action::SelectEditWorkout(name) => {
                self.edit.load(Some(name), &self.collection);
                return;
            }
            Action::AddEditRow => {
                self.edit.rows.push(ExerciseRow {
                    name: String::new(),
                    sets: 3,
                    reps: 10,
                });
                return;
            }
            Action::RemoveLastEditRow => {
                self.edit.rows.pop();
                return;
            }
            Action::SaveEdits => self.save_edits(),
            Action::DeleteWorkout => self.delete_workout(),
        };

        self.notice = Some(match outcome {
            Ok(message) => Notice::Success(message),
            Err(e) => Notice::Error(e.to_string()),
        });
    }

    fn navigate(&mut self, view: View) {
        self.view = view;
        self.notice = None;
        match view {
            View::TrackWorkout => {
                let selected = self.track.selected.clone();
                self.track.load(selected, &self.collection);
            }
            View::ManageWorkouts => {
                let selected = self.edit.selected.clone();
                self.edit.load(selected, &self.collection);
            }
            View::Dashboard | View::CreateWorkout => {}
        }
        self.sync_selections();
    }

    fn stage_exercise(&mut self) -> Result<String> {
        let form = &mut self.create;
        stage_exercise(&mut form.staging, &form.exercise_name, form.sets, form.reps)?;
        let added = format!("Added {}!", form.exercise_name.trim());
        form.exercise_name.clear();
        Ok(added)
    }

    fn save_new_workout(&mut self) -> Result<String> {
        let name = self.create.workout_name.trim().to_string();
        if self.collection.contains(&name) && !self.create.replace_existing {
            return Err(WorkoutError::validation(format!(
                "a workout named '{name}' already exists; tick \"Replace existing workout\" to overwrite it"
            )));
        }
        self.collection
            .create_workout(&name, self.create.staging.clone())?;

        self.create = CreateForm::default();
        self.reload_selected();
        Ok("Workout Saved!".to_string())
    }

    fn save_session(&mut self, now: NaiveDateTime) -> Result<String> {
        let name = self
            .track
            .selected
            .clone()
            .ok_or_else(|| WorkoutError::validation("select a workout to track"))?;
        self.collection
            .record_session(&name, &self.track.per_exercise_sets(), now)?;

        self.track.load(Some(name), &self.collection);
        Ok("Tracking data saved!".to_string())
    }

    fn save_edits(&mut self) -> Result<String> {
        let old_name = self
            .edit
            .selected
            .clone()
            .ok_or_else(|| WorkoutError::validation("select a workout to edit"))?;
        let new_name = self.edit.new_name.trim().to_string();
        self.collection
            .rename_and_update_exercises(&old_name, &new_name, self.edit.exercises())?;

        if self.track.selected.as_deref() == Some(old_name.as_str()) {
            self.track.selected = Some(new_name.clone());
        }
        self.edit.selected = Some(new_name);
        self.reload_selected();
        Ok("Workout updated!".to_string())
    }

    fn delete_workout(&mut self) -> Result<String> {
        let name = self
            .edit
            .selected
            .clone()
            .ok_or_else(|| WorkoutError::validation("select a workout to delete"))?;
        if !self.edit.confirm_delete {
            return Err(WorkoutError::validation(
                "tick \"Confirm delete\" before deleting a workout",
            ));
        }
        self.collection.delete_workout(&name)?;

        self.reload_selected();
        Ok("Workout deleted!".to_string())
    }

    fn reload_selected(&mut self) {
        let track = self.track.selected.clone();
        self.track.load(track, &self.collection);
        let edit = self.edit.selected.clone();
        self.edit.load(edit, &self.collection);
        self.sync_selections();
    }

    // Point both selectors at an existing workout, falling back to the first.
    fn sync_selections(&mut self) {
        let first = self.collection.list_workout_names().into_iter().next();

        let track_valid = self
            .track
            .selected
            .as_deref()
            .is_some_and(|n| self.collection.contains(n));
        if !track_valid {
            self.track.load(first.clone(), &self.collection);
        }

        let edit_valid = self
            .edit
            .selected
            .as_deref()
            .is_some_and(|n| self.collection.contains(n));
        if !edit_valid {
            self.edit.load(first, &self.collection);
        }
    }
}
