use eframe::egui::{self, RichText, Ui};

use crate::app::{Action, AppState};

pub fn show(ui: &mut Ui, state: &mut AppState) -> Option<Action> {
    let exists = state.collection.contains(state.create.workout_name.trim());
    let form = &mut state.create;
    let mut action = None;

    ui.heading(RichText::new("Create New Workout").size(32.0).strong());
    ui.add_space(10.0);

    ui.horizontal(|ui| {
        ui.label("Workout Name");
        ui.text_edit_singleline(&mut form.workout_name);
    });

    ui.add_space(10.0);
    ui.group(|ui| {
        egui::Grid::new("exercise_form").num_columns(2).show(ui, |ui| {
            ui.label("Exercise Name");
            ui.text_edit_singleline(&mut form.exercise_name);
            ui.end_row();

            ui.label("Sets");
            ui.add(egui::DragValue::new(&mut form.sets).range(1..=50));
            ui.end_row();

            ui.label("Reps");
            ui.add(egui::DragValue::new(&mut form.reps).range(1..=100));
            ui.end_row();
        });
        if ui.button("Add Exercise").clicked() {
            action = Some(Action::StageExercise);
        }
    });

    ui.add_space(10.0);
    ui.label(RichText::new("Current Exercises").size(24.0).strong());
    if form.staging.is_empty() {
        ui.label("Nothing added yet.");
    }
    for (idx, ex) in form.staging.iter().enumerate() {
        ui.label(format!(
            "{}. {} - {}x{}",
            idx + 1,
            ex.name,
            ex.target_sets,
            ex.target_reps
        ));
    }

    ui.add_space(10.0);
    if exists {
        ui.checkbox(&mut form.replace_existing, "Replace existing workout");
    }
    ui.horizontal(|ui| {
        if ui.button("Save Workout").clicked() {
            action = Some(Action::SaveNewWorkout);
        }
        if ui
            .add_enabled(!form.staging.is_empty(), egui::Button::new("Clear"))
            .clicked()
        {
            action = Some(Action::ClearStaging);
        }
    });

    action
}
