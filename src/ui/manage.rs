use eframe::egui::{self, Color32, RichText, Ui};

use crate::app::{Action, AppState};
use crate::ui::workout_selector;

pub fn show(ui: &mut Ui, state: &mut AppState) -> Option<Action> {
    let AppState {
        collection, edit, ..
    } = state;
    let mut action = None;

    ui.heading(RichText::new("Manage Workouts").size(32.0).strong());
    ui.add_space(10.0);

    if collection.total_workouts() == 0 {
        ui.colored_label(Color32::YELLOW, "No workouts available");
        return None;
    }

    let names = collection.list_workout_names();
    if let Some(name) = workout_selector(
        ui,
        "Select Workout to Edit",
        &names,
        edit.selected.as_deref(),
    ) {
        return Some(Action::SelectEditWorkout(name));
    }

    ui.horizontal(|ui| {
        ui.label("New Workout Name");
        ui.text_edit_singleline(&mut edit.new_name);
    });

    ui.add_space(10.0);
    ui.label(RichText::new("Edit Exercises").size(24.0).strong());
    egui::Grid::new("edit_exercises")
        .num_columns(3)
        .striped(true)
        .show(ui, |ui| {
            ui.strong("Exercise");
            ui.strong("Sets");
            ui.strong("Reps");
            ui.end_row();
            for row in edit.rows.iter_mut() {
                ui.text_edit_singleline(&mut row.name);
                ui.add(egui::DragValue::new(&mut row.sets).range(1..=50));
                ui.add(egui::DragValue::new(&mut row.reps).range(1..=100));
                ui.end_row();
            }
        });

    ui.horizontal(|ui| {
        if ui.button("Add Exercise").clicked() {
            action = Some(Action::AddEditRow);
        }
        if ui
            .add_enabled(!edit.rows.is_empty(), egui::Button::new("Remove Last"))
            .clicked()
        {
            action = Some(Action::RemoveLastEditRow);
        }
    });

    ui.add_space(15.0);
    if ui.button("Save Changes").clicked() {
        action = Some(Action::SaveEdits);
    }

    ui.add_space(15.0);
    ui.separator();
    ui.horizontal(|ui| {
        ui.checkbox(&mut edit.confirm_delete, "Confirm delete");
        let delete = egui::Button::new(RichText::new("❌ Delete Workout").color(Color32::WHITE))
            .fill(Color32::from_rgb(220, 53, 69));
        if ui.add_enabled(edit.confirm_delete, delete).clicked() {
            action = Some(Action::DeleteWorkout);
        }
    });

    action
}
