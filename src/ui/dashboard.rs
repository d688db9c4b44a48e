use eframe::egui::{self, RichText, Ui};

use crate::app::{Action, AppState, View};

pub fn show(ui: &mut Ui, state: &mut AppState) -> Option<Action> {
    let collection = &state.collection;
    let mut action = None;

    ui.heading(RichText::new("🏋 Workout Dashboard").size(32.0).strong());
    ui.add_space(10.0);

    ui.columns(3, |cols| {
        metric(&mut cols[0], "Total Workouts", collection.total_workouts());
        metric(&mut cols[1], "Total Exercises", collection.total_exercises());
        metric(&mut cols[2], "Sessions Logged", collection.total_sessions());
    });

    ui.add_space(20.0);
    ui.label(RichText::new("Recent Workouts").size(24.0).strong());
    let recent = collection.recent_workout_names(state.config.recent_count);
    if recent.is_empty() {
        ui.label("No workouts yet!");
    } else {
        for name in recent {
            ui.label(format!("🏋 {name}"));
        }
    }

    ui.add_space(20.0);
    ui.label(RichText::new("Quick Actions").size(24.0).strong());
    if ui.button("Create New Workout").clicked() {
        action = Some(Action::Navigate(View::CreateWorkout));
    }

    action
}

fn metric(ui: &mut Ui, label: &str, value: usize) {
    ui.vertical(|ui| {
        ui.label(label);
        ui.label(
            RichText::new(value.to_string())
                .size(40.0)
                .color(egui::Color32::LIGHT_BLUE)
                .strong(),
        );
    });
}
