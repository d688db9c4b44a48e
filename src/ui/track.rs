use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::app::{Action, AppState};
use crate::models::Session;
use crate::ui::workout_selector;

pub fn show(ui: &mut Ui, state: &mut AppState) -> Option<Action> {
    let AppState {
        collection,
        track,
        config,
        ..
    } = state;
    let mut action = None;

    ui.heading(RichText::new("Track Workout").size(32.0).strong());
    ui.add_space(10.0);

    if collection.total_workouts() == 0 {
        ui.colored_label(egui::Color32::YELLOW, "No workouts available");
        return None;
    }

    let names = collection.list_workout_names();
    if let Some(name) = workout_selector(ui, "Select Workout", &names, track.selected.as_deref()) {
        return Some(Action::SelectTrackWorkout(name));
    }
    let exercises = track.selected.as_deref().and_then(|n| collection.get(n))?;

    for (ex_idx, (exercise, entry)) in exercises.iter().zip(track.entries.iter_mut()).enumerate() {
        ui.add_space(15.0);
        ui.label(RichText::new(&exercise.name).size(24.0).strong());
        ui.label(format!(
            "Target: {} sets x {} reps",
            exercise.target_sets, exercise.target_reps
        ));

        let previous = exercise.recent_sessions(config.history_preview);
        if !previous.is_empty() {
            ui.collapsing(format!("Previous Results ({})", previous.len()), |ui| {
                for (session_idx, session) in previous.iter().enumerate() {
                    ui.label(format!("Session {}: {}", session_idx + 1, session.date));
                    ui.push_id((ex_idx, session_idx), |ui| session_table(ui, session));
                }
            });
        }

        egui::Grid::new(("track_sets", ex_idx))
            .num_columns(3)
            .show(ui, |ui| {
                for (set_idx, set) in entry.sets.iter_mut().enumerate() {
                    ui.label(format!("Set {}", set_idx + 1));
                    ui.add(
                        egui::DragValue::new(&mut set.reps)
                            .range(0..=200)
                            .prefix("reps "),
                    );
                    ui.add(
                        egui::DragValue::new(&mut set.weight)
                            .range(0.0..=1000.0)
                            .speed(0.5)
                            .suffix(" kg"),
                    );
                    ui.end_row();
                }
            });
    }

    ui.add_space(15.0);
    if ui.button("Save Tracking Data").clicked() {
        action = Some(Action::SaveSession);
    }
    action
}

fn session_table(ui: &mut Ui, session: &Session) {
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(40.0))
        .column(Column::auto().at_least(60.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Set");
            });
            header.col(|ui| {
                ui.strong("Reps");
            });
            header.col(|ui| {
                ui.strong("Weight");
            });
            header.col(|ui| {
                ui.strong("Volume");
            });
        })
        .body(|mut body| {
            for (idx, set) in session.sets.iter().enumerate() {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label((idx + 1).to_string());
                    });
                    row.col(|ui| {
                        ui.label(set.reps.to_string());
                    });
                    row.col(|ui| {
                        ui.label(format!("{} kg", set.weight));
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.1}", set.volume()));
                    });
                });
            }
        });
    ui.label(format!("Total volume: {:.1} kg", session.total_volume()));
}
