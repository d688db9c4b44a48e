//! egui front end. Each view renders from [`AppState`] and returns at most one
//! [`Action`] per frame; the window applies it through the dispatcher.

use chrono::Local;
use eframe::{egui, App, CreationContext, Frame};
use egui::{Color32, RichText, ScrollArea, Ui};

use crate::app::{Action, AppState, Notice, View};

mod create;
mod dashboard;
mod manage;
mod track;

/// Routes the current view to its render function.
pub fn render_view(ui: &mut Ui, state: &mut AppState) -> Option<Action> {
    match state.view {
        View::Dashboard => dashboard::show(ui, state),
        View::CreateWorkout => create::show(ui, state),
        View::TrackWorkout => track::show(ui, state),
        View::ManageWorkouts => manage::show(ui, state),
    }
}

pub struct WorkoutApp {
    state: AppState,
}

impl WorkoutApp {
    pub fn new(cc: &CreationContext, state: AppState) -> Self {
        let mut style = (*cc.egui_ctx.style()).clone();
        style.text_styles.insert(
            egui::TextStyle::Body,
            egui::FontId::new(18.0, egui::FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Button,
            egui::FontId::new(18.0, egui::FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Heading,
            egui::FontId::new(28.0, egui::FontFamily::Proportional),
        );
        cc.egui_ctx.set_style(style);

        WorkoutApp { state }
    }
}

impl App for WorkoutApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let mut action = None;

        egui::SidePanel::left("navigation")
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(10.0);
                ui.heading("Navigation");
                ui.add_space(10.0);
                for view in View::ALL {
                    if ui
                        .selectable_label(self.state.view == view, view.title())
                        .clicked()
                    {
                        action = Some(Action::Navigate(view));
                    }
                }
            });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                match &self.state.notice {
                    Some(Notice::Success(message)) => {
                        ui.colored_label(Color32::GREEN, message.as_str());
                    }
                    Some(Notice::Error(message)) => {
                        ui.colored_label(Color32::RED, message.as_str());
                    }
                    None => {}
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        RichText::new(self.state.collection.store().path().display().to_string())
                            .weak()
                            .small(),
                    );
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                ui.set_width(ui.available_width());
                if let Some(requested) = render_view(ui, &mut self.state) {
                    action = Some(requested);
                }
            });
        });

        if let Some(action) = action {
            self.state.dispatch(action, Local::now().naive_local());
        }
    }
}

pub(crate) fn workout_selector(
    ui: &mut Ui,
    label: &str,
    names: &[String],
    selected: Option<&str>,
) -> Option<String> {
    let mut picked = None;
    egui::ComboBox::from_label(label)
        .selected_text(selected.unwrap_or("-"))
        .show_ui(ui, |ui| {
            for name in names {
                let is_selected = selected == Some(name.as_str());
                if ui.selectable_label(is_selected, name.as_str()).clicked() && !is_selected {
                    picked = Some(name.clone());
                }
            }
        });
    picked
}
