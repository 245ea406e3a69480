//! eframe application shell: header, error banner, user table, form window, and prompts.

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::FormField;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{Controller, Prompt, UiAction, UiEvent, ViewState};
use crate::ui::view_model::{
    controls_enabled, error_banner, field_hint, field_label, list_heading, list_view,
    modal_title, submit_label, ListView, APP_SUBTITLE, APP_TITLE, COLUMN_HEADERS, LOADING_TEXT,
};

pub struct UserAdminApp {
    controller: Controller,
    ui_rx: Receiver<UiEvent>,
    mounted: bool,
}

impl UserAdminApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            controller: Controller::new(cmd_tx),
            ui_rx,
            mounted: false,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.controller.handle(event);
        }
    }

    fn show_header(ui: &mut egui::Ui) {
        ui.add_space(8.0);
        ui.heading(APP_TITLE);
        ui.label(egui::RichText::new(APP_SUBTITLE).weak());
        ui.add_space(8.0);
    }

    fn show_error_banner(state: &ViewState, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        let Some(message) = error_banner(state) else {
            return;
        };
        egui::Frame::group(ui.style())
            .fill(egui::Color32::from_rgb(111, 53, 53))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(
                        egui::RichText::new(format!("Error: {message}"))
                            .color(egui::Color32::WHITE),
                    );
                    if ui
                        .add_enabled(controls_enabled(state), egui::Button::new("Reintentar"))
                        .clicked()
                    {
                        actions.push(UiAction::Retry);
                    }
                });
            });
        ui.add_space(8.0);
    }

    fn show_user_table(state: &ViewState, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        let enabled = controls_enabled(state);

        ui.horizontal(|ui| {
            ui.heading(list_heading(state));
            if state.loading {
                ui.label(egui::RichText::new("(Cargando...)").weak());
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add_enabled(enabled, egui::Button::new("+ Agregar Usuario"))
                    .clicked()
                {
                    actions.push(UiAction::OpenAdd);
                }
            });
        });
        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("users_table")
                .num_columns(COLUMN_HEADERS.len())
                .striped(true)
                .spacing([24.0, 8.0])
                .show(ui, |ui| {
                    for header in COLUMN_HEADERS {
                        ui.strong(header);
                    }
                    ui.end_row();

                    match list_view(state) {
                        ListView::Loading => {
                            ui.horizontal(|ui| {
                                ui.spinner();
                                ui.label(LOADING_TEXT);
                            });
                            ui.end_row();
                        }
                        ListView::Empty(message) => {
                            ui.label(egui::RichText::new(message).weak());
                            ui.end_row();
                        }
                        ListView::Rows(users) => {
                            for user in users {
                                ui.label(user.fullname.as_str());
                                ui.label(user.email.as_str());
                                ui.label(user.phone.as_str());
                                ui.horizontal(|ui| {
                                    if ui.add_enabled(enabled, egui::Button::new("Editar")).clicked()
                                    {
                                        actions.push(UiAction::OpenEdit(user.clone()));
                                    }
                                    if ui
                                        .add_enabled(enabled, egui::Button::new("Eliminar"))
                                        .clicked()
                                    {
                                        actions.push(UiAction::RequestDelete(user.id.clone()));
                                    }
                                });
                                ui.end_row();
                            }
                        }
                    }
                });
        });
    }

    fn show_form_window(state: &ViewState, ctx: &egui::Context, actions: &mut Vec<UiAction>) {
        if !state.is_modal_open {
            return;
        }
        let enabled = controls_enabled(state);

        egui::Window::new(modal_title(state))
            .id(egui::Id::new("user_form_window"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                for field in FormField::ALL {
                    ui.label(field_label(field));
                    let mut value = state.form_data.get(field).to_string();
                    let response = ui.add_enabled(
                        enabled,
                        egui::TextEdit::singleline(&mut value)
                            .id_salt(field.name())
                            .hint_text(field_hint(field)),
                    );
                    if response.changed() {
                        actions.push(UiAction::FieldChanged { field, value });
                    }
                    ui.add_space(4.0);
                }
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.add_enabled(enabled, egui::Button::new("Cancelar")).clicked() {
                        actions.push(UiAction::CloseModal);
                    }
                    if ui
                        .add_enabled(enabled, egui::Button::new(submit_label(state)))
                        .clicked()
                    {
                        actions.push(UiAction::Submit);
                    }
                    if !enabled {
                        ui.spinner();
                    }
                });
            });
    }

    /// Alerts and confirmations are modal: nothing behind them takes input.
    fn show_prompt(&mut self, ctx: &egui::Context) -> Option<UiAction> {
        let prompt = self.controller.active_prompt()?.clone();
        let mut resolution: Option<Option<UiAction>> = None;

        let response = egui::Modal::new(egui::Id::new("blocking_prompt")).show(ctx, |ui| {
            ui.set_max_width(360.0);
            match &prompt {
                Prompt::Alert(message) => {
                    ui.label(message.as_str());
                    ui.add_space(8.0);
                    if ui.button("Aceptar").clicked() {
                        resolution = Some(None);
                    }
                }
                Prompt::Confirm { prompt, user_id } => {
                    ui.label(prompt.as_str());
                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        if ui.button("Cancelar").clicked() {
                            resolution = Some(Some(UiAction::DeleteDeclined));
                        }
                        if ui.button("Aceptar").clicked() {
                            resolution = Some(Some(UiAction::DeleteConfirmed(user_id.clone())));
                        }
                    });
                }
            }
        });

        if resolution.is_none() && response.should_close() {
            resolution = Some(match prompt {
                Prompt::Alert(_) => None,
                Prompt::Confirm { .. } => Some(UiAction::DeleteDeclined),
            });
        }

        let action = resolution?;
        self.controller.dismiss_prompt();
        action
    }
}

impl eframe::App for UserAdminApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.mounted {
            self.mounted = true;
            self.controller.handle(UiAction::Mount);
        }
        self.process_ui_events();

        let mut actions = Vec::new();
        let state = self.controller.state();

        egui::TopBottomPanel::top("header").show(ctx, Self::show_header);
        egui::CentralPanel::default().show(ctx, |ui| {
            Self::show_error_banner(state, ui, &mut actions);
            Self::show_user_table(state, ui, &mut actions);
        });
        Self::show_form_window(state, ctx, &mut actions);

        if let Some(action) = self.show_prompt(ctx) {
            actions.push(action);
        }

        for action in actions {
            self.controller.handle(action);
        }
    }
}
