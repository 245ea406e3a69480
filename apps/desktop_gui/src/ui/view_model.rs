//! Rendering rules derived from [`ViewState`]; nothing here is stored.

use shared::domain::{FormField, User};

use crate::controller::ViewState;

pub const APP_TITLE: &str = "SGU - Sistema de Gestión de Usuarios";
pub const APP_SUBTITLE: &str = "CRUD de usuarios para gestionar información personal";
pub const LOADING_TEXT: &str = "Cargando usuarios...";
pub const EMPTY_AFTER_ERROR: &str = "Error al cargar usuarios";
pub const EMPTY_NO_USERS: &str = "No hay usuarios registrados";
pub const COLUMN_HEADERS: [&str; 4] = [
    "Nombre Completo",
    "Correo Electrónico",
    "Número de Teléfono",
    "Acciones",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListView<'a> {
    Loading,
    Rows(&'a [User]),
    Empty(&'static str),
}

pub fn list_view(state: &ViewState) -> ListView<'_> {
    if state.loading {
        ListView::Loading
    } else if state.users.is_empty() {
        ListView::Empty(if state.error.is_some() {
            EMPTY_AFTER_ERROR
        } else {
            EMPTY_NO_USERS
        })
    } else {
        ListView::Rows(&state.users)
    }
}

pub fn list_heading(state: &ViewState) -> String {
    format!("Lista de Usuarios ({})", state.users.len())
}

/// Add/edit/delete buttons, form inputs, and modal buttons share this gate.
pub fn controls_enabled(state: &ViewState) -> bool {
    !state.loading
}

pub fn error_banner(state: &ViewState) -> Option<&str> {
    state.error.as_deref()
}

pub fn modal_title(state: &ViewState) -> &'static str {
    if state.is_editing {
        "Editar Usuario"
    } else {
        "Agregar Nuevo Usuario"
    }
}

pub fn submit_label(state: &ViewState) -> &'static str {
    match (state.loading, state.is_editing) {
        (true, true) => "Actualizando...",
        (true, false) => "Agregando...",
        (false, true) => "Actualizar",
        (false, false) => "Agregar",
    }
}

pub fn field_label(field: FormField) -> &'static str {
    match field {
        FormField::Fullname => "Nombre Completo *",
        FormField::Email => "Correo Electrónico *",
        FormField::Phone => "Número de Teléfono *",
    }
}

pub fn field_hint(field: FormField) -> &'static str {
    match field {
        FormField::Fullname => "Ej. Juan Pérez García",
        FormField::Email => "Ej. juan.perez@email.com",
        FormField::Phone => "Ej. 555-0123",
    }
}

#[cfg(test)]
#[path = "tests/view_model_tests.rs"]
mod tests;
