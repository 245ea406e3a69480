//! Reducer-like state transitions for the user list page.
//!
//! [`reduce`] is the only place [`ViewState`] changes. It never performs I/O:
//! requests, alerts, and confirmations come back as [`Effect`]s for the
//! orchestration layer to carry out.

use shared::protocol::ApiResult;
use tracing::{debug, error, warn};

use super::{
    events::{Effect, Input, SaveMode, UiAction, UiEvent},
    state::ViewState,
};

pub const MSG_FIELDS_REQUIRED: &str = "Todos los campos son obligatorios";
pub const MSG_CREATED: &str = "Usuario creado exitosamente";
pub const MSG_UPDATED: &str = "Usuario actualizado exitosamente";
pub const MSG_DELETED: &str = "Usuario eliminado exitosamente";
pub const MSG_CONFIRM_DELETE: &str = "¿Estás seguro de que quieres eliminar este usuario?";

const PREFIX_LOAD_FAILED: &str = "Error al cargar usuarios";
const PREFIX_CREATE_FAILED: &str = "Error al crear usuario";
const PREFIX_UPDATE_FAILED: &str = "Error al actualizar usuario";
const PREFIX_DELETE_FAILED: &str = "Error al eliminar usuario";

pub fn reduce(state: &mut ViewState, input: impl Into<Input>) -> Vec<Effect> {
    match input.into() {
        Input::Action(action) => reduce_action(state, action),
        Input::Event(event) => reduce_event(state, event),
    }
}

fn reduce_action(state: &mut ViewState, action: UiAction) -> Vec<Effect> {
    // Single-slot in-flight guard: nothing new starts until the pending request settles.
    if state.loading {
        debug!(?action, "ignoring ui action while a request is in flight");
        return Vec::new();
    }

    match action {
        UiAction::Mount | UiAction::Retry => start_load(state),
        UiAction::OpenAdd => {
            state.open_modal(None);
            Vec::new()
        }
        UiAction::OpenEdit(user) => {
            state.open_modal(Some(user));
            Vec::new()
        }
        UiAction::CloseModal => {
            state.close_modal();
            Vec::new()
        }
        UiAction::FieldChanged { field, value } => {
            state.form_data.set(field, value);
            Vec::new()
        }
        UiAction::Submit => submit(state),
        UiAction::RequestDelete(user_id) => vec![Effect::Confirm {
            prompt: MSG_CONFIRM_DELETE.to_string(),
            user_id,
        }],
        UiAction::DeleteConfirmed(user_id) => {
            state.begin_request();
            vec![Effect::DeleteUser(user_id)]
        }
        UiAction::DeleteDeclined => Vec::new(),
    }
}

fn start_load(state: &mut ViewState) -> Vec<Effect> {
    state.begin_load();
    vec![Effect::FetchUsers]
}

fn submit(state: &mut ViewState) -> Vec<Effect> {
    if !state.is_modal_open {
        debug!("ignoring submit with no open form");
        return Vec::new();
    }
    if !state.form_data.is_complete() {
        return vec![Effect::Notify(MSG_FIELDS_REQUIRED.to_string())];
    }

    let fields = state.form_data.clone();
    if !state.is_editing {
        state.begin_request();
        return vec![Effect::CreateUser(fields)];
    }

    match state.current_user.as_ref() {
        Some(user) => {
            let id = user.id.clone();
            state.begin_request();
            vec![Effect::UpdateUser { id, fields }]
        }
        None => {
            error!("edit form submitted without a selected user");
            vec![Effect::Notify(format!(
                "{PREFIX_UPDATE_FAILED}: no hay usuario seleccionado"
            ))]
        }
    }
}

fn reduce_event(state: &mut ViewState, event: UiEvent) -> Vec<Effect> {
    if !state.loading {
        warn!(?event, "request completed with no request in flight");
    }
    state.loading = false;

    match event {
        UiEvent::UsersLoaded(Ok(envelope)) => {
            match envelope.into_outcome() {
                Ok(Some(users)) => state.users = users,
                Ok(None) => {
                    warn!("list reply reported success without data; showing empty list");
                    state.users = Vec::new();
                }
                Err(message) => state.error = Some(message),
            }
            Vec::new()
        }
        UiEvent::UsersLoaded(Err(message)) => {
            error!("Error loading users: {message}");
            state.error = Some(format!("{PREFIX_LOAD_FAILED}: {message}"));
            Vec::new()
        }
        UiEvent::UserSaved { mode, result } => {
            let (done, failed) = match mode {
                SaveMode::Create => (MSG_CREATED, PREFIX_CREATE_FAILED),
                SaveMode::Update => (MSG_UPDATED, PREFIX_UPDATE_FAILED),
            };
            settle_mutation(state, result, done, failed, true)
        }
        UiEvent::UserDeleted { id, result } => {
            debug!(%id, "delete settled");
            settle_mutation(state, result, MSG_DELETED, PREFIX_DELETE_FAILED, false)
        }
    }
}

/// Shared tail of create/update/delete: confirm, optionally close the form,
/// and refetch the list; or surface the failure and leave state as it was.
fn settle_mutation<T>(
    state: &mut ViewState,
    result: Result<ApiResult<T>, String>,
    done: &str,
    failed_prefix: &str,
    closes_modal: bool,
) -> Vec<Effect> {
    match result {
        Ok(envelope) => match envelope.into_outcome() {
            Ok(_) => {
                if closes_modal {
                    state.close_modal();
                }
                let mut effects = vec![Effect::Notify(done.to_string())];
                effects.extend(start_load(state));
                effects
            }
            Err(message) => vec![Effect::Notify(format!("Error: {message}"))],
        },
        Err(message) => {
            error!("{failed_prefix}: {message}");
            vec![Effect::Notify(format!("{failed_prefix}: {message}"))]
        }
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
