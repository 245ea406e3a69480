//! Command orchestration from reducer effects to the backend command queue.

use std::collections::VecDeque;

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

use super::{
    events::{Effect, Input, Prompt, SaveMode, UiEvent},
    reducer::reduce,
    state::ViewState,
};

/// Owns the view state and carries out reducer effects: requests go to the
/// backend queue, alerts and confirmations are parked for the renderer.
pub struct Controller {
    state: ViewState,
    cmd_tx: Sender<BackendCommand>,
    prompts: VecDeque<Prompt>,
}

impl Controller {
    pub fn new(cmd_tx: Sender<BackendCommand>) -> Self {
        Self {
            state: ViewState::default(),
            cmd_tx,
            prompts: VecDeque::new(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Oldest unresolved prompt; the renderer shows it until resolved.
    pub fn active_prompt(&self) -> Option<&Prompt> {
        self.prompts.front()
    }

    pub fn dismiss_prompt(&mut self) -> Option<Prompt> {
        self.prompts.pop_front()
    }

    pub fn handle(&mut self, input: impl Into<Input>) {
        let mut pending = VecDeque::from([input.into()]);
        while let Some(input) = pending.pop_front() {
            for effect in reduce(&mut self.state, input) {
                match effect {
                    Effect::Notify(message) => self.prompts.push_back(Prompt::Alert(message)),
                    Effect::Confirm { prompt, user_id } => {
                        self.prompts.push_back(Prompt::Confirm { prompt, user_id })
                    }
                    request => {
                        let Some(cmd) = command_for(request) else {
                            continue;
                        };
                        if let Err(failure) = dispatch_backend_command(&self.cmd_tx, cmd) {
                            pending.push_back(failure.into());
                        }
                    }
                }
            }
        }
    }
}

pub fn command_for(effect: Effect) -> Option<BackendCommand> {
    match effect {
        Effect::FetchUsers => Some(BackendCommand::ListUsers),
        Effect::CreateUser(fields) => Some(BackendCommand::CreateUser { fields }),
        Effect::UpdateUser { id, fields } => Some(BackendCommand::UpdateUser { id, fields }),
        Effect::DeleteUser(id) => Some(BackendCommand::DeleteUser { id }),
        Effect::Notify(_) | Effect::Confirm { .. } => None,
    }
}

/// Queues `cmd` for the worker. When the queue cannot take it, returns the
/// completion the reducer should see instead so `loading` is released.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), UiEvent> {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(cmd)) => {
            tracing::warn!(command = cmd_name, "backend command queue is full");
            Err(failed_completion(
                cmd,
                "UI command queue is full; please retry",
            ))
        }
        Err(TrySendError::Disconnected(cmd)) => {
            tracing::error!(command = cmd_name, "backend command processor disconnected");
            Err(failed_completion(
                cmd,
                "backend command processor disconnected; restart the application",
            ))
        }
    }
}

fn failed_completion(cmd: BackendCommand, message: &str) -> UiEvent {
    let message = message.to_string();
    match cmd {
        BackendCommand::ListUsers => UiEvent::UsersLoaded(Err(message)),
        BackendCommand::CreateUser { .. } => UiEvent::UserSaved {
            mode: SaveMode::Create,
            result: Err(message),
        },
        BackendCommand::UpdateUser { .. } => UiEvent::UserSaved {
            mode: SaveMode::Update,
            result: Err(message),
        },
        BackendCommand::DeleteUser { id } => UiEvent::UserDeleted {
            id,
            result: Err(message),
        },
    }
}

#[cfg(test)]
#[path = "tests/orchestration_tests.rs"]
mod tests;
