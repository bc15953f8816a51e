//! Application state and core logic

use crate::api::{ApiClient, ApiClientTrait, YesNoGate};
use crate::config::TuiConfig;
use crate::platform::SHORTCUT_MODIFIERS;
use crate::registration::{self, HOBBIES};
use crate::state::{focus_order, AppState, FieldPath, Focus, FormField, FormStore, HobbyEntry};
use crate::submit::{SubmitOutcome, Submitter};
use crate::validation::{
    RemoteFailurePolicy, Schema, ValidationErrors, ValidationMode, Validator,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::sync::Arc;

/// Main application struct
pub struct App {
    /// UI state (focus, status line)
    pub state: AppState,
    /// The form session
    pub store: FormStore,
    /// Scalar inputs in display order
    pub fields: Vec<FormField>,
    schema: Schema,
    submitter: Submitter,
    /// Set by a submit key; the event loop redraws before running it
    pending_submit: bool,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance talking to the configured endpoints
    pub fn new(config: &TuiConfig) -> Result<Self> {
        let client: Arc<dyn ApiClientTrait> = Arc::new(ApiClient::new(config)?);
        Ok(Self::with_client(client, config.remote_failure_policy()))
    }

    /// Create an App around any client implementation
    pub fn with_client(client: Arc<dyn ApiClientTrait>, policy: RemoteFailurePolicy) -> Self {
        let schema = registration::schema(Arc::new(YesNoGate::new(client.clone())));
        let validator = Validator::new(policy);
        tracing::debug!("Remote check failure policy: {:?}", validator.policy());
        Self {
            state: AppState::default(),
            store: registration::new_store(),
            fields: registration::fields(),
            schema,
            submitter: Submitter::new(client, validator),
            pending_submit: false,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// True while a submission is queued or running; the submit button is disabled
    pub fn is_busy(&self) -> bool {
        self.pending_submit || self.submitter.is_submitting()
    }

    pub fn has_pending_submit(&self) -> bool {
        self.pending_submit
    }

    pub fn focus_order(&self) -> Vec<Focus> {
        focus_order(&self.fields, self.store.values())
    }

    pub fn focus(&self) -> Focus {
        self.state.focus(&self.focus_order())
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Handle a key press
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // The global error dialog is modal
        if self.store.global_error().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.store.clear_global_error();
            }
            return Ok(());
        }

        let ctrl = key.modifiers.intersects(SHORTCUT_MODIFIERS);
        let focus = self.focus();

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.move_focus(true),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(false),
            KeyCode::Char('s') if ctrl => self.request_submit(),
            KeyCode::Char('a') if ctrl => self.add_hobby()?,
            KeyCode::Char('x') if ctrl => self.remove_focused_hobby()?,
            KeyCode::Char('r') if ctrl => self.reset(),
            KeyCode::Esc => self.quit = true,
            KeyCode::Enter => match focus {
                Focus::Submit => self.request_submit(),
                Focus::AddHobby => self.add_hobby()?,
                _ => self.move_focus(true),
            },
            KeyCode::Char(' ') | KeyCode::Right if self.is_toggle(&focus) => {
                self.toggle(&focus, true).await?
            }
            KeyCode::Left if self.is_toggle(&focus) => self.toggle(&focus, false).await?,
            KeyCode::Char(c) if !ctrl => self.input_char(&focus, c).await?,
            KeyCode::Backspace => self.backspace(&focus).await?,
            _ => {}
        }
        Ok(())
    }

    fn move_focus(&mut self, forward: bool) {
        let order = self.focus_order();
        let leaving = self.state.focus(&order);
        self.store.touch(leaving.touched_name());
        if forward {
            self.state.next_focus(order.len());
        } else {
            self.state.prev_focus(order.len());
        }
    }

    fn is_toggle(&self, focus: &Focus) -> bool {
        match focus {
            Focus::Field(name) => self.field(name).is_some_and(|f| !f.accepts_text()),
            Focus::HobbyLevel(_) => true,
            _ => false,
        }
    }

    async fn toggle(&mut self, focus: &Focus, forward: bool) -> Result<()> {
        match focus {
            Focus::Field(name) => {
                let current = self.store.value(name).cloned().unwrap_or_default();
                let next = self.field(name).and_then(|f| f.toggled(&current, forward));
                if let Some(next) = next {
                    self.store.set_value(name, next)?;
                    self.revalidate(name).await;
                }
            }
            Focus::HobbyLevel(index) => {
                let Some(entry) = self.store.values().list(HOBBIES).get(*index) else {
                    return Ok(());
                };
                let level = if forward {
                    entry.level.next()
                } else {
                    entry.level.prev()
                };
                self.store.list(HOBBIES).set_level(*index, level)?;
                self.revalidate(HOBBIES).await;
            }
            _ => {}
        }
        Ok(())
    }

    async fn input_char(&mut self, focus: &Focus, c: char) -> Result<()> {
        match focus {
            Focus::Field(name) if self.field(name).is_some_and(FormField::accepts_text) => {
                self.store.update(name, |v| v.push_char(c))?;
                self.revalidate(name).await;
            }
            Focus::HobbyValue(index) => {
                self.store.list(HOBBIES).update_value(*index, |v| v.push(c))?;
                self.revalidate(HOBBIES).await;
            }
            _ => {}
        }
        Ok(())
    }

    async fn backspace(&mut self, focus: &Focus) -> Result<()> {
        match focus {
            Focus::Field(name) if self.field(name).is_some_and(FormField::accepts_text) => {
                self.store.update(name, |v| v.pop_char())?;
                self.revalidate(name).await;
            }
            Focus::HobbyValue(index) => {
                self.store.list(HOBBIES).update_value(*index, |v| {
                    v.pop();
                })?;
                self.revalidate(HOBBIES).await;
            }
            _ => {}
        }
        Ok(())
    }

    fn add_hobby(&mut self) -> Result<()> {
        let index = self.store.list(HOBBIES).append(HobbyEntry::default())?;
        let order = self.focus_order();
        self.state.set_focus(&order, &Focus::HobbyValue(index));
        Ok(())
    }

    fn remove_focused_hobby(&mut self) -> Result<()> {
        let Some(index) = self.focus().hobby_index() else {
            return Ok(());
        };
        let mut list = self.store.list(HOBBIES);
        let removed = list.remove_at(index)?;
        tracing::debug!("Removed hobby {:?}", removed.value);
        let target = if list.is_empty() {
            Focus::AddHobby
        } else {
            Focus::HobbyValue(index.min(list.len() - 1))
        };

        let order = self.focus_order();
        self.state.set_focus(&order, &target);
        Ok(())
    }

    fn reset(&mut self) {
        self.store.reset_to_defaults();
        self.state.focus_index = 0;
        self.state.status_message = Some("Formulaire réinitialisé".to_string());
    }

    /// Re-run local rules after an edit, once the user has tried to submit.
    ///
    /// Errors from async rules cannot be recomputed locally, so they are kept
    /// for fields other than the one just edited.
    async fn revalidate(&mut self, edited: &str) {
        if self.store.submit_count() == 0 {
            return;
        }
        let snapshot = self.store.snapshot();
        let local = self
            .submitter
            .validator()
            .validate(&self.schema, &snapshot, ValidationMode::Local)
            .await;

        let mut errors: ValidationErrors = local.errors;
        if !self.schema.has_async_rules() {
            self.store.set_errors(errors);
            return;
        }
        for (path, error) in self.store.errors().iter() {
            let remote_only = path.root() != edited
                && errors.get(path).is_none()
                && self
                    .schema
                    .rules_for(path.root())
                    .is_some_and(|rules| rules.iter().any(|r| r.is_async()));
            if remote_only {
                errors.insert(path.clone(), error.clone());
            }
        }
        self.store.set_errors(errors);
    }

    fn request_submit(&mut self) {
        if self.is_busy() {
            return;
        }
        self.pending_submit = true;
        self.state.status_message = Some("Envoi en cours…".to_string());
    }

    /// Run a submission queued by [`App::handle_key`]
    pub async fn run_pending_submit(&mut self) {
        if !std::mem::take(&mut self.pending_submit) {
            return;
        }

        let outcome = self.submitter.submit(&mut self.store, &self.schema).await;
        self.state.status_message = match outcome {
            SubmitOutcome::Busy => None,
            SubmitOutcome::Invalid(count) => {
                self.focus_first_error();
                Some(format!("{count} erreur(s) à corriger"))
            }
            SubmitOutcome::Created(user) => {
                self.state.focus_index = 0;
                Some(format!("Inscription réussie (id {})", user.display_id()))
            }
            // Shown by the error dialog
            SubmitOutcome::Failed(_) => None,
        };
    }

    fn focus_first_error(&mut self) {
        let order = self.focus_order();
        let errors = self.store.errors();
        let first = order.iter().find(|focus| {
            let path = match focus {
                Focus::Field(name) => FieldPath::field(name),
                Focus::HobbyValue(i) => FieldPath::item(HOBBIES, *i, "value"),
                Focus::HobbyLevel(i) => FieldPath::item(HOBBIES, *i, "level"),
                Focus::AddHobby | Focus::Submit => return false,
            };
            errors.get(&path).is_some()
        });
        if let Some(target) = first.cloned() {
            self.state.set_focus(&order, &target);
        }
    }
}
