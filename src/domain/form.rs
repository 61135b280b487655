use super::*;

use super::contact::{Contact, ContactId, normalize_input};
use super::manager::ContactStore;
use super::view::FormView;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Add,
    /// Holds a copy of the contact being edited.
    Update(Contact),
}

impl FormMode {
    pub fn heading(&self) -> &'static str {
        match self {
            FormMode::Add => "Add Contact",
            FormMode::Update(_) => "Update Contact",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            FormMode::Add => "Add",
            FormMode::Update(_) => "Update",
        }
    }
}

/// The add/edit form state machine in front of a [`ContactStore`].
#[derive(Debug, Default)]
pub struct FormController {
    mode: FormMode,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Update(_))
    }

    pub fn begin_edit<'s>(
        &mut self,
        store: &'s ContactStore,
        id: &ContactId,
    ) -> Result<&'s Contact, AppError> {
        let contact = store
            .get(id)
            .ok_or_else(|| AppError::NotFound("Contact".to_string()))?;

        self.mode = FormMode::Update(contact.clone());
        debug!(%id, "editing contact");
        Ok(contact)
    }

    pub fn cancel(&mut self) {
        self.mode = FormMode::Add;
    }

    /// Trims the fields, then adds or updates depending on the mode. A
    /// rejected input keeps the edit open; any other outcome of an update
    /// ends it.
    pub fn submit(
        &mut self,
        store: &mut ContactStore,
        name: &str,
        phone: &str,
    ) -> Result<Contact, AppError> {
        let input = normalize_input(name, phone)?;

        let FormMode::Update(editing) = &self.mode else {
            return store.add(&input.name, &input.phone);
        };

        let result = store.update(&editing.id, &input.name, &input.phone);
        match &result {
            Err(AppError::Validation(_)) => {}
            _ => self.mode = FormMode::Add,
        }
        result
    }

    /// Removes `id` only if `confirm` agrees. Returns whether it was removed.
    pub fn remove<F>(
        &mut self,
        store: &mut ContactStore,
        id: &ContactId,
        confirm: F,
    ) -> Result<bool, AppError>
    where
        F: FnOnce(&Contact) -> bool,
    {
        let contact = store
            .get(id)
            .ok_or_else(|| AppError::NotFound("Contact".to_string()))?;

        if !confirm(contact) {
            return Ok(false);
        }

        if matches!(&self.mode, FormMode::Update(editing) if &editing.id == id) {
            self.mode = FormMode::Add;
        }

        store.remove(id)?;
        Ok(true)
    }

    pub fn view(&self) -> FormView {
        let (name, phone) = match &self.mode {
            FormMode::Add => (String::new(), String::new()),
            FormMode::Update(contact) => (contact.name.clone(), contact.phone.clone()),
        };

        FormView {
            heading: self.mode.heading(),
            submit_label: self.mode.submit_label(),
            name,
            phone,
        }
    }
}

pub fn remove_prompt(contact: &Contact) -> String {
    format!("remove {} ({})", contact.name, contact.phone)
}
