use contracts::domain::a001_widget::{EditorSession, Widget, WidgetProperties};
use contracts::shared::form::{FieldError, Lens};
use leptos::prelude::*;

/// Picks the typed properties of one kind out of the closed sum
pub type PickProps<T> = fn(&WidgetProperties) -> Option<&T>;
pub type PickPropsMut<T> = fn(&mut WidgetProperties) -> Option<&mut T>;

/// ViewModel behind every widget editor
#[derive(Clone, Copy)]
pub struct WidgetEditorViewModel {
    pub session: RwSignal<EditorSession>,
    on_change: Callback<Widget>,
}

impl WidgetEditorViewModel {
    pub fn new(initial: Widget, on_change: Callback<Widget>) -> Self {
        Self {
            session: RwSignal::new(EditorSession::new(initial)),
            on_change,
        }
    }

    pub fn with_draft<R>(&self, f: impl FnOnce(&Widget) -> R) -> R {
        self.session.with(|s| f(s.draft()))
    }

    /// Tracked copy of one draft field
    pub fn field<T: Clone>(&self, lens: Lens<Widget, T>) -> T {
        self.with_draft(|w| lens.get(w).clone())
    }

    pub fn set_field<T>(&self, lens: Lens<Widget, T>, value: T) {
        self.edit(move |w| *lens.get_mut(w) = value);
    }

    /// Apply an edit to the draft and report the new draft
    pub fn edit(&self, f: impl FnOnce(&mut Widget)) {
        let mut changed = None;
        self.session.update(|s| {
            let before = s.draft().clone();
            let after = s.edit(f);
            if *after != before {
                changed = Some(after.clone());
            }
        });
        if let Some(widget) = changed {
            self.on_change.run(widget);
        }
    }

    /// Edit the properties of the draft's kind; other kinds are left alone
    pub fn edit_props<T>(&self, pick: PickPropsMut<T>, f: impl FnOnce(&mut T)) {
        self.edit(|w| {
            if let Some(props) = pick(Widget::properties_lens().get_mut(w)) {
                f(props);
            }
        });
    }

    /// Tracked copy of the draft's typed properties
    pub fn props<T: Clone + Default>(&self, pick: PickProps<T>) -> T {
        self.with_draft(|w| pick(Widget::properties_lens().get(w)).cloned().unwrap_or_default())
    }

    /// Tracked read of the draft's typed properties
    pub fn read<T, R: Default>(&self, pick: PickProps<T>, f: impl FnOnce(&T) -> R) -> R {
        self.with_draft(|w| pick(Widget::properties_lens().get(w)).map(f).unwrap_or_default())
    }

    /// Message at a path of the last save's errors, e.g. `["properties", "minValue"]`
    pub fn error(&self, path: &[&str]) -> Option<String> {
        self.session.with(|s| match s.errors().at(path) {
            Some(FieldError::Message(m)) => Some(m.clone()),
            _ => None,
        })
    }

    /// Object-level messages at a path; an empty path gives the form's own
    pub fn non_field_errors(&self, path: &[&str]) -> Vec<String> {
        self.session.with(|s| {
            let mut errors = s.errors();
            for name in path {
                match errors.nested(name) {
                    Some(nested) => errors = nested,
                    None => return Vec::new(),
                }
            }
            errors.non_field.clone()
        })
    }

    pub fn has_errors(&self) -> bool {
        self.session.with(|s| !s.errors().is_empty())
    }

    pub fn is_dirty(&self) -> bool {
        self.session.with(|s| s.is_dirty())
    }

    /// Validate; a valid draft goes to `on_save`, an invalid one stays with its errors shown
    pub fn save_command(&self, on_save: Callback<Widget>) {
        let mut result = None;
        self.session.update(|s| result = Some(s.save()));
        match result {
            Some(Ok(widget)) => on_save.run(widget),
            Some(Err(errors)) => log::debug!(
                "Save blocked: {}",
                errors.first_message().unwrap_or_default()
            ),
            None => {}
        }
    }

    /// Drop in-flight edits; the owner keeps its last saved widget
    pub fn cancel_command(&self, on_cancel: Callback<()>) {
        self.session.update(|s| {
            s.cancel();
        });
        on_cancel.run(());
    }
}
