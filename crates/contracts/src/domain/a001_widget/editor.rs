//! Editing session behind every widget editor
//!
//! The editor works on a draft copy of the widget. Every edit replaces the
//! draft (the caller forwards it to `on_change`), `save` hands out the draft
//! only when it validates, `cancel` restores the widget the session was
//! opened with.

use super::aggregate::Widget;
use super::validation::validate_config;
use crate::shared::form::FormErrors;

#[derive(Debug, Clone, PartialEq)]
pub struct EditorSession {
    initial: Widget,
    draft: Widget,
    errors: FormErrors,
    submitted: bool,
}

impl EditorSession {
    pub fn new(initial: Widget) -> Self {
        Self {
            draft: initial.clone(),
            initial,
            errors: FormErrors::new(),
            submitted: false,
        }
    }

    pub fn draft(&self) -> &Widget {
        &self.draft
    }

    /// Errors of the last save attempt, kept current on later edits
    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn is_dirty(&self) -> bool {
        self.draft != self.initial
    }

    /// Apply `f` to a copy of the draft and make it the new draft.
    ///
    /// The kind of a widget is fixed for the session; an edit that swaps the
    /// properties for another kind is discarded.
    pub fn edit(&mut self, f: impl FnOnce(&mut Widget)) -> &Widget {
        let mut next = self.draft.clone();
        f(&mut next);
        if next.kind() != self.draft.kind() {
            log::warn!(
                "Discarded edit changing widget {} from {} to {}",
                self.draft.identity(),
                self.draft.kind(),
                next.kind()
            );
            return &self.draft;
        }
        self.draft = next;
        if self.submitted {
            self.errors = validate_config(&self.draft);
        }
        &self.draft
    }

    /// Validate the draft. On success the draft becomes the new baseline
    /// and is returned for persisting.
    pub fn save(&mut self) -> Result<Widget, FormErrors> {
        self.submitted = true;
        self.errors = validate_config(&self.draft);
        if !self.errors.is_empty() {
            log::debug!(
                "Widget {} has {} validation error(s)",
                self.draft.identity(),
                self.errors.count()
            );
            return Err(self.errors.clone());
        }
        self.initial = self.draft.clone();
        Ok(self.draft.clone())
    }

    /// Drop in-flight edits and return the widget as it was opened
    pub fn cancel(&mut self) -> Widget {
        self.draft = self.initial.clone();
        self.errors = FormErrors::new();
        self.submitted = false;
        self.initial.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_widget::aggregate::WidgetRecord;
    use crate::domain::a001_widget::properties::{NumericField, WidgetProperties};
    use crate::enums::WidgetKind;

    fn scale_widget() -> (Widget, String, String) {
        let mut widget = Widget::new(WidgetKind::Scale);
        widget.title = "Severity".into();
        let WidgetProperties::Scale(p) = &mut widget.properties else {
            unreachable!()
        };
        let p1 = p.add_option().unwrap();
        let p2 = p.add_option().unwrap();
        p.option_mut(&p1).unwrap().label = "Low".into();
        p.option_mut(&p2).unwrap().label = "High".into();
        p.set_default(&p1);
        (widget, p1, p2)
    }

    #[test]
    fn test_save_requires_valid_config() {
        let mut session = EditorSession::new(Widget::new(WidgetKind::Text));
        assert!(session.save().is_err());
        assert_eq!(session.errors().message("title"), Some("This field is required."));

        session.edit(|w| w.title = "Summary".into());
        assert!(session.errors().is_empty());
        let saved = session.save().unwrap();
        assert_eq!(saved.title, "Summary");
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_errors_stay_hidden_before_first_save() {
        let mut session = EditorSession::new(Widget::new(WidgetKind::Number));
        session.edit(|w| {
            if let WidgetProperties::Number(p) = &mut w.properties {
                p.min_value = Some(NumericField::Number(10.0));
                p.max_value = Some(NumericField::Number(5.0));
            }
        });
        assert!(session.errors().is_empty());
        assert!(session.save().is_err());
        assert_eq!(session.errors().non_field.len(), 1);
    }

    #[test]
    fn test_cancel_restores_initial() {
        let (widget, _, _) = scale_widget();
        let mut session = EditorSession::new(widget.clone());
        session.edit(|w| w.title = "Changed".into());
        assert!(session.is_dirty());
        assert_eq!(session.cancel(), widget);
        assert_eq!(session.draft(), &widget);
    }

    #[test]
    fn test_kind_change_is_discarded() {
        let mut session = EditorSession::new(Widget::new(WidgetKind::Text));
        session.edit(|w| w.properties = WidgetProperties::default_for(WidgetKind::Date));
        assert_eq!(session.draft().kind(), WidgetKind::Text);
    }

    #[test]
    fn test_scale_default_is_exclusive() {
        let (widget, p1, p2) = scale_widget();
        let mut session = EditorSession::new(widget);
        let draft = session.edit(|w| {
            if let WidgetProperties::Scale(p) = &mut w.properties {
                p.set_default(&p2);
            }
        });
        let WidgetProperties::Scale(p) = &draft.properties else {
            unreachable!()
        };
        let defaults: Vec<&str> = p
            .options
            .iter()
            .filter(|o| p.is_default(&o.key))
            .map(|o| o.key.as_str())
            .collect();
        assert_eq!(defaults, vec![p2.as_str()]);
        assert!(!p.is_default(&p1));
    }

    #[test]
    fn test_scale_default_is_exclusive_for_larger_sets() {
        let (mut widget, _, _) = scale_widget();
        let WidgetProperties::Scale(p) = &mut widget.properties else {
            unreachable!()
        };
        for _ in 0..5 {
            p.add_option();
        }
        let keys: Vec<String> = p.options.iter().map(|o| o.key.clone()).collect();
        for key in &keys {
            assert!(p.set_default(key));
            let count = p.options.iter().filter(|o| p.is_default(&o.key)).count();
            assert_eq!(count, 1);
        }
    }

    #[test]
    fn test_draft_round_trips_through_wire_record() {
        let mut session = EditorSession::new(Widget::new(WidgetKind::Matrix1d));
        let draft = session
            .edit(|w| {
                w.title = "Sectors".into();
                if let WidgetProperties::Matrix1d(p) = &mut w.properties {
                    let row = p.add_row().unwrap();
                    p.row_mut(&row).unwrap().label = "Row 1".into();
                    let cell = p.add_cell(&row).unwrap();
                    p.cell_mut(&row, &cell).unwrap().label = "Cell 1".into();
                }
            })
            .clone();

        let json = serde_json::to_value(draft.to_record()).unwrap();
        let record: WidgetRecord = serde_json::from_value(json).unwrap();
        let reloaded = EditorSession::new(Widget::try_from(record).unwrap());
        assert_eq!(reloaded.draft(), &draft);
        assert!(!reloaded.is_dirty());
    }
}
