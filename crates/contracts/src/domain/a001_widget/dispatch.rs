use serde::{Deserialize, Serialize};

use crate::enums::WidgetKind;

/// How a widget is shown: configured (`Edit`) or filled in (`View`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetMode {
    Edit,
    #[default]
    View,
}

/// Component family selected for a widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetSurface {
    Editor(WidgetKind),
    Input(WidgetKind),
}

impl WidgetSurface {
    pub fn kind(&self) -> WidgetKind {
        match self {
            WidgetSurface::Editor(kind) | WidgetSurface::Input(kind) => *kind,
        }
    }
}

/// Select the surface for a widget tag. Tags this build does not know
/// yield `None` and render nothing.
pub fn dispatch(widget_id: &str, mode: WidgetMode) -> Option<WidgetSurface> {
    let kind = WidgetKind::from_code(widget_id)?;
    Some(match mode {
        WidgetMode::Edit => WidgetSurface::Editor(kind),
        WidgetMode::View => WidgetSurface::Input(kind),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_dispatches_by_mode() {
        for kind in WidgetKind::all() {
            assert_eq!(
                dispatch(kind.code(), WidgetMode::Edit),
                Some(WidgetSurface::Editor(kind))
            );
            assert_eq!(
                dispatch(kind.code(), WidgetMode::View),
                Some(WidgetSurface::Input(kind))
            );
        }
    }

    #[test]
    fn test_unknown_kind_renders_nothing() {
        assert_eq!(dispatch("UNKNOWN_KIND", WidgetMode::Edit), None);
        assert_eq!(dispatch("UNKNOWN_KIND", WidgetMode::View), None);
        assert_eq!(dispatch("", WidgetMode::View), None);
        assert_eq!(dispatch("matrix1d", WidgetMode::View), None);
    }
}
