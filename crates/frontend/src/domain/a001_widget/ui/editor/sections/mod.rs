//! Property editors, one per widget kind

mod basic;
mod choice;
mod conditional;
mod matrix1d;
mod matrix2d;
mod organigram;
mod scale;

pub use basic::{DateRangeSection, GeoSection, NumberSection, SingleDefaultSection, TimeRangeSection};
pub use choice::ChoiceSection;
pub use conditional::ConditionalSection;
pub use matrix1d::Matrix1dSection;
pub use matrix2d::Matrix2dSection;
pub use organigram::OrganigramSection;
pub use scale::ScaleSection;

use contracts::domain::a001_widget::properties::*;
use contracts::domain::a001_widget::WidgetProperties;

macro_rules! pick {
    ($get:ident, $get_mut:ident, $variant:ident, $ty:ty) => {
        pub fn $get(p: &WidgetProperties) -> Option<&$ty> {
            match p {
                WidgetProperties::$variant(x) => Some(x),
                _ => None,
            }
        }

        pub fn $get_mut(p: &mut WidgetProperties) -> Option<&mut $ty> {
            match p {
                WidgetProperties::$variant(x) => Some(x),
                _ => None,
            }
        }
    };
}

pick!(number, number_mut, Number, NumberProperties);
pick!(date_range, date_range_mut, DateRange, DateRangeProperties);
pick!(time_range, time_range_mut, TimeRange, TimeRangeProperties);
pick!(scale, scale_mut, Scale, ScaleProperties);
pick!(select, select_mut, Select, SelectProperties);
pick!(multi_select, multi_select_mut, MultiSelect, MultiSelectProperties);
pick!(matrix1d, matrix1d_mut, Matrix1d, Matrix1dProperties);
pick!(matrix2d, matrix2d_mut, Matrix2d, Matrix2dProperties);
pick!(organigram, organigram_mut, Organigram, OrganigramProperties);

/// TEXT, DATE and TIME share a single string default
pub fn single_default(p: &WidgetProperties) -> Option<&BaseProperties<String>> {
    match p {
        WidgetProperties::Text(x) | WidgetProperties::Date(x) | WidgetProperties::Time(x) => Some(x),
        _ => None,
    }
}

pub fn single_default_mut(p: &mut WidgetProperties) -> Option<&mut BaseProperties<String>> {
    match p {
        WidgetProperties::Text(x) | WidgetProperties::Date(x) | WidgetProperties::Time(x) => Some(x),
        _ => None,
    }
}
