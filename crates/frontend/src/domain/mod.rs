pub mod a001_widget;
pub mod a002_framework;
pub mod a003_mapping;
