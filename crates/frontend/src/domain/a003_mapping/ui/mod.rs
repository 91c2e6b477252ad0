pub mod tagging;
