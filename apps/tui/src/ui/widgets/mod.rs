pub mod charts;
pub mod hints;
pub mod popup;
pub mod radar;
pub mod tables;
pub mod toast;
