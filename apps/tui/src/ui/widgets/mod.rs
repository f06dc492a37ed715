pub mod charts;
pub mod map;
pub mod popup;
pub mod sidebar;
pub mod tables;
pub mod toast;
