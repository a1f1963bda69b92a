/// UI module exports
pub mod components;
pub mod owl;
pub mod popup;
