pub mod catalog;
pub mod categories;
pub mod form;
pub mod identity;
pub mod media;
pub mod youtube;
