pub(crate) mod ambient;
pub(crate) mod drift;
pub(crate) mod field;
pub(crate) mod interaction;
pub(crate) mod reveal;
pub(crate) mod scroll;
pub(crate) mod style;
