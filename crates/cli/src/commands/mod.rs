pub mod input;
pub mod inspect;
pub mod onboard;
pub mod render;
pub mod status;
