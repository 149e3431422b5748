pub mod clock;
pub mod domain;
pub mod landmarks;
pub mod protocol;
