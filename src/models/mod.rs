pub mod enums;
pub mod filters;
pub mod findings;

mod appointment;
mod audit;
mod content;
mod note;
mod patient;
mod profile;

pub use appointment::*;
pub use audit::*;
pub use content::*;
pub use filters::*;
pub use findings::*;
pub use note::*;
pub use patient::*;
pub use profile::*;
