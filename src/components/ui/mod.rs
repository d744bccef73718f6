pub mod alert;
pub mod button;
pub mod card;
pub mod spinner;

// Callers use `crate::components::ui::Button` etc.
pub use alert::*;
pub use button::*;
pub use card::*;
pub use spinner::*;
