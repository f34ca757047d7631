pub mod popup;

pub use popup::{Popup, PopupContent};
