pub mod config;
pub mod detector;
pub mod error;
pub mod event_frame;
pub mod series;

pub use config::Config;
pub use detector::*;
pub use error::*;
pub use event_frame::*;
pub use series::*;
