pub mod clock;
pub mod gesture;
pub mod reveal;
pub mod viewport;

pub use clock::{Clock, FrameTicker, SystemClock};
pub use gesture::{GestureController, GestureEffect, Point};
pub use reveal::{FeedAction, RevealSchedule, SuggestionFeed};
pub use viewport::Viewport;
