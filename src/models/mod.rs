pub mod booking;
pub mod filter;
pub mod metrics;
pub mod trend;
pub mod view;

pub use booking::*;
pub use filter::*;
pub use metrics::*;
pub use trend::*;
pub use view::*;
