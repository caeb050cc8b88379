//! The fixed-timestep runtime tying engine, input buffer and backends
//! together

pub mod app;
pub mod clock;
pub mod session;

pub use app::App;
pub use clock::TickClock;
pub use session::{Control, Session};
