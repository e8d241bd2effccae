pub mod config;
pub mod context;
pub mod dates;
pub mod export;
pub mod search;
pub mod session;
pub mod show;
pub mod step;

pub use config::*;
pub use context::*;
pub use dates::*;
pub use export::*;
pub use search::*;
pub use session::*;
pub use show::*;
pub use step::*;
