//! API endpoint modules.

mod config;
mod keygen;
mod objects;
mod op;

pub use config::ConfigApi;
pub use keygen::KeygenApi;
pub use objects::ObjectsApi;
pub use op::OpApi;
