//! Business logic: include resolution, env-source loading, output rendering

pub mod environment;
pub mod loaders;
pub mod render;
pub mod resolve;

pub use environment::{Environment, MemoryEnvironment, ProcessEnvironment};
pub use render::{render_dotenv, render_json};
pub use resolve::{load_secrets, resolve_config};
