//! Canvas editing core: the scene adapter, tools, layer list, history, and
//! the `EditorSession` that wires them to a host.

pub mod config;
pub mod error;
pub mod history;
pub mod input;
pub mod layers;
pub mod navigation;
pub mod notice;
pub mod persistence;
pub mod properties;
pub mod scene;
pub mod session;
pub mod shortcuts;
pub mod tools;

pub use config::EditorConfig;
pub use error::{EditorError, GatewayError};
pub use notice::{Notice, NoticeLevel};
pub use session::EditorSession;
