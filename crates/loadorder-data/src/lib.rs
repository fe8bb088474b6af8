//! Content directories for the load-order resolver.
//!
//! A content directory holds a required `primary` roster and optional
//! `secondary` and `gates` files, each in RON, TOML, or JSON.
//!
//! ```rust,ignore
//! use loadorder_data::load_content;
//!
//! let content = load_content::<LevelInfo, ()>(Path::new("content/"))?;
//! let loaded = content.activate()?;
//! for level in &loaded.primary {
//!     println!("{}", level.name);
//! }
//! let unlocked = loaded.open_gates();
//! ```

pub mod content;
pub mod loader;
pub mod schema;

pub use content::{ContentSet, LoadedContent, load_content};
pub use loader::{DataLoadError, Format};
pub use schema::{GateData, RosterFile};
