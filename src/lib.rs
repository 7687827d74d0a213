//! Purpose: Runtime loader for the librashader C ABI.
//! Exports: `load_instance`, `load_with`, `CapabilityTable`, `LoadState`, `LoadReport`,
//! the library seam (`library`), the C declarations (`ctypes`), and `core::error`.
//! Role: Library crate used by hosts and by the `rashader-probe` binary.
//! Invariants: Loading never fails; an absent or incompatible library yields a no-op table.
//! Invariants: Every operation in a returned table is callable.
pub mod capability;
pub mod core;
pub mod ctypes;
pub mod library;
pub mod loader;
mod noop;
pub mod report;
pub mod table;

pub use capability::{Capability, CapabilityGroup};
pub use crate::core::error::{Error, ErrorKind, to_exit_code};
pub use library::{
    DEFAULT_LIBRARY_NAME, InMemoryLibrary, InMemoryLoader, LibraryLoader, SymbolSource,
    SystemLoader,
};
pub use loader::{load_instance, load_with};
pub use report::{CapabilityStatus, LoadReport};
pub use table::{CapabilityTable, LoadState, Slot};
