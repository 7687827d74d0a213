//! Purpose: Dynamic library handle seam: open a library by name, resolve symbols in it.
//! Exports: `LibraryLoader`, `SymbolSource`, `SystemLoader`, `InMemoryLoader`, `InMemoryLibrary`,
//! `DEFAULT_LIBRARY_NAME`.
//! Role: The only place that touches the OS dynamic loader (`libloading`).
//! Invariants: An open failure is an ordinary `Err`, classified by `ErrorKind`.
//! Invariants: A missing or null symbol resolves to `None`; resolution never panics.
//! Invariants: Libraries opened by `SystemLoader` are never unloaded.
use std::collections::HashMap;
use std::error::Error as StdError;
use std::ffi::{CStr, c_void};
use std::fmt;
use std::mem::ManuallyDrop;
use std::ptr::NonNull;
use std::sync::Arc;

use libloading::Library;

use crate::core::error::{Error, ErrorKind};

/// Platform file name of the native library, found through the default search path.
#[cfg(windows)]
pub const DEFAULT_LIBRARY_NAME: &str = "librashader.dll";
#[cfg(target_os = "macos")]
pub const DEFAULT_LIBRARY_NAME: &str = "librashader.dylib";
#[cfg(all(not(windows), not(target_os = "macos")))]
pub const DEFAULT_LIBRARY_NAME: &str = "librashader.so";

/// An opened library that can look up exported symbols.
///
/// The returned address is untyped. The capability table reinterprets it as the
/// signature declared for the capability, so a source must only return
/// addresses whose exported contract matches that name.
pub trait SymbolSource: Send + Sync {
    fn resolve(&self, symbol: &CStr) -> Option<NonNull<c_void>>;
}

/// Opens libraries by logical name or path.
pub trait LibraryLoader {
    fn open(&self, name: &str) -> Result<Arc<dyn SymbolSource>, Error>;
}

/// Loader backed by the platform dynamic loader (`dlopen` / `LoadLibraryW`).
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemLoader;

impl LibraryLoader for SystemLoader {
    fn open(&self, name: &str) -> Result<Arc<dyn SymbolSource>, Error> {
        // SAFETY: Opening runs the library's initializers. The library is the
        // caller-selected librashader build; its initializers are trusted.
        let library = unsafe { Library::new(name) }.map_err(|err| open_error(name, err))?;
        Ok(Arc::new(SystemLibrary {
            name: name.to_string(),
            library: ManuallyDrop::new(library),
        }))
    }
}

struct SystemLibrary {
    name: String,
    // Function pointers handed out through a table may outlive every table, so
    // the library is never closed.
    library: ManuallyDrop<Library>,
}

impl SymbolSource for SystemLibrary {
    fn resolve(&self, symbol: &CStr) -> Option<NonNull<c_void>> {
        // SAFETY: The symbol is read as an untyped address and not called here.
        let address = unsafe {
            self.library
                .get::<*mut c_void>(symbol.to_bytes_with_nul())
                .ok()
                .map(|symbol| *symbol)?
        };
        NonNull::new(address)
    }
}

impl fmt::Debug for SystemLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemLibrary")
            .field("name", &self.name)
            .finish()
    }
}

fn open_error(name: &str, err: libloading::Error) -> Error {
    let message = loader_message(&err);
    let (kind, hint) = classify_open_failure(name, &message);
    let error = Error::new(kind)
        .with_message(format!("failed to open library: {message}"))
        .with_library(name);
    let error = match hint {
        Some(hint) => error.with_hint(hint),
        None => error,
    };
    error.with_source(err)
}

// `LoadLibraryExW` keeps the OS reason in the source error.
fn loader_message(err: &libloading::Error) -> String {
    match StdError::source(err) {
        Some(source) => format!("{err}: {source}"),
        None => err.to_string(),
    }
}

const HINT_MISSING: &str =
    "install librashader or add its directory to the platform library search path";
const HINT_DEPENDENCY: &str =
    "librashader was found but one of its own dependencies could not be loaded";
const HINT_INVALID: &str = "the file is not a loadable library for this platform";

/// Maps a platform loader message onto an error kind and hint.
///
/// `NotFound` is reserved for the requested library itself. A missing or
/// incompatible dependency of that library is `Io`.
pub(crate) fn classify_open_failure(name: &str, message: &str) -> (ErrorKind, Option<&'static str>) {
    let lower = message.to_ascii_lowercase();
    let name = name.to_ascii_lowercase();

    if lower.contains("invalid elf header")
        || lower.contains("file too short")
        || lower.contains("wrong elf class")
        || lower.contains("not a valid win32 application")
        || lower.contains("not a mach-o file")
        || lower.contains("bad cpu type")
    {
        return (ErrorKind::Corrupt, Some(HINT_INVALID));
    }
    if lower.contains("permission denied") || lower.contains("access is denied") {
        return (ErrorKind::Permission, None);
    }
    if lower.contains("not found (required by") || lower.contains("library not loaded") {
        return (ErrorKind::Io, Some(HINT_DEPENDENCY));
    }
    if lower.starts_with(&format!("{name}: cannot open shared object"))
        || lower.contains(&format!("'{name}' (no such file"))
        || (lower.contains("image not found") && lower.contains(&name))
        || lower.contains("the specified module could not be found")
    {
        return (ErrorKind::NotFound, Some(HINT_MISSING));
    }
    if lower.contains("cannot open shared object") {
        return (ErrorKind::Io, Some(HINT_DEPENDENCY));
    }
    (ErrorKind::Io, None)
}

/// A symbol table held in process memory.
///
/// Lets a host route a statically linked implementation through the same
/// loader, and stands in for a native library in tests.
#[derive(Clone, Debug, Default)]
pub struct InMemoryLibrary {
    symbols: HashMap<String, usize>,
}

impl InMemoryLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Export `address` under `symbol`, e.g. `libra_preset_create`.
    pub fn with_symbol(mut self, symbol: impl Into<String>, address: *const c_void) -> Self {
        self.insert(symbol, address);
        self
    }

    pub fn insert(&mut self, symbol: impl Into<String>, address: *const c_void) -> &mut Self {
        self.symbols.insert(symbol.into(), address as usize);
        self
    }

    pub fn remove(&mut self, symbol: &str) -> &mut Self {
        self.symbols.remove(symbol);
        self
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl SymbolSource for InMemoryLibrary {
    fn resolve(&self, symbol: &CStr) -> Option<NonNull<c_void>> {
        let name = symbol.to_str().ok()?;
        let address = *self.symbols.get(name)?;
        NonNull::new(address as *mut c_void)
    }
}

/// Loader over a fixed set of in-memory libraries; any other name fails to open.
#[derive(Clone, Debug, Default)]
pub struct InMemoryLoader {
    libraries: HashMap<String, Arc<InMemoryLibrary>>,
}

impl InMemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_library(mut self, name: impl Into<String>, library: InMemoryLibrary) -> Self {
        self.libraries.insert(name.into(), Arc::new(library));
        self
    }
}

impl LibraryLoader for InMemoryLoader {
    fn open(&self, name: &str) -> Result<Arc<dyn SymbolSource>, Error> {
        match self.libraries.get(name) {
            Some(library) => Ok(library.clone() as Arc<dyn SymbolSource>),
            None => Err(Error::new(ErrorKind::NotFound)
                .with_message("no in-memory library registered under this name")
                .with_library(name)),
        }
    }
}
