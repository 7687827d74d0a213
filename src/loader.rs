//! Purpose: Build a capability table from a dynamically loaded librashader.
//! Exports: `load_instance`, `load_with`.
//! Role: Open, bootstrap, ABI gate, bulk resolve. Never fails.
//! Invariants: Every returned table is fully populated; misses fall back to no-ops.
//! Invariants: Nothing beyond the bootstrap pair is resolved unless the ABI matches exactly.
//! Invariants: Each symbol is resolved independently; one miss affects only its own slot.
//! Notes: Failures are logged through `tracing` and reflected in `LoadState`, not returned.
use tracing::{debug, warn};

use crate::capability::Capability;
use crate::ctypes::LIBRASHADER_CURRENT_ABI;
use crate::library::{DEFAULT_LIBRARY_NAME, LibraryLoader, SymbolSource, SystemLoader};
use crate::table::{CapabilityTable, LoadState};

/// Load librashader by its platform default name through the system loader.
///
/// Absence of the library is a normal outcome; check `fully_loaded()` or
/// `state()` on the result.
pub fn load_instance() -> CapabilityTable {
    load_with(&SystemLoader, DEFAULT_LIBRARY_NAME)
}

/// Load a table from `name` (a file name or a path) through `loader`.
pub fn load_with(loader: &impl LibraryLoader, name: &str) -> CapabilityTable {
    let mut table = CapabilityTable::default();

    let library = match loader.open(name) {
        Ok(library) => library,
        Err(err) => {
            debug!(library = name, error = %err, "librashader not opened; using defaults");
            table.record_open_failure(err);
            table.finish(LoadState::OpenFailed);
            return table;
        }
    };

    let bootstrap: Vec<Capability> = Capability::all()
        .into_iter()
        .filter(|capability| capability.is_bootstrap())
        .collect();
    resolve_into(&mut table, library.as_ref(), &bootstrap);
    table.attach_library(library.clone());

    let reported = table.abi_version();
    if reported != LIBRASHADER_CURRENT_ABI {
        warn!(
            library = name,
            reported,
            expected = LIBRASHADER_CURRENT_ABI,
            "librashader ABI mismatch; operations stay on defaults"
        );
        table.finish(LoadState::AbiMismatch { reported });
        return table;
    }

    let rest: Vec<Capability> = Capability::all()
        .into_iter()
        .filter(|capability| !capability.is_bootstrap())
        .collect();
    resolve_into(&mut table, library.as_ref(), &rest);

    table.finish(LoadState::FullyLoaded);
    debug!(
        library = name,
        abi = reported,
        api = table.api_version(),
        bound = table.bound_count(),
        "librashader loaded"
    );
    table
}

fn resolve_into(table: &mut CapabilityTable, library: &dyn SymbolSource, capabilities: &[Capability]) {
    for &capability in capabilities {
        match library.resolve(capability.symbol()) {
            // SAFETY: An exported `libra_*` symbol carries the signature the
            // C header declares for it, which is the capability's PFN type.
            Some(address) => unsafe { table.bind(capability, address) },
            None => debug!(symbol = capability.symbol_str(), "symbol not exported; keeping default"),
        }
    }
}
