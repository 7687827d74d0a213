//! Purpose: Serializable snapshot of a capability table for diagnostics.
//! Exports: `LoadReport`, `CapabilityStatus`.
//! Role: What `rashader-probe` prints; hosts can log it too.
//! Invariants: Lists every compiled-in capability exactly once, in declaration order.
use serde::Serialize;

use crate::capability::Capability;
use crate::ctypes::{LIBRASHADER_ABI_VERSION, LIBRASHADER_API_VERSION, LIBRASHADER_CURRENT_ABI};
use crate::table::CapabilityTable;

#[derive(Clone, Debug, Serialize)]
pub struct LoadReport {
    pub library: Option<String>,
    pub abi_version: LIBRASHADER_ABI_VERSION,
    pub expected_abi: LIBRASHADER_ABI_VERSION,
    pub api_version: LIBRASHADER_API_VERSION,
    pub fully_loaded: bool,
    pub state: &'static str,
    /// Loader message when the library could not be opened.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_error: Option<String>,
    pub bound: usize,
    pub capabilities: Vec<CapabilityStatus>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CapabilityStatus {
    pub name: &'static str,
    pub symbol: &'static str,
    pub group: &'static str,
    pub bound: bool,
}

impl LoadReport {
    pub fn from_table(table: &CapabilityTable) -> Self {
        let capabilities: Vec<CapabilityStatus> = Capability::all()
            .into_iter()
            .map(|capability| CapabilityStatus {
                name: capability.name(),
                symbol: capability.symbol_str(),
                group: capability.group().as_str(),
                bound: table.is_bound(capability),
            })
            .collect();
        Self {
            library: None,
            abi_version: table.abi_version(),
            expected_abi: LIBRASHADER_CURRENT_ABI,
            api_version: table.api_version(),
            fully_loaded: table.fully_loaded(),
            state: table.state().as_str(),
            open_error: table.open_error().map(|err| err.to_string()),
            bound: capabilities.iter().filter(|status| status.bound).count(),
            capabilities,
        }
    }

    /// Record the library name or path the table was loaded from.
    pub fn with_library(mut self, library: impl Into<String>) -> Self {
        self.library = Some(library.into());
        self
    }
}
