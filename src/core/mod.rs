// Core modules shared by the loader and the `rashader-probe` binary.
pub mod error;
