//! Purpose: The capability table handed to hosts: one callable slot per capability.
//! Exports: `CapabilityTable`, `Slot`, `LoadState`.
//! Role: Output of the loader; every accessor returns something safe to call.
//! Invariants: Each slot is either bound to the library or bound to its no-op; never empty.
//! Invariants: `fully_loaded` is true iff `state` is `FullyLoaded`.
//! Invariants: Immutable once returned by the loader; `Clone + Send + Sync`.
//! Notes: The table keeps the symbol source alive for as long as any clone exists.
use std::ffi::c_void;
use std::fmt;
use std::ptr::NonNull;
use std::sync::Arc;

use crate::capability::*;
use crate::core::error::Error;
use crate::ctypes::{LIBRASHADER_ABI_VERSION, LIBRASHADER_API_VERSION};
use crate::library::SymbolSource;
use crate::noop;

/// Binding of one capability.
#[derive(Clone, Copy, Debug)]
pub enum Slot<F> {
    /// Resolved from the loaded library.
    Bound(F),
    /// The inert default implementation.
    Default(F),
}

impl<F: Copy> Slot<F> {
    pub fn get(&self) -> F {
        match *self {
            Slot::Bound(function) | Slot::Default(function) => function,
        }
    }

    pub fn is_bound(&self) -> bool {
        matches!(self, Slot::Bound(_))
    }
}

/// Terminal state reached while building a table.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadState {
    /// The library could not be opened; every slot is default.
    OpenFailed,
    /// The library reported an ABI other than `LIBRASHADER_CURRENT_ABI`.
    /// Only the bootstrap slots may be bound.
    AbiMismatch { reported: LIBRASHADER_ABI_VERSION },
    FullyLoaded,
}

impl LoadState {
    pub fn as_str(self) -> &'static str {
        match self {
            LoadState::OpenFailed => "open_failed",
            LoadState::AbiMismatch { .. } => "abi_mismatch",
            LoadState::FullyLoaded => "fully_loaded",
        }
    }
}

macro_rules! define_table {
    ($(
        $(#[$meta:meta])*
        $group:ident $variant:ident $field:ident: $pfn:ident,
    )*) => {
        /// One slot per compiled-in capability, plus load diagnostics.
        #[derive(Clone)]
        pub struct CapabilityTable {
            $(
                $(#[$meta])*
                $field: Slot<$pfn>,
            )*
            fully_loaded: bool,
            state: LoadState,
            library: Option<Arc<dyn SymbolSource>>,
            open_error: Option<Arc<Error>>,
        }

        impl Default for CapabilityTable {
            /// The null instance: every slot default, state `OpenFailed`.
            fn default() -> Self {
                Self {
                    $(
                        $(#[$meta])*
                        $field: Slot::Default(noop::$field as $pfn),
                    )*
                    fully_loaded: false,
                    state: LoadState::OpenFailed,
                    library: None,
                    open_error: None,
                }
            }
        }

        impl CapabilityTable {
            $(
                $(#[$meta])*
                #[doc = concat!("Callable for `libra_", stringify!($field), "`.")]
                pub fn $field(&self) -> $pfn {
                    self.$field.get()
                }
            )*

            pub fn is_bound(&self, capability: Capability) -> bool {
                match capability {
                    $(
                        $(#[$meta])*
                        Capability::$variant => self.$field.is_bound(),
                    )*
                }
            }

            /// Address of the function currently held for `capability`.
            ///
            /// Exporting these through an `InMemoryLibrary` reproduces the table
            /// with signature-correct entries.
            pub fn address(&self, capability: Capability) -> *const c_void {
                match capability {
                    $(
                        $(#[$meta])*
                        Capability::$variant => self.$field.get() as *const c_void,
                    )*
                }
            }

            /// Replace the slot for `capability` with the function at `address`.
            ///
            /// # Safety
            ///
            /// `address` must point to a function whose ABI and signature match
            /// the capability's `PFN_libra_*` type, and must remain valid for as
            /// long as the table or any copied function pointer is used.
            pub(crate) unsafe fn bind(&mut self, capability: Capability, address: NonNull<c_void>) {
                match capability {
                    $(
                        $(#[$meta])*
                        Capability::$variant => {
                            // SAFETY: Caller guarantees `address` has this signature.
                            let function = unsafe {
                                std::mem::transmute::<*mut c_void, $pfn>(address.as_ptr())
                            };
                            self.$field = Slot::Bound(function);
                        }
                    )*
                }
            }
        }
    };
}

for_each_capability!(define_table);

impl CapabilityTable {
    /// ABI version reported by the bound query, or 0 for the null instance.
    pub fn abi_version(&self) -> LIBRASHADER_ABI_VERSION {
        // SAFETY: The query takes no arguments; a bound slot was resolved from
        // `libra_instance_abi_version`, which has this signature.
        unsafe { (self.instance_abi_version())() }
    }

    pub fn api_version(&self) -> LIBRASHADER_API_VERSION {
        // SAFETY: As for `abi_version`.
        unsafe { (self.instance_api_version())() }
    }

    pub fn fully_loaded(&self) -> bool {
        self.fully_loaded
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn library(&self) -> Option<&Arc<dyn SymbolSource>> {
        self.library.as_ref()
    }

    pub fn bound_count(&self) -> usize {
        Capability::all()
            .into_iter()
            .filter(|capability| self.is_bound(*capability))
            .count()
    }

    /// Why the library could not be opened, when `state` is `OpenFailed` after a load.
    pub fn open_error(&self) -> Option<&Error> {
        self.open_error.as_deref()
    }

    pub(crate) fn record_open_failure(&mut self, err: Error) {
        self.open_error = Some(Arc::new(err));
    }

    pub(crate) fn attach_library(&mut self, library: Arc<dyn SymbolSource>) {
        self.library = Some(library);
    }

    pub(crate) fn finish(&mut self, state: LoadState) {
        self.state = state;
        self.fully_loaded = state == LoadState::FullyLoaded;
    }
}

impl fmt::Debug for CapabilityTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityTable")
            .field("state", &self.state)
            .field("fully_loaded", &self.fully_loaded)
            .field("bound", &self.bound_count())
            .field("capabilities", &Capability::all().len())
            .field("library", &self.library.is_some())
            .field("open_error", &self.open_error)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ctypes::libra_shader_preset_t;
    use std::ffi::c_char;

    unsafe extern "C" fn abi_one() -> LIBRASHADER_ABI_VERSION {
        1
    }

    unsafe extern "C" fn preset_create_sentinel(
        _filename: *const c_char,
        out: *mut libra_shader_preset_t,
    ) -> crate::ctypes::libra_error_t {
        if !out.is_null() {
            unsafe { out.write(NonNull::new(0x10 as *mut _)) };
        }
        None
    }

    fn address(function: *const c_void) -> NonNull<c_void> {
        NonNull::new(function.cast_mut()).expect("function address")
    }

    #[test]
    fn default_table_is_the_null_instance() {
        let table = CapabilityTable::default();
        assert_eq!(table.state(), LoadState::OpenFailed);
        assert!(!table.fully_loaded());
        assert!(table.library().is_none());
        assert_eq!(table.bound_count(), 0);
        assert_eq!(table.abi_version(), 0);
        assert_eq!(table.api_version(), 0);
    }

    #[test]
    fn default_preset_create_yields_absent_handle() {
        let table = CapabilityTable::default();
        let mut out: libra_shader_preset_t = NonNull::new(0x20 as *mut _);
        let err = unsafe { (table.preset_create())(c"crt.slangp".as_ptr(), &mut out) };
        assert!(err.is_none());
        assert!(out.is_none());
    }

    #[test]
    fn bind_replaces_only_the_named_slot() {
        let mut table = CapabilityTable::default();
        unsafe { table.bind(Capability::InstanceAbiVersion, address(abi_one as *const c_void)) };
        assert!(table.is_bound(Capability::InstanceAbiVersion));
        assert!(!table.is_bound(Capability::InstanceApiVersion));
        assert_eq!(table.bound_count(), 1);
        assert_eq!(table.abi_version(), 1);
    }

    #[test]
    fn bound_slot_calls_through_and_survives_clone() {
        let mut table = CapabilityTable::default();
        unsafe {
            table.bind(
                Capability::PresetCreate,
                address(preset_create_sentinel as *const c_void),
            )
        };
        let copy = table.clone();
        let mut out: libra_shader_preset_t = None;
        let err = unsafe { (copy.preset_create())(c"crt.slangp".as_ptr(), &mut out) };
        assert!(err.is_none());
        assert_eq!(out.map(|handle| handle.as_ptr() as usize), Some(0x10));
        assert!(copy.is_bound(Capability::PresetCreate));
    }

    #[test]
    fn address_reports_the_function_in_each_slot() {
        let mut table = CapabilityTable::default();
        assert!(!table.address(Capability::PresetCreate).is_null());
        assert_ne!(
            table.address(Capability::PresetCreate),
            preset_create_sentinel as *const c_void
        );
        unsafe {
            table.bind(
                Capability::PresetCreate,
                address(preset_create_sentinel as *const c_void),
            )
        };
        assert_eq!(
            table.address(Capability::PresetCreate),
            preset_create_sentinel as *const c_void
        );
    }

    #[test]
    fn open_failure_is_kept_with_the_table() {
        let mut table = CapabilityTable::default();
        assert!(table.open_error().is_none());
        table.record_open_failure(
            Error::new(crate::core::error::ErrorKind::NotFound).with_library("librashader.so"),
        );
        let copy = table.clone();
        let err = copy.open_error().expect("open error");
        assert_eq!(err.library(), Some("librashader.so"));
    }

    #[test]
    fn finish_keeps_flag_and_state_in_step() {
        let mut table = CapabilityTable::default();
        table.finish(LoadState::AbiMismatch { reported: 2 });
        assert!(!table.fully_loaded());
        assert_eq!(table.state().as_str(), "abi_mismatch");
        table.finish(LoadState::FullyLoaded);
        assert!(table.fully_loaded());
    }

    #[test]
    fn table_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CapabilityTable>();
    }

    // Shared by every backend: everything past creation is a no-op on the chain handle.
    #[cfg(any(
        feature = "runtime-opengl",
        feature = "runtime-vulkan",
        feature = "runtime-d3d11",
        feature = "runtime-d3d12"
    ))]
    macro_rules! assert_chain_slots_do_nothing {
        ($table:expr, $chain:expr, $set_param:ident, $get_param:ident, $set_passes:ident,
         $get_passes:ident, $free:ident) => {{
            let mut value = 0.5f32;
            let mut passes = 3u32;
            unsafe {
                assert!(($table.$set_param())($chain, c"gamma".as_ptr(), 1.0).is_none());
                assert!(($table.$get_param())($chain, c"gamma".as_ptr(), &mut value).is_none());
                assert!(($table.$set_passes())($chain, 1).is_none());
                assert!(($table.$get_passes())($chain, &mut passes).is_none());
                assert!(($table.$free())($chain).is_none());
            }
            assert_eq!(value, 0.5);
            assert_eq!(passes, 3);
        }};
    }

    #[cfg(feature = "runtime-opengl")]
    #[test]
    fn default_opengl_slots_do_nothing() {
        use crate::ctypes::*;

        unsafe extern "C" fn gl_loader(_name: *const c_char) -> *const c_void {
            std::ptr::null()
        }

        let table = CapabilityTable::default();
        let mut chain: libra_gl_filter_chain_t = Some(NonNull::dangling());
        unsafe {
            assert!((table.gl_init_context())(gl_loader).is_none());
            let err = (table.gl_filter_chain_create())(
                std::ptr::null_mut(),
                std::ptr::null(),
                &mut chain,
            );
            assert!(err.is_none());
            assert!(chain.is_none());
            let err = (table.gl_filter_chain_frame())(
                &mut chain,
                0,
                libra_source_image_gl_t::default(),
                libra_viewport_t::default(),
                libra_output_framebuffer_gl_t::default(),
                std::ptr::null(),
                std::ptr::null(),
            );
            assert!(err.is_none());
        }
        assert_chain_slots_do_nothing!(
            table,
            &mut chain,
            gl_filter_chain_set_param,
            gl_filter_chain_get_param,
            gl_filter_chain_set_active_pass_count,
            gl_filter_chain_get_active_pass_count,
            gl_filter_chain_free
        );
    }

    #[cfg(feature = "runtime-vulkan")]
    #[test]
    fn default_vulkan_slots_do_nothing() {
        use crate::ctypes::*;

        let device = libra_device_vk_t {
            physical_device: std::ptr::null_mut(),
            instance: std::ptr::null_mut(),
            device: std::ptr::null_mut(),
            entry: None,
        };
        let table = CapabilityTable::default();
        let mut chain: libra_vk_filter_chain_t = Some(NonNull::dangling());
        unsafe {
            let err = (table.vk_filter_chain_create())(
                std::ptr::null_mut(),
                device,
                std::ptr::null(),
                &mut chain,
            );
            assert!(err.is_none());
            assert!(chain.is_none());
            chain = Some(NonNull::dangling());
            let err = (table.vk_filter_chain_create_deferred())(
                std::ptr::null_mut(),
                device,
                std::ptr::null_mut(),
                std::ptr::null(),
                &mut chain,
            );
            assert!(err.is_none());
            assert!(chain.is_none());
            let err = (table.vk_filter_chain_frame())(
                &mut chain,
                std::ptr::null_mut(),
                0,
                libra_source_image_vk_t::default(),
                libra_viewport_t::default(),
                libra_output_image_vk_t::default(),
                std::ptr::null(),
                std::ptr::null(),
            );
            assert!(err.is_none());
        }
        assert_chain_slots_do_nothing!(
            table,
            &mut chain,
            vk_filter_chain_set_param,
            vk_filter_chain_get_param,
            vk_filter_chain_set_active_pass_count,
            vk_filter_chain_get_active_pass_count,
            vk_filter_chain_free
        );
    }

    #[cfg(feature = "runtime-d3d11")]
    #[test]
    fn default_d3d11_slots_do_nothing() {
        use crate::ctypes::*;

        let table = CapabilityTable::default();
        let mut chain: libra_d3d11_filter_chain_t = Some(NonNull::dangling());
        unsafe {
            let err = (table.d3d11_filter_chain_create())(
                std::ptr::null_mut(),
                std::ptr::null_mut(),
                std::ptr::null(),
                &mut chain,
            );
            assert!(err.is_none());
            assert!(chain.is_none());
            chain = Some(NonNull::dangling());
            let err = (table.d3d11_filter_chain_create_deferred())(
                std::ptr::null_mut(),
                std::ptr::null_mut(),
                std::ptr::null_mut(),
                std::ptr::null(),
                &mut chain,
            );
            assert!(err.is_none());
            assert!(chain.is_none());
            let image = libra_source_image_d3d11_t {
                handle: std::ptr::null_mut(),
                width: 0,
                height: 0,
            };
            let err = (table.d3d11_filter_chain_frame())(
                &mut chain,
                std::ptr::null_mut(),
                0,
                image,
                libra_viewport_t::default(),
                std::ptr::null_mut(),
                std::ptr::null(),
                std::ptr::null(),
            );
            assert!(err.is_none());
        }
        assert_chain_slots_do_nothing!(
            table,
            &mut chain,
            d3d11_filter_chain_set_param,
            d3d11_filter_chain_get_param,
            d3d11_filter_chain_set_active_pass_count,
            d3d11_filter_chain_get_active_pass_count,
            d3d11_filter_chain_free
        );
    }

    #[cfg(feature = "runtime-d3d12")]
    #[test]
    fn default_d3d12_slots_do_nothing() {
        use crate::ctypes::*;

        let table = CapabilityTable::default();
        let mut chain: libra_d3d12_filter_chain_t = Some(NonNull::dangling());
        unsafe {
            let err = (table.d3d12_filter_chain_create())(
                std::ptr::null_mut(),
                std::ptr::null_mut(),
                std::ptr::null(),
                &mut chain,
            );
            assert!(err.is_none());
            assert!(chain.is_none());
            chain = Some(NonNull::dangling());
            let err = (table.d3d12_filter_chain_create_deferred())(
                std::ptr::null_mut(),
                std::ptr::null_mut(),
                std::ptr::null_mut(),
                std::ptr::null(),
                &mut chain,
            );
            assert!(err.is_none());
            assert!(chain.is_none());
            let image = libra_source_image_d3d12_t {
                resource: std::ptr::null_mut(),
                descriptor: D3D12_CPU_DESCRIPTOR_HANDLE::default(),
                format: 0,
                width: 0,
                height: 0,
            };
            let err = (table.d3d12_filter_chain_frame())(
                &mut chain,
                std::ptr::null_mut(),
                0,
                image,
                libra_viewport_t::default(),
                libra_output_image_d3d12_t::default(),
                std::ptr::null(),
                std::ptr::null(),
            );
            assert!(err.is_none());
        }
        assert_chain_slots_do_nothing!(
            table,
            &mut chain,
            d3d12_filter_chain_set_param,
            d3d12_filter_chain_get_param,
            d3d12_filter_chain_set_active_pass_count,
            d3d12_filter_chain_get_active_pass_count,
            d3d12_filter_chain_free
        );
    }
}
