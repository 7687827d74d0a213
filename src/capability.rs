//! Purpose: Name, symbol, group, and signature for every capability the loader knows.
//! Exports: `Capability`, `CapabilityGroup`, the `PFN_libra_*` signatures, `for_each_capability!`.
//! Role: Single declaration list consumed by the table, the no-op set, and the report.
//! Invariants: The exported symbol of capability `x` is always `libra_x`.
//! Invariants: The set of names is fixed at compile time; backend groups follow cargo features.
#![allow(non_camel_case_types)]

use std::ffi::{CStr, c_char};

use crate::ctypes::*;

pub type PFN_libra_instance_abi_version = unsafe extern "C" fn() -> LIBRASHADER_ABI_VERSION;
pub type PFN_libra_instance_api_version = unsafe extern "C" fn() -> LIBRASHADER_API_VERSION;

pub type PFN_libra_preset_create =
    unsafe extern "C" fn(filename: *const c_char, out: *mut libra_shader_preset_t) -> libra_error_t;
pub type PFN_libra_preset_free =
    unsafe extern "C" fn(preset: *mut libra_shader_preset_t) -> libra_error_t;
pub type PFN_libra_preset_set_param = unsafe extern "C" fn(
    preset: *mut libra_shader_preset_t,
    name: *const c_char,
    value: f32,
) -> libra_error_t;
pub type PFN_libra_preset_get_param = unsafe extern "C" fn(
    preset: *mut libra_shader_preset_t,
    name: *const c_char,
    value: *mut f32,
) -> libra_error_t;
pub type PFN_libra_preset_print =
    unsafe extern "C" fn(preset: *mut libra_shader_preset_t) -> libra_error_t;
pub type PFN_libra_preset_get_runtime_params = unsafe extern "C" fn(
    preset: *mut libra_shader_preset_t,
    out: *mut libra_preset_param_list_t,
) -> libra_error_t;
pub type PFN_libra_preset_free_runtime_params =
    unsafe extern "C" fn(preset: libra_preset_param_list_t) -> libra_error_t;

pub type PFN_libra_error_errno = unsafe extern "C" fn(error: libra_error_t) -> LIBRA_ERRNO;
pub type PFN_libra_error_print = unsafe extern "C" fn(error: libra_error_t) -> i32;
pub type PFN_libra_error_free = unsafe extern "C" fn(error: *mut libra_error_t) -> i32;
pub type PFN_libra_error_write =
    unsafe extern "C" fn(error: libra_error_t, out: *mut *mut c_char) -> i32;
pub type PFN_libra_error_free_string = unsafe extern "C" fn(out: *mut *mut c_char) -> i32;

#[cfg(feature = "runtime-opengl")]
pub use gl::*;

#[cfg(feature = "runtime-opengl")]
mod gl {
    use crate::ctypes::*;
    use std::ffi::c_char;

    pub type PFN_libra_gl_init_context =
        unsafe extern "C" fn(loader: libra_gl_loader_t) -> libra_error_t;
    pub type PFN_libra_gl_filter_chain_create = unsafe extern "C" fn(
        preset: *mut libra_shader_preset_t,
        options: *const filter_chain_gl_opt_t,
        out: *mut libra_gl_filter_chain_t,
    ) -> libra_error_t;
    pub type PFN_libra_gl_filter_chain_frame = unsafe extern "C" fn(
        chain: *mut libra_gl_filter_chain_t,
        frame_count: usize,
        image: libra_source_image_gl_t,
        viewport: libra_viewport_t,
        out: libra_output_framebuffer_gl_t,
        mvp: *const f32,
        opt: *const frame_gl_opt_t,
    ) -> libra_error_t;
    pub type PFN_libra_gl_filter_chain_free =
        unsafe extern "C" fn(chain: *mut libra_gl_filter_chain_t) -> libra_error_t;
    pub type PFN_libra_gl_filter_chain_set_param = unsafe extern "C" fn(
        chain: *mut libra_gl_filter_chain_t,
        param_name: *const c_char,
        value: f32,
    ) -> libra_error_t;
    pub type PFN_libra_gl_filter_chain_get_param = unsafe extern "C" fn(
        chain: *mut libra_gl_filter_chain_t,
        param_name: *const c_char,
        out: *mut f32,
    ) -> libra_error_t;
    pub type PFN_libra_gl_filter_chain_set_active_pass_count =
        unsafe extern "C" fn(chain: *mut libra_gl_filter_chain_t, value: u32) -> libra_error_t;
    pub type PFN_libra_gl_filter_chain_get_active_pass_count =
        unsafe extern "C" fn(chain: *mut libra_gl_filter_chain_t, out: *mut u32) -> libra_error_t;
}

#[cfg(feature = "runtime-vulkan")]
pub use vk::*;

#[cfg(feature = "runtime-vulkan")]
mod vk {
    use crate::ctypes::*;
    use std::ffi::c_char;

    pub type PFN_libra_vk_filter_chain_create = unsafe extern "C" fn(
        preset: *mut libra_shader_preset_t,
        vulkan: libra_device_vk_t,
        options: *const filter_chain_vk_opt_t,
        out: *mut libra_vk_filter_chain_t,
    ) -> libra_error_t;
    pub type PFN_libra_vk_filter_chain_create_deferred = unsafe extern "C" fn(
        preset: *mut libra_shader_preset_t,
        vulkan: libra_device_vk_t,
        command_buffer: VkCommandBuffer,
        options: *const filter_chain_vk_opt_t,
        out: *mut libra_vk_filter_chain_t,
    ) -> libra_error_t;
    pub type PFN_libra_vk_filter_chain_frame = unsafe extern "C" fn(
        chain: *mut libra_vk_filter_chain_t,
        command_buffer: VkCommandBuffer,
        frame_count: usize,
        image: libra_source_image_vk_t,
        viewport: libra_viewport_t,
        out: libra_output_image_vk_t,
        mvp: *const f32,
        opt: *const frame_vk_opt_t,
    ) -> libra_error_t;
    pub type PFN_libra_vk_filter_chain_free =
        unsafe extern "C" fn(chain: *mut libra_vk_filter_chain_t) -> libra_error_t;
    pub type PFN_libra_vk_filter_chain_set_param = unsafe extern "C" fn(
        chain: *mut libra_vk_filter_chain_t,
        param_name: *const c_char,
        value: f32,
    ) -> libra_error_t;
    pub type PFN_libra_vk_filter_chain_get_param = unsafe extern "C" fn(
        chain: *mut libra_vk_filter_chain_t,
        param_name: *const c_char,
        out: *mut f32,
    ) -> libra_error_t;
    pub type PFN_libra_vk_filter_chain_set_active_pass_count =
        unsafe extern "C" fn(chain: *mut libra_vk_filter_chain_t, value: u32) -> libra_error_t;
    pub type PFN_libra_vk_filter_chain_get_active_pass_count =
        unsafe extern "C" fn(chain: *mut libra_vk_filter_chain_t, out: *mut u32) -> libra_error_t;
}

#[cfg(feature = "runtime-d3d11")]
pub use d3d11::*;

#[cfg(feature = "runtime-d3d11")]
mod d3d11 {
    use crate::ctypes::*;
    use std::ffi::c_char;

    pub type PFN_libra_d3d11_filter_chain_create = unsafe extern "C" fn(
        preset: *mut libra_shader_preset_t,
        device: *mut ID3D11Device,
        options: *const filter_chain_d3d11_opt_t,
        out: *mut libra_d3d11_filter_chain_t,
    ) -> libra_error_t;
    pub type PFN_libra_d3d11_filter_chain_create_deferred = unsafe extern "C" fn(
        preset: *mut libra_shader_preset_t,
        device: *mut ID3D11Device,
        device_context: *mut ID3D11DeviceContext,
        options: *const filter_chain_d3d11_opt_t,
        out: *mut libra_d3d11_filter_chain_t,
    ) -> libra_error_t;
    pub type PFN_libra_d3d11_filter_chain_frame = unsafe extern "C" fn(
        chain: *mut libra_d3d11_filter_chain_t,
        device_context: *mut ID3D11DeviceContext,
        frame_count: usize,
        image: libra_source_image_d3d11_t,
        viewport: libra_viewport_t,
        out: *mut ID3D11RenderTargetView,
        mvp: *const f32,
        options: *const frame_d3d11_opt_t,
    ) -> libra_error_t;
    pub type PFN_libra_d3d11_filter_chain_free =
        unsafe extern "C" fn(chain: *mut libra_d3d11_filter_chain_t) -> libra_error_t;
    pub type PFN_libra_d3d11_filter_chain_set_param = unsafe extern "C" fn(
        chain: *mut libra_d3d11_filter_chain_t,
        param_name: *const c_char,
        value: f32,
    ) -> libra_error_t;
    pub type PFN_libra_d3d11_filter_chain_get_param = unsafe extern "C" fn(
        chain: *mut libra_d3d11_filter_chain_t,
        param_name: *const c_char,
        out: *mut f32,
    ) -> libra_error_t;
    pub type PFN_libra_d3d11_filter_chain_set_active_pass_count =
        unsafe extern "C" fn(chain: *mut libra_d3d11_filter_chain_t, value: u32) -> libra_error_t;
    pub type PFN_libra_d3d11_filter_chain_get_active_pass_count =
        unsafe extern "C" fn(chain: *mut libra_d3d11_filter_chain_t, out: *mut u32) -> libra_error_t;
}

#[cfg(feature = "runtime-d3d12")]
pub use d3d12::*;

#[cfg(feature = "runtime-d3d12")]
mod d3d12 {
    use crate::ctypes::*;
    use std::ffi::c_char;

    pub type PFN_libra_d3d12_filter_chain_create = unsafe extern "C" fn(
        preset: *mut libra_shader_preset_t,
        device: *mut ID3D12Device,
        options: *const filter_chain_d3d12_opt_t,
        out: *mut libra_d3d12_filter_chain_t,
    ) -> libra_error_t;
    pub type PFN_libra_d3d12_filter_chain_create_deferred = unsafe extern "C" fn(
        preset: *mut libra_shader_preset_t,
        device: *mut ID3D12Device,
        command_list: *mut ID3D12GraphicsCommandList,
        options: *const filter_chain_d3d12_opt_t,
        out: *mut libra_d3d12_filter_chain_t,
    ) -> libra_error_t;
    pub type PFN_libra_d3d12_filter_chain_frame = unsafe extern "C" fn(
        chain: *mut libra_d3d12_filter_chain_t,
        command_list: *mut ID3D12GraphicsCommandList,
        frame_count: usize,
        image: libra_source_image_d3d12_t,
        viewport: libra_viewport_t,
        out: libra_output_image_d3d12_t,
        mvp: *const f32,
        options: *const frame_d3d12_opt_t,
    ) -> libra_error_t;
    pub type PFN_libra_d3d12_filter_chain_free =
        unsafe extern "C" fn(chain: *mut libra_d3d12_filter_chain_t) -> libra_error_t;
    pub type PFN_libra_d3d12_filter_chain_set_param = unsafe extern "C" fn(
        chain: *mut libra_d3d12_filter_chain_t,
        param_name: *const c_char,
        value: f32,
    ) -> libra_error_t;
    pub type PFN_libra_d3d12_filter_chain_get_param = unsafe extern "C" fn(
        chain: *mut libra_d3d12_filter_chain_t,
        param_name: *const c_char,
        out: *mut f32,
    ) -> libra_error_t;
    pub type PFN_libra_d3d12_filter_chain_set_active_pass_count =
        unsafe extern "C" fn(chain: *mut libra_d3d12_filter_chain_t, value: u32) -> libra_error_t;
    pub type PFN_libra_d3d12_filter_chain_get_active_pass_count =
        unsafe extern "C" fn(chain: *mut libra_d3d12_filter_chain_t, out: *mut u32) -> libra_error_t;
}

/// Invokes `$callback!` with the full capability list.
///
/// Each entry reads `Group Variant field: PFN_type,`. The no-op implementation
/// of `field` lives at `crate::noop::field`, and the exported symbol is
/// `libra_field`. Backend entries carry their cargo-feature `cfg`.
macro_rules! for_each_capability {
    ($callback:ident) => {
        $callback! {
            Bootstrap InstanceAbiVersion instance_abi_version: PFN_libra_instance_abi_version,
            Bootstrap InstanceApiVersion instance_api_version: PFN_libra_instance_api_version,

            Preset PresetCreate preset_create: PFN_libra_preset_create,
            Preset PresetFree preset_free: PFN_libra_preset_free,
            Preset PresetSetParam preset_set_param: PFN_libra_preset_set_param,
            Preset PresetGetParam preset_get_param: PFN_libra_preset_get_param,
            Preset PresetPrint preset_print: PFN_libra_preset_print,
            Preset PresetGetRuntimeParams preset_get_runtime_params: PFN_libra_preset_get_runtime_params,
            Preset PresetFreeRuntimeParams preset_free_runtime_params: PFN_libra_preset_free_runtime_params,

            Error ErrorErrno error_errno: PFN_libra_error_errno,
            Error ErrorPrint error_print: PFN_libra_error_print,
            Error ErrorFree error_free: PFN_libra_error_free,
            Error ErrorWrite error_write: PFN_libra_error_write,
            Error ErrorFreeString error_free_string: PFN_libra_error_free_string,

            #[cfg(feature = "runtime-opengl")]
            OpenGl GlInitContext gl_init_context: PFN_libra_gl_init_context,
            #[cfg(feature = "runtime-opengl")]
            OpenGl GlFilterChainCreate gl_filter_chain_create: PFN_libra_gl_filter_chain_create,
            #[cfg(feature = "runtime-opengl")]
            OpenGl GlFilterChainFrame gl_filter_chain_frame: PFN_libra_gl_filter_chain_frame,
            #[cfg(feature = "runtime-opengl")]
            OpenGl GlFilterChainFree gl_filter_chain_free: PFN_libra_gl_filter_chain_free,
            #[cfg(feature = "runtime-opengl")]
            OpenGl GlFilterChainGetParam gl_filter_chain_get_param: PFN_libra_gl_filter_chain_get_param,
            #[cfg(feature = "runtime-opengl")]
            OpenGl GlFilterChainSetParam gl_filter_chain_set_param: PFN_libra_gl_filter_chain_set_param,
            #[cfg(feature = "runtime-opengl")]
            OpenGl GlFilterChainGetActivePassCount gl_filter_chain_get_active_pass_count: PFN_libra_gl_filter_chain_get_active_pass_count,
            #[cfg(feature = "runtime-opengl")]
            OpenGl GlFilterChainSetActivePassCount gl_filter_chain_set_active_pass_count: PFN_libra_gl_filter_chain_set_active_pass_count,

            #[cfg(feature = "runtime-vulkan")]
            Vulkan VkFilterChainCreate vk_filter_chain_create: PFN_libra_vk_filter_chain_create,
            #[cfg(feature = "runtime-vulkan")]
            Vulkan VkFilterChainCreateDeferred vk_filter_chain_create_deferred: PFN_libra_vk_filter_chain_create_deferred,
            #[cfg(feature = "runtime-vulkan")]
            Vulkan VkFilterChainFrame vk_filter_chain_frame: PFN_libra_vk_filter_chain_frame,
            #[cfg(feature = "runtime-vulkan")]
            Vulkan VkFilterChainFree vk_filter_chain_free: PFN_libra_vk_filter_chain_free,
            #[cfg(feature = "runtime-vulkan")]
            Vulkan VkFilterChainGetParam vk_filter_chain_get_param: PFN_libra_vk_filter_chain_get_param,
            #[cfg(feature = "runtime-vulkan")]
            Vulkan VkFilterChainSetParam vk_filter_chain_set_param: PFN_libra_vk_filter_chain_set_param,
            #[cfg(feature = "runtime-vulkan")]
            Vulkan VkFilterChainGetActivePassCount vk_filter_chain_get_active_pass_count: PFN_libra_vk_filter_chain_get_active_pass_count,
            #[cfg(feature = "runtime-vulkan")]
            Vulkan VkFilterChainSetActivePassCount vk_filter_chain_set_active_pass_count: PFN_libra_vk_filter_chain_set_active_pass_count,

            #[cfg(feature = "runtime-d3d11")]
            D3D11 D3D11FilterChainCreate d3d11_filter_chain_create: PFN_libra_d3d11_filter_chain_create,
            #[cfg(feature = "runtime-d3d11")]
            D3D11 D3D11FilterChainCreateDeferred d3d11_filter_chain_create_deferred: PFN_libra_d3d11_filter_chain_create_deferred,
            #[cfg(feature = "runtime-d3d11")]
            D3D11 D3D11FilterChainFrame d3d11_filter_chain_frame: PFN_libra_d3d11_filter_chain_frame,
            #[cfg(feature = "runtime-d3d11")]
            D3D11 D3D11FilterChainFree d3d11_filter_chain_free: PFN_libra_d3d11_filter_chain_free,
            #[cfg(feature = "runtime-d3d11")]
            D3D11 D3D11FilterChainGetParam d3d11_filter_chain_get_param: PFN_libra_d3d11_filter_chain_get_param,
            #[cfg(feature = "runtime-d3d11")]
            D3D11 D3D11FilterChainSetParam d3d11_filter_chain_set_param: PFN_libra_d3d11_filter_chain_set_param,
            #[cfg(feature = "runtime-d3d11")]
            D3D11 D3D11FilterChainGetActivePassCount d3d11_filter_chain_get_active_pass_count: PFN_libra_d3d11_filter_chain_get_active_pass_count,
            #[cfg(feature = "runtime-d3d11")]
            D3D11 D3D11FilterChainSetActivePassCount d3d11_filter_chain_set_active_pass_count: PFN_libra_d3d11_filter_chain_set_active_pass_count,

            #[cfg(feature = "runtime-d3d12")]
            D3D12 D3D12FilterChainCreate d3d12_filter_chain_create: PFN_libra_d3d12_filter_chain_create,
            #[cfg(feature = "runtime-d3d12")]
            D3D12 D3D12FilterChainCreateDeferred d3d12_filter_chain_create_deferred: PFN_libra_d3d12_filter_chain_create_deferred,
            #[cfg(feature = "runtime-d3d12")]
            D3D12 D3D12FilterChainFrame d3d12_filter_chain_frame: PFN_libra_d3d12_filter_chain_frame,
            #[cfg(feature = "runtime-d3d12")]
            D3D12 D3D12FilterChainFree d3d12_filter_chain_free: PFN_libra_d3d12_filter_chain_free,
            #[cfg(feature = "runtime-d3d12")]
            D3D12 D3D12FilterChainGetParam d3d12_filter_chain_get_param: PFN_libra_d3d12_filter_chain_get_param,
            #[cfg(feature = "runtime-d3d12")]
            D3D12 D3D12FilterChainSetParam d3d12_filter_chain_set_param: PFN_libra_d3d12_filter_chain_set_param,
            #[cfg(feature = "runtime-d3d12")]
            D3D12 D3D12FilterChainGetActivePassCount d3d12_filter_chain_get_active_pass_count: PFN_libra_d3d12_filter_chain_get_active_pass_count,
            #[cfg(feature = "runtime-d3d12")]
            D3D12 D3D12FilterChainSetActivePassCount d3d12_filter_chain_set_active_pass_count: PFN_libra_d3d12_filter_chain_set_active_pass_count,
        }
    };
}

pub(crate) use for_each_capability;

/// Family a capability belongs to. Only `Bootstrap` is resolved before the ABI gate.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CapabilityGroup {
    Bootstrap,
    Preset,
    Error,
    OpenGl,
    Vulkan,
    D3D11,
    D3D12,
}

impl CapabilityGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            CapabilityGroup::Bootstrap => "bootstrap",
            CapabilityGroup::Preset => "preset",
            CapabilityGroup::Error => "error",
            CapabilityGroup::OpenGl => "opengl",
            CapabilityGroup::Vulkan => "vulkan",
            CapabilityGroup::D3D11 => "d3d11",
            CapabilityGroup::D3D12 => "d3d12",
        }
    }

    pub fn is_bootstrap(self) -> bool {
        matches!(self, CapabilityGroup::Bootstrap)
    }
}

macro_rules! define_capabilities {
    ($(
        $(#[$meta:meta])*
        $group:ident $variant:ident $field:ident: $pfn:ident,
    )*) => {
        /// A single named operation exported by the native library.
        #[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
        pub enum Capability {
            $(
                $(#[$meta])*
                $variant,
            )*
        }

        impl Capability {
            /// Every capability compiled into this build, bootstrap first.
            pub fn all() -> Vec<Capability> {
                let mut all = Vec::new();
                $(
                    $(#[$meta])*
                    all.push(Capability::$variant);
                )*
                all
            }

            /// Capability name, e.g. `preset_create`.
            pub fn name(self) -> &'static str {
                match self {
                    $(
                        $(#[$meta])*
                        Capability::$variant => stringify!($field),
                    )*
                }
            }

            /// Exported symbol, e.g. `libra_preset_create`.
            pub fn symbol(self) -> &'static CStr {
                match self {
                    $(
                        $(#[$meta])*
                        Capability::$variant => {
                            const SYMBOL: &CStr = match CStr::from_bytes_with_nul(
                                concat!("libra_", stringify!($field), "\0").as_bytes(),
                            ) {
                                Ok(symbol) => symbol,
                                Err(_) => panic!("capability symbol contains an interior NUL"),
                            };
                            SYMBOL
                        }
                    )*
                }
            }

            pub fn group(self) -> CapabilityGroup {
                match self {
                    $(
                        $(#[$meta])*
                        Capability::$variant => CapabilityGroup::$group,
                    )*
                }
            }

            pub fn from_name(name: &str) -> Option<Capability> {
                match name {
                    $(
                        $(#[$meta])*
                        stringify!($field) => Some(Capability::$variant),
                    )*
                    _ => None,
                }
            }
        }
    };
}

for_each_capability!(define_capabilities);

impl Capability {
    pub fn is_bootstrap(self) -> bool {
        self.group().is_bootstrap()
    }

    /// Symbol name without the trailing NUL.
    pub fn symbol_str(self) -> &'static str {
        self.symbol().to_str().unwrap_or_default()
    }
}
