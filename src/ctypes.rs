//! Purpose: Inert `#[repr(C)]` declarations mirroring the librashader C header.
//! Exports: Opaque handles, errno codes, version constants, parameter lists, backend structs.
//! Role: Data shape passed through the capability table; the loader never inspects it.
//! Invariants: Layouts match `librashader.h` for ABI version `LIBRASHADER_CURRENT_ABI`.
//! Invariants: Handles are `Option<NonNull<_>>`; `None` is the absent handle.
//! Notes: Backend structs are gated on the same cargo features as their capability groups.
#![allow(non_camel_case_types)]

use std::ffi::c_char;
use std::ptr::NonNull;

/// API version type alias.
pub type LIBRASHADER_API_VERSION = libc::size_t;

/// ABI version type alias.
pub type LIBRASHADER_ABI_VERSION = libc::size_t;

/// The current version of the librashader API.
///
/// API versions are backwards compatible: an instance reporting an API version
/// greater than or equal to this one accepts structs stamped with this version.
pub const LIBRASHADER_CURRENT_VERSION: LIBRASHADER_API_VERSION = 0;

/// The ABI version this crate binds against.
///
/// ABI version 0 is reserved for the null (unloaded) instance. ABI versions are
/// not backwards compatible; only an exact match is loaded.
pub const LIBRASHADER_CURRENT_ABI: LIBRASHADER_ABI_VERSION = 1;

/// Raw error code returned by `libra_error_errno`.
///
/// Kept as a plain integer across the boundary; use [`LibraErrno::from_raw`]
/// to interpret it.
pub type LIBRA_ERRNO = i32;

pub const LIBRA_ERRNO_UNKNOWN_ERROR: LIBRA_ERRNO = 0;
pub const LIBRA_ERRNO_INVALID_PARAMETER: LIBRA_ERRNO = 1;
pub const LIBRA_ERRNO_INVALID_STRING: LIBRA_ERRNO = 2;
pub const LIBRA_ERRNO_PRESET_ERROR: LIBRA_ERRNO = 3;
pub const LIBRA_ERRNO_PREPROCESS_ERROR: LIBRA_ERRNO = 4;
pub const LIBRA_ERRNO_SHADER_PARAMETER_ERROR: LIBRA_ERRNO = 5;
pub const LIBRA_ERRNO_REFLECT_ERROR: LIBRA_ERRNO = 6;
pub const LIBRA_ERRNO_RUNTIME_ERROR: LIBRA_ERRNO = 7;

/// Error categories reported by a librashader error object.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LibraErrno {
    UnknownError,
    InvalidParameter,
    InvalidString,
    PresetError,
    PreprocessError,
    ShaderParameterError,
    ReflectError,
    RuntimeError,
}

impl LibraErrno {
    pub fn from_raw(raw: LIBRA_ERRNO) -> Option<Self> {
        let errno = match raw {
            LIBRA_ERRNO_UNKNOWN_ERROR => Self::UnknownError,
            LIBRA_ERRNO_INVALID_PARAMETER => Self::InvalidParameter,
            LIBRA_ERRNO_INVALID_STRING => Self::InvalidString,
            LIBRA_ERRNO_PRESET_ERROR => Self::PresetError,
            LIBRA_ERRNO_PREPROCESS_ERROR => Self::PreprocessError,
            LIBRA_ERRNO_SHADER_PARAMETER_ERROR => Self::ShaderParameterError,
            LIBRA_ERRNO_REFLECT_ERROR => Self::ReflectError,
            LIBRA_ERRNO_RUNTIME_ERROR => Self::RuntimeError,
            _ => return None,
        };
        Some(errno)
    }

    pub fn as_raw(self) -> LIBRA_ERRNO {
        match self {
            Self::UnknownError => LIBRA_ERRNO_UNKNOWN_ERROR,
            Self::InvalidParameter => LIBRA_ERRNO_INVALID_PARAMETER,
            Self::InvalidString => LIBRA_ERRNO_INVALID_STRING,
            Self::PresetError => LIBRA_ERRNO_PRESET_ERROR,
            Self::PreprocessError => LIBRA_ERRNO_PREPROCESS_ERROR,
            Self::ShaderParameterError => LIBRA_ERRNO_SHADER_PARAMETER_ERROR,
            Self::ReflectError => LIBRA_ERRNO_REFLECT_ERROR,
            Self::RuntimeError => LIBRA_ERRNO_RUNTIME_ERROR,
        }
    }
}

/// Opaque librashader error object.
#[repr(C)]
pub struct LibraError {
    _private: [u8; 0],
}

/// Opaque shader preset object.
#[repr(C)]
pub struct ShaderPreset {
    _private: [u8; 0],
}

/// A handle to a librashader error object. `None` means success.
pub type libra_error_t = Option<NonNull<LibraError>>;

/// A handle to a shader preset object.
pub type libra_shader_preset_t = Option<NonNull<ShaderPreset>>;

/// A preset parameter.
#[repr(C)]
#[derive(Debug)]
pub struct libra_preset_param_t {
    pub name: *const c_char,
    pub description: *const c_char,
    pub initial: f32,
    pub minimum: f32,
    pub maximum: f32,
    pub step: f32,
}

/// A list of preset parameters, owned by the library that produced it.
#[repr(C)]
#[derive(Debug)]
pub struct libra_preset_param_list_t {
    pub parameters: *const libra_preset_param_t,
    pub length: u64,
    /// Changing this causes undefined behaviour when the list is freed.
    pub _internal_alloc: u64,
}

impl libra_preset_param_list_t {
    /// An empty list, suitable as the `out` argument of `preset_get_runtime_params`.
    pub const fn empty() -> Self {
        Self {
            parameters: std::ptr::null(),
            length: 0,
            _internal_alloc: 0,
        }
    }
}

impl Default for libra_preset_param_list_t {
    fn default() -> Self {
        Self::empty()
    }
}

/// Defines the output viewport for a rendered frame.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct libra_viewport_t {
    pub x: f32,
    pub y: f32,
    pub width: u32,
    pub height: u32,
}

#[cfg(feature = "runtime-opengl")]
pub use gl::*;

#[cfg(feature = "runtime-opengl")]
mod gl {
    use super::{LIBRASHADER_API_VERSION, LIBRASHADER_CURRENT_VERSION};
    use std::ffi::{c_char, c_void};
    use std::ptr::NonNull;

    /// Opaque OpenGL filter chain.
    #[repr(C)]
    pub struct FilterChainGl {
        _private: [u8; 0],
    }

    /// A handle to an OpenGL filter chain.
    pub type libra_gl_filter_chain_t = Option<NonNull<FilterChainGl>>;

    /// A GL function loader librashader is initialized with.
    pub type libra_gl_loader_t = unsafe extern "C" fn(*const c_char) -> *const c_void;

    /// Options for OpenGL filter chain creation.
    #[repr(C)]
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct filter_chain_gl_opt_t {
        pub version: LIBRASHADER_API_VERSION,
        /// Should be at least `330`.
        pub glsl_version: u16,
        pub use_dsa: bool,
        pub force_no_mipmaps: bool,
        pub disable_cache: bool,
    }

    impl Default for filter_chain_gl_opt_t {
        fn default() -> Self {
            Self {
                version: LIBRASHADER_CURRENT_VERSION,
                glsl_version: 330,
                use_dsa: false,
                force_no_mipmaps: false,
                disable_cache: false,
            }
        }
    }

    /// OpenGL parameters for the source image.
    #[repr(C)]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct libra_source_image_gl_t {
        pub handle: u32,
        pub format: u32,
        pub width: u32,
        pub height: u32,
    }

    /// OpenGL parameters for the output framebuffer.
    #[repr(C)]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct libra_output_framebuffer_gl_t {
        pub fbo: u32,
        pub texture: u32,
        pub format: u32,
    }

    /// Options for each OpenGL frame.
    #[repr(C)]
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct frame_gl_opt_t {
        pub version: LIBRASHADER_API_VERSION,
        pub clear_history: bool,
        /// -1 plays frames in reverse order.
        pub frame_direction: i32,
    }

    impl Default for frame_gl_opt_t {
        fn default() -> Self {
            Self {
                version: LIBRASHADER_CURRENT_VERSION,
                clear_history: false,
                frame_direction: 1,
            }
        }
    }
}

#[cfg(feature = "runtime-vulkan")]
pub use vk::*;

#[cfg(feature = "runtime-vulkan")]
mod vk {
    use super::{LIBRASHADER_API_VERSION, LIBRASHADER_CURRENT_VERSION};
    use std::ffi::{c_char, c_void};
    use std::ptr::NonNull;

    pub type VkFormat = i32;
    pub type VkImage = u64;
    pub type VkPhysicalDevice = *mut c_void;
    pub type VkInstance = *mut c_void;
    pub type VkDevice = *mut c_void;
    pub type VkCommandBuffer = *mut c_void;
    pub type PFN_vkVoidFunction = Option<unsafe extern "system" fn()>;
    pub type PFN_vkGetInstanceProcAddr =
        Option<unsafe extern "system" fn(VkInstance, *const c_char) -> PFN_vkVoidFunction>;

    /// Opaque Vulkan filter chain.
    #[repr(C)]
    pub struct FilterChainVulkan {
        _private: [u8; 0],
    }

    /// A handle to a Vulkan filter chain.
    pub type libra_vk_filter_chain_t = Option<NonNull<FilterChainVulkan>>;

    /// Handles required to instantiate Vulkan.
    #[repr(C)]
    #[derive(Clone, Copy, Debug)]
    pub struct libra_device_vk_t {
        pub physical_device: VkPhysicalDevice,
        pub instance: VkInstance,
        pub device: VkDevice,
        pub entry: PFN_vkGetInstanceProcAddr,
    }

    /// Options for Vulkan filter chain creation.
    #[repr(C)]
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct filter_chain_vk_opt_t {
        pub version: LIBRASHADER_API_VERSION,
        /// If zero, the library defaults to three.
        pub frames_in_flight: u32,
        pub force_no_mipmaps: bool,
        pub use_render_pass: bool,
        pub disable_cache: bool,
    }

    impl Default for filter_chain_vk_opt_t {
        fn default() -> Self {
            Self {
                version: LIBRASHADER_CURRENT_VERSION,
                frames_in_flight: 0,
                force_no_mipmaps: false,
                use_render_pass: false,
                disable_cache: false,
            }
        }
    }

    /// Vulkan parameters for the source image.
    #[repr(C)]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct libra_source_image_vk_t {
        pub handle: VkImage,
        pub format: VkFormat,
        pub width: u32,
        pub height: u32,
    }

    /// Vulkan parameters for the output image.
    #[repr(C)]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct libra_output_image_vk_t {
        pub handle: VkImage,
        pub format: VkFormat,
    }

    /// Options for each Vulkan frame.
    #[repr(C)]
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct frame_vk_opt_t {
        pub version: LIBRASHADER_API_VERSION,
        pub clear_history: bool,
        pub frame_direction: i32,
    }

    impl Default for frame_vk_opt_t {
        fn default() -> Self {
            Self {
                version: LIBRASHADER_CURRENT_VERSION,
                clear_history: false,
                frame_direction: 1,
            }
        }
    }
}

#[cfg(feature = "runtime-d3d11")]
pub use d3d11::*;

#[cfg(feature = "runtime-d3d11")]
mod d3d11 {
    use super::{LIBRASHADER_API_VERSION, LIBRASHADER_CURRENT_VERSION};
    use std::ptr::NonNull;

    #[repr(C)]
    pub struct ID3D11Device {
        _private: [u8; 0],
    }

    #[repr(C)]
    pub struct ID3D11DeviceContext {
        _private: [u8; 0],
    }

    #[repr(C)]
    pub struct ID3D11RenderTargetView {
        _private: [u8; 0],
    }

    #[repr(C)]
    pub struct ID3D11ShaderResourceView {
        _private: [u8; 0],
    }

    /// Opaque Direct3D 11 filter chain.
    #[repr(C)]
    pub struct FilterChainD3D11 {
        _private: [u8; 0],
    }

    /// A handle to a Direct3D 11 filter chain.
    pub type libra_d3d11_filter_chain_t = Option<NonNull<FilterChainD3D11>>;

    /// Options for Direct3D 11 filter chain creation.
    #[repr(C)]
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct filter_chain_d3d11_opt_t {
        pub version: LIBRASHADER_API_VERSION,
        pub force_no_mipmaps: bool,
        pub disable_cache: bool,
    }

    impl Default for filter_chain_d3d11_opt_t {
        fn default() -> Self {
            Self {
                version: LIBRASHADER_CURRENT_VERSION,
                force_no_mipmaps: false,
                disable_cache: false,
            }
        }
    }

    /// Direct3D 11 parameters for the source image.
    #[repr(C)]
    #[derive(Clone, Copy, Debug)]
    pub struct libra_source_image_d3d11_t {
        pub handle: *mut ID3D11ShaderResourceView,
        pub width: u32,
        pub height: u32,
    }

    /// Options for each Direct3D 11 frame.
    #[repr(C)]
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct frame_d3d11_opt_t {
        pub version: LIBRASHADER_API_VERSION,
        pub clear_history: bool,
        pub frame_direction: i32,
    }

    impl Default for frame_d3d11_opt_t {
        fn default() -> Self {
            Self {
                version: LIBRASHADER_CURRENT_VERSION,
                clear_history: false,
                frame_direction: 1,
            }
        }
    }
}

#[cfg(feature = "runtime-d3d12")]
pub use d3d12::*;

#[cfg(feature = "runtime-d3d12")]
mod d3d12 {
    use super::{LIBRASHADER_API_VERSION, LIBRASHADER_CURRENT_VERSION};
    use std::ptr::NonNull;

    pub type DXGI_FORMAT = i32;

    #[repr(C)]
    pub struct ID3D12Device {
        _private: [u8; 0],
    }

    #[repr(C)]
    pub struct ID3D12GraphicsCommandList {
        _private: [u8; 0],
    }

    #[repr(C)]
    pub struct ID3D12Resource {
        _private: [u8; 0],
    }

    #[repr(C)]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct D3D12_CPU_DESCRIPTOR_HANDLE {
        pub ptr: usize,
    }

    /// Opaque Direct3D 12 filter chain.
    #[repr(C)]
    pub struct FilterChainD3D12 {
        _private: [u8; 0],
    }

    /// A handle to a Direct3D 12 filter chain.
    pub type libra_d3d12_filter_chain_t = Option<NonNull<FilterChainD3D12>>;

    /// Options for Direct3D 12 filter chain creation.
    #[repr(C)]
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct filter_chain_d3d12_opt_t {
        pub version: LIBRASHADER_API_VERSION,
        /// Force the HLSL pipeline. This may reduce shader compatibility.
        pub force_hlsl_pipeline: bool,
        pub force_no_mipmaps: bool,
        pub disable_cache: bool,
    }

    impl Default for filter_chain_d3d12_opt_t {
        fn default() -> Self {
            Self {
                version: LIBRASHADER_CURRENT_VERSION,
                force_hlsl_pipeline: false,
                force_no_mipmaps: false,
                disable_cache: false,
            }
        }
    }

    /// Direct3D 12 parameters for the source image.
    #[repr(C)]
    #[derive(Clone, Copy, Debug)]
    pub struct libra_source_image_d3d12_t {
        pub resource: *mut ID3D12Resource,
        pub descriptor: D3D12_CPU_DESCRIPTOR_HANDLE,
        pub format: DXGI_FORMAT,
        pub width: u32,
        pub height: u32,
    }

    /// Direct3D 12 parameters for the output image.
    #[repr(C)]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct libra_output_image_d3d12_t {
        pub descriptor: D3D12_CPU_DESCRIPTOR_HANDLE,
        pub format: DXGI_FORMAT,
    }

    /// Options for each Direct3D 12 frame.
    #[repr(C)]
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct frame_d3d12_opt_t {
        pub version: LIBRASHADER_API_VERSION,
        pub clear_history: bool,
        pub frame_direction: i32,
    }

    impl Default for frame_d3d12_opt_t {
        fn default() -> Self {
            Self {
                version: LIBRASHADER_CURRENT_VERSION,
                clear_history: false,
                frame_direction: 1,
            }
        }
    }
}
