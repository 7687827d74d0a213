//! Purpose: Inert implementations bound to every slot of the default capability table.
//! Exports: One `unsafe extern "C"` function per capability, named after the capability.
//! Role: Makes an unloaded or partially loaded table safe to call without availability checks.
//! Invariants: No allocation, no global state, no I/O; results depend only on arguments.
//! Invariants: Version queries return 0; handle-producing calls write the absent handle.
//! Invariants: `libra_error_t` results are always the absent error (success).
//! Invariants: Error-object helpers return 1 ("nothing done"); `error_errno` returns UNKNOWN_ERROR.
use std::ffi::c_char;

use crate::ctypes::*;

/// Writes the absent handle through `out` when the caller supplied one.
///
/// # Safety
///
/// `out` must be null or aligned and valid for writes.
unsafe fn clear_out<T>(out: *mut Option<T>) {
    if !out.is_null() {
        // SAFETY: Caller guarantees a non-null `out` is aligned and writable.
        unsafe { out.write(None) };
    }
}

pub(crate) unsafe extern "C" fn instance_abi_version() -> LIBRASHADER_ABI_VERSION {
    0
}

pub(crate) unsafe extern "C" fn instance_api_version() -> LIBRASHADER_API_VERSION {
    0
}

pub(crate) unsafe extern "C" fn preset_create(
    _filename: *const c_char,
    out: *mut libra_shader_preset_t,
) -> libra_error_t {
    // SAFETY: The capability contract requires `out` to be null or aligned.
    unsafe { clear_out(out) };
    None
}

pub(crate) unsafe extern "C" fn preset_free(_preset: *mut libra_shader_preset_t) -> libra_error_t {
    None
}

pub(crate) unsafe extern "C" fn preset_set_param(
    _preset: *mut libra_shader_preset_t,
    _name: *const c_char,
    _value: f32,
) -> libra_error_t {
    None
}

pub(crate) unsafe extern "C" fn preset_get_param(
    _preset: *mut libra_shader_preset_t,
    _name: *const c_char,
    _value: *mut f32,
) -> libra_error_t {
    None
}

pub(crate) unsafe extern "C" fn preset_print(_preset: *mut libra_shader_preset_t) -> libra_error_t {
    None
}

pub(crate) unsafe extern "C" fn preset_get_runtime_params(
    _preset: *mut libra_shader_preset_t,
    _out: *mut libra_preset_param_list_t,
) -> libra_error_t {
    None
}

pub(crate) unsafe extern "C" fn preset_free_runtime_params(
    _preset: libra_preset_param_list_t,
) -> libra_error_t {
    None
}

pub(crate) unsafe extern "C" fn error_errno(_error: libra_error_t) -> LIBRA_ERRNO {
    LIBRA_ERRNO_UNKNOWN_ERROR
}

pub(crate) unsafe extern "C" fn error_print(_error: libra_error_t) -> i32 {
    1
}

pub(crate) unsafe extern "C" fn error_free(_error: *mut libra_error_t) -> i32 {
    1
}

pub(crate) unsafe extern "C" fn error_write(_error: libra_error_t, _out: *mut *mut c_char) -> i32 {
    1
}

pub(crate) unsafe extern "C" fn error_free_string(_out: *mut *mut c_char) -> i32 {
    1
}

#[cfg(feature = "runtime-opengl")]
pub(crate) use gl::*;

#[cfg(feature = "runtime-opengl")]
mod gl {
    use super::clear_out;
    use crate::ctypes::*;
    use std::ffi::c_char;

    pub(crate) unsafe extern "C" fn gl_init_context(_loader: libra_gl_loader_t) -> libra_error_t {
        None
    }

    pub(crate) unsafe extern "C" fn gl_filter_chain_create(
        _preset: *mut libra_shader_preset_t,
        _options: *const filter_chain_gl_opt_t,
        out: *mut libra_gl_filter_chain_t,
    ) -> libra_error_t {
        // SAFETY: The capability contract requires `out` to be null or aligned.
        unsafe { clear_out(out) };
        None
    }

    pub(crate) unsafe extern "C" fn gl_filter_chain_frame(
        _chain: *mut libra_gl_filter_chain_t,
        _frame_count: usize,
        _image: libra_source_image_gl_t,
        _viewport: libra_viewport_t,
        _out: libra_output_framebuffer_gl_t,
        _mvp: *const f32,
        _opt: *const frame_gl_opt_t,
    ) -> libra_error_t {
        None
    }

    pub(crate) unsafe extern "C" fn gl_filter_chain_free(
        _chain: *mut libra_gl_filter_chain_t,
    ) -> libra_error_t {
        None
    }

    pub(crate) unsafe extern "C" fn gl_filter_chain_set_param(
        _chain: *mut libra_gl_filter_chain_t,
        _param_name: *const c_char,
        _value: f32,
    ) -> libra_error_t {
        None
    }

    pub(crate) unsafe extern "C" fn gl_filter_chain_get_param(
        _chain: *mut libra_gl_filter_chain_t,
        _param_name: *const c_char,
        _out: *mut f32,
    ) -> libra_error_t {
        None
    }

    pub(crate) unsafe extern "C" fn gl_filter_chain_set_active_pass_count(
        _chain: *mut libra_gl_filter_chain_t,
        _value: u32,
    ) -> libra_error_t {
        None
    }

    pub(crate) unsafe extern "C" fn gl_filter_chain_get_active_pass_count(
        _chain: *mut libra_gl_filter_chain_t,
        _out: *mut u32,
    ) -> libra_error_t {
        None
    }
}

#[cfg(feature = "runtime-vulkan")]
pub(crate) use vk::*;

#[cfg(feature = "runtime-vulkan")]
mod vk {
    use super::clear_out;
    use crate::ctypes::*;
    use std::ffi::c_char;

    pub(crate) unsafe extern "C" fn vk_filter_chain_create(
        _preset: *mut libra_shader_preset_t,
        _vulkan: libra_device_vk_t,
        _options: *const filter_chain_vk_opt_t,
        out: *mut libra_vk_filter_chain_t,
    ) -> libra_error_t {
        // SAFETY: The capability contract requires `out` to be null or aligned.
        unsafe { clear_out(out) };
        None
    }

    pub(crate) unsafe extern "C" fn vk_filter_chain_create_deferred(
        _preset: *mut libra_shader_preset_t,
        _vulkan: libra_device_vk_t,
        _command_buffer: VkCommandBuffer,
        _options: *const filter_chain_vk_opt_t,
        out: *mut libra_vk_filter_chain_t,
    ) -> libra_error_t {
        // SAFETY: The capability contract requires `out` to be null or aligned.
        unsafe { clear_out(out) };
        None
    }

    pub(crate) unsafe extern "C" fn vk_filter_chain_frame(
        _chain: *mut libra_vk_filter_chain_t,
        _command_buffer: VkCommandBuffer,
        _frame_count: usize,
        _image: libra_source_image_vk_t,
        _viewport: libra_viewport_t,
        _out: libra_output_image_vk_t,
        _mvp: *const f32,
        _opt: *const frame_vk_opt_t,
    ) -> libra_error_t {
        None
    }

    pub(crate) unsafe extern "C" fn vk_filter_chain_free(
        _chain: *mut libra_vk_filter_chain_t,
    ) -> libra_error_t {
        None
    }

    pub(crate) unsafe extern "C" fn vk_filter_chain_set_param(
        _chain: *mut libra_vk_filter_chain_t,
        _param_name: *const c_char,
        _value: f32,
    ) -> libra_error_t {
        None
    }

    pub(crate) unsafe extern "C" fn vk_filter_chain_get_param(
        _chain: *mut libra_vk_filter_chain_t,
        _param_name: *const c_char,
        _out: *mut f32,
    ) -> libra_error_t {
        None
    }

    pub(crate) unsafe extern "C" fn vk_filter_chain_set_active_pass_count(
        _chain: *mut libra_vk_filter_chain_t,
        _value: u32,
    ) -> libra_error_t {
        None
    }

    pub(crate) unsafe extern "C" fn vk_filter_chain_get_active_pass_count(
        _chain: *mut libra_vk_filter_chain_t,
        _out: *mut u32,
    ) -> libra_error_t {
        None
    }
}

#[cfg(feature = "runtime-d3d11")]
pub(crate) use d3d11::*;

#[cfg(feature = "runtime-d3d11")]
mod d3d11 {
    use super::clear_out;
    use crate::ctypes::*;
    use std::ffi::c_char;

    pub(crate) unsafe extern "C" fn d3d11_filter_chain_create(
        _preset: *mut libra_shader_preset_t,
        _device: *mut ID3D11Device,
        _options: *const filter_chain_d3d11_opt_t,
        out: *mut libra_d3d11_filter_chain_t,
    ) -> libra_error_t {
        // SAFETY: The capability contract requires `out` to be null or aligned.
        unsafe { clear_out(out) };
        None
    }

    pub(crate) unsafe extern "C" fn d3d11_filter_chain_create_deferred(
        _preset: *mut libra_shader_preset_t,
        _device: *mut ID3D11Device,
        _device_context: *mut ID3D11DeviceContext,
        _options: *const filter_chain_d3d11_opt_t,
        out: *mut libra_d3d11_filter_chain_t,
    ) -> libra_error_t {
        // SAFETY: The capability contract requires `out` to be null or aligned.
        unsafe { clear_out(out) };
        None
    }

    pub(crate) unsafe extern "C" fn d3d11_filter_chain_frame(
        _chain: *mut libra_d3d11_filter_chain_t,
        _device_context: *mut ID3D11DeviceContext,
        _frame_count: usize,
        _image: libra_source_image_d3d11_t,
        _viewport: libra_viewport_t,
        _out: *mut ID3D11RenderTargetView,
        _mvp: *const f32,
        _options: *const frame_d3d11_opt_t,
    ) -> libra_error_t {
        None
    }

    pub(crate) unsafe extern "C" fn d3d11_filter_chain_free(
        _chain: *mut libra_d3d11_filter_chain_t,
    ) -> libra_error_t {
        None
    }

    pub(crate) unsafe extern "C" fn d3d11_filter_chain_set_param(
        _chain: *mut libra_d3d11_filter_chain_t,
        _param_name: *const c_char,
        _value: f32,
    ) -> libra_error_t {
        None
    }

    pub(crate) unsafe extern "C" fn d3d11_filter_chain_get_param(
        _chain: *mut libra_d3d11_filter_chain_t,
        _param_name: *const c_char,
        _out: *mut f32,
    ) -> libra_error_t {
        None
    }

    pub(crate) unsafe extern "C" fn d3d11_filter_chain_set_active_pass_count(
        _chain: *mut libra_d3d11_filter_chain_t,
        _value: u32,
    ) -> libra_error_t {
        None
    }

    pub(crate) unsafe extern "C" fn d3d11_filter_chain_get_active_pass_count(
        _chain: *mut libra_d3d11_filter_chain_t,
        _out: *mut u32,
    ) -> libra_error_t {
        None
    }
}

#[cfg(feature = "runtime-d3d12")]
pub(crate) use d3d12::*;

#[cfg(feature = "runtime-d3d12")]
mod d3d12 {
    use super::clear_out;
    use crate::ctypes::*;
    use std::ffi::c_char;

    pub(crate) unsafe extern "C" fn d3d12_filter_chain_create(
        _preset: *mut libra_shader_preset_t,
        _device: *mut ID3D12Device,
        _options: *const filter_chain_d3d12_opt_t,
        out: *mut libra_d3d12_filter_chain_t,
    ) -> libra_error_t {
        // SAFETY: The capability contract requires `out` to be null or aligned.
        unsafe { clear_out(out) };
        None
    }

    pub(crate) unsafe extern "C" fn d3d12_filter_chain_create_deferred(
        _preset: *mut libra_shader_preset_t,
        _device: *mut ID3D12Device,
        _command_list: *mut ID3D12GraphicsCommandList,
        _options: *const filter_chain_d3d12_opt_t,
        out: *mut libra_d3d12_filter_chain_t,
    ) -> libra_error_t {
        // SAFETY: The capability contract requires `out` to be null or aligned.
        unsafe { clear_out(out) };
        None
    }

    pub(crate) unsafe extern "C" fn d3d12_filter_chain_frame(
        _chain: *mut libra_d3d12_filter_chain_t,
        _command_list: *mut ID3D12GraphicsCommandList,
        _frame_count: usize,
        _image: libra_source_image_d3d12_t,
        _viewport: libra_viewport_t,
        _out: libra_output_image_d3d12_t,
        _mvp: *const f32,
        _options: *const frame_d3d12_opt_t,
    ) -> libra_error_t {
        None
    }

    pub(crate) unsafe extern "C" fn d3d12_filter_chain_free(
        _chain: *mut libra_d3d12_filter_chain_t,
    ) -> libra_error_t {
        None
    }

    pub(crate) unsafe extern "C" fn d3d12_filter_chain_set_param(
        _chain: *mut libra_d3d12_filter_chain_t,
        _param_name: *const c_char,
        _value: f32,
    ) -> libra_error_t {
        None
    }

    pub(crate) unsafe extern "C" fn d3d12_filter_chain_get_param(
        _chain: *mut libra_d3d12_filter_chain_t,
        _param_name: *const c_char,
        _out: *mut f32,
    ) -> libra_error_t {
        None
    }

    pub(crate) unsafe extern "C" fn d3d12_filter_chain_set_active_pass_count(
        _chain: *mut libra_d3d12_filter_chain_t,
        _value: u32,
    ) -> libra_error_t {
        None
    }

    pub(crate) unsafe extern "C" fn d3d12_filter_chain_get_active_pass_count(
        _chain: *mut libra_d3d12_filter_chain_t,
        _out: *mut u32,
    ) -> libra_error_t {
        None
    }
}
