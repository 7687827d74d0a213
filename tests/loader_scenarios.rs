// Loader behavior against in-memory libraries: absent, ABI mismatch, complete, partial.
use std::ffi::{CStr, c_char, c_void};
use std::ptr::NonNull;
use std::sync::atomic::{AtomicUsize, Ordering};

use rashader_loader::ctypes::{
    LIBRASHADER_ABI_VERSION, LIBRASHADER_API_VERSION, libra_error_t, libra_shader_preset_t,
};
use rashader_loader::{
    Capability, CapabilityTable, InMemoryLibrary, InMemoryLoader, LoadReport, LoadState, load_with,
};

const NAME: &str = "librashader.so";
const SENTINEL_PRESET: usize = 0x5e7;
const SENTINEL_ERROR: usize = 0xe77;

static PRESET_CREATE_CALLS: AtomicUsize = AtomicUsize::new(0);

unsafe extern "C" fn abi_one() -> LIBRASHADER_ABI_VERSION {
    1
}

unsafe extern "C" fn abi_two() -> LIBRASHADER_ABI_VERSION {
    2
}

unsafe extern "C" fn api_zero() -> LIBRASHADER_API_VERSION {
    0
}

unsafe extern "C" fn preset_create(
    filename: *const c_char,
    out: *mut libra_shader_preset_t,
) -> libra_error_t {
    PRESET_CREATE_CALLS.fetch_add(1, Ordering::SeqCst);
    let filename = unsafe { CStr::from_ptr(filename) };
    if filename.to_bytes() == b"missing.slangp" {
        return NonNull::new(SENTINEL_ERROR as *mut _);
    }
    unsafe { out.write(NonNull::new(SENTINEL_PRESET as *mut _)) };
    None
}

// Every symbol starts as the default implementation, which has the right signature.
fn full_library() -> InMemoryLibrary {
    let defaults = CapabilityTable::default();
    let mut library = InMemoryLibrary::new();
    for capability in Capability::all() {
        library.insert(capability.symbol_str(), defaults.address(capability));
    }
    library
        .insert("libra_instance_abi_version", abi_one as *const c_void)
        .insert("libra_instance_api_version", api_zero as *const c_void)
        .insert("libra_preset_create", preset_create as *const c_void);
    library
}

fn load(library: InMemoryLibrary) -> CapabilityTable {
    load_with(&InMemoryLoader::new().with_library(NAME, library), NAME)
}

fn create(table: &CapabilityTable, path: &CStr) -> (libra_error_t, libra_shader_preset_t) {
    let mut out: libra_shader_preset_t = NonNull::new(0x1 as *mut _);
    let err = unsafe { (table.preset_create())(path.as_ptr(), &mut out) };
    (err, out)
}

#[test]
fn absent_library_yields_callable_defaults() {
    let table = load_with(&InMemoryLoader::new(), NAME);
    assert_eq!(table.state(), LoadState::OpenFailed);
    assert!(!table.fully_loaded());
    assert_eq!(table.abi_version(), 0);

    let (err, out) = create(&table, c"crt-royale.slangp");
    assert!(err.is_none());
    assert!(out.is_none());
}

#[test]
fn abi_mismatch_keeps_operations_on_defaults() {
    let mut library = full_library();
    library.insert("libra_instance_abi_version", abi_two as *const c_void);
    let table = load(library);

    assert_eq!(table.state(), LoadState::AbiMismatch { reported: 2 });
    assert!(!table.fully_loaded());
    assert_eq!(table.abi_version(), 2);
    assert!(!table.is_bound(Capability::PresetCreate));

    let (err, out) = create(&table, c"crt-royale.slangp");
    assert!(err.is_none());
    assert!(out.is_none());

    let non_bootstrap_bound = Capability::all()
        .into_iter()
        .filter(|capability| !capability.is_bootstrap())
        .any(|capability| table.is_bound(capability));
    assert!(!non_bootstrap_bound);
}

#[test]
fn complete_library_forwards_every_operation() {
    let table = load(full_library());
    assert_eq!(table.state(), LoadState::FullyLoaded);
    assert!(table.fully_loaded());
    assert_eq!(table.abi_version(), 1);
    assert_eq!(table.bound_count(), Capability::all().len());

    let (err, out) = create(&table, c"crt-royale.slangp");
    assert!(err.is_none());
    assert_eq!(out.map(|handle| handle.as_ptr() as usize), Some(SENTINEL_PRESET));

    let (err, _) = create(&table, c"missing.slangp");
    assert_eq!(err.map(|error| error.as_ptr() as usize), Some(SENTINEL_ERROR));
    assert!(PRESET_CREATE_CALLS.load(Ordering::SeqCst) >= 2);
}

#[test]
fn missing_optional_symbol_defaults_only_that_slot() {
    let mut library = full_library();
    library.remove("libra_preset_print");
    let table = load(library);

    assert!(table.fully_loaded());
    assert!(!table.is_bound(Capability::PresetPrint));
    assert_eq!(table.bound_count(), Capability::all().len() - 1);

    let mut preset: libra_shader_preset_t = None;
    let err = unsafe { (table.preset_print())(&mut preset) };
    assert!(err.is_none());

    let (_, out) = create(&table, c"crt-royale.slangp");
    assert_eq!(out.map(|handle| handle.as_ptr() as usize), Some(SENTINEL_PRESET));
}

#[test]
fn reexported_defaults_keep_their_behavior() {
    let table = load(full_library());
    assert!(table.is_bound(Capability::ErrorErrno));
    let mut message: *mut c_char = std::ptr::null_mut();
    unsafe {
        assert_eq!((table.error_errno())(None), 0);
        assert_eq!((table.error_write())(None, &mut message), 1);
        assert_eq!((table.error_free_string())(&mut message), 1);
    }
    assert!(message.is_null());
}

#[test]
fn repeated_loads_agree_slot_by_slot() {
    let mut library = full_library();
    library.remove("libra_error_write").remove("libra_preset_free");
    let loader = InMemoryLoader::new().with_library(NAME, library);

    let first = LoadReport::from_table(&load_with(&loader, NAME));
    let second = LoadReport::from_table(&load_with(&loader, NAME));
    assert_eq!(first.state, second.state);
    let bound = |report: &LoadReport| {
        report
            .capabilities
            .iter()
            .map(|status| (status.name, status.bound))
            .collect::<Vec<_>>()
    };
    assert_eq!(bound(&first), bound(&second));
    assert_eq!(first.bound, Capability::all().len() - 2);
}

#[test]
fn tables_can_be_shared_between_threads() {
    let table = std::sync::Arc::new(load(full_library()));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let table = table.clone();
            std::thread::spawn(move || {
                let (err, out) = create(&table, c"crt-royale.slangp");
                err.is_none() && out.is_some()
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().expect("thread"));
    }
}
