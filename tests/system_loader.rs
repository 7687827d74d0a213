// Loading through the platform dynamic loader.
use std::io::Write;

use rashader_loader::{
    Capability, ErrorKind, LibraryLoader, LoadState, SystemLoader, load_instance, load_with,
};

#[test]
fn missing_library_is_open_failed() {
    let table = load_with(&SystemLoader, "librashader-not-installed-9f2d.so");
    assert_eq!(table.state(), LoadState::OpenFailed);
    assert!(!table.fully_loaded());
    assert_eq!(table.bound_count(), 0);
}

#[test]
fn junk_file_is_open_failed() {
    let mut file = tempfile::Builder::new()
        .prefix("librashader")
        .suffix(".so")
        .tempfile()
        .expect("tempfile");
    file.write_all(b"this is not a shared object").expect("write");
    file.flush().expect("flush");
    let path = file.path().to_str().expect("utf8 path").to_string();

    let err = match SystemLoader.open(&path) {
        Ok(_) => panic!("junk file opened as a library"),
        Err(err) => err,
    };
    assert_ne!(err.kind(), ErrorKind::Usage);
    assert_eq!(err.library(), Some(path.as_str()));

    let table = load_with(&SystemLoader, &path);
    assert_eq!(table.state(), LoadState::OpenFailed);
}

#[cfg(target_os = "linux")]
#[test]
fn foreign_library_fails_the_abi_gate() {
    let table = load_with(&SystemLoader, "libc.so.6");
    assert_eq!(table.state(), LoadState::AbiMismatch { reported: 0 });
    assert!(!table.fully_loaded());
    assert!(table.library().is_some());
    for capability in Capability::all() {
        assert!(!table.is_bound(capability), "{} bound", capability.name());
    }
}

#[test]
fn default_instance_never_panics() {
    let table = load_instance();
    if !table.fully_loaded() {
        assert_ne!(table.state(), LoadState::FullyLoaded);
    }
    let mut out = None;
    let err = unsafe { (table.preset_create())(c"nonexistent.slangp".as_ptr(), &mut out) };
    if !table.is_bound(Capability::PresetCreate) {
        assert!(err.is_none());
        assert!(out.is_none());
    }
}
