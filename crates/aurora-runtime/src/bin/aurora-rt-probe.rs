//! Stand-in for a compiled Aurora program.
//!
//! Owns `main` the way generated code does and drives the runtime only
//! through its exported symbols. The first argument picks the call sequence;
//! the end-to-end tests inspect the resulting streams and exit status.

use std::ffi::{CStr, c_char};
use std::process::ExitCode;

use aurora_runtime::{
    aurora_alloc, aurora_alloc_zeroed, aurora_free, aurora_panic, aurora_panic_bounds_check,
    aurora_panic_msg, aurora_panic_unwrap_err, aurora_panic_unwrap_none, aurora_print,
    aurora_println, aurora_realloc, aurora_runtime_version,
};

const NULL: *const c_char = std::ptr::null();

/// Abort through the runtime, as generated code does on a failed check.
fn check(ok: bool, what: &CStr) {
    if !ok {
        unsafe { aurora_panic(what.as_ptr(), c"aurora-rt-probe".as_ptr(), 0) }
    }
}

unsafe fn alloc_roundtrip() {
    unsafe {
        let block = aurora_alloc(16) as *mut u8;
        check(!block.is_null(), c"allocation of 16 bytes failed");
        for i in 0..16u8 {
            block.add(usize::from(i)).write(i);
        }
        for i in 0..16u8 {
            check(block.add(usize::from(i)).read() == i, c"byte mismatch after write");
        }
        aurora_free(block.cast());
    }
}

unsafe fn realloc_preserves() {
    unsafe {
        let block = aurora_alloc(4) as *mut u8;
        check(!block.is_null(), c"allocation of 4 bytes failed");
        std::ptr::copy_nonoverlapping(b"test".as_ptr(), block, 4);

        let grown = aurora_realloc(block.cast(), 8) as *mut u8;
        check(!grown.is_null(), c"reallocation to 8 bytes failed");
        grown.add(4).write(0);
        aurora_println(grown.cast());
        aurora_free(grown.cast());
    }
}

unsafe fn realloc_null() {
    unsafe {
        let block = aurora_realloc(std::ptr::null_mut(), 3) as *mut u8;
        check(!block.is_null(), c"reallocation of null failed");
        std::ptr::copy_nonoverlapping(b"ok\0".as_ptr(), block, 3);
        aurora_println(block.cast());
        aurora_free(block.cast());
    }
}

unsafe fn alloc_zeroed() {
    unsafe {
        let block = aurora_alloc_zeroed(64) as *const u8;
        check(!block.is_null(), c"zeroed allocation failed");
        check(
            std::slice::from_raw_parts(block, 64).iter().all(|&b| b == 0),
            c"zeroed allocation has non-zero bytes",
        );
        aurora_free(block.cast_mut().cast());
    }
}

fn main() -> ExitCode {
    let Some(scenario) = std::env::args().nth(1) else {
        eprintln!("usage: aurora-rt-probe <scenario>");
        return ExitCode::from(2);
    };

    unsafe {
        match scenario.as_str() {
            "println-hello" => aurora_println(c"hello".as_ptr()),
            "print-then-println" => {
                aurora_print(c"ab".as_ptr());
                aurora_println(c"cd".as_ptr());
            }
            "print-null" => {
                aurora_println(NULL);
                aurora_print(NULL);
            }
            "raw-bytes" => aurora_println(c"\xff\xfe raw".as_ptr()),
            "alloc-roundtrip" => alloc_roundtrip(),
            "realloc-preserves" => realloc_preserves(),
            "realloc-null" => realloc_null(),
            "alloc-zeroed" => alloc_zeroed(),
            "free-null" => aurora_free(std::ptr::null_mut()),
            "version" => aurora_println(aurora_runtime_version()),
            "panic" => aurora_panic(c"boom".as_ptr(), c"x.au".as_ptr(), 42),
            "panic-null" => aurora_panic(NULL, NULL, 7),
            "panic-msg" => aurora_panic_msg(c"out of memory".as_ptr()),
            "bounds-check" => aurora_panic_bounds_check(10, 4, c"vec.au".as_ptr(), 17),
            "unwrap-none" => aurora_panic_unwrap_none(c"opt.au".as_ptr(), 3),
            "unwrap-err" => aurora_panic_unwrap_err(c"timeout".as_ptr(), c"net.au".as_ptr(), 88),
            other => {
                eprintln!("unknown scenario: {other}");
                return ExitCode::from(2);
            }
        }
    }

    ExitCode::SUCCESS
}
