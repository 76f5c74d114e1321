// Copyright (c) 2026 Faultbait
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//     http://www.apache.org/licenses/LICENSE-2.0
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#![allow(unsafe_code)]
#![warn(missing_docs)]

//! Fault primitives.
//!
//! Every function here performs undefined behaviour or terminates the
//! process on purpose. They are only reachable through [`LiveFaults`], which
//! the matcher calls after the discriminator and selector checks pass.
//! Volatile accesses and `black_box` keep the optimiser from folding the
//! faulting access away.

use std::hint::black_box;
use std::mem::size_of;
use std::ptr;

use tracing::warn;

use crate::core::types::FaultClass;

/// Receives the fault class chosen by the matcher.
pub trait FaultSink {
    /// Fire `class` against `data`. The return value becomes the result of
    /// `evaluate` for classes that return at all.
    fn fire(&self, class: &FaultClass, data: &[u8]) -> bool;
}

/// The sink that actually faults.
#[derive(Clone, Copy, Debug, Default)]
pub struct LiveFaults;

impl FaultSink for LiveFaults {
    fn fire(&self, class: &FaultClass, data: &[u8]) -> bool {
        warn!(fault = %class, len = data.len(), "triggering fault");
        match class {
            FaultClass::OobRead { offset, sentinel } => oob_read(data, *offset) == *sentinel,
            FaultClass::OobWrite { offset, value } => {
                oob_write(data, *offset, *value);
                false
            }
            FaultClass::Signal { signal } => raise_signal(*signal),
            FaultClass::StackSlotWrite { sentinel } => {
                stack_slot_write(1337, *sentinel);
                false
            }
            FaultClass::Panic { message } => panic!("{message}"),
            FaultClass::NullWrite { value } => {
                null_write(*value);
                false
            }
            FaultClass::StackUnderflow { words } => {
                stack_underflow(*words);
                false
            }
            FaultClass::DoubleFree => {
                double_free();
                false
            }
            FaultClass::UseAfterFree => {
                use_after_free();
                false
            }
            FaultClass::HeapOverflow {
                alloc_words,
                write_words,
            } => {
                heap_overflow(*alloc_words, *write_words);
                false
            }
            FaultClass::DivideByZero => {
                divide_by_zero(123);
                false
            }
            FaultClass::NoOp => false,
        }
    }
}

/// Read the byte `offset` past the start of `data`, ignoring its length.
#[inline(never)]
pub fn oob_read(data: &[u8], offset: usize) -> u8 {
    let p = black_box(data.as_ptr()).wrapping_add(offset);
    unsafe { ptr::read_volatile(p) }
}

/// Write `value` at `offset` past the start of `data`, ignoring its length
/// and its immutability.
#[inline(never)]
pub fn oob_write(data: &[u8], offset: usize, value: u8) {
    let p = black_box(data.as_ptr() as *mut u8).wrapping_add(offset);
    unsafe { ptr::write_volatile(p, value) }
}

/// Send `signal` to this process. Rust's runtime handles one SIGSEGV that
/// was not caused by a guard-page hit by resetting the disposition and
/// returning, so a surviving process restores the default action and
/// raises again before falling back to abort.
#[cfg(unix)]
pub fn raise_signal(signal: i32) -> ! {
    unsafe {
        libc::kill(libc::getpid(), signal);
        libc::signal(signal, libc::SIG_DFL);
        libc::raise(signal);
    }
    std::process::abort()
}

/// Signals are unavailable; abort instead.
#[cfg(not(unix))]
pub fn raise_signal(_signal: i32) -> ! {
    std::process::abort()
}

/// Write `sentinel` into the pointer-sized slot directly below `value`'s
/// stack slot.
#[inline(never)]
pub fn stack_slot_write(value: usize, sentinel: usize) {
    let value = black_box(value);
    let addr = (&value as *const usize as usize).wrapping_sub(size_of::<usize>());
    let p = black_box(addr as *mut usize);
    unsafe { ptr::write_volatile(p, sentinel) }
    black_box(value);
}

/// Store through a null pointer.
#[inline(never)]
pub fn null_write(value: i32) {
    let p: *mut i32 = black_box(ptr::null_mut());
    unsafe { ptr::write_volatile(p, value) }
}

/// Zero `words` ints starting `words` slots below a local counter.
#[inline(never)]
pub fn stack_underflow(words: usize) {
    let mut cnt: i32 = black_box(0);
    let base = black_box(&mut cnt as *mut i32).wrapping_sub(words);
    for i in 0..words {
        unsafe { ptr::write_volatile(base.wrapping_add(i), 0) }
    }
    black_box(cnt);
}

/// `malloc`, then `free` twice.
#[inline(never)]
pub fn double_free() {
    unsafe {
        let p = black_box(libc::malloc(size_of::<i32>()));
        libc::free(p);
        libc::free(p);
    }
}

/// `malloc`, `free`, then store through the stale pointer.
#[inline(never)]
pub fn use_after_free() {
    unsafe {
        let p = black_box(libc::malloc(size_of::<i32>()) as *mut i32);
        libc::free(p as *mut libc::c_void);
        ptr::write_volatile(p, 123);
    }
}

/// Allocate `alloc_words` ints and zero `write_words` of them.
#[inline(never)]
pub fn heap_overflow(alloc_words: usize, write_words: usize) {
    unsafe {
        let p = black_box(libc::malloc(alloc_words.saturating_mul(size_of::<i32>())) as *mut i32);
        for i in 0..write_words {
            ptr::write_volatile(p.wrapping_add(i), 0);
        }
        libc::free(p as *mut libc::c_void);
    }
}

/// Divide `numerator` by zero. Rust checks integer division, so the trap a
/// native division would produce is delivered as SIGFPE by hand.
#[inline(never)]
pub fn divide_by_zero(numerator: i32) -> i32 {
    match numerator.checked_div(black_box(0)) {
        Some(q) => q,
        None => fpe(),
    }
}

#[cfg(unix)]
fn fpe() -> ! {
    raise_signal(libc::SIGFPE)
}

#[cfg(not(unix))]
fn fpe() -> ! {
    std::process::abort()
}
