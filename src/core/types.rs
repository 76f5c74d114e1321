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

#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Matcher building blocks: length rules, compare modes, fault classes.

use serde::Deserialize;
use std::fmt;

/// Signal delivered by [`FaultClass::Signal`] when none is configured.
pub const DEFAULT_SIGNAL: i32 = libc::SIGSEGV;

/// Minimum-length gate applied before any byte is inspected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthRule {
    /// `len >= n`
    AtLeast(usize),
    /// `len > n`
    GreaterThan(usize),
}

impl LengthRule {
    /// Whether a buffer of `len` bytes passes the gate.
    pub fn admits(self, len: usize) -> bool {
        match self {
            LengthRule::AtLeast(n) => len >= n,
            LengthRule::GreaterThan(n) => len > n,
        }
    }
}

/// How the prefix literal is compared against the buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareMode {
    /// Count matching positions; match once `threshold` positions agree.
    Counted {
        /// Required number of agreeing positions.
        threshold: usize,
    },
    /// Short-circuit equality over the whole prefix.
    Exact,
}

/// A deliberate fault. Firing any of these (except [`FaultClass::NoOp`] and
/// the boolean-returning [`FaultClass::OobRead`]) does not return control.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FaultClass {
    /// Read `offset` bytes past the start of the buffer and compare to `sentinel`.
    OobRead {
        /// Byte offset from the buffer start.
        offset: usize,
        /// Value the read byte is compared against.
        sentinel: u8,
    },
    /// Write `value` at `offset` bytes past the start of the buffer.
    OobWrite {
        /// Byte offset from the buffer start.
        offset: usize,
        /// Value written.
        value: u8,
    },
    /// Deliver `signal` to the current process.
    Signal {
        /// Signal number.
        #[serde(default = "default_signal")]
        signal: i32,
    },
    /// Write `sentinel` one pointer width below a local stack slot.
    StackSlotWrite {
        /// Value written through the fabricated pointer.
        sentinel: usize,
    },
    /// Panic with `message`.
    Panic {
        /// Panic payload.
        message: String,
    },
    /// Write `value` through a null pointer.
    NullWrite {
        /// Value written.
        #[serde(default = "default_null_value")]
        value: i32,
    },
    /// Zero `words` ints ending at a local stack slot.
    StackUnderflow {
        /// Number of `i32` slots cleared below the local.
        words: usize,
    },
    /// Free one heap allocation twice.
    DoubleFree,
    /// Free a heap allocation, then write through it.
    UseAfterFree,
    /// Allocate `alloc_words` ints and zero `write_words` of them.
    HeapOverflow {
        /// Allocated `i32` slots.
        alloc_words: usize,
        /// Written `i32` slots.
        write_words: usize,
    },
    /// Integer division by zero, surfaced as SIGFPE.
    DivideByZero,
    /// Matched, nothing happens.
    NoOp,
}

fn default_signal() -> i32 {
    DEFAULT_SIGNAL
}

fn default_null_value() -> i32 {
    123
}

impl FaultClass {
    /// Short stable name used in logs and the runner listing.
    pub fn name(&self) -> &'static str {
        match self {
            FaultClass::OobRead { .. } => "oob_read",
            FaultClass::OobWrite { .. } => "oob_write",
            FaultClass::Signal { .. } => "signal",
            FaultClass::StackSlotWrite { .. } => "stack_slot_write",
            FaultClass::Panic { .. } => "panic",
            FaultClass::NullWrite { .. } => "null_write",
            FaultClass::StackUnderflow { .. } => "stack_underflow",
            FaultClass::DoubleFree => "double_free",
            FaultClass::UseAfterFree => "use_after_free",
            FaultClass::HeapOverflow { .. } => "heap_overflow",
            FaultClass::DivideByZero => "divide_by_zero",
            FaultClass::NoOp => "no_op",
        }
    }
}

impl fmt::Display for FaultClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaultClass::OobRead { offset, sentinel } => {
                write!(f, "oob_read(offset={offset}, sentinel={sentinel:#04x})")
            }
            FaultClass::OobWrite { offset, value } => {
                write!(f, "oob_write(offset={offset}, value={value:#04x})")
            }
            FaultClass::Signal { signal } => write!(f, "signal({signal})"),
            FaultClass::StackSlotWrite { sentinel } => write!(f, "stack_slot_write({sentinel:#x})"),
            FaultClass::Panic { message } => write!(f, "panic({message:?})"),
            FaultClass::NullWrite { value } => write!(f, "null_write({value})"),
            FaultClass::StackUnderflow { words } => write!(f, "stack_underflow(words={words})"),
            FaultClass::HeapOverflow {
                alloc_words,
                write_words,
            } => write!(f, "heap_overflow(alloc={alloc_words}, write={write_words})"),
            other => f.write_str(other.name()),
        }
    }
}

/// Side-effect-free classification of a buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision<'a> {
    /// Too short, or the prefix did not match.
    NoMatch,
    /// Prefix matched on a fixture without a selector.
    Matched,
    /// Prefix matched but the selector byte has no table entry.
    UnknownSelector(u8),
    /// Prefix matched and the selector picked this fault.
    Fault(&'a FaultClass),
}
