//! Stack capture and call-site resolution.
//!
//! A [`CapturedStack`] pairs the `#[track_caller]` location of the public entry
//! point with whatever frames [`std::backtrace::Backtrace`] could symbolize.
//! The [`Resolver`] then picks the one frame worth showing to a human: the
//! first frame of the configured owning component when there is one, the
//! caller's own location otherwise.
//!
//! # Examples
//!
//! ```
//! use outcome_rail::callsite::{CapturedStack, Resolver, StackFrame};
//!
//! let stack = CapturedStack::from_frames(vec![
//!     StackFrame::new("outcome_rail::context::annotate", Some("src/context/mod.rs"), Some(40)),
//!     StackFrame::new("billing::invoice::send", Some("src/invoice.rs"), Some(12)),
//! ]);
//!
//! let site = Resolver::new(None).call_site(&stack).unwrap();
//! assert_eq!(site.to_string(), "src/invoice.rs:12");
//! ```
use core::fmt::{self, Display};
use std::backtrace::{Backtrace, BacktraceStatus};
use std::panic::Location;

/// Symbol prefixes that never count as caller frames.
const INTERNAL_PREFIXES: &[&str] = &[
    "outcome_rail::",
    "<outcome_rail::",
    "std::",
    "<std::",
    "core::",
    "<core::",
    "alloc::",
    "<alloc::",
    "backtrace::",
    "rust_begin_unwind",
    "__rust",
    "__libc_start",
    "_start",
];

/// A resolved `file:line` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CallSite {
    pub file: String,
    pub line: Option<u32>,
}

impl CallSite {
    #[inline]
    pub fn new(file: impl Into<String>, line: Option<u32>) -> Self {
        Self { file: file.into(), line }
    }
}

impl Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.file, line),
            None => f.write_str(&self.file),
        }
    }
}

/// One frame of a captured stack.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StackFrame {
    pub symbol: String,
    pub file: Option<String>,
    pub line: Option<u32>,
}

impl StackFrame {
    pub fn new(symbol: impl Into<String>, file: Option<&str>, line: Option<u32>) -> Self {
        Self { symbol: symbol.into(), file: file.map(Into::into), line }
    }

    fn from_location(location: &Location<'_>) -> Self {
        Self { symbol: String::new(), file: Some(location.file().into()), line: Some(location.line()) }
    }

    /// Returns `true` for frames of this crate, the standard library, or the unwinder.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        INTERNAL_PREFIXES.iter().any(|prefix| self.symbol.starts_with(prefix))
    }

    /// Returns `true` when the frame's symbol path lies inside `component`.
    #[must_use]
    pub fn belongs_to(&self, component: &str) -> bool {
        let symbol = self.symbol.strip_prefix('<').unwrap_or(&self.symbol);
        symbol
            .strip_prefix(component)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
    }

    /// Formats the frame as a call site, if its file is known.
    #[must_use]
    pub fn call_site(&self) -> Option<CallSite> {
        self.file.as_ref().map(|file| CallSite::new(file.clone(), self.line))
    }
}

/// An innermost-first call stack.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CapturedStack {
    caller: Option<StackFrame>,
    frames: Vec<StackFrame>,
}

impl CapturedStack {
    /// Captures the current stack.
    ///
    /// The caller location is always recorded. Symbolized frames are only
    /// available when backtraces are enabled (`RUST_BACKTRACE` /
    /// `RUST_LIB_BACKTRACE`); see [`force_capture`](Self::force_capture).
    #[track_caller]
    pub fn capture() -> Self {
        let caller = Location::caller();
        Self::from_backtrace(caller, &Backtrace::capture())
    }

    /// Captures the current stack regardless of environment settings.
    #[track_caller]
    pub fn force_capture() -> Self {
        let caller = Location::caller();
        Self::from_backtrace(caller, &Backtrace::force_capture())
    }

    fn from_backtrace(caller: &Location<'_>, backtrace: &Backtrace) -> Self {
        let frames = match backtrace.status() {
            BacktraceStatus::Captured => parse_backtrace(&backtrace.to_string()),
            _ => Vec::new(),
        };
        Self { caller: Some(StackFrame::from_location(caller)), frames }
    }

    /// Builds a stack from explicit frames, with no recorded caller.
    pub fn from_frames(frames: Vec<StackFrame>) -> Self {
        Self { caller: None, frames }
    }

    /// Sets the caller frame.
    pub fn with_caller(mut self, caller: StackFrame) -> Self {
        self.caller = Some(caller);
        self
    }

    #[inline]
    pub fn caller(&self) -> Option<&StackFrame> {
        self.caller.as_ref()
    }

    #[inline]
    pub fn frames(&self) -> &[StackFrame] {
        &self.frames
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.caller.is_none() && self.frames.is_empty()
    }
}

/// Parses the `Display` output of a captured [`Backtrace`].
///
/// ```text
///    3: billing::invoice::send
///              at ./src/invoice.rs:12:9
/// ```
pub fn parse_backtrace(text: &str) -> Vec<StackFrame> {
    let mut frames: Vec<StackFrame> = Vec::new();
    for raw in text.lines() {
        let line = raw.trim();
        if let Some(location) = line.strip_prefix("at ") {
            if let Some(frame) = frames.last_mut() {
                let (file, line_no) = split_location(location);
                frame.file = Some(file.into());
                frame.line = line_no;
            }
            continue;
        }
        if let Some((index, symbol)) = line.split_once(": ") {
            if !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()) {
                frames.push(StackFrame { symbol: symbol.trim().into(), file: None, line: None });
            }
        }
    }
    frames
}

/// Splits `path:line:column` (column optional) into path and line.
fn split_location(location: &str) -> (&str, Option<u32>) {
    let mut parts = location.rsplitn(3, ':');
    let last = parts.next();
    let middle = parts.next();
    let head = parts.next();
    match (head, middle, last) {
        (Some(path), Some(line), Some(_column)) if line.parse::<u32>().is_ok() => {
            (path, line.parse().ok())
        },
        _ => match location.rsplit_once(':') {
            Some((path, line)) if line.parse::<u32>().is_ok() => (path, line.parse().ok()),
            _ => (location, None),
        },
    }
}

/// Picks the frame shown to a human.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolver {
    owning_component: Option<String>,
}

impl Resolver {
    /// Creates a resolver; `owning_component` is a symbol path prefix such as `billing`.
    pub fn new(owning_component: Option<String>) -> Self {
        Self { owning_component: owning_component.filter(|marker| !marker.is_empty()) }
    }

    #[inline]
    pub fn owning_component(&self) -> Option<&str> {
        self.owning_component.as_deref()
    }

    /// Selects the most relevant frame of `stack`.
    pub fn resolve<'a>(&self, stack: &'a CapturedStack) -> Option<&'a StackFrame> {
        if let Some(marker) = self.owning_component.as_deref() {
            let owned = stack
                .frames()
                .iter()
                .find(|frame| frame.file.is_some() && frame.belongs_to(marker));
            if owned.is_some() {
                return owned;
            }
        }
        first_caller_frame(stack)
    }

    /// Resolves and formats the call site of `stack`.
    pub fn call_site(&self, stack: &CapturedStack) -> Option<CallSite> {
        self.resolve(stack).and_then(StackFrame::call_site)
    }
}

fn first_caller_frame(stack: &CapturedStack) -> Option<&StackFrame> {
    stack
        .caller()
        .or_else(|| stack.frames().iter().find(|frame| !frame.is_internal()))
}
