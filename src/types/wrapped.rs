//! The diagnostic chain built by annotating a failure.
//!
//! Every [`WrappedFailure`] owns exactly one [`ContextFrame`] and its cause.
//! The cause is either another boxed `WrappedFailure` (an inner annotation) or
//! a terminal [`Reason`]. All traversal, cloning, comparison and dropping walk
//! the chain with a loop, so arbitrarily deep chains never recurse.
//!
//! # Examples
//!
//! ```
//! use outcome_rail::{annotate, Outcome, Reason};
//!
//! let failed: Outcome<(), &str> = Outcome::FailureWith("db_timeout");
//! let outer = annotate(annotate(failed, "querying users"), "loading profile");
//!
//! let reason = outer.into_reason().unwrap();
//! let chain = reason.as_wrapped().unwrap();
//! let labels: Vec<_> = chain.frames().filter_map(|f| f.label()).collect();
//! assert_eq!(labels, ["loading profile", "querying users"]);
//! assert_eq!(chain.terminal(), &Reason::message("db_timeout"));
//! ```
use core::fmt::{self, Debug, Display};
use core::mem;

use crate::callsite::Resolver;
use crate::shrink::Shrinker;
use crate::types::{ContextFrame, Reason};

/// A failure reason wrapped in one or more context frames.
pub struct WrappedFailure {
    frame: ContextFrame,
    cause: Reason,
}

impl WrappedFailure {
    /// Wraps `cause` (itself possibly a chain) in a new outermost frame.
    #[inline]
    pub fn new(frame: ContextFrame, cause: Reason) -> Self {
        Self { frame, cause }
    }

    /// Rebuilds a chain from frames (outermost first) and a terminal reason.
    ///
    /// Returns `None` when `frames` is empty.
    pub fn from_parts(frames: Vec<ContextFrame>, terminal: Reason) -> Option<Self> {
        let mut frames = frames.into_iter().rev();
        let mut chain = Self::new(frames.next()?, terminal);
        for frame in frames {
            chain = Self::new(frame, Reason::from(chain));
        }
        Some(chain)
    }

    /// The outermost frame.
    #[inline]
    pub fn frame(&self) -> &ContextFrame {
        &self.frame
    }

    /// The immediate cause of the outermost frame.
    #[inline]
    pub fn cause(&self) -> &Reason {
        &self.cause
    }

    /// Iterates the frames from outermost (most recent) to innermost.
    #[inline]
    pub fn frames(&self) -> Frames<'_> {
        Frames { next: Some(self) }
    }

    /// Number of frames in the chain.
    pub fn depth(&self) -> usize {
        self.frames().count()
    }

    /// The innermost, non-annotated reason.
    pub fn terminal(&self) -> &Reason {
        let mut node = self;
        loop {
            match &node.cause {
                Reason::Wrapped(inner) => node = inner.as_ref(),
                terminal => return terminal,
            }
        }
    }

    /// Consumes the chain, returning its frames (outermost first) and terminal reason.
    pub fn into_parts(mut self) -> (Vec<ContextFrame>, Reason) {
        let mut frames = vec![mem::take(&mut self.frame)];
        let mut cause = mem::take(&mut self.cause);
        loop {
            match cause {
                Reason::Wrapped(mut inner) => {
                    frames.push(mem::take(&mut inner.frame));
                    cause = mem::take(&mut inner.cause);
                },
                terminal => return (frames, terminal),
            }
        }
    }

    /// Renders the terminal message followed by one `[CONTEXT]` line per frame.
    pub fn render_message(&self) -> String {
        self.render_with(&ChainFormat::default(), None)
    }

    /// Renders the chain with an explicit format and optional resolver.
    ///
    /// When a resolver is given, each frame's call site is re-resolved from its
    /// captured stack; otherwise the site recorded at annotation time is used.
    pub fn render_with(&self, format: &ChainFormat, resolver: Option<&Resolver>) -> String {
        self.render_projected(format, resolver, None)
    }

    /// Renders the chain with the terminal payload and every frame's metadata
    /// passed through `shrinker`.
    pub fn render_shrunk(&self, shrinker: &Shrinker) -> String {
        self.render_projected(&ChainFormat::default(), None, Some(shrinker))
    }

    fn render_projected(
        &self,
        format: &ChainFormat,
        resolver: Option<&Resolver>,
        shrinker: Option<&Shrinker>,
    ) -> String {
        let mut out = match (self.terminal(), shrinker) {
            (Reason::Data(value), Some(shrinker)) => shrinker.shrink(value).to_text(),
            (terminal, _) => terminal.derived_message(),
        };
        for frame in self.frames() {
            let site = match (format.show_call_site, resolver) {
                (false, _) => None,
                (true, Some(resolver)) => frame.call_site_with(resolver),
                (true, None) => frame.call_site().cloned(),
            };
            let line = match (format.show_metadata, shrinker) {
                (false, _) => frame.render_line(site.as_ref(), None),
                (true, None) => frame.render_line(site.as_ref(), Some(frame.metadata())),
                (true, Some(shrinker)) => {
                    let metadata = shrinker.shrink_metadata(frame.metadata());
                    frame.render_line(site.as_ref(), Some(&metadata))
                },
            };
            out.push_str(&format.separator);
            out.push_str(&line);
        }
        out
    }
}

/// Borrowing iterator over a chain's frames.
pub struct Frames<'a> {
    next: Option<&'a WrappedFailure>,
}

impl<'a> Iterator for Frames<'a> {
    type Item = &'a ContextFrame;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.cause.as_wrapped();
        Some(&node.frame)
    }
}

impl Drop for WrappedFailure {
    fn drop(&mut self) {
        let mut cause = mem::take(&mut self.cause);
        while let Reason::Wrapped(mut inner) = cause {
            cause = mem::take(&mut inner.cause);
        }
    }
}

impl Clone for WrappedFailure {
    fn clone(&self) -> Self {
        let inner = self.frames().skip(1).cloned().collect();
        let cause = match Self::from_parts(inner, self.terminal().clone()) {
            Some(chain) => Reason::from(chain),
            None => self.terminal().clone(),
        };
        Self::new(self.frame.clone(), cause)
    }
}

impl PartialEq for WrappedFailure {
    fn eq(&self, other: &Self) -> bool {
        self.frames().eq(other.frames()) && self.terminal() == other.terminal()
    }
}

impl Debug for WrappedFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrappedFailure")
            .field("frames", &self.frames().collect::<Vec<_>>())
            .field("terminal", self.terminal())
            .finish()
    }
}

impl Display for WrappedFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_message())
    }
}

impl std::error::Error for WrappedFailure {}

/// Layout options for rendering a [`WrappedFailure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainFormat {
    pub separator: String,
    pub show_call_site: bool,
    pub show_metadata: bool,
}

impl Default for ChainFormat {
    fn default() -> Self {
        Self { separator: "\n".into(), show_call_site: true, show_metadata: true }
    }
}

impl ChainFormat {
    /// Single-line rendering.
    #[inline]
    pub fn compact() -> Self {
        Self { separator: " | ".into(), ..Default::default() }
    }

    /// Labels only: no call sites, no metadata.
    #[inline]
    pub fn labels_only() -> Self {
        Self { show_call_site: false, show_metadata: false, ..Default::default() }
    }
}
