use core::fmt::{self, Display};

use crate::callsite::{CallSite, CapturedStack, Resolver};
use crate::types::Metadata;

/// One annotation step around a failure.
///
/// A frame is built once, when a failure is annotated, and exposes no way to
/// change it afterwards. The call site is resolved at capture time against the
/// caller location; [`call_site_with`](Self::call_site_with) re-resolves the
/// raw stack with a configured [`Resolver`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContextFrame {
    label: Option<String>,
    metadata: Metadata,
    call_site: Option<CallSite>,
    stack: CapturedStack,
}

impl ContextFrame {
    /// Creates a frame from already captured parts.
    pub fn new(label: Option<String>, metadata: Metadata, stack: CapturedStack) -> Self {
        let call_site = Resolver::default().call_site(&stack);
        Self { label, metadata, call_site, stack }
    }

    /// Creates a frame, capturing the stack at the caller.
    #[track_caller]
    pub fn capture(label: Option<String>, metadata: Metadata) -> Self {
        Self::new(label, metadata, CapturedStack::capture())
    }

    #[inline]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    #[inline]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    #[inline]
    pub fn call_site(&self) -> Option<&CallSite> {
        self.call_site.as_ref()
    }

    #[inline]
    pub fn stack(&self) -> &CapturedStack {
        &self.stack
    }

    /// Resolves the call site with a specific resolver.
    pub fn call_site_with(&self, resolver: &Resolver) -> Option<CallSite> {
        resolver.call_site(&self.stack).or_else(|| self.call_site.clone())
    }

    /// Formats the frame as `[CONTEXT] <call-site>: <label> <metadata>`.
    pub fn render(&self, call_site: Option<&CallSite>) -> String {
        self.render_line(call_site, Some(&self.metadata))
    }

    pub(crate) fn render_line(
        &self,
        call_site: Option<&CallSite>,
        metadata: Option<&Metadata>,
    ) -> String {
        let mut line = String::from("[CONTEXT]");
        if let Some(site) = call_site {
            line.push(' ');
            line.push_str(&site.to_string());
            line.push(':');
        }
        if let Some(label) = &self.label {
            line.push(' ');
            line.push_str(label);
        }
        if let Some(metadata) = metadata.filter(|metadata| !metadata.is_empty()) {
            line.push(' ');
            line.push_str(&metadata.to_string());
        }
        line
    }
}

impl Display for ContextFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(self.call_site.as_ref()))
    }
}
