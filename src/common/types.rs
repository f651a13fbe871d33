//! Shared construction and context types.

/// One argument to hub construction.
#[derive(Debug, Clone, PartialEq)]
pub enum HubArg<C> {
    /// Declares an event name.
    Event(String),
    /// Designates the dispatch context. The last one supplied wins.
    Target(C),
}

impl<C> HubArg<C> {
    pub fn event(name: impl Into<String>) -> Self {
        HubArg::Event(name.into())
    }

    pub fn target(target: C) -> Self {
        HubArg::Target(target)
    }
}

/// The receiver context listeners run against.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchContext<C> {
    /// No target was supplied; the hub itself is the context.
    Hub,
    /// An externally supplied object.
    Target(C),
}

impl<C> DispatchContext<C> {
    pub fn target(&self) -> Option<&C> {
        match self {
            DispatchContext::Hub => None,
            DispatchContext::Target(target) => Some(target),
        }
    }

    pub fn is_hub(&self) -> bool {
        matches!(self, DispatchContext::Hub)
    }
}

/// How a hub is being constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construction {
    /// A new, distinct hub; it becomes the context when no target is given.
    Fresh,
    /// Attaching onto an existing object; a target is mandatory.
    Attach,
}
