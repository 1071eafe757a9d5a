use std::{cmp::Ordering, ops::Add};

/// The context a production is evaluated in. Contexts are
/// mutually exclusive; most productions with a (n, c)
/// parameterization select a different variant for each,
/// most visibly the scalar productions which allow a
/// different character set inside flow collections than
/// outside them, and collapse to single line forms inside
/// implicit keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(in crate::grammar) enum Context
{
    /// Inside a block sequence entry
    BlockIn,
    /// Outside a block sequence entry
    BlockOut,
    /// Inside a flow collection
    FlowIn,
    /// Outside any flow collection
    FlowOut,
    /// Inside an implicit key, block styles
    BlockKey,
    /// Inside an implicit key, flow styles
    FlowKey,
}

impl Context
{
    /// The context switch applied on entering a flow
    /// collection
    pub fn in_flow(self) -> Self
    {
        match self
        {
            Context::FlowOut | Context::FlowIn => Context::FlowIn,
            Context::BlockKey | Context::FlowKey => Context::FlowKey,

            // Flow collections are only ever entered from flow (or
            // key) contexts; block contexts reach them through
            // flow-out first
            Context::BlockIn | Context::BlockOut => Context::FlowIn,
        }
    }

    /// Is this one of the two single line key contexts?
    pub fn is_key(self) -> bool
    {
        matches!(self, Context::BlockKey | Context::FlowKey)
    }

    /// Does this context restrict content to the flow safe
    /// character set (no unescaped flow indicators)?
    pub fn excludes_flow_indicators(self) -> bool
    {
        matches!(self, Context::FlowIn | Context::FlowKey)
    }
}

/// A wrapper around usize that allows us to express the
/// "-1"nth indent without needing to use a signed type.
/// The virtual -1 belongs to the top level node of a
/// document, which has no parent to be indented past,
/// meaning content may legally start in column 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(in crate::grammar) struct Indent(Option<usize>);

impl Indent
{
    /// The virtual -1 indent of a document's top level node
    pub const TOP: Self = Self(None);

    pub fn new(n: usize) -> Self
    {
        Self(Some(n))
    }

    /// The indent one level shallower, used by seq-spaces:
    /// nested block sequences in block-out context are
    /// allowed to sit at their parent's column
    pub fn pred(self) -> Self
    {
        match self.0
        {
            Some(0) | None => Self(None),
            Some(n) => Self(Some(n - 1)),
        }
    }
}

impl From<usize> for Indent
{
    fn from(n: usize) -> Self
    {
        Self::new(n)
    }
}

impl PartialEq<usize> for Indent
{
    fn eq(&self, other: &usize) -> bool
    {
        match self.0
        {
            Some(ref n) => n == other,
            None => false,
        }
    }
}

impl PartialOrd<usize> for Indent
{
    fn partial_cmp(&self, other: &usize) -> Option<Ordering>
    {
        match self.0
        {
            Some(n) => n.partial_cmp(other),
            None => Some(Ordering::Less),
        }
    }
}

impl Add<usize> for Indent
{
    type Output = usize;

    /// .rhs must be at least 1 when adding to the virtual
    /// -1 indent
    fn add(self, rhs: usize) -> Self::Output
    {
        match self.0
        {
            Some(n) => n + rhs,
            None => rhs - 1,
        }
    }
}

/// seq-spaces: the indent a nested block sequence is
/// required to exceed. In block-out context the '-'
/// indicator is itself taken as indentation, lowering the
/// requirement by one
pub(in crate::grammar) fn seq_spaces(n: Indent, c: Context) -> Indent
{
    match c
    {
        Context::BlockOut => n.pred(),
        _ => n,
    }
}
