//! The tagged-arena tree model shared by the simplifier and its evaluator.
//!
//! Nodes never own other nodes directly; every child reference is a
//! [`NodeId`] into the owning [`Arena`]. This gives the tree DAG-with-no-cycles
//! semantics required by the design (shared sub-expressions are legal,
//! ownership cycles are not) without reaching for `Rc`/`RefCell`.

mod arena;
mod attrs;
mod kind;

pub use arena::{Arena, NodeId};
pub use attrs::{AttrBag, AttrValue};
pub use kind::{
    Literal, NodeKind, ParamSubkind, RangeKind, Severity, Subkind,
};

/// A source location handle copied forward from the checker; spec §1 only
/// requires that it survive the rewrite, never that it be decoded here.
pub type SrcLoc = u32;

/// A single call/association parameter, carrying its subkind per §3.
#[derive(Debug, Clone)]
pub struct Param {
    pub subkind: ParamSubkind,
    /// For `Named`, the formal name this actual binds to.
    pub name: Option<String>,
    pub value: NodeId,
}

/// A `(value, delay)` waveform element (§3, glossary).
#[derive(Debug, Clone)]
pub struct Waveform {
    pub value: NodeId,
    pub delay: Option<NodeId>,
}

/// One association of an aggregate or selected-assignment choice list.
#[derive(Debug, Clone)]
pub struct Assoc {
    pub subkind: Subkind,
    /// Set for `Named`; the choice name/expression.
    pub name: Option<NodeId>,
    /// Set for `Range`; the left/right bound of the choice range.
    pub range: Option<(NodeId, NodeId)>,
    pub value: NodeId,
}

/// A left/right bound pair tagged with its direction (§3).
#[derive(Debug, Clone)]
pub struct Range {
    pub kind: RangeKind,
    pub left: NodeId,
    pub right: NodeId,
}

/// One guarded branch of a conditional signal assignment.
#[derive(Debug, Clone)]
pub struct Cond {
    /// `None` for the final, unguarded branch.
    pub condition: Option<NodeId>,
    pub waveforms: Vec<Waveform>,
    pub reject: Option<NodeId>,
}

/// A tagged, variant-like tree node (§3).
///
/// `kind` drives dispatch everywhere; the rest of the struct is a superset
/// of every node's possible slots. Unused slots for a given kind are simply
/// left at their default (`None`/empty `Vec`). This flattens what would
/// otherwise be a tagged-union of per-kind payload types into one struct,
/// since our node set is far more uniform once params/waveforms/triggers/
/// assocs are pulled out as shared child-list slots.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub ident: Option<String>,
    pub ident2: Option<String>,
    pub loc: SrcLoc,
    pub ty: Option<NodeId>,
    pub attrs: AttrBag,

    /// Resolved declaration this node refers to (`Ref`, `ArrayRef` prefix,
    /// call heads). Absent until name resolution has run upstream of this
    /// crate; present on every node this crate receives as input.
    pub reference: Option<NodeId>,

    pub stmts: Vec<NodeId>,
    pub decls: Vec<NodeId>,
    pub params: Vec<Param>,
    pub waveforms: Vec<Waveform>,
    pub triggers: Vec<NodeId>,
    pub assocs: Vec<Assoc>,
    pub else_stmts: Vec<NodeId>,
    pub conds: Vec<Cond>,

    pub value: Option<NodeId>,
    pub target: Option<NodeId>,
    pub delay: Option<NodeId>,
    pub reject: Option<NodeId>,
    pub severity: Option<Severity>,
    pub message: Option<NodeId>,
    pub range: Option<Range>,
    pub literal: Option<Literal>,

    /// For a `For` node over a `Dyn`/`RDyn` range, the range-object
    /// expression (e.g. an array's `'range`) that the expanded step needs
    /// to query via `ascending(dim, ...)` (§4.7). Unused by every other kind.
    pub range_source: Option<NodeId>,
}

impl Node {
    /// A bare node of the given kind with every optional slot empty.
    pub fn new(kind: NodeKind) -> Self {
        Node {
            kind,
            ident: None,
            ident2: None,
            loc: 0,
            ty: None,
            attrs: AttrBag::default(),
            reference: None,
            stmts: Vec::new(),
            decls: Vec::new(),
            params: Vec::new(),
            waveforms: Vec::new(),
            triggers: Vec::new(),
            assocs: Vec::new(),
            else_stmts: Vec::new(),
            conds: Vec::new(),
            value: None,
            target: None,
            delay: None,
            reject: None,
            severity: None,
            message: None,
            range: None,
            literal: None,
            range_source: None,
        }
    }

    pub fn with_ident(mut self, ident: impl Into<String>) -> Self {
        self.ident = Some(ident.into());
        self
    }

    pub fn with_loc(mut self, loc: SrcLoc) -> Self {
        self.loc = loc;
        self
    }

    pub fn with_type(mut self, ty: NodeId) -> Self {
        self.ty = Some(ty);
        self
    }

    pub fn with_value(mut self, value: NodeId) -> Self {
        self.value = Some(value);
        self
    }

    pub fn is_static_wait(&self) -> bool {
        matches!(self.attrs.get_int("static"), Some(1))
    }

    pub fn mark_static(&mut self) {
        self.attrs.set_int("static", 1);
    }

    pub fn mark_elide_bounds(&mut self) {
        self.attrs.set_int("elide_bounds", 1);
    }
}
