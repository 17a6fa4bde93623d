//! Post-order tree rewriter (§4.2). Children are always simplified before
//! their parent's own per-kind handler runs; a handler may return a
//! replacement node, the node unchanged, or (for statement positions only)
//! `None` to delete the statement outright.
//!
//! The rewrite context mirrors `compiler::precompiler::Precompiler<'a>`:
//! an explicit struct threaded through every call instead of module-global
//! state, which is what keeps this rewriter reentrant (and trivially
//! testable node-by-node, as the submodule unit tests below do).

mod aggregate;
mod attrs;
mod call_args;
mod concurrent;
mod control_flow;
mod for_loop;
mod wait;

use crate::tree::{Arena, Cond, Node, NodeId, NodeKind, Param, Waveform};

/// Threads the arena, the side-list of implicit signal/process pairs
/// synthesized by `'delayed`/`'transaction` desugaring (§4.5.1), and a
/// monotonic counter for unique implicit names (§6) through one
/// simplification pass.
pub struct Simplifier<'a> {
    pub(crate) arena: &'a mut Arena,
    pending_implicit: Vec<(NodeId, NodeId)>,
    uniq_counter: u32,
}

impl<'a> Simplifier<'a> {
    fn new(arena: &'a mut Arena) -> Self {
        Simplifier {
            arena,
            pending_implicit: Vec::new(),
            uniq_counter: 0,
        }
    }

    /// A process-unique name, e.g. `delayed_s_3`.
    pub(crate) fn uniq(&mut self, base: &str) -> String {
        self.uniq_counter += 1;
        format!("{base}_{}", self.uniq_counter)
    }

    pub(crate) fn queue_implicit(&mut self, signal: NodeId, process: NodeId) {
        self.pending_implicit.push((signal, process));
    }

    /// A fresh call to a builtin operator (§4.1's table), used by the `for`
    /// expansion and the concurrent-statement desugaring to build the
    /// guard/step/wait expressions the handlers below need. Not folded
    /// immediately — matching the reference, a later `simplify` pass (see
    /// the idempotence property, §8) folds it if its arguments turn out to
    /// be constant.
    pub(crate) fn call_builtin(&mut self, name: &str, ty: Option<NodeId>, args: Vec<NodeId>) -> NodeId {
        let mut decl = Node::new(NodeKind::FuncDecl);
        decl.attrs.set_str("builtin", name);
        let decl_id = self.arena.alloc(decl);

        let mut call = Node::new(NodeKind::FCall).with_ident(name);
        call.reference = Some(decl_id);
        if let Some(ty) = ty {
            call = call.with_type(ty);
        }
        call.params = args
            .into_iter()
            .map(|value| Param {
                subkind: crate::tree::ParamSubkind::Pos,
                name: None,
                value,
            })
            .collect();
        self.arena.alloc(call)
    }

    /// Post-order-rewrite `id` and every node it transitively owns.
    /// Returns `None` only when `id` itself should be deleted from its
    /// parent's statement list (§4.2: `Null`, a constant-false `While`/
    /// `If-generate`, or a constant-false `If` with no `else`).
    pub(crate) fn simplify_node(&mut self, id: NodeId) -> Option<NodeId> {
        self.rewrite_children(id);
        self.dispatch(id)
    }

    /// Rewrite every list a statement position can't be and that an
    /// expression-only slot must resolve to `Some` for; falls back to the
    /// original id defensively (this never actually triggers: none of the
    /// node kinds legal in an expression slot produce `None`).
    fn simplify_required(&mut self, id: NodeId) -> NodeId {
        self.simplify_node(id).unwrap_or(id)
    }

    fn simplify_opt(&mut self, id: Option<NodeId>) -> Option<NodeId> {
        id.map(|id| self.simplify_required(id))
    }

    fn simplify_stmt_list(&mut self, ids: Vec<NodeId>) -> Vec<NodeId> {
        ids.into_iter().filter_map(|id| self.simplify_node(id)).collect()
    }

    fn rewrite_children(&mut self, id: NodeId) {
        let stmts = self.arena.get(id).stmts.clone();
        let decls = self.arena.get(id).decls.clone();
        let else_stmts = self.arena.get(id).else_stmts.clone();
        let triggers = self.arena.get(id).triggers.clone();
        let params = self.arena.get(id).params.clone();
        let waveforms = self.arena.get(id).waveforms.clone();
        let assocs = self.arena.get(id).assocs.clone();
        let conds = self.arena.get(id).conds.clone();
        let value = self.arena.get(id).value;
        let target = self.arena.get(id).target;
        let delay = self.arena.get(id).delay;
        let reject = self.arena.get(id).reject;
        let message = self.arena.get(id).message;
        let range = self.arena.get(id).range.clone();
        let range_source = self.arena.get(id).range_source;

        let new_stmts = self.simplify_stmt_list(stmts);
        let new_decls = self.simplify_stmt_list(decls);
        let new_else_stmts = self.simplify_stmt_list(else_stmts);
        let new_triggers: Vec<NodeId> =
            triggers.into_iter().map(|t| self.simplify_required(t)).collect();
        let new_params: Vec<Param> = params
            .into_iter()
            .map(|p| Param {
                value: self.simplify_required(p.value),
                ..p
            })
            .collect();
        let new_waveforms = self.rewrite_waveforms(waveforms);
        let new_assocs: Vec<_> = assocs
            .into_iter()
            .map(|a| crate::tree::Assoc {
                name: self.simplify_opt(a.name),
                range: a.range.map(|(l, r)| {
                    (self.simplify_required(l), self.simplify_required(r))
                }),
                value: self.simplify_required(a.value),
                ..a
            })
            .collect();
        let new_conds: Vec<Cond> = conds
            .into_iter()
            .map(|c| Cond {
                condition: self.simplify_opt(c.condition),
                waveforms: self.rewrite_waveforms(c.waveforms),
                reject: self.simplify_opt(c.reject),
            })
            .collect();
        let new_value = self.simplify_opt(value);
        let new_target = self.simplify_opt(target);
        let new_delay = self.simplify_opt(delay);
        let new_reject = self.simplify_opt(reject);
        let new_message = self.simplify_opt(message);
        let new_range_source = self.simplify_opt(range_source);
        let new_range = range.map(|r| crate::tree::Range {
            kind: r.kind,
            left: self.simplify_required(r.left),
            right: self.simplify_required(r.right),
        });

        let node = self.arena.get_mut(id);
        node.stmts = new_stmts;
        node.decls = new_decls;
        node.else_stmts = new_else_stmts;
        node.triggers = new_triggers;
        node.params = new_params;
        node.waveforms = new_waveforms;
        node.assocs = new_assocs;
        node.conds = new_conds;
        node.value = new_value;
        node.target = new_target;
        node.delay = new_delay;
        node.reject = new_reject;
        node.message = new_message;
        node.range = new_range;
        node.range_source = new_range_source;
    }

    fn rewrite_waveforms(&mut self, waveforms: Vec<Waveform>) -> Vec<Waveform> {
        waveforms
            .into_iter()
            .map(|w| Waveform {
                value: self.simplify_required(w.value),
                delay: self.simplify_opt(w.delay),
            })
            .collect()
    }

    fn dispatch(&mut self, id: NodeId) -> Option<NodeId> {
        match self.arena.get(id).kind {
            NodeKind::FCall => {
                let normalised = call_args::normalise(self.arena, id);
                Some(crate::eval::eval(self.arena, normalised))
            }
            NodeKind::PCall => Some(call_args::normalise(self.arena, id)),
            NodeKind::Ref => Some(crate::eval::eval(self.arena, id)),
            NodeKind::ArrayRef => Some(aggregate::simp_array_ref(self.arena, id)),
            NodeKind::AttrRef => Some(attrs::simp_attr_ref(self, id)),
            NodeKind::If => control_flow::simp_if(self.arena, id),
            NodeKind::Case => Some(control_flow::simp_case(self.arena, id)),
            NodeKind::While => control_flow::simp_while(self.arena, id),
            NodeKind::For => Some(for_loop::simp_for(self, id)),
            NodeKind::Process => Some(wait::simp_process(self.arena, id)),
            NodeKind::Wait => Some(wait::simp_wait(self.arena, id)),
            NodeKind::CAssign => Some(concurrent::simp_cassign(self.arena, id)),
            NodeKind::Select => Some(concurrent::simp_select(self.arena, id)),
            NodeKind::CPCall => Some(concurrent::simp_cpcall(self.arena, id)),
            NodeKind::CAssert => Some(concurrent::simp_cassert(self.arena, id)),
            NodeKind::Qualified => Some(self.arena.get(id).value.expect("Qualified always wraps a value")),
            NodeKind::TypeConv => Some(crate::eval::eval(self.arena, id)),
            NodeKind::IfGenerate => control_flow::simp_if_generate(self.arena, id),
            NodeKind::Null => None,
            _ => Some(id),
        }
    }
}

/// Simplify a whole design unit (§4.2, §4.5.1): rewrite every top-level
/// statement, then drain the implicit-signal side list into the unit's own
/// declarations/statements.
pub fn simplify_unit(arena: &mut Arena, top: NodeId) -> NodeId {
    let mut s = Simplifier::new(arena);
    s.rewrite_children(top);
    let pending = std::mem::take(&mut s.pending_implicit);
    drop(s);

    for (signal, process) in pending {
        arena.get_mut(top).decls.push(signal);
        arena.get_mut(top).stmts.push(process);
    }
    top
}
