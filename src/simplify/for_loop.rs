//! `for` loop expansion (§4.7): lowers the bounded loop into a labelled
//! `Block` holding an (optional) null-range guard, an initialiser, and an
//! unconditional `While` whose body ends in an `Exit`-on-bound-reached plus
//! a direction-appropriate step.

use super::Simplifier;
use crate::tree::{Literal, Node, NodeId, NodeKind, RangeKind};

pub fn simp_for(s: &mut Simplifier, id: NodeId) -> NodeId {
    let Some(loop_var) = s.arena.get(id).decls.first().copied() else {
        panic!("{}", crate::error::TreeError::MissingLoopVariable);
    };
    let range = s
        .arena
        .get(id)
        .range
        .clone()
        .expect("a `for` node always carries a range");
    let range_source = s.arena.get(id).range_source;
    let label = s.arena.get(id).ident.clone();
    let body = s.arena.get(id).stmts.clone();
    let var_ty = s.arena.get(loop_var).ty;

    let guard = match range.kind {
        RangeKind::To => Some(s.call_builtin("leq", None, vec![range.left, range.right])),
        RangeKind::Downto => Some(s.call_builtin("geq", None, vec![range.left, range.right])),
        RangeKind::Dyn | RangeKind::RDyn => None,
    };

    let init_value = if range.kind == RangeKind::RDyn { range.right } else { range.left };
    let init_target = var_ref(s, loop_var, var_ty);
    let mut init = Node::new(NodeKind::VarAssign);
    init.target = Some(init_target);
    init.value = Some(init_value);
    init.mark_elide_bounds();
    let init_id = s.arena.alloc(init);

    let exit_bound = if range.kind == RangeKind::RDyn { range.left } else { range.right };
    let exit_var = var_ref(s, loop_var, var_ty);
    let exit_cond = s.call_builtin("eq", None, vec![exit_var, exit_bound]);
    let mut exit_stmt = Node::new(NodeKind::Exit);
    exit_stmt.value = Some(exit_cond);
    if let Some(label) = &label {
        exit_stmt.ident = Some(label.clone());
    }
    let exit_id = s.arena.alloc(exit_stmt);

    let step_id = match range.kind {
        RangeKind::To => step_assign(s, loop_var, var_ty, "succ", true),
        RangeKind::Downto => step_assign(s, loop_var, var_ty, "pred", false),
        RangeKind::Dyn | RangeKind::RDyn => {
            let dim = {
                let mut n = Node::new(NodeKind::Literal);
                n.literal = Some(Literal::Int(1));
                s.arena.alloc(n)
            };
            let source = range_source.unwrap_or(range.left);
            let ascending = s.call_builtin("ascending", None, vec![dim, source]);

            let then_id = step_assign(s, loop_var, var_ty, "succ", false);
            let else_id = step_assign(s, loop_var, var_ty, "pred", false);

            let mut if_node = Node::new(NodeKind::If);
            if_node.value = Some(ascending);
            if_node.stmts = vec![then_id];
            if_node.else_stmts = vec![else_id];
            s.arena.alloc(if_node)
        }
    };

    let mut while_stmts = body;
    while_stmts.push(exit_id);
    while_stmts.push(step_id);
    let mut while_node = Node::new(NodeKind::While);
    while_node.stmts = while_stmts;
    let while_id = s.arena.alloc(while_node);

    let inner = vec![init_id, while_id];
    let body_stmts = match guard {
        Some(guard) => {
            let mut if_guard = Node::new(NodeKind::If);
            if_guard.value = Some(guard);
            if_guard.stmts = inner;
            vec![s.arena.alloc(if_guard)]
        }
        None => inner,
    };

    let mut block = Node::new(NodeKind::Block);
    if let Some(label) = label {
        block = block.with_ident(label);
    }
    block.decls = vec![loop_var];
    block.stmts = body_stmts;
    s.arena.alloc(block)
}

fn var_ref(s: &mut Simplifier, var: NodeId, ty: Option<NodeId>) -> NodeId {
    let mut r = Node::new(NodeKind::Ref);
    r.reference = Some(var);
    if let Some(ty) = ty {
        r = r.with_type(ty);
    }
    s.arena.alloc(r)
}

fn step_assign(s: &mut Simplifier, var: NodeId, ty: Option<NodeId>, op: &str, elide: bool) -> NodeId {
    let operand = var_ref(s, var, ty);
    let stepped = s.call_builtin(op, ty, vec![operand]);
    let target = var_ref(s, var, ty);
    let mut assign = Node::new(NodeKind::VarAssign);
    assign.target = Some(target);
    assign.value = Some(stepped);
    if elide {
        assign.mark_elide_bounds();
    }
    s.arena.alloc(assign)
}
