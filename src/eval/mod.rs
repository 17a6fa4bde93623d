//! Constant evaluator (§4.1). Given a node, returns either the literal it
//! reduces to or the node itself, unchanged. Never fails: unfoldable
//! expressions (division by zero, a non-builtin callee, an un-folded
//! argument) are not errors here, by design (§7) — the caller gets the
//! input node back and the backend is expected to emit a runtime check.
//!
//! Grounded on the fold-on-visit shape of `compiler/precompiler/mod.rs`
//! (resolve, then try to replace with something simpler) generalized to
//! the builtin table nvc's `eval()` implements, per `examples/original_source/src/simp.c`.

mod builtin;

use crate::tree::{Arena, Literal, Node, NodeId, NodeKind};
pub use builtin::BuiltinOp;

/// Fold `id` to a literal if lawful, otherwise return `id` unchanged.
pub fn eval(arena: &mut Arena, id: NodeId) -> NodeId {
    match arena.get(id).kind {
        NodeKind::Literal => id,
        NodeKind::Ref => eval_ref(arena, id),
        NodeKind::FCall => eval_fcall(arena, id),
        NodeKind::TypeConv => eval_type_conv(arena, id),
        _ => id,
    }
}

fn eval_ref(arena: &mut Arena, id: NodeId) -> NodeId {
    let Some(decl_id) = arena.get(id).reference else {
        return id;
    };
    match arena.get(decl_id).kind {
        NodeKind::ConstDecl => {
            // Array-typed constants are never folded away: the array
            // element/aggregate extraction path (eval::aggregate in the
            // simplifier) handles those lazily at the point of indexing.
            if arena.get(decl_id).attrs.get_int("array_type") == Some(1) {
                return id;
            }
            let Some(value_id) = arena.get(decl_id).value else {
                return id;
            };
            match arena.get(value_id).kind {
                NodeKind::Literal => value_id,
                NodeKind::Ref => {
                    let inner_decl = arena.get(value_id).reference;
                    match inner_decl.map(|d| arena.get(d).kind) {
                        Some(NodeKind::EnumLit) => value_id,
                        _ => id,
                    }
                }
                _ => id,
            }
        }
        NodeKind::UnitDecl => arena.get(decl_id).value.unwrap_or(id),
        _ => id,
    }
}

fn eval_fcall(arena: &mut Arena, id: NodeId) -> NodeId {
    let Some(decl_id) = arena.get(id).reference else {
        return id;
    };
    let Some(builtin_name) = arena.get(decl_id).attrs.get_str("builtin").map(str::to_owned)
    else {
        return id;
    };
    let Ok(op) = builtin_name.parse::<BuiltinOp>() else {
        return id;
    };

    let arg_literals: Option<Vec<Literal>> = arena
        .get(id)
        .params
        .iter()
        .map(|p| match &arena.get(p.value).literal {
            Some(lit) if arena.get(p.value).kind == NodeKind::Literal => Some(lit.clone()),
            _ => None,
        })
        .collect();

    let Some(args) = arg_literals else {
        return id;
    };

    let Some(folded) = builtin::apply(op, &args) else {
        return id;
    };

    let ty = arena.get(id).ty;
    let loc = arena.get(id).loc;
    let mut node = Node::new(NodeKind::Literal).with_loc(loc);
    node.literal = Some(folded);
    if let Some(ty) = ty {
        node = node.with_type(ty);
    }
    arena.alloc(node)
}

fn eval_type_conv(arena: &mut Arena, id: NodeId) -> NodeId {
    let Some(param) = arena.get(id).params.first().cloned() else {
        return id;
    };
    let operand = param.value;
    if arena.get(operand).kind != NodeKind::Literal {
        return id;
    }
    let from_real = arena.get(operand).attrs.get_int("real_type") == Some(1);
    let to_real = arena.get(id).attrs.get_int("real_type") == Some(1);

    let folded = match (&arena.get(operand).literal, from_real, to_real) {
        (Some(Literal::Int(v)), false, true) => Some(Literal::Real(*v as f64)),
        (Some(Literal::Real(v)), true, false) => Some(Literal::Int(*v as i64)),
        _ => None,
    };

    let Some(folded) = folded else {
        return id;
    };

    let ty = arena.get(id).ty;
    let loc = arena.get(id).loc;
    let mut node = Node::new(NodeKind::Literal).with_loc(loc);
    node.literal = Some(folded);
    if let Some(ty) = ty {
        node = node.with_type(ty);
    }
    arena.alloc(node)
}
