//! Array/aggregate element extraction (§4.4): fold `ArrayRef` when the
//! prefix is a string literal, an aggregate, or a reference to a constant
//! whose value is an aggregate, and the index is itself a folded literal.

use crate::tree::{Arena, Literal, Node, NodeId, NodeKind, RangeKind, Subkind};

pub fn simp_array_ref(arena: &mut Arena, id: NodeId) -> NodeId {
    let params = arena.get(id).params.clone();
    if params.len() != 1 {
        // Multi-dimensional indexing does not constant-fold (§4.4).
        return id;
    }
    let Some(prefix) = arena.get(id).value else {
        return id;
    };
    let Some(index) = literal_int(arena, params[0].value) else {
        return id;
    };

    match arena.get(prefix).kind {
        NodeKind::Literal => extract_from_string_literal(arena, id, prefix, index),
        NodeKind::Aggregate => extract_from_aggregate(arena, id, prefix, index),
        NodeKind::Ref => match arena.get(prefix).reference.map(|d| (d, arena.get(d).kind)) {
            Some((decl, NodeKind::ConstDecl)) => match arena.get(decl).value {
                Some(v) if arena.get(v).kind == NodeKind::Aggregate => {
                    extract_from_aggregate(arena, id, v, index)
                }
                _ => id,
            },
            _ => id,
        },
        _ => id,
    }
}

fn literal_int(arena: &Arena, id: NodeId) -> Option<i64> {
    if arena.get(id).kind != NodeKind::Literal {
        return None;
    }
    arena.get(id).literal.as_ref().and_then(Literal::as_int)
}

fn bounds_of(arena: &Arena, prefix: NodeId) -> Option<(i64, i64, RangeKind)> {
    let ty = arena.get(prefix).ty?;
    let range = arena.get(ty).range.clone()?;
    let low = literal_int(arena, range.left)?;
    let high = literal_int(arena, range.right)?;
    Some((low, high, range.kind))
}

fn extract_from_string_literal(arena: &mut Arena, call_id: NodeId, prefix: NodeId, index: i64) -> NodeId {
    let Some((low, high, kind)) = bounds_of(arena, prefix) else {
        return call_id;
    };
    let Some(Literal::Str(s)) = arena.get(prefix).literal.clone() else {
        return call_id;
    };
    let offset = match kind {
        RangeKind::To => index - low,
        RangeKind::Downto => high - index,
        RangeKind::Dyn | RangeKind::RDyn => return call_id,
    };
    let Some(ch) = usize::try_from(offset).ok().and_then(|o| s.chars().nth(o)) else {
        // Out of range: leave for the backend's runtime check (§4.4).
        return call_id;
    };

    let ty = arena.get(call_id).ty;
    let loc = arena.get(call_id).loc;
    let mut node = Node::new(NodeKind::Literal).with_loc(loc);
    node.literal = Some(Literal::Enum(ch as u32));
    if let Some(ty) = ty {
        node = node.with_type(ty);
    }
    arena.alloc(node)
}

fn extract_from_aggregate(arena: &mut Arena, call_id: NodeId, agg: NodeId, index: i64) -> NodeId {
    let (low, high, kind) = bounds_of(arena, agg).unwrap_or((0, 0, RangeKind::To));
    let assocs = arena.get(agg).assocs.clone();

    let mut others = None;
    let mut pos = 0i64;
    for a in &assocs {
        match a.subkind {
            Subkind::Others => others = Some(a.value),
            Subkind::Pos => {
                // Position 0 is the aggregate's first element; for a `To`
                // range that's `low` counting up, for `Downto` it's `high`
                // counting down (§4.4, `simp_extract_aggregate` in the
                // reference simplifier).
                let matches = match kind {
                    RangeKind::Downto => high - pos == index,
                    _ => low + pos == index,
                };
                if matches {
                    return a.value;
                }
                pos += 1;
            }
            Subkind::Named => {
                if let Some(name_id) = a.name {
                    if literal_int(arena, name_id) == Some(index) {
                        return a.value;
                    }
                }
            }
            Subkind::Range => {
                if let Some((l, r)) = a.range {
                    if let (Some(lo), Some(hi)) = (literal_int(arena, l), literal_int(arena, r)) {
                        let (lo, hi) = (lo.min(hi), lo.max(hi));
                        if index >= lo && index <= hi {
                            return a.value;
                        }
                    }
                }
            }
        }
    }
    others.unwrap_or(call_id)
}
