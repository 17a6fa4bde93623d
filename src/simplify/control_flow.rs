//! `If`/`Case`/`While`/`If-generate` folding (§4.6).

use crate::tree::{Arena, Literal, Node, NodeId, NodeKind, Subkind};

fn as_bool_literal(arena: &Arena, id: NodeId) -> Option<bool> {
    if arena.get(id).kind != NodeKind::Literal {
        return None;
    }
    arena.get(id).literal.as_ref().and_then(Literal::as_bool)
}

fn wrap_block(arena: &mut Arena, stmts: Vec<NodeId>) -> Option<NodeId> {
    match stmts.len() {
        0 => None,
        1 => Some(stmts[0]),
        _ => {
            let mut block = Node::new(NodeKind::Block);
            block.stmts = stmts;
            Some(arena.alloc(block))
        }
    }
}

/// Constant condition folds to the matching branch (wrapped in a `Block` if
/// it has more than one statement); a constant-false branch with no `else`
/// deletes the `If` entirely.
pub fn simp_if(arena: &mut Arena, id: NodeId) -> Option<NodeId> {
    let Some(cond) = arena.get(id).value else {
        return Some(id);
    };
    match as_bool_literal(arena, cond) {
        Some(true) => wrap_block(arena, arena.get(id).stmts.clone()),
        Some(false) => wrap_block(arena, arena.get(id).else_stmts.clone()),
        None => Some(id),
    }
}

/// A constant scrutinee picks the matching `Named` choice, falling through
/// to `Others` if present. `Range` choices are never matched at this stage
/// (Open Question (b), §9) — they're skipped, not treated as a match.
pub fn simp_case(arena: &mut Arena, id: NodeId) -> NodeId {
    let Some(scrutinee) = arena.get(id).value else {
        return id;
    };
    if arena.get(scrutinee).kind != NodeKind::Literal {
        return id;
    }
    let Some(target) = arena.get(scrutinee).literal.as_ref().and_then(Literal::as_int) else {
        return id;
    };

    let assocs = arena.get(id).assocs.clone();
    let mut others = None;
    for a in &assocs {
        match a.subkind {
            Subkind::Others => others = Some(a.value),
            Subkind::Named => {
                if let Some(name_id) = a.name {
                    if arena.get(name_id).kind == NodeKind::Literal
                        && arena.get(name_id).literal.as_ref().and_then(Literal::as_int) == Some(target)
                    {
                        return a.value;
                    }
                }
            }
            Subkind::Range | Subkind::Pos => continue,
        }
    }
    others.unwrap_or(id)
}

/// Constant-false deletes the loop; constant-true keeps it but drops the
/// (now redundant) condition test.
pub fn simp_while(arena: &mut Arena, id: NodeId) -> Option<NodeId> {
    let Some(cond) = arena.get(id).value else {
        return Some(id);
    };
    match as_bool_literal(arena, cond) {
        Some(false) => None,
        Some(true) => {
            arena.get_mut(id).value = None;
            Some(id)
        }
        None => Some(id),
    }
}

/// Constant-true emits the inner statements as a `Block`; constant-false
/// deletes the generate entirely.
pub fn simp_if_generate(arena: &mut Arena, id: NodeId) -> Option<NodeId> {
    let Some(cond) = arena.get(id).value else {
        return Some(id);
    };
    match as_bool_literal(arena, cond) {
        Some(true) => {
            let mut block = Node::new(NodeKind::Block);
            block.stmts = arena.get(id).stmts.clone();
            block.decls = arena.get(id).decls.clone();
            Some(arena.alloc(block))
        }
        Some(false) => None,
        None => Some(id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Assoc;

    fn lit_bool(arena: &mut Arena, v: bool) -> NodeId {
        let mut n = Node::new(NodeKind::Literal);
        n.literal = Some(Literal::Enum(if v { 1 } else { 0 }));
        arena.alloc(n)
    }

    fn lit_int(arena: &mut Arena, v: i64) -> NodeId {
        let mut n = Node::new(NodeKind::Literal);
        n.literal = Some(Literal::Int(v));
        arena.alloc(n)
    }

    #[test]
    fn if_true_keeps_then_branch() {
        let mut arena = Arena::new();
        let cond = lit_bool(&mut arena, true);
        let then_stmt = arena.alloc(Node::new(NodeKind::VarAssign));
        let mut n = Node::new(NodeKind::If).with_value(cond);
        n.stmts = vec![then_stmt];
        let n = arena.alloc(n);

        assert_eq!(simp_if(&mut arena, n), Some(then_stmt));
    }

    #[test]
    fn if_false_without_else_deletes() {
        let mut arena = Arena::new();
        let cond = lit_bool(&mut arena, false);
        let n = Node::new(NodeKind::If).with_value(cond);
        let n = arena.alloc(n);

        assert_eq!(simp_if(&mut arena, n), None);
    }

    #[test]
    fn case_picks_matching_named_choice() {
        let mut arena = Arena::new();
        let scrutinee = lit_int(&mut arena, 2);
        let name1 = lit_int(&mut arena, 1);
        let val1 = arena.alloc(Node::new(NodeKind::VarAssign));
        let name2 = lit_int(&mut arena, 2);
        let val2 = arena.alloc(Node::new(NodeKind::VarAssign));

        let mut n = Node::new(NodeKind::Case).with_value(scrutinee);
        n.assocs = vec![
            Assoc { subkind: Subkind::Named, name: Some(name1), range: None, value: val1 },
            Assoc { subkind: Subkind::Named, name: Some(name2), range: None, value: val2 },
        ];
        let n = arena.alloc(n);

        assert_eq!(simp_case(&mut arena, n), val2);
    }

    #[test]
    fn while_false_deletes_loop() {
        let mut arena = Arena::new();
        let cond = lit_bool(&mut arena, false);
        let n = Node::new(NodeKind::While).with_value(cond);
        let n = arena.alloc(n);

        assert_eq!(simp_while(&mut arena, n), None);
    }

    #[test]
    fn while_true_drops_condition() {
        let mut arena = Arena::new();
        let cond = lit_bool(&mut arena, true);
        let n = Node::new(NodeKind::While).with_value(cond);
        let n = arena.alloc(n);

        assert_eq!(simp_while(&mut arena, n), Some(n));
        assert_eq!(arena.get(n).value, None);
    }
}
