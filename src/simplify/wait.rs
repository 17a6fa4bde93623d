//! Sensitivity-list lifting (§4.2, §4.8): a `Process`'s sensitivity list
//! becomes a trailing `Wait`; a `Wait` with a condition but no explicit
//! triggers gets its trigger set derived from the condition expression.

use crate::tree::{Arena, Node, NodeId, NodeKind};

/// Walk `expr`, collecting every `Ref` whose declaration is a signal, port,
/// or alias, into `triggers` — skipping anything already present by
/// identity of its referent (§4.8). Used by `simp_wait` directly, and by
/// the concurrent-statement desugaring in `concurrent.rs`.
pub fn simp_build_wait(arena: &Arena, expr: NodeId, triggers: &mut Vec<NodeId>) {
    match arena.get(expr).kind {
        NodeKind::Ref => {
            if let Some(decl) = arena.get(expr).reference {
                let is_signal_like = matches!(
                    arena.get(decl).kind,
                    NodeKind::SignalDecl | NodeKind::PortDecl | NodeKind::Alias
                );
                if is_signal_like {
                    let already_present = triggers
                        .iter()
                        .any(|t| arena.get(*t).reference == Some(decl));
                    if !already_present {
                        triggers.push(expr);
                    }
                }
            }
        }
        _ => {
            if let Some(v) = arena.get(expr).value {
                simp_build_wait(arena, v, triggers);
            }
            for p in arena.get(expr).params.clone() {
                simp_build_wait(arena, p.value, triggers);
            }
            for a in arena.get(expr).assocs.clone() {
                simp_build_wait(arena, a.value, triggers);
            }
        }
    }
}

/// Lifts `Process`'s own sensitivity list (if any was attached directly,
/// via `triggers`) into a trailing `Wait` statement.
pub fn simp_process(arena: &mut Arena, id: NodeId) -> NodeId {
    let triggers = arena.get(id).triggers.clone();
    if triggers.is_empty() {
        return id;
    }
    let mut wait = Node::new(NodeKind::Wait);
    wait.mark_static();
    wait.triggers = triggers;
    let wait_id = arena.alloc(wait);
    arena.get_mut(id).stmts.push(wait_id);
    arena.get_mut(id).triggers.clear();
    id
}

/// If the `Wait` has a condition but no explicit triggers, derive its
/// sensitivity set from the condition expression.
pub fn simp_wait(arena: &mut Arena, id: NodeId) -> NodeId {
    if !arena.get(id).triggers.is_empty() {
        return id;
    }
    let Some(cond) = arena.get(id).value else {
        return id;
    };
    let mut triggers = Vec::new();
    simp_build_wait(arena, cond, &mut triggers);
    arena.get_mut(id).triggers = triggers;
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wait_derives_triggers_from_condition_refs() {
        let mut arena = Arena::new();
        let sig = arena.alloc(Node::new(NodeKind::SignalDecl));
        let mut sig_ref = Node::new(NodeKind::Ref);
        sig_ref.reference = Some(sig);
        let sig_ref = arena.alloc(sig_ref);

        let decl = arena.alloc(Node::new(NodeKind::FuncDecl));
        let mut not_call = Node::new(NodeKind::FCall);
        not_call.reference = Some(decl);
        not_call.params = vec![crate::tree::Param {
            subkind: crate::tree::ParamSubkind::Pos,
            name: None,
            value: sig_ref,
        }];
        let not_call = arena.alloc(not_call);

        let wait = Node::new(NodeKind::Wait).with_value(not_call);
        let wait = arena.alloc(wait);

        let result = simp_wait(&mut arena, wait);
        assert_eq!(arena.get(result).triggers, vec![sig_ref]);
    }

    #[test]
    fn process_lifts_sensitivity_list_into_trailing_wait() {
        let mut arena = Arena::new();
        let sig = arena.alloc(Node::new(NodeKind::SignalDecl));
        let mut sig_ref = Node::new(NodeKind::Ref);
        sig_ref.reference = Some(sig);
        let sig_ref = arena.alloc(sig_ref);

        let body = arena.alloc(Node::new(NodeKind::VarAssign));
        let mut process = Node::new(NodeKind::Process);
        process.stmts = vec![body];
        process.triggers = vec![sig_ref];
        let process = arena.alloc(process);

        let result = simp_process(&mut arena, process);
        assert_eq!(arena.get(result).stmts.len(), 2);
        let wait = arena.get(result).stmts[1];
        assert_eq!(arena.get(wait).kind, NodeKind::Wait);
        assert_eq!(arena.get(wait).triggers, vec![sig_ref]);
        assert!(arena.get(wait).is_static_wait());
        assert!(arena.get(result).triggers.is_empty());
    }
}
