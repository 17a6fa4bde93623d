//! Concurrent-statement desugaring (§4.9): `CAssign`, `Select`, `CPCall`,
//! and `CAssert` each become a `Process` ending in a `Wait` whose triggers
//! are derived from every expression the statement reads.

use super::call_args;
use super::wait::simp_build_wait;
use crate::tree::{Arena, Node, NodeId, NodeKind, Subkind};

fn wrap_in_process(arena: &mut Arena, stmts: Vec<NodeId>, triggers: Vec<NodeId>) -> NodeId {
    let mut wait = Node::new(NodeKind::Wait);
    wait.mark_static();
    wait.triggers = triggers;
    let wait_id = arena.alloc(wait);

    let mut process = Node::new(NodeKind::Process);
    process.stmts = {
        let mut s = stmts;
        s.push(wait_id);
        s
    };
    arena.alloc(process)
}

/// Each guarded branch becomes a nested `If`; later branches hang off the
/// previous branch's `else`. The final branch is a plain signal assignment.
pub fn simp_cassign(arena: &mut Arena, id: NodeId) -> NodeId {
    let target = arena.get(id).target;
    let conds = arena.get(id).conds.clone();
    let mut triggers = Vec::new();

    let mut chain: Option<NodeId> = None;
    for cond in conds.into_iter().rev() {
        let mut assign = Node::new(NodeKind::SignalAssign);
        assign.target = target;
        for w in &cond.waveforms {
            simp_build_wait(arena, w.value, &mut triggers);
            if let Some(delay) = w.delay {
                simp_build_wait(arena, delay, &mut triggers);
            }
        }
        assign.waveforms = cond.waveforms;
        assign.reject = cond.reject;
        let assign_id = arena.alloc(assign);

        chain = Some(match cond.condition {
            None => assign_id,
            Some(guard) => {
                simp_build_wait(arena, guard, &mut triggers);
                let mut if_node = Node::new(NodeKind::If);
                if_node.value = Some(guard);
                if_node.stmts = vec![assign_id];
                if let Some(else_branch) = chain {
                    if_node.else_stmts = vec![else_branch];
                }
                arena.alloc(if_node)
            }
        });
    }

    let stmts = chain.into_iter().collect();
    wrap_in_process(arena, stmts, triggers)
}

/// Process contains a `Case` over the original scrutinee; scrutinee, every
/// named choice, and every waveform value feed the derived wait.
pub fn simp_select(arena: &mut Arena, id: NodeId) -> NodeId {
    let target = arena.get(id).target;
    let scrutinee = arena.get(id).value;
    let assocs = arena.get(id).assocs.clone();
    let mut triggers = Vec::new();

    if let Some(scrutinee) = scrutinee {
        simp_build_wait(arena, scrutinee, &mut triggers);
    }

    let mut new_assocs = Vec::with_capacity(assocs.len());
    for a in assocs {
        if let Some(name) = a.name {
            simp_build_wait(arena, name, &mut triggers);
        }
        if let Subkind::Range = a.subkind {
            if let Some((l, r)) = a.range {
                simp_build_wait(arena, l, &mut triggers);
                simp_build_wait(arena, r, &mut triggers);
            }
        }

        // `a.value` here is expected to be the branch's waveform expression;
        // wrap it in a signal assignment to the shared target.
        simp_build_wait(arena, a.value, &mut triggers);
        let mut assign = Node::new(NodeKind::SignalAssign);
        assign.target = target;
        assign.waveforms = vec![crate::tree::Waveform { value: a.value, delay: None }];
        let assign_id = arena.alloc(assign);

        new_assocs.push(crate::tree::Assoc { value: assign_id, ..a });
    }

    let mut case_node = Node::new(NodeKind::Case);
    case_node.value = scrutinee;
    case_node.assocs = new_assocs;
    let case_id = arena.alloc(case_node);

    wrap_in_process(arena, vec![case_id], triggers)
}

/// Only actuals bound to `IN`/`INOUT` signal-class ports contribute to the
/// trigger list. By the time a call reaches this crate its declared ports
/// (the callee's own `params`) have `Param::value` pointing at the port's
/// `PortDecl` node, which carries its class/mode as a `"signal_mode"`
/// attribute (`"in"`/`"out"`/`"inout"`) set by the upstream checker.
pub fn simp_cpcall(arena: &mut Arena, id: NodeId) -> NodeId {
    let id = call_args::normalise(arena, id);
    let ident = arena.get(id).ident.clone();
    let ident2 = arena.get(id).ident2.clone();
    let reference = arena.get(id).reference;
    let params = arena.get(id).params.clone();

    let mut triggers = Vec::new();
    let ports = reference.map(|d| arena.get(d).params.clone()).unwrap_or_default();
    for (i, p) in params.iter().enumerate() {
        let contributes = ports
            .get(i)
            .map(|port| is_in_or_inout_signal(arena, port.value))
            .unwrap_or(true);
        if contributes {
            simp_build_wait(arena, p.value, &mut triggers);
        }
    }

    let mut call = Node::new(NodeKind::PCall);
    call.ident = ident;
    call.ident2 = ident2;
    call.reference = reference;
    call.params = params;
    let call_id = arena.alloc(call);

    wrap_in_process(arena, vec![call_id], triggers)
}

fn is_in_or_inout_signal(arena: &Arena, port_decl: NodeId) -> bool {
    if arena.get(port_decl).kind != NodeKind::PortDecl {
        return false;
    }
    matches!(arena.get(port_decl).attrs.get_str("signal_mode"), Some("in") | Some("inout"))
}

/// The condition's signal references drive the wait.
pub fn simp_cassert(arena: &mut Arena, id: NodeId) -> NodeId {
    let value = arena.get(id).value;
    let message = arena.get(id).message;
    let severity = arena.get(id).severity;

    let mut triggers = Vec::new();
    if let Some(cond) = value {
        simp_build_wait(arena, cond, &mut triggers);
    }

    let mut assert_node = Node::new(NodeKind::Assert);
    assert_node.value = value;
    assert_node.message = message;
    assert_node.severity = severity;
    let assert_id = arena.alloc(assert_node);

    wrap_in_process(arena, vec![assert_id], triggers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Cond, Waveform};

    fn signal_ref(arena: &mut Arena) -> (NodeId, NodeId) {
        let sig = arena.alloc(Node::new(NodeKind::SignalDecl));
        let mut r = Node::new(NodeKind::Ref);
        r.reference = Some(sig);
        (sig, arena.alloc(r))
    }

    #[test]
    fn cassign_desugars_to_process_with_if_chain_and_wait() {
        let mut arena = Arena::new();
        let (_, target) = signal_ref(&mut arena);
        let (_, guard_sig) = signal_ref(&mut arena);
        let (_, wave_sig) = signal_ref(&mut arena);

        let mut cassign = Node::new(NodeKind::CAssign);
        cassign.target = Some(target);
        cassign.conds = vec![Cond {
            condition: Some(guard_sig),
            waveforms: vec![Waveform { value: wave_sig, delay: None }],
            reject: None,
        }];
        let cassign = arena.alloc(cassign);

        let process = simp_cassign(&mut arena, cassign);
        assert_eq!(arena.get(process).kind, NodeKind::Process);
        let if_node = arena.get(process).stmts[0];
        assert_eq!(arena.get(if_node).kind, NodeKind::If);

        let wait = *arena.get(process).stmts.last().unwrap();
        assert_eq!(arena.get(wait).kind, NodeKind::Wait);
        assert_eq!(arena.get(wait).triggers.len(), 2);
    }

    #[test]
    fn cassert_wait_triggers_come_from_condition() {
        let mut arena = Arena::new();
        let (_, cond_sig) = signal_ref(&mut arena);
        let cassert = Node::new(NodeKind::CAssert).with_value(cond_sig);
        let cassert = arena.alloc(cassert);

        let process = simp_cassert(&mut arena, cassert);
        let wait = *arena.get(process).stmts.last().unwrap();
        assert_eq!(arena.get(wait).triggers, vec![cond_sig]);
    }
}
