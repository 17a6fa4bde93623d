//! Attribute desugaring (§4.5, §4.5.1). `'delayed`/`'transaction` synthesize
//! an implicit signal driven by an implicit process; every other builtin
//! attribute just becomes an ordinary call and is handed to the evaluator.

use super::call_args;
use super::Simplifier;
use crate::tree::{Node, NodeId, NodeKind, Param, Waveform};

enum Kind {
    Delayed,
    Transaction,
}

pub fn simp_attr_ref(s: &mut Simplifier, id: NodeId) -> NodeId {
    if let Some(precomputed) = s.arena.get(id).value {
        return precomputed;
    }
    let id = call_args::normalise(s.arena, id);
    let Some(decl_id) = s.arena.get(id).reference else {
        return id;
    };
    let Some(name) = s.arena.get(decl_id).attrs.get_str("builtin").map(str::to_owned) else {
        return id;
    };
    let params = s.arena.get(id).params.clone();

    match name.as_str() {
        "delayed" => implicit_signal_process(s, id, decl_id, &params, Kind::Delayed),
        "transaction" => implicit_signal_process(s, id, decl_id, &params, Kind::Transaction),
        _ => {
            let ty = s.arena.get(id).ty;
            let loc = s.arena.get(id).loc;
            let mut call = Node::new(NodeKind::FCall).with_loc(loc);
            call.reference = Some(decl_id);
            call.params = params;
            if let Some(ty) = ty {
                call = call.with_type(ty);
            }
            let call_id = s.arena.alloc(call);
            crate::eval::eval(s.arena, call_id)
        }
    }
}

fn implicit_signal_process(
    s: &mut Simplifier,
    attr_id: NodeId,
    _decl_id: NodeId,
    params: &[Param],
    kind: Kind,
) -> NodeId {
    let sig = params[0].value;
    let delay = params.get(1).map(|p| p.value);
    let sig_name = s.arena.get(sig).ident.clone().unwrap_or_else(|| "sig".to_string());
    let init_value = s
        .arena
        .get(sig)
        .reference
        .and_then(|decl| s.arena.get(decl).value);
    let ty = s.arena.get(attr_id).ty;

    let base = match kind {
        Kind::Delayed => "delayed",
        Kind::Transaction => "transaction",
    };
    let unique = s.uniq(&format!("{base}_{sig_name}"));

    let mut signal_decl = Node::new(NodeKind::SignalDecl).with_ident(unique.clone());
    if let Some(ty) = ty {
        signal_decl = signal_decl.with_type(ty);
    }
    signal_decl.value = init_value;
    let signal_id = s.arena.alloc(signal_decl);

    let (waveform_value, waveform_delay) = match kind {
        Kind::Delayed => (sig, delay),
        Kind::Transaction => (s.call_builtin("not", ty, vec![sig]), None),
    };

    let mut target = Node::new(NodeKind::Ref);
    target.reference = Some(signal_id);
    if let Some(ty) = ty {
        target = target.with_type(ty);
    }
    let target_id = s.arena.alloc(target);

    let mut assign = Node::new(NodeKind::SignalAssign);
    assign.target = Some(target_id);
    assign.waveforms = vec![Waveform {
        value: waveform_value,
        delay: waveform_delay,
    }];
    let assign_id = s.arena.alloc(assign);

    let mut wait = Node::new(NodeKind::Wait);
    wait.mark_static();
    wait.triggers = vec![sig];
    let wait_id = s.arena.alloc(wait);

    let mut process = Node::new(NodeKind::Process).with_ident(format!("{unique}_p"));
    process.stmts = vec![assign_id, wait_id];
    let process_id = s.arena.alloc(process);

    s.queue_implicit(signal_id, process_id);

    let mut result_ref = Node::new(NodeKind::Ref).with_loc(s.arena.get(attr_id).loc);
    result_ref.reference = Some(signal_id);
    if let Some(ty) = ty {
        result_ref = result_ref.with_type(ty);
    }
    s.arena.alloc(result_ref)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simplify::simplify_unit;
    use crate::tree::{Arena, ParamSubkind};

    #[test]
    fn delayed_attribute_synthesizes_implicit_signal_and_process() {
        let mut arena = Arena::new();
        let sig = arena.alloc(Node::new(NodeKind::SignalDecl).with_ident("s"));
        let mut sig_ref = Node::new(NodeKind::Ref).with_ident("s");
        sig_ref.reference = Some(sig);
        let sig_ref = arena.alloc(sig_ref);

        let mut decl = Node::new(NodeKind::FuncDecl);
        decl.attrs.set_str("builtin", "delayed");
        let decl = arena.alloc(decl);

        let delay = arena.alloc(Node::new(NodeKind::Literal));
        let mut attr = Node::new(NodeKind::AttrRef);
        attr.reference = Some(decl);
        attr.params = vec![
            Param { subkind: ParamSubkind::Pos, name: None, value: sig_ref },
            Param { subkind: ParamSubkind::Pos, name: None, value: delay },
        ];
        let attr = arena.alloc(attr);

        let mut target = Node::new(NodeKind::SignalAssign);
        target.target = Some(arena.alloc(Node::new(NodeKind::Ref)));
        target.waveforms = vec![Waveform { value: attr, delay: None }];
        let target = arena.alloc(target);

        let mut unit = Node::new(NodeKind::Elab);
        unit.decls = vec![sig];
        unit.stmts = vec![target];
        let unit = arena.alloc(unit);

        simplify_unit(&mut arena, unit);

        assert_eq!(arena.get(unit).decls.len(), 2);
        assert_eq!(arena.get(unit).stmts.len(), 2);
        let implicit_process = arena.get(unit).stmts[1];
        assert_eq!(arena.get(implicit_process).kind, NodeKind::Process);
        let wait = arena.get(implicit_process).stmts[1];
        assert_eq!(arena.get(wait).triggers, vec![sig_ref]);
    }
}
