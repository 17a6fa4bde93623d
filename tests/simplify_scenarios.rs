//! End-to-end simplification scenarios exercised through the crate's public
//! surface only (no access to the private per-kind handlers), covering the
//! round-trip and desugaring guarantees a host embedding this crate relies
//! on.

use pretty_assertions::assert_eq;
use rtlsim_core::simplify::simplify_unit;
use rtlsim_core::tree::{
    Arena, Cond, Literal, Node, NodeKind, Param, ParamSubkind, Range, RangeKind, Waveform,
};

fn lit_bool(arena: &mut Arena, v: bool) -> rtlsim_core::tree::NodeId {
    let mut n = Node::new(NodeKind::Literal);
    n.literal = Some(Literal::Enum(if v { 1 } else { 0 }));
    arena.alloc(n)
}

fn lit_int(arena: &mut Arena, v: i64) -> rtlsim_core::tree::NodeId {
    let mut n = Node::new(NodeKind::Literal);
    n.literal = Some(Literal::Int(v));
    arena.alloc(n)
}

/// A constant-false generate-if contributes nothing to the elaborated
/// design, and a design with only such generates elaborates to an empty
/// statement list.
#[test]
fn constant_false_generate_removes_its_region_entirely() {
    let mut arena = Arena::new();
    let cond = lit_bool(&mut arena, false);
    let inner = arena.alloc(Node::new(NodeKind::SignalAssign));
    let mut gen = Node::new(NodeKind::IfGenerate).with_value(cond);
    gen.stmts = vec![inner];
    let gen = arena.alloc(gen);

    let mut unit = Node::new(NodeKind::Elab);
    unit.stmts = vec![gen];
    let unit = arena.alloc(unit);

    simplify_unit(&mut arena, unit);
    assert!(arena.get(unit).stmts.is_empty());
}

/// A `for I in 1 to 3 loop ... end loop` expands to a labelled block whose
/// null-range guard wraps an init + unconditional `While` ending in
/// exit-then-step, and the whole thing is idempotent: running the
/// simplifier again on its own output changes nothing further.
#[test]
fn for_loop_expansion_is_idempotent_under_a_second_pass() {
    let mut arena = Arena::new();
    let var = arena.alloc(Node::new(NodeKind::VarDecl).with_ident("i"));
    let body_stmt = arena.alloc(Node::new(NodeKind::VarAssign));

    let left = lit_int(&mut arena, 1);
    let right = lit_int(&mut arena, 3);
    let mut for_node = Node::new(NodeKind::For).with_ident("L");
    for_node.decls = vec![var];
    for_node.range = Some(Range { kind: RangeKind::To, left, right });
    for_node.stmts = vec![body_stmt];
    let for_id = arena.alloc(for_node);

    let mut unit = Node::new(NodeKind::Elab);
    unit.stmts = vec![for_id];
    let unit = arena.alloc(unit);

    simplify_unit(&mut arena, unit);
    assert_eq!(arena.get(unit).stmts.len(), 1);
    let block = arena.get(unit).stmts[0];
    assert_eq!(arena.get(block).kind, NodeKind::Block);

    let after_first_pass = arena.get(unit).stmts.clone();
    simplify_unit(&mut arena, unit);
    assert_eq!(arena.get(unit).stmts, after_first_pass);
}

/// A conditional signal assignment desugars to a process (ending in a
/// static wait on its derived sensitivity list) containing the guard/value
/// chain; running the whole unit through `simplify_unit` twice changes
/// nothing on the second pass, matching the round-trip law.
#[test]
fn conditional_signal_assignment_desugars_and_is_stable_on_resimplify() {
    let mut arena = Arena::new();
    let target_sig = arena.alloc(Node::new(NodeKind::SignalDecl).with_ident("q"));
    let mut target = Node::new(NodeKind::Ref);
    target.reference = Some(target_sig);
    let target = arena.alloc(target);

    let guard_sig = arena.alloc(Node::new(NodeKind::SignalDecl).with_ident("en"));
    let mut guard = Node::new(NodeKind::Ref);
    guard.reference = Some(guard_sig);
    let guard = arena.alloc(guard);

    let wave_sig = arena.alloc(Node::new(NodeKind::SignalDecl).with_ident("d"));
    let mut wave = Node::new(NodeKind::Ref);
    wave.reference = Some(wave_sig);
    let wave = arena.alloc(wave);

    let mut cassign = Node::new(NodeKind::CAssign);
    cassign.target = Some(target);
    cassign.conds = vec![Cond {
        condition: Some(guard),
        waveforms: vec![Waveform { value: wave, delay: None }],
        reject: None,
    }];
    let cassign = arena.alloc(cassign);

    let mut unit = Node::new(NodeKind::Elab);
    unit.decls = vec![target_sig, guard_sig, wave_sig];
    unit.stmts = vec![cassign];
    let unit = arena.alloc(unit);

    simplify_unit(&mut arena, unit);
    assert_eq!(arena.get(unit).stmts.len(), 1);
    let process = arena.get(unit).stmts[0];
    assert_eq!(arena.get(process).kind, NodeKind::Process);
    let wait = *arena.get(process).stmts.last().unwrap();
    assert_eq!(arena.get(wait).kind, NodeKind::Wait);
    assert!(arena.get(wait).is_static_wait());

    let before_second_pass = arena.get(unit).stmts.clone();
    simplify_unit(&mut arena, unit);
    assert_eq!(arena.get(unit).stmts, before_second_pass);
}

/// Constant folding reaches through a named-argument call: normalising the
/// argument order to the declared port order happens before the evaluator
/// ever sees the call, so a fully-named, out-of-order constant call still
/// folds.
#[test]
fn named_argument_call_still_constant_folds_after_reordering() {
    let mut arena = Arena::new();
    let mut decl = Node::new(NodeKind::FuncDecl);
    decl.attrs.set_str("builtin", "sub");
    decl.params = vec![
        Param { subkind: ParamSubkind::Pos, name: Some("l".into()), value: arena.alloc(Node::new(NodeKind::Literal)) },
        Param { subkind: ParamSubkind::Pos, name: Some("r".into()), value: arena.alloc(Node::new(NodeKind::Literal)) },
    ];
    let decl = arena.alloc(decl);

    let l = lit_int(&mut arena, 10);
    let r = lit_int(&mut arena, 3);
    let mut call = Node::new(NodeKind::FCall);
    call.reference = Some(decl);
    call.params = vec![
        Param { subkind: ParamSubkind::Named, name: Some("r".into()), value: r },
        Param { subkind: ParamSubkind::Named, name: Some("l".into()), value: l },
    ];
    let call = arena.alloc(call);

    let mut unit = Node::new(NodeKind::Elab);
    unit.decls = vec![call];
    let unit = arena.alloc(unit);

    simplify_unit(&mut arena, unit);
    let folded = arena.get(unit).decls[0];
    assert_eq!(arena.get(folded).literal, Some(Literal::Int(7)));
}
