//! Call-argument normalisation (§4.3): every `FCall`/`PCall`/`AttrRef`/
//! `CPCall` ends up with a purely positional parameter list, in declared-port
//! order, whatever mix of positional/named actuals it started with.

use crate::tree::{Arena, NodeId, Param, ParamSubkind};

/// Rewrite `id`'s parameter list to be entirely positional. A leading run of
/// already-positional actuals is kept verbatim (VHDL disallows a positional
/// actual after a named one, so that run is exactly `params[..p+1]`); each
/// remaining declared port is resolved by name against the tail of named
/// actuals.
pub fn normalise(arena: &mut Arena, id: NodeId) -> NodeId {
    let params = arena.get(id).params.clone();
    let leading_pos = params
        .iter()
        .take_while(|p| p.subkind == ParamSubkind::Pos)
        .count();
    if leading_pos == params.len() {
        return id;
    }

    let Some(decl_id) = arena.get(id).reference else {
        return id;
    };
    let ports = arena.get(decl_id).params.clone();

    let mut new_params: Vec<Param> = params[..leading_pos].to_vec();
    for port in ports.iter().skip(leading_pos) {
        let port_name = port.name.as_deref().unwrap_or("");
        let actual = params[leading_pos..].iter().find(|p| {
            p.subkind == ParamSubkind::Named && p.name.as_deref() == Some(port_name)
        });
        let Some(actual) = actual else {
            panic!(
                "{}",
                crate::error::TreeError::UnresolvedFormal {
                    port: port_name.to_string()
                }
            );
        };
        new_params.push(Param {
            subkind: ParamSubkind::Pos,
            name: None,
            value: actual.value,
        });
    }

    let mut new_node = arena.get(id).clone();
    new_node.params = new_params;
    arena.alloc(new_node)
}
