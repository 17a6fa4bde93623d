use strum_macros::{Display, EnumString};

/// The tag distinguishing one node shape from another (§3). Variant names
/// follow the original LRM/nvc `T_*` vocabulary with the `T_` prefix
/// dropped, since Rust's enum namespacing already scopes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum NodeKind {
    Process,
    Wait,
    SignalAssign,
    VarAssign,
    If,
    Case,
    While,
    For,
    FCall,
    PCall,
    Ref,
    Literal,
    Aggregate,
    ArrayRef,
    AttrRef,
    CAssign,
    Select,
    CPCall,
    CAssert,
    Assert,
    Qualified,
    TypeConv,
    IfGenerate,
    Block,
    Null,
    SignalDecl,
    ConstDecl,
    VarDecl,
    PortDecl,
    UnitDecl,
    EnumLit,
    Elab,
    Waveform,
    Exit,
    Alias,
    FuncDecl,
    PackBody,
}

/// Subkind of a call/association parameter (§3): every parameter list is
/// either entirely positional, or positional-then-named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ParamSubkind {
    Pos,
    Named,
}

/// Subkind of an aggregate/selected-assignment association (§3, §4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Subkind {
    Pos,
    Named,
    Range,
    Others,
}

/// Direction (and determinacy) of a range (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum RangeKind {
    To,
    Downto,
    /// Dynamic range, ascending direction only known at run time.
    Dyn,
    /// Same as `Dyn` but iterated from `right` to `left` (reverse `for`).
    RDyn,
}

/// Assertion severity (§4.10, §6, §7). Ordered so `severity >= Error` reads
/// naturally as the LRM's "Error or worse" gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
pub enum Severity {
    Note,
    Warning,
    Error,
    Failure,
}

/// A folded compile-time value. `Enum` carries the resolved `NodeId` of the
/// literal's `EnumLit` declaration as a plain index so this type stays
/// `Copy`-free but still comparable; `Str`/`Bits` cover character/string and
/// bit-vector literals respectively.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Real(f64),
    Enum(u32),
    Str(String),
}

impl Literal {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Literal::Int(v) => Some(*v),
            Literal::Enum(v) => Some(*v as i64),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            Literal::Real(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        // Booleans are the two-valued enumeration type FALSE(0)/TRUE(1).
        match self {
            Literal::Enum(0) => Some(false),
            Literal::Enum(1) => Some(true),
            _ => None,
        }
    }
}
