use super::{Type, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// AND of all operands, TRUE when empty
    And(Vec<Expr>),

    /// OR of all operands, FALSE when empty
    Or(Vec<Expr>),

    BinaryOp {
        lhs: Box<Expr>,
        op: BinaryOp,
        rhs: Box<Expr>,
    },

    /// A column of the statement's table
    Column(String),

    /// Document access `"column"#>>path`, or `#>` when `text` is false
    Path {
        column: String,
        path: Box<Expr>,
        text: bool,
    },

    Cast {
        expr: Box<Expr>,
        ty: Type,
    },

    InList {
        expr: Box<Expr>,
        list: Vec<Expr>,
        negate: bool,
    },

    IsNull {
        expr: Box<Expr>,
        negate: bool,
    },

    /// Case-insensitive pattern match
    Like {
        expr: Box<Expr>,
        pattern: Box<Expr>,
        negate: bool,
    },

    /// Document containment `lhs @> rhs`
    Contains {
        expr: Box<Expr>,
        value: Box<Expr>,
    },

    /// A value bound as a parameter
    Value(Value),

    /// A string inlined as a quoted literal
    Literal(String),

    /// TRUE / FALSE
    Const(bool),

    /// `COUNT(*)`
    Count,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl Expr {
    pub fn column(store: impl Into<String>) -> Self {
        Expr::Column(store.into())
    }

    pub fn value(value: impl Into<Value>) -> Self {
        Expr::Value(value.into())
    }

    pub fn binary_op(lhs: Expr, op: BinaryOp, rhs: Expr) -> Self {
        Expr::BinaryOp {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        }
    }

    pub fn eq(lhs: Expr, rhs: Expr) -> Self {
        Self::binary_op(lhs, BinaryOp::Eq, rhs)
    }

    pub fn cast(self, ty: Type) -> Self {
        Expr::Cast {
            expr: Box::new(self),
            ty,
        }
    }

    /// Membership test. An empty list never matches.
    pub fn in_list(self, list: Vec<Expr>) -> Self {
        if list.is_empty() {
            return Expr::Const(false);
        }
        Expr::InList {
            expr: Box::new(self),
            list,
            negate: false,
        }
    }

    /// Negated membership test. An empty list always matches.
    pub fn not_in_list(self, list: Vec<Expr>) -> Self {
        if list.is_empty() {
            return Expr::Const(true);
        }
        Expr::InList {
            expr: Box::new(self),
            list,
            negate: true,
        }
    }

    pub fn is_null(self, negate: bool) -> Self {
        Expr::IsNull {
            expr: Box::new(self),
            negate,
        }
    }

    pub fn like(self, pattern: Expr, negate: bool) -> Self {
        Expr::Like {
            expr: Box::new(self),
            pattern: Box::new(pattern),
            negate,
        }
    }

    pub fn contains(self, value: Expr) -> Self {
        Expr::Contains {
            expr: Box::new(self),
            value: Box::new(value),
        }
    }

    /// ANDs the operands, flattening single-operand lists.
    pub fn and_from_vec(mut operands: Vec<Expr>) -> Self {
        if operands.len() == 1 {
            return operands.remove(0);
        }
        Expr::And(operands)
    }

    pub fn or_from_vec(mut operands: Vec<Expr>) -> Self {
        if operands.len() == 1 {
            return operands.remove(0);
        }
        Expr::Or(operands)
    }

    pub fn is_const(&self) -> bool {
        matches!(self, Expr::Const(_))
    }
}
