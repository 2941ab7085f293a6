/// A primitive type a variable, constant, parameter or function result can be
/// declared with.
///
/// The spelling of each variant is the keyword used in source code and in the
/// variable snapshot returned to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// `ENTIER`, a 64-bit signed integer.
    Integer,
    /// `REEL`, a 64-bit floating-point number.
    Real,
    /// `CHAINE`, a string of characters.
    String,
    /// `BOOLEEN`, `VRAI` or `FAUX`.
    Boolean,
    /// `CARACTERE`, exactly one character.
    Character,
}

impl DataType {
    /// Every declarable type, in the order the syntax reference lists them.
    pub const ALL: [Self; 5] = [Self::Integer, Self::Real, Self::String, Self::Boolean, Self::Character];

    /// Returns the source keyword of the type.
    ///
    /// ## Example
    /// ```
    /// use algorithmique::ast::DataType;
    ///
    /// assert_eq!(DataType::Real.keyword(), "REEL");
    /// ```
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Integer => "ENTIER",
            Self::Real => "REEL",
            Self::String => "CHAINE",
            Self::Boolean => "BOOLEEN",
            Self::Character => "CARACTERE",
        }
    }

    /// Whether values of this type take part in arithmetic.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Real)
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// Represents a literal value written directly in source code.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// An integer literal such as `42`.
    Integer(i64),
    /// A real literal such as `3.14`.
    Real(f64),
    /// A double-quoted string literal.
    String(String),
    /// A single-quoted character literal.
    Character(char),
    /// `VRAI` or `FAUX`.
    Boolean(bool),
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<char> for LiteralValue {
    fn from(value: char) -> Self {
        Self::Character(value)
    }
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// Every variant records the line it starts on so runtime errors can point
/// back at the offending statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Line number in the source code.
        line:  usize,
    },
    /// Reference to a variable, parameter or constant by name.
    Variable {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// A unary operation (`-x`, `NON x`).
    UnaryOp {
        /// The unary operator to apply.
        op:   UnaryOperator,
        /// The operand expression.
        expr: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// A binary operation.
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A call to a built-in or a user-defined function (`RACINE(x)`,
    /// `Carre(x)`).
    Call {
        /// Name of the function being called.
        name:      String,
        /// Arguments to the function.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use algorithmique::ast::Expr;
    ///
    /// let expr = Expr::Variable { name: "x".to_string(),
    ///                             line: 5, };
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Literal { line, .. }
            | Self::Variable { line, .. }
            | Self::UnaryOp { line, .. }
            | Self::BinaryOp { line, .. }
            | Self::Call { line, .. } => *line,
        }
    }
}

/// A `name[, name...] : TYPE` declaration from a `VARIABLES` block.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    /// The declared names, in source order.
    pub names:     Vec<String>,
    /// The type shared by every name.
    pub data_type: DataType,
    /// Line number in the source code.
    pub line:      usize,
}

/// A `NAME [: TYPE] = expr` declaration from a `CONSTANTES` block.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstDecl {
    /// The constant's name.
    pub name:      String,
    /// Explicit type, or `None` to take the type of the value.
    pub data_type: Option<DataType>,
    /// The value expression, evaluated once before `DEBUT`.
    pub value:     Expr,
    /// Line number in the source code.
    pub line:      usize,
}

/// A formal parameter of a procedure or function.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// Parameter name.
    pub name:      String,
    /// Declared parameter type; arguments are coerced to it.
    pub data_type: DataType,
}

/// Distinguishes `PROCEDURE` from `FONCTION`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutineKind {
    /// `PROCEDURE`, called as a statement, yields no value.
    Procedure,
    /// `FONCTION`, called in expressions, yields a value through `RETOURNER`.
    Function,
}

/// A user-defined procedure or function.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutineDef {
    /// Procedure or function.
    pub kind:        RoutineKind,
    /// The routine name.
    pub name:        String,
    /// Formal parameters in order.
    pub params:      Vec<Param>,
    /// Declared result type, present exactly for functions.
    pub return_type: Option<DataType>,
    /// Local variable declarations.
    pub locals:      Vec<VarDecl>,
    /// The statements of the routine body.
    pub body:        Vec<Statement>,
    /// Line number in the source code.
    pub line:        usize,
}

/// A statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `target <- value`.
    Assignment {
        /// The assigned variable.
        target: String,
        /// The value which is being assigned.
        value:  Expr,
        /// Line number in the source code.
        line:   usize,
    },
    /// `LIRE(a, b)`, one input consumed per target.
    Read {
        /// Variables receiving inputs, in order.
        targets: Vec<String>,
        /// Line number in the source code.
        line:    usize,
    },
    /// `ECRIRE(e1, e2, ...)`.
    Write {
        /// Expressions whose formatted values are concatenated.
        values: Vec<Expr>,
        /// Line number in the source code.
        line:   usize,
    },
    /// `SI cond ALORS ... [SINON ...] FINSI`.
    If {
        /// The condition, which must be `BOOLEEN`.
        condition:   Expr,
        /// Statements run when the condition holds.
        then_branch: Vec<Statement>,
        /// Statements run otherwise, when a `SINON` is present.
        else_branch: Option<Vec<Statement>>,
        /// Line number in the source code.
        line:        usize,
    },
    /// `POUR var DE from A to [PAS step] FAIRE ... FINPOUR`.
    For(ForLoop),
    /// `TANT QUE cond FAIRE ... FINTANTQUE`.
    While {
        /// Tested before every iteration.
        condition: Expr,
        /// Loop body.
        body:      Vec<Statement>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `REPETER ... JUSQU'A cond`.
    Repeat {
        /// Loop body, run at least once.
        body:      Vec<Statement>,
        /// Tested after every iteration; the loop ends once it holds.
        condition: Expr,
        /// Line number in the source code.
        line:      usize,
    },
    /// A procedure call used as a statement.
    Call {
        /// Name of the procedure.
        name:      String,
        /// Arguments to the call.
        arguments: Vec<Expr>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `RETOURNER [expr]`.
    Return {
        /// The returned value; `None` inside procedures.
        value: Option<Expr>,
        /// Line number in the source code.
        line:  usize,
    },
}

impl Statement {
    /// Gets the line number from `self`.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Assignment { line, .. }
            | Self::Read { line, .. }
            | Self::Write { line, .. }
            | Self::If { line, .. }
            | Self::While { line, .. }
            | Self::Repeat { line, .. }
            | Self::Call { line, .. }
            | Self::Return { line, .. } => *line,
            Self::For(for_loop) => for_loop.line,
        }
    }
}

/// Header and body of a `POUR` loop.
#[derive(Debug, Clone, PartialEq)]
pub struct ForLoop {
    /// The loop variable name; must be declared `ENTIER`.
    pub var:   String,
    /// The first value of the loop variable.
    pub start: Expr,
    /// The inclusive bound.
    pub end:   Expr,
    /// The increment, `1` when omitted.
    pub step:  Option<Expr>,
    /// Loop body.
    pub body:  Vec<Statement>,
    /// Line number in the source code.
    pub line:  usize,
}

/// A parsed program.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// The name after `ALGORITHME`, if any.
    pub name:         Option<String>,
    /// `CONSTANTES` declarations.
    pub constants:    Vec<ConstDecl>,
    /// `VARIABLES` declarations.
    pub declarations: Vec<VarDecl>,
    /// Procedures and functions, in declaration order.
    pub routines:     Vec<RoutineDef>,
    /// The main block between `DEBUT` and `FIN`.
    pub statements:   Vec<Statement>,
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition, or text concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Real division (`/`)
    Div,
    /// Floored integer division (`DIV`)
    IntDiv,
    /// Floored modulo (`MOD`)
    Mod,
    /// Equal to (`=`)
    Equal,
    /// Not equal to (`<>`)
    NotEqual,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Logical and (`ET`)
    And,
    /// Logical or (`OU`)
    Or,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (`-x`).
    Negate,
    /// Logical NOT (`NON x`).
    Not,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, IntDiv, Less, LessEqual, Mod, Mul,
            NotEqual, Or, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            IntDiv => "DIV",
            Mod => "MOD",
            Equal => "=",
            NotEqual => "<>",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            And => "ET",
            Or => "OU",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
            Self::Not => write!(f, "NON"),
        }
    }
}
