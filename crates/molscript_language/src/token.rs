//! Token codes and the token record.
//!
//! A [`Tok`] is a 32-bit code. High bits carry the family and capability
//! flags listed in [`attr`], low bits carry a per-family id, and operators
//! additionally pack a precedence level (bits 4..8) and math functions a
//! maximum argument count (bits 9..12). Attribute tests are a single AND and
//! compare; nothing dispatches on a table.

use std::fmt;

use molscript_foundation::ScriptValue;

/// Capability flags combined into token codes.
pub mod attr {
    /// Parameter of the `set` command.
    pub const SETPARAM: i32 = 1 << 29;
    /// Miscellaneous keyword.
    pub const MISC: i32 = 1 << 30;
    /// Both a `set` parameter and a command of its own.
    pub const DEPRECATEDPARAM: i32 = SETPARAM | MISC;
    /// Plain identifier.
    pub const IDENTIFIER: i32 = MISC;

    /// Starts a command.
    pub const SCRIPT_COMMAND: i32 = 1 << 12;
    /// Command whose arguments are an atom expression.
    pub const ATOM_EXPRESSION_COMMAND: i32 = (1 << 13) | SCRIPT_COMMAND;
    /// Command whose argument is the rest of the line as a string.
    pub const IMPLICIT_STRING_COMMAND: i32 = (1 << 14) | SCRIPT_COMMAND;
    /// Command whose arguments are a math expression.
    pub const MATH_EXPRESSION_COMMAND: i32 = (1 << 15) | SCRIPT_COMMAND;
    /// Control-flow command.
    pub const FLOW_COMMAND: i32 = (1 << 16) | MATH_EXPRESSION_COMMAND;
    /// Command that manages a shape.
    pub const SHAPE_COMMAND: i32 = (1 << 17) | SCRIPT_COMMAND;

    /// Takes no arguments.
    pub const NO_ARGS: i32 = 1 << 18;
    /// With no arguments, means `on`.
    pub const DEFAULT_ON: i32 = 1 << 19;

    /// May appear in an expression.
    pub const EXPRESSION: i32 = 1 << 20;
    /// Named, redefinable atom set.
    pub const PREDEFINED_SET: i32 = (1 << 21) | EXPRESSION;

    /// Per-atom property.
    pub const ATOM_PROPERTY: i32 = (1 << 22) | EXPRESSION | MISC;
    /// String-valued atom property.
    pub const STR_PROPERTY: i32 = (1 << 23) | ATOM_PROPERTY;
    /// Integer-valued atom property.
    pub const INT_PROPERTY: i32 = (1 << 24) | ATOM_PROPERTY;
    /// Float-valued atom property.
    pub const FLOAT_PROPERTY: i32 = (1 << 25) | ATOM_PROPERTY;

    /// String `set` parameter.
    pub const STR_PARAM: i32 = (1 << 23) | SETPARAM;
    /// Integer `set` parameter.
    pub const INT_PARAM: i32 = (1 << 24) | SETPARAM;
    /// Float `set` parameter.
    pub const FLOAT_PARAM: i32 = (1 << 25) | SETPARAM;
    /// Boolean `set` parameter.
    pub const BOOLEAN_PARAM: i32 = (1 << 26) | SETPARAM;

    /// Property reachable with `.name` on a value.
    pub const MATH_PROPERTY: i32 = (1 << 26) | EXPRESSION | MISC;
    /// Function callable in an expression.
    pub const MATH_FUNC: i32 = (1 << 27) | EXPRESSION;
    /// Operator.
    pub const MATH_OP: i32 = (1 << 28) | EXPRESSION;
    /// Comparison operator.
    pub const COMPARATOR: i32 = MATH_OP | (1 << 8);

    /// Property that can be assigned.
    pub const SETTABLE: i32 = 1 << 11;
    /// Aggregate selector bits (`min`, `max`, `average`, ...).
    pub const MINMAX_MASK: i32 = 0xF << 5;
}

#[allow(clippy::wildcard_imports)]
use attr::*;

/// A packed token code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tok(pub i32);

/// Coarse classification of a token code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenFamily {
    /// Literal payload carrier (integer, string, set, ...).
    Literal,
    /// Control-flow command.
    FlowCommand,
    /// Any other command.
    Command,
    /// Operator.
    Operator,
    /// Math function.
    MathFunction,
    /// Atom or value property.
    Property,
    /// Predefined atom set.
    PredefinedSet,
    /// `set` parameter.
    SetParameter,
    /// Expression keyword.
    Expression,
    /// Anything else, including identifiers.
    Misc,
}

impl Tok {
    /// True when every bit of `mask` is set in this code.
    #[must_use]
    pub const fn has(self, mask: i32) -> bool {
        self.0 & mask == mask
    }

    /// Operator precedence level.
    #[must_use]
    pub const fn precedence(self) -> i32 {
        (self.0 >> 4) & 0xF
    }

    /// Maximum argument count of a math function (0 means unlimited).
    #[must_use]
    pub const fn max_params(self) -> i32 {
        (self.0 >> 9) & 0x7
    }

    /// The raw code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self.0
    }

    /// Classifies this code.
    #[must_use]
    pub const fn family(self) -> TokenFamily {
        if self.0 >= 0 && self.0 <= Self::KEYWORD.0 {
            TokenFamily::Literal
        } else if self.has(FLOW_COMMAND) {
            TokenFamily::FlowCommand
        } else if self.has(SCRIPT_COMMAND) {
            TokenFamily::Command
        } else if self.has(MATH_OP) {
            TokenFamily::Operator
        } else if self.has(MATH_FUNC) {
            TokenFamily::MathFunction
        } else if self.has(ATOM_PROPERTY) || self.has(MATH_PROPERTY) {
            TokenFamily::Property
        } else if self.has(PREDEFINED_SET) {
            TokenFamily::PredefinedSet
        } else if self.has(SETPARAM) && !self.has(MISC) {
            TokenFamily::SetParameter
        } else if self.has(EXPRESSION) {
            TokenFamily::Expression
        } else {
            TokenFamily::Misc
        }
    }

    /// True for `for`, `process`, `while`, `case` and `default`, the
    /// constructs `break` may leave.
    #[must_use]
    pub const fn is_breakable(self) -> bool {
        matches!(
            self,
            Self::FOR | Self::PROCESS | Self::WHILE | Self::CASE | Self::DEFAULT
        )
    }
}

#[allow(missing_docs)]
impl Tok {
    // literal carriers
    pub const NADA: Tok = Tok(0);
    pub const INTEGER: Tok = Tok(2);
    pub const DECIMAL: Tok = Tok(3);
    pub const STRING: Tok = Tok(4);
    pub const SEQCODE: Tok = Tok(5);
    pub const HASH: Tok = Tok(6);
    pub const VARRAY: Tok = Tok(7);
    pub const POINT3F: Tok = Tok(8);
    pub const POINT4F: Tok = Tok(9);
    pub const BITSET: Tok = Tok(10);
    pub const MATRIX3F: Tok = Tok(11);
    pub const MATRIX4F: Tok = Tok(12);
    pub const LISTF: Tok = Tok(13);
    pub const KEYWORD: Tok = Tok(14);
    pub const IDENTIFIER: Tok = Tok(IDENTIFIER);

    // atom-expression commands
    pub const CENTER: Tok = Tok(1 | ATOM_EXPRESSION_COMMAND);
    pub const DEFINE: Tok = Tok(2 | ATOM_EXPRESSION_COMMAND | EXPRESSION);
    pub const DELETE: Tok = Tok(3 | ATOM_EXPRESSION_COMMAND);
    pub const DISPLAY: Tok = Tok(4 | ATOM_EXPRESSION_COMMAND | DEPRECATEDPARAM);
    pub const FIXED: Tok = Tok(5 | ATOM_EXPRESSION_COMMAND | EXPRESSION);
    pub const HIDE: Tok = Tok(6 | ATOM_EXPRESSION_COMMAND);
    pub const RESTRICT: Tok = Tok(7 | ATOM_EXPRESSION_COMMAND);
    pub const SUBSET: Tok = Tok(8 | ATOM_EXPRESSION_COMMAND | PREDEFINED_SET);
    pub const ZAP: Tok = Tok(9 | ATOM_EXPRESSION_COMMAND | EXPRESSION);

    // math-expression commands
    pub const PRINT: Tok = Tok(1 | MATH_EXPRESSION_COMMAND);
    pub const RETURN: Tok = Tok(2 | MATH_EXPRESSION_COMMAND);
    pub const SET: Tok = Tok(3 | MATH_EXPRESSION_COMMAND | EXPRESSION);
    pub const VAR: Tok = Tok(4 | MATH_EXPRESSION_COMMAND);
    pub const LOG: Tok = Tok(5 | MATH_EXPRESSION_COMMAND);

    // implicit-string commands
    pub const ECHO: Tok = Tok(1 | IMPLICIT_STRING_COMMAND | SHAPE_COMMAND | SETPARAM);
    pub const HELP: Tok = Tok(2 | IMPLICIT_STRING_COMMAND);
    pub const HOVER: Tok = Tok(3 | IMPLICIT_STRING_COMMAND | DEFAULT_ON);
    pub const MESSAGE: Tok = Tok(5 | IMPLICIT_STRING_COMMAND);
    pub const PAUSE: Tok = Tok(7 | IMPLICIT_STRING_COMMAND);

    // flow commands
    pub const ELSEIF: Tok = Tok(2 | FLOW_COMMAND);
    pub const ELSE: Tok = Tok(3 | FLOW_COMMAND | NO_ARGS);
    pub const ENDIF: Tok = Tok(4 | FLOW_COMMAND | NO_ARGS);
    pub const WHILE: Tok = Tok(6 | FLOW_COMMAND);
    pub const BREAK: Tok = Tok(7 | FLOW_COMMAND);
    pub const CONTINUE: Tok = Tok(8 | FLOW_COMMAND);
    pub const END: Tok = Tok(9 | FLOW_COMMAND | EXPRESSION);
    pub const SWITCH: Tok = Tok(10 | FLOW_COMMAND);
    pub const CASE: Tok = Tok(11 | FLOW_COMMAND);
    pub const CATCH: Tok = Tok(12 | FLOW_COMMAND);
    pub const DEFAULT: Tok = Tok(13 | FLOW_COMMAND);
    pub const TRY: Tok = Tok(14 | FLOW_COMMAND | NO_ARGS);
    pub const PARALLEL: Tok = Tok(36 | FLOW_COMMAND);
    pub const PROCESS: Tok = Tok(39 | FLOW_COMMAND);

    // script commands
    pub const ANIMATION: Tok = Tok(1 | SCRIPT_COMMAND);
    pub const ASSIGN: Tok = Tok(2 | SCRIPT_COMMAND);
    pub const BACKGROUND: Tok = Tok(3 | SCRIPT_COMMAND | DEPRECATEDPARAM);
    pub const BIND: Tok = Tok(4 | SCRIPT_COMMAND);
    pub const BONDORDER: Tok = Tok(5 | SCRIPT_COMMAND);
    pub const CALCULATE: Tok = Tok(6 | SCRIPT_COMMAND);
    pub const CAPTURE: Tok = Tok(7 | SCRIPT_COMMAND);
    pub const CD: Tok = Tok(8 | SCRIPT_COMMAND | IMPLICIT_STRING_COMMAND | EXPRESSION);
    pub const CENTER_AT: Tok = Tok(9 | SCRIPT_COMMAND);
    pub const CONNECT: Tok = Tok(10 | SCRIPT_COMMAND);
    pub const CONSOLE: Tok = Tok(11 | SCRIPT_COMMAND | DEFAULT_ON);
    pub const DELAY: Tok = Tok(13 | SCRIPT_COMMAND | DEFAULT_ON);
    pub const DEPTH: Tok = Tok(14 | SCRIPT_COMMAND | INT_PARAM | DEFAULT_ON);
    pub const EXIT: Tok = Tok(15 | SCRIPT_COMMAND | NO_ARGS);
    pub const EXITJMOL: Tok = Tok(16 | SCRIPT_COMMAND | NO_ARGS);
    pub const FONT: Tok = Tok(18 | SCRIPT_COMMAND);
    pub const FRAME: Tok = Tok(19 | SCRIPT_COMMAND);
    pub const GOTO: Tok = Tok(20 | SCRIPT_COMMAND | IMPLICIT_STRING_COMMAND);
    pub const HBOND: Tok = Tok(22 | SCRIPT_COMMAND | DEPRECATEDPARAM | EXPRESSION | DEFAULT_ON);
    pub const HISTORY: Tok = Tok(23 | SCRIPT_COMMAND | DEPRECATEDPARAM);
    pub const INITIALIZE: Tok = Tok(24 | SCRIPT_COMMAND | NO_ARGS);
    pub const INVERT_SELECTED: Tok = Tok(25 | SCRIPT_COMMAND);
    pub const LOOP: Tok = Tok(26 | SCRIPT_COMMAND | DEFAULT_ON);
    pub const MAP_PROPERTY: Tok = Tok(28 | SCRIPT_COMMAND | EXPRESSION);
    pub const MINIMIZE: Tok = Tok(30 | SCRIPT_COMMAND);
    pub const MOVE: Tok = Tok(32 | SCRIPT_COMMAND);
    pub const MOVETO: Tok = Tok(34 | SCRIPT_COMMAND);
    pub const NAVIGATE: Tok = Tok(35 | SCRIPT_COMMAND);
    pub const PLOT: Tok = Tok(37 | SCRIPT_COMMAND);
    pub const QUIT: Tok = Tok(41 | SCRIPT_COMMAND | NO_ARGS);
    pub const RAMACHANDRAN: Tok = Tok(42 | SCRIPT_COMMAND | EXPRESSION);
    pub const REDOMOVE: Tok = Tok(43 | SCRIPT_COMMAND);
    pub const REFRESH: Tok = Tok(44 | SCRIPT_COMMAND | NO_ARGS);
    pub const RESET: Tok = Tok(45 | SCRIPT_COMMAND);
    pub const RESTORE: Tok = Tok(46 | SCRIPT_COMMAND);
    pub const RESUME: Tok = Tok(47 | SCRIPT_COMMAND | NO_ARGS);
    pub const ROTATE: Tok = Tok(48 | SCRIPT_COMMAND | DEFAULT_ON);
    pub const ROTATE_SELECTED: Tok = Tok(49 | SCRIPT_COMMAND);
    pub const SAVE: Tok = Tok(50 | SCRIPT_COMMAND);
    pub const SELECTIONHALOS: Tok = Tok(51 | SCRIPT_COMMAND | DEPRECATEDPARAM | DEFAULT_ON);
    pub const SHOW: Tok = Tok(52 | SCRIPT_COMMAND);
    pub const SLAB: Tok = Tok(53 | SCRIPT_COMMAND | INT_PARAM | DEFAULT_ON);
    pub const SPIN: Tok = Tok(55 | SCRIPT_COMMAND | DEPRECATEDPARAM | DEFAULT_ON);
    pub const SSBOND: Tok = Tok(56 | SCRIPT_COMMAND | DEPRECATEDPARAM | DEFAULT_ON);
    pub const STEP: Tok = Tok(58 | SCRIPT_COMMAND | NO_ARGS);
    pub const STEREO: Tok = Tok(59 | SCRIPT_COMMAND | DEFAULT_ON);
    pub const SYNC: Tok = Tok(60 | SCRIPT_COMMAND);
    pub const TIMEOUT: Tok = Tok(62 | SCRIPT_COMMAND | SETPARAM);
    pub const TRANSLATE: Tok = Tok(64 | SCRIPT_COMMAND);
    pub const TRANSLATE_SELECTED: Tok = Tok(66 | SCRIPT_COMMAND);
    pub const UNBIND: Tok = Tok(68 | SCRIPT_COMMAND);
    pub const UNDOMOVE: Tok = Tok(69 | SCRIPT_COMMAND);
    pub const VIBRATION: Tok = Tok(70 | SCRIPT_COMMAND);
    pub const ZOOM: Tok = Tok(72 | SCRIPT_COMMAND);
    pub const ZOOM_TO: Tok = Tok(74 | SCRIPT_COMMAND);

    // shape commands
    pub const AXES: Tok = Tok(2 | SHAPE_COMMAND | DEPRECATEDPARAM | DEFAULT_ON);
    pub const CGO: Tok = Tok(6 | SHAPE_COMMAND);
    pub const DIPOLE: Tok = Tok(7 | SHAPE_COMMAND);
    pub const DRAW: Tok = Tok(8 | SHAPE_COMMAND);
    pub const FRANK: Tok = Tok(10 | SHAPE_COMMAND | DEPRECATEDPARAM | DEFAULT_ON);
    pub const ISOSURFACE: Tok = Tok(12 | SHAPE_COMMAND);
    pub const LCAOCARTOON: Tok = Tok(14 | SHAPE_COMMAND);
    pub const MEASUREMENTS: Tok = Tok(16 | SHAPE_COMMAND | SETPARAM);
    pub const MO: Tok = Tok(18 | SHAPE_COMMAND | EXPRESSION);
    pub const PMESH: Tok = Tok(20 | SHAPE_COMMAND);
    pub const PLOT3D: Tok = Tok(22 | SHAPE_COMMAND);
    pub const POLYHEDRA: Tok = Tok(24 | SHAPE_COMMAND);
    pub const STRUTS: Tok = Tok(26 | SHAPE_COMMAND | DEFAULT_ON | EXPRESSION);
    pub const UNITCELL: Tok =
        Tok(28 | SHAPE_COMMAND | DEPRECATEDPARAM | EXPRESSION | PREDEFINED_SET | DEFAULT_ON);
    pub const VECTOR: Tok = Tok(30 | SHAPE_COMMAND);
    pub const WIREFRAME: Tok = Tok(32 | SHAPE_COMMAND | DEFAULT_ON);

    // expression terms
    pub const EXPRESSION_BEGIN: Tok = Tok(1 | EXPRESSION);
    pub const EXPRESSION_END: Tok = Tok(2 | EXPRESSION);
    pub const ALL: Tok = Tok(3 | EXPRESSION);
    pub const BRANCH: Tok = Tok(4 | EXPRESSION);
    pub const COORD: Tok = Tok(6 | EXPRESSION);
    pub const DOLLARSIGN: Tok = Tok(7 | EXPRESSION);
    pub const PER: Tok = Tok(8 | EXPRESSION);
    pub const ISAROMATIC: Tok = Tok(9 | EXPRESSION);
    pub const LEFTBRACE: Tok = Tok(10 | EXPRESSION);
    pub const NONE: Tok = Tok(11 | EXPRESSION);
    pub const OFF: Tok = Tok(12 | EXPRESSION);
    pub const ON: Tok = Tok(13 | EXPRESSION);
    pub const RIGHTBRACE: Tok = Tok(14 | EXPRESSION);
    pub const SEMICOLON: Tok = Tok(15 | EXPRESSION);

    // predefined sets
    pub const AMINO: Tok = Tok(2 | PREDEFINED_SET);
    pub const DNA: Tok = Tok(4 | PREDEFINED_SET);
    pub const HETERO: Tok = Tok(6 | PREDEFINED_SET | DEPRECATEDPARAM);
    pub const HELIXALPHA: Tok = Tok(7 | PREDEFINED_SET);
    pub const HELIX310: Tok = Tok(8 | PREDEFINED_SET);
    pub const HELIXPI: Tok = Tok(10 | PREDEFINED_SET);
    pub const HYDROGEN: Tok = Tok(12 | PREDEFINED_SET | DEPRECATEDPARAM);
    pub const NUCLEIC: Tok = Tok(14 | PREDEFINED_SET);
    pub const PROTEIN: Tok = Tok(16 | PREDEFINED_SET);
    pub const PURINE: Tok = Tok(18 | PREDEFINED_SET);
    pub const PYRIMIDINE: Tok = Tok(20 | PREDEFINED_SET);
    pub const RNA: Tok = Tok(22 | PREDEFINED_SET);
    pub const SOLVENT: Tok = Tok(24 | PREDEFINED_SET | DEPRECATEDPARAM);
    pub const SIDECHAIN: Tok = Tok(26 | PREDEFINED_SET);
    pub const SURFACE: Tok = Tok(28 | PREDEFINED_SET);
    pub const THISMODEL: Tok = Tok(30 | PREDEFINED_SET);
    pub const SHEET: Tok = Tok(32 | PREDEFINED_SET);
    pub const SPINE: Tok = Tok(34 | PREDEFINED_SET);
    pub const CARBOHYDRATE: Tok = Tok(36 | PREDEFINED_SET);
    pub const CLICKABLE: Tok = Tok(38 | PREDEFINED_SET);
    pub const DISPLAYED: Tok = Tok(40 | PREDEFINED_SET);
    pub const HIDDEN: Tok = Tok(42 | PREDEFINED_SET);
    pub const SPECIALPOSITION: Tok = Tok(44 | PREDEFINED_SET);
    pub const VISIBLE: Tok = Tok(46 | PREDEFINED_SET);
    pub const BASEMODEL: Tok = Tok(48 | PREDEFINED_SET);
    pub const NONEQUIVALENT: Tok = Tok(50 | PREDEFINED_SET);

    // operators
    pub const LEFTPAREN: Tok = Tok(MATH_OP | (1 << 4));
    pub const RIGHTPAREN: Tok = Tok(1 | MATH_OP | (1 << 4));
    pub const OP_IF: Tok = Tok(1 | MATH_OP | (2 << 4) | SETPARAM);
    pub const COLON: Tok = Tok(2 | MATH_OP | (2 << 4));
    pub const COMMA: Tok = Tok(MATH_OP | (3 << 4));
    pub const LEFTSQUARE: Tok = Tok(MATH_OP | (4 << 4));
    pub const RIGHTSQUARE: Tok = Tok(1 | MATH_OP | (4 << 4));
    pub const OP_OR: Tok = Tok(MATH_OP | (5 << 4));
    pub const OP_XOR: Tok = Tok(1 | MATH_OP | (5 << 4));
    pub const OP_TOGGLE: Tok = Tok(2 | MATH_OP | (5 << 4));
    pub const OP_AND: Tok = Tok(MATH_OP | (6 << 4));
    pub const OP_NOT: Tok = Tok(MATH_OP | (7 << 4));
    pub const OP_AND_ALL: Tok = Tok(MATH_OP | (8 << 4));
    pub const OP_GT: Tok = Tok(COMPARATOR | (9 << 4));
    pub const OP_GE: Tok = Tok(1 | COMPARATOR | (9 << 4));
    pub const OP_LE: Tok = Tok(2 | COMPARATOR | (9 << 4));
    pub const OP_LT: Tok = Tok(3 | COMPARATOR | (9 << 4));
    pub const OP_EQ: Tok = Tok(4 | COMPARATOR | (9 << 4));
    pub const OP_NE: Tok = Tok(6 | COMPARATOR | (9 << 4));
    pub const MINUS: Tok = Tok(MATH_OP | (10 << 4));
    pub const PLUS: Tok = Tok(1 | MATH_OP | (10 << 4));
    pub const DIVIDE: Tok = Tok(MATH_OP | (11 << 4));
    pub const TIMES: Tok = Tok(1 | MATH_OP | (11 << 4));
    pub const PERCENT: Tok = Tok(2 | MATH_OP | (11 << 4));
    pub const LEFTDIVIDE: Tok = Tok(3 | MATH_OP | (11 << 4));
    pub const UNARY_MINUS: Tok = Tok(MATH_OP | (12 << 4));
    pub const MINUS_MINUS: Tok = Tok(1 | MATH_OP | (12 << 4));
    pub const PLUS_PLUS: Tok = Tok(2 | MATH_OP | (12 << 4));
    pub const TIMES_TIMES: Tok = Tok(3 | MATH_OP | (12 << 4));
    pub const PROPSELECTOR: Tok = Tok(1 | MATH_OP | (13 << 4));
    pub const ANDEQUALS: Tok = Tok(2 | MATH_OP | (13 << 4));

    // value properties
    pub const ATOMS: Tok = Tok(1 | MATH_PROPERTY);
    pub const BONDS: Tok = Tok(2 | MATH_PROPERTY | DEPRECATEDPARAM);
    pub const LENGTH: Tok = Tok(3 | MATH_PROPERTY);
    pub const LINES: Tok = Tok(4 | MATH_PROPERTY);
    pub const REVERSE: Tok = Tok(5 | MATH_PROPERTY);
    pub const SIZE: Tok = Tok(6 | MATH_PROPERTY);
    pub const TYPE: Tok = Tok(8 | MATH_PROPERTY);
    pub const BOUNDBOX: Tok = Tok(9 | MATH_PROPERTY | DEPRECATEDPARAM | SHAPE_COMMAND | DEFAULT_ON);
    pub const XYZ: Tok = Tok(10 | MATH_PROPERTY | ATOM_PROPERTY | SETTABLE);
    pub const FRACXYZ: Tok = Tok(11 | MATH_PROPERTY | ATOM_PROPERTY | SETTABLE);
    pub const W: Tok = Tok(16 | MATH_PROPERTY);
    pub const KEYS: Tok = Tok(17 | MATH_PROPERTY);

    // atom properties
    pub const OCCUPANCY: Tok = Tok(INT_PROPERTY | FLOAT_PROPERTY | 1 | SETTABLE);
    pub const RADIUS: Tok = Tok(INT_PROPERTY | FLOAT_PROPERTY | 2 | DEPRECATEDPARAM | SETTABLE);
    pub const STRUCTURE: Tok = Tok(INT_PROPERTY | STR_PROPERTY | 3 | SETPARAM | SCRIPT_COMMAND);
    pub const ATOMTYPE: Tok = Tok(STR_PROPERTY | 1 | SETTABLE);
    pub const ATOMNAME: Tok = Tok(STR_PROPERTY | 2 | SETTABLE);
    pub const ALTLOC: Tok = Tok(STR_PROPERTY | 3);
    pub const CHAIN: Tok = Tok(STR_PROPERTY | 4);
    pub const ELEMENT: Tok = Tok(STR_PROPERTY | 5 | SETTABLE);
    pub const GROUP: Tok = Tok(STR_PROPERTY | 6);
    pub const GROUP1: Tok = Tok(STR_PROPERTY | 7);
    pub const SEQUENCE: Tok = Tok(STR_PROPERTY | 8);
    pub const IDENTIFY: Tok = Tok(STR_PROPERTY | 9);
    pub const INSERTION: Tok = Tok(STR_PROPERTY | 10);
    pub const SHAPE: Tok = Tok(STR_PROPERTY | 11);
    pub const STRUCID: Tok = Tok(STR_PROPERTY | 12);
    pub const SYMBOL: Tok = Tok(STR_PROPERTY | 13 | SETTABLE);
    pub const SYMMETRY: Tok = Tok(STR_PROPERTY | 14 | PREDEFINED_SET);
    pub const ATOMNO: Tok = Tok(INT_PROPERTY | 1 | SETTABLE);
    pub const ATOMID: Tok = Tok(INT_PROPERTY | 2);
    pub const ATOMINDEX: Tok = Tok(INT_PROPERTY | 3);
    pub const BONDCOUNT: Tok = Tok(INT_PROPERTY | 4);
    pub const CELL: Tok = Tok(INT_PROPERTY | 5);
    pub const CHAINNO: Tok = Tok(INT_PROPERTY | 7);
    pub const CONFIGURATION: Tok = Tok(INT_PROPERTY | 8 | SCRIPT_COMMAND);
    pub const ELEMNO: Tok = Tok(INT_PROPERTY | 10 | SETTABLE);
    pub const FORMALCHARGE: Tok = Tok(INT_PROPERTY | 11 | SETPARAM | SETTABLE);
    pub const GROUPID: Tok = Tok(INT_PROPERTY | 12);
    pub const GROUPINDEX: Tok = Tok(INT_PROPERTY | 13);
    pub const MODEL: Tok = Tok(INT_PROPERTY | 14 | SCRIPT_COMMAND);
    pub const MODELINDEX: Tok = Tok(INT_PROPERTY | 15);
    pub const MOLECULE: Tok = Tok(INT_PROPERTY | 16);
    pub const POLYMER: Tok = Tok(INT_PROPERTY | 17);
    pub const RESNO: Tok = Tok(INT_PROPERTY | 19);
    pub const SITE: Tok = Tok(INT_PROPERTY | 20);
    pub const STRUCNO: Tok = Tok(INT_PROPERTY | 21);
    pub const VALENCE: Tok = Tok(INT_PROPERTY | 22 | SETTABLE);
    pub const MASS: Tok = Tok(FLOAT_PROPERTY | 7);
    pub const PHI: Tok = Tok(FLOAT_PROPERTY | 9);
    pub const PSI: Tok = Tok(FLOAT_PROPERTY | 10);
    pub const PARTIALCHARGE: Tok = Tok(FLOAT_PROPERTY | 12 | SETTABLE);
    pub const TEMPERATURE: Tok = Tok(FLOAT_PROPERTY | 15 | SETTABLE);
    pub const X: Tok = Tok(FLOAT_PROPERTY | 21 | SETTABLE);
    pub const Y: Tok = Tok(FLOAT_PROPERTY | 22 | SETTABLE);
    pub const Z: Tok = Tok(FLOAT_PROPERTY | 23 | SETTABLE);
    pub const VANDERWAALS: Tok = Tok(FLOAT_PROPERTY | 24 | SETTABLE | SETPARAM);
    pub const PROPERTY: Tok = Tok(FLOAT_PROPERTY | 25 | SETTABLE | SETPARAM | MATH_PROPERTY);
    pub const HYDROPHOBIC: Tok = Tok(FLOAT_PROPERTY | 26 | SETTABLE | PREDEFINED_SET);
    pub const SELECTED: Tok = Tok(FLOAT_PROPERTY | 27 | SETTABLE | PREDEFINED_SET);

    // shape properties that are also commands
    pub const BACKBONE: Tok =
        Tok(FLOAT_PROPERTY | SHAPE_COMMAND | 1 | PREDEFINED_SET | DEFAULT_ON | SETTABLE);
    pub const CARTOON: Tok = Tok(FLOAT_PROPERTY | SHAPE_COMMAND | 2 | DEFAULT_ON | SETTABLE);
    pub const DOTS: Tok = Tok(FLOAT_PROPERTY | SHAPE_COMMAND | 3 | DEFAULT_ON);
    pub const ELLIPSOID: Tok = Tok(FLOAT_PROPERTY | SHAPE_COMMAND | 4 | DEFAULT_ON);
    pub const GEOSURFACE: Tok = Tok(FLOAT_PROPERTY | SHAPE_COMMAND | 5 | DEFAULT_ON);
    pub const HALO: Tok = Tok(FLOAT_PROPERTY | SHAPE_COMMAND | 6 | DEFAULT_ON | SETTABLE);
    pub const MESHRIBBON: Tok = Tok(FLOAT_PROPERTY | SHAPE_COMMAND | 7 | DEFAULT_ON | SETTABLE);
    pub const RIBBON: Tok = Tok(FLOAT_PROPERTY | SHAPE_COMMAND | 9 | DEFAULT_ON | SETTABLE);
    pub const ROCKET: Tok = Tok(FLOAT_PROPERTY | SHAPE_COMMAND | 10 | DEFAULT_ON | SETTABLE);
    pub const SPACEFILL: Tok = Tok(FLOAT_PROPERTY | SHAPE_COMMAND | 11 | DEFAULT_ON | SETTABLE);
    pub const STAR: Tok = Tok(FLOAT_PROPERTY | SHAPE_COMMAND | 12 | DEFAULT_ON | SETTABLE);
    pub const STRANDS: Tok =
        Tok(FLOAT_PROPERTY | SHAPE_COMMAND | 13 | DEPRECATEDPARAM | DEFAULT_ON | SETTABLE);
    pub const TRACE: Tok = Tok(FLOAT_PROPERTY | SHAPE_COMMAND | 14 | DEFAULT_ON | SETTABLE);

    // math functions, unlimited arguments
    pub const ANGLE: Tok = Tok(1 | MATH_FUNC);
    pub const ARRAY: Tok = Tok(2 | MATH_FUNC);
    pub const AXISANGLE: Tok = Tok(3 | MATH_FUNC);
    pub const COLOR: Tok =
        Tok(4 | MATH_FUNC | INT_PROPERTY | SCRIPT_COMMAND | DEPRECATEDPARAM | SETTABLE);
    pub const COMPARE: Tok = Tok(5 | MATH_FUNC | SCRIPT_COMMAND);
    pub const CONNECTED: Tok = Tok(6 | MATH_FUNC);
    pub const DATA: Tok = Tok(7 | MATH_FUNC | SCRIPT_COMMAND);
    pub const FORMAT: Tok = Tok(8 | MATH_FUNC | MATH_PROPERTY | STR_PROPERTY | SETTABLE);
    pub const FUNCTION: Tok = Tok(9 | MATH_FUNC | FLOW_COMMAND);
    pub const GETPROPERTY: Tok = Tok(10 | MATH_FUNC | MATH_PROPERTY | SCRIPT_COMMAND);
    pub const LABEL: Tok = Tok(
        11 | MATH_FUNC
            | MATH_PROPERTY
            | STR_PROPERTY
            | SETTABLE
            | IMPLICIT_STRING_COMMAND
            | SHAPE_COMMAND
            | DEFAULT_ON
            | DEPRECATEDPARAM,
    );
    pub const HELIX: Tok = Tok(12 | MATH_FUNC | PREDEFINED_SET);
    pub const MEASURE: Tok = Tok(13 | MATH_FUNC | SHAPE_COMMAND | DEPRECATEDPARAM | DEFAULT_ON);
    pub const NOW: Tok = Tok(14 | MATH_FUNC);
    pub const PLANE: Tok = Tok(15 | MATH_FUNC);
    pub const POINT: Tok = Tok(16 | MATH_FUNC);
    pub const POP: Tok = Tok(17 | MATH_FUNC | MATH_PROPERTY | SCRIPT_COMMAND | NO_ARGS);
    pub const QUATERNION: Tok = Tok(18 | MATH_FUNC | SCRIPT_COMMAND);
    pub const SORT: Tok = Tok(19 | MATH_FUNC | MATH_PROPERTY);
    pub const COUNT: Tok = Tok(20 | MATH_FUNC | MATH_PROPERTY);
    pub const WITHIN: Tok = Tok(21 | MATH_FUNC);
    pub const WRITE: Tok = Tok(22 | MATH_FUNC | SCRIPT_COMMAND);
    pub const CACHE: Tok = Tok(23 | MATH_FUNC | SCRIPT_COMMAND);
    pub const TENSOR: Tok = Tok(24 | MATH_FUNC | MATH_PROPERTY);
    pub const MODULATION: Tok = Tok(25 | MATH_FUNC | MATH_PROPERTY | SCRIPT_COMMAND);

    // math functions, one argument
    pub const ACOS: Tok = Tok(3 | (1 << 9) | MATH_FUNC);
    pub const SIN: Tok = Tok(4 | (1 << 9) | MATH_FUNC);
    pub const COS: Tok = Tok(5 | (1 << 9) | MATH_FUNC);
    pub const SQRT: Tok = Tok(6 | (1 << 9) | MATH_FUNC);
    pub const FILE: Tok = Tok(7 | (1 << 9) | MATH_FUNC | INT_PROPERTY | SCRIPT_COMMAND);
    pub const FOR: Tok = Tok(8 | (1 << 9) | MATH_FUNC | FLOW_COMMAND);
    pub const IF: Tok = Tok(9 | (1 << 9) | MATH_FUNC | FLOW_COMMAND);
    pub const ABS: Tok = Tok(10 | (1 << 9) | MATH_FUNC);
    pub const JAVASCRIPT: Tok = Tok(12 | (1 << 9) | MATH_FUNC | IMPLICIT_STRING_COMMAND);
    pub const DIV: Tok = Tok((1 << 9) | MATH_FUNC | MATH_PROPERTY);
    pub const DOT: Tok = Tok(1 | (1 << 9) | MATH_FUNC | MATH_PROPERTY);
    pub const JOIN: Tok = Tok(2 | (1 << 9) | MATH_FUNC | MATH_PROPERTY);
    pub const MUL: Tok = Tok(3 | (1 << 9) | MATH_FUNC | MATH_PROPERTY);
    pub const MUL3: Tok = Tok(4 | (1 << 9) | MATH_FUNC | MATH_PROPERTY);
    pub const PUSH: Tok = Tok(5 | (1 << 9) | MATH_FUNC | MATH_PROPERTY | SCRIPT_COMMAND | NO_ARGS);
    pub const SPLIT: Tok = Tok(6 | (1 << 9) | MATH_FUNC | MATH_PROPERTY);
    pub const SUB: Tok = Tok(7 | (1 << 9) | MATH_FUNC | MATH_PROPERTY);
    pub const TRIM: Tok = Tok(8 | (1 << 9) | MATH_FUNC | MATH_PROPERTY);
    pub const VOLUME: Tok = Tok(9 | (1 << 9) | MATH_FUNC | MATH_PROPERTY | FLOAT_PROPERTY);
    pub const COL: Tok = Tok(10 | (1 << 9) | MATH_FUNC | MATH_PROPERTY);
    pub const ROW: Tok = Tok(11 | (1 << 9) | MATH_FUNC | MATH_PROPERTY);

    // math functions, two arguments
    pub const CROSS: Tok = Tok(1 | (2 << 9) | MATH_FUNC);
    pub const LOAD: Tok = Tok(2 | (2 << 9) | MATH_FUNC | SCRIPT_COMMAND);
    pub const RANDOM: Tok = Tok(4 | (2 << 9) | MATH_FUNC);
    pub const SCRIPT: Tok = Tok(5 | (2 << 9) | MATH_FUNC | SCRIPT_COMMAND);
    pub const SUBSTRUCTURE: Tok = Tok(6 | (2 << 9) | MATH_FUNC | INT_PROPERTY | STR_PROPERTY);
    pub const SEARCH: Tok = Tok(7 | (2 << 9) | MATH_FUNC);
    pub const SMILES: Tok = Tok(8 | (2 << 9) | MATH_FUNC);
    pub const CONTACT: Tok = Tok(9 | (2 << 9) | MATH_FUNC | SHAPE_COMMAND);
    pub const ADD: Tok = Tok(1 | (2 << 9) | MATH_FUNC | MATH_PROPERTY);
    pub const DISTANCE: Tok = Tok(2 | (2 << 9) | MATH_FUNC | MATH_PROPERTY);
    pub const REPLACE: Tok = Tok(3 | (2 << 9) | MATH_FUNC | MATH_PROPERTY);

    // math functions, three arguments
    pub const HKL: Tok = Tok(1 | (3 << 9) | MATH_FUNC);
    pub const INTERSECTION: Tok = Tok(2 | (3 << 9) | MATH_FUNC);
    pub const PROMPT: Tok = Tok(3 | (3 << 9) | MATH_FUNC | MATH_EXPRESSION_COMMAND);
    pub const SELECT: Tok = Tok(4 | (3 << 9) | MATH_FUNC | ATOM_EXPRESSION_COMMAND);
    pub const BIN: Tok = Tok(1 | (3 << 9) | MATH_FUNC | MATH_PROPERTY);
    pub const SYMOP: Tok = Tok(2 | (3 << 9) | MATH_FUNC | MATH_PROPERTY | INT_PROPERTY);
    pub const FIND: Tok = Tok(3 | (3 << 9) | MATH_FUNC | MATH_PROPERTY);

    // aggregate selectors
    pub const MIN: Tok = Tok(1 << 5);
    pub const MAX: Tok = Tok(2 << 5);
    pub const AVERAGE: Tok = Tok(3 << 5);
    pub const SUM: Tok = Tok(4 << 5);
    pub const SUM2: Tok = Tok(5 << 5);
    pub const STDDEV: Tok = Tok(6 << 5);

    // set parameters
    pub const BACKGROUNDMODEL: Tok = Tok(SETPARAM | 2);
    pub const DEBUG: Tok = Tok(SETPARAM | 4);
    pub const DEFAULTLATTICE: Tok = Tok(SETPARAM | 6);
    pub const HIGHLIGHT: Tok = Tok(SETPARAM | 8);
    pub const SHOWSCRIPT: Tok = Tok(SETPARAM | 10);
    pub const SPECULAR: Tok = Tok(SETPARAM | 12);
    pub const TRAJECTORY: Tok = Tok(SETPARAM | 14);
    pub const UNDO: Tok = Tok(SETPARAM | 16);
    pub const BONDMODE: Tok = Tok(DEPRECATEDPARAM | 1);
    pub const FONTSIZE: Tok = Tok(DEPRECATEDPARAM | 2);
    pub const ANIMATIONMODE: Tok = Tok(STR_PARAM | 1);
    pub const BACKGROUNDCOLOR: Tok = Tok(STR_PARAM | 14);
    pub const DEFAULTCOLORSCHEME: Tok = Tok(STR_PARAM | 25);
    pub const DEFAULTDIRECTORY: Tok = Tok(STR_PARAM | 26);
    pub const FORCEFIELD: Tok = Tok(STR_PARAM | 40);
    pub const HOVERLABEL: Tok = Tok(STR_PARAM | 42);
    pub const LANGUAGE: Tok = Tok(STR_PARAM | 44);
    pub const LOADFORMAT: Tok = Tok(STR_PARAM | 45);
    pub const LOGFILE: Tok = Tok(STR_PARAM | 47);
    pub const MEASUREMENTUNITS: Tok = Tok(STR_PARAM | 48);
    pub const PICKING: Tok = Tok(STR_PARAM | 52);
    pub const PICKINGSTYLE: Tok = Tok(STR_PARAM | 54);
    pub const AXESSCALE: Tok = Tok(FLOAT_PARAM | 2);
    pub const BONDTOLERANCE: Tok = Tok(FLOAT_PARAM | 4);
    pub const CAMERADEPTH: Tok = Tok(FLOAT_PARAM | 6);
    pub const HOVERDELAY: Tok = Tok(FLOAT_PARAM | 18);
    pub const MINBONDDISTANCE: Tok = Tok(FLOAT_PARAM | 20);
    pub const ROTATIONRADIUS: Tok = Tok(FLOAT_PARAM | 44);
    pub const SPINFPS: Tok = Tok(FLOAT_PARAM | 52);
    pub const SPINX: Tok = Tok(FLOAT_PARAM | 54);
    pub const SPINY: Tok = Tok(FLOAT_PARAM | 56);
    pub const SPINZ: Tok = Tok(FLOAT_PARAM | 58);
    pub const STEREODEGREES: Tok = Tok(FLOAT_PARAM | 60);
    pub const VIBRATIONPERIOD: Tok = Tok(FLOAT_PARAM | 68);
    pub const VIBRATIONSCALE: Tok = Tok(FLOAT_PARAM | 70);
    pub const AMBIENTPERCENT: Tok = Tok(INT_PARAM | 2);
    pub const ANIMATIONFPS: Tok = Tok(INT_PARAM | 4);
    pub const AXESMODE: Tok = Tok(INT_PARAM | 6);
    pub const DIFFUSEPERCENT: Tok = Tok(INT_PARAM | 14);
    pub const DOTDENSITY: Tok = Tok(INT_PARAM | 15);
    pub const HERMITELEVEL: Tok = Tok(INT_PARAM | 19);
    pub const HISTORYLEVEL: Tok = Tok(INT_PARAM | 20);
    pub const LOGLEVEL: Tok = Tok(INT_PARAM | 22);
    pub const PERCENTVDWATOM: Tok = Tok(INT_PARAM | 26);
    pub const SCRIPTREPORTINGLEVEL: Tok = Tok(INT_PARAM | 40);
    pub const SPECULARPERCENT: Tok = Tok(INT_PARAM | 46);
    pub const SPECULARPOWER: Tok = Tok(INT_PARAM | 48);
    pub const STRANDCOUNT: Tok = Tok(INT_PARAM | 50);
    pub const ALLOWEMBEDDEDSCRIPTS: Tok = Tok(BOOLEAN_PARAM | 2);
    pub const ANTIALIASDISPLAY: Tok = Tok(BOOLEAN_PARAM | 10);
    pub const APPENDNEW: Tok = Tok(BOOLEAN_PARAM | 16);
    pub const AUTOBOND: Tok = Tok(BOOLEAN_PARAM | 22);
    pub const AXESMOLECULAR: Tok = Tok(BOOLEAN_PARAM | 28);
    pub const CARTOONROCKETS: Tok = Tok(BOOLEAN_PARAM | 42);
    pub const CHAINCASESENSITIVE: Tok = Tok(BOOLEAN_PARAM | 46);
    pub const DEBUGSCRIPT: Tok = Tok(BOOLEAN_PARAM | 48);
    pub const HBONDSBACKBONE: Tok = Tok(BOOLEAN_PARAM | 76);
    pub const HBONDSSOLID: Tok = Tok(BOOLEAN_PARAM | 78);
    pub const LOGCOMMANDS: Tok = Tok(BOOLEAN_PARAM | 100);
    pub const MEASUREMENTLABELS: Tok = Tok(BOOLEAN_PARAM | 103);
    pub const MESSAGESTYLECHIME: Tok = Tok(BOOLEAN_PARAM | 104);
    pub const PERSPECTIVEDEPTH: Tok = Tok(BOOLEAN_PARAM | 117);
    pub const REFRESHING: Tok = Tok(BOOLEAN_PARAM | 120);
    pub const SCRIPTQUEUE: Tok = Tok(BOOLEAN_PARAM | 128);
    pub const SELECTALLMODELS: Tok = Tok(BOOLEAN_PARAM | 130);
    pub const SHOWAXES: Tok = Tok(BOOLEAN_PARAM | 138);
    pub const SHOWBOUNDBOX: Tok = Tok(BOOLEAN_PARAM | 140);
    pub const SHOWHYDROGENS: Tok = Tok(BOOLEAN_PARAM | 146);
    pub const SHOWMEASUREMENTS: Tok = Tok(BOOLEAN_PARAM | 150);
    pub const SHOWTIMING: Tok = Tok(BOOLEAN_PARAM | 158);
    pub const SHOWUNITCELL: Tok = Tok(BOOLEAN_PARAM | 160);
    pub const SLABENABLED: Tok = Tok(BOOLEAN_PARAM | 166);
    pub const SOLVENTPROBE: Tok = Tok(BOOLEAN_PARAM | 172);
    pub const SSBONDSBACKBONE: Tok = Tok(BOOLEAN_PARAM | 176);
    pub const STATUSREPORTING: Tok = Tok(BOOLEAN_PARAM | 178);
    pub const TRANSLUCENT: Tok = Tok(BOOLEAN_PARAM | 191);
    pub const WINDOWCENTERED: Tok = Tok(BOOLEAN_PARAM | 199);
    pub const ZOOMENABLED: Tok = Tok(BOOLEAN_PARAM | 204);
    pub const ZSHADE: Tok = Tok(BOOLEAN_PARAM | 208);

    // miscellaneous keywords
    pub const ABSOLUTE: Tok = Tok(MISC | 2);
    pub const ADDHYDROGENS: Tok = Tok(MISC | 4);
    pub const ALIGN: Tok = Tok(MISC | 8);
    pub const ANGSTROMS: Tok = Tok(MISC | 12);
    pub const APPEND: Tok = Tok(MISC | 15);
    pub const ARC: Tok = Tok(MISC | 16 | EXPRESSION);
    pub const AROMATIC: Tok = Tok(MISC | 20 | PREDEFINED_SET);
    pub const ARROW: Tok = Tok(MISC | 22);
    pub const AS: Tok = Tok(MISC | 24);
    pub const AUTO: Tok = Tok(MISC | 28);
    pub const AXIS: Tok = Tok(MISC | 30);
    pub const BALLS: Tok = Tok(MISC | 36);
    pub const BASEPAIR: Tok = Tok(MISC | 40);
    pub const BEST: Tok = Tok(MISC | 39);
    pub const BOTTOM: Tok = Tok(MISC | 47);
    pub const CANCEL: Tok = Tok(MISC | 50);
    pub const CHECK: Tok = Tok(MISC | 54);
    pub const CIRCLE: Tok = Tok(MISC | 56);
    pub const CLEAR: Tok = Tok(MISC | 58);
    pub const CLIPBOARD: Tok = Tok(MISC | 60);
    pub const COMMAND: Tok = Tok(MISC | 66);
    pub const COMMANDS: Tok = Tok(MISC | 68);
    pub const CONTOUR: Tok = Tok(MISC | 72);
    pub const CREATE: Tok = Tok(MISC | 80);
    pub const CUTOFF: Tok = Tok(MISC | 86);
    pub const CYLINDER: Tok = Tok(MISC | 88);
    pub const DENSITY: Tok = Tok(MISC | 90);
    pub const DIAMETER: Tok = Tok(MISC | 92);
    pub const DIRECTION: Tok = Tok(MISC | 94);
    pub const DOTTED: Tok = Tok(MISC | 102);
    pub const ENERGY: Tok = Tok(MISC | 110);
    pub const ERROR: Tok = Tok(MISC | 111);
    pub const FILL: Tok = Tok(MISC | 114);
    pub const FILTER: Tok = Tok(MISC | 116);
    pub const FIRST: Tok = Tok(MISC | 118);
    pub const FPS: Tok = Tok(MISC | 126 | EXPRESSION);
    pub const FROM: Tok = Tok(MISC | 128);
    pub const FRONT: Tok = Tok(MISC | 130);
    pub const FULL: Tok = Tok(MISC | 137);
    pub const ID: Tok = Tok(MISC | 150 | EXPRESSION);
    pub const IMAGE: Tok = Tok(MISC | 155);
    pub const IN: Tok = Tok(MISC | 156);
    pub const INCREMENT: Tok = Tok(MISC | 157);
    pub const INFO: Tok = Tok(MISC | 158);
    pub const INLINE: Tok = Tok(MISC | 159);
    pub const JMOL: Tok = Tok(MISC | 168);
    pub const LAST: Tok = Tok(MISC | 169);
    pub const LEFT: Tok = Tok(MISC | 172);
    pub const LINE: Tok = Tok(MISC | 174);
    pub const LIST: Tok = Tok(MISC | 177);
    pub const MENU: Tok = Tok(MISC | 191);
    pub const MESH: Tok = Tok(MISC | 194);
    pub const MODE: Tok = Tok(MISC | 200);
    pub const NAME: Tok = Tok(MISC | 211);
    pub const NEXT: Tok = Tok(MISC | 213);
    pub const NOFILL: Tok = Tok(MISC | 222);
    pub const NOMESH: Tok = Tok(MISC | 228);
    pub const NORMAL: Tok = Tok(MISC | 232);
    pub const OBJECT: Tok = Tok(MISC | 240);
    pub const OFFSET: Tok = Tok(MISC | 242);
    pub const ONCE: Tok = Tok(MISC | 246);
    pub const ONLY: Tok = Tok(MISC | 248);
    pub const OPAQUE: Tok = Tok(MISC | 250);
    pub const ORIENTATION: Tok = Tok(MISC | 253);
    pub const ORIGIN: Tok = Tok(MISC | 254);
    pub const OUT: Tok = Tok(MISC | 255);
    pub const PATH: Tok = Tok(MISC | 260);
    pub const PDB: Tok = Tok(MISC | 262 | EXPRESSION);
    pub const PDBHEADER: Tok = Tok(MISC | 264);
    pub const PLAY: Tok = Tok(MISC | 272);
    pub const POLYGON: Tok = Tok(MISC | 282);
    pub const PREV: Tok = Tok(MISC | 284);
    pub const RANGE: Tok = Tok(MISC | 290);
    pub const RASMOL: Tok = Tok(MISC | 292);
    pub const REMOVE: Tok = Tok(MISC | 295);
    pub const RESIDUE: Tok = Tok(MISC | 296);
    pub const RESOLUTION: Tok = Tok(MISC | 298);
    pub const REWIND: Tok = Tok(MISC | 302);
    pub const RIGHT: Tok = Tok(MISC | 304);
    pub const ROTATION: Tok = Tok(MISC | 308);
    pub const SCALE: Tok = Tok(MISC | 314);
    pub const SELECTION: Tok = Tok(MISC | 316);
    pub const SILENT: Tok = Tok(MISC | 324);
    pub const SOLID: Tok = Tok(MISC | 326);
    pub const SPACEGROUP: Tok = Tok(MISC | 328);
    pub const SPHERE: Tok = Tok(MISC | 330);
    pub const STATE: Tok = Tok(MISC | 334);
    pub const STOP: Tok = Tok(MISC | 338);
    pub const TITLE: Tok = Tok(MISC | 342);
    pub const TO: Tok = Tok(MISC | 346 | EXPRESSION);
    pub const TOP: Tok = Tok(MISC | 348 | EXPRESSION);
    pub const TRANSFORM: Tok = Tok(MISC | 352);
    pub const TRANSLATION: Tok = Tok(MISC | 354);
    pub const URL: Tok = Tok(MISC | 360 | EXPRESSION);
    pub const USER: Tok = Tok(MISC | 362);
    pub const VALUE: Tok = Tok(MISC | 364);
    pub const VARIABLE: Tok = Tok(MISC | 366);
    pub const VARIABLES: Tok = Tok(MISC | 368);
    pub const SPACE_BEFORE_SQUARE: Tok = Tok(MISC | 371);
    pub const WIDTH: Tok = Tok(MISC | 372);
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

/// One token occurrence: a code, an optional spelled name or source text,
/// an optional literal payload, and the auxiliary integer.
///
/// The auxiliary field holds the `on` flag for `on`/`off`, the value of an
/// integer literal, the float-encoded value of a decimal literal, the
/// packed sequence code, or a patch target on flow commands.
#[derive(Clone, Debug)]
pub struct Token {
    /// Token code.
    pub tok: Tok,
    /// Auxiliary integer.
    pub aux: i32,
    /// Name or source text.
    pub text: Option<String>,
    /// Literal payload.
    pub value: Option<ScriptValue>,
}

impl Token {
    /// A bare token.
    #[must_use]
    pub const fn new(tok: Tok) -> Self {
        Self {
            tok,
            aux: 0,
            text: None,
            value: None,
        }
    }

    /// A token carrying a name or text.
    #[must_use]
    pub fn named(tok: Tok, text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new(tok)
        }
    }

    /// A token carrying a name and an auxiliary integer.
    #[must_use]
    pub fn with_aux(tok: Tok, aux: i32, text: impl Into<String>) -> Self {
        Self {
            aux,
            ..Self::named(tok, text)
        }
    }

    /// A literal carrier holding `value`.
    #[must_use]
    pub fn literal(tok: Tok, value: ScriptValue) -> Self {
        Self {
            value: Some(value),
            ..Self::new(tok)
        }
    }

    /// An identifier.
    #[must_use]
    pub fn identifier(name: impl Into<String>) -> Self {
        Self::named(Tok::IDENTIFIER, name)
    }

    /// A quoted or implied string.
    #[must_use]
    pub fn string(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            value: Some(ScriptValue::string(text.clone())),
            ..Self::named(Tok::STRING, text)
        }
    }

    /// An integer literal with its source spelling.
    #[must_use]
    pub fn integer(value: i32, spelled: impl Into<String>) -> Self {
        Self {
            value: Some(ScriptValue::integer(value)),
            ..Self::with_aux(Tok::INTEGER, value, spelled)
        }
    }

    /// An integer with no source spelling.
    #[must_use]
    pub fn int(value: i32) -> Self {
        Self::integer(value, value.to_string())
    }

    /// A decimal literal; `encoded` is its float-encoded integer form.
    #[must_use]
    pub fn decimal(value: f64, encoded: i32) -> Self {
        Self {
            aux: encoded,
            value: Some(ScriptValue::decimal(value)),
            ..Self::new(Tok::DECIMAL)
        }
    }

    /// True when the code carries every bit of `mask`.
    #[must_use]
    pub const fn has(&self, mask: i32) -> bool {
        self.tok.has(mask)
    }

    /// The name or text, or an empty string.
    #[must_use]
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

impl PartialEq for Token {
    /// Tokens compare by code, auxiliary value and text. Literal payloads
    /// are derived from the text and are not compared.
    fn eq(&self, other: &Self) -> bool {
        self.tok == other.tok && self.aux == other.aux && self.text == other.text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.text, self.tok) {
            (Some(text), Tok::STRING) => f.write_str(&molscript_foundation::escape::escape_string(text)),
            (Some(text), _) => f.write_str(text),
            (None, Tok::INTEGER) => write!(f, "{}", self.aux),
            (None, _) => match &self.value {
                Some(value) => write!(f, "{}", literal_text(value)),
                None => write!(f, "{}", self.tok),
            },
        }
    }
}

fn literal_text(value: &ScriptValue) -> String {
    value.as_string(&molscript_foundation::ValueHeap::new())
}

/// Commonly reused tokens.
pub mod tokens {
    use super::{Tok, Token};

    /// `on` (auxiliary 1).
    #[must_use]
    pub fn on() -> Token {
        Token::with_aux(Tok::ON, 1, "on")
    }

    /// `off`.
    #[must_use]
    pub fn off() -> Token {
        Token::with_aux(Tok::OFF, 0, "off")
    }

    /// Implied `set` for `x = ...` (auxiliary `'='`).
    #[must_use]
    pub fn set_assign() -> Token {
        Token::with_aux(Tok::SET, i32::from(b'='), "")
    }

    /// Implied `set` for `x[i] = ...`.
    #[must_use]
    pub fn set_array() -> Token {
        Token::with_aux(Tok::SET, i32::from(b'['), "")
    }

    /// Implied `set` for `x.y = ...`.
    #[must_use]
    pub fn set_property() -> Token {
        Token::with_aux(Tok::SET, i32::from(b'.'), "")
    }

    /// `set` produced by `var x`.
    #[must_use]
    pub fn set_var() -> Token {
        Token::with_aux(Tok::SET, i32::from(b'='), "var")
    }

    /// `=`.
    #[must_use]
    pub fn equals() -> Token {
        Token::named(Tok::OP_EQ, "=")
    }

    /// `(`.
    #[must_use]
    pub fn left_paren() -> Token {
        Token::named(Tok::LEFTPAREN, "(")
    }

    /// `)`.
    #[must_use]
    pub fn right_paren() -> Token {
        Token::named(Tok::RIGHTPAREN, ")")
    }

    /// `+`.
    #[must_use]
    pub fn plus() -> Token {
        Token::named(Tok::PLUS, "+")
    }

    /// `-`.
    #[must_use]
    pub fn minus() -> Token {
        Token::named(Tok::MINUS, "-")
    }

    /// `,`.
    #[must_use]
    pub fn comma() -> Token {
        Token::named(Tok::COMMA, ",")
    }

    /// `all`.
    #[must_use]
    pub fn all() -> Token {
        Token::named(Tok::ALL, "all")
    }

    /// `script`.
    #[must_use]
    pub fn script() -> Token {
        Token::named(Tok::SCRIPT, "script")
    }

    /// `if`.
    #[must_use]
    pub fn if_() -> Token {
        Token::named(Tok::IF, "if")
    }

    /// `switch`.
    #[must_use]
    pub fn switch() -> Token {
        Token::named(Tok::SWITCH, "switch")
    }

    /// `$`.
    #[must_use]
    pub fn dollar_sign() -> Token {
        Token::named(Tok::DOLLARSIGN, "$")
    }

    /// Opens an implicit expression.
    #[must_use]
    pub fn expression_begin() -> Token {
        Token::named(Tok::EXPRESSION_BEGIN, "expressionBegin")
    }

    /// Closes an implicit expression.
    #[must_use]
    pub fn expression_end() -> Token {
        Token::named(Tok::EXPRESSION_END, "expressionEnd")
    }

    /// Marks whitespace before `[`.
    #[must_use]
    pub fn space_before_square() -> Token {
        Token::named(Tok::SPACE_BEFORE_SQUARE, " ")
    }

    /// Opens an anonymous `{ ... }` block.
    #[must_use]
    pub fn block_open() -> Token {
        Token::named(Tok::PUSH, "{")
    }

    /// Closes an anonymous `{ ... }` block.
    #[must_use]
    pub fn block_close() -> Token {
        Token::named(Tok::POP, "}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_tests_are_bitwise() {
        assert!(Tok::IF.has(FLOW_COMMAND));
        assert!(Tok::IF.has(MATH_EXPRESSION_COMMAND));
        assert!(Tok::IF.has(SCRIPT_COMMAND));
        assert!(!Tok::PRINT.has(FLOW_COMMAND));
        assert!(Tok::ECHO.has(IMPLICIT_STRING_COMMAND));
        assert!(Tok::SELECT.has(ATOM_EXPRESSION_COMMAND));
        assert!(Tok::OP_EQ.has(COMPARATOR));
        assert!(!Tok::PLUS.has(COMPARATOR));
    }

    #[test]
    fn operator_fields() {
        assert_eq!(Tok::PLUS.precedence(), 10);
        assert_eq!(Tok::TIMES.precedence(), 11);
        assert_eq!(Tok::OP_EQ.precedence(), 9);
        assert_eq!(Tok::CROSS.max_params(), 2);
        assert_eq!(Tok::SELECT.max_params(), 3);
        assert_eq!(Tok::ANGLE.max_params(), 0);
    }

    #[test]
    fn families() {
        assert_eq!(Tok::STRING.family(), TokenFamily::Literal);
        assert_eq!(Tok::WHILE.family(), TokenFamily::FlowCommand);
        assert_eq!(Tok::ZOOM.family(), TokenFamily::Command);
        assert_eq!(Tok::PLUS.family(), TokenFamily::Operator);
        assert_eq!(Tok::SQRT.family(), TokenFamily::MathFunction);
        assert_eq!(Tok::ELEMENT.family(), TokenFamily::Property);
        assert_eq!(Tok::PROTEIN.family(), TokenFamily::PredefinedSet);
        assert_eq!(Tok::DEBUG.family(), TokenFamily::SetParameter);
        assert_eq!(Tok::ALL.family(), TokenFamily::Expression);
        assert_eq!(Tok::IN.family(), TokenFamily::Misc);
    }

    #[test]
    fn breakable_constructs() {
        assert!(Tok::FOR.is_breakable());
        assert!(Tok::CASE.is_breakable());
        assert!(!Tok::IF.is_breakable());
        assert!(!Tok::SWITCH.is_breakable());
    }

    #[test]
    fn token_display() {
        assert_eq!(Token::string("a\"b").to_string(), "\"a\\\"b\"");
        assert_eq!(Token::int(5).to_string(), "5");
        assert_eq!(Token::identifier("x").to_string(), "x");
        assert_eq!(Token::decimal(1.5, 1_500_000).to_string(), "1.5");
    }

    #[test]
    fn equality_ignores_payload() {
        assert_eq!(tokens::on(), Token::with_aux(Tok::ON, 1, "on"));
        assert_ne!(tokens::on(), tokens::off());
    }
}
