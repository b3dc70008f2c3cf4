//! Token type taxonomy
//!
//! Token types form a process-wide forest of dotted names: `Code.Number.Hexadecimal`
//! lives under `Code.Number`, which lives under the class root `Code`.
//!
//! Types are registered once and never removed. A [`TokenType`] is a small copyable
//! handle into an append-only arena, so comparing types is comparing integers and
//! walking the ancestry never allocates.
//!
//! # Examples
//!
//! ```
//! use tokenkit::token_type::{self, TokenType};
//!
//! assert!(token_type::CODE_NUMBER_HEXADECIMAL.is_a(token_type::CODE_NUMBER));
//! assert_eq!(token_type::CODE_NUMBER_HEXADECIMAL.class(), token_type::CODE);
//! assert_eq!(TokenType::by_name("Code.Number"), Some(token_type::CODE_NUMBER));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::mem;
use std::sync::{PoisonError, RwLock};

use once_cell::sync::Lazy;
use thiserror::Error;

/// Errors raised when registering a token type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// The type name was the empty string
    #[error("token type name is empty")]
    EmptyName,

    /// A type with this name is already registered
    #[error("token type {0:?} already registered")]
    Duplicate(String),
}

/// Handle to a registered token type
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenType(u32);

struct TypeRecord {
    name: &'static str,
    parent: Option<TokenType>,
    // sorted by name
    children: Vec<TokenType>,
}

struct TypeArena {
    records: Vec<TypeRecord>,
    by_name: HashMap<&'static str, TokenType>,
    // sorted by name
    roots: Vec<TokenType>,
}

static ARENA: Lazy<RwLock<TypeArena>> = Lazy::new(|| RwLock::new(TypeArena::with_builtins()));

fn read<R>(f: impl FnOnce(&TypeArena) -> R) -> R {
    let arena = ARENA.read().unwrap_or_else(PoisonError::into_inner);
    f(&arena)
}

impl TypeArena {
    fn with_builtins() -> Self {
        let mut arena = Self {
            records: Vec::with_capacity(BUILTINS.len() * 2),
            by_name: HashMap::with_capacity(BUILTINS.len() * 2),
            roots: Vec::new(),
        };
        for &(name, parent) in BUILTINS {
            arena.push(parent, name);
        }
        arena
    }

    fn insert(&mut self, parent: Option<TokenType>, name: &str) -> Result<TokenType, TypeError> {
        if name.is_empty() {
            return Err(TypeError::EmptyName);
        }
        if self.by_name.contains_key(name) {
            return Err(TypeError::Duplicate(name.to_string()));
        }
        // Types live for the whole process, so the name is leaked once here.
        let name: &'static str = Box::leak(name.to_string().into_boxed_str());
        Ok(self.push(parent, name))
    }

    fn push(&mut self, parent: Option<TokenType>, name: &'static str) -> TokenType {
        let index = u32::try_from(self.records.len()).unwrap_or(u32::MAX);
        let handle = TokenType(index);
        self.records.push(TypeRecord {
            name,
            parent,
            children: Vec::new(),
        });
        self.by_name.insert(name, handle);

        match parent {
            Some(p) => {
                let mut children = mem::take(&mut self.records[p.index()].children);
                insert_sorted(&mut children, &self.records, handle);
                self.records[p.index()].children = children;
            },
            None => insert_sorted(&mut self.roots, &self.records, handle),
        }
        handle
    }

    fn record(&self, t: TokenType) -> &TypeRecord {
        &self.records[t.index()]
    }
}

fn insert_sorted(siblings: &mut Vec<TokenType>, records: &[TypeRecord], handle: TokenType) {
    let name = records[handle.index()].name;
    let pos = siblings.partition_point(|s| records[s.index()].name < name);
    siblings.insert(pos, handle);
}

impl TokenType {
    /// Register a new token type under `parent` (or as a class root when `None`).
    ///
    /// Intended for one-time setup code, typically behind a `Lazy` static.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or already registered.
    #[must_use]
    pub fn register(parent: Option<Self>, name: &str) -> Self {
        match Self::try_register(parent, name) {
            Ok(t) => t,
            Err(err) => panic!("{err}"),
        }
    }

    /// Register a new token type, reporting empty or duplicate names as errors.
    pub fn try_register(parent: Option<Self>, name: &str) -> Result<Self, TypeError> {
        let mut arena = ARENA.write().unwrap_or_else(PoisonError::into_inner);
        arena.insert(parent, name)
    }

    /// Look a type up by its full dotted name.
    #[must_use]
    pub fn by_name(name: &str) -> Option<Self> {
        read(|arena| arena.by_name.get(name).copied())
    }

    /// All registered types, sorted by name.
    #[must_use]
    pub fn all() -> Vec<Self> {
        read(|arena| {
            let mut types: Vec<Self> = (0..arena.records.len())
                .filter_map(|i| u32::try_from(i).ok().map(TokenType))
                .collect();
            types.sort_by_key(|t| arena.record(*t).name);
            types
        })
    }

    /// All class roots (types without a parent), sorted by name.
    #[must_use]
    pub fn class_roots() -> Vec<Self> {
        read(|arena| arena.roots.clone())
    }

    /// Full dotted name of the type.
    #[must_use]
    pub fn name(self) -> &'static str {
        read(|arena| arena.record(self).name)
    }

    /// Parent type, `None` for a class root.
    #[must_use]
    pub fn parent(self) -> Option<Self> {
        read(|arena| arena.record(self).parent)
    }

    /// Direct children, sorted by name.
    #[must_use]
    pub fn children(self) -> Vec<Self> {
        read(|arena| arena.record(self).children.clone())
    }

    /// True if the type has no parent.
    #[must_use]
    pub fn is_class_root(self) -> bool {
        self.parent().is_none()
    }

    /// True if `other` is this type or one of its ancestors.
    #[must_use]
    pub fn is_a(self, other: Self) -> bool {
        if self == other {
            return true;
        }
        read(|arena| {
            let mut current = arena.record(self).parent;
            while let Some(t) = current {
                if t == other {
                    return true;
                }
                current = arena.record(t).parent;
            }
            false
        })
    }

    /// The class root this type belongs to.
    #[must_use]
    pub fn class(self) -> Self {
        read(|arena| {
            let mut t = self;
            while let Some(parent) = arena.record(t).parent {
                t = parent;
            }
            t
        })
    }

    const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Debug for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenType({})", self.name())
    }
}

// =============================================================================
// Built-in types
// =============================================================================
//
// The constants below index into BUILTINS; both lists must stay in the same order.

/// Class of the tokens that halt an engine.
pub const STOP: TokenType = TokenType(0);
/// Halt on a rule error; the text is the diagnostic message.
pub const STOP_ERROR: TokenType = TokenType(1);
/// Halt at the end of the input; the text is empty.
pub const STOP_END_OF_STRING: TokenType = TokenType(2);
/// Halt on a stop marker (the text is the marker) or when no rule matched (empty text).
pub const STOP_LEXER: TokenType = TokenType(3);

/// Plain text, also used for the gaps between capture groups.
pub const TEXT: TokenType = TokenType(4);
/// Space-class characters (everything up to `' '` except newlines).
pub const TEXT_WHITESPACE: TokenType = TokenType(5);
/// Runs of `\n` and `\r`.
pub const TEXT_NEWLINE: TokenType = TokenType(6);
/// Characters that do not form a valid token.
pub const TEXT_INVALID: TokenType = TokenType(7);
/// Text punctuation.
pub const TEXT_PUNCTUATION: TokenType = TokenType(8);
/// Separating punctuation (`.`, `,`, `;`, `:`).
pub const TEXT_PUNCTUATION_SEPARATOR: TokenType = TokenType(9);
/// Delimiting punctuation (`(`, `)`, `[`, `]`, ...).
pub const TEXT_PUNCTUATION_DELIMITER: TokenType = TokenType(10);
/// Text operators.
pub const TEXT_OPERATOR: TokenType = TokenType(11);
/// Words made of letters.
pub const TEXT_WORD: TokenType = TokenType(12);
/// Runs of digits.
pub const TEXT_NUMBER: TokenType = TokenType(13);
/// Any other text.
pub const TEXT_OTHER: TokenType = TokenType(14);

/// Class of source code tokens.
pub const CODE: TokenType = TokenType(15);
/// Identifier.
pub const CODE_IDENTIFIER: TokenType = TokenType(16);
/// Variable name.
pub const CODE_IDENTIFIER_VARIABLE: TokenType = TokenType(17);
/// Function name.
pub const CODE_IDENTIFIER_FUNCTION: TokenType = TokenType(18);
/// Method name.
pub const CODE_IDENTIFIER_METHOD: TokenType = TokenType(19);
/// Type name.
pub const CODE_IDENTIFIER_TYPE: TokenType = TokenType(20);
/// Class name.
pub const CODE_IDENTIFIER_CLASS: TokenType = TokenType(21);
/// Namespace name.
pub const CODE_IDENTIFIER_NAMESPACE: TokenType = TokenType(22);
/// Language keyword.
pub const CODE_IDENTIFIER_KEYWORD: TokenType = TokenType(23);
/// Literal keyword (`true`, `null`, ...).
pub const CODE_IDENTIFIER_LITERAL: TokenType = TokenType(24);
/// Word operator (`not`, `and`, ...).
pub const CODE_IDENTIFIER_OPERATOR: TokenType = TokenType(25);
/// String literal.
pub const CODE_STRING: TokenType = TokenType(26);
/// Single quoted string.
pub const CODE_STRING_SINGLE: TokenType = TokenType(27);
/// Double quoted string.
pub const CODE_STRING_DOUBLE: TokenType = TokenType(28);
/// Raw string.
pub const CODE_STRING_RAW: TokenType = TokenType(29);
/// Unicode string.
pub const CODE_STRING_UNICODE: TokenType = TokenType(30);
/// Multiline string (back-tick or triple quoted).
pub const CODE_STRING_MULTILINE: TokenType = TokenType(31);
/// Number literal.
pub const CODE_NUMBER: TokenType = TokenType(32);
/// Integer literal.
pub const CODE_NUMBER_INTEGER: TokenType = TokenType(33);
/// Hexadecimal literal.
pub const CODE_NUMBER_HEXADECIMAL: TokenType = TokenType(34);
/// Octal literal.
pub const CODE_NUMBER_OCTAL: TokenType = TokenType(35);
/// Binary literal.
pub const CODE_NUMBER_BINARY: TokenType = TokenType(36);
/// Decimal literal, with optional exponent.
pub const CODE_NUMBER_DECIMAL: TokenType = TokenType(37);
/// Comment.
pub const CODE_COMMENT: TokenType = TokenType(38);
/// Operator.
pub const CODE_OPERATOR: TokenType = TokenType(39);
/// Assignment operator.
pub const CODE_OPERATOR_ASSIGNMENT: TokenType = TokenType(40);
/// Arithmetic operator.
pub const CODE_OPERATOR_ARITHMETIC: TokenType = TokenType(41);
/// Logical operator.
pub const CODE_OPERATOR_LOGICAL: TokenType = TokenType(42);
/// Bitwise operator.
pub const CODE_OPERATOR_BINARY: TokenType = TokenType(43);
/// Punctuation (`.`, `,`, `;`).
pub const CODE_PUNCTUATION: TokenType = TokenType(44);
/// Delimiter (`(`, `)`, `{`, `}`, `[`, `]`).
pub const CODE_DELIMITER: TokenType = TokenType(45);

const BUILTINS: &[(&str, Option<TokenType>)] = &[
    ("Stop", None),
    ("Stop.Error", Some(STOP)),
    ("Stop.EndOfString", Some(STOP)),
    ("Stop.Lexer", Some(STOP)),
    ("Text", None),
    ("Text.WhiteSpace", Some(TEXT)),
    ("Text.NewLine", Some(TEXT)),
    ("Text.Invalid", Some(TEXT)),
    ("Text.Punctuation", Some(TEXT)),
    ("Text.Punctuation.Separator", Some(TEXT_PUNCTUATION)),
    ("Text.Punctuation.Delimiter", Some(TEXT_PUNCTUATION)),
    ("Text.Operator", Some(TEXT)),
    ("Text.Word", Some(TEXT)),
    ("Text.Number", Some(TEXT)),
    ("Text.Other", Some(TEXT)),
    ("Code", None),
    ("Code.Identifier", Some(CODE)),
    ("Code.Identifier.Variable", Some(CODE_IDENTIFIER)),
    ("Code.Identifier.Function", Some(CODE_IDENTIFIER)),
    ("Code.Identifier.Method", Some(CODE_IDENTIFIER)),
    ("Code.Identifier.Type", Some(CODE_IDENTIFIER)),
    ("Code.Identifier.Class", Some(CODE_IDENTIFIER)),
    ("Code.Identifier.Namespace", Some(CODE_IDENTIFIER)),
    ("Code.Identifier.Keyword", Some(CODE_IDENTIFIER)),
    ("Code.Identifier.Literal", Some(CODE_IDENTIFIER)),
    ("Code.Identifier.Operator", Some(CODE_IDENTIFIER)),
    ("Code.String", Some(CODE)),
    ("Code.String.Single", Some(CODE_STRING)),
    ("Code.String.Double", Some(CODE_STRING)),
    ("Code.String.Raw", Some(CODE_STRING)),
    ("Code.String.Unicode", Some(CODE_STRING)),
    ("Code.String.Multiline", Some(CODE_STRING)),
    ("Code.Number", Some(CODE)),
    ("Code.Number.Integer", Some(CODE_NUMBER)),
    ("Code.Number.Hexadecimal", Some(CODE_NUMBER)),
    ("Code.Number.Octal", Some(CODE_NUMBER)),
    ("Code.Number.Binary", Some(CODE_NUMBER)),
    ("Code.Number.Decimal", Some(CODE_NUMBER)),
    ("Code.Comment", Some(CODE)),
    ("Code.Operator", Some(CODE)),
    ("Code.Operator.Assignment", Some(CODE_OPERATOR)),
    ("Code.Operator.Arithmetic", Some(CODE_OPERATOR)),
    ("Code.Operator.Logical", Some(CODE_OPERATOR)),
    ("Code.Operator.Binary", Some(CODE_OPERATOR)),
    ("Code.Punctuation", Some(CODE)),
    ("Code.Delimiter", Some(CODE)),
];
