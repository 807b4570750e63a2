//! Implementation methods for tag enums, literal values and modifier flags.
//!
//! [`Tag`] queries classify operator tags and map compound assignments to
//! their underlying operators. [`TypeTag`] and [`Constant`] describe literal
//! values and primitive type keywords. [`flags`] holds the modifier bit set.

use std::{fmt, rc::Rc};

use serde::{Deserialize, Serialize};

use crate::nodes::Tag;

impl Tag {
    /// Returns `true` for prefix and postfix unary operator tags.
    #[must_use]
    pub fn is_unary_op(self) -> bool {
        matches!(
            self,
            Tag::Pos
                | Tag::Neg
                | Tag::Not
                | Tag::Compl
                | Tag::PreInc
                | Tag::PreDec
                | Tag::PostInc
                | Tag::PostDec
                | Tag::NullChk
        )
    }

    /// Returns `true` for `x++` and `x--`.
    #[must_use]
    pub fn is_post_unary_op(self) -> bool {
        matches!(self, Tag::PostInc | Tag::PostDec)
    }

    #[must_use]
    pub fn is_inc_or_dec_unary_op(self) -> bool {
        matches!(self, Tag::PreInc | Tag::PreDec | Tag::PostInc | Tag::PostDec)
    }

    #[must_use]
    pub fn is_binary_op(self) -> bool {
        matches!(
            self,
            Tag::Or
                | Tag::And
                | Tag::BitOr
                | Tag::BitXor
                | Tag::BitAnd
                | Tag::Eq
                | Tag::Ne
                | Tag::Lt
                | Tag::Gt
                | Tag::Le
                | Tag::Ge
                | Tag::Sl
                | Tag::Sr
                | Tag::Usr
                | Tag::Plus
                | Tag::Minus
                | Tag::Mul
                | Tag::Div
                | Tag::Mod
        )
    }

    #[must_use]
    pub fn is_assignop(self) -> bool {
        self.binary_of_assignop().is_some()
    }

    /// Returns `true` for any tag that names an operator.
    #[must_use]
    pub fn is_operator(self) -> bool {
        self.is_unary_op() || self.is_binary_op() || self.is_assignop()
    }

    /// Maps a compound assignment tag to the binary operator it applies,
    /// `PlusAsg` to `Plus` and so on.
    ///
    /// # Panics
    ///
    /// Panics if `self` is not a compound assignment tag.
    #[must_use]
    pub fn no_assign_op(self) -> Tag {
        match self.binary_of_assignop() {
            Some(tag) => tag,
            None => panic!("{self:?} is not a compound assignment operator"),
        }
    }

    fn binary_of_assignop(self) -> Option<Tag> {
        Some(match self {
            Tag::BitOrAsg => Tag::BitOr,
            Tag::BitXorAsg => Tag::BitXor,
            Tag::BitAndAsg => Tag::BitAnd,
            Tag::SlAsg => Tag::Sl,
            Tag::SrAsg => Tag::Sr,
            Tag::UsrAsg => Tag::Usr,
            Tag::PlusAsg => Tag::Plus,
            Tag::MinusAsg => Tag::Minus,
            Tag::MulAsg => Tag::Mul,
            Tag::DivAsg => Tag::Div,
            Tag::ModAsg => Tag::Mod,
            _ => return None,
        })
    }

    /// Compound assignment form of a binary operator, the inverse of
    /// [`Tag::no_assign_op`].
    #[must_use]
    pub fn assign_op(self) -> Option<Tag> {
        Some(match self {
            Tag::BitOr => Tag::BitOrAsg,
            Tag::BitXor => Tag::BitXorAsg,
            Tag::BitAnd => Tag::BitAndAsg,
            Tag::Sl => Tag::SlAsg,
            Tag::Sr => Tag::SrAsg,
            Tag::Usr => Tag::UsrAsg,
            Tag::Plus => Tag::PlusAsg,
            Tag::Minus => Tag::MinusAsg,
            Tag::Mul => Tag::MulAsg,
            Tag::Div => Tag::DivAsg,
            Tag::Mod => Tag::ModAsg,
            _ => return None,
        })
    }

    /// Source spelling of an operator tag. Compound assignments include the
    /// trailing `=`.
    #[must_use]
    pub fn operator_name(self) -> Option<&'static str> {
        Some(match self {
            Tag::Pos => "+",
            Tag::Neg => "-",
            Tag::Not => "!",
            Tag::Compl => "~",
            Tag::PreInc | Tag::PostInc => "++",
            Tag::PreDec | Tag::PostDec => "--",
            Tag::NullChk => "<*nullchk*>",
            Tag::Or => "||",
            Tag::And => "&&",
            Tag::Eq => "==",
            Tag::Ne => "!=",
            Tag::Lt => "<",
            Tag::Gt => ">",
            Tag::Le => "<=",
            Tag::Ge => ">=",
            Tag::BitOr => "|",
            Tag::BitXor => "^",
            Tag::BitAnd => "&",
            Tag::Sl => "<<",
            Tag::Sr => ">>",
            Tag::Usr => ">>>",
            Tag::Plus => "+",
            Tag::Minus => "-",
            Tag::Mul => "*",
            Tag::Div => "/",
            Tag::Mod => "%",
            Tag::BitOrAsg => "|=",
            Tag::BitXorAsg => "^=",
            Tag::BitAndAsg => "&=",
            Tag::SlAsg => "<<=",
            Tag::SrAsg => ">>=",
            Tag::UsrAsg => ">>>=",
            Tag::PlusAsg => "+=",
            Tag::MinusAsg => "-=",
            Tag::MulAsg => "*=",
            Tag::DivAsg => "/=",
            Tag::ModAsg => "%=",
            _ => return None,
        })
    }
}

/// Type tag of a literal or primitive type node.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum TypeTag {
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Boolean,
    Void,
    /// Reference types; string literals carry this tag.
    Class,
    /// The type of `null`.
    Bot,
    Error,
    None,
}

impl TypeTag {
    /// Keyword spelling of a primitive type tag.
    #[must_use]
    pub fn keyword(self) -> Option<&'static str> {
        Some(match self {
            TypeTag::Byte => "byte",
            TypeTag::Char => "char",
            TypeTag::Short => "short",
            TypeTag::Int => "int",
            TypeTag::Long => "long",
            TypeTag::Float => "float",
            TypeTag::Double => "double",
            TypeTag::Boolean => "boolean",
            TypeTag::Void => "void",
            _ => return None,
        })
    }

    #[must_use]
    pub fn is_primitive(self) -> bool {
        matches!(
            self,
            TypeTag::Byte
                | TypeTag::Char
                | TypeTag::Short
                | TypeTag::Int
                | TypeTag::Long
                | TypeTag::Float
                | TypeTag::Double
                | TypeTag::Boolean
        )
    }
}

/// Value of a literal node.
#[derive(Clone, Debug, PartialEq)]
pub enum Constant {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Char(char),
    Bool(bool),
    Str(Rc<str>),
    Null,
}

impl Constant {
    /// The literal type tag a value of this kind is stored under.
    #[must_use]
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Constant::Int(_) => TypeTag::Int,
            Constant::Long(_) => TypeTag::Long,
            Constant::Float(_) => TypeTag::Float,
            Constant::Double(_) => TypeTag::Double,
            Constant::Char(_) => TypeTag::Char,
            Constant::Bool(_) => TypeTag::Boolean,
            Constant::Str(_) => TypeTag::Class,
            Constant::Null => TypeTag::Bot,
        }
    }

    /// Integral view of a numeric, character or boolean constant.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Constant::Int(v) => Some(i64::from(*v)),
            Constant::Long(v) => Some(*v),
            Constant::Char(c) => Some(i64::from(u32::from(*c))),
            Constant::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Int(v) => write!(f, "{v}"),
            Constant::Long(v) => write!(f, "{v}"),
            Constant::Float(v) => write!(f, "{v:?}"),
            Constant::Double(v) => write!(f, "{v:?}"),
            Constant::Char(c) => write!(f, "{c}"),
            Constant::Bool(b) => write!(f, "{b}"),
            Constant::Str(s) => f.write_str(s),
            Constant::Null => f.write_str("null"),
        }
    }
}

macro_rules! constant_from {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for Constant {
                fn from(value: $ty) -> Self {
                    Constant::$variant(value.into())
                }
            }
        )+
    };
}

constant_from! {
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    char => Char,
    bool => Bool,
    &str => Str,
    String => Str,
    Rc<str> => Str,
}

/// Modifier and declaration flag bits stored in [`crate::nodes::Modifiers`]
/// and [`crate::nodes::Block`].
pub mod flags {
    pub const PUBLIC: u64 = 1;
    pub const PRIVATE: u64 = 1 << 1;
    pub const PROTECTED: u64 = 1 << 2;
    pub const STATIC: u64 = 1 << 3;
    pub const FINAL: u64 = 1 << 4;
    pub const SYNCHRONIZED: u64 = 1 << 5;
    pub const VOLATILE: u64 = 1 << 6;
    pub const TRANSIENT: u64 = 1 << 7;
    pub const NATIVE: u64 = 1 << 8;
    pub const INTERFACE: u64 = 1 << 9;
    pub const ABSTRACT: u64 = 1 << 10;
    pub const STRICTFP: u64 = 1 << 11;
    pub const SYNTHETIC: u64 = 1 << 12;
    pub const ANNOTATION: u64 = 1 << 13;
    pub const ENUM: u64 = 1 << 14;
    pub const VARARGS: u64 = 1 << 34;
    pub const DEFAULT: u64 = 1 << 43;
    pub const SEALED: u64 = 1 << 48;
    pub const RECORD: u64 = 1 << 61;
    pub const NON_SEALED: u64 = 1 << 63;

    /// Flags that correspond to modifier keywords, in printing order.
    const KEYWORDS: [(u64, &str); 14] = [
        (PUBLIC, "public"),
        (PRIVATE, "private"),
        (PROTECTED, "protected"),
        (STATIC, "static"),
        (FINAL, "final"),
        (SYNCHRONIZED, "synchronized"),
        (VOLATILE, "volatile"),
        (TRANSIENT, "transient"),
        (NATIVE, "native"),
        (ABSTRACT, "abstract"),
        (DEFAULT, "default"),
        (STRICTFP, "strictfp"),
        (SEALED, "sealed"),
        (NON_SEALED, "non-sealed"),
    ];

    /// Modifier keywords set in `flags`, in source order.
    #[must_use]
    pub fn keywords(flags: u64) -> Vec<&'static str> {
        KEYWORDS
            .iter()
            .filter(|(bit, _)| flags & bit != 0)
            .map(|(_, word)| *word)
            .collect()
    }

    /// `true` if any modifier keyword bit is set.
    #[must_use]
    pub fn has_keywords(flags: u64) -> bool {
        KEYWORDS.iter().any(|(bit, _)| flags & bit != 0)
    }
}
