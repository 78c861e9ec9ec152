//! Java operators.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Assign,
    AddAssign,
    SubtractAssign,
    MultiplyAssign,
    DivideAssign,
    RemainderAssign,
    BitwiseAndAssign,
    BitwiseOrAssign,
    BitwiseXorAssign,
    LeftShiftAssign,
    RightShiftAssign,
    UnsignedRightShiftAssign,
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    Increment,
    Decrement,
    EqualTo,
    NotEqualTo,
    LessThan,
    LessThanOrEqualTo,
    GreaterThan,
    GreaterThanOrEqualTo,
    ConditionalAnd,
    ConditionalOr,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseComplement,
    Negate,
    LeftShift,
    RightShift,
    UnsignedRightShift,
    Elvis,
    Instanceof,
}

/// Binding strength of a prefix operator with no left operand.
pub const UNARY_PRECEDENCE: u8 = 13;

impl Operator {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::AddAssign => "+=",
            Self::SubtractAssign => "-=",
            Self::MultiplyAssign => "*=",
            Self::DivideAssign => "/=",
            Self::RemainderAssign => "%=",
            Self::BitwiseAndAssign => "&=",
            Self::BitwiseOrAssign => "|=",
            Self::BitwiseXorAssign => "^=",
            Self::LeftShiftAssign => "<<=",
            Self::RightShiftAssign => ">>=",
            Self::UnsignedRightShiftAssign => ">>>=",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Remainder => "%",
            Self::Increment => "++",
            Self::Decrement => "--",
            Self::EqualTo => "==",
            Self::NotEqualTo => "!=",
            Self::LessThan => "<",
            Self::LessThanOrEqualTo => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqualTo => ">=",
            Self::ConditionalAnd => "&&",
            Self::ConditionalOr => "||",
            Self::BitwiseAnd => "&",
            Self::BitwiseOr => "|",
            Self::BitwiseXor => "^",
            Self::BitwiseComplement => "~",
            Self::Negate => "!",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
            Self::UnsignedRightShift => ">>>",
            Self::Elvis => "?:",
            Self::Instanceof => "instanceof",
        }
    }

    /// Binary precedence; higher binds tighter.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Increment | Self::Decrement => 14,
            Self::Negate | Self::BitwiseComplement => UNARY_PRECEDENCE,
            Self::Multiply | Self::Divide | Self::Remainder => 12,
            Self::Add | Self::Subtract => 11,
            Self::LeftShift | Self::RightShift | Self::UnsignedRightShift => 10,
            Self::LessThan
            | Self::LessThanOrEqualTo
            | Self::GreaterThan
            | Self::GreaterThanOrEqualTo
            | Self::Instanceof => 9,
            Self::EqualTo | Self::NotEqualTo => 8,
            Self::BitwiseAnd => 7,
            Self::BitwiseXor => 6,
            Self::BitwiseOr => 5,
            Self::ConditionalAnd => 4,
            Self::ConditionalOr => 3,
            Self::Elvis => 2,
            Self::Assign
            | Self::AddAssign
            | Self::SubtractAssign
            | Self::MultiplyAssign
            | Self::DivideAssign
            | Self::RemainderAssign
            | Self::BitwiseAndAssign
            | Self::BitwiseOrAssign
            | Self::BitwiseXorAssign
            | Self::LeftShiftAssign
            | Self::RightShiftAssign
            | Self::UnsignedRightShiftAssign => 1,
        }
    }

    #[must_use]
    pub const fn is_assignment(self) -> bool {
        self.precedence() == 1
    }

    /// For compound assignments, the operation applied before assigning.
    #[must_use]
    pub const fn compound_operation(self) -> Option<Self> {
        match self {
            Self::AddAssign => Some(Self::Add),
            Self::SubtractAssign => Some(Self::Subtract),
            Self::MultiplyAssign => Some(Self::Multiply),
            Self::DivideAssign => Some(Self::Divide),
            Self::RemainderAssign => Some(Self::Remainder),
            Self::BitwiseAndAssign => Some(Self::BitwiseAnd),
            Self::BitwiseOrAssign => Some(Self::BitwiseOr),
            Self::BitwiseXorAssign => Some(Self::BitwiseXor),
            Self::LeftShiftAssign => Some(Self::LeftShift),
            Self::RightShiftAssign => Some(Self::RightShift),
            Self::UnsignedRightShiftAssign => Some(Self::UnsignedRightShift),
            _ => None,
        }
    }

    /// Operators that may appear without a left operand.
    #[must_use]
    pub const fn is_prefix(self) -> bool {
        matches!(
            self,
            Self::Negate
                | Self::BitwiseComplement
                | Self::Add
                | Self::Subtract
                | Self::Increment
                | Self::Decrement
        )
    }

    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::LessThan | Self::LessThanOrEqualTo | Self::GreaterThan | Self::GreaterThanOrEqualTo
        )
    }

    #[must_use]
    pub const fn is_equality(self) -> bool {
        matches!(self, Self::EqualTo | Self::NotEqualTo)
    }

    #[must_use]
    pub const fn is_logical(self) -> bool {
        matches!(self, Self::ConditionalAnd | Self::ConditionalOr | Self::Negate)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
