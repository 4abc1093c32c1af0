//! Operator signature catalogue.
//!
//! Every arithmetic and logical operator is monomorphic: `+` works on
//! `int` alone, `+.` on `float`, `+:` on `complex`. Comparison operators
//! are not listed here; the synthesis judgment types them structurally by
//! relating the two operand types.

use crate::ast::types::Type;
use crate::token::TokenType;

pub struct InfixSignature {
    pub left: Type,
    pub right: Type,
    pub result: Type,
}

pub struct PrefixSignature {
    pub operand: Type,
    pub result: Type,
}

fn homogeneous(ty: fn() -> Type) -> InfixSignature {
    InfixSignature { left: ty(), right: ty(), result: ty() }
}

pub fn infix_signature(op: TokenType) -> Option<InfixSignature> {
    use TokenType::*;
    match op {
        Plus | Minus | Star | Slash | Percent | Caret => Some(homogeneous(Type::int)),
        FPlus | FMinus | FStar | FSlash | FCaret => Some(homogeneous(Type::float)),
        CPlus | CMinus | CStar | CSlash | CCaret => Some(homogeneous(Type::complex)),
        AndAnd | OrOr => Some(homogeneous(Type::bool)),
        _ => None,
    }
}

pub fn prefix_signature(op: TokenType) -> Option<PrefixSignature> {
    use TokenType::*;
    match op {
        Minus => Some(PrefixSignature { operand: Type::int(), result: Type::int() }),
        FMinus => Some(PrefixSignature { operand: Type::float(), result: Type::float() }),
        CMinus => Some(PrefixSignature { operand: Type::complex(), result: Type::complex() }),
        Bang => Some(PrefixSignature { operand: Type::bool(), result: Type::bool() }),
        _ => None,
    }
}

/// Comparison operators take the common type of both operands and return
/// `bool`.
pub fn is_comparison(op: TokenType) -> bool {
    use TokenType::*;
    matches!(op, Equals | NotEquals | Less | LessEq | Greater | GreaterEq)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_operators_are_int() {
        for op in [
            TokenType::Plus,
            TokenType::Minus,
            TokenType::Star,
            TokenType::Slash,
            TokenType::Percent,
            TokenType::Caret,
        ] {
            let sig = infix_signature(op).unwrap();
            assert_eq!(sig.left, Type::int());
            assert_eq!(sig.right, Type::int());
            assert_eq!(sig.result, Type::int());
        }
    }

    #[test]
    fn float_and_complex_families() {
        assert_eq!(infix_signature(TokenType::FPlus).unwrap().result, Type::float());
        assert_eq!(infix_signature(TokenType::CStar).unwrap().result, Type::complex());
    }

    #[test]
    fn logical_operators_are_bool() {
        assert_eq!(infix_signature(TokenType::AndAnd).unwrap().left, Type::bool());
        assert_eq!(infix_signature(TokenType::OrOr).unwrap().result, Type::bool());
    }

    #[test]
    fn comparisons_are_not_in_the_table() {
        assert!(infix_signature(TokenType::Equals).is_none());
        assert!(infix_signature(TokenType::Less).is_none());
        assert!(is_comparison(TokenType::Equals));
        assert!(is_comparison(TokenType::NotEquals));
        assert!(is_comparison(TokenType::GreaterEq));
        assert!(!is_comparison(TokenType::Plus));
    }

    #[test]
    fn prefix_signatures() {
        assert_eq!(prefix_signature(TokenType::Minus).unwrap().operand, Type::int());
        assert_eq!(prefix_signature(TokenType::FMinus).unwrap().operand, Type::float());
        assert_eq!(prefix_signature(TokenType::CMinus).unwrap().operand, Type::complex());
        assert_eq!(prefix_signature(TokenType::Bang).unwrap().result, Type::bool());
        assert!(prefix_signature(TokenType::Plus).is_none());
    }
}
