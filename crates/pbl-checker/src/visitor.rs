//! The stack of object types currently being validated.
//!
//! Visibility is decided against this stack: code nested anywhere inside a
//! type may use that type's private members, and code inside a subtype may
//! use its protected ones.

use pbl_binder::{ObjectId, ObjectMember, Visibility};
use pbl_solver::TypeMatcher;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Allowed,
    /// A private member used outside its declaring type.
    Private,
    /// A protected member used outside the declaring type's subtypes.
    Protected,
}

#[derive(Clone, Debug, Default)]
pub struct ObjectVisitor {
    stack: SmallVec<[ObjectId; 4]>,
}

impl ObjectVisitor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visit(&mut self, id: ObjectId) {
        self.stack.push(id);
    }

    pub fn leave(&mut self) {
        self.stack.pop();
    }

    /// The innermost object being validated.
    #[must_use]
    pub fn current(&self) -> Option<ObjectId> {
        self.stack.last().copied()
    }

    /// Objects being validated, innermost first.
    pub fn innermost_first(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.stack.iter().rev().copied()
    }

    #[must_use]
    pub fn is_inside(&self, id: ObjectId) -> bool {
        self.stack.contains(&id)
    }

    #[must_use]
    pub fn access(&self, matcher: &TypeMatcher<'_>, member: &ObjectMember) -> Access {
        match member.visibility {
            Visibility::All => Access::Allowed,
            Visibility::SelfOnly if self.is_inside(member.parent) => Access::Allowed,
            Visibility::SelfOnly => Access::Private,
            Visibility::Derived
                if self
                    .stack
                    .iter()
                    .any(|visited| matcher.is_subtype_of(*visited, member.parent)) =>
            {
                Access::Allowed
            }
            Visibility::Derived => Access::Protected,
        }
    }
}

#[cfg(test)]
#[path = "../tests/visitor_tests.rs"]
mod visitor_tests;
