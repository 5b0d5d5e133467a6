//! Testing utilities and harness for variadic child views

pub mod matchers;
pub mod test_rule;

pub use matchers::*;
pub use test_rule::*;

pub mod prelude {
    pub use crate::matchers::{has_id, has_tag, has_trait, is_structural, SubviewMatcher};
    pub use crate::test_rule::VariadicTestRule;
}
