mod condition;
pub(crate) mod expr;
mod field;
mod record;
pub(crate) mod value;
mod values;
mod variant;

pub use condition::{Condition, Predicate};
pub use expr::{key, CompareOp, Expr, KeyExpr};
pub use field::Field;
pub use record::{Entry, Output, Record};
pub use value::{compare, is_truthy};
pub use values::{Lookup, Values};
pub use variant::{Base, Variant, DEFAULT_COMPONENT};
