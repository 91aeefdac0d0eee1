pub mod attribute;
pub mod node;

pub use attribute::{Attribute, AttributeError, AttributeResult};
pub use node::Node;
