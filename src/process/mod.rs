/*!
 * Process Module
 * Process descriptors and their creation
 */

pub mod attributes;
pub mod factory;
pub mod types;

pub use attributes::{AttributeSource, RandomAttributes, ScriptedAttributes};
pub use factory::ProcessFactory;
pub use types::{Attributes, Process};
