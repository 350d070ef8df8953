//! # metatools
//!
//! Tools for writing metaclasses: the code that decides how a new class is
//! built from its bases.
//!
//! - [`iter_bases`] / [`linearize`] compute the C3 method resolution order of
//!   a list of bases and all their ancestors.
//! - [`inherit_dict`] and [`inherit_set`] copy the entries of a named
//!   collection attribute from one base into the namespace of the class being
//!   built, without overwriting anything the namespace already defines.
//! - [`MetaClass`] drives both for a declared set of attributes.
//!
//! ```
//! use metatools::prelude::*;
//! use serde_json::json;
//!
//! # fn main() -> metatools::Result<()> {
//! let mut registry = AttrDict::new();
//! registry.insert("json".into(), json!("application/json"));
//! let object = Class::root("object", Namespace::new());
//! let base = Class::new("Base", vec![object], Namespace::new().with("registry", registry))?;
//!
//! let mut namespace = Namespace::new();
//! for ancestor in iter_bases(&[base.clone()]) {
//!     let ancestor = ancestor?;
//!     inherit_dict(&ancestor, &mut namespace, "registry", DictInherit::All);
//! }
//! let child = Class::new("Child", vec![base], namespace)?;
//! assert_eq!(child.attrs().dict("registry").map(|d| d.len()), Some(1));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Error types for metaclass construction
pub mod error;

/// Attribute tables
pub mod namespace;

/// Class nodes and handles
pub mod class;

/// C3 linearization of base classes
pub mod linearize;

/// Dictionary and set attribute inheritance
pub mod inherit;

/// Settings for the construction host
pub mod settings;

/// Class construction host
pub mod metaclass;

pub use class::{Class, ClassRef};
pub use error::{MetaError, Result};
pub use inherit::{DictInherit, Inherit, SetInherit, inherit_dict, inherit_set};
pub use linearize::{AncestorChain, Linearization, iter_bases, linearize};
pub use metaclass::{Constructed, InheritanceReport, Inherited, MetaClass};
pub use namespace::{AttrDict, AttrSet, Attribute, Namespace};
pub use serde_json::Value;
pub use settings::{AttributeSettings, InheritMode, MetaSettings};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::class::*;
    pub use crate::error::{MetaError, Result};
    pub use crate::inherit::*;
    pub use crate::linearize::*;
    pub use crate::metaclass::*;
    pub use crate::namespace::*;
    pub use crate::settings::*;
}
