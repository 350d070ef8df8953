//! Explicit class nodes
//!
//! A [`Class`] is an immutable node carrying its name, its declared bases,
//! its precomputed ancestor list and its own attribute table. Classes are
//! shared through [`ClassRef`] handles whose equality is identity, so two
//! distinct classes with the same name never compare equal.

use crate::error::Result;
use crate::linearize::{AncestorChain, linearize};
use crate::namespace::{AttrDict, AttrSet, Attribute, Namespace};
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;
use tracing::debug;

/// A constructed class
#[derive(Debug)]
pub struct Class {
    name: String,
    bases: Vec<ClassRef>,
    ancestors: Vec<ClassRef>,
    attrs: Namespace,
}

impl Class {
    /// Create a root class with no bases
    #[must_use]
    pub fn root(name: impl Into<String>, attrs: Namespace) -> ClassRef {
        Self::from_parts(name.into(), Vec::new(), Vec::new(), attrs)
    }

    /// Create a class from its bases, computing its method resolution order.
    ///
    /// With no bases this is the same as [`Class::root`].
    ///
    /// # Errors
    ///
    /// Returns [`MetaError::InconsistentHierarchy`](crate::MetaError::InconsistentHierarchy)
    /// if the bases cannot be linearized.
    pub fn new(name: impl Into<String>, bases: Vec<ClassRef>, attrs: Namespace) -> Result<ClassRef> {
        let name = name.into();
        let ancestors = linearize(&bases)?;
        debug!(class = %name, mro_len = ancestors.len() + 1, "class created");
        Ok(Self::from_parts(name, bases, ancestors, attrs))
    }

    /// Assemble a class whose ancestors were already linearized
    pub(crate) fn from_parts(
        name: String,
        bases: Vec<ClassRef>,
        ancestors: Vec<ClassRef>,
        attrs: Namespace,
    ) -> ClassRef {
        ClassRef(Arc::new(Self {
            name,
            bases,
            ancestors,
            attrs,
        }))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bases in declaration order
    #[must_use]
    pub fn bases(&self) -> &[ClassRef] {
        &self.bases
    }

    /// All ancestors in resolution order, excluding the class itself
    #[must_use]
    pub fn ancestors(&self) -> &[ClassRef] {
        &self.ancestors
    }

    /// The class's own attributes
    #[must_use]
    pub fn attrs(&self) -> &Namespace {
        &self.attrs
    }

    /// Look up an attribute on this class only
    #[must_use]
    pub fn own_attr(&self, name: &str) -> Option<&Attribute> {
        self.attrs.get(name)
    }
}

/// Shared handle to a [`Class`]
#[derive(Clone)]
pub struct ClassRef(Arc<Class>);

impl ClassRef {
    /// The class followed by its ancestors
    #[must_use]
    pub fn mro(&self) -> Vec<ClassRef> {
        std::iter::once(self.clone())
            .chain(self.ancestors.iter().cloned())
            .collect()
    }

    /// Whether `other` is this class or one of its ancestors
    #[must_use]
    pub fn is_subclass_of(&self, other: &ClassRef) -> bool {
        self == other || self.ancestors.contains(other)
    }

    /// Resolve an attribute through the method resolution order
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Attribute> {
        self.own_attr(name)
            .or_else(|| self.ancestors.iter().find_map(|c| c.own_attr(name)))
    }

    /// The dictionary named `name`, or an empty one.
    ///
    /// Lookup follows the method resolution order. An attribute of another
    /// kind is treated as absent.
    #[must_use]
    pub fn get_dict(&self, name: &str) -> Cow<'_, AttrDict> {
        match self.lookup(name) {
            Some(Attribute::Dict(dict)) => Cow::Borrowed(dict),
            Some(other) => {
                tracing::warn!(class = %self.name, attr = name, kind = other.kind(), "expected a dict");
                Cow::Owned(AttrDict::new())
            }
            None => Cow::Owned(AttrDict::new()),
        }
    }

    /// The set named `name`, or an empty one.
    ///
    /// Lookup follows the method resolution order. An attribute of another
    /// kind is treated as absent.
    #[must_use]
    pub fn get_set(&self, name: &str) -> Cow<'_, AttrSet> {
        match self.lookup(name) {
            Some(Attribute::Set(set)) => Cow::Borrowed(set),
            Some(other) => {
                tracing::warn!(class = %self.name, attr = name, kind = other.kind(), "expected a set");
                Cow::Owned(AttrSet::new())
            }
            None => Cow::Owned(AttrSet::new()),
        }
    }
}

impl Deref for ClassRef {
    type Target = Class;

    fn deref(&self) -> &Class {
        &self.0
    }
}

impl PartialEq for ClassRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ClassRef {}

impl Hash for ClassRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.0), state);
    }
}

impl fmt::Debug for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<class '{}'>", self.name)
    }
}

impl fmt::Display for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl AncestorChain for ClassRef {
    fn mro(&self) -> Vec<Self> {
        ClassRef::mro(self)
    }

    fn class_name(&self) -> String {
        self.name.clone()
    }
}
