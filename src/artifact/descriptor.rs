use std::any::{Any, TypeId};
use std::fmt;

/// Produces a fresh, type-erased instance.
pub type Constructor = fn() -> Box<dyn Any + Send>;

/// Describes a type the engine may be asked to instantiate.
///
/// The descriptor is all a strategy gets: a name for diagnostics and
/// configuration lookup, the concrete type identity, and, when the type is
/// default-constructible, its zero-argument constructor.
#[derive(Clone, Copy)]
pub struct ArtifactType {
    name: &'static str,
    type_id: TypeId,
    constructor: Option<Constructor>,
}

fn construct<T: Default + Send + 'static>() -> Box<dyn Any + Send> {
    Box::new(T::default())
}

impl ArtifactType {
    /// Descriptor for a default-constructible type.
    pub fn of<T: Default + Send + 'static>() -> Self {
        Self {
            name: std::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
            constructor: Some(construct::<T>),
        }
    }

    /// Descriptor for a type without a zero-argument constructor.
    ///
    /// Only a strategy that knows how to build `T` some other way (a
    /// container provider, for instance) can create it.
    pub fn opaque<T: Send + 'static>() -> Self {
        Self {
            name: std::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
            constructor: None,
        }
    }

    /// Replace the diagnostic name, e.g. with the name used in configuration.
    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn constructor(&self) -> Option<Constructor> {
        self.constructor
    }

    pub fn has_default_constructor(&self) -> bool {
        self.constructor.is_some()
    }

    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

impl fmt::Debug for ArtifactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtifactType")
            .field("name", &self.name)
            .field("default_constructor", &self.has_default_constructor())
            .finish()
    }
}

impl PartialEq for ArtifactType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id && self.name == other.name
    }
}

impl Eq for ArtifactType {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Listener;

    struct NeedsArgs(#[allow(dead_code)] u32);

    #[test]
    fn test_descriptor_identity() {
        let listener = ArtifactType::of::<Listener>();
        assert!(listener.is::<Listener>());
        assert!(!listener.is::<NeedsArgs>());
        assert!(listener.has_default_constructor());
        assert!(listener.name().ends_with("Listener"));
    }

    #[test]
    fn test_opaque_has_no_constructor() {
        let opaque = ArtifactType::opaque::<NeedsArgs>().named("com.acme.NeedsArgs");
        assert!(!opaque.has_default_constructor());
        assert_eq!(opaque.name(), "com.acme.NeedsArgs");
    }
}
