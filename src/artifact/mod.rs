pub mod container;
pub mod descriptor;
pub mod factory;
pub mod registry;

pub use container::ContainerArtifactFactory;
pub use descriptor::{ArtifactType, Constructor};
pub use factory::{ArtifactFactory, ArtifactFactoryExt, DefaultArtifactFactory};
pub use registry::ArtifactTypeRegistry;
