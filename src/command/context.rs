use crate::core::Result;
use crate::native::{ManagerRegistry, NativeEntity, NativeQueryManager};
use std::sync::Arc;
use uuid::Uuid;

/// Live scope of one command: the session it runs in and the managers it
/// may use. Only valid for the duration of [`super::Command::execute`].
pub struct CommandContext {
    session_id: Uuid,
    managers: Arc<ManagerRegistry>,
}

impl CommandContext {
    pub(crate) fn new(session_id: Uuid, managers: Arc<ManagerRegistry>) -> Self {
        Self {
            session_id,
            managers,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Manager serving result entities of type `T`.
    pub fn manager<T: NativeEntity>(&self) -> Result<Arc<dyn NativeQueryManager<T>>> {
        self.managers.manager::<T>()
    }
}
