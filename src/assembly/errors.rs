//! Assembly domain: builder failures.

use bevy::prelude::*;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuilderError {
    #[error("category name must not be empty")]
    EmptyCategoryName,
    #[error("category name '{0}' is reserved")]
    ReservedCategoryName(String),
    #[error("category '{0}' already exists")]
    DuplicateCategory(String),
    #[error("no category at index {0}")]
    CategoryOutOfRange(usize),
    #[error("category {category} has no accessory at index {index}")]
    AccessoryOutOfRange { category: usize, index: usize },
    #[error("unknown weapon '{0}'")]
    UnknownWeapon(String),
    #[error("entity {0} has no TankAssembly")]
    MissingAssembly(Entity),
}

impl BuilderError {
    /// Configuration errors abort loudly; everything else is a lookup miss.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::EmptyCategoryName
                | Self::ReservedCategoryName(_)
                | Self::DuplicateCategory(_)
                | Self::MissingAssembly(_)
        )
    }
}
