//! Light service — registration and discovery import.

use lumen_domain::error::{LumenError, ValidationError};
use lumen_domain::id::LightId;
use lumen_domain::light::Light;

use crate::ports::{LightControl, LightRepository};

/// Application service for light management.
pub struct LightService<LR, LC> {
    lights: LR,
    control: LC,
}

impl<LR: LightRepository, LC: LightControl> LightService<LR, LC> {
    /// Create a new service backed by the given repository and control port.
    pub fn new(lights: LR, control: LC) -> Self {
        Self { lights, control }
    }

    /// Register a light by device label, starting at credit 0.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::Validation`] when the label is empty, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn register(&self, label: &str) -> Result<Light, LumenError> {
        if label.trim().is_empty() {
            return Err(ValidationError::EmptyLabel.into());
        }
        self.lights.create(label).await
    }

    /// List all persisted lights.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list(&self) -> Result<Vec<Light>, LumenError> {
        self.lights.get_all().await
    }

    /// Remove a light by id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn remove(&self, id: LightId) -> Result<(), LumenError> {
        self.lights.delete(id).await
    }

    /// Run discovery on the control port and persist every label that is
    /// not registered yet. Returns the newly registered lights.
    ///
    /// # Errors
    ///
    /// Returns a device error when discovery itself fails, or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn import_discovered(&self) -> Result<Vec<Light>, LumenError> {
        let labels = self.control.discover().await?;
        let mut imported = Vec::new();
        for label in labels {
            if self.lights.get_by_label(&label).await?.is_none() {
                tracing::info!(%label, "registering discovered light");
                imported.push(self.lights.create(&label).await?);
            }
        }
        Ok(imported)
    }
}
