//! Renderer registry.
//!
//! [`RendererRegistry`] maps renderer type identifiers to [`Renderer`]
//! implementations. It is built once at startup, then shared read-only:
//!
//! ```
//! use std::sync::Arc;
//! use cellrender::{CellValue, RenderConfig, RendererRegistry};
//!
//! let registry = Arc::new(RendererRegistry::with_builtins());
//!
//! let config = RenderConfig::new("boolean").with("showAsTag", false);
//! let shown = registry.apply(&CellValue::from("1"), Some(&config), None);
//! assert_eq!(shown.text(), "Sim");
//! ```
//!
//! # Lookup and Fallback
//!
//! [`get`](RendererRegistry::get) resolves a type to its renderer. Unknown
//! types resolve to the renderer registered under [`DEFAULT_RENDERER`]; when
//! that is missing too, the lookup yields `None` and callers show the raw
//! value.
//!
//! # Duplicate Registration
//!
//! By default a second registration for the same type replaces the first
//! and is reported through [`RenderEvents::renderer_overwritten`]. Use
//! [`DuplicatePolicy::Reject`] to turn that into a
//! [`RegistryError::Duplicate`] instead. Overwrites keep the type's original
//! position in [`list`](RendererRegistry::list).

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::config::ConfigMap;
use crate::error::RegistryError;
use crate::events::{RenderEvents, TracingEvents};
use crate::field::FieldDescriptor;
use crate::renderer::Renderer;
use crate::renderers;

/// Registry key of the fallback renderer.
pub const DEFAULT_RENDERER: &str = "default";

/// What happens when a type is registered twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Replace the previous renderer and report the overwrite.
    #[default]
    Overwrite,
    /// Refuse the registration with [`RegistryError::Duplicate`].
    Reject,
}

/// Selector entry describing one registered renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RendererInfo {
    /// The registry key.
    pub value: String,
    /// The renderer's label, or the key when it has none.
    pub label: String,
    pub description: String,
}

/// Maps renderer type identifiers to renderers.
pub struct RendererRegistry {
    /// Registered renderers in registration order.
    entries: Vec<(String, Arc<dyn Renderer>)>,

    /// Position of each key in `entries`.
    index: HashMap<String, usize>,

    events: Arc<dyn RenderEvents>,

    policy: DuplicatePolicy,
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererRegistry")
            .field("types", &self.keys().collect::<Vec<_>>())
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl RendererRegistry {
    /// Creates an empty registry reporting through [`TracingEvents`].
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            events: Arc::new(TracingEvents),
            policy: DuplicatePolicy::default(),
        }
    }

    /// Creates a registry with the `default`, `boolean` and `date`
    /// renderers already registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (renderer_type, renderer) in renderers::builtins() {
            registry.insert(renderer_type.to_string(), renderer);
        }
        registry
    }

    /// Replaces the event sink.
    pub fn with_events(mut self, events: Arc<dyn RenderEvents>) -> Self {
        self.events = events;
        self
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.policy
    }

    pub(crate) fn events(&self) -> &dyn RenderEvents {
        self.events.as_ref()
    }

    /// Registers `renderer` under `renderer_type`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::InvalidRegistration`] when the type is empty or
    ///   only whitespace.
    /// - [`RegistryError::Duplicate`] when the type is taken and the policy
    ///   is [`DuplicatePolicy::Reject`].
    pub fn register<R>(
        &mut self,
        renderer_type: impl Into<String>,
        renderer: R,
    ) -> Result<(), RegistryError>
    where
        R: Renderer + 'static,
    {
        self.register_arc(renderer_type, Arc::new(renderer))
    }

    /// Registers an already shared renderer, e.g. one instance under
    /// several type identifiers.
    pub fn register_arc(
        &mut self,
        renderer_type: impl Into<String>,
        renderer: Arc<dyn Renderer>,
    ) -> Result<(), RegistryError> {
        let renderer_type = renderer_type.into();
        if renderer_type.trim().is_empty() {
            return Err(RegistryError::InvalidRegistration {
                renderer: renderer_type,
                reason: "type identifier must not be empty".to_string(),
            });
        }

        if self.policy == DuplicatePolicy::Reject && self.has(&renderer_type) {
            return Err(RegistryError::Duplicate {
                renderer: renderer_type,
            });
        }
        self.insert(renderer_type, renderer);
        Ok(())
    }

    /// Stores a renderer, replacing in place and reporting when the type is
    /// already taken.
    fn insert(&mut self, renderer_type: String, renderer: Arc<dyn Renderer>) {
        match self.index.get(&renderer_type) {
            Some(&pos) => {
                self.events.renderer_overwritten(&renderer_type);
                self.entries[pos].1 = renderer;
            }
            None => {
                self.index.insert(renderer_type.clone(), self.entries.len());
                self.entries.push((renderer_type, renderer));
            }
        }
    }

    /// Returns the renderer for `renderer_type`, or the default renderer
    /// when the type is unknown. `None` only when neither exists.
    pub fn get(&self, renderer_type: &str) -> Option<&Arc<dyn Renderer>> {
        self.lookup(renderer_type)
            .or_else(|| self.lookup(DEFAULT_RENDERER))
    }

    /// Exact lookup without the default fallback.
    pub fn lookup(&self, renderer_type: &str) -> Option<&Arc<dyn Renderer>> {
        self.index
            .get(renderer_type)
            .map(|&pos| &self.entries[pos].1)
    }

    /// Selector entries for every registered renderer, in registration order.
    pub fn list(&self) -> Vec<RendererInfo> {
        self.entries
            .iter()
            .map(|(key, renderer)| RendererInfo {
                value: key.clone(),
                label: renderer.label().unwrap_or(key).to_string(),
                description: renderer.description().to_string(),
            })
            .collect()
    }

    /// Configuration inputs of the renderer `get` resolves to.
    pub fn fields(&self, renderer_type: &str) -> Vec<FieldDescriptor> {
        self.get(renderer_type)
            .map(|renderer| renderer.fields())
            .unwrap_or_default()
    }

    /// Default options of the renderer `get` resolves to.
    pub fn default_config(&self, renderer_type: &str) -> ConfigMap {
        self.get(renderer_type)
            .map(|renderer| renderer.default_config())
            .unwrap_or_default()
    }

    /// Returns `true` if a renderer is registered under exactly this type.
    pub fn has(&self, renderer_type: &str) -> bool {
        self.index.contains_key(renderer_type)
    }

    /// Number of distinct registered types.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Registered type identifiers in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }
}
