//! dill Catalog - Finalizable Service Container
//!
//! Services are staged during composition and handed to a
//! [`dill::CatalogBuilder`] when [`ServiceCatalogBuilder::build`] runs.
//! Options-style `configure` callbacks are applied to the staged values
//! first, in registration order, so the frozen catalog reflects every
//! mutation made during composition rather than the value at the moment a
//! service was added.
//!
//! ## Architecture
//!
//! ```text
//! composition (staged)             build()                     runtime
//! ────────────────────             ───────                     ───────
//! add_value(T) / add_arc(Arc<T>) → configure callbacks      →  Catalog::get_one::<Arc<T>>()
//!                                  CatalogBuilder::add_value
//! ```
//!
//! Every service is registered with dill as an `Arc<T>` value, which lets
//! concrete types and trait objects share a single lookup path.
//!
//! ## Usage
//!
//! ```ignore
//! let mut services = ServiceCatalogBuilder::new();
//! services
//!     .add_value(FeatureFlags::default())
//!     .add_arc::<dyn LoggerFactory>(Arc::new(TracingLoggerFactory::new()))
//!     .configure::<FeatureFlags, _>(|flags| flags.beta = true);
//!
//! let catalog = services.build()?;
//! let flags: Arc<FeatureFlags> = catalog.get().expect("registered");
//! ```

use crate::di::resolver::ResolutionContext;
use dill::{Catalog, CatalogBuilder};
use startlog_domain::error::{Error, Result};
use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// A service waiting to be handed to dill
trait StagedService: Send {
    fn type_name(&self) -> &'static str;

    /// Mutable access to the value, if it is still exclusively owned
    fn value_mut(&mut self) -> Option<&mut dyn Any>;

    fn register(self: Box<Self>, builder: &mut CatalogBuilder);
}

struct Owned<T>(T);

impl<T: Send + Sync + 'static> StagedService for Owned<T> {
    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn value_mut(&mut self) -> Option<&mut dyn Any> {
        Some(&mut self.0)
    }

    fn register(self: Box<Self>, builder: &mut CatalogBuilder) {
        builder.add_value(Arc::new(self.0));
    }
}

struct Shared<T: ?Sized>(Arc<T>);

impl<T: ?Sized + Send + Sync + 'static> StagedService for Shared<T> {
    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn value_mut(&mut self) -> Option<&mut dyn Any> {
        None
    }

    fn register(self: Box<Self>, builder: &mut CatalogBuilder) {
        builder.add_value(self.0);
    }
}

type Staged = HashMap<TypeId, Box<dyn StagedService>>;
type ConfigureFn = Box<dyn FnOnce(&mut Staged) -> Result<()> + Send>;

/// Composition-phase builder for a [`ServiceCatalog`]
#[derive(Default)]
pub struct ServiceCatalogBuilder {
    services: Staged,
    configure: Vec<ConfigureFn>,
}

impl ServiceCatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn stage(&mut self, id: TypeId, service: Box<dyn StagedService>) -> &mut Self {
        let service_name = service.type_name();
        if self.services.insert(id, service).is_some() {
            debug!(service = service_name, "Replacing service registration");
        }
        self
    }

    /// Register `value` as the service for `T`, replacing any earlier registration
    ///
    /// Values added this way can still be adjusted with [`Self::configure`].
    pub fn add_value<T: Send + Sync + 'static>(&mut self, value: T) -> &mut Self {
        self.stage(TypeId::of::<T>(), Box::new(Owned(value)))
    }

    /// Register an already shared service, typically a trait object
    pub fn add_arc<T>(&mut self, service: Arc<T>) -> &mut Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.stage(TypeId::of::<T>(), Box::new(Shared(service)))
    }

    /// Queue a mutation of the `T` service, applied when the catalog is built
    ///
    /// When no `T` has been added by build time, `T::default()` is registered
    /// first. Services added with [`Self::add_arc`] cannot be configured.
    pub fn configure<T, F>(&mut self, configure: F) -> &mut Self
    where
        T: Default + Send + Sync + 'static,
        F: FnOnce(&mut T) + Send + 'static,
    {
        self.configure.push(Box::new(move |services: &mut Staged| {
            let staged = services
                .entry(TypeId::of::<T>())
                .or_insert_with(|| Box::new(Owned(T::default())) as Box<dyn StagedService>);
            let value = staged
                .value_mut()
                .ok_or_else(|| {
                    Error::configuration(format!(
                        "Cannot configure shared service {}",
                        type_name::<T>()
                    ))
                })?
                .downcast_mut::<T>()
                .ok_or_else(|| {
                    Error::configuration(format!(
                        "Service entry for {} does not hold that type",
                        type_name::<T>()
                    ))
                })?;
            configure(value);
            Ok(())
        }));
        self
    }

    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        self.services.contains_key(&TypeId::of::<T>())
    }

    /// Apply queued configuration and freeze the catalog
    pub fn build(self) -> Result<ServiceCatalog> {
        let Self {
            mut services,
            configure,
        } = self;

        let configured = configure.len();
        for apply in configure {
            apply(&mut services)?;
        }

        let mut builder = CatalogBuilder::new();
        let mut names = HashMap::with_capacity(services.len());
        for (id, service) in services {
            names.insert(id, service.type_name());
            service.register(&mut builder);
        }

        debug!(services = names.len(), configured, "Built dill Catalog");
        Ok(ServiceCatalog {
            catalog: builder.build(),
            names,
        })
    }
}

impl std::fmt::Debug for ServiceCatalogBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceCatalogBuilder")
            .field(
                "services",
                &self.services.values().map(|s| s.type_name()).collect::<Vec<_>>(),
            )
            .field("pending_configure", &self.configure.len())
            .finish()
    }
}

/// Frozen, read-only service container backed by a [`dill::Catalog`]
pub struct ServiceCatalog {
    catalog: Catalog,
    names: HashMap<TypeId, &'static str>,
}

impl ServiceCatalog {
    pub fn builder() -> ServiceCatalogBuilder {
        ServiceCatalogBuilder::new()
    }

    /// The underlying dill catalog
    ///
    /// Services are registered as `Arc<T>`, so direct lookups take the form
    /// `catalog().get_one::<Arc<T>>()`.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Look up the service registered for `T`
    pub fn get<T>(&self) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        ResolutionContext::new(self).optional::<T>()
    }

    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        self.names.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl std::fmt::Debug for ServiceCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceCatalog")
            .field("services", &self.names.values().collect::<Vec<_>>())
            .finish()
    }
}
