//! Dependency Resolution
//!
//! Required and optional access to services of the finalized catalog.
//!
//! Both entry points share one `dill` lookup and differ only in what an
//! [`InjectionError::Unregistered`] outcome means:
//!
//! | Entry point | Registered | Missing |
//! |-------------|------------|---------|
//! | [`ResolutionContext::required`] | `Ok(Arc<T>)` | `Err(MissingRequiredDependency)` |
//! | [`ResolutionContext::optional`] | `Some(Arc<T>)` | `None` |
//!
//! Steps declare what they need as a tuple of [`Required`] / [`Optional`]
//! elements; [`ResolutionContext::resolve_all`] resolves the whole tuple
//! left to right and stops at the first missing required element.
//!
//! ```ignore
//! let (Required(clock), Optional(flags)) =
//!     context.resolve_all::<(Required<dyn Clock>, Optional<FeatureFlags>)>()?;
//! ```

use crate::di::catalog::ServiceCatalog;
use dill::InjectionError;
use startlog_domain::error::{Error, Result};
use std::any::type_name;
use std::ops::Deref;
use std::sync::Arc;
use tracing::warn;

/// What a lookup does when the service is not registered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingPolicy {
    /// Absence is a fatal [`Error::MissingRequiredDependency`]
    Fail,
    /// Absence yields `None`
    Absent,
}

/// Resolution view over a finalized service catalog
///
/// Constructed fresh for every replayed step so lookups always observe the
/// catalog's final state.
#[derive(Clone, Copy)]
pub struct ResolutionContext<'a> {
    services: &'a ServiceCatalog,
}

impl<'a> ResolutionContext<'a> {
    pub fn new(services: &'a ServiceCatalog) -> Self {
        Self { services }
    }

    /// Shared lookup behind `required` and `optional`
    pub fn resolve<T>(&self, policy: MissingPolicy) -> Result<Option<Arc<T>>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        match self.services.catalog().get_one::<Arc<T>>() {
            Ok(service) => Ok(Some(Arc::clone(&*service))),
            Err(InjectionError::Unregistered(_)) => match policy {
                MissingPolicy::Absent => Ok(None),
                MissingPolicy::Fail => Err(Error::missing_required::<T>()),
            },
            Err(e) => Err(Error::generic(format!(
                "Failed to resolve {}: {e}",
                type_name::<T>()
            ))),
        }
    }

    /// Resolve `T`, failing if it is not registered
    pub fn required<T>(&self) -> Result<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.resolve::<T>(MissingPolicy::Fail)?
            .ok_or_else(Error::missing_required::<T>)
    }

    /// Resolve `T` if it is registered
    ///
    /// Lookup failures other than a missing registration are logged and
    /// treated as absence.
    pub fn optional<T>(&self) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.resolve::<T>(MissingPolicy::Absent)
            .unwrap_or_else(|e| {
                warn!(error = %e, "Optional dependency lookup failed");
                None
            })
    }

    /// Resolve a whole dependency set
    pub fn resolve_all<D: Dependencies>(&self) -> Result<D> {
        D::resolve(self)
    }
}

impl std::fmt::Debug for ResolutionContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionContext").finish_non_exhaustive()
    }
}

/// One element of a dependency set
pub trait Dependency: Sized {
    fn resolve(context: &ResolutionContext<'_>) -> Result<Self>;
}

/// A complete dependency set handed to a step body
///
/// Implemented for `()`, for single [`Required`] / [`Optional`] elements and
/// for tuples of up to eight elements.
pub trait Dependencies: Sized {
    fn resolve(context: &ResolutionContext<'_>) -> Result<Self>;
}

/// A dependency whose absence aborts the replay
pub struct Required<T: ?Sized>(pub Arc<T>);

impl<T: ?Sized> Required<T> {
    pub fn into_inner(self) -> Arc<T> {
        self.0
    }
}

impl<T: ?Sized> Deref for Required<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized> std::fmt::Debug for Required<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Required<{}>", std::any::type_name::<T>())
    }
}

/// A dependency that resolves to `None` when absent
pub struct Optional<T: ?Sized>(pub Option<Arc<T>>);

impl<T: ?Sized> Optional<T> {
    pub fn get(&self) -> Option<&T> {
        self.0.as_deref()
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    pub fn into_inner(self) -> Option<Arc<T>> {
        self.0
    }
}

impl<T: ?Sized> std::fmt::Debug for Optional<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Optional<{}>({})",
            std::any::type_name::<T>(),
            if self.is_present() { "present" } else { "absent" }
        )
    }
}

impl<T> Dependency for Required<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    fn resolve(context: &ResolutionContext<'_>) -> Result<Self> {
        context.required::<T>().map(Required)
    }
}

impl<T> Dependency for Optional<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    fn resolve(context: &ResolutionContext<'_>) -> Result<Self> {
        Ok(Optional(context.optional::<T>()))
    }
}

impl Dependencies for () {
    fn resolve(_context: &ResolutionContext<'_>) -> Result<Self> {
        Ok(())
    }
}

impl<T> Dependencies for Required<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    fn resolve(context: &ResolutionContext<'_>) -> Result<Self> {
        <Self as Dependency>::resolve(context)
    }
}

impl<T> Dependencies for Optional<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    fn resolve(context: &ResolutionContext<'_>) -> Result<Self> {
        <Self as Dependency>::resolve(context)
    }
}

macro_rules! impl_dependencies_for_tuple {
    ($($element:ident),+) => {
        impl<$($element: Dependency),+> Dependencies for ($($element,)+) {
            fn resolve(context: &ResolutionContext<'_>) -> Result<Self> {
                Ok(($(<$element as Dependency>::resolve(context)?,)+))
            }
        }
    };
}

impl_dependencies_for_tuple!(A);
impl_dependencies_for_tuple!(A, B);
impl_dependencies_for_tuple!(A, B, C);
impl_dependencies_for_tuple!(A, B, C, D);
impl_dependencies_for_tuple!(A, B, C, D, E);
impl_dependencies_for_tuple!(A, B, C, D, E, F);
impl_dependencies_for_tuple!(A, B, C, D, E, F, G);
impl_dependencies_for_tuple!(A, B, C, D, E, F, G, H);
