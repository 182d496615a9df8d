//! Builder for list load controllers.

use crate::builder::config::LoadConfig;
use crate::builder::error::{BuildError, Requirement};
use crate::controller::{
    ClassifyFn, Items, ListLoadController, ListView, MergeFn, ReportFn, ResultPredicate,
    Strategies,
};
use crate::core::{Classify, Guard, LoadState};
use std::fmt;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Fluent builder for [`ListLoadController`].
///
/// `view`, `merge`, `has_more` and `classify` are required; every missing one
/// is reported by a single `build()` call. The collection defaults to
/// `C::default()`.
///
/// # Example
///
/// ```rust
/// use listload::builder::ListLoadBuilder;
/// use listload::controller::RecordingView;
/// use listload::core::{DisplayState, ErrorClass};
///
/// let controller = ListLoadBuilder::new()
///     .view(RecordingView::new())
///     .merge(|items: &mut Vec<String>, page: Vec<String>, _refresh| items.extend(page))
///     .has_more(|page: &Vec<String>| page.len() == 20)
///     .classify(|_: &std::io::Error| ErrorClass::Network)
///     .build()
///     .unwrap();
///
/// assert_eq!(controller.display_state(), DisplayState::Empty);
/// ```
pub struct ListLoadBuilder<C, T, E, V> {
    items: Option<C>,
    view: Option<V>,
    merge: Option<MergeFn<C, T>>,
    has_more: Option<ResultPredicate<T>>,
    success_flag: Option<ResultPredicate<T>>,
    classify: Option<ClassifyFn<E>>,
    report: Option<ReportFn<E>>,
    start_when: Option<Guard<LoadState>>,
    config: LoadConfig,
}

impl<C, T, E, V> ListLoadBuilder<C, T, E, V>
where
    C: Items + Default,
    T: 'static,
    E: fmt::Display + 'static,
    V: ListView,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            items: None,
            view: None,
            merge: None,
            has_more: None,
            success_flag: None,
            classify: None,
            report: None,
            start_when: None,
            config: LoadConfig::default(),
        }
    }

    /// Initial contents of the backing collection.
    pub fn items(mut self, items: C) -> Self {
        self.items = Some(items);
        self
    }

    /// Presentation surface (required).
    pub fn view(mut self, view: V) -> Self {
        self.view = Some(view);
        self
    }

    /// Merge a result into the collection (required).
    ///
    /// Receives the collection, the result and the refresh flag. With
    /// `clear_on_refresh` (the default) the collection is already empty when
    /// the flag is set.
    pub fn merge<F>(mut self, merge: F) -> Self
    where
        F: FnMut(&mut C, T, bool) + Send + 'static,
    {
        self.merge = Some(Box::new(merge));
        self
    }

    /// Pagination termination rule (required).
    pub fn has_more<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.has_more = Some(Box::new(predicate));
        self
    }

    /// Success flag carried by the result envelope (optional, default `true`).
    pub fn success_flag<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.success_flag = Some(Box::new(predicate));
        self
    }

    /// Map errors to display classes (required).
    pub fn classify<F>(mut self, classify: F) -> Self
    where
        F: Fn(&E) -> crate::core::ErrorClass + Send + Sync + 'static,
    {
        self.classify = Some(Box::new(classify));
        self
    }

    /// Use the error type's own [`Classify`] implementation.
    pub fn classify_by_trait(self) -> Self
    where
        E: Classify,
    {
        self.classify(|e: &E| e.class())
    }

    /// Error reporter (optional, default logs at error level).
    pub fn report<F>(mut self, report: F) -> Self
    where
        F: FnMut(&E) + Send + 'static,
    {
        self.report = Some(Box::new(report));
        self
    }

    /// Extra start condition, checked after the in-flight check.
    pub fn start_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&LoadState) -> bool + Send + Sync + 'static,
    {
        self.start_when = Some(Guard::new(predicate));
        self
    }

    pub fn config(mut self, config: LoadConfig) -> Self {
        self.config = config;
        self
    }

    /// Accumulate every missing requirement.
    fn validate(&self) -> Validation<(), NonEmptyVec<Requirement>> {
        let checks = vec![
            require(self.view.is_some(), Requirement::View),
            require(self.merge.is_some(), Requirement::Merge),
            require(self.has_more.is_some(), Requirement::HasMore),
            require(self.classify.is_some(), Requirement::Classify),
        ];
        Validation::all_vec(checks).map(|_| ())
    }

    /// Build the controller.
    /// Returns an error listing every required step that was skipped.
    pub fn build(self) -> Result<ListLoadController<C, T, E, V>, BuildError> {
        if let Validation::Failure(missing) = self.validate() {
            return Err(BuildError::Missing(missing.iter().copied().collect()));
        }

        let view = self.view.ok_or(BuildError::Missing(vec![Requirement::View]))?;
        let merge = self
            .merge
            .ok_or(BuildError::Missing(vec![Requirement::Merge]))?;
        let has_more = self
            .has_more
            .ok_or(BuildError::Missing(vec![Requirement::HasMore]))?;
        let classify = self
            .classify
            .ok_or(BuildError::Missing(vec![Requirement::Classify]))?;

        let strategies = Strategies {
            merge,
            has_more,
            success_flag: self.success_flag.unwrap_or_else(|| Box::new(|_: &T| true)),
            classify,
            report: self.report.unwrap_or_else(|| Box::new(log_error::<E>)),
        };

        let start_gate = match self.start_when {
            Some(extra) => Guard::not_loading().and(extra),
            None => Guard::not_loading(),
        };

        Ok(ListLoadController::from_parts(
            self.items.unwrap_or_default(),
            view,
            strategies,
            start_gate,
            self.config,
        ))
    }
}

impl<C, T, E, V> Default for ListLoadBuilder<C, T, E, V>
where
    C: Items + Default,
    T: 'static,
    E: fmt::Display + 'static,
    V: ListView,
{
    fn default() -> Self {
        Self::new()
    }
}

fn require(present: bool, requirement: Requirement) -> Validation<(), NonEmptyVec<Requirement>> {
    if present {
        Validation::success(())
    } else {
        Validation::fail(requirement)
    }
}

fn log_error<E: fmt::Display>(error: &E) {
    tracing::error!(%error, "list load failed");
}
