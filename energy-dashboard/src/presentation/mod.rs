//! Turning a `DashboardView` into something a user looks at.

use energy_domain::domain::{Co2Grade, CompositionSnapshot, RoiEstimate, TrendSeries};

use crate::{
    pipeline::{BuildingPanel, DashboardView, Section},
    sinks::UploadOutcome,
    sources::RawPreview,
};

pub mod text;

pub use text::TextPresenter;

/// Receives each section of the page in display order.
///
/// Every section arrives as its own `Section`, so an implementation renders
/// a local fallback for one failed section and carries on with the rest.
pub trait Presenter {
    type Output;

    fn building(&mut self, panel: &BuildingPanel);
    fn preview(&mut self, preview: &Section<RawPreview>);
    fn upload(&mut self, outcome: &UploadOutcome);
    fn trend(&mut self, trend: &Section<TrendSeries>);
    fn composition(&mut self, composition: &Section<CompositionSnapshot>);
    fn roi(&mut self, roi: &Section<RoiEstimate>);
    fn co2(&mut self, co2: &Section<Co2Grade>);
    fn recommendations(&mut self, items: &[&str]);
    fn finish(self) -> Self::Output;
}

/// Walk the view top to bottom, the way the page lays it out.
pub fn present<P: Presenter>(
    view: &DashboardView,
    upload: Option<&UploadOutcome>,
    mut presenter: P,
) -> P::Output {
    presenter.building(&view.building);

    if let Some(charts) = &view.charts {
        presenter.preview(&charts.preview);
        if let Some(outcome) = upload {
            presenter.upload(outcome);
        }
        presenter.trend(&charts.trend);
        presenter.composition(&charts.composition);
    }

    presenter.roi(&view.roi);
    presenter.co2(&view.co2);
    presenter.recommendations(&view.recommendations);
    presenter.finish()
}
