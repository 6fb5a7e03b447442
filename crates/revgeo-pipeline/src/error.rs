use revgeo_geocoding::GeocodingError;
use revgeo_summary::SummaryError;
use thiserror::Error;

/// Errors raised while assembling the pipeline.
///
/// Resolution itself never fails; these only surface from constructors.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("geocoding client setup failed: {0}")]
    Geocoding(#[from] GeocodingError),

    #[error("summary client setup failed: {0}")]
    Summary(#[from] SummaryError),
}
