use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid draw rect: width={width}, height={height}")]
    InvalidDrawRect { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("stack positioning requires a categorical x-scale")]
    NonCategoricalScale,
}
