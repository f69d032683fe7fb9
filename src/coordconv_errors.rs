use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoordConvError {
    #[error("Vector too short to define a direction (|p|² = {0:e})")]
    DegenerateVector(f64),

    #[error("Apparent-place inversion did not converge after {iterations} iterations")]
    Convergence { iterations: usize },

    #[error("Value out of range: {0}")]
    Range(String),

    #[error("Observer data is required for topocentric and observed coordinates")]
    MissingObserverData,

    #[error("Refraction coefficients are required for observed coordinates")]
    MissingRefraction,

    #[error("Invalid conversion parameter: {0}")]
    InvalidParameter(String),

    #[error("Unable to parse date: {0}")]
    DateParsing(#[from] hifitime::HifitimeError),
}

impl PartialEq for CoordConvError {
    fn eq(&self, other: &Self) -> bool {
        use CoordConvError::*;
        match (self, other) {
            (DegenerateVector(a), DegenerateVector(b)) => a == b,
            (Convergence { iterations: a }, Convergence { iterations: b }) => a == b,
            (Range(a), Range(b)) => a == b,
            (InvalidParameter(a), InvalidParameter(b)) => a == b,

            // hifitime errors carry no useful equality: same variant is enough
            (DateParsing(_), DateParsing(_)) => true,

            (MissingObserverData, MissingObserverData) => true,
            (MissingRefraction, MissingRefraction) => true,

            _ => false,
        }
    }
}
