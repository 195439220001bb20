pub mod chan;
mod data_source;
mod level;
pub mod record;
mod request;

pub use chan::{ChanAnalysis, LevelData, LevelResult};
pub use data_source::DataSource;
pub use level::Level;
pub use record::{
    BspRecord, Category, CenterRecord, FlatRecord, FractalRecord, LineRecord, Provenance, Scalar,
    SegmentRecord, StrokeRecord,
};
pub use request::AnalysisRequest;
