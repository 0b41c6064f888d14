pub mod batch;
pub mod config;
pub mod parser;
pub mod record;

pub use config::{ParserConfig, Preset};
pub use parser::{parse_cv, parse_cv_bytes, segment};
pub use record::{CvRecord, Education, Experience};
