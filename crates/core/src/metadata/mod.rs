//! Article metadata: header extraction, defaulting and timestamp
//! normalization.

pub mod defaults;
pub mod header;
pub mod timestamp;

pub use defaults::{PUBLISHED_SEGMENT, default_permalink, default_title, sanitize_metadata};
pub use header::{ArticleHeader, HeaderError, extract_entry_data, find_header, parse_header};
pub use timestamp::{DATE_FORMAT, TimestampError, epoch_from_date, parse_timestamp};
