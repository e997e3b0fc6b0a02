pub mod analysis;
pub mod error;
pub mod utils;

pub use analysis::*;
pub use error::{Result, ResultExt, WeaveError};
pub use utils::{
    estimate_tokens, file_name, file_stem, log_filter_error,
    normalize_separators, relative_to,
};
