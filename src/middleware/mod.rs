pub mod extract;
pub mod response;

pub use extract::{RecordId, ValidJson};
pub use response::{ApiResponse, ApiResult};
