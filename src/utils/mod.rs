pub mod akademik;
pub mod extractor;
pub mod jwt;
pub mod parameter_error_handler;
pub mod password;
pub mod random_code;
pub mod validate;

pub use extractor::{SafeIDI64, SafeMahasiswaIdI64};
pub use parameter_error_handler::{json_error_handler, path_error_handler, query_error_handler};
