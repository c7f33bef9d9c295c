pub mod error;
pub mod validation;
pub mod formats;
pub mod fs;

pub use error::{
    ConverterError,
    ConverterResult,
    PathError,
    UserErrorKind,
    ValidationError,
    CONVERSION_FAILURE_MESSAGE,
    INVALID_UPLOAD_MESSAGE,
};
pub use validation::{filter_accepted, is_accepted_type, validate_input_path};
pub use formats::{ImageFormat, format_from_extension, mime_type_for_path};
pub use fs::{extract_filename, unique_path};
