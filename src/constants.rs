/// Image extensions considered for sorting (lowercase, without dot)
pub const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "gif", "heic"];

/// Extension of schedule documents (compared case-insensitively)
pub const SCHEDULE_EXTENSION: &str = "pdf";

/// Column markers that identify the appointment table header
/// (time, duration, patient, personal code)
pub const HEADER_MARKERS: [&str; 4] = ["Kell", "Pikkus", "Patsient", "Isikukood"];

/// Default directory names under the invocation root
pub const DEFAULT_SCHEDULE_DIR: &str = "schedule";
pub const DEFAULT_PHOTO_DIR: &str = "photos";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Separator between client name and personal code in folder names
pub const FOLDER_ID_SEPARATOR: &str = " -- ";
