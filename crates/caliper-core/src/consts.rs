/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Small epsilon to avoid division by zero in floating-point comparisons.
pub const EPSILON: f32 = 1e-10;

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;

/// Zoom factor magnitude for one discrete scroll tick.
pub const ZOOM_STEP: f64 = 1.1;

/// Smallest visible span (image units) a zoom may shrink the viewport to.
/// Keeps the screen-to-image mapping invertible.
pub const MIN_VIEW_SPAN: f64 = 1e-6;

/// Default file the session writes its measurements to.
pub const DEFAULT_MEASUREMENTS_FILE: &str = "measurements.csv";

/// CSV header written before the measurement rows.
pub const MEASUREMENT_HEADER: [&str; 6] =
    ["Name", "Start X", "Start Y", "End X", "End Y", "Length (px)"];

/// Prefix of snapshot files written next to the report.
pub const SNAPSHOT_PREFIX: &str = "screenshot_";

/// Timestamp format embedded in snapshot and report file names.
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
