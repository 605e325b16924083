// All tunables live here; the program takes no command-line arguments.

pub const WINDOW_TITLE: &str = "7zz Extract Helper";
pub const WINDOW_WIDTH: f32 = 920.0;
pub const WINDOW_HEIGHT: f32 = 600.0;

/// Basename of the bundled archive tool.
pub const SEVEN_ZZ_BASENAME: &str = "7zz";

pub const FONT_FILE_NAME: &str = "NotoSansSC-Regular.ttf";
pub const ICON_FILE_NAME: &str = "Icon.png";

// List column widths, in points
pub const COL_WIDTH_SIZE: f32 = 120.0;
pub const COL_WIDTH_PACKED: f32 = 120.0;
pub const COL_WIDTH_TIME: f32 = 160.0;
pub const COL_WIDTH_TYPE: f32 = 80.0;
pub const ICON_COLUMN_WIDTH: f32 = 20.0;
pub const ROW_HEIGHT: f32 = 28.0;

pub const HEADER_BG_COLOR: &str = "#F5F5F5";

pub const DROP_HINT_PADDING: f32 = 16.0;
pub const DROP_HINT_BORDER_COLOR: &str = "#888888";
pub const DROP_HINT_TEXT_COLOR: &str = "#888888";
pub const DROP_HINT_PLUS_SIZE: f32 = 40.0;
pub const DROP_HINT_RADIUS: f32 = 16.0;

pub const DIALOG_MIN_WIDTH: f32 = 300.0;
pub const DIALOG_MIN_HEIGHT: f32 = 100.0;
