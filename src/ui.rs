use egui::{
    pos2, vec2, Align, Align2, Color32, FontId, Label, Layout, Pos2, Rect, RichText, Sense,
    Shape, Stroke, UiBuilder,
};

use crate::config::{
    COL_WIDTH_PACKED, COL_WIDTH_SIZE, COL_WIDTH_TIME, COL_WIDTH_TYPE, DROP_HINT_BORDER_COLOR,
    DROP_HINT_PADDING, DROP_HINT_PLUS_SIZE, DROP_HINT_RADIUS, DROP_HINT_TEXT_COLOR,
    HEADER_BG_COLOR, ICON_COLUMN_WIDTH, ROW_HEIGHT,
};
use crate::models::ArchiveEntry;
use crate::utils::{format_size, parse_hex_color};

const COLUMN_PADDING: f32 = 4.0;

/// Horizontal extents of the list columns within a row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Columns {
    pub icon: (f32, f32),
    pub name: (f32, f32),
    pub size: (f32, f32),
    pub unpacked: (f32, f32),
    pub modified: (f32, f32),
    pub kind: (f32, f32),
}

/// Fixed-width columns are laid out from the right edge; the name column
/// takes whatever is left and never goes negative.
pub fn layout_columns(left: f32, width: f32) -> Columns {
    let mut x = left + width;
    let mut take = |w: f32| {
        x -= w;
        (x, x + w)
    };
    let kind = take(COL_WIDTH_TYPE);
    let modified = take(COL_WIDTH_TIME);
    let unpacked = take(COL_WIDTH_PACKED);
    let size = take(COL_WIDTH_SIZE);

    let icon = (left, left + ICON_COLUMN_WIDTH);
    let name_start = icon.1 + COLUMN_PADDING;
    let name_end = (size.0 - COLUMN_PADDING).max(name_start);

    Columns {
        icon,
        name: (name_start, name_end),
        size,
        unpacked,
        modified,
        kind,
    }
}

fn cell(ui: &mut egui::Ui, row: Rect, (x0, x1): (f32, f32), text: RichText) {
    if x1 <= x0 {
        return;
    }
    let rect = Rect::from_x_y_ranges(x0..=x1, row.y_range());
    let mut child = ui.new_child(
        UiBuilder::new()
            .max_rect(rect)
            .layout(Layout::left_to_right(Align::Center)),
    );
    child.add(Label::new(text).truncate());
}

pub fn draw_header(ui: &mut egui::Ui) {
    egui::Frame::none()
        .fill(parse_hex_color(HEADER_BG_COLOR))
        .show(ui, |ui| {
            let (row, _) =
                ui.allocate_exact_size(vec2(ui.available_width(), ROW_HEIGHT), Sense::hover());
            let columns = layout_columns(row.left(), row.width());
            let strong = |text: &str| RichText::new(text).strong().color(Color32::DARK_GRAY);
            cell(ui, row, columns.name, strong("Name"));
            cell(ui, row, columns.size, strong("Size"));
            cell(ui, row, columns.unpacked, strong("Unpacked"));
            cell(ui, row, columns.modified, strong("Modified"));
            cell(ui, row, columns.kind, strong("Type"));
        });
    ui.separator();
}

fn entry_glyph(entry: &ArchiveEntry) -> &'static str {
    if entry.is_directory {
        "📁"
    } else if entry.is_image() {
        "🖼"
    } else {
        "📄"
    }
}

pub fn draw_archive_contents(ui: &mut egui::Ui, entries: &[ArchiveEntry]) {
    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show_rows(ui, ROW_HEIGHT, entries.len(), |ui, range| {
            for entry in &entries[range] {
                let (row, response) =
                    ui.allocate_exact_size(vec2(ui.available_width(), ROW_HEIGHT), Sense::hover());
                if response.hovered() {
                    ui.painter()
                        .rect_filled(row, 2.0, ui.visuals().widgets.hovered.weak_bg_fill);
                }
                let columns = layout_columns(row.left(), row.width());

                cell(ui, row, columns.icon, RichText::new(entry_glyph(entry)));
                if entry.is_directory {
                    cell(ui, row, columns.name, RichText::new(format!("{}/", entry.name)).strong());
                    cell(ui, row, columns.kind, RichText::new("Folder"));
                } else {
                    cell(ui, row, columns.name, RichText::new(&entry.name).strong());
                    cell(ui, row, columns.size, RichText::new(format_size(entry.packed_size)));
                    cell(ui, row, columns.unpacked, RichText::new(format_size(entry.size)));
                    cell(ui, row, columns.kind, RichText::new("File"));
                }
                cell(ui, row, columns.modified, RichText::new(&entry.modified));

                response.on_hover_text(entry.name.as_str());
            }
        });
}

/// Closed outline of `rect` with rounded corners, first point repeated last.
pub fn rounded_rect_path(rect: Rect, radius: f32) -> Vec<Pos2> {
    const ARC_SEGMENTS: usize = 8;
    let r = radius.min(rect.width() / 2.0).min(rect.height() / 2.0).max(0.0);
    let corners = [
        (pos2(rect.right() - r, rect.top() + r), -90.0_f32),
        (pos2(rect.right() - r, rect.bottom() - r), 0.0),
        (pos2(rect.left() + r, rect.bottom() - r), 90.0),
        (pos2(rect.left() + r, rect.top() + r), 180.0),
    ];

    let mut path = Vec::with_capacity(4 * (ARC_SEGMENTS + 1) + 1);
    for (center, start) in corners {
        for step in 0..=ARC_SEGMENTS {
            let angle = (start + 90.0 * step as f32 / ARC_SEGMENTS as f32).to_radians();
            path.push(center + r * vec2(angle.cos(), angle.sin()));
        }
    }
    if let Some(&first) = path.first() {
        path.push(first);
    }
    path
}

/// Empty-state placeholder: dashed rounded border with a plus sign.
pub fn draw_drop_hint(ui: &mut egui::Ui, highlighted: bool) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click());
    let border = rect.shrink(DROP_HINT_PADDING);
    if border.width() <= 0.0 || border.height() <= 0.0 {
        return response;
    }

    let painter = ui.painter_at(rect);
    let color = if highlighted || response.hovered() {
        ui.visuals().selection.stroke.color
    } else {
        parse_hex_color(DROP_HINT_BORDER_COLOR)
    };

    let outline = rounded_rect_path(border.shrink(2.0), DROP_HINT_RADIUS);
    painter.extend(Shape::dashed_line(&outline, Stroke::new(2.0, color), 8.0, 8.0));

    let center = border.center();
    let half = DROP_HINT_PLUS_SIZE / 2.0;
    let plus = Stroke::new(3.0, color);
    painter.line_segment([center - vec2(0.0, half), center + vec2(0.0, half)], plus);
    painter.line_segment([center - vec2(half, 0.0), center + vec2(half, 0.0)], plus);

    painter.text(
        pos2(rect.center().x, rect.center().y + 30.0),
        Align2::CENTER_TOP,
        "Drop an archive here",
        FontId::proportional(22.0),
        parse_hex_color(DROP_HINT_TEXT_COLOR),
    );

    response.on_hover_cursor(egui::CursorIcon::PointingHand)
}
