//! Report blocks: header, comparative summary, severity totals and one
//! section per site

use crate::canvas::Rgb;
use crate::encoding::{fit_text, Font};
use crate::layout::{PageLayout, CONTENT_WIDTH, MARGIN};
use crate::logo::{LogoImage, LOGO_RESOURCE};
use crate::table::{Grid, ROW_HEIGHT};
use report_types::{
    Count, ExtractionRecord, Severity, SummaryColumn, SummaryTable, NOT_AVAILABLE,
};

const LOGO_BOX: (f32, f32) = (150.0, 42.0);
const TITLE_SIZE: f32 = 20.0;
const HEADING_SIZE: f32 = 13.0;
const INFO_SIZE: f32 = 9.5;
const BLOCK_GAP: f32 = 14.0;
const METRIC_TITLE_HEIGHT: f32 = 20.0;
const MARKER_SIZE: f32 = 9.0;
const REPORT_BAR_HEIGHT: f32 = 22.0;

/// Logo (or a placeholder bar), title and generation line
pub(crate) fn draw_header(
    layout: &mut PageLayout,
    title: &str,
    subtitle: &str,
    period: Option<&str>,
    logo: Option<&LogoImage>,
) {
    let top = layout.cursor();
    let (box_w, box_h) = LOGO_BOX;

    let canvas = layout.canvas();
    match logo {
        Some(logo) => {
            let (w, h) = logo.fit(box_w, box_h);
            canvas.image(LOGO_RESOURCE, MARGIN, top - h, w, h);
        }
        None => canvas.fill_rect(MARGIN, top - box_h, box_w, box_h, Rgb::BLUE),
    }

    let text_x = MARGIN + box_w + 18.0;
    canvas.text(text_x, top - TITLE_SIZE, Font::Bold, TITLE_SIZE, Rgb::BLACK, title);
    canvas.text(
        text_x,
        top - TITLE_SIZE - 16.0,
        Font::Regular,
        INFO_SIZE,
        Rgb::DARK_GREY,
        subtitle,
    );
    if let Some(period) = period {
        canvas.text(
            text_x,
            top - TITLE_SIZE - 29.0,
            Font::Regular,
            INFO_SIZE,
            Rgb::DARK_GREY,
            &format!("Period: {}", period),
        );
    }

    layout.advance(box_h + BLOCK_GAP + 6.0);
}

fn draw_heading(layout: &mut PageLayout, heading: &str) {
    let top = layout.cursor();
    layout
        .canvas()
        .text(MARGIN, top - HEADING_SIZE, Font::Bold, HEADING_SIZE, Rgb::BLACK, heading);
    layout.advance(HEADING_SIZE + 8.0);
}

/// Draw a table whose header row is repeated after every page break
fn draw_paged_table(
    layout: &mut PageLayout,
    grid: &Grid,
    headers: &[&str],
    rows: &[Vec<String>],
    totals: Option<&[String]>,
) {
    let header_height = grid.header_height(headers);
    layout.ensure_space(header_height + ROW_HEIGHT);
    let top = layout.cursor();
    let height = grid.draw_header(layout.canvas(), top, headers, Rgb::BLUE);
    layout.advance(height);

    let body = rows
        .iter()
        .map(|row| (row.as_slice(), Font::Regular, None))
        .chain(totals.map(|row| (row, Font::Bold, Some(Rgb::LIGHT_GREY))));

    for (cells, font, fill) in body {
        if layout.ensure_space(ROW_HEIGHT) {
            let top = layout.cursor();
            let height = grid.draw_header(layout.canvas(), top, headers, Rgb::BLUE);
            layout.advance(height);
        }
        let top = layout.cursor();
        let height = grid.draw_row(layout.canvas(), top, cells, font, fill);
        layout.advance(height);
    }

    layout.advance(BLOCK_GAP);
}

/// "Comparative Summary": one row per report plus the TOTAL row
pub(crate) fn draw_summary(layout: &mut PageLayout, table: &SummaryTable) {
    draw_heading(layout, "Comparative Summary");

    let value_width = 68.0;
    let name_width = CONTENT_WIDTH - value_width * SummaryColumn::ALL.len() as f32;
    let mut widths = vec![name_width];
    widths.extend(SummaryColumn::ALL.iter().map(|_| value_width));
    let grid = Grid::new(MARGIN, widths);

    let headers = SummaryTable::headers();
    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.name.clone()];
            cells.extend(row.display_values());
            cells
        })
        .collect();

    let mut totals = vec!["TOTAL".to_string()];
    totals.extend(table.totals.display_values());

    draw_paged_table(layout, &grid, &headers, &rows, Some(&totals));
}

/// Severity totals across every report
pub(crate) fn draw_severity_totals(layout: &mut PageLayout, table: &SummaryTable) {
    draw_heading(layout, "Alert Count by Severity");

    let grid = Grid::new(MARGIN, vec![180.0, 110.0]);
    let rows: Vec<Vec<String>> = Severity::ALL
        .iter()
        .map(|severity| {
            let total = table
                .severity_total(*severity)
                .map(|v| v.to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string());
            vec![severity.label().to_string(), total]
        })
        .collect();

    draw_paged_table(layout, &grid, &["Severity", "Total Alerts"], &rows, None);
}

/// A titled two-column metric table within a report section
struct MetricBlock {
    title: &'static str,
    marker: Rgb,
    rows: Vec<(&'static str, Count)>,
}

impl MetricBlock {
    fn height(&self) -> f32 {
        METRIC_TITLE_HEIGHT + ROW_HEIGHT * (self.rows.len() + 1) as f32 + 6.0
    }
}

fn metric_blocks(record: &ExtractionRecord) -> [MetricBlock; 4] {
    let m = &record.malicious;
    let a = &record.automation;
    [
        MetricBlock {
            title: "Malicious Detections and Preventions",
            marker: Rgb::RED,
            rows: vec![
                ("Critical/High Alerts Triggered", m.alerts_triggered),
                ("Critical/High Alerts Handled", m.alerts_handled),
                ("Affected Files", m.affected_files),
                ("Remediated Files", m.remediated_files),
                ("Affected Endpoints", m.affected_endpoints),
            ],
        },
        MetricBlock {
            title: "Alert Count by Severity",
            marker: Rgb::ORANGE,
            rows: record
                .severity_counts
                .iter()
                .map(|(severity, count)| (severity.label(), count))
                .collect(),
        },
        MetricBlock {
            title: "Automation",
            marker: Rgb::PURPLE,
            rows: vec![
                ("Automatic Investigations", a.auto_investigations),
                ("Response Actions", a.response_actions),
            ],
        },
        MetricBlock {
            title: "Inventory",
            marker: Rgb::GREEN,
            rows: vec![("Active Endpoints", record.inventory.active_endpoints)],
        },
    ]
}

fn draw_metric_block(layout: &mut PageLayout, x: f32, top: f32, width: f32, block: &MetricBlock) {
    let canvas = layout.canvas();
    canvas.fill_rect(x, top - 2.0 - MARKER_SIZE, MARKER_SIZE, MARKER_SIZE, block.marker);
    canvas.text(
        x + MARKER_SIZE + 6.0,
        top - 2.0 - MARKER_SIZE + 1.0,
        Font::Bold,
        10.0,
        Rgb::BLACK,
        block.title,
    );

    let grid = Grid::new(x, vec![width * 0.7, width * 0.3]);
    let mut row_top = top - METRIC_TITLE_HEIGHT;
    row_top -= grid.draw_header(canvas, row_top, &["Metric", "Value"], Rgb::BLUE);
    for (label, count) in &block.rows {
        let cells = [label.to_string(), count.display()];
        row_top -= grid.draw_row(canvas, row_top, &cells, Font::Regular, None);
    }
}

/// "Report: <name>" bar, date lines, then the metric tables two per row
pub(crate) fn draw_report_section(layout: &mut PageLayout, record: &ExtractionRecord) {
    let blocks = metric_blocks(record);
    let column_width = (CONTENT_WIDTH - 20.0) / 2.0;
    let intro_height = REPORT_BAR_HEIGHT + 2.0 * (INFO_SIZE + 5.0) + 10.0;
    let first_pair = blocks[0].height().max(blocks[1].height());

    // Keep the title bar together with the first row of tables
    layout.ensure_space(intro_height + first_pair);

    let top = layout.cursor();
    let canvas = layout.canvas();
    canvas.fill_rect(MARGIN, top - REPORT_BAR_HEIGHT, CONTENT_WIDTH, REPORT_BAR_HEIGHT, Rgb::GREY);
    let name = fit_text(
        &format!("Report: {}", record.display_name()),
        CONTENT_WIDTH - 16.0,
        11.0,
        Font::Bold,
    );
    canvas.text(MARGIN + 8.0, top - 15.0, Font::Bold, 11.0, Rgb::BLACK, &name);

    let mut line_y = top - REPORT_BAR_HEIGHT - INFO_SIZE - 5.0;
    for line in [
        format!("Date Range: {}", record.date_range_display()),
        format!("Generated: {}", record.generated_display()),
    ] {
        canvas.text(MARGIN, line_y, Font::Regular, INFO_SIZE, Rgb::DARK_GREY, &line);
        line_y -= INFO_SIZE + 5.0;
    }
    layout.advance(intro_height);

    for pair in blocks.chunks(2) {
        let height = pair.iter().map(MetricBlock::height).fold(0.0, f32::max);
        layout.ensure_space(height);
        let top = layout.cursor();
        for (i, block) in pair.iter().enumerate() {
            let x = MARGIN + i as f32 * (column_width + 20.0);
            draw_metric_block(layout, x, top, column_width, block);
        }
        layout.advance(height);
    }

    layout.advance(BLOCK_GAP);
}
