use crate::Result;
use crate::chart::path::{path_length, smooth_path};
use crate::chart::scale::{self, YAxis};
use crate::chart::{ChartGeometry, ChartPalette, fmt_num};
use crate::config::Color;
use crate::traffic::DayTotals;
use chrono::NaiveDate;
use core::fmt::Write;
use std::collections::BTreeMap;

const MARGIN_TOP: f64 = 60.0;
const MARGIN_RIGHT: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 80.0;
const MARGIN_LEFT: f64 = 60.0;

const LINE_WIDTH: f64 = 4.0;
const POINT_RADIUS: f64 = 4.0;
const GRID_DASH: &str = "5,5";
const ANIMATION: &str = "2s";
const FONT_FAMILY: &str = "Arial";

/// Render the traffic chart as an SVG document.
pub fn generate<W: Write>(
    profile_name: &str,
    totals: &BTreeMap<NaiveDate, DayTotals>,
    palette: &ChartPalette,
    geometry: ChartGeometry,
    writer: &mut W,
) -> Result<()> {
    let mut generator = SvgGenerator::new(writer, palette, geometry);
    generator.generate(profile_name, totals)
}

struct SvgGenerator<'a, W: Write> {
    writer: &'a mut W,
    palette: &'a ChartPalette,
    geometry: ChartGeometry,
    width: f64,
    height: f64,
    plot_width: f64,
    plot_height: f64,
}

impl<'a, W: Write> SvgGenerator<'a, W> {
    fn new(writer: &'a mut W, palette: &'a ChartPalette, geometry: ChartGeometry) -> Self {
        let width = f64::from(geometry.width);
        let height = f64::from(geometry.height);
        Self {
            writer,
            palette,
            geometry,
            width,
            height,
            plot_width: width - MARGIN_LEFT - MARGIN_RIGHT,
            plot_height: height - MARGIN_TOP - MARGIN_BOTTOM,
        }
    }

    #[expect(clippy::cast_precision_loss, reason = "daily traffic counts are far below 2^52")]
    fn generate(&mut self, profile_name: &str, totals: &BTreeMap<NaiveDate, DayTotals>) -> Result<()> {
        let dates: Vec<NaiveDate> = totals.keys().copied().collect();
        let views: Vec<u64> = totals.values().map(|day| day.views).collect();
        let clones: Vec<u64> = totals.values().map(|day| day.clones).collect();

        let max_value = views.iter().chain(&clones).copied().max().unwrap_or(0) as f64;
        let y_axis = scale::nice_ticks(max_value, self.geometry.ticks);
        let y_scale = if y_axis.max > 0.0 { self.plot_height / y_axis.max } else { 1.0 };
        let x_step = scale::x_step(self.plot_width, dates.len());

        self.write_header()?;
        self.write_background()?;
        self.write_title(profile_name)?;
        self.write_axes()?;
        self.write_y_grid(&y_axis, y_scale)?;
        self.write_x_grid(dates.len(), x_step)?;

        // Clones first so the views series ends up on top, matching the
        // legend order.
        let clone_points = self.data_points(&clones, x_step, y_scale);
        let view_points = self.data_points(&views, x_step, y_scale);
        self.write_series(&clone_points, self.palette.clones_line, self.palette.clones_point)?;
        self.write_series(&view_points, self.palette.views_line, self.palette.views_point)?;

        self.write_x_labels(&dates, x_step)?;
        self.write_captions()?;
        self.write_legend()?;
        self.write_footer()?;
        Ok(())
    }

    #[expect(clippy::cast_precision_loss, reason = "daily traffic counts are far below 2^52")]
    fn data_points(&self, values: &[u64], x_step: f64, y_scale: f64) -> Vec<(f64, f64)> {
        values
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                (
                    (i as f64).mul_add(x_step, MARGIN_LEFT),
                    self.height - MARGIN_BOTTOM - value as f64 * y_scale,
                )
            })
            .collect()
    }

    fn write_header(&mut self) -> Result<()> {
        writeln!(
            self.writer,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.geometry.width,
            h = self.geometry.height
        )?;
        Ok(())
    }

    fn write_background(&mut self) -> Result<()> {
        writeln!(
            self.writer,
            r#"<rect x="0" y="0" width="{}" height="{}" rx="{r}" ry="{r}" fill="{}" fill-opacity="{}"/>"#,
            self.geometry.width,
            self.geometry.height,
            self.palette.background.hex(),
            opacity(self.palette.background),
            r = self.geometry.radius
        )?;
        Ok(())
    }

    fn write_title(&mut self, profile_name: &str) -> Result<()> {
        writeln!(
            self.writer,
            r#"<text x="{}" y="{}" text-anchor="middle" fill="{}" fill-opacity="{}" style="font-size: 20px; font-family: {FONT_FAMILY}">{}'s Repo Traffic Stats</text>"#,
            fmt_num(self.width / 2.0),
            fmt_num(MARGIN_TOP / 2.0),
            self.palette.text.hex(),
            opacity(self.palette.text),
            xml_escape(profile_name)
        )?;
        Ok(())
    }

    fn write_axes(&mut self) -> Result<()> {
        let grid = self.palette.grid;
        self.write_line(
            (MARGIN_LEFT, self.height - MARGIN_BOTTOM),
            (self.width - MARGIN_RIGHT, self.height - MARGIN_BOTTOM),
            grid,
        )?;
        self.write_line((MARGIN_LEFT, MARGIN_TOP), (MARGIN_LEFT, self.height - MARGIN_BOTTOM), grid)?;
        Ok(())
    }

    fn write_line(&mut self, start: (f64, f64), end: (f64, f64), color: Color) -> Result<()> {
        writeln!(
            self.writer,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-opacity="{}"/>"#,
            fmt_num(start.0),
            fmt_num(start.1),
            fmt_num(end.0),
            fmt_num(end.1),
            color.hex(),
            opacity(color)
        )?;
        Ok(())
    }

    /// Horizontal gridlines with their tick labels.
    fn write_y_grid(&mut self, y_axis: &YAxis, y_scale: f64) -> Result<()> {
        for &tick in &y_axis.ticks {
            let y_pos = self.height - MARGIN_BOTTOM - tick * y_scale;

            self.write_gridline((MARGIN_LEFT, y_pos), (self.width - MARGIN_RIGHT, y_pos))?;

            writeln!(
                self.writer,
                r#"<text x="{}" y="{}" text-anchor="end" fill="{}" fill-opacity="{}" style="font-size: 12px; font-family: {FONT_FAMILY}">{}</text>"#,
                fmt_num(MARGIN_LEFT - 10.0),
                fmt_num(y_pos + 5.0),
                self.palette.text.hex(),
                opacity(self.palette.text),
                fmt_num(tick)
            )?;
        }
        Ok(())
    }

    /// Vertical gridlines, one per data point.
    fn write_x_grid(&mut self, point_count: usize, x_step: f64) -> Result<()> {
        for i in 0..point_count {
            #[expect(clippy::cast_precision_loss, reason = "point counts are small")]
            let x = (i as f64).mul_add(x_step, MARGIN_LEFT);
            self.write_gridline((x, MARGIN_TOP), (x, self.height - MARGIN_BOTTOM))?;
        }
        Ok(())
    }

    fn write_gridline(&mut self, start: (f64, f64), end: (f64, f64)) -> Result<()> {
        writeln!(
            self.writer,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-opacity="{}" stroke-width="1" stroke-dasharray="{GRID_DASH}" opacity="0.5"/>"#,
            fmt_num(start.0),
            fmt_num(start.1),
            fmt_num(end.0),
            fmt_num(end.1),
            self.palette.grid.hex(),
            opacity(self.palette.grid)
        )?;
        Ok(())
    }

    /// One data series: its point markers, then the smoothed line with a
    /// draw-in animation over the path's length.
    fn write_series(&mut self, points: &[(f64, f64)], line: Color, point: Color) -> Result<()> {
        if points.is_empty() {
            return Ok(());
        }

        for &(x, y) in points {
            writeln!(
                self.writer,
                r#"<circle cx="{}" cy="{}" r="{}" fill="{}" fill-opacity="{}"/>"#,
                fmt_num(x),
                fmt_num(y),
                fmt_num(POINT_RADIUS),
                point.hex(),
                opacity(point)
            )?;
        }

        let length = fmt_num(path_length(points));
        writeln!(
            self.writer,
            r#"<path d="{}" stroke="{}" stroke-opacity="{}" fill="none" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round" stroke-dasharray="{length}" stroke-dashoffset="{length}">"#,
            smooth_path(points),
            line.hex(),
            opacity(line),
            fmt_num(LINE_WIDTH)
        )?;
        writeln!(
            self.writer,
            r#"<animate attributeName="stroke-dashoffset" from="{length}" to="0" dur="{ANIMATION}" repeatCount="1" fill="freeze"/>"#
        )?;
        writeln!(self.writer, "</path>")?;
        Ok(())
    }

    /// Day-of-month labels, rotated under the x axis.
    fn write_x_labels(&mut self, dates: &[NaiveDate], x_step: f64) -> Result<()> {
        for (i, date) in dates.iter().enumerate() {
            #[expect(clippy::cast_precision_loss, reason = "point counts are small")]
            let x = (i as f64).mul_add(x_step, MARGIN_LEFT);
            let y = self.height - MARGIN_BOTTOM + 20.0;
            writeln!(
                self.writer,
                r#"<text x="{x_fmt}" y="{y_fmt}" transform="rotate(45, {x_fmt}, {y_fmt})" fill="{}" fill-opacity="{}" style="font-size: 12px; font-family: {FONT_FAMILY}">{}</text>"#,
                self.palette.text.hex(),
                opacity(self.palette.text),
                date.format("%d"),
                x_fmt = fmt_num(x),
                y_fmt = fmt_num(y)
            )?;
        }
        Ok(())
    }

    fn write_captions(&mut self) -> Result<()> {
        writeln!(
            self.writer,
            r#"<text x="{}" y="{}" text-anchor="middle" fill="{}" fill-opacity="{}" style="font-size: 14px; font-family: {FONT_FAMILY}">Days</text>"#,
            fmt_num(self.width / 2.0),
            fmt_num(self.height - MARGIN_BOTTOM / 3.0),
            self.palette.text.hex(),
            opacity(self.palette.text)
        )?;

        let x = MARGIN_LEFT / 3.0;
        let y = self.height / 2.0;
        writeln!(
            self.writer,
            r#"<text x="{x_fmt}" y="{y_fmt}" text-anchor="middle" transform="rotate(-90, {x_fmt}, {y_fmt})" fill="{}" fill-opacity="{}" style="font-size: 14px; font-family: {FONT_FAMILY}">Count</text>"#,
            self.palette.text.hex(),
            opacity(self.palette.text),
            x_fmt = fmt_num(x),
            y_fmt = fmt_num(y)
        )?;
        Ok(())
    }

    fn write_legend(&mut self) -> Result<()> {
        let legend_y = self.height - MARGIN_BOTTOM / 3.0 + 15.0;
        let center = self.width / 2.0;

        self.write_legend_entry(center - 60.0, legend_y, self.palette.clones_line, "Clones", 30.0)?;
        self.write_legend_entry(center + 40.0, legend_y, self.palette.views_line, "Views", 30.0)?;
        Ok(())
    }

    fn write_legend_entry(&mut self, x: f64, y: f64, color: Color, label: &str, text_offset: f64) -> Result<()> {
        writeln!(
            self.writer,
            r#"<line x1="{}" y1="{y_fmt}" x2="{}" y2="{y_fmt}" stroke="{}" stroke-opacity="{}" stroke-width="3"/>"#,
            fmt_num(x),
            fmt_num(x + 20.0),
            color.hex(),
            opacity(color),
            y_fmt = fmt_num(y)
        )?;
        writeln!(
            self.writer,
            r#"<text x="{}" y="{}" fill="{}" fill-opacity="{}" style="font-size: 12px; font-family: {FONT_FAMILY}">{}</text>"#,
            fmt_num(x + text_offset),
            fmt_num(y + 5.0),
            self.palette.text.hex(),
            opacity(self.palette.text),
            label
        )?;
        Ok(())
    }

    fn write_footer(&mut self) -> Result<()> {
        writeln!(self.writer, "</svg>")?;
        Ok(())
    }
}

fn opacity(color: Color) -> String {
    fmt_num(f64::from(color.opacity()))
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
