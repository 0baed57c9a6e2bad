//! Canvas2D renderer - replays a chart display list on an HTML5 canvas.

use super::css;
use cellscope_core::{
    BoxStyle, Color, CornerRadius, DrawCommand, Point, Rect, StrokeStyle, TextStyle,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Renderer that draws to an HTML5 Canvas 2D context.
pub struct Canvas2DRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Canvas2DRenderer {
    /// Create a new renderer for the given canvas element.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, String> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| format!("Failed to get 2d context: {e:?}"))?
            .ok_or("No 2d context available")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "Failed to cast to CanvasRenderingContext2d")?;

        Ok(Self { canvas, ctx })
    }

    /// Size the backing store to the chart surface.
    pub fn resize(&self, width: f32, height: f32) {
        self.canvas.set_width(width.ceil() as u32);
        self.canvas.set_height(height.ceil() as u32);
    }

    /// Clear the canvas.
    pub fn clear(&self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        );
    }

    /// Clear, then render a display list.
    pub fn render(&self, commands: &[DrawCommand]) {
        self.clear();
        for cmd in commands {
            self.render_command(cmd);
        }
    }

    fn render_command(&self, cmd: &DrawCommand) {
        match cmd {
            DrawCommand::Path {
                points,
                closed,
                fill,
                stroke,
            } => {
                self.draw_path(points, *closed, fill.as_ref(), stroke.as_ref());
            }
            DrawCommand::Rect {
                bounds,
                radius,
                style,
            } => {
                self.draw_rect(bounds, radius, style);
            }
            DrawCommand::Circle {
                center,
                radius,
                style,
            } => {
                self.draw_circle(center, *radius, style);
            }
            DrawCommand::Text {
                content,
                position,
                style,
            } => {
                self.draw_text(content, position, style);
            }
            DrawCommand::Clip { bounds, children } => {
                self.ctx.save();
                self.ctx.begin_path();
                self.ctx.rect(
                    f64::from(bounds.x),
                    f64::from(bounds.y),
                    f64::from(bounds.width),
                    f64::from(bounds.height),
                );
                self.ctx.clip();
                for child in children {
                    self.render_command(child);
                }
                self.ctx.restore();
            }
            DrawCommand::Opacity { alpha, children } => {
                self.ctx.save();
                self.ctx
                    .set_global_alpha(self.ctx.global_alpha() * f64::from(*alpha));
                for child in children {
                    self.render_command(child);
                }
                self.ctx.restore();
            }
        }
    }

    fn apply_stroke(&self, stroke: &StrokeStyle) {
        self.ctx.set_stroke_style_str(&css::color(&stroke.color));
        self.ctx.set_line_width(f64::from(stroke.width));
        self.ctx.set_line_cap(css::line_cap(stroke.cap));
        self.ctx.set_line_join(css::line_join(stroke.join));
        let dash = js_sys::Array::new();
        for segment in &stroke.dash {
            dash.push(&JsValue::from_f64(f64::from(*segment)));
        }
        self.ctx.set_line_dash(&dash).ok();
    }

    fn finish_box(&self, style: &BoxStyle) {
        if let Some(fill) = style.fill {
            self.ctx.set_fill_style_str(&css::color(&fill));
            self.ctx.fill();
        }
        if let Some(stroke) = &style.stroke {
            self.apply_stroke(stroke);
            self.ctx.stroke();
        }
    }

    fn draw_path(
        &self,
        points: &[Point],
        closed: bool,
        fill: Option<&Color>,
        stroke: Option<&StrokeStyle>,
    ) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };

        self.ctx.begin_path();
        self.ctx.move_to(f64::from(first.x), f64::from(first.y));
        for p in rest {
            self.ctx.line_to(f64::from(p.x), f64::from(p.y));
        }
        if closed {
            self.ctx.close_path();
        }

        if let Some(fill) = fill {
            self.ctx.set_fill_style_str(&css::color(fill));
            self.ctx.fill();
        }
        if let Some(stroke) = stroke {
            self.apply_stroke(stroke);
            self.ctx.stroke();
        }
    }

    fn draw_rect(&self, bounds: &Rect, radius: &CornerRadius, style: &BoxStyle) {
        self.ctx.begin_path();
        if radius.is_zero() {
            self.ctx.rect(
                f64::from(bounds.x),
                f64::from(bounds.y),
                f64::from(bounds.width),
                f64::from(bounds.height),
            );
        } else {
            self.rounded_rect(bounds, radius);
        }
        self.finish_box(style);
    }

    fn rounded_rect(&self, bounds: &Rect, radius: &CornerRadius) {
        let x = f64::from(bounds.x);
        let y = f64::from(bounds.y);
        let w = f64::from(bounds.width);
        let h = f64::from(bounds.height);
        // Corners never exceed half the shorter side.
        let limit = (w.min(h) / 2.0).max(0.0);
        let tl = f64::from(radius.top_left).min(limit);
        let tr = f64::from(radius.top_right).min(limit);
        let br = f64::from(radius.bottom_right).min(limit);
        let bl = f64::from(radius.bottom_left).min(limit);

        self.ctx.move_to(x + tl, y);
        self.ctx.line_to(x + w - tr, y);
        self.ctx.arc_to(x + w, y, x + w, y + tr, tr).ok();
        self.ctx.line_to(x + w, y + h - br);
        self.ctx.arc_to(x + w, y + h, x + w - br, y + h, br).ok();
        self.ctx.line_to(x + bl, y + h);
        self.ctx.arc_to(x, y + h, x, y + h - bl, bl).ok();
        self.ctx.line_to(x, y + tl);
        self.ctx.arc_to(x, y, x + tl, y, tl).ok();
        self.ctx.close_path();
    }

    fn draw_circle(&self, center: &Point, radius: f32, style: &BoxStyle) {
        if radius <= 0.0 {
            return;
        }
        self.ctx.begin_path();
        self.ctx
            .arc(
                f64::from(center.x),
                f64::from(center.y),
                f64::from(radius),
                0.0,
                std::f64::consts::TAU,
            )
            .ok();
        self.finish_box(style);
    }

    fn draw_text(&self, content: &str, position: &Point, style: &TextStyle) {
        self.ctx.save();
        self.ctx.set_font(&css::font(style));
        self.ctx.set_text_align(css::text_align(style.anchor));
        self.ctx.set_text_baseline("alphabetic");
        self.ctx.set_fill_style_str(&css::color(&style.color));
        self.ctx
            .translate(f64::from(position.x), f64::from(position.y))
            .ok();
        if style.rotation != 0.0 {
            self.ctx.rotate(f64::from(style.rotation).to_radians()).ok();
        }
        self.ctx.fill_text(content, 0.0, 0.0).ok();
        self.ctx.restore();
    }
}
