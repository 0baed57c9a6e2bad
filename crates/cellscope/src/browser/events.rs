//! Browser event handling - converts DOM pointer events to cellscope Events.

use super::bridge::wheel_pixels;
use cellscope_core::{Event, MouseButton, Point};
use web_sys::{MouseEvent, WheelEvent};

/// Pointer position relative to the target canvas.
fn offset(event: &MouseEvent) -> Point {
    Point::new(event.offset_x() as f32, event.offset_y() as f32)
}

/// Convert a DOM mouse event to a cellscope Event.
///
/// Returns `None` for event types the charts do not consume.
pub fn mouse_event_to_cellscope(event: &MouseEvent, event_type: &str) -> Option<Event> {
    let position = offset(event);
    let button = MouseButton::from_dom(event.button());

    match event_type {
        "mousedown" => Some(Event::MouseDown { position, button }),
        "mouseup" => Some(Event::MouseUp { position, button }),
        "mousemove" => Some(Event::MouseMove { position }),
        "mouseleave" | "mouseout" => Some(Event::MouseLeave),
        _ => None,
    }
}

/// Convert a DOM wheel event to a scroll Event in pixel units.
pub fn wheel_event_to_cellscope(event: &WheelEvent) -> Event {
    Event::Scroll {
        position: offset(event),
        delta_y: wheel_pixels(event.delta_y(), event.delta_mode()),
    }
}
